//! Warbound Marches — headless simulation shell.
//!
//! The core tick-driven simulation (overworld + arena) lives in the
//! `overworld`/`arena`/`ai`/`combat`/`stats`/`items`/`events` crates; this
//! binary only wires them into a runnable loop, keeping "game logic
//! crates" separate from "application shell". Rendering is out of scope,
//! so this shell drives the tick loop headlessly and logs the event
//! stream instead of drawing it.

mod cli;
mod session;

use clap::Parser;
use cli::Args;
use session::GameSession;

fn main() {
    env_logger::init();
    let args = Args::parse();

    log::info!("starting warbound session (seed {})", args.seed);
    let mut session = GameSession::new(args.seed);

    let encounter = run_overworld_until_encounter(&mut session, &args);

    match encounter {
        Some(encounter) => {
            let outcome = session.run_encounter(encounter, args.dt);
            log::info!(
                "battle finished: victory={} player_hp={:.1} xp={} gold={}",
                outcome.victory,
                outcome.player_hp,
                outcome.xp_granted,
                outcome.gold_granted,
            );
        }
        None => {
            log::info!(
                "no encounter triggered within {} overworld ticks",
                args.max_overworld_ticks
            );
        }
    }

    if let Err(e) = write_save(&session, &args) {
        log::error!("failed to write save file: {e}");
    }
}

fn run_overworld_until_encounter(session: &mut GameSession, args: &Args) -> Option<overworld::EncounterTriggered> {
    for tick in 0..args.max_overworld_ticks {
        session.drift_player_towards_danger(args.dt);
        if let Some(encounter) = session.tick_overworld(args.dt) {
            log::info!("encounter found after {tick} overworld ticks");
            return Some(encounter);
        }
    }
    None
}

fn write_save(session: &GameSession, args: &Args) -> Result<(), persistence::SaveError> {
    let save_file = persistence::build_save_file(
        &session.player,
        &session.troops,
        &session.relations,
        &session.world,
        session.current_location.as_deref(),
        session.game_time,
    );
    persistence::save_game(&save_file, std::path::Path::new(&args.save_path), std::path::Path::new(&args.backup_dir))
}
