use clap::Parser;

/// Warbound Marches - headless simulation shell.
///
/// Rendering, sprites, and UI are out of scope for this build;
/// this binary only exists to wire the overworld and arena crates into a
/// runnable tick loop and demonstrate the save/load boundary. A real game
/// shell would drive `GameSession` from a windowing/render loop instead of
/// the synthetic input this CLI generates.
#[derive(Parser, Debug)]
#[command(name = "warbound", about = "Warbound Marches simulation core", version)]
pub struct Args {
    /// World/battle seed. Two runs with the same seed and tick count produce
    /// identical event streams.
    #[arg(long, default_value_t = 1)]
    pub seed: u64,

    /// Maximum overworld ticks to simulate while waiting for an encounter.
    #[arg(long, default_value_t = 4000)]
    pub max_overworld_ticks: u32,

    /// Fixed per-tick delta, seconds (60 Hz target).
    #[arg(long, default_value_t = 1.0 / 60.0)]
    pub dt: f32,

    /// Path to write a save file to after the run completes.
    #[arg(long, default_value = "saves/savegame.json")]
    pub save_path: String,

    /// Directory backups are written under.
    #[arg(long, default_value = "saves/backups")]
    pub backup_dir: String,
}
