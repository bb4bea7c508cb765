//! # Persistence Crate
//!
//! Save/load boundary: schema-versioned JSON, step-by-step
//! migration, top-level validation, and timestamped backups. Nothing here
//! runs every tick — it is invoked only on explicit save/load requests from
//! the shell.

mod backup;
mod error;
mod io;
mod migration;
mod schema;
mod timestamp;

pub use error::{LoadError, SaveError};
pub use io::{build_save_file, restore_equipment, restore_player_stats, save_game, load_game};
pub use migration::{apply_migrations, validate_save_data};
pub use schema::{EquipmentSave, PlayerSave, PlayerStatsSave, SaveFile, TroopSave, TroopStatsSave, WorldSave, CURRENT_SAVE_VERSION};
pub use timestamp::now_iso8601;

/// Faction ids the current build actually spawns castles for, used by
/// migration to seed `relations` defaults for a pre-1.2 save.
pub(crate) fn world_faction_ids() -> Vec<&'static str> {
    overworld::DEFAULT_FACTIONS.to_vec()
}
