//! # Overworld Crate
//!
//! The persistent-within-a-session strategic layer: faction
//! territory, roaming army markers, AI-vs-AI auto-resolve, diplomacy
//! toggling, and the collision check that hands a battle off to the `arena`
//! crate. Entities here reuse `stats::Entity` with `kind == ArmyMarker` —
//! the overworld never defines its own combatant record.

mod ai_state;
mod config;
mod faction;
mod location;
mod simulator;
mod terrain;
mod world;

pub use ai_state::{OverworldAiState, PatrolState};
pub use config::WorldConfig;
pub use faction::{FactionRelations, RelationStatus, BANDIT_FACTION};
pub use location::{Location, LocationKind};
pub use simulator::{tick_world, EncounterTriggered};
pub use terrain::{blocks_movement, speed_multiplier, Terrain, TerrainKind};
pub use world::{World, DEFAULT_FACTIONS};
