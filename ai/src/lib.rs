//! # AI Crate - Enemy and Troop Behaviour
//!
//! Pure per-tick decision logic for non-player combatants. Contains no
//! simulation state beyond the small per-entity state structs callers are
//! expected to store and pass back in (`EnemyAiState`, `TroopAiState`) —
//! this crate never owns entities or mutates hp/position directly.
//!
//! ## Separation of Concerns
//!
//! - `ai` crate: "What should this enemy/troop do this tick?"
//! - `combat` crate: "How is a landed swing resolved?"
//! - `arena` crate: "Run the tick loop and apply AI decisions to entities."

pub mod enemy;
pub mod formation;
pub mod profile;
pub mod troop;

pub use enemy::{tick_enemy, EnemyAiDecision, EnemyAiState, EnemyState};
pub use profile::Profile;
pub use troop::{tick_troop, Order, TroopAiDecision, TroopAiState};
