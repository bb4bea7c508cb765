//! # Stats Crate
//!
//! Shared combatant record used by every participant in a battle or on the
//! overworld — the player, allied troops, enemies, and army markers all
//! share the same [`Entity`]/[`Stats`] shape; the `kind`/`role` fields select
//! behavior, not structure (see `ai` for the behavior tables keyed on them).
//!
//! ## Core Components
//!
//! - [`Entity`]: position, kinematics, equipment slot and combat state.
//! - [`Stats`]: pools, progression, primary attributes, derived combat stats.
//! - [`derive`]: pure recomputation of derived stats from primary attributes.
//! - [`xp_for_level`]/[`current_difficulty`]: progression formulas.

mod derive;
mod entity;
mod stats;
mod team;
mod xp;

pub use derive::derive;
pub use entity::{Entity, EntityId, EntityKind, Role};
pub use stats::{Stats, POISE_REGEN_DELAY, POISE_REGEN_PER_SEC};
pub use team::Team;
pub use xp::{current_difficulty, xp_for_level};
