//! Team affiliation for combatants.
//!
//! Arena battles use two teams (`A`/`B`); the overworld additionally tags
//! entities with a `faction` string carried on [`crate::Entity`] so that
//! diplomacy (war/peace) can be resolved independently of arena sides.

use serde::{Deserialize, Serialize};

/// Arena-side affiliation. Most battles only ever use `A` (allies, including
/// the player and troops) vs `B` (enemies); AI-vs-AI overworld encounters can
/// assemble two factions each fighting on behalf of side `A`/`B`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Team {
    A,
    B,
}

impl Team {
    pub fn opposite(self) -> Team {
        match self {
            Team::A => Team::B,
            Team::B => Team::A,
        }
    }
}
