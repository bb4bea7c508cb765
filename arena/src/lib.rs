//! # Arena Crate
//!
//! The tick-driven battle simulation: RNG/clock and the arena controller
//! that drives one battle end to end, calling into `ai` for decisions and
//! `combat` for damage/projectiles every frame.

mod clock;
mod combo;
mod config;
mod controller;
mod outcome;
mod rng;

pub use clock::{Clock, HIT_PAUSE_DT_SCALE, MAX_DT};
pub use combo::ComboState;
pub use config::ArenaConfig;
pub use controller::{ArenaController, PlayerAttackWeight, PlayerIntent};
pub use outcome::BattleOutcome;
pub use rng::seeded_rng;
