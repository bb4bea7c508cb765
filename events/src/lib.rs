//! Event bus: every tick the simulation core pushes tagged events instead of
//! mutating shell-owned state (audio, screen shake, floating damage numbers)
//! directly. The shell drains the bus once per frame and reacts.

mod bus;
mod event;

pub use bus::EventBus;
pub use event::{AttackWeight, DamageNumberKind, Event};
