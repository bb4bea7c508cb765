//! # Combat Crate
//!
//! The damage pipeline and projectile manager: given a
//! swing that's already past range/cooldown checks, resolves blocking,
//! effectiveness, stagger/high-ground multipliers, crits, and poise, and
//! emits [`events::Event`]s for the shell to react to. The arena controller
//! (`arena` crate) owns per-swing state (hit-sets, cooldowns, attack
//! windows) and calls into this crate once a swing is confirmed active.

mod damage;
mod effectiveness;
mod power;
mod projectile;

pub use damage::{
    apply_poise_damage, combo_multiplier, pre_mitigation_damage, resolve_attack, AttackOutcome,
    AttackRoll, AttackWeight, BlockState,
};
pub use effectiveness::effectiveness;
pub use power::effective_weapon_mult;
pub use projectile::{is_occluded_by_ally, predictive_aim_direction, Projectile, ProjectileManager};
