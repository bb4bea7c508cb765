use serde::{Deserialize, Serialize};

/// The combat statistics carried by every [`crate::Entity`].
///
/// Primary attributes (`strength`, `agility`, `vitality`, `charisma`,
/// `skill`) are the only fields a player allocates directly; everything
/// under "derived" is recomputed by [`crate::derive`] and must never be
/// hand-edited outside of it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Stats {
    // Pools
    pub hp: f32,
    pub hp_max: f32,
    pub stamina: f32,
    pub stamina_max: f32,
    pub poise: f32,
    pub poise_max: f32,

    // Progression
    pub level: i32,
    pub xp: i64,
    pub xp_to_next_level: i64,
    pub attribute_points: i32,

    // Economy (save-boundary only; never read by combat resolution)
    pub food: f32,
    pub gold: i64,

    // Primary attributes
    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub charisma: i32,
    pub skill: i32,

    // Derived (computed, capped — see `derive::derive`)
    pub atk: f32,
    pub spd: f32,
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub block_power: f32,
    pub parry_window: f32,
    pub defense: f32,
    pub attack_speed_bonus: f32,
    pub stamina_regen_bonus: f32,
    pub gold_bonus: f32,
    pub troop_bonus: f32,
    pub shop_discount: f32,

    // Transient combat state
    pub is_staggered: bool,
    pub stagger_timer: f32,
    /// Seconds before poise regen resumes after the last poise-damaging
    /// hit; reset to `POISE_REGEN_DELAY` on every poise loss.
    pub poise_regen_delay: f32,
}

/// Delay before poise starts regenerating after a poise-damaging hit.
pub const POISE_REGEN_DELAY: f32 = 3.0;
/// Poise regen rate once the delay has elapsed.
pub const POISE_REGEN_PER_SEC: f32 = 33.0;

impl Stats {
    /// A level-1 entity with base-10 attributes, stats derived immediately.
    pub fn new_level_one() -> Self {
        let mut s = Self {
            hp: 0.0,
            hp_max: 0.0,
            stamina: 0.0,
            stamina_max: 0.0,
            poise: 100.0,
            poise_max: 100.0,
            level: 1,
            xp: 0,
            xp_to_next_level: crate::xp_for_level(2),
            attribute_points: 0,
            food: 100.0,
            gold: 0,
            strength: 10,
            agility: 10,
            vitality: 10,
            charisma: 10,
            skill: 10,
            atk: 0.0,
            spd: 0.0,
            crit_chance: 0.0,
            crit_damage: 0.0,
            block_power: 0.0,
            parry_window: 0.0,
            defense: 0.0,
            attack_speed_bonus: 0.0,
            stamina_regen_bonus: 0.0,
            gold_bonus: 1.0,
            troop_bonus: 0.0,
            shop_discount: 0.0,
            is_staggered: false,
            stagger_timer: 0.0,
            poise_regen_delay: 0.0,
        };
        crate::derive(&mut s);
        s.hp = s.hp_max;
        s.stamina = s.stamina_max;
        s
    }

    pub fn alive(&self) -> bool {
        self.hp > 0.0
    }

    /// Grant `xp`, repeatedly leveling up while the threshold is crossed.
    /// Each level grants one attribute point, recomputes derived stats, and
    /// heals to full.
    ///
    /// `xp_to_next_level` is re-derived from [`crate::xp_for_level`] at
    /// `level + 1` each time; it is not an independent counter a caller can
    /// drift out of sync with `level`.
    pub fn grant_xp(&mut self, xp: i64) {
        let mut raw = self.xp + xp;
        let mut leveled = false;
        while raw >= crate::xp_for_level(self.level + 1) {
            self.level += 1;
            self.attribute_points += 1;
            leveled = true;
            crate::derive(self);
            self.hp = self.hp_max;
        }
        self.xp = if leveled {
            raw - crate::xp_for_level(self.level)
        } else {
            raw
        };
        self.xp_to_next_level = crate::xp_for_level(self.level + 1);
    }
}
