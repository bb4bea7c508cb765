use crate::stats::Stats;
use crate::team::Team;
use geo::Vec2;
use items::Equipment;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

pub type EntityId = Uuid;

/// Selects which controller drives an entity — not its structure, which is
/// uniform.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EntityKind {
    Player,
    Troop,
    Enemy,
    ArmyMarker,
}

/// Combat role tag; drives formation placement and AI profile selection
/// (`ai::enemy`, `ai::troop`). `subtype` carries faction-specific flavor
/// (e.g. "hoplite", "cataphract") that the AI profile lookup also consults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Role {
    Infantry,
    Archer,
    Tank,
    Cavalry,
    Monster,
}

/// The unit of combatants shared by every mode: player, troop, enemy, and
/// overworld army marker all use this same record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Entity {
    pub id: EntityId,
    pub kind: EntityKind,
    pub team: Team,
    pub faction: String,

    pub position: Vec2,
    pub last_position: Vec2,
    pub radius: f32,

    pub stats: Stats,
    pub equipment: Equipment,

    pub role: Option<Role>,
    pub subtype: Option<String>,

    /// Seconds remaining of post-hit invulnerability.
    pub invuln_timer: f32,

    /// Only meaningful when `kind == ArmyMarker`.
    pub army_size: Option<i32>,
    pub avg_tier: Option<i32>,
}

pub const INVULN_DURATION: f32 = 0.3;
/// Shield flat armor bump, capped overall effective armor at 0.9.
const SHIELD_ARMOR_BONUS: f32 = 0.10;
const MAX_EFFECTIVE_ARMOR: f32 = 0.9;

impl Entity {
    pub fn new(kind: EntityKind, team: Team, faction: impl Into<String>, position: Vec2, radius: f32, stats: Stats) -> Self {
        Self {
            id: Uuid::new_v4(),
            kind,
            team,
            faction: faction.into(),
            position,
            last_position: position,
            radius,
            stats,
            equipment: Equipment::new(),
            role: None,
            subtype: None,
            invuln_timer: 0.0,
            army_size: None,
            avg_tier: None,
        }
    }

    pub fn alive(&self) -> bool {
        self.stats.hp > 0.0
    }

    pub fn is_invulnerable(&self) -> bool {
        self.invuln_timer > 0.0
    }

    /// Velocity estimate from the last two tracked positions, used by the
    /// projectile lead solver. `dt` must be the caller's last-frame delta,
    /// at least 1/60s, for the estimate to be trusted.
    pub fn estimated_velocity(&self, dt: f32) -> Option<Vec2> {
        if dt < 1.0 / 60.0 {
            return None;
        }
        Some((self.position - self.last_position) / dt)
    }

    /// Stash the current position as "last position" for next frame's
    /// velocity estimate (arena controller tick step 8).
    pub fn stash_last_position(&mut self) {
        self.last_position = self.position;
    }

    /// The single mutation path for hp: composes armor
    /// defense and VIT defense multiplicatively, then subtracts from hp and
    /// resets i-frames. Returns the actual damage applied (0 during
    /// invulnerability).
    pub fn apply_damage(&mut self, raw_damage: f32) -> f32 {
        if self.is_invulnerable() {
            return 0.0;
        }
        let mut armor = self.equipment.total_defense();
        if self.equipment.is_shield_equipped() {
            armor = (armor + SHIELD_ARMOR_BONUS).min(MAX_EFFECTIVE_ARMOR);
        }
        let vit_defense = self.stats.defense;
        let final_damage = raw_damage * (1.0 - armor) * (1.0 - vit_defense);
        self.stats.hp = (self.stats.hp - final_damage).max(0.0);
        self.invuln_timer = INVULN_DURATION;
        final_damage
    }

    /// Clamp into `[border + radius, dim - border - radius]` on both axes.
    pub fn clamp_into_bounds(&mut self, width: f32, height: f32, border: f32) {
        let min = geo::Vec2::new(border + self.radius, border + self.radius);
        let max = geo::Vec2::new(width - border - self.radius, height - border - self.radius);
        self.position = self.position.clamp_components(min, max);
    }

    pub fn tick_timers(&mut self, dt: f32) {
        self.invuln_timer = (self.invuln_timer - dt).max(0.0);
        if self.stats.is_staggered {
            self.stats.stagger_timer -= dt;
            if self.stats.stagger_timer <= 0.0 {
                self.stats.is_staggered = false;
                self.stats.stagger_timer = 0.0;
            }
        }
        if self.stats.poise < self.stats.poise_max {
            if self.stats.poise_regen_delay > 0.0 {
                self.stats.poise_regen_delay = (self.stats.poise_regen_delay - dt).max(0.0);
            } else {
                self.stats.poise = (self.stats.poise + crate::POISE_REGEN_PER_SEC * dt).min(self.stats.poise_max);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn make(team: Team) -> Entity {
        Entity::new(EntityKind::Enemy, team, "bandits", Vec2::zero(), 12.0, Stats::new_level_one())
    }

    #[test]
    fn damage_during_invulnerability_is_absorbed() {
        let mut e = make(Team::B);
        e.apply_damage(50.0);
        assert!(e.is_invulnerable());
        let second = e.apply_damage(50.0);
        assert_eq!(second, 0.0);
    }

    #[test]
    fn invuln_window_is_three_tenths_second() {
        let mut e = make(Team::B);
        e.apply_damage(1.0);
        assert_eq!(e.invuln_timer, INVULN_DURATION);
    }

    #[test]
    fn bounds_clamp_respects_radius_and_border() {
        let mut e = make(Team::A);
        e.position = Vec2::new(-100.0, 5000.0);
        e.clamp_into_bounds(1280.0, 720.0, 20.0);
        assert!(e.position.x >= 20.0 + e.radius);
        assert!(e.position.y <= 720.0 - 20.0 - e.radius);
    }

    #[test]
    fn poise_does_not_regen_during_the_delay() {
        let mut e = make(Team::B);
        e.stats.poise = 0.0;
        e.stats.poise_regen_delay = crate::POISE_REGEN_DELAY;
        e.tick_timers(1.0);
        assert_eq!(e.stats.poise, 0.0);
    }

    #[test]
    fn poise_regens_at_33_per_second_after_the_delay_elapses() {
        let mut e = make(Team::B);
        e.stats.poise = 0.0;
        e.stats.poise_regen_delay = 0.0;
        e.tick_timers(1.0);
        assert!((e.stats.poise - 33.0).abs() < 1e-4);
    }

    #[test]
    fn poise_regen_never_exceeds_poise_max() {
        let mut e = make(Team::B);
        e.stats.poise = e.stats.poise_max - 1.0;
        e.stats.poise_regen_delay = 0.0;
        e.tick_timers(1.0);
        assert_eq!(e.stats.poise, e.stats.poise_max);
    }
}
