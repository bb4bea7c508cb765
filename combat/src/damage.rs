use crate::effectiveness::effectiveness;
use events::{AttackWeight as EventWeight, DamageNumberKind, Event, EventBus};
use items::{DamageType, Material};
use rand::Rng;
use stats::Entity;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackWeight {
    Light,
    Heavy,
}

impl From<AttackWeight> for EventWeight {
    fn from(w: AttackWeight) -> Self {
        match w {
            AttackWeight::Light => EventWeight::Light,
            AttackWeight::Heavy => EventWeight::Heavy,
        }
    }
}

const LIGHT_POISE_DAMAGE: f32 = 20.0;
const HEAVY_POISE_DAMAGE: f32 = 100.0;
const STAGGER_DURATION: f32 = 1.5;
const PARRY_STUN_DURATION: f32 = 1.5;
const STAGGER_MULT: f32 = 1.25;
const HIGH_GROUND_ATTACKER_MULT: f32 = 1.2;
const HIGH_GROUND_DEFENDER_MULT: f32 = 0.9;

/// Everything the pipeline needs about the swing itself, already resolved
/// from weapon/combo/attribute scaling by the caller. Enemies pass
/// `weapon_damage_mult: 1.0` — they skip weapon scaling entirely.
pub struct AttackRoll {
    pub attacker_id: Uuid,
    pub attacker_atk: f32,
    pub weapon_damage_mult: f32,
    pub damage_type: DamageType,
    pub combo_count: u32,
    pub weight: AttackWeight,
    pub attacker_high_ground: bool,
    pub defender_high_ground: bool,
    pub attacker_crit_chance: f32,
    pub attacker_crit_damage: f32,
}

/// Defender's block posture for this swing. Only players get a partial,
/// power-scaled block; an enemy's block latch is binary.
pub struct BlockState {
    pub blocking: bool,
    pub defender_is_player: bool,
    pub within_parry_window: bool,
    pub block_power: f32,
}

impl BlockState {
    pub fn none() -> Self {
        Self {
            blocking: false,
            defender_is_player: false,
            within_parry_window: false,
            block_power: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct AttackOutcome {
    pub damage_dealt: f32,
    pub blocked: bool,
    pub parried: bool,
    pub crit: bool,
    pub attacker_stun: Option<f32>,
    pub target_died: bool,
}

/// Combo multiplier applied to a player's swing: `1 + 0.3 * (combo_count - 1)`.
pub fn combo_multiplier(combo_count: u32) -> f32 {
    1.0 + 0.3 * combo_count.saturating_sub(1) as f32
}

/// Damage before armor/VIT mitigation: attack
/// power, combo, effectiveness table, then stagger/high-ground. Armor and
/// VIT defense are applied afterward, in [`stats::Entity::apply_damage`].
pub fn pre_mitigation_damage(roll: &AttackRoll, target_staggered: bool, target_material: Option<Material>) -> f32 {
    let combo_mult = combo_multiplier(roll.combo_count);
    let mut damage = roll.attacker_atk * roll.weapon_damage_mult * combo_mult;
    damage *= effectiveness(roll.damage_type, target_material);
    if target_staggered {
        damage *= STAGGER_MULT;
    }
    if roll.attacker_high_ground {
        damage *= HIGH_GROUND_ATTACKER_MULT;
    } else if roll.defender_high_ground {
        damage *= HIGH_GROUND_DEFENDER_MULT;
    }
    damage
}

/// Resolve one landed swing against `target`. The
/// caller is responsible for range/hit-set/active-window checks (steps 1-3)
/// before calling this — those depend on arena-controller-owned per-swing
/// state this module doesn't hold.
pub fn resolve_attack(
    roll: &AttackRoll,
    block: &BlockState,
    target: &mut Entity,
    rng: &mut impl Rng,
    bus: &mut EventBus,
) -> AttackOutcome {
    if block.blocking {
        if !block.defender_is_player {
            bus.push(Event::Block {
                defender: target.id,
                attacker: roll.attacker_id,
                reduced_damage: 0.0,
            });
            return AttackOutcome {
                blocked: true,
                ..Default::default()
            };
        }
        if block.within_parry_window {
            bus.push(Event::Parry {
                defender: target.id,
                attacker: roll.attacker_id,
            });
            return AttackOutcome {
                blocked: true,
                parried: true,
                attacker_stun: Some(PARRY_STUN_DURATION),
                ..Default::default()
            };
        }
    }

    let material = target.equipment.primary_material();
    let mut damage = pre_mitigation_damage(roll, target.stats.is_staggered, material);

    let crit = rng.gen::<f32>() < roll.attacker_crit_chance;
    if crit {
        damage *= roll.attacker_crit_damage;
        bus.push(Event::Crit {
            attacker: roll.attacker_id,
            target: target.id,
        });
    }

    if block.blocking {
        damage *= 1.0 - block.block_power;
        bus.push(Event::Block {
            defender: target.id,
            attacker: roll.attacker_id,
            reduced_damage: damage,
        });
    }

    let hp_before = target.stats.hp;
    let applied = target.apply_damage(damage);
    let hp_decreased = target.stats.hp < hp_before;

    let mut outcome = AttackOutcome {
        damage_dealt: applied,
        blocked: block.blocking,
        parried: false,
        crit,
        attacker_stun: None,
        target_died: false,
    };

    if hp_decreased {
        bus.push(Event::Hit {
            attacker: roll.attacker_id,
            target: target.id,
            damage: applied,
            position: target.position,
            weight: roll.weight.into(),
        });
        let kind = if crit {
            DamageNumberKind::Crit
        } else if block.blocking {
            DamageNumberKind::Blocked
        } else {
            DamageNumberKind::Normal
        };
        bus.push(Event::DamageNumber {
            position: target.position,
            amount: applied,
            kind,
        });

        apply_poise_damage(target, roll.weight);
    }

    if !target.alive() {
        outcome.target_died = true;
        bus.push(Event::Death {
            entity: target.id,
            position: target.position,
        });
    }

    outcome
}

/// Poise loss from a landed hit: 20 light / 100
/// heavy. Crossing zero poise staggers the target for 1.5s if it wasn't
/// already staggered. Resets the regen delay (3s before poise starts
/// recovering at 33/s, ticked in [`stats::Entity::tick_timers`]) on every
/// hit, whether or not it staggers.
pub fn apply_poise_damage(target: &mut Entity, weight: AttackWeight) {
    let loss = match weight {
        AttackWeight::Light => LIGHT_POISE_DAMAGE,
        AttackWeight::Heavy => HEAVY_POISE_DAMAGE,
    };
    target.stats.poise -= loss;
    target.stats.poise_regen_delay = stats::POISE_REGEN_DELAY;
    if target.stats.poise <= 0.0 && !target.stats.is_staggered {
        target.stats.is_staggered = true;
        target.stats.stagger_timer = STAGGER_DURATION;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Vec2;
    use rand::rngs::mock::StepRng;
    use stats::{EntityKind, Stats, Team};

    fn plate_defender() -> Entity {
        let mut e = Entity::new(EntityKind::Enemy, Team::B, "bandits", Vec2::zero(), 12.0, Stats::new_level_one());
        e.equipment.equip_armor("plate_helm").unwrap();
        e.equipment.equip_armor("plate_cuirass").unwrap();
        e.equipment.equip_armor("plate_greaves").unwrap();
        e.equipment.equip_armor("plate_sabatons").unwrap();
        e
    }

    #[test]
    fn slash_vs_plate_matches_scenario_one() {
        // spec scenario 1: atk=10, weapon=1.0, combo=1, slash vs plate,
        // defense=0, armor=0.30 -> 10 * 0.90 * 0.70 = 6.30
        let roll = AttackRoll {
            attacker_id: Uuid::nil(),
            attacker_atk: 10.0,
            weapon_damage_mult: 1.0,
            damage_type: DamageType::Slashing,
            combo_count: 1,
            weight: AttackWeight::Light,
            attacker_high_ground: false,
            defender_high_ground: false,
            attacker_crit_chance: 0.0,
            attacker_crit_damage: 0.0,
        };
        let pre = pre_mitigation_damage(&roll, false, Some(Material::Plate));
        assert!((pre - 9.0).abs() < 1e-4);
        let final_damage = pre * (1.0 - 0.30) * (1.0 - 0.0);
        assert!((final_damage - 6.30).abs() < 1e-4);
    }

    #[test]
    fn bludgeon_vs_staggered_plate_matches_scenario_two() {
        // spec scenario 2: atk=10, weapon=1.0, combo=1, bludgeon vs plate,
        // staggered -> 10 * 1.12 * 1.25 = 14.00; armor 0.30 -> 9.80
        let roll = AttackRoll {
            attacker_id: Uuid::nil(),
            attacker_atk: 10.0,
            weapon_damage_mult: 1.0,
            damage_type: DamageType::Bludgeoning,
            combo_count: 1,
            weight: AttackWeight::Heavy,
            attacker_high_ground: false,
            defender_high_ground: false,
            attacker_crit_chance: 0.0,
            attacker_crit_damage: 0.0,
        };
        let pre = pre_mitigation_damage(&roll, true, Some(Material::Plate));
        assert!((pre - 14.00).abs() < 1e-3);
        let final_damage = pre * (1.0 - 0.30);
        assert!((final_damage - 9.80).abs() < 1e-3);
    }

    #[test]
    fn full_pipeline_against_a_cataloged_plate_set_reduces_damage() {
        let mut target = plate_defender();
        target.stats.defense = 0.0;
        target.stats.hp = 1000.0;
        target.stats.hp_max = 1000.0;
        let roll = AttackRoll {
            attacker_id: Uuid::nil(),
            attacker_atk: 10.0,
            weapon_damage_mult: 1.0,
            damage_type: DamageType::Slashing,
            combo_count: 1,
            weight: AttackWeight::Light,
            attacker_high_ground: false,
            defender_high_ground: false,
            attacker_crit_chance: 0.0,
            attacker_crit_damage: 0.0,
        };
        let mut rng = StepRng::new(u64::MAX, 1);
        let mut bus = EventBus::new();
        let outcome = resolve_attack(&roll, &BlockState::none(), &mut target, &mut rng, &mut bus);
        // full plate set sums to 0.50 defense: 9.0 * (1 - 0.50) = 4.5
        assert!((outcome.damage_dealt - 4.5).abs() < 1e-3);
    }

    #[test]
    fn perfect_parry_deals_zero_and_stuns_attacker() {
        let mut target = plate_defender();
        let roll = AttackRoll {
            attacker_id: Uuid::nil(),
            attacker_atk: 20.0,
            weapon_damage_mult: 1.0,
            damage_type: DamageType::Slashing,
            combo_count: 1,
            weight: AttackWeight::Light,
            attacker_high_ground: false,
            defender_high_ground: false,
            attacker_crit_chance: 0.0,
            attacker_crit_damage: 0.0,
        };
        let block = BlockState {
            blocking: true,
            defender_is_player: true,
            within_parry_window: true,
            block_power: 0.70,
        };
        let mut rng = StepRng::new(u64::MAX, 1);
        let mut bus = EventBus::new();
        let outcome = resolve_attack(&roll, &block, &mut target, &mut rng, &mut bus);
        assert_eq!(outcome.damage_dealt, 0.0);
        assert_eq!(outcome.attacker_stun, Some(1.5));
    }
}
