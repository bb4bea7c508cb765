use crate::formation::{formation_slot, FormationMode};
use geo::Vec2;
use stats::{EntityId, Role};

const ENGAGE_RANGE: f32 = 150.0;
const ARCHER_BAND_MIN: f32 = 90.0;
const ARCHER_BAND_MAX: f32 = 150.0;
const ARCHER_BAND_WIDEN_HOLD: f32 = 30.0;
const ARCHER_BAND_NARROW_CHARGE: f32 = 20.0;
const ARCHER_COOLDOWN: f32 = 1.0;
const ARCHER_ACTIVE_DURATION: f32 = 0.25;

const MELEE_ATTACK_MARGIN: f32 = 20.0;
const MELEE_COOLDOWN: f32 = 1.2;
const MELEE_ACTIVE_DURATION: f32 = 0.3;
const CHARGE_SPEED_MULT: f32 = 1.05;
const CHARGE_ARCHER_SPEED_MULT: f32 = 1.2;

const FORMATION_RADIUS: f32 = 80.0;
const FORMATION_RADIUS_DEFEND: f32 = 50.0;

const BODYGUARD_HP_FRACTION: f32 = 0.35;
const BODYGUARD_RANGE: f32 = 150.0;

/// Standing order the player issues to the whole troop roster.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Order {
    Follow,
    Hold,
    Charge,
    Defend,
    Focus,
}

#[derive(Debug, Clone)]
pub struct TroopAiState {
    pub assigned_target: Option<EntityId>,
    pub attack_cooldown: f32,
    pub active_attack_timer: f32,
}

impl Default for TroopAiState {
    fn default() -> Self {
        Self {
            assigned_target: None,
            attack_cooldown: 0.0,
            active_attack_timer: 0.0,
        }
    }
}

impl TroopAiState {
    pub fn new() -> Self {
        Self::default()
    }
}

pub struct EnemyRef {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    pub alive: bool,
}

pub struct TroopAiInput<'a> {
    pub dt: f32,
    pub self_position: Vec2,
    pub self_radius: f32,
    pub role: Role,
    pub index_in_roster: usize,
    pub roster_size: usize,
    pub order: Order,
    pub focus_target: Option<EntityId>,
    pub player_position: Vec2,
    pub player_hp_fraction: f32,
    pub player_facing: Vec2,
    pub enemies: &'a [EnemyRef],
    pub nearest_enemy_to_player: Option<EntityId>,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct TroopAiDecision {
    pub move_target: Option<Vec2>,
    pub speed_mult: f32,
    pub target: Option<EntityId>,
    pub wants_melee_attack: bool,
    pub wants_projectile: bool,
}

/// Round-robin target assignment across alive enemies, used to rebuild the
/// distribution map when a troop's assigned target dies.
pub fn reassign_target(index_in_roster: usize, enemies: &[EnemyRef]) -> Option<EntityId> {
    let alive: Vec<&EnemyRef> = enemies.iter().filter(|e| e.alive).collect();
    if alive.is_empty() {
        return None;
    }
    Some(alive[index_in_roster % alive.len()].id)
}

pub fn tick_troop(state: &mut TroopAiState, input: &TroopAiInput) -> TroopAiDecision {
    state.attack_cooldown = (state.attack_cooldown - input.dt).max(0.0);
    state.active_attack_timer = (state.active_attack_timer - input.dt).max(0.0);

    if input.order == Order::Focus {
        if let Some(focus) = input.focus_target {
            if input.enemies.iter().any(|e| e.id == focus && e.alive) {
                state.assigned_target = Some(focus);
            }
        }
    } else {
        let target_alive = state
            .assigned_target
            .map(|t| input.enemies.iter().any(|e| e.id == t && e.alive))
            .unwrap_or(false);
        if !target_alive {
            state.assigned_target = reassign_target(input.index_in_roster, input.enemies);
        }
    }

    if input.player_hp_fraction < BODYGUARD_HP_FRACTION
        && (input.player_position - input.self_position).length() <= BODYGUARD_RANGE
    {
        if let Some(nearest) = input.nearest_enemy_to_player {
            state.assigned_target = Some(nearest);
        }
    }

    let Some(target_id) = state.assigned_target else {
        return idle_formation(input);
    };
    let Some(target) = input.enemies.iter().find(|e| e.id == target_id) else {
        return idle_formation(input);
    };

    let to_target = target.position - input.self_position;
    let distance = to_target.length();

    if distance > ENGAGE_RANGE {
        return idle_formation(input);
    }

    if input.role == Role::Archer {
        let (mut min, mut max) = (ARCHER_BAND_MIN, ARCHER_BAND_MAX);
        match input.order {
            Order::Hold => {
                min -= ARCHER_BAND_WIDEN_HOLD;
                max += ARCHER_BAND_WIDEN_HOLD;
            }
            Order::Charge => {
                min += ARCHER_BAND_NARROW_CHARGE;
                max -= ARCHER_BAND_NARROW_CHARGE;
            }
            _ => {}
        }
        let speed_mult = if input.order == Order::Charge { CHARGE_ARCHER_SPEED_MULT } else { 1.0 };
        if distance < min {
            let dir = to_target.normalized_or(Vec2::zero()) * -1.0;
            return TroopAiDecision {
                move_target: Some(input.self_position + dir * 10.0),
                speed_mult,
                target: Some(target_id),
                wants_melee_attack: false,
                wants_projectile: false,
            };
        }
        if distance <= max {
            let wants = state.attack_cooldown <= 0.0;
            if wants {
                state.attack_cooldown = ARCHER_COOLDOWN;
                state.active_attack_timer = ARCHER_ACTIVE_DURATION;
            }
            return TroopAiDecision {
                move_target: None,
                speed_mult,
                target: Some(target_id),
                wants_melee_attack: false,
                wants_projectile: wants,
            };
        }
        let speed_mult = if input.order == Order::Charge { CHARGE_ARCHER_SPEED_MULT } else { 1.0 };
        return TroopAiDecision {
            move_target: Some(target.position),
            speed_mult,
            target: Some(target_id),
            wants_melee_attack: false,
            wants_projectile: false,
        };
    }

    let melee_range = input.self_radius + target.radius + MELEE_ATTACK_MARGIN;
    let speed_mult = if input.order == Order::Charge { CHARGE_SPEED_MULT } else { 1.0 };
    if distance <= melee_range {
        let wants = state.attack_cooldown <= 0.0;
        if wants {
            state.attack_cooldown = MELEE_COOLDOWN;
            state.active_attack_timer = MELEE_ACTIVE_DURATION;
        }
        TroopAiDecision {
            move_target: None,
            speed_mult,
            target: Some(target_id),
            wants_melee_attack: wants,
            wants_projectile: false,
        }
    } else {
        TroopAiDecision {
            move_target: Some(target.position),
            speed_mult,
            target: Some(target_id),
            wants_melee_attack: false,
            wants_projectile: false,
        }
    }
}

fn idle_formation(input: &TroopAiInput) -> TroopAiDecision {
    let radius = if input.order == Order::Defend { FORMATION_RADIUS_DEFEND } else { FORMATION_RADIUS };
    if (input.player_position - input.self_position).length() <= radius {
        return TroopAiDecision::default();
    }
    let slot = formation_slot(
        FormationMode::Wedge,
        input.player_position,
        input.player_facing,
        radius,
        input.role,
        input.index_in_roster,
        input.roster_size,
    );
    TroopAiDecision {
        move_target: Some(slot),
        speed_mult: 1.0,
        target: None,
        wants_melee_attack: false,
        wants_projectile: false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    #[test]
    fn round_robin_assignment_skips_dead_enemies() {
        let enemies = vec![
            EnemyRef { id: Uuid::from_u128(1), position: Vec2::zero(), radius: 10.0, alive: false },
            EnemyRef { id: Uuid::from_u128(2), position: Vec2::zero(), radius: 10.0, alive: true },
        ];
        assert_eq!(reassign_target(0, &enemies), Some(Uuid::from_u128(2)));
        assert_eq!(reassign_target(1, &enemies), Some(Uuid::from_u128(2)));
    }

    #[test]
    fn no_alive_enemies_assigns_nothing() {
        let enemies = vec![EnemyRef { id: Uuid::from_u128(1), position: Vec2::zero(), radius: 10.0, alive: false }];
        assert_eq!(reassign_target(0, &enemies), None);
    }
}
