use crate::profile::Profile;
use geo::Vec2;
use rand::Rng;
use stats::EntityId;

const TARGET_REFRESH_INTERVAL: f32 = 0.35;
const ISOLATION_RADIUS: f32 = 120.0;
const ISOLATION_THRESHOLD: u32 = 3;
const ISOLATION_BONUS: f32 = 15.0;
const INVULN_PENALTY: f32 = 80.0;

const BLOCK_CONE_RANGE: f32 = 120.0;
const BLOCK_CONE_DOT: f32 = 0.5;
const BLOCK_PROB_HEALTHY: f64 = 0.50;
const BLOCK_PROB_HURT: f64 = 0.75;
const BLOCK_LOCK_MIN: f32 = 1.0;
const BLOCK_LOCK_MAX: f32 = 2.0;
const BLOCK_REROLL_LOCK_MIN: f32 = 0.3;
const BLOCK_REROLL_LOCK_MAX: f32 = 0.6;

const RETREAT_HP_FRACTION: f32 = 0.30;
const RETREAT_SPEED_MULT: f32 = 1.2;
const FLANK_CHANCE: f64 = 0.40;
const SPACING_RADIUS: f32 = 50.0;
const CLUMP_STRAFE_RANGE: f32 = 120.0;

const ATTACK_RANGE_MARGIN: f32 = 15.0;
const ATTACK_COOLDOWN_MIN: f32 = 1.0;
const ATTACK_COOLDOWN_MAX: f32 = 1.4;
const ATTACK_ACTIVE_DURATION: f32 = 0.3;

const STAMINA_MAX: f32 = 100.0;
const STAMINA_REGEN_PER_SEC: f32 = 12.0;
const STAMINA_MOVE_COST_MIN: f32 = 5.0;
const STAMINA_MOVE_COST_MAX: f32 = 6.0;
const STAMINA_EXHAUSTED_THRESHOLD: f32 = 10.0;

const LOD_DISTANCE: f32 = 650.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EnemyState {
    Chasing,
    Blocking,
    Retreating,
    Strafing,
}

/// Per-enemy AI memory the arena controller stores alongside the entity and
/// feeds back into [`tick_enemy`] every frame.
#[derive(Debug, Clone)]
pub struct EnemyAiState {
    pub target: Option<EntityId>,
    pub target_refresh_timer: f32,
    pub block_decision_timer: f32,
    pub blocking: bool,
    pub state: EnemyState,
    pub stamina: f32,
    pub attack_cooldown: f32,
    pub active_attack_timer: f32,
}

impl Default for EnemyAiState {
    fn default() -> Self {
        Self {
            target: None,
            target_refresh_timer: 0.0,
            block_decision_timer: 0.0,
            blocking: false,
            state: EnemyState::Chasing,
            stamina: STAMINA_MAX,
            attack_cooldown: 0.0,
            active_attack_timer: 0.0,
        }
    }
}

impl EnemyAiState {
    pub fn new() -> Self {
        Self::default()
    }
}

/// A potential target: the player, an allied troop, or (with two sides
/// present) a cross-team enemy.
pub struct TargetCandidate {
    pub id: EntityId,
    pub position: Vec2,
    pub radius: f32,
    pub nearby_ally_count: u32,
    pub is_invulnerable: bool,
}

/// Context [`tick_enemy`] needs this frame; assembled by the arena
/// controller from the live entity roster.
pub struct EnemyAiInput<'a> {
    pub dt: f32,
    pub self_position: Vec2,
    pub self_radius: f32,
    pub self_hp_fraction: f32,
    pub profile: Profile,
    pub candidates: &'a [TargetCandidate],
    pub player_is_attacking: bool,
    pub player_attack_direction: Vec2,
    pub player_position: Vec2,
    pub player_clumped: bool,
    pub skip_for_lod: bool,
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnemyAiDecision {
    pub move_vector: Vec2,
    pub target: Option<EntityId>,
    pub wants_attack: bool,
    pub wants_projectile: bool,
    pub state: Option<EnemyState>,
}

fn score_target(self_position: Vec2, candidate: &TargetCandidate) -> f32 {
    let distance = (candidate.position - self_position).length();
    let isolation = if candidate.nearby_ally_count < ISOLATION_THRESHOLD { 1.0 } else { 0.0 };
    let invuln_penalty = if candidate.is_invulnerable { INVULN_PENALTY } else { 0.0 };
    distance - ISOLATION_BONUS * isolation + invuln_penalty
}

/// Pick the best target by score (lower is better), breaking ties by
/// ascending id.
fn select_target(self_position: Vec2, candidates: &[TargetCandidate]) -> Option<EntityId> {
    candidates
        .iter()
        .map(|c| (score_target(self_position, c), c.id, c))
        .min_by(|(score_a, id_a, _), (score_b, id_b, _)| {
            score_a
                .partial_cmp(score_b)
                .unwrap_or(std::cmp::Ordering::Equal)
                .then_with(|| id_a.cmp(id_b))
        })
        .map(|(_, id, _)| id)
}

/// Advance a single enemy's AI by one tick. Returns the movement/attack
/// decision for the arena controller to apply; never mutates positions or
/// hp directly.
pub fn tick_enemy(state: &mut EnemyAiState, input: &EnemyAiInput, rng: &mut impl Rng) -> EnemyAiDecision {
    if input.skip_for_lod {
        return EnemyAiDecision {
            target: state.target,
            ..Default::default()
        };
    }

    state.target_refresh_timer -= input.dt;
    state.block_decision_timer -= input.dt;
    state.attack_cooldown = (state.attack_cooldown - input.dt).max(0.0);
    state.active_attack_timer = (state.active_attack_timer - input.dt).max(0.0);
    state.stamina = (state.stamina + STAMINA_REGEN_PER_SEC * input.dt).min(STAMINA_MAX);

    if state.target_refresh_timer <= 0.0 || state.target.is_none() {
        state.target = select_target(input.self_position, input.candidates);
        state.target_refresh_timer = TARGET_REFRESH_INTERVAL;
    }

    let Some(target_id) = state.target else {
        return EnemyAiDecision::default();
    };
    let target = input.candidates.iter().find(|c| c.id == target_id);
    let Some(target) = target else {
        state.target = None;
        return EnemyAiDecision::default();
    };

    let to_target = target.position - input.self_position;
    let distance = to_target.length();

    if state.block_decision_timer <= 0.0 {
        let in_cone = input.player_is_attacking
            && distance <= BLOCK_CONE_RANGE
            && input
                .player_attack_direction
                .normalized_or(Vec2::zero())
                .dot(to_target.normalized_or(Vec2::zero()))
                >= BLOCK_CONE_DOT;

        if in_cone {
            let prob = if input.self_hp_fraction > 0.5 { BLOCK_PROB_HEALTHY } else { BLOCK_PROB_HURT };
            state.blocking = rng.gen_bool(prob);
            state.block_decision_timer = rng.gen_range(BLOCK_LOCK_MIN..=BLOCK_LOCK_MAX);
        } else {
            state.blocking = false;
            state.block_decision_timer = rng.gen_range(BLOCK_REROLL_LOCK_MIN..=BLOCK_REROLL_LOCK_MAX);
        }
    }

    if state.stamina <= STAMINA_EXHAUSTED_THRESHOLD {
        let resolved_state = if state.blocking { EnemyState::Blocking } else { EnemyState::Chasing };
        state.state = resolved_state;
        return EnemyAiDecision {
            move_vector: Vec2::zero(),
            target: Some(target_id),
            wants_attack: false,
            wants_projectile: false,
            state: Some(resolved_state),
        };
    }

    if state.blocking {
        state.state = EnemyState::Blocking;
        return EnemyAiDecision {
            move_vector: Vec2::zero(),
            target: Some(target_id),
            wants_attack: false,
            wants_projectile: false,
            state: Some(EnemyState::Blocking),
        };
    }

    let kite_band = input.profile.kite_band();
    let retreating = input.profile != Profile::Kite && input.self_hp_fraction < RETREAT_HP_FRACTION;

    let mut direction = to_target.normalized_or(Vec2::zero());
    let mut speed_mult = input.profile.speed_mult();
    let mut new_state = EnemyState::Chasing;

    if retreating {
        direction = direction * -1.0;
        speed_mult *= RETREAT_SPEED_MULT;
        new_state = EnemyState::Retreating;
    } else if input.player_clumped && distance <= CLUMP_STRAFE_RANGE {
        direction = direction.perpendicular();
        new_state = EnemyState::Strafing;
    } else if let (Profile::Kite, Some((min, max))) = (input.profile, kite_band) {
        if distance < min {
            direction = direction * -1.0;
        } else if distance <= max {
            direction = direction.perpendicular();
        }
        new_state = EnemyState::Strafing;
    } else if rng.gen_bool(FLANK_CHANCE) {
        direction = direction.perpendicular();
        new_state = EnemyState::Strafing;
    }

    if distance < SPACING_RADIUS {
        direction = direction * -1.0;
    }

    state.state = new_state;
    state.stamina -= rng.gen_range(STAMINA_MOVE_COST_MIN..=STAMINA_MOVE_COST_MAX) * input.dt;

    let attack_range = input.self_radius + target.radius + ATTACK_RANGE_MARGIN
        + match kite_band {
            Some((_, max)) if input.profile == Profile::Kite => max,
            _ => 0.0,
        };
    let in_range = if input.profile == Profile::Kite {
        kite_band.map(|(min, max)| distance >= min && distance <= max).unwrap_or(false)
    } else {
        distance <= attack_range
    };

    let wants_attack = in_range && state.attack_cooldown <= 0.0;
    if wants_attack {
        state.attack_cooldown = rng.gen_range(ATTACK_COOLDOWN_MIN..=ATTACK_COOLDOWN_MAX);
        state.active_attack_timer = ATTACK_ACTIVE_DURATION;
    }

    EnemyAiDecision {
        move_vector: direction * speed_mult,
        target: Some(target_id),
        wants_attack,
        wants_projectile: wants_attack && input.profile == Profile::Kite,
        state: Some(new_state),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn candidate(nearby: u32, invuln: bool) -> TargetCandidate {
        TargetCandidate {
            id: Uuid::nil(),
            position: Vec2::new(100.0, 0.0),
            radius: 12.0,
            nearby_ally_count: nearby,
            is_invulnerable: invuln,
        }
    }

    #[test]
    fn isolated_target_scores_lower_than_invulnerable_one() {
        let isolated = score_target(Vec2::zero(), &candidate(0, false));
        let invuln = score_target(Vec2::zero(), &candidate(0, true));
        assert!(isolated < invuln);
    }

    #[test]
    fn tie_breaks_resolve_by_ascending_id() {
        let a = TargetCandidate { id: Uuid::from_u128(1), position: Vec2::new(50.0, 0.0), radius: 12.0, nearby_ally_count: 0, is_invulnerable: false };
        let b = TargetCandidate { id: Uuid::from_u128(2), position: Vec2::new(50.0, 0.0), radius: 12.0, nearby_ally_count: 0, is_invulnerable: false };
        let picked = select_target(Vec2::zero(), &[b, a]).unwrap();
        assert_eq!(picked, Uuid::from_u128(1));
    }
}
