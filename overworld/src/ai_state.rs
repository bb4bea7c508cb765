use geo::Vec2;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatrolState {
    Patrolling,
    Chasing,
}

/// Per-army-marker overworld AI memory, kept alongside the
/// entity in [`crate::World`] rather than on `stats::Entity` itself — the
/// entity record stays uniform across arena and overworld use.
#[derive(Debug, Clone)]
pub struct OverworldAiState {
    pub state: PatrolState,
    pub patrol_timer: f32,
    pub patrol_direction: Vec2,
    pub chase_alert_cooldown: f32,
    pub active: bool,
}

impl OverworldAiState {
    pub fn new(active: bool) -> Self {
        Self {
            state: PatrolState::Patrolling,
            patrol_timer: 0.0,
            patrol_direction: Vec2::zero(),
            chase_alert_cooldown: 0.0,
            active,
        }
    }
}
