use stats::EntityId;

/// Published once [`crate::ArenaController::is_done`] is true.
#[derive(Debug, Clone)]
pub struct BattleOutcome {
    pub victory: bool,
    pub player_hp: f32,
    pub xp_granted: i64,
    pub gold_granted: i64,
    pub defeated_enemies: Vec<EntityId>,
    pub surviving_troops: Vec<EntityId>,
    pub promoted_troops: Vec<EntityId>,
}
