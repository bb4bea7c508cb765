/// Literal overworld constants, carried as config fields
/// rather than module-level `const`s so a scenario/test fixture can tune
/// them without touching simulation code (mirrors `arena::ArenaConfig`).
#[derive(Debug, Clone)]
pub struct WorldConfig {
    pub width: f32,
    pub height: f32,

    pub diplomacy_interval: f32,
    pub auto_resolve_interval: f32,
    pub auto_resolve_player_radius: f32,
    pub auto_resolve_clash_radius: f32,
    pub auto_resolve_max_checks: u32,

    pub lod_deactivate_distance: f32,
    pub lod_reactivate_distance: f32,

    pub patrol_detect_radius: f32,
    pub patrol_alert_radius: f32,
    pub pack_alert_duration: f32,
    pub bandit_hunt_radius: f32,
    pub chase_give_up_distance: f32,
    pub encounter_collision_margin: f32,
    pub encounter_nearby_radius: f32,
    pub encounter_side_b_radius: f32,
    pub ally_troop_radius: f32,
    pub ally_relation_threshold: i32,
    pub hostile_relation_threshold: i32,
    pub max_nearby_enemies_in_encounter: usize,

    pub spawn_interval: f32,
    pub bandit_camp_cap: u32,
    pub castle_cap: u32,
    pub global_army_cap: u32,
    pub castle_spawn_radius: f32,
    pub min_global_enemies: usize,
}

impl Default for WorldConfig {
    fn default() -> Self {
        Self {
            width: 8000.0,
            height: 6000.0,

            diplomacy_interval: 30.0,
            auto_resolve_interval: 0.4,
            auto_resolve_player_radius: 1400.0,
            auto_resolve_clash_radius: 140.0,
            auto_resolve_max_checks: 60,

            lod_deactivate_distance: 1700.0,
            lod_reactivate_distance: 1500.0,

            patrol_detect_radius: 300.0,
            patrol_alert_radius: 200.0,
            pack_alert_duration: 2.0,
            bandit_hunt_radius: 300.0,
            chase_give_up_distance: 450.0,
            encounter_collision_margin: 5.0,
            encounter_nearby_radius: 250.0,
            encounter_side_b_radius: 380.0,
            ally_troop_radius: 320.0,
            ally_relation_threshold: 30,
            hostile_relation_threshold: -30,
            max_nearby_enemies_in_encounter: 4,

            spawn_interval: 6.0,
            bandit_camp_cap: 3,
            castle_cap: 5,
            global_army_cap: 120,
            castle_spawn_radius: 600.0,
            min_global_enemies: 15,
        }
    }
}
