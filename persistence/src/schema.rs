use geo::Vec2;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The current save schema version this build writes and understands
/// natively. Anything older is brought up to this shape by
/// [`crate::migration::apply_migrations`] before being deserialized into
/// [`SaveFile`].
pub const CURRENT_SAVE_VERSION: &str = "1.3";

/// Top-level save document. Field names
/// match the normative JSON keys exactly; no `#[serde(rename)]` is needed
/// because the in-memory `stats::Stats`/`items::Equipment` field names
/// already agree with the wire schema.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveFile {
    pub version: String,
    pub save_timestamp: String,
    pub game_time: f64,
    pub player: PlayerSave,
    pub troops: Vec<TroopSave>,
    pub world: WorldSave,
    pub relations: HashMap<String, i32>,
    pub current_location: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerSave {
    pub position: Vec2,
    pub stats: PlayerStatsSave,
    pub equipment: EquipmentSave,
    pub inventory: Vec<serde_json::Value>,
}

/// Mirrors `stats::Stats` minus the transient combat-only fields
/// (`is_staggered`, `stagger_timer`) and minus pool maxima already implied
/// by `hp_max`/`stamina_max` — those never need to survive a save.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PlayerStatsSave {
    pub hp: f32,
    pub hp_max: f32,
    pub atk: f32,
    pub spd: f32,
    pub level: i32,
    pub xp: i64,
    pub xp_to_next_level: i64,
    pub food: f32,
    pub gold: i64,

    pub strength: i32,
    pub agility: i32,
    pub vitality: i32,
    pub charisma: i32,
    pub skill: i32,
    pub attribute_points: i32,

    pub stamina_max: f32,
    pub crit_chance: f32,
    pub crit_damage: f32,
    pub block_power: f32,
    pub gold_bonus: f32,
    pub troop_bonus: f32,
    pub defense: f32,
    pub parry_window: f32,
    pub attack_speed_bonus: f32,
    pub stamina_regen_bonus: f32,
    pub shop_discount: f32,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct EquipmentSave {
    pub weapon: Option<String>,
    pub helmet: Option<String>,
    pub chest: Option<String>,
    pub legs: Option<String>,
    pub boots: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroopSave {
    pub id: String,
    #[serde(rename = "type")]
    pub troop_type: String,
    pub position: Vec2,
    pub stats: TroopStatsSave,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TroopStatsSave {
    pub hp_max: f32,
    pub hp: f32,
    pub atk: f32,
    pub spd: f32,
    pub level: i32,
    pub xp: i64,
    pub xp_to_next_level: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorldSave {
    pub seed: u64,
    pub defeated_enemies: u32,
}
