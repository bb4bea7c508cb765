use crate::scaling::ScalingGrade;
use serde::{Deserialize, Serialize};

/// Damage type a weapon deals; looked up against armor material in the
/// effectiveness table (`combat::damage::effectiveness`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DamageType {
    Slashing,
    Piercing,
    Bludgeoning,
}

/// Static, immutable weapon descriptor. Never mutated after catalog load;
/// a unit's `Equipment` stores only the id string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponDescriptor {
    pub id: String,
    pub name: String,
    pub damage_mult: f32,
    pub range: f32,
    pub cooldown: f32,
    pub stamina_cost: f32,
    pub damage_type: DamageType,
    /// A shield is a weapon that grants a flat effective-armor bump instead
    /// of an attack.
    pub is_shield: bool,
    pub scaling_str: ScalingGrade,
    pub scaling_agi: ScalingGrade,
    pub str_req: i32,
    pub agi_req: i32,
}

impl WeaponDescriptor {
    pub fn new(id: &str, name: &str, damage_mult: f32, range: f32, cooldown: f32, stamina_cost: f32, damage_type: DamageType) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            damage_mult,
            range,
            cooldown,
            stamina_cost,
            damage_type,
            is_shield: false,
            scaling_str: ScalingGrade::E,
            scaling_agi: ScalingGrade::E,
            str_req: 0,
            agi_req: 0,
        }
    }

    pub fn with_scaling(mut self, str_grade: ScalingGrade, agi_grade: ScalingGrade) -> Self {
        self.scaling_str = str_grade;
        self.scaling_agi = agi_grade;
        self
    }

    pub fn with_requirements(mut self, str_req: i32, agi_req: i32) -> Self {
        self.str_req = str_req;
        self.agi_req = agi_req;
        self
    }

    pub fn shield(mut self) -> Self {
        self.is_shield = true;
        self
    }
}
