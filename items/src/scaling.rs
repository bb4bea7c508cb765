use serde::{Deserialize, Serialize};

/// Per-attribute damage scaling grade for a weapon.
///
/// Each grade is a bonus-damage-per-point multiplier applied to the
/// wielder's STR/AGI. `E` is the default for weapons with no meaningful
/// scaling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ScalingGrade {
    S,
    A,
    B,
    C,
    D,
    E,
}

impl ScalingGrade {
    /// Bonus-damage fraction contributed per point of the scaled attribute.
    pub fn bonus_per_point(self) -> f32 {
        match self {
            ScalingGrade::S => 0.020,
            ScalingGrade::A => 0.015,
            ScalingGrade::B => 0.010,
            ScalingGrade::C => 0.005,
            ScalingGrade::D => 0.002,
            ScalingGrade::E => 0.000,
        }
    }
}

impl Default for ScalingGrade {
    fn default() -> Self {
        ScalingGrade::E
    }
}

/// Damage multiplier from a wielder's STR/AGI against a weapon's scaling
/// grades: `1.0 + str*str_scaling + agi*agi_scaling`.
pub fn weapon_scaling_multiplier(
    strength: i32,
    agility: i32,
    scaling_str: ScalingGrade,
    scaling_agi: ScalingGrade,
) -> f32 {
    1.0 + strength as f32 * scaling_str.bonus_per_point()
        + agility as f32 * scaling_agi.bonus_per_point()
}

/// Soft-lock penalty for equipping a weapon below its STR/AGI requirements:
/// always usable, but damage is reduced `5%` per point of unmet requirement,
/// floored at `50%` effectiveness (`can_equip_weapon` in the same module).
pub fn requirement_penalty(strength: i32, agility: i32, str_req: i32, agi_req: i32) -> f32 {
    let deficit = (str_req - strength).max(0) + (agi_req - agility).max(0);
    if deficit == 0 {
        1.0
    } else {
        (1.0 - deficit as f32 * 0.05).max(0.5)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_deficit_means_no_penalty() {
        assert_eq!(requirement_penalty(20, 20, 15, 10), 1.0);
    }

    #[test]
    fn penalty_floors_at_half() {
        assert_eq!(requirement_penalty(0, 0, 100, 100), 0.5);
    }

    #[test]
    fn s_grade_scales_more_than_e() {
        let s = weapon_scaling_multiplier(20, 0, ScalingGrade::S, ScalingGrade::E);
        let e = weapon_scaling_multiplier(20, 0, ScalingGrade::E, ScalingGrade::E);
        assert!(s > e);
    }
}
