use items::WeaponDescriptor;

/// Effective weapon damage multiplier once attribute scaling and soft-locked
/// requirement penalties are folded in. Enemies skip this — they use a flat
/// multiplier of 1.0.
pub fn effective_weapon_mult(weapon: &WeaponDescriptor, strength: i32, agility: i32) -> f32 {
    let scaling = items::scaling::weapon_scaling_multiplier(
        strength,
        agility,
        weapon.scaling_str,
        weapon.scaling_agi,
    );
    let penalty = items::scaling::requirement_penalty(strength, agility, weapon.str_req, weapon.agi_req);
    weapon.damage_mult * scaling * penalty
}

#[cfg(test)]
mod tests {
    use super::*;
    use items::{DamageType, ScalingGrade};

    #[test]
    fn unmet_requirement_reduces_effective_damage() {
        let weapon = WeaponDescriptor::new("t", "Test", 1.4, 55.0, 1.1, 16.0, DamageType::Bludgeoning)
            .with_scaling(ScalingGrade::S, ScalingGrade::E)
            .with_requirements(16, 0);
        let full = effective_weapon_mult(&weapon, 16, 10);
        let starved = effective_weapon_mult(&weapon, 6, 10);
        assert!(starved < full);
    }
}
