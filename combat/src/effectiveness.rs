use items::{DamageType, Material};

/// Damage-type vs armor-material multiplier table. An
/// unarmored defender (`material = None`) takes the raw multiplier 1.0 —
/// the table only describes how armor reshapes damage, not its absence.
pub fn effectiveness(damage_type: DamageType, material: Option<Material>) -> f32 {
    let Some(material) = material else {
        return 1.0;
    };
    match (damage_type, material) {
        (DamageType::Slashing, Material::Leather) => 1.15,
        (DamageType::Slashing, Material::Bronze) => 0.97,
        (DamageType::Slashing, Material::Chainmail) => 0.95,
        (DamageType::Slashing, Material::Plate) => 0.90,

        (DamageType::Piercing, Material::Leather) => 1.00,
        (DamageType::Piercing, Material::Bronze) => 1.05,
        (DamageType::Piercing, Material::Chainmail) => 1.10,
        (DamageType::Piercing, Material::Plate) => 0.95,

        (DamageType::Bludgeoning, Material::Leather) => 0.90,
        (DamageType::Bludgeoning, Material::Bronze) => 1.08,
        (DamageType::Bludgeoning, Material::Chainmail) => 1.05,
        (DamageType::Bludgeoning, Material::Plate) => 1.12,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slash_vs_plate_matches_table() {
        assert!((effectiveness(DamageType::Slashing, Some(Material::Plate)) - 0.90).abs() < 1e-6);
    }

    #[test]
    fn bludgeon_vs_plate_matches_table() {
        assert!((effectiveness(DamageType::Bludgeoning, Some(Material::Plate)) - 1.12).abs() < 1e-6);
    }

    #[test]
    fn unarmored_defender_takes_raw_multiplier() {
        assert_eq!(effectiveness(DamageType::Piercing, None), 1.0);
    }
}
