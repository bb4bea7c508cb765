use crate::armor::{ArmorDescriptor, ArmorSlot, Material};
use crate::error::CatalogError;
use crate::scaling::ScalingGrade;
use crate::weapon::{DamageType, WeaponDescriptor};
use once_cell::sync::Lazy;
use std::collections::HashMap;

static WEAPONS: Lazy<HashMap<&'static str, WeaponDescriptor>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut add = |w: WeaponDescriptor| {
        // `id` is leaked once into a 'static str; the catalog is small and
        // lives for the process lifetime, so this avoids an owned-key HashMap.
        let id: &'static str = Box::leak(w.id.clone().into_boxed_str());
        m.insert(id, w);
    };

    add(WeaponDescriptor::new(
        "rusty_sword", "Rusty Sword", 1.0, 60.0, 0.7, 8.0, DamageType::Slashing,
    ));
    add(WeaponDescriptor::new(
        "iron_sword", "Iron Sword", 1.15, 62.0, 0.65, 9.0, DamageType::Slashing,
    )
    .with_scaling(ScalingGrade::C, ScalingGrade::E));
    add(WeaponDescriptor::new(
        "war_spear", "War Spear", 1.1, 90.0, 0.9, 10.0, DamageType::Piercing,
    )
    .with_scaling(ScalingGrade::B, ScalingGrade::D)
    .with_requirements(12, 0));
    add(WeaponDescriptor::new(
        "war_hammer", "War Hammer", 1.4, 55.0, 1.1, 16.0, DamageType::Bludgeoning,
    )
    .with_scaling(ScalingGrade::S, ScalingGrade::E)
    .with_requirements(16, 0));
    add(WeaponDescriptor::new(
        "hunting_bow", "Hunting Bow", 1.0, 260.0, 1.0, 10.0, DamageType::Piercing,
    )
    .with_scaling(ScalingGrade::E, ScalingGrade::A));
    add(WeaponDescriptor::new(
        "round_shield", "Round Shield", 0.0, 0.0, 0.0, 0.0, DamageType::Bludgeoning,
    )
    .shield());

    m
});

static ARMORS: Lazy<HashMap<&'static str, ArmorDescriptor>> = Lazy::new(|| {
    let mut m = HashMap::new();
    let mut add = |a: ArmorDescriptor| {
        let id: &'static str = Box::leak(a.id.clone().into_boxed_str());
        m.insert(id, a);
    };

    add(ArmorDescriptor::new("leather_cap", "Leather Cap", ArmorSlot::Helmet, 0.03, 0.0, Material::Leather));
    add(ArmorDescriptor::new("leather_vest", "Leather Vest", ArmorSlot::Chest, 0.08, 0.0, Material::Leather));
    add(ArmorDescriptor::new("leather_leggings", "Leather Leggings", ArmorSlot::Legs, 0.05, 0.0, Material::Leather));
    add(ArmorDescriptor::new("leather_boots", "Leather Boots", ArmorSlot::Boots, 0.02, 0.0, Material::Leather));

    add(ArmorDescriptor::new("bronze_helm", "Bronze Helm", ArmorSlot::Helmet, 0.05, 0.02, Material::Bronze));
    add(ArmorDescriptor::new("bronze_cuirass", "Bronze Cuirass", ArmorSlot::Chest, 0.12, 0.05, Material::Bronze));
    add(ArmorDescriptor::new("bronze_greaves", "Bronze Greaves", ArmorSlot::Legs, 0.08, 0.03, Material::Bronze));
    add(ArmorDescriptor::new("bronze_sabatons", "Bronze Sabatons", ArmorSlot::Boots, 0.04, 0.02, Material::Bronze));

    add(ArmorDescriptor::new("chainmail_coif", "Chainmail Coif", ArmorSlot::Helmet, 0.06, 0.03, Material::Chainmail));
    add(ArmorDescriptor::new("chainmail_hauberk", "Chainmail Hauberk", ArmorSlot::Chest, 0.16, 0.08, Material::Chainmail));
    add(ArmorDescriptor::new("chainmail_chausses", "Chainmail Chausses", ArmorSlot::Legs, 0.10, 0.05, Material::Chainmail));
    add(ArmorDescriptor::new("chainmail_boots", "Chainmail Boots", ArmorSlot::Boots, 0.05, 0.03, Material::Chainmail));

    add(ArmorDescriptor::new("plate_helm", "Plate Helm", ArmorSlot::Helmet, 0.08, 0.05, Material::Plate));
    add(ArmorDescriptor::new("plate_cuirass", "Plate Cuirass", ArmorSlot::Chest, 0.22, 0.12, Material::Plate));
    add(ArmorDescriptor::new("plate_greaves", "Plate Greaves", ArmorSlot::Legs, 0.14, 0.08, Material::Plate));
    add(ArmorDescriptor::new("plate_sabatons", "Plate Sabatons", ArmorSlot::Boots, 0.06, 0.05, Material::Plate));

    m
});

/// Handle type re-exported for callers that want to name the catalog
/// explicitly; lookups themselves are free functions since the catalog is a
/// process-wide singleton.
pub struct Catalog;

impl Catalog {
    pub fn weapon(id: &str) -> Result<&'static WeaponDescriptor, CatalogError> {
        weapon(id)
    }

    pub fn armor(id: &str) -> Result<&'static ArmorDescriptor, CatalogError> {
        armor(id)
    }
}

pub fn weapon(id: &str) -> Result<&'static WeaponDescriptor, CatalogError> {
    WEAPONS
        .get(id)
        .ok_or_else(|| CatalogError::UnknownId(id.to_string()))
}

pub fn armor(id: &str) -> Result<&'static ArmorDescriptor, CatalogError> {
    ARMORS
        .get(id)
        .ok_or_else(|| CatalogError::UnknownId(id.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_weapon_resolves() {
        assert!(weapon("iron_sword").is_ok());
    }

    #[test]
    fn unknown_weapon_is_an_error() {
        match weapon("does_not_exist") {
            Err(CatalogError::UnknownId(id)) => assert_eq!(id, "does_not_exist"),
            other => panic!("expected UnknownId, got {other:?}"),
        }
    }

    #[test]
    fn known_armor_resolves() {
        assert!(armor("plate_cuirass").is_ok());
    }
}
