use crate::armor::{slot_priority_order, ArmorSlot, Material};
use crate::catalog;
use crate::error::CatalogError;
use crate::weapon::WeaponDescriptor;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// The gear a unit has equipped: one weapon slot and four armor slots
/// (helmet/chest/legs/boots). Only catalog ids are stored here — descriptors
/// are always resolved through [`catalog`] so a balance patch to the catalog
/// is instantly visible to every equipped unit.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Equipment {
    pub weapon: Option<String>,
    pub armor: HashMap<ArmorSlot, String>,
}

impl Equipment {
    pub fn new() -> Self {
        Self::default()
    }

    /// Equip a weapon by catalog id, replacing any prior weapon. Refuses and
    /// leaves prior gear untouched if `id` isn't in the catalog.
    pub fn equip_weapon(&mut self, id: &str) -> Result<Option<String>, CatalogError> {
        catalog::weapon(id)?;
        Ok(self.weapon.replace(id.to_string()))
    }

    /// Equip an armor piece by catalog id into its catalog-defined slot,
    /// replacing whatever previously occupied that slot.
    pub fn equip_armor(&mut self, id: &str) -> Result<Option<String>, CatalogError> {
        let descriptor = catalog::armor(id)?;
        Ok(self.armor.insert(descriptor.slot, id.to_string()))
    }

    pub fn unequip_weapon(&mut self) -> Option<String> {
        self.weapon.take()
    }

    pub fn unequip_armor(&mut self, slot: ArmorSlot) -> Option<String> {
        self.armor.remove(&slot)
    }

    pub fn weapon_descriptor(&self) -> Option<&'static WeaponDescriptor> {
        self.weapon
            .as_deref()
            .and_then(|id| catalog::weapon(id).ok())
    }

    /// Sum of equipped armor defense fractions, capped at 0.75.
    pub fn total_defense(&self) -> f32 {
        let sum: f32 = self
            .armor
            .values()
            .filter_map(|id| catalog::armor(id).ok())
            .map(|a| a.defense)
            .sum();
        sum.min(0.75)
    }

    /// Sum of equipped armor speed penalties (not capped; heavy loadouts can
    /// meaningfully slow a unit down).
    pub fn total_speed_penalty(&self) -> f32 {
        self.armor
            .values()
            .filter_map(|id| catalog::armor(id).ok())
            .map(|a| a.speed_penalty)
            .sum()
    }

    /// Dominant armor material for effectiveness-table lookups: chest beats
    /// helmet beats legs beats boots; an unarmored unit has no material.
    pub fn primary_material(&self) -> Option<Material> {
        for slot in slot_priority_order() {
            if let Some(id) = self.armor.get(&slot) {
                if let Ok(descriptor) = catalog::armor(id) {
                    return Some(descriptor.material);
                }
            }
        }
        None
    }

    pub fn is_shield_equipped(&self) -> bool {
        self.weapon_descriptor().map(|w| w.is_shield).unwrap_or(false)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defense_sums_and_caps_at_075() {
        let mut eq = Equipment::new();
        eq.equip_armor("plate_helm").unwrap();
        eq.equip_armor("plate_cuirass").unwrap();
        eq.equip_armor("plate_greaves").unwrap();
        eq.equip_armor("plate_sabatons").unwrap();
        // 0.08 + 0.22 + 0.14 + 0.06 = 0.50, below the cap
        assert!((eq.total_defense() - 0.50).abs() < 1e-5);
    }

    #[test]
    fn primary_material_prefers_chest() {
        let mut eq = Equipment::new();
        eq.equip_armor("leather_cap").unwrap();
        eq.equip_armor("plate_cuirass").unwrap();
        assert_eq!(eq.primary_material(), Some(Material::Plate));
    }

    #[test]
    fn unknown_equip_leaves_prior_gear() {
        let mut eq = Equipment::new();
        eq.equip_weapon("iron_sword").unwrap();
        assert!(eq.equip_weapon("nonexistent").is_err());
        assert_eq!(eq.weapon.as_deref(), Some("iron_sword"));
    }
}
