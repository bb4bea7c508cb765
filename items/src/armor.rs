use serde::{Deserialize, Serialize};

/// Armor material; looked up against weapon damage type in the
/// effectiveness table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Material {
    Leather,
    Bronze,
    Chainmail,
    Plate,
}

/// Which of the four armor slots a piece occupies.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ArmorSlot {
    Helmet,
    Chest,
    Legs,
    Boots,
}

impl ArmorSlot {
    pub const ALL: [ArmorSlot; 4] = [
        ArmorSlot::Helmet,
        ArmorSlot::Chest,
        ArmorSlot::Legs,
        ArmorSlot::Boots,
    ];

    /// Priority for `Equipment::primary_material`: chest beats helmet beats
    /// legs beats boots.
    fn priority(self) -> u8 {
        match self {
            ArmorSlot::Chest => 0,
            ArmorSlot::Helmet => 1,
            ArmorSlot::Legs => 2,
            ArmorSlot::Boots => 3,
        }
    }
}

/// Static, immutable armor descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArmorDescriptor {
    pub id: String,
    pub name: String,
    pub slot: ArmorSlot,
    pub defense: f32,
    pub speed_penalty: f32,
    pub material: Material,
}

impl ArmorDescriptor {
    pub fn new(id: &str, name: &str, slot: ArmorSlot, defense: f32, speed_penalty: f32, material: Material) -> Self {
        Self {
            id: id.to_string(),
            name: name.to_string(),
            slot,
            defense,
            speed_penalty,
            material,
        }
    }
}

pub(crate) fn slot_priority_order() -> [ArmorSlot; 4] {
    let mut slots = ArmorSlot::ALL;
    slots.sort_by_key(|s| s.priority());
    slots
}
