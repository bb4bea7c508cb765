//! # Items Crate
//!
//! Immutable catalog of weapons and armor plus the equipped loadout a unit
//! carries. Catalog entries are static descriptors keyed by string id (see
//! [`catalog`]); a unit's `Equipment` only stores those ids, never a copy of
//! the descriptor, so balance changes to the catalog apply to every unit
//! wearing that gear without a save migration.
//!
//! Weapons and armor are looked up through [`catalog::weapon`] /
//! [`catalog::armor`], both of which return [`CatalogError::UnknownId`] for
//! an id the catalog doesn't recognize — the caller (typically `stats::Entity::equip`)
//! refuses the equip and leaves prior gear in place.

mod armor;
pub mod catalog;
mod equipment;
mod error;
pub mod scaling;
mod weapon;

pub use armor::{ArmorDescriptor, ArmorSlot, Material};
pub use catalog::Catalog;
pub use equipment::Equipment;
pub use error::CatalogError;
pub use scaling::ScalingGrade;
pub use weapon::{DamageType, WeaponDescriptor};
