use geo::Vec2;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum LocationKind {
    Town,
    Castle,
    BanditCamp,
}

/// A named point of interest on the overworld:
/// castles spawn army markers for their faction, bandit camps do the same
/// for "bandits", towns are shops/interaction points only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Location {
    pub name: String,
    pub position: Vec2,
    pub kind: LocationKind,
    pub interaction_radius: f32,
    pub faction: String,
}

impl Location {
    pub fn new(name: impl Into<String>, position: Vec2, kind: LocationKind, interaction_radius: f32, faction: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            position,
            kind,
            interaction_radius,
            faction: faction.into(),
        }
    }

    pub fn is_spawn_site(&self) -> bool {
        matches!(self.kind, LocationKind::Castle | LocationKind::BanditCamp)
    }
}
