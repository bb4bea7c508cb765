use serde::{Deserialize, Serialize};
use std::collections::HashMap;

pub const BANDIT_FACTION: &str = "bandits";
const WAR_THRESHOLD: i32 = -30;
const ALLY_THRESHOLD: i32 = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum RelationStatus {
    War,
    Neutral,
    Ally,
}

/// Player-facing faction standing, `[-100, 100]` per faction id.
/// `bandits` is not stored here — it is always hostile, pinned by
/// [`FactionRelations::status`] rather than a map entry.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FactionRelations {
    pub relations: HashMap<String, i32>,
}

impl FactionRelations {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn value(&self, faction: &str) -> i32 {
        if faction == BANDIT_FACTION {
            return -50;
        }
        *self.relations.get(faction).unwrap_or(&0)
    }

    pub fn status(&self, faction: &str) -> RelationStatus {
        let v = self.value(faction);
        if v < WAR_THRESHOLD {
            RelationStatus::War
        } else if v > ALLY_THRESHOLD {
            RelationStatus::Ally
        } else {
            RelationStatus::Neutral
        }
    }

    pub fn adjust(&mut self, faction: &str, delta: i32) {
        let entry = self.relations.entry(faction.to_string()).or_insert(0);
        *entry = (*entry + delta).clamp(-100, 100);
    }

    pub fn is_hostile(&self, faction: &str) -> bool {
        faction == BANDIT_FACTION || self.value(faction) <= WAR_THRESHOLD
    }

    pub fn is_allied(&self, faction: &str) -> bool {
        self.value(faction) > ALLY_THRESHOLD
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bandits_are_always_hostile() {
        let relations = FactionRelations::new();
        assert!(relations.is_hostile(BANDIT_FACTION));
        assert_eq!(relations.status(BANDIT_FACTION), RelationStatus::War);
    }

    #[test]
    fn adjust_clamps_into_range() {
        let mut relations = FactionRelations::new();
        relations.adjust("rome", 500);
        assert_eq!(relations.value("rome"), 100);
        relations.adjust("rome", -1000);
        assert_eq!(relations.value("rome"), -100);
    }

    #[test]
    fn status_thresholds_match_spec_bounds() {
        let mut relations = FactionRelations::new();
        relations.adjust("rome", 31);
        assert_eq!(relations.status("rome"), RelationStatus::Ally);
        relations.adjust("rome", -62);
        assert_eq!(relations.status("rome"), RelationStatus::War);
    }
}
