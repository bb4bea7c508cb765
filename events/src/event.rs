use geo::Vec2;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Light vs heavy attack, used to size impact/blood effects and poise damage.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AttackWeight {
    Light,
    Heavy,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageNumberKind {
    Normal,
    Crit,
    Blocked,
}

/// Every event the core can emit in a single tick. Tagged
/// variants, drained in arrival order by the shell — see [`crate::EventBus`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Event {
    Hit {
        attacker: Uuid,
        target: Uuid,
        damage: f32,
        position: Vec2,
        weight: AttackWeight,
    },
    Crit {
        attacker: Uuid,
        target: Uuid,
    },
    Parry {
        defender: Uuid,
        attacker: Uuid,
    },
    Block {
        defender: Uuid,
        attacker: Uuid,
        reduced_damage: f32,
    },
    Death {
        entity: Uuid,
        position: Vec2,
    },
    ComboUp {
        new_count: u32,
        new_tier: u8,
    },
    Promotion {
        troop: Uuid,
        new_level: i32,
    },
    Encounter {
        attacker_army: Uuid,
        defender_army: Uuid,
        position: Vec2,
    },
    DamageNumber {
        position: Vec2,
        amount: f32,
        kind: DamageNumberKind,
    },
    ScreenShake {
        magnitude: f32,
    },
    HitPause {
        duration: f32,
    },
    /// A caller-facing operation failed against a bad identifier or invalid
    /// state and the error
    /// is being surfaced through the bus instead of a return value, because
    /// the failing call site has no direct line back to the shell's UI.
    NotifyError {
        message: String,
    },
}
