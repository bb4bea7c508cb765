//! # Warbound Marches
//!
//! A real-time RPG with two coupled simulation modes: an **overworld**
//! layer (factions, roaming armies, diplomacy, auto-resolve) and an
//! **arena** layer (player plus allied troops versus enemy formations,
//! ticked at a fixed real-time step). This crate is a thin facade over the
//! workspace's simulation crates; it re-exports the pieces a shell needs to
//! wire a tick loop together. `warbound-app` is the headless binary that
//! actually drives that loop and logs the resulting event stream —
//! rendering, input devices, and inventory/shop UI live outside the
//! workspace entirely.
//!
//! ## Workspace layout
//!
//! - [`geo`] — `Vec2`/`Rect` primitives shared by every other crate.
//! - [`stats`] — the shared `Entity`/`Stats` record and attribute derivation.
//! - [`items`] — the weapon/armor catalog and equipped loadouts.
//! - [`combat`] — the damage pipeline and projectile manager.
//! - [`ai`] — enemy and troop per-tick decision logic.
//! - [`events`] — the event bus a shell drains once per tick.
//! - [`arena`] — the clock/RNG and the controller that runs one battle.
//! - [`overworld`] — world generation, roaming army AI, and encounter assembly.
//! - [`persistence`] — save/load schema, migration, and timestamped backups.
//!
//! ## Control flow
//!
//! Per arena frame: hit-pause-scaled clock → player input → enemy AI →
//! troop AI → projectile update → damage resolution (player, then enemies,
//! then troops) → position stash → victory/defeat check → event drain.
//!
//! Per overworld frame: diplomacy → auto-resolve skirmishes between warring
//! markers → roaming army AI → player/army collision check → capped
//! periodic spawning → event drain. See each crate's module docs for the
//! exact per-phase contract and ordering.
pub use ai;
pub use arena;
pub use combat;
pub use events;
pub use geo;
pub use items;
pub use overworld;
pub use persistence;
pub use stats;

pub use arena::{ArenaConfig, ArenaController, BattleOutcome, PlayerAttackWeight, PlayerIntent};
pub use events::{Event, EventBus};
pub use overworld::{EncounterTriggered, FactionRelations, World, WorldConfig};
pub use stats::{Entity, EntityId, EntityKind, Role, Stats, Team};
