use arena::{ArenaConfig, ArenaController, PlayerIntent};
use events::Event;
use geo::Vec2;
use items::Equipment;
use overworld::{tick_world, EncounterTriggered, FactionRelations, World, WorldConfig};
use stats::{Entity, EntityKind, Role, Stats, Team};

/// The shell's idea of the player's persistent loadout between overworld
/// ticks and arena battles. Owned here instead of in `stats`/`overworld`
/// since no core crate needs to know which faction the human is playing.
pub struct GameSession {
    pub world: World,
    pub relations: FactionRelations,
    pub player: Entity,
    pub troops: Vec<Entity>,
    pub current_location: Option<String>,
    pub game_time: f64,
}

impl GameSession {
    pub fn new(seed: u64) -> Self {
        let world = World::generate(seed, WorldConfig::default());
        let mut relations = FactionRelations::new();
        for faction in overworld::DEFAULT_FACTIONS {
            relations.adjust(faction, 10);
        }

        let spawn = world
            .castles()
            .next()
            .map(|c| c.position)
            .unwrap_or_else(Vec2::zero);

        let mut player = Entity::new(EntityKind::Player, Team::A, "rome", spawn, 14.0, Stats::new_level_one());
        player.equipment = starting_loadout();

        let troops = (0..3)
            .map(|i| {
                let mut troop = Entity::new(EntityKind::Troop, Team::A, "rome", spawn, 12.0, Stats::new_level_one());
                troop.role = Some(if i == 0 { Role::Archer } else { Role::Infantry });
                troop.subtype = Some(if i == 0 { "archer".to_string() } else { "warrior".to_string() });
                troop.equipment = starting_loadout();
                troop
            })
            .collect();

        let current_location = world.castles().next().map(|c| c.name.clone());

        Self {
            world,
            relations,
            player,
            troops,
            current_location,
            game_time: 0.0,
        }
    }

    /// Advance the overworld one tick; returns an encounter if the player's
    /// marker collided with a hostile army this tick.
    pub fn tick_overworld(&mut self, dt: f32) -> Option<EncounterTriggered> {
        self.game_time += dt as f64;
        tick_world(&mut self.world, self.player.position, &mut self.relations, dt)
    }

    /// Wander the player toward the nearest hostile marker so a headless run
    /// actually reaches an encounter instead of idling forever; a real shell
    /// replaces this with player input.
    pub fn drift_player_towards_danger(&mut self, dt: f32) {
        let hostile = self
            .world
            .enemies
            .values()
            .filter(|e| e.kind == EntityKind::ArmyMarker && self.relations.is_hostile(&e.faction))
            .min_by(|a, b| {
                a.position
                    .distance(self.player.position)
                    .partial_cmp(&b.position.distance(self.player.position))
                    .unwrap()
            });
        if let Some(target) = hostile {
            let direction = (target.position - self.player.position).normalized_or(Vec2::zero());
            self.player.position = self.player.position + direction * 90.0 * dt;
        }
    }

    /// Hand an `EncounterTriggered` off to a fresh `ArenaController` and run
    /// it to completion with a simple scripted player intent, draining and
    /// logging events as they're produced. A real shell
    /// drives `tick()` from its own input/render loop instead of looping
    /// here; this exists so the headless binary demonstrates the full
    /// encounter -> battle -> outcome path end to end.
    pub fn run_encounter(&mut self, encounter: EncounterTriggered, dt: f32) -> arena::BattleOutcome {
        log::info!(
            "encounter triggered: {} attacker(s), {} defender(s), {} ally troop(s), faction {}",
            encounter.side_a.len(),
            encounter.side_b.len(),
            encounter.ally_troops.len(),
            encounter.initiating_faction,
        );

        let mut player = self.player.clone();
        player.position = Vec2::zero();
        let mut troops = self.troops.clone();
        troops.extend(encounter.ally_troops);
        let mut enemies = encounter.side_a;
        enemies.extend(encounter.side_b);

        let mut controller = ArenaController::start_battle(ArenaConfig::default(), encounter.seed, player, troops, enemies);

        let mut guard_ticks = 0u32;
        while !controller.is_done() && guard_ticks < 36_000 {
            controller.tick(dt, scripted_intent(&controller));
            for event in controller.bus.drain_vec() {
                log_event(&event);
            }
            guard_ticks += 1;
        }

        let outcome = controller.outcome().expect("controller reports done without an outcome");
        self.player.stats.hp = outcome.player_hp;
        if outcome.xp_granted > 0 {
            self.player.stats.grant_xp(outcome.xp_granted);
        }
        self.player.stats.gold += outcome.gold_granted;
        outcome
    }
}

fn starting_loadout() -> Equipment {
    let mut equipment = Equipment::new();
    let _ = equipment.equip_weapon("iron_sword");
    let _ = equipment.equip_armor("leather_cap");
    let _ = equipment.equip_armor("leather_vest");
    let _ = equipment.equip_armor("leather_leggings");
    let _ = equipment.equip_armor("leather_boots");
    equipment
}

/// A player stand-in for the headless demo: attack whenever the cooldown is
/// free, walk toward the nearest living enemy otherwise. Not a substitute
/// for real `Input` — just enough to exercise the pipeline.
fn scripted_intent(controller: &ArenaController) -> PlayerIntent {
    let Some(player) = controller.side_a.first() else {
        return PlayerIntent::default();
    };
    let nearest = controller
        .side_b
        .iter()
        .filter(|e| e.alive())
        .min_by(|a, b| {
            a.position
                .distance(player.position)
                .partial_cmp(&b.position.distance(player.position))
                .unwrap()
        });

    let Some(target) = nearest else {
        return PlayerIntent::default();
    };
    let to_target = (target.position - player.position).normalized_or(Vec2::new(1.0, 0.0));
    let in_range = target.position.distance(player.position) <= player.radius + target.radius + 40.0;

    PlayerIntent {
        move_direction: if in_range { Vec2::zero() } else { to_target },
        wants_attack: in_range,
        attack_direction: to_target,
        attack_weight: arena::PlayerAttackWeight::Light,
        blocking: false,
    }
}

fn log_event(event: &Event) {
    match event {
        Event::Hit { damage, .. } => log::debug!("hit for {damage:.1}"),
        Event::Crit { .. } => log::info!("critical hit"),
        Event::Death { entity, .. } => log::info!("entity {entity} died"),
        Event::ComboUp { new_count, new_tier } => log::debug!("combo {new_count} (tier {new_tier})"),
        Event::Promotion { troop, new_level } => log::info!("troop {troop} promoted to level {new_level}"),
        Event::NotifyError { message } => log::warn!("{message}"),
        _ => {}
    }
}
