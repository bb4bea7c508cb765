use crate::ai_state::PatrolState;
use crate::faction::{FactionRelations, BANDIT_FACTION};
use crate::location::LocationKind;
use crate::terrain;
use crate::world::World;
use geo::Vec2;
use rand::Rng;
use stats::{Entity, EntityId, EntityKind, Role, Stats, Team};

const TIER_POWER: [f32; 4] = [0.0, 1.0, 1.4, 1.8];

fn tier_power(tier: i32) -> f32 {
    TIER_POWER.get(tier as usize).copied().unwrap_or(1.0)
}

fn army_power(entity: &Entity) -> f32 {
    let size = entity.army_size.unwrap_or(1) as f32;
    let tier = entity.avg_tier.unwrap_or(1);
    size * tier_power(tier)
}

/// The battle a marker collision hands off to `arena::ArenaController`.
/// `side_a` is always the side containing the player's opposing force (the
/// faction the player collided with); `ally_troops` are friendly army
/// markers folded in as player-side troops.
#[derive(Debug, Clone)]
pub struct EncounterTriggered {
    pub side_a: Vec<Entity>,
    pub side_b: Vec<Entity>,
    pub ally_troops: Vec<Entity>,
    pub seed: u64,
    pub initiating_faction: String,
}

/// Advance the overworld by `dt` seconds: diplomacy, auto-resolve,
/// per-marker AI, the player-collision encounter check, and capped
/// periodic spawning, in that order. Returns the triggered
/// encounter, if the player collided with a hostile army marker this tick.
pub fn tick_world(world: &mut World, player_position: Vec2, relations: &mut FactionRelations, dt: f32) -> Option<EncounterTriggered> {
    tick_diplomacy(world, dt);
    tick_auto_resolve(world, player_position, dt);
    tick_army_ai(world, player_position, relations, dt);
    let encounter = tick_encounter_check(world, player_position, relations);
    tick_spawning(world, dt);
    encounter
}

/// Every `diplomacy_interval` seconds, pick one random non-bandit faction
/// pair and flip its `ai_wars` membership, then re-pin every
/// `(bandits, faction)` pair into the war set. Bandits are never chosen as
/// the toggled pair — they stay permanently at war via `World::generate`
/// and this re-pin.
fn tick_diplomacy(world: &mut World, dt: f32) {
    world.diplomacy_timer += dt;
    if world.diplomacy_timer < world.config.diplomacy_interval {
        return;
    }
    world.diplomacy_timer = 0.0;

    let factions: Vec<String> = crate::world::DEFAULT_FACTIONS.iter().map(|s| s.to_string()).collect();
    if factions.len() >= 2 {
        let a_idx = world.rng.gen_range(0..factions.len());
        let a = factions[a_idx].clone();
        let b = loop {
            let b_idx = world.rng.gen_range(0..factions.len());
            if b_idx != a_idx {
                break factions[b_idx].clone();
            }
        };
        let key = war_key(&a, &b);
        if world.ai_wars.contains(&key) {
            world.ai_wars.remove(&key);
        } else {
            world.ai_wars.insert(key);
        }
    }

    for faction in &factions {
        world.ai_wars.insert(war_key(BANDIT_FACTION, faction));
    }
}

fn war_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

/// Resolve close-range army-vs-army clashes off-screen without invoking the
/// arena: pairs of warring markers within clash
/// range of each other, and within `auto_resolve_player_radius` of the
/// player, trade casualty rolls proportional to relative power.
fn tick_auto_resolve(world: &mut World, player_position: Vec2, dt: f32) {
    world.auto_resolve_timer += dt;
    if world.auto_resolve_timer < world.config.auto_resolve_interval {
        return;
    }
    world.auto_resolve_timer = 0.0;

    let ids: Vec<EntityId> = world
        .enemies
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::ArmyMarker && e.position.distance(player_position) <= world.config.auto_resolve_player_radius)
        .map(|(id, _)| *id)
        .collect();

    let mut checks = 0u32;
    let mut casualties: Vec<(EntityId, i32)> = Vec::new();

    'outer: for i in 0..ids.len() {
        for j in (i + 1)..ids.len() {
            if checks >= world.config.auto_resolve_max_checks {
                break 'outer;
            }
            checks += 1;

            let (a, b) = (ids[i], ids[j]);
            let (Some(ea), Some(eb)) = (world.enemies.get(&a), world.enemies.get(&b)) else { continue };
            if ea.faction == eb.faction {
                continue;
            }
            if ea.position.distance(eb.position) > world.config.auto_resolve_clash_radius {
                continue;
            }
            if !world.ai_wars.contains(&war_key(&ea.faction, &eb.faction)) {
                continue;
            }

            let (pa, pb) = (army_power(ea), army_power(eb));
            let total = pa + pb;
            let rounds = if total > 20.0 { 2 } else { 1 };
            for _ in 0..rounds {
                let roll: f32 = world.rng.gen_range(0.0..total.max(1.0));
                if roll < pa {
                    casualties.push((b, 1));
                } else {
                    casualties.push((a, 1));
                }
            }
        }
    }

    for (id, loss) in casualties {
        if let Some(marker) = world.enemies.get_mut(&id) {
            marker.army_size = Some(marker.army_size.unwrap_or(1) - loss);
        }
    }

    let dead: Vec<EntityId> = world
        .enemies
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::ArmyMarker && e.army_size.unwrap_or(1) <= 0)
        .map(|(id, _)| *id)
        .collect();
    for id in dead {
        log::debug!("army marker {id} wiped out in auto-resolve");
        world.remove_enemy(id);
        world.defeated_enemies += 1;
    }
}

/// Per-marker patrol/chase state machine,
/// with LOD hysteresis so only markers near the player actually simulate.
fn tick_army_ai(world: &mut World, player_position: Vec2, relations: &FactionRelations, dt: f32) {
    let ids: Vec<EntityId> = world.enemies.keys().copied().collect();
    let mut alerts: Vec<EntityId> = Vec::new();

    for id in &ids {
        let dist_to_player = match world.enemies.get(id) {
            Some(e) => e.position.distance(player_position),
            None => continue,
        };

        let active = world.ai_states.get(id).map(|s| s.active).unwrap_or(true);
        let new_active = if active && dist_to_player > world.config.lod_deactivate_distance {
            false
        } else if !active && dist_to_player < world.config.lod_reactivate_distance {
            true
        } else {
            active
        };
        if let Some(state) = world.ai_states.get_mut(id) {
            state.active = new_active;
        }
        if !new_active {
            continue;
        }

        let faction = world.enemies.get(id).map(|e| e.faction.clone()).unwrap_or_default();
        let is_bandit = faction == BANDIT_FACTION;
        let hostile_to_player = relations.is_hostile(&faction);

        let patrol_state = world.ai_states.get(id).map(|s| s.state).unwrap_or(PatrolState::Patrolling);

        match patrol_state {
            PatrolState::Patrolling => {
                if hostile_to_player && dist_to_player < world.config.patrol_detect_radius {
                    transition_to_chasing(world, *id);
                    alerts.push(*id);
                    continue;
                }
                if is_bandit {
                    if let Some(target) = nearest_warring_marker(world, *id) {
                        step_towards(world, *id, target, 0.5, dt);
                        continue;
                    }
                }
                patrol_step(world, *id, dt);
            }
            PatrolState::Chasing => {
                step_towards(world, *id, player_position, 0.55, dt);
                let dist = world.enemies.get(id).map(|e| e.position.distance(player_position)).unwrap_or(f32::MAX);
                if dist > world.config.chase_give_up_distance {
                    if let Some(state) = world.ai_states.get_mut(id) {
                        state.state = PatrolState::Patrolling;
                    }
                }
            }
        }
    }

    for alerter in alerts {
        alert_nearby_allies(world, alerter);
    }
}

fn transition_to_chasing(world: &mut World, id: EntityId) {
    if let Some(state) = world.ai_states.get_mut(&id) {
        state.state = PatrolState::Chasing;
    }
}

fn alert_nearby_allies(world: &mut World, alerter: EntityId) {
    let Some((faction, position)) = world.enemies.get(&alerter).map(|e| (e.faction.clone(), e.position)) else { return };
    let radius = world.config.patrol_alert_radius;
    let nearby: Vec<EntityId> = world
        .enemies
        .iter()
        .filter(|(id, e)| **id != alerter && e.faction == faction && e.position.distance(position) <= radius)
        .map(|(id, _)| *id)
        .collect();
    for id in nearby {
        if let Some(state) = world.ai_states.get_mut(&id) {
            if state.state == PatrolState::Patrolling {
                state.state = PatrolState::Chasing;
            }
        }
    }
}

fn nearest_warring_marker(world: &World, id: EntityId) -> Option<Vec2> {
    let (faction, position) = world.enemies.get(&id).map(|e| (e.faction.clone(), e.position))?;
    world
        .enemies
        .iter()
        .filter(|(other_id, e)| **other_id != id && world.ai_wars.contains(&war_key(&faction, &e.faction)) && e.position.distance(position) <= world.config.bandit_hunt_radius)
        .min_by(|(_, a), (_, b)| a.position.distance(position).partial_cmp(&b.position.distance(position)).unwrap())
        .map(|(_, e)| e.position)
}

fn patrol_step(world: &mut World, id: EntityId, dt: f32) {
    let angle_choice: bool = {
        let state = world.ai_states.entry(id).or_insert_with(|| crate::ai_state::OverworldAiState::new(true));
        state.patrol_timer -= dt;
        state.patrol_timer <= 0.0
    };
    if angle_choice {
        let angle = world.rng.gen_range(0.0..std::f32::consts::TAU);
        let interval = world.rng.gen_range(2.0..=4.0);
        if let Some(state) = world.ai_states.get_mut(&id) {
            state.patrol_direction = Vec2::new(angle.cos(), angle.sin());
            state.patrol_timer = interval;
        }
    }
    let direction = world.ai_states.get(&id).map(|s| s.patrol_direction).unwrap_or(Vec2::zero());
    step_direction(world, id, direction, 0.4, dt);
}

fn step_towards(world: &mut World, id: EntityId, target: Vec2, base_speed_frac: f32, dt: f32) {
    let Some(position) = world.enemies.get(&id).map(|e| e.position) else { return };
    let direction = (target - position).normalized_or(Vec2::zero());
    step_direction(world, id, direction, base_speed_frac, dt);
}

/// Step `id` along `direction` at `base_speed_frac` of its base speed,
/// applying forest slowdown and refusing to enter blocking terrain.
fn step_direction(world: &mut World, id: EntityId, direction: Vec2, base_speed_frac: f32, dt: f32) {
    const BASE_SPEED: f32 = 60.0;
    let Some(entity) = world.enemies.get(&id) else { return };
    let speed = BASE_SPEED * base_speed_frac * terrain::speed_multiplier(&world.terrain, entity.position);
    let candidate = entity.position + direction * speed * dt;
    if terrain::blocks_movement(&world.terrain, candidate) {
        return;
    }
    let clamped = Vec2::new(candidate.x.clamp(0.0, world.config.width), candidate.y.clamp(0.0, world.config.height));
    if let Some(entity) = world.enemies.get_mut(&id) {
        entity.position = clamped;
    }
}

/// Check whether the player collided with a hostile army marker and, if so,
/// assemble the full encounter roster:
/// the triggering marker expands into individual enemies, nearby warring
/// markers become side B, nearby allied markers become ally troops.
fn tick_encounter_check(world: &mut World, player_position: Vec2, relations: &FactionRelations) -> Option<EncounterTriggered> {
    const PLAYER_RADIUS: f32 = 16.0;

    let trigger_id = world.enemies.iter().find_map(|(id, e)| {
        if e.kind != EntityKind::ArmyMarker {
            return None;
        }
        if !relations.is_hostile(&e.faction) {
            return None;
        }
        let gap = PLAYER_RADIUS + e.radius + world.config.encounter_collision_margin;
        if e.position.distance(player_position) <= gap {
            Some(*id)
        } else {
            None
        }
    })?;

    let trigger = world.remove_enemy(trigger_id)?;
    let faction = trigger.faction.clone();
    let side_a = expand_army_marker(world, &trigger);

    let gather_radius = world.config.encounter_side_b_radius;
    let warring_ids: Vec<EntityId> = world
        .enemies
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::ArmyMarker && world.ai_wars.contains(&war_key(&faction, &e.faction)) && e.position.distance(trigger.position) <= gather_radius)
        .map(|(id, _)| *id)
        .collect();

    let mut side_b = Vec::new();
    for id in warring_ids {
        if let Some(marker) = world.remove_enemy(id) {
            side_b.extend(expand_army_marker(world, &marker));
        }
    }
    if side_b.is_empty() {
        let nearby_ids: Vec<EntityId> = world
            .enemies
            .iter()
            .filter(|(_, e)| e.kind == EntityKind::Enemy && e.faction == faction && e.position.distance(trigger.position) <= world.config.encounter_nearby_radius)
            .take(world.config.max_nearby_enemies_in_encounter)
            .map(|(id, _)| *id)
            .collect();
        for id in nearby_ids {
            if let Some(e) = world.remove_enemy(id) {
                side_b.push(e);
            }
        }
    }

    let ally_radius = world.config.ally_troop_radius;
    let ally_ids: Vec<EntityId> = world
        .enemies
        .iter()
        .filter(|(_, e)| e.kind == EntityKind::ArmyMarker && relations.is_allied(&e.faction) && e.position.distance(trigger.position) <= ally_radius)
        .map(|(id, _)| *id)
        .collect();

    let mut ally_troops = Vec::new();
    for id in ally_ids {
        if let Some(marker) = world.remove_enemy(id) {
            ally_troops.extend(expand_army_marker(world, &marker));
        }
    }

    let seed = world.rng.gen();
    Some(EncounterTriggered {
        side_a,
        side_b,
        ally_troops,
        seed,
        initiating_faction: faction,
    })
}

/// Expand a single army marker into up to 10 individual combatants, each a
/// fresh `Entity` at the marker's position/tier.
fn expand_army_marker(world: &mut World, marker: &Entity) -> Vec<Entity> {
    let count = marker.army_size.unwrap_or(1).clamp(1, 10);
    let tier = marker.avg_tier.unwrap_or(1);
    (0..count)
        .map(|i| {
            let mut stats = Stats::new_level_one();
            stats.level = tier;
            let offset = Vec2::new((i as f32 - count as f32 / 2.0) * 24.0, world.rng.gen_range(-10.0..=10.0));
            let mut entity = Entity::new(EntityKind::Enemy, Team::B, marker.faction.clone(), marker.position + offset, 12.0, stats);
            entity.role = Some(if i % 4 == 0 { Role::Archer } else { Role::Infantry });
            entity
        })
        .collect()
}

/// Every `spawn_interval` seconds, each castle/bandit camp spawns one new
/// army marker if under its per-site cap and the global cap isn't reached.
fn tick_spawning(world: &mut World, dt: f32) {
    world.spawn_timer += dt;
    if world.spawn_timer < world.config.spawn_interval {
        return;
    }
    world.spawn_timer = 0.0;

    if world.enemies.len() as u32 >= world.config.global_army_cap {
        return;
    }

    let sites: Vec<(String, LocationKind, Vec2)> = world
        .locations
        .iter()
        .filter(|l| l.is_spawn_site())
        .map(|l| (l.faction.clone(), l.kind, l.position))
        .collect();

    for (faction, kind, position) in sites {
        let cap = match kind {
            LocationKind::BanditCamp => world.config.bandit_camp_cap,
            LocationKind::Castle => world.config.castle_cap,
            LocationKind::Town => continue,
        };
        let existing = world
            .enemies
            .values()
            .filter(|e| e.kind == EntityKind::ArmyMarker && e.faction == faction && e.position.distance(position) <= world.config.castle_spawn_radius)
            .count() as u32;
        if existing >= cap {
            continue;
        }
        if world.enemies.len() as u32 >= world.config.global_army_cap {
            break;
        }
        let site = world.locations.iter().find(|l| l.faction == faction && l.kind == kind && l.position == position).cloned();
        if let Some(site) = site {
            world.spawn_army_marker(&site);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WorldConfig;

    fn test_world(seed: u64) -> World {
        World::generate(seed, WorldConfig::default())
    }

    #[test]
    fn auto_resolve_never_exceeds_its_check_budget() {
        let mut world = test_world(7);
        let mut relations = FactionRelations::new();
        tick_world(&mut world, Vec2::zero(), &mut relations, 10.0);
    }

    #[test]
    fn encounter_trigger_removes_the_colliding_marker() {
        let mut world = test_world(11);
        let relations = FactionRelations::new();
        let id = *world.enemies.keys().next().unwrap();
        let position = world.enemies[&id].position;
        world.enemies.get_mut(&id).unwrap().faction = BANDIT_FACTION.to_string();

        let result = tick_encounter_check(&mut world, position, &relations);
        assert!(result.is_some());
        assert!(!world.enemies.contains_key(&id));
        let encounter = result.unwrap();
        assert!(!encounter.side_a.is_empty());
    }

    #[test]
    fn spawning_respects_global_cap() {
        let mut world = test_world(13);
        world.config.global_army_cap = world.enemies.len() as u32;
        let before = world.enemies.len();
        tick_spawning(&mut world, 999.0);
        assert_eq!(world.enemies.len(), before);
    }
}
