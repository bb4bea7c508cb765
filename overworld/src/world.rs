use crate::ai_state::OverworldAiState;
use crate::config::WorldConfig;
use crate::faction::BANDIT_FACTION;
use crate::location::{Location, LocationKind};
use crate::terrain::{Terrain, TerrainKind};
use geo::{Rect, Vec2};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use stats::{Entity, EntityId, EntityKind, Stats, Team};
use std::collections::{HashMap, HashSet};

/// The faction roster a freshly generated world populates castles for.
/// `bandits` is never in this list — it owns camps, not castles, and is
/// handled separately by [`crate::FactionRelations`].
pub const DEFAULT_FACTIONS: &[&str] = &["macedon", "greeks", "ptolemaic", "seleucid", "rome", "carthage"];

const BANDIT_CAMP_COUNT: usize = 5;
const FOREST_COUNT: usize = 18;
const DESERT_COUNT: usize = 12;
const SWAMP_COUNT: usize = 8;
const RIVER_COUNT: usize = 3;

/// Authoritative overworld state: generated terrain,
/// faction locations, roaming army markers, diplomacy/auto-resolve timers.
/// Army markers are `stats::Entity` records (`kind == ArmyMarker`) kept in
/// a slab owned by the world, with per-marker AI memory threaded alongside
/// in `ai_states`.
pub struct World {
    pub seed: u64,
    pub config: WorldConfig,
    pub rng: StdRng,

    pub locations: Vec<Location>,
    pub terrain: Vec<Terrain>,
    pub roads: Vec<Vec<Vec2>>,

    pub enemies: HashMap<EntityId, Entity>,
    pub(crate) ai_states: HashMap<EntityId, OverworldAiState>,

    pub ai_wars: HashSet<(String, String)>,
    pub visited_locations: HashSet<String>,

    pub diplomacy_timer: f32,
    pub auto_resolve_timer: f32,
    pub spawn_timer: f32,

    /// Running count of army markers removed by auto-resolve casualties or
    /// encounter hand-off, surfaced in the save file's `world.defeated_enemies`.
    /// Not reset on load.
    pub defeated_enemies: u32,
}

impl World {
    /// Generate a fresh world for `seed`: terrain patches, one castle per
    /// faction in [`DEFAULT_FACTIONS`], bandit camps, the permanent bandit
    /// war set, and an initial wave of army markers.
    pub fn generate(seed: u64, config: WorldConfig) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let terrain = generate_terrain(&mut rng, &config);
        let locations = generate_locations(&mut rng, &config);
        let roads = generate_roads(&locations);

        let mut ai_wars = HashSet::new();
        for faction in DEFAULT_FACTIONS {
            ai_wars.insert(war_key(BANDIT_FACTION, faction));
        }

        let mut world = Self {
            seed,
            config,
            rng,
            locations,
            terrain,
            roads,
            enemies: HashMap::new(),
            ai_states: HashMap::new(),
            ai_wars,
            visited_locations: HashSet::new(),
            diplomacy_timer: 0.0,
            auto_resolve_timer: 0.0,
            spawn_timer: 0.0,
            defeated_enemies: 0,
        };

        while world.enemies.len() < world.config.min_global_enemies {
            world.spawn_army_from_random_castle();
        }

        world
    }

    pub fn castles(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.kind == LocationKind::Castle)
    }

    pub fn spawn_sites(&self) -> impl Iterator<Item = &Location> {
        self.locations.iter().filter(|l| l.is_spawn_site())
    }

    /// Spawn one army marker near a random castle/camp (used for initial
    /// population; periodic spawning in `simulator::tick_spawning` spawns
    /// per-site instead so per-site caps apply).
    fn spawn_army_from_random_castle(&mut self) {
        let sites: Vec<usize> = (0..self.locations.len()).filter(|&i| self.locations[i].is_spawn_site()).collect();
        if sites.is_empty() {
            return;
        }
        let idx = sites[self.rng.gen_range(0..sites.len())];
        let site = self.locations[idx].clone();
        self.spawn_army_marker(&site);
    }

    /// Spawn a single army marker belonging to `site`'s faction, with
    /// internal soldier count 1..10 and tier 1..3.
    pub fn spawn_army_marker(&mut self, site: &Location) {
        let tier = self.rng.gen_range(1..=3);
        let army_size = self.rng.gen_range(1..=10);
        let offset = Vec2::new(self.rng.gen_range(-80.0..=80.0), self.rng.gen_range(-80.0..=80.0));
        let mut position = site.position + offset;
        position.x = position.x.clamp(50.0, self.config.width - 50.0);
        position.y = position.y.clamp(50.0, self.config.height - 50.0);

        let mut stats = Stats::new_level_one();
        stats.level = tier;
        let mut entity = Entity::new(EntityKind::ArmyMarker, Team::B, site.faction.clone(), position, 14.0, stats);
        entity.army_size = Some(army_size);
        entity.avg_tier = Some(tier);
        let id = entity.id;
        log::debug!("spawned army marker {id} for {} (size {army_size}, tier {tier})", site.faction);
        self.enemies.insert(id, entity);
        self.ai_states.insert(id, OverworldAiState::new(true));
    }

    pub fn remove_enemy(&mut self, id: EntityId) -> Option<Entity> {
        self.ai_states.remove(&id);
        self.enemies.remove(&id)
    }
}

fn war_key(a: &str, b: &str) -> (String, String) {
    if a <= b {
        (a.to_string(), b.to_string())
    } else {
        (b.to_string(), a.to_string())
    }
}

fn generate_terrain(rng: &mut StdRng, config: &WorldConfig) -> Vec<Terrain> {
    let mut terrain = Vec::new();
    let (w, h) = (config.width, config.height);

    for _ in 0..FOREST_COUNT {
        let tw = rng.gen_range(280.0..=520.0);
        let th = rng.gen_range(240.0..=440.0);
        let x = rng.gen_range(100.0..=(w - tw - 100.0).max(100.0));
        let y = rng.gen_range(100.0..=(h - th - 100.0).max(100.0));
        terrain.push(Terrain::new(TerrainKind::Forest, Rect::new(x, y, tw, th)));
    }
    for _ in 0..DESERT_COUNT {
        let tw = rng.gen_range(400.0..=900.0);
        let th = rng.gen_range(300.0..=700.0);
        let x = rng.gen_range((w / 3.0)..=(w - tw - 120.0).max(w / 3.0));
        let y = rng.gen_range((2.0 * h / 3.0)..=(h - th - 120.0).max(2.0 * h / 3.0));
        terrain.push(Terrain::new(TerrainKind::Desert, Rect::new(x, y, tw, th)));
    }
    for _ in 0..SWAMP_COUNT {
        let tw = rng.gen_range(300.0..=700.0);
        let th = rng.gen_range(280.0..=600.0);
        let x = rng.gen_range((w / 2.0)..=(w - tw - 150.0).max(w / 2.0));
        let y = rng.gen_range((h / 2.0)..=(h - th - 150.0).max(h / 2.0));
        terrain.push(Terrain::new(TerrainKind::Swamp, Rect::new(x, y, tw, th)));
    }
    for _ in 0..RIVER_COUNT {
        let rw = rng.gen_range(80.0..=120.0);
        let rh = rng.gen_range(1600.0..=2200.0_f32.min(h - 400.0).max(500.0));
        let x = rng.gen_range(400.0..=(w - rw - 400.0).max(400.0));
        let y = rng.gen_range(200.0..=(h - rh - 200.0).max(200.0));
        terrain.push(Terrain::new(TerrainKind::River, Rect::new(x, y, rw, rh)));
    }
    terrain
}

fn generate_locations(rng: &mut StdRng, config: &WorldConfig) -> Vec<Location> {
    let mut locations = Vec::new();
    let (w, h) = (config.width, config.height);

    for (i, faction) in DEFAULT_FACTIONS.iter().enumerate() {
        let x = rng.gen_range(200.0..=(w - 200.0));
        let y = rng.gen_range(200.0..=(h - 200.0));
        locations.push(Location::new(format!("{faction} Keep"), Vec2::new(x, y), LocationKind::Castle, 110.0, *faction));
        let _ = i;
    }
    for i in 0..BANDIT_CAMP_COUNT {
        let x = rng.gen_range(400.0..=(w - 400.0));
        let y = rng.gen_range(400.0..=(h - 400.0));
        locations.push(Location::new(format!("Bandit Camp {}", i + 1), Vec2::new(x, y), LocationKind::BanditCamp, 70.0, BANDIT_FACTION));
    }
    locations
}

/// A minimal road network: each location connects to its nearest
/// neighbour as a two-point polyline. Purely a rendering/flavor aid for
/// the shell; the simulation never consults it.
fn generate_roads(locations: &[Location]) -> Vec<Vec<Vec2>> {
    let mut roads = Vec::new();
    for (i, loc) in locations.iter().enumerate() {
        let nearest = locations
            .iter()
            .enumerate()
            .filter(|(j, _)| *j != i)
            .min_by(|(_, a), (_, b)| loc.position.distance(a.position).partial_cmp(&loc.position.distance(b.position)).unwrap());
        if let Some((_, other)) = nearest {
            roads.push(vec![loc.position, other.position]);
        }
    }
    roads
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generated_world_pins_bandits_at_war_with_every_faction() {
        let world = World::generate(1, WorldConfig::default());
        for faction in DEFAULT_FACTIONS {
            assert!(world.ai_wars.contains(&war_key(BANDIT_FACTION, faction)));
        }
    }

    #[test]
    fn generated_world_meets_minimum_enemy_count() {
        let world = World::generate(2, WorldConfig::default());
        assert!(world.enemies.len() >= world.config.min_global_enemies);
    }

    #[test]
    fn one_castle_per_default_faction() {
        let world = World::generate(3, WorldConfig::default());
        assert_eq!(world.castles().count(), DEFAULT_FACTIONS.len());
    }
}
