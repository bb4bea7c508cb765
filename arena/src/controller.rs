use crate::clock::Clock;
use crate::combo::ComboState;
use crate::config::ArenaConfig;
use crate::outcome::BattleOutcome;
use ai::{
    tick_enemy, tick_troop, EnemyAiInput, EnemyAiState, EnemyRef, Profile, TargetCandidate,
    TroopAiInput, TroopAiState, Order,
};
use combat::{
    effective_weapon_mult, is_occluded_by_ally, predictive_aim_direction, resolve_attack,
    AttackRoll, AttackWeight, BlockState, Projectile, ProjectileManager,
};
use events::{Event, EventBus};
use geo::Vec2;
use items::DamageType;
use rand::rngs::StdRng;
use rand::Rng;
use stats::{Entity, EntityId, Role};
use std::collections::{HashMap, HashSet};
use uuid::Uuid;

const GRID_SPACING_X: f32 = 36.0;
const GRID_SPACING_Y: f32 = 28.0;
const PROJECTILE_SPEED: f32 = 340.0;
const PROJECTILE_RADIUS: f32 = 4.0;
const CLUMP_RADIUS: f32 = 100.0;
const CLUMP_THRESHOLD: usize = 2;
const ORDER_CHANGE_FLASH: f32 = 0.3;
const LOD_DISTANCE: f32 = 650.0;

/// What the shell drained from input this frame.
#[derive(Debug, Clone, Copy, Default)]
pub struct PlayerIntent {
    pub move_direction: Vec2,
    pub wants_attack: bool,
    pub attack_direction: Vec2,
    pub attack_weight: PlayerAttackWeight,
    pub blocking: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PlayerAttackWeight {
    #[default]
    Light,
    Heavy,
}

#[derive(Debug, Default)]
struct PlayerCombatState {
    blocking: bool,
    block_timer: f32,
    attack_cooldown: f32,
    active_attack_timer: f32,
    attack_direction: Vec2,
    attack_weight: PlayerAttackWeight,
    hit_set: HashSet<EntityId>,
}

/// Orchestrates one battle tick end to end. Owns both sides'
/// entities, the projectile manager, per-entity AI memory, combo/veterancy
/// tracking, and the event bus the shell drains every frame.
pub struct ArenaController {
    pub config: ArenaConfig,
    clock: Clock,
    rng: StdRng,
    pub side_a: Vec<Entity>,
    pub side_b: Vec<Entity>,
    player_index: Option<usize>,
    enemy_ai: HashMap<EntityId, EnemyAiState>,
    troop_ai: HashMap<EntityId, TroopAiState>,
    projectiles: ProjectileManager,
    pub bus: EventBus,
    player_combat: PlayerCombatState,
    combo: ComboState,
    pub troop_order: Order,
    pub focus_target: Option<EntityId>,
    pub screen_shake: f32,
    order_flash_timer: f32,
    kills_by: HashMap<EntityId, u32>,
    defeated_enemies: Vec<EntityId>,
    done: bool,
    victory: bool,
    gold_granted: i64,
}

impl ArenaController {
    /// Places player/troops on the LEFT half in a grid of spacing 36x28
    /// around the player, enemies distributed along the RIGHT side.
    pub fn start_battle(config: ArenaConfig, seed: u64, player: Entity, troops: Vec<Entity>, enemies: Vec<Entity>) -> Self {
        let player_anchor = Vec2::new(config.width * 0.25, config.height * 0.5);
        let enemy_anchor = Vec2::new(config.width * 0.75, config.height * 0.5);

        let mut side_a = vec![player];
        for (i, mut troop) in troops.into_iter().enumerate() {
            troop.position = grid_slot(player_anchor, i + 1);
            side_a.push(troop);
        }
        side_a[0].position = player_anchor;

        let mut side_b = Vec::with_capacity(enemies.len());
        for (i, mut enemy) in enemies.into_iter().enumerate() {
            enemy.position = grid_slot(enemy_anchor, i);
            side_b.push(enemy);
        }

        Self {
            config,
            clock: Clock::new(),
            rng: crate::rng::seeded_rng(seed),
            side_a,
            side_b,
            player_index: Some(0),
            enemy_ai: HashMap::new(),
            troop_ai: HashMap::new(),
            projectiles: ProjectileManager::new(),
            bus: EventBus::new(),
            player_combat: PlayerCombatState::default(),
            combo: ComboState::new(),
            troop_order: Order::Follow,
            focus_target: None,
            screen_shake: 0.0,
            order_flash_timer: 0.0,
            kills_by: HashMap::new(),
            defeated_enemies: Vec::new(),
            done: false,
            victory: false,
            gold_granted: 0,
        }
    }

    /// AI-vs-AI variant: no player, both sides driven entirely by
    /// [`ai::tick_enemy`].
    pub fn start_ai_vs_ai(config: ArenaConfig, seed: u64, side_a: Vec<Entity>, side_b: Vec<Entity>) -> Self {
        Self {
            config,
            clock: Clock::new(),
            rng: crate::rng::seeded_rng(seed),
            side_a,
            side_b,
            player_index: None,
            enemy_ai: HashMap::new(),
            troop_ai: HashMap::new(),
            projectiles: ProjectileManager::new(),
            bus: EventBus::new(),
            player_combat: PlayerCombatState::default(),
            combo: ComboState::new(),
            troop_order: Order::Follow,
            focus_target: None,
            screen_shake: 0.0,
            order_flash_timer: 0.0,
            kills_by: HashMap::new(),
            defeated_enemies: Vec::new(),
            done: false,
            victory: false,
            gold_granted: 0,
        }
    }

    pub fn set_order(&mut self, order: Order) {
        if order != self.troop_order {
            self.order_flash_timer = ORDER_CHANGE_FLASH;
        }
        self.troop_order = order;
    }

    pub fn is_done(&self) -> bool {
        self.done
    }

    pub fn outcome(&self) -> Option<BattleOutcome> {
        if !self.done {
            return None;
        }
        let xp_granted: i64 = self.defeated_enemies_levels().iter().map(|l| (*l as i64) * 5).sum();
        let gold_granted = self.gold_granted;
        let surviving_troops = self.side_a.iter().skip(1).filter(|e| e.alive()).map(|e| e.id).collect();
        let promoted_troops = self
            .kills_by
            .iter()
            .filter(|(_, &kills)| kills >= 3)
            .map(|(id, _)| *id)
            .collect();
        let player_hp = self.player_index.map(|i| self.side_a[i].stats.hp).unwrap_or(0.0);
        Some(BattleOutcome {
            victory: self.victory,
            player_hp,
            xp_granted,
            gold_granted,
            defeated_enemies: self.defeated_enemies.clone(),
            surviving_troops,
            promoted_troops,
        })
    }

    fn defeated_enemies_levels(&self) -> Vec<i32> {
        self.defeated_enemies
            .iter()
            .filter_map(|id| self.side_b.iter().find(|e| e.id == *id))
            .map(|e| e.stats.level)
            .collect()
    }

    /// Advance the battle by one frame.
    pub fn tick(&mut self, raw_dt: f32, intent: PlayerIntent) {
        if self.done {
            return;
        }

        // step 1
        let dt = self.clock.advance(raw_dt);

        // step 2
        self.decrement_timers(dt);

        // step 3
        self.drain_player_input(dt, &intent);

        // step 4
        self.run_enemy_ai(dt);

        // step 5
        self.run_troop_ai(dt);

        // step 6
        self.update_projectiles(dt);

        // step 7
        self.resolve_active_attacks(dt);

        // step 8
        for e in self.side_a.iter_mut().chain(self.side_b.iter_mut()) {
            e.stash_last_position();
        }

        // step 9
        self.order_flash_timer = (self.order_flash_timer - dt).max(0.0);

        // step 10
        self.check_victory_defeat();
    }

    fn decrement_timers(&mut self, dt: f32) {
        for e in self.side_a.iter_mut().chain(self.side_b.iter_mut()) {
            e.tick_timers(dt);
        }
        self.player_combat.attack_cooldown = (self.player_combat.attack_cooldown - dt).max(0.0);
        self.player_combat.active_attack_timer = (self.player_combat.active_attack_timer - dt).max(0.0);
        self.player_combat.block_timer = (self.player_combat.block_timer - dt).max(0.0);
        self.combo.tick(dt);
    }

    fn drain_player_input(&mut self, dt: f32, intent: &PlayerIntent) {
        let Some(player_idx) = self.player_index else { return };

        self.player_combat.blocking = intent.blocking;
        if intent.blocking {
            self.player_combat.block_timer += dt;
        } else {
            self.player_combat.block_timer = 0.0;
        }

        {
            let player = &mut self.side_a[player_idx];
            let speed = player.stats.spd;
            player.position = player.position + intent.move_direction * speed * dt;
            player.clamp_into_bounds(self.config.width, self.config.height, self.config.border);
        }

        if intent.wants_attack && self.player_combat.attack_cooldown <= 0.0 && !intent.blocking {
            let (cooldown, duration) = match intent.attack_weight {
                PlayerAttackWeight::Light => (0.5, 0.2),
                PlayerAttackWeight::Heavy => (0.9, 0.35),
            };
            self.player_combat.attack_cooldown = cooldown;
            self.player_combat.active_attack_timer = duration;
            self.player_combat.attack_direction = intent.attack_direction;
            self.player_combat.attack_weight = intent.attack_weight;
            self.player_combat.hit_set.clear();
        }
    }

    fn run_enemy_ai(&mut self, dt: f32) {
        let player_pos = self.player_index.map(|i| self.side_a[i].position);
        let player_attacking = self.player_combat.active_attack_timer > 0.0;
        let player_attack_dir = self.player_combat.attack_direction;
        let player_hp_fraction = self
            .player_index
            .map(|i| self.side_a[i].stats.hp / self.side_a[i].stats.hp_max.max(1.0))
            .unwrap_or(1.0);

        let clump_count = player_pos
            .map(|p| self.side_b.iter().filter(|e| e.alive() && (e.position - p).length() <= CLUMP_RADIUS).count())
            .unwrap_or(0);
        let player_clumped = clump_count >= CLUMP_THRESHOLD;

        for i in 0..self.side_b.len() {
            if !self.side_b[i].alive() {
                continue;
            }
            let self_id = self.side_b[i].id;
            let self_pos = self.side_b[i].position;
            let self_radius = self.side_b[i].radius;
            let self_hp_fraction = self.side_b[i].stats.hp / self.side_b[i].stats.hp_max.max(1.0);
            let profile = Profile::for_subtype(self.side_b[i].subtype.as_deref());

            let mut candidates = Vec::new();
            if let Some(p) = player_pos {
                let nearby = self.side_b.iter().filter(|e| e.alive() && (e.position - p).length() <= 120.0).count() as u32;
                candidates.push(TargetCandidate {
                    id: self.side_a[self.player_index.unwrap()].id,
                    position: p,
                    radius: self.side_a[self.player_index.unwrap()].radius,
                    nearby_ally_count: nearby.saturating_sub(1),
                    is_invulnerable: self.side_a[self.player_index.unwrap()].is_invulnerable(),
                });
            }
            for troop in self.side_a.iter().skip(1).filter(|t| t.alive()) {
                let nearby = self.side_b.iter().filter(|e| e.alive() && (e.position - troop.position).length() <= 120.0).count() as u32;
                candidates.push(TargetCandidate {
                    id: troop.id,
                    position: troop.position,
                    radius: troop.radius,
                    nearby_ally_count: nearby,
                    is_invulnerable: troop.is_invulnerable(),
                });
            }

            let distance_to_player = player_pos.map(|p| (p - self_pos).length()).unwrap_or(0.0);
            let skip_for_lod = distance_to_player > LOD_DISTANCE;

            let input = EnemyAiInput {
                dt,
                self_position: self_pos,
                self_radius,
                self_hp_fraction,
                profile,
                candidates: &candidates,
                player_is_attacking: player_attacking,
                player_attack_direction: player_attack_dir,
                player_position: player_pos.unwrap_or(self_pos),
                player_clumped,
                skip_for_lod,
            };

            let state = self.enemy_ai.entry(self_id).or_insert_with(EnemyAiState::new);
            let decision = tick_enemy(state, &input, &mut self.rng);

            let speed = self.side_b[i].stats.spd;
            self.side_b[i].position = self.side_b[i].position + decision.move_vector * speed * dt;
            self.side_b[i].clamp_into_bounds(self.config.width, self.config.height, self.config.border);

            if decision.wants_attack {
                if decision.wants_projectile {
                    self.spawn_enemy_projectile(i, decision.target);
                }
            }
        }
    }

    fn spawn_enemy_projectile(&mut self, shooter_idx: usize, target: Option<EntityId>) {
        let Some(target_id) = target else { return };
        let shooter = &self.side_b[shooter_idx];
        let shooter_pos = shooter.position;
        let shooter_team = shooter.team;
        let atk = shooter.stats.atk;

        let target_entity = self.side_a.iter().find(|e| e.id == target_id);
        let Some(target_entity) = target_entity else { return };
        let target_velocity = target_entity.estimated_velocity(1.0 / 60.0);
        let target_pos = target_entity.position;

        let allies_positions: Vec<Vec2> = self.side_b.iter().filter(|e| e.alive() && e.id != shooter.id).map(|e| e.position).collect();
        let allies_radii: Vec<f32> = self.side_b.iter().filter(|e| e.alive() && e.id != shooter.id).map(|e| e.radius).collect();
        if is_occluded_by_ally(shooter_pos, target_pos, allies_positions.iter().copied(), allies_radii.iter().copied()) {
            return;
        }

        let direction = predictive_aim_direction(shooter_pos, target_pos, target_velocity, PROJECTILE_SPEED);
        self.projectiles.spawn(Projectile {
            id: Uuid::new_v4(),
            owner: shooter.id,
            owner_team: shooter_team,
            position: shooter_pos,
            velocity: direction * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            damage: atk,
            damage_type: DamageType::Piercing,
            lifetime: 2.0,
        });
    }

    fn run_troop_ai(&mut self, dt: f32) {
        let Some(player_idx) = self.player_index else { return };
        let player_pos = self.side_a[player_idx].position;
        let player_hp_fraction = self.side_a[player_idx].stats.hp / self.side_a[player_idx].stats.hp_max.max(1.0);
        let player_facing = self.player_combat.attack_direction.normalized_or(Vec2::new(1.0, 0.0));

        let enemy_refs: Vec<EnemyRef> = self.side_b.iter().map(|e| EnemyRef { id: e.id, position: e.position, radius: e.radius, alive: e.alive() }).collect();
        let nearest_enemy_to_player = self
            .side_b
            .iter()
            .filter(|e| e.alive())
            .min_by(|a, b| (a.position - player_pos).length().partial_cmp(&(b.position - player_pos).length()).unwrap())
            .map(|e| e.id);

        let roster_size = self.side_a.len() - 1;
        for i in 1..self.side_a.len() {
            if !self.side_a[i].alive() {
                continue;
            }
            let id = self.side_a[i].id;
            let role = self.side_a[i].role.unwrap_or(Role::Infantry);
            let input = TroopAiInput {
                dt,
                self_position: self.side_a[i].position,
                self_radius: self.side_a[i].radius,
                role,
                index_in_roster: i - 1,
                roster_size,
                order: self.troop_order,
                focus_target: self.focus_target,
                player_position: player_pos,
                player_hp_fraction,
                player_facing,
                enemies: &enemy_refs,
                nearest_enemy_to_player,
            };
            let state = self.troop_ai.entry(id).or_insert_with(TroopAiState::new);
            let decision = tick_troop(state, &input);

            let speed = self.side_a[i].stats.spd * decision.speed_mult;
            if let Some(target_pos) = decision.move_target {
                let dir = (target_pos - self.side_a[i].position).normalized_or(Vec2::zero());
                self.side_a[i].position = self.side_a[i].position + dir * speed * dt;
                self.side_a[i].clamp_into_bounds(self.config.width, self.config.height, self.config.border);
            }

            if decision.wants_projectile {
                self.spawn_troop_projectile(i, decision.target);
            }
        }
    }

    fn spawn_troop_projectile(&mut self, shooter_idx: usize, target: Option<EntityId>) {
        let Some(target_id) = target else { return };
        let shooter = &self.side_a[shooter_idx];
        let shooter_pos = shooter.position;
        let shooter_team = shooter.team;
        let atk = shooter.stats.atk;

        let Some(target_entity) = self.side_b.iter().find(|e| e.id == target_id) else { return };
        let target_pos = target_entity.position;
        let target_velocity = target_entity.estimated_velocity(1.0 / 60.0);

        let direction = predictive_aim_direction(shooter_pos, target_pos, target_velocity, PROJECTILE_SPEED);
        self.projectiles.spawn(Projectile {
            id: Uuid::new_v4(),
            owner: shooter.id,
            owner_team: shooter_team,
            position: shooter_pos,
            velocity: direction * PROJECTILE_SPEED,
            radius: PROJECTILE_RADIUS,
            damage: atk,
            damage_type: DamageType::Piercing,
            lifetime: 2.0,
        });
    }

    fn update_projectiles(&mut self, dt: f32) {
        let all_targets: Vec<Entity> = self.side_a.iter().cloned().chain(self.side_b.iter().cloned()).collect();
        let hits = self.projectiles.update(dt, self.config.width, self.config.height, &all_targets);
        let mut died = Vec::new();
        for (projectile, idx) in hits {
            let is_side_a = idx < self.side_a.len();
            let target = if is_side_a { &mut self.side_a[idx] } else { &mut self.side_b[idx - self.side_a.len()] };

            let roll = AttackRoll {
                attacker_id: projectile.owner,
                attacker_atk: projectile.damage,
                weapon_damage_mult: 1.0,
                damage_type: projectile.damage_type,
                combo_count: 1,
                weight: AttackWeight::Light,
                attacker_high_ground: false,
                defender_high_ground: false,
                attacker_crit_chance: 0.0,
                attacker_crit_damage: 0.0,
            };
            let outcome = resolve_attack(&roll, &BlockState::none(), target, &mut self.rng, &mut self.bus);
            if outcome.target_died {
                died.push((target.id, projectile.owner));
            }
        }
        for (dead_id, killer_id) in died {
            self.on_entity_died(dead_id, killer_id);
        }
    }

    fn resolve_active_attacks(&mut self, _dt: f32) {
        self.resolve_player_attack();
        self.resolve_enemy_attacks();
        self.resolve_troop_attacks();
    }

    fn resolve_player_attack(&mut self) {
        let Some(player_idx) = self.player_index else { return };
        if self.player_combat.active_attack_timer <= 0.0 {
            return;
        }
        let player = &self.side_a[player_idx];
        let weapon = player.equipment.weapon_descriptor();
        let Some(weapon) = weapon else { return };
        let weapon_mult = effective_weapon_mult(weapon, player.stats.strength, player.stats.agility);
        let range_mult = match self.player_combat.attack_weight {
            PlayerAttackWeight::Heavy => 1.3,
            PlayerAttackWeight::Light => 1.1,
        };
        let effective_range = player.radius + (weapon.range * range_mult).clamp(50.0, 170.0);
        let attacker_atk = player.stats.atk;
        let attacker_high_ground = self.config.is_high_ground(player.position);
        let attacker_id = player.id;
        let player_pos = player.position;
        let combo_count = self.combo.count.max(1);
        let crit_chance = player.stats.crit_chance;
        let crit_damage = player.stats.crit_damage;
        let weight = match self.player_combat.attack_weight {
            PlayerAttackWeight::Light => AttackWeight::Light,
            PlayerAttackWeight::Heavy => AttackWeight::Heavy,
        };
        let damage_type = weapon.damage_type;

        let already_hit = self.player_combat.hit_set.clone();
        let mut newly_hit = Vec::new();
        let mut died = Vec::new();

        for enemy in self.side_b.iter_mut() {
            if !enemy.alive() || already_hit.contains(&enemy.id) {
                continue;
            }
            if (enemy.position - player_pos).length() > effective_range + enemy.radius {
                continue;
            }
            let defender_high_ground = self.config.is_high_ground(enemy.position);
            let enemy_blocking = self.enemy_ai.get(&enemy.id).map(|s| s.blocking).unwrap_or(false);
            let roll = AttackRoll {
                attacker_id,
                attacker_atk,
                weapon_damage_mult: weapon_mult,
                damage_type,
                combo_count,
                weight,
                attacker_high_ground,
                defender_high_ground,
                attacker_crit_chance: crit_chance,
                attacker_crit_damage: crit_damage,
            };
            let block = BlockState {
                blocking: enemy_blocking,
                defender_is_player: false,
                within_parry_window: false,
                block_power: 0.0,
            };
            let outcome = resolve_attack(&roll, &block, enemy, &mut self.rng, &mut self.bus);
            newly_hit.push(enemy.id);
            if outcome.damage_dealt > 0.0 {
                if self.combo.register_hit() {
                    self.bus.push(Event::ComboUp { new_count: self.combo.count, new_tier: self.combo.tier() });
                }
            }
            if outcome.target_died {
                died.push(enemy.id);
            }
        }

        for id in newly_hit {
            self.player_combat.hit_set.insert(id);
        }
        for id in died {
            self.on_entity_died(id, attacker_id);
        }
    }

    fn resolve_enemy_attacks(&mut self) {
        let Some(player_idx) = self.player_index else { return };
        let mut stuns = Vec::new();
        let mut player_died = false;

        for i in 0..self.side_b.len() {
            if !self.side_b[i].alive() {
                continue;
            }
            let active = self.enemy_ai.get(&self.side_b[i].id).map(|s| s.active_attack_timer > 0.0).unwrap_or(false);
            if !active {
                continue;
            }
            let attacker_pos = self.side_b[i].position;
            let attacker_atk = self.side_b[i].stats.atk;
            let attacker_id = self.side_b[i].id;
            let attacker_high_ground = self.config.is_high_ground(attacker_pos);
            let target_id = self.enemy_ai.get(&attacker_id).and_then(|s| s.target);
            if target_id != Some(self.side_a[player_idx].id) {
                continue;
            }
            let player = &self.side_a[player_idx];
            let attack_range = player.radius + self.side_b[i].radius + 15.0;
            if (player.position - attacker_pos).length() > attack_range {
                continue;
            }
            let defender_high_ground = self.config.is_high_ground(player.position);
            let within_parry_window = self.player_combat.blocking && self.player_combat.block_timer <= player.stats.parry_window;
            let roll = AttackRoll {
                attacker_id,
                attacker_atk,
                weapon_damage_mult: 1.0,
                damage_type: DamageType::Slashing,
                combo_count: 1,
                weight: AttackWeight::Light,
                attacker_high_ground,
                defender_high_ground,
                attacker_crit_chance: 0.0,
                attacker_crit_damage: 0.0,
            };
            let block = BlockState {
                blocking: self.player_combat.blocking,
                defender_is_player: true,
                within_parry_window,
                block_power: player.stats.block_power,
            };
            let outcome = resolve_attack(&roll, &block, &mut self.side_a[player_idx], &mut self.rng, &mut self.bus);
            if let Some(stun) = outcome.attacker_stun {
                stuns.push((attacker_id, stun));
            }
            if !self.side_a[player_idx].alive() {
                player_died = true;
            }
        }

        for (id, _stun) in stuns {
            if let Some(s) = self.enemy_ai.get_mut(&id) {
                s.blocking = false;
                s.block_decision_timer = 1.5;
            }
        }
        if player_died {
            self.bus.push(Event::Death { entity: self.side_a[player_idx].id, position: self.side_a[player_idx].position });
        }
    }

    fn resolve_troop_attacks(&mut self) {
        let mut died = Vec::new();
        for i in 1..self.side_a.len() {
            if !self.side_a[i].alive() {
                continue;
            }
            let active = self.troop_ai.get(&self.side_a[i].id).map(|s| s.active_attack_timer > 0.0).unwrap_or(false);
            if !active {
                continue;
            }
            let attacker_id = self.side_a[i].id;
            let attacker_pos = self.side_a[i].position;
            let attacker_atk = self.side_a[i].stats.atk;
            let target_id = self.troop_ai.get(&attacker_id).and_then(|s| s.assigned_target);
            let Some(target_id) = target_id else { continue };
            let Some(target) = self.side_b.iter_mut().find(|e| e.id == target_id) else { continue };
            if !target.alive() {
                continue;
            }
            let range = self.side_a[i].radius + target.radius + 20.0;
            if (target.position - attacker_pos).length() > range {
                continue;
            }
            let roll = AttackRoll {
                attacker_id,
                attacker_atk,
                weapon_damage_mult: 1.0,
                damage_type: DamageType::Slashing,
                combo_count: 1,
                weight: AttackWeight::Light,
                attacker_high_ground: false,
                defender_high_ground: false,
                attacker_crit_chance: 0.0,
                attacker_crit_damage: 0.0,
            };
            let outcome = resolve_attack(&roll, &BlockState::none(), target, &mut self.rng, &mut self.bus);
            if outcome.target_died {
                died.push((target.id, attacker_id));
            }
        }
        for (dead_id, killer_id) in died {
            self.on_entity_died(dead_id, killer_id);
        }
    }

    fn on_entity_died(&mut self, dead_id: EntityId, killer_id: EntityId) {
        if self.side_b.iter().any(|e| e.id == dead_id) {
            self.defeated_enemies.push(dead_id);
            *self.kills_by.entry(killer_id).or_insert(0) += 1;
            if let Some(killer) = self.side_a.iter_mut().find(|e| e.id == killer_id) {
                if let Some(level) = self.side_b.iter().find(|e| e.id == dead_id).map(|e| e.stats.level) {
                    killer.stats.grant_xp((level as i64) * 2);
                }
            }
        }
    }

    fn check_victory_defeat(&mut self) {
        if self.side_b.iter().all(|e| !e.alive()) {
            self.done = true;
            self.victory = true;
            self.gold_granted = self
                .defeated_enemies_levels()
                .iter()
                .map(|l| {
                    let lo = l * 5;
                    let hi = l * 15;
                    if hi > lo { self.rng.gen_range(lo..=hi) as i64 } else { lo as i64 }
                })
                .sum();
            for id in self.kills_by.iter().filter(|(_, &k)| k >= 3).map(|(id, _)| *id) {
                if let Some(troop) = self.side_a.iter().find(|e| e.id == id) {
                    self.bus.push(Event::Promotion { troop: id, new_level: troop.stats.level });
                }
            }
            return;
        }
        if let Some(idx) = self.player_index {
            if !self.side_a[idx].alive() {
                self.done = true;
                self.victory = false;
            }
        }
    }
}

fn grid_slot(anchor: Vec2, index: usize) -> Vec2 {
    let cols = 4usize;
    let row = (index / cols) as f32;
    let col = (index % cols) as f32;
    anchor + Vec2::new(col * GRID_SPACING_X - (cols as f32 - 1.0) * GRID_SPACING_X * 0.5, row * GRID_SPACING_Y)
}

#[cfg(test)]
mod tests {
    use super::*;
    use stats::{EntityKind, Stats, Team};

    fn make_unit(team: Team) -> Entity {
        Entity::new(EntityKind::Enemy, team, "bandits", Vec2::zero(), 12.0, Stats::new_level_one())
    }

    #[test]
    fn victory_is_detected_once_all_enemies_are_dead() {
        let player = make_unit(Team::A);
        let mut enemy = make_unit(Team::B);
        enemy.stats.hp = 0.0;
        let mut controller = ArenaController::start_battle(ArenaConfig::default(), 1, player, vec![], vec![enemy]);
        controller.tick(1.0 / 60.0, PlayerIntent::default());
        assert!(controller.is_done());
        assert!(controller.outcome().unwrap().victory);
    }

    #[test]
    fn grid_slot_zero_sits_at_anchor_row() {
        let slot = grid_slot(Vec2::new(100.0, 100.0), 0);
        assert!((slot.y - 100.0).abs() < 1e-4);
    }
}
