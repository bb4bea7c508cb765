use crate::backup::create_backup;
use crate::error::{LoadError, SaveError};
use crate::migration::{apply_migrations, validate_save_data};
use crate::schema::{EquipmentSave, PlayerSave, PlayerStatsSave, SaveFile, TroopSave, TroopStatsSave, WorldSave, CURRENT_SAVE_VERSION};
use crate::timestamp::now_iso8601;
use items::Equipment;
use overworld::{FactionRelations, World};
use stats::{Entity, Stats};
use std::fs;
use std::path::Path;

/// Assemble the in-memory game state into a [`SaveFile`] ready to be
/// written.
pub fn build_save_file(
    player: &Entity,
    troops: &[Entity],
    relations: &FactionRelations,
    world: &World,
    current_location: Option<&str>,
    game_time: f64,
) -> SaveFile {
    SaveFile {
        version: CURRENT_SAVE_VERSION.to_string(),
        save_timestamp: now_iso8601(),
        game_time,
        player: PlayerSave {
            position: player.position,
            stats: stats_to_save(&player.stats),
            equipment: equipment_to_save(&player.equipment),
            inventory: Vec::new(),
        },
        troops: troops.iter().map(troop_to_save).collect(),
        world: WorldSave {
            seed: world.seed,
            defeated_enemies: world.defeated_enemies,
        },
        relations: relations.relations.clone(),
        current_location: current_location.map(str::to_string),
    }
}

fn stats_to_save(stats: &Stats) -> PlayerStatsSave {
    PlayerStatsSave {
        hp: stats.hp,
        hp_max: stats.hp_max,
        atk: stats.atk,
        spd: stats.spd,
        level: stats.level,
        xp: stats.xp,
        xp_to_next_level: stats.xp_to_next_level,
        food: stats.food,
        gold: stats.gold,
        strength: stats.strength,
        agility: stats.agility,
        vitality: stats.vitality,
        charisma: stats.charisma,
        skill: stats.skill,
        attribute_points: stats.attribute_points,
        stamina_max: stats.stamina_max,
        crit_chance: stats.crit_chance,
        crit_damage: stats.crit_damage,
        block_power: stats.block_power,
        gold_bonus: stats.gold_bonus,
        troop_bonus: stats.troop_bonus,
        defense: stats.defense,
        parry_window: stats.parry_window,
        attack_speed_bonus: stats.attack_speed_bonus,
        stamina_regen_bonus: stats.stamina_regen_bonus,
        shop_discount: stats.shop_discount,
    }
}

fn equipment_to_save(equipment: &Equipment) -> EquipmentSave {
    use items::ArmorSlot;
    EquipmentSave {
        weapon: equipment.weapon.clone(),
        helmet: equipment.armor.get(&ArmorSlot::Helmet).cloned(),
        chest: equipment.armor.get(&ArmorSlot::Chest).cloned(),
        legs: equipment.armor.get(&ArmorSlot::Legs).cloned(),
        boots: equipment.armor.get(&ArmorSlot::Boots).cloned(),
    }
}

fn troop_to_save(troop: &Entity) -> TroopSave {
    TroopSave {
        id: troop.id.to_string(),
        troop_type: troop.subtype.clone().unwrap_or_else(|| "warrior".to_string()),
        position: troop.position,
        stats: TroopStatsSave {
            hp_max: troop.stats.hp_max,
            hp: troop.stats.hp,
            atk: troop.stats.atk,
            spd: troop.stats.spd,
            level: troop.stats.level,
            xp: troop.stats.xp,
            xp_to_next_level: troop.stats.xp_to_next_level,
        },
    }
}

/// Apply a loaded stats snapshot onto a live player `Stats`, then re-derive
/// so combat-facing fields stay consistent with the restored attributes.
pub fn restore_player_stats(save: &PlayerStatsSave, stats: &mut Stats) {
    stats.strength = save.strength;
    stats.agility = save.agility;
    stats.vitality = save.vitality;
    stats.charisma = save.charisma;
    stats.skill = save.skill;
    stats.attribute_points = save.attribute_points;
    stats.level = save.level;
    stats.xp = save.xp;
    stats.xp_to_next_level = save.xp_to_next_level;
    stats.food = save.food;
    stats.gold = save.gold;

    stats::derive(stats);

    stats.hp = save.hp.min(stats.hp_max);
    stats.hp_max = save.hp_max.max(stats.hp_max);
}

pub fn restore_equipment(save: &EquipmentSave) -> Equipment {
    let mut equipment = Equipment::new();
    if let Some(id) = &save.weapon {
        let _ = equipment.equip_weapon(id);
    }
    for id in [&save.helmet, &save.chest, &save.legs, &save.boots].into_iter().flatten() {
        let _ = equipment.equip_armor(id);
    }
    equipment
}

/// Write `save_file` to `save_path`, first backing up any existing file
/// under `backup_dir`. Directories are created as needed.
pub fn save_game(save_file: &SaveFile, save_path: &Path, backup_dir: &Path) -> Result<(), SaveError> {
    log::info!("saving game to {}", save_path.display());

    if let Err(e) = create_backup(save_path, backup_dir) {
        log::warn!("continuing save despite backup failure: {e}");
    }

    if let Some(parent) = save_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let json = serde_json::to_string_pretty(save_file)?;
    fs::write(save_path, json)?;
    log::info!("game saved successfully to {}", save_path.display());
    Ok(())
}

/// Read, migrate, validate, and parse a save file. No
/// partial state is ever applied: any failure returns before the caller's
/// game state is touched.
pub fn load_game(save_path: &Path) -> Result<SaveFile, LoadError> {
    log::info!("loading game from {}", save_path.display());

    let contents = fs::read_to_string(save_path).map_err(|e| LoadError::InvalidJson(e.to_string()))?;
    let raw: serde_json::Value = serde_json::from_str(&contents).map_err(|e| LoadError::InvalidJson(e.to_string()))?;

    let migrated = apply_migrations(raw)?;
    validate_save_data(&migrated)?;

    let save_file: SaveFile = serde_json::from_value(migrated).map_err(|e| LoadError::SchemaValidation(e.to_string()))?;
    log::info!("game loaded successfully (schema {})", save_file.version);
    Ok(save_file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Vec2;
    use overworld::WorldConfig;
    use stats::{EntityKind, Team};

    #[test]
    fn build_then_round_trip_through_json_preserves_player_level() {
        let mut player = Entity::new(EntityKind::Player, Team::A, "rome", Vec2::new(10.0, 20.0), 14.0, Stats::new_level_one());
        player.stats.grant_xp(500);
        let relations = FactionRelations::new();
        let world = World::generate(42, WorldConfig::default());

        let save_file = build_save_file(&player, &[], &relations, &world, Some("Rome Keep"), 120.5);
        let json = serde_json::to_value(&save_file).unwrap();
        let parsed: SaveFile = serde_json::from_value(json).unwrap();

        assert_eq!(parsed.player.stats.level, player.stats.level);
        assert_eq!(parsed.world.seed, 42);
        assert_eq!(parsed.current_location.as_deref(), Some("Rome Keep"));
    }

    #[test]
    fn restore_player_stats_re_derives_combat_fields() {
        let mut stats = Stats::new_level_one();
        let save = PlayerStatsSave {
            hp: 50.0,
            hp_max: 50.0,
            atk: 0.0,
            spd: 0.0,
            level: 5,
            xp: 0,
            xp_to_next_level: 0,
            food: 80.0,
            gold: 30,
            strength: 30,
            agility: 10,
            vitality: 10,
            charisma: 10,
            skill: 10,
            attribute_points: 0,
            stamina_max: 0.0,
            crit_chance: 0.0,
            crit_damage: 0.0,
            block_power: 0.0,
            gold_bonus: 0.0,
            troop_bonus: 0.0,
            defense: 0.0,
            parry_window: 0.0,
            attack_speed_bonus: 0.0,
            stamina_regen_bonus: 0.0,
            shop_discount: 0.0,
        };
        restore_player_stats(&save, &mut stats);
        assert_eq!(stats.strength, 30);
        assert!(stats.atk > 0.0);
    }
}
