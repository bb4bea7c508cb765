use crate::stats::Stats;

/// Recompute every derived field from the five primary attributes and
/// `level`. Pure and total: it never reads a prior derived value, only
/// primary attributes plus `level`, so `derive(derive(s)) == derive(s)` for
/// any `s`. Ported from the reference
/// model's `calculate_derived_stats`, generalized from its flat per-point
/// bonuses into the capped curves below.
pub fn derive(stats: &mut Stats) {
    let str_ = stats.strength as f32;
    let agi = stats.agility as f32;
    let vit = stats.vitality as f32;
    let cha = stats.charisma as f32;
    let skl = stats.skill as f32;
    let lvl = stats.level as f32;

    let new_hp_max = 80.0 + vit * 12.0 + lvl * 5.0;
    let new_stamina_max = 50.0 + agi * 6.0 + lvl * 3.0;
    let new_poise_max = 100.0 + vit * 4.0;

    stats.hp = stats.hp.min(new_hp_max);
    stats.stamina = stats.stamina.min(new_stamina_max);
    stats.poise = stats.poise.min(new_poise_max);
    stats.hp_max = new_hp_max;
    stats.stamina_max = new_stamina_max;
    stats.poise_max = new_poise_max;

    stats.atk = 8.0 + str_ * 2.2 + lvl * 1.5;
    stats.spd = 140.0 + agi * 3.0;

    stats.crit_chance = (0.02 + skl * 0.01 + agi * 0.002).min(0.45);
    stats.crit_damage = (1.5 + skl * 0.03).min(3.0);
    stats.block_power = (0.05 + str_ * 0.01 + vit * 0.005).min(0.70);
    stats.parry_window = (0.15 + skl * 0.004).min(0.5);
    stats.defense = (vit * 0.006).min(0.30);
    stats.attack_speed_bonus = (agi * 0.004 - 0.02).max(-0.20);
    stats.stamina_regen_bonus = agi * 0.01;
    stats.gold_bonus = (1.0 + cha * 0.02).min(1.60);
    stats.troop_bonus = (cha * 0.015).min(0.40);
    stats.shop_discount = (cha * 0.01).min(0.20);
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stats::Stats;

    #[test]
    fn derive_is_idempotent() {
        let mut s = Stats::new_level_one();
        s.strength = 40;
        s.agility = 35;
        s.vitality = 50;
        s.charisma = 30;
        s.skill = 45;
        s.level = 12;
        derive(&mut s);
        let once = s.clone();
        derive(&mut s);
        assert_eq!(once, s);
    }

    #[test]
    fn caps_are_enforced_at_extreme_attributes() {
        let mut s = Stats::new_level_one();
        s.strength = 999;
        s.agility = 999;
        s.vitality = 999;
        s.charisma = 999;
        s.skill = 999;
        derive(&mut s);
        assert!(s.crit_chance <= 0.45);
        assert!(s.crit_damage <= 3.0);
        assert!(s.block_power <= 0.70);
        assert!(s.parry_window <= 0.5);
        assert!(s.defense <= 0.30);
        assert!(s.attack_speed_bonus >= -0.20);
        assert!(s.gold_bonus <= 1.60);
        assert!(s.troop_bonus <= 0.40);
        assert!(s.shop_discount <= 0.20);
    }

    #[test]
    fn current_pools_never_exceed_new_max_after_a_shrink() {
        let mut s = Stats::new_level_one();
        s.vitality = 50;
        derive(&mut s);
        s.hp = s.hp_max;
        s.vitality = 1;
        derive(&mut s);
        assert!(s.hp <= s.hp_max);
    }
}
