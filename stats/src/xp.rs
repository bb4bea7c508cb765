/// Total xp threshold associated with reaching level `level`.
///
/// `xp_for_level(L) = floor(15 * L^1.5)`. Levels `<= 1` require no xp.
pub fn xp_for_level(level: i32) -> i64 {
    if level <= 1 {
        return 0;
    }
    (15.0 * (level as f64).powf(1.5)).floor() as i64
}

/// Difficulty scalar used to tune enemy stats/spawn rates as a run goes on.
///
/// `current_difficulty(minutes, level) = min(2.0, 1.0 + 0.05*minutes + 0.1*(level-1))`.
pub fn current_difficulty(minutes: f32, level: i32) -> f32 {
    (1.0 + 0.05 * minutes + 0.1 * (level - 1) as f32).min(2.0)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn thresholds_match_spec_scenario() {
        assert_eq!(xp_for_level(4), 120);
        assert_eq!(xp_for_level(5), 167);
        assert_eq!(xp_for_level(6), 220);
    }

    #[test]
    fn difficulty_caps_at_two() {
        assert_eq!(current_difficulty(1000.0, 99), 2.0);
    }

    #[test]
    fn difficulty_floor_at_level_one_no_time() {
        assert_eq!(current_difficulty(0.0, 1), 1.0);
    }
}
