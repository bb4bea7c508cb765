/// Window after a landed hit before the combo resets (not specified
/// exactly by source material; 3.0s matches the pacing of the attack
/// cooldowns it chains — documented in DESIGN.md).
const COMBO_WINDOW: f32 = 3.0;
/// Hits per combo tier step (glossary: tier is an integer 0-4 driving the
/// FLOW/FURY/BRUTAL/BERSERK/ASCEND label).
const HITS_PER_TIER: u32 = 3;
const MAX_TIER: u8 = 4;

#[derive(Debug, Clone, Copy, Default)]
pub struct ComboState {
    pub count: u32,
    pub timer: f32,
}

impl ComboState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn tier(&self) -> u8 {
        ((self.count / HITS_PER_TIER) as u8).min(MAX_TIER)
    }

    /// Decrement the reset timer; drop the combo to zero once it expires.
    pub fn tick(&mut self, dt: f32) {
        if self.count == 0 {
            return;
        }
        self.timer -= dt;
        if self.timer <= 0.0 {
            self.count = 0;
            self.timer = 0.0;
        }
    }

    /// Register a landed player hit. Returns `true` if the tier changed
    /// (caller emits `ComboUp`).
    pub fn register_hit(&mut self) -> bool {
        let before = self.tier();
        self.count += 1;
        self.timer = COMBO_WINDOW;
        self.tier() != before
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn tier_advances_every_three_hits() {
        let mut combo = ComboState::new();
        assert_eq!(combo.tier(), 0);
        combo.register_hit();
        combo.register_hit();
        assert_eq!(combo.tier(), 0);
        combo.register_hit();
        assert_eq!(combo.tier(), 1);
    }

    #[test]
    fn expiring_timer_resets_count() {
        let mut combo = ComboState::new();
        combo.register_hit();
        combo.tick(COMBO_WINDOW + 0.1);
        assert_eq!(combo.count, 0);
    }
}
