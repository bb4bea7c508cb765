/// Behaviour profile an enemy is assigned from its troop/enemy type.
/// Drives kite band and movement speed multiplier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Profile {
    Kite,
    Spear,
    Press,
}

impl Profile {
    /// Profile for a given faction subtype, defaulting to `Press` for
    /// anything unrecognized.
    pub fn for_subtype(subtype: Option<&str>) -> Profile {
        match subtype {
            Some("archer") | Some("bowman") => Profile::Kite,
            Some("phalangite") | Some("hoplite") => Profile::Spear,
            Some("cataphract") => Profile::Press,
            _ => Profile::Press,
        }
    }

    /// Radial kite band `[min, max]`; `None` for profiles that close to
    /// melee range instead of holding distance.
    pub fn kite_band(self) -> Option<(f32, f32)> {
        match self {
            Profile::Kite => Some((100.0, 140.0)),
            Profile::Spear => Some((80.0, 110.0)),
            Profile::Press => Some((30.0, 60.0)),
        }
    }

    pub fn speed_mult(self) -> f32 {
        match self {
            Profile::Kite => 0.95,
            Profile::Spear => 1.0,
            Profile::Press => 1.1,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archer_subtype_resolves_to_kite() {
        assert_eq!(Profile::for_subtype(Some("archer")), Profile::Kite);
    }

    #[test]
    fn unknown_subtype_defaults_to_press() {
        assert_eq!(Profile::for_subtype(Some("bandit")), Profile::Press);
        assert_eq!(Profile::for_subtype(None), Profile::Press);
    }
}
