use geo::Vec2;
use stats::Role;

/// Formation shape the troop AI arranges idle troops into around the
/// player.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormationMode {
    Circle,
    Line,
    Wedge,
}

/// Slot position for the `index`-th of `total` troops with role `role`,
/// relative to `anchor` facing `facing` (unit vector). Archers sit behind
/// the anchor, infantry in front, cavalry on the flanks/point — a
/// role-aware placement layered on top of the raw shape.
pub fn formation_slot(mode: FormationMode, anchor: Vec2, facing: Vec2, radius: f32, role: Role, index: usize, total: usize) -> Vec2 {
    let facing = facing.normalized_or(Vec2::new(1.0, 0.0));
    let right = facing.perpendicular();
    let behind = facing * -1.0;

    match mode {
        FormationMode::Circle => {
            let count = total.max(1) as f32;
            let angle = (index as f32 / count) * std::f32::consts::TAU;
            anchor + Vec2::new(angle.cos(), angle.sin()) * radius
        }
        FormationMode::Line => {
            let spacing = radius * 2.0 / total.max(1) as f32;
            let offset = (index as f32 - (total.saturating_sub(1)) as f32 / 2.0) * spacing;
            anchor + right * offset
        }
        FormationMode::Wedge => match role {
            Role::Archer => anchor + behind * radius,
            Role::Cavalry => {
                let side = if index % 2 == 0 { 1.0 } else { -1.0 };
                anchor + right * (side * radius) + facing * (radius * 0.5)
            }
            _ => anchor + facing * radius,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn archers_sit_behind_anchor_in_wedge() {
        let slot = formation_slot(FormationMode::Wedge, Vec2::zero(), Vec2::new(1.0, 0.0), 40.0, Role::Archer, 0, 3);
        assert!(slot.x < 0.0);
    }

    #[test]
    fn infantry_sits_in_front_in_wedge() {
        let slot = formation_slot(FormationMode::Wedge, Vec2::zero(), Vec2::new(1.0, 0.0), 40.0, Role::Infantry, 0, 3);
        assert!(slot.x > 0.0);
    }
}
