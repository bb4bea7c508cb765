use geo::Rect;
use serde::{Deserialize, Serialize};

/// Terrain kinds that slow or block movement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum TerrainKind {
    Mountain,
    Forest,
    Desert,
    Swamp,
    River,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Terrain {
    pub kind: TerrainKind,
    pub rect: Rect,
}

impl Terrain {
    pub fn new(kind: TerrainKind, rect: Rect) -> Self {
        Self { kind, rect }
    }
}

/// Forests slow movement (0.8x), mountains and rivers block it outright.
/// Desert and swamp carry no movement rule of their own beyond
/// visual/spawn biasing.
pub fn speed_multiplier(terrains: &[Terrain], point: geo::Vec2) -> f32 {
    if terrains.iter().any(|t| t.kind == TerrainKind::Forest && t.rect.contains(point)) {
        0.8
    } else {
        1.0
    }
}

pub fn blocks_movement(terrains: &[Terrain], point: geo::Vec2) -> bool {
    terrains
        .iter()
        .any(|t| matches!(t.kind, TerrainKind::Mountain | TerrainKind::River) && t.rect.contains(point))
}

#[cfg(test)]
mod tests {
    use super::*;
    use geo::Vec2;

    #[test]
    fn forest_slows_but_does_not_block() {
        let terrains = vec![Terrain::new(TerrainKind::Forest, Rect::new(0.0, 0.0, 100.0, 100.0))];
        assert_eq!(speed_multiplier(&terrains, Vec2::new(50.0, 50.0)), 0.8);
        assert!(!blocks_movement(&terrains, Vec2::new(50.0, 50.0)));
    }

    #[test]
    fn river_blocks_movement() {
        let terrains = vec![Terrain::new(TerrainKind::River, Rect::new(0.0, 0.0, 100.0, 100.0))];
        assert!(blocks_movement(&terrains, Vec2::new(50.0, 50.0)));
    }
}
