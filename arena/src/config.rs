use geo::Rect;

/// Arena dimensions and static terrain. Chosen as a controller field
/// initialized from config rather than a global constant, so a future
/// difficulty mode or test fixture can override it without touching
/// simulation code — see DESIGN.md for the chosen default dimensions.
#[derive(Debug, Clone)]
pub struct ArenaConfig {
    pub width: f32,
    pub height: f32,
    pub border: f32,
    pub high_ground_rects: Vec<Rect>,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            width: 1280.0,
            height: 720.0,
            border: 20.0,
            high_ground_rects: Vec::new(),
        }
    }
}

impl ArenaConfig {
    pub fn is_high_ground(&self, point: geo::Vec2) -> bool {
        self.high_ground_rects.iter().any(|r| r.contains(point))
    }
}
