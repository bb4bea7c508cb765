//! Small 2D vector/geometry primitives shared across the simulation crates.
//!
//! Arena and overworld coordinates are plain continuous `(x, y)` positions
//! (no hex grid) — see [`Vec2`] and [`Rect`].

mod rect;
mod vec2;

pub use rect::Rect;
pub use vec2::Vec2;
