//! Core domain: axis-aligned rectangle helpers in simulation space.
//!
//! Simulation space is y-down: a rectangle's `min` corner is its top-left,
//! positive y velocity means falling.

use bevy::prelude::*;

/// Build a rectangle from a top-left position and a size.
pub fn rect_at(position: Vec2, size: Vec2) -> Rect {
    Rect {
        min: position,
        max: position + size,
    }
}

/// True when the rectangle has no area.
pub fn is_degenerate(rect: &Rect) -> bool {
    rect.width() <= 0.0 || rect.height() <= 0.0
}

/// Strict interior overlap. Touching edges do not count, and a degenerate
/// rectangle never overlaps anything.
pub fn overlaps(a: &Rect, b: &Rect) -> bool {
    if is_degenerate(a) || is_degenerate(b) {
        return false;
    }
    a.min.x < b.max.x && a.max.x > b.min.x && a.min.y < b.max.y && a.max.y > b.min.y
}
