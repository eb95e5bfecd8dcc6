//! Core domain: frame-wide resources.

use bevy::prelude::*;
use serde::Deserialize;

/// Global hit-freeze. While active the gameplay tick is skipped entirely;
/// only this timer and the effects layer keep advancing.
#[derive(Resource, Debug, Default)]
pub struct HitFreeze {
    pub remaining: f32,
}

impl HitFreeze {
    pub fn is_active(&self) -> bool {
        self.remaining > 0.0
    }

    /// Start a freeze. An already running, longer freeze is kept.
    pub fn trigger(&mut self, duration: f32) {
        self.remaining = self.remaining.max(duration);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining = (self.remaining - dt).max(0.0);
        }
    }
}

/// Run condition: returns true only when gameplay is not frozen
pub fn gameplay_active(freeze: Res<HitFreeze>) -> bool {
    !freeze.is_active()
}

/// Horizontal and vertical extent of the playable level, in simulation space.
#[derive(Resource, Debug, Clone, Copy, Deserialize)]
#[serde(default)]
pub struct LevelBounds {
    pub min_x: f32,
    pub max_x: f32,
    pub min_y: f32,
    pub max_y: f32,
}

impl Default for LevelBounds {
    fn default() -> Self {
        Self {
            min_x: 0.0,
            max_x: 2560.0,
            min_y: 0.0,
            max_y: 720.0,
        }
    }
}

impl LevelBounds {
    /// Clamp a body's left edge so it stays within the horizontal extent.
    pub fn clamp_x(&self, x: f32, width: f32) -> f32 {
        x.clamp(self.min_x, (self.max_x - width).max(self.min_x))
    }

    pub fn contains(&self, point: Vec2) -> bool {
        point.x >= self.min_x && point.x <= self.max_x && point.y >= self.min_y && point.y <= self.max_y
    }
}
