//! World domain: platforms and their motion.

use bevy::prelude::*;

use crate::core::rect_at;

/// Ping-pong motion along `direction` between travel 0 and `range`.
#[derive(Debug, Clone, PartialEq)]
pub struct PlatformMotion {
    pub origin: Vec2,
    /// Unit direction of travel.
    pub direction: Vec2,
    pub range: f32,
    pub speed: f32,
    /// Distance currently travelled from `origin`.
    pub travelled: f32,
    pub forward: bool,
}

impl PlatformMotion {
    pub fn new(origin: Vec2, direction: Vec2, range: f32, speed: f32) -> Self {
        Self {
            origin,
            direction: direction.normalize_or_zero(),
            range: range.max(0.0),
            speed: speed.abs(),
            travelled: 0.0,
            forward: true,
        }
    }

    /// Advance by `dt` and return the new position.
    pub fn advance(&mut self, dt: f32) -> Vec2 {
        let step = self.speed * dt;
        if self.forward {
            self.travelled += step;
            if self.travelled >= self.range {
                self.travelled = self.range;
                self.forward = false;
            }
        } else {
            self.travelled -= step;
            if self.travelled <= 0.0 {
                self.travelled = 0.0;
                self.forward = true;
            }
        }
        self.position()
    }

    pub fn position(&self) -> Vec2 {
        self.origin + self.direction * self.travelled
    }
}

/// A static or kinematic solid rectangle.
#[derive(Debug, Clone, PartialEq)]
pub struct Platform {
    /// Top-left corner.
    pub position: Vec2,
    pub size: Vec2,
    /// Only blocks from above.
    pub one_way: bool,
    pub motion: Option<PlatformMotion>,
    /// Displacement per second over the last tick.
    pub velocity: Vec2,
}

impl Platform {
    pub fn solid(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            size,
            one_way: false,
            motion: None,
            velocity: Vec2::ZERO,
        }
    }

    pub fn one_way(position: Vec2, size: Vec2) -> Self {
        Self {
            one_way: true,
            ..Self::solid(position, size)
        }
    }

    pub fn moving(size: Vec2, motion: PlatformMotion) -> Self {
        Self {
            motion: Some(motion.clone()),
            ..Self::solid(motion.position(), size)
        }
    }

    pub fn bounds(&self) -> Rect {
        rect_at(self.position, self.size)
    }

    /// Advance kinematic motion. Static platforms report zero velocity.
    pub fn update(&mut self, dt: f32) {
        let Some(motion) = self.motion.as_mut() else {
            self.velocity = Vec2::ZERO;
            return;
        };
        let previous = self.position;
        self.position = motion.advance(dt);
        self.velocity = if dt > 0.0 {
            (self.position - previous) / dt
        } else {
            Vec2::ZERO
        };
    }
}

/// Render handle for the platform at this index of `LevelGeometry`.
#[derive(Component, Debug, Clone, Copy)]
pub struct PlatformSprite(pub usize);
