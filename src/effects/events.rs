//! Effects domain: fire-and-forget requests from gameplay to the
//! presentation layer. Nothing here is ever read back by gameplay.

use bevy::ecs::message::Message;
use bevy::prelude::*;

/// Emission pattern of a particle request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ParticleShape {
    /// Random directions, random speed.
    Burst,
    /// Fast, small, short-lived.
    Sparks,
    /// Slow, large, soft drift.
    Glow,
    /// Evenly spaced directions at a fixed speed.
    Ring,
    /// Cone around `direction`, `spread` in degrees either side.
    Directional { direction: Vec2, spread: f32 },
    /// Stationary afterimages.
    Trail,
}

/// Particle emission request. Positions are in simulation space.
#[derive(Debug, Clone)]
pub struct ParticleRequest {
    pub shape: ParticleShape,
    pub position: Vec2,
    pub color: Color,
    pub count: u32,
    pub speed_min: f32,
    pub speed_max: f32,
    pub lifetime: f32,
    pub size: f32,
}

impl Message for ParticleRequest {}

impl ParticleRequest {
    pub fn new(shape: ParticleShape, position: Vec2, color: Color) -> Self {
        Self {
            shape,
            position,
            color,
            count: 8,
            speed_min: 50.0,
            speed_max: 120.0,
            lifetime: 0.5,
            size: 2.0,
        }
    }

    pub fn with_count(mut self, count: u32) -> Self {
        self.count = count;
        self
    }

    pub fn with_speed(mut self, min: f32, max: f32) -> Self {
        self.speed_min = min.min(max);
        self.speed_max = max.max(min);
        self
    }

    pub fn with_lifetime(mut self, lifetime: f32) -> Self {
        self.lifetime = lifetime;
        self
    }

    pub fn with_size(mut self, size: f32) -> Self {
        self.size = size;
        self
    }
}

#[derive(Debug, Clone)]
pub struct CameraShake {
    pub intensity: f32,
    pub duration: f32,
}

impl Message for CameraShake {}

/// Expanding, fading circle of light.
#[derive(Debug, Clone)]
pub struct FlashRequest {
    pub position: Vec2,
    pub color: Color,
    pub radius: f32,
    pub duration: f32,
}

impl Message for FlashRequest {}

impl FlashRequest {
    pub fn new(position: Vec2, color: Color, radius: f32, duration: f32) -> Self {
        Self {
            position,
            color,
            radius,
            duration,
        }
    }
}

#[derive(Debug, Clone)]
pub struct HitFreezeRequest {
    pub duration: f32,
}

impl Message for HitFreezeRequest {}
