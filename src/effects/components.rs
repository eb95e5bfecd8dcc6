//! Effects domain: short-lived visual entities and the camera rig.

use bevy::prelude::*;

#[derive(Component, Debug, Clone)]
pub struct Particle {
    /// Simulation-space velocity (y-down).
    pub velocity: Vec2,
    pub age: f32,
    pub lifetime: f32,
}

impl Particle {
    pub fn new(velocity: Vec2, lifetime: f32) -> Self {
        Self {
            velocity,
            age: 0.0,
            lifetime: lifetime.max(f32::EPSILON),
        }
    }

    /// Remaining opacity, 1 at birth fading linearly to 0.
    pub fn alpha(&self) -> f32 {
        (1.0 - self.age / self.lifetime).clamp(0.0, 1.0)
    }

    pub fn is_expired(&self) -> bool {
        self.age >= self.lifetime
    }
}

#[derive(Component, Debug, Clone)]
pub struct Flash {
    pub radius: f32,
    pub age: f32,
    pub duration: f32,
}

impl Flash {
    /// Radius grows from half to full while the flash fades out.
    pub fn progress(&self) -> f32 {
        (self.age / self.duration.max(f32::EPSILON)).clamp(0.0, 1.0)
    }
}

/// Smoothed follow camera with screen shake.
#[derive(Component, Debug, Default, Clone)]
pub struct CameraRig {
    /// Smoothed focus point in simulation space.
    pub focus: Vec2,
    pub shake_intensity: f32,
    pub shake_remaining: f32,
}

impl CameraRig {
    /// Start a shake; a stronger running shake is not weakened.
    pub fn shake(&mut self, intensity: f32, duration: f32) {
        self.shake_intensity = self.shake_intensity.max(intensity);
        self.shake_remaining = self.shake_remaining.max(duration);
    }

    pub fn is_shaking(&self) -> bool {
        self.shake_remaining > 0.0
    }

    pub fn tick(&mut self, dt: f32) {
        if self.shake_remaining > 0.0 {
            self.shake_remaining -= dt;
            if self.shake_remaining <= 0.0 {
                self.shake_intensity = 0.0;
            }
        }
    }
}
