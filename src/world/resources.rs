//! World domain: the level's platform list.

use bevy::prelude::*;

use super::components::Platform;

/// Ordered platform list. Declaration order is the collision order.
#[derive(Resource, Debug, Default, Clone)]
pub struct LevelGeometry {
    pub platforms: Vec<Platform>,
}

impl LevelGeometry {
    pub fn new(platforms: Vec<Platform>) -> Self {
        Self { platforms }
    }

    pub fn update(&mut self, dt: f32) {
        for platform in &mut self.platforms {
            platform.update(dt);
        }
    }
}
