//! World domain: level platforms, kinematic motion and collision resolution.

pub mod collision;
pub mod components;
pub mod resources;
mod systems;


use bevy::prelude::*;

use crate::core::{FrameSet, GameplaySet};

pub use collision::{ContactReport, WallSide, resolve_platform_collisions};
pub use components::{Platform, PlatformMotion};
pub use resources::LevelGeometry;

pub struct WorldPlugin;

impl Plugin for WorldPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelGeometry>()
            .add_systems(Startup, systems::spawn_platform_sprites)
            .add_systems(Update, systems::update_platforms.in_set(GameplaySet::World))
            .add_systems(Update, systems::sync_platform_sprites.in_set(FrameSet::Render));
    }
}
