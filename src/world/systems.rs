//! World domain: platform update and presentation systems.

use bevy::prelude::*;

use super::components::PlatformSprite;
use super::resources::LevelGeometry;
use crate::presentation::sim_to_world;

const PLATFORM_COLOR: Color = Color::srgb(0.39, 0.39, 0.39);
const ONE_WAY_COLOR: Color = Color::srgb(0.45, 0.40, 0.30);
const MOVING_COLOR: Color = Color::srgb(0.35, 0.45, 0.55);

pub(crate) fn update_platforms(time: Res<Time>, mut level: ResMut<LevelGeometry>) {
    level.update(time.delta_secs());
}

pub(crate) fn spawn_platform_sprites(mut commands: Commands, level: Res<LevelGeometry>) {
    for (index, platform) in level.platforms.iter().enumerate() {
        let color = if platform.motion.is_some() {
            MOVING_COLOR
        } else if platform.one_way {
            ONE_WAY_COLOR
        } else {
            PLATFORM_COLOR
        };
        let center = platform.position + platform.size / 2.0;
        commands.spawn((
            PlatformSprite(index),
            Sprite {
                color,
                custom_size: Some(platform.size),
                ..default()
            },
            Transform::from_translation(sim_to_world(center, 0.0)),
        ));
    }
    info!("Spawned {} platforms", level.platforms.len());
}

pub(crate) fn sync_platform_sprites(
    level: Res<LevelGeometry>,
    mut query: Query<(&PlatformSprite, &mut Transform)>,
) {
    for (sprite, mut transform) in &mut query {
        let Some(platform) = level.platforms.get(sprite.0) else {
            continue;
        };
        if platform.motion.is_none() {
            continue;
        }
        let center = platform.position + platform.size / 2.0;
        transform.translation = sim_to_world(center, transform.translation.z);
    }
}
