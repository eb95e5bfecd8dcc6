//! Effects domain: particles, flashes, hit-freeze requests and the camera.

use std::f32::consts::TAU;

use bevy::ecs::message::MessageReader;
use bevy::prelude::*;
use rand::Rng;

use super::components::{CameraRig, Flash, Particle};
use super::events::{CameraShake, FlashRequest, HitFreezeRequest, ParticleRequest, ParticleShape};
use super::resources::EffectsRng;
use crate::content::LevelDef;
use crate::core::{Body, HitFreeze, LevelBounds};
use crate::movement::Player;
use crate::presentation::sim_to_world;

/// Visible area, matching the window resolution.
pub const VIEW_SIZE: Vec2 = Vec2::new(1280.0, 720.0);
/// Exponential follow rate of the camera, per second.
pub const CAMERA_FOLLOW_RATE: f32 = 5.0;

const PARTICLE_Z: f32 = 20.0;
const FLASH_Z: f32 = 15.0;

/// Fraction of the remaining distance the camera closes this frame.
pub fn camera_follow_factor(dt: f32) -> f32 {
    1.0 - (-CAMERA_FOLLOW_RATE * dt).exp()
}

/// Keep the view inside the level. A level smaller than the view is centred.
pub fn clamp_focus(focus: Vec2, half_view: Vec2, bounds: &LevelBounds) -> Vec2 {
    let clamp_axis = |value: f32, min: f32, max: f32, half: f32| {
        if max - min <= half * 2.0 {
            (min + max) / 2.0
        } else {
            value.clamp(min + half, max - half)
        }
    };
    Vec2::new(
        clamp_axis(focus.x, bounds.min_x, bounds.max_x, half_view.x),
        clamp_axis(focus.y, bounds.min_y, bounds.max_y, half_view.y),
    )
}

/// Initial velocities for a request, in simulation space.
pub fn particle_velocities(request: &ParticleRequest, rng: &mut impl Rng) -> Vec<Vec2> {
    let count = request.count as usize;
    let (low, high) = (
        request.speed_min.min(request.speed_max),
        request.speed_max.max(request.speed_min),
    );

    (0..count)
        .map(|i| match request.shape {
            ParticleShape::Ring => {
                let angle = TAU * i as f32 / count as f32;
                Vec2::from_angle(angle) * high
            }
            ParticleShape::Directional { direction, spread } => {
                let base = direction.normalize_or(Vec2::X).to_angle();
                let half = spread.to_radians();
                let angle = base + rng.random_range(-half..=half);
                Vec2::from_angle(angle) * rng.random_range(low..=high)
            }
            ParticleShape::Trail => Vec2::ZERO,
            ParticleShape::Burst | ParticleShape::Sparks | ParticleShape::Glow => {
                Vec2::from_angle(rng.random_range(0.0..TAU)) * rng.random_range(low..=high)
            }
        })
        .collect()
}

pub(crate) fn spawn_camera(mut commands: Commands, level: Res<LevelDef>, bounds: Res<LevelBounds>) {
    let focus = clamp_focus(Vec2::from(level.player_spawn), VIEW_SIZE / 2.0, &bounds);
    commands.spawn((
        Camera2d,
        CameraRig {
            focus,
            ..default()
        },
        Transform::from_translation(sim_to_world(focus, 0.0)),
    ));
}

pub(crate) fn apply_hit_freeze_requests(
    mut requests: MessageReader<HitFreezeRequest>,
    mut freeze: ResMut<HitFreeze>,
) {
    for request in requests.read() {
        freeze.trigger(request.duration);
        debug!("Hit-freeze for {:.2}s", request.duration);
    }
}

pub(crate) fn emit_particles(
    mut commands: Commands,
    mut requests: MessageReader<ParticleRequest>,
    mut rng: ResMut<EffectsRng>,
) {
    for request in requests.read() {
        for velocity in particle_velocities(request, &mut rng.0) {
            commands.spawn((
                Particle::new(velocity, request.lifetime),
                Sprite {
                    color: request.color,
                    custom_size: Some(Vec2::splat(request.size)),
                    ..default()
                },
                Transform::from_translation(sim_to_world(request.position, PARTICLE_Z)),
            ));
        }
    }
}

pub(crate) fn spawn_flashes(mut commands: Commands, mut requests: MessageReader<FlashRequest>) {
    for request in requests.read() {
        commands.spawn((
            Flash {
                radius: request.radius,
                age: 0.0,
                duration: request.duration,
            },
            Sprite {
                color: request.color.with_alpha(0.8),
                custom_size: Some(Vec2::splat(request.radius * 2.0)),
                ..default()
            },
            Transform::from_translation(sim_to_world(request.position, FLASH_Z))
                .with_scale(Vec3::splat(0.5)),
        ));
    }
}

pub(crate) fn update_particles(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Particle, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut particle, mut transform, mut sprite) in &mut query {
        particle.age += dt;
        if particle.is_expired() {
            commands.entity(entity).despawn();
            continue;
        }
        transform.translation.x += particle.velocity.x * dt;
        transform.translation.y -= particle.velocity.y * dt;
        let alpha = particle.alpha();
        sprite.color.set_alpha(alpha);
    }
}

pub(crate) fn update_flashes(
    mut commands: Commands,
    time: Res<Time>,
    mut query: Query<(Entity, &mut Flash, &mut Transform, &mut Sprite)>,
) {
    let dt = time.delta_secs();

    for (entity, mut flash, mut transform, mut sprite) in &mut query {
        flash.age += dt;
        let progress = flash.progress();
        if progress >= 1.0 {
            commands.entity(entity).despawn();
            continue;
        }
        transform.scale = Vec3::splat(0.5 + 0.5 * progress);
        sprite.color.set_alpha(0.8 * (1.0 - progress));
    }
}

pub(crate) fn receive_camera_shakes(
    mut shakes: MessageReader<CameraShake>,
    mut rigs: Query<&mut CameraRig>,
) {
    for shake in shakes.read() {
        for mut rig in &mut rigs {
            rig.shake(shake.intensity, shake.duration);
        }
    }
}

pub(crate) fn follow_camera(
    time: Res<Time>,
    bounds: Res<LevelBounds>,
    mut rng: ResMut<EffectsRng>,
    players: Query<&Body, With<Player>>,
    mut cameras: Query<(&mut CameraRig, &mut Transform), Without<Player>>,
) {
    let dt = time.delta_secs();
    let Ok(player) = players.single() else {
        return;
    };

    for (mut rig, mut transform) in &mut cameras {
        let target = player.center();
        let focus = rig.focus + (target - rig.focus) * camera_follow_factor(dt);
        rig.focus = clamp_focus(focus, VIEW_SIZE / 2.0, &bounds);

        rig.tick(dt);
        let offset = if rig.is_shaking() {
            let intensity = rig.shake_intensity;
            Vec2::new(
                rng.0.random_range(-intensity..=intensity),
                rng.0.random_range(-intensity..=intensity),
            )
        } else {
            Vec2::ZERO
        };

        transform.translation = sim_to_world(rig.focus + offset, transform.translation.z);
    }
}
