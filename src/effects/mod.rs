//! Effects domain: particles, flashes, camera shake and hit-freeze.
//!
//! Gameplay writes requests; this domain turns them into short-lived
//! entities and camera motion. Nothing here feeds back into the simulation
//! except the hit-freeze timer.

pub mod components;
pub mod events;
pub mod resources;
mod systems;


use bevy::prelude::*;

use crate::core::FrameSet;

pub use components::{CameraRig, Flash, Particle};
pub use events::{CameraShake, FlashRequest, HitFreezeRequest, ParticleRequest, ParticleShape};
pub use resources::EffectsRng;
pub use systems::{VIEW_SIZE, camera_follow_factor, clamp_focus, particle_velocities};

pub struct EffectsPlugin;

impl Plugin for EffectsPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<EffectsRng>()
            .add_message::<ParticleRequest>()
            .add_message::<CameraShake>()
            .add_message::<FlashRequest>()
            .add_message::<HitFreezeRequest>()
            .add_systems(Startup, systems::spawn_camera)
            .add_systems(
                Update,
                (systems::update_particles, systems::update_flashes).in_set(FrameSet::Effects),
            )
            .add_systems(
                Update,
                (
                    systems::apply_hit_freeze_requests,
                    systems::emit_particles,
                    systems::spawn_flashes,
                    systems::receive_camera_shakes,
                    systems::follow_camera,
                )
                    .chain()
                    .in_set(FrameSet::Render),
            );
    }
}
