//! Presentation domain: animation signals and the sync from simulation
//! bodies to render transforms.

pub mod components;
pub mod events;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::{FrameSet, GameplaySet};

pub use components::AnimationState;
pub use events::AnimationStateChanged;
pub use systems::{
    PLAYER_COLOR, blink_visible, derive_hostile_animation, derive_player_animation, player_tint,
    sim_to_world,
};

pub struct PresentationPlugin;

impl Plugin for PresentationPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<AnimationStateChanged>()
            .add_systems(
                Update,
                (systems::animate_player, systems::animate_hostiles).in_set(GameplaySet::Animate),
            )
            .add_systems(
                Update,
                (
                    systems::sync_transforms,
                    systems::sync_player_sprite,
                    systems::sync_hostile_sprites,
                    systems::log_animation_changes,
                )
                    .in_set(FrameSet::Render),
            );
    }
}
