//! Movement domain: player locomotion, input sampling and platform contact.

pub mod bootstrap;
pub mod components;
pub mod resources;
pub(crate) mod systems;


use bevy::prelude::*;

use crate::core::{FrameSet, GameplaySet, PlayerStep};

pub use components::{JumpOutcome, Locomotion, MovementState, Player};
pub use resources::{InputLatch, MovementTuning, PlayerInput, VerticalInput};

pub struct MovementPlugin;

impl Plugin for MovementPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<MovementTuning>()
            .init_resource::<PlayerInput>()
            .init_resource::<InputLatch>()
            .add_systems(Startup, bootstrap::spawn_player)
            .add_systems(
                Update,
                (systems::latch_input, systems::exit_on_escape).in_set(FrameSet::Effects),
            )
            .add_systems(Update, systems::read_input.in_set(GameplaySet::Input))
            .add_systems(
                Update,
                systems::apply_movement_input.in_set(PlayerStep::Intent),
            )
            .add_systems(
                Update,
                (
                    systems::update_movement_timers,
                    systems::apply_horizontal_movement,
                    systems::apply_gravity,
                    systems::integrate_player,
                )
                    .chain()
                    .in_set(PlayerStep::Motion),
            )
            .add_systems(
                Update,
                systems::resolve_player_collisions.in_set(GameplaySet::Collision),
            );
    }
}
