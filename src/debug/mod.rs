//! Debug tooling, compiled with the `dev-tools` feature.
//!
//! Features:
//! - F1 toggles a gizmo overlay of bodies, platforms and hitboxes
//! - T warps the player to the boss arena
//! - Ctrl+I toggles invincibility

mod state;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::FrameSet;

pub use state::DebugState;

pub struct DebugPlugin;

impl Plugin for DebugPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugState>()
            .add_systems(
                Update,
                (
                    systems::toggle_overlay,
                    systems::handle_debug_hotkeys,
                    systems::apply_invincibility,
                )
                    .chain()
                    .in_set(FrameSet::Effects),
            )
            .add_systems(Update, systems::draw_debug_overlay.in_set(FrameSet::Render));
    }
}
