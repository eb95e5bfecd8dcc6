//! Debug domain: state for developer tooling.

use bevy::prelude::*;

/// Resource tracking debug mode state
#[derive(Resource, Debug, Default)]
pub struct DebugState {
    /// Whether the hitbox overlay is drawn
    pub overlay_visible: bool,
    /// Whether player is invincible
    pub invincible: bool,
}
