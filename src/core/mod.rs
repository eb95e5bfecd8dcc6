//! Core domain: actor state, geometry, hit-freeze and the frame schedule.

pub mod components;
pub mod geometry;
pub mod resources;
mod systems;


use bevy::prelude::*;

pub use components::{Body, Defeated, Facing, Health, Invulnerable, apply_damage};
pub use geometry::{is_degenerate, overlaps, rect_at};
pub use resources::{HitFreeze, LevelBounds, gameplay_active};

/// Ordered stages of one gameplay tick. The whole chain is skipped while
/// a hit-freeze is active.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum GameplaySet {
    /// Kinematic platforms advance.
    World,
    /// Input sampling.
    Input,
    /// Player movement and combat state machines.
    Player,
    /// Platform collision resolution, contact flags fed back to the player.
    Collision,
    /// Enemy and boss AI, reading this tick's corrected player position.
    Ai,
    /// Hit arbitration between attacks and actors.
    Combat,
    /// Animation state signals derived from the final state.
    Animate,
}

/// Sub-steps of `GameplaySet::Player`.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum PlayerStep {
    /// Facing, jumps and pull-ups from this tick's input.
    Intent,
    /// Attacks, parry and abilities.
    Actions,
    /// Timers, horizontal speed, gravity and integration.
    Motion,
}

/// Per-frame stages that keep running through a hit-freeze.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Hit-freeze timer and visual effects, before gameplay.
    Effects,
    /// Read-only presentation of the final state, after gameplay.
    Render,
}

pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitFreeze>()
            .init_resource::<LevelBounds>()
            .configure_sets(
                Update,
                (
                    GameplaySet::World,
                    GameplaySet::Input,
                    GameplaySet::Player,
                    GameplaySet::Collision,
                    GameplaySet::Ai,
                    GameplaySet::Combat,
                    GameplaySet::Animate,
                )
                    .chain()
                    .run_if(gameplay_active),
            )
            .configure_sets(
                Update,
                (PlayerStep::Intent, PlayerStep::Actions, PlayerStep::Motion)
                    .chain()
                    .in_set(GameplaySet::Player),
            )
            .configure_sets(Update, FrameSet::Effects.before(GameplaySet::World))
            .configure_sets(Update, FrameSet::Render.after(GameplaySet::Animate))
            .add_systems(Update, systems::tick_hit_freeze.in_set(FrameSet::Effects))
            .add_systems(Update, systems::tick_invulnerability.in_set(GameplaySet::World));
    }
}
