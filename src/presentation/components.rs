//! Presentation domain: the named animation signal.

use bevy::prelude::*;

/// Animation state derived from gameplay state every tick.
#[derive(Component, Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum AnimationState {
    #[default]
    Idle,
    Run,
    Jump,
    Fall,
    Attack,
    Parry,
    Dash,
    Ledge,
}

impl AnimationState {
    /// Name used by sprite sheets, e.g. `player_run`.
    pub fn suffix(self) -> &'static str {
        match self {
            AnimationState::Idle => "idle",
            AnimationState::Run => "run",
            AnimationState::Jump => "jump",
            AnimationState::Fall => "fall",
            AnimationState::Attack => "attack",
            AnimationState::Parry => "parry",
            AnimationState::Dash => "dash",
            AnimationState::Ledge => "ledge",
        }
    }
}
