//! Presentation domain messages.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use super::components::AnimationState;

/// Fired when an actor's animation state changes.
#[derive(Debug, Clone)]
pub struct AnimationStateChanged {
    pub entity: Entity,
    pub from: AnimationState,
    pub to: AnimationState,
}

impl Message for AnimationStateChanged {}
