//! Presentation domain: animation signals and render sync.
//!
//! Everything here reads gameplay state and writes only render components.

use bevy::ecs::message::{MessageReader, MessageWriter};
use bevy::prelude::*;

use super::components::AnimationState;
use super::events::AnimationStateChanged;
use crate::combat::{ActiveAttacks, Hostile, PlayerCombat};
use crate::core::{Body, Defeated, Invulnerable};
use crate::movement::{Locomotion, MovementState, Player};

/// Horizontal speed below which a grounded actor counts as standing still.
pub const RUN_THRESHOLD: f32 = 10.0;
/// Visibility toggles per second while invulnerable.
pub const BLINK_RATE: f32 = 20.0;

pub const PLAYER_COLOR: Color = Color::srgb(0.3, 0.55, 0.95);

/// Simulation space is y-down with the origin at the top-left of the level;
/// world space is y-up.
pub fn sim_to_world(center: Vec2, z: f32) -> Vec3 {
    Vec3::new(center.x, -center.y, z)
}

pub fn derive_player_animation(
    movement: &MovementState,
    combat: &PlayerCombat,
    attacking: bool,
    velocity: Vec2,
) -> AnimationState {
    if movement.is_hanging() && !movement.is_pulling_up() {
        return AnimationState::Ledge;
    }
    if combat.is_dashing() {
        return AnimationState::Dash;
    }
    if combat.is_parrying() {
        return AnimationState::Parry;
    }
    if attacking {
        return AnimationState::Attack;
    }

    match movement.locomotion {
        Locomotion::WallAttached { .. } => AnimationState::Fall,
        Locomotion::Airborne | Locomotion::LedgeHanging { .. } => {
            if velocity.y < 0.0 {
                AnimationState::Jump
            } else {
                AnimationState::Fall
            }
        }
        Locomotion::Grounded if velocity.x.abs() > RUN_THRESHOLD => AnimationState::Run,
        Locomotion::Grounded => AnimationState::Idle,
    }
}

pub fn derive_hostile_animation(hostile: &Hostile, velocity: Vec2) -> AnimationState {
    if hostile.active_swing().is_some() {
        AnimationState::Attack
    } else if velocity.x.abs() > RUN_THRESHOLD {
        AnimationState::Run
    } else {
        AnimationState::Idle
    }
}

/// Player colour per animation state; the placeholder art is a tinted block.
pub fn player_tint(state: AnimationState) -> Color {
    match state {
        AnimationState::Attack => Color::srgb(0.95, 0.85, 0.35),
        AnimationState::Parry => Color::srgb(0.5, 0.95, 1.0),
        AnimationState::Dash => Color::srgb(0.75, 0.8, 1.0),
        AnimationState::Ledge => Color::srgb(0.35, 0.75, 0.6),
        _ => PLAYER_COLOR,
    }
}

/// Whether a blinking actor is drawn this instant.
pub fn blink_visible(remaining: f32) -> bool {
    (remaining * BLINK_RATE) as i32 % 2 == 0
}

fn transition(
    entity: Entity,
    current: &mut AnimationState,
    next: AnimationState,
    changes: &mut MessageWriter<AnimationStateChanged>,
) {
    if *current == next {
        return;
    }
    changes.write(AnimationStateChanged {
        entity,
        from: *current,
        to: next,
    });
    *current = next;
}

pub(crate) fn animate_player(
    mut query: Query<
        (
            Entity,
            &MovementState,
            &PlayerCombat,
            &ActiveAttacks,
            &Body,
            &mut AnimationState,
        ),
        With<Player>,
    >,
    mut changes: MessageWriter<AnimationStateChanged>,
) {
    for (entity, movement, combat, attacks, body, mut state) in &mut query {
        let attacking = attacks.active().next().is_some();
        let next = derive_player_animation(movement, combat, attacking, body.velocity);
        transition(entity, &mut state, next, &mut changes);
    }
}

pub(crate) fn animate_hostiles(
    mut query: Query<(Entity, &Hostile, &Body, &mut AnimationState), Without<Defeated>>,
    mut changes: MessageWriter<AnimationStateChanged>,
) {
    for (entity, hostile, body, mut state) in &mut query {
        let next = derive_hostile_animation(hostile, body.velocity);
        transition(entity, &mut state, next, &mut changes);
    }
}

pub(crate) fn sync_transforms(
    mut query: Query<(
        &Body,
        &mut Transform,
        &mut Visibility,
        Option<&Invulnerable>,
        Has<Defeated>,
    )>,
) {
    for (body, mut transform, mut visibility, invulnerable, defeated) in &mut query {
        transform.translation = sim_to_world(body.center(), transform.translation.z);

        let visible = !defeated
            && invulnerable
                .filter(|inv| inv.is_invulnerable())
                .is_none_or(|inv| blink_visible(inv.timer));
        *visibility = if visible {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

pub(crate) fn sync_player_sprite(
    mut query: Query<(&MovementState, &AnimationState, &mut Sprite), With<Player>>,
) {
    for (movement, state, mut sprite) in &mut query {
        sprite.flip_x = movement.facing.sign() < 0.0;
        sprite.color = player_tint(*state);
    }
}

pub(crate) fn sync_hostile_sprites(mut query: Query<(&Hostile, &mut Sprite)>) {
    for (hostile, mut sprite) in &mut query {
        sprite.flip_x = hostile.heading.sign() < 0.0;
    }
}

pub(crate) fn log_animation_changes(mut changes: MessageReader<AnimationStateChanged>) {
    for change in changes.read() {
        debug!(
            "{:?}: {} -> {}",
            change.entity,
            change.from.suffix(),
            change.to.suffix()
        );
    }
}
