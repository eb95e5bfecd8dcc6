//! Debug domain: tests for teleport and invincibility.

use bevy::prelude::*;

use super::DebugState;
use super::systems::{apply_invincibility, teleport};
use crate::core::{Body, Facing, Health, Invulnerable};
use crate::movement::{Locomotion, MovementState, Player};
use crate::test_utils::run_system_once;

#[test]
fn test_teleport_resets_motion_but_keeps_facing() {
    let mut body = Body::new(Vec2::ZERO, Vec2::new(32.0, 48.0));
    body.velocity = Vec2::new(120.0, -300.0);
    let mut state = MovementState {
        locomotion: Locomotion::Grounded,
        facing: Facing::Left,
        jump_count: 2,
        ..default()
    };

    teleport(&mut body, &mut state, Vec2::new(2250.0, 520.0));

    assert_eq!(body.position, Vec2::new(2250.0, 520.0));
    assert_eq!(body.velocity, Vec2::ZERO);
    assert_eq!(state.locomotion, Locomotion::Airborne);
    assert_eq!(state.facing, Facing::Left);
    assert_eq!(state.jump_count, 0);
}

#[test]
fn test_invincibility_restores_health() {
    let mut world = World::new();
    world.insert_resource(DebugState {
        invincible: true,
        ..default()
    });
    let mut health = Health::new(100);
    health.take_damage(40);
    let player = world
        .spawn((Player, health, Invulnerable::default()))
        .id();

    run_system_once(&mut world, apply_invincibility);

    assert_eq!(world.get::<Health>(player).expect("player").current, 100);
    assert!(world.get::<Invulnerable>(player).expect("player").is_invulnerable());
}
