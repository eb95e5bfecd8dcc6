//! Presentation domain: tests for animation derivation and render sync.

use bevy::prelude::*;

use super::systems::{animate_player, sync_transforms};
use super::*;
use crate::combat::{
    ActiveAttacks, EnemyArchetype, Hostile, HostileKind, PlayerAction, PlayerCombat, Swing,
};
use crate::core::{Body, Defeated, Invulnerable, rect_at};
use crate::movement::{Locomotion, MovementState, Player};
use crate::test_utils::{init_messages, read_messages, run_system_once};
use crate::world::WallSide;

fn movement(locomotion: Locomotion) -> MovementState {
    MovementState {
        locomotion,
        ..default()
    }
}

fn combat(action: PlayerAction) -> PlayerCombat {
    PlayerCombat {
        action,
        ..default()
    }
}

// -----------------------------------------------------------------------------
// Player animation priority tests
// -----------------------------------------------------------------------------

#[test]
fn test_grounded_idle_and_run() {
    let grounded = movement(Locomotion::Grounded);
    let idle = combat(PlayerAction::Idle);

    assert_eq!(
        derive_player_animation(&grounded, &idle, false, Vec2::new(5.0, 0.0)),
        AnimationState::Idle
    );
    assert_eq!(
        derive_player_animation(&grounded, &idle, false, Vec2::new(-150.0, 0.0)),
        AnimationState::Run
    );
}

#[test]
fn test_airborne_jump_or_fall_by_vertical_velocity() {
    let airborne = movement(Locomotion::Airborne);
    let idle = combat(PlayerAction::Idle);

    assert_eq!(
        derive_player_animation(&airborne, &idle, false, Vec2::new(0.0, -300.0)),
        AnimationState::Jump
    );
    assert_eq!(
        derive_player_animation(&airborne, &idle, false, Vec2::new(0.0, 200.0)),
        AnimationState::Fall
    );
}

#[test]
fn test_wall_slide_shows_fall() {
    let wall = movement(Locomotion::WallAttached {
        side: WallSide::Left,
    });
    assert_eq!(
        derive_player_animation(&wall, &combat(PlayerAction::Idle), false, Vec2::new(0.0, -50.0)),
        AnimationState::Fall
    );
}

#[test]
fn test_ledge_beats_everything_until_pull_up() {
    let hanging = movement(Locomotion::LedgeHanging {
        anchor: Vec2::new(100.0, 200.0),
        pull_up: None,
    });
    let dashing = combat(PlayerAction::Dashing { remaining: 0.1 });
    assert_eq!(
        derive_player_animation(&hanging, &dashing, true, Vec2::ZERO),
        AnimationState::Ledge
    );

    let pulling = movement(Locomotion::LedgeHanging {
        anchor: Vec2::new(100.0, 200.0),
        pull_up: Some(0.1),
    });
    assert_eq!(
        derive_player_animation(&pulling, &combat(PlayerAction::Idle), false, Vec2::new(0.0, -400.0)),
        AnimationState::Jump
    );
}

#[test]
fn test_dash_then_parry_then_attack_priority() {
    let grounded = movement(Locomotion::Grounded);

    assert_eq!(
        derive_player_animation(
            &grounded,
            &combat(PlayerAction::Dashing { remaining: 0.1 }),
            true,
            Vec2::ZERO
        ),
        AnimationState::Dash
    );
    assert_eq!(
        derive_player_animation(
            &grounded,
            &combat(PlayerAction::Parrying {
                elapsed: 0.0,
                remaining: 0.3
            }),
            true,
            Vec2::ZERO
        ),
        AnimationState::Parry
    );
    assert_eq!(
        derive_player_animation(&grounded, &combat(PlayerAction::Idle), true, Vec2::new(200.0, 0.0)),
        AnimationState::Attack
    );
}

// -----------------------------------------------------------------------------
// Hostile animation tests
// -----------------------------------------------------------------------------

#[test]
fn test_hostile_attack_run_idle() {
    let mut hostile = Hostile::new(HostileKind::Enemy(EnemyArchetype::Grunt), 0);
    assert_eq!(derive_hostile_animation(&hostile, Vec2::ZERO), AnimationState::Idle);
    assert_eq!(
        derive_hostile_animation(&hostile, Vec2::new(80.0, 0.0)),
        AnimationState::Run
    );

    hostile.swing = Some(Swing {
        hitbox: rect_at(Vec2::ZERO, Vec2::splat(10.0)),
        damage: 10,
        remaining: 0.1,
        parried: false,
    });
    assert_eq!(
        derive_hostile_animation(&hostile, Vec2::new(80.0, 0.0)),
        AnimationState::Attack
    );
}

// -----------------------------------------------------------------------------
// System tests
// -----------------------------------------------------------------------------

#[test]
fn test_animate_player_reports_change_once() {
    let mut world = World::new();
    init_messages::<AnimationStateChanged>(&mut world);

    let mut body = Body::new(Vec2::ZERO, Vec2::new(40.0, 60.0));
    body.velocity = Vec2::new(200.0, 0.0);
    let player = world
        .spawn((
            Player,
            movement(Locomotion::Grounded),
            PlayerCombat::default(),
            ActiveAttacks::default(),
            body,
            AnimationState::Idle,
        ))
        .id();

    run_system_once(&mut world, animate_player);
    run_system_once(&mut world, animate_player);

    assert_eq!(world.get::<AnimationState>(player), Some(&AnimationState::Run));
    let changes = read_messages::<AnimationStateChanged>(&mut world);
    assert_eq!(changes.len(), 1);
    assert_eq!(changes[0].from, AnimationState::Idle);
    assert_eq!(changes[0].to, AnimationState::Run);
}

#[test]
fn test_sync_negates_y_and_hides_defeated() {
    let mut world = World::new();
    let alive = world
        .spawn((
            Body::new(Vec2::new(100.0, 200.0), Vec2::new(40.0, 60.0)),
            Transform::from_xyz(0.0, 0.0, 5.0),
            Visibility::default(),
        ))
        .id();
    let dead = world
        .spawn((
            Body::new(Vec2::ZERO, Vec2::splat(10.0)),
            Transform::default(),
            Visibility::default(),
            Defeated,
        ))
        .id();

    run_system_once(&mut world, sync_transforms);

    let transform = world.get::<Transform>(alive).expect("alive");
    assert_eq!(transform.translation, Vec3::new(120.0, -230.0, 5.0));
    assert_eq!(world.get::<Visibility>(alive), Some(&Visibility::Inherited));
    assert_eq!(world.get::<Visibility>(dead), Some(&Visibility::Hidden));
}

#[test]
fn test_invulnerable_actor_blinks() {
    assert!(blink_visible(0.0));
    assert!(!blink_visible(0.07));
    assert!(blink_visible(0.12));

    let mut world = World::new();
    let entity = world
        .spawn((
            Body::new(Vec2::ZERO, Vec2::splat(10.0)),
            Invulnerable { timer: 0.07 },
            Transform::default(),
            Visibility::default(),
        ))
        .id();
    run_system_once(&mut world, sync_transforms);
    assert_eq!(world.get::<Visibility>(entity), Some(&Visibility::Hidden));
}

#[test]
fn test_tint_follows_state() {
    assert_eq!(player_tint(AnimationState::Idle), PLAYER_COLOR);
    assert_ne!(player_tint(AnimationState::Parry), PLAYER_COLOR);
}
