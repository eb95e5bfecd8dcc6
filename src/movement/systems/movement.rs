//! Movement domain: locomotion systems for input, timers and integration.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::{CombatTuning, PlayerCombat};
use crate::core::{Body, Defeated, LevelBounds};
use crate::effects::{ParticleRequest, ParticleShape};
use crate::movement::components::approach_horizontal;
use crate::movement::{JumpOutcome, MovementState, MovementTuning, Player, PlayerInput};

const JUMP_DUST: Color = Color::srgb(0.78, 0.78, 0.86);
const AIR_JUMP_GLOW: Color = Color::srgb(0.59, 0.78, 1.0);
const WALL_JUMP_DUST: Color = Color::srgb(0.86, 0.86, 0.94);
const LEDGE_GLOW: Color = Color::srgb(0.59, 0.78, 1.0);

pub(crate) fn apply_movement_input(
    input: Res<PlayerInput>,
    tuning: Res<MovementTuning>,
    mut particles: MessageWriter<ParticleRequest>,
    mut query: Query<(&mut Body, &mut MovementState, &PlayerCombat), (With<Player>, Without<Defeated>)>,
) {
    for (mut body, mut state, combat) in &mut query {
        // Dash direction is locked at activation
        if !combat.is_dashing() {
            state.face_input(input.axis.x);
        }

        if input.jump_pressed {
            let outcome = state.jump(&mut body, &tuning);
            debug!("Jump pressed: {:?}, jump_count={}", outcome, state.jump_count);
            emit_jump_particles(&mut particles, &body, outcome);
        }

        if input.pull_up && state.pull_up(&mut body, &tuning) {
            debug!("Pulling up from ledge");
            if let Some(anchor) = state.ledge_anchor() {
                particles.write(
                    ParticleRequest::new(ParticleShape::Glow, anchor, LEDGE_GLOW)
                        .with_count(5)
                        .with_speed(20.0, 60.0)
                        .with_lifetime(0.5)
                        .with_size(2.0),
                );
            }
        }
    }
}

pub(crate) fn emit_jump_particles(
    particles: &mut MessageWriter<ParticleRequest>,
    body: &Body,
    outcome: JumpOutcome,
) {
    let feet = Vec2::new(body.center().x, body.bottom());
    match outcome {
        JumpOutcome::WallJump { side } => {
            particles.write(
                ParticleRequest::new(
                    ParticleShape::Directional {
                        direction: Vec2::new(side.away_sign(), -0.5),
                        spread: 45.0,
                    },
                    body.center(),
                    WALL_JUMP_DUST,
                )
                .with_count(12)
                .with_speed(100.0, 200.0)
                .with_lifetime(0.7)
                .with_size(3.0),
            );
            particles.write(
                ParticleRequest::new(ParticleShape::Sparks, body.center(), Color::WHITE)
                    .with_count(8)
                    .with_speed(90.0, 180.0)
                    .with_lifetime(0.4),
            );
        }
        JumpOutcome::Jump { count: 1 } => {
            particles.write(
                ParticleRequest::new(ParticleShape::Burst, feet, JUMP_DUST)
                    .with_count(8)
                    .with_speed(40.0, 100.0)
                    .with_lifetime(0.6)
                    .with_size(3.0),
            );
        }
        JumpOutcome::Jump { .. } => {
            particles.write(
                ParticleRequest::new(ParticleShape::Glow, feet, AIR_JUMP_GLOW)
                    .with_count(10)
                    .with_speed(30.0, 80.0)
                    .with_lifetime(0.7)
                    .with_size(6.0),
            );
            particles.write(
                ParticleRequest::new(ParticleShape::Ring, feet, Color::WHITE)
                    .with_count(12)
                    .with_speed(25.0, 25.0)
                    .with_lifetime(0.4),
            );
        }
        JumpOutcome::Buffered => {}
    }
}

pub(crate) fn update_movement_timers(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut particles: MessageWriter<ParticleRequest>,
    mut query: Query<(&mut Body, &mut MovementState), (With<Player>, Without<Defeated>)>,
) {
    let dt = time.delta_secs();

    for (mut body, mut state) in &mut query {
        if state.tick(dt, &mut body, &tuning) {
            debug!("Pull-up complete at {:?}", body.position);
            particles.write(
                ParticleRequest::new(
                    ParticleShape::Burst,
                    Vec2::new(body.center().x, body.bottom()),
                    LEDGE_GLOW,
                )
                .with_count(8)
                .with_speed(100.0, 200.0)
                .with_lifetime(0.4)
                .with_size(2.5),
            );
        }
    }
}

pub(crate) fn apply_horizontal_movement(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<MovementTuning>,
    combat_tuning: Res<CombatTuning>,
    mut query: Query<(&mut Body, &MovementState, &mut PlayerCombat), (With<Player>, Without<Defeated>)>,
) {
    let dt = time.delta_secs();

    for (mut body, state, mut combat) in &mut query {
        if state.is_hanging() {
            body.velocity.x = 0.0;
            continue;
        }

        if combat.is_dashing() {
            // Dash overrides input entirely
            body.velocity.x = state.facing.sign() * combat_tuning.dash.speed;
            continue;
        }

        body.velocity.x = approach_horizontal(body.velocity.x, input.axis.x, dt, &tuning);

        if combat.tick_end_lag(dt) {
            body.velocity.x *= combat_tuning.dash.end_lag_decay;
        }
    }
}

pub(crate) fn apply_gravity(
    time: Res<Time>,
    tuning: Res<MovementTuning>,
    mut query: Query<(&mut Body, &MovementState), (With<Player>, Without<Defeated>)>,
) {
    let dt = time.delta_secs();

    for (mut body, state) in &mut query {
        if state.is_hanging() {
            if !state.is_pulling_up() {
                body.velocity = Vec2::ZERO;
            }
            continue;
        }

        body.velocity.y += tuning.gravity * dt;
        if state.wall_side().is_some() && body.velocity.y > tuning.wall_slide_speed {
            body.velocity.y = tuning.wall_slide_speed;
        }
        body.velocity.y = body.velocity.y.min(tuning.max_fall_speed);
    }
}

pub(crate) fn integrate_player(
    time: Res<Time>,
    bounds: Res<LevelBounds>,
    mut query: Query<(&mut Body, &MovementState), (With<Player>, Without<Defeated>)>,
) {
    let dt = time.delta_secs();

    for (mut body, state) in &mut query {
        body.integrate(dt);
        if state.is_grounded() {
            // Ride moving platforms
            body.position += state.ground_velocity * dt;
        }
        body.position.x = bounds.clamp_x(body.position.x, body.size.x);
    }
}
