//! Movement domain: platform collision for the player.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::core::{Body, Defeated};
use crate::effects::{ParticleRequest, ParticleShape};
use crate::movement::systems::movement::emit_jump_particles;
use crate::movement::{MovementState, MovementTuning, Player, PlayerInput};
use crate::world::{LevelGeometry, WallSide, resolve_platform_collisions};

const LANDING_DUST: Color = Color::srgb(0.7, 0.7, 0.75);
const WALL_DUST: Color = Color::srgb(0.7, 0.7, 0.7);
const LEDGE_GLOW: Color = Color::srgb(0.78, 0.86, 1.0);

/// Fall speed above which landing kicks up dust.
const HARD_LANDING_SPEED: f32 = 300.0;

pub(crate) fn resolve_player_collisions(
    input: Res<PlayerInput>,
    tuning: Res<MovementTuning>,
    level: Res<LevelGeometry>,
    mut particles: MessageWriter<ParticleRequest>,
    mut query: Query<(&mut Body, &mut MovementState), (With<Player>, Without<Defeated>)>,
) {
    for (mut body, mut state) in &mut query {
        let entry_fall_speed = body.velocity.y;
        let resolution = resolve_platform_collisions(&body, &level.platforms);
        body.position = resolution.position;
        body.velocity = resolution.velocity;

        let contacts = resolution.contacts.with_precedence();
        let outcome = state.apply_contacts(&contacts, input.axis.x, &mut body, &tuning);

        if outcome.landed {
            debug!("Landed: jump_count reset, coyote={}", state.coyote_timer);
            if entry_fall_speed > HARD_LANDING_SPEED {
                particles.write(
                    ParticleRequest::new(
                        ParticleShape::Burst,
                        Vec2::new(body.center().x, body.bottom()),
                        LANDING_DUST,
                    )
                    .with_count(6)
                    .with_speed(30.0, 90.0)
                    .with_lifetime(0.4)
                    .with_size(2.5),
                );
            }
        }
        if let Some(jump) = outcome.buffered_jump {
            debug!("Buffered jump fired on landing: {:?}", jump);
            emit_jump_particles(&mut particles, &body, jump);
        }
        if let Some(side) = outcome.wall_grabbed {
            debug!("Wall grabbed on {:?} side", side);
            let wall_x = match side {
                WallSide::Left => body.position.x,
                WallSide::Right => body.position.x + body.size.x,
            };
            particles.write(
                ParticleRequest::new(ParticleShape::Burst, Vec2::new(wall_x, body.center().y), WALL_DUST)
                    .with_count(3)
                    .with_speed(10.0, 30.0)
                    .with_lifetime(0.4)
                    .with_size(2.0),
            );
        }
        if let Some(anchor) = outcome.ledge_grabbed {
            debug!("Ledge grabbed at {:?}", anchor);
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
