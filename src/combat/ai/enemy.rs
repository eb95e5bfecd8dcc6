//! Combat domain: enemy AI updates and attacks.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{AiState, EnemyAi, Hostile, Projectile, Projectiles, Swing};
use crate::combat::resources::{ArchetypeTuning, EnemyTuning};
use crate::core::{Body, Defeated, Facing};
use crate::effects::{ParticleRequest, ParticleShape};
use crate::movement::Player;

const SWING_SPARK: Color = Color::srgb(0.86, 0.39, 0.2);
const SHOT_GLOW: Color = Color::srgb(0.78, 0.47, 1.0);

/// An attack started by an enemy this tick.
#[derive(Debug, Clone, PartialEq)]
pub enum EnemyAttack {
    Swing(Swing),
    Shot(Projectile),
}

/// One AI step: state transitions and horizontal intent for this tick.
/// Distances are measured horizontally between body centres.
pub fn think(
    ai: &mut EnemyAi,
    hostile: &mut Hostile,
    body: &mut Body,
    target: Vec2,
    dt: f32,
    tuning: &ArchetypeTuning,
) -> Option<EnemyAttack> {
    if ai.attack_timer > 0.0 {
        ai.attack_timer -= dt;
    }
    body.velocity.x *= tuning.friction;

    let dx = target.x - body.center().x;
    let distance = dx.abs();
    let toward = Facing::from_sign(dx).unwrap_or(hostile.heading);
    let too_close = tuning.retreat_range.is_some_and(|range| distance < range);

    match ai.state {
        AiState::Patrol => {
            let offset = body.position.x - ai.patrol_origin;
            if offset.abs() >= ai.patrol_range && offset * hostile.heading.sign() > 0.0 {
                hostile.heading = hostile.heading.flipped();
            }
            body.velocity.x = hostile.heading.sign() * tuning.patrol_speed;
            if distance < tuning.detection_range {
                ai.state = AiState::Chase;
            }
        }
        AiState::Chase => {
            hostile.heading = toward;
            body.velocity.x = toward.sign() * tuning.chase_speed;
            if too_close {
                ai.state = AiState::Retreat;
            } else if distance < tuning.attack_range {
                ai.state = AiState::Attack;
                body.velocity.x = 0.0;
            } else if distance > tuning.detection_range * 1.5 {
                ai.state = AiState::Patrol;
            }
        }
        AiState::Retreat => {
            hostile.heading = toward;
            body.velocity.x = -toward.sign() * tuning.chase_speed;
            if !too_close {
                ai.state = if distance < tuning.attack_range {
                    AiState::Attack
                } else {
                    AiState::Chase
                };
            }
        }
        AiState::Attack => {
            hostile.heading = toward;
            body.velocity.x = 0.0;
            if too_close {
                ai.state = AiState::Retreat;
            } else if distance > tuning.attack_range {
                ai.state = AiState::Chase;
            } else if ai.attack_timer <= 0.0 {
                ai.attack_timer = tuning.attack_cooldown;
                return Some(start_attack(body, hostile.heading, tuning));
            }
        }
    }

    None
}

fn start_attack(body: &Body, facing: Facing, tuning: &ArchetypeTuning) -> EnemyAttack {
    match &tuning.projectile {
        Some(shot) => {
            let size = Vec2::new(shot.width, shot.height);
            let hand_x = match facing {
                Facing::Right => body.position.x + body.size.x,
                Facing::Left => body.position.x - size.x,
            };
            EnemyAttack::Shot(Projectile {
                position: Vec2::new(hand_x, body.center().y - size.y / 2.0),
                velocity: Vec2::new(facing.sign() * shot.speed, 0.0),
                size,
                damage: tuning.attack_damage,
                lifetime: shot.lifetime,
                parried: false,
            })
        }
        None => EnemyAttack::Swing(Swing::beside(
            body,
            facing,
            Vec2::new(tuning.swing_width, tuning.swing_height),
            tuning.swing_offset_y,
            tuning.attack_damage,
            tuning.swing_duration,
        )),
    }
}

pub(crate) fn update_enemy_ai(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    mut particles: MessageWriter<ParticleRequest>,
    player_query: Query<&Body, (With<Player>, Without<Defeated>)>,
    mut enemy_query: Query<
        (&mut EnemyAi, &mut Hostile, &mut Body, Option<&mut Projectiles>),
        (Without<Player>, Without<Defeated>),
    >,
) {
    let dt = time.delta_secs();
    let Ok(player) = player_query.single() else {
        return;
    };
    let target = player.center();

    for (mut ai, mut hostile, mut body, projectiles) in &mut enemy_query {
        let archetype = tuning.archetype(ai.archetype);
        let previous = ai.state;
        let attack = think(&mut ai, &mut hostile, &mut body, target, dt, archetype);
        if ai.state != previous {
            debug!("{:?} AI: {:?} -> {:?}", ai.archetype, previous, ai.state);
        }

        match attack {
            Some(EnemyAttack::Swing(swing)) => {
                particles.write(
                    ParticleRequest::new(
                        ParticleShape::Directional {
                            direction: Vec2::new(hostile.heading.sign(), 0.0),
                            spread: 20.0,
                        },
                        swing.hitbox.center(),
                        SWING_SPARK,
                    )
                    .with_count(5)
                    .with_speed(60.0, 150.0)
                    .with_lifetime(0.3)
                    .with_size(2.0),
                );
                hostile.swing = Some(swing);
            }
            Some(EnemyAttack::Shot(shot)) => {
                particles.write(
                    ParticleRequest::new(ParticleShape::Glow, shot.bounds().center(), SHOT_GLOW)
                        .with_count(4)
                        .with_speed(20.0, 50.0)
                        .with_lifetime(0.3)
                        .with_size(3.0),
                );
                if let Some(mut projectiles) = projectiles {
                    projectiles.0.push(shot);
                }
            }
            None => {}
        }
    }
}
