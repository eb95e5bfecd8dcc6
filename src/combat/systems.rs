//! Combat domain: player combat input, timers and attack feedback.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::attacks::{Attack, AttackKind, ChargeTier};
use crate::combat::components::{ActiveAttacks, AttackContext, PlayerCombat};
use crate::combat::resources::CombatTuning;
use crate::core::{Body, Defeated, Invulnerable};
use crate::effects::{ParticleRequest, ParticleShape};
use crate::movement::{MovementState, Player, PlayerInput};

const COMBO_COLORS: [Color; 3] = [
    Color::srgb(1.0, 0.78, 0.39),
    Color::srgb(1.0, 0.59, 0.2),
    Color::srgb(1.0, 0.39, 0.39),
];
const HEAVY_COLOR: Color = Color::srgb(1.0, 0.59, 0.2);
const LAUNCHER_COLOR: Color = Color::srgb(0.39, 1.0, 1.0);
const FULL_CHARGE_COLOR: Color = Color::srgb(1.0, 1.0, 0.39);
const PARRY_COLOR: Color = Color::srgb(0.47, 0.82, 1.0);
const BUFF_COLOR: Color = Color::srgb(0.59, 0.86, 1.0);
const DASH_COLOR: Color = Color::srgb(0.78, 0.94, 1.0);

/// Handle combat presses, then advance the action state and attack lifetimes.
pub(crate) fn process_player_combat(
    time: Res<Time>,
    input: Res<PlayerInput>,
    tuning: Res<CombatTuning>,
    mut particles: MessageWriter<ParticleRequest>,
    mut query: Query<
        (
            &Body,
            &MovementState,
            &mut PlayerCombat,
            &mut ActiveAttacks,
            &mut Invulnerable,
        ),
        (With<Player>, Without<Defeated>),
    >,
) {
    let dt = time.delta_secs();

    for (body, movement, mut combat, mut attacks, mut invulnerable) in &mut query {
        let ctx = AttackContext {
            origin: body.position,
            facing: movement.facing,
            vertical: input.vertical(),
            airborne: !movement.is_grounded(),
        };
        let hand = Vec2::new(
            if movement.facing.sign() > 0.0 {
                body.position.x + body.size.x
            } else {
                body.position.x
            },
            body.center().y,
        );

        if input.light_pressed
            && let Some(attack) = combat.press_light(&ctx, &tuning)
        {
            debug!(
                "Light attack {:?}: damage={}, combo={}",
                attack.kind, attack.damage, combat.combo.count
            );
            emit_attack_particles(&mut particles, &tuning, hand, &attack);
            attacks.0.push(attack);
        }

        if input.heavy_pressed && combat.press_heavy(&tuning) {
            debug!("Charging heavy attack");
        }
        if input.heavy_released {
            let charge = combat.charge_time();
            match combat.release_heavy(&ctx, &tuning) {
                Some(attack) => {
                    debug!(
                        "Heavy attack {:?}: charge={:.2}s, damage={}",
                        attack.kind, charge, attack.damage
                    );
                    emit_attack_particles(&mut particles, &tuning, hand, &attack);
                    attacks.0.push(attack);
                }
                None if charge > 0.0 => debug!("Heavy released early ({:.2}s), discarded", charge),
                None => {}
            }
        }

        if input.parry_pressed && combat.press_parry(&tuning) {
            debug!("Parry started");
            particles.write(
                ParticleRequest::new(ParticleShape::Burst, body.center(), PARRY_COLOR)
                    .with_count(28)
                    .with_speed(140.0, 200.0)
                    .with_lifetime(0.45)
                    .with_size(3.5),
            );
        }

        if input.ability_1_pressed && combat.activate_buff(&tuning) {
            debug!("Damage buff armed");
            particles.write(
                ParticleRequest::new(ParticleShape::Glow, body.center(), BUFF_COLOR)
                    .with_count(20)
                    .with_speed(40.0, 80.0)
                    .with_lifetime(1.0)
                    .with_size(10.0),
            );
            particles.write(
                ParticleRequest::new(ParticleShape::Ring, body.center(), Color::WHITE)
                    .with_count(16)
                    .with_speed(50.0, 50.0)
                    .with_lifetime(0.5),
            );
        }

        if input.ability_2_pressed && combat.activate_dash(&tuning) {
            invulnerable.grant(tuning.dash.duration);
            debug!("Dash toward {:?}", movement.facing);
            particles.write(
                ParticleRequest::new(ParticleShape::Burst, body.center(), DASH_COLOR)
                    .with_count(15)
                    .with_speed(150.0, 250.0)
                    .with_lifetime(0.5)
                    .with_size(3.0),
            );
            particles.write(
                ParticleRequest::new(
                    ParticleShape::Directional {
                        direction: Vec2::new(movement.facing.sign(), 0.0),
                        spread: 20.0,
                    },
                    body.center(),
                    Color::WHITE,
                )
                .with_count(10)
                .with_speed(200.0, 400.0)
                .with_lifetime(0.3)
                .with_size(4.0),
            );
        }

        combat.tick(dt, &tuning);
        attacks.tick(dt);

        if combat.is_dashing() {
            particles.write(
                ParticleRequest::new(ParticleShape::Trail, body.center(), DASH_COLOR)
                    .with_count(2)
                    .with_lifetime(0.25)
                    .with_size(4.0),
            );
        }
        if combat.is_charging() {
            let fraction = combat.charge_time() / tuning.charge.max_time.max(f32::EPSILON);
            particles.write(
                ParticleRequest::new(
                    ParticleShape::Glow,
                    body.center(),
                    Color::srgb(1.0, 0.39 + 0.61 * fraction, 0.2),
                )
                .with_count(1)
                .with_speed(20.0, 40.0)
                .with_lifetime(0.4)
                .with_size(5.0),
            );
        }
    }
}

fn emit_attack_particles(
    particles: &mut MessageWriter<ParticleRequest>,
    tuning: &CombatTuning,
    at: Vec2,
    attack: &Attack,
) {
    match (attack.kind, attack.charge) {
        (AttackKind::Light, _) => {
            let burst = tuning.combo.step(attack.combo_step).map_or(6, |step| step.particles);
            let step = usize::from(attack.combo_step.clamp(1, 3));
            let color = COMBO_COLORS[step - 1];
            let step = step as f32;
            particles.write(
                ParticleRequest::new(ParticleShape::Burst, at, color)
                    .with_count(burst)
                    .with_speed(80.0, 150.0 + step * 30.0)
                    .with_lifetime(0.3)
                    .with_size(3.0),
            );
            if step >= 2.0 {
                particles.write(
                    ParticleRequest::new(ParticleShape::Sparks, at, color)
                        .with_count(5 + 3 * step as u32)
                        .with_speed(100.0, 200.0)
                        .with_lifetime(0.25),
                );
            }
            if attack.finisher {
                particles.write(
                    ParticleRequest::new(ParticleShape::Glow, at, FULL_CHARGE_COLOR)
                        .with_count(10)
                        .with_speed(30.0, 60.0)
                        .with_lifetime(0.6)
                        .with_size(10.0),
                );
            }
        }
        (kind, Some(tier)) => {
            let color = if kind == AttackKind::Up {
                LAUNCHER_COLOR
            } else {
                HEAVY_COLOR
            };
            particles.write(
                ParticleRequest::new(ParticleShape::Burst, at, color)
                    .with_count(20)
                    .with_speed(100.0, 300.0)
                    .with_lifetime(0.4)
                    .with_size(4.0),
            );
            if tier == ChargeTier::Full {
                particles.write(
                    ParticleRequest::new(ParticleShape::Ring, at, Color::WHITE)
                        .with_count(20)
                        .with_speed(60.0, 60.0)
                        .with_lifetime(0.5),
                );
            }
            if kind == AttackKind::Up {
                particles.write(
                    ParticleRequest::new(
                        ParticleShape::Directional {
                            direction: Vec2::new(0.0, -1.0),
                            spread: 45.0,
                        },
                        at,
                        LAUNCHER_COLOR,
                    )
                    .with_count(20)
                    .with_speed(150.0, 300.0)
                    .with_lifetime(0.5)
                    .with_size(5.0),
                );
            }
        }
        (_, None) => {
            particles.write(
                ParticleRequest::new(ParticleShape::Sparks, at, COMBO_COLORS[0])
                    .with_count(6)
                    .with_speed(80.0, 160.0)
                    .with_lifetime(0.25),
            );
        }
    }
}
