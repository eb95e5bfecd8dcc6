//! Combat domain: boss phases and attack pattern.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{BossAi, BossPhase, Hostile, Swing};
use crate::combat::events::BossPhaseChangeEvent;
use crate::combat::resources::{BossTuning, CombatTuning};
use crate::core::{Body, Defeated, Facing, Health};
use crate::effects::{CameraShake, ParticleRequest, ParticleShape};
use crate::movement::Player;

const BOSS_SWING: Color = Color::srgb(0.86, 0.31, 0.47);
const PHASE_BURST: Color = Color::srgb(0.71, 0.04, 0.04);

impl BossAi {
    pub fn speed(&self, tuning: &BossTuning) -> f32 {
        match self.phase {
            BossPhase::Phase1 => tuning.phase_one.speed,
            BossPhase::Phase2 => tuning.phase_two.speed,
        }
    }

    pub fn attack_cooldown(&self, tuning: &BossTuning) -> f32 {
        match self.phase {
            BossPhase::Phase1 => tuning.phase_one.attack_cooldown,
            BossPhase::Phase2 => tuning.phase_two.attack_cooldown,
        }
    }

    /// Enter phase two once health falls to the threshold. True on the
    /// tick the phase changes.
    pub fn check_phase(&mut self, health: &Health, tuning: &BossTuning) -> bool {
        if self.phase == BossPhase::Phase1 && health.percent() <= tuning.phase_two_threshold {
            self.phase = BossPhase::Phase2;
            return true;
        }
        false
    }
}

/// One boss step: approach the target inside detection range, swing when
/// in reach and off cooldown. The pattern advances before each swing.
pub fn think_boss(
    ai: &mut BossAi,
    hostile: &mut Hostile,
    body: &mut Body,
    target: Vec2,
    dt: f32,
    tuning: &BossTuning,
) -> Option<Swing> {
    if ai.attack_timer > 0.0 {
        ai.attack_timer -= dt;
    }
    body.velocity.x *= tuning.friction;

    let dx = target.x - body.center().x;
    let distance = dx.abs();
    if distance >= tuning.detection_range {
        return None;
    }

    hostile.heading = Facing::from_sign(dx).unwrap_or(hostile.heading);
    if distance > tuning.attack_range {
        body.velocity.x = hostile.heading.sign() * ai.speed(tuning);
        return None;
    }
    if ai.attack_timer > 0.0 || tuning.pattern_damage.is_empty() {
        return None;
    }

    ai.pattern = (ai.pattern + 1) % tuning.pattern_damage.len();
    ai.attack_timer = ai.attack_cooldown(tuning);
    let width = tuning.swing_base_width + tuning.swing_width_step * ai.pattern as f32;
    Some(Swing::beside(
        body,
        hostile.heading,
        Vec2::new(width, tuning.swing_height),
        tuning.swing_offset_y,
        tuning.pattern_damage[ai.pattern],
        tuning.swing_duration,
    ))
}

pub(crate) fn update_boss_ai(
    time: Res<Time>,
    tuning: Res<BossTuning>,
    combat_tuning: Res<CombatTuning>,
    mut phase_events: MessageWriter<BossPhaseChangeEvent>,
    mut shakes: MessageWriter<CameraShake>,
    mut particles: MessageWriter<ParticleRequest>,
    player_query: Query<&Body, (With<Player>, Without<Defeated>)>,
    mut boss_query: Query<
        (Entity, &mut BossAi, &mut Hostile, &mut Body, &Health),
        (Without<Player>, Without<Defeated>),
    >,
) {
    let dt = time.delta_secs();
    let Ok(player) = player_query.single() else {
        return;
    };
    let target = player.center();

    for (entity, mut ai, mut hostile, mut body, health) in &mut boss_query {
        if ai.check_phase(health, &tuning) {
            info!(
                "Boss enters {:?} at {}/{} health",
                ai.phase, health.current, health.max
            );
            phase_events.write(BossPhaseChangeEvent {
                boss: entity,
                phase: ai.phase,
            });
            let shake = combat_tuning.feedback.boss_phase_shake;
            shakes.write(CameraShake {
                intensity: shake.intensity,
                duration: shake.duration,
            });
            particles.write(
                ParticleRequest::new(ParticleShape::Ring, body.center(), PHASE_BURST)
                    .with_count(24)
                    .with_speed(120.0, 120.0)
                    .with_lifetime(0.6),
            );
        }

        if let Some(swing) = think_boss(&mut ai, &mut hostile, &mut body, target, dt, &tuning) {
            debug!(
                "Boss swing: pattern={}, damage={}",
                ai.pattern, swing.damage
            );
            particles.write(
                ParticleRequest::new(
                    ParticleShape::Directional {
                        direction: Vec2::new(hostile.heading.sign(), -0.2),
                        spread: 30.0,
                    },
                    swing.hitbox.center(),
                    BOSS_SWING,
                )
                .with_count(8)
                .with_speed(80.0, 200.0)
                .with_lifetime(0.4)
                .with_size(3.0),
            );
            hostile.swing = Some(swing);
        }
    }
}
