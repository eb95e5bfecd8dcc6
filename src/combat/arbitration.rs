//! Combat domain: hit arbitration between the player and everything hostile.
//!
//! Runs after movement, collision and AI so every hitbox and body reflects
//! this tick's final positions. Hostiles are visited in spawn order.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::combat::components::{ActiveAttacks, Hostile, Knockback, PlayerCombat, Projectiles};
use crate::combat::events::{DamageEvent, DeathEvent, ParryEvent};
use crate::combat::resources::{CombatTuning, ShakeTuning};
use crate::core::{Body, Defeated, Health, Invulnerable, apply_damage, overlaps};
use crate::effects::{CameraShake, FlashRequest, HitFreezeRequest, ParticleRequest, ParticleShape};
use crate::movement::Player;

const ENEMY_HIT_FLASH: Color = Color::srgb(1.0, 0.78, 0.39);
const BOSS_HIT_FLASH: Color = Color::srgb(1.0, 0.71, 0.31);
const PLAYER_HIT_BY_ENEMY_FLASH: Color = Color::srgb(1.0, 0.2, 0.2);
const PLAYER_HIT_BY_BOSS_FLASH: Color = Color::srgb(1.0, 0.39, 0.39);
const ENEMY_PARRY_FLASH: Color = Color::srgb(0.47, 0.82, 1.0);
const ENEMY_PERFECT_PARRY_FLASH: Color = Color::srgb(0.67, 0.9, 1.0);
const BOSS_PARRY_FLASH: Color = Color::srgb(0.59, 0.86, 1.0);
const BOSS_PERFECT_PARRY_FLASH: Color = Color::srgb(0.75, 0.94, 1.0);
const HIT_TRAIL: Color = Color::srgb(1.0, 0.59, 0.2);

/// Live hostiles sorted by spawn order.
fn spawn_order<'a>(hostiles: impl Iterator<Item = (Entity, &'a Hostile)>) -> Vec<Entity> {
    let mut order: Vec<(usize, Entity)> = hostiles
        .map(|(entity, hostile)| (hostile.spawn_index, entity))
        .collect();
    order.sort_by_key(|(index, _)| *index);
    order.into_iter().map(|(_, entity)| entity).collect()
}

fn shake(shakes: &mut MessageWriter<CameraShake>, tuning: ShakeTuning) {
    shakes.write(CameraShake {
        intensity: tuning.intensity,
        duration: tuning.duration,
    });
}

/// Player attacks against enemies and the boss. An attack is not consumed
/// by a hit; the target's invulnerability window limits repeats.
pub(crate) fn resolve_player_attacks(
    mut commands: Commands,
    tuning: Res<CombatTuning>,
    players: Query<&ActiveAttacks, (With<Player>, Without<Defeated>)>,
    mut hostiles: Query<
        (
            Entity,
            &Hostile,
            &mut Body,
            &mut Health,
            &mut Invulnerable,
            &Knockback,
        ),
        (Without<Player>, Without<Defeated>),
    >,
    mut damage_events: MessageWriter<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut shakes: MessageWriter<CameraShake>,
    mut flashes: MessageWriter<FlashRequest>,
    mut particles: MessageWriter<ParticleRequest>,
) {
    let Ok(attacks) = players.single() else {
        return;
    };
    let order = spawn_order(hostiles.iter().map(|(entity, hostile, ..)| (entity, hostile)));

    for attack in attacks.active() {
        for &entity in &order {
            let Ok((entity, hostile, mut body, mut health, mut invulnerable, knockback)) =
                hostiles.get_mut(entity)
            else {
                continue;
            };
            if health.is_dead() || !overlaps(&attack.hitbox, &body.bounds()) {
                continue;
            }
            let Some(dealt) = apply_damage(
                &mut health,
                &mut invulnerable,
                attack.damage,
                tuning.invulnerability_time,
            ) else {
                continue;
            };

            debug!(
                "{:?} hit {:?} for {} ({}/{})",
                attack.kind, hostile.kind, dealt, health.current, health.max
            );
            damage_events.write(DamageEvent {
                target: entity,
                amount: dealt,
                to_player: false,
            });

            let center = body.center();
            if hostile.is_boss() {
                shake(&mut shakes, tuning.feedback.player_hit_boss_shake);
                flashes.write(FlashRequest::new(center, BOSS_HIT_FLASH, 35.0, 0.2));
            } else {
                flashes.write(FlashRequest::new(center, ENEMY_HIT_FLASH, 25.0, 0.15));
            }
            particles.write(
                ParticleRequest::new(ParticleShape::Trail, attack.hitbox.center(), HIT_TRAIL)
                    .with_count(4)
                    .with_lifetime(0.2)
                    .with_size(attack.hitbox.height() / 4.0),
            );

            if health.is_dead() {
                info!("{:?} defeated", hostile.kind);
                commands.entity(entity).insert(Defeated);
                death_events.write(DeathEvent { entity });
            } else {
                knockback.apply(&mut body, hostile.heading);
            }
        }
    }
}

/// Hostile swings and projectiles against the player. A parry deflects the
/// hit; otherwise the player takes damage unless already invulnerable.
pub(crate) fn resolve_hostile_attacks(
    mut commands: Commands,
    tuning: Res<CombatTuning>,
    mut players: Query<
        (Entity, &Body, &mut Health, &mut Invulnerable, &PlayerCombat),
        (With<Player>, Without<Defeated>),
    >,
    mut hostiles: Query<
        (Entity, &mut Hostile, Option<&mut Projectiles>),
        (Without<Player>, Without<Defeated>),
    >,
    mut damage_events: MessageWriter<DamageEvent>,
    mut death_events: MessageWriter<DeathEvent>,
    mut parry_events: MessageWriter<ParryEvent>,
    mut freezes: MessageWriter<HitFreezeRequest>,
    mut shakes: MessageWriter<CameraShake>,
    mut flashes: MessageWriter<FlashRequest>,
) {
    let Ok((player, body, mut health, mut invulnerable, combat)) = players.single_mut() else {
        return;
    };
    let player_bounds = body.bounds();
    let center = body.center();
    let order = spawn_order(hostiles.iter().map(|(entity, hostile, _)| (entity, hostile)));
    let feedback = &tuning.feedback;

    for entity in order {
        let Ok((attacker, mut hostile, mut projectiles)) = hostiles.get_mut(entity) else {
            continue;
        };
        let boss = hostile.is_boss();

        // Every hitbox this hostile currently has live: (damage, parried flag).
        let mut hits: Vec<(i32, &mut bool)> = Vec::new();
        if let Some(swing) = hostile.swing.as_mut()
            && swing.is_active()
            && overlaps(&swing.hitbox, &player_bounds)
        {
            hits.push((swing.damage, &mut swing.parried));
        }
        if let Some(projectiles) = projectiles.as_deref_mut() {
            for projectile in projectiles.0.iter_mut() {
                if projectile.is_alive() && overlaps(&projectile.bounds(), &player_bounds) {
                    hits.push((projectile.damage, &mut projectile.parried));
                }
            }
        }

        for (damage, parried) in hits {
            if combat.is_parrying() {
                let perfect = combat.is_perfect_parry(&tuning);
                *parried = true;
                debug!("Parried {:?} (perfect: {})", attacker, perfect);
                parry_events.write(ParryEvent { attacker, perfect });

                let (freeze, shake_tuning, color, radius, duration) = match (boss, perfect) {
                    (false, true) => (
                        feedback.enemy_perfect_parry_freeze,
                        feedback.enemy_perfect_parry_shake,
                        ENEMY_PERFECT_PARRY_FLASH,
                        45.0,
                        0.25,
                    ),
                    (false, false) => (
                        feedback.enemy_parry_freeze,
                        feedback.enemy_parry_shake,
                        ENEMY_PARRY_FLASH,
                        32.0,
                        0.18,
                    ),
                    (true, true) => (
                        feedback.boss_perfect_parry_freeze,
                        feedback.boss_perfect_parry_shake,
                        BOSS_PERFECT_PARRY_FLASH,
                        55.0,
                        0.3,
                    ),
                    (true, false) => (
                        feedback.boss_parry_freeze,
                        feedback.boss_parry_shake,
                        BOSS_PARRY_FLASH,
                        40.0,
                        0.25,
                    ),
                };
                freezes.write(HitFreezeRequest { duration: freeze });
                shake(&mut shakes, shake_tuning);
                flashes.write(FlashRequest::new(center, color, radius, duration));
                continue;
            }

            if invulnerable.is_invulnerable() {
                continue;
            }
            let Some(dealt) = apply_damage(
                &mut health,
                &mut invulnerable,
                damage,
                tuning.invulnerability_time,
            ) else {
                continue;
            };

            debug!(
                "Player took {} from {:?} ({}/{})",
                dealt, attacker, health.current, health.max
            );
            damage_events.write(DamageEvent {
                target: player,
                amount: dealt,
                to_player: true,
            });
            if boss {
                shake(&mut shakes, feedback.boss_hit_player_shake);
                flashes.write(FlashRequest::new(center, PLAYER_HIT_BY_BOSS_FLASH, 35.0, 0.2));
            } else {
                shake(&mut shakes, feedback.enemy_hit_player_shake);
                flashes.write(FlashRequest::new(center, PLAYER_HIT_BY_ENEMY_FLASH, 20.0, 0.15));
            }

            if health.is_dead() {
                info!("Player defeated");
                commands.entity(player).insert(Defeated);
                death_events.write(DeathEvent { entity: player });
                return;
            }
        }
    }
}
