//! Combat domain: tuning resources for the player, enemy archetypes and the boss.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::attacks::AttackKind;
use crate::combat::components::EnemyArchetype;
use crate::core::{Facing, rect_at};

/// Hitbox and damage profile for one attack kind.
#[derive(Debug, Clone, Deserialize)]
pub struct AttackProfile {
    pub base_damage: f32,
    pub duration: f32,
    pub width: f32,
    pub height: f32,
    /// Offset from the owner's top-left corner when facing right.
    pub offset_x: f32,
    pub offset_y: f32,
    /// Horizontal attacks mirror to the owner's left side when facing left.
    pub follows_facing: bool,
}

impl AttackProfile {
    /// Hitbox for an owner whose top-left corner is at `origin`.
    pub fn hitbox(&self, origin: Vec2, facing: Facing) -> Rect {
        let x = if self.follows_facing && facing == Facing::Left {
            origin.x - self.width
        } else {
            origin.x + self.offset_x
        };
        rect_at(
            Vec2::new(x, origin.y + self.offset_y),
            Vec2::new(self.width, self.height),
        )
    }
}

/// One step of the light-attack combo chain.
#[derive(Debug, Clone, Deserialize)]
pub struct ComboStep {
    pub damage: f32,
    /// Particle burst size for this step.
    pub particles: u32,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ComboTuning {
    /// Time after a light attack during which the next press advances the chain.
    pub window: f32,
    /// Minimum time between two light-attack presses.
    pub inter_hit_delay: f32,
    /// Steps 1..=3. The last step is the finisher.
    pub steps: Vec<ComboStep>,
}

impl Default for ComboTuning {
    fn default() -> Self {
        Self {
            window: 0.8,
            inter_hit_delay: 0.35,
            steps: vec![
                ComboStep {
                    damage: 10.0,
                    particles: 6,
                },
                ComboStep {
                    damage: 12.0,
                    particles: 10,
                },
                ComboStep {
                    damage: 20.0,
                    particles: 15,
                },
            ],
        }
    }
}

impl ComboTuning {
    /// Step for a 1-based combo count.
    pub fn step(&self, count: u8) -> Option<&ComboStep> {
        self.steps.get(usize::from(count.max(1)) - 1)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChargeTuning {
    /// Charge time at which the heavy attack is fully charged.
    pub max_time: f32,
    /// Releasing before this discards the charge.
    pub min_time: f32,
    /// Damage multiplier at minimum charge fraction.
    pub min_multiplier: f32,
    /// Damage multiplier at full charge.
    pub max_multiplier: f32,
    /// Damage factor applied to the upward launcher variant.
    pub launcher_factor: f32,
}

impl Default for ChargeTuning {
    fn default() -> Self {
        Self {
            max_time: 1.5,
            min_time: 0.3,
            min_multiplier: 1.5,
            max_multiplier: 2.5,
            launcher_factor: 0.8,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ParryTuning {
    pub duration: f32,
    pub cooldown: f32,
    /// Leading part of the parry that counts as perfect.
    pub perfect_window: f32,
}

impl Default for ParryTuning {
    fn default() -> Self {
        Self {
            duration: 0.35,
            cooldown: 0.6,
            perfect_window: 0.12,
        }
    }
}

/// One-shot damage buff for the next attack.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BuffTuning {
    pub cooldown: f32,
    pub damage_multiplier: f32,
}

impl Default for BuffTuning {
    fn default() -> Self {
        Self {
            cooldown: 3.0,
            damage_multiplier: 1.5,
        }
    }
}

/// Invulnerable dash.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct DashTuning {
    pub speed: f32,
    pub duration: f32,
    pub cooldown: f32,
    /// Decay period after the dash ends.
    pub end_lag: f32,
    /// Per-tick horizontal velocity factor during end lag.
    pub end_lag_decay: f32,
    /// Remaining dash time at or below which an attack may cancel it.
    pub cancel_window: f32,
}

impl Default for DashTuning {
    fn default() -> Self {
        Self {
            speed: 500.0,
            duration: 0.18,
            cooldown: 5.0,
            end_lag: 0.08,
            end_lag_decay: 0.9,
            cancel_window: 0.06,
        }
    }
}

/// Camera shake parameters.
#[derive(Debug, Clone, Copy, Deserialize)]
pub struct ShakeTuning {
    pub intensity: f32,
    pub duration: f32,
}

impl ShakeTuning {
    pub const fn new(intensity: f32, duration: f32) -> Self {
        Self {
            intensity,
            duration,
        }
    }
}

/// Side-effect strengths emitted by hit arbitration.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct FeedbackTuning {
    pub enemy_parry_freeze: f32,
    pub enemy_perfect_parry_freeze: f32,
    pub boss_parry_freeze: f32,
    pub boss_perfect_parry_freeze: f32,
    pub enemy_parry_shake: ShakeTuning,
    pub enemy_perfect_parry_shake: ShakeTuning,
    pub boss_parry_shake: ShakeTuning,
    pub boss_perfect_parry_shake: ShakeTuning,
    pub enemy_hit_player_shake: ShakeTuning,
    pub boss_hit_player_shake: ShakeTuning,
    pub player_hit_boss_shake: ShakeTuning,
    pub boss_phase_shake: ShakeTuning,
}

impl Default for FeedbackTuning {
    fn default() -> Self {
        Self {
            enemy_parry_freeze: 0.06,
            enemy_perfect_parry_freeze: 0.10,
            boss_parry_freeze: 0.08,
            boss_perfect_parry_freeze: 0.12,
            enemy_parry_shake: ShakeTuning::new(5.0, 0.15),
            enemy_perfect_parry_shake: ShakeTuning::new(8.0, 0.2),
            boss_parry_shake: ShakeTuning::new(8.0, 0.2),
            boss_perfect_parry_shake: ShakeTuning::new(12.0, 0.28),
            enemy_hit_player_shake: ShakeTuning::new(12.0, 0.3),
            boss_hit_player_shake: ShakeTuning::new(15.0, 0.4),
            player_hit_boss_shake: ShakeTuning::new(10.0, 0.25),
            boss_phase_shake: ShakeTuning::new(14.0, 0.5),
        }
    }
}

/// Player combat tuning.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct CombatTuning {
    pub max_health: i32,
    /// Invulnerability granted to any actor that takes damage (default: 0.5)
    pub invulnerability_time: f32,
    /// Recovery after a light or vertical light attack (default: 0.35)
    pub light_cooldown: f32,
    /// Recovery after a released heavy attack (default: 0.7)
    pub heavy_cooldown: f32,
    pub light: AttackProfile,
    pub heavy: AttackProfile,
    pub up: AttackProfile,
    pub down: AttackProfile,
    pub combo: ComboTuning,
    pub charge: ChargeTuning,
    pub parry: ParryTuning,
    pub buff: BuffTuning,
    pub dash: DashTuning,
    pub feedback: FeedbackTuning,
}

impl Default for CombatTuning {
    fn default() -> Self {
        Self {
            max_health: 100,
            invulnerability_time: 0.5,
            light_cooldown: 0.35,
            heavy_cooldown: 0.7,
            light: AttackProfile {
                base_damage: 10.0,
                duration: 0.3,
                width: 45.0,
                height: 30.0,
                offset_x: 32.0,
                offset_y: 9.0,
                follows_facing: true,
            },
            heavy: AttackProfile {
                base_damage: 20.0,
                duration: 0.5,
                width: 65.0,
                height: 35.0,
                offset_x: 32.0,
                offset_y: 7.0,
                follows_facing: true,
            },
            up: AttackProfile {
                base_damage: 12.0,
                duration: 0.35,
                width: 35.0,
                height: 50.0,
                offset_x: -1.5,
                offset_y: -50.0,
                follows_facing: false,
            },
            down: AttackProfile {
                base_damage: 15.0,
                duration: 0.4,
                width: 35.0,
                height: 50.0,
                offset_x: -1.5,
                offset_y: 48.0,
                follows_facing: false,
            },
            combo: ComboTuning::default(),
            charge: ChargeTuning::default(),
            parry: ParryTuning::default(),
            buff: BuffTuning::default(),
            dash: DashTuning::default(),
            feedback: FeedbackTuning::default(),
        }
    }
}

impl CombatTuning {
    pub fn profile(&self, kind: AttackKind) -> &AttackProfile {
        match kind {
            AttackKind::Light => &self.light,
            AttackKind::Heavy => &self.heavy,
            AttackKind::Up => &self.up,
            AttackKind::Down => &self.down,
        }
    }
}

/// Projectile fired by ranged archetypes.
#[derive(Debug, Clone, Deserialize)]
pub struct ProjectileTuning {
    pub speed: f32,
    pub width: f32,
    pub height: f32,
    pub lifetime: f32,
}

/// Stats and behavior ranges for one enemy archetype.
#[derive(Debug, Clone, Deserialize)]
pub struct ArchetypeTuning {
    pub max_health: i32,
    pub width: f32,
    pub height: f32,
    pub patrol_speed: f32,
    pub chase_speed: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub attack_cooldown: f32,
    pub attack_damage: i32,
    pub swing_width: f32,
    pub swing_height: f32,
    pub swing_offset_y: f32,
    /// How long a melee swing stays active.
    pub swing_duration: f32,
    /// Per-tick horizontal velocity factor.
    pub friction: f32,
    pub knockback_vertical: f32,
    pub knockback_horizontal: f32,
    pub knockback_immune: bool,
    /// Backs away while the player is closer than this.
    #[serde(default)]
    pub retreat_range: Option<f32>,
    /// Ranged archetypes fire projectiles instead of swinging.
    #[serde(default)]
    pub projectile: Option<ProjectileTuning>,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EnemyTuning {
    pub gravity: f32,
    pub max_fall_speed: f32,
    pub grunt: ArchetypeTuning,
    pub tank: ArchetypeTuning,
    pub ranged: ArchetypeTuning,
}

impl Default for EnemyTuning {
    fn default() -> Self {
        Self {
            gravity: 980.0,
            max_fall_speed: 800.0,
            grunt: ArchetypeTuning {
                max_health: 50,
                width: 40.0,
                height: 60.0,
                patrol_speed: 80.0,
                chase_speed: 120.0,
                detection_range: 300.0,
                attack_range: 50.0,
                attack_cooldown: 1.5,
                attack_damage: 10,
                swing_width: 45.0,
                swing_height: 40.0,
                swing_offset_y: 10.0,
                swing_duration: 0.1,
                friction: 0.95,
                knockback_vertical: 200.0,
                knockback_horizontal: 150.0,
                knockback_immune: false,
                retreat_range: None,
                projectile: None,
            },
            tank: ArchetypeTuning {
                max_health: 120,
                width: 56.0,
                height: 70.0,
                patrol_speed: 50.0,
                chase_speed: 70.0,
                detection_range: 260.0,
                attack_range: 60.0,
                attack_cooldown: 2.2,
                attack_damage: 18,
                swing_width: 60.0,
                swing_height: 50.0,
                swing_offset_y: 10.0,
                swing_duration: 0.15,
                friction: 0.9,
                knockback_vertical: 0.0,
                knockback_horizontal: 0.0,
                knockback_immune: true,
                retreat_range: None,
                projectile: None,
            },
            ranged: ArchetypeTuning {
                max_health: 35,
                width: 36.0,
                height: 56.0,
                patrol_speed: 70.0,
                chase_speed: 90.0,
                detection_range: 380.0,
                attack_range: 320.0,
                attack_cooldown: 1.8,
                attack_damage: 8,
                swing_width: 0.0,
                swing_height: 0.0,
                swing_offset_y: 0.0,
                swing_duration: 0.0,
                friction: 0.95,
                knockback_vertical: 200.0,
                knockback_horizontal: 150.0,
                knockback_immune: false,
                retreat_range: Some(120.0),
                projectile: Some(ProjectileTuning {
                    speed: 260.0,
                    width: 12.0,
                    height: 8.0,
                    lifetime: 2.0,
                }),
            },
        }
    }
}

impl EnemyTuning {
    pub fn archetype(&self, archetype: EnemyArchetype) -> &ArchetypeTuning {
        match archetype {
            EnemyArchetype::Grunt => &self.grunt,
            EnemyArchetype::Tank => &self.tank,
            EnemyArchetype::Ranged => &self.ranged,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize)]
pub struct BossPhaseTuning {
    pub speed: f32,
    pub attack_cooldown: f32,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct BossTuning {
    pub max_health: i32,
    pub width: f32,
    pub height: f32,
    pub detection_range: f32,
    pub attack_range: f32,
    pub friction: f32,
    /// Health fraction at or below which phase two begins.
    pub phase_two_threshold: f32,
    pub phase_one: BossPhaseTuning,
    pub phase_two: BossPhaseTuning,
    /// How long each swing stays active.
    pub swing_duration: f32,
    /// Damage per step of the repeating attack pattern.
    pub pattern_damage: Vec<i32>,
    pub swing_base_width: f32,
    /// Extra swing width per pattern step.
    pub swing_width_step: f32,
    pub swing_height: f32,
    pub swing_offset_y: f32,
    pub knockback_vertical: f32,
    pub knockback_horizontal: f32,
}

impl Default for BossTuning {
    fn default() -> Self {
        Self {
            max_health: 200,
            width: 60.0,
            height: 80.0,
            detection_range: 400.0,
            attack_range: 60.0,
            friction: 0.92,
            phase_two_threshold: 0.5,
            phase_one: BossPhaseTuning {
                speed: 100.0,
                attack_cooldown: 2.0,
            },
            phase_two: BossPhaseTuning {
                speed: 150.0,
                attack_cooldown: 1.2,
            },
            swing_duration: 0.5,
            pattern_damage: vec![15, 20, 25],
            swing_base_width: 70.0,
            swing_width_step: 10.0,
            swing_height: 50.0,
            swing_offset_y: 15.0,
            knockback_vertical: 150.0,
            knockback_horizontal: 100.0,
        }
    }
}
