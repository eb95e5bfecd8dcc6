//! Combat domain: player action state, enemy and boss state, and hitboxes.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::attacks::{Attack, AttackKind, ChargeTier};
use crate::combat::resources::CombatTuning;
use crate::core::{Body, Facing, rect_at};
use crate::movement::VerticalInput;

/// Exclusive player action. Parrying, charging and dashing can never
/// overlap.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum PlayerAction {
    #[default]
    Idle,
    /// Recovering from an attack; no new attack or parry until it ends.
    Attacking { kind: AttackKind, recovery: f32 },
    ChargingHeavy { elapsed: f32 },
    Parrying { elapsed: f32, remaining: f32 },
    Dashing { remaining: f32 },
}

/// Light-attack combo bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ComboState {
    /// 0 when no combo is running, otherwise the last step thrown (1..=3).
    pub count: u8,
    /// Time left for the next press to advance the chain.
    pub timer: f32,
    /// Presses are ignored while this is positive.
    pub inter_hit_delay: f32,
}

pub const MAX_COMBO: u8 = 3;

/// Everything an attack press needs to know about the player.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AttackContext {
    /// Top-left corner of the player body.
    pub origin: Vec2,
    pub facing: Facing,
    pub vertical: VerticalInput,
    pub airborne: bool,
}

impl AttackContext {
    /// Vertical override: up always, down only in the air.
    fn vertical_kind(&self) -> Option<AttackKind> {
        match self.vertical {
            VerticalInput::Up => Some(AttackKind::Up),
            VerticalInput::Down if self.airborne => Some(AttackKind::Down),
            _ => None,
        }
    }
}

#[derive(Component, Debug, Clone, Default)]
pub struct PlayerCombat {
    pub action: PlayerAction,
    pub combo: ComboState,
    pub parry_cooldown: f32,
    /// Damage buff waiting for the next attack.
    pub buff_active: bool,
    pub buff_cooldown: f32,
    pub dash_cooldown: f32,
    /// Velocity decay period after a dash.
    pub dash_end_lag: f32,
}

impl PlayerCombat {
    pub fn is_parrying(&self) -> bool {
        matches!(self.action, PlayerAction::Parrying { .. })
    }

    pub fn is_perfect_parry(&self, tuning: &CombatTuning) -> bool {
        match self.action {
            PlayerAction::Parrying { elapsed, .. } => elapsed <= tuning.parry.perfect_window,
            _ => false,
        }
    }

    pub fn is_charging(&self) -> bool {
        matches!(self.action, PlayerAction::ChargingHeavy { .. })
    }

    /// Accumulated heavy charge, zero when not charging.
    pub fn charge_time(&self) -> f32 {
        match self.action {
            PlayerAction::ChargingHeavy { elapsed } => elapsed,
            _ => 0.0,
        }
    }

    pub fn is_dashing(&self) -> bool {
        matches!(self.action, PlayerAction::Dashing { .. })
    }

    pub fn is_attacking(&self) -> bool {
        matches!(self.action, PlayerAction::Attacking { .. })
    }

    /// Whether an attack may start now. A dash inside its cancel window is
    /// cancelled with no end lag.
    fn take_attack_slot(&mut self, tuning: &CombatTuning) -> bool {
        match self.action {
            PlayerAction::Idle => true,
            PlayerAction::Dashing { remaining } if remaining <= tuning.dash.cancel_window => {
                self.action = PlayerAction::Idle;
                self.dash_end_lag = 0.0;
                true
            }
            _ => false,
        }
    }

    fn consume_buff(&mut self, tuning: &CombatTuning) -> f32 {
        if self.buff_active {
            self.buff_active = false;
            tuning.buff.damage_multiplier
        } else {
            1.0
        }
    }

    /// Light attack press. Advances the combo, or throws a vertical attack
    /// (which resets it) when up, or down in the air, is held.
    pub fn press_light(&mut self, ctx: &AttackContext, tuning: &CombatTuning) -> Option<Attack> {
        if self.combo.inter_hit_delay > 0.0 || !self.take_attack_slot(tuning) {
            return None;
        }

        self.combo.count = if self.combo.timer > 0.0 && self.combo.count < MAX_COMBO {
            self.combo.count + 1
        } else {
            1
        };
        self.combo.timer = tuning.combo.window;
        self.combo.inter_hit_delay = tuning.combo.inter_hit_delay;

        let attack = match ctx.vertical_kind() {
            Some(kind) => {
                self.combo.count = 0;
                let profile = tuning.profile(kind);
                let multiplier = self.consume_buff(tuning);
                Attack::new(kind, profile, ctx.origin, ctx.facing, profile.base_damage, multiplier)
            }
            None => {
                let step = self.combo.count;
                let finisher = step == MAX_COMBO;
                if finisher {
                    self.combo.timer = 0.0;
                }
                let base_damage = tuning
                    .combo
                    .step(step)
                    .map_or(tuning.light.base_damage, |s| s.damage);
                let multiplier = self.consume_buff(tuning);
                Attack::new(
                    AttackKind::Light,
                    &tuning.light,
                    ctx.origin,
                    ctx.facing,
                    base_damage,
                    multiplier,
                )
                .with_combo_step(step, finisher)
            }
        };

        self.action = PlayerAction::Attacking {
            kind: attack.kind,
            recovery: tuning.light_cooldown,
        };
        Some(attack)
    }

    /// Start charging a heavy attack.
    pub fn press_heavy(&mut self, tuning: &CombatTuning) -> bool {
        if !self.take_attack_slot(tuning) {
            return false;
        }
        self.action = PlayerAction::ChargingHeavy { elapsed: 0.0 };
        true
    }

    /// Release a charging heavy attack. Below the minimum charge the
    /// charge is discarded and nothing is thrown.
    pub fn release_heavy(&mut self, ctx: &AttackContext, tuning: &CombatTuning) -> Option<Attack> {
        let PlayerAction::ChargingHeavy { elapsed } = self.action else {
            return None;
        };
        self.action = PlayerAction::Idle;

        let charge = &tuning.charge;
        if elapsed < charge.min_time {
            return None;
        }

        let fraction = (elapsed / charge.max_time).min(1.0);
        let mut multiplier =
            charge.min_multiplier + fraction * (charge.max_multiplier - charge.min_multiplier);
        let kind = match ctx.vertical_kind() {
            Some(AttackKind::Up) => {
                multiplier *= charge.launcher_factor;
                AttackKind::Up
            }
            Some(kind) => kind,
            None => AttackKind::Heavy,
        };
        multiplier *= self.consume_buff(tuning);

        let tier = if fraction >= 1.0 {
            ChargeTier::Full
        } else {
            ChargeTier::Partial
        };
        let profile = tuning.profile(kind);
        let attack = Attack::new(kind, profile, ctx.origin, ctx.facing, profile.base_damage, multiplier)
            .with_charge(tier);

        self.action = PlayerAction::Attacking {
            kind,
            recovery: tuning.heavy_cooldown,
        };
        Some(attack)
    }

    /// Only from idle and off cooldown.
    pub fn press_parry(&mut self, tuning: &CombatTuning) -> bool {
        if self.action != PlayerAction::Idle || self.parry_cooldown > 0.0 {
            return false;
        }
        self.action = PlayerAction::Parrying {
            elapsed: 0.0,
            remaining: tuning.parry.duration,
        };
        true
    }

    pub fn activate_buff(&mut self, tuning: &CombatTuning) -> bool {
        if self.buff_active || self.buff_cooldown > 0.0 {
            return false;
        }
        self.buff_active = true;
        self.buff_cooldown = tuning.buff.cooldown;
        true
    }

    /// Start a dash. The caller grants invulnerability for its duration.
    pub fn activate_dash(&mut self, tuning: &CombatTuning) -> bool {
        if self.action != PlayerAction::Idle || self.dash_cooldown > 0.0 {
            return false;
        }
        self.action = PlayerAction::Dashing {
            remaining: tuning.dash.duration,
        };
        self.dash_cooldown = tuning.dash.cooldown;
        self.dash_end_lag = 0.0;
        true
    }

    /// Count down the action and every cooldown.
    pub fn tick(&mut self, dt: f32, tuning: &CombatTuning) {
        // Cooldowns first, so one started by this tick's transition runs in full.
        if self.parry_cooldown > 0.0 {
            self.parry_cooldown -= dt;
        }
        if self.buff_cooldown > 0.0 {
            self.buff_cooldown -= dt;
        }
        if self.dash_cooldown > 0.0 {
            self.dash_cooldown -= dt;
        }

        self.action = match self.action {
            PlayerAction::Attacking { kind, recovery } => {
                let recovery = recovery - dt;
                if recovery <= 0.0 {
                    PlayerAction::Idle
                } else {
                    PlayerAction::Attacking { kind, recovery }
                }
            }
            PlayerAction::ChargingHeavy { elapsed } => PlayerAction::ChargingHeavy {
                elapsed: (elapsed + dt).min(tuning.charge.max_time),
            },
            PlayerAction::Parrying { elapsed, remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.parry_cooldown = tuning.parry.cooldown;
                    PlayerAction::Idle
                } else {
                    PlayerAction::Parrying {
                        elapsed: elapsed + dt,
                        remaining,
                    }
                }
            }
            PlayerAction::Dashing { remaining } => {
                let remaining = remaining - dt;
                if remaining <= 0.0 {
                    self.dash_end_lag = tuning.dash.end_lag;
                    PlayerAction::Idle
                } else {
                    PlayerAction::Dashing { remaining }
                }
            }
            PlayerAction::Idle => PlayerAction::Idle,
        };

        if self.combo.timer > 0.0 {
            self.combo.timer -= dt;
        }
        if self.combo.timer <= 0.0 {
            self.combo.count = 0;
        }
        if self.combo.inter_hit_delay > 0.0 {
            self.combo.inter_hit_delay -= dt;
        }
    }

    /// Count down dash end lag. True while the decay applies.
    pub fn tick_end_lag(&mut self, dt: f32) -> bool {
        if self.dash_end_lag > 0.0 {
            self.dash_end_lag -= dt;
            return true;
        }
        false
    }
}

/// Attacks owned by the player. Inactive ones are purged every tick.
#[derive(Component, Debug, Default)]
pub struct ActiveAttacks(pub Vec<Attack>);

impl ActiveAttacks {
    pub fn tick(&mut self, dt: f32) {
        for attack in &mut self.0 {
            attack.tick(dt);
        }
        self.0.retain(Attack::is_active);
    }

    pub fn active(&self) -> impl Iterator<Item = &Attack> {
        self.0.iter().filter(|attack| attack.is_active())
    }
}

/// Impulse applied to a damaged actor.
#[derive(Component, Debug, Clone, Copy)]
pub struct Knockback {
    /// Upward launch speed.
    pub vertical: f32,
    /// Push speed, applied against the actor's heading.
    pub horizontal: f32,
    pub immune: bool,
}

impl Knockback {
    pub fn apply(&self, body: &mut Body, heading: Facing) {
        if self.immune {
            return;
        }
        body.velocity.y = -self.vertical;
        body.velocity.x = -self.horizontal * heading.sign();
    }
}

/// A melee hitbox thrown by an enemy or the boss.
#[derive(Debug, Clone, PartialEq)]
pub struct Swing {
    pub hitbox: Rect,
    pub damage: i32,
    pub remaining: f32,
    /// Deflected by a parry; can no longer hit.
    pub parried: bool,
}

impl Swing {
    /// Hitbox of `size` beside `body` on the `facing` side, `offset_y` below its top.
    pub fn beside(body: &Body, facing: Facing, size: Vec2, offset_y: f32, damage: i32, duration: f32) -> Self {
        let x = match facing {
            Facing::Right => body.position.x + body.size.x,
            Facing::Left => body.position.x - size.x,
        };
        Self {
            hitbox: rect_at(Vec2::new(x, body.position.y + offset_y), size),
            damage,
            remaining: duration,
            parried: false,
        }
    }

    pub fn tick(&mut self, dt: f32) {
        if self.remaining > 0.0 {
            self.remaining -= dt;
        }
    }

    pub fn is_active(&self) -> bool {
        self.remaining > 0.0 && !self.parried
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct Projectile {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
    pub damage: i32,
    pub lifetime: f32,
    pub parried: bool,
}

impl Projectile {
    pub fn bounds(&self) -> Rect {
        rect_at(self.position, self.size)
    }

    pub fn tick(&mut self, dt: f32) {
        self.position += self.velocity * dt;
        self.lifetime -= dt;
    }

    pub fn is_alive(&self) -> bool {
        self.lifetime > 0.0 && !self.parried
    }
}

/// Projectiles in flight, owned by the ranged enemy that fired them.
#[derive(Component, Debug, Default)]
pub struct Projectiles(pub Vec<Projectile>);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Default)]
pub enum EnemyArchetype {
    #[default]
    Grunt,
    Tank,
    Ranged,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostileKind {
    Enemy(EnemyArchetype),
    Boss,
}

/// Shared state for anything that fights the player.
#[derive(Component, Debug)]
pub struct Hostile {
    pub kind: HostileKind,
    pub heading: Facing,
    pub swing: Option<Swing>,
    /// Level declaration order; arbitration iterates by this.
    pub spawn_index: usize,
}

impl Hostile {
    pub fn new(kind: HostileKind, spawn_index: usize) -> Self {
        Self {
            kind,
            heading: Facing::Right,
            swing: None,
            spawn_index,
        }
    }

    pub fn is_boss(&self) -> bool {
        self.kind == HostileKind::Boss
    }

    pub fn active_swing(&self) -> Option<&Swing> {
        self.swing.as_ref().filter(|swing| swing.is_active())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AiState {
    #[default]
    Patrol,
    Chase,
    Attack,
    Retreat,
}

#[derive(Component, Debug, Clone)]
pub struct EnemyAi {
    pub archetype: EnemyArchetype,
    pub state: AiState,
    pub patrol_origin: f32,
    pub patrol_range: f32,
    pub attack_timer: f32,
}

impl EnemyAi {
    pub fn new(archetype: EnemyArchetype, patrol_origin: f32, patrol_range: f32) -> Self {
        Self {
            archetype,
            state: AiState::Patrol,
            patrol_origin,
            patrol_range,
            attack_timer: 0.0,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum BossPhase {
    #[default]
    Phase1,
    Phase2,
}

#[derive(Component, Debug, Clone, Default)]
pub struct BossAi {
    pub phase: BossPhase,
    /// Index into the damage pattern of the last attack.
    pub pattern: usize,
    pub attack_timer: f32,
}
