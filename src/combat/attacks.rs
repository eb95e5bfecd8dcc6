//! Combat domain: player attack hitboxes.

use bevy::prelude::*;

use crate::combat::resources::AttackProfile;
use crate::core::Facing;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AttackKind {
    /// Horizontal light attack, part of the combo chain.
    Light,
    /// Horizontal charged attack.
    Heavy,
    Up,
    Down,
}

impl AttackKind {
    pub fn is_vertical(self) -> bool {
        matches!(self, AttackKind::Up | AttackKind::Down)
    }
}

/// How far a heavy attack was charged before release.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChargeTier {
    Partial,
    /// Charged to the cap. Amplified effects, no extra damage.
    Full,
}

/// A transient hitbox owned by the player. The rectangle is fixed at
/// creation; the attack never follows its owner.
#[derive(Debug, Clone, PartialEq)]
pub struct Attack {
    pub kind: AttackKind,
    pub hitbox: Rect,
    pub damage: i32,
    pub elapsed: f32,
    pub duration: f32,
    /// Third step of the light combo.
    pub finisher: bool,
    /// Combo step (1..=3) for light attacks, 0 otherwise.
    pub combo_step: u8,
    pub charge: Option<ChargeTier>,
}

impl Attack {
    /// Build an attack for an owner whose top-left corner is at `origin`.
    /// Damage is `base_damage * multiplier`, truncated toward zero.
    pub fn new(
        kind: AttackKind,
        profile: &AttackProfile,
        origin: Vec2,
        facing: Facing,
        base_damage: f32,
        multiplier: f32,
    ) -> Self {
        Self {
            kind,
            hitbox: profile.hitbox(origin, facing),
            damage: (base_damage * multiplier) as i32,
            elapsed: 0.0,
            duration: profile.duration,
            finisher: false,
            combo_step: 0,
            charge: None,
        }
    }

    pub fn with_combo_step(mut self, step: u8, finisher: bool) -> Self {
        self.combo_step = step;
        self.finisher = finisher;
        self
    }

    pub fn with_charge(mut self, tier: ChargeTier) -> Self {
        self.charge = Some(tier);
        self
    }

    pub fn tick(&mut self, dt: f32) {
        self.elapsed += dt;
    }

    /// Inactive from the tick on which `elapsed` reaches `duration`.
    pub fn is_active(&self) -> bool {
        self.elapsed < self.duration
    }
}
