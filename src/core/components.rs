//! Core domain: actor state shared by the player, enemies and the boss.

use bevy::prelude::*;

use super::geometry::rect_at;

/// Kinematic body in simulation space (y-down, top-left origin).
#[derive(Component, Debug, Clone, Copy, PartialEq)]
pub struct Body {
    pub position: Vec2,
    pub velocity: Vec2,
    pub size: Vec2,
}

impl Body {
    pub fn new(position: Vec2, size: Vec2) -> Self {
        Self {
            position,
            velocity: Vec2::ZERO,
            size,
        }
    }

    pub fn bounds(&self) -> Rect {
        rect_at(self.position, self.size)
    }

    pub fn center(&self) -> Vec2 {
        self.position + self.size / 2.0
    }

    pub fn bottom(&self) -> f32 {
        self.position.y + self.size.y
    }

    /// Integrate velocity over `dt`.
    pub fn integrate(&mut self, dt: f32) {
        self.position += self.velocity * dt;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Facing {
    #[default]
    Right,
    Left,
}

impl Facing {
    pub fn sign(self) -> f32 {
        match self {
            Facing::Right => 1.0,
            Facing::Left => -1.0,
        }
    }

    pub fn from_sign(value: f32) -> Option<Self> {
        if value > 0.0 {
            Some(Facing::Right)
        } else if value < 0.0 {
            Some(Facing::Left)
        } else {
            None
        }
    }

    pub fn flipped(self) -> Self {
        match self {
            Facing::Right => Facing::Left,
            Facing::Left => Facing::Right,
        }
    }
}

/// Health component for damageable actors. Always within `0..=max`.
#[derive(Component, Debug, Clone)]
pub struct Health {
    pub current: i32,
    pub max: i32,
}

impl Health {
    pub fn new(max: i32) -> Self {
        let max = max.max(1);
        Self { current: max, max }
    }

    /// Remove up to `amount` health, returning what was actually removed.
    pub fn take_damage(&mut self, amount: i32) -> i32 {
        let actual = amount.clamp(0, self.current);
        self.current -= actual;
        actual
    }

    pub fn is_dead(&self) -> bool {
        self.current <= 0
    }

    pub fn percent(&self) -> f32 {
        self.current as f32 / self.max as f32
    }
}

/// Invulnerability window - incoming damage is ignored while the timer runs
#[derive(Component, Debug, Default, Clone)]
pub struct Invulnerable {
    pub timer: f32,
}

impl Invulnerable {
    pub fn is_invulnerable(&self) -> bool {
        self.timer > 0.0
    }

    /// Start (or extend) the window.
    pub fn grant(&mut self, duration: f32) {
        self.timer = self.timer.max(duration);
    }

    pub fn tick(&mut self, dt: f32) {
        if self.timer > 0.0 {
            self.timer -= dt;
        }
    }
}

/// Marks an actor that has died. It stays in the world but no longer acts,
/// collides with attacks or renders.
#[derive(Component, Debug)]
pub struct Defeated;

/// Apply damage to an actor. Returns the damage dealt, or `None` when the
/// target was dead or invulnerable and nothing changed.
pub fn apply_damage(
    health: &mut Health,
    invulnerable: &mut Invulnerable,
    amount: i32,
    invulnerability_time: f32,
) -> Option<i32> {
    if health.is_dead() || invulnerable.is_invulnerable() {
        return None;
    }
    let dealt = health.take_damage(amount);
    invulnerable.grant(invulnerability_time);
    Some(dealt)
}
