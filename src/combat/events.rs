//! Combat domain: messages emitted by hit arbitration and the boss.

use bevy::ecs::message::Message;
use bevy::prelude::*;

use crate::combat::components::BossPhase;

#[derive(Debug, Clone)]
pub struct DamageEvent {
    pub target: Entity,
    pub amount: i32,
    /// The player was hit, as opposed to the player hitting something.
    pub to_player: bool,
}

impl Message for DamageEvent {}

/// A hostile swing or projectile was deflected by the player's parry.
#[derive(Debug, Clone)]
pub struct ParryEvent {
    pub attacker: Entity,
    pub perfect: bool,
}

impl Message for ParryEvent {}

#[derive(Debug, Clone)]
pub struct DeathEvent {
    pub entity: Entity,
}

impl Message for DeathEvent {}

#[derive(Debug, Clone)]
pub struct BossPhaseChangeEvent {
    pub boss: Entity,
    pub phase: BossPhase,
}

impl Message for BossPhaseChangeEvent {}
