//! Combat domain: enemy and boss spawning.

use bevy::prelude::*;

use crate::combat::components::{
    BossAi, EnemyAi, EnemyArchetype, Hostile, HostileKind, Knockback, Projectiles,
};
use crate::combat::resources::{ArchetypeTuning, BossTuning, EnemyTuning};
use crate::content::LevelDef;
use crate::core::{Body, Health, Invulnerable};
use crate::presentation::{AnimationState, sim_to_world};

const ACTOR_Z: f32 = 5.0;

pub fn archetype_color(archetype: EnemyArchetype) -> Color {
    match archetype {
        EnemyArchetype::Grunt => Color::srgb(0.78, 0.2, 0.2),
        EnemyArchetype::Tank => Color::srgb(0.55, 0.35, 0.2),
        EnemyArchetype::Ranged => Color::srgb(0.6, 0.3, 0.75),
    }
}

pub const BOSS_COLOR: Color = Color::srgb(0.55, 0.08, 0.08);

/// Everything an enemy needs
#[derive(Bundle)]
pub struct EnemyBundle {
    pub hostile: Hostile,
    pub ai: EnemyAi,
    pub body: Body,
    pub health: Health,
    pub invulnerable: Invulnerable,
    pub knockback: Knockback,
    pub projectiles: Projectiles,
    pub animation: AnimationState,
    pub sprite: Sprite,
    pub transform: Transform,
}

impl EnemyBundle {
    pub fn new(
        archetype: EnemyArchetype,
        position: Vec2,
        patrol_range: f32,
        spawn_index: usize,
        tuning: &ArchetypeTuning,
    ) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        let body = Body::new(position, size);
        Self {
            hostile: Hostile::new(HostileKind::Enemy(archetype), spawn_index),
            ai: EnemyAi::new(archetype, position.x, patrol_range),
            body,
            health: Health::new(tuning.max_health),
            invulnerable: Invulnerable::default(),
            knockback: Knockback {
                vertical: tuning.knockback_vertical,
                horizontal: tuning.knockback_horizontal,
                immune: tuning.knockback_immune,
            },
            projectiles: Projectiles::default(),
            animation: AnimationState::default(),
            sprite: Sprite {
                color: archetype_color(archetype),
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(sim_to_world(body.center(), ACTOR_Z)),
        }
    }
}

#[derive(Bundle)]
pub struct BossBundle {
    pub hostile: Hostile,
    pub ai: BossAi,
    pub body: Body,
    pub health: Health,
    pub invulnerable: Invulnerable,
    pub knockback: Knockback,
    pub animation: AnimationState,
    pub sprite: Sprite,
    pub transform: Transform,
}

impl BossBundle {
    pub fn new(position: Vec2, spawn_index: usize, tuning: &BossTuning) -> Self {
        let size = Vec2::new(tuning.width, tuning.height);
        let body = Body::new(position, size);
        Self {
            hostile: Hostile::new(HostileKind::Boss, spawn_index),
            ai: BossAi::default(),
            body,
            health: Health::new(tuning.max_health),
            invulnerable: Invulnerable::default(),
            knockback: Knockback {
                vertical: tuning.knockback_vertical,
                horizontal: tuning.knockback_horizontal,
                immune: false,
            },
            animation: AnimationState::default(),
            sprite: Sprite {
                color: BOSS_COLOR,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(sim_to_world(body.center(), ACTOR_Z)),
        }
    }
}

/// Spawn every enemy in the level, then the boss. Spawn index follows
/// declaration order.
pub(crate) fn spawn_hostiles(
    mut commands: Commands,
    level: Res<LevelDef>,
    enemy_tuning: Res<EnemyTuning>,
    boss_tuning: Res<BossTuning>,
) {
    for (index, spawn) in level.enemies.iter().enumerate() {
        let position = Vec2::from(spawn.position);
        commands.spawn(EnemyBundle::new(
            spawn.archetype,
            position,
            spawn.patrol_range,
            index,
            enemy_tuning.archetype(spawn.archetype),
        ));
        info!("Spawned {:?} at {:?}", spawn.archetype, position);
    }

    if let Some(position) = level.boss {
        let position = Vec2::from(position);
        commands.spawn(BossBundle::new(position, level.enemies.len(), &boss_tuning));
        info!("Spawned boss at {:?}", position);
    }
}
