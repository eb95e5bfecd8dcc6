//! Data definitions for the RON content files.
//!
//! These structs mirror assets/data/*.ron. Every struct defaults to the
//! built-in values, so a file only needs to list what it overrides.

use bevy::prelude::*;
use serde::Deserialize;

use crate::combat::{BossTuning, CombatTuning, EnemyArchetype, EnemyTuning};
use crate::core::LevelBounds;
use crate::movement::MovementTuning;
use crate::world::{LevelGeometry, Platform, PlatformMotion};

// ============================================================================
// Tuning (tuning.ron)
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct TuningFile {
    pub movement: MovementTuning,
    pub combat: CombatTuning,
    pub enemies: EnemyTuning,
    pub boss: BossTuning,
}

// ============================================================================
// Level (level.ron)
// ============================================================================

#[derive(Debug, Clone, Deserialize)]
pub struct MotionDef {
    pub direction: (f32, f32),
    pub range: f32,
    pub speed: f32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct PlatformDef {
    /// Top-left corner, y-down.
    pub position: (f32, f32),
    pub size: (f32, f32),
    #[serde(default)]
    pub one_way: bool,
    #[serde(default)]
    pub motion: Option<MotionDef>,
}

impl PlatformDef {
    pub fn solid(x: f32, y: f32, w: f32, h: f32) -> Self {
        Self {
            position: (x, y),
            size: (w, h),
            one_way: false,
            motion: None,
        }
    }

    pub fn to_platform(&self) -> Platform {
        let position = Vec2::from(self.position);
        let size = Vec2::from(self.size);
        match &self.motion {
            Some(motion) => Platform::moving(
                size,
                PlatformMotion::new(
                    position,
                    Vec2::from(motion.direction),
                    motion.range,
                    motion.speed,
                ),
            ),
            None if self.one_way => Platform::one_way(position, size),
            None => Platform::solid(position, size),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct EnemySpawnDef {
    #[serde(default)]
    pub archetype: EnemyArchetype,
    /// Top-left corner of the enemy body.
    pub position: (f32, f32),
    pub patrol_range: f32,
}

#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LevelDef {
    pub bounds: LevelBounds,
    pub player_spawn: (f32, f32),
    /// Where the dev teleport drops the player.
    pub boss_arena: (f32, f32),
    /// Declaration order is collision order.
    pub platforms: Vec<PlatformDef>,
    /// Declaration order is hit-arbitration order.
    pub enemies: Vec<EnemySpawnDef>,
    pub boss: Option<(f32, f32)>,
}

impl Default for LevelDef {
    fn default() -> Self {
        let solid = PlatformDef::solid;
        Self {
            bounds: LevelBounds::default(),
            player_spawn: (100.0, 540.0),
            boss_arena: (2250.0, 520.0),
            platforms: vec![
                // Ground
                solid(0.0, 600.0, 2560.0, 120.0),
                // Opening staircase
                solid(200.0, 500.0, 150.0, 20.0),
                solid(400.0, 400.0, 150.0, 20.0),
                solid(600.0, 300.0, 150.0, 20.0),
                solid(800.0, 200.0, 150.0, 20.0),
                // Wall-jump shaft
                solid(950.0, 200.0, 20.0, 400.0),
                solid(1200.0, 300.0, 20.0, 300.0),
                solid(1000.0, 150.0, 300.0, 20.0),
                solid(1100.0, 250.0, 100.0, 20.0),
                // Mid section
                solid(1400.0, 450.0, 150.0, 20.0),
                solid(1550.0, 350.0, 20.0, 250.0),
                solid(1600.0, 350.0, 150.0, 20.0),
                solid(1800.0, 250.0, 150.0, 20.0),
                solid(2000.0, 200.0, 150.0, 20.0),
                solid(2200.0, 300.0, 150.0, 20.0),
                solid(2350.0, 450.0, 200.0, 20.0),
                // Ledge-grab practice
                solid(100.0, 250.0, 80.0, 20.0),
                solid(1350.0, 150.0, 80.0, 20.0),
                solid(1280.0, 200.0, 20.0, 200.0),
                PlatformDef {
                    position: (700.0, 480.0),
                    size: (120.0, 16.0),
                    one_way: true,
                    motion: None,
                },
                PlatformDef {
                    position: (1650.0, 520.0),
                    size: (100.0, 20.0),
                    one_way: false,
                    motion: Some(MotionDef {
                        direction: (1.0, 0.0),
                        range: 150.0,
                        speed: 60.0,
                    }),
                },
            ],
            enemies: vec![
                EnemySpawnDef {
                    archetype: EnemyArchetype::Grunt,
                    position: (500.0, 530.0),
                    patrol_range: 150.0,
                },
                EnemySpawnDef {
                    archetype: EnemyArchetype::Grunt,
                    position: (880.0, 530.0),
                    patrol_range: 200.0,
                },
                EnemySpawnDef {
                    archetype: EnemyArchetype::Ranged,
                    position: (1500.0, 380.0),
                    patrol_range: 120.0,
                },
                EnemySpawnDef {
                    archetype: EnemyArchetype::Tank,
                    position: (2100.0, 520.0),
                    patrol_range: 180.0,
                },
            ],
            boss: Some((2300.0, 510.0)),
        }
    }
}

impl LevelDef {
    pub fn geometry(&self) -> LevelGeometry {
        LevelGeometry::new(self.platforms.iter().map(PlatformDef::to_platform).collect())
    }
}
