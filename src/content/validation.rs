//! Validation for loaded level layouts and tuning values.

use bevy::prelude::*;

use super::data::{LevelDef, TuningFile};
use crate::combat::EnemyArchetype;
use crate::core::{LevelBounds, is_degenerate, rect_at};

/// A validation error with context about what failed.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidationError {
    pub section: &'static str,
    pub item: String,
    pub field: &'static str,
    pub problem: String,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} '{}' has invalid '{}': {}",
            self.section, self.item, self.field, self.problem
        )
    }
}

/// Helper macro for pushing an error when a condition holds
macro_rules! check {
    ($errors:expr, $cond:expr, $section:expr, $item:expr, $field:expr, $($problem:tt)+) => {
        if $cond {
            $errors.push(ValidationError {
                section: $section,
                item: $item.to_string(),
                field: $field,
                problem: format!($($problem)+),
            });
        }
    };
}

fn outside(bounds: &LevelBounds, point: (f32, f32)) -> bool {
    !bounds.contains(Vec2::from(point))
}

/// Validate the level layout.
/// Returns a list of validation errors, empty if the level is usable.
pub fn validate_level(level: &LevelDef) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let bounds = &level.bounds;

    check!(
        errors,
        bounds.max_x <= bounds.min_x || bounds.max_y <= bounds.min_y,
        "Level",
        "bounds",
        "bounds",
        "empty extent {:?}",
        bounds
    );
    check!(
        errors,
        outside(bounds, level.player_spawn),
        "Level",
        "player",
        "player_spawn",
        "{:?} is outside the level",
        level.player_spawn
    );
    check!(
        errors,
        outside(bounds, level.boss_arena),
        "Level",
        "boss_arena",
        "boss_arena",
        "{:?} is outside the level",
        level.boss_arena
    );

    // Validate platforms
    for (index, platform) in level.platforms.iter().enumerate() {
        let rect = rect_at(Vec2::from(platform.position), Vec2::from(platform.size));
        check!(
            errors,
            is_degenerate(&rect),
            "Platform",
            index,
            "size",
            "degenerate size {:?}",
            platform.size
        );
        if let Some(motion) = &platform.motion {
            check!(
                errors,
                motion.direction == (0.0, 0.0),
                "Platform",
                index,
                "motion.direction",
                "zero direction"
            );
            check!(
                errors,
                motion.range < 0.0 || motion.speed < 0.0,
                "Platform",
                index,
                "motion",
                "negative range or speed"
            );
        }
    }

    // Validate enemy spawns
    for (index, enemy) in level.enemies.iter().enumerate() {
        check!(
            errors,
            outside(bounds, enemy.position),
            "Enemy",
            index,
            "position",
            "{:?} is outside the level",
            enemy.position
        );
        check!(
            errors,
            enemy.patrol_range < 0.0,
            "Enemy",
            index,
            "patrol_range",
            "negative range {}",
            enemy.patrol_range
        );
    }

    if let Some(boss) = level.boss {
        check!(
            errors,
            outside(bounds, boss),
            "Boss",
            "boss",
            "position",
            "{:?} is outside the level",
            boss
        );
    }

    errors
}

/// Validate tuning values that would break the state machines.
pub fn validate_tuning(tuning: &TuningFile) -> Vec<ValidationError> {
    let mut errors = Vec::new();
    let movement = &tuning.movement;
    let combat = &tuning.combat;

    check!(
        errors,
        movement.max_jumps == 0,
        "Tuning",
        "movement",
        "max_jumps",
        "must allow at least one jump"
    );
    check!(
        errors,
        movement.gravity <= 0.0,
        "Tuning",
        "movement",
        "gravity",
        "must be positive"
    );

    check!(
        errors,
        combat.max_health <= 0,
        "Tuning",
        "combat",
        "max_health",
        "must be positive"
    );
    check!(
        errors,
        combat.parry.perfect_window >= combat.parry.duration,
        "Tuning",
        "combat",
        "parry.perfect_window",
        "{} is not shorter than the parry ({})",
        combat.parry.perfect_window,
        combat.parry.duration
    );
    check!(
        errors,
        combat.charge.min_time >= combat.charge.max_time,
        "Tuning",
        "combat",
        "charge.min_time",
        "{} is not shorter than max_time ({})",
        combat.charge.min_time,
        combat.charge.max_time
    );
    check!(
        errors,
        combat.light_cooldown >= combat.combo.window,
        "Tuning",
        "combat",
        "light_cooldown",
        "{} leaves no room in the combo window ({})",
        combat.light_cooldown,
        combat.combo.window
    );
    check!(
        errors,
        combat.combo.steps.is_empty(),
        "Tuning",
        "combat",
        "combo.steps",
        "no combo steps"
    );

    // Validate enemy archetypes
    for archetype in [
        EnemyArchetype::Grunt,
        EnemyArchetype::Tank,
        EnemyArchetype::Ranged,
    ] {
        let stats = tuning.enemies.archetype(archetype);
        let name = format!("{:?}", archetype);
        check!(
            errors,
            stats.max_health <= 0,
            "Enemy",
            name,
            "max_health",
            "must be positive"
        );
        check!(
            errors,
            stats.attack_range > stats.detection_range,
            "Enemy",
            name,
            "attack_range",
            "exceeds detection_range"
        );
        check!(
            errors,
            stats.projectile.is_none() && (stats.swing_width <= 0.0 || stats.swing_height <= 0.0),
            "Enemy",
            name,
            "swing_width",
            "melee archetype with a degenerate swing"
        );
    }

    let boss = &tuning.boss;
    check!(
        errors,
        boss.max_health <= 0,
        "Tuning",
        "boss",
        "max_health",
        "must be positive"
    );
    check!(
        errors,
        !(0.0..1.0).contains(&boss.phase_two_threshold),
        "Tuning",
        "boss",
        "phase_two_threshold",
        "{} is not a health fraction",
        boss.phase_two_threshold
    );
    check!(
        errors,
        boss.pattern_damage.is_empty(),
        "Tuning",
        "boss",
        "pattern_damage",
        "empty attack pattern"
    );

    errors
}
