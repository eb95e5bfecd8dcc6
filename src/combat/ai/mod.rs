//! Combat domain: AI system modules for enemies and the boss, plus the
//! physics step they share.

pub(crate) mod boss;
pub(crate) mod enemy;

use bevy::prelude::*;

use crate::combat::components::{Hostile, Projectiles};
use crate::combat::resources::EnemyTuning;
use crate::core::{Body, Defeated, LevelBounds};
use crate::movement::Player;
use crate::world::{LevelGeometry, resolve_platform_collisions};

pub(crate) use boss::update_boss_ai;
pub(crate) use enemy::update_enemy_ai;
pub use boss::think_boss;
pub use enemy::{EnemyAttack, think};

/// Gravity, integration and platform collision for every hostile, then
/// age their swings and projectiles.
pub(crate) fn move_hostiles(
    time: Res<Time>,
    tuning: Res<EnemyTuning>,
    level: Res<LevelGeometry>,
    bounds: Res<LevelBounds>,
    mut query: Query<
        (&mut Body, &mut Hostile, Option<&mut Projectiles>),
        (Without<Player>, Without<Defeated>),
    >,
) {
    let dt = time.delta_secs();

    for (mut body, mut hostile, projectiles) in &mut query {
        body.velocity.y = (body.velocity.y + tuning.gravity * dt).min(tuning.max_fall_speed);
        body.integrate(dt);

        let resolution = resolve_platform_collisions(&body, &level.platforms);
        body.position = resolution.position;
        body.velocity = resolution.velocity;
        body.position.x = bounds.clamp_x(body.position.x, body.size.x);

        if let Some(swing) = hostile.swing.as_mut() {
            swing.tick(dt);
        }
        if hostile.swing.as_ref().is_some_and(|swing| !swing.is_active()) {
            hostile.swing = None;
        }

        if let Some(mut projectiles) = projectiles {
            for projectile in projectiles.0.iter_mut() {
                projectile.tick(dt);
            }
            projectiles.0.retain(|projectile| {
                projectile.is_alive() && bounds.contains(projectile.bounds().center())
            });
        }
    }
}
