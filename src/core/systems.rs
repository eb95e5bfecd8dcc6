//! Core domain: frame-level systems.

use bevy::prelude::*;

use super::{HitFreeze, Invulnerable};

pub(crate) fn tick_hit_freeze(time: Res<Time>, mut freeze: ResMut<HitFreeze>) {
    freeze.tick(time.delta_secs());
}

pub(crate) fn tick_invulnerability(time: Res<Time>, mut query: Query<&mut Invulnerable>) {
    let dt = time.delta_secs();
    for mut invulnerable in &mut query {
        invulnerable.tick(dt);
    }
}
