//! Combat domain: player attacks and abilities, enemy and boss AI, and hit
//! arbitration.

pub mod ai;
pub(crate) mod arbitration;
pub mod attacks;
pub mod components;
pub mod events;
pub mod resources;
pub mod spawn;
mod systems;

#[cfg(test)]
mod tests;

use bevy::prelude::*;

use crate::core::{GameplaySet, PlayerStep};

pub use attacks::{Attack, AttackKind, ChargeTier};
pub use components::{
    ActiveAttacks, AiState, AttackContext, BossAi, BossPhase, EnemyAi, EnemyArchetype, Hostile,
    HostileKind, Knockback, MAX_COMBO, PlayerAction, PlayerCombat, Swing,
};
pub use events::{BossPhaseChangeEvent, DamageEvent, DeathEvent, ParryEvent};
pub use resources::{BossTuning, CombatTuning, EnemyTuning};

pub struct CombatPlugin;

impl Plugin for CombatPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CombatTuning>()
            .init_resource::<EnemyTuning>()
            .init_resource::<BossTuning>()
            .add_message::<DamageEvent>()
            .add_message::<ParryEvent>()
            .add_message::<DeathEvent>()
            .add_message::<BossPhaseChangeEvent>()
            .add_systems(Startup, spawn::spawn_hostiles)
            .add_systems(
                Update,
                systems::process_player_combat.in_set(PlayerStep::Actions),
            )
            .add_systems(
                Update,
                (ai::update_enemy_ai, ai::update_boss_ai, ai::move_hostiles)
                    .chain()
                    .in_set(GameplaySet::Ai),
            )
            .add_systems(
                Update,
                (
                    arbitration::resolve_player_attacks,
                    arbitration::resolve_hostile_attacks,
                )
                    .chain()
                    .in_set(GameplaySet::Combat),
            );
    }
}
