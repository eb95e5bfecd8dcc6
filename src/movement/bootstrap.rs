//! Movement domain: player bootstrap from the loaded level and tuning.

use bevy::prelude::*;

use crate::combat::{ActiveAttacks, CombatTuning, PlayerCombat};
use crate::content::LevelDef;
use crate::core::{Body, Health, Invulnerable};
use crate::movement::{MovementState, MovementTuning, Player};
use crate::presentation::{AnimationState, PLAYER_COLOR, sim_to_world};

const PLAYER_Z: f32 = 10.0;

/// Everything the player needs
#[derive(Bundle)]
pub struct PlayerBundle {
    pub player: Player,
    pub body: Body,
    pub movement: MovementState,
    pub combat: PlayerCombat,
    pub attacks: ActiveAttacks,
    pub health: Health,
    pub invulnerable: Invulnerable,
    pub animation: AnimationState,
    pub sprite: Sprite,
    pub transform: Transform,
}

impl PlayerBundle {
    pub fn new(position: Vec2, tuning: &MovementTuning, combat: &CombatTuning) -> Self {
        let size = tuning.player_size();
        let body = Body::new(position, size);
        Self {
            player: Player,
            body,
            movement: MovementState::default(),
            combat: PlayerCombat::default(),
            attacks: ActiveAttacks::default(),
            health: Health::new(combat.max_health),
            invulnerable: Invulnerable::default(),
            animation: AnimationState::default(),
            sprite: Sprite {
                color: PLAYER_COLOR,
                custom_size: Some(size),
                ..default()
            },
            transform: Transform::from_translation(sim_to_world(body.center(), PLAYER_Z)),
        }
    }
}

/// Spawn the player at the level's spawn point. Runs once at startup, after
/// content has been loaded.
pub(crate) fn spawn_player(
    mut commands: Commands,
    level: Res<LevelDef>,
    tuning: Res<MovementTuning>,
    combat: Res<CombatTuning>,
    existing_player: Query<Entity, With<Player>>,
) {
    // Don't spawn if player already exists
    if !existing_player.is_empty() {
        info!("Player already exists, skipping spawn");
        return;
    }

    let position = Vec2::from(level.player_spawn);
    commands.spawn(PlayerBundle::new(position, &tuning, &combat));
    info!(
        "Spawning player at {:?}: health={}, max_jumps={}",
        position, combat.max_health, tuning.max_jumps
    );
}
