//! Content domain: tuning and level layout loaded from assets/data/*.ron.

pub mod data;
pub mod loader;
pub mod validation;


use bevy::prelude::*;
use std::path::Path;

pub use data::{EnemySpawnDef, LevelDef, PlatformDef, TuningFile};
pub use loader::{LoadedContent, load_all_content};
pub use validation::{ValidationError, validate_level, validate_tuning};

pub const DATA_DIR: &str = "assets/data";

pub struct ContentPlugin;

impl Plugin for ContentPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<LevelDef>()
            .add_systems(PreStartup, load_content);
    }
}

/// Load content, log problems and install the resources every other domain
/// reads at startup.
fn load_content(mut commands: Commands) {
    let LoadedContent {
        tuning,
        level,
        errors,
    } = load_all_content(Path::new(DATA_DIR));

    for error in &errors {
        warn!("{}; using built-in defaults", error);
    }
    for problem in validate_tuning(&tuning)
        .into_iter()
        .chain(validate_level(&level))
    {
        warn!("Content validation: {}", problem);
    }

    info!(
        "Loaded level: {} platforms, {} enemies, boss: {}",
        level.platforms.len(),
        level.enemies.len(),
        level.boss.is_some()
    );

    let TuningFile {
        movement,
        combat,
        enemies,
        boss,
    } = tuning;
    commands.insert_resource(movement);
    commands.insert_resource(combat);
    commands.insert_resource(enemies);
    commands.insert_resource(boss);
    commands.insert_resource(level.bounds);
    commands.insert_resource(level.geometry());
    commands.insert_resource(level);
}
