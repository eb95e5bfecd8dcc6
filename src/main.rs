mod combat;
mod content;
mod core;
#[cfg(feature = "dev-tools")]
mod debug;
mod effects;
mod movement;
mod presentation;
#[cfg(test)]
mod test_utils;
mod ui;
mod world;

use bevy::prelude::*;

fn main() {
    let mut app = App::new();
    app.insert_resource(ClearColor(Color::srgb(0.08, 0.08, 0.12)))
        .add_plugins(DefaultPlugins.set(WindowPlugin {
            primary_window: Some(Window {
                title: "Ninefold".to_string(),
                resolution: (1280, 720).into(),
                resizable: true,
                ..default()
            }),
            ..default()
        }))
        .add_plugins((
            core::CorePlugin,
            content::ContentPlugin,
            world::WorldPlugin,
            movement::MovementPlugin,
            combat::CombatPlugin,
            effects::EffectsPlugin,
            presentation::PresentationPlugin,
            ui::UiPlugin,
        ));

    #[cfg(feature = "dev-tools")]
    app.add_plugins(debug::DebugPlugin);

    app.run();
}
