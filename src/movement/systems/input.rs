//! Movement domain: keyboard sampling into the per-tick input snapshot, and the quit key.

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::movement::{InputLatch, PlayerInput};

fn sample_keyboard(keyboard: &ButtonInput<KeyCode>) -> PlayerInput {
    // Horizontal axis
    let mut x = 0.0;
    if keyboard.pressed(KeyCode::KeyA) || keyboard.pressed(KeyCode::ArrowLeft) {
        x -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyD) || keyboard.pressed(KeyCode::ArrowRight) {
        x += 1.0;
    }

    // Vertical axis (attack direction, pull-up)
    let mut y = 0.0;
    if keyboard.pressed(KeyCode::KeyS) || keyboard.pressed(KeyCode::ArrowDown) {
        y -= 1.0;
    }
    if keyboard.pressed(KeyCode::KeyW) || keyboard.pressed(KeyCode::ArrowUp) {
        y += 1.0;
    }

    PlayerInput {
        axis: Vec2::new(x, y),
        jump_pressed: keyboard.just_pressed(KeyCode::Space),
        light_pressed: keyboard.just_pressed(KeyCode::KeyJ),
        // Heavy attack charges while held
        heavy_pressed: keyboard.just_pressed(KeyCode::KeyK),
        heavy_released: keyboard.just_released(KeyCode::KeyK),
        parry_pressed: keyboard.just_pressed(KeyCode::KeyP),
        ability_1_pressed: keyboard.just_pressed(KeyCode::KeyQ),
        ability_2_pressed: keyboard.just_pressed(KeyCode::ShiftLeft)
            || keyboard.just_pressed(KeyCode::KeyE),
        pull_up: y > 0.0,
    }
}

/// Runs every frame, frozen or not, so an edge seen during a hit-freeze
/// survives until the next gameplay tick.
pub(crate) fn latch_input(keyboard: Res<ButtonInput<KeyCode>>, mut latch: ResMut<InputLatch>) {
    let sampled = sample_keyboard(&keyboard);
    latch.0.latch(&sampled);
}

/// Hand the latched input to this tick and start a fresh latch.
pub(crate) fn read_input(mut latch: ResMut<InputLatch>, mut input: ResMut<PlayerInput>) {
    *input = std::mem::take(&mut latch.0);
}

pub(crate) fn exit_on_escape(keyboard: Res<ButtonInput<KeyCode>>, mut exit: MessageWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Escape pressed, exiting");
        exit.write(AppExit::Success);
    }
}
