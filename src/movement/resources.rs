//! Movement domain: tuning and input resources.

use bevy::prelude::*;
use serde::Deserialize;

/// Player locomotion tuning. Units are pixels and seconds, y-down.
#[derive(Resource, Debug, Clone, Deserialize)]
#[serde(default)]
pub struct MovementTuning {
    pub max_speed: f32,
    pub accel: f32,
    pub decel: f32,
    /// Upward launch speed of a jump.
    pub jump_velocity: f32,
    pub gravity: f32,
    pub max_fall_speed: f32,
    /// Total jumps before touching ground again (2 = double jump).
    pub max_jumps: u8,
    pub coyote_time: f32,
    pub jump_buffer_time: f32,
    /// Fall speed cap while attached to a wall.
    pub wall_slide_speed: f32,
    pub wall_jump_horizontal: f32,
    pub wall_jump_vertical: f32,
    /// Grace window for wall-jumping after leaving a wall.
    pub wall_stick_time: f32,
    pub ledge_grab_cooldown: f32,
    /// How long a head-bump ledge stays grabbable.
    pub ledge_memory_time: f32,
    pub pull_up_duration: f32,
    pub pull_up_height: f32,
    pub width: f32,
    pub height: f32,
}

impl Default for MovementTuning {
    fn default() -> Self {
        Self {
            max_speed: 200.0,
            accel: 800.0,
            decel: 1200.0,
            jump_velocity: 400.0,
            gravity: 980.0,
            max_fall_speed: 800.0,
            max_jumps: 2,
            coyote_time: 0.13,
            jump_buffer_time: 0.08,
            wall_slide_speed: 60.0,
            wall_jump_horizontal: 350.0,
            wall_jump_vertical: 380.0,
            wall_stick_time: 0.15,
            ledge_grab_cooldown: 0.2,
            ledge_memory_time: 0.2,
            pull_up_duration: 0.3,
            pull_up_height: 60.0,
            width: 32.0,
            height: 48.0,
        }
    }
}

impl MovementTuning {
    pub fn player_size(&self) -> Vec2 {
        Vec2::new(self.width, self.height)
    }

    /// Apex height of a single jump: h = v^2 / (2g)
    pub fn single_jump_height(&self) -> f32 {
        self.jump_velocity * self.jump_velocity / (2.0 * self.gravity)
    }
}

/// Vertical direction held at the moment of an attack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum VerticalInput {
    #[default]
    Neutral,
    Up,
    Down,
}

/// Input snapshot, sampled once per tick before the player update.
#[derive(Resource, Debug, Default, Clone)]
pub struct PlayerInput {
    /// x: -1 left .. 1 right, y: 1 up .. -1 down.
    pub axis: Vec2,
    pub jump_pressed: bool,
    pub light_pressed: bool,
    pub heavy_pressed: bool,
    pub heavy_released: bool,
    pub parry_pressed: bool,
    /// Damage buff.
    pub ability_1_pressed: bool,
    /// Dash.
    pub ability_2_pressed: bool,
    pub pull_up: bool,
}

impl PlayerInput {
    /// Fold a newer sample in. Button edges accumulate; held state follows
    /// `latest`.
    pub fn latch(&mut self, latest: &PlayerInput) {
        self.axis = latest.axis;
        self.pull_up = latest.pull_up;
        self.jump_pressed |= latest.jump_pressed;
        self.light_pressed |= latest.light_pressed;
        self.heavy_pressed |= latest.heavy_pressed;
        self.heavy_released |= latest.heavy_released;
        self.parry_pressed |= latest.parry_pressed;
        self.ability_1_pressed |= latest.ability_1_pressed;
        self.ability_2_pressed |= latest.ability_2_pressed;
    }

    pub fn vertical(&self) -> VerticalInput {
        if self.axis.y > 0.0 {
            VerticalInput::Up
        } else if self.axis.y < 0.0 {
            VerticalInput::Down
        } else {
            VerticalInput::Neutral
        }
    }
}

/// Input gathered since the last gameplay tick.
#[derive(Resource, Debug, Default, Clone)]
pub struct InputLatch(pub PlayerInput);
