//! Movement domain: system modules for locomotion updates.

pub(crate) mod collisions;
pub(crate) mod input;
pub(crate) mod movement;

pub(crate) use collisions::resolve_player_collisions;
pub(crate) use input::{exit_on_escape, latch_input, read_input};
pub(crate) use movement::{
    apply_gravity, apply_horizontal_movement, apply_movement_input, integrate_player,
    update_movement_timers,
};
