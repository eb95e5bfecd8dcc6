//! Test helpers.
//!
//! Systems are exercised on a bare `World`: `Time` is advanced by hand and
//! each system runs once through `RunSystemOnce`.

use std::time::Duration;

use bevy::ecs::message::{Message, MessageReader, Messages};
use bevy::ecs::system::{IntoSystem, RunSystemOnce};
use bevy::prelude::*;

/// Run a system once on the given world, then flush deferred commands.
/// Returns the system output.
pub fn run_system_once<T, Out, Marker>(world: &mut World, system: T) -> Out
where
    T: IntoSystem<(), Out, Marker>,
{
    let out = world.run_system_once(system).expect("system run failed");
    world.flush();
    out
}

/// A world holding a `Time` resource that has just advanced by `dt`.
pub fn world_with_time(dt: f32) -> World {
    let mut world = World::new();
    world.insert_resource(Time::<()>::default());
    advance_time(&mut world, dt);
    world
}

pub fn advance_time(world: &mut World, dt: f32) {
    world
        .resource_mut::<Time>()
        .advance_by(Duration::from_secs_f32(dt));
}

/// Register a message buffer so systems writing `M` can run.
pub fn init_messages<M: Message>(world: &mut World) {
    world.init_resource::<Messages<M>>();
}

/// Every `M` currently buffered in the world.
pub fn read_messages<M: Message + Clone>(world: &mut World) -> Vec<M> {
    run_system_once(world, |mut reader: MessageReader<M>| {
        reader.read().cloned().collect::<Vec<M>>()
    })
}

/// Queue a message as if a system had written it this frame.
pub fn write_message<M: Message>(world: &mut World, message: M) {
    world.resource_mut::<Messages<M>>().write(message);
}
