//! Test helpers.
//!
//! `World::run_system_once` (via the `RunSystemOnce` trait) executes a single system without
//! building a schedule. Systems that use `Commands` only enqueue structural changes, so we call
//! `world.flush()` afterwards to apply them before assertions.

use std::time::Duration;

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

/// A generic `Time` whose last delta is exactly `dt` seconds.
pub fn time_with_delta(dt: f32) -> Time {
    let mut t = Time::<()>::default();
    t.advance_by(Duration::from_secs_f32(dt));
    t
}
