//! Integration test harness.
//!
//! Keep integration tests headless:
//! - `TaskPoolPlugin` + `StatesPlugin` provide the ECS runtime and state transitions.
//! - no `TimePlugin`: each tick inserts a `Time` with an exact delta, so timing is reproducible.
//! - we then call `color_shooter::game::configure_headless` to install gameplay plugins.

#![allow(dead_code)]

use std::time::Duration;

use bevy::app::TaskPoolPlugin;
use bevy::input::ButtonState;
use bevy::input::keyboard::{Key, KeyboardInput, NativeKey};
use bevy::prelude::*;
use bevy::state::app::StatesPlugin;

use color_shooter::common::tunables::Tunables;
use color_shooter::plugins::enemies::{Enemy, EnemySlots, EnemyType, SlotIndex, Waypoints};

pub fn app_headless() -> App {
    app_headless_with(Tunables { spawn_seed: Some(7), ..default() })
}

/// Headless app with custom tunables. They must be in place before the plugins build.
pub fn app_headless_with(tunables: Tunables) -> App {
    let mut app = App::new();
    app.add_plugins((TaskPoolPlugin::default(), StatesPlugin));
    app.insert_resource(tunables);
    app.insert_resource(Time::<()>::default());

    color_shooter::game::configure_headless(&mut app);
    app
}

/// Run one frame that lasts exactly `dt` seconds.
pub fn step(app: &mut App, dt: f32) {
    let mut time = Time::<()>::default();
    time.advance_by(Duration::from_secs_f32(dt));
    app.insert_resource(time);
    app.update();
}

pub fn press(app: &mut App, key_code: KeyCode) {
    app.world_mut().write_message(KeyboardInput {
        key_code,
        logical_key: Key::Unidentified(NativeKey::Unidentified),
        state: ButtonState::Pressed,
        text: None,
        repeat: false,
        window: Entity::PLACEHOLDER,
    });
}

/// Put a stationary enemy into the pool, bypassing the spawn timer.
pub fn place_enemy(app: &mut App, kind: EnemyType, pos: Vec3) -> (SlotIndex, Entity) {
    app.world_mut().resource_scope(|world, mut slots: Mut<EnemySlots>| {
        let mut spawned = Entity::PLACEHOLDER;
        let slot = slots
            .allocate(|slot| {
                spawned = world
                    .spawn((Enemy { kind, slot }, Waypoints::new(pos), Transform::from_translation(pos)))
                    .id();
                spawned
            })
            .expect("pool full");
        (slot, spawned)
    })
}

pub fn enemy_count(app: &mut App) -> usize {
    let world = app.world_mut();
    let mut q = world.query::<&Enemy>();
    q.iter(world).count()
}
