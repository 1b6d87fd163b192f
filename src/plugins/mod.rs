//! Feature plugins.

use bevy::prelude::*;

use crate::plugins::shooting::ShootingPlugin;

pub mod core;
pub mod enemies;
pub mod input;
pub mod player;
pub mod shooting;

// Render-only
pub mod audio;
pub mod camera;
pub mod lighting;
pub mod readback;
pub mod ui;
pub mod visuals;
pub mod world;

/// Register gameplay plugins that work in headless tests.
pub fn register_gameplay(app: &mut App) {
    // Core first: enemies reads `Tunables` while building.
    core::plugin(app);
    input::plugin(app);
    player::plugin(app);
    enemies::plugin(app);
    app.add_plugins(ShootingPlugin);
}

/// Register render-only plugins (requires DefaultPlugins / render infra).
pub fn register_render(app: &mut App) {
    world::plugin(app);
    lighting::plugin(app);
    camera::plugin(app);
    visuals::plugin(app);
    readback::plugin(app);
    audio::plugin(app);
    ui::plugin(app);
}
