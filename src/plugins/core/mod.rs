//! Core plugin: shared resources, global settings and frame ordering.

use crate::common::{schedule, tunables::Tunables};
use bevy::prelude::*;

/// Background colour. Centre-pixel samples that hit nothing read this colour.
pub const CLEAR_COLOR: Color = Color::srgb(0.5, 0.5, 0.5);

pub fn plugin(app: &mut App) {
    // Tests may insert their own tunables before the plugins run.
    app.init_resource::<Tunables>();
    app.insert_resource(ClearColor(CLEAR_COLOR));
    schedule::configure(app);
}
