//! Lighting plugin (render-only): one warm directional light shining straight down.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::state::GameState;

#[derive(Component)]
pub struct SunLight;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), setup);
}

fn setup(mut commands: Commands) {
    commands.spawn((
        Name::new("SunLight"),
        SunLight,
        DirectionalLight {
            color: Color::srgb(1.0, 1.0, 0.95),
            ..default()
        },
        Transform::default().looking_to(Vec3::NEG_Z, Vec3::Y),
        DespawnOnExit(GameState::InGame),
    ));
}
