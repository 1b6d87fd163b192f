//! HUD plugin (render-only): control help line and a centre crosshair.
//!
//! The HUD targets the main camera only, so the centre readback never sees the crosshair.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use bevy::ui::UiTargetCamera;

use crate::common::state::GameState;
use crate::plugins::camera::MainCamera;

pub const HELP_TEXT: &str =
    "Mouse motion rotates camera; WASD moves; 1/2/3 fire red/green/yellow; escape ungrabs mouse";

const HELP_FONT_SIZE: f32 = 16.0;
const CROSSHAIR_PX: f32 = 6.0;

#[derive(Component)]
pub struct HelpLine;

#[derive(Component)]
pub struct Crosshair;

pub fn plugin(app: &mut App) {
    app.add_systems(Update, spawn_hud);
}

pub fn spawn_hud(mut commands: Commands, q_new: Query<Entity, Added<MainCamera>>) {
    for camera in &q_new {
        commands.spawn((
            Name::new("HelpLine"),
            HelpLine,
            Text::new(HELP_TEXT),
            TextFont { font_size: HELP_FONT_SIZE, ..default() },
            TextColor(Color::WHITE),
            Node {
                position_type: PositionType::Absolute,
                bottom: Val::Px(8.0),
                left: Val::Px(8.0),
                ..default()
            },
            UiTargetCamera(camera),
            DespawnOnExit(GameState::InGame),
        ));

        // Full-screen root that centres a small square.
        commands
            .spawn((
                Name::new("CrosshairRoot"),
                Node {
                    position_type: PositionType::Absolute,
                    width: Val::Percent(100.0),
                    height: Val::Percent(100.0),
                    justify_content: JustifyContent::Center,
                    align_items: AlignItems::Center,
                    ..default()
                },
                UiTargetCamera(camera),
                DespawnOnExit(GameState::InGame),
            ))
            .with_children(|root| {
                root.spawn((
                    Crosshair,
                    Node {
                        width: Val::Px(CROSSHAIR_PX),
                        height: Val::Px(CROSSHAIR_PX),
                        ..default()
                    },
                    BackgroundColor(Color::srgba(1.0, 1.0, 1.0, 0.8)),
                ));
            });
    }
}
