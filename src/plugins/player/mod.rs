//! Player plugin: the first-person viewpoint.
//!
//! The player *is* the camera rig. Gameplay only owns its `Transform`; the render-only camera
//! plugin attaches the actual `Camera3d` (and audio listener) to the same entity.
//!
//! Movement is camera-relative: left/right slide along the view's right axis, up/down along
//! its forward axis (local -Z), so looking down and pressing W moves down too.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;

use crate::common::{schedule::FrameSet, state::GameState, tunables::Tunables};
use crate::plugins::enemies::{motion::LOOK_UP, spawn::SPAWN_POINT};
use crate::plugins::input::Controls;

pub const PLAYER_START: Vec3 = Vec3::new(0.0, -8.0, 2.12);

#[derive(Component)]
pub struct Player;

pub fn plugin(app: &mut App) {
    app.add_systems(OnEnter(GameState::InGame), spawn)
        .add_systems(Update, move_camera.in_set(FrameSet::Camera));
}

fn spawn(mut commands: Commands) {
    commands.spawn((
        Name::new("Player"),
        Player,
        Transform::from_translation(PLAYER_START).looking_at(SPAWN_POINT, LOOK_UP),
        DespawnOnExit(GameState::InGame),
    ));
}

/// Combine held direction buttons into a unit 2D move. Opposing buttons cancel.
fn move_axis(controls: &Controls) -> Vec2 {
    let mut axis = Vec2::ZERO;
    if controls.left.pressed && !controls.right.pressed {
        axis.x = -1.0;
    }
    if !controls.left.pressed && controls.right.pressed {
        axis.x = 1.0;
    }
    if controls.down.pressed && !controls.up.pressed {
        axis.y = -1.0;
    }
    if !controls.down.pressed && controls.up.pressed {
        axis.y = 1.0;
    }
    // Diagonals are no faster than straight moves.
    axis.normalize_or_zero()
}

fn move_camera(
    time: Res<Time>,
    tunables: Res<Tunables>,
    controls: Res<Controls>,
    mut q_player: Query<&mut Transform, With<Player>>,
) {
    let Ok(mut tf) = q_player.single_mut() else {
        return;
    };

    let step = move_axis(&controls) * tunables.player_speed * time.delta_secs();
    if step == Vec2::ZERO {
        return;
    }

    let right = *tf.right();
    let forward = *tf.forward();
    tf.translation += step.x * right + step.y * forward;
}
