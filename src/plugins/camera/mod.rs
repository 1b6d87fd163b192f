//! Camera plugin (render-only).
//!
//! ```text
//! Added<Player>:        attach Camera3d + projection + SpatialListener to the player rig
//! Update (Input set):   grab/release the cursor, mouse look while grabbed
//! ```
//!
//! The listener rides on the camera entity, so the audio listener pose follows the camera
//! without a separate sync step.

use bevy::audio::SpatialListener;
use bevy::core_pipeline::tonemapping::Tonemapping;
use bevy::input::mouse::AccumulatedMouseMotion;
use bevy::prelude::*;
use bevy::window::{CursorGrabMode, CursorOptions, PrimaryWindow};

use crate::common::schedule::FrameSet;
use crate::plugins::player::Player;

/// Vertical field of view, radians.
pub const FOV_Y: f32 = std::f32::consts::FRAC_PI_3;

/// Distance between the listener's ears.
const EAR_GAP: f32 = 0.3;

#[derive(Component)]
pub struct MainCamera;

/// Projection and colour pipeline shared by every camera on the player rig.
///
/// No tonemapping: unlit enemies reach the framebuffer as their exact tint.
pub fn view_lens() -> (Projection, Tonemapping) {
    (
        Projection::from(PerspectiveProjection { fov: FOV_Y, ..default() }),
        Tonemapping::None,
    )
}

pub fn plugin(app: &mut App) {
    app.add_systems(Update, attach_camera.before(FrameSet::Input))
        .add_systems(Update, (grab_cursor, mouse_look).chain().in_set(FrameSet::Input));
}

fn attach_camera(mut commands: Commands, q_new: Query<Entity, Added<Player>>) {
    for e in &q_new {
        commands.entity(e).insert((
            MainCamera,
            Camera3d::default(),
            view_lens(),
            SpatialListener::new(EAR_GAP),
        ));
    }
}

/// Click grabs the cursor, Escape releases it.
fn grab_cursor(
    mouse: Res<ButtonInput<MouseButton>>,
    keys: Res<ButtonInput<KeyCode>>,
    mut cursor: Single<&mut CursorOptions, With<PrimaryWindow>>,
) {
    if keys.just_pressed(KeyCode::Escape) {
        cursor.grab_mode = CursorGrabMode::None;
        cursor.visible = true;
    } else if mouse.just_pressed(MouseButton::Left) && cursor.grab_mode == CursorGrabMode::None {
        cursor.grab_mode = CursorGrabMode::Locked;
        cursor.visible = false;
    }
}

/// Yaw then pitch in the camera's local frame, scaled so a full window height of motion
/// turns by one field of view.
fn mouse_look(
    motion: Res<AccumulatedMouseMotion>,
    window: Single<(&Window, &CursorOptions), With<PrimaryWindow>>,
    mut q_cam: Query<(&mut Transform, &Projection), With<MainCamera>>,
) {
    let (window, cursor) = *window;
    if cursor.grab_mode == CursorGrabMode::None {
        return;
    }

    let height = window.height();
    if height <= 0.0 || motion.delta == Vec2::ZERO {
        return;
    }
    let Ok((mut tf, projection)) = q_cam.single_mut() else {
        return;
    };
    let Projection::Perspective(perspective) = projection else {
        return;
    };

    let m = Vec2::new(motion.delta.x / height, -motion.delta.y / height);
    tf.rotation = (tf.rotation
        * Quat::from_axis_angle(Vec3::Y, -m.x * perspective.fov)
        * Quat::from_axis_angle(Vec3::X, m.y * perspective.fov))
    .normalize();
}
