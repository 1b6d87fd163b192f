//! Waypoint motion.

use bevy::prelude::*;

use crate::common::tunables::Tunables;

use super::{Enemy, Waypoints};

/// Reference "up" axis for enemy orientation. The arena is Z-up.
pub const LOOK_UP: Vec3 = Vec3::Z;

const LOOK_MIN_LEN: f32 = 0.0001;
const LOOK_MAX_ALIGNMENT: f32 = 0.9999;

/// Rotation that points local -Z from `from` toward `to`, keeping `up` as the up hint.
///
/// Returns identity when the direction is (near) zero or (near) parallel to `up`, where a
/// look-at basis is undefined.
pub fn safe_look_at(from: Vec3, to: Vec3, up: Vec3) -> Quat {
    let dir = to - from;
    let len = dir.length();
    if !len.is_finite() || len < LOOK_MIN_LEN {
        return Quat::IDENTITY;
    }

    let dir = dir / len;
    if dir.dot(up.normalize_or_zero()).abs() > LOOK_MAX_ALIGNMENT {
        return Quat::IDENTITY;
    }

    Transform::IDENTITY.looking_to(dir, up).rotation
}

/// Step one enemy toward its current waypoint.
///
/// The enemy faces the goal as seen from where it stood before moving. Once within
/// `arrival_radius` of the goal it moves on to the next one, unless it is the last.
pub fn advance_along_waypoints(
    tf: &mut Transform,
    waypoints: &mut Waypoints,
    speed: f32,
    arrival_radius: f32,
    elapsed: f32,
) {
    let dest = waypoints.current();
    let from = tf.translation;

    if let Some(dir) = (dest - from).try_normalize() {
        tf.translation += dir * speed * elapsed;
    }
    tf.rotation = safe_look_at(from, dest, LOOK_UP);

    // Inclusive, so an enemy already standing on its goal moves on even with a zero radius.
    if tf.translation.distance(dest) <= arrival_radius {
        waypoints.advance();
    }
}

pub fn advance_enemies(
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut q: Query<(&mut Transform, &mut Waypoints), With<Enemy>>,
) {
    let dt = time.delta_secs();
    for (mut tf, mut waypoints) in &mut q {
        advance_along_waypoints(
            &mut tf,
            &mut waypoints,
            tunables.enemy_speed,
            tunables.arrival_radius,
            dt,
        );
    }
}
