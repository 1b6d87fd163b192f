//! Centre-pixel colour classification.
//!
//! A colour wins when its channel(s) reach `DOMINANCE` times the channels it must beat:
//! - red: `r >= 4g` and `r >= 4b`
//! - green: `g >= 4r` and `g >= 4b`
//! - yellow: `r >= 4b` and `g >= 4b`
//!
//! Rules are tried in that order. Anything else is `Unknown`, which never hits.

use bevy::prelude::*;

use crate::plugins::enemies::EnemyType;

pub const DOMINANCE: f32 = 4.0;

pub fn classify_pixel(px: LinearRgba) -> EnemyType {
    let (r, g, b) = (px.red, px.green, px.blue);
    if r >= DOMINANCE * g && r >= DOMINANCE * b {
        EnemyType::Red
    } else if g >= DOMINANCE * r && g >= DOMINANCE * b {
        EnemyType::Green
    } else if r >= DOMINANCE * b && g >= DOMINANCE * b {
        EnemyType::Yellow
    } else {
        EnemyType::Unknown
    }
}
