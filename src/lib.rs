//! Colour-matching first-person shooter.
//!
//! Enemies of three colours walk toward the camera; a shot removes the nearest enemy only when
//! the colour under the crosshair, that enemy's colour and the held selection key agree.
//!
//! Integration tests in `tests/` are compiled as separate crates and import from here.

pub mod game;
pub mod common;
pub mod plugins;
