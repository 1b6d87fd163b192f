//! Tunable gameplay constants.

use bevy::prelude::*;

#[derive(Resource, Debug, Clone)]
pub struct Tunables {
    /// Camera move speed, world units per second.
    pub player_speed: f32,
    /// Enemy move speed, world units per second.
    pub enemy_speed: f32,
    /// Distance at which an enemy counts as having reached a waypoint.
    pub arrival_radius: f32,
    /// Seconds between spawn attempts.
    pub spawn_delay: f32,
    /// Minimum seconds between shots.
    pub shoot_delay: f32,
    /// Seed for the spawn RNG. `None` seeds from OS entropy.
    pub spawn_seed: Option<u64>,
}

impl Default for Tunables {
    fn default() -> Self {
        Self {
            player_speed: 30.0,
            enemy_speed: 10.0,
            arrival_radius: 0.5,
            spawn_delay: 2.0,
            shoot_delay: 0.5,
            spawn_seed: None,
        }
    }
}
