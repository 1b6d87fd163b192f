//! Spawn scheduler.
//!
//! Two states driven by one accumulator:
//! - Waiting: `timer < spawn_delay`
//! - Ready: `timer >= spawn_delay` -> attempt one spawn, then subtract the delay
//!
//! Subtracting (instead of zeroing) carries overshoot into the next window.
//!
//! Every enemy walks the same two-leg path: spawn point -> one of two lateral points ->
//! wherever the camera stood at spawn time.

use bevy::prelude::*;
use bevy::state::state_scoped::DespawnOnExit;
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::common::{state::GameState, tunables::Tunables};
use crate::plugins::player::Player;

use super::{Enemy, EnemySlots, EnemyType, SlotIndex, Waypoints};

pub const SPAWN_POINT: Vec3 = Vec3::new(0.0, 12.0, 2.12);

/// First waypoint, indexed by the drawn direction.
pub const LATERAL_WAYPOINTS: [Vec3; 2] = [Vec3::new(10.0, 15.0, 2.12), Vec3::new(-10.0, 15.0, 2.12)];

/// What a single spawn attempt decided.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpawnPlan {
    pub kind: EnemyType,
    pub lateral: Vec3,
}

/// Spawn timer plus the one RNG every spawn draws from.
///
/// The generator is seeded once and only ever advanced, so a fixed seed replays the same
/// sequence of enemies.
#[derive(Resource, Debug)]
pub struct EnemySpawner {
    timer: f32,
    rng: SmallRng,
}

impl EnemySpawner {
    pub fn seeded(seed: u64) -> Self {
        Self { timer: 0.0, rng: SmallRng::seed_from_u64(seed) }
    }

    pub fn from_entropy() -> Self {
        Self { timer: 0.0, rng: SmallRng::from_os_rng() }
    }

    pub fn from_tunables(tunables: &Tunables) -> Self {
        match tunables.spawn_seed {
            Some(seed) => Self::seeded(seed),
            None => Self::from_entropy(),
        }
    }

    #[inline]
    pub fn timer(&self) -> f32 {
        self.timer
    }

    pub fn reset_timer(&mut self) {
        self.timer = 0.0;
    }

    /// Accumulate `elapsed`. Returns true when a spawn attempt is due, consuming one `delay`.
    pub fn tick(&mut self, elapsed: f32, delay: f32) -> bool {
        self.timer += elapsed;
        if self.timer < delay {
            return false;
        }
        self.timer -= delay;
        true
    }

    /// Draw a colour and a lateral direction, uniformly.
    pub fn draw_plan(&mut self) -> Option<SpawnPlan> {
        let type_draw = self.rng.random_range(0..EnemyType::COLORED.len());
        let dir_draw = self.rng.random_range(0..LATERAL_WAYPOINTS.len());

        let (Some(kind), Some(&lateral)) =
            (EnemyType::from_draw(type_draw), LATERAL_WAYPOINTS.get(dir_draw))
        else {
            // The draw ranges are the table sizes; getting here is a bug.
            error!("Invalid enemy draw: type {type_draw}, direction {dir_draw}");
            if cfg!(debug_assertions) {
                panic!("enemy draw out of range");
            }
            return None;
        };

        Some(SpawnPlan { kind, lateral })
    }
}

pub fn tick_spawner(
    mut commands: Commands,
    time: Res<Time>,
    tunables: Res<Tunables>,
    mut spawner: ResMut<EnemySpawner>,
    mut slots: ResMut<EnemySlots>,
    q_player: Query<&Transform, With<Player>>,
) {
    if !spawner.tick(time.delta_secs(), tunables.spawn_delay) {
        return;
    }

    let Ok(camera) = q_player.single() else {
        debug!("No single Player to send enemies toward");
        return;
    };

    try_spawn_enemy(&mut commands, &mut spawner, &mut slots, camera.translation);
}

/// Spawn one enemy into the first free slot, heading for `target` after its lateral leg.
pub fn try_spawn_enemy(
    commands: &mut Commands,
    spawner: &mut EnemySpawner,
    slots: &mut EnemySlots,
    target: Vec3,
) -> Option<SlotIndex> {
    if slots.is_full() {
        // Capacity decision, not a correctness failure.
        debug!("Enemy pool full, dropping spawn");
        return None;
    }

    let plan = spawner.draw_plan()?;

    let slot = slots.allocate(|slot| {
        commands
            .spawn((
                Name::new(format!("Enemy{}", slot.get())),
                Enemy { kind: plan.kind, slot },
                Waypoints::new(plan.lateral).then(target),
                Transform::from_translation(SPAWN_POINT),
                DespawnOnExit(GameState::InGame),
            ))
            .id()
    })?;

    debug!("Spawned {:?} enemy in slot {}", plan.kind, slot.get());
    Some(slot)
}
