//! Enemies plugin: a fixed-capacity slot pool of colour-coded enemies that walk a short
//! waypoint path toward the player.
//!
//! ---------------------------
//! HOW THIS IS DESIGNED (ECS)
//! ---------------------------
//! 1) FACTS live in components/resources:
//!    - `Enemy` carries the immutable colour (`EnemyType`) and the slot back-reference.
//!    - `Waypoints` is the destination queue. It cannot be empty by construction.
//!    - `Transform` is the pose, written only by the motion system.
//!    - `EnemySlots` is the pool: the sole owner of enemy lifetime.
//!
//! 2) RULES mutate facts in predictable places:
//!    - `spawn::tick_spawner` is the only path that creates enemies.
//!    - `motion::advance_enemies` is the only writer of enemy poses.
//!    - the shooting plugin's deletion drain is the only path that destroys enemies.
//!
//! 3) PRESENTATION (meshes, materials) is attached by the render-only visuals plugin when an
//!    `Enemy` appears, so the simulation runs headless.
//!
//! ---------------------------
//! CAPACITY
//! ---------------------------
//! A spawn attempt with every slot occupied is dropped. That is a capacity decision, not a
//! failure: the scheduler simply tries again on its next window.

pub mod motion;
pub mod pool;
pub mod spawn;
pub mod targeting;

use std::collections::VecDeque;

use bevy::prelude::*;

use crate::common::{schedule::FrameSet, state::GameState, tunables::Tunables};

pub use pool::{EnemySlots, MAX_ENEMIES, SlotIndex};
pub use spawn::EnemySpawner;

// -----------------------------------------------------------------------------
// Types
// -----------------------------------------------------------------------------

/// Enemy colour tag.
///
/// `Unknown` never appears on a live enemy; it is the "no classification" result of reading a
/// pixel that matches none of the colours.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EnemyType {
    #[default]
    Unknown,
    Red,
    Green,
    Yellow,
}

impl EnemyType {
    /// The colours a spawned enemy can take, in draw order.
    pub const COLORED: [EnemyType; 3] = [EnemyType::Red, EnemyType::Green, EnemyType::Yellow];

    /// Map a uniform draw in `0..COLORED.len()` to a colour.
    #[inline]
    pub fn from_draw(n: usize) -> Option<Self> {
        Self::COLORED.get(n).copied()
    }

    /// Position in `COLORED`, used to index per-colour lookup tables.
    #[inline]
    pub fn table_index(self) -> Option<usize> {
        Self::COLORED.iter().position(|&c| c == self)
    }

    /// Flat colour an enemy of this type renders with.
    pub fn tint(self) -> Color {
        match self {
            EnemyType::Red => Color::srgb(0.9, 0.1, 0.1),
            EnemyType::Green => Color::srgb(0.1, 0.85, 0.15),
            EnemyType::Yellow => Color::srgb(0.95, 0.85, 0.1),
            EnemyType::Unknown => Color::WHITE,
        }
    }
}

#[derive(Component, Debug, Clone, Copy)]
pub struct Enemy {
    pub kind: EnemyType,
    /// Slot in `EnemySlots` that owns this entity.
    pub slot: SlotIndex,
}

/// FIFO of points an enemy walks through.
///
/// The front is always present, so an enemy always has somewhere to go. The last point is
/// sticky: `advance` never removes it.
#[derive(Component, Debug, Clone, PartialEq)]
pub struct Waypoints {
    current: Vec3,
    rest: VecDeque<Vec3>,
}

impl Waypoints {
    pub fn new(first: Vec3) -> Self {
        Self { current: first, rest: VecDeque::new() }
    }

    /// Append a point after the existing ones.
    pub fn then(mut self, point: Vec3) -> Self {
        self.rest.push_back(point);
        self
    }

    /// Current goal.
    #[inline]
    pub fn current(&self) -> Vec3 {
        self.current
    }

    /// Number of queued points, including the current goal. Never zero.
    #[inline]
    pub fn remaining(&self) -> usize {
        1 + self.rest.len()
    }

    /// Move on to the next point. Returns false (and keeps the goal) on the last one.
    pub fn advance(&mut self) -> bool {
        match self.rest.pop_front() {
            Some(next) => {
                self.current = next;
                true
            }
            None => false,
        }
    }
}

// -----------------------------------------------------------------------------
// Plugin wiring
// -----------------------------------------------------------------------------

pub fn plugin(app: &mut App) {
    let spawner = EnemySpawner::from_tunables(app.world().resource::<Tunables>());

    app.insert_resource(EnemySlots::default())
        .insert_resource(spawner)
        .add_systems(Update, spawn::tick_spawner.in_set(FrameSet::Spawn))
        .add_systems(Update, motion::advance_enemies.in_set(FrameSet::Motion))
        .add_systems(OnExit(GameState::InGame), reset_enemy_pool);
}

/// Enemy entities are despawned by `DespawnOnExit`; forget their slots with them.
fn reset_enemy_pool(mut slots: ResMut<EnemySlots>, mut spawner: ResMut<EnemySpawner>) {
    slots.clear();
    spawner.reset_timer();
}

#[cfg(test)]
mod tests;
