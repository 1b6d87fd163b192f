//! Shooting plugin: colour-matched hit confirmation.
//!
//! # Data flow
//! ```text
//!   render (previous frame) ──> FrameSample { centre pixel }
//!                                     │
//!   Update / FrameSet::Shoot          v
//!   resolve_shot: timer gate + held selection
//!       ├─ write ShotFired ──────────────> audio plugin (one-shot sample)
//!       ├─ classify centre pixel
//!       ├─ closest enemy to the camera
//!       └─ pixel == enemy colour == exclusive selection ──> PendingDeletions.push(slot)
//!                                     │
//!   Update / FrameSet::Drain          v
//!   drain_pending_deletions: EnemySlots.release(slot) + despawn
//! ```
//!
//! A shot only counts when three things agree: the colour under the crosshair, the colour of
//! the nearest enemy, and the single selection the player is holding.
//!
//! Detection and release are decoupled through `PendingDeletions` so the same slot can be
//! queued more than once without a double free: release is a no-op on an empty slot.

pub mod classify;
pub mod messages;

use std::collections::VecDeque;

use bevy::ecs::message::MessageWriter;
use bevy::prelude::*;

use crate::common::{schedule::FrameSet, state::GameState, tunables::Tunables};
use crate::plugins::core::CLEAR_COLOR;
use crate::plugins::enemies::targeting::closest_enemy;
use crate::plugins::enemies::{Enemy, EnemySlots, EnemyType, SlotIndex};
use crate::plugins::input::Controls;
use crate::plugins::player::Player;

use classify::classify_pixel;
use messages::ShotFired;

/// Seconds since the last shot. Fully reset (not carried) when a shot fires.
#[derive(Resource, Debug, Default, Clone, Copy)]
pub struct ShootTimer(pub f32);

/// Colour at the exact centre of the most recently rendered frame.
#[derive(Resource, Debug, Clone, Copy)]
pub struct FrameSample {
    pub center: LinearRgba,
}

impl Default for FrameSample {
    fn default() -> Self {
        Self { center: CLEAR_COLOR.to_linear() }
    }
}

/// FIFO of slots to release this tick. Duplicates are allowed.
#[derive(Resource, Debug, Default)]
pub struct PendingDeletions(VecDeque<SlotIndex>);

impl PendingDeletions {
    pub fn push(&mut self, slot: SlotIndex) {
        self.0.push_back(slot);
    }

    pub fn pop(&mut self) -> Option<SlotIndex> {
        self.0.pop_front()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn clear(&mut self) {
        self.0.clear();
    }
}

pub struct ShootingPlugin;

impl Plugin for ShootingPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<ShotFired>();

        app.init_resource::<ShootTimer>()
            .init_resource::<FrameSample>()
            .init_resource::<PendingDeletions>();

        // Detection and release are separate steps of the frame (see `FrameSet`).
        app.add_systems(Update, resolve_shot.in_set(FrameSet::Shoot))
            .add_systems(Update, drain_pending_deletions.in_set(FrameSet::Drain))
            .add_systems(OnExit(GameState::InGame), reset_shooting);
    }
}

/// True when the crosshair colour, the nearest enemy and the held selection all agree.
fn is_confirmed_hit(
    seen: EnemyType,
    closest: Option<EnemyType>,
    exclusive_selection: Option<EnemyType>,
) -> bool {
    seen != EnemyType::Unknown && closest == Some(seen) && exclusive_selection == Some(seen)
}

#[allow(clippy::too_many_arguments)]
pub fn resolve_shot(
    time: Res<Time>,
    tunables: Res<Tunables>,
    controls: Res<Controls>,
    sample: Res<FrameSample>,
    slots: Res<EnemySlots>,
    mut shoot_timer: ResMut<ShootTimer>,
    mut pending: ResMut<PendingDeletions>,
    mut shots: MessageWriter<ShotFired>,
    q_player: Query<&Transform, With<Player>>,
    q_enemies: Query<(&Enemy, &Transform)>,
) {
    shoot_timer.0 += time.delta_secs();
    if shoot_timer.0 < tunables.shoot_delay {
        return;
    }
    let Some(selection) = controls.held_selection() else {
        return;
    };

    shots.write(ShotFired { selection });
    shoot_timer.0 = 0.0;

    let seen = classify_pixel(sample.center);
    match seen {
        EnemyType::Unknown => debug!("Unable to determine colour at screen centre"),
        kind => debug!("{kind:?} detected at screen centre"),
    }

    let Ok(camera) = q_player.single() else {
        debug!("No single Player to measure enemy distance from");
        return;
    };

    let closest = closest_enemy(camera.translation, &slots, &q_enemies);
    if !is_confirmed_hit(seen, closest.map(|(_, enemy)| enemy.kind), controls.exclusive_selection()) {
        return;
    }

    if let Some((_, enemy)) = closest {
        info!("Hit {:?} enemy in slot {}", enemy.kind, enemy.slot.get());
        pending.push(enemy.slot);
    }
}

pub fn drain_pending_deletions(
    mut commands: Commands,
    mut slots: ResMut<EnemySlots>,
    mut pending: ResMut<PendingDeletions>,
) {
    while let Some(slot) = pending.pop() {
        if let Some(e) = slots.release(slot) {
            commands.entity(e).despawn();
        }
    }
}

fn reset_shooting(mut shoot_timer: ResMut<ShootTimer>, mut pending: ResMut<PendingDeletions>) {
    shoot_timer.0 = 0.0;
    pending.clear();
}
