//! Per-frame system ordering.
//!
//! One `Update` run is one simulated tick. Every gameplay system sits in exactly one of these
//! sets and the sets run chained, in declaration order:
//!
//! ```text
//! Input -> Camera -> Spawn -> Motion -> Shoot -> Drain -> Reset
//! ```
//!
//! - spawning and motion run before shooting, so an enemy is targetable on the tick it appears
//! - `Reset` clears input edge counters last, after every consumer has read them

use bevy::prelude::*;

use crate::common::state::GameState;

#[derive(SystemSet, Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FrameSet {
    /// Fold raw keyboard messages into `Controls`.
    Input,
    /// Move the player camera.
    Camera,
    /// Advance the spawn timer, maybe spawn.
    Spawn,
    /// Advance every enemy along its waypoints.
    Motion,
    /// Advance the shoot timer, maybe resolve a hit.
    Shoot,
    /// Release slots queued for deletion.
    Drain,
    /// Clear per-tick input edge counters.
    Reset,
}

pub fn configure(app: &mut App) {
    app.configure_sets(
        Update,
        (
            FrameSet::Input,
            FrameSet::Camera,
            FrameSet::Spawn,
            FrameSet::Motion,
            FrameSet::Shoot,
            FrameSet::Drain,
            FrameSet::Reset,
        )
            .chain()
            .run_if(in_state(GameState::InGame)),
    );
}
