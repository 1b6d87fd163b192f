//! Buffered shot notifications.
//!
//! Hit resolution only records that a shot went off and with which selection held.
//! The audio plugin turns that into a sound, so the core never touches audio assets.

use bevy::prelude::*;

use crate::plugins::enemies::EnemyType;

#[derive(Message, Clone, Copy, Debug, PartialEq, Eq)]
pub struct ShotFired {
    /// Colour of the selection that triggered the shot (first held in priority order).
    pub selection: EnemyType,
}
