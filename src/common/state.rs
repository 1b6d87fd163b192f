//! Round lifecycle.
//!
//! The game has a single playing state. Everything spawned for a round is tagged
//! `DespawnOnExit(GameState::InGame)`, and the pool/timer resources reset on exit, so leaving
//! the state tears the round down completely.

use bevy::prelude::*;

#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, States, Default)]
pub enum GameState {
    #[default]
    InGame,
}
