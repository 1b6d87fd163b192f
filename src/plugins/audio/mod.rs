//! Audio plugin (render-only).
//!
//! A looping background track starts with the app. Every `ShotFired` plays the one-shot
//! sample of the selected colour. Samples are synthesised tones, so no audio files ship with
//! the game.

use std::time::Duration;

use bevy::audio::{Pitch, Volume};
use bevy::ecs::message::MessageReader;
use bevy::prelude::*;

use crate::common::schedule::FrameSet;
use crate::plugins::enemies::EnemyType;
use crate::plugins::shooting::messages::ShotFired;

const MUSIC_VOLUME: f32 = 0.05;

#[derive(Component)]
pub struct BackgroundMusic;

/// Loaded sample handles.
#[derive(Resource, Debug, Clone)]
pub struct SoundBank {
    pub laser: Handle<Pitch>,
    pub pew: Handle<Pitch>,
    pub fart: Handle<Pitch>,
    pub music: Handle<Pitch>,
}

impl SoundBank {
    /// Sample played when firing with `selection` held.
    pub fn shot_sample(&self, selection: EnemyType) -> Option<&Handle<Pitch>> {
        match selection {
            EnemyType::Red => Some(&self.laser),
            EnemyType::Green => Some(&self.pew),
            EnemyType::Yellow => Some(&self.fart),
            EnemyType::Unknown => None,
        }
    }
}

pub fn plugin(app: &mut App) {
    app.add_systems(Startup, (build_sound_bank, start_music).chain())
        .add_systems(Update, play_shot_sounds.after(FrameSet::Shoot));
}

pub fn build_sound_bank(mut commands: Commands, mut pitches: ResMut<Assets<Pitch>>) {
    commands.insert_resource(SoundBank {
        laser: pitches.add(Pitch::new(880.0, Duration::from_millis(120))),
        pew: pitches.add(Pitch::new(660.0, Duration::from_millis(90))),
        fart: pitches.add(Pitch::new(90.0, Duration::from_millis(350))),
        music: pitches.add(Pitch::new(110.0, Duration::from_secs(4))),
    });
}

fn start_music(mut commands: Commands, bank: Res<SoundBank>) {
    commands.spawn((
        Name::new("BackgroundMusic"),
        BackgroundMusic,
        AudioPlayer(bank.music.clone()),
        PlaybackSettings::LOOP.with_volume(Volume::Linear(MUSIC_VOLUME)),
    ));
}

pub fn play_shot_sounds(
    mut commands: Commands,
    bank: Option<Res<SoundBank>>,
    mut shots: MessageReader<ShotFired>,
) {
    let Some(bank) = bank else {
        shots.clear();
        return;
    };

    for shot in shots.read() {
        let Some(sample) = bank.shot_sample(shot.selection) else {
            continue;
        };
        commands.spawn((AudioPlayer(sample.clone()), PlaybackSettings::DESPAWN));
    }
}
