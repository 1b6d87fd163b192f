//! Input plugin: folds keyboard messages into per-control button state.
//!
//! Each control tracks two things:
//! - `pressed`: level, true while the key is held
//! - `downs`: edge counter, incremented on each press and cleared at the end of every tick
//!
//! Folding runs first in the frame and clearing runs last (see `FrameSet`), so every
//! system in between sees the same snapshot.

use bevy::input::ButtonState;
use bevy::ecs::message::MessageReader;
use bevy::input::keyboard::KeyboardInput;
use bevy::prelude::*;

use crate::common::schedule::FrameSet;
use crate::plugins::enemies::EnemyType;

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Button {
    pub downs: u8,
    pub pressed: bool,
}

impl Button {
    #[inline]
    fn press(&mut self) {
        self.downs = self.downs.saturating_add(1);
        self.pressed = true;
    }

    #[inline]
    fn release(&mut self) {
        self.pressed = false;
    }
}

/// Button state for every control the game reads.
#[derive(Resource, Debug, Default, Clone)]
pub struct Controls {
    pub left: Button,
    pub right: Button,
    pub up: Button,
    pub down: Button,
    /// Red selection.
    pub one: Button,
    /// Green selection.
    pub two: Button,
    /// Yellow selection.
    pub three: Button,
}

impl Controls {
    fn button_mut(&mut self, key: KeyCode) -> Option<&mut Button> {
        match key {
            KeyCode::KeyA => Some(&mut self.left),
            KeyCode::KeyD => Some(&mut self.right),
            KeyCode::KeyW => Some(&mut self.up),
            KeyCode::KeyS => Some(&mut self.down),
            KeyCode::Digit1 => Some(&mut self.one),
            KeyCode::Digit2 => Some(&mut self.two),
            KeyCode::Digit3 => Some(&mut self.three),
            _ => None,
        }
    }

    fn selection_buttons(&self) -> [(Button, EnemyType); 3] {
        [
            (self.one, EnemyType::Red),
            (self.two, EnemyType::Green),
            (self.three, EnemyType::Yellow),
        ]
    }

    /// Colour of the first held selection, in priority order one, two, three.
    pub fn held_selection(&self) -> Option<EnemyType> {
        self.selection_buttons()
            .into_iter()
            .find(|(b, _)| b.pressed)
            .map(|(_, kind)| kind)
    }

    /// Colour of the held selection when exactly one is held.
    pub fn exclusive_selection(&self) -> Option<EnemyType> {
        let mut held = self.selection_buttons().into_iter().filter(|(b, _)| b.pressed);
        match (held.next(), held.next()) {
            (Some((_, kind)), None) => Some(kind),
            _ => None,
        }
    }

    fn clear_downs(&mut self) {
        for b in [
            &mut self.left,
            &mut self.right,
            &mut self.up,
            &mut self.down,
            &mut self.one,
            &mut self.two,
            &mut self.three,
        ] {
            b.downs = 0;
        }
    }
}

pub fn plugin(app: &mut App) {
    // Headless apps have no InputPlugin; make sure the message buffer exists.
    app.add_message::<KeyboardInput>();
    app.init_resource::<Controls>()
        .add_systems(Update, fold_keyboard_input.in_set(FrameSet::Input))
        .add_systems(Update, reset_button_downs.in_set(FrameSet::Reset));
}

fn fold_keyboard_input(mut reader: MessageReader<KeyboardInput>, mut controls: ResMut<Controls>) {
    for ev in reader.read() {
        let Some(button) = controls.button_mut(ev.key_code) else {
            continue;
        };
        match ev.state {
            // OS key repeat is not a new press.
            ButtonState::Pressed if ev.repeat => {}
            ButtonState::Pressed => button.press(),
            ButtonState::Released => button.release(),
        }
    }
}

fn reset_button_downs(mut controls: ResMut<Controls>) {
    controls.clear_downs();
}
