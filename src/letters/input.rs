//! Keyboard input source backed by Bevy's `ButtonInput<KeyCode>`.

use bevy::prelude::*;

use super::letter::Key;
use crate::core::InputSource;

impl Key {
    pub fn key_code(self) -> KeyCode {
        match self {
            Key::A => KeyCode::KeyA,
            Key::B => KeyCode::KeyB,
            Key::C => KeyCode::KeyC,
            Key::D => KeyCode::KeyD,
            Key::E => KeyCode::KeyE,
            Key::F => KeyCode::KeyF,
            Key::G => KeyCode::KeyG,
            Key::H => KeyCode::KeyH,
            Key::I => KeyCode::KeyI,
            Key::J => KeyCode::KeyJ,
            Key::K => KeyCode::KeyK,
            Key::L => KeyCode::KeyL,
            Key::M => KeyCode::KeyM,
            Key::N => KeyCode::KeyN,
            Key::O => KeyCode::KeyO,
            Key::P => KeyCode::KeyP,
            Key::Q => KeyCode::KeyQ,
            Key::R => KeyCode::KeyR,
            Key::S => KeyCode::KeyS,
            Key::T => KeyCode::KeyT,
            Key::U => KeyCode::KeyU,
            Key::V => KeyCode::KeyV,
            Key::W => KeyCode::KeyW,
            Key::X => KeyCode::KeyX,
            Key::Y => KeyCode::KeyY,
            Key::Z => KeyCode::KeyZ,
        }
    }
}

impl InputSource for ButtonInput<KeyCode> {
    fn is_key_down(&self, key: Key) -> bool {
        self.just_pressed(key.key_code())
    }

    fn any_key_down(&self) -> bool {
        self.get_just_pressed().next().is_some()
    }

    fn confirm_down(&self) -> bool {
        self.just_pressed(KeyCode::Enter) || self.just_pressed(KeyCode::NumpadEnter)
    }
}
