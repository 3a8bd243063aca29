//! The single-key challenge every minigame is built from.

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::core::InputSource;

/// The fixed alphabet a letter can be bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum Key {
    A,
    B,
    C,
    D,
    E,
    F,
    G,
    H,
    I,
    J,
    K,
    L,
    M,
    N,
    O,
    P,
    Q,
    R,
    S,
    T,
    U,
    V,
    W,
    X,
    Y,
    Z,
}

impl Key {
    pub const ALL: [Key; 26] = [
        Key::A,
        Key::B,
        Key::C,
        Key::D,
        Key::E,
        Key::F,
        Key::G,
        Key::H,
        Key::I,
        Key::J,
        Key::K,
        Key::L,
        Key::M,
        Key::N,
        Key::O,
        Key::P,
        Key::Q,
        Key::R,
        Key::S,
        Key::T,
        Key::U,
        Key::V,
        Key::W,
        Key::X,
        Key::Y,
        Key::Z,
    ];

    /// Case-insensitive lookup; `None` for anything outside `a..=z`.
    pub fn from_char(c: char) -> Option<Key> {
        let lower = c.to_ascii_lowercase();
        if lower.is_ascii_lowercase() {
            Some(Key::ALL[(lower as u8 - b'a') as usize])
        } else {
            None
        }
    }

    /// Uniformly random key.
    pub fn random(rng: &mut impl Rng) -> Key {
        Key::ALL[rng.gen_range(0..Key::ALL.len())]
    }

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case character, as used when building guesses.
    pub fn to_char(self) -> char {
        (b'a' + self as u8) as char
    }

    /// Upper-case glyph shown on screen.
    pub fn label(self) -> char {
        (b'A' + self as u8) as char
    }
}

/// Outcome of the presses a letter has seen so far.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LetterStatus {
    /// Nothing was pressed
    NotPressed,
    /// The bound key was pressed while eligible
    Pressed,
    /// Some other key was pressed
    IncorrectKey,
    /// The bound key was pressed while not eligible
    Disabled,
}

/// Derives a status from raw press state.
///
/// `Disabled` wins over `Pressed`, which wins over `IncorrectKey`.
pub fn status_of(eligible: bool, was_pressed: bool, had_incorrect_press: bool) -> LetterStatus {
    if !eligible && was_pressed {
        LetterStatus::Disabled
    } else if was_pressed {
        LetterStatus::Pressed
    } else if had_incorrect_press {
        LetterStatus::IncorrectKey
    } else {
        LetterStatus::NotPressed
    }
}

/// A key binding plus the press history for the current round.
///
/// Once `was_pressed` is set it stays set until [`Letter::reset`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Letter {
    key: Key,
    eligible: bool,
    was_pressed: bool,
    had_incorrect_press: bool,
}

impl Letter {
    pub fn new(eligible: bool, key: Key) -> Self {
        Self {
            key,
            eligible,
            was_pressed: false,
            had_incorrect_press: false,
        }
    }

    /// Letter bound to a uniformly random key.
    pub fn random(eligible: bool, rng: &mut impl Rng) -> Self {
        Self::new(eligible, Key::random(rng))
    }

    /// Letter for a character of a word. Non-letters map to `None`.
    pub fn from_char(eligible: bool, c: char) -> Option<Self> {
        Key::from_char(c).map(|key| Self::new(eligible, key))
    }

    /// Two letters with distinct keys, exactly one of them eligible.
    ///
    /// `first_eligible` picks which one. The second key is re-rolled until it
    /// differs from the first.
    pub fn pair(first_eligible: bool, rng: &mut impl Rng) -> (Letter, Letter) {
        let first = Letter::random(first_eligible, rng);
        let mut second = Letter::random(!first_eligible, rng);
        while second.key == first.key {
            second.reroll(rng);
        }
        (first, second)
    }

    pub fn key(&self) -> Key {
        self.key
    }

    pub fn is_eligible(&self) -> bool {
        self.eligible
    }

    pub fn set_eligible(&mut self, eligible: bool) {
        self.eligible = eligible;
    }

    pub fn was_pressed(&self) -> bool {
        self.was_pressed
    }

    /// Consume this frame's input.
    ///
    /// No-op once pressed or when no key is down. Only records that some
    /// wrong key was seen, not which one.
    pub fn check_press(&mut self, input: &dyn InputSource) {
        if self.was_pressed || !input.any_key_down() {
            return;
        }
        if input.is_key_down(self.key) {
            self.was_pressed = true;
        } else {
            self.had_incorrect_press = true;
        }
    }

    pub fn status(&self) -> LetterStatus {
        status_of(self.eligible, self.was_pressed, self.had_incorrect_press)
    }

    /// Forget this round's presses; the key and eligibility are kept.
    pub fn reset(&mut self) {
        self.was_pressed = false;
        self.had_incorrect_press = false;
    }

    pub fn reroll(&mut self, rng: &mut impl Rng) {
        self.key = Key::random(rng);
    }

    pub fn label(&self) -> String {
        self.key.label().to_string()
    }
}
