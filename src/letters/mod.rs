//! Letters module - the key-bound challenge shared by every minigame.

mod input;
mod letter;
mod slot;

pub use letter::{status_of, Key, Letter, LetterStatus};
pub use slot::{letter_color, LetterSlot, CONCEALED_GLYPH};
