//! How a letter looks on screen.

use bevy::prelude::*;

use super::letter::Letter;
use crate::core::{lerp_rgb, ping_pong, GlyphDisplay, SlotId};

/// Text shown in place of a letter the player has to remember.
pub const CONCEALED_GLYPH: &str = "_";

const BLUE: [f32; 3] = [0.0, 0.0, 1.0];
const RED: [f32; 3] = [1.0, 0.0, 0.0];
const MAGENTA: [f32; 3] = [1.0, 0.0, 1.0];

/// Colour of a letter at `time` seconds.
///
/// Eligible letters pulse through blue, red and magenta; the rest are black.
pub fn letter_color(letter: &Letter, time: f32) -> Color {
    if !letter.is_eligible() {
        return Color::BLACK;
    }
    let p = ping_pong(time, 1.0);
    let [r, g, b] = lerp_rgb(lerp_rgb(BLUE, RED, p), MAGENTA, p);
    Color::srgb(r, g, b)
}

/// A letter bound to one glyph.
#[derive(Debug, Clone)]
pub struct LetterSlot {
    pub letter: Letter,
    pub slot: SlotId,
}

impl LetterSlot {
    pub fn new(letter: Letter, slot: SlotId) -> Self {
        Self { letter, slot }
    }

    /// Lay the glyph out for the first time.
    pub fn spawn(&self, glyphs: &mut dyn GlyphDisplay, position: Vec2, time: f32) {
        glyphs.set_position(self.slot, position);
        glyphs.set_text(self.slot, &self.letter.label());
        glyphs.set_visible(self.slot, true);
        self.paint(glyphs, time);
    }

    /// Refresh the colour for this frame.
    pub fn paint(&self, glyphs: &mut dyn GlyphDisplay, time: f32) {
        glyphs.set_color(self.slot, letter_color(&self.letter, time));
    }
}
