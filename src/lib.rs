//! Glyph Brawl - a typing boss fight in Bevy.
//!
//! A robot is beaten down over four letter minigames: a spinning wheel of
//! letters, an anagram pool, a scrolling hopscotch course and a memory row.
//! Damage carries from one minigame to the next; a zoom and fade carry the
//! camera between them.
//!
//! # Architecture
//!
//! Gameplay is engine-agnostic and talks to Bevy only through the port traits
//! in [`core::ports`]. The plugins provide the Bevy side:
//!
//! - **Core**: Scene states, encounter events, quit key
//! - **Rendering**: Letter glyphs, actor sprites, fade overlay, camera
//! - **UI**: Health bars, title caption, victory screen
//! - **Audio**: Sound cues and music through kira
//! - **Session**: Tunables, the active controller, scene flow

pub mod audio;
pub mod combat;
pub mod core;
pub mod letters;
pub mod modes;
pub mod rendering;
pub mod session;
pub mod transition;
pub mod ui;

use bevy::prelude::*;

/// Main game plugin that adds all sub-plugins.
pub struct GlyphBrawlPlugin;

impl Plugin for GlyphBrawlPlugin {
    fn build(&self, app: &mut App) {
        app
            // Core systems (must be first)
            .add_plugins(core::CorePlugin)

            // Presentation
            .add_plugins(rendering::RenderingPlugin)
            .add_plugins(ui::UiPlugin)
            .add_plugins(audio::GameAudioPlugin)

            // Controllers and scene flow
            .add_plugins(session::SessionPlugin);
    }
}
