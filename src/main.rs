//! Glyph Brawl - Entry Point
//!
//! Controls:
//! - Letters: Type
//! - Enter: Submit a guess (mixing)
//! - Escape: Quit

use bevy::prelude::*;
use bevy_kira_audio::AudioPlugin;

fn main() {
    App::new()
        // Bevy default plugins, with kira taking over audio
        .add_plugins(
            DefaultPlugins
                .set(WindowPlugin {
                    primary_window: Some(Window {
                        title: "Glyph Brawl".to_string(),
                        resolution: (1280.0, 720.0).into(),
                        ..default()
                    }),
                    ..default()
                })
                .disable::<bevy::audio::AudioPlugin>(),
        )
        .add_plugins(AudioPlugin)

        // Our game plugin
        .add_plugins(glyph_brawl::GlyphBrawlPlugin)

        .run();
}
