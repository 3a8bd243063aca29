//! Rendering plugin - mirrors the controller-facing boards onto entities.

use bevy::prelude::*;

use super::actors::{advance_animations, present_actors, present_fade, spawn_actors, ActorLayout, AnimationBoard};
use super::camera::{apply_framing, spawn_camera, CameraFraming};
use super::glyphs::{sync_glyphs, GlyphBoard, GlyphEntities};

/// System set ordering for rendering.
///
/// Controllers tick between `Animate` and `Present`, so what they write this
/// frame is on screen this frame.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub enum RenderSet {
    Animate,
    Present,
}

/// Rendering plugin - glyph text, actor sprites and camera framing.
pub struct RenderingPlugin;

impl Plugin for RenderingPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<GlyphBoard>()
            .init_resource::<GlyphEntities>()
            .init_resource::<AnimationBoard>()
            .init_resource::<ActorLayout>()
            .init_resource::<CameraFraming>()
            .insert_resource(ClearColor(Color::srgb(0.06, 0.05, 0.08)))
            .configure_sets(Update, (RenderSet::Animate, RenderSet::Present).chain())
            .add_systems(Startup, (spawn_camera, spawn_actors))
            .add_systems(Update, advance_animations.in_set(RenderSet::Animate))
            .add_systems(
                Update,
                (sync_glyphs, present_actors, present_fade, apply_framing).in_set(RenderSet::Present),
            );
    }
}
