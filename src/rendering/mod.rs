//! Rendering module - glyphs, actor sprites, the fade overlay and the camera.

mod actors;
mod camera;
mod glyphs;
mod plugin;

pub use actors::{clip_length, ActorLayout, ActorSprite, AnimationBoard, FadeOverlay};
pub use camera::{CameraFraming, MainCamera};
pub use glyphs::{to_screen, Glyph, GlyphBoard, GlyphEntities, PIXELS_PER_UNIT};
pub use plugin::{RenderSet, RenderingPlugin};
