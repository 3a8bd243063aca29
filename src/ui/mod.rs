//! UI module - HUD, title caption and victory screen.

pub mod hud;
mod plugin;

pub use hud::HudState;
pub use plugin::UiPlugin;
