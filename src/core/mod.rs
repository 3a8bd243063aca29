//! Core game module - scenes, events, engine ports, and shared helpers.
//!
//! This module provides the foundation that all other game systems build upon.

mod error;
mod events;
mod plugin;
pub mod ports;
mod states;
mod tween;

#[cfg(test)]
pub(crate) mod testing;

pub use error::ConfigError;
pub use events::*;
pub use plugin::CorePlugin;
pub use ports::*;
pub use states::*;
pub use tween::*;
