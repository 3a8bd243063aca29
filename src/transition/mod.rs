//! Transition module - the zoom and fade played between scenes.

mod fade;
mod sequence;
mod zoom;

pub use fade::FadeSequence;
pub use sequence::{TransitionController, TransitionCue, TransitionKind, TransitionStep};
pub use zoom::{CameraZoomController, ZoomProgress, ZoomSettings};
