//! Time-bounded camera zoom onto a focal point.

use bevy::prelude::*;
use serde::Deserialize;

use crate::core::{CameraRig, Countdown};

#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct ZoomSettings {
    /// Seconds the tight framing is held
    pub duration: f32,
    /// Projection scale while zoomed (base framing is 1.0)
    pub tight_scale: f32,
}

impl Default for ZoomSettings {
    fn default() -> Self {
        Self {
            duration: 1.5,
            tight_scale: 0.4,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZoomProgress {
    Zooming,
    Complete,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ZoomState {
    Idle,
    Zooming,
    Complete,
}

/// Holds a tight framing on a target for a fixed time, then restores the
/// base framing.
///
/// Completion is latched: once the countdown has run out every further call
/// reports `Complete` until [`CameraZoomController::reset`].
#[derive(Debug, Clone)]
pub struct CameraZoomController {
    settings: ZoomSettings,
    timer: Countdown,
    state: ZoomState,
}

impl CameraZoomController {
    pub fn new(settings: ZoomSettings) -> Self {
        Self {
            settings,
            timer: Countdown::default(),
            state: ZoomState::Idle,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.state == ZoomState::Complete
    }

    /// Advance the zoom by `dt` seconds towards `target`.
    pub fn zoom(&mut self, target: Vec2, dt: f32, camera: &mut dyn CameraRig) -> ZoomProgress {
        match self.state {
            ZoomState::Complete => return ZoomProgress::Complete,
            ZoomState::Idle => {
                self.timer.start(self.settings.duration);
                self.state = ZoomState::Zooming;
            }
            ZoomState::Zooming => {
                self.timer.tick(dt);
            }
        }

        if self.timer.is_running() {
            camera.frame(target, self.settings.tight_scale);
            return ZoomProgress::Zooming;
        }

        camera.frame(Vec2::ZERO, 1.0);
        self.state = ZoomState::Complete;
        ZoomProgress::Complete
    }

    pub fn reset(&mut self) {
        self.timer.clear();
        self.state = ZoomState::Idle;
    }
}
