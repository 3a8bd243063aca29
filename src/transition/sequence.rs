//! End-of-round sequencing: camera zoom, fade-out, then one scene request.

use bevy::prelude::*;

use super::fade::FadeSequence;
use super::zoom::{CameraZoomController, ZoomProgress, ZoomSettings};
use crate::core::{Actor, Frame, SceneId};

/// Clips played while the camera holds on the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransitionCue {
    pub boss_clip: &'static str,
    /// A second actor animated alongside the boss (the hopscotch wall)
    pub extra: Option<(Actor, &'static str)>,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum TransitionKind {
    /// Fade only, no camera work (title screen)
    FadeOnly,
    /// Zoom onto `focus` while the cue plays, then fade
    ZoomOnBoss { focus: Vec2, cue: TransitionCue },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransitionStep {
    Zooming,
    AwaitingFade,
    /// The scene load was requested on this tick
    SceneRequested(SceneId),
    Finished,
}

/// Drives one end-of-round transition.
///
/// The scene load is requested exactly once, after the zoom (if any) has
/// completed and the fade clip has played through.
#[derive(Debug, Clone)]
pub struct TransitionController {
    kind: TransitionKind,
    next: SceneId,
    fade: FadeSequence,
    zoom: Option<CameraZoomController>,
    cue_started: bool,
    requested: bool,
}

impl TransitionController {
    /// Start the fade and arm the zoom.
    pub fn start(kind: TransitionKind, next: SceneId, zoom: ZoomSettings, frame: &mut Frame) -> Self {
        let zoom = match kind {
            TransitionKind::FadeOnly => None,
            TransitionKind::ZoomOnBoss { .. } => Some(CameraZoomController::new(zoom)),
        };
        Self {
            kind,
            next,
            fade: FadeSequence::start(frame.animator),
            zoom,
            cue_started: false,
            requested: false,
        }
    }

    pub fn next_scene(&self) -> SceneId {
        self.next
    }

    pub fn tick(&mut self, frame: &mut Frame) -> TransitionStep {
        if self.requested {
            return TransitionStep::Finished;
        }
        self.fade.tick(frame.dt, frame.animator);

        if let (Some(zoom), TransitionKind::ZoomOnBoss { focus, cue }) = (&mut self.zoom, self.kind) {
            if zoom.zoom(focus, frame.dt, frame.camera) == ZoomProgress::Zooming {
                if !self.cue_started {
                    frame.animator.play_clip(Actor::Boss, cue.boss_clip);
                    if let Some((actor, clip)) = cue.extra {
                        frame.animator.play_clip(actor, clip);
                    }
                    self.cue_started = true;
                }
                return TransitionStep::Zooming;
            }
        }

        if !self.fade.has_ended(frame.animator) {
            return TransitionStep::AwaitingFade;
        }

        frame.scenes.load_scene(self.next);
        self.requested = true;
        TransitionStep::SceneRequested(self.next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::clips;
    use crate::core::testing::{Recorder, ScriptedInput};

    fn boss_zoom() -> TransitionKind {
        TransitionKind::ZoomOnBoss {
            focus: Vec2::new(4.5, 0.5),
            cue: TransitionCue {
                boss_clip: clips::BOSS_TRANSITION,
                extra: Some((Actor::Wall, clips::WALL_BROKEN)),
            },
        }
    }

    fn settings() -> ZoomSettings {
        ZoomSettings {
            duration: 1.0,
            tight_scale: 0.5,
        }
    }

    #[test]
    fn waits_for_zoom_and_fade_then_requests_once() {
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        let mut transition =
            TransitionController::start(boss_zoom(), SceneId::Memory, settings(), &mut rec.frame(&input, 0.0));

        assert_eq!(transition.tick(&mut rec.frame(&input, 0.1)), TransitionStep::Zooming);
        // Fade already finished, but the zoom still holds the request back.
        rec.animator.finished.insert(Actor::Fade);
        assert_eq!(transition.tick(&mut rec.frame(&input, 0.5)), TransitionStep::Zooming);
        assert!(rec.scenes.loads.is_empty());

        assert_eq!(
            transition.tick(&mut rec.frame(&input, 0.6)),
            TransitionStep::SceneRequested(SceneId::Memory)
        );
        for _ in 0..3 {
            assert_eq!(transition.tick(&mut rec.frame(&input, 0.1)), TransitionStep::Finished);
        }
        assert_eq!(rec.scenes.loads, vec![SceneId::Memory]);
    }

    #[test]
    fn cue_plays_on_boss_and_extra_actor() {
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        let mut transition =
            TransitionController::start(boss_zoom(), SceneId::Memory, settings(), &mut rec.frame(&input, 0.0));
        transition.tick(&mut rec.frame(&input, 0.1));
        transition.tick(&mut rec.frame(&input, 0.1));

        assert_eq!(rec.animator.played(Actor::Boss, clips::BOSS_TRANSITION), 1);
        assert_eq!(rec.animator.played(Actor::Wall, clips::WALL_BROKEN), 1);
    }

    #[test]
    fn fade_only_skips_the_camera() {
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        let mut transition = TransitionController::start(
            TransitionKind::FadeOnly,
            SceneId::Wheel,
            settings(),
            &mut rec.frame(&input, 0.0),
        );

        assert_eq!(transition.tick(&mut rec.frame(&input, 0.1)), TransitionStep::AwaitingFade);
        rec.animator.finished.insert(Actor::Fade);
        assert_eq!(
            transition.tick(&mut rec.frame(&input, 0.1)),
            TransitionStep::SceneRequested(SceneId::Wheel)
        );
        assert!(rec.camera.framings.is_empty());
    }
}
