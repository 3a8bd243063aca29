//! The round-level state machine every letter game runs under.
//!
//! A [`Minigame`] only knows how to play. [`ModeController`] wraps it with
//! the shared protocol: freeze while the player is dying, play until the
//! round ends, then hand over to a [`TransitionController`] until the next
//! scene has been requested.

use bevy::prelude::*;

use crate::combat::{BossHealthStatus, Encounter};
use crate::core::{Cue, Frame, ModeId, RoundEnd, SceneId};
use crate::transition::{TransitionController, TransitionKind, TransitionStep, ZoomSettings};

impl RoundEnd {
    /// The round end caused by a boss hit, if any.
    pub fn from_boss(status: BossHealthStatus) -> Option<RoundEnd> {
        match status {
            BossHealthStatus::Alive => None,
            BossHealthStatus::ReachedThreshold => Some(RoundEnd::ThresholdReached),
            BossHealthStatus::Dead => Some(RoundEnd::BossDefeated),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundPhase {
    Playing,
    /// The round ended this tick; the transition starts on the next one
    TransitionPending,
    TransitionActive,
    SceneSwitchRequested,
}

/// One letter game.
pub trait Minigame: Send + Sync {
    /// `None` for scenes outside the boss fight.
    fn mode(&self) -> Option<ModeId>;

    /// Lay out the first round.
    fn setup(&mut self, frame: &mut Frame);

    /// Advance one tick of gameplay.
    fn play(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd>;

    /// How the scene is left once the round is over.
    fn transition(&self, focus: Vec2) -> TransitionKind;

    fn next_scene(&self) -> SceneId;
}

/// A running scene as seen by the session.
pub trait Controller: Send + Sync {
    fn mode(&self) -> Option<ModeId>;
    fn phase(&self) -> RoundPhase;
    fn setup(&mut self, frame: &mut Frame);
    /// Returns the round end on the tick it happens.
    fn tick(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd>;
}

pub struct ModeController<M> {
    game: M,
    phase: RoundPhase,
    end: Option<RoundEnd>,
    transition: Option<TransitionController>,
    focus: Vec2,
    zoom: ZoomSettings,
}

impl<M: Minigame> ModeController<M> {
    /// `focus` is where the camera zooms when the round ends.
    pub fn new(game: M, focus: Vec2, zoom: ZoomSettings) -> Self {
        Self {
            game,
            phase: RoundPhase::Playing,
            end: None,
            transition: None,
            focus,
            zoom,
        }
    }

    pub fn game(&self) -> &M {
        &self.game
    }

    fn next_scene(&self) -> SceneId {
        match self.end {
            Some(RoundEnd::BossDefeated) => SceneId::Ending,
            _ => self.game.next_scene(),
        }
    }
}

impl<M: Minigame> Controller for ModeController<M> {
    fn mode(&self) -> Option<ModeId> {
        self.game.mode()
    }

    fn phase(&self) -> RoundPhase {
        self.phase
    }

    fn setup(&mut self, frame: &mut Frame) {
        self.game.setup(frame);
    }

    fn tick(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        match self.phase {
            RoundPhase::Playing => {
                if encounter.player.is_dead() {
                    if encounter.player.tick_death(frame.dt) {
                        frame.scenes.reload_current_scene();
                    }
                    return None;
                }
                let end = self.game.play(frame, encounter)?;
                info!("Round over: {:?}", end);
                if self.game.mode().is_some() {
                    frame.audio.play_one_shot(Cue::Win);
                }
                self.end = Some(end);
                self.phase = RoundPhase::TransitionPending;
                Some(end)
            }
            RoundPhase::TransitionPending => {
                let kind = self.game.transition(self.focus);
                let next = self.next_scene();
                self.transition = Some(TransitionController::start(kind, next, self.zoom, frame));
                self.phase = RoundPhase::TransitionActive;
                None
            }
            RoundPhase::TransitionActive => {
                if let Some(transition) = &mut self.transition {
                    if let TransitionStep::SceneRequested(scene) = transition.tick(frame) {
                        debug!("Transition finished, loading {:?}", scene);
                        self.phase = RoundPhase::SceneSwitchRequested;
                    }
                }
                None
            }
            RoundPhase::SceneSwitchRequested => None,
        }
    }
}
