//! Encounter events used for cross-system communication.
//!
//! The session sends these as the fight progresses; the core plugin writes
//! them to the log.

use bevy::prelude::*;

use super::states::{ModeId, SceneId};

/// Why a minigame round stopped being playable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundEnd {
    /// The boss hit its next health checkpoint
    ThresholdReached,
    /// The boss ran out of health
    BossDefeated,
    /// The course was crossed (hopscotch)
    CourseCleared,
    /// The title word was typed
    Started,
}

#[derive(Event, Debug, Clone, PartialEq)]
pub enum EncounterEvent {
    /// A minigame scene was entered (or restarted after a death).
    ModeEntered(ModeId),
    /// A round ended and its transition started.
    RoundEnded { mode: Option<ModeId>, end: RoundEnd },
    /// The player ran out of health.
    PlayerDied,
    /// A controller asked for a scene change.
    SceneRequested(SceneId),
}
