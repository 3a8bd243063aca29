//! Scene and minigame identifiers that control the overall flow of the game.
//!
//! `SceneId` is the Bevy state driving which systems and controllers run.
//! `ModeId` names the four boss-fight minigames and replaces any lookup by
//! scene name: animation parameters, HUD styling and music are all selected
//! from it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

/// Top-level scenes.
///
/// The game flows `Loading -> Title -> Wheel -> Mixing -> Hopscotch -> Memory -> Ending`,
/// with the exact successor of each scene taken from the mode tunables.
#[derive(States, Debug, Clone, Copy, Eq, PartialEq, Hash, Default, Serialize, Deserialize)]
pub enum SceneId {
    /// Tunables are being read from disk
    #[default]
    Loading,
    /// Type the start word to begin
    Title,
    Wheel,
    Mixing,
    Hopscotch,
    Memory,
    /// Boss defeated
    Ending,
}

impl SceneId {
    /// Scenes that host a letter controller.
    pub const PLAYABLE: [SceneId; 5] = [
        SceneId::Title,
        SceneId::Wheel,
        SceneId::Mixing,
        SceneId::Hopscotch,
        SceneId::Memory,
    ];

    /// The minigame hosted by this scene, if any.
    pub fn mode(self) -> Option<ModeId> {
        match self {
            SceneId::Wheel => Some(ModeId::Wheel),
            SceneId::Mixing => Some(ModeId::Mixing),
            SceneId::Hopscotch => Some(ModeId::Hopscotch),
            SceneId::Memory => Some(ModeId::Memory),
            SceneId::Loading | SceneId::Title | SceneId::Ending => None,
        }
    }
}

/// The four minigames of the boss fight.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash, Serialize, Deserialize)]
pub enum ModeId {
    Wheel,
    Mixing,
    Hopscotch,
    Memory,
}

impl ModeId {
    pub const ALL: [ModeId; 4] = [ModeId::Wheel, ModeId::Mixing, ModeId::Hopscotch, ModeId::Memory];

    /// Index fed to the `MiniGameIndex` animator parameter and used to pick
    /// per-mode HUD styling.
    pub fn index(self) -> usize {
        match self {
            ModeId::Wheel => 0,
            ModeId::Mixing => 1,
            ModeId::Hopscotch => 2,
            ModeId::Memory => 3,
        }
    }

    pub fn scene(self) -> SceneId {
        match self {
            ModeId::Wheel => SceneId::Wheel,
            ModeId::Mixing => SceneId::Mixing,
            ModeId::Hopscotch => SceneId::Hopscotch,
            ModeId::Memory => SceneId::Memory,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            ModeId::Wheel => "Wheel",
            ModeId::Mixing => "Mixing",
            ModeId::Hopscotch => "Hopscotch",
            ModeId::Memory => "Memory",
        }
    }
}
