//! Modes module - the title screen and the four boss-fight minigames.

mod config;
mod hopscotch;
mod memory;
mod mixing;
mod round;
mod title;
mod wheel;

pub use config::*;
pub use hopscotch::{HopscotchGame, SpeedRamp};
pub use memory::MemoryGame;
pub use mixing::{accepts, pick_word, MixingGame};
pub use round::{Controller, Minigame, ModeController, RoundPhase};
pub use title::TitleGame;
pub use wheel::{slice_index, WheelGame};

use bevy::prelude::*;
use rand::rngs::StdRng;

use crate::core::{ConfigError, SceneId};

/// Build the controller hosted by `scene`, or `None` for scenes without one.
pub fn build_controller(
    scene: SceneId,
    config: &GameConfig,
    rng: StdRng,
) -> Result<Option<Box<dyn Controller>>, ConfigError> {
    let focus = Vec2::from(config.encounter.boss_position);
    let zoom = config.camera;
    let controller: Box<dyn Controller> = match scene {
        SceneId::Title => Box::new(ModeController::new(TitleGame::new(&config.title)?, focus, zoom)),
        SceneId::Wheel => Box::new(ModeController::new(WheelGame::new(&config.wheel)?, focus, zoom)),
        SceneId::Mixing => Box::new(ModeController::new(
            MixingGame::new(&config.mixing, rng)?,
            focus,
            zoom,
        )),
        SceneId::Hopscotch => Box::new(ModeController::new(
            HopscotchGame::new(&config.hopscotch, rng)?,
            focus,
            zoom,
        )),
        SceneId::Memory => Box::new(ModeController::new(
            MemoryGame::new(&config.memory, rng)?,
            focus,
            zoom,
        )),
        SceneId::Loading | SceneId::Ending => return Ok(None),
    };
    Ok(Some(controller))
}
