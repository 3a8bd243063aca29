//! Animation clip and parameter names understood by the animator.

use crate::core::ModeId;

pub const BOSS_IDLE: &str = "Robot_IdleBase";
pub const BOSS_TAKE_DAMAGE: &str = "Robot_TakeDamage";
pub const BOSS_ATTACK: &str = "Robot_Attack";
pub const BOSS_TRANSITION: &str = "Robot_Transition";
pub const BOSS_DEATH: &str = "Robot_Death";

pub const PLAYER_HURT: &str = "Player_Degat";
pub const PLAYER_LOSE: &str = "Player_Lose";

pub const WALL_BROKEN: &str = "Broken";

pub const FADE_OUT: &str = "FadeOut";

/// Selects the per-minigame attack and idle variants.
pub const MINIGAME_INDEX: &str = "MiniGameIndex";

/// Drives the fade shader.
pub const CUSTOM_TIME: &str = "_CustomTime";

/// Player idle pose for each minigame.
pub fn player_idle(mode: ModeId) -> &'static str {
    match mode {
        ModeId::Wheel => "Player_RDL",
        ModeId::Mixing => "Player_MDL",
        ModeId::Hopscotch => "Player_Marelle",
        ModeId::Memory => "Player_Memory",
    }
}
