//! The encounter context shared by every minigame of one boss fight.
//!
//! Owned by the session and handed to the active controller each frame, so
//! boss and player health persist across scene changes without globals.

use serde::Deserialize;

use super::boss::{BossHealthStatus, BossState};
use super::clips;
use super::player::PlayerState;
use crate::core::{Actor, Cue, Frame, ModeId, MusicState};

/// Health tunables for one fight.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct EncounterConfig {
    pub boss_health: u32,
    /// Boss checkpoints; any order, visited highest first
    pub boss_thresholds: Vec<u32>,
    pub player_health: u32,
    /// Where the camera zooms to during transitions
    pub boss_position: (f32, f32),
}

impl Default for EncounterConfig {
    fn default() -> Self {
        Self {
            boss_health: 120,
            boss_thresholds: vec![90, 60],
            player_health: 5,
            boss_position: (4.5, 0.5),
        }
    }
}

#[derive(Debug, Clone)]
pub struct Encounter {
    pub boss: BossState,
    pub player: PlayerState,
    /// Boss as it was when the current minigame started
    checkpoint: BossState,
    mode: Option<ModeId>,
}

impl Encounter {
    pub fn new(config: &EncounterConfig) -> Self {
        let boss = BossState::new(config.boss_health, &config.boss_thresholds);
        Self {
            checkpoint: boss.clone(),
            boss,
            player: PlayerState::new(config.player_health),
            mode: None,
        }
    }

    pub fn mode(&self) -> Option<ModeId> {
        self.mode
    }

    /// Prepare the shared state and presentation for `mode`.
    pub fn begin_mode(&mut self, mode: ModeId, frame: &mut Frame) {
        self.mode = Some(mode);
        self.checkpoint = self.boss.clone();

        frame.hud.configure_for_mode(mode);
        frame
            .hud
            .set_ranges(self.player.max_health(), self.boss.max_health());
        frame.hud.set_player_value(self.player.health());
        frame.hud.set_foe_value(self.boss.health());

        self.advance_attack_pattern(mode, frame);
        frame.animator.play_clip(Actor::Boss, clips::BOSS_IDLE);
        frame.animator.play_clip(Actor::Player, clips::player_idle(mode));
        frame
            .animator
            .set_parameter(Actor::Player, clips::MINIGAME_INDEX, mode.index() as i32);
        frame.audio.set_music_state(MusicState::for_mode(mode));
    }

    /// Retry the current minigame: the boss goes back to its state at mode
    /// entry and the player is revived.
    pub fn restart_mode(&mut self) {
        self.boss = self.checkpoint.clone();
        self.player.revive();
    }

    /// Pick the boss attack animation for the active minigame.
    pub fn advance_attack_pattern(&mut self, mode: ModeId, frame: &mut Frame) {
        frame
            .animator
            .set_parameter(Actor::Boss, clips::MINIGAME_INDEX, mode.index() as i32);
    }

    pub fn damage_boss(&mut self, amount: u32, frame: &mut Frame) -> BossHealthStatus {
        let status = self.boss.apply_damage(amount);
        frame.audio.play_one_shot(Cue::DamageFoe);
        if status != BossHealthStatus::Dead {
            frame.hud.set_foe_value(self.boss.health());
            frame.animator.play_clip(Actor::Boss, clips::BOSS_TAKE_DAMAGE);
        }
        status
    }

    /// Hurt the player and play the boss attack. Returns whether the player died.
    pub fn damage_player(&mut self, amount: u32, frame: &mut Frame) -> bool {
        frame.animator.play_clip(Actor::Boss, clips::BOSS_ATTACK);
        if self.player.apply_damage(amount) {
            self.announce_death(frame);
            return true;
        }
        frame.animator.play_clip(Actor::Player, clips::PLAYER_HURT);
        frame.hud.set_player_value(self.player.health());
        frame.audio.play_one_shot(Cue::DamagePlayer);
        false
    }

    pub fn kill_player(&mut self, frame: &mut Frame) {
        if self.player.is_dead() {
            return;
        }
        self.player.kill();
        self.announce_death(frame);
    }

    fn announce_death(&self, frame: &mut Frame) {
        frame.animator.play_clip(Actor::Player, clips::PLAYER_LOSE);
        frame.hud.set_player_value(0);
        frame.audio.play_one_shot(Cue::Death);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::testing::{Recorder, ScriptedInput};

    #[test]
    fn begin_mode_configures_presentation() {
        let mut encounter = Encounter::new(&EncounterConfig::default());
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        encounter.begin_mode(ModeId::Mixing, &mut rec.frame(&input, 0.0));

        assert_eq!(rec.hud.modes, vec![ModeId::Mixing]);
        assert_eq!(rec.hud.ranges, vec![(5, 120)]);
        assert!(rec
            .animator
            .params
            .contains(&(Actor::Boss, clips::MINIGAME_INDEX.to_string(), 1)));
        assert_eq!(rec.animator.played(Actor::Player, "Player_MDL"), 1);
        assert_eq!(rec.audio.music, vec![MusicState::LevelTwo]);
    }

    #[test]
    fn non_lethal_boss_damage_updates_hud_and_flinches() {
        let mut encounter = Encounter::new(&EncounterConfig::default());
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        let status = encounter.damage_boss(10, &mut rec.frame(&input, 0.0));

        assert_eq!(status, BossHealthStatus::Alive);
        assert_eq!(rec.hud.foe, vec![110]);
        assert_eq!(rec.animator.played(Actor::Boss, clips::BOSS_TAKE_DAMAGE), 1);
    }

    #[test]
    fn player_death_plays_lose_clip() {
        let mut encounter = Encounter::new(&EncounterConfig::default());
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        assert!(encounter.damage_player(10, &mut rec.frame(&input, 0.0)));
        assert_eq!(rec.animator.played(Actor::Player, clips::PLAYER_LOSE), 1);
        assert_eq!(rec.hud.player, vec![0]);
        assert_eq!(rec.audio.count(Cue::Death), 1);
    }

    #[test]
    fn restart_rolls_the_boss_back_to_the_checkpoint() {
        let mut encounter = Encounter::new(&EncounterConfig::default());
        let mut rec = Recorder::default();
        let input = ScriptedInput::none();
        encounter.damage_boss(40, &mut rec.frame(&input, 0.0));
        encounter.begin_mode(ModeId::Mixing, &mut rec.frame(&input, 0.0));
        encounter.damage_boss(10, &mut rec.frame(&input, 0.0));
        encounter.kill_player(&mut rec.frame(&input, 0.0));

        encounter.restart_mode();
        assert_eq!(encounter.boss.health(), 90);
        assert_eq!(encounter.player.health(), 5);
    }
}
