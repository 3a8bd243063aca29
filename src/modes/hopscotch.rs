//! Hopscotch: hop along pairs of letters scrolling towards the player.
//!
//! Each pair has one live letter. Typing it hops the player onto it; typing
//! its black partner still hops but stuns. Drift off the left edge and the
//! player dies, reach the right side and the wall breaks.

use std::collections::VecDeque;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use super::config::{HopscotchConfig, Tunables};
use super::round::Minigame;
use crate::combat::{clips, Encounter};
use crate::core::{lerp, Actor, ConfigError, Countdown, Cue, Frame, ModeId, RoundEnd, SceneId, SlotAllocator};
use crate::letters::{Letter, LetterSlot, LetterStatus};
use crate::transition::{TransitionCue, TransitionKind};

/// New pairs appear here.
pub const SPAWN_X: f32 = 12.0;
/// Horizontal gap between consecutive pairs.
pub const PAIR_SPACING: f32 = 1.7;
/// The two lanes sit at `±LANE_Y`.
pub const LANE_Y: f32 = 1.0;
/// Crossing this line clears the course.
pub const WIN_X: f32 = 6.0;
/// Falling behind this line kills the player.
pub const DEATH_X: f32 = -10.0;
/// Platforms past this line are dropped.
pub const DESPAWN_X: f32 = -13.0;

/// Platform speed over time: ramp up, hold, then ease down to a slower pace.
#[derive(Debug, Clone)]
pub struct SpeedRamp {
    min: f32,
    max: f32,
    slowed: f32,
    time_to_max: f32,
    time_when_slowed: f32,
    time_to_slowed: f32,
    elapsed: f32,
    slowing: Countdown,
    speed: f32,
}

impl SpeedRamp {
    pub fn new(config: &HopscotchConfig) -> Self {
        Self {
            min: config.min_speed,
            max: config.max_speed,
            slowed: config.slowed_speed,
            time_to_max: config.time_to_max,
            time_when_slowed: config.time_when_slowed,
            time_to_slowed: config.time_to_slowed,
            elapsed: 0.0,
            slowing: Countdown::new(config.time_to_slowed),
            speed: config.min_speed,
        }
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    /// Advance by `dt` seconds of scrolling and return the new speed.
    pub fn advance(&mut self, dt: f32) -> f32 {
        self.elapsed += dt;
        if self.elapsed <= self.time_to_max {
            self.speed = lerp(self.min, self.max, self.elapsed / self.time_to_max);
        } else if self.elapsed >= self.time_when_slowed {
            self.slowing.tick(dt);
            let progress = (self.time_to_slowed - self.slowing.remaining()) / self.time_to_slowed;
            self.speed = lerp(self.max, self.slowed, progress);
        } else {
            self.speed = self.max;
        }
        self.speed
    }
}

#[derive(Debug, Clone)]
struct Platform {
    letter: LetterSlot,
    position: Vec2,
}

pub struct HopscotchGame {
    config: HopscotchConfig,
    rng: StdRng,
    slots: SlotAllocator,
    platforms: VecDeque<Platform>,
    /// Absolute index of `platforms[0]`
    first_index: usize,
    /// Absolute index of the first platform of the live pair
    current: usize,
    /// Absolute index of the platform the player stands on
    anchor: Option<usize>,
    moving: bool,
    ramp: SpeedRamp,
    stun: Countdown,
    player: Vec2,
}

impl HopscotchGame {
    pub fn new(config: &HopscotchConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self {
            config: config.clone(),
            rng,
            slots: SlotAllocator::default(),
            platforms: VecDeque::new(),
            first_index: 0,
            current: 0,
            anchor: None,
            moving: false,
            ramp: SpeedRamp::new(config),
            stun: Countdown::default(),
            player: Vec2::from(config.start_position),
        })
    }

    pub fn player_position(&self) -> Vec2 {
        self.player
    }

    pub fn is_moving(&self) -> bool {
        self.moving
    }

    pub fn is_stunned(&self) -> bool {
        self.stun.is_running()
    }

    fn platform(&self, index: usize) -> Option<&Platform> {
        index
            .checked_sub(self.first_index)
            .and_then(|i| self.platforms.get(i))
    }

    fn platform_mut(&mut self, index: usize) -> Option<&mut Platform> {
        index
            .checked_sub(self.first_index)
            .and_then(|i| self.platforms.get_mut(i))
    }

    fn spawn_pair(&mut self, x: f32, frame: &mut Frame) {
        let first_eligible = self.rng.gen_bool(0.5);
        let (top, bottom) = Letter::pair(first_eligible, &mut self.rng);
        for (letter, y) in [(top, LANE_Y), (bottom, -LANE_Y)] {
            let platform = Platform {
                letter: LetterSlot::new(letter, self.slots.next()),
                position: Vec2::new(x, y),
            };
            platform.letter.spawn(frame.glyphs, platform.position, frame.time);
            self.platforms.push_back(platform);
        }
    }

    fn scroll(&mut self, frame: &mut Frame) {
        if self.moving {
            let step = self.ramp.advance(frame.dt) * frame.dt;
            for platform in &mut self.platforms {
                platform.position.x -= step;
            }
        }

        while let Some(front) = self.platforms.front() {
            // The platform under the player stays until the player leaves it.
            let passed = self.first_index < self.current
                && self.anchor.map_or(true, |anchor| self.first_index < anchor);
            if front.position.x >= DESPAWN_X || !passed {
                break;
            }
            if let Some(dropped) = self.platforms.pop_front() {
                frame.glyphs.remove(dropped.letter.slot);
            }
            self.first_index += 1;
        }

        let last_x = self.platforms.back().map_or(f32::MIN, |p| p.position.x);
        if SPAWN_X - last_x > PAIR_SPACING {
            self.spawn_pair(SPAWN_X, frame);
        }

        for platform in &self.platforms {
            frame.glyphs.set_position(platform.letter.slot, platform.position);
            platform.letter.paint(frame.glyphs, frame.time);
        }
    }

    /// Try to hop onto platform `index`. Returns whether a hop happened.
    fn try_hop(&mut self, index: usize, frame: &mut Frame) -> bool {
        let Some(platform) = self.platform_mut(index) else {
            return false;
        };
        platform.letter.letter.check_press(frame.input);
        let status = platform.letter.letter.status();
        if status != LetterStatus::Pressed && status != LetterStatus::Disabled {
            return false;
        }

        if status == LetterStatus::Disabled {
            debug!("Hopped onto a black letter, stunned");
            self.stun.start(self.config.stun_time);
        }
        self.anchor = Some(index);
        self.current += 2;
        frame.audio.play_one_shot(Cue::JumpNSlide);
        if !self.moving {
            info!("Hopscotch platforms start moving");
            self.moving = true;
        }
        true
    }
}

impl Minigame for HopscotchGame {
    fn mode(&self) -> Option<ModeId> {
        Some(ModeId::Hopscotch)
    }

    fn setup(&mut self, frame: &mut Frame) {
        let mut x = 0.0;
        while x < SPAWN_X {
            self.spawn_pair(x, frame);
            x += PAIR_SPACING;
        }
        frame.animator.move_actor(Actor::Player, self.player);
        frame.animator.move_actor(Actor::Wall, Vec2::new(WIN_X + 1.0, 0.0));
    }

    fn play(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        self.scroll(frame);

        if let Some(anchor) = self.anchor {
            if let Some(platform) = self.platform(anchor) {
                self.player = platform.position;
            }
        }
        frame.animator.move_actor(Actor::Player, self.player);

        if self.player.x < DEATH_X {
            encounter.kill_player(frame);
            return None;
        }
        if self.player.x > WIN_X {
            info!("Hopscotch course cleared");
            return Some(RoundEnd::CourseCleared);
        }

        if self.stun.is_running() {
            self.stun.tick(frame.dt);
            return None;
        }

        if !self.try_hop(self.current, frame) {
            self.try_hop(self.current + 1, frame);
        }
        None
    }

    fn transition(&self, focus: Vec2) -> TransitionKind {
        TransitionKind::ZoomOnBoss {
            focus,
            cue: TransitionCue {
                boss_clip: clips::BOSS_TRANSITION,
                extra: Some((Actor::Wall, clips::WALL_BROKEN)),
            },
        }
    }

    fn next_scene(&self) -> SceneId {
        self.config.next_scene
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::combat::EncounterConfig;
    use crate::core::testing::{Recorder, ScriptedInput};
    use rand::SeedableRng;

    fn ramp_config() -> HopscotchConfig {
        HopscotchConfig {
            min_speed: 2.0,
            max_speed: 8.0,
            slowed_speed: 4.0,
            time_to_max: 3.0,
            time_when_slowed: 5.0,
            time_to_slowed: 2.0,
            ..HopscotchConfig::default()
        }
    }

    fn started(config: &HopscotchConfig) -> (HopscotchGame, Recorder, Encounter) {
        let mut game = HopscotchGame::new(config, StdRng::seed_from_u64(11)).unwrap();
        let mut rec = Recorder::default();
        game.setup(&mut rec.frame(&ScriptedInput::none(), 0.0));
        (game, rec, Encounter::new(&EncounterConfig::default()))
    }

    /// Key of the live (or black, when `live` is false) letter of the pair.
    fn pair_key(game: &HopscotchGame, live: bool) -> crate::letters::Key {
        let a = &game.platform(game.current).unwrap().letter.letter;
        let b = &game.platform(game.current + 1).unwrap().letter.letter;
        if a.is_eligible() == live {
            a.key()
        } else {
            b.key()
        }
    }

    #[test]
    fn ramp_interpolates_to_max() {
        let mut ramp = SpeedRamp::new(&ramp_config());
        assert_eq!(ramp.advance(1.5), 5.0);
        assert_eq!(ramp.advance(1.5), 8.0);
    }

    #[test]
    fn ramp_holds_then_slows() {
        let mut ramp = SpeedRamp::new(&ramp_config());
        ramp.advance(4.0);
        assert_eq!(ramp.speed(), 8.0);
        ramp.advance(0.5);
        assert_eq!(ramp.speed(), 8.0);
        // Slowing starts at 5s and takes 2s.
        ramp.advance(1.0);
        assert!((ramp.speed() - 6.0).abs() < 1e-4);
        ramp.advance(5.0);
        assert!((ramp.speed() - 4.0).abs() < 1e-4);
    }

    #[test]
    fn initial_pairs_fill_the_course_and_wait() {
        let (mut game, mut rec, mut encounter) = started(&ramp_config());
        assert_eq!(game.platforms.len(), 16);
        assert!(game.platforms.iter().all(|p| p.position.x < SPAWN_X));
        for pair in game.platforms.make_contiguous().chunks(2) {
            assert_ne!(pair[0].letter.letter.key(), pair[1].letter.letter.key());
            assert_ne!(pair[0].letter.letter.is_eligible(), pair[1].letter.letter.is_eligible());
        }

        game.play(&mut rec.frame(&ScriptedInput::none(), 1.0), &mut encounter);
        assert_eq!(game.platforms[0].position.x, 0.0);
        assert_eq!(game.player_position(), Vec2::new(-3.0, 0.0));
    }

    #[test]
    fn a_correct_hop_starts_the_scroll() {
        let (mut game, mut rec, mut encounter) = started(&ramp_config());
        let key = pair_key(&game, true);
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.1), &mut encounter);

        assert!(game.is_moving());
        assert!(!game.is_stunned());
        assert_eq!(game.current, 2);
        assert_eq!(rec.audio.count(Cue::JumpNSlide), 1);

        game.play(&mut rec.frame(&ScriptedInput::none(), 0.1), &mut encounter);
        assert_eq!(game.player_position().x, game.platform(game.anchor.unwrap()).unwrap().position.x);
        assert!(game.player_position().x < 0.0);
    }

    #[test]
    fn a_black_letter_hops_but_stuns() {
        let (mut game, mut rec, mut encounter) = started(&ramp_config());
        let key = pair_key(&game, false);
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.1), &mut encounter);
        assert!(game.is_stunned());
        assert_eq!(game.current, 2);

        // Input is ignored while stunned.
        let next = pair_key(&game, true);
        game.play(&mut rec.frame(&ScriptedInput::key(next), 0.1), &mut encounter);
        assert_eq!(game.current, 2);
    }

    #[test]
    fn the_stun_wears_off() {
        let (mut game, mut rec, mut encounter) = started(&ramp_config());
        let key = pair_key(&game, false);
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.1), &mut encounter);
        assert!(game.is_stunned());

        // stun_time is 0.8s
        for _ in 0..10 {
            game.play(&mut rec.frame(&ScriptedInput::none(), 0.1), &mut encounter);
        }
        assert!(!game.is_stunned());

        let next = pair_key(&game, true);
        game.play(&mut rec.frame(&ScriptedInput::key(next), 0.1), &mut encounter);
        assert_eq!(game.current, 4);
        assert!(!game.is_stunned());
        assert!(!encounter.player.is_dead());
    }

    #[test]
    fn new_pairs_keep_spawning() {
        let (mut game, mut rec, mut encounter) = started(&ramp_config());
        let key = pair_key(&game, true);
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.1), &mut encounter);
        let before = game.first_index + game.platforms.len();
        for _ in 0..20 {
            game.play(&mut rec.frame(&ScriptedInput::none(), 0.1), &mut encounter);
        }
        assert!(game.first_index + game.platforms.len() > before);
        let last = game.platforms.back().unwrap().position.x;
        assert!(SPAWN_X - last <= PAIR_SPACING);
    }

    #[test]
    fn falling_behind_kills_the_player() {
        let (mut game, mut rec, mut encounter) = started(&ramp_config());
        let key = pair_key(&game, true);
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.1), &mut encounter);
        for _ in 0..200 {
            game.play(&mut rec.frame(&ScriptedInput::none(), 0.1), &mut encounter);
            if encounter.player.is_dead() {
                break;
            }
        }
        assert!(encounter.player.is_dead());
        assert!(game.player_position().x < DEATH_X);
    }

    #[test]
    fn large_steps_still_kill_a_stranded_player() {
        let mut config = ramp_config();
        config.min_speed = 20.0;
        config.max_speed = 20.0;
        config.slowed_speed = 20.0;
        let (mut game, mut rec, mut encounter) = started(&config);
        let key = pair_key(&game, true);
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.01), &mut encounter);

        // 5 units per frame: 0 -> -5 -> -10 -> -15 jumps the death line
        // and the despawn line together.
        for _ in 0..6 {
            game.play(&mut rec.frame(&ScriptedInput::none(), 0.25), &mut encounter);
            if encounter.player.is_dead() {
                break;
            }
        }
        assert!(encounter.player.is_dead());
        assert!(game.player_position().x < DEATH_X);
        assert!(game.platform(game.anchor.unwrap()).is_some());
    }

    #[test]
    fn hopping_fast_enough_clears_the_course() {
        let mut config = ramp_config();
        config.min_speed = 0.5;
        config.max_speed = 0.5;
        let (mut game, mut rec, mut encounter) = started(&config);
        let mut end = None;
        for _ in 0..40 {
            let key = pair_key(&game, true);
            end = game.play(&mut rec.frame(&ScriptedInput::key(key), 0.05), &mut encounter);
            if end.is_some() {
                break;
            }
        }
        assert_eq!(end, Some(RoundEnd::CourseCleared));
        assert!(!encounter.player.is_dead());
    }

    #[test]
    fn the_wall_breaks_in_the_transition() {
        let (game, _, _) = started(&ramp_config());
        match game.transition(Vec2::ZERO) {
            TransitionKind::ZoomOnBoss { cue, .. } => {
                assert_eq!(cue.extra, Some((Actor::Wall, clips::WALL_BROKEN)));
            }
            TransitionKind::FadeOnly => panic!("hopscotch zooms on the boss"),
        }
    }
}
