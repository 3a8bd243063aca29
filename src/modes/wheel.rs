//! Wheel: a spinning ring of letters where only the one at the top is live.
//!
//! Each correct letter flips the spin and speeds the wheel up. Spelling the
//! whole word moves on to the next one (wrapping) with the rotation reset.

use bevy::prelude::*;

use super::config::{Tunables, WheelConfig};
use super::round::Minigame;
use crate::combat::{clips, Encounter};
use crate::core::{ConfigError, Cue, Frame, ModeId, RoundEnd, SceneId, SlotAllocator};
use crate::letters::{Letter, LetterSlot, LetterStatus};
use crate::transition::{TransitionCue, TransitionKind};

/// Index of the slice under the top of the wheel.
///
/// `angle` is the wheel rotation in degrees (counter-clockwise positive);
/// letter `i` sits `i` slices counter-clockwise from the top at rest.
pub fn slice_index(angle: f32, count: usize) -> usize {
    debug_assert!(count > 0, "a wheel needs at least one letter");
    let slice = 360.0 / count as f32;
    let rotation = angle.rem_euclid(360.0) - slice / 2.0;
    let rotation = if rotation > 0.0 { 360.0 - rotation } else { -rotation };
    let index = (rotation / slice) as usize;
    debug_assert!(index <= count, "slice {index} out of range for {count} letters");
    index.min(count - 1)
}

/// Position of a letter `theta` degrees around a circle of `radius`, measured
/// counter-clockwise from the top.
fn on_circle(theta: f32, radius: f32) -> Vec2 {
    let (sin, cos) = theta.to_radians().sin_cos();
    Vec2::new(-radius * sin, radius * cos)
}

pub struct WheelGame {
    config: WheelConfig,
    slots: SlotAllocator,
    word: usize,
    letters: Vec<LetterSlot>,
    pressed: usize,
    angle: f32,
    counter_clockwise: bool,
    speed: f32,
}

impl WheelGame {
    pub fn new(config: &WheelConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut config = config.clone();
        for word in &mut config.words {
            *word = word.to_lowercase();
        }
        let speed = config.speed_for(0).base;
        Ok(Self {
            config,
            slots: SlotAllocator::default(),
            word: 0,
            letters: Vec::new(),
            pressed: 0,
            angle: 0.0,
            counter_clockwise: false,
            speed,
        })
    }

    pub fn word_index(&self) -> usize {
        self.word
    }

    pub fn speed(&self) -> f32 {
        self.speed
    }

    pub fn is_counter_clockwise(&self) -> bool {
        self.counter_clockwise
    }

    fn slice_angle(&self) -> f32 {
        360.0 / self.letters.len().max(1) as f32
    }

    fn setup_word(&mut self, frame: &mut Frame) {
        for entry in self.letters.drain(..) {
            frame.glyphs.remove(entry.slot);
        }
        self.letters = self.config.words[self.word]
            .chars()
            .filter_map(|c| Letter::from_char(true, c))
            .map(|letter| LetterSlot::new(letter, self.slots.next()))
            .collect();
        let slice = self.slice_angle();
        let center = Vec2::from(self.config.center);
        for (i, entry) in self.letters.iter().enumerate() {
            let position = center + on_circle(i as f32 * slice, self.config.letter_padding);
            entry.spawn(frame.glyphs, position, frame.time);
        }
    }

    fn rotate(&mut self, frame: &mut Frame) {
        let step = self.speed * frame.dt;
        let angle = if self.counter_clockwise {
            self.angle + step
        } else {
            self.angle - step
        };
        self.angle = angle.rem_euclid(360.0);

        let slice = self.slice_angle();
        let center = Vec2::from(self.config.center);
        for (i, entry) in self.letters.iter().enumerate() {
            let theta = i as f32 * slice + self.angle;
            frame
                .glyphs
                .set_position(entry.slot, center + on_circle(theta, self.config.letter_padding));
            entry.paint(frame.glyphs, frame.time);
        }
    }

    fn next_word(&mut self, frame: &mut Frame) {
        self.word = (self.word + 1) % self.config.words.len();
        self.pressed = 0;
        self.speed = self.config.speed_for(self.word).base;
        self.counter_clockwise = false;
        self.angle = 0.0;
        self.setup_word(frame);
    }

    fn damage_boss(&self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        RoundEnd::from_boss(encounter.damage_boss(self.config.boss_damage, frame))
    }
}

impl Minigame for WheelGame {
    fn mode(&self) -> Option<ModeId> {
        Some(ModeId::Wheel)
    }

    fn setup(&mut self, frame: &mut Frame) {
        self.setup_word(frame);
    }

    fn play(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        self.rotate(frame);

        let index = slice_index(self.angle, self.letters.len());
        let entry = &mut self.letters[index];
        if !entry.letter.is_eligible() {
            return None;
        }

        entry.letter.check_press(frame.input);
        let status = entry.letter.status();
        if status == LetterStatus::Disabled
            || (self.config.punish_miss_click && status == LetterStatus::IncorrectKey)
        {
            entry.letter.reset();
            debug!("Wheel miss on {}", entry.letter.label());
            encounter.damage_player(self.config.player_damage, frame);
            return None;
        }
        if status != LetterStatus::Pressed {
            return None;
        }

        entry.letter.set_eligible(false);
        entry.paint(frame.glyphs, frame.time);
        frame.audio.play_one_shot(Cue::Keyboard);
        self.pressed += 1;
        self.counter_clockwise = !self.counter_clockwise;

        if self.config.individual_letter_damage {
            if let Some(end) = self.damage_boss(frame, encounter) {
                return Some(end);
            }
        }

        let settings = self.config.speed_for(self.word);
        self.speed = settings.increment.apply(self.speed, settings.base);

        if self.pressed < self.letters.len() {
            return None;
        }

        info!("Wheel word {} spelled", self.word);
        self.next_word(frame);
        if self.config.individual_letter_damage {
            return None;
        }
        self.damage_boss(frame, encounter)
    }

    fn transition(&self, focus: Vec2) -> TransitionKind {
        TransitionKind::ZoomOnBoss {
            focus,
            cue: TransitionCue {
                boss_clip: clips::BOSS_TRANSITION,
                extra: None,
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
    use crate::core::Actor;
    use crate::letters::Key;
    use crate::modes::config::{SpeedIncrement, WheelSpeed};

    fn config(increment: SpeedIncrement) -> WheelConfig {
        WheelConfig {
            speeds: vec![WheelSpeed {
                base: 10.0,
                increment,
            }],
            words: vec!["abcd".into(), "xyz".into()],
            ..WheelConfig::default()
        }
    }

    /// Press the live letter once, without letting the wheel turn.
    fn press_live(game: &mut WheelGame, rec: &mut Recorder, encounter: &mut Encounter) -> Option<RoundEnd> {
        let index = slice_index(game.angle, game.letters.len());
        let key = game.letters[index].letter.key();
        game.play(&mut rec.frame(&ScriptedInput::key(key), 0.0), encounter)
    }

    /// Spin until an eligible letter is on top.
    fn find_live(game: &mut WheelGame, rec: &mut Recorder, encounter: &mut Encounter) {
        for _ in 0..10_000 {
            let index = slice_index(game.angle, game.letters.len());
            if game.letters[index].letter.is_eligible() {
                return;
            }
            game.play(&mut rec.frame(&ScriptedInput::none(), 0.01), encounter);
        }
        panic!("no live letter came around");
    }

    fn started(config: &WheelConfig) -> (WheelGame, Recorder, Encounter) {
        let mut game = WheelGame::new(config).unwrap();
        let mut rec = Recorder::default();
        game.setup(&mut rec.frame(&ScriptedInput::none(), 0.0));
        (game, rec, Encounter::new(&EncounterConfig::default()))
    }

    #[test]
    fn top_slice_at_rest_is_the_first_letter() {
        assert_eq!(slice_index(0.0, 4), 0);
        assert_eq!(slice_index(44.0, 4), 0);
        assert_eq!(slice_index(359.0, 4), 0);
    }

    #[test]
    fn turning_counter_clockwise_brings_the_last_letter_up() {
        assert_eq!(slice_index(90.0, 4), 3);
        assert_eq!(slice_index(180.0, 4), 2);
        assert_eq!(slice_index(270.0, 4), 1);
        assert_eq!(slice_index(-90.0, 4), 1);
    }

    #[test]
    fn slice_index_stays_in_range() {
        for count in 1..12 {
            for step in 0..720 {
                assert!(slice_index(step as f32 * 0.5, count) < count);
            }
        }
    }

    #[test]
    fn letters_start_on_the_circle() {
        let (game, rec, _) = started(&config(SpeedIncrement::Additive(1.0)));
        let center = Vec2::from(game.config.center);
        let top = rec.glyphs.slots[&game.letters[0].slot].position;
        assert!((top - (center + Vec2::new(0.0, game.config.letter_padding))).length() < 1e-4);
        let left = rec.glyphs.slots[&game.letters[1].slot].position;
        assert!((left - (center + Vec2::new(-game.config.letter_padding, 0.0))).length() < 1e-4);
    }

    #[test]
    fn additive_speed_grows_by_a_constant() {
        let (mut game, mut rec, mut encounter) = started(&config(SpeedIncrement::Additive(4.0)));
        for n in 1..=3 {
            find_live(&mut game, &mut rec, &mut encounter);
            press_live(&mut game, &mut rec, &mut encounter);
            assert!((game.speed() - (10.0 + 4.0 * n as f32)).abs() < 1e-4);
        }
    }

    #[test]
    fn base_relative_speed_grows_linearly() {
        let (mut game, mut rec, mut encounter) = started(&config(SpeedIncrement::Linear(0.5)));
        for n in 1..=3 {
            find_live(&mut game, &mut rec, &mut encounter);
            press_live(&mut game, &mut rec, &mut encounter);
            assert!((game.speed() - (10.0 + 10.0 * 0.5 * n as f32)).abs() < 1e-4);
        }
    }

    #[test]
    fn current_relative_speed_compounds() {
        let (mut game, mut rec, mut encounter) = started(&config(SpeedIncrement::Exponential(1.5)));
        for n in 1..=3 {
            find_live(&mut game, &mut rec, &mut encounter);
            press_live(&mut game, &mut rec, &mut encounter);
            assert!((game.speed() - 10.0 * 1.5f32.powi(n)).abs() < 1e-3);
        }
    }

    #[test]
    fn each_correct_letter_flips_the_spin() {
        let (mut game, mut rec, mut encounter) = started(&config(SpeedIncrement::Additive(0.0)));
        assert!(!game.is_counter_clockwise());
        press_live(&mut game, &mut rec, &mut encounter);
        assert!(game.is_counter_clockwise());
        find_live(&mut game, &mut rec, &mut encounter);
        press_live(&mut game, &mut rec, &mut encounter);
        assert!(!game.is_counter_clockwise());
    }

    #[test]
    fn spelling_the_word_moves_on_and_resets_the_wheel() {
        let (mut game, mut rec, mut encounter) = started(&config(SpeedIncrement::Additive(5.0)));
        for _ in 0..4 {
            find_live(&mut game, &mut rec, &mut encounter);
            press_live(&mut game, &mut rec, &mut encounter);
        }
        assert_eq!(game.word_index(), 1);
        assert_eq!(game.letters.len(), 3);
        assert_eq!(game.speed(), 10.0);
        assert_eq!(game.angle, 0.0);
        assert!(!game.is_counter_clockwise());
        assert_eq!(rec.glyphs.removed.len(), 4);
        // Four letters at two damage each.
        assert_eq!(encounter.boss.health(), 112);
    }

    #[test]
    fn per_word_damage_lands_once_the_word_is_done() {
        let mut cfg = config(SpeedIncrement::Additive(0.0));
        cfg.individual_letter_damage = false;
        cfg.boss_damage = 7;
        let (mut game, mut rec, mut encounter) = started(&cfg);
        for _ in 0..3 {
            find_live(&mut game, &mut rec, &mut encounter);
            press_live(&mut game, &mut rec, &mut encounter);
        }
        assert_eq!(encounter.boss.health(), 120);
        find_live(&mut game, &mut rec, &mut encounter);
        press_live(&mut game, &mut rec, &mut encounter);
        assert_eq!(encounter.boss.health(), 113);
    }

    #[test]
    fn miss_clicks_hurt_only_when_punished() {
        let mut cfg = config(SpeedIncrement::Additive(0.0));
        let (mut game, mut rec, mut encounter) = started(&cfg);
        game.play(&mut rec.frame(&ScriptedInput::key(Key::Q), 0.0), &mut encounter);
        assert_eq!(encounter.player.health(), 5);

        cfg.punish_miss_click = true;
        let (mut game, mut rec, mut encounter) = started(&cfg);
        game.play(&mut rec.frame(&ScriptedInput::key(Key::Q), 0.0), &mut encounter);
        assert_eq!(encounter.player.health(), 4);
        assert_eq!(rec.animator.played(Actor::Boss, clips::BOSS_ATTACK), 1);
        // The letter was reset, so it can still be taken.
        assert_eq!(press_live(&mut game, &mut rec, &mut encounter), None);
        assert_eq!(game.pressed, 1);
    }

    #[test]
    fn reaching_a_threshold_ends_the_round() {
        let mut cfg = config(SpeedIncrement::Additive(0.0));
        cfg.boss_damage = 40;
        let (mut game, mut rec, mut encounter) = started(&cfg);
        assert_eq!(
            press_live(&mut game, &mut rec, &mut encounter),
            Some(RoundEnd::ThresholdReached)
        );
        assert_eq!(encounter.boss.health(), 90);
    }
}
