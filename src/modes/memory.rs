//! Memory: read a word before it disappears, then type it back.
//!
//! Only the first few letters are shown at first. Each completed pass reveals
//! more of the word until the whole of it has been typed, which hits the boss
//! and moves on to the next row of words.

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::Rng;

use super::config::{MemoryConfig, StartAmount, Tunables};
use super::round::Minigame;
use crate::combat::{clips, Encounter};
use crate::core::{ConfigError, Countdown, Cue, Frame, ModeId, RoundEnd, SceneId, SlotAllocator, SlotId};
use crate::letters::{letter_color, Letter, LetterStatus, CONCEALED_GLYPH};
use crate::transition::{TransitionCue, TransitionKind};

pub struct MemoryGame {
    config: MemoryConfig,
    rng: StdRng,
    slots: SlotAllocator,
    start_amount: usize,
    row: usize,
    word: String,
    letters: Vec<Letter>,
    glyphs: Vec<SlotId>,
    concealed: bool,
    cursor: usize,
    amount: usize,
    invisibility: Countdown,
}

impl MemoryGame {
    pub fn new(config: &MemoryConfig, mut rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let start_amount = match config.start_amount {
            StartAmount::Fixed(n) => n,
            StartAmount::Random(lo, hi) => rng.gen_range(lo..hi),
        };
        Ok(Self {
            config: config.clone(),
            rng,
            slots: SlotAllocator::default(),
            start_amount,
            row: 0,
            word: String::new(),
            letters: Vec::new(),
            glyphs: Vec::new(),
            concealed: false,
            cursor: 0,
            amount: 0,
            invisibility: Countdown::default(),
        })
    }

    /// Letters to type on the current pass.
    pub fn visible_count(&self) -> usize {
        self.amount
    }

    pub fn word(&self) -> &str {
        &self.word
    }

    pub fn row(&self) -> usize {
        self.row
    }

    pub fn is_memorising(&self) -> bool {
        self.invisibility.is_running()
    }

    /// The letters the player has to type, in order.
    pub fn expected(&self) -> impl Iterator<Item = &Letter> {
        self.letters.iter().take(self.amount)
    }

    fn pick_word(&mut self) {
        let row = &self.config.rows[self.row % self.config.rows.len()];
        self.word = row[self.rng.gen_range(0..row.len())].to_lowercase();
    }

    fn setup_word(&mut self, frame: &mut Frame) {
        for slot in self.glyphs.drain(..) {
            frame.glyphs.remove(slot);
        }
        self.pick_word();
        self.invisibility.start(self.config.invisibility_delay);
        self.cursor = 0;
        self.amount = self.start_amount.min(self.word.len());

        let center = Vec2::from(self.config.center);
        let padding = self.config.letter_padding;
        let offset = -((self.word.len() - 1) as f32 * padding) / 2.0;
        self.glyphs = (0..self.word.len()).map(|_| self.slots.next()).collect();
        for (i, slot) in self.glyphs.iter().enumerate() {
            frame
                .glyphs
                .set_position(*slot, center + Vec2::new(offset + i as f32 * padding, 0.0));
        }
        self.deal(frame);
    }

    /// Rebuild the letters (shuffled unless shown in full) and show the
    /// first `amount` of them.
    fn deal(&mut self, frame: &mut Frame) {
        self.letters = self
            .word
            .chars()
            .filter_map(|c| Letter::from_char(true, c))
            .collect();
        if self.config.shuffle && self.amount != self.word.len() {
            self.letters.shuffle(&mut self.rng);
        }
        self.concealed = false;
        for (i, slot) in self.glyphs.iter().enumerate() {
            match self.letters.get(i).filter(|_| i < self.amount) {
                Some(letter) => {
                    frame.glyphs.set_text(*slot, &letter.label());
                    frame.glyphs.set_color(*slot, letter_color(letter, frame.time));
                    frame.glyphs.set_visible(*slot, true);
                }
                None => frame.glyphs.set_visible(*slot, false),
            }
        }
    }

    fn conceal(&mut self, frame: &mut Frame) {
        self.concealed = true;
        for slot in self.glyphs.iter().take(self.amount) {
            frame.glyphs.set_text(*slot, CONCEALED_GLYPH);
        }
    }

    fn paint(&self, frame: &mut Frame) {
        for (slot, letter) in self.glyphs.iter().zip(&self.letters).take(self.amount) {
            frame.glyphs.set_color(*slot, letter_color(letter, frame.time));
        }
    }
}

impl Minigame for MemoryGame {
    fn mode(&self) -> Option<ModeId> {
        Some(ModeId::Memory)
    }

    fn setup(&mut self, frame: &mut Frame) {
        self.setup_word(frame);
    }

    fn play(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        self.paint(frame);

        if self.invisibility.tick(frame.dt) {
            self.conceal(frame);
        }
        if self.invisibility.is_running() {
            return None;
        }

        let cursor = self.cursor;
        let letter = self.letters.get_mut(cursor)?;
        letter.check_press(frame.input);
        match letter.status() {
            LetterStatus::NotPressed => return None,
            LetterStatus::Pressed => {}
            LetterStatus::IncorrectKey | LetterStatus::Disabled => {
                debug!("Memory miss at letter {}", cursor);
                self.cursor = 0;
                self.invisibility.start(self.config.invisibility_delay);
                self.deal(frame);
                encounter.damage_player(self.config.player_damage, frame);
                return None;
            }
        }

        letter.set_eligible(false);
        let label = letter.label();
        let color = letter_color(letter, frame.time);
        if let Some(slot) = self.glyphs.get(cursor) {
            frame.glyphs.set_text(*slot, &label);
            frame.glyphs.set_color(*slot, color);
        }
        frame.audio.play_one_shot(Cue::Keyboard);
        self.cursor += 1;

        if self.cursor < self.amount {
            return None;
        }

        if self.amount >= self.letters.len() {
            info!("Memory word {:?} recalled", self.word);
            self.row += 1;
            let damage = self.letters.len() as u32 * self.config.boss_damage;
            if let Some(end) = RoundEnd::from_boss(encounter.damage_boss(damage, frame)) {
                return Some(end);
            }
            self.setup_word(frame);
            return None;
        }

        self.cursor = 0;
        self.amount = (self.amount + self.config.letter_increment).min(self.letters.len());
        self.invisibility.start(self.config.invisibility_delay);
        self.deal(frame);
        None
    }

    fn transition(&self, focus: Vec2) -> TransitionKind {
        TransitionKind::ZoomOnBoss {
            focus,
            cue: TransitionCue {
                boss_clip: clips::BOSS_DEATH,
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
    use rand::SeedableRng;

    fn config(start: usize, increment: usize) -> MemoryConfig {
        MemoryConfig {
            start_amount: StartAmount::Fixed(start),
            letter_increment: increment,
            invisibility_delay: 0.5,
            shuffle: false,
            rows: vec![vec!["apple".into()], vec!["lemon".into()]],
            boss_damage: 3,
            ..MemoryConfig::default()
        }
    }

    fn started(config: &MemoryConfig) -> (MemoryGame, Recorder, Encounter) {
        let mut game = MemoryGame::new(config, StdRng::seed_from_u64(5)).unwrap();
        let mut rec = Recorder::default();
        game.setup(&mut rec.frame(&ScriptedInput::none(), 0.0));
        (game, rec, Encounter::new(&EncounterConfig::default()))
    }

    /// Wait out the reading time, then type the current pass.
    fn type_pass(game: &mut MemoryGame, rec: &mut Recorder, encounter: &mut Encounter) -> Option<RoundEnd> {
        game.play(&mut rec.frame(&ScriptedInput::none(), 0.6), encounter);
        let keys: Vec<Key> = game.expected().map(|l| l.key()).collect();
        let mut end = None;
        for key in keys {
            end = game.play(&mut rec.frame(&ScriptedInput::key(key), 0.1), encounter);
        }
        end
    }

    #[test]
    fn passes_grow_until_the_word_is_complete() {
        let (mut game, mut rec, mut encounter) = started(&config(2, 1));
        let mut counts = vec![game.visible_count()];
        for _ in 0..3 {
            type_pass(&mut game, &mut rec, &mut encounter);
            counts.push(game.visible_count());
        }
        assert_eq!(counts, vec![2, 3, 4, 5]);
        assert_eq!(encounter.boss.health(), 120);

        type_pass(&mut game, &mut rec, &mut encounter);
        assert_eq!(encounter.boss.health(), 120 - 5 * 3);
        assert_eq!(rec.audio.count(Cue::DamageFoe), 1);
        assert_eq!(game.row(), 1);
        assert_eq!(game.word(), "lemon");
        assert_eq!(game.visible_count(), 2);
    }

    #[test]
    fn growth_is_capped_at_the_word_length() {
        let (mut game, mut rec, mut encounter) = started(&config(4, 3));
        assert_eq!(game.visible_count(), 4);
        type_pass(&mut game, &mut rec, &mut encounter);
        assert_eq!(game.visible_count(), 5);
        assert_eq!(encounter.boss.health(), 120);
    }

    #[test]
    fn letters_hide_after_the_delay() {
        let (mut game, mut rec, mut encounter) = started(&config(2, 1));
        let slot = game.glyphs[0];
        assert_eq!(rec.glyphs.text(slot), Some("A"));
        assert!(!rec.glyphs.visible(game.glyphs[2]));

        // Input is ignored while the word is on show.
        game.play(&mut rec.frame(&ScriptedInput::char('a'), 0.1), &mut encounter);
        assert_eq!(game.cursor, 0);

        game.play(&mut rec.frame(&ScriptedInput::none(), 0.5), &mut encounter);
        assert!(!game.is_memorising());
        assert_eq!(rec.glyphs.text(slot), Some(CONCEALED_GLYPH));

        game.play(&mut rec.frame(&ScriptedInput::char('a'), 0.1), &mut encounter);
        assert_eq!(rec.glyphs.text(slot), Some("A"));
    }

    #[test]
    fn a_wrong_key_restarts_the_pass() {
        let (mut game, mut rec, mut encounter) = started(&config(3, 1));
        game.play(&mut rec.frame(&ScriptedInput::none(), 0.6), &mut encounter);
        game.play(&mut rec.frame(&ScriptedInput::char('a'), 0.1), &mut encounter);
        game.play(&mut rec.frame(&ScriptedInput::char('z'), 0.1), &mut encounter);

        assert_eq!(game.cursor, 0);
        assert_eq!(game.visible_count(), 3);
        assert!(game.is_memorising());
        assert_eq!(encounter.player.health(), 4);
        assert_eq!(rec.animator.played(Actor::Boss, clips::BOSS_ATTACK), 1);
        assert_eq!(rec.glyphs.text(game.glyphs[0]), Some("A"));
    }

    #[test]
    fn random_start_stays_in_range() {
        let mut cfg = config(2, 1);
        cfg.start_amount = StartAmount::Random(2, 4);
        for seed in 0..20 {
            let game = MemoryGame::new(&cfg, StdRng::seed_from_u64(seed)).unwrap();
            assert!((2..4).contains(&game.start_amount));
        }
    }

    #[test]
    fn full_words_are_not_shuffled() {
        let mut cfg = config(5, 1);
        cfg.shuffle = true;
        let (game, _, _) = started(&cfg);
        let typed: String = game.expected().map(|l| l.key().to_char()).collect();
        assert_eq!(typed, "apple");
    }

    #[test]
    fn the_boss_dies_in_the_transition() {
        let (game, _, _) = started(&config(2, 1));
        match game.transition(Vec2::ZERO) {
            TransitionKind::ZoomOnBoss { cue, .. } => assert_eq!(cue.boss_clip, clips::BOSS_DEATH),
            TransitionKind::FadeOnly => panic!("memory zooms on the boss"),
        }
    }
}
