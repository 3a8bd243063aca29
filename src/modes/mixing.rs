//! Mixing: build a word out of a scattered pool of letters, then submit it.

use std::collections::HashSet;

use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::Rng;

use super::config::{MixingConfig, Tunables};
use super::round::Minigame;
use crate::combat::{clips, Encounter};
use crate::core::{ConfigError, Countdown, Cue, Frame, ModeId, RoundEnd, SceneId, SlotAllocator, SlotId};
use crate::letters::{Key, Letter, LetterSlot, LetterStatus};
use crate::transition::{TransitionCue, TransitionKind};

/// Candidate positions tried before a pool letter may overlap another.
const SCATTER_TRIES: usize = 500;
/// Re-rolls before a recently seen word is accepted again.
const WORD_REROLLS: usize = 100;

/// Whether a guess is long enough and one of the accepted answers.
pub fn accepts(guess: &str, answers: &[String]) -> bool {
    guess.len() > 2 && answers.iter().any(|answer| answer == guess)
}

/// Gap between letters of the first pool, laid out across the spawn disc by
/// word length. Decoys continue the row past the right edge.
fn first_word_spacing(word_len: usize, radius: f32) -> f32 {
    if word_len > 1 {
        radius * 2.0 / (word_len - 1) as f32
    } else {
        0.0
    }
}

/// Pick the next word, avoiding recently seen ones.
///
/// Once every word has been seen the history is cleared. After
/// [`WORD_REROLLS`] rejected draws a repeat is accepted.
pub fn pick_word(word_count: usize, recent: &mut HashSet<usize>, rng: &mut impl Rng) -> usize {
    if recent.len() >= word_count {
        recent.clear();
    }
    let mut word = rng.gen_range(0..word_count);
    let mut rerolls = 0;
    while recent.contains(&word) && rerolls < WORD_REROLLS {
        word = rng.gen_range(0..word_count);
        rerolls += 1;
    }
    recent.insert(word);
    word
}

fn overlaps(a: Vec2, b: Vec2) -> bool {
    (a.x - b.x).abs() < 1.0 && (a.y - b.y).abs() < 1.0
}

fn in_disc(radius: f32, rng: &mut impl Rng) -> Vec2 {
    let angle = rng.gen_range(0.0..std::f32::consts::TAU);
    let distance = radius * rng.gen::<f32>().sqrt();
    Vec2::new(angle.cos(), angle.sin()) * distance
}

pub struct MixingGame {
    config: MixingConfig,
    rng: StdRng,
    slots: SlotAllocator,
    word: usize,
    recent: HashSet<usize>,
    first_word: bool,
    pool: Vec<LetterSlot>,
    guess_slots: Vec<SlotId>,
    guess: String,
    pause: Countdown,
}

impl MixingGame {
    pub fn new(config: &MixingConfig, rng: StdRng) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut config = config.clone();
        for word in &mut config.words {
            *word = word.to_lowercase();
        }
        for answer in config.guesses.iter_mut().flatten() {
            *answer = answer.to_lowercase();
        }
        Ok(Self {
            config,
            rng,
            slots: SlotAllocator::default(),
            word: 0,
            recent: HashSet::new(),
            first_word: true,
            pool: Vec::new(),
            guess_slots: Vec::new(),
            guess: String::new(),
            pause: Countdown::default(),
        })
    }

    pub fn word_index(&self) -> usize {
        self.word
    }

    pub fn guess(&self) -> &str {
        &self.guess
    }

    pub fn pool_size(&self) -> usize {
        self.pool.len()
    }

    pub fn is_paused(&self) -> bool {
        self.pause.is_running()
    }

    fn setup_word(&mut self, frame: &mut Frame) {
        self.guess.clear();
        let word = self.config.words[self.word].clone();
        let mut letters: Vec<Letter> = word.chars().filter_map(|c| Letter::from_char(true, c)).collect();
        if !self.config.decoy_exempt_words.contains(&self.word) {
            for _ in 0..self.config.decoy_letters {
                letters.push(Letter::random(true, &mut self.rng));
            }
        }

        let center = Vec2::from(self.config.center);
        let radius = self.config.spawn_radius;
        let spacing = first_word_spacing(word.len(), radius);
        let mut positions: Vec<Vec2> = Vec::with_capacity(letters.len());
        for i in 0..letters.len() {
            let position = if self.first_word {
                Vec2::new(-radius + spacing * i as f32, self.rng.gen_range(-1.0..=1.0) * radius)
            } else {
                self.scatter(&positions)
            };
            positions.push(position);
        }

        self.pool = letters
            .into_iter()
            .map(|letter| LetterSlot::new(letter, self.slots.next()))
            .collect();
        for (entry, position) in self.pool.iter().zip(&positions) {
            entry.spawn(frame.glyphs, center + *position, frame.time);
        }

        let padding = self.config.letter_padding;
        let offset = -((word.len().max(1) - 1) as f32 * padding) / 2.0;
        let row_y = -radius * 1.2 * self.config.guess_padding;
        self.guess_slots = (0..self.pool.len()).map(|_| self.slots.next()).collect();
        for (i, slot) in self.guess_slots.iter().enumerate() {
            let position = center + Vec2::new(offset + i as f32 * padding, row_y);
            frame.glyphs.set_position(*slot, position);
            frame.glyphs.set_visible(*slot, false);
        }
    }

    fn scatter(&mut self, taken: &[Vec2]) -> Vec2 {
        let mut candidate = in_disc(self.config.spawn_radius, &mut self.rng);
        for _ in 1..SCATTER_TRIES {
            if !taken.iter().any(|other| overlaps(*other, candidate)) {
                break;
            }
            candidate = in_disc(self.config.spawn_radius, &mut self.rng);
        }
        candidate
    }

    fn clear_word(&mut self, frame: &mut Frame) {
        for entry in self.pool.drain(..) {
            frame.glyphs.remove(entry.slot);
        }
        for slot in self.guess_slots.drain(..) {
            frame.glyphs.remove(slot);
        }
    }

    /// Take at most one pool letter for this frame's key press.
    fn take_letter(&mut self, frame: &mut Frame, encounter: &mut Encounter) {
        let mut taken = None;
        for entry in self.pool.iter_mut().filter(|e| e.letter.is_eligible()) {
            entry.letter.check_press(frame.input);
            let status = entry.letter.status();
            entry.letter.reset();
            if status == LetterStatus::Pressed {
                entry.letter.set_eligible(false);
                entry.paint(frame.glyphs, frame.time);
                taken = Some(entry.letter.key());
                break;
            }
        }

        match taken {
            Some(key) => {
                let Some(&slot) = self.guess_slots.get(self.guess.len()) else {
                    return;
                };
                self.guess.push(key.to_char());
                frame.glyphs.set_text(slot, &key.label().to_string());
                frame.glyphs.set_color(slot, Color::BLACK);
                frame.glyphs.set_visible(slot, true);
                frame.audio.play_one_shot(Cue::Keyboard);
            }
            None => {
                let letter_key = Key::ALL.iter().any(|k| frame.input.is_key_down(*k));
                if letter_key && self.config.punish_miss_click {
                    debug!("Mixing miss, no live letter for that key");
                    encounter.damage_player(self.config.player_damage, frame);
                }
            }
        }
    }

    fn submit(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        if self.guess.len() <= 2 {
            return None;
        }

        if !accepts(&self.guess, &self.config.guesses[self.word]) {
            debug!("Rejected guess {:?}", self.guess);
            self.guess.clear();
            for entry in &mut self.pool {
                entry.letter.reset();
                entry.letter.set_eligible(true);
            }
            for slot in &self.guess_slots {
                frame.glyphs.set_visible(*slot, false);
            }
            encounter.damage_player(self.config.player_damage, frame);
            return None;
        }

        info!("Accepted guess {:?}", self.guess);
        frame.audio.play_one_shot(Cue::ValidateWord);
        let damage = self.guess.len() as u32 * self.config.boss_damage;
        self.first_word = false;
        if let Some(end) = RoundEnd::from_boss(encounter.damage_boss(damage, frame)) {
            return Some(end);
        }

        self.word = pick_word(self.config.words.len(), &mut self.recent, &mut self.rng);
        self.pause.start(self.config.inter_round_delay);
        self.clear_word(frame);
        None
    }
}

impl Minigame for MixingGame {
    fn mode(&self) -> Option<ModeId> {
        Some(ModeId::Mixing)
    }

    fn setup(&mut self, frame: &mut Frame) {
        self.word = pick_word(self.config.words.len(), &mut self.recent, &mut self.rng);
        self.setup_word(frame);
    }

    fn play(&mut self, frame: &mut Frame, encounter: &mut Encounter) -> Option<RoundEnd> {
        if self.pause.is_running() {
            if self.pause.tick(frame.dt) {
                self.setup_word(frame);
            }
            return None;
        }

        for entry in &self.pool {
            entry.paint(frame.glyphs, frame.time);
        }

        if frame.input.confirm_down() {
            return self.submit(frame, encounter);
        }
        if frame.input.any_key_down() {
            self.take_letter(frame, encounter);
        }
        None
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
