//! Title screen: type the start word to begin the fight.

use bevy::prelude::*;

use super::config::{TitleConfig, Tunables};
use super::round::Minigame;
use crate::combat::Encounter;
use crate::core::{ConfigError, Cue, Frame, ModeId, MusicState, RoundEnd, SceneId, SlotAllocator};
use crate::letters::{Letter, LetterSlot, LetterStatus};
use crate::transition::TransitionKind;

pub struct TitleGame {
    config: TitleConfig,
    slots: SlotAllocator,
    letters: Vec<LetterSlot>,
    cursor: usize,
}

impl TitleGame {
    pub fn new(config: &TitleConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let mut config = config.clone();
        config.word = config.word.to_lowercase();
        Ok(Self {
            config,
            slots: SlotAllocator::default(),
            letters: Vec::new(),
            cursor: 0,
        })
    }
}

impl Minigame for TitleGame {
    fn mode(&self) -> Option<ModeId> {
        None
    }

    fn setup(&mut self, frame: &mut Frame) {
        frame.audio.set_music_state(MusicState::Intro);
        let origin = Vec2::from(self.config.origin);
        for (i, c) in self.config.word.chars().enumerate() {
            let Some(letter) = Letter::from_char(true, c) else {
                continue;
            };
            let slot = LetterSlot::new(letter, self.slots.next());
            let position = origin + Vec2::X * self.config.letter_padding * i as f32;
            slot.spawn(frame.glyphs, position, frame.time);
            self.letters.push(slot);
        }
    }

    fn play(&mut self, frame: &mut Frame, _encounter: &mut Encounter) -> Option<RoundEnd> {
        for entry in &self.letters {
            entry.paint(frame.glyphs, frame.time);
        }

        let entry = self.letters.get_mut(self.cursor)?;
        entry.letter.check_press(frame.input);
        if entry.letter.status() != LetterStatus::Pressed {
            return None;
        }

        entry.letter.set_eligible(false);
        entry.paint(frame.glyphs, frame.time);
        frame.audio.play_one_shot(Cue::Keyboard);
        self.cursor += 1;

        if self.cursor < self.letters.len() {
            return None;
        }
        frame.audio.play_one_shot(Cue::Success);
        Some(RoundEnd::Started)
    }

    fn transition(&self, _focus: Vec2) -> TransitionKind {
        TransitionKind::FadeOnly
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
    use crate::core::SlotId;

    fn started() -> (TitleGame, Recorder, Encounter) {
        let mut game = TitleGame::new(&TitleConfig::default()).unwrap();
        let mut rec = Recorder::default();
        game.setup(&mut rec.frame(&ScriptedInput::none(), 0.0));
        (game, rec, Encounter::new(&EncounterConfig::default()))
    }

    #[test]
    fn lays_out_the_word() {
        let (_, rec, _) = started();
        assert_eq!(rec.glyphs.text(SlotId(0)), Some("S"));
        assert_eq!(rec.glyphs.text(SlotId(4)), Some("T"));
        assert_eq!(rec.audio.music, vec![MusicState::Intro]);
    }

    #[test]
    fn typing_the_word_starts_the_game() {
        let (mut game, mut rec, mut encounter) = started();
        let mut end = None;
        for c in "start".chars() {
            end = game.play(&mut rec.frame(&ScriptedInput::char(c), 0.1), &mut encounter);
        }
        assert_eq!(end, Some(RoundEnd::Started));
        assert_eq!(rec.audio.count(Cue::Success), 1);
        assert_eq!(rec.glyphs.slots[&SlotId(0)].color, Some(Color::BLACK));
    }

    #[test]
    fn wrong_keys_are_ignored() {
        let (mut game, mut rec, mut encounter) = started();
        for c in "sxtqart".chars() {
            game.play(&mut rec.frame(&ScriptedInput::char(c), 0.1), &mut encounter);
        }
        assert_eq!(game.cursor, 5);
        assert_eq!(encounter.player.health(), 5);
    }
}
