//! Recording fakes for driving controllers frame by frame in tests.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use super::ports::*;
use super::states::{ModeId, SceneId};
use crate::letters::Key;

#[derive(Debug, Default, Clone)]
pub struct ScriptedInput {
    keys: Vec<Key>,
    confirm: bool,
    stray: bool,
}

impl ScriptedInput {
    pub fn none() -> Self {
        Self::default()
    }

    pub fn key(key: Key) -> Self {
        Self {
            keys: vec![key],
            ..Self::default()
        }
    }

    pub fn char(c: char) -> Self {
        Self::key(Key::from_char(c).expect("test key must be a letter"))
    }

    pub fn confirm() -> Self {
        Self {
            confirm: true,
            ..Self::default()
        }
    }

    /// A non-letter key (space, digit, ...) pressed this frame.
    pub fn stray() -> Self {
        Self {
            stray: true,
            ..Self::default()
        }
    }
}

impl InputSource for ScriptedInput {
    fn is_key_down(&self, key: Key) -> bool {
        self.keys.contains(&key)
    }

    fn any_key_down(&self) -> bool {
        !self.keys.is_empty() || self.confirm || self.stray
    }

    fn confirm_down(&self) -> bool {
        self.confirm
    }
}

#[derive(Debug, Default, Clone, PartialEq)]
pub struct GlyphRecord {
    pub text: String,
    pub color: Option<Color>,
    pub visible: bool,
    pub position: Vec2,
}

#[derive(Debug, Default)]
pub struct GlyphLog {
    pub slots: HashMap<SlotId, GlyphRecord>,
    pub removed: Vec<SlotId>,
}

impl GlyphLog {
    pub fn text(&self, slot: SlotId) -> Option<&str> {
        self.slots.get(&slot).map(|g| g.text.as_str())
    }

    pub fn visible(&self, slot: SlotId) -> bool {
        self.slots.get(&slot).is_some_and(|g| g.visible)
    }
}

impl GlyphDisplay for GlyphLog {
    fn set_text(&mut self, slot: SlotId, text: &str) {
        self.slots.entry(slot).or_default().text = text.to_string();
    }

    fn set_color(&mut self, slot: SlotId, color: Color) {
        self.slots.entry(slot).or_default().color = Some(color);
    }

    fn set_visible(&mut self, slot: SlotId, visible: bool) {
        self.slots.entry(slot).or_default().visible = visible;
    }

    fn set_position(&mut self, slot: SlotId, position: Vec2) {
        self.slots.entry(slot).or_default().position = position;
    }

    fn remove(&mut self, slot: SlotId) {
        self.slots.remove(&slot);
        self.removed.push(slot);
    }
}

#[derive(Debug, Default)]
pub struct AnimLog {
    pub clips: Vec<(Actor, String)>,
    pub params: Vec<(Actor, String, i32)>,
    pub floats: HashMap<(Actor, String), f32>,
    /// Actors whose current clip reports as finished.
    pub finished: HashSet<Actor>,
    pub positions: HashMap<Actor, Vec2>,
}

impl AnimLog {
    pub fn played(&self, actor: Actor, clip: &str) -> usize {
        self.clips
            .iter()
            .filter(|(a, c)| *a == actor && c == clip)
            .count()
    }
}

impl Animator for AnimLog {
    fn play_clip(&mut self, actor: Actor, clip: &str) {
        self.clips.push((actor, clip.to_string()));
    }

    fn set_parameter(&mut self, actor: Actor, name: &str, value: i32) {
        self.params.push((actor, name.to_string(), value));
    }

    fn set_float(&mut self, actor: Actor, name: &str, value: f32) {
        self.floats.insert((actor, name.to_string()), value);
    }

    fn is_past_normalized_time(&self, actor: Actor, _t: f32) -> bool {
        self.finished.contains(&actor)
    }

    fn move_actor(&mut self, actor: Actor, position: Vec2) {
        self.positions.insert(actor, position);
    }
}

#[derive(Debug, Default)]
pub struct HudLog {
    pub player: Vec<u32>,
    pub foe: Vec<u32>,
    pub modes: Vec<ModeId>,
    pub ranges: Vec<(u32, u32)>,
}

impl HealthDisplay for HudLog {
    fn set_player_value(&mut self, value: u32) {
        self.player.push(value);
    }

    fn set_foe_value(&mut self, value: u32) {
        self.foe.push(value);
    }

    fn configure_for_mode(&mut self, mode: ModeId) {
        self.modes.push(mode);
    }

    fn set_ranges(&mut self, player_max: u32, foe_max: u32) {
        self.ranges.push((player_max, foe_max));
    }
}

#[derive(Debug, Default)]
pub struct AudioLog {
    pub cues: Vec<Cue>,
    pub music: Vec<MusicState>,
}

impl AudioLog {
    pub fn count(&self, cue: Cue) -> usize {
        self.cues.iter().filter(|c| **c == cue).count()
    }
}

impl AudioCue for AudioLog {
    fn play_one_shot(&mut self, cue: Cue) {
        self.cues.push(cue);
    }

    fn set_music_state(&mut self, state: MusicState) {
        self.music.push(state);
    }
}

#[derive(Debug, Default)]
pub struct CameraLog {
    pub framings: Vec<(Vec2, f32)>,
}

impl CameraRig for CameraLog {
    fn frame(&mut self, center: Vec2, scale: f32) {
        self.framings.push((center, scale));
    }
}

#[derive(Debug, Default)]
pub struct SceneLog {
    pub loads: Vec<SceneId>,
    pub reloads: usize,
}

impl SceneLoader for SceneLog {
    fn load_scene(&mut self, scene: SceneId) {
        self.loads.push(scene);
    }

    fn reload_current_scene(&mut self) {
        self.reloads += 1;
    }
}

/// Every output port, recorded.
#[derive(Debug, Default)]
pub struct Recorder {
    pub time: f32,
    pub glyphs: GlyphLog,
    pub animator: AnimLog,
    pub hud: HudLog,
    pub audio: AudioLog,
    pub camera: CameraLog,
    pub scenes: SceneLog,
}

impl Recorder {
    /// Advance the clock by `dt` and borrow every port as a frame.
    pub fn frame<'a>(&'a mut self, input: &'a ScriptedInput, dt: f32) -> Frame<'a> {
        self.time += dt;
        Frame {
            dt,
            time: self.time,
            input,
            glyphs: &mut self.glyphs,
            animator: &mut self.animator,
            hud: &mut self.hud,
            audio: &mut self.audio,
            camera: &mut self.camera,
            scenes: &mut self.scenes,
        }
    }
}
