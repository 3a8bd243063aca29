//! Narrow interfaces between the letter games and the engine.
//!
//! Gameplay code never touches Bevy entities directly. Each tick it receives a
//! [`Frame`] carrying the elapsed time, the keyboard state and a handle to
//! every output collaborator. The Bevy side implements these traits on
//! command-buffer resources (see the `rendering`, `ui`, `audio` and `session`
//! modules); tests implement them with recorders.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use super::states::{ModeId, SceneId};
use crate::letters::Key;

/// Identity of one on-screen glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SlotId(pub u32);

/// Hands out fresh slot ids for a controller.
#[derive(Debug, Default, Clone)]
pub struct SlotAllocator {
    next: u32,
}

impl SlotAllocator {
    pub fn next(&mut self) -> SlotId {
        let id = SlotId(self.next);
        self.next += 1;
        id
    }
}

/// Animated things a controller can address.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Actor {
    Boss,
    Player,
    /// The breakable wall at the end of the hopscotch course
    Wall,
    /// Full-screen fade-out overlay
    Fade,
}

/// One-shot sound effects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cue {
    Success,
    Death,
    DamagePlayer,
    DamageFoe,
    Win,
    Keyboard,
    ValidateWord,
    JumpNSlide,
}

/// Section of the looping music track.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum MusicState {
    Intro,
    LevelOne,
    LevelTwo,
    LevelThree,
    LevelFour,
    Outro,
}

impl MusicState {
    pub fn for_mode(mode: ModeId) -> Self {
        match mode {
            ModeId::Wheel => MusicState::LevelOne,
            ModeId::Mixing => MusicState::LevelTwo,
            ModeId::Hopscotch => MusicState::LevelThree,
            ModeId::Memory => MusicState::LevelFour,
        }
    }
}

/// Per-frame keyboard state. Level-triggered: a key is either pressed this
/// frame or it is not.
pub trait InputSource {
    fn is_key_down(&self, key: Key) -> bool;
    fn any_key_down(&self) -> bool;
    /// Return/Enter pressed this frame.
    fn confirm_down(&self) -> bool;
}

/// A glyph per slot. Slots come into existence on first use.
pub trait GlyphDisplay {
    fn set_text(&mut self, slot: SlotId, text: &str);
    fn set_color(&mut self, slot: SlotId, color: Color);
    fn set_visible(&mut self, slot: SlotId, visible: bool);
    fn set_position(&mut self, slot: SlotId, position: Vec2);
    fn remove(&mut self, slot: SlotId);
}

pub trait Animator {
    fn play_clip(&mut self, actor: Actor, clip: &str);
    fn set_parameter(&mut self, actor: Actor, name: &str, value: i32);
    fn set_float(&mut self, actor: Actor, name: &str, value: f32);
    /// Whether the clip currently playing on `actor` has run past `t`
    /// (1.0 = one full play-through).
    fn is_past_normalized_time(&self, actor: Actor, t: f32) -> bool;
    /// Place the actor's root in world units.
    fn move_actor(&mut self, actor: Actor, position: Vec2);
}

pub trait HealthDisplay {
    fn set_player_value(&mut self, value: u32);
    fn set_foe_value(&mut self, value: u32);
    fn configure_for_mode(&mut self, mode: ModeId);
    fn set_ranges(&mut self, player_max: u32, foe_max: u32);
}

pub trait AudioCue {
    fn play_one_shot(&mut self, cue: Cue);
    fn set_music_state(&mut self, state: MusicState);
}

/// Orthographic camera framing. `scale` is relative to the base framing (1.0).
pub trait CameraRig {
    fn frame(&mut self, center: Vec2, scale: f32);
}

pub trait SceneLoader {
    fn load_scene(&mut self, scene: SceneId);
    fn reload_current_scene(&mut self);
}

/// Everything a controller may read or drive during one tick.
pub struct Frame<'a> {
    /// Seconds since the previous frame
    pub dt: f32,
    /// Seconds since startup, used for colour pulsing
    pub time: f32,
    pub input: &'a dyn InputSource,
    pub glyphs: &'a mut dyn GlyphDisplay,
    pub animator: &'a mut dyn Animator,
    pub hud: &'a mut dyn HealthDisplay,
    pub audio: &'a mut dyn AudioCue,
    pub camera: &'a mut dyn CameraRig,
    pub scenes: &'a mut dyn SceneLoader,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slot_allocator_never_repeats() {
        let mut slots = SlotAllocator::default();
        let a = slots.next();
        let b = slots.next();
        let c = slots.next();
        assert!(a < b && b < c);
    }

    #[test]
    fn music_follows_play_order() {
        assert_eq!(MusicState::for_mode(ModeId::Wheel), MusicState::LevelOne);
        assert_eq!(MusicState::for_mode(ModeId::Memory), MusicState::LevelFour);
    }
}
