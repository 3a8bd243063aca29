//! Audio module - one-shot cues and the looping music track.

mod plugin;

pub use plugin::{AudioAssets, CueQueue, GameAudioPlugin, MusicChannel};
