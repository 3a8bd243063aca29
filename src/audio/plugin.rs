//! Audio plugin - plays what the controllers queued through kira.

use std::collections::HashMap;

use bevy::prelude::*;
use bevy_kira_audio::prelude::*;
use bevy_kira_audio::prelude::AudioSource;

use crate::core::{AudioCue, Cue, MusicState};

/// Sounds requested this frame and the music section wanted next.
#[derive(Resource, Debug, Default)]
pub struct CueQueue {
    pending: Vec<Cue>,
    current_music: Option<MusicState>,
    music_change: Option<MusicState>,
}

impl CueQueue {
    pub fn drain(&mut self) -> std::vec::Drain<'_, Cue> {
        self.pending.drain(..)
    }

    pub fn take_music_change(&mut self) -> Option<MusicState> {
        self.music_change.take()
    }

    pub fn current_music(&self) -> Option<MusicState> {
        self.current_music
    }
}

impl AudioCue for CueQueue {
    fn play_one_shot(&mut self, cue: Cue) {
        self.pending.push(cue);
    }

    fn set_music_state(&mut self, state: MusicState) {
        if self.current_music == Some(state) {
            return;
        }
        self.current_music = Some(state);
        self.music_change = Some(state);
    }
}

/// Channel for the looping music track.
#[derive(Resource)]
pub struct MusicChannel;

fn cue_path(cue: Cue) -> &'static str {
    match cue {
        Cue::Success => "audio/sfx/success.ogg",
        Cue::Death => "audio/sfx/death.ogg",
        Cue::DamagePlayer => "audio/sfx/damage_player.ogg",
        Cue::DamageFoe => "audio/sfx/damage_foe.ogg",
        Cue::Win => "audio/sfx/win.ogg",
        Cue::Keyboard => "audio/sfx/keyboard.ogg",
        Cue::ValidateWord => "audio/sfx/validate_word.ogg",
        Cue::JumpNSlide => "audio/sfx/jump_n_slide.ogg",
    }
}

fn music_path(state: MusicState) -> &'static str {
    match state {
        MusicState::Intro => "audio/music/intro.ogg",
        MusicState::LevelOne => "audio/music/level_one.ogg",
        MusicState::LevelTwo => "audio/music/level_two.ogg",
        MusicState::LevelThree => "audio/music/level_three.ogg",
        MusicState::LevelFour => "audio/music/level_four.ogg",
        MusicState::Outro => "audio/music/outro.ogg",
    }
}

const ALL_CUES: [Cue; 8] = [
    Cue::Success,
    Cue::Death,
    Cue::DamagePlayer,
    Cue::DamageFoe,
    Cue::Win,
    Cue::Keyboard,
    Cue::ValidateWord,
    Cue::JumpNSlide,
];

const ALL_MUSIC: [MusicState; 6] = [
    MusicState::Intro,
    MusicState::LevelOne,
    MusicState::LevelTwo,
    MusicState::LevelThree,
    MusicState::LevelFour,
    MusicState::Outro,
];

/// Handles for every cue and music section.
#[derive(Resource, Default)]
pub struct AudioAssets {
    cues: HashMap<Cue, Handle<AudioSource>>,
    music: HashMap<MusicState, Handle<AudioSource>>,
}

/// Audio plugin - sound effects and music.
pub struct GameAudioPlugin;

impl Plugin for GameAudioPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CueQueue>()
            .init_resource::<AudioAssets>()
            .add_audio_channel::<MusicChannel>()
            .add_systems(Startup, load_audio)
            .add_systems(PostUpdate, (play_cues, switch_music));
    }
}

fn load_audio(asset_server: Res<AssetServer>, mut assets: ResMut<AudioAssets>) {
    for cue in ALL_CUES {
        assets.cues.insert(cue, asset_server.load(cue_path(cue)));
    }
    for state in ALL_MUSIC {
        assets.music.insert(state, asset_server.load(music_path(state)));
    }
    info!("Queued {} sound effects and {} music tracks", ALL_CUES.len(), ALL_MUSIC.len());
}

fn play_cues(audio: Res<Audio>, assets: Res<AudioAssets>, mut queue: ResMut<CueQueue>) {
    for cue in queue.drain() {
        match assets.cues.get(&cue) {
            Some(handle) => {
                audio.play(handle.clone());
            }
            None => warn!("No sound loaded for {:?}", cue),
        }
    }
}

fn switch_music(
    music: Res<AudioChannel<MusicChannel>>,
    assets: Res<AudioAssets>,
    mut queue: ResMut<CueQueue>,
) {
    let Some(state) = queue.take_music_change() else {
        return;
    };
    debug!("Music section -> {:?}", state);
    music.stop();
    if let Some(handle) = assets.music.get(&state) {
        music.play(handle.clone()).looped();
    }
}
