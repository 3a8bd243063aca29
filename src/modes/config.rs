//! Mode tunables loaded from RON files under `assets/data/`.
//!
//! Every table has a `Default` matching the shipped data, so a missing or
//! broken file degrades to a playable game with a logged warning.

use bevy::prelude::*;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use std::fs;
use std::path::Path;

use crate::combat::EncounterConfig;
use crate::core::{ConfigError, SceneId};
use crate::transition::ZoomSettings;

/// Root directory of the data files.
pub const DATA_DIR: &str = "assets/data";

/// A RON-backed tunables table.
pub trait Tunables: DeserializeOwned + Default {
    /// Name used in log lines and errors
    const SECTION: &'static str;
    /// Path relative to [`DATA_DIR`]
    const FILE: &'static str;

    fn validate(&self) -> Result<(), ConfigError> {
        Ok(())
    }
}

/// Parse and validate a table from RON source.
pub fn parse_tunables<T: Tunables>(source: &str, path: &str) -> Result<T, ConfigError> {
    let value: T = ron::from_str(source).map_err(|e| ConfigError::ParseError {
        path: path.to_string(),
        details: e.to_string(),
    })?;
    value.validate()?;
    Ok(value)
}

/// Read one table from `dir`.
pub fn read_tunables<T: Tunables>(dir: &Path) -> Result<T, ConfigError> {
    let path = dir.join(T::FILE);
    let display = path.display().to_string();
    if !path.exists() {
        return Err(ConfigError::FileNotFound(display));
    }
    let contents = fs::read_to_string(&path).map_err(|e| ConfigError::ReadError {
        path: display.clone(),
        details: e.to_string(),
    })?;
    parse_tunables(&contents, &display)
}

/// Read one table, falling back to its defaults on any failure.
pub fn load_or_default<T: Tunables>(dir: &Path) -> T {
    match read_tunables::<T>(dir) {
        Ok(value) => {
            info!("Loaded {} tunables from {}", T::SECTION, T::FILE);
            value
        }
        Err(ConfigError::FileNotFound(path)) => {
            warn!("Could not find {}. Using default {} tunables.", path, T::SECTION);
            T::default()
        }
        Err(e) => {
            error!("{}. Using default {} tunables.", e, T::SECTION);
            T::default()
        }
    }
}

fn check_words<'a>(
    section: &'static str,
    words: impl IntoIterator<Item = &'a String>,
) -> Result<(), ConfigError> {
    let mut any = false;
    for word in words {
        any = true;
        if word.is_empty() || !word.chars().all(|c| c.is_ascii_alphabetic()) {
            return Err(ConfigError::invalid(
                section,
                format!("word {:?} must be non-empty and use letters a-z only", word),
            ));
        }
    }
    if !any {
        return Err(ConfigError::invalid(section, "no words configured"));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct TitleConfig {
    pub word: String,
    /// Left end of the word row
    pub origin: (f32, f32),
    pub letter_padding: f32,
    pub next_scene: SceneId,
}

impl Default for TitleConfig {
    fn default() -> Self {
        Self {
            word: "start".to_string(),
            origin: (-2.4, -1.5),
            letter_padding: 1.2,
            next_scene: SceneId::Wheel,
        }
    }
}

impl Tunables for TitleConfig {
    const SECTION: &'static str = "title";
    const FILE: &'static str = "modes/title.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        check_words(Self::SECTION, [&self.word])
    }
}

/// How the wheel speeds up after each correct letter.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub enum SpeedIncrement {
    /// `speed += amount`
    Additive(f32),
    /// `speed += base * factor`, linear in the number of presses
    Linear(f32),
    /// `speed *= factor`, exponential in the number of presses
    Exponential(f32),
}

impl SpeedIncrement {
    pub fn apply(self, current: f32, base: f32) -> f32 {
        match self {
            SpeedIncrement::Additive(amount) => current + amount,
            SpeedIncrement::Linear(factor) => current + base * factor,
            SpeedIncrement::Exponential(factor) => current * factor,
        }
    }
}

/// Rotation settings for one wheel word.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct WheelSpeed {
    /// Degrees per second
    pub base: f32,
    pub increment: SpeedIncrement,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct WheelConfig {
    pub center: (f32, f32),
    /// Distance from the centre to each letter
    pub letter_padding: f32,
    /// Indexed by word, wrapping when shorter than `words`
    pub speeds: Vec<WheelSpeed>,
    pub player_damage: u32,
    pub boss_damage: u32,
    /// Hurt the player when the live letter sees a wrong key
    pub punish_miss_click: bool,
    /// Damage the boss per letter instead of per word
    pub individual_letter_damage: bool,
    pub words: Vec<String>,
    pub next_scene: SceneId,
}

impl Default for WheelConfig {
    fn default() -> Self {
        Self {
            center: (-1.5, 0.0),
            letter_padding: 2.2,
            speeds: vec![
                WheelSpeed {
                    base: 60.0,
                    increment: SpeedIncrement::Additive(15.0),
                },
                WheelSpeed {
                    base: 70.0,
                    increment: SpeedIncrement::Linear(0.2),
                },
                WheelSpeed {
                    base: 80.0,
                    increment: SpeedIncrement::Exponential(1.15),
                },
            ],
            player_damage: 1,
            boss_damage: 2,
            punish_miss_click: false,
            individual_letter_damage: true,
            words: vec!["robot".into(), "circuit".into(), "voltage".into()],
            next_scene: SceneId::Mixing,
        }
    }
}

impl WheelConfig {
    pub fn speed_for(&self, word: usize) -> WheelSpeed {
        self.speeds[word % self.speeds.len()]
    }
}

impl Tunables for WheelConfig {
    const SECTION: &'static str = "wheel";
    const FILE: &'static str = "modes/wheel.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        check_words(Self::SECTION, &self.words)?;
        if self.speeds.is_empty() {
            return Err(ConfigError::invalid(Self::SECTION, "no speed settings"));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MixingConfig {
    pub center: (f32, f32),
    /// Radius of the disc the pool letters are scattered in
    pub spawn_radius: f32,
    /// Spacing of the guess row
    pub letter_padding: f32,
    /// Multiplier on how far below the pool the guess row sits
    pub guess_padding: f32,
    pub words: Vec<String>,
    /// Accepted guesses, one list per word
    pub guesses: Vec<Vec<String>>,
    /// Random extra letters added to the pool
    pub decoy_letters: usize,
    /// Word indices that never get decoys
    pub decoy_exempt_words: Vec<usize>,
    /// Seconds between a solved word and the next
    pub inter_round_delay: f32,
    pub player_damage: u32,
    /// Per letter of an accepted guess
    pub boss_damage: u32,
    /// Hurt the player on a key that matches no pool letter
    pub punish_miss_click: bool,
    pub next_scene: SceneId,
}

impl Default for MixingConfig {
    fn default() -> Self {
        Self {
            center: (-1.5, 1.0),
            spawn_radius: 2.5,
            letter_padding: 1.0,
            guess_padding: 1.0,
            words: vec!["steam".into(), "gears".into(), "spark".into()],
            guesses: vec![
                vec!["steam".into(), "meats".into(), "mates".into(), "team".into(), "seat".into()],
                vec!["gears".into(), "rages".into(), "sager".into(), "ears".into(), "gear".into()],
                vec!["spark".into(), "parks".into(), "park".into(), "spar".into(), "arks".into()],
            ],
            decoy_letters: 2,
            decoy_exempt_words: vec![0],
            inter_round_delay: 1.0,
            player_damage: 1,
            boss_damage: 2,
            punish_miss_click: false,
            next_scene: SceneId::Hopscotch,
        }
    }
}

impl Tunables for MixingConfig {
    const SECTION: &'static str = "mixing";
    const FILE: &'static str = "modes/mixing.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        check_words(Self::SECTION, &self.words)?;
        if self.guesses.len() != self.words.len() {
            return Err(ConfigError::invalid(
                Self::SECTION,
                format!(
                    "{} guess lists for {} words",
                    self.guesses.len(),
                    self.words.len()
                ),
            ));
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct HopscotchConfig {
    /// Where the player stands before the first hop
    pub start_position: (f32, f32),
    /// Seconds of ignored input after landing on a black letter
    pub stun_time: f32,
    pub min_speed: f32,
    pub max_speed: f32,
    pub slowed_speed: f32,
    /// Seconds of scrolling until `max_speed`
    pub time_to_max: f32,
    /// Seconds of scrolling before slowing down
    pub time_when_slowed: f32,
    /// Seconds spent going from `max_speed` to `slowed_speed`
    pub time_to_slowed: f32,
    pub next_scene: SceneId,
}

impl Default for HopscotchConfig {
    fn default() -> Self {
        Self {
            start_position: (-3.0, 0.0),
            stun_time: 0.8,
            min_speed: 1.0,
            max_speed: 2.5,
            slowed_speed: 1.5,
            time_to_max: 10.0,
            time_when_slowed: 25.0,
            time_to_slowed: 5.0,
            next_scene: SceneId::Memory,
        }
    }
}

impl Tunables for HopscotchConfig {
    const SECTION: &'static str = "hopscotch";
    const FILE: &'static str = "modes/hopscotch.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        if self.time_to_max <= 0.0 || self.time_to_slowed <= 0.0 {
            return Err(ConfigError::invalid(
                Self::SECTION,
                "ramp durations must be positive",
            ));
        }
        if self.min_speed > self.max_speed {
            return Err(ConfigError::invalid(
                Self::SECTION,
                "min_speed is above max_speed",
            ));
        }
        Ok(())
    }
}

/// Number of letters shown on the first pass of each word.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
pub enum StartAmount {
    Fixed(usize),
    /// Uniform in `lo..hi`
    Random(usize, usize),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct MemoryConfig {
    pub center: (f32, f32),
    pub letter_padding: f32,
    pub start_amount: StartAmount,
    /// Seconds before the letters are hidden
    pub invisibility_delay: f32,
    /// Letters added after each completed pass
    pub letter_increment: usize,
    /// Shuffle the word unless it is shown in full
    pub shuffle: bool,
    /// Row `r` draws its word from `rows[r % rows.len()]`
    pub rows: Vec<Vec<String>>,
    pub player_damage: u32,
    /// Per letter of a completed word
    pub boss_damage: u32,
    pub next_scene: SceneId,
}

impl Default for MemoryConfig {
    fn default() -> Self {
        Self {
            center: (-1.5, 0.0),
            letter_padding: 1.1,
            start_amount: StartAmount::Fixed(2),
            invisibility_delay: 1.5,
            letter_increment: 1,
            shuffle: false,
            rows: vec![
                vec!["bolt".into(), "wire".into(), "gear".into()],
                vec!["rivet".into(), "motor".into(), "laser".into()],
                vec!["piston".into(), "magnet".into(), "socket".into()],
            ],
            player_damage: 1,
            boss_damage: 2,
            next_scene: SceneId::Ending,
        }
    }
}

impl Tunables for MemoryConfig {
    const SECTION: &'static str = "memory";
    const FILE: &'static str = "modes/memory.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        match self.start_amount {
            StartAmount::Fixed(0) => {
                return Err(ConfigError::invalid(Self::SECTION, "start amount must be at least 1"));
            }
            StartAmount::Random(lo, hi) if lo >= hi => {
                return Err(ConfigError::invalid(
                    Self::SECTION,
                    format!("random start range {lo}..{hi} is empty"),
                ));
            }
            StartAmount::Random(0, _) => {
                return Err(ConfigError::invalid(Self::SECTION, "start amount must be at least 1"));
            }
            _ => {}
        }
        if self.letter_increment == 0 {
            return Err(ConfigError::invalid(Self::SECTION, "letter increment must be at least 1"));
        }
        if self.rows.is_empty() || self.rows.iter().any(|row| row.is_empty()) {
            return Err(ConfigError::invalid(Self::SECTION, "every row needs at least one word"));
        }
        check_words(Self::SECTION, self.rows.iter().flatten())
    }
}

impl Tunables for EncounterConfig {
    const SECTION: &'static str = "encounter";
    const FILE: &'static str = "encounter.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        if self.boss_health == 0 || self.player_health == 0 {
            return Err(ConfigError::invalid(Self::SECTION, "health pools must be positive"));
        }
        Ok(())
    }
}

impl Tunables for ZoomSettings {
    const SECTION: &'static str = "camera";
    const FILE: &'static str = "camera.ron";

    fn validate(&self) -> Result<(), ConfigError> {
        if self.tight_scale <= 0.0 {
            return Err(ConfigError::invalid(Self::SECTION, "tight_scale must be positive"));
        }
        Ok(())
    }
}

/// Every tunable table, loaded once at startup.
#[derive(Resource, Debug, Clone, Default)]
pub struct GameConfig {
    pub encounter: EncounterConfig,
    pub camera: ZoomSettings,
    pub title: TitleConfig,
    pub wheel: WheelConfig,
    pub mixing: MixingConfig,
    pub hopscotch: HopscotchConfig,
    pub memory: MemoryConfig,
}

impl GameConfig {
    pub fn load(dir: &Path) -> Self {
        Self {
            encounter: load_or_default(dir),
            camera: load_or_default(dir),
            title: load_or_default(dir),
            wheel: load_or_default(dir),
            mixing: load_or_default(dir),
            hopscotch: load_or_default(dir),
            memory: load_or_default(dir),
        }
    }
}
