//! Combat module - boss and player health shared across the minigames.

mod boss;
pub mod clips;
mod encounter;
mod player;

pub use boss::{BossHealthStatus, BossState};
pub use encounter::{Encounter, EncounterConfig};
pub use player::{PlayerState, DEATH_RELOAD_DELAY};
