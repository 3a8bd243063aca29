//! The boss: a health pool with ordered checkpoints.

use serde::{Deserialize, Serialize};

/// What a hit did to the boss.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BossHealthStatus {
    Alive,
    /// Health was clamped to the active checkpoint, which is now spent
    ReachedThreshold,
    Dead,
}

impl BossHealthStatus {
    /// Whether the current minigame should stop.
    pub fn ends_round(self) -> bool {
        !matches!(self, BossHealthStatus::Alive)
    }
}

/// Boss health with checkpoints.
///
/// A single hit never carries health below the active checkpoint: it stops
/// there and the next checkpoint becomes active. Only a hit at least as large
/// as the remaining health kills.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BossState {
    health: u32,
    max_health: u32,
    /// Visited in order, highest first
    thresholds: Vec<u32>,
    current_threshold: usize,
}

impl BossState {
    /// Thresholds are sorted highest-first; values outside `1..max_health`
    /// and duplicates are dropped.
    pub fn new(max_health: u32, thresholds: &[u32]) -> Self {
        let mut thresholds: Vec<u32> = thresholds
            .iter()
            .copied()
            .filter(|t| *t > 0 && *t < max_health)
            .collect();
        thresholds.sort_unstable_by(|a, b| b.cmp(a));
        thresholds.dedup();
        Self {
            health: max_health,
            max_health,
            thresholds,
            current_threshold: 0,
        }
    }

    pub fn health(&self) -> u32 {
        self.health
    }

    pub fn max_health(&self) -> u32 {
        self.max_health
    }

    pub fn is_dead(&self) -> bool {
        self.health == 0
    }

    /// The checkpoint the next hits are clamped to, if any remain.
    pub fn active_threshold(&self) -> Option<u32> {
        self.thresholds.get(self.current_threshold).copied()
    }

    pub fn thresholds_passed(&self) -> usize {
        self.current_threshold
    }

    pub fn apply_damage(&mut self, amount: u32) -> BossHealthStatus {
        if self.health == 0 {
            return BossHealthStatus::Dead;
        }
        if amount >= self.health {
            self.health = 0;
            return BossHealthStatus::Dead;
        }
        self.health -= amount;

        match self.active_threshold() {
            Some(threshold) if self.health <= threshold => {
                self.health = threshold;
                self.current_threshold += 1;
                BossHealthStatus::ReachedThreshold
            }
            _ => BossHealthStatus::Alive,
        }
    }
}
