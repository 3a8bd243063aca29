//! The player's health pool and death countdown.

use crate::core::Countdown;

/// Seconds the death animation plays before the minigame restarts.
pub const DEATH_RELOAD_DELAY: f32 = 1.0;

#[derive(Debug, Clone, PartialEq)]
pub struct PlayerState {
    health: u32,
    max_health: u32,
    death_timer: Countdown,
    reload_requested: bool,
}

impl PlayerState {
    pub fn new(max_health: u32) -> Self {
        Self {
            health: max_health,
            max_health,
            death_timer: Countdown::default(),
            reload_requested: false,
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

    /// Returns whether the hit was lethal.
    pub fn apply_damage(&mut self, amount: u32) -> bool {
        if amount >= self.health {
            self.kill();
        } else {
            self.health -= amount;
        }
        self.is_dead()
    }

    /// Force death and arm the reload countdown.
    pub fn kill(&mut self) {
        if self.is_dead() && self.death_timer.is_running() {
            return;
        }
        self.health = 0;
        self.death_timer.start(DEATH_RELOAD_DELAY);
        self.reload_requested = false;
    }

    /// Drain the death countdown. Returns `true` once, on the frame the
    /// scene should reload.
    pub fn tick_death(&mut self, dt: f32) -> bool {
        if !self.is_dead() || self.reload_requested {
            return false;
        }
        if self.death_timer.tick(dt) {
            self.reload_requested = true;
            return true;
        }
        false
    }

    /// Back to full health for a retry.
    pub fn revive(&mut self) {
        *self = Self::new(self.max_health);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn damage_decrements() {
        let mut player = PlayerState::new(5);
        assert!(!player.apply_damage(2));
        assert_eq!(player.health(), 3);
    }

    #[test]
    fn overkill_clamps_to_zero() {
        let mut player = PlayerState::new(5);
        assert!(player.apply_damage(9));
        assert_eq!(player.health(), 0);
    }

    #[test]
    fn reload_fires_once_after_the_delay() {
        let mut player = PlayerState::new(5);
        player.kill();
        assert!(!player.tick_death(0.5));
        assert!(player.tick_death(0.6));
        assert!(!player.tick_death(0.6));
    }

    #[test]
    fn repeated_kills_do_not_rearm_the_timer() {
        let mut player = PlayerState::new(5);
        player.kill();
        player.tick_death(0.9);
        player.kill();
        assert!(player.tick_death(0.2));
    }

    #[test]
    fn revive_restores_full_health() {
        let mut player = PlayerState::new(5);
        player.kill();
        player.revive();
        assert_eq!(player.health(), 5);
        assert!(!player.tick_death(2.0));
    }
}
