//! Countdowns and interpolation helpers shared by the minigames.
//!
//! Long-running sequences (stuns, invisibility delays, inter-round pauses,
//! camera zooms) are plain countdowns drained by the frame delta, never
//! callbacks.

/// Linear interpolation with `t` clamped to `[0, 1]`.
pub fn lerp(from: f32, to: f32, t: f32) -> f32 {
    from + (to - from) * t.clamp(0.0, 1.0)
}

/// Component-wise [`lerp`] for RGB triples.
pub fn lerp_rgb(from: [f32; 3], to: [f32; 3], t: f32) -> [f32; 3] {
    [
        lerp(from[0], to[0], t),
        lerp(from[1], to[1], t),
        lerp(from[2], to[2], t),
    ]
}

/// Bounces `t` back and forth between `0` and `length`.
pub fn ping_pong(t: f32, length: f32) -> f32 {
    if length <= 0.0 {
        return 0.0;
    }
    let cycle = t.rem_euclid(length * 2.0);
    if cycle > length {
        length * 2.0 - cycle
    } else {
        cycle
    }
}

/// A timer counting down to zero.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Countdown {
    remaining: f32,
}

impl Countdown {
    pub fn new(seconds: f32) -> Self {
        Self { remaining: seconds }
    }

    pub fn start(&mut self, seconds: f32) {
        self.remaining = seconds;
    }

    pub fn clear(&mut self) {
        self.remaining = 0.0;
    }

    pub fn is_running(&self) -> bool {
        self.remaining > 0.0
    }

    pub fn remaining(&self) -> f32 {
        self.remaining.max(0.0)
    }

    /// Drain `delta` seconds. Returns `true` exactly on the tick the
    /// countdown runs out.
    pub fn tick(&mut self, delta: f32) -> bool {
        if self.remaining <= 0.0 {
            return false;
        }
        self.remaining -= delta;
        self.remaining <= 0.0
    }
}
