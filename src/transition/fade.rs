//! Fade-out overlay driven by a shader-time parameter.

use crate::combat::clips;
use crate::core::{Actor, Animator};

#[derive(Debug, Clone, Default)]
pub struct FadeSequence {
    shader_time: f32,
}

impl FadeSequence {
    /// Start the fade clip from zero.
    pub fn start(animator: &mut dyn Animator) -> Self {
        animator.play_clip(Actor::Fade, clips::FADE_OUT);
        animator.set_float(Actor::Fade, clips::CUSTOM_TIME, 0.0);
        Self { shader_time: 0.0 }
    }

    pub fn shader_time(&self) -> f32 {
        self.shader_time
    }

    pub fn tick(&mut self, dt: f32, animator: &mut dyn Animator) {
        self.shader_time += dt;
        animator.set_float(Actor::Fade, clips::CUSTOM_TIME, self.shader_time);
    }

    /// The fade clip has played through once.
    pub fn has_ended(&self, animator: &dyn Animator) -> bool {
        animator.is_past_normalized_time(Actor::Fade, 1.0)
    }
}
