//! The single orthographic camera.

use bevy::prelude::*;

use super::glyphs::to_screen;
use crate::core::CameraRig;

/// Requested framing, applied to the camera every frame.
#[derive(Resource, Debug, Clone, Copy, PartialEq)]
pub struct CameraFraming {
    pub center: Vec2,
    pub scale: f32,
}

impl Default for CameraFraming {
    fn default() -> Self {
        Self {
            center: Vec2::ZERO,
            scale: 1.0,
        }
    }
}

impl CameraRig for CameraFraming {
    fn frame(&mut self, center: Vec2, scale: f32) {
        self.center = center;
        self.scale = scale;
    }
}

#[derive(Component)]
pub struct MainCamera;

pub fn spawn_camera(mut commands: Commands) {
    commands.spawn((Camera2d, MainCamera));
}

pub fn apply_framing(
    framing: Res<CameraFraming>,
    mut cameras: Query<(&mut Transform, &mut OrthographicProjection), With<MainCamera>>,
) {
    if !framing.is_changed() {
        return;
    }
    for (mut transform, mut projection) in &mut cameras {
        let z = transform.translation.z;
        transform.translation = to_screen(framing.center, z);
        projection.scale = framing.scale;
    }
}
