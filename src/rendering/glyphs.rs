//! Letter glyphs as `Text2d` entities.
//!
//! Controllers write into [`GlyphBoard`]; [`sync_glyphs`] mirrors the board
//! onto entities once per frame, spawning and despawning as slots come and go.

use std::collections::{HashMap, HashSet};

use bevy::prelude::*;

use crate::core::{GlyphDisplay, SlotId};

/// World units to pixels.
pub const PIXELS_PER_UNIT: f32 = 64.0;

const GLYPH_FONT_SIZE: f32 = 44.0;
const GLYPH_Z: f32 = 10.0;

pub fn to_screen(position: Vec2, z: f32) -> Vec3 {
    (position * PIXELS_PER_UNIT).extend(z)
}

#[derive(Debug, Clone, PartialEq)]
struct GlyphState {
    text: String,
    color: Color,
    visible: bool,
    position: Vec2,
}

impl Default for GlyphState {
    fn default() -> Self {
        Self {
            text: String::new(),
            color: Color::WHITE,
            visible: false,
            position: Vec2::ZERO,
        }
    }
}

/// Desired state of every glyph slot.
#[derive(Resource, Default)]
pub struct GlyphBoard {
    glyphs: HashMap<SlotId, GlyphState>,
    dirty: HashSet<SlotId>,
    removed: Vec<SlotId>,
}

impl GlyphBoard {
    /// Drop every slot; used when a controller is torn down.
    pub fn clear(&mut self) {
        self.removed.extend(self.glyphs.drain().map(|(slot, _)| slot));
        self.dirty.clear();
    }

    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }

    fn edit(&mut self, slot: SlotId) -> &mut GlyphState {
        self.dirty.insert(slot);
        self.glyphs.entry(slot).or_default()
    }
}

impl GlyphDisplay for GlyphBoard {
    fn set_text(&mut self, slot: SlotId, text: &str) {
        let glyph = self.edit(slot);
        if glyph.text != text {
            glyph.text = text.to_string();
        }
    }

    fn set_color(&mut self, slot: SlotId, color: Color) {
        self.edit(slot).color = color;
    }

    fn set_visible(&mut self, slot: SlotId, visible: bool) {
        self.edit(slot).visible = visible;
    }

    fn set_position(&mut self, slot: SlotId, position: Vec2) {
        self.edit(slot).position = position;
    }

    fn remove(&mut self, slot: SlotId) {
        if self.glyphs.remove(&slot).is_some() {
            self.removed.push(slot);
        }
        self.dirty.remove(&slot);
    }
}

/// Marker for a glyph entity.
#[derive(Component)]
pub struct Glyph(pub SlotId);

/// Live entity for each slot.
#[derive(Resource, Default)]
pub struct GlyphEntities(HashMap<SlotId, Entity>);

fn visibility(visible: bool) -> Visibility {
    if visible {
        Visibility::Inherited
    } else {
        Visibility::Hidden
    }
}

pub fn sync_glyphs(
    mut commands: Commands,
    mut board: ResMut<GlyphBoard>,
    mut entities: ResMut<GlyphEntities>,
    mut glyphs: Query<(&mut Text2d, &mut TextColor, &mut Visibility, &mut Transform), With<Glyph>>,
) {
    let board = &mut *board;
    for slot in board.removed.drain(..) {
        if let Some(entity) = entities.0.remove(&slot) {
            commands.entity(entity).despawn_recursive();
        }
    }

    for slot in board.dirty.drain() {
        let Some(state) = board.glyphs.get(&slot) else {
            continue;
        };
        let translation = to_screen(state.position, GLYPH_Z);

        if let Some(entity) = entities.0.get(&slot) {
            if let Ok((mut text, mut color, mut vis, mut transform)) = glyphs.get_mut(*entity) {
                if text.0 != state.text {
                    text.0.clone_from(&state.text);
                }
                color.0 = state.color;
                *vis = visibility(state.visible);
                transform.translation = translation;
            }
            continue;
        }

        let entity = commands
            .spawn((
                Text2d::new(state.text.clone()),
                TextFont {
                    font_size: GLYPH_FONT_SIZE,
                    ..default()
                },
                TextColor(state.color),
                Transform::from_translation(translation),
                visibility(state.visible),
                Glyph(slot),
            ))
            .id();
        entities.0.insert(slot, entity);
    }
}
