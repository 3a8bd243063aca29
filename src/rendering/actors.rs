//! Boss, player, wall and fade overlay.
//!
//! [`AnimationBoard`] stands in for an animator controller: it remembers the
//! clip each actor is playing and how far into it the actor is, so gameplay can
//! ask whether a clip has finished. The presentation systems turn clips into
//! simple sprite tints and offsets.

use std::collections::HashMap;

use bevy::prelude::*;

use super::glyphs::to_screen;
use crate::combat::clips;
use crate::core::{Actor, Animator, SceneId};

const ACTOR_Z: f32 = 1.0;

/// Seconds for one play-through of a clip.
pub fn clip_length(clip: &str) -> f32 {
    match clip {
        clips::FADE_OUT => 1.0,
        clips::BOSS_TAKE_DAMAGE | clips::PLAYER_HURT => 0.4,
        clips::BOSS_ATTACK => 0.5,
        clips::BOSS_TRANSITION | clips::BOSS_DEATH => 1.5,
        clips::WALL_BROKEN => 0.6,
        _ => 1.0,
    }
}

#[derive(Debug, Clone, PartialEq)]
struct PlayingClip {
    clip: String,
    elapsed: f32,
}

impl PlayingClip {
    fn normalized_time(&self) -> f32 {
        self.elapsed / clip_length(&self.clip)
    }
}

#[derive(Resource, Default)]
pub struct AnimationBoard {
    playing: HashMap<Actor, PlayingClip>,
    parameters: HashMap<(Actor, String), i32>,
    floats: HashMap<(Actor, String), f32>,
    positions: HashMap<Actor, Vec2>,
}

impl AnimationBoard {
    /// Forget everything; the next scene starts from the default poses.
    pub fn reset(&mut self) {
        self.playing.clear();
        self.parameters.clear();
        self.floats.clear();
        self.positions.clear();
    }

    pub fn advance(&mut self, dt: f32) {
        for clip in self.playing.values_mut() {
            clip.elapsed += dt;
        }
    }

    pub fn clip(&self, actor: Actor) -> Option<&str> {
        self.playing.get(&actor).map(|c| c.clip.as_str())
    }

    pub fn normalized_time(&self, actor: Actor) -> Option<f32> {
        self.playing.get(&actor).map(PlayingClip::normalized_time)
    }

    pub fn parameter(&self, actor: Actor, name: &str) -> Option<i32> {
        self.parameters.get(&(actor, name.to_string())).copied()
    }

    pub fn float(&self, actor: Actor, name: &str) -> Option<f32> {
        self.floats.get(&(actor, name.to_string())).copied()
    }

    pub fn position(&self, actor: Actor) -> Option<Vec2> {
        self.positions.get(&actor).copied()
    }
}

impl Animator for AnimationBoard {
    fn play_clip(&mut self, actor: Actor, clip: &str) {
        self.playing.insert(
            actor,
            PlayingClip {
                clip: clip.to_string(),
                elapsed: 0.0,
            },
        );
    }

    fn set_parameter(&mut self, actor: Actor, name: &str, value: i32) {
        self.parameters.insert((actor, name.to_string()), value);
    }

    fn set_float(&mut self, actor: Actor, name: &str, value: f32) {
        self.floats.insert((actor, name.to_string()), value);
    }

    fn is_past_normalized_time(&self, actor: Actor, t: f32) -> bool {
        self.normalized_time(actor).is_some_and(|n| n > t)
    }

    fn move_actor(&mut self, actor: Actor, position: Vec2) {
        self.positions.insert(actor, position);
    }
}

/// Where actors stand when nothing has moved them.
#[derive(Resource, Debug, Clone)]
pub struct ActorLayout {
    pub boss: Vec2,
    pub player: Vec2,
    pub wall: Vec2,
}

impl Default for ActorLayout {
    fn default() -> Self {
        Self {
            boss: Vec2::new(4.5, 0.5),
            player: Vec2::new(-5.5, -1.5),
            wall: Vec2::new(7.0, 1.0),
        }
    }
}

impl ActorLayout {
    fn home(&self, actor: Actor) -> Vec2 {
        match actor {
            Actor::Boss => self.boss,
            Actor::Player => self.player,
            Actor::Wall => self.wall,
            Actor::Fade => Vec2::ZERO,
        }
    }
}

/// Sprite standing in for an actor.
#[derive(Component)]
pub struct ActorSprite(pub Actor);

/// Full-screen black overlay.
#[derive(Component)]
pub struct FadeOverlay;

const BOSS_SIZE: Vec2 = Vec2::new(160.0, 220.0);
const PLAYER_SIZE: Vec2 = Vec2::new(56.0, 96.0);
const WALL_SIZE: Vec2 = Vec2::new(48.0, 260.0);

/// Boss tint per attack pattern.
const BOSS_PALETTE: [Color; 4] = [
    Color::srgb(0.55, 0.6, 0.7),
    Color::srgb(0.6, 0.5, 0.7),
    Color::srgb(0.5, 0.65, 0.55),
    Color::srgb(0.7, 0.55, 0.45),
];
const PLAYER_COLOR: Color = Color::srgb(0.85, 0.8, 0.55);
const WALL_COLOR: Color = Color::srgb(0.45, 0.35, 0.3);
const HURT_COLOR: Color = Color::srgb(1.0, 0.25, 0.2);

pub fn spawn_actors(mut commands: Commands, layout: Res<ActorLayout>) {
    for (actor, size, color) in [
        (Actor::Boss, BOSS_SIZE, BOSS_PALETTE[0]),
        (Actor::Player, PLAYER_SIZE, PLAYER_COLOR),
        (Actor::Wall, WALL_SIZE, WALL_COLOR),
    ] {
        commands.spawn((
            Sprite::from_color(color, size),
            Transform::from_translation(to_screen(layout.home(actor), ACTOR_Z)),
            Visibility::Hidden,
            ActorSprite(actor),
            Name::new(format!("{actor:?}")),
        ));
    }

    commands.spawn((
        Node {
            width: Val::Percent(100.0),
            height: Val::Percent(100.0),
            position_type: PositionType::Absolute,
            ..default()
        },
        BackgroundColor(Color::BLACK.with_alpha(0.0)),
        GlobalZIndex(100),
        FadeOverlay,
    ));
}

fn shown_in(actor: Actor, scene: SceneId) -> bool {
    match actor {
        Actor::Boss | Actor::Player => scene.mode().is_some(),
        Actor::Wall => scene == SceneId::Hopscotch,
        Actor::Fade => true,
    }
}

fn boss_color(board: &AnimationBoard) -> Color {
    let index = board
        .parameter(Actor::Boss, clips::MINIGAME_INDEX)
        .unwrap_or(0)
        .clamp(0, BOSS_PALETTE.len() as i32 - 1) as usize;
    let base = BOSS_PALETTE[index];
    match (board.clip(Actor::Boss), board.normalized_time(Actor::Boss)) {
        (Some(clips::BOSS_TAKE_DAMAGE), Some(t)) if t < 1.0 => base.mix(&HURT_COLOR, 1.0 - t),
        (Some(clips::BOSS_DEATH), Some(t)) => base.with_alpha((1.0 - t).max(0.0)),
        _ => base,
    }
}

fn player_color(board: &AnimationBoard) -> Color {
    match (board.clip(Actor::Player), board.normalized_time(Actor::Player)) {
        (Some(clips::PLAYER_HURT), Some(t)) if t < 1.0 => PLAYER_COLOR.mix(&HURT_COLOR, 1.0 - t),
        (Some(clips::PLAYER_LOSE), _) => PLAYER_COLOR.with_alpha(0.35),
        _ => PLAYER_COLOR,
    }
}

/// Horizontal lunge of the boss attack, in world units.
fn boss_lunge(board: &AnimationBoard) -> f32 {
    match (board.clip(Actor::Boss), board.normalized_time(Actor::Boss)) {
        (Some(clips::BOSS_ATTACK), Some(t)) if t < 1.0 => -(t * std::f32::consts::PI).sin() * 0.8,
        _ => 0.0,
    }
}

pub fn advance_animations(time: Res<Time>, mut board: ResMut<AnimationBoard>) {
    board.advance(time.delta_secs());
}

pub fn present_actors(
    board: Res<AnimationBoard>,
    layout: Res<ActorLayout>,
    scene: Res<State<SceneId>>,
    mut sprites: Query<(&ActorSprite, &mut Sprite, &mut Transform, &mut Visibility)>,
) {
    for (ActorSprite(actor), mut sprite, mut transform, mut visibility) in &mut sprites {
        let actor = *actor;
        let mut position = board.position(actor).unwrap_or_else(|| layout.home(actor));
        let mut shown = shown_in(actor, *scene.get());

        match actor {
            Actor::Boss => {
                position.x += boss_lunge(&board);
                sprite.color = boss_color(&board);
            }
            Actor::Player => sprite.color = player_color(&board),
            Actor::Wall => {
                if board.clip(Actor::Wall) == Some(clips::WALL_BROKEN) {
                    shown &= !board.is_past_normalized_time(Actor::Wall, 1.0);
                    let t = board.normalized_time(Actor::Wall).unwrap_or(0.0).min(1.0);
                    sprite.color = WALL_COLOR.with_alpha(1.0 - t);
                } else {
                    sprite.color = WALL_COLOR;
                }
            }
            Actor::Fade => {}
        }

        transform.translation = to_screen(position, ACTOR_Z);
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

/// The overlay darkens with the fade shader time.
pub fn present_fade(board: Res<AnimationBoard>, mut overlay: Query<&mut BackgroundColor, With<FadeOverlay>>) {
    let alpha = match board.clip(Actor::Fade) {
        Some(clips::FADE_OUT) => {
            let shader_time = board.float(Actor::Fade, clips::CUSTOM_TIME).unwrap_or(0.0);
            (shader_time / clip_length(clips::FADE_OUT)).clamp(0.0, 1.0)
        }
        _ => 0.0,
    };
    for mut background in &mut overlay {
        background.0 = Color::BLACK.with_alpha(alpha);
    }
}
