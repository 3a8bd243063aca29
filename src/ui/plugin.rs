//! UI plugin - HUD and the screens around the fight.

use bevy::prelude::*;

use super::hud;
use crate::audio::CueQueue;
use crate::core::{AudioCue, MusicState, SceneId};

/// UI plugin - handles all user interface.
pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        hud::setup_hud_systems(app);

        app
            // Title caption; the start word itself is glyphs
            .add_systems(OnEnter(SceneId::Title), setup_title_caption)
            .add_systems(OnExit(SceneId::Title), cleanup::<TitleUi>)

            // Victory
            .add_systems(OnEnter(SceneId::Ending), setup_victory_screen)
            .add_systems(Update, victory_input.run_if(in_state(SceneId::Ending)))
            .add_systems(OnExit(SceneId::Ending), cleanup::<VictoryUi>);
    }
}

/// Marker for title caption entities.
#[derive(Component)]
struct TitleUi;

/// Marker for victory screen entities.
#[derive(Component)]
struct VictoryUi;

/// Seconds before a key press leaves the victory screen.
const VICTORY_GRACE: f32 = 1.5;

#[derive(Resource)]
struct VictoryTimer(Timer);

fn setup_title_caption(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Start,
                align_items: AlignItems::Center,
                padding: UiRect::top(Val::Px(120.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            TitleUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("GLYPH BRAWL"),
                TextFont {
                    font_size: 80.0,
                    ..default()
                },
                TextColor(Color::srgb(0.8, 0.7, 0.6)),
                Node {
                    margin: UiRect::bottom(Val::Px(20.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Type the word to begin"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.5, 0.5, 0.55)),
            ));
        });
}

fn setup_victory_screen(mut commands: Commands, mut audio: ResMut<CueQueue>) {
    audio.set_music_state(MusicState::Outro);
    commands.insert_resource(VictoryTimer(Timer::from_seconds(VICTORY_GRACE, TimerMode::Once)));

    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Column,
                justify_content: JustifyContent::Center,
                align_items: AlignItems::Center,
                ..default()
            },
            BackgroundColor(Color::srgb(0.05, 0.05, 0.08)),
            VictoryUi,
        ))
        .with_children(|parent| {
            parent.spawn((
                Text::new("THE MACHINE FALLS"),
                TextFont {
                    font_size: 64.0,
                    ..default()
                },
                TextColor(Color::srgb(0.9, 0.8, 0.5)),
                Node {
                    margin: UiRect::bottom(Val::Px(40.0)),
                    ..default()
                },
            ));

            parent.spawn((
                Text::new("Press any key"),
                TextFont {
                    font_size: 24.0,
                    ..default()
                },
                TextColor(Color::srgb(0.6, 0.6, 0.65)),
            ));
        });
}

fn victory_input(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut timer: ResMut<VictoryTimer>,
    mut next_scene: ResMut<NextState<SceneId>>,
) {
    if !timer.0.tick(time.delta()).finished() {
        return;
    }
    if keyboard.get_just_pressed().next().is_some() {
        info!("Back to the title");
        next_scene.set(SceneId::Title);
    }
}

fn cleanup<T: Component>(mut commands: Commands, query: Query<Entity, With<T>>) {
    for entity in query.iter() {
        commands.entity(entity).despawn_recursive();
    }
}
