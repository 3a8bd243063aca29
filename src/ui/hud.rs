//! In-game HUD - player and boss health.

use bevy::prelude::*;

use crate::core::{HealthDisplay, ModeId, SceneId};

/// Health values the controllers last reported.
#[derive(Resource, Debug, Clone, PartialEq, Default)]
pub struct HudState {
    pub player: u32,
    pub player_max: u32,
    pub foe: u32,
    pub foe_max: u32,
    pub mode: Option<ModeId>,
}

impl HudState {
    pub fn player_fraction(&self) -> f32 {
        fraction(self.player, self.player_max)
    }

    pub fn foe_fraction(&self) -> f32 {
        fraction(self.foe, self.foe_max)
    }
}

fn fraction(value: u32, max: u32) -> f32 {
    if max == 0 {
        return 0.0;
    }
    (value as f32 / max as f32).clamp(0.0, 1.0)
}

impl HealthDisplay for HudState {
    fn set_player_value(&mut self, value: u32) {
        self.player = value;
    }

    fn set_foe_value(&mut self, value: u32) {
        self.foe = value;
    }

    fn configure_for_mode(&mut self, mode: ModeId) {
        self.mode = Some(mode);
    }

    fn set_ranges(&mut self, player_max: u32, foe_max: u32) {
        self.player_max = player_max;
        self.foe_max = foe_max;
    }
}

/// Bar colours per minigame: (player, boss).
fn bar_colors(mode: Option<ModeId>) -> (Color, Color) {
    match mode {
        Some(ModeId::Wheel) | None => (Color::srgb(0.3, 0.8, 0.4), Color::srgb(0.8, 0.2, 0.2)),
        Some(ModeId::Mixing) => (Color::srgb(0.3, 0.7, 0.9), Color::srgb(0.8, 0.3, 0.6)),
        Some(ModeId::Hopscotch) => (Color::srgb(0.9, 0.8, 0.3), Color::srgb(0.85, 0.45, 0.15)),
        Some(ModeId::Memory) => (Color::srgb(0.7, 0.6, 0.95), Color::srgb(0.6, 0.1, 0.1)),
    }
}

/// Marker for HUD root entity.
#[derive(Component)]
pub struct HudRoot;

/// Marker for the player health fill.
#[derive(Component)]
pub struct PlayerBar;

/// Marker for the boss health fill.
#[derive(Component)]
pub struct FoeBar;

/// Setup HUD systems.
pub fn setup_hud_systems(app: &mut App) {
    app.init_resource::<HudState>()
        .add_systems(Startup, spawn_hud)
        .add_systems(Update, (show_hud, update_bars));
}

fn spawn_hud(mut commands: Commands) {
    commands
        .spawn((
            Node {
                width: Val::Percent(100.0),
                height: Val::Percent(100.0),
                flex_direction: FlexDirection::Row,
                justify_content: JustifyContent::SpaceBetween,
                align_items: AlignItems::Start,
                padding: UiRect::all(Val::Px(20.0)),
                position_type: PositionType::Absolute,
                ..default()
            },
            Visibility::Hidden,
            HudRoot,
        ))
        .with_children(|parent| {
            let (player, foe) = bar_colors(None);
            spawn_bar(parent, "You", player, PlayerBar);
            spawn_bar(parent, "Boss", foe, FoeBar);
        });
}

/// Helper to spawn a labelled health bar.
fn spawn_bar<M: Component>(parent: &mut ChildBuilder, label: &str, color: Color, bar_marker: M) {
    parent
        .spawn(Node {
            flex_direction: FlexDirection::Row,
            align_items: AlignItems::Center,
            ..default()
        })
        .with_children(|bar_parent| {
            bar_parent.spawn((
                Text::new(label),
                TextFont {
                    font_size: 18.0,
                    ..default()
                },
                TextColor(Color::srgb(0.85, 0.85, 0.85)),
                Node {
                    width: Val::Px(60.0),
                    ..default()
                },
            ));

            bar_parent
                .spawn((
                    Node {
                        width: Val::Px(260.0),
                        height: Val::Px(16.0),
                        ..default()
                    },
                    BackgroundColor(Color::srgb(0.1, 0.1, 0.1)),
                ))
                .with_children(|bg| {
                    bg.spawn((
                        Node {
                            width: Val::Percent(100.0),
                            height: Val::Percent(100.0),
                            ..default()
                        },
                        BackgroundColor(color),
                        bar_marker,
                    ));
                });
        });
}

/// The HUD is up during the four minigames only.
fn show_hud(scene: Res<State<SceneId>>, mut roots: Query<&mut Visibility, With<HudRoot>>) {
    if !scene.is_changed() {
        return;
    }
    let shown = scene.get().mode().is_some();
    for mut visibility in &mut roots {
        *visibility = if shown {
            Visibility::Inherited
        } else {
            Visibility::Hidden
        };
    }
}

fn update_bars(
    hud: Res<HudState>,
    mut player_bar: Query<(&mut Node, &mut BackgroundColor), (With<PlayerBar>, Without<FoeBar>)>,
    mut foe_bar: Query<(&mut Node, &mut BackgroundColor), (With<FoeBar>, Without<PlayerBar>)>,
) {
    if !hud.is_changed() {
        return;
    }
    let (player_color, foe_color) = bar_colors(hud.mode);

    if let Ok((mut node, mut color)) = player_bar.get_single_mut() {
        node.width = Val::Percent(hud.player_fraction() * 100.0);
        color.0 = player_color;
    }
    if let Ok((mut node, mut color)) = foe_bar.get_single_mut() {
        node.width = Val::Percent(hud.foe_fraction() * 100.0);
        color.0 = foe_color;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fractions_follow_ranges() {
        let mut hud = HudState::default();
        hud.set_ranges(5, 120);
        hud.set_player_value(2);
        hud.set_foe_value(90);
        assert!((hud.player_fraction() - 0.4).abs() < 1e-6);
        assert!((hud.foe_fraction() - 0.75).abs() < 1e-6);
    }

    #[test]
    fn empty_range_reads_as_empty_bar() {
        let hud = HudState::default();
        assert_eq!(hud.player_fraction(), 0.0);
    }

    #[test]
    fn every_mode_has_distinct_boss_colour() {
        let colors: Vec<Color> = ModeId::ALL.iter().map(|m| bar_colors(Some(*m)).1).collect();
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }
}
