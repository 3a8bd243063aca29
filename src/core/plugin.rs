//! Core plugin that sets up scene states, events, and fundamental systems.

use bevy::app::AppExit;
use bevy::prelude::*;

use super::events::*;
use super::states::*;

/// Core plugin - must be added first as other plugins depend on it.
///
/// This plugin sets up:
/// - Scene states (Loading, Title, the four minigames, Ending)
/// - Encounter events
/// - Escape-to-quit
pub struct CorePlugin;

impl Plugin for CorePlugin {
    fn build(&self, app: &mut App) {
        app.init_state::<SceneId>()
            .add_event::<EncounterEvent>()
            .add_systems(Update, (handle_quit_input, log_encounter_events));
    }
}

/// Escape quits from anywhere.
fn handle_quit_input(keyboard: Res<ButtonInput<KeyCode>>, mut exit: EventWriter<AppExit>) {
    if keyboard.just_pressed(KeyCode::Escape) {
        info!("Escape pressed, quitting");
        exit.send(AppExit::Success);
    }
}

fn log_encounter_events(mut events: EventReader<EncounterEvent>) {
    for event in events.read() {
        match event {
            EncounterEvent::ModeEntered(mode) => info!("Entered {}", mode.name()),
            EncounterEvent::RoundEnded { mode, end } => {
                let name = mode.map_or("Title", |m| m.name());
                info!("{} round ended: {:?}", name, end);
            }
            EncounterEvent::PlayerDied => info!("Player died, restarting the minigame"),
            EncounterEvent::SceneRequested(scene) => debug!("Scene change requested: {:?}", scene),
        }
    }
}
