//! Session plugin - hosts the active controller and the shared encounter.
//!
//! Each playable scene builds its controller on entry. Every frame the
//! controller is ticked against the rendering, HUD and audio boards, then
//! any scene request it made is applied.

use std::path::Path;

use bevy::ecs::system::SystemParam;
use bevy::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::audio::CueQueue;
use crate::combat::Encounter;
use crate::core::{CameraRig, EncounterEvent, Frame, InputSource, SceneId, SceneLoader};
use crate::modes::{build_controller, Controller, GameConfig, DATA_DIR};
use crate::rendering::{ActorLayout, AnimationBoard, CameraFraming, GlyphBoard, RenderSet};
use crate::ui::HudState;

/// A scene change asked for by a controller.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SceneRequest {
    Load(SceneId),
    Reload,
}

#[derive(Resource, Debug, Default)]
pub struct SceneRequests {
    pending: Option<SceneRequest>,
}

impl SceneRequests {
    pub fn take(&mut self) -> Option<SceneRequest> {
        self.pending.take()
    }

    fn request(&mut self, request: SceneRequest) {
        if let Some(previous) = self.pending.replace(request) {
            warn!("Scene request {:?} replaced by {:?}", previous, request);
        }
    }
}

impl SceneLoader for SceneRequests {
    fn load_scene(&mut self, scene: SceneId) {
        self.request(SceneRequest::Load(scene));
    }

    fn reload_current_scene(&mut self) {
        self.request(SceneRequest::Reload);
    }
}

/// The fight in progress.
#[derive(Resource)]
pub struct Session {
    pub encounter: Encounter,
    active: Option<Box<dyn Controller>>,
    rng: StdRng,
}

impl Session {
    pub fn new(config: &GameConfig, rng: StdRng) -> Self {
        Self {
            encounter: Encounter::new(&config.encounter),
            active: None,
            rng,
        }
    }

    pub fn active(&self) -> Option<&dyn Controller> {
        self.active.as_deref()
    }
}

/// Every board a controller writes to.
#[derive(SystemParam)]
pub struct Ports<'w> {
    glyphs: ResMut<'w, GlyphBoard>,
    animator: ResMut<'w, AnimationBoard>,
    hud: ResMut<'w, HudState>,
    audio: ResMut<'w, CueQueue>,
    camera: ResMut<'w, CameraFraming>,
    scenes: ResMut<'w, SceneRequests>,
}

impl Ports<'_> {
    fn frame<'a>(&'a mut self, input: &'a dyn InputSource, dt: f32, time: f32) -> Frame<'a> {
        Frame {
            dt,
            time,
            input,
            glyphs: &mut *self.glyphs,
            animator: &mut *self.animator,
            hud: &mut *self.hud,
            audio: &mut *self.audio,
            camera: &mut *self.camera,
            scenes: &mut *self.scenes,
        }
    }

    /// Wipe whatever the previous controller left on screen.
    fn reset(&mut self) {
        self.glyphs.clear();
        self.animator.reset();
        self.camera.frame(Vec2::ZERO, 1.0);
        self.scenes.take();
    }
}

/// System set for the controller tick.
#[derive(SystemSet, Debug, Clone, PartialEq, Eq, Hash)]
pub struct SessionSet;

/// Session plugin - tunables, controllers and scene flow.
pub struct SessionPlugin;

impl Plugin for SessionPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Startup, load_game_config);
        setup_session_systems(app);
    }
}

/// Configure everything except tunable loading.
pub fn setup_session_systems(app: &mut App) {
    app.init_resource::<SceneRequests>()
        .configure_sets(
            Update,
            SessionSet
                .after(RenderSet::Animate)
                .before(RenderSet::Present),
        )
        .add_systems(
            Update,
            (tick_session, apply_scene_requests).chain().in_set(SessionSet),
        )
        .add_systems(OnEnter(SceneId::Ending), end_session);

    for scene in SceneId::PLAYABLE {
        app.add_systems(OnEnter(scene), enter_scene);
    }
}

fn load_game_config(mut commands: Commands, mut next_scene: ResMut<NextState<SceneId>>) {
    let config = GameConfig::load(Path::new(DATA_DIR));
    commands.insert_resource(ActorLayout {
        boss: Vec2::from(config.encounter.boss_position),
        ..default()
    });
    commands.insert_resource(Session::new(&config, StdRng::from_entropy()));
    commands.insert_resource(config);
    next_scene.set(SceneId::Title);
}

/// Build and set up the controller for `scene`.
fn start_scene(
    scene: SceneId,
    config: &GameConfig,
    session: &mut Session,
    ports: &mut Ports,
    input: &dyn InputSource,
    time: f32,
    events: &mut EventWriter<EncounterEvent>,
) {
    ports.reset();
    session.active = None;
    if scene == SceneId::Title {
        session.encounter = Encounter::new(&config.encounter);
    }

    let seed = session.rng.gen();
    let mut controller = match build_controller(scene, config, StdRng::seed_from_u64(seed)) {
        Ok(Some(controller)) => controller,
        Ok(None) => return,
        Err(e) => {
            error!("Cannot start {:?}: {}", scene, e);
            return;
        }
    };

    let mut frame = ports.frame(input, 0.0, time);
    if let Some(mode) = scene.mode() {
        session.encounter.begin_mode(mode, &mut frame);
        events.send(EncounterEvent::ModeEntered(mode));
    }
    controller.setup(&mut frame);
    session.active = Some(controller);
}

fn enter_scene(
    state: Res<State<SceneId>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut ports: Ports,
    mut events: EventWriter<EncounterEvent>,
) {
    start_scene(
        *state.get(),
        &config,
        &mut session,
        &mut ports,
        &*keyboard,
        time.elapsed_secs(),
        &mut events,
    );
}

fn tick_session(
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut ports: Ports,
    mut events: EventWriter<EncounterEvent>,
) {
    let session = &mut *session;
    let Some(controller) = session.active.as_mut() else {
        return;
    };
    let mut frame = ports.frame(&*keyboard, time.delta_secs(), time.elapsed_secs());
    if let Some(end) = controller.tick(&mut frame, &mut session.encounter) {
        events.send(EncounterEvent::RoundEnded {
            mode: controller.mode(),
            end,
        });
    }
}

#[allow(clippy::too_many_arguments)]
fn apply_scene_requests(
    state: Res<State<SceneId>>,
    config: Res<GameConfig>,
    time: Res<Time>,
    keyboard: Res<ButtonInput<KeyCode>>,
    mut session: ResMut<Session>,
    mut ports: Ports,
    mut next_scene: ResMut<NextState<SceneId>>,
    mut events: EventWriter<EncounterEvent>,
) {
    match ports.scenes.take() {
        None => {}
        Some(SceneRequest::Load(scene)) => {
            events.send(EncounterEvent::SceneRequested(scene));
            next_scene.set(scene);
        }
        Some(SceneRequest::Reload) => {
            events.send(EncounterEvent::PlayerDied);
            session.encounter.restart_mode();
            start_scene(
                *state.get(),
                &config,
                &mut session,
                &mut ports,
                &*keyboard,
                time.elapsed_secs(),
                &mut events,
            );
        }
    }
}

fn end_session(mut session: ResMut<Session>, mut ports: Ports) {
    session.active = None;
    ports.reset();
}
