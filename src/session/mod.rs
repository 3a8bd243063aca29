//! Session module - the fight in progress and scene flow.

mod plugin;

pub use plugin::{setup_session_systems, SceneRequest, SceneRequests, Session, SessionPlugin, SessionSet};
