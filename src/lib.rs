//! Pose Coach - Wasm Core
//!
//! Retargets tracked skeletons onto display rigs and scores a performer
//! against recorded choreography. Core modules are plain Rust; the
//! `#[wasm_bindgen]` functions below are thin wrappers over one session.

pub mod avatar;
pub mod config;
pub mod error;
pub mod joint;
pub mod math;
pub mod orientation;
pub mod rig;
pub mod scoring;
pub mod source;
pub mod state;

#[cfg(test)]
mod test_support;

use wasm_bindgen::prelude::*;

pub use avatar::{Avatar, Indicator, IndicatorKind};
pub use config::{CoachConfig, GradeThresholds, RigConfig, ScoringConfig};
pub use error::CoachError;
pub use joint::{Choreography, JointId, JointSample, PoseFrame, RecordedPose};
pub use rig::{PartInstance, PartTransform, Retargetable, RigId};
pub use scoring::{GoalKind, Grade, MetricKind, ScoreDisplay, ScoringEngine, ScoringState};
pub use source::{LatestPoseSource, PoseSource, ReplaySource};
pub use state::{CoachSession, ScheduledGoal, TickReport};

/// Install the console logger and panic hook (browser only)
#[wasm_bindgen]
pub fn init() {
    cfg_if::cfg_if! {
        if #[cfg(target_arch = "wasm32")] {
            console_error_panic_hook::set_once();
            console_log::init_with_level(log::Level::Info).ok();
        }
    }
    log::info!("Pose coach core v{}", env!("CARGO_PKG_VERSION"));
}

#[cfg(target_arch = "wasm32")]
fn to_js(err: CoachError) -> JsValue {
    JsValue::from_str(&err.to_string())
}

/// Start a new session, replacing any previous one.
///
/// `timestamps[i]` belongs to the i-th frame of `frame_data`, which holds
/// frames in the flat `[px, py, pz, qx, qy, qz, qw] * 32` layout.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn create_session(
    config_json: &str,
    timestamps: &[f32],
    frame_data: &[f32],
) -> Result<(), JsValue> {
    let config = if config_json.trim().is_empty() {
        CoachConfig::default()
    } else {
        CoachConfig::from_json(config_json).map_err(to_js)?
    };
    let keyframes = RecordedPose::sequence_from_flat(timestamps, frame_data).map_err(to_js)?;
    let session = CoachSession::new(
        &config,
        Choreography::new(keyframes),
        Vec::new(),
        LatestPoseSource::new(),
    );
    state::install_session(session);
    Ok(())
}

/// Schedule a goal; `kind` 0 is a pose goal, anything else a motion goal
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn schedule_goal(
    kind: u8,
    start_time: f32,
    timestamps: &[f32],
    frame_data: &[f32],
) -> Result<(), JsValue> {
    let kind = if kind == 0 { GoalKind::Pose } else { GoalKind::Motion };
    let frames = RecordedPose::sequence_from_flat(timestamps, frame_data).map_err(to_js)?;
    state::with_session_mut(|session| {
        session.schedule_goal(ScheduledGoal::new(start_time, kind, frames))
    })
    .ok_or_else(|| JsValue::from_str("No active session"))
}

/// Hand the latest tracked frame to the session
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn push_live_pose(frame_data: &[f32]) -> Result<(), JsValue> {
    let frame = PoseFrame::from_flat(frame_data).map_err(to_js)?;
    state::with_session_mut(|session| session.source_mut().push(frame))
        .ok_or_else(|| JsValue::from_str("No active session"))
}

/// Advance the session. Returns the grade awarded this tick
/// (0 Great, 1 Good, 2 Bad) or -1.
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn tick(time: f32) -> i32 {
    state::with_session_mut(|session| session.tick(time).grade)
        .flatten()
        .map(|grade| grade as i32)
        .unwrap_or(-1)
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn is_finished() -> bool {
    state::with_session(|session| session.is_finished()).unwrap_or(false)
}

/// Switch both avatars to rig `rig` (0 primitive, 1 markers, 2 robot, 3 body)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_active_rig(rig: u8) -> bool {
    let Some(rig) = RigId::from_index(rig as usize) else {
        log::warn!("Unknown rig index: {}", rig);
        return false;
    };
    state::with_session_mut(|session| {
        session.performer.set_active_rig(rig);
        session.reference.set_active_rig(rig);
    })
    .is_some()
}

/// Mirror the performer avatar
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn set_mirrored(mirrored: bool) {
    state::with_session_mut(|session| session.performer.set_mirrored(mirrored));
}

#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn toggle_mirror() {
    state::with_session_mut(|session| session.performer.toggle_mirror());
}

#[cfg(target_arch = "wasm32")]
fn avatar_of(session: &state::HostSession, reference: bool) -> &Avatar {
    if reference {
        &session.reference
    } else {
        &session.performer
    }
}

/// Anchor of the active rig as `[x, y, z]` (empty without a session)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_reference_anchor(reference: bool) -> Vec<f32> {
    state::with_session(|session| {
        let avatar = avatar_of(session, reference);
        avatar.reference_anchor(avatar.active_rig()).to_array().to_vec()
    })
    .unwrap_or_default()
}

/// Part instances of the active rig, 10 floats each
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_part_instances(reference: bool) -> Vec<f32> {
    state::with_session(|session| {
        let instances = avatar_of(session, reference).part_instances();
        rig::transform::instances_as_floats(&instances).to_vec()
    })
    .unwrap_or_default()
}

/// Grade history (0 Great, 1 Good, 2 Bad)
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn get_grades() -> Vec<u8> {
    state::with_session(|session| session.grades().iter().map(|g| *g as u8).collect())
        .unwrap_or_default()
}

/// Release the pose source and drop the session
#[cfg(target_arch = "wasm32")]
#[wasm_bindgen]
pub fn shutdown_session() -> Result<(), JsValue> {
    match state::take_session() {
        Some(mut session) => session.shutdown().map_err(to_js),
        None => Err(JsValue::from_str("No active session")),
    }
}
