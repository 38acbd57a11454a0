//! Error types for the coaching core.
//!
//! Nothing in the per-tick path returns these to the caller: retargeting and
//! scoring log and compensate. They surface from construction and loading.

use crate::rig::RigId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CoachError {
    /// A part the rig profile expects is absent from the rig structure.
    #[error("{rig:?} rig has no part named `{name}`")]
    MissingPart { rig: RigId, name: String },

    /// Flat pose data with the wrong number of floats.
    #[error("Pose frame needs {expected} floats, got {actual}")]
    FrameLength { expected: usize, actual: usize },

    /// The tracked-pose source was already shut down.
    #[error("Pose source has been disposed")]
    SourceDisposed,

    /// A replay source was built without any frames.
    #[error("Pose source has no frames")]
    EmptySource,

    /// Configuration or recording JSON failed to parse.
    #[error("Failed to parse JSON: {0}")]
    Json(#[from] serde_json::Error),
}
