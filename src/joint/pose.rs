use super::id::JointId;
use crate::error::CoachError;
use glam::{Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Floats per joint in the flat interchange layout: position xyz + rotation xyzw
pub const FLOATS_PER_JOINT: usize = 7;

/// One tracked joint: position in tracking space and a unit orientation.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize, Serialize)]
pub struct JointSample {
    pub position: Vec3,
    pub orientation: Quat,
}

impl Default for JointSample {
    fn default() -> Self {
        Self {
            position: Vec3::ZERO,
            orientation: Quat::IDENTITY,
        }
    }
}

impl JointSample {
    /// Create a sample, normalizing the orientation.
    /// A zero or non-finite quaternion becomes identity.
    pub fn new(position: Vec3, orientation: Quat) -> Self {
        let orientation = if orientation.is_finite() && orientation.length_squared() > 1e-12 {
            orientation.normalize()
        } else {
            Quat::IDENTITY
        };
        Self {
            position,
            orientation,
        }
    }

    /// Sample with identity orientation
    pub fn at(position: Vec3) -> Self {
        Self {
            position,
            orientation: Quat::IDENTITY,
        }
    }
}

/// A full tracked skeleton for one tick.
///
/// Always holds exactly one sample per [`JointId`]. Frames are produced once
/// per tick and only read afterwards; consumers borrow them.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct PoseFrame {
    pub joints: [JointSample; JointId::COUNT],
}

impl Default for PoseFrame {
    fn default() -> Self {
        Self {
            joints: [JointSample::default(); JointId::COUNT],
        }
    }
}

impl PoseFrame {
    pub fn new(joints: [JointSample; JointId::COUNT]) -> Self {
        Self { joints }
    }

    /// Build a frame from positions only (identity orientations)
    pub fn from_positions(positions: [Vec3; JointId::COUNT]) -> Self {
        Self {
            joints: positions.map(JointSample::at),
        }
    }

    /// Parse the flat `[px, py, pz, qx, qy, qz, qw] * 32` layout used by the
    /// wasm bindings and replay files.
    pub fn from_flat(data: &[f32]) -> Result<Self, CoachError> {
        let expected = JointId::COUNT * FLOATS_PER_JOINT;
        if data.len() != expected {
            return Err(CoachError::FrameLength {
                expected,
                actual: data.len(),
            });
        }

        let mut frame = PoseFrame::default();
        for (sample, chunk) in frame
            .joints
            .iter_mut()
            .zip(data.chunks_exact(FLOATS_PER_JOINT))
        {
            *sample = JointSample::new(
                Vec3::new(chunk[0], chunk[1], chunk[2]),
                Quat::from_xyzw(chunk[3], chunk[4], chunk[5], chunk[6]),
            );
        }
        Ok(frame)
    }

    /// Flatten to the `[px, py, pz, qx, qy, qz, qw] * 32` layout
    pub fn to_flat(&self) -> Vec<f32> {
        let mut out = Vec::with_capacity(JointId::COUNT * FLOATS_PER_JOINT);
        for sample in &self.joints {
            out.extend_from_slice(&sample.position.to_array());
            out.extend_from_slice(&sample.orientation.to_array());
        }
        out
    }

    #[inline]
    pub fn joint(&self, id: JointId) -> &JointSample {
        &self.joints[id.index()]
    }

    #[inline]
    pub fn position(&self, id: JointId) -> Vec3 {
        self.joints[id.index()].position
    }

    #[inline]
    pub fn orientation(&self, id: JointId) -> Quat {
        self.joints[id.index()].orientation
    }

    /// Return a new frame with one joint replaced (Functional Set)
    pub fn with_joint(self, id: JointId, sample: JointSample) -> Self {
        let mut frame = self;
        frame.joints[id.index()] = sample;
        frame
    }

    /// Interpolate two frames: positions lerp, orientations slerp
    pub fn lerp(a: &PoseFrame, b: &PoseFrame, t: f32) -> PoseFrame {
        let mut result = PoseFrame::default();
        for (i, out) in result.joints.iter_mut().enumerate() {
            let (ja, jb) = (&a.joints[i], &b.joints[i]);
            *out = JointSample {
                position: ja.position.lerp(jb.position, t),
                orientation: ja.orientation.slerp(jb.orientation, t).normalize(),
            };
        }
        result
    }
}
