//! Segment orientations derived from pairs of joint positions.
//!
//! Scoring compares these instead of the sensor's own joint orientations, so
//! live and reference poses are judged on the same footing regardless of
//! where the performer stands or how tall they are.

use crate::joint::{JointId, PoseFrame};
use crate::math::{look_rotation, WORLD_UP};
use glam::{Quat, Vec3};

/// Look rotation pointing from `from` toward `to`.
///
/// Coincident points or a direction parallel to world up have no defined
/// roll; `fallback` is returned instead so the result is never NaN.
pub fn derive_orientation(from: Vec3, to: Vec3, fallback: Quat) -> Quat {
    look_rotation(to - from, WORLD_UP).unwrap_or(fallback)
}

/// Body segments compared by the quaternion metric
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum BodySegment {
    LeftUpperArm = 0,
    RightUpperArm = 1,
    TorsoLeft = 2,
    TorsoRight = 3,
    HipLine = 4,
    LeftLowerArm = 5,
    RightLowerArm = 6,
    ShoulderLine = 7,
}

impl BodySegment {
    pub const COUNT: usize = 8;

    pub const ALL: [BodySegment; Self::COUNT] = [
        BodySegment::LeftUpperArm,
        BodySegment::RightUpperArm,
        BodySegment::TorsoLeft,
        BodySegment::TorsoRight,
        BodySegment::HipLine,
        BodySegment::LeftLowerArm,
        BodySegment::RightLowerArm,
        BodySegment::ShoulderLine,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// Joint pair (tail, head); the segment points from tail toward head
    pub const fn joints(self) -> (JointId, JointId) {
        match self {
            BodySegment::LeftUpperArm => (JointId::ElbowLeft, JointId::ShoulderLeft),
            BodySegment::RightUpperArm => (JointId::ElbowRight, JointId::ShoulderRight),
            BodySegment::TorsoLeft => (JointId::HipLeft, JointId::ShoulderLeft),
            BodySegment::TorsoRight => (JointId::HipRight, JointId::ShoulderRight),
            BodySegment::HipLine => (JointId::HipRight, JointId::HipLeft),
            BodySegment::LeftLowerArm => (JointId::WristLeft, JointId::ElbowLeft),
            BodySegment::RightLowerArm => (JointId::WristRight, JointId::ElbowRight),
            BodySegment::ShoulderLine => (JointId::ShoulderRight, JointId::ShoulderLeft),
        }
    }

    /// Relative importance in the weighted quaternion metric
    pub const fn weight(self) -> f32 {
        match self {
            BodySegment::LeftUpperArm
            | BodySegment::RightUpperArm
            | BodySegment::LeftLowerArm
            | BodySegment::RightLowerArm => 3.0,
            _ => 1.0,
        }
    }
}

/// Orientation of every [`BodySegment`] in a frame, indexed by segment.
pub fn segment_orientations(frame: &PoseFrame) -> [Quat; BodySegment::COUNT] {
    BodySegment::ALL.map(|segment| {
        let (tail, head) = segment.joints();
        derive_orientation(frame.position(tail), frame.position(head), Quat::IDENTITY)
    })
}
