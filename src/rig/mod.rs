//! Retargeting targets.
//!
//! Every rig consumes the same tracked [`PoseFrame`]. The primitive stick rig
//! is solved first each tick; the articulated rigs read their limb rotations
//! from that solution rather than from raw joint data.

pub mod transform;
pub mod hierarchy;
pub mod primitive;
pub mod markers;
pub mod articulated;
pub mod robot;
pub mod body;

pub use articulated::{ArticulatedProfile, ArticulatedRig, LimbCalibration};
pub use body::BodyVariant;
pub use hierarchy::{NodeDef, NodeHandle, RigHierarchy};
pub use markers::MarkerRig;
pub use primitive::{PrimitiveRig, StickPart, StickPose};
pub use transform::{PartInstance, PartTransform};

use crate::joint::PoseFrame;
use glam::Vec3;
use serde::{Deserialize, Serialize};

/// Selectable rig kinds
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[repr(u8)]
pub enum RigId {
    /// Stick figure built from spheres and cylinders
    #[default]
    Primitive = 0,
    /// One marker per tracked joint
    Markers = 1,
    Robot = 2,
    Body = 3,
}

impl RigId {
    pub const COUNT: usize = 4;

    pub const ALL: [RigId; Self::COUNT] = [
        RigId::Primitive,
        RigId::Markers,
        RigId::Robot,
        RigId::Body,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub fn from_index(index: usize) -> Option<RigId> {
        Self::ALL.get(index).copied()
    }
}

/// Common capability of every rig an avatar can drive.
pub trait Retargetable {
    fn rig_id(&self) -> RigId;

    /// Apply one tracked pose. `stick` is this tick's primitive solution.
    fn retarget(&mut self, pose: &PoseFrame, stick: &StickPose);

    /// Point UI indicators are placed relative to, in avatar space
    fn reference_anchor(&self) -> Vec3;

    fn set_active(&mut self, active: bool);

    fn is_active(&self) -> bool;

    /// Root transform; its x scale sign carries the mirror state
    fn root(&self) -> &PartTransform;

    fn root_mut(&mut self) -> &mut PartTransform;

    /// World-space instances of every visible part
    fn part_instances(&self) -> Vec<PartInstance>;

    /// Flip the root's x scale to match `mirrored`
    fn apply_mirror(&mut self, mirrored: bool) {
        let root = self.root_mut();
        let magnitude = root.scale.x.abs();
        root.scale.x = if mirrored { -magnitude } else { magnitude };
    }

    fn is_mirrored(&self) -> bool {
        self.root().scale.x < 0.0
    }
}
