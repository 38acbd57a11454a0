use super::primitive::StickPose;
use super::transform::{PartInstance, PartTransform};
use super::{Retargetable, RigId};
use crate::joint::{JointId, PoseFrame};
use crate::math::to_rig_space;
use glam::Vec3;

/// Anchor offset below the rig origin
const ANCHOR_OFFSET: Vec3 = Vec3::new(0.0, -0.4, 0.0);

/// One cube per tracked joint, placed and oriented as tracked.
#[derive(Debug, Clone)]
pub struct MarkerRig {
    root: PartTransform,
    markers: [PartTransform; JointId::COUNT],
    position_scale: f32,
    active: bool,
}

impl MarkerRig {
    pub fn new(position_scale: f32) -> Self {
        Self {
            root: PartTransform::IDENTITY,
            markers: [PartTransform::IDENTITY; JointId::COUNT],
            position_scale,
            active: false,
        }
    }

    pub fn marker(&self, joint: JointId) -> &PartTransform {
        &self.markers[joint.index()]
    }
}

impl Retargetable for MarkerRig {
    fn rig_id(&self) -> RigId {
        RigId::Markers
    }

    fn retarget(&mut self, pose: &PoseFrame, _stick: &StickPose) {
        for (marker, sample) in self.markers.iter_mut().zip(pose.joints.iter()) {
            marker.translation = to_rig_space(sample.position, self.position_scale);
            marker.rotation = sample.orientation;
        }
    }

    fn reference_anchor(&self) -> Vec3 {
        self.root.translation + ANCHOR_OFFSET
    }

    fn set_active(&mut self, active: bool) {
        self.active = active;
    }

    fn is_active(&self) -> bool {
        self.active
    }

    fn root(&self) -> &PartTransform {
        &self.root
    }

    fn root_mut(&mut self) -> &mut PartTransform {
        &mut self.root
    }

    fn part_instances(&self) -> Vec<PartInstance> {
        self.markers
            .iter()
            .map(|marker| PartInstance::from(&self.root.then(marker)))
            .collect()
    }
}
