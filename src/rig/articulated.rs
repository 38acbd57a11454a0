//! Skinned rigs driven limb by limb from the stick solution.
//!
//! The robot and the parametric body differ only in data: a blueprint of
//! named nodes, a calibration table of limb pairs and an anchor node.

use super::hierarchy::{NodeDef, NodeHandle, RigHierarchy};
use super::primitive::{StickPart, StickPose};
use super::transform::{PartInstance, PartTransform};
use super::{Retargetable, RigId};
use crate::error::CoachError;
use crate::joint::PoseFrame;
use crate::math::EulerOffset;
use glam::Vec3;

/// One limb: a proximal node (upper arm, thigh) and its distal child
/// (forearm, knee), each driven by a stick segment plus a fixed offset.
#[derive(Debug, Clone, PartialEq)]
pub struct LimbCalibration {
    pub proximal: String,
    pub proximal_source: StickPart,
    pub proximal_offset: EulerOffset,
    pub distal: String,
    pub distal_source: StickPart,
    pub distal_offset: EulerOffset,
}

impl LimbCalibration {
    pub fn new(
        proximal: impl Into<String>,
        proximal_source: StickPart,
        proximal_offset: EulerOffset,
        distal: impl Into<String>,
        distal_source: StickPart,
        distal_offset: EulerOffset,
    ) -> Self {
        Self {
            proximal: proximal.into(),
            proximal_source,
            proximal_offset,
            distal: distal.into(),
            distal_source,
            distal_offset,
        }
    }
}

/// Everything that distinguishes one articulated rig from another
#[derive(Debug, Clone, PartialEq)]
pub struct ArticulatedProfile {
    pub rig: RigId,
    /// Node blueprint; the first node is the rig container
    pub nodes: Vec<NodeDef>,
    pub limbs: Vec<LimbCalibration>,
    pub anchor_node: String,
    pub anchor_offset: Vec3,
}

#[derive(Debug, Clone)]
struct ResolvedLimb {
    proximal: Option<NodeHandle>,
    distal: Option<NodeHandle>,
    calibration: LimbCalibration,
}

#[derive(Debug, Clone)]
pub struct ArticulatedRig {
    rig: RigId,
    root: PartTransform,
    hierarchy: RigHierarchy,
    limbs: Vec<ResolvedLimb>,
    anchor: Option<NodeHandle>,
    anchor_offset: Vec3,
    missing: Vec<String>,
    initialized: bool,
    active: bool,
}

impl ArticulatedRig {
    /// Build the rig and resolve every named part once.
    ///
    /// Missing parts are logged and remembered; the limbs that need them are
    /// skipped on every tick instead of failing.
    pub fn new(profile: ArticulatedProfile) -> Self {
        let ArticulatedProfile {
            rig,
            nodes,
            limbs,
            anchor_node,
            anchor_offset,
        } = profile;

        let hierarchy = RigHierarchy::from_blueprint(&nodes);
        let mut missing = Vec::new();
        let mut resolve = |name: &str| {
            let handle = hierarchy.find(name);
            if handle.is_none() {
                let err = CoachError::MissingPart {
                    rig,
                    name: name.to_owned(),
                };
                log::warn!("{}", err);
                missing.push(name.to_owned());
            }
            handle
        };

        let limbs: Vec<ResolvedLimb> = limbs
            .into_iter()
            .map(|calibration| ResolvedLimb {
                proximal: resolve(&calibration.proximal),
                distal: resolve(&calibration.distal),
                calibration,
            })
            .collect();
        let anchor = resolve(&anchor_node);

        let mut articulated = Self {
            rig,
            root: PartTransform::IDENTITY,
            hierarchy,
            limbs,
            anchor,
            anchor_offset,
            missing,
            initialized: false,
            active: false,
        };
        articulated.initialize();
        articulated
    }

    /// Detach every proximal limb node from its skeletal parent and hang it
    /// directly under the rig container, keeping its world placement. Limb
    /// rotations are then written in container space.
    ///
    /// Runs once per instance; later calls do nothing.
    pub fn initialize(&mut self) {
        if self.initialized {
            return;
        }
        if let Some(container) = self.hierarchy.root() {
            for limb in &self.limbs {
                if let Some(proximal) = limb.proximal {
                    self.hierarchy.reparent(proximal, container);
                }
            }
        }
        self.initialized = true;
        log::debug!("{:?} rig initialized ({} limbs)", self.rig, self.limbs.len());
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Names of profile parts the structure lacks
    pub fn missing_parts(&self) -> &[String] {
        &self.missing
    }

    pub fn hierarchy(&self) -> &RigHierarchy {
        &self.hierarchy
    }

    /// World transform of a named node (rig root applied)
    pub fn node_world(&self, name: &str) -> Option<PartTransform> {
        self.hierarchy
            .find(name)
            .map(|handle| self.root.then(&self.hierarchy.world(handle)))
    }
}

impl Retargetable for ArticulatedRig {
    fn rig_id(&self) -> RigId {
        self.rig
    }

    fn retarget(&mut self, _pose: &PoseFrame, stick: &StickPose) {
        for limb in &self.limbs {
            let calibration = &limb.calibration;
            let Some(proximal) = limb.proximal else {
                log::debug!("{:?} rig: skipping limb `{}`", self.rig, calibration.proximal);
                continue;
            };

            let proximal_rotation = calibration
                .proximal_offset
                .apply_local(stick.part(calibration.proximal_source).rotation);
            self.hierarchy.local_mut(proximal).rotation = proximal_rotation;

            if let Some(distal) = limb.distal {
                let target = calibration
                    .distal_offset
                    .apply_local(stick.part(calibration.distal_source).rotation);
                // Distal is a child of proximal: local = inverse(parent) * desired
                self.hierarchy.local_mut(distal).rotation =
                    (proximal_rotation.inverse() * target).normalize();
            }
        }
    }

    fn reference_anchor(&self) -> Vec3 {
        let base = match self.anchor {
            Some(anchor) => self.hierarchy.world(anchor).translation,
            None => Vec3::ZERO,
        };
        self.root.transform_point(base) + self.anchor_offset
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
        self.hierarchy
            .world_transforms()
            .iter()
            .map(|world| PartInstance::from(&self.root.then(world)))
            .collect()
    }
}
