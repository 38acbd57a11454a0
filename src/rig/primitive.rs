//! Primitive stick figure: spheres on the main joints, small head features
//! and a cylinder per body segment.
//!
//! The solution of this rig is shared with the articulated rigs, which read
//! their limb rotations from the segment parts and the knee markers.

use super::transform::{PartInstance, PartTransform};
use super::{Retargetable, RigId};
use crate::joint::{JointId, PoseFrame};
use crate::math::{look_rotation, to_rig_space, WORLD_UP};
use glam::{Quat, Vec3};

/// Thickness of segment cylinders (x and z scale)
pub const SEGMENT_THICKNESS: f32 = 0.2;

/// Length of limb segments that do not follow the tracked proportions
pub const FIXED_SEGMENT_LENGTH: f32 = 1.2;

/// Local roll turning a look rotation (+Z at the target) into a cylinder
/// orientation (+Y at the target).
const SEGMENT_ROLL: Quat = Quat::from_xyzw(
    std::f32::consts::FRAC_1_SQRT_2,
    0.0,
    0.0,
    std::f32::consts::FRAC_1_SQRT_2,
);

/// Every part of the stick figure, in solve order: markers, head features,
/// then segments (segments and ears aim at markers solved earlier).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum StickPart {
    // Joint markers
    LeftShoulder = 0,
    RightShoulder = 1,
    LeftHip = 2,
    RightHip = 3,
    LeftElbow = 4,
    RightElbow = 5,
    LeftWrist = 6,
    RightWrist = 7,
    LeftKnee = 8,
    RightKnee = 9,
    LeftAnkle = 10,
    RightAnkle = 11,

    // Head features
    LeftEye = 12,
    RightEye = 13,
    Nose = 14,
    LeftEar = 15,
    RightEar = 16,
    Mouth = 17,

    // Segments
    Shoulders = 18,
    HipLine = 19,
    TorsoLeft = 20,
    TorsoRight = 21,
    LeftUpperArm = 22,
    RightUpperArm = 23,
    LeftLowerArm = 24,
    RightLowerArm = 25,
    LeftUpperLeg = 26,
    RightUpperLeg = 27,
    LeftLowerLeg = 28,
    RightLowerLeg = 29,
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SegmentLength {
    /// Tracked distance between the two joints times the length scale
    Proportional,
    Fixed(f32),
}

/// How a part is placed from the tracked pose
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PartRule {
    Marker(JointId),
    Head {
        joint: JointId,
        scale: Vec3,
        /// Marker the feature turns toward (ears)
        face: Option<StickPart>,
    },
    Segment {
        from: JointId,
        to: JointId,
        aim: StickPart,
        length: SegmentLength,
    },
}

impl StickPart {
    pub const COUNT: usize = 30;

    pub const ALL: [StickPart; Self::COUNT] = [
        StickPart::LeftShoulder,
        StickPart::RightShoulder,
        StickPart::LeftHip,
        StickPart::RightHip,
        StickPart::LeftElbow,
        StickPart::RightElbow,
        StickPart::LeftWrist,
        StickPart::RightWrist,
        StickPart::LeftKnee,
        StickPart::RightKnee,
        StickPart::LeftAnkle,
        StickPart::RightAnkle,
        StickPart::LeftEye,
        StickPart::RightEye,
        StickPart::Nose,
        StickPart::LeftEar,
        StickPart::RightEar,
        StickPart::Mouth,
        StickPart::Shoulders,
        StickPart::HipLine,
        StickPart::TorsoLeft,
        StickPart::TorsoRight,
        StickPart::LeftUpperArm,
        StickPart::RightUpperArm,
        StickPart::LeftLowerArm,
        StickPart::RightLowerArm,
        StickPart::LeftUpperLeg,
        StickPart::RightUpperLeg,
        StickPart::LeftLowerLeg,
        StickPart::RightLowerLeg,
    ];

    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    pub const fn rule(self) -> PartRule {
        use JointId as J;
        use SegmentLength::{Fixed, Proportional};
        use StickPart as P;

        const FEATURE: Vec3 = Vec3::splat(0.2);
        const EYE: Vec3 = Vec3::new(0.3, 0.2, 0.2);
        const LIMB: SegmentLength = Fixed(FIXED_SEGMENT_LENGTH);

        const fn segment(
            from: JointId,
            to: JointId,
            aim: StickPart,
            length: SegmentLength,
        ) -> PartRule {
            PartRule::Segment { from, to, aim, length }
        }

        match self {
            P::LeftShoulder => PartRule::Marker(J::ShoulderLeft),
            P::RightShoulder => PartRule::Marker(J::ShoulderRight),
            P::LeftHip => PartRule::Marker(J::HipLeft),
            P::RightHip => PartRule::Marker(J::HipRight),
            P::LeftElbow => PartRule::Marker(J::ElbowLeft),
            P::RightElbow => PartRule::Marker(J::ElbowRight),
            P::LeftWrist => PartRule::Marker(J::WristLeft),
            P::RightWrist => PartRule::Marker(J::WristRight),
            P::LeftKnee => PartRule::Marker(J::KneeLeft),
            P::RightKnee => PartRule::Marker(J::KneeRight),
            P::LeftAnkle => PartRule::Marker(J::AnkleLeft),
            P::RightAnkle => PartRule::Marker(J::AnkleRight),

            P::LeftEye => PartRule::Head { joint: J::EyeLeft, scale: EYE, face: None },
            P::RightEye => PartRule::Head { joint: J::EyeRight, scale: EYE, face: None },
            P::Nose => PartRule::Head { joint: J::Nose, scale: FEATURE, face: None },
            P::LeftEar => PartRule::Head {
                joint: J::EarLeft,
                scale: FEATURE,
                face: Some(P::LeftShoulder),
            },
            P::RightEar => PartRule::Head {
                joint: J::EarRight,
                scale: FEATURE,
                face: Some(P::RightShoulder),
            },
            P::Mouth => PartRule::Head { joint: J::Nose, scale: FEATURE, face: None },

            P::Shoulders => {
                segment(J::ShoulderLeft, J::ShoulderRight, P::RightShoulder, Proportional)
            }
            P::HipLine => segment(J::HipLeft, J::HipRight, P::RightHip, Proportional),
            P::TorsoLeft => segment(J::HipLeft, J::ShoulderLeft, P::LeftShoulder, Proportional),
            P::TorsoRight => segment(J::ShoulderRight, J::HipRight, P::RightShoulder, Proportional),
            P::LeftUpperArm => segment(J::ShoulderLeft, J::ElbowLeft, P::LeftElbow, LIMB),
            P::RightUpperArm => segment(J::ShoulderRight, J::ElbowRight, P::RightElbow, LIMB),
            P::LeftLowerArm => segment(J::ElbowLeft, J::WristLeft, P::LeftWrist, LIMB),
            P::RightLowerArm => segment(J::ElbowRight, J::WristRight, P::RightWrist, LIMB),
            P::LeftUpperLeg => segment(J::HipLeft, J::KneeLeft, P::LeftHip, LIMB),
            P::RightUpperLeg => segment(J::HipRight, J::KneeRight, P::RightHip, LIMB),
            P::LeftLowerLeg => segment(J::KneeLeft, J::AnkleLeft, P::LeftKnee, LIMB),
            P::RightLowerLeg => segment(J::KneeRight, J::AnkleRight, P::RightKnee, LIMB),
        }
    }
}

/// Solved local transforms of every [`StickPart`]
#[derive(Debug, Clone, PartialEq)]
pub struct StickPose {
    parts: [PartTransform; StickPart::COUNT],
}

impl Default for StickPose {
    fn default() -> Self {
        Self {
            parts: [PartTransform::IDENTITY; StickPart::COUNT],
        }
    }
}

impl StickPose {
    #[inline]
    pub fn part(&self, part: StickPart) -> &PartTransform {
        &self.parts[part.index()]
    }

    pub fn parts(&self) -> &[PartTransform] {
        &self.parts
    }
}

/// Rotation whose +Y axis points from `from` to `target`
fn aim(from: Vec3, target: Vec3) -> Option<Quat> {
    look_rotation(target - from, WORLD_UP).map(|look| (look * SEGMENT_ROLL).normalize())
}

/// Place every stick part for `pose`.
///
/// Markers and non-facing head features take the tracked joint orientation.
/// Aimed parts whose aim is undefined this tick (coincident or vertical)
/// keep their rotation from `previous`.
pub fn solve_stick(
    pose: &PoseFrame,
    position_scale: f32,
    length_scale: f32,
    previous: &StickPose,
) -> StickPose {
    let mut next = previous.clone();

    for part in StickPart::ALL {
        let slot = part.index();
        match part.rule() {
            PartRule::Marker(joint) => {
                next.parts[slot].translation = to_rig_space(pose.position(joint), position_scale);
                next.parts[slot].rotation = pose.orientation(joint);
            }
            PartRule::Head { joint, scale, face } => {
                let translation = to_rig_space(pose.position(joint), position_scale);
                let rotation = match face {
                    Some(target) => aim(translation, next.parts[target.index()].translation)
                        .unwrap_or(previous.parts[slot].rotation),
                    None => pose.orientation(joint),
                };
                next.parts[slot] = PartTransform {
                    translation,
                    rotation,
                    scale,
                };
            }
            PartRule::Segment {
                from,
                to,
                aim: target,
                length,
            } => {
                let a = to_rig_space(pose.position(from), position_scale);
                let b = to_rig_space(pose.position(to), position_scale);
                let translation = (a + b) * 0.5;
                let length = match length {
                    SegmentLength::Proportional => {
                        to_rig_space(pose.position(from) - pose.position(to), length_scale).length()
                    }
                    SegmentLength::Fixed(length) => length,
                };
                let rotation = aim(translation, next.parts[target.index()].translation)
                    .unwrap_or(previous.parts[slot].rotation);
                next.parts[slot] = PartTransform {
                    translation,
                    rotation,
                    scale: Vec3::new(SEGMENT_THICKNESS, length, SEGMENT_THICKNESS),
                };
            }
        }
    }
    next
}

/// The stick-figure rig
#[derive(Debug, Clone)]
pub struct PrimitiveRig {
    root: PartTransform,
    pose: StickPose,
    position_scale: f32,
    length_scale: f32,
    active: bool,
}

impl PrimitiveRig {
    pub fn new(position_scale: f32, length_scale: f32) -> Self {
        Self {
            root: PartTransform::IDENTITY,
            pose: StickPose::default(),
            position_scale,
            length_scale,
            active: false,
        }
    }

    /// Solve `pose` against the current parts without applying it
    pub fn solve(&self, pose: &PoseFrame) -> StickPose {
        solve_stick(pose, self.position_scale, self.length_scale, &self.pose)
    }

    pub fn pose(&self) -> &StickPose {
        &self.pose
    }
}

impl Retargetable for PrimitiveRig {
    fn rig_id(&self) -> RigId {
        RigId::Primitive
    }

    fn retarget(&mut self, _pose: &PoseFrame, stick: &StickPose) {
        self.pose = stick.clone();
    }

    fn reference_anchor(&self) -> Vec3 {
        self.root
            .transform_point(self.pose.part(StickPart::HipLine).translation)
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
        self.pose
            .parts
            .iter()
            .map(|part| PartInstance::from(&self.root.then(part)))
            .collect()
    }
}
