//! Humanoid robot rig.

use super::articulated::{ArticulatedProfile, ArticulatedRig, LimbCalibration};
use super::hierarchy::NodeDef;
use super::primitive::StickPart;
use super::RigId;
use crate::math::EulerOffset;
use glam::Vec3;

pub const CONTAINER: &str = "RobotContainer";

/// Anchor sits just below the hip joint
pub const ANCHOR_OFFSET: Vec3 = Vec3::new(0.0, -0.1, 0.0);

/// Bind-pose node tree of the robot model
pub fn robot_blueprint() -> Vec<NodeDef> {
    let node = |name: &str, parent: &str, x: f32, y: f32, z: f32| {
        NodeDef::new(name, Some(parent), Vec3::new(x, y, z))
    };

    vec![
        NodeDef::new(CONTAINER, None, Vec3::ZERO),
        node("Robot Kyle", CONTAINER, 0.0, 0.0, 0.0),
        node("Root", "Robot Kyle", 0.0, 0.0, 0.0),
        node("Hip", "Root", 0.0, 0.96, 0.0),
        node("Left_Thigh_Joint_01", "Hip", -0.1, -0.05, 0.0),
        node("Left_Knee_Joint_01", "Left_Thigh_Joint_01", 0.0, -0.42, 0.0),
        node("Right_Thigh_Joint_01", "Hip", 0.1, -0.05, 0.0),
        node("Right_Knee_Joint_01", "Right_Thigh_Joint_01", 0.0, -0.42, 0.0),
        node("Ribs", "Root", 0.0, 1.32, 0.0),
        node("Left_Shoulder_Joint_01", "Ribs", -0.12, 0.12, 0.0),
        node("Left_Upper_Arm_Joint_01", "Left_Shoulder_Joint_01", -0.08, 0.0, 0.0),
        node("Left_Forearm_Joint_01", "Left_Upper_Arm_Joint_01", -0.27, 0.0, 0.0),
        node("Right_Shoulder_Joint_01", "Ribs", 0.12, 0.12, 0.0),
        node("Right_Upper_Arm_Joint_01", "Right_Shoulder_Joint_01", 0.08, 0.0, 0.0),
        node("Right_Forearm_Joint_01", "Right_Upper_Arm_Joint_01", 0.27, 0.0, 0.0),
    ]
}

/// Hand-tuned limb offsets for the robot's bind pose
pub fn robot_limbs() -> Vec<LimbCalibration> {
    use StickPart as P;
    vec![
        LimbCalibration::new(
            "Right_Upper_Arm_Joint_01",
            P::RightUpperArm,
            EulerOffset::new(0.0, 0.0, 90.0),
            "Right_Forearm_Joint_01",
            P::RightLowerArm,
            EulerOffset::new(0.0, 0.0, 90.0),
        ),
        LimbCalibration::new(
            "Left_Upper_Arm_Joint_01",
            P::LeftUpperArm,
            EulerOffset::new(180.0, 0.0, 90.0),
            "Left_Forearm_Joint_01",
            P::LeftLowerArm,
            EulerOffset::new(180.0, 90.0, 45.0),
        ),
        LimbCalibration::new(
            "Left_Thigh_Joint_01",
            P::LeftUpperLeg,
            EulerOffset::new(0.0, 0.0, 90.0),
            "Left_Knee_Joint_01",
            P::LeftKnee,
            EulerOffset::new(0.0, 0.0, 170.0),
        ),
        LimbCalibration::new(
            "Right_Thigh_Joint_01",
            P::RightUpperLeg,
            EulerOffset::new(0.0, 0.0, -90.0),
            "Right_Knee_Joint_01",
            P::RightKnee,
            EulerOffset::new(180.0, 0.0, -170.0),
        ),
    ]
}

pub fn robot_profile() -> ArticulatedProfile {
    ArticulatedProfile {
        rig: RigId::Robot,
        nodes: robot_blueprint(),
        limbs: robot_limbs(),
        anchor_node: "Hip".to_owned(),
        anchor_offset: ANCHOR_OFFSET,
    }
}

pub fn robot_rig() -> ArticulatedRig {
    ArticulatedRig::new(robot_profile())
}
