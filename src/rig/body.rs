//! Parametric human body rig (male and female variants share one skeleton
//! layout and differ in node prefix).

use super::articulated::{ArticulatedProfile, ArticulatedRig, LimbCalibration};
use super::hierarchy::NodeDef;
use super::primitive::StickPart;
use super::RigId;
use crate::math::EulerOffset;
use glam::Vec3;
use serde::{Deserialize, Serialize};

pub const CONTAINER: &str = "BodyContainer";

/// Anchor sits just above the lower spine joint
pub const ANCHOR_OFFSET: Vec3 = Vec3::new(0.0, 0.1, 0.0);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyVariant {
    #[default]
    Male,
    Female,
}

impl BodyVariant {
    /// Node name prefix of the variant's skeleton
    pub const fn prefix(self) -> &'static str {
        match self {
            BodyVariant::Male => "m_avg",
            BodyVariant::Female => "f_avg",
        }
    }

    const fn mesh(self) -> &'static str {
        match self {
            BodyVariant::Male => "SMPL_m_unityDoubleBlends_lbs_10_scale5_207_v1.0.0",
            BodyVariant::Female => "SMPL_f_unityDoubleBlends_lbs_10_scale5_207_v1.0.0",
        }
    }

    /// Full node name of `joint` for this variant
    pub fn node(self, joint: &str) -> String {
        format!("{}_{}", self.prefix(), joint)
    }
}

/// Bind-pose node tree (y up, subject's left on +x)
pub fn body_blueprint(variant: BodyVariant) -> Vec<NodeDef> {
    let n = |joint: &str| variant.node(joint);
    let mut defs = vec![
        NodeDef::new(CONTAINER, None, Vec3::ZERO),
        NodeDef::new(variant.mesh(), Some(CONTAINER), Vec3::ZERO),
        NodeDef::new(n("root"), Some(variant.mesh()), Vec3::ZERO),
    ];

    let joints: [(&str, &str, Vec3); 21] = [
        ("Pelvis", "root", Vec3::new(0.0, 0.93, 0.0)),
        ("L_Hip", "Pelvis", Vec3::new(0.06, -0.09, 0.0)),
        ("L_Knee", "L_Hip", Vec3::new(0.0, -0.38, 0.0)),
        ("L_Ankle", "L_Knee", Vec3::new(0.0, -0.4, 0.0)),
        ("R_Hip", "Pelvis", Vec3::new(-0.06, -0.09, 0.0)),
        ("R_Knee", "R_Hip", Vec3::new(0.0, -0.38, 0.0)),
        ("R_Ankle", "R_Knee", Vec3::new(0.0, -0.4, 0.0)),
        ("Spine1", "Pelvis", Vec3::new(0.0, 0.11, 0.0)),
        ("Spine2", "Spine1", Vec3::new(0.0, 0.13, 0.0)),
        ("Spine3", "Spine2", Vec3::new(0.0, 0.05, 0.0)),
        ("Neck", "Spine3", Vec3::new(0.0, 0.21, 0.0)),
        ("L_Collar", "Spine3", Vec3::new(0.07, 0.12, 0.0)),
        ("L_Shoulder", "L_Collar", Vec3::new(0.12, 0.03, 0.0)),
        ("L_Elbow", "L_Shoulder", Vec3::new(0.26, 0.0, 0.0)),
        ("L_Wrist", "L_Elbow", Vec3::new(0.25, 0.0, 0.0)),
        ("R_Collar", "Spine3", Vec3::new(-0.07, 0.12, 0.0)),
        ("R_Shoulder", "R_Collar", Vec3::new(-0.12, 0.03, 0.0)),
        ("R_Elbow", "R_Shoulder", Vec3::new(-0.26, 0.0, 0.0)),
        ("R_Wrist", "R_Elbow", Vec3::new(-0.25, 0.0, 0.0)),
        ("Head", "Neck", Vec3::new(0.0, 0.1, 0.0)),
        ("Jaw", "Head", Vec3::new(0.0, 0.02, 0.05)),
    ];
    defs.extend(
        joints
            .iter()
            .map(|&(joint, parent, offset)| {
                NodeDef::new(n(joint), Some(n(parent).as_str()), offset)
            }),
    );
    defs
}

pub fn body_limbs(variant: BodyVariant) -> Vec<LimbCalibration> {
    use StickPart as P;
    let n = |joint: &str| variant.node(joint);
    vec![
        LimbCalibration::new(
            n("R_Shoulder"),
            P::RightUpperArm,
            EulerOffset::new(0.0, 180.0, 90.0),
            n("R_Elbow"),
            P::RightLowerArm,
            EulerOffset::new(0.0, 180.0, 90.0),
        ),
        LimbCalibration::new(
            n("L_Shoulder"),
            P::LeftUpperArm,
            EulerOffset::new(180.0, 0.0, 90.0),
            n("L_Elbow"),
            P::LeftLowerArm,
            EulerOffset::new(180.0, 0.0, 90.0),
        ),
        LimbCalibration::new(
            n("L_Hip"),
            P::LeftUpperLeg,
            EulerOffset::new(0.0, 90.0, 0.0),
            n("L_Knee"),
            P::LeftKnee,
            EulerOffset::new(-90.0, 180.0, -90.0),
        ),
        LimbCalibration::new(
            n("R_Hip"),
            P::RightUpperLeg,
            EulerOffset::new(0.0, 90.0, 0.0),
            n("R_Knee"),
            P::RightKnee,
            EulerOffset::new(90.0, 180.0, 90.0),
        ),
    ]
}

pub fn body_profile(variant: BodyVariant) -> ArticulatedProfile {
    ArticulatedProfile {
        rig: RigId::Body,
        nodes: body_blueprint(variant),
        limbs: body_limbs(variant),
        anchor_node: variant.node("Spine1"),
        anchor_offset: ANCHOR_OFFSET,
    }
}

pub fn body_rig(variant: BodyVariant) -> ArticulatedRig {
    ArticulatedRig::new(body_profile(variant))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::joint::{JointId, JointSample};
    use crate::rig::primitive::{solve_stick, StickPose};
    use crate::rig::Retargetable;
    use crate::test_support::standing_frame;
    use glam::Quat;

    #[test]
    fn test_both_variants_resolve() {
        for variant in [BodyVariant::Male, BodyVariant::Female] {
            let rig = body_rig(variant);
            assert!(rig.missing_parts().is_empty(), "{:?}", variant);
            assert!(rig.hierarchy().find(&variant.node("L_Elbow")).is_some());
        }
        assert_eq!(BodyVariant::Female.node("Spine1"), "f_avg_Spine1");
    }

    #[test]
    fn test_knees_follow_tracked_knee_orientation() {
        use StickPart as P;
        let sources: Vec<(P, P)> = body_limbs(BodyVariant::Male)
            .iter()
            .map(|limb| (limb.proximal_source, limb.distal_source))
            .collect();
        assert_eq!(
            sources,
            [
                (P::RightUpperArm, P::RightLowerArm),
                (P::LeftUpperArm, P::LeftLowerArm),
                (P::LeftUpperLeg, P::LeftKnee),
                (P::RightUpperLeg, P::RightKnee),
            ]
        );

        let mut rig = body_rig(BodyVariant::Male);
        let knee = rig.hierarchy().find("m_avg_L_Knee").unwrap();
        let frame = standing_frame();
        let stick = solve_stick(&frame, 0.008, 0.002, &StickPose::default());
        rig.retarget(&frame, &stick);
        let straight = rig.hierarchy().local(knee).rotation;

        let bent = Quat::from_rotation_x(1.2);
        let position = frame.position(JointId::KneeLeft);
        let frame = frame.with_joint(JointId::KneeLeft, JointSample::new(position, bent));
        let stick = solve_stick(&frame, 0.008, 0.002, &StickPose::default());
        rig.retarget(&frame, &stick);
        assert!(rig.hierarchy().local(knee).rotation.dot(straight).abs() < 1.0 - 1e-3);
    }

    #[test]
    fn test_anchor_above_spine() {
        let rig = body_rig(BodyVariant::Female);
        let spine = rig.node_world("f_avg_Spine1").unwrap().translation;
        assert!((rig.reference_anchor() - (spine + ANCHOR_OFFSET)).length() < 1e-6);
    }

    #[test]
    fn test_retarget_keeps_limb_positions() {
        let mut rig = body_rig(BodyVariant::Male);
        let shoulder = rig.node_world("m_avg_L_Shoulder").unwrap().translation;

        let frame = standing_frame();
        let stick = solve_stick(&frame, 0.008, 0.002, &StickPose::default());
        rig.retarget(&frame, &stick);

        // Only rotations are driven
        let after = rig.node_world("m_avg_L_Shoulder").unwrap();
        assert!((after.translation - shoulder).length() < 1e-6);
        assert!((after.rotation.length() - 1.0).abs() < 1e-4);
    }
}
