pub mod id;
pub mod pose;
pub mod choreography;

pub use id::*;
pub use pose::*;
pub use choreography::*;

#[cfg(test)]
mod tests {
    use super::*;

    use glam::{Quat, Vec3};

    #[test]
    fn test_joint_indices_are_stable() {
        for (i, joint) in JointId::ALL.iter().enumerate() {
            assert_eq!(joint.index(), i);
            assert_eq!(JointId::from_index(i), Some(*joint));
        }
        assert_eq!(JointId::from_index(JointId::COUNT), None);
        assert_eq!(JointId::ShoulderLeft.index(), 5);
        assert_eq!(JointId::HipRight.index(), 22);
        assert_eq!(JointId::EarRight.index(), 31);
    }

    #[test]
    fn test_sample_normalizes_orientation() {
        let sample = JointSample::new(Vec3::ONE, Quat::from_xyzw(0.0, 2.0, 0.0, 2.0));
        assert!((sample.orientation.length() - 1.0).abs() < 1e-5);

        let degenerate = JointSample::new(Vec3::ONE, Quat::from_xyzw(0.0, 0.0, 0.0, 0.0));
        assert_eq!(degenerate.orientation, Quat::IDENTITY);

        let nan = JointSample::new(Vec3::ONE, Quat::from_xyzw(f32::NAN, 0.0, 0.0, 1.0));
        assert_eq!(nan.orientation, Quat::IDENTITY);
    }

    #[test]
    fn test_flat_layout_round_trip() {
        let mut frame = PoseFrame::default();
        frame = frame.with_joint(
            JointId::Nose,
            JointSample::new(Vec3::new(1.0, -2.0, 3.0), Quat::from_rotation_z(0.3)),
        );

        let flat = frame.to_flat();
        assert_eq!(flat.len(), JointId::COUNT * FLOATS_PER_JOINT);

        let parsed = PoseFrame::from_flat(&flat).unwrap();
        assert!(parsed.position(JointId::Nose).distance(Vec3::new(1.0, -2.0, 3.0)) < 1e-6);
    }

    #[test]
    fn test_flat_layout_rejects_wrong_length() {
        let err = PoseFrame::from_flat(&[0.0; 10]).unwrap_err();
        assert!(matches!(
            err,
            crate::error::CoachError::FrameLength { actual: 10, .. }
        ));
    }
}
