#![allow(dead_code)]

use pose_coach_wasm::{JointId, JointSample, PoseFrame, RecordedPose};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Standing person, tracking space (millimetres, y down), arms out to the
/// side and mirror-symmetric. The unit-test fixture in `src/test_support.rs`
/// has the right arm half raised instead; scenarios here compare against
/// [`arm_raised_frame`] and need both arms level.
pub fn standing_frame() -> PoseFrame {
    use JointId as J;
    let mut frame = PoseFrame::default();
    let mut set = |joint: JointId, x: f32, y: f32, z: f32| {
        frame.joints[joint.index()] = JointSample::at(Vec3::new(x, y, z));
    };

    set(J::Pelvis, 0.0, 0.0, 2000.0);
    set(J::SpineNavel, 0.0, -200.0, 2000.0);
    set(J::SpineChest, 0.0, -350.0, 2005.0);
    set(J::Neck, 0.0, -550.0, 2010.0);
    set(J::Head, 0.0, -650.0, 2000.0);
    set(J::Nose, 0.0, -680.0, 1920.0);
    for (side, sign) in [(0, -1.0), (1, 1.0)] {
        let pick = |left: JointId, right: JointId| if side == 0 { left } else { right };
        set(pick(J::ClavicleLeft, J::ClavicleRight), sign * 50.0, -500.0, 2000.0);
        set(pick(J::ShoulderLeft, J::ShoulderRight), sign * 180.0, -500.0, 2000.0);
        set(pick(J::ElbowLeft, J::ElbowRight), sign * 450.0, -530.0, 1985.0);
        set(pick(J::WristLeft, J::WristRight), sign * 700.0, -470.0, 1970.0);
        set(pick(J::HandLeft, J::HandRight), sign * 780.0, -470.0, 1970.0);
        set(pick(J::HandTipLeft, J::HandTipRight), sign * 850.0, -475.0, 1965.0);
        set(pick(J::ThumbLeft, J::ThumbRight), sign * 760.0, -460.0, 1940.0);
        set(pick(J::HipLeft, J::HipRight), sign * 100.0, 20.0, 2000.0);
        set(pick(J::KneeLeft, J::KneeRight), sign * 110.0, 450.0, 2010.0);
        set(pick(J::AnkleLeft, J::AnkleRight), sign * 115.0, 850.0, 2020.0);
        set(pick(J::FootLeft, J::FootRight), sign * 115.0, 880.0, 1900.0);
        set(pick(J::EyeLeft, J::EyeRight), sign * 30.0, -700.0, 1930.0);
        set(pick(J::EarLeft, J::EarRight), sign * 70.0, -690.0, 2000.0);
    }
    frame
}

/// Standing frame with the right arm raised overhead
pub fn arm_raised_frame() -> PoseFrame {
    let frame = standing_frame();
    frame
        .with_joint(JointId::ElbowRight, JointSample::at(Vec3::new(200.0, -800.0, 1990.0)))
        .with_joint(JointId::WristRight, JointSample::at(Vec3::new(230.0, -1050.0, 1980.0)))
}

/// Standing frame with every joint displaced up to `spread` millimetres
/// and given a random orientation, as in the unit-test fixture.
pub fn jittered_frame(rng: &mut StdRng, spread: f32) -> PoseFrame {
    let mut frame = standing_frame();
    for sample in frame.joints.iter_mut() {
        let offset = Vec3::new(
            rng.random_range(-spread..spread),
            rng.random_range(-spread..spread),
            rng.random_range(-spread..spread),
        );
        let orientation = Quat::from_xyzw(
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
            rng.random_range(-1.0..1.0),
        );
        *sample = JointSample::new(sample.position + offset, orientation);
    }
    frame
}

pub fn seeded(seed: u64) -> StdRng {
    StdRng::seed_from_u64(seed)
}

pub fn single_pose(frame: PoseFrame) -> Vec<RecordedPose> {
    vec![RecordedPose::new(0.0, frame)]
}
