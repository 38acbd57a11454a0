//! Shared fixtures for unit tests.

use crate::joint::{JointId, JointSample, PoseFrame};
use glam::{Quat, Vec3};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Tracking-space positions (millimetres, y down) of a person standing
/// two metres from the sensor with the right arm half raised. The
/// integration fixture in `tests/common` keeps both arms level.
pub fn standing_positions() -> [Vec3; JointId::COUNT] {
    use JointId as J;
    let mut p = [Vec3::ZERO; JointId::COUNT];
    let mut set = |joint: JointId, x: f32, y: f32, z: f32| p[joint.index()] = Vec3::new(x, y, z);

    set(J::Pelvis, 0.0, 0.0, 2000.0);
    set(J::SpineNavel, 0.0, -200.0, 2000.0);
    set(J::SpineChest, 0.0, -350.0, 2005.0);
    set(J::Neck, 0.0, -550.0, 2010.0);

    set(J::ClavicleLeft, -50.0, -500.0, 2000.0);
    set(J::ShoulderLeft, -180.0, -500.0, 2000.0);
    set(J::ElbowLeft, -450.0, -520.0, 1990.0);
    set(J::WristLeft, -700.0, -480.0, 1980.0);
    set(J::HandLeft, -780.0, -480.0, 1980.0);
    set(J::HandTipLeft, -850.0, -485.0, 1975.0);
    set(J::ThumbLeft, -760.0, -470.0, 1950.0);

    set(J::ClavicleRight, 50.0, -500.0, 2000.0);
    set(J::ShoulderRight, 180.0, -500.0, 2000.0);
    set(J::ElbowRight, 440.0, -600.0, 1980.0);
    set(J::WristRight, 650.0, -750.0, 1960.0);
    set(J::HandRight, 720.0, -800.0, 1960.0);
    set(J::HandTipRight, 780.0, -840.0, 1955.0);
    set(J::ThumbRight, 700.0, -820.0, 1930.0);

    set(J::HipLeft, -100.0, 20.0, 2000.0);
    set(J::KneeLeft, -110.0, 450.0, 2010.0);
    set(J::AnkleLeft, -115.0, 850.0, 2020.0);
    set(J::FootLeft, -115.0, 880.0, 1900.0);

    set(J::HipRight, 100.0, 20.0, 2000.0);
    set(J::KneeRight, 120.0, 440.0, 1990.0);
    set(J::AnkleRight, 125.0, 840.0, 1980.0);
    set(J::FootRight, 125.0, 870.0, 1860.0);

    set(J::Head, 0.0, -650.0, 2000.0);
    set(J::Nose, 0.0, -680.0, 1920.0);
    set(J::EyeLeft, -30.0, -700.0, 1930.0);
    set(J::EarLeft, -70.0, -690.0, 2000.0);
    set(J::EyeRight, 30.0, -700.0, 1930.0);
    set(J::EarRight, 70.0, -690.0, 2000.0);
    p
}

pub fn standing_frame() -> PoseFrame {
    PoseFrame::from_positions(standing_positions())
}

/// Standing frame with every joint displaced up to `spread` millimetres
/// and given a random orientation.
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
