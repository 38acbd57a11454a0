use serde::{Deserialize, Serialize};

/// Tracked skeletal landmark.
///
/// Discriminants follow the body-tracking SDK ordering and are stable: poses
/// are always stored as `[JointSample; JointId::COUNT]` indexed by them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[repr(u8)]
pub enum JointId {
    // Spine
    Pelvis = 0,
    SpineNavel = 1,
    SpineChest = 2,
    Neck = 3,

    // Left arm
    ClavicleLeft = 4,
    ShoulderLeft = 5,
    ElbowLeft = 6,
    WristLeft = 7,
    HandLeft = 8,
    HandTipLeft = 9,
    ThumbLeft = 10,

    // Right arm
    ClavicleRight = 11,
    ShoulderRight = 12,
    ElbowRight = 13,
    WristRight = 14,
    HandRight = 15,
    HandTipRight = 16,
    ThumbRight = 17,

    // Left leg
    HipLeft = 18,
    KneeLeft = 19,
    AnkleLeft = 20,
    FootLeft = 21,

    // Right leg
    HipRight = 22,
    KneeRight = 23,
    AnkleRight = 24,
    FootRight = 25,

    // Head
    Head = 26,
    Nose = 27,
    EyeLeft = 28,
    EarLeft = 29,
    EyeRight = 30,
    EarRight = 31,
}

impl JointId {
    /// Total number of tracked joints
    pub const COUNT: usize = 32;

    /// Convert to array index
    #[inline]
    pub const fn index(self) -> usize {
        self as usize
    }

    /// All joints in index order
    pub const ALL: [JointId; Self::COUNT] = [
        JointId::Pelvis,
        JointId::SpineNavel,
        JointId::SpineChest,
        JointId::Neck,
        JointId::ClavicleLeft,
        JointId::ShoulderLeft,
        JointId::ElbowLeft,
        JointId::WristLeft,
        JointId::HandLeft,
        JointId::HandTipLeft,
        JointId::ThumbLeft,
        JointId::ClavicleRight,
        JointId::ShoulderRight,
        JointId::ElbowRight,
        JointId::WristRight,
        JointId::HandRight,
        JointId::HandTipRight,
        JointId::ThumbRight,
        JointId::HipLeft,
        JointId::KneeLeft,
        JointId::AnkleLeft,
        JointId::FootLeft,
        JointId::HipRight,
        JointId::KneeRight,
        JointId::AnkleRight,
        JointId::FootRight,
        JointId::Head,
        JointId::Nose,
        JointId::EyeLeft,
        JointId::EarLeft,
        JointId::EyeRight,
        JointId::EarRight,
    ];

    /// Look up a joint by its raw index
    pub fn from_index(index: usize) -> Option<JointId> {
        Self::ALL.get(index).copied()
    }
}

static_assertions::const_assert_eq!(JointId::EarRight as usize + 1, JointId::COUNT);
