//! Rotation and coordinate helpers shared by retargeting and scoring.

pub use glam::{Mat3, Quat, Vec3};
use serde::{Deserialize, Serialize};

/// Small epsilon value for floating-point comparisons
pub const EPSILON: f32 = 1e-6;

/// Canonical forward axis of a look rotation
pub const FORWARD: Vec3 = Vec3::Z;

/// World up, secondary axis of a look rotation
pub const WORLD_UP: Vec3 = Vec3::Y;

/// Map a tracking-space position into rig space.
///
/// Tracking space is Y-down relative to rig space, so the vertical axis is
/// negated before the per-rig scale is applied.
#[inline]
pub fn to_rig_space(position: Vec3, scale: f32) -> Vec3 {
    Vec3::new(position.x, -position.y, position.z) * scale
}

/// Rotation whose +Z axis points along `forward` and whose +Y axis lies in
/// the plane spanned by `forward` and `up`.
///
/// Returns `None` when `forward` is zero-length or parallel to `up`.
pub fn look_rotation(forward: Vec3, up: Vec3) -> Option<Quat> {
    let f = forward.try_normalize()?;
    let right = up.cross(f);
    if right.length_squared() < EPSILON {
        return None;
    }
    let right = right.normalize();
    let up = f.cross(right);
    Some(Quat::from_mat3(&Mat3::from_cols(right, up, f)).normalize())
}

/// Unsigned alignment of two rotations: 1 when equal (or antipodal), 0 when
/// 180 degrees apart.
#[inline]
pub fn alignment(a: Quat, b: Quat) -> f32 {
    let dot = a.dot(b);
    dot * dot
}

/// Euler offset in degrees, used for hand-tuned calibration rotations.
///
/// Applied as a local-space rotation: Z first, then X, then Y (the composed
/// quaternion is `Ry * Rx * Rz`), the convention the rig bind poses were
/// calibrated in.
#[derive(Debug, Clone, Copy, Default, PartialEq, Deserialize, Serialize)]
pub struct EulerOffset {
    #[serde(default)]
    pub x: f32,
    #[serde(default)]
    pub y: f32,
    #[serde(default)]
    pub z: f32,
}

impl EulerOffset {
    pub const ZERO: EulerOffset = EulerOffset::new(0.0, 0.0, 0.0);

    pub const fn new(x: f32, y: f32, z: f32) -> Self {
        Self { x, y, z }
    }

    /// Convert to quaternion (YXZ order)
    pub fn to_quat(&self) -> Quat {
        Quat::from_euler(
            glam::EulerRot::YXZ,
            self.y.to_radians(),
            self.x.to_radians(),
            self.z.to_radians(),
        )
    }

    /// Rotate `rotation` by this offset in its own local frame
    #[inline]
    pub fn apply_local(&self, rotation: Quat) -> Quat {
        (rotation * self.to_quat()).normalize()
    }
}
