use glam::{Quat, Vec3};

/// Local translation/rotation/scale of a rig part.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PartTransform {
    pub translation: Vec3,
    pub rotation: Quat,
    pub scale: Vec3,
}

impl Default for PartTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl PartTransform {
    pub const IDENTITY: PartTransform = PartTransform {
        translation: Vec3::ZERO,
        rotation: Quat::IDENTITY,
        scale: Vec3::ONE,
    };

    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Self::IDENTITY
        }
    }

    /// Map a point from this transform's local space into its parent's space
    #[inline]
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        self.translation + self.rotation * (self.scale * point)
    }

    /// Inverse of [`transform_point`](Self::transform_point)
    #[inline]
    pub fn inverse_transform_point(&self, point: Vec3) -> Vec3 {
        (self.rotation.inverse() * (point - self.translation)) / self.scale
    }

    /// Compose parent * child: the child's transform expressed in the
    /// parent's parent space.
    pub fn then(&self, child: &PartTransform) -> PartTransform {
        PartTransform {
            translation: self.transform_point(child.translation),
            rotation: (self.rotation * child.rotation).normalize(),
            scale: self.scale * child.scale,
        }
    }

    /// Local transform that places a node at `world` under a parent whose
    /// world transform is `self`.
    pub fn relative(&self, world: &PartTransform) -> PartTransform {
        PartTransform {
            translation: self.inverse_transform_point(world.translation),
            rotation: (self.rotation.inverse() * world.rotation).normalize(),
            scale: world.scale / self.scale,
        }
    }
}

/// Flat per-part instance data for a renderer.
///
/// Layout: translation xyz, rotation xyzw, scale xyz.
#[repr(C)]
#[derive(Debug, Copy, Clone, PartialEq, bytemuck::Pod, bytemuck::Zeroable)]
pub struct PartInstance {
    pub translation: [f32; 3],
    pub rotation: [f32; 4],
    pub scale: [f32; 3],
}

static_assertions::assert_eq_size!(PartInstance, [f32; 10]);

impl From<&PartTransform> for PartInstance {
    fn from(t: &PartTransform) -> Self {
        Self {
            translation: t.translation.to_array(),
            rotation: t.rotation.to_array(),
            scale: t.scale.to_array(),
        }
    }
}

/// Reinterpret instances as a flat float slice for upload
pub fn instances_as_floats(instances: &[PartInstance]) -> &[f32] {
    bytemuck::cast_slice(instances)
}
