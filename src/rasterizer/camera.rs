//! Camera view for the snapshot renderer
//!
//! A camera is a position plus an orthonormal basis; world-space points are
//! expressed in that basis before projection. Snapshot cameras are built
//! from a scene node's global transform, so parenting a target under the
//! camera node "just works".

use super::math::{Vec3, view_transform};
use crate::scene::GlobalTransform;

/// Camera state for rendering
#[derive(Clone, Debug)]
pub struct Camera {
    pub position: Vec3,

    // Basis vectors: x = right, y = up, z = forward (view direction)
    pub basis_x: Vec3,
    pub basis_y: Vec3,
    pub basis_z: Vec3,
}

impl Camera {
    /// Camera at the origin looking down +Z
    pub fn new() -> Self {
        Self {
            position: Vec3::ZERO,
            basis_x: Vec3::new(1.0, 0.0, 0.0),
            basis_y: Vec3::new(0.0, 1.0, 0.0),
            basis_z: Vec3::new(0.0, 0.0, 1.0),
        }
    }

    /// Build a camera from a node's global transform: position from the
    /// translation column, basis from the (normalized) rotation columns.
    pub fn from_global(global: &GlobalTransform) -> Self {
        Self {
            position: global.position(),
            basis_x: global.right(),
            basis_y: global.up(),
            basis_z: global.forward(),
        }
    }

    /// Transform a world-space point into camera space
    pub fn to_camera_space(&self, world: Vec3) -> Vec3 {
        view_transform(world - self.position, self.basis_x, self.basis_y, self.basis_z)
    }
}

impl Default for Camera {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn approx(a: f32, b: f32) -> bool {
        (a - b).abs() < 0.001
    }

    #[test]
    fn test_identity_camera_space() {
        let cam = Camera::new();
        let p = cam.to_camera_space(Vec3::new(1.0, 2.0, 3.0));
        assert!(approx(p.x, 1.0) && approx(p.y, 2.0) && approx(p.z, 3.0));
    }

    #[test]
    fn test_from_global_identity_basis() {
        let cam = Camera::from_global(&GlobalTransform::IDENTITY);
        let p = cam.to_camera_space(Vec3::new(0.0, 0.0, 4.0));
        assert!(approx(p.z, 4.0));
    }
}
