//! Transform components
//!
//! Two-tier transform system:
//! - Transform: local position/rotation/scale (relative to parent)
//! - GlobalTransform: computed world-space matrix
//!
//! For nodes with parents, GlobalTransform = parent.GlobalTransform * self.Transform.
//! For root nodes, GlobalTransform = Transform.

use crate::rasterizer::{
    mat4_from_position_rotation_scale, mat4_mul, mat4_transform_point, Mat4, Vec3,
};
use serde::{Deserialize, Serialize};

/// Local transform relative to parent (or world if no parent)
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform {
    /// Position relative to parent
    pub position: Vec3,
    /// Rotation in euler angles (degrees)
    pub rotation: Vec3,
    /// Uniform scale factor
    pub scale: f32,
}

impl Transform {
    /// Identity transform (origin, no rotation, scale 1)
    pub const IDENTITY: Transform = Transform {
        position: Vec3::ZERO,
        rotation: Vec3::ZERO,
        scale: 1.0,
    };

    /// Create transform at a position
    pub fn from_position(position: Vec3) -> Self {
        Self { position, ..Self::IDENTITY }
    }

    /// Convert to a 4x4 transformation matrix
    pub fn to_matrix(&self) -> Mat4 {
        mat4_from_position_rotation_scale(self.position, self.rotation, self.scale)
    }
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

/// World-space transform, computed from the hierarchy
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct GlobalTransform {
    matrix: Mat4,
}

impl GlobalTransform {
    pub const IDENTITY: GlobalTransform = GlobalTransform {
        matrix: [
            [1.0, 0.0, 0.0, 0.0],
            [0.0, 1.0, 0.0, 0.0],
            [0.0, 0.0, 1.0, 0.0],
            [0.0, 0.0, 0.0, 1.0],
        ],
    };

    /// Create from a local transform (for root nodes)
    pub fn from_transform(transform: &Transform) -> Self {
        Self { matrix: transform.to_matrix() }
    }

    /// Compute a child's global transform from the parent's global and the
    /// child's local
    pub fn from_parent_and_local(parent: &GlobalTransform, local: &Transform) -> Self {
        Self { matrix: mat4_mul(&parent.matrix, &local.to_matrix()) }
    }

    /// World position (translation column)
    pub fn position(&self) -> Vec3 {
        Vec3::new(self.matrix[0][3], self.matrix[1][3], self.matrix[2][3])
    }

    /// The full transformation matrix
    pub fn matrix(&self) -> &Mat4 {
        &self.matrix
    }

    /// Transform a point from local space to world space
    pub fn transform_point(&self, point: Vec3) -> Vec3 {
        mat4_transform_point(&self.matrix, point)
    }

    /// Right direction (X axis)
    pub fn right(&self) -> Vec3 {
        Vec3::new(self.matrix[0][0], self.matrix[1][0], self.matrix[2][0]).normalize()
    }

    /// Up direction (Y axis)
    pub fn up(&self) -> Vec3 {
        Vec3::new(self.matrix[0][1], self.matrix[1][1], self.matrix[2][1]).normalize()
    }

    /// Forward direction (Z axis)
    pub fn forward(&self) -> Vec3 {
        Vec3::new(self.matrix[0][2], self.matrix[1][2], self.matrix[2][2]).normalize()
    }
}

impl Default for GlobalTransform {
    fn default() -> Self {
        Self::IDENTITY
    }
}
