//! Core types for the snapshot renderer

use super::math::Vec3;
use crate::color::Color;
use serde::{Deserialize, Serialize};

/// A mesh vertex: position plus vertex color
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Vertex {
    pub pos: Vec3,
    #[serde(default)]
    pub color: Color,
}

impl Vertex {
    pub fn new(pos: Vec3, color: Color) -> Self {
        Self { pos, color }
    }
}

/// A triangle as indices into a vertex list
pub type Face = [usize; 3];

/// Triangle mesh with per-vertex colors.
///
/// Meshes are embedded directly in prefab files rather than referenced,
/// so a prefab is a self-contained bundle.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct Mesh {
    pub vertices: Vec<Vertex>,
    pub faces: Vec<Face>,
}

impl Mesh {
    pub fn new(vertices: Vec<Vertex>, faces: Vec<Face>) -> Self {
        Self { vertices, faces }
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty() || self.faces.is_empty()
    }

    /// Axis-aligned cube centered on the origin.
    ///
    /// Faces are wound so that, under the renderer's y-down screen space,
    /// front faces produce a negative signed area (see `render_mesh`).
    pub fn cube(size: f32, color: Color) -> Self {
        let h = size / 2.0;
        let corners = [
            Vec3::new(-h, -h, -h),
            Vec3::new(h, -h, -h),
            Vec3::new(h, h, -h),
            Vec3::new(-h, h, -h),
            Vec3::new(-h, -h, h),
            Vec3::new(h, -h, h),
            Vec3::new(h, h, h),
            Vec3::new(-h, h, h),
        ];
        let vertices = corners.iter().map(|&pos| Vertex::new(pos, color)).collect();
        let faces = vec![
            // -Z (toward a default camera looking down +Z)
            [0, 1, 2], [0, 2, 3],
            // +Z
            [5, 4, 7], [5, 7, 6],
            // +X
            [1, 5, 6], [1, 6, 2],
            // -X
            [4, 0, 3], [4, 3, 7],
            // +Y
            [3, 2, 6], [3, 6, 7],
            // -Y
            [1, 0, 4], [1, 4, 5],
        ];
        Self { vertices, faces }
    }

    /// Single camera-facing quad in the XY plane
    pub fn quad(width: f32, height: f32, color: Color) -> Self {
        let hw = width / 2.0;
        let hh = height / 2.0;
        let vertices = vec![
            Vertex::new(Vec3::new(-hw, -hh, 0.0), color),
            Vertex::new(Vec3::new(hw, -hh, 0.0), color),
            Vertex::new(Vec3::new(hw, hh, 0.0), color),
            Vertex::new(Vec3::new(-hw, hh, 0.0), color),
        ];
        let faces = vec![[0, 1, 2], [0, 2, 3]];
        Self { vertices, faces }
    }
}

/// Per-draw rendering settings
#[derive(Debug, Clone)]
pub struct RasterSettings {
    /// Material tint multiplied over vertex colors
    pub tint: Color,
    /// Skip triangles facing away from the camera
    pub backface_cull: bool,
}

impl Default for RasterSettings {
    fn default() -> Self {
        Self {
            tint: Color::WHITE,
            backface_cull: true,
        }
    }
}
