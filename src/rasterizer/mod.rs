//! Software renderer for offscreen sprite baking
//!
//! A compact CPU rasterizer: no GPU, no windowing context, fully
//! deterministic. Sprite baking drives one manual render into a
//! `Framebuffer` and reads the pixels straight back.
//!
//! # Module Organization
//!
//! - `math` - Vec3, Vec2, Mat4 helpers, projection, barycentric coords
//! - `types` - Vertex, Face, Mesh, RasterSettings
//! - `camera` - Camera basis built from a scene node's global transform
//! - `render` - Framebuffer and z-buffered triangle fill

pub mod camera;
pub mod math;
pub mod render;
pub mod types;

pub use camera::Camera;
pub use math::{
    barycentric, mat4_affine_inverse, mat4_from_position_rotation_scale, mat4_identity,
    mat4_mul, mat4_rotation, mat4_transform_point, mat4_translation, project, view_transform,
    Mat4, Vec2, Vec3, FOV_Y_DEGREES, NEAR_PLANE,
};
pub use render::{render_mesh, Framebuffer};
pub use types::{Face, Mesh, RasterSettings, Vertex};
