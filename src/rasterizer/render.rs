//! Framebuffer and triangle rasterization

use super::camera::Camera;
use super::math::{barycentric, project, Vec3, NEAR_PLANE};
use super::types::{Face, RasterSettings, Vertex};
use crate::color::Color;

/// CPU-side render target
///
/// RGBA byte buffer plus a depth buffer, top-left row order. This is the
/// "offscreen render texture" of the snapshot pipeline: rendering writes
/// into it on the calling thread, and reading it back is a memory copy.
pub struct Framebuffer {
    /// RGBA, 4 bytes per pixel
    pub pixels: Vec<u8>,
    /// Camera-space depth per pixel
    pub zbuffer: Vec<f32>,
    pub width: usize,
    pub height: usize,
}

impl Framebuffer {
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            pixels: vec![0; width * height * 4],
            zbuffer: vec![f32::MAX; width * height],
            width,
            height,
        }
    }

    /// Fill with a color. The color's alpha lands in the buffer too, so a
    /// transparent clear stays transparent in the readback.
    pub fn clear(&mut self, color: Color) {
        let bytes = color.to_bytes();
        for i in 0..(self.width * self.height) {
            self.pixels[i * 4..i * 4 + 4].copy_from_slice(&bytes);
            self.zbuffer[i] = f32::MAX;
        }
    }

    /// Read a pixel (top-left origin). Out-of-bounds reads return transparent.
    pub fn pixel(&self, x: usize, y: usize) -> Color {
        if x >= self.width || y >= self.height {
            return Color::TRANSPARENT;
        }
        let i = (y * self.width + x) * 4;
        Color::from_bytes([
            self.pixels[i],
            self.pixels[i + 1],
            self.pixels[i + 2],
            self.pixels[i + 3],
        ])
    }

    #[inline]
    fn put_pixel(&mut self, x: usize, y: usize, z: f32, color: Color) {
        let i = y * self.width + x;
        if z < self.zbuffer[i] {
            self.zbuffer[i] = z;
            self.pixels[i * 4..i * 4 + 4].copy_from_slice(&color.to_bytes());
        }
    }
}

/// Rasterize world-space triangles into the framebuffer.
///
/// Vertices are already in world space; the camera transform, projection,
/// backface cull, and z-test all happen here. Triangles with any vertex
/// closer than the near plane are rejected whole (no clipping - snapshot
/// targets sit well in front of the camera).
pub fn render_mesh(
    fb: &mut Framebuffer,
    vertices: &[Vertex],
    faces: &[Face],
    camera: &Camera,
    settings: &RasterSettings,
) {
    if fb.width == 0 || fb.height == 0 {
        return;
    }

    // Transform and project every vertex once
    let projected: Vec<Option<Vec3>> = vertices
        .iter()
        .map(|v| {
            let cam_space = camera.to_camera_space(v.pos);
            if cam_space.z < NEAR_PLANE {
                None
            } else {
                Some(project(cam_space, fb.width, fb.height))
            }
        })
        .collect();

    for face in faces {
        if face.iter().any(|&i| i >= vertices.len()) {
            continue;
        }
        let (p0, p1, p2) = match (projected[face[0]], projected[face[1]], projected[face[2]]) {
            (Some(a), Some(b), Some(c)) => (a, b, c),
            _ => continue,
        };

        // Screen-space signed area; front faces are wound to come out
        // negative under the y-down screen convention
        let area = (p1.x - p0.x) * (p2.y - p0.y) - (p2.x - p0.x) * (p1.y - p0.y);
        if area == 0.0 {
            continue;
        }
        if settings.backface_cull && area > 0.0 {
            continue;
        }

        let c0 = vertices[face[0]].color.modulate(settings.tint);
        let c1 = vertices[face[1]].color.modulate(settings.tint);
        let c2 = vertices[face[2]].color.modulate(settings.tint);

        // Bounding box clamped to the framebuffer
        let min_x = p0.x.min(p1.x).min(p2.x).floor().max(0.0) as usize;
        let max_x = (p0.x.max(p1.x).max(p2.x).ceil() as usize).min(fb.width - 1);
        let min_y = p0.y.min(p1.y).min(p2.y).floor().max(0.0) as usize;
        let max_y = (p0.y.max(p1.y).max(p2.y).ceil() as usize).min(fb.height - 1);

        for y in min_y..=max_y {
            for x in min_x..=max_x {
                let p = Vec3::new(x as f32 + 0.5, y as f32 + 0.5, 0.0);
                let bc = barycentric(p, p0, p1, p2);
                if bc.x < 0.0 || bc.y < 0.0 || bc.z < 0.0 {
                    continue;
                }

                let z = p0.z * bc.x + p1.z * bc.y + p2.z * bc.z;
                // Weights sum to ~1 with float error; round so a uniform
                // face keeps its exact color
                let color = Color {
                    r: (c0.r as f32 * bc.x + c1.r as f32 * bc.y + c2.r as f32 * bc.z + 0.5) as u8,
                    g: (c0.g as f32 * bc.x + c1.g as f32 * bc.y + c2.g as f32 * bc.z + 0.5) as u8,
                    b: (c0.b as f32 * bc.x + c1.b as f32 * bc.y + c2.b as f32 * bc.z + 0.5) as u8,
                    a: (c0.a as f32 * bc.x + c1.a as f32 * bc.y + c2.a as f32 * bc.z + 0.5) as u8,
                };
                fb.put_pixel(x, y, z, color);
            }
        }
    }
}
