//! Displayable sprite resource
//!
//! The output of a snapshot bake: an owned RGBA pixel buffer with a region
//! rectangle and a pivot point. Pixel rows are stored bottom-up so the
//! sprite's origin is its bottom-left corner; exports flip back to the
//! top-down order image files and GPU textures expect.

use crate::color::Color;
use crate::rasterizer::{Framebuffer, Vec2};
use macroquad::texture::{FilterMode, Texture2D};
use std::path::Path;

/// Region of a sprite within its pixel buffer
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpriteRect {
    pub x: f32,
    pub y: f32,
    pub width: f32,
    pub height: f32,
}

/// A baked 2D image with bottom-left anchoring
#[derive(Debug, Clone)]
pub struct Sprite {
    /// RGBA pixels, 4 bytes each, rows bottom-up
    pixels: Vec<u8>,
    width: usize,
    height: usize,
    /// Region covered by this sprite (the full buffer for baked sprites)
    pub rect: SpriteRect,
    /// Anchor point; (0, 0) is the bottom-left corner
    pub pivot: Vec2,
}

impl Sprite {
    /// Wrap a framebuffer's pixels as a sprite anchored at its bottom-left
    /// corner. The framebuffer is top-down, so rows are flipped on the way
    /// in.
    pub fn from_framebuffer(fb: &Framebuffer) -> Self {
        let mut pixels = Vec::with_capacity(fb.pixels.len());
        for y in (0..fb.height).rev() {
            let row = y * fb.width * 4;
            pixels.extend_from_slice(&fb.pixels[row..row + fb.width * 4]);
        }
        Self {
            pixels,
            width: fb.width,
            height: fb.height,
            rect: SpriteRect { x: 0.0, y: 0.0, width: fb.width as f32, height: fb.height as f32 },
            pivot: Vec2::ZERO,
        }
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.height
    }

    /// Read a pixel with (0, 0) at the bottom-left corner
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

    /// The four corner pixels: bottom-left, bottom-right, top-left,
    /// top-right
    pub fn corner_pixels(&self) -> [Color; 4] {
        [
            self.pixel(0, 0),
            self.pixel(self.width.saturating_sub(1), 0),
            self.pixel(0, self.height.saturating_sub(1)),
            self.pixel(self.width.saturating_sub(1), self.height.saturating_sub(1)),
        ]
    }

    /// Convert to an `image` buffer (top-down row order)
    pub fn to_image(&self) -> image::RgbaImage {
        let mut flipped = Vec::with_capacity(self.pixels.len());
        for y in (0..self.height).rev() {
            let row = y * self.width * 4;
            flipped.extend_from_slice(&self.pixels[row..row + self.width * 4]);
        }
        // Dimensions always match the buffer we just built
        image::RgbaImage::from_raw(self.width as u32, self.height as u32, flipped)
            .unwrap_or_else(|| image::RgbaImage::new(self.width as u32, self.height as u32))
    }

    /// Save as PNG
    pub fn save_png(&self, path: &Path) -> Result<(), image::ImageError> {
        self.to_image().save(path)
    }

    /// Upload to a GPU texture for UI display (nearest-filtered)
    pub fn to_texture(&self) -> Texture2D {
        let mut flipped = Vec::with_capacity(self.pixels.len());
        for y in (0..self.height).rev() {
            let row = y * self.width * 4;
            flipped.extend_from_slice(&self.pixels[row..row + self.width * 4]);
        }
        let texture = Texture2D::from_rgba8(self.width as u16, self.height as u16, &flipped);
        texture.set_filter(FilterMode::Nearest);
        texture
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bottom_left_origin() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Color::TRANSPARENT);
        // Paint the framebuffer's top-left pixel (0, 0 in top-down order)
        fb.pixels[0..4].copy_from_slice(&Color::RED.to_bytes());

        let sprite = Sprite::from_framebuffer(&fb);
        // In sprite space that pixel is the top-left corner: (0, 1)
        assert_eq!(sprite.pixel(0, 1), Color::RED);
        assert_eq!(sprite.pixel(0, 0), Color::TRANSPARENT);
        assert_eq!(sprite.pivot, Vec2::ZERO);
        assert_eq!(sprite.rect.width, 2.0);
    }

    #[test]
    fn test_to_image_round_trips_orientation() {
        let mut fb = Framebuffer::new(2, 2);
        fb.clear(Color::TRANSPARENT);
        fb.pixels[0..4].copy_from_slice(&Color::GREEN.to_bytes());

        let sprite = Sprite::from_framebuffer(&fb);
        let img = sprite.to_image();
        // The image is top-down again, so the painted pixel is back at (0, 0)
        assert_eq!(img.get_pixel(0, 0).0, Color::GREEN.to_bytes());
    }

    #[test]
    fn test_out_of_bounds_pixel_is_transparent() {
        let fb = Framebuffer::new(2, 2);
        let sprite = Sprite::from_framebuffer(&fb);
        assert_eq!(sprite.pixel(5, 5), Color::TRANSPARENT);
    }

    #[test]
    fn test_save_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sprite.png");

        let mut fb = Framebuffer::new(4, 4);
        fb.clear(Color::BLUE);
        let sprite = Sprite::from_framebuffer(&fb);
        sprite.save_png(&path).unwrap();

        let loaded = image::open(&path).unwrap().to_rgba8();
        assert_eq!(loaded.dimensions(), (4, 4));
        assert_eq!(loaded.get_pixel(2, 2).0, Color::BLUE.to_bytes());
    }
}
