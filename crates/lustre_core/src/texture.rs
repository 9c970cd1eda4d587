//! Texture loading for environment maps.
//!
//! Images are decoded with the `image` crate and stored as linear float RGB,
//! ready for bilinear lookups from the render threads.

use std::path::Path;

use lustre_math::{Interval, Vec3};
use thiserror::Error;

/// Errors that can occur during texture loading.
#[derive(Error, Debug)]
pub enum TextureError {
    #[error("Failed to load texture {path}: {source}")]
    Load {
        path: String,
        #[source]
        source: image::ImageError,
    },

    #[error("Texture has no pixels: {0}")]
    Empty(String),

    #[error("Pixel buffer of {len} does not match {width}x{height}")]
    SizeMismatch { width: u32, height: u32, len: usize },
}

pub type TextureResult<T> = Result<T, TextureError>;

/// A loaded texture with pixel data.
///
/// Stores pixels in linear RGB float format, row-major, top row first.
#[derive(Clone, Debug)]
pub struct Texture {
    /// Texture width in pixels
    pub width: u32,

    /// Texture height in pixels
    pub height: u32,

    pixels: Vec<Vec3>,

    /// Original file path (for debugging)
    pub path: String,
}

impl Texture {
    /// Create a new texture from pixel data.
    pub fn new(
        width: u32,
        height: u32,
        pixels: Vec<Vec3>,
        path: impl Into<String>,
    ) -> TextureResult<Self> {
        let path = path.into();
        if width == 0 || height == 0 {
            return Err(TextureError::Empty(path));
        }
        if pixels.len() != width as usize * height as usize {
            return Err(TextureError::SizeMismatch {
                width,
                height,
                len: pixels.len(),
            });
        }
        Ok(Self {
            width,
            height,
            pixels,
            path,
        })
    }

    /// Create a solid color texture (1x1).
    pub fn solid_color(color: Vec3) -> Self {
        Self {
            width: 1,
            height: 1,
            pixels: vec![color],
            path: "<solid>".to_string(),
        }
    }

    /// Load a texture from an image file, converting sRGB to linear.
    pub fn load(path: impl AsRef<Path>) -> TextureResult<Self> {
        let path = path.as_ref();
        let img = image::open(path).map_err(|source| TextureError::Load {
            path: path.display().to_string(),
            source,
        })?;

        let rgb = img.to_rgb8();
        let (width, height) = rgb.dimensions();
        let pixels = rgb
            .pixels()
            .map(|p| Vec3::new(srgb_to_linear(p[0]), srgb_to_linear(p[1]), srgb_to_linear(p[2])))
            .collect();

        let texture = Self::new(width, height, pixels, path.display().to_string())?;
        log::debug!(
            "Loaded texture: {} ({}x{}, {:.1} KB)",
            texture.path,
            width,
            height,
            texture.size_bytes() as f32 / 1024.0
        );
        Ok(texture)
    }

    /// Sample the texture at UV coordinates (bilinear filtering).
    ///
    /// UV coordinates are in [0, 1] with (0, 0) at the top-left pixel center
    /// and (1, 1) at the bottom-right one. Out of range coordinates clamp to
    /// the edge, which keeps cube-map seams free of wrap-around bleeding.
    pub fn sample(&self, u: f32, v: f32) -> Vec3 {
        let x = Interval::UNIT.clamp(u) * (self.width - 1) as f32;
        let y = Interval::UNIT.clamp(v) * (self.height - 1) as f32;

        let x0 = x.floor() as u32;
        let y0 = y.floor() as u32;
        let x1 = (x0 + 1).min(self.width - 1);
        let y1 = (y0 + 1).min(self.height - 1);

        let fx = x - x0 as f32;
        let fy = y - y0 as f32;

        let top = self.pixel(x0, y0).lerp(self.pixel(x1, y0), fx);
        let bottom = self.pixel(x0, y1).lerp(self.pixel(x1, y1), fx);
        top.lerp(bottom, fy)
    }

    /// Get pixel at integer coordinates.
    pub fn pixel(&self, x: u32, y: u32) -> Vec3 {
        let idx = y as usize * self.width as usize + x as usize;
        self.pixels.get(idx).copied().unwrap_or(Vec3::ZERO)
    }

    /// Get total size in bytes (approximate).
    pub fn size_bytes(&self) -> usize {
        self.pixels.len() * std::mem::size_of::<Vec3>()
    }
}

/// Convert sRGB byte value to linear float.
fn srgb_to_linear(value: u8) -> f32 {
    let v = value as f32 / 255.0;
    if v <= 0.04045 {
        v / 12.92
    } else {
        ((v + 0.055) / 1.055).powf(2.4)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn checker() -> Texture {
        // 2x2: black, white / red, green
        Texture::new(
            2,
            2,
            vec![Vec3::ZERO, Vec3::ONE, Vec3::X, Vec3::Y],
            "<checker>",
        )
        .unwrap()
    }

    #[test]
    fn test_solid_color_texture() {
        let tex = Texture::solid_color(Vec3::new(1.0, 0.5, 0.0));
        assert_eq!(tex.width, 1);
        assert_eq!(tex.height, 1);

        let sample = tex.sample(0.5, 0.5);
        assert!((sample.x - 1.0).abs() < 0.001);
        assert!((sample.y - 0.5).abs() < 0.001);
        assert!(sample.z.abs() < 0.001);
    }

    #[test]
    fn test_sample_corners_and_center() {
        let tex = checker();
        assert_eq!(tex.sample(0.0, 0.0), Vec3::ZERO);
        assert_eq!(tex.sample(1.0, 0.0), Vec3::ONE);
        assert_eq!(tex.sample(0.0, 1.0), Vec3::X);
        assert_eq!(tex.sample(1.0, 1.0), Vec3::Y);

        let center = tex.sample(0.5, 0.5);
        let expected = (Vec3::ZERO + Vec3::ONE + Vec3::X + Vec3::Y) / 4.0;
        assert!((center - expected).length() < 1e-5);
    }

    #[test]
    fn test_sample_clamps_to_edge() {
        let tex = checker();
        assert_eq!(tex.sample(-3.0, -1.0), Vec3::ZERO);
        assert_eq!(tex.sample(7.0, 9.0), Vec3::Y);
    }

    #[test]
    fn test_rejects_bad_sizes() {
        assert!(matches!(
            Texture::new(0, 4, vec![], "x"),
            Err(TextureError::Empty(_))
        ));
        assert!(matches!(
            Texture::new(2, 2, vec![Vec3::ZERO; 3], "x"),
            Err(TextureError::SizeMismatch { len: 3, .. })
        ));
    }

    #[test]
    fn test_size_check_past_u32_range() {
        // 65536 * 65536 does not fit in a u32
        assert!(matches!(
            Texture::new(65536, 65536, vec![Vec3::ZERO; 4], "huge"),
            Err(TextureError::SizeMismatch { width: 65536, height: 65536, len: 4 })
        ));
    }

    #[test]
    fn test_load_missing_file() {
        let err = Texture::load("definitely/not/here.png").unwrap_err();
        assert!(matches!(err, TextureError::Load { .. }));
    }

    #[test]
    fn test_srgb_to_linear() {
        assert!((srgb_to_linear(0) - 0.0).abs() < 0.001);
        assert!((srgb_to_linear(255) - 1.0).abs() < 0.001);

        // Mid-gray is darker in linear
        let mid = srgb_to_linear(128);
        assert!(mid < 0.5);
        assert!(mid > 0.1);
    }
}
