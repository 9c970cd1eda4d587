//! Blinn-Phong surface material.

use lustre_math::Vec3;

/// Color type alias (linear RGB, unclamped)
pub type Color = Vec3;

/// Smallest shininess exponent a material will carry.
///
/// `powf` with a zero or negative exponent blows up for grazing half-vectors,
/// so every constructor floors the exponent to this value.
pub const MIN_SHININESS: f32 = 1e-4;

/// A Blinn-Phong material.
///
/// Plain value type: hits carry their own copy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Material {
    /// Diffuse coefficient k_d (RGB, 0-1 per channel)
    pub diffuse: Color,
    /// Specular coefficient k_s (RGB, 0-1 per channel); also the mirror
    /// reflectance used to attenuate reflection bounces
    pub specular: Color,
    shininess: f32,
}

impl Material {
    /// Create a new material, flooring `shininess` to [`MIN_SHININESS`].
    pub fn new(diffuse: Color, specular: Color, shininess: f32) -> Self {
        Self {
            diffuse,
            specular,
            shininess: shininess.max(MIN_SHININESS),
        }
    }

    /// A purely diffuse material (no highlight, no reflection).
    pub fn diffuse(diffuse: Color) -> Self {
        Self::new(diffuse, Color::ZERO, 1.0)
    }

    /// Same material with its specular coefficient replaced.
    pub fn with_specular(mut self, specular: Color) -> Self {
        self.specular = specular;
        self
    }

    /// Specular exponent, always >= [`MIN_SHININESS`].
    #[inline]
    pub fn shininess(&self) -> f32 {
        self.shininess
    }
}

impl Default for Material {
    fn default() -> Self {
        Self::diffuse(Color::splat(0.5)) // Grey default
    }
}
