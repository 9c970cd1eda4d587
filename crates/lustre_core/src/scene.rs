//! Scene types for Lustre.
//!
//! A `Scene` is an ordered list of spheres and an ordered list of point
//! lights. It is assembled once through `SceneBuilder`, which enforces the
//! data-model invariants, and is read-only afterwards so it can be shared
//! across render threads by reference.

use lustre_math::Vec3;
use thiserror::Error;

use crate::material::{Color, Material};

/// Errors raised while assembling a scene.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum SceneError {
    #[error("Sphere {index} has non-positive radius {radius}")]
    DegenerateSphere { index: usize, radius: f32 },

    #[error("Sphere {index} has a non-finite center, radius or material")]
    NonFiniteSphere { index: usize },

    #[error("Light {index} has negative intensity {intensity:?}")]
    NegativeIntensity { index: usize, intensity: Color },

    #[error("Light {index} has a non-finite position or intensity")]
    NonFiniteLight { index: usize },
}

/// Result type for scene assembly.
pub type SceneResult<T> = Result<T, SceneError>;

/// A sphere primitive.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sphere {
    pub center: Vec3,
    pub radius: f32,
    pub material: Material,
}

impl Sphere {
    /// Create a new sphere. Validation happens when it is added to a scene.
    pub fn new(center: Vec3, radius: f32, material: Material) -> Self {
        Self {
            center,
            radius,
            material,
        }
    }

    /// Outward unit normal at a point on the surface.
    #[inline]
    pub fn normal_at(&self, point: Vec3) -> Vec3 {
        (point - self.center).normalize()
    }

    fn check(&self, index: usize) -> SceneResult<()> {
        let finite = self.center.is_finite()
            && self.radius.is_finite()
            && self.material.diffuse.is_finite()
            && self.material.specular.is_finite();
        if !finite {
            return Err(SceneError::NonFiniteSphere { index });
        }
        if self.radius <= 0.0 {
            return Err(SceneError::DegenerateSphere {
                index,
                radius: self.radius,
            });
        }
        Ok(())
    }
}

/// A point light.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Light {
    pub position: Vec3,
    pub intensity: Color,
}

impl Light {
    /// Create a new point light.
    pub fn new(position: Vec3, intensity: Color) -> Self {
        Self {
            position,
            intensity,
        }
    }

    fn check(&self, index: usize) -> SceneResult<()> {
        if !self.position.is_finite() || !self.intensity.is_finite() {
            return Err(SceneError::NonFiniteLight { index });
        }
        if self.intensity.min_element() < 0.0 {
            return Err(SceneError::NegativeIntensity {
                index,
                intensity: self.intensity,
            });
        }
        Ok(())
    }
}

/// Immutable render snapshot: spheres and lights in insertion order.
///
/// Insertion order only matters for exact ties in hit distance, where the
/// earlier sphere wins.
#[derive(Debug, Clone, Default)]
pub struct Scene {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
}

impl Scene {
    /// A scene with nothing in it. Every ray misses.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a scene from ready-made lists, rejecting invalid entries.
    pub fn from_parts(spheres: Vec<Sphere>, lights: Vec<Light>) -> SceneResult<Self> {
        let mut builder = SceneBuilder::new();
        for sphere in spheres {
            builder.add_sphere(sphere)?;
        }
        for light in lights {
            builder.add_light(light)?;
        }
        Ok(builder.build())
    }

    pub fn spheres(&self) -> &[Sphere] {
        &self.spheres
    }

    pub fn lights(&self) -> &[Light] {
        &self.lights
    }

    pub fn sphere_count(&self) -> usize {
        self.spheres.len()
    }

    pub fn light_count(&self) -> usize {
        self.lights.len()
    }

    /// Same scene with every specular coefficient set to zero.
    ///
    /// Handy for comparing against a render with reflections disabled.
    pub fn without_specular(&self) -> Scene {
        let spheres = self
            .spheres
            .iter()
            .map(|s| Sphere {
                material: s.material.with_specular(Color::ZERO),
                ..*s
            })
            .collect();
        Scene {
            spheres,
            lights: self.lights.clone(),
        }
    }
}

/// Assembles a `Scene`, enforcing radius > 0, finite geometry and
/// non-negative light intensity.
///
/// By default an invalid sphere is an error. With `filter_degenerate`
/// spheres with a non-positive radius are dropped with a warning instead.
#[derive(Debug, Default)]
pub struct SceneBuilder {
    spheres: Vec<Sphere>,
    lights: Vec<Light>,
    filter_degenerate: bool,
    dropped: usize,
}

impl SceneBuilder {
    /// Create an empty builder that rejects invalid input.
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop degenerate spheres instead of failing on them.
    pub fn filter_degenerate(mut self) -> Self {
        self.filter_degenerate = true;
        self
    }

    /// Add a sphere.
    pub fn add_sphere(&mut self, sphere: Sphere) -> SceneResult<&mut Self> {
        let index = self.spheres.len() + self.dropped;
        match sphere.check(index) {
            Ok(()) => self.spheres.push(sphere),
            Err(SceneError::DegenerateSphere { radius, .. }) if self.filter_degenerate => {
                log::warn!("Dropping sphere {} with radius {}", index, radius);
                self.dropped += 1;
            }
            Err(e) => return Err(e),
        }
        Ok(self)
    }

    /// Add a point light.
    pub fn add_light(&mut self, light: Light) -> SceneResult<&mut Self> {
        light.check(self.lights.len())?;
        self.lights.push(light);
        Ok(self)
    }

    /// Finish the scene.
    pub fn build(self) -> Scene {
        log::debug!(
            "Built scene: {} spheres, {} lights ({} dropped)",
            self.spheres.len(),
            self.lights.len(),
            self.dropped
        );
        Scene {
            spheres: self.spheres,
            lights: self.lights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn red() -> Material {
        Material::diffuse(Color::new(1.0, 0.0, 0.0))
    }

    #[test]
    fn test_builder_keeps_order() {
        let mut builder = SceneBuilder::new();
        builder
            .add_sphere(Sphere::new(Vec3::new(0.0, 0.0, -5.0), 1.0, red()))
            .unwrap()
            .add_sphere(Sphere::new(Vec3::new(2.0, 0.0, -5.0), 0.5, red()))
            .unwrap();
        builder
            .add_light(Light::new(Vec3::new(0.0, 5.0, -5.0), Color::ONE))
            .unwrap();
        let scene = builder.build();

        assert_eq!(scene.sphere_count(), 2);
        assert_eq!(scene.light_count(), 1);
        assert_eq!(scene.spheres()[1].radius, 0.5);
    }

    #[test]
    fn test_rejects_degenerate_sphere() {
        let mut builder = SceneBuilder::new();
        let err = builder
            .add_sphere(Sphere::new(Vec3::ZERO, 0.0, red()))
            .unwrap_err();
        assert_eq!(err, SceneError::DegenerateSphere { index: 0, radius: 0.0 });

        let err =
            Scene::from_parts(vec![Sphere::new(Vec3::ZERO, -1.0, red())], vec![]).unwrap_err();
        assert!(matches!(err, SceneError::DegenerateSphere { .. }));
    }

    #[test]
    fn test_filters_degenerate_sphere() {
        let _ = env_logger::builder().is_test(true).try_init();

        let mut builder = SceneBuilder::new().filter_degenerate();
        builder.add_sphere(Sphere::new(Vec3::ZERO, -2.0, red())).unwrap();
        builder.add_sphere(Sphere::new(Vec3::ZERO, 1.0, red())).unwrap();
        let scene = builder.build();

        assert_eq!(scene.sphere_count(), 1);
        assert_eq!(scene.spheres()[0].radius, 1.0);
    }

    #[test]
    fn test_filter_still_rejects_non_finite() {
        let mut builder = SceneBuilder::new().filter_degenerate();
        let err = builder
            .add_sphere(Sphere::new(Vec3::new(f32::NAN, 0.0, 0.0), 1.0, red()))
            .unwrap_err();
        assert_eq!(err, SceneError::NonFiniteSphere { index: 0 });
    }

    #[test]
    fn test_rejects_negative_light() {
        let err = Scene::from_parts(
            vec![],
            vec![Light::new(Vec3::Y, Color::new(1.0, -0.1, 1.0))],
        )
        .unwrap_err();
        assert!(matches!(err, SceneError::NegativeIntensity { index: 0, .. }));
    }

    #[test]
    fn test_without_specular() {
        let shiny = Material::new(Color::ONE, Color::splat(0.8), 50.0);
        let scene = Scene::from_parts(vec![Sphere::new(Vec3::ZERO, 1.0, shiny)], vec![]).unwrap();
        let matte = scene.without_specular();

        assert_eq!(matte.spheres()[0].material.specular, Color::ZERO);
        assert_eq!(matte.spheres()[0].material.diffuse, Color::ONE);
        assert_eq!(matte.spheres()[0].material.shininess(), 50.0);
    }

    #[test]
    fn test_normal_at() {
        let sphere = Sphere::new(Vec3::new(0.0, 0.0, -5.0), 2.0, red());
        let n = sphere.normal_at(Vec3::new(0.0, 2.0, -5.0));
        assert!((n - Vec3::Y).length() < 1e-6);
    }
}
