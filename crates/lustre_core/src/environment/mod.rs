//! Environment (background) lookups.
//!
//! An environment answers one question: what color arrives along a
//! direction that hits nothing. The tracer only sees the `Environment`
//! trait, so a procedural sky, a constant color and an image-based cube map
//! are interchangeable.
//!
//! Implementations must be deterministic per direction and safe to share
//! between render threads.

mod cube_map;

use std::sync::Arc;

use lustre_math::Vec3;
use serde::Deserialize;

use crate::material::Color;

pub use cube_map::{CubeFace, CubeMap, EnvironmentError, EnvironmentResult};

/// Direction to color lookup for rays that escape the scene.
pub trait Environment: Send + Sync {
    /// Color seen along `direction`. The direction need not be unit length.
    fn sample(&self, direction: Vec3) -> Color;
}

impl<E: Environment + ?Sized> Environment for &E {
    fn sample(&self, direction: Vec3) -> Color {
        (**self).sample(direction)
    }
}

impl<E: Environment + ?Sized> Environment for Box<E> {
    fn sample(&self, direction: Vec3) -> Color {
        (**self).sample(direction)
    }
}

impl<E: Environment + ?Sized> Environment for Arc<E> {
    fn sample(&self, direction: Vec3) -> Color {
        (**self).sample(direction)
    }
}

/// Axis convention applied to a direction before an image lookup.
///
/// Scenes authored z-up against y-up cube maps swap the last two components.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Axis {
    #[default]
    Identity,
    /// (x, y, z) -> (x, z, y)
    Xzy,
}

impl Axis {
    #[inline]
    pub fn apply(self, v: Vec3) -> Vec3 {
        match self {
            Axis::Identity => v,
            Axis::Xzy => Vec3::new(v.x, v.z, v.y),
        }
    }
}

/// Constant background color.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Solid(pub Color);

impl Environment for Solid {
    fn sample(&self, _direction: Vec3) -> Color {
        self.0
    }
}

/// Vertical gradient from `horizon` (looking down) to `zenith` (looking up).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SkyGradient {
    pub horizon: Color,
    pub zenith: Color,
}

impl SkyGradient {
    pub fn new(horizon: Color, zenith: Color) -> Self {
        Self { horizon, zenith }
    }
}

impl Default for SkyGradient {
    fn default() -> Self {
        Self::new(Color::ONE, Color::new(0.5, 0.7, 1.0))
    }
}

impl Environment for SkyGradient {
    fn sample(&self, direction: Vec3) -> Color {
        let unit = direction.normalize_or_zero();
        let a = 0.5 * (unit.y + 1.0);
        self.horizon * (1.0 - a) + self.zenith * a
    }
}

/// Adapts any `Fn(Vec3) -> Color` closure into an environment.
pub struct FnEnvironment<F>(pub F);

impl<F> Environment for FnEnvironment<F>
where
    F: Fn(Vec3) -> Color + Send + Sync,
{
    fn sample(&self, direction: Vec3) -> Color {
        (self.0)(direction)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_solid_ignores_direction() {
        let env = Solid(Color::new(0.1, 0.2, 0.3));
        assert_eq!(env.sample(Vec3::X), env.sample(Vec3::new(-4.0, 2.0, 9.0)));
    }

    #[test]
    fn test_sky_gradient() {
        let sky = SkyGradient::default();
        let up = sky.sample(Vec3::new(0.0, 3.0, 0.0));
        let down = sky.sample(Vec3::NEG_Y);

        assert!((up - sky.zenith).length() < 1e-6);
        assert!((down - sky.horizon).length() < 1e-6);
        // Up is more blue, less red
        assert!(up.x < down.x);
    }

    #[test]
    fn test_axis_swizzle() {
        let v = Vec3::new(1.0, 2.0, 3.0);
        assert_eq!(Axis::Identity.apply(v), v);
        assert_eq!(Axis::Xzy.apply(v), Vec3::new(1.0, 3.0, 2.0));
    }

    #[test]
    fn test_forwarding_impls() {
        let boxed: Box<dyn Environment> = Box::new(Solid(Color::X));
        let shared: Arc<dyn Environment> = Arc::new(FnEnvironment(|d: Vec3| d.abs()));

        assert_eq!(boxed.sample(Vec3::Y), Color::X);
        assert_eq!((&boxed).sample(Vec3::Y), Color::X);
        assert_eq!(shared.sample(Vec3::new(-1.0, 0.0, 2.0)), Vec3::new(1.0, 0.0, 2.0));
    }
}
