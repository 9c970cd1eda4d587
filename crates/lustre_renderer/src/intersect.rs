//! Closest-hit ray/sphere intersection.

use lustre_core::{Material, Scene, Sphere};
use lustre_math::{Interval, Ray, Vec3};

/// Offset and acceptance threshold that keeps rays spawned from a surface
/// from hitting that same surface again through rounding error.
pub const SELF_INTERSECTION_EPSILON: f32 = 0.001;

/// Initial "no hit yet" distance for closest-hit searches.
pub const NO_HIT_T: f32 = 1e30;

/// Everything the shader needs to know about one intersection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitInfo {
    /// Parameter t where the intersection occurs
    pub t: f32,
    /// Point of intersection
    pub position: Vec3,
    /// Unit outward normal at the intersection
    pub normal: Vec3,
    /// Copy of the hit sphere's material
    pub material: Material,
}

/// Near-root intersection of `ray` with `sphere`.
///
/// Only the entry root of the quadratic is tested; a ray starting inside the
/// sphere does not report the exit point. Returns `t` if it lies strictly
/// inside `ray_t`.
pub fn hit_sphere(ray: &Ray, sphere: &Sphere, ray_t: Interval) -> Option<f32> {
    let oc = ray.origin - sphere.center;
    let a = ray.direction.dot(ray.direction);
    let b = 2.0 * oc.dot(ray.direction);
    let c = oc.dot(oc) - sphere.radius * sphere.radius;

    let discriminant = b * b - 4.0 * a * c;
    if discriminant <= 0.0 {
        return None;
    }

    let t = (-b - discriminant.sqrt()) / (2.0 * a);
    ray_t.surrounds(t).then_some(t)
}

/// Find the closest sphere hit along `ray`.
///
/// Hits must satisfy `SELF_INTERSECTION_EPSILON < t < NO_HIT_T`. On an exact
/// tie the sphere that comes first in the scene wins.
pub fn intersect(ray: &Ray, scene: &Scene) -> Option<HitInfo> {
    let mut ray_t = Interval::new(SELF_INTERSECTION_EPSILON, NO_HIT_T);
    let mut closest = None;

    for sphere in scene.spheres() {
        if let Some(t) = hit_sphere(ray, sphere, ray_t) {
            ray_t = ray_t.with_max(t);
            closest = Some((t, sphere));
        }
    }

    closest.map(|(t, sphere)| {
        let position = ray.at(t);
        HitInfo {
            t,
            position,
            normal: sphere.normal_at(position),
            material: sphere.material,
        }
    })
}
