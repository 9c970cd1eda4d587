//! Direct illumination: shadowed Blinn-Phong over every point light.

use lustre_core::{Color, Light, Material, Scene};
use lustre_math::{Ray, Vec3};

use crate::intersect::{intersect, SELF_INTERSECTION_EPSILON};

/// Blinn-Phong response for one unit light direction, before light intensity.
#[inline]
pub fn blinn_phong(material: &Material, normal: Vec3, light_dir: Vec3, view: Vec3) -> Color {
    let halfway = (light_dir + view).normalize_or_zero();
    let diffuse = normal.dot(light_dir).max(0.0);
    let specular = normal.dot(halfway).max(0.0).powf(material.shininess());
    material.diffuse * diffuse + material.specular * specular
}

/// True when a sphere sits between `position` and `light`.
///
/// Hits beyond the light do not count as occluders.
pub fn is_shadowed(position: Vec3, light: &Light, scene: &Scene) -> bool {
    let to_light = light.position - position;
    occluded(position, to_light.normalize_or_zero(), to_light.length(), scene)
}

fn occluded(position: Vec3, light_dir: Vec3, light_distance: f32, scene: &Scene) -> bool {
    let shadow_ray = Ray::offset(position, light_dir, SELF_INTERSECTION_EPSILON, light_dir);
    intersect(&shadow_ray, scene).is_some_and(|hit| hit.t < light_distance)
}

/// Sum of unshadowed Blinn-Phong contributions from every light.
///
/// `view` points from the surface towards the viewer and must be unit
/// length. No ambient term and no clamping: the result can exceed 1.
pub fn shade(
    material: &Material,
    position: Vec3,
    normal: Vec3,
    view: Vec3,
    scene: &Scene,
) -> Color {
    let mut color = Color::ZERO;

    for light in scene.lights() {
        let to_light = light.position - position;
        // A light sitting exactly on the point has no direction
        let light_dir = to_light.normalize_or_zero();

        if occluded(position, light_dir, to_light.length(), scene) {
            continue;
        }

        color += blinn_phong(material, normal, light_dir, view) * light.intensity;
    }

    color
}

#[cfg(test)]
mod tests {
    use super::*;
    use lustre_core::Sphere;

    fn red_matte() -> Material {
        Material::diffuse(Color::new(1.0, 0.0, 0.0))
    }

    /// No geometry, a single light.
    fn lit_by(light: Light) -> Scene {
        Scene::from_parts(vec![], vec![light]).unwrap()
    }

    #[test]
    fn test_no_lights_is_black() {
        let scene = Scene::empty();
        let c = shade(&red_matte(), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_lambert_term() {
        // Light at 60 degrees from the normal: cos = 0.5
        let light_dir = Vec3::new(3f32.sqrt() / 2.0, 0.5, 0.0);
        let scene = lit_by(Light::new(light_dir * 10.0, Color::splat(2.0)));

        let c = shade(&red_matte(), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert!((c - Color::new(1.0, 0.0, 0.0)).length() < 1e-4);
    }

    #[test]
    fn test_light_below_horizon() {
        let scene = lit_by(Light::new(Vec3::new(0.0, -5.0, 0.0), Color::ONE));
        let c = shade(&red_matte(), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_specular_highlight() {
        // Light and viewer both along the normal: halfway == normal
        let mtl = Material::new(Color::ZERO, Color::new(0.0, 0.5, 0.0), 100.0);
        let scene = lit_by(Light::new(Vec3::new(0.0, 3.0, 0.0), Color::ONE));

        let c = shade(&mtl, Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert!((c - Color::new(0.0, 0.5, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_blocked_light_contributes_nothing() {
        let blocker = Sphere::new(Vec3::new(0.0, 2.5, 0.0), 0.5, red_matte());
        let light = Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);
        let scene = Scene::from_parts(vec![blocker], vec![light]).unwrap();

        assert!(is_shadowed(Vec3::ZERO, &light, &scene));
        let c = shade(&red_matte(), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert_eq!(c, Color::ZERO);
    }

    #[test]
    fn test_occluder_beyond_light_is_ignored() {
        let behind = Sphere::new(Vec3::new(0.0, 10.0, 0.0), 1.0, red_matte());
        let light = Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);
        let scene = Scene::from_parts(vec![behind], vec![light]).unwrap();

        assert!(!is_shadowed(Vec3::ZERO, &light, &scene));
        let c = shade(&red_matte(), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert!((c - Color::new(1.0, 0.0, 0.0)).length() < 1e-5);
    }

    #[test]
    fn test_lights_are_independent() {
        let blocker = Sphere::new(Vec3::new(0.0, 2.5, 0.0), 0.5, red_matte());
        let blocked = Light::new(Vec3::new(0.0, 5.0, 0.0), Color::ONE);
        let open = Light::new(Vec3::new(5.0, 5.0, 0.0), Color::splat(2.0));
        let scene = Scene::from_parts(vec![blocker], vec![blocked, open]).unwrap();

        let c = shade(&red_matte(), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        let expected = 2.0 * (1.0 / 2f32.sqrt());
        assert!((c.x - expected).abs() < 1e-4);
        assert_eq!(c.y, 0.0);
    }

    #[test]
    fn test_output_is_not_clamped() {
        let scene = lit_by(Light::new(Vec3::new(0.0, 1.0, 0.0), Color::splat(10.0)));
        let c = shade(&Material::diffuse(Color::ONE), Vec3::ZERO, Vec3::Y, Vec3::Y, &scene);
        assert!(c.x > 1.0);
    }
}
