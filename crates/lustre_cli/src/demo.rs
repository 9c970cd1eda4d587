//! Randomized demo scene: a mirror ball on a large floor sphere, ringed by
//! small spheres of mixed materials.

use lustre_core::description::{
    EnvironmentDesc, LightDesc, MaterialDesc, SceneDescription, SphereDesc,
};
use lustre_core::{Color, SkyGradient};
use lustre_math::Vec3;
use lustre_renderer::Camera;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

pub fn default_camera() -> Camera {
    Camera::new()
        .with_resolution(320, 180)
        .with_position(Vec3::new(0.0, 2.0, 8.0), Vec3::new(0.0, 0.6, 0.0), Vec3::Y)
        .with_fov(40.0)
}

pub fn description(seed: u64) -> SceneDescription {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut spheres = Vec::new();

    // Floor
    spheres.push(sphere(
        Vec3::new(0.0, -1000.0, 0.0),
        1000.0,
        Color::splat(0.5),
        Color::splat(0.1),
        8.0,
    ));

    // Centerpiece mirror and a matte companion
    spheres.push(sphere(
        Vec3::new(0.0, 1.0, 0.0),
        1.0,
        Color::splat(0.05),
        Color::splat(0.85),
        200.0,
    ));
    spheres.push(sphere(
        Vec3::new(-2.2, 0.7, -0.5),
        0.7,
        Color::new(0.8, 0.3, 0.2),
        Color::splat(0.2),
        40.0,
    ));

    for a in -4..4 {
        for b in -4..4 {
            let center = Vec3::new(
                a as f32 + 0.9 * rng.gen::<f32>(),
                0.2,
                b as f32 + 0.9 * rng.gen::<f32>(),
            );
            if (center - Vec3::new(0.0, 0.2, 0.0)).length() < 1.4 {
                continue;
            }

            let diffuse = Color::new(rng.gen(), rng.gen(), rng.gen());
            let shiny = rng.gen::<f32>() < 0.3;
            let specular = if shiny {
                Color::splat(0.5 + 0.4 * rng.gen::<f32>())
            } else {
                Color::ZERO
            };
            spheres.push(sphere(center, 0.2, diffuse, specular, 10.0 + 90.0 * rng.gen::<f32>()));
        }
    }

    let sky = SkyGradient::default();
    SceneDescription {
        spheres,
        lights: vec![
            LightDesc {
                position: Vec3::new(4.0, 6.0, 4.0),
                intensity: Color::splat(0.8),
            },
            LightDesc {
                position: Vec3::new(-5.0, 3.0, 2.0),
                intensity: Color::new(0.3, 0.3, 0.45),
            },
        ],
        environment: EnvironmentDesc::Sky {
            horizon: sky.horizon,
            zenith: sky.zenith,
        },
        camera: None,
        bounce_limit: None,
        filter_degenerate: false,
        base_dir: None,
    }
}

fn sphere(
    center: Vec3,
    radius: f32,
    diffuse: Color,
    specular: Color,
    shininess: f32,
) -> SphereDesc {
    SphereDesc {
        center,
        radius,
        material: MaterialDesc {
            diffuse,
            specular,
            shininess,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_demo_is_deterministic_and_valid() {
        let a = description(7).build_scene().unwrap();
        let b = description(7).build_scene().unwrap();

        assert!(a.sphere_count() > 3);
        assert_eq!(a.sphere_count(), b.sphere_count());
        assert_eq!(a.spheres(), b.spheres());
        assert_eq!(a.light_count(), 2);
    }
}
