//! Lustre Renderer - Whitted-style ray tracing of spheres.
//!
//! Closest-hit sphere intersection, shadowed Blinn-Phong shading from point
//! lights, and a bounded chain of mirror reflections that falls back to an
//! environment lookup whenever a ray escapes.
//!
//! # Example
//!
//! ```ignore
//! use lustre_renderer::{trace, Camera, RenderConfig, render};
//!
//! let mut camera = Camera::new().with_resolution(320, 240);
//! camera.initialize();
//! let image = render(&camera, &scene, &environment, &RenderConfig::default());
//! ```

mod bucket;
mod camera;
mod intersect;
mod renderer;
mod shade;
mod tracer;

pub use bucket::{
    generate_buckets, render_bucket, render_buckets, Bucket, BucketResult, DEFAULT_BUCKET_SIZE,
};
pub use camera::Camera;
pub use intersect::{hit_sphere, intersect, HitInfo, NO_HIT_T, SELF_INTERSECTION_EPSILON};
pub use renderer::{
    color_to_rgba, render, render_pixel, render_with_stats, ImageBuffer, RenderConfig, RenderStats,
};
pub use shade::{blinn_phong, is_shadowed, shade};
pub use tracer::{trace, trace_detailed, Trace, TraceState, MAX_BOUNCES};

/// Re-export common types from the scene and math crates
pub use lustre_core::{Color, Environment, Light, Material, Scene, Sphere};
pub use lustre_math::{Ray, Vec3, Vec4};
