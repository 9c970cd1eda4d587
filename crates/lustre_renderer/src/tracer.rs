//! Whitted-style tracer: primary hit, direct shading, then a bounded chain
//! of mirror reflections weighted by the product of specular coefficients.

use lustre_core::{Color, Environment, Scene};
use lustre_math::{reflect, Ray, Vec4};

use crate::intersect::{intersect, SELF_INTERSECTION_EPSILON};
use crate::shade::shade;

/// Hard cap on reflection bounces per ray, whatever the requested limit.
pub const MAX_BOUNCES: u32 = 16;

/// Why a trace stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TraceState {
    /// The primary ray hit nothing; the result is the environment color.
    Background,
    /// The bounce budget ran out.
    BounceLimit,
    /// The accumulated specular weight reached zero.
    ZeroEnergy,
    /// A reflection ray escaped to the environment.
    Miss,
}

/// Result of one trace with bookkeeping.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Trace {
    /// RGB unclamped, alpha always 1
    pub color: Vec4,
    pub state: TraceState,
    /// Reflection rays cast after the primary hit
    pub bounces: u32,
}

/// Color seen along `ray`.
///
/// `bounce_limit` above [`MAX_BOUNCES`] is clamped; `0` disables
/// reflections entirely.
pub fn trace(ray: &Ray, scene: &Scene, environment: &dyn Environment, bounce_limit: u32) -> Vec4 {
    trace_detailed(ray, scene, environment, bounce_limit).color
}

/// Same as [`trace`], also reporting how the trace terminated.
pub fn trace_detailed(
    ray: &Ray,
    scene: &Scene,
    environment: &dyn Environment,
    bounce_limit: u32,
) -> Trace {
    let Some(mut hit) = intersect(ray, scene) else {
        return Trace {
            color: environment.sample(ray.direction).extend(1.0),
            state: TraceState::Background,
            bounces: 0,
        };
    };

    let view = (-ray.direction).normalize();
    let mut color = shade(&hit.material, hit.position, hit.normal, view, scene);
    let mut k: Color = hit.material.specular;

    let limit = bounce_limit.min(MAX_BOUNCES);
    let mut incoming = *ray;
    let mut bounces = 0;

    // Budget first, then energy, then the intersection itself
    let state = loop {
        if bounces >= limit {
            break TraceState::BounceLimit;
        }
        if k.x + k.y + k.z <= 0.0 {
            break TraceState::ZeroEnergy;
        }

        let reflected = Ray::offset(
            hit.position,
            hit.normal,
            SELF_INTERSECTION_EPSILON,
            reflect(incoming.direction, hit.normal),
        );
        bounces += 1;

        match intersect(&reflected, scene) {
            Some(next) => {
                let view = (-reflected.direction).normalize();
                color += k * shade(&next.material, next.position, next.normal, view, scene);
                k *= next.material.specular;
                incoming = reflected;
                hit = next;
            }
            None => {
                color += k * environment.sample(reflected.direction);
                break TraceState::Miss;
            }
        }
    };

    Trace {
        color: color.extend(1.0),
        state,
        bounces,
    }
}
