//! Frame rendering: walk the pixel grid and trace one ray per pixel.
//!
//! Every pixel is independent, so rows are handed to rayon and each worker
//! writes only its own slice of the image buffer.

use lustre_core::{Environment, Scene};
use lustre_math::{Interval, Vec4};
use rayon::prelude::*;

use crate::tracer::{trace, trace_detailed, Trace, TraceState};
use crate::Camera;

/// Render configuration.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Reflection bounces per ray (0 = direct lighting only)
    pub bounce_limit: u32,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self { bounce_limit: 5 }
    }
}

/// How the rays of a frame terminated.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderStats {
    pub background: u64,
    pub bounce_limit: u64,
    pub zero_energy: u64,
    pub miss: u64,
    /// Reflection rays cast across the frame
    pub bounces: u64,
}

impl RenderStats {
    /// Account for one finished trace.
    pub fn record(&mut self, trace: &Trace) {
        match trace.state {
            TraceState::Background => self.background += 1,
            TraceState::BounceLimit => self.bounce_limit += 1,
            TraceState::ZeroEnergy => self.zero_energy += 1,
            TraceState::Miss => self.miss += 1,
        }
        self.bounces += trace.bounces as u64;
    }

    /// Combine stats gathered on different threads.
    pub fn merge(self, other: RenderStats) -> RenderStats {
        RenderStats {
            background: self.background + other.background,
            bounce_limit: self.bounce_limit + other.bounce_limit,
            zero_energy: self.zero_energy + other.zero_energy,
            miss: self.miss + other.miss,
            bounces: self.bounces + other.bounces,
        }
    }

    /// Number of primary rays accounted for.
    pub fn rays(&self) -> u64 {
        self.background + self.bounce_limit + self.zero_energy + self.miss
    }
}

/// Clamp a linear color to [0, 1] and quantize to 8-bit RGBA.
///
/// Display-side only: the tracer itself never clamps.
pub fn color_to_rgba(color: Vec4) -> [u8; 4] {
    let q = |c: f32| (255.0 * Interval::UNIT.clamp(c)).round() as u8;
    [q(color.x), q(color.y), q(color.z), q(color.w)]
}

/// Trace the ray through the center of pixel (x, y).
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    environment: &dyn Environment,
    x: u32,
    y: u32,
    config: &RenderConfig,
) -> Vec4 {
    trace(&camera.get_ray(x, y), scene, environment, config.bounce_limit)
}

/// Simple image buffer for storing render output.
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Vec4>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with transparent black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Vec4::ZERO; width as usize * height as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Vec4 {
        self.pixels[self.index(x, y)]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Vec4) {
        let index = self.index(x, y);
        self.pixels[index] = color;
    }

    fn index(&self, x: u32, y: u32) -> usize {
        y as usize * self.width as usize + x as usize
    }

    /// Convert to RGBA bytes (for display).
    pub fn to_rgba(&self) -> Vec<u8> {
        self.pixels.iter().flat_map(|c| color_to_rgba(*c)).collect()
    }
}

/// Render the entire frame in parallel.
pub fn render(
    camera: &Camera,
    scene: &Scene,
    environment: &dyn Environment,
    config: &RenderConfig,
) -> ImageBuffer {
    render_with_stats(camera, scene, environment, config).0
}

/// Render the entire frame in parallel and report how rays terminated.
pub fn render_with_stats(
    camera: &Camera,
    scene: &Scene,
    environment: &dyn Environment,
    config: &RenderConfig,
) -> (ImageBuffer, RenderStats) {
    let mut image = ImageBuffer::new(camera.image_width, camera.image_height);
    let width = image.width as usize;
    if width == 0 || image.height == 0 {
        return (image, RenderStats::default());
    }

    let stats = image
        .pixels
        .par_chunks_mut(width)
        .enumerate()
        .map(|(y, row)| {
            let mut stats = RenderStats::default();
            for (x, pixel) in row.iter_mut().enumerate() {
                let ray = camera.get_ray(x as u32, y as u32);
                let result = trace_detailed(&ray, scene, environment, config.bounce_limit);
                stats.record(&result);
                *pixel = result.color;
            }
            stats
        })
        .reduce(RenderStats::default, RenderStats::merge);

    log::debug!(
        "Rendered {}x{}: {} rays, {} reflection bounces",
        image.width,
        image.height,
        stats.rays(),
        stats.bounces
    );

    (image, stats)
}
