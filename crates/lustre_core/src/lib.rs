//! Lustre Core - Scene data model and environment lookups.
//!
//! This crate provides:
//!
//! - **Scene types**: `Material`, `Sphere`, `Light`, `Scene` and the
//!   validating `SceneBuilder`
//! - **Environments**: the `Environment` capability with solid, sky gradient
//!   and cube-map implementations
//! - **Scene descriptions**: JSON files describing spheres, lights, the
//!   environment and an optional camera
//!
//! # Example
//!
//! ```ignore
//! use lustre_core::description::load_description;
//!
//! let desc = load_description("scene.json")?;
//! let scene = desc.build_scene()?;
//! println!("Loaded {} spheres, {} lights",
//!     scene.sphere_count(),
//!     scene.light_count());
//! ```

pub mod description;
pub mod environment;
pub mod material;
pub mod scene;
pub mod texture;

// Re-export commonly used types
pub use description::{load_description, LoadError, SceneDescription};
pub use environment::{Axis, CubeMap, Environment, FnEnvironment, SkyGradient, Solid};
pub use material::{Color, Material, MIN_SHININESS};
pub use scene::{Light, Scene, SceneBuilder, SceneError, Sphere};
pub use texture::Texture;
