//! JSON scene descriptions.
//!
//! A description file lists spheres, lights, the environment and optionally
//! a camera and a bounce limit:
//!
//! ```json
//! {
//!   "spheres": [
//!     { "center": [0, 0, -5], "radius": 1,
//!       "material": { "diffuse": [1, 0, 0], "specular": [0.2, 0.2, 0.2], "shininess": 40 } }
//!   ],
//!   "lights": [ { "position": [0, 5, -5], "intensity": [1, 1, 1] } ],
//!   "environment": { "type": "sky", "horizon": [1, 1, 1], "zenith": [0.5, 0.7, 1] },
//!   "camera": { "look_from": [0, 0, 0], "look_at": [0, 0, -1], "vfov": 60 },
//!   "bounce_limit": 4
//! }
//! ```
//!
//! Cube-map face paths are resolved relative to the description file.

use std::fs;
use std::path::{Path, PathBuf};

use lustre_math::Vec3;
use serde::Deserialize;
use thiserror::Error;

use crate::environment::{
    Axis, CubeMap, Environment, EnvironmentError, SkyGradient, Solid,
};
use crate::material::{Color, Material};
use crate::scene::{Light, Scene, SceneBuilder, SceneError, Sphere};

/// Errors that can occur while loading a scene description.
#[derive(Error, Debug)]
pub enum LoadError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid scene description: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid scene: {0}")]
    Scene(#[from] SceneError),

    #[error("Environment error: {0}")]
    Environment(#[from] EnvironmentError),
}

/// Result type for loading operations.
pub type LoadResult<T> = Result<T, LoadError>;

/// Top-level scene description.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub spheres: Vec<SphereDesc>,

    #[serde(default)]
    pub lights: Vec<LightDesc>,

    #[serde(default)]
    pub environment: EnvironmentDesc,

    #[serde(default)]
    pub camera: Option<CameraDesc>,

    #[serde(default)]
    pub bounce_limit: Option<u32>,

    /// Drop spheres with radius <= 0 instead of failing.
    #[serde(default)]
    pub filter_degenerate: bool,

    /// Directory used to resolve relative paths (set by `load_description`).
    #[serde(skip)]
    pub base_dir: Option<PathBuf>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SphereDesc {
    pub center: Vec3,
    pub radius: f32,
    #[serde(default)]
    pub material: MaterialDesc,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDesc {
    #[serde(default = "default_diffuse")]
    pub diffuse: Color,
    #[serde(default)]
    pub specular: Color,
    #[serde(default = "default_shininess")]
    pub shininess: f32,
}

impl Default for MaterialDesc {
    fn default() -> Self {
        Self {
            diffuse: default_diffuse(),
            specular: Color::ZERO,
            shininess: default_shininess(),
        }
    }
}

impl From<&MaterialDesc> for Material {
    fn from(desc: &MaterialDesc) -> Self {
        Material::new(desc.diffuse, desc.specular, desc.shininess)
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LightDesc {
    pub position: Vec3,
    #[serde(default = "default_intensity")]
    pub intensity: Color,
}

/// Background description, tagged by `type`.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum EnvironmentDesc {
    Solid {
        color: Color,
    },
    Sky {
        horizon: Color,
        zenith: Color,
    },
    CubeMap {
        faces: CubeFacePaths,
        #[serde(default)]
        axis: Axis,
    },
}

impl Default for EnvironmentDesc {
    fn default() -> Self {
        let sky = SkyGradient::default();
        EnvironmentDesc::Sky {
            horizon: sky.horizon,
            zenith: sky.zenith,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CubeFacePaths {
    pub pos_x: PathBuf,
    pub neg_x: PathBuf,
    pub pos_y: PathBuf,
    pub neg_y: PathBuf,
    pub pos_z: PathBuf,
    pub neg_z: PathBuf,
}

/// Pinhole camera placement.
#[derive(Debug, Clone, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraDesc {
    pub look_from: Vec3,
    pub look_at: Vec3,
    #[serde(default = "default_up")]
    pub up: Vec3,
    /// Vertical field of view in degrees
    #[serde(default = "default_vfov")]
    pub vfov: f32,
    #[serde(default)]
    pub width: Option<u32>,
    #[serde(default)]
    pub height: Option<u32>,
}

fn default_diffuse() -> Color {
    Color::splat(0.5)
}

fn default_shininess() -> f32 {
    32.0
}

fn default_intensity() -> Color {
    Color::ONE
}

fn default_up() -> Vec3 {
    Vec3::Y
}

fn default_vfov() -> f32 {
    45.0
}

impl SceneDescription {
    /// Parse a description from a JSON string.
    pub fn from_json(json: &str) -> LoadResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Build the validated render scene.
    pub fn build_scene(&self) -> LoadResult<Scene> {
        let mut builder = if self.filter_degenerate {
            SceneBuilder::new().filter_degenerate()
        } else {
            SceneBuilder::new()
        };
        for sphere in &self.spheres {
            builder.add_sphere(Sphere::new(
                sphere.center,
                sphere.radius,
                Material::from(&sphere.material),
            ))?;
        }
        for light in &self.lights {
            builder.add_light(Light::new(light.position, light.intensity))?;
        }
        Ok(builder.build())
    }

    /// Build the environment, loading cube-map faces from disk if needed.
    pub fn build_environment(&self) -> LoadResult<Box<dyn Environment>> {
        let env: Box<dyn Environment> = match &self.environment {
            EnvironmentDesc::Solid { color } => Box::new(Solid(*color)),
            EnvironmentDesc::Sky { horizon, zenith } => {
                Box::new(SkyGradient::new(*horizon, *zenith))
            }
            EnvironmentDesc::CubeMap { faces, axis } => {
                let paths = [
                    &faces.pos_x,
                    &faces.neg_x,
                    &faces.pos_y,
                    &faces.neg_y,
                    &faces.pos_z,
                    &faces.neg_z,
                ]
                .map(|p| self.resolve_path(p));
                Box::new(CubeMap::load(paths, *axis)?)
            }
        };
        Ok(env)
    }

    /// Resolve a path relative to the description's directory.
    fn resolve_path(&self, path: &Path) -> PathBuf {
        if path.is_absolute() {
            path.to_path_buf()
        } else if let Some(base) = &self.base_dir {
            base.join(path)
        } else {
            path.to_path_buf()
        }
    }
}

/// Load a scene description from a JSON file.
pub fn load_description(path: impl AsRef<Path>) -> LoadResult<SceneDescription> {
    let path = path.as_ref();
    let json = fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let mut desc = SceneDescription::from_json(&json)?;
    desc.base_dir = path.parent().map(Path::to_path_buf);

    log::info!(
        "Loaded description {}: {} spheres, {} lights",
        path.display(),
        desc.spheres.len(),
        desc.lights.len()
    );
    Ok(desc)
}
