//! Image-based cube-map environment.

use std::path::Path;

use lustre_math::Vec3;
use thiserror::Error;

use super::{Axis, Environment};
use crate::material::Color;
use crate::texture::{Texture, TextureError};

/// Errors that can occur while assembling a cube map.
#[derive(Error, Debug)]
pub enum EnvironmentError {
    #[error("Texture error: {0}")]
    Texture(#[from] TextureError),

    #[error("Cube face {face:?} is {width}x{height}, faces must be square")]
    NonSquareFace {
        face: CubeFace,
        width: u32,
        height: u32,
    },

    #[error("Cube face {face:?} is {size}px, expected {expected}px like +X")]
    FaceSizeMismatch {
        face: CubeFace,
        size: u32,
        expected: u32,
    },
}

pub type EnvironmentResult<T> = Result<T, EnvironmentError>;

/// The six faces of a cube map, in storage order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CubeFace {
    PosX,
    NegX,
    PosY,
    NegY,
    PosZ,
    NegZ,
}

impl CubeFace {
    pub const ALL: [CubeFace; 6] = [
        CubeFace::PosX,
        CubeFace::NegX,
        CubeFace::PosY,
        CubeFace::NegY,
        CubeFace::PosZ,
        CubeFace::NegZ,
    ];

    /// Pick the face along the major axis of `d` and return it together
    /// with face-local (u, v) in [0, 1], v growing down the image.
    ///
    /// Follows the usual OpenGL cube-map layout.
    pub fn select(d: Vec3) -> Option<(CubeFace, f32, f32)> {
        let a = d.abs();
        let (face, sc, tc, ma) = if a.x >= a.y && a.x >= a.z {
            if d.x >= 0.0 {
                (CubeFace::PosX, -d.z, -d.y, a.x)
            } else {
                (CubeFace::NegX, d.z, -d.y, a.x)
            }
        } else if a.y >= a.z {
            if d.y >= 0.0 {
                (CubeFace::PosY, d.x, d.z, a.y)
            } else {
                (CubeFace::NegY, d.x, -d.z, a.y)
            }
        } else if d.z >= 0.0 {
            (CubeFace::PosZ, d.x, -d.y, a.z)
        } else {
            (CubeFace::NegZ, -d.x, -d.y, a.z)
        };

        // Zero or NaN direction
        if ma.is_nan() || ma <= 0.0 {
            return None;
        }

        let u = 0.5 * (sc / ma + 1.0);
        let v = 0.5 * (tc / ma + 1.0);
        Some((face, u, v))
    }

    fn index(self) -> usize {
        self as usize
    }
}

/// Cube-map environment built from six square faces of equal size.
#[derive(Debug, Clone)]
pub struct CubeMap {
    faces: [Texture; 6],
    axis: Axis,
}

impl CubeMap {
    /// Build a cube map from faces ordered +X, -X, +Y, -Y, +Z, -Z.
    pub fn new(faces: [Texture; 6], axis: Axis) -> EnvironmentResult<Self> {
        let expected = faces[0].width;
        for (face, tex) in CubeFace::ALL.iter().zip(faces.iter()) {
            if tex.width != tex.height {
                return Err(EnvironmentError::NonSquareFace {
                    face: *face,
                    width: tex.width,
                    height: tex.height,
                });
            }
            if tex.width != expected {
                return Err(EnvironmentError::FaceSizeMismatch {
                    face: *face,
                    size: tex.width,
                    expected,
                });
            }
        }
        Ok(Self { faces, axis })
    }

    /// Load the six face images (+X, -X, +Y, -Y, +Z, -Z) from disk.
    pub fn load<P: AsRef<Path>>(paths: [P; 6], axis: Axis) -> EnvironmentResult<Self> {
        let [px, nx, py, ny, pz, nz] = paths;
        let faces = [
            Texture::load(px)?,
            Texture::load(nx)?,
            Texture::load(py)?,
            Texture::load(ny)?,
            Texture::load(pz)?,
            Texture::load(nz)?,
        ];
        let cube = Self::new(faces, axis)?;
        log::info!(
            "Loaded cube map: {}px faces, axis {:?}",
            cube.face_size(),
            cube.axis
        );
        Ok(cube)
    }

    /// Edge length of every face in pixels.
    pub fn face_size(&self) -> u32 {
        self.faces[0].width
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }
}

impl Environment for CubeMap {
    fn sample(&self, direction: Vec3) -> Color {
        match CubeFace::select(self.axis.apply(direction)) {
            Some((face, u, v)) => self.faces[face.index()].sample(u, v),
            None => Color::ZERO,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn solid(color: Color) -> Texture {
        Texture::new(2, 2, vec![color; 4], "<face>").unwrap()
    }

    /// One distinct color per face so lookups are easy to tell apart.
    fn tagged_cube(axis: Axis) -> CubeMap {
        CubeMap::new(
            [
                solid(Color::new(1.0, 0.0, 0.0)),
                solid(Color::new(0.5, 0.0, 0.0)),
                solid(Color::new(0.0, 1.0, 0.0)),
                solid(Color::new(0.0, 0.5, 0.0)),
                solid(Color::new(0.0, 0.0, 1.0)),
                solid(Color::new(0.0, 0.0, 0.5)),
            ],
            axis,
        )
        .unwrap()
    }

    #[test]
    fn test_face_selection() {
        assert_eq!(CubeFace::select(Vec3::X).unwrap().0, CubeFace::PosX);
        assert_eq!(CubeFace::select(Vec3::NEG_X).unwrap().0, CubeFace::NegX);
        assert_eq!(CubeFace::select(Vec3::new(0.1, 2.0, -0.3)).unwrap().0, CubeFace::PosY);
        assert_eq!(CubeFace::select(Vec3::NEG_Y).unwrap().0, CubeFace::NegY);
        assert_eq!(CubeFace::select(Vec3::Z).unwrap().0, CubeFace::PosZ);
        assert_eq!(CubeFace::select(Vec3::new(0.2, -0.2, -1.0)).unwrap().0, CubeFace::NegZ);
    }

    #[test]
    fn test_face_center_uv() {
        let (_, u, v) = CubeFace::select(Vec3::new(0.0, 0.0, -7.0)).unwrap();
        assert!((u - 0.5).abs() < 1e-6);
        assert!((v - 0.5).abs() < 1e-6);
    }

    #[test]
    fn test_zero_direction() {
        assert!(CubeFace::select(Vec3::ZERO).is_none());
        assert_eq!(tagged_cube(Axis::Identity).sample(Vec3::ZERO), Color::ZERO);
    }

    #[test]
    fn test_sample_with_swizzle() {
        let plain = tagged_cube(Axis::Identity);
        let z_up = tagged_cube(Axis::Xzy);

        // Looking along +Z hits the +Z face directly, or +Y after swizzling
        assert_eq!(plain.sample(Vec3::Z), Color::new(0.0, 0.0, 1.0));
        assert_eq!(z_up.sample(Vec3::Z), Color::new(0.0, 1.0, 0.0));
        assert_eq!(z_up.sample(Vec3::NEG_Y), Color::new(0.0, 0.0, 0.5));
    }

    #[test]
    fn test_rejects_mismatched_faces() {
        let mut faces = [
            solid(Color::ONE),
            solid(Color::ONE),
            solid(Color::ONE),
            solid(Color::ONE),
            solid(Color::ONE),
            solid(Color::ONE),
        ];
        faces[3] = Texture::solid_color(Color::ONE);
        let err = CubeMap::new(faces.clone(), Axis::Identity).unwrap_err();
        assert!(matches!(
            err,
            EnvironmentError::FaceSizeMismatch { face: CubeFace::NegY, size: 1, expected: 2 }
        ));

        faces[3] = Texture::new(2, 1, vec![Color::ONE; 2], "<wide>").unwrap();
        let err = CubeMap::new(faces, Axis::Identity).unwrap_err();
        assert!(matches!(err, EnvironmentError::NonSquareFace { face: CubeFace::NegY, .. }));
    }
}
