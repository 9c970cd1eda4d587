// Re-export glam for convenience
pub use glam::*;

// Lustre math types
mod interval;
mod ray;
pub use interval::Interval;
pub use ray::Ray;

/// Mirror `v` about the surface normal `n`.
///
/// `n` must be unit length; `v` may have any length and the result keeps it.
#[inline]
pub fn reflect(v: Vec3, n: Vec3) -> Vec3 {
    v - 2.0 * v.dot(n) * n
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vec3_operations() {
        let a = Vec3::new(1.0, 2.0, 3.0);
        let b = Vec3::new(4.0, 5.0, 6.0);
        let c = a + b;
        assert_eq!(c, Vec3::new(5.0, 7.0, 9.0));
    }

    #[test]
    fn test_reflect_head_on() {
        let r = reflect(Vec3::new(0.0, 0.0, -1.0), Vec3::Z);
        assert_eq!(r, Vec3::Z);
    }

    #[test]
    fn test_reflect_grazing_keeps_tangent() {
        // 45 degrees onto a floor: tangential part survives, normal part flips
        let r = reflect(Vec3::new(1.0, -1.0, 0.0), Vec3::Y);
        assert_eq!(r, Vec3::new(1.0, 1.0, 0.0));
    }

    #[test]
    fn test_reflect_preserves_length() {
        let v = Vec3::new(0.3, -2.0, 0.7);
        let n = Vec3::new(1.0, 1.0, 0.0).normalize();
        assert!((reflect(v, n).length() - v.length()).abs() < 1e-5);
    }
}
