#![warn(missing_docs)]

//! Math types for the trak tracking-geometry kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for
//! detector geometry: points, vectors, directions and the rigid frame
//! transform shared by every surface description. The algebra backend
//! is fixed here, once, at the alias layer.

use nalgebra::{Matrix3, Rotation3, Unit, Vector2, Vector3};

/// A point in the global 3D frame.
pub type Point3 = nalgebra::Point3<f64>;

/// A vector in 3D space.
pub type Vec3 = Vector3<f64>;

/// A unit (normalized) direction vector in 3D space.
pub type Dir3 = Unit<Vector3<f64>>;

/// A point in 2D local/parameter space.
pub type Point2 = nalgebra::Point2<f64>;

/// A vector in 2D space.
pub type Vec2 = Vector2<f64>;

/// Default boundary tolerance: one machine epsilon per local dimension.
pub const DEFAULT_TOLERANCE: f64 = f64::EPSILON;

/// Threshold below which a frame axis counts as degenerate.
const DEGENERATE_AXIS: f64 = 1e-12;

/// A rigid transform placing a surface's local frame in the global frame.
///
/// Stored as rotation + translation rather than a general 4x4 matrix, so
/// the inverse is exact (transpose and negate) and the round-trip
/// `to_global_point(to_local_point(p)) == p` holds to floating-point
/// rounding, with no matrix inversion involved.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    rotation: Rotation3<f64>,
    translation: Vec3,
}

impl Frame {
    /// Identity frame: local and global coincide.
    pub fn identity() -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation: Vec3::zeros(),
        }
    }

    /// Frame shifted by `translation`, with unrotated axes.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            rotation: Rotation3::identity(),
            translation,
        }
    }

    /// Frame from a translation and the new z and x axes.
    ///
    /// `z_axis` becomes the local z direction (the surface normal for
    /// planar surfaces). `x_axis` is orthogonalized against it; the
    /// y axis completes the right-handed triad. Neither input needs to
    /// be normalized.
    ///
    /// # Panics
    ///
    /// If `z_axis` is (near) zero, or `x_axis` is (near) zero or
    /// collinear with `z_axis`: no orthonormal triad exists and the
    /// frame cannot be built.
    pub fn new(translation: Vec3, z_axis: Vec3, x_axis: Vec3) -> Self {
        let z_norm = z_axis.norm();
        assert!(z_norm > DEGENERATE_AXIS, "frame z axis must be non-zero");
        let z = z_axis / z_norm;
        let x_ortho = x_axis - x_axis.dot(&z) * z;
        let x_norm = x_ortho.norm();
        assert!(
            x_norm > DEGENERATE_AXIS * x_axis.norm().max(1.0),
            "frame x axis must not be collinear with the z axis"
        );
        let x = x_ortho / x_norm;
        let y = z.cross(&x);
        let rotation =
            Rotation3::from_matrix_unchecked(Matrix3::from_columns(&[x, y, z]));
        Self {
            rotation,
            translation,
        }
    }

    /// Transform a point from the local frame to the global frame.
    #[inline]
    pub fn to_global_point(&self, p: &Point3) -> Point3 {
        self.rotation * p + self.translation
    }

    /// Transform a point from the global frame to the local frame.
    #[inline]
    pub fn to_local_point(&self, p: &Point3) -> Point3 {
        self.rotation.inverse_transform_point(&(p - self.translation))
    }

    /// Rotate a direction from the local frame to the global frame.
    ///
    /// Translation does not apply to directions.
    #[inline]
    pub fn to_global_dir(&self, d: &Vec3) -> Vec3 {
        self.rotation * d
    }

    /// Rotate a direction from the global frame to the local frame.
    #[inline]
    pub fn to_local_dir(&self, d: &Vec3) -> Vec3 {
        self.rotation.inverse_transform_vector(d)
    }

    /// Compose with a nested frame: `inner` is positioned inside `self`.
    ///
    /// The result maps `inner`-local coordinates directly to global ones
    /// and satisfies the same round-trip law as any other frame.
    pub fn compose(&self, inner: &Frame) -> Self {
        Self {
            rotation: self.rotation * inner.rotation,
            translation: self.rotation * inner.translation + self.translation,
        }
    }

    /// The exact inverse frame.
    pub fn inverse(&self) -> Self {
        let inv = self.rotation.inverse();
        Self {
            rotation: inv,
            translation: -(inv * self.translation),
        }
    }

    /// Local x axis expressed in global coordinates.
    #[inline]
    pub fn x_axis(&self) -> Vec3 {
        self.rotation.matrix().column(0).into_owned()
    }

    /// Local y axis expressed in global coordinates.
    #[inline]
    pub fn y_axis(&self) -> Vec3 {
        self.rotation.matrix().column(1).into_owned()
    }

    /// Local z axis expressed in global coordinates.
    ///
    /// For planar surfaces this is the surface normal.
    #[inline]
    pub fn z_axis(&self) -> Vec3 {
        self.rotation.matrix().column(2).into_owned()
    }

    /// Translation part: the local origin in global coordinates.
    #[inline]
    pub fn translation(&self) -> Vec3 {
        self.translation
    }
}

impl Default for Frame {
    fn default() -> Self {
        Self::identity()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_1_SQRT_2;

    #[test]
    fn test_identity_round_trip() {
        let f = Frame::identity();
        let p = Point3::new(1.0, 2.0, 3.0);
        assert!((f.to_global_point(&f.to_local_point(&p)) - p).norm() < 1e-14);
    }

    #[test]
    fn test_translated_frame() {
        let f = Frame::from_translation(Vec3::new(3.0, 2.0, 10.0));
        let p = Point3::new(2.0, 1.0, 0.0);
        let loc = f.to_local_point(&p);
        assert!((loc.x - (-1.0)).abs() < 1e-14);
        assert!((loc.y - (-1.0)).abs() < 1e-14);
        assert!((loc.z - (-10.0)).abs() < 1e-14);
        assert!((f.to_global_point(&loc) - p).norm() < 1e-14);
    }

    #[test]
    fn test_rotated_frame_axes() {
        // z along (1,0,1), x along (1,0,-1): a 45 degree tilt about y
        let f = Frame::new(
            Vec3::zeros(),
            Vec3::new(1.0, 0.0, 1.0),
            Vec3::new(1.0, 0.0, -1.0),
        );
        let z = f.z_axis();
        assert!((z.x - FRAC_1_SQRT_2).abs() < 1e-14);
        assert!((z.z - FRAC_1_SQRT_2).abs() < 1e-14);
        // Triad is orthonormal and right-handed
        assert!(f.x_axis().dot(&f.z_axis()).abs() < 1e-14);
        assert!((f.x_axis().cross(&f.y_axis()) - f.z_axis()).norm() < 1e-14);
    }

    #[test]
    fn test_round_trip_rotated_translated() {
        let f = Frame::new(
            Vec3::new(2.0, 3.0, 4.0),
            Vec3::new(3.0, 2.0, 1.0),
            Vec3::new(2.0, -3.0, 0.0),
        );
        for p in [
            Point3::new(1.0, 2.0, 3.0),
            Point3::new(-7.5, 0.1, 42.0),
            Point3::origin(),
        ] {
            let round = f.to_global_point(&f.to_local_point(&p));
            assert!((round - p).norm() < 1e-12);
        }
    }

    #[test]
    fn test_direction_ignores_translation() {
        let f = Frame::from_translation(Vec3::new(100.0, -50.0, 7.0));
        let d = Vec3::new(0.0, 0.0, 1.0);
        assert!((f.to_local_dir(&d) - d).norm() < 1e-14);
        assert!((f.to_global_dir(&d) - d).norm() < 1e-14);
    }

    #[test]
    fn test_compose_round_trip() {
        let outer = Frame::new(
            Vec3::new(1.0, 0.0, 0.0),
            Vec3::new(0.0, 1.0, 1.0),
            Vec3::new(1.0, 0.0, 0.0),
        );
        let inner = Frame::from_translation(Vec3::new(0.0, 5.0, 0.0));
        let composed = outer.compose(&inner);

        let p = Point3::new(0.3, -1.2, 2.5);
        // Composition applies inner first
        let via_steps = outer.to_global_point(&inner.to_global_point(&p));
        let direct = composed.to_global_point(&p);
        assert!((via_steps - direct).norm() < 1e-12);
        assert!((composed.to_global_point(&composed.to_local_point(&p)) - p).norm() < 1e-12);
    }

    #[test]
    #[should_panic(expected = "z axis must be non-zero")]
    fn test_zero_z_axis_rejected() {
        Frame::new(Vec3::zeros(), Vec3::zeros(), Vec3::x());
    }

    #[test]
    #[should_panic(expected = "collinear")]
    fn test_collinear_axes_rejected() {
        Frame::new(Vec3::zeros(), Vec3::z(), Vec3::new(0.0, 0.0, 2.0));
    }

    #[test]
    fn test_inverse() {
        let f = Frame::new(
            Vec3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 0.0, 1.0),
            Vec3::new(1.0, 1.0, 0.0),
        );
        let composed = f.compose(&f.inverse());
        let p = Point3::new(5.0, 6.0, 7.0);
        assert!((composed.to_global_point(&p) - p).norm() < 1e-12);
    }
}
