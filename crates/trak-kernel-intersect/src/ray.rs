//! Straight-line trajectory.

use trak_kernel_math::{Dir3, Point3, Vec3};

/// Path lengths below this (negative) value count as behind the ray
/// origin and are never reported as hits.
pub const DEFAULT_OVERSTEP_TOLERANCE: f64 = -1e-10;

/// A ray in 3D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray {
    origin: Point3,
    direction: Dir3,
    overstep_tolerance: f64,
}

impl Ray {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized; a zero or non-finite direction
    /// is a caller bug and is caught by a debug assertion.
    pub fn new(origin: Point3, direction: Vec3) -> Self {
        debug_assert!(
            direction.norm() > 0.0 && direction.norm().is_finite(),
            "ray direction must be non-zero and finite"
        );
        Self {
            origin,
            direction: Dir3::new_normalize(direction),
            overstep_tolerance: DEFAULT_OVERSTEP_TOLERANCE,
        }
    }

    /// Override the overstep tolerance. Must be non-positive.
    pub fn with_overstep_tolerance(mut self, tolerance: f64) -> Self {
        self.overstep_tolerance = tolerance.min(0.0);
        self
    }

    /// Origin point of the ray.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// Unit direction of the ray.
    #[inline]
    pub fn direction(&self) -> Dir3 {
        self.direction
    }

    /// The smallest path length accepted as in front of the origin.
    #[inline]
    pub fn overstep_tolerance(&self) -> f64 {
        self.overstep_tolerance
    }

    /// Evaluate the ray at path length `s`: `origin + s * direction`.
    #[inline]
    pub fn at(&self, s: f64) -> Point3 {
        self.origin + s * self.direction.as_ref()
    }
}
