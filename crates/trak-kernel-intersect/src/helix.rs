//! Helical trajectory of a charged particle in a uniform field.

use trak_kernel_math::{Dir3, Point3, Vec3};

use crate::ray::DEFAULT_OVERSTEP_TOLERANCE;

/// Below this curvature the helix degenerates to a straight line.
const STRAIGHT_LINE_CURVATURE: f64 = 1e-12;

/// A circular helix parameterized by path length.
///
/// The trajectory winds around `field_axis` with signed transverse
/// curvature `curvature` (positive curls the transverse component
/// towards `field_axis x direction`); the component of the direction
/// along the axis is preserved. `at(s)` and `tangent(s)` are closed
/// form, and `|tangent(s)| == 1` for all `s`.
#[derive(Debug, Clone, Copy)]
pub struct Helix {
    origin: Point3,
    field_axis: Dir3,
    curvature: f64,
    overstep_tolerance: f64,
    // Direction split once at construction
    dir_parallel: Vec3,
    dir_transverse: Vec3,
}

impl Helix {
    /// Create a helix from origin, initial direction, field axis and
    /// signed curvature. Direction and axis are normalized; a zero or
    /// non-finite direction or axis is a caller bug and is caught by a
    /// debug assertion.
    pub fn new(origin: Point3, direction: Vec3, field_axis: Vec3, curvature: f64) -> Self {
        debug_assert!(
            direction.norm() > 0.0 && direction.norm().is_finite(),
            "helix direction must be non-zero and finite"
        );
        debug_assert!(
            field_axis.norm() > 0.0 && field_axis.norm().is_finite(),
            "helix field axis must be non-zero and finite"
        );
        let axis = Dir3::new_normalize(field_axis);
        let dir = direction.normalize();
        let dir_parallel = dir.dot(axis.as_ref()) * axis.as_ref();
        Self {
            origin,
            field_axis: axis,
            curvature,
            overstep_tolerance: DEFAULT_OVERSTEP_TOLERANCE,
            dir_parallel,
            dir_transverse: dir - dir_parallel,
        }
    }

    /// Override the overstep tolerance. Must be non-positive.
    pub fn with_overstep_tolerance(mut self, tolerance: f64) -> Self {
        self.overstep_tolerance = tolerance.min(0.0);
        self
    }

    /// Origin point of the helix.
    #[inline]
    pub fn origin(&self) -> Point3 {
        self.origin
    }

    /// The smallest path length accepted as in front of the origin.
    #[inline]
    pub fn overstep_tolerance(&self) -> f64 {
        self.overstep_tolerance
    }

    /// Whether the curvature is below the straight-line threshold.
    #[inline]
    pub fn is_straight(&self) -> bool {
        self.curvature.abs() < STRAIGHT_LINE_CURVATURE
    }

    /// Evaluate the helix position at path length `s`.
    pub fn at(&self, s: f64) -> Point3 {
        let t0 = self.dir_parallel + self.dir_transverse;
        if self.is_straight() {
            return self.origin + s * t0;
        }
        let k = self.curvature;
        let phase = k * s;
        let binormal = self.field_axis.as_ref().cross(&self.dir_transverse);
        self.origin
            + s * self.dir_parallel
            + (phase.sin() / k) * self.dir_transverse
            + ((1.0 - phase.cos()) / k) * binormal
    }

    /// Unit tangent of the helix at path length `s`.
    pub fn tangent(&self, s: f64) -> Vec3 {
        let t0 = self.dir_parallel + self.dir_transverse;
        if self.is_straight() {
            return t0;
        }
        let phase = self.curvature * s;
        let binormal = self.field_axis.as_ref().cross(&self.dir_transverse);
        self.dir_parallel + phase.cos() * self.dir_transverse + phase.sin() * binormal
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_straight_line_limit() {
        let helix = Helix::new(
            Point3::new(1.0, 2.0, 3.0),
            Vec3::new(0.0, 1.0, 0.0),
            Vec3::z(),
            0.0,
        );
        assert!(helix.is_straight());
        let p = helix.at(4.0);
        assert!((p - Point3::new(1.0, 6.0, 3.0)).norm() < 1e-12);
        assert!((helix.tangent(4.0) - Vec3::y()).norm() < 1e-12);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "direction must be non-zero")]
    fn test_zero_direction_rejected() {
        Helix::new(Point3::origin(), Vec3::zeros(), Vec3::z(), 1.0);
    }

    #[cfg(debug_assertions)]
    #[test]
    #[should_panic(expected = "field axis must be non-zero")]
    fn test_zero_field_axis_rejected() {
        Helix::new(Point3::origin(), Vec3::x(), Vec3::zeros(), 1.0);
    }

    #[test]
    fn test_quarter_turn() {
        // Unit curvature around z, starting along x: circle of radius 1
        // centered at (0, 1, 0)
        let helix = Helix::new(Point3::origin(), Vec3::x(), Vec3::z(), 1.0);
        let p = helix.at(FRAC_PI_2);
        assert!((p - Point3::new(1.0, 1.0, 0.0)).norm() < 1e-12);
        let t = helix.tangent(FRAC_PI_2);
        assert!((t - Vec3::y()).norm() < 1e-12);
    }

    #[test]
    fn test_tangent_stays_unit() {
        let helix = Helix::new(
            Point3::origin(),
            Vec3::new(1.0, 0.5, 0.8),
            Vec3::new(0.1, 0.0, 1.0),
            0.3,
        );
        for s in [0.0, 1.3, 7.7, -2.5] {
            assert!((helix.tangent(s).norm() - 1.0).abs() < 1e-12);
        }
    }

    #[test]
    fn test_axial_component_preserved() {
        // Pitch along the field axis advances linearly
        let helix = Helix::new(Point3::origin(), Vec3::new(1.0, 0.0, 1.0), Vec3::z(), 2.0);
        let vz = std::f64::consts::FRAC_1_SQRT_2;
        let p = helix.at(3.0);
        assert!((p.z - 3.0 * vz).abs() < 1e-12);
    }
}
