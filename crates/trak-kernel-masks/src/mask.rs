//! Mask: a shape bound to a tolerance policy and an owner link.

use serde::{Deserialize, Serialize};
use trak_kernel_math::{Frame, Point3, Vec3, DEFAULT_TOLERANCE};

use crate::shape::Shape;

/// Three-way boundary classification of a local point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum MaskStatus {
    /// Within the nominal bounds (zero tolerance).
    Inside,
    /// Outside the nominal bounds but within the tolerance band.
    Edge,
    /// Outside even with the tolerance band applied.
    Outside,
}

/// A shape attached to a surface, with a per-dimension tolerance vector
/// and an opaque link identifying the owning volume or surface.
///
/// Built once during geometry construction and read-only on the query
/// path; the link is pass-through storage that this crate never
/// interprets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Mask<L = u32> {
    shape: Shape,
    tolerance: [f64; 2],
    link: L,
}

impl<L> Mask<L> {
    /// Create a mask with the default tolerance of one machine epsilon
    /// per local dimension.
    pub fn new(shape: Shape, link: L) -> Self {
        Self {
            shape,
            tolerance: [DEFAULT_TOLERANCE; 2],
            link,
        }
    }

    /// Override the tolerance vector.
    pub fn with_tolerance(mut self, tolerance: [f64; 2]) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// The bound shape.
    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    /// Replace the shape. Administrative only; shapes arrive already
    /// validated by their checked constructors.
    pub fn set_shape(&mut self, shape: Shape) {
        self.shape = shape;
    }

    /// The tolerance vector.
    pub fn tolerance(&self) -> [f64; 2] {
        self.tolerance
    }

    /// The owner link.
    pub fn link(&self) -> &L {
        &self.link
    }

    /// Mutable access to the owner link.
    pub fn link_mut(&mut self) -> &mut L {
        &mut self.link
    }

    /// Classify a local point against the shape boundary.
    ///
    /// `tol` overrides the mask's own tolerance vector for this query
    /// (loose search regions vs. tight sensor checks share this path).
    pub fn is_inside(&self, loc: &Point3, tol: Option<[f64; 2]>) -> MaskStatus {
        if self.shape.check_boundaries(loc, [0.0, 0.0]) {
            return MaskStatus::Inside;
        }
        let tol = tol.unwrap_or(self.tolerance);
        if self.shape.check_boundaries(loc, tol) {
            MaskStatus::Edge
        } else {
            MaskStatus::Outside
        }
    }

    /// Project a global point into the shape's local frame convention.
    pub fn to_local(&self, frame: &Frame, p: &Point3, d: &Vec3) -> Point3 {
        self.shape.project(frame, p, d)
    }

    /// Rebuild the global point from local coordinates.
    pub fn to_global(&self, frame: &Frame, loc: &Point3) -> Point3 {
        self.shape.unproject(frame, loc)
    }

    /// Value equality of the shape parameters within `epsilon`.
    ///
    /// The link payload is excluded on purpose: two masks describing the
    /// same bounds are equal regardless of their owners.
    pub fn approx_eq<M>(&self, other: &Mask<M>, epsilon: f64) -> bool {
        self.shape.approx_eq(&other.shape, epsilon)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::f64::consts::FRAC_PI_2;

    #[test]
    fn test_three_way_classification() {
        let mask = Mask::new(Shape::rectangle(3.0, 4.0).unwrap(), 0u32)
            .with_tolerance([0.01, 0.01]);

        assert_eq!(
            mask.is_inside(&Point3::new(2.9, 3.9, 0.0), None),
            MaskStatus::Inside
        );
        assert_eq!(
            mask.is_inside(&Point3::new(3.005, 4.0, 0.0), None),
            MaskStatus::Edge
        );
        assert_eq!(
            mask.is_inside(&Point3::new(3.5, 4.0, 0.0), None),
            MaskStatus::Outside
        );
        // Caller tolerance overrides the mask's own
        assert_eq!(
            mask.is_inside(&Point3::new(3.5, 4.0, 0.0), Some([1.0, 1.0])),
            MaskStatus::Edge
        );
    }

    #[test]
    fn test_default_tolerance_is_epsilon() {
        let mask = Mask::new(Shape::ring(7.2, 12.0).unwrap(), ());
        assert_eq!(mask.tolerance(), [f64::EPSILON; 2]);
    }

    #[test]
    fn test_link_passthrough() {
        let mut mask = Mask::new(Shape::unbounded(), 42u32);
        assert_eq!(*mask.link(), 42);
        *mask.link_mut() = 7;
        assert_eq!(*mask.link(), 7);
    }

    #[test]
    fn test_planar_local_global_round_trip() {
        let mask = Mask::new(Shape::rectangle(3.0, 4.0).unwrap(), 0u32);
        let frame = Frame::from_translation(Vec3::new(3.0, 2.0, 10.0));

        let p = Point3::new(2.0, 1.0, 10.0);
        let loc = mask.to_local(&frame, &p, &Vec3::z());
        assert!((loc.x - (-1.0)).abs() < 1e-14);
        assert!((loc.y - (-1.0)).abs() < 1e-14);

        let back = mask.to_global(&frame, &loc);
        assert!((back - p).norm() < 1e-14);
    }

    #[test]
    fn test_cylinder_curvilinear_frame() {
        let mask = Mask::new(Shape::cylinder(4.0, -10.0, 10.0).unwrap(), 0u32);
        let frame = Frame::identity();

        // Point on the surface at phi = pi/2, z = 3
        let p = Point3::new(0.0, 4.0, 3.0);
        let loc = mask.to_local(&frame, &p, &Vec3::x());
        assert!((loc.x - 4.0 * FRAC_PI_2).abs() < 1e-12);
        assert!((loc.y - 3.0).abs() < 1e-14);
        assert!((loc.z - 4.0).abs() < 1e-14);

        let back = mask.to_global(&frame, &loc);
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn test_polar_frame_round_trip() {
        let mask = Mask::new(Shape::ring(1.0, 5.0).unwrap(), 0u32);
        let frame = Frame::from_translation(Vec3::new(0.0, 0.0, 20.0));

        let p = Point3::new(3.0, 4.0, 20.0);
        let loc = mask.to_local(&frame, &p, &Vec3::z());
        assert!((loc.x - 5.0).abs() < 1e-12);
        let back = mask.to_global(&frame, &loc);
        assert!((back - p).norm() < 1e-12);
    }

    #[test]
    fn test_mask_equality_ignores_link() {
        let a = Mask::new(Shape::rectangle(3.0, 4.0).unwrap(), 1u32);
        let b = Mask::new(Shape::rectangle(3.0, 4.0).unwrap(), 99u32);
        assert!(a.approx_eq(&b, 1e-12));

        let c = Mask::new(Shape::rectangle(3.0, 4.1).unwrap(), 1u32);
        assert!(!a.approx_eq(&c, 1e-12));
    }

    #[test]
    fn test_serde_round_trip() {
        let mask = Mask::new(
            Shape::annulus(7.2, 12.0, 0.74195, 1.33970, -2.0, 2.0).unwrap(),
            5u32,
        );
        let json = serde_json::to_string(&mask).unwrap();
        let back: Mask<u32> = serde_json::from_str(&json).unwrap();
        assert_eq!(mask, back);
    }
}
