//! Axis-aligned bounding boxes in local surface coordinates.
//!
//! Consumed by the grid/spatial-indexing collaborator to pre-select
//! candidate surfaces; the intersectors never touch these.

use trak_kernel_math::Point3;

/// Axis-aligned bounding box in 3D.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb3 {
    /// Minimum corner.
    pub min: Point3,
    /// Maximum corner.
    pub max: Point3,
}

impl Aabb3 {
    /// Create an AABB from min and max corners.
    pub fn new(min: Point3, max: Point3) -> Self {
        Self { min, max }
    }

    /// Create an empty (inverted) AABB suitable for expansion.
    pub fn empty() -> Self {
        Self {
            min: Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            max: Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
        }
    }

    /// Expand this AABB to include a point.
    pub fn include_point(&mut self, p: &Point3) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.min.z = self.min.z.min(p.z);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
        self.max.z = self.max.z.max(p.z);
    }

    /// Grow the AABB outward by `margin` in all directions.
    pub fn expand(&mut self, margin: f64) {
        self.min.x -= margin;
        self.min.y -= margin;
        self.min.z -= margin;
        self.max.x += margin;
        self.max.y += margin;
        self.max.z += margin;
    }

    /// Test if two AABBs overlap (touching counts as overlap).
    pub fn overlaps(&self, other: &Aabb3) -> bool {
        self.min.x <= other.max.x
            && self.max.x >= other.min.x
            && self.min.y <= other.max.y
            && self.max.y >= other.min.y
            && self.min.z <= other.max.z
            && self.max.z >= other.min.z
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_include_and_overlap() {
        let mut a = Aabb3::empty();
        a.include_point(&Point3::new(-1.0, 0.0, 0.0));
        a.include_point(&Point3::new(2.0, 3.0, 1.0));
        assert!((a.min.x - (-1.0)).abs() < 1e-14);
        assert!((a.max.y - 3.0).abs() < 1e-14);

        let b = Aabb3::new(Point3::new(2.0, 3.0, 1.0), Point3::new(5.0, 5.0, 5.0));
        // Touching boxes overlap
        assert!(a.overlaps(&b));

        let c = Aabb3::new(Point3::new(10.0, 10.0, 10.0), Point3::new(11.0, 11.0, 11.0));
        assert!(!a.overlaps(&c));
    }

    #[test]
    fn test_expand() {
        let mut a = Aabb3::new(Point3::origin(), Point3::new(1.0, 1.0, 1.0));
        a.expand(0.5);
        assert!((a.min.x - (-0.5)).abs() < 1e-14);
        assert!((a.max.z - 1.5).abs() < 1e-14);
    }
}
