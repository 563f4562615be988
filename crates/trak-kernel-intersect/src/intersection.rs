//! Intersection record and its total ordering along the trajectory.

use std::cmp::Ordering;

use trak_kernel_math::{Point2, Point3};
use trak_kernel_masks::MaskStatus;

/// Caller-supplied surface identifier, used as the stable sort tie-break.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SurfaceId(pub u32);

impl SurfaceId {
    /// Sentinel for default-constructed records.
    pub const INVALID: SurfaceId = SurfaceId(u32::MAX);
}

/// Boundary classification of an intersection candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionStatus {
    /// The hit lies within the nominal shape bounds.
    Inside,
    /// The hit lies on the boundary, within tolerance.
    Edge,
    /// The surface was crossed outside the shape bounds.
    Outside,
    /// No geometric intersection (parallel, behind the origin, or no
    /// real solution).
    Missed,
}

impl From<MaskStatus> for IntersectionStatus {
    fn from(status: MaskStatus) -> Self {
        match status {
            MaskStatus::Inside => Self::Inside,
            MaskStatus::Edge => Self::Edge,
            MaskStatus::Outside => Self::Outside,
        }
    }
}

/// One intersection candidate of a trajectory with a surface.
///
/// The default-constructed record is the explicit "no intersection"
/// sentinel: `path = +inf`, `status = Missed`. Records are plain values;
/// a candidate collection owns them by value.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Intersection {
    /// Signed path length along the trajectory; `+inf` marks invalid.
    pub path: f64,
    /// Hit coordinates in the surface's local frame.
    pub local: Point2,
    /// Hit point in the global frame, reconstructible from `local`.
    pub global: Option<Point3>,
    /// Cosine of the incidence angle between trajectory and surface
    /// normal at the hit.
    pub cos_incidence: f64,
    /// Boundary classification.
    pub status: IntersectionStatus,
    /// Identifier of the intersected surface.
    pub surface: SurfaceId,
}

impl Intersection {
    /// The missed sentinel for a given surface.
    pub fn missed(surface: SurfaceId) -> Self {
        Self {
            surface,
            ..Self::default()
        }
    }

    /// A record counts as valid when it carries a finite path length and
    /// an actual surface crossing.
    pub fn is_valid(&self) -> bool {
        self.path.is_finite() && self.status != IntersectionStatus::Missed
    }

    /// Total order along the trajectory: path length ascending, ties
    /// broken by surface identifier. Infinite (invalid) records sort
    /// after every finite one.
    pub fn compare(&self, other: &Self) -> Ordering {
        self.path
            .total_cmp(&other.path)
            .then_with(|| self.surface.cmp(&other.surface))
    }
}

impl Default for Intersection {
    fn default() -> Self {
        Self {
            path: f64::INFINITY,
            local: Point2::origin(),
            global: None,
            cos_incidence: 0.0,
            status: IntersectionStatus::Missed,
            surface: SurfaceId::INVALID,
        }
    }
}

/// Sort a batch of candidates in place under [`Intersection::compare`].
///
/// Valid records end up in ascending path order ahead of all invalid
/// ones; the navigation collaborator picks the front as the next
/// surface.
pub fn sort_intersections(records: &mut [Intersection]) {
    records.sort_unstable_by(|a, b| a.compare(b));
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hit(path: f64, surface: u32) -> Intersection {
        Intersection {
            path,
            status: IntersectionStatus::Inside,
            surface: SurfaceId(surface),
            ..Intersection::default()
        }
    }

    #[test]
    fn test_default_is_missed_sentinel() {
        let record = Intersection::default();
        assert!(record.path.is_infinite());
        assert_eq!(record.status, IntersectionStatus::Missed);
        assert!(!record.is_valid());
    }

    #[test]
    fn test_sort_valid_ahead_of_invalid() {
        let mut records = vec![Intersection::default(), hit(2.0, 0), hit(1.7, 1)];
        sort_intersections(&mut records);

        assert!((records[0].path - 1.7).abs() < f64::EPSILON);
        assert!((records[1].path - 2.0).abs() < f64::EPSILON);
        assert!(records[2].path.is_infinite());
    }

    #[test]
    fn test_tie_break_by_surface() {
        let mut records = vec![hit(5.0, 3), hit(5.0, 1), hit(5.0, 2)];
        sort_intersections(&mut records);
        let ids: Vec<u32> = records.iter().map(|r| r.surface.0).collect();
        assert_eq!(ids, vec![1, 2, 3]);
    }

    #[test]
    fn test_negative_paths_sort_first() {
        let mut records = vec![hit(0.5, 0), hit(-0.3, 1)];
        sort_intersections(&mut records);
        assert!(records[0].path < 0.0);
    }
}
