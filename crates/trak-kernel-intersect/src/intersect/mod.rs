//! Trajectory-surface intersection algorithms.
//!
//! Planar shapes share one closed-form algorithm; cylinders get the
//! quadratic. Helix variants solve the same surface equations by
//! bounded Newton iteration. [`intersect`] and [`intersect_helix`]
//! dispatch on the shape tag, so callers treat heterogeneous surfaces
//! uniformly.

mod cylinder;
mod plane;

pub use cylinder::{intersect_cylinder, intersect_helix_cylinder};
pub use plane::{intersect_helix_plane, intersect_plane};

use trak_kernel_math::Frame;
use trak_kernel_masks::{Mask, Shape};

use crate::helix::Helix;
use crate::intersection::{Intersection, SurfaceId};
use crate::ray::Ray;

/// Numeric guard below which a direction component counts as parallel.
pub(crate) const PARALLEL_GUARD: f64 = 1e-12;

/// Iteration cap for the Newton-based helix intersectors.
pub(crate) const MAX_NEWTON_STEPS: usize = 50;

/// Convergence threshold on the Newton path-length update.
pub(crate) const NEWTON_TOLERANCE: f64 = 1e-10;

/// Intersect a ray with the surface described by `mask` and `frame`.
pub fn intersect<L>(ray: &Ray, frame: &Frame, mask: &Mask<L>, surface: SurfaceId) -> Intersection {
    match mask.shape() {
        Shape::Cylinder { .. } => intersect_cylinder(ray, frame, mask, surface),
        _ => intersect_plane(ray, frame, mask, surface),
    }
}

/// Intersect a helix with the surface described by `mask` and `frame`.
pub fn intersect_helix<L>(
    helix: &Helix,
    frame: &Frame,
    mask: &Mask<L>,
    surface: SurfaceId,
) -> Intersection {
    match mask.shape() {
        Shape::Cylinder { .. } => intersect_helix_cylinder(helix, frame, mask, surface),
        _ => intersect_helix_plane(helix, frame, mask, surface),
    }
}
