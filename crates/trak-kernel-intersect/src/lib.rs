#![warn(missing_docs)]

//! Trajectory-surface intersectors for the trak kernel.
//!
//! Given a [`Ray`] or [`Helix`] and a surface described by a mask and
//! its frame, the intersectors solve the surface equation, convert the
//! hit to the surface's local frame, classify it against the mask and
//! produce an [`Intersection`] record. Records from many surfaces sort
//! into trajectory order with [`sort_intersections`]; the missed
//! sentinel (`path = +inf`) always sorts last.
//!
//! Every operation is a pure function of its inputs: no shared state,
//! no allocation on the hot path, no error channel. Degenerate inputs
//! (parallel rays, no real root, Newton non-convergence) fold into the
//! `Missed` status.

mod helix;
pub mod intersect;
mod intersection;
mod ray;

pub use helix::Helix;
pub use intersect::{
    intersect, intersect_cylinder, intersect_helix, intersect_helix_cylinder,
    intersect_helix_plane, intersect_plane,
};
pub use intersection::{sort_intersections, Intersection, IntersectionStatus, SurfaceId};
pub use ray::{Ray, DEFAULT_OVERSTEP_TOLERANCE};
