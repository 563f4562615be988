//! Trajectory-plane intersection, shared by every planar shape
//! (rectangle, trapezoid, ring, annulus, unbounded).

use trak_kernel_math::{Frame, Point2, Point3};
use trak_kernel_masks::Mask;

use super::{MAX_NEWTON_STEPS, NEWTON_TOLERANCE, PARALLEL_GUARD};
use crate::helix::Helix;
use crate::intersection::{Intersection, SurfaceId};
use crate::ray::Ray;

/// Intersect a ray with the plane carried by `frame` and classify the
/// hit against `mask`.
///
/// The plane contains the frame origin with the frame's z axis as its
/// normal. A ray parallel to the plane (within the numeric guard) or a
/// crossing behind the origin yields the missed sentinel; every other
/// input yields a classified record.
pub fn intersect_plane<L>(
    ray: &Ray,
    frame: &Frame,
    mask: &Mask<L>,
    surface: SurfaceId,
) -> Intersection {
    let normal = frame.z_axis();
    let d = ray.direction().into_inner();
    let denom = d.dot(&normal);

    // Ray is parallel to the plane
    if denom.abs() < PARALLEL_GUARD {
        return Intersection::missed(surface);
    }

    let plane_point = Point3::from(frame.translation());
    let s = (plane_point - ray.origin()).dot(&normal) / denom;

    // Crossing behind the ray origin
    if s < ray.overstep_tolerance() {
        return Intersection::missed(surface);
    }

    let point = ray.at(s);
    let loc = mask.to_local(frame, &point, &d);

    Intersection {
        path: s,
        local: Point2::new(loc.x, loc.y),
        global: Some(point),
        cos_incidence: denom.abs(),
        status: mask.is_inside(&loc, None).into(),
        surface,
    }
}

/// Intersect a helix with the plane carried by `frame`.
///
/// Newton iteration on the signed distance to the plane, seeded from
/// the straight-line solution of the tangent at the origin. Bounded
/// iterations; non-convergence folds into the missed sentinel.
pub fn intersect_helix_plane<L>(
    helix: &Helix,
    frame: &Frame,
    mask: &Mask<L>,
    surface: SurfaceId,
) -> Intersection {
    let normal = frame.z_axis();
    let plane_point = Point3::from(frame.translation());

    // Straight-line seed; fall back to the origin for grazing starts
    let d0 = helix.tangent(0.0);
    let denom0 = d0.dot(&normal);
    let mut s = if denom0.abs() > PARALLEL_GUARD {
        (plane_point - helix.origin()).dot(&normal) / denom0
    } else {
        0.0
    };

    let mut converged = false;
    for _ in 0..MAX_NEWTON_STEPS {
        let f = (helix.at(s) - plane_point).dot(&normal);
        let df = helix.tangent(s).dot(&normal);
        if df.abs() < PARALLEL_GUARD {
            break;
        }
        let step = f / df;
        s -= step;
        if step.abs() < NEWTON_TOLERANCE {
            converged = true;
            break;
        }
    }

    if !converged || s < helix.overstep_tolerance() {
        return Intersection::missed(surface);
    }

    let point = helix.at(s);
    let tangent = helix.tangent(s);
    let loc = mask.to_local(frame, &point, &tangent);

    Intersection {
        path: s,
        local: Point2::new(loc.x, loc.y),
        global: Some(point),
        cos_incidence: tangent.dot(&normal).abs(),
        status: mask.is_inside(&loc, None).into(),
        surface,
    }
}
