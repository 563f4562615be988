//! Trajectory-cylinder intersection (quadratic for rays, Newton for
//! helices), for the cylinder barrel coincident with the local z axis.

use trak_kernel_math::{Frame, Point2, Point3, Vec3};
use trak_kernel_masks::{Mask, Shape};

use super::{MAX_NEWTON_STEPS, NEWTON_TOLERANCE, PARALLEL_GUARD};
use crate::helix::Helix;
use crate::intersection::{Intersection, SurfaceId};
use crate::ray::Ray;

/// Build the record for a solved local-frame hit on the cylinder.
///
/// Local convention `(r * phi, z, r)`; the incidence cosine is taken
/// against the outward radial normal at the hit.
fn record_from_local<L>(
    mask: &Mask<L>,
    frame: &Frame,
    p: &Point3,
    tangent: &Vec3,
    s: f64,
    surface: SurfaceId,
) -> Intersection {
    let r = p.x.hypot(p.y);
    let loc = Point3::new(r * p.y.atan2(p.x), p.z, r);
    let cos_incidence = if r > 0.0 {
        (p.x * tangent.x + p.y * tangent.y).abs() / r
    } else {
        0.0
    };
    Intersection {
        path: s,
        local: Point2::new(loc.x, loc.y),
        global: Some(frame.to_global_point(p)),
        cos_incidence,
        status: mask.is_inside(&loc, None).into(),
        surface,
    }
}

/// Intersect a ray with the cylinder carried by `mask` and `frame`.
///
/// Solves the quadratic on the transverse components in the local
/// frame; the smallest root in front of the origin wins. A ray parallel
/// to the axis or with no real root yields the missed sentinel,
/// independent of the axial bounds.
pub fn intersect_cylinder<L>(
    ray: &Ray,
    frame: &Frame,
    mask: &Mask<L>,
    surface: SurfaceId,
) -> Intersection {
    let Shape::Cylinder { radius, .. } = *mask.shape() else {
        return Intersection::missed(surface);
    };

    let o = frame.to_local_point(&ray.origin());
    let d = frame.to_local_dir(&ray.direction().into_inner());

    let a = d.x * d.x + d.y * d.y;
    // Ray parallel to the cylinder axis
    if a < PARALLEL_GUARD {
        return Intersection::missed(surface);
    }

    let b = 2.0 * (o.x * d.x + o.y * d.y);
    let c = o.x * o.x + o.y * o.y - radius * radius;
    let discriminant = b * b - 4.0 * a * c;
    if discriminant < 0.0 {
        return Intersection::missed(surface);
    }

    let sqrt_disc = discriminant.sqrt();
    let s_near = (-b - sqrt_disc) / (2.0 * a);
    let s_far = (-b + sqrt_disc) / (2.0 * a);

    let s = if s_near >= ray.overstep_tolerance() {
        s_near
    } else if s_far >= ray.overstep_tolerance() {
        s_far
    } else {
        return Intersection::missed(surface);
    };

    let p = o + s * d;
    record_from_local(mask, frame, &p, &d, s, surface)
}

/// Intersect a helix with the cylinder carried by `mask` and `frame`.
///
/// Newton iteration on the transverse radial residual, seeded from the
/// straight-line quadratic of the tangent at the origin. Bounded
/// iterations; non-convergence folds into the missed sentinel.
pub fn intersect_helix_cylinder<L>(
    helix: &Helix,
    frame: &Frame,
    mask: &Mask<L>,
    surface: SurfaceId,
) -> Intersection {
    let Shape::Cylinder { radius, .. } = *mask.shape() else {
        return Intersection::missed(surface);
    };

    let o = frame.to_local_point(&helix.origin());
    let d0 = frame.to_local_dir(&helix.tangent(0.0));

    // Straight-line seed; fall back to the origin when the tangent
    // starts parallel to the axis or the seed line misses
    let mut s = 0.0;
    let a = d0.x * d0.x + d0.y * d0.y;
    if a > PARALLEL_GUARD {
        let b = 2.0 * (o.x * d0.x + o.y * d0.y);
        let c = o.x * o.x + o.y * o.y - radius * radius;
        let discriminant = b * b - 4.0 * a * c;
        if discriminant >= 0.0 {
            let sqrt_disc = discriminant.sqrt();
            let s_near = (-b - sqrt_disc) / (2.0 * a);
            let s_far = (-b + sqrt_disc) / (2.0 * a);
            s = if s_near >= helix.overstep_tolerance() {
                s_near
            } else {
                s_far
            };
        }
    }

    let mut converged = false;
    for _ in 0..MAX_NEWTON_STEPS {
        let p = frame.to_local_point(&helix.at(s));
        let t = frame.to_local_dir(&helix.tangent(s));
        let f = p.x * p.x + p.y * p.y - radius * radius;
        let df = 2.0 * (p.x * t.x + p.y * t.y);
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

    let p = frame.to_local_point(&helix.at(s));
    let t = frame.to_local_dir(&helix.tangent(s));
    record_from_local(mask, frame, &p, &t, s, surface)
}
