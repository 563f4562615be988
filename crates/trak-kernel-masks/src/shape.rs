//! The closed set of surface shapes and their boundary semantics.
//!
//! Every sensitive or passive detector surface is described by one of
//! these variants. The set is closed on purpose: each operation is a
//! single exhaustive `match`, so adding a shape forces every operation
//! to be updated.

use serde::{Deserialize, Serialize};
use trak_kernel_math::{Frame, Point3, Vec3};

use crate::axes::{AxisLabel, Binning, ShapeAxes};
use crate::bbox::Aabb3;
use crate::error::{Result, ShapeError};

/// Numeric slack for the cylinder's radius-compatibility test.
///
/// A solved intersection point lies on the cylinder only up to rounding,
/// so the radial comparison always carries this absolute-plus-relative
/// guard on top of the caller tolerance. This is the single place such
/// slack appears.
const RADIAL_GUARD: f64 = 4.0 * f64::EPSILON;

/// A bounded 2D shape in a surface's local frame.
///
/// Parameters are validated at construction and immutable afterwards;
/// the enum is only built through the checked constructors.
///
/// Local point convention (the third component is shape-specific, kept
/// for boundary checks that need more than two coordinates):
/// - rectangle, trapezoid, unbounded: cartesian `(x, y, 0)`
/// - ring, annulus: polar `(r, phi, 0)`
/// - cylinder: curvilinear `(r * phi, z, r)`
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(try_from = "RawShape")]
pub enum Shape {
    /// Rectangle centered on the local origin, given by half-lengths.
    Rectangle {
        /// Half-length along local x.
        half_x: f64,
        /// Half-length along local y.
        half_y: f64,
    },
    /// Symmetric trapezoid, parallel edges at `y = -half_y` and `y = +half_y`.
    Trapezoid {
        /// Half-length along x at `y = -half_y`.
        half_x_neg_y: f64,
        /// Half-length along x at `y = +half_y`.
        half_x_pos_y: f64,
        /// Half-length along y.
        half_y: f64,
    },
    /// Closed ring (disc with a hole) centered on the local origin.
    Ring {
        /// Inner radius.
        inner_r: f64,
        /// Outer radius.
        outer_r: f64,
    },
    /// Full cylinder barrel coincident with the local z axis.
    Cylinder {
        /// Cylinder radius.
        radius: f64,
        /// Lower axial bound.
        z_min: f64,
        /// Upper axial bound.
        z_max: f64,
    },
    /// Annulus sector whose radial bounds live in a shifted (focal) frame.
    Annulus {
        /// Inner radius in the focal frame.
        inner_r: f64,
        /// Outer radius in the focal frame.
        outer_r: f64,
        /// Lower azimuthal bound in the focal frame.
        min_phi: f64,
        /// Upper azimuthal bound in the focal frame.
        max_phi: f64,
        /// Focal origin offset along local x.
        shift_x: f64,
        /// Focal origin offset along local y.
        shift_y: f64,
    },
    /// No boundary: every point is inside. Used for portal-like surfaces.
    Unbounded,
}

/// Wire form of [`Shape`]: identical layout, no invariants.
///
/// Deserialization lands here first and converts through the checked
/// constructors, so persisted geometry cannot smuggle in parameters
/// that construction would reject.
#[derive(Deserialize)]
enum RawShape {
    Rectangle {
        half_x: f64,
        half_y: f64,
    },
    Trapezoid {
        half_x_neg_y: f64,
        half_x_pos_y: f64,
        half_y: f64,
    },
    Ring {
        inner_r: f64,
        outer_r: f64,
    },
    Cylinder {
        radius: f64,
        z_min: f64,
        z_max: f64,
    },
    Annulus {
        inner_r: f64,
        outer_r: f64,
        min_phi: f64,
        max_phi: f64,
        shift_x: f64,
        shift_y: f64,
    },
    Unbounded,
}

impl TryFrom<RawShape> for Shape {
    type Error = ShapeError;

    fn try_from(raw: RawShape) -> Result<Self> {
        match raw {
            RawShape::Rectangle { half_x, half_y } => Self::rectangle(half_x, half_y),
            RawShape::Trapezoid {
                half_x_neg_y,
                half_x_pos_y,
                half_y,
            } => Self::trapezoid(half_x_neg_y, half_x_pos_y, half_y),
            RawShape::Ring { inner_r, outer_r } => Self::ring(inner_r, outer_r),
            RawShape::Cylinder {
                radius,
                z_min,
                z_max,
            } => Self::cylinder(radius, z_min, z_max),
            RawShape::Annulus {
                inner_r,
                outer_r,
                min_phi,
                max_phi,
                shift_x,
                shift_y,
            } => Self::annulus(inner_r, outer_r, min_phi, max_phi, shift_x, shift_y),
            RawShape::Unbounded => Ok(Self::unbounded()),
        }
    }
}

impl Shape {
    /// Checked rectangle constructor.
    pub fn rectangle(half_x: f64, half_y: f64) -> Result<Self> {
        for h in [half_x, half_y] {
            if h <= 0.0 {
                return Err(ShapeError::InvalidHalfLength(h));
            }
        }
        Ok(Self::Rectangle { half_x, half_y })
    }

    /// Checked trapezoid constructor.
    pub fn trapezoid(half_x_neg_y: f64, half_x_pos_y: f64, half_y: f64) -> Result<Self> {
        for h in [half_x_neg_y, half_x_pos_y, half_y] {
            if h <= 0.0 {
                return Err(ShapeError::InvalidHalfLength(h));
            }
        }
        Ok(Self::Trapezoid {
            half_x_neg_y,
            half_x_pos_y,
            half_y,
        })
    }

    /// Checked ring constructor.
    pub fn ring(inner_r: f64, outer_r: f64) -> Result<Self> {
        if inner_r < 0.0 {
            return Err(ShapeError::NegativeRadius(inner_r));
        }
        if inner_r > outer_r {
            return Err(ShapeError::InvertedBounds(inner_r, outer_r));
        }
        Ok(Self::Ring { inner_r, outer_r })
    }

    /// Checked cylinder constructor.
    pub fn cylinder(radius: f64, z_min: f64, z_max: f64) -> Result<Self> {
        if radius < 0.0 {
            return Err(ShapeError::NegativeRadius(radius));
        }
        if z_min > z_max {
            return Err(ShapeError::InvertedBounds(z_min, z_max));
        }
        Ok(Self::Cylinder {
            radius,
            z_min,
            z_max,
        })
    }

    /// Checked annulus constructor.
    pub fn annulus(
        inner_r: f64,
        outer_r: f64,
        min_phi: f64,
        max_phi: f64,
        shift_x: f64,
        shift_y: f64,
    ) -> Result<Self> {
        if inner_r < 0.0 {
            return Err(ShapeError::NegativeRadius(inner_r));
        }
        if inner_r > outer_r {
            return Err(ShapeError::InvertedBounds(inner_r, outer_r));
        }
        if min_phi > max_phi {
            return Err(ShapeError::InvertedBounds(min_phi, max_phi));
        }
        Ok(Self::Annulus {
            inner_r,
            outer_r,
            min_phi,
            max_phi,
            shift_x,
            shift_y,
        })
    }

    /// Unbounded shape.
    pub fn unbounded() -> Self {
        Self::Unbounded
    }

    /// Display name of the shape variant.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Rectangle { .. } => "rectangle2D",
            Self::Trapezoid { .. } => "trapezoid2D",
            Self::Ring { .. } => "ring2D",
            Self::Cylinder { .. } => "cylinder3D",
            Self::Annulus { .. } => "annulus2D",
            Self::Unbounded => "unbounded",
        }
    }

    /// Check a local point against the shape boundary.
    ///
    /// Every comparison is inclusive with the tolerance added outward:
    /// a point exactly on the nominal bound with zero tolerance is
    /// inside. `tol` carries one band per local dimension.
    pub fn check_boundaries(&self, loc: &Point3, tol: [f64; 2]) -> bool {
        match *self {
            Self::Rectangle { half_x, half_y } => {
                loc.x.abs() <= half_x + tol[0] && loc.y.abs() <= half_y + tol[1]
            }
            Self::Trapezoid {
                half_x_neg_y,
                half_x_pos_y,
                half_y,
            } => {
                if loc.y.abs() > half_y + tol[1] {
                    return false;
                }
                // Half-length along x interpolated at the point's y
                let rel = (loc.y + half_y) / (2.0 * half_y);
                let half_x = half_x_neg_y + rel * (half_x_pos_y - half_x_neg_y);
                loc.x.abs() <= half_x + tol[0]
            }
            Self::Ring { inner_r, outer_r } => {
                loc.x + tol[0] >= inner_r && loc.x <= outer_r + tol[0]
            }
            Self::Cylinder {
                radius,
                z_min,
                z_max,
            } => {
                (loc.z - radius).abs() <= tol[0] + RADIAL_GUARD * (1.0 + radius)
                    && loc.y + tol[1] >= z_min
                    && loc.y <= z_max + tol[1]
            }
            Self::Annulus {
                inner_r,
                outer_r,
                min_phi,
                max_phi,
                shift_x,
                shift_y,
            } => {
                // Move the polar point into the focal frame before testing
                let x = loc.x * loc.y.cos() - shift_x;
                let y = loc.x * loc.y.sin() - shift_y;
                let r = x.hypot(y);
                let phi = y.atan2(x);
                r + tol[0] >= inner_r
                    && r <= outer_r + tol[0]
                    && phi + tol[1] >= min_phi
                    && phi <= max_phi + tol[1]
            }
            Self::Unbounded => true,
        }
    }

    /// Axis-aligned bounding box in local coordinates, grown outward by
    /// the strictly positive `envelope` margin.
    pub fn local_bounding_box(&self, envelope: f64) -> Result<Aabb3> {
        if envelope <= 0.0 {
            return Err(ShapeError::InvalidEnvelope(envelope));
        }
        let mut bbox = match *self {
            Self::Rectangle { half_x, half_y } => Aabb3::new(
                Point3::new(-half_x, -half_y, 0.0),
                Point3::new(half_x, half_y, 0.0),
            ),
            Self::Trapezoid {
                half_x_neg_y,
                half_x_pos_y,
                half_y,
            } => {
                let half_x = half_x_neg_y.max(half_x_pos_y);
                Aabb3::new(
                    Point3::new(-half_x, -half_y, 0.0),
                    Point3::new(half_x, half_y, 0.0),
                )
            }
            Self::Ring { outer_r, .. } => Aabb3::new(
                Point3::new(-outer_r, -outer_r, 0.0),
                Point3::new(outer_r, outer_r, 0.0),
            ),
            Self::Cylinder {
                radius,
                z_min,
                z_max,
            } => Aabb3::new(
                Point3::new(-radius, -radius, z_min),
                Point3::new(radius, radius, z_max),
            ),
            Self::Annulus {
                outer_r,
                shift_x,
                shift_y,
                ..
            } => Aabb3::new(
                // Conservative: the full outer circle around the focal origin
                Point3::new(shift_x - outer_r, shift_y - outer_r, 0.0),
                Point3::new(shift_x + outer_r, shift_y + outer_r, 0.0),
            ),
            Self::Unbounded => Aabb3::new(
                Point3::new(f64::NEG_INFINITY, f64::NEG_INFINITY, f64::NEG_INFINITY),
                Point3::new(f64::INFINITY, f64::INFINITY, f64::INFINITY),
            ),
        };
        bbox.expand(envelope);
        Ok(bbox)
    }

    /// Corner vertices for polygonal shapes, clockwise from the
    /// `(+x, +y)` corner. `None` for curved or unbounded shapes.
    ///
    /// Consumed by visualization collaborators only.
    pub fn vertices(&self) -> Option<Vec<Point3>> {
        match *self {
            Self::Rectangle { half_x, half_y } => Some(vec![
                Point3::new(half_x, half_y, 0.0),
                Point3::new(half_x, -half_y, 0.0),
                Point3::new(-half_x, -half_y, 0.0),
                Point3::new(-half_x, half_y, 0.0),
            ]),
            Self::Trapezoid {
                half_x_neg_y,
                half_x_pos_y,
                half_y,
            } => Some(vec![
                Point3::new(half_x_pos_y, half_y, 0.0),
                Point3::new(half_x_neg_y, -half_y, 0.0),
                Point3::new(-half_x_neg_y, -half_y, 0.0),
                Point3::new(-half_x_pos_y, half_y, 0.0),
            ]),
            _ => None,
        }
    }

    /// Local axis labels and binning behaviour for the grid collaborator.
    pub fn axes(&self) -> ShapeAxes {
        match self {
            Self::Rectangle { .. } | Self::Trapezoid { .. } | Self::Unbounded => ShapeAxes {
                labels: [AxisLabel::X, AxisLabel::Y],
                binning: [Binning::Linear, Binning::Linear],
            },
            Self::Ring { .. } | Self::Annulus { .. } => ShapeAxes {
                labels: [AxisLabel::R, AxisLabel::Phi],
                binning: [Binning::Linear, Binning::Circular],
            },
            Self::Cylinder { .. } => ShapeAxes {
                labels: [AxisLabel::RPhi, AxisLabel::Z],
                binning: [Binning::Circular, Binning::Linear],
            },
        }
    }

    /// Project a global point into this shape's local frame convention.
    ///
    /// The direction is unused by the frames implemented here but is part
    /// of the projection contract (line-style frames need it).
    pub fn project(&self, frame: &Frame, p: &Point3, _d: &Vec3) -> Point3 {
        let l = frame.to_local_point(p);
        match *self {
            Self::Rectangle { .. } | Self::Trapezoid { .. } | Self::Unbounded => {
                Point3::new(l.x, l.y, 0.0)
            }
            Self::Ring { .. } | Self::Annulus { .. } => {
                Point3::new(l.x.hypot(l.y), l.y.atan2(l.x), 0.0)
            }
            Self::Cylinder { .. } => {
                let r = l.x.hypot(l.y);
                Point3::new(r * l.y.atan2(l.x), l.z, r)
            }
        }
    }

    /// Rebuild the global point from a local one.
    pub fn unproject(&self, frame: &Frame, loc: &Point3) -> Point3 {
        let l = match *self {
            Self::Rectangle { .. } | Self::Trapezoid { .. } | Self::Unbounded => {
                Point3::new(loc.x, loc.y, 0.0)
            }
            Self::Ring { .. } | Self::Annulus { .. } => {
                Point3::new(loc.x * loc.y.cos(), loc.x * loc.y.sin(), 0.0)
            }
            Self::Cylinder { radius, .. } => {
                let phi = if radius > 0.0 { loc.x / radius } else { 0.0 };
                Point3::new(radius * phi.cos(), radius * phi.sin(), loc.y)
            }
        };
        frame.to_global_point(&l)
    }

    /// Compare parameter vectors within `epsilon`; variants must match.
    pub fn approx_eq(&self, other: &Shape, epsilon: f64) -> bool {
        let (a, na) = self.bounds();
        let (b, nb) = other.bounds();
        if std::mem::discriminant(self) != std::mem::discriminant(other) || na != nb {
            return false;
        }
        a[..na]
            .iter()
            .zip(&b[..nb])
            .all(|(x, y)| (x - y).abs() <= epsilon)
    }

    /// Flattened parameter vector and its length.
    fn bounds(&self) -> ([f64; 6], usize) {
        match *self {
            Self::Rectangle { half_x, half_y } => ([half_x, half_y, 0.0, 0.0, 0.0, 0.0], 2),
            Self::Trapezoid {
                half_x_neg_y,
                half_x_pos_y,
                half_y,
            } => ([half_x_neg_y, half_x_pos_y, half_y, 0.0, 0.0, 0.0], 3),
            Self::Ring { inner_r, outer_r } => ([inner_r, outer_r, 0.0, 0.0, 0.0, 0.0], 2),
            Self::Cylinder {
                radius,
                z_min,
                z_max,
            } => ([radius, z_min, z_max, 0.0, 0.0, 0.0], 3),
            Self::Annulus {
                inner_r,
                outer_r,
                min_phi,
                max_phi,
                shift_x,
                shift_y,
            } => ([inner_r, outer_r, min_phi, max_phi, shift_x, shift_y], 6),
            Self::Unbounded => ([0.0; 6], 0),
        }
    }
}
