#![warn(missing_docs)]

//! Tracking-geometry kernel facade for trak.
//!
//! Re-exports the surface-shape and intersection subsystem: masks bound
//! to rigid frames, ray/helix intersectors and ordered intersection
//! records. Detector assembly, spatial indexing, I/O and visualization
//! live in their own crates and consume these types.
//!
//! # Example
//!
//! ```
//! use trak_kernel::math::{Frame, Point3, Vec3};
//! use trak_kernel::masks::{Mask, Shape};
//! use trak_kernel::intersect::{intersect, Ray, SurfaceId};
//!
//! // A rectangular sensor shifted along z
//! let frame = Frame::from_translation(Vec3::new(0.0, 0.0, 10.0));
//! let mask = Mask::new(Shape::rectangle(3.0, 4.0).unwrap(), 0u32);
//!
//! let ray = Ray::new(Point3::new(1.0, 1.0, 0.0), Vec3::z());
//! let hit = intersect(&ray, &frame, &mask, SurfaceId(0));
//!
//! assert!(hit.is_valid());
//! assert!((hit.path - 10.0).abs() < 1e-12);
//! ```

pub use trak_kernel_intersect as intersect;
pub use trak_kernel_masks as masks;
pub use trak_kernel_math as math;
