#![warn(missing_docs)]

//! Surface shapes and boundary masks for the trak kernel.
//!
//! A detector surface is described by a [`Shape`] (the closed set of
//! bounded 2D variants), wrapped in a [`Mask`] that adds a tolerance
//! policy and an opaque owner link. Shapes also provide the local
//! bounding boxes and axis metadata consumed by the spatial-indexing
//! collaborator, and vertex enumeration for visualization.
//!
//! Construction validates all parameters; a shape that builds never
//! fails at query time.

pub mod axes;
pub mod bbox;
mod error;
mod mask;
mod shape;

pub use axes::{AxisLabel, Binning, ShapeAxes};
pub use bbox::Aabb3;
pub use error::{Result, ShapeError};
pub use mask::{Mask, MaskStatus};
pub use shape::Shape;
