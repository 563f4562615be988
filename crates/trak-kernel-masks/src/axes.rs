//! Axis metadata for the grid/spatial-indexing collaborator.
//!
//! Each shape declares which two local axes it spans and how they bin.
//! This is descriptive only; no binning is implemented here.

use serde::{Deserialize, Serialize};

/// Label of a local axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AxisLabel {
    /// Cartesian x.
    X,
    /// Cartesian y.
    Y,
    /// Radial coordinate.
    R,
    /// Azimuthal angle.
    Phi,
    /// Arc length along the azimuth (cylinder loc0).
    RPhi,
    /// Axial coordinate.
    Z,
}

/// Binning character of a local axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Binning {
    /// Open linear axis.
    Linear,
    /// Periodic axis that wraps at the bounds.
    Circular,
}

/// The two local axes of a shape and their binning behaviour.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ShapeAxes {
    /// Labels of local axis 0 and 1.
    pub labels: [AxisLabel; 2],
    /// Binning of local axis 0 and 1.
    pub binning: [Binning; 2],
}
