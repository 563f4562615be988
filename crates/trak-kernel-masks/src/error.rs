//! Error types for shape construction.

use thiserror::Error;

/// Errors that can occur when building a shape or its bounding box.
///
/// These are the only failures in the crate: a shape that constructs
/// successfully never fails at query time.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ShapeError {
    /// A half-length bound was zero or negative.
    #[error("half length must be positive, got {0}")]
    InvalidHalfLength(f64),

    /// A radius bound was negative.
    #[error("radius must be non-negative, got {0}")]
    NegativeRadius(f64),

    /// A min/max bound pair was inverted.
    #[error("inverted bounds: min {0} > max {1}")]
    InvertedBounds(f64, f64),

    /// The bounding-box envelope was not strictly positive.
    #[error("bounding-box envelope must be positive, got {0}")]
    InvalidEnvelope(f64),
}

/// Result type for shape construction.
pub type Result<T> = std::result::Result<T, ShapeError>;
