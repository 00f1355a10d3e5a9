//! # Geometry Errors
//!
//! Error types for the geometry kernels. None of these escape a pipeline run:
//! boundary strategies report them so the extractor can fall back to the next
//! tier, and parsers report them for invalid user input.

use thiserror::Error;

/// Errors that can occur inside the geometry kernels.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum GeometryError {
    /// Too few distinct points, zero spans or collinear input.
    #[error("Degenerate geometry: {message}")]
    DegenerateGeometry { message: String },

    /// A boundary strategy ran but could not produce a ring.
    #[error("Boundary strategy '{strategy}' failed: {message}")]
    BoundaryFailed {
        strategy: &'static str,
        message: String,
    },

    /// Rotation order name did not match any candidate.
    #[error("Unknown rotation order: {0}")]
    UnknownRotationOrder(String),

    /// Projection method name did not match any method.
    #[error("Unknown projection method: {0}")]
    UnknownProjection(String),
}

impl GeometryError {
    /// Creates a degenerate geometry error.
    pub fn degenerate(message: impl Into<String>) -> Self {
        Self::DegenerateGeometry {
            message: message.into(),
        }
    }

    /// Creates a boundary failure for the named strategy.
    pub fn boundary_failed(strategy: &'static str, message: impl Into<String>) -> Self {
        Self::BoundaryFailed {
            strategy,
            message: message.into(),
        }
    }
}
