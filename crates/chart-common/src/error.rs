//! Error types for the chart kernel.

use thiserror::Error;

/// Result type alias using ChartError.
pub type ChartResult<T> = Result<T, ChartError>;

/// Primary error type for kernel operations.
///
/// Preconditions are validated eagerly; operations fail fast with one of
/// these kinds rather than returning NaN or Infinity. Empty outputs (an
/// empty spline, a fully clipped polygon) are results, not errors.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ChartError {
    /// A caller-supplied value violates a documented precondition.
    #[error("Invalid argument for '{param}': {message}")]
    InvalidArgument { param: &'static str, message: String },

    /// Geometry too degenerate to compute with (e.g. a zero-length edge
    /// where an intercept is required).
    #[error("Degenerate geometry: {0}")]
    DegenerateGeometry(String),

    /// The requested operation has no defined result.
    #[error("Unsupported operation: {0}")]
    Unsupported(String),
}

impl ChartError {
    /// Shorthand for an [`ChartError::InvalidArgument`] with a formatted message.
    pub fn invalid(param: &'static str, message: impl Into<String>) -> Self {
        ChartError::InvalidArgument {
            param,
            message: message.into(),
        }
    }
}
