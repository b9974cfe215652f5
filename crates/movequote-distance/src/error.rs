//! Distance source errors.

use thiserror::Error;

/// Why a single distance source could not produce a distance.
///
/// These never reach the pricing core; the resolver logs them and moves on
/// to the next source.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DistanceError {
    /// The source has nothing to offer for this request.
    #[error("{source_name} is not configured")]
    NotConfigured { source_name: String },

    /// A coordinate is outside the valid range.
    #[error("Invalid coordinate: {0}")]
    InvalidCoordinate(String),

    /// The source produced a distance the core would reject.
    #[error("{source_name} returned an unusable distance: {value}")]
    InvalidDistance { source_name: String, value: f64 },
}

/// Convenience type alias for Results with DistanceError.
pub type DistanceResult<T> = Result<T, DistanceError>;
