//! Error types for curve operations.

use shortrate_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve construction and queries.
#[derive(Error, Debug, Clone)]
pub enum CurveError {
    /// Not enough pillars to interpolate.
    #[error("Insufficient points: need at least {required}, got {got}")]
    InsufficientPoints {
        /// Minimum required points.
        required: usize,
        /// Actual number of points provided.
        got: usize,
    },

    /// Times and values arrays differ in length.
    #[error("Length mismatch: {times} times but {values} values")]
    LengthMismatch {
        /// Number of times supplied.
        times: usize,
        /// Number of discount factors or rates supplied.
        values: usize,
    },

    /// A pillar contains NaN or an infinity.
    #[error("Non-finite {field} at index {index}")]
    NonFinite {
        /// Which input array.
        field: &'static str,
        /// Index of the offending entry.
        index: usize,
    },

    /// Pillar times are not strictly increasing.
    #[error("Non-monotonic times at index {index}: {prev:.6} >= {current:.6}")]
    NonMonotonicTimes {
        /// Index where monotonicity violation occurred.
        index: usize,
        /// Previous time.
        prev: f64,
        /// Current time.
        current: f64,
    },

    /// The first pillar lies after the valuation origin.
    #[error("Curve must start at or before t=0, first pillar is at {first:.6}")]
    StartsAfterOrigin {
        /// Time of the first pillar.
        first: f64,
    },

    /// A discount factor is zero or negative.
    #[error("Non-positive discount factor {value} at index {index}")]
    NonPositiveDiscountFactor {
        /// Index of the offending pillar.
        index: usize,
        /// The discount factor.
        value: f64,
    },

    /// Discount factors increase between two pillars.
    #[error("Increasing discount factor at index {index}: {prev:.10} < {current:.10}")]
    IncreasingDiscountFactor {
        /// Index of the offending pillar.
        index: usize,
        /// Discount factor at the previous pillar.
        prev: f64,
        /// Discount factor at this pillar.
        current: f64,
    },

    /// A query time is NaN or infinite.
    #[error("Invalid query time: {time}")]
    InvalidTime {
        /// The requested time.
        time: f64,
    },

    /// Interpolation failed.
    #[error("Interpolation error: {0}")]
    Interpolation(#[from] MathError),
}

impl CurveError {
    /// Creates an insufficient points error.
    #[must_use]
    pub fn insufficient_points(required: usize, got: usize) -> Self {
        Self::InsufficientPoints { required, got }
    }

    /// Creates a non-monotonic times error.
    #[must_use]
    pub fn non_monotonic_times(index: usize, prev: f64, current: f64) -> Self {
        Self::NonMonotonicTimes {
            index,
            prev,
            current,
        }
    }
}
