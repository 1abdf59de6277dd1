//! Error types for model construction and pricing.

use shortrate_curves::CurveError;
use thiserror::Error;

/// A specialized Result type for model operations.
pub type ModelResult<T> = Result<T, ModelError>;

/// Errors raised while building lattices or pricing on them.
///
/// [`ModelError::InvalidParameter`] and [`ModelError::MalformedCurve`] are
/// caller errors and are reported before any numerical work starts.
/// [`ModelError::CalibrationFailure`] and [`ModelError::RootFindFailure`]
/// come out of the numerics and carry enough context to adjust the inputs.
#[derive(Error, Debug, Clone)]
pub enum ModelError {
    /// A scalar input is out of its valid domain.
    #[error("Invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Description of the constraint.
        reason: String,
    },

    /// The discount curve failed validation or a curve query failed.
    #[error("Malformed curve: {0}")]
    MalformedCurve(#[from] CurveError),

    /// A branch probability or drift was invalid while building the lattice.
    #[error("Calibration failed at step {step}, state {state}: {reason}")]
    CalibrationFailure {
        /// Time step index.
        step: usize,
        /// State index `j`.
        state: i64,
        /// Description of the failure.
        reason: String,
    },

    /// The critical rate search did not bracket or converge.
    #[error("Root search failed on [{lower}, {upper}]: {reason}")]
    RootFindFailure {
        /// Lower end of the last bracket tried.
        lower: f64,
        /// Upper end of the last bracket tried.
        upper: f64,
        /// Description of the failure.
        reason: String,
    },

    /// A tree pricer was called before a lattice was built.
    #[error("No lattice has been built")]
    TreeNotBuilt,

    /// A required time maps past the last lattice column.
    #[error("Time {time} lies beyond the lattice horizon {horizon}")]
    BeyondHorizon {
        /// Requested time in years.
        time: f64,
        /// Lattice horizon in years.
        horizon: f64,
    },
}

impl ModelError {
    /// Creates an invalid parameter error.
    #[must_use]
    pub fn invalid_parameter(name: &'static str, value: f64, reason: impl Into<String>) -> Self {
        Self::InvalidParameter {
            name,
            value,
            reason: reason.into(),
        }
    }

    /// Creates a calibration failure error.
    #[must_use]
    pub fn calibration_failure(step: usize, state: i64, reason: impl Into<String>) -> Self {
        Self::CalibrationFailure {
            step,
            state,
            reason: reason.into(),
        }
    }

    /// Creates a root search failure error.
    #[must_use]
    pub fn root_find_failure(lower: f64, upper: f64, reason: impl Into<String>) -> Self {
        Self::RootFindFailure {
            lower,
            upper,
            reason: reason.into(),
        }
    }
}

/// Checks that `value` is finite and strictly positive.
pub(crate) fn require_positive(name: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value > 0.0 {
        Ok(())
    } else {
        Err(ModelError::invalid_parameter(name, value, "must be positive and finite"))
    }
}

/// Checks that `value` is finite and not negative.
pub(crate) fn require_non_negative(name: &'static str, value: f64) -> ModelResult<()> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(ModelError::invalid_parameter(name, value, "must be non-negative and finite"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::invalid_parameter("sigma", -0.01, "must be positive");
        assert_eq!(err.to_string(), "Invalid parameter sigma = -0.01: must be positive");

        let err = ModelError::calibration_failure(4, -4, "pd = 1.2");
        assert!(err.to_string().contains("step 4, state -4"));
    }

    #[test]
    fn test_curve_error_converts() {
        let err: ModelError = CurveError::insufficient_points(2, 1).into();
        assert!(matches!(err, ModelError::MalformedCurve(_)));
    }

    #[test]
    fn test_require_helpers() {
        assert!(require_positive("face", 100.0).is_ok());
        assert!(require_positive("face", 0.0).is_err());
        assert!(require_positive("face", f64::INFINITY).is_err());
        assert!(require_non_negative("a", 0.0).is_ok());
        assert!(require_non_negative("a", -1e-9).is_err());
    }
}
