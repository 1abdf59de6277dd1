//! Hull-White model parameters.

use serde::{Deserialize, Serialize};

use crate::error::{require_non_negative, require_positive, ModelError, ModelResult};

/// Parameters of the one-factor Hull-White model
/// `dr = (θ(t) - a r) dt + σ dW` and of its lattice discretisation.
///
/// # Example
///
/// ```rust
/// use shortrate_models::HullWhiteParams;
///
/// let params = HullWhiteParams::new(0.01, 0.1, 100).unwrap();
/// assert_eq!(params.num_time_steps(), 100);
///
/// assert!(HullWhiteParams::new(0.0, 0.1, 100).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct HullWhiteParams {
    sigma: f64,
    mean_reversion: f64,
    num_time_steps: usize,
}

impl HullWhiteParams {
    /// Creates validated parameters.
    ///
    /// # Arguments
    ///
    /// * `sigma` - Short-rate volatility, strictly positive
    /// * `mean_reversion` - Mean reversion speed `a`, zero or positive
    /// * `num_time_steps` - Number of lattice time steps, at least one
    pub fn new(sigma: f64, mean_reversion: f64, num_time_steps: usize) -> ModelResult<Self> {
        let params = Self {
            sigma,
            mean_reversion,
            num_time_steps,
        };
        params.validate()?;
        Ok(params)
    }

    /// Checks every parameter; deserialized values are not validated until
    /// this runs.
    pub fn validate(&self) -> ModelResult<()> {
        require_positive("sigma", self.sigma)?;
        require_non_negative("mean_reversion", self.mean_reversion)?;
        if self.num_time_steps == 0 {
            return Err(ModelError::invalid_parameter(
                "num_time_steps",
                0.0,
                "must be at least 1",
            ));
        }
        Ok(())
    }

    /// Returns a copy with a different number of time steps.
    pub fn with_time_steps(self, num_time_steps: usize) -> ModelResult<Self> {
        Self::new(self.sigma, self.mean_reversion, num_time_steps)
    }

    /// Short-rate volatility.
    #[must_use]
    pub fn sigma(&self) -> f64 {
        self.sigma
    }

    /// Mean reversion speed.
    #[must_use]
    pub fn mean_reversion(&self) -> f64 {
        self.mean_reversion
    }

    /// Number of lattice time steps.
    #[must_use]
    pub fn num_time_steps(&self) -> usize {
        self.num_time_steps
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_valid_params() {
        let params = HullWhiteParams::new(0.01, 0.0, 1).unwrap();
        assert!((params.sigma() - 0.01).abs() < f64::EPSILON);
        assert!(params.mean_reversion().abs() < f64::EPSILON);
    }

    #[test]
    fn test_invalid_params() {
        assert!(matches!(
            HullWhiteParams::new(-0.01, 0.1, 10),
            Err(ModelError::InvalidParameter { name: "sigma", .. })
        ));
        assert!(matches!(
            HullWhiteParams::new(0.01, -0.1, 10),
            Err(ModelError::InvalidParameter { name: "mean_reversion", .. })
        ));
        assert!(matches!(
            HullWhiteParams::new(0.01, 0.1, 0),
            Err(ModelError::InvalidParameter { name: "num_time_steps", .. })
        ));
        assert!(HullWhiteParams::new(f64::NAN, 0.1, 10).is_err());
    }

    #[test]
    fn test_serde_round_trip() {
        let json = r#"{"sigma":0.01,"mean_reversion":0.1,"num_time_steps":50}"#;
        let params: HullWhiteParams = serde_json::from_str(json).unwrap();
        assert_eq!(params, HullWhiteParams::new(0.01, 0.1, 50).unwrap());
    }

    #[test]
    fn test_deserialized_values_validated_on_demand() {
        let json = r#"{"sigma":0.0,"mean_reversion":0.1,"num_time_steps":50}"#;
        let params: HullWhiteParams = serde_json::from_str(json).unwrap();
        assert!(params.validate().is_err());
    }
}
