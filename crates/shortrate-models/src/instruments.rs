//! Instrument data consumed by the pricers.
//!
//! Schedules arrive as plain year-fraction arrays produced elsewhere
//! (date rolling and day counts are not handled here). They are validated
//! once on construction and then read-only.

use serde::{Deserialize, Serialize};

use crate::error::{ModelError, ModelResult};

/// Coupon schedule of a bullet bond.
///
/// Amounts are per unit of face; the face itself is redeemed together with
/// the final coupon.
#[derive(Debug, Clone, PartialEq)]
pub struct CashflowSchedule {
    times: Vec<f64>,
    amounts: Vec<f64>,
}

impl CashflowSchedule {
    /// Creates a validated schedule.
    ///
    /// Times must be finite, non-negative and strictly increasing; amounts
    /// finite and non-negative. At least one flow is required.
    ///
    /// # Example
    ///
    /// ```rust
    /// use shortrate_models::CashflowSchedule;
    ///
    /// // Two-year bond paying 5% semi-annually
    /// let schedule = CashflowSchedule::new(
    ///     vec![0.5, 1.0, 1.5, 2.0],
    ///     vec![0.025; 4],
    /// ).unwrap();
    /// assert!((schedule.final_time() - 2.0).abs() < 1e-12);
    /// ```
    pub fn new(times: Vec<f64>, amounts: Vec<f64>) -> ModelResult<Self> {
        if times.is_empty() {
            return Err(ModelError::invalid_parameter(
                "coupon_times",
                0.0,
                "at least one cashflow is required",
            ));
        }
        check_lengths("coupon_flows", times.len(), amounts.len())?;
        check_times("coupon_times", &times)?;
        if let Some(&amount) = amounts.iter().find(|a| !a.is_finite() || **a < 0.0) {
            return Err(ModelError::invalid_parameter(
                "coupon_flows",
                amount,
                "cashflows must be finite and non-negative",
            ));
        }
        Ok(Self { times, amounts })
    }

    /// Payment times in years.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Payment amounts per unit face.
    #[must_use]
    pub fn amounts(&self) -> &[f64] {
        &self.amounts
    }

    /// Time of the final payment, when the face is redeemed.
    #[must_use]
    pub fn final_time(&self) -> f64 {
        self.times[self.times.len() - 1]
    }

    /// Flows per unit face paid at or after `t`, with the face added to the
    /// final one.
    pub fn flows_from(&self, t: f64) -> impl Iterator<Item = (f64, f64)> + '_ {
        let last = self.times.len() - 1;
        self.times
            .iter()
            .zip(&self.amounts)
            .enumerate()
            .filter(move |(_, (&time, _))| time >= t)
            .map(move |(i, (&time, &amount))| {
                let redemption = if i == last { 1.0 } else { 0.0 };
                (time, amount + redemption)
            })
    }
}

/// Exercise schedule of an embedded call or put.
///
/// Prices are on the same face basis as the bond value they cap or floor.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct EmbeddedOptionSchedule {
    times: Vec<f64>,
    prices: Vec<f64>,
}

impl EmbeddedOptionSchedule {
    /// Creates a validated schedule; an empty schedule means no option.
    pub fn new(times: Vec<f64>, prices: Vec<f64>) -> ModelResult<Self> {
        check_lengths("exercise_prices", times.len(), prices.len())?;
        check_times("exercise_times", &times)?;
        if let Some(&price) = prices.iter().find(|p| !p.is_finite() || **p <= 0.0) {
            return Err(ModelError::invalid_parameter(
                "exercise_prices",
                price,
                "exercise prices must be positive and finite",
            ));
        }
        Ok(Self { times, prices })
    }

    /// A schedule with no exercise dates.
    #[must_use]
    pub fn none() -> Self {
        Self::default()
    }

    /// Exercise times in years.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Exercise prices.
    #[must_use]
    pub fn prices(&self) -> &[f64] {
        &self.prices
    }

    /// Returns true if there are no exercise dates.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }
}

/// Exercise style of a bond option priced by full rollback.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseStyle {
    /// Exercise only at expiry.
    European,
    /// Exercise at any lattice step up to expiry.
    American,
}

/// Call and put values of an option.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct OptionValue {
    /// Call value.
    pub call: f64,
    /// Put value.
    pub put: f64,
}

impl OptionValue {
    /// Scales both legs.
    #[must_use]
    pub fn scaled(self, factor: f64) -> Self {
        Self {
            call: self.call * factor,
            put: self.put * factor,
        }
    }
}

/// Value of a bond with embedded options alongside the same bond without
/// them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CallablePuttableValue {
    /// Value including the call and put features.
    pub with_options: f64,
    /// Value of the straight bond.
    pub straight: f64,
}

impl CallablePuttableValue {
    /// Net value of the embedded options to the holder.
    #[must_use]
    pub fn option_value(&self) -> f64 {
        self.with_options - self.straight
    }
}

fn check_lengths(name: &'static str, times: usize, values: usize) -> ModelResult<()> {
    if times == values {
        Ok(())
    } else {
        Err(ModelError::invalid_parameter(
            name,
            values as f64,
            format!("expected {times} entries to match the times array"),
        ))
    }
}

fn check_times(name: &'static str, times: &[f64]) -> ModelResult<()> {
    if let Some(&t) = times.iter().find(|t| !t.is_finite() || **t < 0.0) {
        return Err(ModelError::invalid_parameter(
            name,
            t,
            "times must be finite and non-negative",
        ));
    }
    if let Some(pair) = times.windows(2).find(|w| w[1] <= w[0]) {
        return Err(ModelError::invalid_parameter(
            name,
            pair[1],
            "times must be strictly increasing",
        ));
    }
    Ok(())
}
