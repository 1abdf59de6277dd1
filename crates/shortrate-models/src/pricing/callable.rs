//! Bonds with embedded call and put schedules.

use crate::error::{require_positive, ModelError, ModelResult};
use crate::instruments::{CallablePuttableValue, CashflowSchedule, EmbeddedOptionSchedule};
use crate::lattice::{step_cashflows, BackwardInductor, TrinomialLattice};

/// Values a bond whose issuer may call it and whose holder may put it.
///
/// At each step the held value is the discounted expectation of the next
/// column. On a call step it is capped at the call price, on a put step it
/// is floored at the put price, and then the flow due at the step is added.
/// Exercise prices therefore apply to the ex-coupon value. The straight bond
/// is rolled back separately for comparison.
///
/// Exercise dates are mapped to the nearest lattice step; when several land
/// on one step the issuer's lowest call and the holder's highest put apply.
/// Exercise on the step of the final flow has no effect.
///
/// # Errors
///
/// - [`ModelError::InvalidParameter`] for a non-positive face or an
///   exercise date after the final flow
/// - [`ModelError::BeyondHorizon`] if the lattice does not reach the final
///   flow
pub fn callable_puttable_bond(
    lattice: &TrinomialLattice,
    schedule: &CashflowSchedule,
    calls: &EmbeddedOptionSchedule,
    puts: &EmbeddedOptionSchedule,
    face: f64,
) -> ModelResult<CallablePuttableValue> {
    require_positive("face", face)?;

    let final_step = lattice.step_for_time(schedule.final_time())?;
    let flows: Vec<f64> = step_cashflows(lattice, schedule.flows_from(0.0))?
        .into_iter()
        .map(|cf| cf * face)
        .collect();

    let call_prices = exercise_by_step(lattice, schedule, calls, f64::min)?;
    let put_prices = exercise_by_step(lattice, schedule, puts, f64::max)?;

    let inductor = BackwardInductor::new(lattice);
    let terminal = inductor.column_at(final_step, |_| flows[final_step]);

    let straight = inductor.roll_back(final_step, 0, terminal.clone(), |m, _, hold| hold + flows[m]);
    let with_options = inductor.roll_back(final_step, 0, terminal, |m, _, hold| {
        let mut value = hold;
        if let Some(call) = call_prices[m] {
            value = value.min(call);
        }
        if let Some(put) = put_prices[m] {
            value = value.max(put);
        }
        value + flows[m]
    });

    let value = CallablePuttableValue {
        with_options: inductor.root_value(&with_options),
        straight: inductor.root_value(&straight),
    };
    tracing::debug!(
        with_options = value.with_options,
        straight = value.straight,
        calls = calls.times().len(),
        puts = puts.times().len(),
        "valued callable/puttable bond"
    );
    Ok(value)
}

/// Exercise price per lattice step, merging dates that share a step.
fn exercise_by_step(
    lattice: &TrinomialLattice,
    schedule: &CashflowSchedule,
    exercise: &EmbeddedOptionSchedule,
    merge: fn(f64, f64) -> f64,
) -> ModelResult<Vec<Option<f64>>> {
    let mut by_step = vec![None; lattice.num_steps() + 1];
    for (&t, &price) in exercise.times().iter().zip(exercise.prices()) {
        if t > schedule.final_time() {
            return Err(ModelError::invalid_parameter(
                "exercise_times",
                t,
                format!("after the final cashflow at {}", schedule.final_time()),
            ));
        }
        let slot: &mut Option<f64> = &mut by_step[lattice.step_for_time(t)?];
        *slot = Some(slot.map_or(price, |existing| merge(existing, price)));
    }
    Ok(by_step)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::params::HullWhiteParams;
    use approx::assert_relative_eq;
    use shortrate_curves::DiscountCurve;

    fn lattice(steps: usize) -> TrinomialLattice {
        let curve = DiscountCurve::from_zero_rates(vec![0.0, 10.0], vec![0.05, 0.05]).unwrap();
        let params = HullWhiteParams::new(0.02, 0.1, steps).unwrap();
        TrinomialLattice::build(&params, 10.0, &curve).unwrap()
    }

    fn ten_year_bond() -> CashflowSchedule {
        let times = (1..=20).map(|i| i as f64 * 0.5).collect();
        CashflowSchedule::new(times, vec![0.03; 20]).unwrap()
    }

    fn dates(prices: f64) -> EmbeddedOptionSchedule {
        EmbeddedOptionSchedule::new(vec![5.0, 6.0, 7.0, 8.0], vec![prices; 4]).unwrap()
    }

    #[test]
    fn test_no_options_equals_straight_discounting() {
        let lattice = lattice(200);
        let bond = ten_year_bond();
        let none = EmbeddedOptionSchedule::none();

        let value = callable_puttable_bond(&lattice, &bond, &none, &none, 100.0).unwrap();

        let expected: f64 = bond
            .flows_from(0.0)
            .map(|(t, cf)| 100.0 * cf * lattice.curve().discount_factor(t).unwrap())
            .sum();
        assert_relative_eq!(value.straight, expected, max_relative = 1e-10);
        assert_relative_eq!(value.with_options, value.straight, max_relative = 1e-14);
    }

    #[test]
    fn test_call_lowers_and_put_raises_value() {
        let lattice = lattice(200);
        let bond = ten_year_bond();
        let none = EmbeddedOptionSchedule::none();

        let callable = callable_puttable_bond(&lattice, &bond, &dates(100.0), &none, 100.0).unwrap();
        let puttable = callable_puttable_bond(&lattice, &bond, &none, &dates(98.0), 100.0).unwrap();

        assert!(callable.with_options < callable.straight);
        assert!(puttable.with_options > puttable.straight);
        assert!(callable.option_value() < 0.0);
    }

    #[test]
    fn test_out_of_reach_call_is_worthless() {
        let lattice = lattice(100);
        let bond = ten_year_bond();
        let none = EmbeddedOptionSchedule::none();

        let value = callable_puttable_bond(&lattice, &bond, &dates(1000.0), &none, 100.0).unwrap();
        assert_relative_eq!(value.with_options, value.straight, max_relative = 1e-14);
    }

    #[test]
    fn test_exercise_after_maturity_rejected() {
        let lattice = lattice(50);
        let bond = ten_year_bond();
        let late = EmbeddedOptionSchedule::new(vec![11.0], vec![100.0]).unwrap();

        assert!(matches!(
            callable_puttable_bond(&lattice, &bond, &late, &EmbeddedOptionSchedule::none(), 100.0),
            Err(ModelError::InvalidParameter { name: "exercise_times", .. })
        ));
    }

    #[test]
    fn test_exercise_dates_on_one_step_merge() {
        let lattice = lattice(10);
        let bond = ten_year_bond();
        let calls = EmbeddedOptionSchedule::new(vec![5.0, 5.2], vec![103.0, 101.0]).unwrap();

        let by_step = exercise_by_step(&lattice, &bond, &calls, f64::min).unwrap();
        assert_eq!(by_step[5], Some(101.0));
        assert_eq!(by_step.iter().filter(|p| p.is_some()).count(), 1);
    }
}
