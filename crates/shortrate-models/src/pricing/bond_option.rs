//! Options on coupon bonds priced on the lattice.

use crate::analytic::AffineBondPrice;
use crate::error::{require_non_negative, require_positive, ModelError, ModelResult};
use crate::instruments::{CashflowSchedule, ExerciseStyle, OptionValue};
use crate::lattice::{step_cashflows, BackwardInductor, TrinomialLattice};

/// Relative distance from a lattice step within which an expiry counts as
/// on the step.
const GRID_TOLERANCE: f64 = 1e-9;

/// European coupon bond option valued at the expiry column only.
///
/// The bond price at each expiry node is the sum over flows paid at or after
/// `expiry` of the lattice-consistent affine zero price, so the lattice
/// only needs to reach `expiry`. Payoffs are discounted with the expiry
/// column's Arrow-Debreu prices.
///
/// `expiry` must fall on a lattice step; build the lattice with `expiry`
/// as its horizon, or with a step size dividing it.
///
/// # Errors
///
/// - [`ModelError::InvalidParameter`] for a non-positive strike or face, an
///   expiry at or after the final flow, or an expiry between lattice steps
/// - [`ModelError::BeyondHorizon`] if the lattice does not reach `expiry`
pub fn european_coupon_bond_option(
    lattice: &TrinomialLattice,
    expiry: f64,
    strike: f64,
    face: f64,
    schedule: &CashflowSchedule,
) -> ModelResult<OptionValue> {
    check_option_inputs(expiry, strike, face, schedule)?;

    let expiry_step = lattice.step_for_time(expiry)?;
    let node_time = lattice.time_at(expiry_step);
    if (node_time - expiry).abs() > GRID_TOLERANCE * expiry.max(1.0) {
        return Err(ModelError::invalid_parameter(
            "expiry",
            expiry,
            format!("falls between lattice steps (nearest is t = {node_time})"),
        ));
    }
    let params = lattice.params();
    let legs = schedule
        .flows_from(expiry)
        .map(|(maturity, amount)| {
            AffineBondPrice::lattice_consistent(
                params.sigma(),
                params.mean_reversion(),
                node_time,
                maturity,
                lattice.dt(),
                lattice.curve(),
            )
            .map(|formula| (formula, amount))
        })
        .collect::<ModelResult<Vec<_>>>()?;

    let g = lattice.geometry();
    let rates = lattice.rates().row(expiry_step);
    let inductor = BackwardInductor::new(lattice);
    let bond = inductor.column_at(expiry_step, |j| {
        let rate = rates[g.index(j)];
        face * legs
            .iter()
            .map(|(formula, amount)| amount * formula.price(rate))
            .sum::<f64>()
    });

    let call = inductor.column_at(expiry_step, |j| (bond[g.index(j)] - strike).max(0.0));
    let put = inductor.column_at(expiry_step, |j| (strike - bond[g.index(j)]).max(0.0));

    Ok(OptionValue {
        call: lattice.present_value_at(expiry_step, &call),
        put: lattice.present_value_at(expiry_step, &put),
    })
}

/// Coupon bond option valued by rolling the whole bond back through the
/// lattice.
///
/// The lattice must reach the final flow. Bond values are cum-coupon: a
/// flow paid at a step is included in that step's value. The call and put
/// are rolled back alongside the bond; with [`ExerciseStyle::American`]
/// they may be exercised at every step from the root up to `expiry`.
///
/// # Errors
///
/// - [`ModelError::InvalidParameter`] for a non-positive strike or face, or
///   an expiry at or after the final flow
/// - [`ModelError::BeyondHorizon`] if the lattice does not reach the final
///   flow
pub fn coupon_bond_option(
    lattice: &TrinomialLattice,
    expiry: f64,
    strike: f64,
    face: f64,
    schedule: &CashflowSchedule,
    style: ExerciseStyle,
) -> ModelResult<OptionValue> {
    check_option_inputs(expiry, strike, face, schedule)?;

    let final_step = lattice.step_for_time(schedule.final_time())?;
    let expiry_step = lattice.step_for_time(expiry)?;
    if expiry_step >= final_step {
        return Err(ModelError::invalid_parameter(
            "expiry",
            expiry,
            "falls on the lattice step of the final cashflow",
        ));
    }
    let flows: Vec<f64> = step_cashflows(lattice, schedule.flows_from(0.0))?
        .into_iter()
        .map(|cf| cf * face)
        .collect();

    let g = lattice.geometry();
    let inductor = BackwardInductor::new(lattice);
    let mut bond = inductor.column_at(final_step, |_| flows[final_step]);
    let mut call = inductor.empty_column();
    let mut put = inductor.empty_column();
    let mut scratch = inductor.empty_column();

    for m in (0..final_step).rev() {
        inductor.step_back(m, &bond, &mut scratch);
        std::mem::swap(&mut bond, &mut scratch);
        for j in g.states(m) {
            bond[g.index(j)] += flows[m];
        }

        if m > expiry_step {
            continue;
        }
        if m < expiry_step {
            inductor.step_back(m, &call, &mut scratch);
            std::mem::swap(&mut call, &mut scratch);
            inductor.step_back(m, &put, &mut scratch);
            std::mem::swap(&mut put, &mut scratch);
        }

        let exercisable = m == expiry_step || style == ExerciseStyle::American;
        if exercisable {
            for j in g.states(m) {
                let slot = g.index(j);
                call[slot] = call[slot].max(bond[slot] - strike);
                put[slot] = put[slot].max(strike - bond[slot]);
            }
        }
    }

    tracing::debug!(
        expiry_step,
        final_step,
        style = ?style,
        bond = inductor.root_value(&bond),
        "rolled back coupon bond option"
    );

    Ok(OptionValue {
        call: inductor.root_value(&call),
        put: inductor.root_value(&put),
    })
}

fn check_option_inputs(
    expiry: f64,
    strike: f64,
    face: f64,
    schedule: &CashflowSchedule,
) -> ModelResult<()> {
    require_non_negative("expiry", expiry)?;
    require_positive("strike", strike)?;
    require_positive("face", face)?;
    if expiry >= schedule.final_time() {
        return Err(ModelError::invalid_parameter(
            "expiry",
            expiry,
            format!("must precede the final cashflow at {}", schedule.final_time()),
        ));
    }
    Ok(())
}
