//! Closed-form Hull-White prices.
//!
//! These are pure functions of the model parameters and the discount
//! curve; no lattice is involved. They serve as the cross-check for the
//! tree pricers.

pub mod jamshidian;
pub mod zero_bond;

pub use jamshidian::coupon_bond_option;
pub use zero_bond::{b_factor, zero_coupon_bond_option, AffineBondPrice};
