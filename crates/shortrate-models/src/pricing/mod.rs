//! Pricers that value instruments on a calibrated lattice.
//!
//! Every function here takes the lattice by shared reference and leaves it
//! untouched, so one lattice can serve many instruments concurrently.

pub mod bond_option;
pub mod callable;
pub mod zero_bond_option;

pub use bond_option::{coupon_bond_option, european_coupon_bond_option};
pub use callable::callable_puttable_bond;
pub use zero_bond_option::european_zero_coupon_bond_option;
