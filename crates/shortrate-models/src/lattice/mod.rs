//! Trinomial lattice construction and backward induction.
//!
//! - [`geometry`]: step sizes, state bounds and branch probabilities
//! - [`tree`]: the calibrated lattice
//! - [`rollback`]: discounting value columns back through the lattice

mod calibration;
pub mod geometry;
pub mod rollback;
pub mod tree;

pub use geometry::{BranchProbabilities, BranchType, LatticeGeometry};
pub use rollback::{step_cashflows, BackwardInductor};
pub use tree::TrinomialLattice;
