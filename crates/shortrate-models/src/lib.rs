//! # Shortrate Models
//!
//! One-factor Hull-White short-rate model on a trinomial lattice.
//!
//! The model `dr = (θ(t) - a r) dt + σ dW` is discretised on a recombining
//! trinomial lattice whose drift is fitted column by column so that it
//! reproduces an input discount curve exactly. Instruments are then valued
//! by backward induction, with closed-form prices alongside as a check.
//!
//! - **Lattice**: Geometry, forward calibration of the drift and
//!   Arrow-Debreu prices, backward induction
//! - **Tree pricers**: Zero-coupon and coupon bond options (European and
//!   American), callable and puttable bonds
//! - **Analytic pricers**: Zero-coupon bond options and Jamshidian's
//!   decomposition for coupon bond options
//! - **Facade**: [`HullWhiteModel`] holding the current lattice
//!
//! ## Quick Start
//!
//! ```rust
//! use shortrate_curves::DiscountCurve;
//! use shortrate_models::prelude::*;
//!
//! let curve = DiscountCurve::from_zero_rates(vec![0.0, 10.0], vec![0.05, 0.05]).unwrap();
//! let params = HullWhiteParams::new(0.01, 0.1, 200).unwrap();
//! let lattice = TrinomialLattice::build(&params, 2.0, &curve).unwrap();
//!
//! let tree = european_zero_coupon_bond_option(&lattice, 2.0, 6.0, 81.0, 100.0).unwrap();
//! let closed = zero_coupon_bond_option(0.01, 0.1, 2.0, 6.0, 81.0, 100.0, &curve).unwrap();
//! assert!((tree.put - closed.put).abs() < 0.02);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod analytic;
pub mod error;
pub mod instruments;
pub mod lattice;
pub mod model;
pub mod params;
pub mod pricing;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::analytic::{
        coupon_bond_option as jamshidian_coupon_bond_option, zero_coupon_bond_option,
    };
    pub use crate::error::{ModelError, ModelResult};
    pub use crate::instruments::{
        CallablePuttableValue, CashflowSchedule, EmbeddedOptionSchedule, ExerciseStyle,
        OptionValue,
    };
    pub use crate::lattice::{BackwardInductor, BranchType, TrinomialLattice};
    pub use crate::model::HullWhiteModel;
    pub use crate::params::HullWhiteParams;
    pub use crate::pricing::{
        callable_puttable_bond, coupon_bond_option, european_coupon_bond_option,
        european_zero_coupon_bond_option,
    };
}

pub use error::{ModelError, ModelResult};
pub use instruments::{
    CallablePuttableValue, CashflowSchedule, EmbeddedOptionSchedule, ExerciseStyle, OptionValue,
};
pub use lattice::TrinomialLattice;
pub use model::HullWhiteModel;
pub use params::HullWhiteParams;
