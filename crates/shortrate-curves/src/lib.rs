//! # Shortrate Curves
//!
//! Discount curves for the shortrate lattice pricing library.
//!
//! Curves are supplied externally as plain `(time, discount factor)` arrays;
//! this crate validates them and answers discount factor, zero rate and
//! forward queries at arbitrary year fractions.
//!
//! - **Validation**: Strictly increasing times from at or before zero,
//!   positive and non-increasing discount factors
//! - **Interpolation**: Log-linear in the discount factor (flat forwards),
//!   continued past either end of the pillars
//!
//! ## Quick Start
//!
//! ```rust
//! use shortrate_curves::prelude::*;
//!
//! let curve = DiscountCurve::new(
//!     vec![0.0, 0.5, 1.0, 2.0],
//!     vec![1.0, 0.985, 0.97, 0.94],
//! )
//! .unwrap();
//!
//! let df = curve.discount_factor(0.75).unwrap();
//! let fwd = curve.instantaneous_forward(1.5).unwrap();
//! assert!(df > 0.97 && df < 0.985);
//! assert!(fwd > 0.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]

pub mod discount;
pub mod error;
pub mod validation;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::discount::DiscountCurve;
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::validation::validate_pillars;
}

pub use discount::DiscountCurve;
pub use error::{CurveError, CurveResult};
