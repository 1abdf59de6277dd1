//! # Shortrate Math
//!
//! Numerical utilities for the shortrate lattice pricing library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finders (Brent, Bisection) and bracket expansion
//! - **Interpolation**: Log-linear interpolation of discount factors
//! - **Distributions**: Standard normal CDF for closed-form option formulas
//!
//! ## Design Philosophy
//!
//! - **Numerical Stability**: Careful handling of edge cases
//! - **Explicit errors**: Every failure mode surfaces as a [`MathError`]

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::uninlined_format_args)]

pub mod distributions;
pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::distributions::{normal_cdf, normal_pdf};
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{Interpolator, LogLinearInterpolator};
    pub use crate::solvers::{
        bisection, brent, expand_bracket, SolverConfig, SolverResult,
    };
}

pub use error::{MathError, MathResult};
