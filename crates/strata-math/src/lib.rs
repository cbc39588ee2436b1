//! # Strata Math
//!
//! Numerical building blocks for the Strata term-structure library.
//!
//! This crate provides:
//!
//! - **Solvers**: Bracketing root finders (Brent with side selection)
//! - **Interpolation**: Linear, natural cubic and monotone Hermite
//!   interpolators, plus the discount-curve schemes used by the bootstrapper
//!
//! All numerics are `f64`.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::uninlined_format_args)]

pub mod error;
pub mod interpolation;
pub mod solvers;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::error::{MathError, MathResult};
    pub use crate::interpolation::{
        CurveInterpolator, InterpolationScheme, Interpolator, LinearInterpolator, MonotoneHermite,
        NaturalCubicSpline,
    };
    pub use crate::solvers::{
        brent, brent_with_side, AllowedSolution, BracketingSolver, Brent, SolverConfig,
        SolverResult,
    };
}

pub use error::{MathError, MathResult};
