//! Sequential curve bootstrapping.
//!
//! Both bootstrappers add one curve node per calibrating instrument, in
//! maturity order, and solve for the node value that reprices the
//! instrument given every node before it.
//!
//! - [`IborCurve`]: discount factors from deposits, FRAs and swaps
//! - [`CreditCurve`]: survival probabilities from CDS quotes, on top of an
//!   [`IborCurve`]
//!
//! # Example
//!
//! ```rust
//! use strata_core::daycounts::DayCountConvention;
//! use strata_core::types::{Date, Tenor};
//! use strata_curves::bootstrap::{IborCurve, IborCurveConfig};
//! use strata_curves::instruments::IborDeposit;
//!
//! let valuation = Date::from_ymd(2018, 6, 6).unwrap();
//! let deposit = IborDeposit::from_tenor(
//!     valuation,
//!     Tenor::parse("3M").unwrap(),
//!     0.0231381,
//!     DayCountConvention::Act360,
//! )
//! .unwrap();
//!
//! let config = IborCurveConfig::default();
//! let curve = IborCurve::new(valuation, vec![deposit.clone()], vec![], vec![], config).unwrap();
//! let df = curve.discount_factor(deposit.maturity());
//! assert!((df - deposit.maturity_df()).abs() < 1e-12);
//! ```

mod credit;
mod ibor;

pub use credit::{CreditCurve, CreditCurveConfig};
pub use ibor::{IborCurve, IborCurveConfig};

use strata_math::solvers::{AllowedSolution, BracketingSolver, Brent, SolverConfig};
use strata_math::MathResult;

/// Solves for a node value inside `[lower, upper]`, returning the bracket
/// end where the objective is non-negative.
pub(crate) fn solve_node<F>(
    lower: f64,
    upper: f64,
    tolerance: f64,
    max_iterations: u32,
    objective: F,
) -> MathResult<f64>
where
    F: Fn(f64) -> f64,
{
    Brent::new(SolverConfig::new(tolerance, max_iterations))
        .with_side(AllowedSolution::AboveSide)
        .solve(lower, upper, objective)
}
