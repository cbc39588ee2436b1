//! Root-finding algorithms.
//!
//! Curve bootstrapping solves one unknown per instrument inside a known
//! bracket, so the solvers here are bracketing methods:
//!
//! - [`brent`]: Brent's method returning the best estimate from either side
//! - [`brent_with_side`]: Brent's method constrained to one side of the root
//! - [`Brent`]: A configured Brent solver behind the [`BracketingSolver`] trait
//!
//! # Side Selection
//!
//! A bracketing method ends with an interval `[x0, x1]` around the root
//! whose width is below the tolerance. [`AllowedSolution`] picks which end
//! of that interval is reported. `AboveSide` returns the end where the
//! objective is non-negative, which keeps bootstrapped discount factors on
//! a consistent side of the exact root from node to node.
//!
//! # Example
//!
//! ```rust
//! use strata_math::solvers::{AllowedSolution, BracketingSolver, Brent, SolverConfig};
//!
//! let solver = Brent::new(SolverConfig::default()).with_side(AllowedSolution::AboveSide);
//! let root = solver.solve(1.0, 2.0, |x: f64| x * x - 2.0).unwrap();
//! assert!((root - std::f64::consts::SQRT_2).abs() < 1e-9);
//! assert!(root * root - 2.0 >= 0.0);
//! ```

mod brent;

pub use brent::{brent, brent_with_side};

use serde::{Deserialize, Serialize};

use crate::error::MathResult;

/// Default tolerance for root-finding algorithms.
pub const DEFAULT_TOLERANCE: f64 = 1e-10;

/// Default maximum iterations for root-finding algorithms.
pub const DEFAULT_MAX_ITERATIONS: u32 = 100;

/// Configuration for root-finding algorithms.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SolverConfig {
    /// Tolerance for convergence.
    pub tolerance: f64,
    /// Maximum number of iterations.
    pub max_iterations: u32,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
        }
    }
}

impl SolverConfig {
    /// Creates a new solver configuration.
    #[must_use]
    pub fn new(tolerance: f64, max_iterations: u32) -> Self {
        Self {
            tolerance,
            max_iterations,
        }
    }

    /// Sets the tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the maximum iterations.
    #[must_use]
    pub fn with_max_iterations(mut self, max_iterations: u32) -> Self {
        self.max_iterations = max_iterations;
        self
    }
}

/// Which end of the final bracket a solver reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum AllowedSolution {
    /// The end with the smaller residual.
    #[default]
    Any,
    /// The end where `f(x) >= 0`.
    AboveSide,
    /// The end where `f(x) <= 0`.
    BelowSide,
}

/// Result of a root-finding iteration.
#[derive(Debug, Clone, Copy)]
pub struct SolverResult {
    /// The root found.
    pub root: f64,
    /// Number of iterations used.
    pub iterations: u32,
    /// Final residual (function value at root).
    pub residual: f64,
}

/// A root finder that works inside a sign-changing bracket.
pub trait BracketingSolver {
    /// Finds a root of `f` in `[lo, hi]`.
    ///
    /// # Errors
    ///
    /// Returns `MathError::InvalidBracket` if `f(lo)` and `f(hi)` have the
    /// same sign, or `MathError::ConvergenceFailed` if the iteration budget
    /// is exhausted.
    fn solve<F>(&self, lo: f64, hi: f64, f: F) -> MathResult<f64>
    where
        F: Fn(f64) -> f64;
}

/// Brent's method with a fixed configuration and side selection.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Brent {
    config: SolverConfig,
    side: AllowedSolution,
}

impl Brent {
    /// Creates a solver with the given configuration, reporting either side.
    #[must_use]
    pub fn new(config: SolverConfig) -> Self {
        Self {
            config,
            side: AllowedSolution::Any,
        }
    }

    /// Sets which side of the root is reported.
    #[must_use]
    pub fn with_side(mut self, side: AllowedSolution) -> Self {
        self.side = side;
        self
    }

    /// Returns the solver configuration.
    #[must_use]
    pub fn config(&self) -> &SolverConfig {
        &self.config
    }

    /// Returns the side selection.
    #[must_use]
    pub fn side(&self) -> AllowedSolution {
        self.side
    }
}

impl BracketingSolver for Brent {
    fn solve<F>(&self, lo: f64, hi: f64, f: F) -> MathResult<f64>
    where
        F: Fn(f64) -> f64,
    {
        brent_with_side(f, lo, hi, self.side, &self.config).map(|r| r.root)
    }
}
