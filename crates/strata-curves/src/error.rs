//! Error types for curve construction and instrument pricing.
//!
//! Every error is fatal to the curve being built. No partial curve is
//! returned and nothing is retried.

use strata_core::CoreError;
use strata_math::MathError;
use thiserror::Error;

/// A specialized Result type for curve operations.
pub type CurveResult<T> = Result<T, CurveError>;

/// Error types for curve operations.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CurveError {
    /// Malformed input: dates, conventions, schedules or curve knots.
    #[error("Configuration error: {0}")]
    Configuration(#[from] CoreError),

    /// Calibrating instruments are out of maturity order.
    #[error("Curve order error: {reason}")]
    CurveOrder {
        /// Which ordering rule was broken.
        reason: String,
    },

    /// The root finder could not solve for an instrument's node.
    #[error("Root not found for {instrument}: {reason}")]
    RootNotFound {
        /// Description of the instrument being solved.
        instrument: String,
        /// Solver failure.
        reason: String,
    },

    /// A calibrating instrument does not reprice on the built curve.
    #[error("Refit failed for {instrument}: residual {residual:.3e} exceeds tolerance {tolerance:.1e}")]
    Refit {
        /// Description of the instrument.
        instrument: String,
        /// Repricing residual per unit notional.
        residual: f64,
        /// Allowed tolerance.
        tolerance: f64,
    },
}

impl CurveError {
    /// Creates a configuration error from a free-form reason.
    #[must_use]
    pub fn configuration(reason: impl Into<String>) -> Self {
        Self::Configuration(CoreError::invalid_argument(reason))
    }

    /// Creates a curve order error.
    #[must_use]
    pub fn curve_order(reason: impl Into<String>) -> Self {
        Self::CurveOrder {
            reason: reason.into(),
        }
    }

    /// Creates a root not found error.
    #[must_use]
    pub fn root_not_found(instrument: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::RootNotFound {
            instrument: instrument.into(),
            reason: reason.into(),
        }
    }

    /// Creates a refit error.
    #[must_use]
    pub fn refit(instrument: impl Into<String>, residual: f64, tolerance: f64) -> Self {
        Self::Refit {
            instrument: instrument.into(),
            residual,
            tolerance,
        }
    }
}

/// Curve knot validation failures are configuration errors.
impl From<MathError> for CurveError {
    fn from(err: MathError) -> Self {
        Self::configuration(err.to_string())
    }
}
