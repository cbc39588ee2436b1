//! Repricing checks for bootstrapped curves.
//!
//! A bootstrapped curve must reprice every instrument it was built from.
//! [`RepricingReport`] lists each calibrating instrument with its residual
//! per unit notional, the tolerance for its kind and whether it passed.
//!
//! # Tolerances
//!
//! | Instrument | Residual                       | Tolerance |
//! |------------|--------------------------------|-----------|
//! | Deposit    | `value / notional - 1`         | 1e-10     |
//! | FRA        | `value / notional`             | 1e-5      |
//! | Swap       | `value at effective / notional`| 1e-5      |
//! | CDS        | `clean PV / notional`          | 1e-6      |
//!
//! # Usage
//!
//! ```rust,ignore
//! let report = curve.repricing_report()?;
//! if !report.is_valid() {
//!     eprintln!("Failed instruments: {:?}", report.failed_instruments());
//! }
//! ```

use std::fmt;

use strata_core::types::Date;

use crate::instruments::InstrumentKind;

/// Repricing tolerances per unit notional.
pub mod tolerances {
    use crate::instruments::InstrumentKind;

    /// Deposits are solved in closed form.
    pub const DEPOSIT: f64 = 1e-10;

    /// FRA value tolerance.
    pub const FRA: f64 = 1e-5;

    /// Swap value tolerance, measured at the effective date.
    pub const SWAP: f64 = 1e-5;

    /// CDS clean PV tolerance.
    pub const CDS: f64 = 1e-6;

    /// Returns the tolerance for an instrument kind.
    #[must_use]
    pub fn for_instrument(kind: InstrumentKind) -> f64 {
        match kind {
            InstrumentKind::Deposit => DEPOSIT,
            InstrumentKind::Fra => FRA,
            InstrumentKind::Swap => SWAP,
            InstrumentKind::Cds => CDS,
        }
    }
}

/// Repricing result for one calibrating instrument.
#[derive(Debug, Clone, PartialEq)]
pub struct RepricingCheck {
    /// Instrument description.
    pub instrument: String,
    /// Instrument kind.
    pub kind: InstrumentKind,
    /// Maturity date.
    pub maturity: Date,
    /// Residual per unit notional.
    pub residual: f64,
    /// Tolerance applied.
    pub tolerance: f64,
    /// True when `|residual| <= tolerance`.
    pub passed: bool,
}

impl RepricingCheck {
    /// Creates a check using the default tolerance for `kind`.
    #[must_use]
    pub fn new(
        instrument: impl Into<String>,
        kind: InstrumentKind,
        maturity: Date,
        residual: f64,
    ) -> Self {
        Self::with_tolerance(
            instrument,
            kind,
            maturity,
            residual,
            tolerances::for_instrument(kind),
        )
    }

    /// Creates a check against an explicit tolerance.
    ///
    /// A non-finite residual always fails.
    #[must_use]
    pub fn with_tolerance(
        instrument: impl Into<String>,
        kind: InstrumentKind,
        maturity: Date,
        residual: f64,
        tolerance: f64,
    ) -> Self {
        Self {
            instrument: instrument.into(),
            kind,
            maturity,
            residual,
            tolerance,
            passed: residual.abs() <= tolerance,
        }
    }

    /// Returns the absolute residual.
    #[must_use]
    pub fn abs_error(&self) -> f64 {
        self.residual.abs()
    }
}

impl fmt::Display for RepricingCheck {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.passed { '✓' } else { '✗' };
        write!(
            f,
            "{mark} {:<8} {:<48} {} residual {:>12.3e} (tol {:.0e})",
            self.kind.to_string(),
            self.instrument,
            self.maturity,
            self.residual,
            self.tolerance
        )
    }
}

/// Repricing results for every calibrating instrument of a curve.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepricingReport {
    checks: Vec<RepricingCheck>,
}

impl RepricingReport {
    /// Creates a report from individual checks.
    #[must_use]
    pub fn new(checks: Vec<RepricingCheck>) -> Self {
        Self { checks }
    }

    /// Creates an empty report.
    #[must_use]
    pub fn empty() -> Self {
        Self::default()
    }

    /// Returns true if every check passed.
    #[must_use]
    pub fn is_valid(&self) -> bool {
        self.checks.iter().all(|c| c.passed)
    }

    /// Returns all checks in calibration order.
    #[must_use]
    pub fn checks(&self) -> &[RepricingCheck] {
        &self.checks
    }

    /// Largest absolute residual, zero for an empty report.
    #[must_use]
    pub fn max_error(&self) -> f64 {
        self.checks
            .iter()
            .map(RepricingCheck::abs_error)
            .fold(0.0, f64::max)
    }

    /// Root mean square residual, zero for an empty report.
    #[must_use]
    pub fn rms_error(&self) -> f64 {
        if self.checks.is_empty() {
            return 0.0;
        }
        let sum: f64 = self.checks.iter().map(|c| c.residual * c.residual).sum();
        (sum / self.checks.len() as f64).sqrt()
    }

    /// Number of passing checks.
    #[must_use]
    pub fn passed_count(&self) -> usize {
        self.checks.iter().filter(|c| c.passed).count()
    }

    /// Number of failing checks.
    #[must_use]
    pub fn failed_count(&self) -> usize {
        self.checks.len() - self.passed_count()
    }

    /// Total number of checks.
    #[must_use]
    pub fn total_count(&self) -> usize {
        self.checks.len()
    }

    /// Returns the failing checks.
    pub fn failed_checks(&self) -> impl Iterator<Item = &RepricingCheck> {
        self.checks.iter().filter(|c| !c.passed)
    }

    /// Descriptions of the failing instruments.
    #[must_use]
    pub fn failed_instruments(&self) -> Vec<&str> {
        self.failed_checks().map(|c| c.instrument.as_str()).collect()
    }

    /// Returns the first failing check in calibration order.
    #[must_use]
    pub fn first_failure(&self) -> Option<&RepricingCheck> {
        self.checks.iter().find(|c| !c.passed)
    }
}

impl fmt::Display for RepricingReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "Repricing: {}/{} passed, max error {:.3e}, rms {:.3e}",
            self.passed_count(),
            self.total_count(),
            self.max_error(),
            self.rms_error()
        )?;
        for check in &self.checks {
            writeln!(f, "  {check}")?;
        }
        Ok(())
    }
}
