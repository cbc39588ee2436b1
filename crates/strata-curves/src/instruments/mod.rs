//! Calibrating instruments for curve bootstrap.
//!
//! Each instrument is a plain value record that knows how to price itself
//! against a [`Curve`](crate::traits::Curve). Accrual factors are computed
//! once at construction, so pricing never fails afterwards.
//!
//! # Available Instruments
//!
//! ## Money Market
//! - [`IborDeposit`]: Term deposits, the short end of a rate curve
//! - [`IborFra`]: Forward rate agreements
//! - [`IborFuture`]: IMM futures, converted to FRAs for the bootstrap
//!
//! ## Swaps
//! - [`FixedLeg`] and [`FloatLeg`]: Cashflow legs on a schedule
//! - [`IborSwap`]: Fixed against floating swap
//!
//! ## Credit
//! - [`Cds`]: Credit default swap with premium and protection legs
//!
//! Every instrument has `bumped(shift)`, which returns a copy with its
//! market quote shifted. Curves use it to rebuild under scenario bumps.

mod cds;
mod deposit;
mod fra;
mod future;
mod leg;
mod swap;

pub use cds::{Cds, CdsConfig, CdsPricingConfig, CdsPv};
pub use deposit::IborDeposit;
pub use fra::IborFra;
pub use future::IborFuture;
pub use leg::{FixedLeg, FixedLegConfig, FloatLeg, FloatLegConfig};
pub use swap::{IborSwap, SwapConfig};

use serde::{Deserialize, Serialize};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, Frequency};

use crate::error::CurveResult;

/// Instrument type for reporting and tolerance selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum InstrumentKind {
    /// Money market deposit
    Deposit,
    /// Forward rate agreement, including converted futures
    Fra,
    /// Fixed against floating swap
    Swap,
    /// Credit default swap
    Cds,
}

impl std::fmt::Display for InstrumentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Deposit => write!(f, "Deposit"),
            Self::Fra => write!(f, "FRA"),
            Self::Swap => write!(f, "Swap"),
            Self::Cds => write!(f, "CDS"),
        }
    }
}

/// Whether a leg's cashflows are paid or received.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "UPPERCASE")]
pub enum LegDirection {
    /// The leg is paid; its value is negated.
    #[default]
    Pay,
    /// The leg is received.
    Receive,
}

impl LegDirection {
    /// Returns the other side.
    #[must_use]
    pub fn opposite(self) -> Self {
        match self {
            Self::Pay => Self::Receive,
            Self::Receive => Self::Pay,
        }
    }

    /// Returns -1 for a paid leg and +1 for a received leg.
    #[must_use]
    pub fn sign(self) -> f64 {
        match self {
            Self::Pay => -1.0,
            Self::Receive => 1.0,
        }
    }
}

impl std::fmt::Display for LegDirection {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Pay => write!(f, "PAY"),
            Self::Receive => write!(f, "RECEIVE"),
        }
    }
}

/// Accrual factor for a single period that ends on its own reference date.
pub(crate) fn accrual_factor(
    day_count: DayCountConvention,
    start: Date,
    end: Date,
    frequency: Frequency,
) -> CurveResult<f64> {
    Ok(day_count.year_fraction_with_frequency(start, end, Some(end), frequency)?)
}
