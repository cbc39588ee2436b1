//! Day count conventions for accrual and curve time calculations.
//!
//! Day count conventions determine how a period between two dates is
//! converted into a fraction of a year.
//!
//! # Supported Conventions
//!
//! ## ACT Family (Actual numerator)
//!
//! - [`Act360`]: Actual/360 - Money market convention
//! - [`Act365Fixed`]: Actual/365 Fixed
//! - [`Act365Leap`]: Actual/365 Leap - Leap-aware denominator (ISDA)
//! - [`ActActIsda`]: Actual/Actual ISDA - Split at year boundaries
//! - [`ActActIcma`]: Actual/Actual ICMA - Needs the period end date
//! - [`Simple`]: Actual days over 365
//!
//! ## 30/360 Family (Assumes 30-day months, 360-day years)
//!
//! - [`Thirty360Bond`]: 30/360 Bond Basis
//! - [`Thirty360E`]: 30E/360 - Eurobond convention
//! - [`Thirty360EIsda`]: 30E/360 ISDA
//! - [`Thirty360EPlus`]: 30E+/360
//!
//! # Usage
//!
//! ```rust
//! use strata_core::daycounts::{DayCount, DayCountConvention, Thirty360Bond};
//! use strata_core::types::Date;
//!
//! let start = Date::from_ymd(2018, 6, 20).unwrap();
//! let end = Date::from_ymd(2018, 12, 20).unwrap();
//!
//! assert_eq!(Thirty360Bond.day_count(start, end), 180);
//! let yf = DayCountConvention::Thirty360Bond.year_fraction(start, end).unwrap();
//! assert_eq!(yf, 0.5);
//! ```

mod act360;
mod act365;
mod actact;
mod thirty360;

pub use act360::Act360;
pub use act365::{Act365Fixed, Act365Leap, Simple};
pub use actact::{ActActIcma, ActActIsda};
pub use thirty360::{Thirty360Bond, Thirty360E, Thirty360EIsda, Thirty360EPlus};

use serde::{Deserialize, Serialize};

use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// Trait for day count conventions.
///
/// # Implementation Notes
///
/// - `year_fraction` returns the fraction of a year between dates. The
///   optional `reference` date is the end of the enclosing coupon period,
///   which only some conventions consult.
/// - `day_count` returns the number of days according to the convention
/// - Implementations must be thread-safe (`Send + Sync`)
pub trait DayCount: Send + Sync {
    /// Returns the market name of the day count convention.
    fn name(&self) -> &'static str;

    /// Calculates the year fraction between two dates.
    ///
    /// # Arguments
    ///
    /// * `start` - Start date (exclusive for accrual)
    /// * `end` - End date (inclusive for accrual)
    /// * `reference` - End of the coupon period, when the convention needs it
    ///
    /// Returns a negative fraction if `end < start`.
    fn year_fraction(&self, start: Date, end: Date, reference: Option<Date>) -> CoreResult<f64>;

    /// Calculates the day count between two dates.
    ///
    /// For ACT conventions, this is actual calendar days.
    /// For 30/360 conventions, this uses the 30-day month assumption.
    fn day_count(&self, start: Date, end: Date) -> i64;
}

/// Enumeration of all supported day count conventions.
///
/// This enum is what instruments and configuration files carry; it
/// dispatches to the unit structs above.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum DayCountConvention {
    // =========================================================================
    // 30/360 Family
    // =========================================================================
    /// 30/360 Bond Basis
    Thirty360Bond,

    /// 30E/360 (Eurobond Basis)
    Thirty360E,

    /// 30E/360 ISDA
    Thirty360EIsda,

    /// 30E+/360
    Thirty360EPlus,

    // =========================================================================
    // ACT Family
    // =========================================================================
    /// Actual/Actual ISDA
    ActActIsda,

    /// Actual/Actual ICMA, requires the coupon period end
    ActActIcma,

    /// Actual/365 Fixed
    Act365Fixed,

    /// Actual/360
    Act360,

    /// Actual/365 Leap
    Act365Leap,

    /// Actual/365, used for curve time
    Simple,
}

impl DayCountConvention {
    /// Returns the market name of the convention.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            DayCountConvention::Thirty360Bond => "30/360 BOND",
            DayCountConvention::Thirty360E => "30E/360",
            DayCountConvention::Thirty360EIsda => "30E/360 ISDA",
            DayCountConvention::Thirty360EPlus => "30E+/360",
            DayCountConvention::ActActIsda => "ACT/ACT ISDA",
            DayCountConvention::ActActIcma => "ACT/ACT ICMA",
            DayCountConvention::Act365Fixed => "ACT/365F",
            DayCountConvention::Act360 => "ACT/360",
            DayCountConvention::Act365Leap => "ACT/365L",
            DayCountConvention::Simple => "SIMPLE",
        }
    }

    /// Returns all available day count conventions.
    #[must_use]
    pub fn all() -> &'static [DayCountConvention] {
        &[
            DayCountConvention::Thirty360Bond,
            DayCountConvention::Thirty360E,
            DayCountConvention::Thirty360EIsda,
            DayCountConvention::Thirty360EPlus,
            DayCountConvention::ActActIsda,
            DayCountConvention::ActActIcma,
            DayCountConvention::Act365Fixed,
            DayCountConvention::Act360,
            DayCountConvention::Act365Leap,
            DayCountConvention::Simple,
        ]
    }

    /// Year fraction between two dates with no reference date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidArgument` for ACT/ACT ICMA, which needs
    /// the coupon period end.
    pub fn year_fraction(&self, start: Date, end: Date) -> CoreResult<f64> {
        self.year_fraction_with_reference(start, end, None)
    }

    /// Year fraction with an optional coupon period end date.
    ///
    /// ACT/365L assumes annual coupons here.
    pub fn year_fraction_with_reference(
        &self,
        start: Date,
        end: Date,
        reference: Option<Date>,
    ) -> CoreResult<f64> {
        self.year_fraction_with_frequency(start, end, reference, Frequency::Annual)
    }

    /// Year fraction with a reference date and a coupon frequency.
    ///
    /// The frequency only affects ACT/365L.
    pub fn year_fraction_with_frequency(
        &self,
        start: Date,
        end: Date,
        reference: Option<Date>,
        frequency: Frequency,
    ) -> CoreResult<f64> {
        match self {
            DayCountConvention::Thirty360Bond => Thirty360Bond.year_fraction(start, end, reference),
            DayCountConvention::Thirty360E => Thirty360E.year_fraction(start, end, reference),
            DayCountConvention::Thirty360EIsda => {
                Thirty360EIsda.year_fraction(start, end, reference)
            }
            DayCountConvention::Thirty360EPlus => {
                Thirty360EPlus.year_fraction(start, end, reference)
            }
            DayCountConvention::ActActIsda => ActActIsda.year_fraction(start, end, reference),
            DayCountConvention::ActActIcma => ActActIcma.year_fraction(start, end, reference),
            DayCountConvention::Act365Fixed => Act365Fixed.year_fraction(start, end, reference),
            DayCountConvention::Act360 => Act360.year_fraction(start, end, reference),
            DayCountConvention::Act365Leap => {
                Act365Leap::new(frequency).year_fraction(start, end, reference)
            }
            DayCountConvention::Simple => Simple.year_fraction(start, end, reference),
        }
    }

    /// Day numerator between two dates under this convention.
    #[must_use]
    pub fn day_count(&self, start: Date, end: Date) -> i64 {
        match self {
            DayCountConvention::Thirty360Bond => Thirty360Bond.day_count(start, end),
            DayCountConvention::Thirty360E => Thirty360E.day_count(start, end),
            DayCountConvention::Thirty360EIsda => Thirty360EIsda.day_count(start, end),
            DayCountConvention::Thirty360EPlus => Thirty360EPlus.day_count(start, end),
            _ => start.days_between(&end),
        }
    }
}

impl std::fmt::Display for DayCountConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl std::str::FromStr for DayCountConvention {
    type Err = CoreError;

    /// Parses a day count convention from a string.
    ///
    /// Supports market names ("ACT/360", "30E/360 ISDA"), Rust enum-style
    /// names ("Act360", "Thirty360EIsda") and common aliases ("BOND").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase().replace('_', " ");

        match normalized.as_str() {
            "30/360" | "30/360 BOND" | "BOND" | "THIRTY360BOND" | "THIRTY 360 BOND" => {
                Ok(DayCountConvention::Thirty360Bond)
            }
            "30E/360" | "EUROBOND" | "THIRTY360E" | "THIRTY E 360" => {
                Ok(DayCountConvention::Thirty360E)
            }
            "30E/360 ISDA" | "THIRTY360EISDA" | "THIRTY E 360 ISDA" => {
                Ok(DayCountConvention::Thirty360EIsda)
            }
            "30E+/360" | "THIRTY360EPLUS" | "THIRTY E PLUS 360" => {
                Ok(DayCountConvention::Thirty360EPlus)
            }
            "ACT/ACT" | "ACT/ACT ISDA" | "ACTUAL/ACTUAL" | "ACTACTISDA" | "ACT ACT ISDA" => {
                Ok(DayCountConvention::ActActIsda)
            }
            "ACT/ACT ICMA" | "ACTUAL/ACTUAL ICMA" | "ACTACTICMA" | "ACT ACT ICMA" => {
                Ok(DayCountConvention::ActActIcma)
            }
            "ACT/365" | "ACT/365F" | "ACT/365 FIXED" | "ACT365FIXED" | "ACT 365F" => {
                Ok(DayCountConvention::Act365Fixed)
            }
            "ACT/360" | "ACTUAL/360" | "ACT360" | "ACT 360" => Ok(DayCountConvention::Act360),
            "ACT/365L" | "ACT/365 LEAP" | "ACT365LEAP" | "ACT 365L" => {
                Ok(DayCountConvention::Act365Leap)
            }
            "SIMPLE" => Ok(DayCountConvention::Simple),
            _ => Err(CoreError::parse_error("day count convention", s)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_thirty360_bond_half_year() {
        let yf = DayCountConvention::Thirty360Bond
            .year_fraction(d(2018, 6, 20), d(2018, 12, 20))
            .unwrap();
        assert_eq!(yf, 0.5);
    }

    #[test]
    fn test_act_conventions_full_year() {
        let start = d(2019, 1, 1);
        let end = d(2020, 1, 1);
        assert_eq!(DayCountConvention::Act365Fixed.year_fraction(start, end).unwrap(), 1.0);
        assert_eq!(DayCountConvention::Simple.year_fraction(start, end).unwrap(), 1.0);
        assert_eq!(DayCountConvention::ActActIsda.year_fraction(start, end).unwrap(), 1.0);
        assert_relative_eq!(
            DayCountConvention::Act360.year_fraction(start, end).unwrap(),
            365.0 / 360.0
        );
    }

    #[test]
    fn test_icma_needs_reference() {
        let err = DayCountConvention::ActActIcma
            .year_fraction(d(2018, 6, 20), d(2018, 9, 20))
            .unwrap_err();
        assert!(matches!(err, CoreError::InvalidArgument { .. }));

        let yf = DayCountConvention::ActActIcma
            .year_fraction_with_reference(d(2018, 6, 20), d(2018, 9, 20), Some(d(2018, 12, 20)))
            .unwrap();
        assert_relative_eq!(yf, 92.0 / 183.0);
    }

    #[test]
    fn test_day_count_dispatch() {
        assert_eq!(DayCountConvention::Act360.day_count(d(2025, 1, 1), d(2025, 7, 1)), 181);
        assert_eq!(
            DayCountConvention::Thirty360E.day_count(d(2025, 1, 31), d(2025, 3, 31)),
            60
        );
    }

    #[test]
    fn test_convention_names() {
        assert_eq!(DayCountConvention::Act360.name(), "ACT/360");
        assert_eq!(DayCountConvention::Act365Fixed.name(), "ACT/365F");
        assert_eq!(DayCountConvention::Thirty360EIsda.to_string(), "30E/360 ISDA");
    }

    #[test]
    fn test_from_str_aliases() {
        assert_eq!(
            "actual/360".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Act360
        );
        assert_eq!(
            "THIRTY_E_360_ISDA".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360EIsda
        );
        assert_eq!(
            "bond".parse::<DayCountConvention>().unwrap(),
            DayCountConvention::Thirty360Bond
        );
        let err = "INVALID".parse::<DayCountConvention>().unwrap_err();
        assert!(err.to_string().contains("day count convention"));
    }

    #[test]
    fn test_from_str_roundtrip() {
        for convention in DayCountConvention::all() {
            let parsed: DayCountConvention = convention.name().parse().unwrap();
            assert_eq!(*convention, parsed);
        }
    }

    proptest! {
        #[test]
        fn prop_same_date_is_zero(days in 0i64..100_000) {
            let date = d(1950, 1, 1).add_days(days);
            for convention in DayCountConvention::all() {
                let yf = convention
                    .year_fraction_with_reference(date, date, Some(date))
                    .unwrap();
                prop_assert_eq!(yf, 0.0);
            }
        }

        #[test]
        fn prop_actual_conventions_are_additive(
            start in 0i64..40_000,
            first in 0i64..2_000,
            second in 0i64..2_000,
        ) {
            let a = d(1950, 1, 1).add_days(start);
            let b = a.add_days(first);
            let c = b.add_days(second);
            for convention in [
                DayCountConvention::Act360,
                DayCountConvention::Act365Fixed,
                DayCountConvention::ActActIsda,
            ] {
                let whole = convention.year_fraction(a, c).unwrap();
                let parts = convention.year_fraction(a, b).unwrap()
                    + convention.year_fraction(b, c).unwrap();
                prop_assert!((whole - parts).abs() < 1e-12);
            }
        }
    }
}
