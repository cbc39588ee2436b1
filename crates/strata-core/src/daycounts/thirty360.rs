//! 30/360 day count conventions.
//!
//! All variants share the formula
//!
//! $$\text{Days} = 360 \times (Y_2 - Y_1) + 30 \times (M_2 - M_1) + (D_2 - D_1)$$
//!
//! and differ only in how `D1`, `D2` (and for 30E+/360, `M2`) are adjusted
//! beforehand.

use super::DayCount;
use crate::error::CoreResult;
use crate::types::Date;

/// Applies the shared 30/360 formula to adjusted components.
#[inline]
fn thirty_360_days(y1: i32, m1: i64, d1: i64, y2: i32, m2: i64, d2: i64) -> i64 {
    360 * i64::from(y2 - y1) + 30 * (m2 - m1) + (d2 - d1)
}

// =============================================================================
// 30/360 Bond Basis
// =============================================================================

/// 30/360 Bond Basis.
///
/// # Rules
///
/// 1. `D1 = min(D1, 30)`
/// 2. If `D1` is now 30, `D2 = min(D2, 30)`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360Bond;

impl DayCount for Thirty360Bond {
    fn name(&self) -> &'static str {
        "30/360 BOND"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 360.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = i64::from(start.day()).min(30);
        let mut d2 = i64::from(end.day());
        if d1 == 30 {
            d2 = d2.min(30);
        }
        thirty_360_days(
            start.year(),
            i64::from(start.month()),
            d1,
            end.year(),
            i64::from(end.month()),
            d2,
        )
    }
}

// =============================================================================
// 30E/360 (Eurobond Basis)
// =============================================================================

/// 30E/360 day count convention (Eurobond Basis).
///
/// # Rules
///
/// 1. If D1 is 31, change D1 to 30
/// 2. If D2 is 31, change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360E;

impl DayCount for Thirty360E {
    fn name(&self) -> &'static str {
        "30E/360"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 360.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        thirty_360_days(
            start.year(),
            i64::from(start.month()),
            i64::from(start.day()).min(30),
            end.year(),
            i64::from(end.month()),
            i64::from(end.day()).min(30),
        )
    }
}

// =============================================================================
// 30E/360 ISDA
// =============================================================================

/// 30E/360 ISDA.
///
/// # Rules
///
/// 1. If D1 is the last day of its month, change D1 to 30
/// 2. If D2 is the last day of its month and the month is not February,
///    change D2 to 30
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360EIsda;

impl DayCount for Thirty360EIsda {
    fn name(&self) -> &'static str {
        "30E/360 ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 360.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let d1 = if start.is_end_of_month() {
            30
        } else {
            i64::from(start.day())
        };
        let d2 = if end.is_end_of_month() && end.month() != 2 {
            30
        } else {
            i64::from(end.day())
        };
        thirty_360_days(
            start.year(),
            i64::from(start.month()),
            d1,
            end.year(),
            i64::from(end.month()),
            d2,
        )
    }
}

// =============================================================================
// 30E+/360
// =============================================================================

/// 30E+/360.
///
/// # Rules
///
/// 1. `D1 = min(D1, 30)`
/// 2. If D2 is 31, change D2 to 1 and move to the following month
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Thirty360EPlus;

impl DayCount for Thirty360EPlus {
    fn name(&self) -> &'static str {
        "30E+/360"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 360.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        let (d2, m2) = if end.day() == 31 {
            (1, i64::from(end.month()) + 1)
        } else {
            (i64::from(end.day()), i64::from(end.month()))
        };
        thirty_360_days(
            start.year(),
            i64::from(start.month()),
            i64::from(start.day()).min(30),
            end.year(),
            m2,
            d2,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_bond_basis_end_adjusted_only_after_start() {
        // D1 = 30 so D2 31 -> 30
        assert_eq!(Thirty360Bond.day_count(d(2018, 3, 30), d(2018, 5, 31)), 60);
        // D1 = 31 -> 30, D2 31 -> 30
        assert_eq!(Thirty360Bond.day_count(d(2018, 3, 31), d(2018, 5, 31)), 60);
        // D1 = 15 leaves D2 = 31
        assert_eq!(Thirty360Bond.day_count(d(2018, 3, 15), d(2018, 5, 31)), 76);
        // No February rule: Feb 28 stays 28
        assert_eq!(Thirty360Bond.day_count(d(2018, 2, 28), d(2018, 3, 31)), 33);
    }

    #[test]
    fn test_eurobond_basis() {
        assert_eq!(Thirty360E.day_count(d(2018, 3, 15), d(2018, 5, 31)), 75);
        assert_eq!(Thirty360E.day_count(d(2018, 2, 28), d(2018, 3, 31)), 32);
        assert_relative_eq!(
            Thirty360E.year_fraction(d(2018, 1, 31), d(2019, 1, 31), None).unwrap(),
            1.0
        );
    }

    #[test]
    fn test_isda_february() {
        // Start Feb 28 (non-leap EOM) -> 30
        assert_eq!(Thirty360EIsda.day_count(d(2018, 2, 28), d(2018, 3, 31)), 30);
        // End Feb 28 is not adjusted
        assert_eq!(Thirty360EIsda.day_count(d(2018, 1, 31), d(2018, 2, 28)), 28);
        // Leap year: Feb 29 is EOM
        assert_eq!(Thirty360EIsda.day_count(d(2020, 2, 29), d(2020, 8, 31)), 180);
        // Feb 28 in a leap year is not EOM
        assert_eq!(Thirty360EIsda.day_count(d(2020, 2, 28), d(2020, 3, 28)), 30);
    }

    #[test]
    fn test_eplus_rolls_month() {
        // D2 = 31 becomes the 1st of the next month
        assert_eq!(Thirty360EPlus.day_count(d(2018, 3, 15), d(2018, 5, 31)), 76);
        assert_eq!(Thirty360EPlus.day_count(d(2018, 3, 31), d(2018, 12, 31)), 271);
    }

    #[test]
    fn test_negative_period() {
        let yf = Thirty360E.year_fraction(d(2019, 6, 20), d(2018, 6, 20), None).unwrap();
        assert_relative_eq!(yf, -1.0);
    }
}
