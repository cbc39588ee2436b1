//! Actual/Actual day count conventions.

use super::DayCount;
use crate::error::{CoreError, CoreResult};
use crate::types::Date;

/// Actual/Actual ISDA day count convention.
///
/// The period is split at every year boundary; each piece is divided by
/// the length of its own calendar year.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Days in non-leap years}}{365} + \frac{\text{Days in leap years}}{366}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIsda;

impl DayCount for ActActIsda {
    fn name(&self) -> &'static str {
        "ACT/ACT ISDA"
    }

    fn year_fraction(&self, start: Date, end: Date, reference: Option<Date>) -> CoreResult<f64> {
        if end < start {
            return Ok(-self.year_fraction(end, start, reference)?);
        }

        let mut total = 0.0;
        let mut current = start;

        // Process year by year
        while current.year() < end.year() {
            let next_year = Date::from_ymd(current.year() + 1, 1, 1)?;
            total += current.days_between(&next_year) as f64 / f64::from(current.days_in_year());
            current = next_year;
        }

        // Remaining portion in the final year
        total += current.days_between(&end) as f64 / f64::from(current.days_in_year());

        Ok(total)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/Actual ICMA day count convention.
///
/// The accrued days are divided by the length of the coupon period, so the
/// end of the period must be supplied as the reference date.
///
/// $$\text{Year Fraction} = \frac{\text{Days}(d_1, d_2)}{\text{Days}(d_1, d_3)}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ActActIcma;

impl DayCount for ActActIcma {
    fn name(&self) -> &'static str {
        "ACT/ACT ICMA"
    }

    fn year_fraction(&self, start: Date, end: Date, reference: Option<Date>) -> CoreResult<f64> {
        let period_end = reference.ok_or_else(|| {
            CoreError::invalid_argument("ACT/ACT ICMA requires the coupon period end date")
        })?;

        let num = start.days_between(&end);
        let den = start.days_between(&period_end);
        if den == 0 {
            return if num == 0 {
                Ok(0.0)
            } else {
                Err(CoreError::invalid_argument(
                    "ACT/ACT ICMA coupon period has zero length",
                ))
            };
        }
        Ok(num as f64 / den as f64)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
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
    fn test_isda_single_year() {
        let yf = ActActIsda.year_fraction(d(2019, 1, 1), d(2019, 7, 1), None).unwrap();
        assert_relative_eq!(yf, 181.0 / 365.0);
    }

    #[test]
    fn test_isda_across_leap_boundary() {
        // 2019-11-01 -> 2020-03-01: 61 days in 2019, 60 days in 2020
        let yf = ActActIsda.year_fraction(d(2019, 11, 1), d(2020, 3, 1), None).unwrap();
        assert_relative_eq!(yf, 61.0 / 365.0 + 60.0 / 366.0, epsilon = 1e-15);
    }

    #[test]
    fn test_isda_multiple_years() {
        // Full years count as exactly 1 each
        let yf = ActActIsda.year_fraction(d(2018, 7, 1), d(2021, 7, 1), None).unwrap();
        let expected = 184.0 / 365.0 + 1.0 + 1.0 + 181.0 / 365.0;
        assert_relative_eq!(yf, expected, epsilon = 1e-14);
    }

    #[test]
    fn test_isda_negative() {
        let forward = ActActIsda.year_fraction(d(2019, 11, 1), d(2020, 3, 1), None).unwrap();
        let backward = ActActIsda.year_fraction(d(2020, 3, 1), d(2019, 11, 1), None).unwrap();
        assert_relative_eq!(forward, -backward);
    }

    #[test]
    fn test_icma() {
        let yf = ActActIcma
            .year_fraction(d(2018, 1, 15), d(2018, 3, 15), Some(d(2018, 7, 15)))
            .unwrap();
        assert_relative_eq!(yf, 59.0 / 181.0);
        assert!(ActActIcma.year_fraction(d(2018, 1, 15), d(2018, 3, 15), None).is_err());
    }
}
