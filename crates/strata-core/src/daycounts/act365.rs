//! Actual/365 day count conventions.

use super::DayCount;
use crate::error::CoreResult;
use crate::types::{is_leap_year, Date, Frequency};

/// Actual/365 Fixed.
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{365}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act365Fixed;

impl DayCount for Act365Fixed {
    fn name(&self) -> &'static str {
        "ACT/365F"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 365.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual days over 365, the measure of curve time.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Simple;

impl DayCount for Simple {
    fn name(&self) -> &'static str {
        "SIMPLE"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 365.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// Actual/365 Leap (ISDA 2006, 4.16(i)).
///
/// The denominator is 366 when the period is leap-affected, else 365:
///
/// - Annual coupons: 366 if a 29 February falls in `(start, reference]`,
///   where `reference` defaults to `end`.
/// - Other frequencies: 366 if the year of `reference` (or `end`) is a
///   leap year.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Act365Leap {
    frequency: Frequency,
}

impl Act365Leap {
    /// Creates the convention for a coupon frequency.
    #[must_use]
    pub fn new(frequency: Frequency) -> Self {
        Self { frequency }
    }

    fn denominator(&self, start: Date, period_end: Date) -> f64 {
        let leap = match self.frequency {
            Frequency::Annual => contains_feb_29(start, period_end),
            _ => is_leap_year(period_end.year()),
        };
        if leap {
            366.0
        } else {
            365.0
        }
    }
}

impl Default for Act365Leap {
    fn default() -> Self {
        Self::new(Frequency::Annual)
    }
}

impl DayCount for Act365Leap {
    fn name(&self) -> &'static str {
        "ACT/365L"
    }

    fn year_fraction(&self, start: Date, end: Date, reference: Option<Date>) -> CoreResult<f64> {
        let period_end = reference.unwrap_or(end);
        Ok(self.day_count(start, end) as f64 / self.denominator(start, period_end))
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}

/// True if some 29 February lies in `(start, end]`.
fn contains_feb_29(start: Date, end: Date) -> bool {
    (start.year()..=end.year())
        .filter(|&y| is_leap_year(y))
        .filter_map(|y| Date::from_ymd(y, 2, 29).ok())
        .any(|feb_29| start < feb_29 && feb_29 <= end)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_act365_fixed() {
        let yf = Act365Fixed.year_fraction(d(2020, 1, 1), d(2021, 1, 1), None).unwrap();
        assert_relative_eq!(yf, 366.0 / 365.0);
    }

    #[test]
    fn test_act365_leap_annual() {
        let dc = Act365Leap::default();
        // Period spans 29 Feb 2020
        let yf = dc.year_fraction(d(2019, 6, 1), d(2020, 6, 1), None).unwrap();
        assert_relative_eq!(yf, 1.0);
        // Period ends before 29 Feb
        let yf = dc.year_fraction(d(2019, 6, 1), d(2020, 2, 1), None).unwrap();
        assert_relative_eq!(yf, 245.0 / 365.0);
        // Reference date pulls the leap day into the period
        let yf = dc
            .year_fraction(d(2019, 6, 1), d(2020, 2, 1), Some(d(2020, 6, 1)))
            .unwrap();
        assert_relative_eq!(yf, 245.0 / 366.0);
        // Starting on 29 Feb excludes it
        let yf = dc.year_fraction(d(2020, 2, 29), d(2021, 2, 28), None).unwrap();
        assert_relative_eq!(yf, 1.0);
    }

    #[test]
    fn test_act365_leap_semi_annual_uses_end_year() {
        let dc = Act365Leap::new(Frequency::SemiAnnual);
        let yf = dc.year_fraction(d(2020, 7, 1), d(2020, 12, 31), None).unwrap();
        assert_relative_eq!(yf, 183.0 / 366.0);
        let yf = dc.year_fraction(d(2019, 7, 1), d(2019, 12, 31), None).unwrap();
        assert_relative_eq!(yf, 183.0 / 365.0);
    }
}
