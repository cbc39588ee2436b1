//! Date type for financial calculations.

use chrono::{Datelike, NaiveDate, Weekday};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::ops::{Add, Sub};
use std::str::FromStr;

use super::tenor::{Tenor, TenorUnit};
use crate::error::{CoreError, CoreResult};

/// Months in which IMM futures and standard CDS contracts roll.
const QUARTERLY_ROLL_MONTHS: [u32; 4] = [3, 6, 9, 12];

/// Day of month on which standard CDS contracts roll.
const CDS_ROLL_DAY: u32 = 20;

/// A calendar date for financial calculations.
///
/// This is a newtype wrapper around `chrono::NaiveDate` providing
/// financial-specific operations and ensuring type safety.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Date;
///
/// let date = Date::from_ymd(2018, 6, 20).unwrap();
/// let future = date.add_months(6).unwrap();
/// assert_eq!(future.year(), 2018);
/// assert_eq!(future.month(), 12);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Date(NaiveDate);

impl Date {
    /// Creates a new date from year, month, and day.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the date is invalid.
    pub fn from_ymd(year: i32, month: u32, day: u32) -> CoreResult<Self> {
        NaiveDate::from_ymd_opt(year, month, day)
            .map(Date)
            .ok_or_else(|| CoreError::invalid_date(format!("{year}-{month:02}-{day:02}")))
    }

    /// Creates a date from an ISO 8601 string (YYYY-MM-DD).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the string is not a valid date.
    pub fn parse(s: &str) -> CoreResult<Self> {
        NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d")
            .map(Date)
            .map_err(|_| CoreError::invalid_date(format!("Cannot parse: {s}")))
    }

    /// Returns the year component.
    #[must_use]
    pub fn year(&self) -> i32 {
        self.0.year()
    }

    /// Returns the month component (1-12).
    #[must_use]
    pub fn month(&self) -> u32 {
        self.0.month()
    }

    /// Returns the day component (1-31).
    #[must_use]
    pub fn day(&self) -> u32 {
        self.0.day()
    }

    /// Returns the day of year (1-366).
    #[must_use]
    pub fn day_of_year(&self) -> u32 {
        self.0.ordinal()
    }

    /// Checks if the year is a leap year.
    #[must_use]
    pub fn is_leap_year(&self) -> bool {
        self.0.leap_year()
    }

    /// Returns the number of days in the date's month.
    #[must_use]
    pub fn days_in_month(&self) -> u32 {
        days_in_month(self.year(), self.month())
    }

    /// Returns the number of days in the date's year.
    #[must_use]
    pub fn days_in_year(&self) -> u32 {
        if self.is_leap_year() {
            366
        } else {
            365
        }
    }

    /// Adds a number of days to the date.
    #[must_use]
    pub fn add_days(&self, days: i64) -> Self {
        Date(self.0 + chrono::Duration::days(days))
    }

    /// Adds a number of months to the date.
    ///
    /// If the resulting day would be invalid (e.g., Jan 31 + 1 month),
    /// it rolls back to the last valid day of the month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_months(&self, months: i32) -> CoreResult<Self> {
        let total_months = self.year() * 12 + self.month() as i32 - 1 + months;
        let new_year = total_months.div_euclid(12);
        let new_month = (total_months.rem_euclid(12) + 1) as u32;

        // Clamp day to valid range for new month
        let max_day = days_in_month(new_year, new_month);
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, new_month, new_day)
    }

    /// Adds a number of years to the date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is invalid.
    pub fn add_years(&self, years: i32) -> CoreResult<Self> {
        let new_year = self.year() + years;
        let max_day = days_in_month(new_year, self.month());
        let new_day = self.day().min(max_day);

        Self::from_ymd(new_year, self.month(), new_day)
    }

    /// Adds a tenor to the date.
    ///
    /// Month tenors step one month at a time, clamping the day at each
    /// step, so `31 Jan + 2M` lands on `28 Mar` (or `29 Mar` in a leap year).
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn add_tenor(&self, tenor: Tenor) -> CoreResult<Self> {
        let n = tenor.count();
        match tenor.unit() {
            TenorUnit::Days => Ok(self.add_days(i64::from(n))),
            TenorUnit::Weeks => Ok(self.add_days(7 * i64::from(n))),
            TenorUnit::Months => {
                let step = n.signum();
                let mut date = *self;
                for _ in 0..n.abs() {
                    date = date.add_months(step)?;
                }
                Ok(date)
            }
            TenorUnit::Years => self.add_years(n),
        }
    }

    /// Calculates the number of calendar days between two dates.
    #[must_use]
    pub fn days_between(&self, other: &Date) -> i64 {
        (other.0 - self.0).num_days()
    }

    /// Returns the underlying `NaiveDate`.
    #[must_use]
    pub fn as_naive_date(&self) -> NaiveDate {
        self.0
    }

    /// Returns the end of month for the current date.
    #[must_use]
    pub fn end_of_month(&self) -> Self {
        self.add_days(i64::from(self.days_in_month() - self.day()))
    }

    /// Checks if the date is the end of month.
    #[must_use]
    pub fn is_end_of_month(&self) -> bool {
        self.day() == self.days_in_month()
    }

    /// Returns the day of week.
    #[must_use]
    pub fn weekday(&self) -> Weekday {
        self.0.weekday()
    }

    /// Checks if the date is a weekend (Saturday or Sunday).
    #[must_use]
    pub fn is_weekend(&self) -> bool {
        matches!(self.weekday(), Weekday::Sat | Weekday::Sun)
    }

    /// Checks if the date is a weekday (Monday through Friday).
    #[must_use]
    pub fn is_weekday(&self) -> bool {
        !self.is_weekend()
    }

    /// Returns the third Wednesday of the given month.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the month is invalid.
    pub fn third_wednesday(year: i32, month: u32) -> CoreResult<Self> {
        let first = Self::from_ymd(year, month, 1)?;
        let offset = (7 + Weekday::Wed.num_days_from_monday()
            - first.weekday().num_days_from_monday())
            % 7;
        Ok(first.add_days(i64::from(offset) + 14))
    }

    /// Returns the next IMM date: the third Wednesday of March, June,
    /// September or December falling strictly after this date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn next_imm_date(&self) -> CoreResult<Self> {
        let mut year = self.year();
        let mut month = next_roll_month(self.month());
        loop {
            let candidate = Self::third_wednesday(year, month)?;
            if candidate > *self {
                return Ok(candidate);
            }
            if month == 12 {
                month = 3;
                year += 1;
            } else {
                month += 3;
            }
        }
    }

    /// Returns the next standard CDS roll date: the 20th of March, June,
    /// September or December falling strictly after this date.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidDate` if the result is out of range.
    pub fn next_cds_date(&self) -> CoreResult<Self> {
        let month = next_roll_month(self.month());
        let candidate = Self::from_ymd(self.year(), month, CDS_ROLL_DAY)?;
        if candidate > *self {
            return Ok(candidate);
        }
        if month == 12 {
            Self::from_ymd(self.year() + 1, 3, CDS_ROLL_DAY)
        } else {
            Self::from_ymd(self.year(), month + 3, CDS_ROLL_DAY)
        }
    }

    /// Returns the minimum of two dates.
    #[must_use]
    pub fn min(self, other: Self) -> Self {
        if self <= other {
            self
        } else {
            other
        }
    }

    /// Returns the maximum of two dates.
    #[must_use]
    pub fn max(self, other: Self) -> Self {
        if self >= other {
            self
        } else {
            other
        }
    }
}

impl fmt::Display for Date {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.format("%Y-%m-%d"))
    }
}

impl FromStr for Date {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl From<NaiveDate> for Date {
    fn from(date: NaiveDate) -> Self {
        Date(date)
    }
}

impl From<Date> for NaiveDate {
    fn from(date: Date) -> Self {
        date.0
    }
}

impl Add<i64> for Date {
    type Output = Self;

    /// Adds days to a date.
    fn add(self, days: i64) -> Self::Output {
        self.add_days(days)
    }
}

impl Sub<i64> for Date {
    type Output = Self;

    /// Subtracts days from a date.
    fn sub(self, days: i64) -> Self::Output {
        self.add_days(-days)
    }
}

impl Sub<Date> for Date {
    type Output = i64;

    /// Returns the number of days between two dates.
    fn sub(self, other: Date) -> Self::Output {
        other.days_between(&self)
    }
}

/// First quarterly roll month at or after `month`.
fn next_roll_month(month: u32) -> u32 {
    QUARTERLY_ROLL_MONTHS
        .iter()
        .copied()
        .find(|&m| m >= month)
        .unwrap_or(12)
}

/// Helper function to get days in a month for a given year.
pub(crate) fn days_in_month(year: i32, month: u32) -> u32 {
    match month {
        4 | 6 | 9 | 11 => 30,
        2 if is_leap_year(year) => 29,
        2 => 28,
        _ => 31,
    }
}

/// Helper function to check if a year is a leap year.
pub(crate) fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || (year % 400 == 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_date_creation() {
        let date = d(2025, 6, 15);
        assert_eq!(date.year(), 2025);
        assert_eq!(date.month(), 6);
        assert_eq!(date.day(), 15);
    }

    #[test]
    fn test_invalid_date() {
        assert!(Date::from_ymd(2025, 2, 30).is_err());
        assert!(Date::from_ymd(2025, 13, 1).is_err());
    }

    #[test]
    fn test_add_months() {
        let result = d(2025, 1, 31).add_months(1).unwrap();
        assert_eq!(result, d(2025, 2, 28)); // Rolled back to last valid day

        // Negative months cross the year boundary
        assert_eq!(d(2018, 1, 20).add_months(-3).unwrap(), d(2017, 10, 20));
        assert_eq!(d(2020, 6, 20).add_months(-24).unwrap(), d(2018, 6, 20));
    }

    #[test]
    fn test_add_tenor() {
        let date = d(2018, 1, 31);
        assert_eq!(date.add_tenor("1D".parse().unwrap()).unwrap(), d(2018, 2, 1));
        assert_eq!(date.add_tenor("2W".parse().unwrap()).unwrap(), d(2018, 2, 14));
        // One month at a time: Jan 31 -> Feb 28 -> Mar 28
        assert_eq!(date.add_tenor("2M".parse().unwrap()).unwrap(), d(2018, 3, 28));
        assert_eq!(d(2020, 2, 29).add_tenor("1Y".parse().unwrap()).unwrap(), d(2021, 2, 28));
    }

    #[test]
    fn test_leap_year() {
        assert!(d(2024, 1, 1).is_leap_year());
        assert!(!d(2025, 1, 1).is_leap_year());
        assert!(!d(2100, 1, 1).is_leap_year());
        assert!(d(2000, 1, 1).is_leap_year());
    }

    #[test]
    fn test_days_between() {
        assert_eq!(d(2025, 1, 1).days_between(&d(2025, 1, 31)), 30);
    }

    #[test]
    fn test_parse() {
        assert_eq!(Date::parse("2025-06-15").unwrap(), d(2025, 6, 15));
        assert_eq!("2018-06-20".parse::<Date>().unwrap(), d(2018, 6, 20));
        assert!(Date::parse("20/06/2018").is_err());
    }

    #[test]
    fn test_weekday_detection() {
        let monday = d(2025, 1, 6);
        assert!(monday.is_weekday());
        assert_eq!(monday.weekday(), Weekday::Mon);

        let saturday = d(2025, 1, 4);
        assert!(saturday.is_weekend());

        let sunday = d(2025, 1, 5);
        assert!(sunday.is_weekend());
    }

    #[test]
    fn test_end_of_month() {
        assert_eq!(d(2024, 2, 10).end_of_month(), d(2024, 2, 29));
        assert_eq!(d(2025, 2, 10).end_of_month(), d(2025, 2, 28));
        assert!(d(2025, 12, 31).is_end_of_month());
        assert!(!d(2025, 12, 30).is_end_of_month());
    }

    #[test]
    fn test_third_wednesday() {
        assert_eq!(Date::third_wednesday(2018, 6).unwrap(), d(2018, 6, 20));
        assert_eq!(Date::third_wednesday(2018, 9).unwrap(), d(2018, 9, 19));
        assert_eq!(Date::third_wednesday(2019, 5).unwrap(), d(2019, 5, 15));
    }

    #[test]
    fn test_next_imm_date() {
        // Before the June IMM date
        assert_eq!(d(2018, 6, 6).next_imm_date().unwrap(), d(2018, 6, 20));
        // On the IMM date rolls to the next quarter
        assert_eq!(d(2018, 6, 20).next_imm_date().unwrap(), d(2018, 9, 19));
        // Off-cycle month
        assert_eq!(d(2018, 7, 1).next_imm_date().unwrap(), d(2018, 9, 19));
        // Year end
        assert_eq!(d(2018, 12, 25).next_imm_date().unwrap(), d(2019, 3, 20));
    }

    #[test]
    fn test_next_cds_date() {
        assert_eq!(d(2018, 6, 6).next_cds_date().unwrap(), d(2018, 6, 20));
        assert_eq!(d(2018, 6, 20).next_cds_date().unwrap(), d(2018, 9, 20));
        assert_eq!(d(2018, 11, 2).next_cds_date().unwrap(), d(2018, 12, 20));
        assert_eq!(d(2018, 12, 20).next_cds_date().unwrap(), d(2019, 3, 20));
    }

    #[test]
    fn test_date_arithmetic_operators() {
        let d1 = d(2025, 1, 1);
        let d2 = d1 + 10;
        assert_eq!(d2.day(), 11);
        let d3 = d2 - 5;
        assert_eq!(d3.day(), 6);
        assert_eq!(d2 - d1, 10);
    }

    #[test]
    fn test_display() {
        assert_eq!(format!("{}", d(2025, 6, 15)), "2025-06-15");
    }

    #[test]
    fn test_serde() {
        let date = d(2025, 6, 15);
        let json = serde_json::to_string(&date).unwrap();
        assert_eq!(json, "\"2025-06-15\"");
        let parsed: Date = serde_json::from_str(&json).unwrap();
        assert_eq!(date, parsed);
    }
}
