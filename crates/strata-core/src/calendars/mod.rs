//! Business day calendars and conventions.
//!
//! This module provides:
//! - The [`Calendar`] trait and the supported [`CalendarType`]s
//! - Business day adjustment conventions
//! - Holiday detection and business-day stepping
//!
//! Holiday determination is a pure function of the date and the calendar
//! type, so calendars carry no state and are freely copied.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

mod conventions;
mod easter;
mod target;
mod uk;
mod us;

pub use conventions::BusinessDayConvention;
pub use easter::easter_monday_day_of_year;

use crate::error::CoreError;
use crate::types::Date;

/// Trait for business day calendars.
///
/// Calendars determine which days are business days vs holidays
/// for a specific market or jurisdiction.
pub trait Calendar: Send + Sync {
    /// Returns the name of the calendar.
    fn name(&self) -> &'static str;

    /// Returns true if the date is a business day.
    fn is_business_day(&self, date: Date) -> bool;

    /// Returns true if the date is a holiday.
    fn is_holiday(&self, date: Date) -> bool {
        !self.is_business_day(date)
    }

    /// Adjusts a date according to the given business day convention.
    fn adjust(&self, date: Date, convention: BusinessDayConvention) -> Date {
        conventions::adjust(date, convention, self)
    }

    /// Advances a date by a number of business days.
    ///
    /// Walks one calendar day at a time in the direction of `days`,
    /// counting only business days.
    fn add_business_days(&self, date: Date, days: i32) -> Date {
        let mut result = date;
        let mut remaining = days.abs();
        let direction: i64 = if days >= 0 { 1 } else { -1 };

        while remaining > 0 {
            result = result.add_days(direction);
            if self.is_business_day(result) {
                remaining -= 1;
            }
        }

        result
    }

    /// Returns the next business day on or after the given date.
    fn next_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(1);
        }
        result
    }

    /// Returns the previous business day on or before the given date.
    fn previous_business_day(&self, date: Date) -> Date {
        let mut result = date;
        while !self.is_business_day(result) {
            result = result.add_days(-1);
        }
        result
    }

    /// Counts business days between two dates (exclusive of start, inclusive of end).
    fn business_days_between(&self, start: Date, end: Date) -> i32 {
        let mut count = 0;
        let mut current = start.add_days(1);

        while current <= end {
            if self.is_business_day(current) {
                count += 1;
            }
            current = current.add_days(1);
        }

        count
    }

    /// Lists the holidays in a year that do not fall on a weekend.
    fn holidays_in_year(&self, year: i32) -> Vec<Date> {
        let (Ok(mut current), Ok(end)) = (Date::from_ymd(year, 1, 1), Date::from_ymd(year, 12, 31))
        else {
            return Vec::new();
        };

        let mut holidays = Vec::new();
        while current <= end {
            if !self.is_business_day(current) && !current.is_weekend() {
                holidays.push(current);
            }
            current = current.add_days(1);
        }
        holidays
    }
}

/// The supported holiday calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum CalendarType {
    /// Every day is a business day.
    None,
    /// Saturdays and Sundays are the only non-business days.
    #[default]
    Weekend,
    /// England and Wales bank holidays.
    Uk,
    /// US federal holidays.
    Us,
    /// TARGET settlement holidays.
    Target,
}

impl CalendarType {
    /// Returns all supported calendars.
    #[must_use]
    pub fn all() -> &'static [CalendarType] {
        &[
            CalendarType::None,
            CalendarType::Weekend,
            CalendarType::Uk,
            CalendarType::Us,
            CalendarType::Target,
        ]
    }
}

impl Calendar for CalendarType {
    fn name(&self) -> &'static str {
        match self {
            CalendarType::None => "NONE",
            CalendarType::Weekend => "WEEKEND",
            CalendarType::Uk => "UK",
            CalendarType::Us => "US",
            CalendarType::Target => "TARGET",
        }
    }

    fn is_business_day(&self, date: Date) -> bool {
        if *self == CalendarType::None {
            return true;
        }
        if date.is_weekend() {
            return false;
        }
        match self {
            CalendarType::None | CalendarType::Weekend => true,
            CalendarType::Uk => !uk::is_holiday(date),
            CalendarType::Us => !us::is_holiday(date),
            CalendarType::Target => !target::is_holiday(date),
        }
    }
}

impl fmt::Display for CalendarType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for CalendarType {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "NONE" => Ok(CalendarType::None),
            "WEEKEND" | "WEEKENDS" => Ok(CalendarType::Weekend),
            "UK" | "GB" | "LONDON" => Ok(CalendarType::Uk),
            "US" | "USA" | "NEW YORK" => Ok(CalendarType::Us),
            "TARGET" | "TARGET2" | "EUR" => Ok(CalendarType::Target),
            _ => Err(CoreError::parse_error("calendar", s)),
        }
    }
}
