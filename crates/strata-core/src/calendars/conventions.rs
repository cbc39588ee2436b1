//! Business day adjustment conventions.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use super::Calendar;
use crate::error::CoreError;
use crate::types::Date;

/// Business day adjustment conventions.
///
/// These conventions specify how to adjust a date that falls
/// on a non-business day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum BusinessDayConvention {
    /// No adjustment - use the date as-is even if not a business day.
    Unadjusted,

    /// Move to the following business day.
    #[default]
    Following,

    /// Move to the following business day, unless it crosses a month boundary,
    /// in which case move to the preceding business day.
    ModifiedFollowing,

    /// Move to the preceding business day.
    Preceding,

    /// Move to the preceding business day, unless it crosses a month boundary,
    /// in which case move to the following business day.
    ModifiedPreceding,
}

impl std::fmt::Display for BusinessDayConvention {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            BusinessDayConvention::Unadjusted => "Unadjusted",
            BusinessDayConvention::Following => "Following",
            BusinessDayConvention::ModifiedFollowing => "Modified Following",
            BusinessDayConvention::Preceding => "Preceding",
            BusinessDayConvention::ModifiedPreceding => "Modified Preceding",
        };
        write!(f, "{name}")
    }
}

impl FromStr for BusinessDayConvention {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().replace(['-', '_', ' '], "").as_str() {
            "UNADJUSTED" | "NONE" => Ok(BusinessDayConvention::Unadjusted),
            "FOLLOWING" | "F" => Ok(BusinessDayConvention::Following),
            "MODIFIEDFOLLOWING" | "MF" => Ok(BusinessDayConvention::ModifiedFollowing),
            "PRECEDING" | "P" => Ok(BusinessDayConvention::Preceding),
            "MODIFIEDPRECEDING" | "MP" => Ok(BusinessDayConvention::ModifiedPreceding),
            _ => Err(CoreError::parse_error("business day convention", s)),
        }
    }
}

/// Adjusts a date according to the given business day convention.
///
/// The modified conventions restart from the original date when the first
/// search lands in another month.
pub fn adjust<C: Calendar + ?Sized>(
    date: Date,
    convention: BusinessDayConvention,
    calendar: &C,
) -> Date {
    if calendar.is_business_day(date) {
        return date;
    }

    match convention {
        BusinessDayConvention::Unadjusted => date,

        BusinessDayConvention::Following => following(date, calendar),

        BusinessDayConvention::ModifiedFollowing => {
            let adjusted = following(date, calendar);
            if adjusted.month() != date.month() {
                preceding(date, calendar)
            } else {
                adjusted
            }
        }

        BusinessDayConvention::Preceding => preceding(date, calendar),

        BusinessDayConvention::ModifiedPreceding => {
            let adjusted = preceding(date, calendar);
            if adjusted.month() != date.month() {
                following(date, calendar)
            } else {
                adjusted
            }
        }
    }
}

/// Returns the next business day on or after the given date.
fn following<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(1);
    }
    date
}

/// Returns the previous business day on or before the given date.
fn preceding<C: Calendar + ?Sized>(mut date: Date, calendar: &C) -> Date {
    while !calendar.is_business_day(date) {
        date = date.add_days(-1);
    }
    date
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::CalendarType;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_following() {
        // Saturday should roll to Monday
        let adjusted = adjust(d(2025, 1, 4), BusinessDayConvention::Following, &CalendarType::Weekend);
        assert_eq!(adjusted, d(2025, 1, 6));
    }

    #[test]
    fn test_preceding() {
        // Saturday should roll to Friday
        let adjusted = adjust(d(2025, 1, 4), BusinessDayConvention::Preceding, &CalendarType::Weekend);
        assert_eq!(adjusted, d(2025, 1, 3));
    }

    #[test]
    fn test_modified_following() {
        let cal = CalendarType::Weekend;

        // Sunday Jan 5 should roll to Monday Jan 6 (same month)
        let adjusted = adjust(d(2025, 1, 5), BusinessDayConvention::ModifiedFollowing, &cal);
        assert_eq!(adjusted, d(2025, 1, 6));

        // Saturday May 31 would cross into June, so roll back to Friday May 30
        let adjusted = adjust(d(2025, 5, 31), BusinessDayConvention::ModifiedFollowing, &cal);
        assert_eq!(adjusted, d(2025, 5, 30));
    }

    #[test]
    fn test_modified_preceding() {
        let cal = CalendarType::Weekend;

        // Sunday Jun 1 would cross into May, so roll forward to Monday Jun 2
        let adjusted = adjust(d(2025, 6, 1), BusinessDayConvention::ModifiedPreceding, &cal);
        assert_eq!(adjusted, d(2025, 6, 2));

        // Sunday Jun 15 stays in month
        let adjusted = adjust(d(2025, 6, 15), BusinessDayConvention::ModifiedPreceding, &cal);
        assert_eq!(adjusted, d(2025, 6, 13));
    }

    #[test]
    fn test_modified_following_through_holiday() {
        // Monday 31 Aug 2020 is the UK summer bank holiday, Sat/Sun before it.
        // Following from Sat 29 Aug lands in September, so go back to Fri 28 Aug.
        let adjusted = adjust(d(2020, 8, 29), BusinessDayConvention::ModifiedFollowing, &CalendarType::Uk);
        assert_eq!(adjusted, d(2020, 8, 28));
    }

    #[test]
    fn test_unadjusted() {
        let saturday = d(2025, 1, 4);
        let adjusted = adjust(saturday, BusinessDayConvention::Unadjusted, &CalendarType::Weekend);
        assert_eq!(adjusted, saturday);
    }

    #[test]
    fn test_business_day_unchanged() {
        let monday = d(2025, 1, 6);
        let adjusted = adjust(monday, BusinessDayConvention::Following, &CalendarType::Weekend);
        assert_eq!(adjusted, monday);
    }

    #[test]
    fn test_parse() {
        assert_eq!(
            "Modified Following".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert_eq!(
            "MF".parse::<BusinessDayConvention>().unwrap(),
            BusinessDayConvention::ModifiedFollowing
        );
        assert!("sideways".parse::<BusinessDayConvention>().is_err());
    }
}
