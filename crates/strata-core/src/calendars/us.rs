//! US federal holidays.

use chrono::Weekday;

use crate::types::Date;

/// Returns true if a weekday is a US federal holiday.
///
/// Fixed-date holidays observed on a weekend roll to the adjacent
/// Friday or Monday.
pub(super) fn is_holiday(date: Date) -> bool {
    let weekday = date.weekday();
    match (date.month(), date.day()) {
        // New Year's Day
        (1, 1) => true,
        // Martin Luther King Jr. Day, Presidents' Day
        (1 | 2, 15..=21) => weekday == Weekday::Mon,
        // Memorial Day
        (5, 25..=31) => weekday == Weekday::Mon,
        // Independence Day
        (7, 4) => true,
        (7, 5) => weekday == Weekday::Mon,
        (7, 3) => weekday == Weekday::Fri,
        // Labor Day
        (9, 1..=7) => weekday == Weekday::Mon,
        // Columbus Day
        (10, 8..=14) => weekday == Weekday::Mon,
        // Veterans Day
        (11, 11) => true,
        (11, 12) => weekday == Weekday::Mon,
        (11, 10) => weekday == Weekday::Fri,
        // Thanksgiving
        (11, 22..=28) => weekday == Weekday::Thu,
        // Christmas Day
        (12, 25) => true,
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::calendars::{Calendar, CalendarType};

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    #[test]
    fn test_us_holidays_2018() {
        let holidays = CalendarType::Us.holidays_in_year(2018);
        assert_eq!(
            holidays,
            vec![
                d(2018, 1, 1),
                d(2018, 1, 15),
                d(2018, 2, 19),
                d(2018, 5, 28),
                d(2018, 7, 4),
                d(2018, 9, 3),
                d(2018, 10, 8),
                d(2018, 11, 12),
                d(2018, 11, 22),
                d(2018, 12, 25),
            ]
        );
    }

    #[test]
    fn test_weekend_observance() {
        // 4 July 2020 was a Saturday, observed Friday 3 July
        assert!(is_holiday(d(2020, 7, 3)));
        // 4 July 2021 was a Sunday, observed Monday 5 July
        assert!(is_holiday(d(2021, 7, 5)));
    }
}
