//! England and Wales bank holidays.

use chrono::Weekday;

use super::easter::easter_monday_day_of_year;
use crate::types::Date;

/// Returns true if a weekday is a UK bank holiday.
///
/// Rules:
/// - New Year's Day (1 January)
/// - Good Friday and Easter Monday
/// - Early May bank holiday (first Monday in May)
/// - Spring bank holiday (last Monday in May)
/// - Summer bank holiday (last Monday in August)
/// - Christmas Day and Boxing Day, with 27/28 December substitutes
///   when they fall on a Monday or Tuesday
pub(super) fn is_holiday(date: Date) -> bool {
    let (m, d) = (date.month(), date.day());
    let weekday = date.weekday();
    let em = easter_monday_day_of_year(date.year());
    let doy = date.day_of_year();

    if doy == em || doy + 3 == em {
        return true;
    }

    match (m, d) {
        (1, 1) => true,
        (5, 1..=7) | (5, 25..=31) | (8, 25..=31) => weekday == Weekday::Mon,
        (12, 25 | 26) => true,
        (12, 27 | 28) => matches!(weekday, Weekday::Mon | Weekday::Tue),
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
    fn test_uk_holidays_2018() {
        let holidays = CalendarType::Uk.holidays_in_year(2018);
        assert_eq!(
            holidays,
            vec![
                d(2018, 1, 1),
                d(2018, 3, 30),
                d(2018, 4, 2),
                d(2018, 5, 7),
                d(2018, 5, 28),
                d(2018, 8, 27),
                d(2018, 12, 25),
                d(2018, 12, 26),
            ]
        );
    }

    #[test]
    fn test_christmas_substitutes() {
        // 2021: Christmas Sat, Boxing Day Sun, substitutes Mon 27 and Tue 28
        assert!(is_holiday(d(2021, 12, 27)));
        assert!(is_holiday(d(2021, 12, 28)));
        // 2018: 27 Dec is a Thursday
        assert!(!is_holiday(d(2018, 12, 27)));
    }

    #[test]
    fn test_ordinary_monday() {
        assert!(!is_holiday(d(2018, 5, 14)));
        assert!(CalendarType::Uk.is_business_day(d(2018, 5, 14)));
    }
}
