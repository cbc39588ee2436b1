//! TARGET settlement calendar.

use super::easter::easter_monday_day_of_year;
use crate::types::Date;

/// Returns true if a weekday is a TARGET closing day: New Year's Day,
/// Good Friday, Easter Monday, Labour Day, Christmas Day and 26 December.
pub(super) fn is_holiday(date: Date) -> bool {
    let em = easter_monday_day_of_year(date.year());
    let doy = date.day_of_year();
    if doy == em || doy + 3 == em {
        return true;
    }
    matches!((date.month(), date.day()), (1, 1) | (5, 1) | (12, 25 | 26))
}
