//! Easter Monday lookup.
//!
//! Day-of-year of Easter Monday is tabulated for 1901 through 2199. Years
//! outside that range fall back to the Anonymous Gregorian algorithm.

use log::trace;

/// First year covered by [`EASTER_MONDAY_DAY_OF_YEAR`].
pub const FIRST_TABULATED_YEAR: i32 = 1901;

/// Day of year (1-based) of Easter Monday, indexed by `year - 1901`.
#[rustfmt::skip]
static EASTER_MONDAY_DAY_OF_YEAR: [u16; 299] = [
    98, 90, 103, 95, 114, 106, 91, 111, 102, 87,
    107, 99, 83, 103, 95, 115, 99, 91, 111, 96,
    87, 107, 92, 112, 103, 95, 108, 100, 91, 111,
    96, 88, 107, 92, 112, 104, 88, 108, 100, 85,
    104, 96, 116, 101, 92, 112, 97, 89, 108, 100,
    85, 105, 96, 109, 101, 93, 112, 97, 89, 109,
    93, 113, 105, 90, 109, 101, 86, 106, 97, 89,
    102, 94, 113, 105, 90, 110, 101, 86, 106, 98,
    110, 102, 94, 114, 98, 90, 110, 95, 86, 106,
    91, 111, 102, 94, 107, 99, 90, 103, 95, 115,
    106, 91, 111, 103, 87, 107, 99, 84, 103, 95,
    115, 100, 91, 111, 96, 88, 107, 92, 112, 104,
    95, 108, 100, 92, 111, 96, 88, 108, 92, 112,
    104, 89, 108, 100, 85, 105, 96, 116, 101, 93,
    112, 97, 89, 109, 100, 85, 105, 97, 109, 101,
    93, 113, 97, 89, 109, 94, 113, 105, 90, 110,
    101, 86, 106, 98, 89, 102, 94, 114, 105, 90,
    110, 102, 86, 106, 98, 111, 102, 94, 114, 99,
    90, 110, 95, 87, 106, 91, 111, 103, 94, 107,
    99, 91, 103, 95, 115, 107, 91, 111, 103, 88,
    108, 100, 85, 105, 96, 109, 101, 93, 112, 97,
    89, 109, 93, 113, 105, 90, 109, 101, 86, 106,
    97, 89, 102, 94, 113, 105, 90, 110, 101, 86,
    106, 98, 110, 102, 94, 114, 98, 90, 110, 95,
    86, 106, 91, 111, 102, 94, 107, 99, 90, 103,
    95, 115, 106, 91, 111, 103, 87, 107, 99, 84,
    103, 95, 115, 100, 91, 111, 96, 88, 107, 92,
    112, 104, 95, 108, 100, 92, 111, 96, 88, 108,
    92, 112, 104, 89, 108, 100, 85, 105, 96, 116,
    101, 93, 112, 97, 89, 109, 100, 85, 105,
];

/// Returns the day of year (1-based) of Easter Monday in `year`.
#[must_use]
pub fn easter_monday_day_of_year(year: i32) -> u32 {
    let tabulated = usize::try_from(year - FIRST_TABULATED_YEAR)
        .ok()
        .and_then(|i| EASTER_MONDAY_DAY_OF_YEAR.get(i));
    match tabulated {
        Some(&day) => u32::from(day),
        None => {
            trace!("Easter Monday for {year} outside table, using computus");
            computus_easter_monday(year)
        }
    }
}

/// Day of year of Easter Monday by the Anonymous Gregorian algorithm.
fn computus_easter_monday(year: i32) -> u32 {
    let a = year % 19;
    let b = year / 100;
    let c = year % 100;
    let d = b / 4;
    let e = b % 4;
    let f = (b + 8) / 25;
    let g = (b - f + 1) / 3;
    let h = (19 * a + b - d - g + 15) % 30;
    let i = c / 4;
    let k = c % 4;
    let l = (32 + 2 * e + 2 * i - h - k) % 7;
    let m = (a + 11 * h + 22 * l) / 451;
    let month = (h + l - 7 * m + 114) / 31;
    let day = ((h + l - 7 * m + 114) % 31) + 1;

    // Easter Sunday falls in March or April.
    let leap = i32::from(crate::types::is_leap_year(year));
    let sunday = if month == 3 { 59 + leap + day } else { 90 + leap + day };
    (sunday + 1) as u32
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_known_years() {
        // Easter Monday 2018 was 2 April (day 92)
        assert_eq!(easter_monday_day_of_year(2018), 92);
        // Easter Monday 2019 was 22 April (day 112)
        assert_eq!(easter_monday_day_of_year(2019), 112);
        // Easter Monday 2024 was 1 April in a leap year (day 92)
        assert_eq!(easter_monday_day_of_year(2024), 92);
    }

    #[test]
    fn test_table_agrees_with_computus() {
        for year in FIRST_TABULATED_YEAR..FIRST_TABULATED_YEAR + 299 {
            assert_eq!(
                easter_monday_day_of_year(year),
                computus_easter_monday(year),
                "year {year}"
            );
        }
    }

    #[test]
    fn test_outside_table() {
        // Easter Sunday 1900 was 15 April, Monday is day 106
        assert_eq!(easter_monday_day_of_year(1900), 106);
        // Easter Sunday 2200 is 6 April, Monday is day 97
        assert_eq!(easter_monday_day_of_year(2200), 97);
    }
}
