//! Tenor type: a signed count of days, weeks, months or years.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{CoreError, CoreResult};

/// Unit of a [`Tenor`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TenorUnit {
    /// Calendar days
    Days,
    /// Weeks of seven calendar days
    Weeks,
    /// Calendar months
    Months,
    /// Calendar years
    Years,
}

impl TenorUnit {
    fn suffix(self) -> char {
        match self {
            TenorUnit::Days => 'D',
            TenorUnit::Weeks => 'W',
            TenorUnit::Months => 'M',
            TenorUnit::Years => 'Y',
        }
    }
}

/// A market tenor such as `3M` or `10Y`.
///
/// Tenors serialize as their string form.
///
/// ```rust
/// use strata_core::types::{Tenor, TenorUnit};
///
/// let tenor: Tenor = "3M".parse().unwrap();
/// assert_eq!(tenor.count(), 3);
/// assert_eq!(tenor.unit(), TenorUnit::Months);
/// assert_eq!(tenor.to_string(), "3M");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct Tenor {
    count: i32,
    unit: TenorUnit,
}

impl Tenor {
    /// Creates a tenor from a count and a unit.
    #[must_use]
    pub const fn new(count: i32, unit: TenorUnit) -> Self {
        Self { count, unit }
    }

    /// Shorthand for a month tenor.
    #[must_use]
    pub const fn months(count: i32) -> Self {
        Self::new(count, TenorUnit::Months)
    }

    /// Shorthand for a year tenor.
    #[must_use]
    pub const fn years(count: i32) -> Self {
        Self::new(count, TenorUnit::Years)
    }

    /// Returns the signed number of units.
    #[must_use]
    pub const fn count(&self) -> i32 {
        self.count
    }

    /// Returns the unit.
    #[must_use]
    pub const fn unit(&self) -> TenorUnit {
        self.unit
    }

    /// Parses a tenor string, e.g. `"1D"`, `"2W"`, `"6m"`, `"10Y"`.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidTenor` if the string is malformed.
    pub fn parse(s: &str) -> CoreResult<Self> {
        let trimmed = s.trim();
        let mut chars = trimmed.chars();
        let unit = match chars.next_back().map(|c| c.to_ascii_uppercase()) {
            Some('D') => TenorUnit::Days,
            Some('W') => TenorUnit::Weeks,
            Some('M') => TenorUnit::Months,
            Some('Y') => TenorUnit::Years,
            Some(_) => return Err(CoreError::invalid_tenor(s, "unknown unit")),
            None => return Err(CoreError::invalid_tenor(s, "empty tenor")),
        };
        let count = chars
            .as_str()
            .parse::<i32>()
            .map_err(|_| CoreError::invalid_tenor(s, "count is not an integer"))?;
        Ok(Self { count, unit })
    }
}

impl fmt::Display for Tenor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}{}", self.count, self.unit.suffix())
    }
}

impl FromStr for Tenor {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl TryFrom<String> for Tenor {
    type Error = CoreError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<Tenor> for String {
    fn from(tenor: Tenor) -> Self {
        tenor.to_string()
    }
}
