//! Domain types for term-structure calculations.
//!
//! - [`Date`]: Calendar date with month arithmetic and IMM/CDS roll dates
//! - [`Tenor`]: Market tenor such as `3M` or `10Y`
//! - [`Frequency`]: Payment frequency
//! - [`Compounding`]: Interest compounding convention

mod date;
mod frequency;
mod tenor;

pub use date::Date;
pub(crate) use date::{days_in_month, is_leap_year};
pub use frequency::{Compounding, Frequency};
pub use tenor::{Tenor, TenorUnit};
