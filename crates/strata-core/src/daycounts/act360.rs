//! Actual/360 day count convention.

use super::DayCount;
use crate::error::CoreResult;
use crate::types::Date;

/// Actual/360 day count convention.
///
/// Used for money market instruments, FRAs and most floating legs.
///
/// # Formula
///
/// $$\text{Year Fraction} = \frac{\text{Actual Days}}{360}$$
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Act360;

impl DayCount for Act360 {
    fn name(&self) -> &'static str {
        "ACT/360"
    }

    fn year_fraction(&self, start: Date, end: Date, _reference: Option<Date>) -> CoreResult<f64> {
        Ok(self.day_count(start, end) as f64 / 360.0)
    }

    fn day_count(&self, start: Date, end: Date) -> i64 {
        start.days_between(&end)
    }
}
