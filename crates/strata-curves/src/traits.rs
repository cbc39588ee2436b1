//! Core trait for discounting.
//!
//! Instruments price against [`Curve`] so that the same code works for a
//! finished [`DiscountCurve`](crate::curves::DiscountCurve), a bootstrapped
//! [`IborCurve`](crate::bootstrap::IborCurve), and the candidate curves a
//! bootstrapper builds inside its root search.

use strata_core::Date;

/// Days per year used to place curve nodes.
pub const DAYS_PER_YEAR: f64 = 365.0;

/// Year fraction between two dates on the curve time axis (ACT/365F).
#[must_use]
pub fn curve_time(from: Date, to: Date) -> f64 {
    from.days_between(&to) as f64 / DAYS_PER_YEAR
}

/// A term structure of discount factors anchored at a valuation date.
pub trait Curve: Send + Sync {
    /// Returns the curve's valuation date.
    fn valuation_date(&self) -> Date;

    /// Returns the discount factor at time `t` in years.
    ///
    /// Times at or before zero return the anchor value of 1.
    fn discount_factor_at(&self, t: f64) -> f64;

    /// Returns the time in years from the valuation date to `date`.
    fn year_fraction(&self, date: Date) -> f64 {
        curve_time(self.valuation_date(), date)
    }

    /// Returns the discount factor for `date`.
    fn discount_factor(&self, date: Date) -> f64 {
        self.discount_factor_at(self.year_fraction(date))
    }

    /// Returns the forward discount factor `DF(end) / DF(start)`.
    fn forward_discount_factor(&self, start: Date, end: Date) -> f64 {
        self.discount_factor(end) / self.discount_factor(start)
    }
}
