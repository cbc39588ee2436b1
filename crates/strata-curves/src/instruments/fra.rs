//! Forward Rate Agreement instrument.

use strata_core::calendars::{BusinessDayConvention, Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, Frequency, Tenor};

use super::accrual_factor;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A forward rate agreement on an IBOR index.
///
/// The FRA exchanges the index fixing for the contract rate over
/// `start..maturity`, settled at maturity.
///
/// # Pricing Formula
///
/// ```text
/// F     = (DF_idx(start) / DF_idx(maturity) - 1) / α
/// value = α × (F - K) × DF_disc(maturity) × N / DF_disc(valuation)
/// ```
///
/// The value is negated when the holder pays the fixed rate.
#[derive(Debug, Clone, PartialEq)]
pub struct IborFra {
    start: Date,
    maturity: Date,
    rate: f64,
    day_count: DayCountConvention,
    notional: f64,
    pay_fixed: bool,
    calendar: CalendarType,
    convention: BusinessDayConvention,
    accrual: f64,
}

impl IborFra {
    /// Creates a FRA with notional 100, paying the fixed rate.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if `start` is after `maturity`.
    pub fn new(
        start: Date,
        maturity: Date,
        rate: f64,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        if start > maturity {
            return Err(CurveError::configuration(format!(
                "FRA settlement {start} is after maturity {maturity}"
            )));
        }
        Ok(Self {
            start,
            maturity,
            rate,
            day_count,
            notional: 100.0,
            pay_fixed: true,
            calendar: CalendarType::Weekend,
            convention: BusinessDayConvention::ModifiedFollowing,
            accrual: accrual_factor(day_count, start, maturity, Frequency::Annual)?,
        })
    }

    /// Creates a FRA whose maturity is `start + tenor`, rolled modified
    /// following on a weekend calendar.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the tenor cannot be applied.
    pub fn from_tenor(
        start: Date,
        tenor: Tenor,
        rate: f64,
        day_count: DayCountConvention,
    ) -> CurveResult<Self> {
        let maturity = CalendarType::Weekend.adjust(
            start.add_tenor(tenor)?,
            BusinessDayConvention::ModifiedFollowing,
        );
        Self::new(start, maturity, rate, day_count)
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets whether the holder pays the fixed rate.
    #[must_use]
    pub fn with_pay_fixed(mut self, pay_fixed: bool) -> Self {
        self.pay_fixed = pay_fixed;
        self
    }

    /// Sets the calendar carried with the FRA.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention carried with the FRA.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Returns the settlement date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the contract rate.
    #[must_use]
    pub fn rate(&self) -> f64 {
        self.rate
    }

    /// Returns the day count convention.
    #[must_use]
    pub fn day_count(&self) -> DayCountConvention {
        self.day_count
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.notional
    }

    /// Returns true if the holder pays the fixed rate.
    #[must_use]
    pub fn pay_fixed(&self) -> bool {
        self.pay_fixed
    }

    /// Returns the accrual factor from settlement to maturity.
    #[must_use]
    pub fn accrual(&self) -> f64 {
        self.accrual
    }

    /// Maturity discount factor that makes `curve` reprice the contract
    /// rate, given the curve's settlement discount factor.
    #[must_use]
    pub fn maturity_df(&self, curve: &dyn Curve) -> f64 {
        curve.discount_factor(self.start) / (1.0 + self.accrual * self.rate)
    }

    /// Values the FRA with forwards from `index` and discounting on
    /// `discount`, which defaults to the index curve.
    #[must_use]
    pub fn value(
        &self,
        valuation_date: Date,
        index: &dyn Curve,
        discount: Option<&dyn Curve>,
    ) -> f64 {
        let discount = discount.unwrap_or(index);
        let forward =
            (index.discount_factor(self.start) / index.discount_factor(self.maturity) - 1.0)
                / self.accrual;
        let value = self.accrual * (forward - self.rate) * discount.discount_factor(self.maturity)
            * self.notional
            / discount.discount_factor(valuation_date);
        if self.pay_fixed {
            -value
        } else {
            value
        }
    }

    /// Returns a copy with the contract rate shifted by `shift`.
    #[must_use]
    pub fn bumped(&self, shift: f64) -> Self {
        Self {
            rate: self.rate + shift,
            ..self.clone()
        }
    }

    /// Returns a short description for reports and errors.
    #[must_use]
    pub fn description(&self) -> String {
        let rate = self.rate * 100.0;
        format!("FRA {rate:.4}% {} to {}", self.start, self.maturity)
    }
}
