//! Money market deposit instrument.
//!
//! A deposit is the simplest instrument for curve bootstrap, used for the
//! short end of the curve.

use strata_core::calendars::{BusinessDayConvention, Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, Frequency, Tenor};

use super::accrual_factor;
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// A term deposit on an IBOR index.
///
/// # Pricing Formula
///
/// The curve reprices the deposit when:
/// ```text
/// DF(maturity) = DF(start) / (1 + rate × α)
/// ```
/// where α is the accrual factor under the deposit's day count.
///
/// # Example
///
/// ```rust
/// use strata_core::daycounts::DayCountConvention;
/// use strata_core::types::{Date, Tenor};
/// use strata_curves::instruments::IborDeposit;
///
/// let start = Date::from_ymd(2018, 6, 6).unwrap();
/// let deposit = IborDeposit::from_tenor(
///     start,
///     Tenor::parse("3M").unwrap(),
///     0.0231381,
///     DayCountConvention::Act360,
/// )
/// .unwrap();
/// assert_eq!(deposit.maturity(), Date::from_ymd(2018, 9, 6).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IborDeposit {
    start: Date,
    maturity: Date,
    rate: f64,
    day_count: DayCountConvention,
    notional: f64,
    calendar: CalendarType,
    convention: BusinessDayConvention,
    accrual: f64,
}

impl IborDeposit {
    /// Creates a deposit between two dates with notional 100.
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
                "deposit start {start} is after maturity {maturity}"
            )));
        }
        Ok(Self {
            start,
            maturity,
            rate,
            day_count,
            notional: 100.0,
            calendar: CalendarType::Weekend,
            convention: BusinessDayConvention::ModifiedFollowing,
            accrual: accrual_factor(day_count, start, maturity, Frequency::Annual)?,
        })
    }

    /// Creates a deposit from a tenor. The maturity is rolled modified
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
        let convention = BusinessDayConvention::ModifiedFollowing;
        let maturity = CalendarType::Weekend.adjust(start.add_tenor(tenor)?, convention);
        Self::new(start, maturity, rate, day_count)
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the calendar carried with the deposit.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention carried with the deposit.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Returns the start (settlement) date.
    #[must_use]
    pub fn start(&self) -> Date {
        self.start
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the deposit rate.
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

    /// Returns the calendar.
    #[must_use]
    pub fn calendar(&self) -> CalendarType {
        self.calendar
    }

    /// Returns the business day convention.
    #[must_use]
    pub fn convention(&self) -> BusinessDayConvention {
        self.convention
    }

    /// Returns the accrual factor from start to maturity.
    #[must_use]
    pub fn accrual(&self) -> f64 {
        self.accrual
    }

    /// Forward discount factor from start to maturity implied by the rate.
    #[must_use]
    pub fn maturity_df(&self) -> f64 {
        1.0 / (1.0 + self.accrual * self.rate)
    }

    /// Values the deposit, forward to its start date.
    ///
    /// A curve that reprices the deposit returns the notional.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if `valuation_date` is after
    /// maturity.
    pub fn value(&self, valuation_date: Date, curve: &dyn Curve) -> CurveResult<f64> {
        if valuation_date > self.maturity {
            return Err(CurveError::configuration(format!(
                "valuation date {valuation_date} is after deposit maturity {}",
                self.maturity
            )));
        }
        let df = curve.discount_factor(self.maturity);
        let df_start = curve.discount_factor(self.start);
        Ok((1.0 + self.accrual * self.rate) * df * self.notional / df_start)
    }

    /// Returns a copy with the rate shifted by `shift`.
    #[must_use]
    pub fn bumped(&self, shift: f64) -> Self {
        Self {
            rate: self.rate + shift,
            ..self.clone()
        }
    }

    /// Returns a deposit covering `start..end` with this deposit's rate and
    /// conventions.
    pub(crate) fn spanning(&self, start: Date, end: Date) -> CurveResult<Self> {
        Ok(Self::new(start, end, self.rate, self.day_count)?
            .with_notional(self.notional)
            .with_calendar(self.calendar)
            .with_convention(self.convention))
    }

    /// Returns a short description for reports and errors.
    #[must_use]
    pub fn description(&self) -> String {
        let rate = self.rate * 100.0;
        format!("Deposit {rate:.4}% {} to {}", self.start, self.maturity)
    }
}
