//! Fixed and floating swap legs.
//!
//! A leg is a sequence of accrual periods taken from a [`Schedule`], each
//! paid on its adjusted end date shifted by an optional payment lag.

use strata_core::calendars::{BusinessDayConvention, Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::schedule::{DateGeneration, Schedule, ScheduleConfig};
use strata_core::types::{Date, Frequency};

use super::{accrual_factor, LegDirection};
use crate::error::CurveResult;
use crate::traits::Curve;

/// Configuration for a [`FixedLeg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FixedLegConfig {
    /// Coupon frequency.
    pub frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Notional the coupon is paid on.
    pub notional: f64,
    /// Principal paid with the last coupon, as a fraction of notional.
    pub principal: f64,
    /// Payment delay after each accrual end, in business days.
    pub payment_lag: i32,
    /// Calendar for schedule and payment adjustment.
    pub calendar: CalendarType,
    /// Business day convention for schedule adjustment.
    pub convention: BusinessDayConvention,
    /// Schedule generation direction.
    pub generation: DateGeneration,
}

impl Default for FixedLegConfig {
    fn default() -> Self {
        Self {
            frequency: Frequency::SemiAnnual,
            day_count: DayCountConvention::Thirty360Bond,
            notional: 1_000_000.0,
            principal: 0.0,
            payment_lag: 0,
            calendar: CalendarType::Weekend,
            convention: BusinessDayConvention::Following,
            generation: DateGeneration::Backward,
        }
    }
}

impl FixedLegConfig {
    /// Sets the coupon frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the principal paid at the end.
    #[must_use]
    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the payment lag in business days.
    #[must_use]
    pub fn with_payment_lag(mut self, payment_lag: i32) -> Self {
        self.payment_lag = payment_lag;
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the schedule generation direction.
    #[must_use]
    pub fn with_generation(mut self, generation: DateGeneration) -> Self {
        self.generation = generation;
        self
    }
}

/// Configuration for a [`FloatLeg`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FloatLegConfig {
    /// Reset and payment frequency.
    pub frequency: Frequency,
    /// Accrual day count.
    pub day_count: DayCountConvention,
    /// Spread over the index forward.
    pub spread: f64,
    /// Notional.
    pub notional: f64,
    /// Principal paid with the last coupon, as a fraction of notional.
    pub principal: f64,
    /// Payment delay after each accrual end, in business days.
    pub payment_lag: i32,
    /// Calendar for schedule and payment adjustment.
    pub calendar: CalendarType,
    /// Business day convention for schedule adjustment.
    pub convention: BusinessDayConvention,
    /// Schedule generation direction.
    pub generation: DateGeneration,
}

impl Default for FloatLegConfig {
    fn default() -> Self {
        Self {
            frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Thirty360E,
            spread: 0.0,
            notional: 1_000_000.0,
            principal: 0.0,
            payment_lag: 0,
            calendar: CalendarType::Weekend,
            convention: BusinessDayConvention::Following,
            generation: DateGeneration::Backward,
        }
    }
}

impl FloatLegConfig {
    /// Sets the reset frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
        self
    }

    /// Sets the spread.
    #[must_use]
    pub fn with_spread(mut self, spread: f64) -> Self {
        self.spread = spread;
        self
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the principal paid at the end.
    #[must_use]
    pub fn with_principal(mut self, principal: f64) -> Self {
        self.principal = principal;
        self
    }

    /// Sets the payment lag in business days.
    #[must_use]
    pub fn with_payment_lag(mut self, payment_lag: i32) -> Self {
        self.payment_lag = payment_lag;
        self
    }

    /// Sets the calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the schedule generation direction.
    #[must_use]
    pub fn with_generation(mut self, generation: DateGeneration) -> Self {
        self.generation = generation;
        self
    }
}

/// Accrual periods shared by both leg types.
#[derive(Debug, Clone, PartialEq)]
struct Periods {
    accrual_starts: Vec<Date>,
    accrual_ends: Vec<Date>,
    payment_dates: Vec<Date>,
    accruals: Vec<f64>,
}

impl Periods {
    #[allow(clippy::too_many_arguments)]
    fn generate(
        effective: Date,
        termination: Date,
        frequency: Frequency,
        day_count: DayCountConvention,
        payment_lag: i32,
        calendar: CalendarType,
        convention: BusinessDayConvention,
        generation: DateGeneration,
    ) -> CurveResult<Self> {
        let schedule = Schedule::new(
            ScheduleConfig::new(effective, termination)
                .with_frequency(frequency)
                .with_calendar(calendar)
                .with_convention(convention)
                .with_generation(generation),
        )?;

        let n = schedule.num_periods();
        let mut periods = Self {
            accrual_starts: Vec::with_capacity(n),
            accrual_ends: Vec::with_capacity(n),
            payment_dates: Vec::with_capacity(n),
            accruals: Vec::with_capacity(n),
        };
        for (start, end) in schedule.periods() {
            let payment = if payment_lag == 0 {
                end
            } else {
                calendar.add_business_days(end, payment_lag)
            };
            periods.accrual_starts.push(start);
            periods.accrual_ends.push(end);
            periods.payment_dates.push(payment);
            periods.accruals.push(accrual_factor(day_count, start, end, frequency)?);
        }
        Ok(periods)
    }

    fn last_payment_date(&self) -> Date {
        self.payment_dates[self.payment_dates.len() - 1]
    }
}

/// A leg paying a fixed coupon.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Date;
/// use strata_curves::curves::DiscountCurve;
/// use strata_curves::instruments::{FixedLeg, FixedLegConfig, LegDirection};
///
/// let valuation = Date::from_ymd(2018, 6, 20).unwrap();
/// let leg = FixedLeg::new(
///     valuation,
///     Date::from_ymd(2020, 6, 20).unwrap(),
///     LegDirection::Receive,
///     0.03,
///     FixedLegConfig::default(),
/// )
/// .unwrap();
/// assert_eq!(leg.payment_dates().len(), 4);
///
/// let curve = DiscountCurve::flat(valuation, 0.03).unwrap();
/// assert!(leg.value(valuation, &curve) > 0.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct FixedLeg {
    effective: Date,
    termination: Date,
    maturity: Date,
    direction: LegDirection,
    coupon: f64,
    config: FixedLegConfig,
    periods: Periods,
}

impl FixedLeg {
    /// Generates the leg's schedule and accrual factors.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the schedule is invalid.
    pub fn new(
        effective: Date,
        termination: Date,
        direction: LegDirection,
        coupon: f64,
        config: FixedLegConfig,
    ) -> CurveResult<Self> {
        let periods = Periods::generate(
            effective,
            termination,
            config.frequency,
            config.day_count,
            config.payment_lag,
            config.calendar,
            config.convention,
            config.generation,
        )?;
        Ok(Self {
            effective,
            termination,
            maturity: config.calendar.adjust(termination, config.convention),
            direction,
            coupon,
            config,
            periods,
        })
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective
    }

    /// Returns the unadjusted termination date.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination
    }

    /// Returns the adjusted termination date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity
    }

    /// Returns the leg direction.
    #[must_use]
    pub fn direction(&self) -> LegDirection {
        self.direction
    }

    /// Returns the fixed coupon.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.config.notional
    }

    /// Returns a copy paying a different coupon on the same schedule.
    #[must_use]
    pub fn with_coupon(&self, coupon: f64) -> Self {
        Self {
            coupon,
            ..self.clone()
        }
    }

    /// Returns the leg configuration.
    #[must_use]
    pub fn config(&self) -> &FixedLegConfig {
        &self.config
    }

    /// Returns the accrual start dates.
    #[must_use]
    pub fn accrual_start_dates(&self) -> &[Date] {
        &self.periods.accrual_starts
    }

    /// Returns the accrual end dates.
    #[must_use]
    pub fn accrual_end_dates(&self) -> &[Date] {
        &self.periods.accrual_ends
    }

    /// Returns the payment dates.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.periods.payment_dates
    }

    /// Returns the accrual factor of each period.
    #[must_use]
    pub fn accruals(&self) -> &[f64] {
        &self.periods.accruals
    }

    /// Returns the last payment date.
    #[must_use]
    pub fn last_payment_date(&self) -> Date {
        self.periods.last_payment_date()
    }

    /// Returns the coupon amount of each period.
    #[must_use]
    pub fn payments(&self) -> Vec<f64> {
        self.periods
            .accruals
            .iter()
            .map(|alpha| alpha * self.config.notional * self.coupon)
            .collect()
    }

    /// Sum of `α × DF(payment) / DF(valuation)` over payments after the
    /// valuation date, per unit notional.
    #[must_use]
    pub fn annuity(&self, valuation_date: Date, discount: &dyn Curve) -> f64 {
        let df_valuation = discount.discount_factor(valuation_date);
        self.periods
            .payment_dates
            .iter()
            .zip(&self.periods.accruals)
            .filter(|(payment, _)| **payment > valuation_date)
            .map(|(payment, alpha)| alpha * discount.discount_factor(*payment) / df_valuation)
            .sum()
    }

    /// Present value at `valuation_date` of the payments after it,
    /// negated for a paid leg.
    #[must_use]
    pub fn value(&self, valuation_date: Date, discount: &dyn Curve) -> f64 {
        let mut pv = self.coupon * self.config.notional * self.annuity(valuation_date, discount);

        let last_payment = self.last_payment_date();
        if last_payment > valuation_date {
            let df = discount.forward_discount_factor(valuation_date, last_payment);
            pv += self.config.principal * df * self.config.notional;
        }
        pv * self.direction.sign()
    }
}

/// A leg paying the index forward plus a spread.
#[derive(Debug, Clone, PartialEq)]
pub struct FloatLeg {
    effective: Date,
    termination: Date,
    maturity: Date,
    direction: LegDirection,
    config: FloatLegConfig,
    periods: Periods,
}

impl FloatLeg {
    /// Generates the leg's schedule and accrual factors.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the schedule is invalid.
    pub fn new(
        effective: Date,
        termination: Date,
        direction: LegDirection,
        config: FloatLegConfig,
    ) -> CurveResult<Self> {
        let periods = Periods::generate(
            effective,
            termination,
            config.frequency,
            config.day_count,
            config.payment_lag,
            config.calendar,
            config.convention,
            config.generation,
        )?;
        Ok(Self {
            effective,
            termination,
            maturity: config.calendar.adjust(termination, config.convention),
            direction,
            config,
            periods,
        })
    }

    /// Returns the effective date.
    #[must_use]
    pub fn effective_date(&self) -> Date {
        self.effective
    }

    /// Returns the unadjusted termination date.
    #[must_use]
    pub fn termination_date(&self) -> Date {
        self.termination
    }

    /// Returns the adjusted termination date.
    #[must_use]
    pub fn maturity_date(&self) -> Date {
        self.maturity
    }

    /// Returns the leg direction.
    #[must_use]
    pub fn direction(&self) -> LegDirection {
        self.direction
    }

    /// Returns the spread.
    #[must_use]
    pub fn spread(&self) -> f64 {
        self.config.spread
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.config.notional
    }

    /// Returns the leg configuration.
    #[must_use]
    pub fn config(&self) -> &FloatLegConfig {
        &self.config
    }

    /// Returns the payment dates.
    #[must_use]
    pub fn payment_dates(&self) -> &[Date] {
        &self.periods.payment_dates
    }

    /// Returns the accrual factor of each period.
    #[must_use]
    pub fn accruals(&self) -> &[f64] {
        &self.periods.accruals
    }

    /// Returns the last payment date.
    #[must_use]
    pub fn last_payment_date(&self) -> Date {
        self.periods.last_payment_date()
    }

    /// Present value at `valuation_date` of the payments after it,
    /// negated for a paid leg.
    ///
    /// Forwards come from `index` and payments are discounted on
    /// `discount`. When given, `first_fixing` replaces the forward of the
    /// first live period.
    #[must_use]
    pub fn value(
        &self,
        valuation_date: Date,
        index: &dyn Curve,
        discount: &dyn Curve,
        first_fixing: Option<f64>,
    ) -> f64 {
        let df_valuation = discount.discount_factor(valuation_date);
        let notional = self.config.notional;
        let mut fixing = first_fixing;
        let mut pv = 0.0;
        let mut last_df = 0.0;

        for k in 0..self.periods.payment_dates.len() {
            let payment = self.periods.payment_dates[k];
            if payment <= valuation_date {
                continue;
            }
            let alpha = self.periods.accruals[k];
            let forward = fixing.take().unwrap_or_else(|| {
                let df_start = index.discount_factor(self.periods.accrual_starts[k]);
                let df_end = index.discount_factor(self.periods.accrual_ends[k]);
                (df_start / df_end - 1.0) / alpha
            });
            last_df = discount.discount_factor(payment) / df_valuation;
            pv += (forward + self.config.spread) * alpha * notional * last_df;
        }

        if self.last_payment_date() > valuation_date {
            pv += self.config.principal * last_df * notional;
        }
        pv * self.direction.sign()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::curves::DiscountCurve;
    use approx::assert_relative_eq;

    fn date(y: i32, m: u32, d: u32) -> Date {
        Date::from_ymd(y, m, d).unwrap()
    }

    #[test]
    fn test_fixed_leg_schedule() {
        let leg = FixedLeg::new(
            date(2018, 6, 20),
            date(2020, 6, 20),
            LegDirection::Pay,
            0.03,
            FixedLegConfig::default(),
        )
        .unwrap();
        assert_eq!(
            leg.payment_dates(),
            &[date(2018, 12, 20), date(2019, 6, 20), date(2019, 12, 20), date(2020, 6, 22)]
        );
        assert_eq!(leg.accruals()[0], 0.5);
        assert_eq!(leg.maturity_date(), date(2020, 6, 22));
        assert_relative_eq!(leg.payments()[0], 15_000.0, epsilon = 1e-9);
    }

    #[test]
    fn test_fixed_leg_value_and_direction() {
        let valuation = date(2018, 6, 20);
        let curve = DiscountCurve::flat(valuation, 0.02).unwrap();
        let receive = FixedLeg::new(
            valuation,
            date(2020, 6, 20),
            LegDirection::Receive,
            0.03,
            FixedLegConfig::default(),
        )
        .unwrap();
        let expected: f64 = receive
            .payment_dates()
            .iter()
            .zip(receive.accruals())
            .map(|(d, a)| a * 0.03 * 1e6 * curve.discount_factor(*d))
            .sum();
        assert_relative_eq!(receive.value(valuation, &curve), expected, epsilon = 1e-8);

        let pay = FixedLeg::new(
            valuation,
            date(2020, 6, 20),
            LegDirection::Pay,
            0.03,
            FixedLegConfig::default(),
        )
        .unwrap();
        assert_relative_eq!(pay.value(valuation, &curve), -expected, epsilon = 1e-8);
    }

    #[test]
    fn test_fixed_leg_skips_paid_coupons() {
        let curve = DiscountCurve::flat(date(2018, 6, 20), 0.02).unwrap();
        let leg = FixedLeg::new(
            date(2018, 6, 20),
            date(2020, 6, 20),
            LegDirection::Receive,
            0.03,
            FixedLegConfig::default(),
        )
        .unwrap();
        // Valuing on a payment date excludes that payment
        let on_coupon = leg.annuity(date(2018, 12, 20), &curve);
        let df_val = curve.discount_factor(date(2018, 12, 20));
        let expected: f64 = leg.payment_dates()[1..]
            .iter()
            .zip(&leg.accruals()[1..])
            .map(|(d, a)| a * curve.discount_factor(*d) / df_val)
            .sum();
        assert_relative_eq!(on_coupon, expected, epsilon = 1e-14);
        assert_eq!(leg.value(date(2021, 1, 1), &curve), 0.0);
    }

    #[test]
    fn test_principal_and_payment_lag() {
        let valuation = date(2018, 6, 20);
        let curve = DiscountCurve::flat(valuation, 0.02).unwrap();
        let leg = FixedLeg::new(
            valuation,
            date(2019, 6, 20),
            LegDirection::Receive,
            0.0,
            FixedLegConfig::default()
                .with_frequency(Frequency::Annual)
                .with_principal(1.0)
                .with_payment_lag(2),
        )
        .unwrap();
        // 2019-06-20 is a Thursday, two business days later is Monday
        assert_eq!(leg.last_payment_date(), date(2019, 6, 24));
        assert_relative_eq!(
            leg.value(valuation, &curve),
            1e6 * curve.discount_factor(date(2019, 6, 24)),
            epsilon = 1e-8
        );
    }

    #[test]
    fn test_float_leg_with_principal_is_par() {
        // Receiving index flat plus notional at the end is worth par on the index curve
        let valuation = date(2018, 6, 20);
        let curve = DiscountCurve::flat(valuation, 0.025).unwrap();
        let leg = FloatLeg::new(
            valuation,
            date(2023, 6, 20),
            LegDirection::Receive,
            FloatLegConfig::default()
                .with_day_count(DayCountConvention::Act365Fixed)
                .with_principal(1.0),
        )
        .unwrap();
        let last = leg.last_payment_date();
        let par = 1e6 * (1.0 - curve.discount_factor(last)) + 1e6 * curve.discount_factor(last);
        assert_relative_eq!(leg.value(valuation, &curve, &curve, None), par, epsilon = 1e-6);
    }

    #[test]
    fn test_float_leg_first_fixing_and_spread() {
        let valuation = date(2018, 6, 20);
        let curve = DiscountCurve::flat(valuation, 0.025).unwrap();
        let config = FloatLegConfig::default().with_frequency(Frequency::Annual);
        let leg = FloatLeg::new(valuation, date(2020, 6, 20), LegDirection::Receive, config).unwrap();
        let fixed = leg.value(valuation, &curve, &curve, Some(0.10));
        let projected = leg.value(valuation, &curve, &curve, None);

        let alpha = leg.accruals()[0];
        let df1 = curve.discount_factor(leg.payment_dates()[0]);
        let forward = (1.0 / df1 - 1.0) / alpha;
        assert_relative_eq!(fixed - projected, (0.10 - forward) * alpha * 1e6 * df1, epsilon = 1e-6);

        let spread_leg = FloatLeg::new(
            valuation,
            date(2020, 6, 20),
            LegDirection::Pay,
            config.with_spread(0.01),
        )
        .unwrap();
        let annuity: f64 = leg
            .payment_dates()
            .iter()
            .zip(leg.accruals())
            .map(|(d, a)| a * curve.discount_factor(*d))
            .sum();
        assert_relative_eq!(
            spread_leg.value(valuation, &curve, &curve, None),
            -(projected + 0.01 * 1e6 * annuity),
            epsilon = 1e-6
        );
    }
}
