//! Fixed against floating interest rate swap.

use strata_core::calendars::{BusinessDayConvention, Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::schedule::DateGeneration;
use strata_core::types::{Date, Frequency, Tenor};

use super::{FixedLeg, FixedLegConfig, FloatLeg, FloatLegConfig, LegDirection};
use crate::error::{CurveError, CurveResult};
use crate::traits::Curve;

/// Annuities below this are treated as zero.
const MIN_PV01: f64 = 1e-10;

/// Swap terms shared by both legs, other than the fixed leg's own
/// frequency and day count.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwapConfig {
    /// Notional of both legs.
    pub notional: f64,
    /// Spread over the index on the float leg.
    pub float_spread: f64,
    /// Float leg reset frequency.
    pub float_frequency: Frequency,
    /// Float leg day count.
    pub float_day_count: DayCountConvention,
    /// Calendar for both schedules.
    pub calendar: CalendarType,
    /// Business day convention for both schedules.
    pub convention: BusinessDayConvention,
    /// Schedule generation direction.
    pub generation: DateGeneration,
}

impl Default for SwapConfig {
    fn default() -> Self {
        Self {
            notional: 1_000_000.0,
            float_spread: 0.0,
            float_frequency: Frequency::Quarterly,
            float_day_count: DayCountConvention::Thirty360E,
            calendar: CalendarType::Weekend,
            convention: BusinessDayConvention::Following,
            generation: DateGeneration::Backward,
        }
    }
}

impl SwapConfig {
    /// Overnight index swap terms: an annual float leg.
    #[must_use]
    pub fn ois() -> Self {
        Self::default().with_float_frequency(Frequency::Annual)
    }

    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets the float spread.
    #[must_use]
    pub fn with_float_spread(mut self, spread: f64) -> Self {
        self.float_spread = spread;
        self
    }

    /// Sets the float leg frequency.
    #[must_use]
    pub fn with_float_frequency(mut self, frequency: Frequency) -> Self {
        self.float_frequency = frequency;
        self
    }

    /// Sets the float leg day count.
    #[must_use]
    pub fn with_float_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.float_day_count = day_count;
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

/// A vanilla swap: a fixed leg against an IBOR float leg in the opposite
/// direction.
///
/// `direction` is the direction of the fixed leg, so a `Pay` swap pays
/// fixed and receives floating.
///
/// # Example
///
/// ```rust
/// use strata_core::daycounts::DayCountConvention;
/// use strata_core::types::{Date, Frequency, Tenor};
/// use strata_curves::curves::DiscountCurve;
/// use strata_curves::instruments::{IborSwap, LegDirection, SwapConfig};
///
/// let valuation = Date::from_ymd(2018, 6, 8).unwrap();
/// let curve = DiscountCurve::flat(valuation, 0.03).unwrap();
/// let swap = IborSwap::from_tenor(
///     valuation,
///     Tenor::parse("5Y").unwrap(),
///     LegDirection::Pay,
///     0.03,
///     Frequency::SemiAnnual,
///     DayCountConvention::Thirty360E,
///     SwapConfig::default(),
/// )
/// .unwrap();
///
/// let par = swap.swap_rate(valuation, &curve, None, None).unwrap();
/// let at_par = swap.bumped(par - 0.03);
/// assert!(at_par.value(valuation, &curve, None, None).abs() < 1e-6);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IborSwap {
    effective: Date,
    termination: Date,
    maturity: Date,
    direction: LegDirection,
    coupon: f64,
    fixed_frequency: Frequency,
    fixed_day_count: DayCountConvention,
    config: SwapConfig,
    fixed_leg: FixedLeg,
    float_leg: FloatLeg,
}

impl IborSwap {
    /// Creates a swap between two dates.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if either leg's schedule is
    /// invalid.
    pub fn new(
        effective: Date,
        termination: Date,
        direction: LegDirection,
        coupon: f64,
        fixed_frequency: Frequency,
        fixed_day_count: DayCountConvention,
        config: SwapConfig,
    ) -> CurveResult<Self> {
        let fixed_leg = FixedLeg::new(
            effective,
            termination,
            direction,
            coupon,
            FixedLegConfig::default()
                .with_frequency(fixed_frequency)
                .with_day_count(fixed_day_count)
                .with_notional(config.notional)
                .with_calendar(config.calendar)
                .with_convention(config.convention)
                .with_generation(config.generation),
        )?;
        let float_leg = FloatLeg::new(
            effective,
            termination,
            direction.opposite(),
            FloatLegConfig::default()
                .with_frequency(config.float_frequency)
                .with_day_count(config.float_day_count)
                .with_spread(config.float_spread)
                .with_notional(config.notional)
                .with_calendar(config.calendar)
                .with_convention(config.convention)
                .with_generation(config.generation),
        )?;
        Ok(Self {
            effective,
            termination,
            maturity: config.calendar.adjust(termination, config.convention),
            direction,
            coupon,
            fixed_frequency,
            fixed_day_count,
            config,
            fixed_leg,
            float_leg,
        })
    }

    /// Creates a swap terminating `tenor` after `effective`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the tenor cannot be applied
    /// or a schedule is invalid.
    pub fn from_tenor(
        effective: Date,
        tenor: Tenor,
        direction: LegDirection,
        coupon: f64,
        fixed_frequency: Frequency,
        fixed_day_count: DayCountConvention,
        config: SwapConfig,
    ) -> CurveResult<Self> {
        let termination = effective.add_tenor(tenor)?;
        Self::new(
            effective,
            termination,
            direction,
            coupon,
            fixed_frequency,
            fixed_day_count,
            config,
        )
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

    /// Returns the fixed leg direction.
    #[must_use]
    pub fn direction(&self) -> LegDirection {
        self.direction
    }

    /// Returns the fixed coupon.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the fixed leg frequency.
    #[must_use]
    pub fn fixed_frequency(&self) -> Frequency {
        self.fixed_frequency
    }

    /// Returns the fixed leg day count.
    #[must_use]
    pub fn fixed_day_count(&self) -> DayCountConvention {
        self.fixed_day_count
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.config.notional
    }

    /// Returns the swap configuration.
    #[must_use]
    pub fn config(&self) -> &SwapConfig {
        &self.config
    }

    /// Returns the fixed leg.
    #[must_use]
    pub fn fixed_leg(&self) -> &FixedLeg {
        &self.fixed_leg
    }

    /// Returns the float leg.
    #[must_use]
    pub fn float_leg(&self) -> &FloatLeg {
        &self.float_leg
    }

    /// Values the swap: fixed leg plus float leg.
    ///
    /// Forwards come from `index`. Discounting uses `discount`, which
    /// defaults to the index curve.
    #[must_use]
    pub fn value(
        &self,
        valuation_date: Date,
        index: &dyn Curve,
        discount: Option<&dyn Curve>,
        first_fixing: Option<f64>,
    ) -> f64 {
        let discount = discount.unwrap_or(index);
        self.fixed_leg.value(valuation_date, discount)
            + self
                .float_leg
                .value(valuation_date, index, discount, first_fixing)
    }

    /// Fixed leg annuity per unit notional.
    #[must_use]
    pub fn pv01(&self, valuation_date: Date, discount: &dyn Curve) -> f64 {
        self.fixed_leg.annuity(valuation_date, discount)
    }

    /// The fixed coupon that makes the swap worth zero.
    ///
    /// With a single curve the float leg is `DF(start) - DF(maturity)`,
    /// where the start is the effective date for a forward starting swap.
    /// With a separate discount curve the float leg is projected off
    /// `index`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the annuity is zero.
    pub fn swap_rate(
        &self,
        valuation_date: Date,
        index: &dyn Curve,
        discount: Option<&dyn Curve>,
        first_fixing: Option<f64>,
    ) -> CurveResult<f64> {
        let discount_curve = discount.unwrap_or(index);
        let pv01 = self.pv01(valuation_date, discount_curve);
        if pv01.abs() < MIN_PV01 {
            return Err(CurveError::configuration(
                "swap PV01 is zero, cannot compute swap rate",
            ));
        }

        let float_pv = match discount {
            None => {
                let df0 = if valuation_date < self.effective {
                    index.discount_factor(self.effective)
                } else {
                    index.discount_factor(valuation_date)
                };
                df0 - index.discount_factor(self.maturity)
            }
            Some(discount) => {
                self.float_leg
                    .value(valuation_date, index, discount, first_fixing)
                    * self.float_leg.direction().sign()
                    / self.config.notional
            }
        };
        Ok(float_pv / pv01)
    }

    /// Annuity of the remaining fixed payments on a flat rate compounded at
    /// `frequency`, as used for cash-settled swaptions.
    ///
    /// Payments on or after the valuation date are counted, each discounted
    /// by one more period of `1 / (1 + rate / f)`.
    #[must_use]
    pub fn cash_settled_pv01(
        &self,
        valuation_date: Date,
        flat_rate: f64,
        frequency: Frequency,
    ) -> f64 {
        let alpha = 1.0 / f64::from(frequency.periods_per_year());
        let mut df = 1.0;
        let mut pv01 = 0.0;
        for _ in self
            .fixed_leg
            .payment_dates()
            .iter()
            .filter(|payment| **payment >= valuation_date)
        {
            df /= 1.0 + alpha * flat_rate;
            pv01 += df * alpha;
        }
        pv01
    }

    /// Returns a copy with the fixed coupon shifted by `shift`.
    #[must_use]
    pub fn bumped(&self, shift: f64) -> Self {
        let coupon = self.coupon + shift;
        Self {
            coupon,
            fixed_leg: self.fixed_leg.with_coupon(coupon),
            ..self.clone()
        }
    }

    /// Returns a short description for reports and errors.
    #[must_use]
    pub fn description(&self) -> String {
        let rate = self.coupon * 100.0;
        format!(
            "Swap {} {rate:.4}% {} to {}",
            self.direction, self.effective, self.maturity
        )
    }
}
