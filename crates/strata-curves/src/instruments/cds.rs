//! Credit default swap.
//!
//! A CDS exchanges a running coupon (the premium leg) for a payment of
//! `(1 - R) × notional` on default (the protection leg). Both legs are
//! valued from a [`SurvivalCurve`] and a discount curve on the same
//! ACT/365F time axis.

use strata_core::calendars::{BusinessDayConvention, Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::schedule::DateGeneration;
use strata_core::types::{Date, Frequency, Tenor};

use super::accrual_factor;
use crate::bootstrap::CreditCurve;
use crate::curves::SurvivalCurve;
use crate::error::{CurveError, CurveResult};
use crate::traits::{curve_time, Curve};

/// One basis point.
const ONE_BP: f64 = 1e-4;

/// Contract terms of a [`Cds`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsConfig {
    /// Notional.
    pub notional: f64,
    /// True when the holder buys protection.
    pub long_protection: bool,
    /// Premium payment frequency.
    pub frequency: Frequency,
    /// Premium accrual day count.
    pub day_count: DayCountConvention,
    /// Calendar for premium date adjustment.
    pub calendar: CalendarType,
    /// Business day convention for premium date adjustment.
    pub convention: BusinessDayConvention,
    /// Premium date generation direction.
    pub generation: DateGeneration,
}

impl Default for CdsConfig {
    fn default() -> Self {
        Self {
            notional: 1_000_000.0,
            long_protection: true,
            frequency: Frequency::Quarterly,
            day_count: DayCountConvention::Act360,
            calendar: CalendarType::Weekend,
            convention: BusinessDayConvention::Following,
            generation: DateGeneration::Backward,
        }
    }
}

impl CdsConfig {
    /// Sets the notional.
    #[must_use]
    pub fn with_notional(mut self, notional: f64) -> Self {
        self.notional = notional;
        self
    }

    /// Sets whether the holder buys protection.
    #[must_use]
    pub fn with_long_protection(mut self, long_protection: bool) -> Self {
        self.long_protection = long_protection;
        self
    }

    /// Sets the premium frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the premium day count.
    #[must_use]
    pub fn with_day_count(mut self, day_count: DayCountConvention) -> Self {
        self.day_count = day_count;
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

    /// Sets the premium date generation direction.
    #[must_use]
    pub fn with_generation(mut self, generation: DateGeneration) -> Self {
        self.generation = generation;
        self
    }
}

/// Model settings for CDS valuation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsPricingConfig {
    /// Recovery rate on default.
    pub recovery_rate: f64,
    /// Protection leg integration steps per year.
    pub steps_per_year: u32,
    /// Integrate under piecewise flat hazard and interest rates. When false,
    /// use midpoint rules instead.
    pub flat_hazard_integral: bool,
}

impl Default for CdsPricingConfig {
    fn default() -> Self {
        Self {
            recovery_rate: 0.4,
            steps_per_year: 25,
            flat_hazard_integral: true,
        }
    }
}

impl CdsPricingConfig {
    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.recovery_rate = recovery_rate;
        self
    }

    /// Sets the protection leg integration steps per year.
    #[must_use]
    pub fn with_steps_per_year(mut self, steps_per_year: u32) -> Self {
        self.steps_per_year = steps_per_year;
        self
    }

    /// Selects the flat hazard integral or the midpoint rule.
    #[must_use]
    pub fn with_flat_hazard_integral(mut self, flat_hazard_integral: bool) -> Self {
        self.flat_hazard_integral = flat_hazard_integral;
        self
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the recovery rate is outside
    /// `[0, 1)` or there are no integration steps.
    pub fn validate(&self) -> CurveResult<()> {
        if !(0.0..1.0).contains(&self.recovery_rate) {
            return Err(CurveError::configuration(format!(
                "recovery rate must be in [0, 1), got {}",
                self.recovery_rate
            )));
        }
        if self.steps_per_year == 0 {
            return Err(CurveError::configuration(
                "protection leg needs at least one step per year",
            ));
        }
        Ok(())
    }
}

/// A full and clean pair: a PV or a risky annuity.
///
/// The clean figure excludes the premium accrued from the previous coupon
/// date to the step-in date.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CdsPv {
    /// Including accrued premium.
    pub full: f64,
    /// Excluding accrued premium.
    pub clean: f64,
}

/// A single-name credit default swap.
///
/// Premium dates run from the previous coupon date on or before the step-in
/// date to maturity. The last date is moved one day later so that the
/// maturity day itself is protected.
///
/// # Example
///
/// ```rust
/// use strata_core::types::{Date, Tenor};
/// use strata_curves::instruments::{Cds, CdsConfig};
///
/// let step_in = Date::from_ymd(2018, 12, 20).unwrap();
/// let cds = Cds::from_tenor(step_in, Tenor::parse("5Y").unwrap(), 0.01, CdsConfig::default())
///     .unwrap();
/// assert_eq!(cds.maturity(), Date::from_ymd(2024, 3, 20).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Cds {
    step_in: Date,
    maturity: Date,
    coupon: f64,
    config: CdsConfig,
    premium_dates: Vec<Date>,
    accruals: Vec<f64>,
    accrued_factor: f64,
}

impl Cds {
    /// Creates a CDS and generates its premium dates.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` unless maturity is after the
    /// step-in date.
    pub fn new(step_in: Date, maturity: Date, coupon: f64, config: CdsConfig) -> CurveResult<Self> {
        if maturity <= step_in {
            return Err(CurveError::configuration(format!(
                "CDS maturity {maturity} must be after step-in date {step_in}"
            )));
        }
        let premium_dates = premium_dates(step_in, maturity, &config)?;

        let mut accruals = Vec::with_capacity(premium_dates.len());
        accruals.push(0.0);
        for period in premium_dates.windows(2) {
            accruals.push(accrual_factor(
                config.day_count,
                period[0],
                period[1],
                config.frequency,
            )?);
        }

        let accrued_factor = config.day_count.year_fraction_with_frequency(
            premium_dates[0],
            step_in,
            Some(premium_dates[1]),
            config.frequency,
        )?;

        Ok(Self {
            step_in,
            maturity,
            coupon,
            config,
            premium_dates,
            accruals,
            accrued_factor,
        })
    }

    /// Creates a CDS with standard terms: quarterly ACT/360 premiums,
    /// notional 1mm, long protection.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` unless maturity is after the
    /// step-in date.
    pub fn standard(step_in: Date, maturity: Date, coupon: f64) -> CurveResult<Self> {
        Self::new(step_in, maturity, coupon, CdsConfig::default())
    }

    /// Creates a CDS maturing on the first CDS roll date after
    /// `step_in + tenor`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the tenor cannot be applied.
    pub fn from_tenor(
        step_in: Date,
        tenor: Tenor,
        coupon: f64,
        config: CdsConfig,
    ) -> CurveResult<Self> {
        let maturity = step_in.add_tenor(tenor)?.next_cds_date()?;
        Self::new(step_in, maturity, coupon, config)
    }

    /// Returns the step-in date, when protection starts.
    #[must_use]
    pub fn step_in(&self) -> Date {
        self.step_in
    }

    /// Returns the maturity date.
    #[must_use]
    pub fn maturity(&self) -> Date {
        self.maturity
    }

    /// Returns the running coupon.
    #[must_use]
    pub fn coupon(&self) -> f64 {
        self.coupon
    }

    /// Returns the notional.
    #[must_use]
    pub fn notional(&self) -> f64 {
        self.config.notional
    }

    /// Returns the contract terms.
    #[must_use]
    pub fn config(&self) -> &CdsConfig {
        &self.config
    }

    /// Returns the adjusted premium dates, starting with the previous
    /// coupon date.
    #[must_use]
    pub fn premium_dates(&self) -> &[Date] {
        &self.premium_dates
    }

    /// Returns the accrual factor ending at each premium date. The first
    /// entry is zero.
    #[must_use]
    pub fn accruals(&self) -> &[f64] {
        &self.accruals
    }

    /// Returns the previous coupon date.
    #[must_use]
    pub fn previous_coupon_date(&self) -> Date {
        self.premium_dates[0]
    }

    /// Returns the accrual factor from the previous coupon date to the
    /// step-in date.
    #[must_use]
    pub fn accrued_factor(&self) -> f64 {
        self.accrued_factor
    }

    /// Present value of one unit of running premium, full and clean.
    ///
    /// Coupons are paid on survival to each premium date. Premium accrued
    /// up to a default is also paid, either under a flat hazard and flat
    /// interest rate in each period or at the period midpoint.
    #[must_use]
    pub fn risky_pv01(
        &self,
        valuation_date: Date,
        survival: &SurvivalCurve,
        discount: &dyn Curve,
        flat_hazard_integral: bool,
    ) -> CdsPv {
        let time = |date: Date| curve_time(valuation_date, date);
        let acc = self.accrued_factor;

        let q_eff = survival.survival_probability_at(time(self.step_in));
        let t1 = time(self.premium_dates[1]);
        let mut q1 = survival.survival_probability_at(t1);
        let mut z1 = discount.discount_factor_at(t1);
        let yf1 = self.accruals[1];

        // First period: the coupon accrued since the previous coupon date is
        // paid in full on default, the rest on average half way
        let mut full = q1 * z1 * yf1;
        full += z1 * (q_eff - q1) * acc;
        full += 0.5 * z1 * (q_eff - q1) * (yf1 - acc);

        for k in 2..self.premium_dates.len() {
            let t2 = time(self.premium_dates[k]);
            let q2 = survival.survival_probability_at(t2);
            let z2 = discount.discount_factor_at(t2);
            let tau = self.accruals[k];

            full += q2 * z2 * tau;
            full += if flat_hazard_integral {
                let h = -(q2 / q1).ln() / tau;
                let r = -(z2 / z1).ln() / tau;
                let alpha = h + r;
                let decay = (-alpha * tau).exp();
                let term = 1.0 - decay - alpha * tau * decay;
                q1 * z1 * h * term / (alpha * alpha + 1e-20).abs()
            } else {
                0.5 * (q1 - q2) * z2 * tau
            };
            q1 = q2;
            z1 = z2;
        }

        CdsPv {
            full,
            clean: full - acc,
        }
    }

    /// Present value of the protection leg.
    ///
    /// Integrates the default density from step-in to maturity over
    /// `ceil(steps_per_year × years)` equal steps, then scales by
    /// `(1 - R) × notional`.
    #[must_use]
    pub fn protection_leg_pv(
        &self,
        valuation_date: Date,
        survival: &SurvivalCurve,
        discount: &dyn Curve,
        pricing: &CdsPricingConfig,
    ) -> f64 {
        let t_eff = curve_time(valuation_date, self.step_in);
        let t_mat = curve_time(valuation_date, self.maturity);
        let steps = (f64::from(pricing.steps_per_year) * (t_mat - t_eff))
            .ceil()
            .max(1.0) as usize;
        let dt = (t_mat - t_eff) / steps as f64;

        let mut t = t_eff;
        let mut q1 = survival.survival_probability_at(t);
        let mut z1 = discount.discount_factor_at(t);
        let mut pv = 0.0;

        for _ in 0..steps {
            t += dt;
            let q2 = survival.survival_probability_at(t);
            let z2 = discount.discount_factor_at(t);
            pv += if pricing.flat_hazard_integral {
                let h = -(q2 / q1).ln() / dt;
                let r = -(z2 / z1).ln() / dt;
                h * (1.0 - (-(h + r) * dt).exp()) * q1 * z1 / ((h + r).abs() + 1e-8)
            } else {
                0.5 * (z1 + z2) * (q1 - q2)
            };
            q1 = q2;
            z1 = z2;
        }

        pv * (1.0 - pricing.recovery_rate) * self.config.notional
    }

    /// Values the CDS against explicit survival and discount curves.
    ///
    /// `PV = sign × (protection - coupon × RPV01 × notional)`, with sign
    /// +1 for a protection buyer.
    #[must_use]
    pub fn price(
        &self,
        valuation_date: Date,
        survival: &SurvivalCurve,
        discount: &dyn Curve,
        pricing: &CdsPricingConfig,
    ) -> CdsPv {
        let rpv01 = self.risky_pv01(
            valuation_date,
            survival,
            discount,
            pricing.flat_hazard_integral,
        );
        let protection = self.protection_leg_pv(valuation_date, survival, discount, pricing);
        let sign = if self.config.long_protection { 1.0 } else { -1.0 };
        let premium = self.coupon * self.config.notional;
        CdsPv {
            full: sign * (protection - premium * rpv01.full),
            clean: sign * (protection - premium * rpv01.clean),
        }
    }

    /// Values the CDS on a bootstrapped credit curve.
    #[must_use]
    pub fn value(&self, valuation_date: Date, curve: &CreditCurve) -> CdsPv {
        self.price(
            valuation_date,
            curve.survival_curve(),
            curve.rate_curve(),
            &curve.config().pricing,
        )
    }

    /// Change in full PV when every CDS quote on `curve` moves up one basis
    /// point and the curve is rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if the bumped curve cannot be built.
    pub fn credit_dv01(&self, valuation_date: Date, curve: &CreditCurve) -> CurveResult<f64> {
        let base = self.value(valuation_date, curve).full;
        let bumped = curve.bumped_spreads(ONE_BP)?;
        Ok(self.value(valuation_date, &bumped).full - base)
    }

    /// Change in full PV when every rate quote moves up one basis point and
    /// both the rate and credit curves are rebuilt.
    ///
    /// # Errors
    ///
    /// Returns an error if either bumped curve cannot be built.
    pub fn interest_dv01(&self, valuation_date: Date, curve: &CreditCurve) -> CurveResult<f64> {
        let base = self.value(valuation_date, curve).full;
        let rates = curve.rate_curve().bumped(ONE_BP)?;
        let bumped = curve.with_rate_curve(rates)?;
        Ok(self.value(valuation_date, &bumped).full - base)
    }

    /// Returns a copy with the coupon shifted by `shift`.
    #[must_use]
    pub fn bumped(&self, shift: f64) -> Self {
        Self {
            coupon: self.coupon + shift,
            ..self.clone()
        }
    }

    /// Returns a short description for reports and errors.
    #[must_use]
    pub fn description(&self) -> String {
        let spread = self.coupon * 10_000.0;
        format!("CDS {spread:.1}bp {} to {}", self.step_in, self.maturity)
    }
}

/// Generates adjusted premium dates from the previous coupon date to one day
/// after maturity.
fn premium_dates(step_in: Date, maturity: Date, config: &CdsConfig) -> CurveResult<Vec<Date>> {
    let months = config.frequency.months_per_period() as i32;
    let mut unadjusted = Vec::new();

    match config.generation {
        DateGeneration::Backward => {
            let mut k = 0;
            let mut next = maturity;
            while next > step_in {
                unadjusted.push(next);
                k += 1;
                next = maturity.add_months(-k * months)?;
            }
            unadjusted.push(next);
        }
        DateGeneration::Forward => {
            let mut k = 0;
            let mut next = step_in;
            while next < maturity {
                unadjusted.push(next);
                k += 1;
                next = step_in.add_months(k * months)?;
            }
            unadjusted.push(maturity);
        }
    }

    let mut dates: Vec<Date> = unadjusted
        .into_iter()
        .map(|d| config.calendar.adjust(d, config.convention))
        .collect();
    dates.sort_unstable();
    dates.dedup();
    if dates.len() < 2 {
        return Err(CurveError::configuration(format!(
            "CDS premium schedule from {step_in} to {maturity} has no periods"
        )));
    }
    let last = dates.len() - 1;
    dates[last] = dates[last].add_days(1);
    Ok(dates)
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
    fn test_backward_premium_dates() {
        let cds = Cds::standard(date(2018, 12, 24), date(2019, 12, 20), 0.01).unwrap();
        assert_eq!(
            cds.premium_dates(),
            &[
                date(2018, 12, 20),
                date(2019, 3, 20),
                date(2019, 6, 20),
                date(2019, 9, 20),
                date(2019, 12, 21),
            ]
        );
        assert_eq!(cds.previous_coupon_date(), date(2018, 12, 20));
        assert_relative_eq!(cds.accrued_factor(), 4.0 / 360.0, epsilon = 1e-15);
        assert_eq!(cds.accruals()[0], 0.0);
        assert_relative_eq!(cds.accruals()[1], 90.0 / 360.0, epsilon = 1e-15);
        assert_relative_eq!(cds.accruals()[4], 92.0 / 360.0, epsilon = 1e-15);
    }

    #[test]
    fn test_step_in_on_coupon_date_has_no_accrued() {
        let cds = Cds::standard(date(2018, 12, 20), date(2019, 12, 20), 0.01).unwrap();
        assert_eq!(cds.previous_coupon_date(), date(2018, 12, 20));
        assert_eq!(cds.accrued_factor(), 0.0);
        assert_eq!(cds.premium_dates().len(), 5);
    }

    #[test]
    fn test_forward_premium_dates() {
        let config = CdsConfig::default().with_generation(DateGeneration::Forward);
        let cds = Cds::new(date(2018, 12, 20), date(2019, 6, 20), 0.01, config).unwrap();
        assert_eq!(
            cds.premium_dates(),
            &[date(2018, 12, 20), date(2019, 3, 20), date(2019, 6, 21)]
        );
    }

    #[test]
    fn test_from_tenor_rolls_to_cds_date() {
        let cds = Cds::from_tenor(
            date(2018, 12, 20),
            Tenor::parse("1Y").unwrap(),
            0.01,
            CdsConfig::default(),
        )
        .unwrap();
        assert_eq!(cds.maturity(), date(2020, 3, 20));
        assert!(Cds::standard(date(2019, 1, 1), date(2019, 1, 1), 0.01).is_err());
    }

    #[test]
    fn test_zero_hazard_has_no_protection() {
        let valuation = date(2018, 12, 20);
        let survival = SurvivalCurve::flat(valuation, 0.0).unwrap();
        let rates = DiscountCurve::flat(valuation, 0.03).unwrap();
        let cds = Cds::standard(valuation, date(2023, 12, 20), 0.01).unwrap();
        let pricing = CdsPricingConfig::default();

        let protection = cds.protection_leg_pv(valuation, &survival, &rates, &pricing);
        assert!(protection.abs() < 1e-8);

        // Risk-free annuity of the premium dates
        let rpv01 = cds.risky_pv01(valuation, &survival, &rates, true);
        let expected: f64 = cds.premium_dates()[1..]
            .iter()
            .zip(&cds.accruals()[1..])
            .map(|(d, a)| a * rates.discount_factor(*d))
            .sum();
        assert_relative_eq!(rpv01.full, expected, epsilon = 1e-12);
        assert_relative_eq!(rpv01.full, rpv01.clean, epsilon = 1e-15);
    }

    #[test]
    fn test_credit_triangle() {
        // Flat hazard h and recovery R price close to a spread of h × (1 - R),
        // restated from ACT/365F curve time to ACT/360 premium accrual
        let valuation = date(2018, 12, 20);
        let hazard = 0.02;
        let survival = SurvivalCurve::flat(valuation, hazard).unwrap();
        let rates = DiscountCurve::flat(valuation, 0.03).unwrap();
        let pricing = CdsPricingConfig::default();
        let cds = Cds::standard(valuation, date(2023, 12, 20), 0.0).unwrap();

        let protection = cds.protection_leg_pv(valuation, &survival, &rates, &pricing);
        let rpv01 = cds.risky_pv01(valuation, &survival, &rates, true);
        let par_spread = protection / (rpv01.clean * cds.notional());
        assert_relative_eq!(par_spread, hazard * 0.6 * 360.0 / 365.0, epsilon = 5e-4);
    }

    #[test]
    fn test_integration_modes_agree() {
        let valuation = date(2018, 12, 20);
        let survival = SurvivalCurve::flat(valuation, 0.03).unwrap();
        let rates = DiscountCurve::flat(valuation, 0.02).unwrap();
        let cds = Cds::standard(valuation, date(2023, 12, 20), 0.01).unwrap();
        let exact = CdsPricingConfig::default();
        let midpoint = exact.with_flat_hazard_integral(false);

        let a = cds.protection_leg_pv(valuation, &survival, &rates, &exact);
        let b = cds.protection_leg_pv(valuation, &survival, &rates, &midpoint);
        assert_relative_eq!(a, b, max_relative = 1e-4);

        let ra = cds.risky_pv01(valuation, &survival, &rates, true);
        let rb = cds.risky_pv01(valuation, &survival, &rates, false);
        assert_relative_eq!(ra.full, rb.full, max_relative = 1e-4);
    }

    #[test]
    fn test_price_sign_and_clean() {
        let valuation = date(2018, 12, 20);
        let survival = SurvivalCurve::flat(valuation, 0.02).unwrap();
        let rates = DiscountCurve::flat(valuation, 0.03).unwrap();
        let pricing = CdsPricingConfig::default();
        let long = Cds::standard(date(2019, 1, 10), date(2023, 12, 20), 0.01).unwrap();
        let short = Cds::new(
            date(2019, 1, 10),
            date(2023, 12, 20),
            0.01,
            CdsConfig::default().with_long_protection(false),
        )
        .unwrap();

        let pv_long = long.price(valuation, &survival, &rates, &pricing);
        let pv_short = short.price(valuation, &survival, &rates, &pricing);
        assert_relative_eq!(pv_long.full, -pv_short.full, epsilon = 1e-9);
        // The buyer pays accrued premium, so clean is above full
        assert_relative_eq!(
            pv_long.clean - pv_long.full,
            0.01 * long.notional() * long.accrued_factor(),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_pricing_config_validation() {
        assert!(CdsPricingConfig::default().validate().is_ok());
        assert!(CdsPricingConfig::default().with_recovery_rate(1.0).validate().is_err());
        assert!(CdsPricingConfig::default().with_steps_per_year(0).validate().is_err());
    }

    #[test]
    fn test_bumped_and_description() {
        let cds = Cds::standard(date(2018, 12, 20), date(2023, 12, 20), 0.01).unwrap();
        let bumped = cds.bumped(0.0001);
        assert_relative_eq!(bumped.coupon(), 0.0101, epsilon = 1e-15);
        assert_eq!(bumped.premium_dates(), cds.premium_dates());
        assert_eq!(cds.description(), "CDS 100.0bp 2018-12-20 to 2023-12-20");
    }
}
