//! Discount factor curve.

use strata_core::daycounts::DayCountConvention;
use strata_core::schedule::{Schedule, ScheduleConfig};
use strata_core::types::{Compounding, Date, Frequency};
use strata_math::interpolation::{CurveInterpolator, InterpolationScheme};

use super::anchored_interpolator;
use crate::error::{CurveError, CurveResult};
use crate::traits::{curve_time, Curve, DAYS_PER_YEAR};

/// Shortest accrual used when converting a discount factor to a rate.
const MIN_YEAR_FRACTION: f64 = 1e-10;

/// A discount factor curve.
///
/// Holds discount factors on an ACT/365F time grid and interpolates between
/// them with an [`InterpolationScheme`].
///
/// # Example
///
/// ```rust
/// use strata_core::types::{Compounding, Date};
/// use strata_core::daycounts::DayCountConvention;
/// use strata_curves::curves::DiscountCurve;
/// use strata_curves::Curve;
///
/// let valuation = Date::from_ymd(2018, 6, 6).unwrap();
/// let curve = DiscountCurve::flat(valuation, 0.03).unwrap();
///
/// let one_year = valuation.add_days(365);
/// assert!((curve.discount_factor(one_year) - (-0.03f64).exp()).abs() < 1e-12);
///
/// let zero = curve
///     .zero_rate(one_year, Compounding::Continuous, DayCountConvention::Act365Fixed)
///     .unwrap();
/// assert!((zero - 0.03).abs() < 1e-12);
/// ```
#[derive(Debug, Clone)]
pub struct DiscountCurve {
    valuation_date: Date,
    interpolator: CurveInterpolator,
}

impl DiscountCurve {
    /// Creates a curve from node times and discount factors.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` unless the first node is `(0, 1)`,
    /// times are strictly increasing and every discount factor is finite and
    /// positive.
    pub fn new(
        valuation_date: Date,
        times: Vec<f64>,
        discount_factors: Vec<f64>,
        scheme: InterpolationScheme,
    ) -> CurveResult<Self> {
        Ok(Self {
            valuation_date,
            interpolator: anchored_interpolator(scheme, times, discount_factors)?,
        })
    }

    /// Creates a curve from node dates. The valuation date node is added.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the dates do not produce a
    /// valid curve.
    pub fn from_dates(
        valuation_date: Date,
        dates: &[Date],
        discount_factors: &[f64],
        scheme: InterpolationScheme,
    ) -> CurveResult<Self> {
        if dates.len() != discount_factors.len() {
            return Err(CurveError::configuration(format!(
                "dates and discount factors must have same length: {} vs {}",
                dates.len(),
                discount_factors.len()
            )));
        }
        let mut times = vec![0.0];
        times.extend(dates.iter().map(|d| curve_time(valuation_date, *d)));
        let mut values = vec![1.0];
        values.extend_from_slice(discount_factors);
        Self::new(valuation_date, times, values, scheme)
    }

    /// Creates a curve with a flat continuously compounded rate.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the rate is not finite.
    pub fn flat(valuation_date: Date, rate: f64) -> CurveResult<Self> {
        Self::new(
            valuation_date,
            vec![0.0, 1.0],
            vec![1.0, (-rate).exp()],
            InterpolationScheme::FlatForwardRates,
        )
    }

    /// Returns a copy with an extra node at the end.
    pub(crate) fn with_point(&self, t: f64, df: f64) -> CurveResult<Self> {
        Ok(Self {
            valuation_date: self.valuation_date,
            interpolator: self.interpolator.with_point(t, df)?,
        })
    }

    /// Returns a copy with the last node's discount factor replaced.
    pub(crate) fn with_last_value(&self, df: f64) -> CurveResult<Self> {
        Ok(Self {
            valuation_date: self.valuation_date,
            interpolator: self.interpolator.with_last_value(df)?,
        })
    }

    /// Returns a copy with the value of node `index` replaced.
    pub(crate) fn with_value(&self, index: usize, df: f64) -> CurveResult<Self> {
        Ok(Self {
            valuation_date: self.valuation_date,
            interpolator: self.interpolator.with_value(index, df)?,
        })
    }

    /// Returns the node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.interpolator.times()
    }

    /// Returns the node discount factors.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.interpolator.values()
    }

    /// Returns the interpolation scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.interpolator.scheme()
    }

    /// Returns the number of nodes, including the valuation date.
    #[must_use]
    pub fn len(&self) -> usize {
        self.interpolator.len()
    }

    /// Always false: a curve has at least its anchor node.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.interpolator.is_empty()
    }

    /// Returns the zero rate to `date` under the given compounding, with
    /// the accrual measured by `day_count`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the day count needs a
    /// reference date.
    pub fn zero_rate(
        &self,
        date: Date,
        compounding: Compounding,
        day_count: DayCountConvention,
    ) -> CurveResult<f64> {
        let yf = day_count
            .year_fraction(self.valuation_date, date)?
            .max(MIN_YEAR_FRACTION);
        let df = self.discount_factor(date);
        let rate = match compounding.periods_per_year() {
            None if compounding.is_continuous() => -df.ln() / yf,
            None => (1.0 / df - 1.0) / yf,
            Some(f) => {
                let f = f64::from(f);
                (df.powf(-1.0 / (yf * f)) - 1.0) * f
            }
        };
        Ok(rate)
    }

    /// Returns the one-day continuously compounded forward rate at `date`.
    #[must_use]
    pub fn instantaneous_forward(&self, date: Date) -> f64 {
        let df1 = self.discount_factor(date);
        let df2 = self.discount_factor(date.add_days(1));
        (df1 / df2).ln() * DAYS_PER_YEAR
    }

    /// Returns the simple forward rate between two dates.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if `end` is not after `start` or
    /// the day count needs a reference date.
    pub fn forward_rate(
        &self,
        start: Date,
        end: Date,
        day_count: DayCountConvention,
    ) -> CurveResult<f64> {
        if end <= start {
            return Err(CurveError::configuration(format!(
                "forward end {end} must be after start {start}"
            )));
        }
        let yf = day_count.year_fraction(start, end)?;
        let df1 = self.discount_factor(start);
        let df2 = self.discount_factor(end);
        Ok((df1 / df2 - 1.0) / yf)
    }

    /// Returns the par rate of a swap paying `frequency` coupons from
    /// `effective` to `maturity`.
    ///
    /// The annuity sums accrual times discount factor over the adjusted
    /// schedule. A vanishing annuity gives a rate of zero.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the swap starts before the
    /// valuation date, matures before it starts, or the schedule is invalid.
    pub fn par_swap_rate(
        &self,
        effective: Date,
        maturity: Date,
        frequency: Frequency,
        day_count: DayCountConvention,
    ) -> CurveResult<f64> {
        if effective < self.valuation_date {
            return Err(CurveError::configuration(format!(
                "swap effective date {effective} is before valuation date {}",
                self.valuation_date
            )));
        }
        if maturity < effective {
            return Err(CurveError::configuration(format!(
                "swap maturity {maturity} is before effective date {effective}"
            )));
        }

        let schedule =
            Schedule::new(ScheduleConfig::new(effective, maturity).with_frequency(frequency))?;
        let mut flow_dates = schedule.adjusted_dates().to_vec();
        flow_dates[0] = effective;

        let mut annuity = 0.0;
        for period in flow_dates.windows(2) {
            let alpha = day_count.year_fraction_with_frequency(
                period[0],
                period[1],
                Some(period[1]),
                frequency,
            )?;
            annuity += alpha * self.discount_factor(period[1]);
        }
        if annuity.abs() < 1e-10 {
            return Ok(0.0);
        }

        let df_start = self.discount_factor(effective);
        let df_end = self.discount_factor(flow_dates[flow_dates.len() - 1]);
        Ok((df_start - df_end) / annuity)
    }

    /// Returns a curve with every node multiplied by `exp(-shift * t)`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the shifted discount factors
    /// are not finite.
    pub fn parallel_shift(&self, shift: f64) -> CurveResult<Self> {
        let values = self
            .times()
            .iter()
            .zip(self.values())
            .map(|(t, df)| df * (-shift * t).exp())
            .collect();
        Self::new(
            self.valuation_date,
            self.times().to_vec(),
            values,
            self.scheme(),
        )
    }
}

impl Curve for DiscountCurve {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn discount_factor_at(&self, t: f64) -> f64 {
        self.interpolator.value(t)
    }
}
