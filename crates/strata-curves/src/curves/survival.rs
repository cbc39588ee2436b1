//! Survival probability curve.

use strata_core::types::Date;
use strata_math::interpolation::{CurveInterpolator, InterpolationScheme};

use super::anchored_interpolator;
use crate::error::CurveResult;
use crate::traits::{curve_time, DAYS_PER_YEAR};

/// Survival probabilities of a reference entity on an ACT/365F time grid.
///
/// Interpolation reuses the discount factor schemes: a survival probability
/// behaves like a discount factor whose rate is the hazard rate.
#[derive(Debug, Clone)]
pub struct SurvivalCurve {
    valuation_date: Date,
    interpolator: CurveInterpolator,
}

impl SurvivalCurve {
    /// Creates a survival curve from node times and probabilities.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` unless the first node is `(0, 1)`
    /// and every probability is finite and positive.
    pub fn new(
        valuation_date: Date,
        times: Vec<f64>,
        probabilities: Vec<f64>,
        scheme: InterpolationScheme,
    ) -> CurveResult<Self> {
        Ok(Self {
            valuation_date,
            interpolator: anchored_interpolator(scheme, times, probabilities)?,
        })
    }

    /// Creates a survival curve with a constant hazard rate.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the hazard rate is not finite.
    pub fn flat(valuation_date: Date, hazard_rate: f64) -> CurveResult<Self> {
        Self::new(
            valuation_date,
            vec![0.0, 1.0],
            vec![1.0, (-hazard_rate).exp()],
            InterpolationScheme::FlatForwardRates,
        )
    }

    pub(crate) fn with_point(&self, t: f64, probability: f64) -> CurveResult<Self> {
        Ok(Self {
            valuation_date: self.valuation_date,
            interpolator: self.interpolator.with_point(t, probability)?,
        })
    }

    pub(crate) fn with_last_value(&self, probability: f64) -> CurveResult<Self> {
        Ok(Self {
            valuation_date: self.valuation_date,
            interpolator: self.interpolator.with_last_value(probability)?,
        })
    }

    pub(crate) fn with_value(&self, index: usize, probability: f64) -> CurveResult<Self> {
        Ok(Self {
            valuation_date: self.valuation_date,
            interpolator: self.interpolator.with_value(index, probability)?,
        })
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the probability of surviving to `date`.
    #[must_use]
    pub fn survival_probability(&self, date: Date) -> f64 {
        self.survival_probability_at(curve_time(self.valuation_date, date))
    }

    /// Returns the probability of surviving to time `t` in years.
    #[must_use]
    pub fn survival_probability_at(&self, t: f64) -> f64 {
        self.interpolator.value(t)
    }

    /// Returns the probability of default before `date`.
    #[must_use]
    pub fn default_probability(&self, date: Date) -> f64 {
        1.0 - self.survival_probability(date)
    }

    /// Returns the one-day forward hazard rate at `date`.
    #[must_use]
    pub fn forward_hazard_rate(&self, date: Date) -> f64 {
        let q1 = self.survival_probability(date);
        let q2 = self.survival_probability(date.add_days(1));
        (q1 / q2).ln() * DAYS_PER_YEAR
    }

    /// Returns the node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.interpolator.times()
    }

    /// Returns the node survival probabilities.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.interpolator.values()
    }

    /// Returns the interpolation scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.interpolator.scheme()
    }
}
