//! Discount factor and survival probability interpolation.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{MathError, MathResult};
use crate::interpolation::{Interpolator, MonotoneHermite, NaturalCubicSpline};

/// How a curve interpolates between its knots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum InterpolationScheme {
    /// Linear in continuously compounded zero rates.
    LinearZeroRates,
    /// Linear in `-ln(df)`, piecewise flat forwards.
    #[default]
    FlatForwardRates,
    /// Forward rates blended linearly between adjacent segments.
    LinearForwardRates,
    /// Natural cubic spline on `ln(df)`.
    NaturalCubicLogDiscount,
    /// Natural cubic spline on zero rates.
    NaturalCubicZeroRates,
    /// Monotone cubic Hermite on `ln(df)`.
    PchipLogDiscount,
    /// Monotone cubic Hermite on zero rates.
    PchipZeroRates,
}

impl InterpolationScheme {
    /// Returns all supported schemes.
    #[must_use]
    pub fn all() -> &'static [InterpolationScheme] {
        &[
            InterpolationScheme::LinearZeroRates,
            InterpolationScheme::FlatForwardRates,
            InterpolationScheme::LinearForwardRates,
            InterpolationScheme::NaturalCubicLogDiscount,
            InterpolationScheme::NaturalCubicZeroRates,
            InterpolationScheme::PchipLogDiscount,
            InterpolationScheme::PchipZeroRates,
        ]
    }

    /// Returns the conventional name of the scheme.
    #[must_use]
    pub fn name(&self) -> &'static str {
        match self {
            InterpolationScheme::LinearZeroRates => "LINEAR_ZERO_RATES",
            InterpolationScheme::FlatForwardRates => "FLAT_FORWARD_RATES",
            InterpolationScheme::LinearForwardRates => "LINEAR_FORWARD_RATES",
            InterpolationScheme::NaturalCubicLogDiscount => "NATCUBIC_LOG_DISCOUNT",
            InterpolationScheme::NaturalCubicZeroRates => "NATCUBIC_ZERO_RATES",
            InterpolationScheme::PchipLogDiscount => "PCHIP_LOG_DISCOUNT",
            InterpolationScheme::PchipZeroRates => "PCHIP_ZERO_RATES",
        }
    }

    /// True if adding a knot at the end leaves the curve unchanged up to
    /// the previous last knot.
    ///
    /// Sequential bootstrapping is exact only for local schemes. The
    /// splines are fitted globally, so a new knot moves earlier segments.
    #[must_use]
    pub fn is_local(&self) -> bool {
        matches!(
            self,
            InterpolationScheme::LinearZeroRates
                | InterpolationScheme::FlatForwardRates
                | InterpolationScheme::LinearForwardRates
        )
    }

    fn on_zero_rates(self) -> bool {
        matches!(
            self,
            InterpolationScheme::NaturalCubicZeroRates | InterpolationScheme::PchipZeroRates
        )
    }
}

impl fmt::Display for InterpolationScheme {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for InterpolationScheme {
    type Err = MathError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let key = s.trim().to_uppercase().replace(['-', '_', ' '], "");
        Self::all()
            .iter()
            .copied()
            .find(|scheme| {
                scheme.name().replace('_', "") == key
                    || format!("{scheme:?}").to_uppercase() == key
            })
            .ok_or_else(|| MathError::invalid_input(format!("unknown interpolation scheme '{s}'")))
    }
}

/// Fitted spline in the transformed space, if the scheme needs one.
#[derive(Debug, Clone)]
enum Fitted {
    Direct,
    Spline(NaturalCubicSpline),
    Hermite(MonotoneHermite),
}

/// Interpolates discount factors (or survival probabilities) on a time grid.
///
/// Times are year fractions from the curve's anchor date and the value at
/// the first knot is returned unchanged for any time at or before it.
///
/// # Example
///
/// ```rust
/// use strata_math::interpolation::{CurveInterpolator, InterpolationScheme};
///
/// let curve = CurveInterpolator::fit(
///     InterpolationScheme::FlatForwardRates,
///     vec![0.0, 1.0, 2.0],
///     vec![1.0, 0.97, 0.93],
/// )
/// .unwrap();
///
/// let df = curve.value(1.5);
/// assert!(df < 0.97 && df > 0.93);
/// ```
#[derive(Debug, Clone)]
pub struct CurveInterpolator {
    scheme: InterpolationScheme,
    times: Vec<f64>,
    values: Vec<f64>,
    fitted: Fitted,
}

impl CurveInterpolator {
    /// Fits the scheme to the knots.
    ///
    /// # Errors
    ///
    /// Returns an error if there are no knots, the lengths differ, times are
    /// not strictly increasing or a value is not finite and positive.
    pub fn fit(scheme: InterpolationScheme, times: Vec<f64>, values: Vec<f64>) -> MathResult<Self> {
        if times.is_empty() {
            return Err(MathError::insufficient_data(1, 0));
        }
        if times.len() != values.len() {
            return Err(MathError::invalid_input(format!(
                "times and values must have same length: {} vs {}",
                times.len(),
                values.len()
            )));
        }
        if times.iter().any(|t| !t.is_finite()) {
            return Err(MathError::invalid_input("times must be finite"));
        }
        if times.windows(2).any(|w| w[1] <= w[0]) {
            return Err(MathError::invalid_input("times must be strictly increasing"));
        }
        if let Some(v) = values.iter().find(|v| !v.is_finite() || **v <= 0.0) {
            return Err(MathError::invalid_input(format!(
                "curve values must be finite and positive, got {v}"
            )));
        }

        let fitted = Self::fit_transformed(scheme, &times, &values)?;
        Ok(Self {
            scheme,
            times,
            values,
            fitted,
        })
    }

    fn fit_transformed(
        scheme: InterpolationScheme,
        times: &[f64],
        values: &[f64],
    ) -> MathResult<Fitted> {
        if times.len() < 2 {
            return Ok(Fitted::Direct);
        }
        let ys = if scheme.on_zero_rates() {
            zero_rates(times, values)
        } else {
            values.iter().map(|v| v.ln()).collect()
        };
        let xs = times.to_vec();
        Ok(match scheme {
            InterpolationScheme::NaturalCubicLogDiscount | InterpolationScheme::NaturalCubicZeroRates => {
                Fitted::Spline(NaturalCubicSpline::new(xs, ys)?.with_extrapolation())
            }
            InterpolationScheme::PchipLogDiscount | InterpolationScheme::PchipZeroRates => {
                Fitted::Hermite(MonotoneHermite::new(xs, ys)?.with_extrapolation())
            }
            _ => Fitted::Direct,
        })
    }

    /// Returns a copy re-fitted with the last value replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if the new value is not finite and positive.
    pub fn with_last_value(&self, value: f64) -> MathResult<Self> {
        self.with_value(self.values.len() - 1, value)
    }

    /// Returns a copy re-fitted with the value of knot `index` replaced.
    ///
    /// # Errors
    ///
    /// Returns an error if `index` is out of range or the new value is not
    /// finite and positive.
    pub fn with_value(&self, index: usize, value: f64) -> MathResult<Self> {
        if index >= self.values.len() {
            return Err(MathError::invalid_input(format!(
                "knot index {index} out of range for {} knots",
                self.values.len()
            )));
        }
        let mut values = self.values.clone();
        values[index] = value;
        Self::fit(self.scheme, self.times.clone(), values)
    }

    /// Returns a copy re-fitted with an extra knot at the end.
    ///
    /// # Errors
    ///
    /// Returns an error if `time` does not extend the grid or `value` is
    /// not finite and positive.
    pub fn with_point(&self, time: f64, value: f64) -> MathResult<Self> {
        let mut times = self.times.clone();
        let mut values = self.values.clone();
        times.push(time);
        values.push(value);
        Self::fit(self.scheme, times, values)
    }

    /// Returns the interpolation scheme.
    #[must_use]
    pub fn scheme(&self) -> InterpolationScheme {
        self.scheme
    }

    /// Returns the knot times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        &self.times
    }

    /// Returns the knot values.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        &self.values
    }

    /// Returns the number of knots.
    #[must_use]
    pub fn len(&self) -> usize {
        self.times.len()
    }

    /// Returns true if there are no knots. A fitted curve always has one.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.times.is_empty()
    }

    /// Returns the interpolated value at time `t`.
    #[must_use]
    pub fn value(&self, t: f64) -> f64 {
        let n = self.times.len();
        if n == 1 || t <= self.times[0] {
            return self.values[0];
        }

        // First knot at or beyond t, or n when extrapolating
        let i = self.times.partition_point(|&x| x < t);

        match self.scheme {
            InterpolationScheme::LinearZeroRates => self.linear_zero(i, t),
            InterpolationScheme::FlatForwardRates => self.flat_forward(i, t),
            InterpolationScheme::LinearForwardRates => self.linear_forward(i, t),
            InterpolationScheme::NaturalCubicLogDiscount | InterpolationScheme::PchipLogDiscount => {
                self.transformed(t).exp()
            }
            InterpolationScheme::NaturalCubicZeroRates | InterpolationScheme::PchipZeroRates => {
                let rate = if i == n {
                    self.zero_rate(n - 1)
                } else {
                    self.transformed(t)
                };
                (-rate * t).exp()
            }
        }
    }

    fn zero_rate(&self, k: usize) -> f64 {
        -self.values[k].ln() / self.times[k]
    }

    fn linear_zero(&self, i: usize, t: f64) -> f64 {
        let n = self.times.len();
        let rate = if i == 1 {
            self.zero_rate(1)
        } else if i < n {
            let (t0, t1) = (self.times[i - 1], self.times[i]);
            ((t1 - t) * self.zero_rate(i - 1) + (t - t0) * self.zero_rate(i)) / (t1 - t0)
        } else {
            self.zero_rate(n - 1)
        };
        (-rate * t).exp()
    }

    fn flat_forward(&self, i: usize, t: f64) -> f64 {
        let k = i.min(self.times.len() - 1);
        let (t0, t1) = (self.times[k - 1], self.times[k]);
        let (y0, y1) = (-self.values[k - 1].ln(), -self.values[k].ln());
        let y = ((t1 - t) * y0 + (t - t0) * y1) / (t1 - t0);
        (-y).exp()
    }

    /// Forward rate of the segment ending at knot `k`.
    fn segment_forward(&self, k: usize) -> f64 {
        -(self.values[k] / self.values[k - 1]).ln() / (self.times[k] - self.times[k - 1])
    }

    fn linear_forward(&self, i: usize, t: f64) -> f64 {
        let n = self.times.len();
        if i == 1 {
            return (-t * self.zero_rate(1)).exp();
        }
        if i == n {
            let fwd = self.segment_forward(n - 1);
            return self.values[n - 1] * (-fwd * (t - self.times[n - 1])).exp();
        }
        let (t0, t1) = (self.times[i - 1], self.times[i]);
        let fwd = ((t1 - t) * self.segment_forward(i - 1) + (t - t0) * self.segment_forward(i))
            / (t1 - t0);
        self.values[i - 1] * (-fwd * (t - t0)).exp()
    }

    fn transformed(&self, t: f64) -> f64 {
        let result = match &self.fitted {
            Fitted::Spline(spline) => spline.interpolate(t),
            Fitted::Hermite(hermite) => hermite.interpolate(t),
            Fitted::Direct => Ok(self.values[0].ln()),
        };
        // Both splines are built with extrapolation enabled
        result.unwrap_or(f64::NAN)
    }
}

/// Zero rates at each knot, with the rate at time zero taken from knot 1.
fn zero_rates(times: &[f64], values: &[f64]) -> Vec<f64> {
    let mut rates: Vec<f64> = times
        .iter()
        .zip(values)
        .map(|(t, v)| if *t == 0.0 { 0.0 } else { -v.ln() / t })
        .collect();
    if times[0] == 0.0 && rates.len() > 1 {
        rates[0] = rates[1];
    }
    rates
}
