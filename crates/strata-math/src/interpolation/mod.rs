//! Interpolation methods for term-structure construction.
//!
//! # Generic 1-D Interpolators
//!
//! - [`LinearInterpolator`]: Piecewise linear
//! - [`NaturalCubicSpline`]: C2 spline with zero end curvature
//! - [`MonotoneHermite`]: Fritsch-Carlson monotone cubic Hermite (PCHIP)
//!
//! # Discount and Survival Curves
//!
//! [`CurveInterpolator`] interpolates discount factors or survival
//! probabilities on a time grid according to an [`InterpolationScheme`].
//! Each scheme transforms the values (zero rates, log discount factors or
//! forward rates), interpolates in the transformed space and maps back.
//!
//! | Scheme | Interpolated quantity | Beyond last knot |
//! |--------|-----------------------|------------------|
//! | LinearZeroRates | zero rate, linear | flat zero rate |
//! | FlatForwardRates | `-ln(df)`, linear | last forward |
//! | LinearForwardRates | forward rate, linear | last forward |
//! | NaturalCubicLogDiscount | `ln(df)`, natural spline | end slope |
//! | NaturalCubicZeroRates | zero rate, natural spline | flat zero rate |
//! | PchipLogDiscount | `ln(df)`, monotone Hermite | end slope |
//! | PchipZeroRates | zero rate, monotone Hermite | flat zero rate |

mod cubic_spline;
mod curve;
mod linear;
mod monotone_hermite;

pub use cubic_spline::NaturalCubicSpline;
pub use curve::{CurveInterpolator, InterpolationScheme};
pub use linear::LinearInterpolator;
pub use monotone_hermite::MonotoneHermite;

use crate::error::{MathError, MathResult};

/// Trait for interpolation methods.
///
/// All interpolation methods implement this trait, providing a unified
/// interface for curve construction.
pub trait Interpolator: Send + Sync {
    /// Returns the interpolated value at x.
    fn interpolate(&self, x: f64) -> MathResult<f64>;

    /// Returns the first derivative at x.
    fn derivative(&self, x: f64) -> MathResult<f64>;

    /// Returns true if extrapolation is allowed.
    fn allows_extrapolation(&self) -> bool {
        false
    }

    /// Returns the minimum x value in the data.
    fn min_x(&self) -> f64;

    /// Returns the maximum x value in the data.
    fn max_x(&self) -> f64;

    /// Checks if x is within the interpolation range.
    fn in_range(&self, x: f64) -> bool {
        x >= self.min_x() && x <= self.max_x()
    }
}

/// Checks knot vectors: minimum size, equal lengths, finite and strictly
/// increasing abscissae.
pub(crate) fn validate_knots(xs: &[f64], ys: &[f64], min_points: usize) -> MathResult<()> {
    if xs.len() < min_points {
        return Err(MathError::insufficient_data(min_points, xs.len()));
    }
    if xs.len() != ys.len() {
        return Err(MathError::invalid_input(format!(
            "xs and ys must have same length: {} vs {}",
            xs.len(),
            ys.len()
        )));
    }
    if xs.iter().chain(ys).any(|v| !v.is_finite()) {
        return Err(MathError::invalid_input("knots must be finite"));
    }
    if xs.windows(2).any(|w| w[1] <= w[0]) {
        return Err(MathError::invalid_input(
            "x values must be strictly increasing",
        ));
    }
    Ok(())
}

/// Finds the index i such that `xs[i] <= x < xs[i+1]`, clamped to the
/// first and last segments.
pub(crate) fn find_segment(xs: &[f64], x: f64) -> usize {
    match xs.binary_search_by(|knot| knot.partial_cmp(&x).unwrap_or(std::cmp::Ordering::Equal)) {
        Ok(i) => i.min(xs.len() - 2),
        Err(i) => i.saturating_sub(1).min(xs.len() - 2),
    }
}

/// Rejects out-of-range points unless the interpolator extrapolates.
pub(crate) fn check_range<I: Interpolator + ?Sized>(interp: &I, x: f64) -> MathResult<()> {
    if !interp.allows_extrapolation() && !interp.in_range(x) {
        return Err(MathError::ExtrapolationNotAllowed {
            x,
            min: interp.min_x(),
            max: interp.max_x(),
        });
    }
    Ok(())
}
