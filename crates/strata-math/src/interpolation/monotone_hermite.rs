//! Monotone piecewise cubic Hermite interpolation (Fritsch-Carlson).

use crate::error::MathResult;
use crate::interpolation::{check_range, find_segment, validate_knots, Interpolator};

/// Monotone piecewise cubic Hermite interpolation.
///
/// Knot tangents start as the average of the adjacent secant slopes and are
/// then limited with the Fritsch-Carlson conditions so that the interpolant
/// is monotone wherever the data is. Local extrema in the data get a zero
/// tangent, so the curve never overshoots a knot.
///
/// The interpolant is C1. Beyond the knots it is extended linearly along the
/// end tangents when extrapolation is enabled.
///
/// # Example
///
/// ```rust
/// use strata_math::interpolation::{Interpolator, MonotoneHermite};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 0.1, 2.0, 2.1];
///
/// let pchip = MonotoneHermite::new(xs, ys).unwrap();
/// let y = pchip.interpolate(1.5).unwrap();
/// assert!(y > 0.1 && y < 2.0);
/// ```
#[derive(Debug, Clone)]
pub struct MonotoneHermite {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Tangent at each knot
    ms: Vec<f64>,
    allow_extrapolation: bool,
}

impl MonotoneHermite {
    /// Creates a monotone Hermite interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;
        let ms = fritsch_carlson_tangents(&xs, &ys);
        Ok(Self {
            xs,
            ys,
            ms,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Returns the knot tangents.
    #[must_use]
    pub fn tangents(&self) -> &[f64] {
        &self.ms
    }

    fn eval(&self, x: f64) -> (f64, f64) {
        let n = self.xs.len();
        if x < self.xs[0] {
            return (self.ys[0] + (x - self.xs[0]) * self.ms[0], self.ms[0]);
        }
        if x > self.xs[n - 1] {
            return (
                self.ys[n - 1] + (x - self.xs[n - 1]) * self.ms[n - 1],
                self.ms[n - 1],
            );
        }

        let i = find_segment(&self.xs, x);
        let h = self.xs[i + 1] - self.xs[i];
        let t = (x - self.xs[i]) / h;
        let t2 = t * t;
        let t3 = t2 * t;

        let (y0, y1) = (self.ys[i], self.ys[i + 1]);
        let (m0, m1) = (self.ms[i], self.ms[i + 1]);

        let y = (2.0 * t3 - 3.0 * t2 + 1.0) * y0
            + (t3 - 2.0 * t2 + t) * h * m0
            + (-2.0 * t3 + 3.0 * t2) * y1
            + (t3 - t2) * h * m1;
        let dy = (6.0 * t2 - 6.0 * t) / h * (y0 - y1)
            + (3.0 * t2 - 4.0 * t + 1.0) * m0
            + (3.0 * t2 - 2.0 * t) * m1;
        (y, dy)
    }
}

impl Interpolator for MonotoneHermite {
    fn interpolate(&self, x: f64) -> MathResult<f64> {
        check_range(self, x)?;
        Ok(self.eval(x).0)
    }

    fn derivative(&self, x: f64) -> MathResult<f64> {
        check_range(self, x)?;
        Ok(self.eval(x).1)
    }

    fn allows_extrapolation(&self) -> bool {
        self.allow_extrapolation
    }

    fn min_x(&self) -> f64 {
        self.xs[0]
    }

    fn max_x(&self) -> f64 {
        self.xs[self.xs.len() - 1]
    }
}

/// Knot tangents satisfying the Fritsch-Carlson monotonicity conditions.
fn fritsch_carlson_tangents(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let deltas: Vec<f64> = (0..n - 1)
        .map(|k| (ys[k + 1] - ys[k]) / (xs[k + 1] - xs[k]))
        .collect();

    let mut ms = vec![0.0; n];
    ms[0] = deltas[0];
    ms[n - 1] = deltas[n - 2];
    for k in 1..n - 1 {
        ms[k] = if deltas[k - 1] * deltas[k] > 0.0 {
            0.5 * (deltas[k - 1] + deltas[k])
        } else {
            0.0
        };
    }

    for k in 0..n - 1 {
        if deltas[k] == 0.0 {
            ms[k] = 0.0;
            ms[k + 1] = 0.0;
            continue;
        }
        let alpha = ms[k] / deltas[k];
        let beta = ms[k + 1] / deltas[k];
        let radius = alpha * alpha + beta * beta;
        if radius > 9.0 {
            let tau = 3.0 / radius.sqrt();
            ms[k] = tau * alpha * deltas[k];
            ms[k + 1] = tau * beta * deltas[k];
        }
    }

    ms
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_through_points() {
        let xs = vec![0.0, 0.5, 1.0, 2.0, 5.0];
        let ys = vec![1.0, 0.99, 0.97, 0.94, 0.85];
        let pchip = MonotoneHermite::new(xs.clone(), ys.clone()).unwrap();
        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(pchip.interpolate(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_flat_segment_has_zero_tangents() {
        let pchip = MonotoneHermite::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 1.0, 1.0, 2.0]).unwrap();
        assert_eq!(pchip.tangents()[1], 0.0);
        assert_eq!(pchip.tangents()[2], 0.0);
        assert_relative_eq!(pchip.interpolate(1.5).unwrap(), 1.0, epsilon = 1e-12);
    }

    #[test]
    fn test_no_overshoot_on_step() {
        let pchip = MonotoneHermite::new(vec![0.0, 1.0, 2.0, 3.0], vec![0.0, 0.0, 1.0, 1.0]).unwrap();
        for k in 0..=30 {
            let y = pchip.interpolate(f64::from(k) * 0.1).unwrap();
            assert!((0.0..=1.0).contains(&y), "overshoot {y}");
        }
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let pchip = MonotoneHermite::new(vec![0.0, 1.0, 2.0, 4.0], vec![0.0, 0.3, 1.5, 1.7]).unwrap();
        let h = 1e-6;
        for x in [0.4, 1.2, 3.1] {
            let fd = (pchip.interpolate(x + h).unwrap() - pchip.interpolate(x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(pchip.derivative(x).unwrap(), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_extrapolation_along_end_tangent() {
        let pchip = MonotoneHermite::new(vec![0.0, 1.0, 2.0], vec![0.0, 1.0, 3.0])
            .unwrap()
            .with_extrapolation();
        let m = pchip.tangents()[2];
        assert_relative_eq!(pchip.interpolate(3.0).unwrap(), 3.0 + m, epsilon = 1e-12);
        assert!(MonotoneHermite::new(vec![0.0, 1.0], vec![0.0, 1.0])
            .unwrap()
            .interpolate(2.0)
            .is_err());
    }

    proptest! {
        #[test]
        fn prop_preserves_monotone_data(
            steps in prop::collection::vec((0.01f64..2.0, 0.0f64..1.0), 2..12),
            fraction in 0.0f64..1.0,
        ) {
            let mut xs = vec![0.0];
            let mut ys = vec![0.0];
            for (dx, dy) in &steps {
                xs.push(xs[xs.len() - 1] + dx);
                ys.push(ys[ys.len() - 1] + dy);
            }
            let x_max = xs[xs.len() - 1];
            let pchip = MonotoneHermite::new(xs, ys).unwrap();

            let x = fraction * x_max;
            let y = pchip.interpolate(x).unwrap();
            let y_next = pchip.interpolate((x + 1e-3).min(x_max)).unwrap();
            prop_assert!(y_next >= y - 1e-12);
        }
    }
}
