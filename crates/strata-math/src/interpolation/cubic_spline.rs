//! Natural cubic spline interpolation.

use crate::error::MathResult;
use crate::interpolation::{check_range, find_segment, validate_knots, Interpolator};

/// Natural cubic spline interpolation.
///
/// Constructs a smooth curve through data points using piecewise cubic
/// polynomials with continuous first and second derivatives.
///
/// "Natural" means the second derivative is zero at the endpoints, so the
/// spline is extrapolated linearly along its end slopes. With two knots
/// the spline is the straight line between them.
///
/// # Example
///
/// ```rust
/// use strata_math::interpolation::{NaturalCubicSpline, Interpolator};
///
/// let xs = vec![0.0, 1.0, 2.0, 3.0];
/// let ys = vec![0.0, 1.0, 4.0, 9.0];
///
/// let spline = NaturalCubicSpline::new(xs, ys).unwrap();
/// let y = spline.interpolate(1.5).unwrap();
/// assert!(y > 1.0 && y < 4.0);
/// ```
#[derive(Debug, Clone)]
pub struct NaturalCubicSpline {
    xs: Vec<f64>,
    ys: Vec<f64>,
    /// Second derivatives at each knot
    y2s: Vec<f64>,
    allow_extrapolation: bool,
}

impl NaturalCubicSpline {
    /// Creates a natural cubic spline interpolator.
    ///
    /// # Errors
    ///
    /// Returns an error if there are fewer than 2 points, if lengths differ,
    /// or if `xs` is not strictly increasing.
    pub fn new(xs: Vec<f64>, ys: Vec<f64>) -> MathResult<Self> {
        validate_knots(&xs, &ys, 2)?;
        let y2s = compute_second_derivatives(&xs, &ys);

        Ok(Self {
            xs,
            ys,
            y2s,
            allow_extrapolation: false,
        })
    }

    /// Enables extrapolation beyond the data range.
    #[must_use]
    pub fn with_extrapolation(mut self) -> Self {
        self.allow_extrapolation = true;
        self
    }

    /// Value and first derivative inside segment `i`.
    fn eval_segment(&self, i: usize, x: f64) -> (f64, f64) {
        let x_lo = self.xs[i];
        let x_hi = self.xs[i + 1];
        let y_lo = self.ys[i];
        let y_hi = self.ys[i + 1];
        let y2_lo = self.y2s[i];
        let y2_hi = self.y2s[i + 1];

        let h = x_hi - x_lo;
        let a = (x_hi - x) / h;
        let b = (x - x_lo) / h;

        let y = a * y_lo
            + b * y_hi
            + ((a * a * a - a) * y2_lo + (b * b * b - b) * y2_hi) * (h * h) / 6.0;
        let dy = (y_hi - y_lo) / h - (3.0 * a * a - 1.0) / 6.0 * h * y2_lo
            + (3.0 * b * b - 1.0) / 6.0 * h * y2_hi;
        (y, dy)
    }

    fn eval(&self, x: f64) -> (f64, f64) {
        let n = self.xs.len();
        if x < self.xs[0] {
            let (y0, slope) = self.eval_segment(0, self.xs[0]);
            return (y0 + (x - self.xs[0]) * slope, slope);
        }
        if x > self.xs[n - 1] {
            let (yn, slope) = self.eval_segment(n - 2, self.xs[n - 1]);
            return (yn + (x - self.xs[n - 1]) * slope, slope);
        }
        self.eval_segment(find_segment(&self.xs, x), x)
    }
}

impl Interpolator for NaturalCubicSpline {
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

/// Computes the second derivatives for natural cubic spline.
fn compute_second_derivatives(xs: &[f64], ys: &[f64]) -> Vec<f64> {
    let n = xs.len();
    let mut y2s = vec![0.0; n];
    let mut u = vec![0.0; n - 1];

    // Decomposition loop of the tridiagonal system
    for i in 1..n - 1 {
        let sig = (xs[i] - xs[i - 1]) / (xs[i + 1] - xs[i - 1]);
        let p = sig * y2s[i - 1] + 2.0;
        y2s[i] = (sig - 1.0) / p;
        let jump = (ys[i + 1] - ys[i]) / (xs[i + 1] - xs[i])
            - (ys[i] - ys[i - 1]) / (xs[i] - xs[i - 1]);
        u[i] = (6.0 * jump / (xs[i + 1] - xs[i - 1]) - sig * u[i - 1]) / p;
    }

    // Back-substitution, y2[n-1] stays zero
    for i in (0..n - 1).rev() {
        y2s[i] = y2s[i] * y2s[i + 1] + u[i];
    }

    y2s
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_cubic_spline_through_points() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let spline = NaturalCubicSpline::new(xs.clone(), ys.clone()).unwrap();

        for (x, y) in xs.iter().zip(ys.iter()) {
            assert_relative_eq!(spline.interpolate(*x).unwrap(), *y, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_reproduces_straight_line() {
        let xs = vec![0.0, 0.5, 2.0, 3.0, 7.0];
        let ys: Vec<f64> = xs.iter().map(|x| 1.0 - 0.3 * x).collect();
        let spline = NaturalCubicSpline::new(xs, ys).unwrap();

        assert_relative_eq!(spline.interpolate(1.25).unwrap(), 0.625, epsilon = 1e-12);
        assert_relative_eq!(spline.derivative(4.0).unwrap(), -0.3, epsilon = 1e-12);
    }

    #[test]
    fn test_two_points_is_linear() {
        let spline = NaturalCubicSpline::new(vec![0.0, 2.0], vec![1.0, 3.0]).unwrap();
        assert_relative_eq!(spline.interpolate(0.5).unwrap(), 1.5, epsilon = 1e-12);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let xs = vec![0.0, 1.0, 2.0, 3.0, 4.0];
        let ys = vec![0.0, 1.0, 0.0, 1.0, 0.0];
        let spline = NaturalCubicSpline::new(xs, ys).unwrap();

        let h = 1e-6;
        for x in [0.3, 1.7, 2.5, 3.9] {
            let fd = (spline.interpolate(x + h).unwrap() - spline.interpolate(x - h).unwrap())
                / (2.0 * h);
            assert_relative_eq!(spline.derivative(x).unwrap(), fd, epsilon = 1e-6);
        }
    }

    #[test]
    fn test_natural_end_conditions() {
        let xs = vec![0.0, 1.0, 2.5, 4.0];
        let ys = vec![0.0, 0.8, 0.9, 2.0];
        let y2s = compute_second_derivatives(&xs, &ys);
        assert_eq!(y2s[0], 0.0);
        assert_eq!(y2s[3], 0.0);
    }

    #[test]
    fn test_cubic_spline_extrapolation() {
        let xs = vec![0.0, 1.0, 2.0, 3.0];
        let ys = vec![0.0, 1.0, 4.0, 9.0];

        let spline = NaturalCubicSpline::new(xs.clone(), ys.clone()).unwrap();
        assert!(spline.interpolate(-0.5).is_err());
        assert!(spline.interpolate(3.5).is_err());

        let spline = spline.with_extrapolation();
        let slope = spline.derivative(3.0).unwrap();
        assert_relative_eq!(
            spline.interpolate(3.5).unwrap(),
            9.0 + 0.5 * slope,
            epsilon = 1e-12
        );
    }
}
