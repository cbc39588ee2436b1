//! Interpolated term structures.
//!
//! - [`DiscountCurve`]: discount factors, with zero, forward and par swap
//!   rate analytics
//! - [`SurvivalCurve`]: survival probabilities for a credit reference
//!
//! Both hold `times` (ACT/365F year fractions from the valuation date) and
//! `values`, starting at `(0, 1)`. They are immutable: bumps and bootstrap
//! steps build new curves.

mod discount;
mod survival;

pub use discount::DiscountCurve;
pub use survival::SurvivalCurve;

use strata_math::interpolation::{CurveInterpolator, InterpolationScheme};

use crate::error::{CurveError, CurveResult};

/// Fits an interpolator to knots anchored at `(0, 1)`.
pub(crate) fn anchored_interpolator(
    scheme: InterpolationScheme,
    times: Vec<f64>,
    values: Vec<f64>,
) -> CurveResult<CurveInterpolator> {
    match (times.first(), values.first()) {
        (Some(&t0), Some(&v0)) if t0 == 0.0 && v0 == 1.0 => {}
        _ => {
            return Err(CurveError::configuration(
                "curve must start at time 0 with value 1",
            ))
        }
    }
    Ok(CurveInterpolator::fit(scheme, times, values)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_is_required() {
        let scheme = InterpolationScheme::FlatForwardRates;
        assert!(anchored_interpolator(scheme, vec![0.0, 1.0], vec![1.0, 0.97]).is_ok());
        assert!(anchored_interpolator(scheme, vec![0.5, 1.0], vec![1.0, 0.97]).is_err());
        assert!(anchored_interpolator(scheme, vec![0.0, 1.0], vec![0.99, 0.97]).is_err());
        assert!(anchored_interpolator(scheme, vec![], vec![]).is_err());
    }

    #[test]
    fn test_knot_errors_are_configuration() {
        let err = anchored_interpolator(
            InterpolationScheme::FlatForwardRates,
            vec![0.0, 1.0, 1.0],
            vec![1.0, 0.97, 0.95],
        )
        .unwrap_err();
        assert!(matches!(err, CurveError::Configuration(_)));
    }
}
