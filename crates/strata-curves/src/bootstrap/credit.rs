//! CDS survival curve bootstrapping.

use strata_core::types::Date;
use strata_math::interpolation::InterpolationScheme;
use tracing::{debug, info, warn};

use super::ibor::check_order;
use super::{solve_node, IborCurve};
use crate::curves::SurvivalCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{Cds, CdsPricingConfig, InstrumentKind};
use crate::repricing::{RepricingCheck, RepricingReport};
use crate::traits::{curve_time, Curve};

/// Settings for [`CreditCurve`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CreditCurveConfig {
    /// CDS valuation settings used while solving.
    pub pricing: CdsPricingConfig,
    /// Interpolation between survival probability nodes.
    pub interpolation: InterpolationScheme,
    /// Iteration budget for each node.
    pub max_iterations: u32,
    /// Solver tolerance on the survival probability.
    pub tolerance: f64,
    /// Lower end of the survival probability bracket. The upper end is the
    /// previous node.
    pub lower_bound: f64,
    /// Most refinement passes over all nodes for non-local schemes.
    pub max_passes: u32,
    /// A refinement pass that moves no node by more than this ends the
    /// refinement.
    pub pass_tolerance: f64,
}

impl Default for CreditCurveConfig {
    fn default() -> Self {
        Self {
            pricing: CdsPricingConfig::default(),
            interpolation: InterpolationScheme::FlatForwardRates,
            max_iterations: 100,
            tolerance: 1e-10,
            lower_bound: 0.001,
            max_passes: 50,
            pass_tolerance: 1e-9,
        }
    }
}

impl CreditCurveConfig {
    /// Sets the recovery rate.
    #[must_use]
    pub fn with_recovery_rate(mut self, recovery_rate: f64) -> Self {
        self.pricing.recovery_rate = recovery_rate;
        self
    }

    /// Sets the CDS valuation settings.
    #[must_use]
    pub fn with_pricing(mut self, pricing: CdsPricingConfig) -> Self {
        self.pricing = pricing;
        self
    }

    /// Sets the interpolation scheme.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationScheme) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Sets the refinement budget used by non-local schemes.
    #[must_use]
    pub fn with_refinement(mut self, max_passes: u32, pass_tolerance: f64) -> Self {
        self.max_passes = max_passes;
        self.pass_tolerance = pass_tolerance;
        self
    }

    /// Checks the settings.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` for invalid pricing settings or
    /// solver bounds.
    pub fn validate(&self) -> CurveResult<()> {
        self.pricing.validate()?;
        if self.max_iterations == 0 || self.max_passes == 0 {
            return Err(CurveError::configuration(
                "solver iteration budget must be at least 1",
            ));
        }
        if !(self.tolerance > 0.0 && self.pass_tolerance > 0.0) {
            return Err(CurveError::configuration(format!(
                "solver tolerances must be positive, got {} and {}",
                self.tolerance, self.pass_tolerance
            )));
        }
        if !(self.lower_bound > 0.0 && self.lower_bound < 1.0) {
            return Err(CurveError::configuration(format!(
                "survival lower bound must be in (0, 1), got {}",
                self.lower_bound
            )));
        }
        Ok(())
    }
}

/// A survival curve bootstrapped from CDS quotes on top of a rate curve.
///
/// One node is added at each CDS maturity. Its survival probability is
/// solved so that the contract's clean PV is zero, searching between the
/// configured lower bound and the previous node. Survival probabilities
/// are therefore non-increasing. Spline schemes get the same refinement
/// passes as [`IborCurve`].
///
/// # Example
///
/// ```rust
/// use strata_core::daycounts::DayCountConvention;
/// use strata_core::types::{Date, Frequency, Tenor};
/// use strata_curves::bootstrap::{CreditCurve, CreditCurveConfig, IborCurve, IborCurveConfig};
/// use strata_curves::instruments::{Cds, CdsConfig, IborSwap, LegDirection, SwapConfig};
///
/// let valuation = Date::from_ymd(2018, 12, 20).unwrap();
/// let swaps = (1..=5)
///     .map(|years| {
///         IborSwap::from_tenor(
///             valuation,
///             Tenor::years(years),
///             LegDirection::Pay,
///             0.03,
///             Frequency::SemiAnnual,
///             DayCountConvention::Act365Fixed,
///             SwapConfig::default(),
///         )
///         .unwrap()
///     })
///     .collect();
/// let rates =
///     IborCurve::new(valuation, vec![], vec![], swaps, IborCurveConfig::default()).unwrap();
///
/// let contracts = [1, 3, 5]
///     .iter()
///     .map(|&years| Cds::from_tenor(valuation, Tenor::years(years), 0.01, CdsConfig::default()))
///     .collect::<Result<Vec<_>, _>>()
///     .unwrap();
/// let credit =
///     CreditCurve::new(valuation, rates, contracts, CreditCurveConfig::default()).unwrap();
///
/// let q5 = credit.survival_probability(valuation.add_months(60).unwrap());
/// assert!(q5 > 0.8 && q5 < 1.0);
/// assert!(credit.repricing_report().is_valid());
/// ```
#[derive(Debug, Clone)]
pub struct CreditCurve {
    valuation_date: Date,
    rate_curve: IborCurve,
    contracts: Vec<Cds>,
    config: CreditCurveConfig,
    survival: SurvivalCurve,
}

impl CreditCurve {
    /// Bootstraps the survival curve.
    ///
    /// # Errors
    ///
    /// - `CurveError::Configuration` if there are no contracts, the rate
    ///   curve has a different valuation date or the settings are invalid
    /// - `CurveError::CurveOrder` if contract maturities do not strictly
    ///   increase
    /// - `CurveError::RootNotFound` if a node cannot be solved
    pub fn new(
        valuation_date: Date,
        rate_curve: IborCurve,
        contracts: Vec<Cds>,
        config: CreditCurveConfig,
    ) -> CurveResult<Self> {
        config.validate()?;
        if contracts.is_empty() {
            return Err(CurveError::configuration(
                "at least one CDS contract is required",
            ));
        }
        let rate_date = rate_curve.valuation_date();
        if rate_date != valuation_date {
            return Err(CurveError::configuration(format!(
                "rate curve valuation date {rate_date} does not match {valuation_date}"
            )));
        }
        check_order("CDS", contracts.iter().map(|c| (c.maturity(), c.description())))?;

        let mut survival =
            SurvivalCurve::new(valuation_date, vec![0.0], vec![1.0], config.interpolation)?;

        for cds in &contracts {
            let t = curve_time(valuation_date, cds.maturity());
            let q_prev = survival.values().last().copied().unwrap_or(1.0);
            survival = survival.with_point(t, q_prev)?;
            let notional = cds.notional();
            let root = solve_node(
                config.lower_bound,
                q_prev,
                config.tolerance,
                config.max_iterations,
                |q| match survival.with_last_value(q) {
                    Ok(candidate) => {
                        cds.price(valuation_date, &candidate, &rate_curve, &config.pricing)
                            .clean
                            / notional
                    }
                    Err(_) => f64::NAN,
                },
            )
            .map_err(|e| CurveError::root_not_found(cds.description(), e.to_string()))?;
            survival = survival.with_last_value(root)?;
            debug!(instrument = %cds.description(), t, q = root, "CDS node");
        }

        if !config.interpolation.is_local() {
            survival = refine(valuation_date, survival, &contracts, &rate_curve, &config)?;
        }

        info!(
            valuation_date = %valuation_date,
            nodes = survival.times().len(),
            recovery_rate = config.pricing.recovery_rate,
            "bootstrapped credit curve"
        );

        Ok(Self {
            valuation_date,
            rate_curve,
            contracts,
            config,
            survival,
        })
    }

    /// Rebuilds the curve with every CDS coupon shifted by `shift`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bumped curve cannot be built.
    pub fn bumped_spreads(&self, shift: f64) -> CurveResult<Self> {
        Self::new(
            self.valuation_date,
            self.rate_curve.clone(),
            self.contracts.iter().map(|c| c.bumped(shift)).collect(),
            self.config,
        )
    }

    /// Rebuilds the curve against another rate curve.
    ///
    /// # Errors
    ///
    /// Returns an error if the new curve cannot be built.
    pub fn with_rate_curve(&self, rate_curve: IborCurve) -> CurveResult<Self> {
        Self::new(
            self.valuation_date,
            rate_curve,
            self.contracts.clone(),
            self.config,
        )
    }

    /// Clean PV per unit notional of every contract on the built curve.
    ///
    /// The bootstrap already solved each node to zero clean PV, so this is
    /// informational and never fails the build.
    #[must_use]
    pub fn repricing_report(&self) -> RepricingReport {
        let checks = self
            .contracts
            .iter()
            .map(|cds| {
                let pv = cds.value(self.valuation_date, self);
                RepricingCheck::new(
                    cds.description(),
                    InstrumentKind::Cds,
                    cds.maturity(),
                    pv.clean / cds.notional(),
                )
            })
            .collect();
        RepricingReport::new(checks)
    }

    /// Returns the valuation date.
    #[must_use]
    pub fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    /// Returns the bootstrapped survival curve.
    #[must_use]
    pub fn survival_curve(&self) -> &SurvivalCurve {
        &self.survival
    }

    /// Returns the rate curve used for discounting.
    #[must_use]
    pub fn rate_curve(&self) -> &IborCurve {
        &self.rate_curve
    }

    /// Returns the calibrating contracts.
    #[must_use]
    pub fn contracts(&self) -> &[Cds] {
        &self.contracts
    }

    /// Returns the build settings.
    #[must_use]
    pub fn config(&self) -> &CreditCurveConfig {
        &self.config
    }

    /// Probability of no default before `date`.
    #[must_use]
    pub fn survival_probability(&self, date: Date) -> f64 {
        self.survival.survival_probability(date)
    }

    /// Probability of no default before `t` years.
    #[must_use]
    pub fn survival_probability_at(&self, t: f64) -> f64 {
        self.survival.survival_probability_at(t)
    }

    /// Probability of default before `date`.
    #[must_use]
    pub fn default_probability(&self, date: Date) -> f64 {
        self.survival.default_probability(date)
    }

    /// Returns the node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.survival.times()
    }

    /// Returns the node survival probabilities.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.survival.values()
    }
}

/// Re-solves every survival node with all the others in place until a
/// full pass leaves the nodes still. Node `k + 1` belongs to `contracts[k]`.
fn refine(
    valuation_date: Date,
    mut survival: SurvivalCurve,
    contracts: &[Cds],
    rate_curve: &IborCurve,
    config: &CreditCurveConfig,
) -> CurveResult<SurvivalCurve> {
    for pass in 1..=config.max_passes {
        let mut max_move = 0.0_f64;
        for (k, cds) in contracts.iter().enumerate() {
            let node = k + 1;
            let current = survival.values()[node];
            let upper = survival.values()[k];
            let notional = cds.notional();
            let root = solve_node(
                config.lower_bound,
                upper,
                config.tolerance,
                config.max_iterations,
                |q| match survival.with_value(node, q) {
                    Ok(candidate) => {
                        cds.price(valuation_date, &candidate, rate_curve, &config.pricing)
                            .clean
                            / notional
                    }
                    Err(_) => f64::NAN,
                },
            )
            .map_err(|e| CurveError::root_not_found(cds.description(), e.to_string()))?;
            max_move = max_move.max((root - current).abs());
            survival = survival.with_value(node, root)?;
        }
        debug!(pass, max_move, "refinement pass");
        if max_move <= config.pass_tolerance {
            return Ok(survival);
        }
    }
    warn!(
        passes = config.max_passes,
        scheme = %config.interpolation,
        "refinement stopped before the nodes settled"
    );
    Ok(survival)
}
