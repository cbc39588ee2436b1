//! IBOR discount curve bootstrapping.

use serde::{Deserialize, Serialize};
use strata_core::types::Date;
use strata_math::interpolation::InterpolationScheme;
use tracing::{debug, info, warn};

use super::solve_node;
use crate::curves::DiscountCurve;
use crate::error::{CurveError, CurveResult};
use crate::instruments::{IborDeposit, IborFra, IborSwap, InstrumentKind};
use crate::repricing::{RepricingCheck, RepricingReport};
use crate::traits::{curve_time, Curve};

/// Settings for [`IborCurve`].
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IborCurveConfig {
    /// Interpolation between discount factor nodes.
    pub interpolation: InterpolationScheme,
    /// Fail the build if a calibrating instrument does not reprice.
    pub check_refit: bool,
    /// Iteration budget for each FRA node.
    pub fra_max_iterations: u32,
    /// Iteration budget for each swap node.
    pub swap_max_iterations: u32,
    /// Solver tolerance on the discount factor.
    pub tolerance: f64,
    /// Lower end of the discount factor bracket.
    pub lower_bound: f64,
    /// Upper end of the discount factor bracket.
    pub upper_bound: f64,
    /// Most refinement passes over all nodes for non-local schemes.
    pub max_passes: u32,
    /// A refinement pass that moves no node by more than this ends the
    /// refinement.
    pub pass_tolerance: f64,
}

impl Default for IborCurveConfig {
    fn default() -> Self {
        Self {
            interpolation: InterpolationScheme::FlatForwardRates,
            check_refit: true,
            fra_max_iterations: 100,
            swap_max_iterations: 10_000,
            tolerance: 1e-10,
            lower_bound: 0.001,
            upper_bound: 1.2,
            max_passes: 50,
            pass_tolerance: 1e-9,
        }
    }
}

impl IborCurveConfig {
    /// Sets the interpolation scheme.
    #[must_use]
    pub fn with_interpolation(mut self, interpolation: InterpolationScheme) -> Self {
        self.interpolation = interpolation;
        self
    }

    /// Enables or disables the refit check.
    #[must_use]
    pub fn with_check_refit(mut self, check_refit: bool) -> Self {
        self.check_refit = check_refit;
        self
    }

    /// Sets the solver tolerance.
    #[must_use]
    pub fn with_tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Sets the discount factor bracket.
    #[must_use]
    pub fn with_bracket(mut self, lower_bound: f64, upper_bound: f64) -> Self {
        self.lower_bound = lower_bound;
        self.upper_bound = upper_bound;
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
    /// Returns `CurveError::Configuration` for a non-positive tolerance, an
    /// empty iteration budget or a bracket that is not `0 < lower < upper`.
    pub fn validate(&self) -> CurveResult<()> {
        if !(self.tolerance > 0.0 && self.pass_tolerance > 0.0) {
            return Err(CurveError::configuration(format!(
                "solver tolerances must be positive, got {} and {}",
                self.tolerance, self.pass_tolerance
            )));
        }
        if self.fra_max_iterations == 0 || self.swap_max_iterations == 0 || self.max_passes == 0 {
            return Err(CurveError::configuration(
                "solver iteration budgets must be at least 1",
            ));
        }
        if !(self.lower_bound > 0.0 && self.upper_bound > self.lower_bound) {
            return Err(CurveError::configuration(format!(
                "invalid discount factor bracket [{}, {}]",
                self.lower_bound, self.upper_bound
            )));
        }
        Ok(())
    }
}

/// A discount curve bootstrapped from deposits, FRAs and swaps.
///
/// Nodes are added in order: one per deposit maturity, one per FRA maturity
/// and one per swap at the fixed leg's last payment date. Deposits are
/// solved in closed form. FRAs are closed form when they settle inside the
/// curve built so far and mature beyond it, and root-solved otherwise.
/// Swaps are always root-solved.
///
/// Spline schemes are fitted over every node, so a later node moves the
/// curve under instruments already solved. For those schemes the
/// sequential pass is followed by refinement passes that re-solve each
/// node with all the others in place, until no node moves by more than
/// `pass_tolerance`.
///
/// With [`with_discount_curve`](Self::with_discount_curve) the curve is a
/// projection curve: FRAs and swaps are discounted on the supplied curve
/// and only their forwards come from this one.
#[derive(Debug, Clone)]
pub struct IborCurve {
    valuation_date: Date,
    deposits: Vec<IborDeposit>,
    fras: Vec<IborFra>,
    swaps: Vec<IborSwap>,
    discount_curve: Option<DiscountCurve>,
    config: IborCurveConfig,
    curve: DiscountCurve,
}

impl IborCurve {
    /// Bootstraps a single curve used for both projection and discounting.
    ///
    /// # Errors
    ///
    /// - `CurveError::CurveOrder` if instruments are out of maturity order
    /// - `CurveError::Configuration` for an empty instrument set, a forward
    ///   starting swap strip with no deposit, or invalid settings
    /// - `CurveError::RootNotFound` if a node cannot be solved
    /// - `CurveError::Refit` if `check_refit` is set and an instrument does
    ///   not reprice
    pub fn new(
        valuation_date: Date,
        deposits: Vec<IborDeposit>,
        fras: Vec<IborFra>,
        swaps: Vec<IborSwap>,
        config: IborCurveConfig,
    ) -> CurveResult<Self> {
        Self::build(valuation_date, deposits, fras, swaps, None, config)
    }

    /// Rebuilds the curve as a projection curve discounted on `discount`.
    ///
    /// # Errors
    ///
    /// Returns an error if the valuation dates differ or the rebuild fails.
    pub fn with_discount_curve(&self, discount: DiscountCurve) -> CurveResult<Self> {
        if discount.valuation_date() != self.valuation_date {
            return Err(CurveError::configuration(format!(
                "discount curve valuation date {} does not match {}",
                discount.valuation_date(),
                self.valuation_date
            )));
        }
        Self::build(
            self.valuation_date,
            self.deposits.clone(),
            self.fras.clone(),
            self.swaps.clone(),
            Some(discount),
            self.config,
        )
    }

    /// Rebuilds the curve with every quote shifted by `shift`.
    ///
    /// # Errors
    ///
    /// Returns an error if the bumped curve cannot be built.
    pub fn bumped(&self, shift: f64) -> CurveResult<Self> {
        Self::build(
            self.valuation_date,
            self.deposits.iter().map(|d| d.bumped(shift)).collect(),
            self.fras.iter().map(|f| f.bumped(shift)).collect(),
            self.swaps.iter().map(|s| s.bumped(shift)).collect(),
            self.discount_curve.clone(),
            self.config,
        )
    }

    fn build(
        valuation_date: Date,
        deposits: Vec<IborDeposit>,
        fras: Vec<IborFra>,
        swaps: Vec<IborSwap>,
        discount_curve: Option<DiscountCurve>,
        config: IborCurveConfig,
    ) -> CurveResult<Self> {
        config.validate()?;
        let anchored = anchored_deposits(valuation_date, &deposits, &fras, &swaps)?;

        let mut curve = DiscountCurve::new(
            valuation_date,
            vec![0.0],
            vec![1.0],
            config.interpolation,
        )?;
        let discount = discount_curve.as_ref().map(|c| c as &dyn Curve);

        for deposit in &anchored {
            let df = curve.discount_factor(deposit.start()) * deposit.maturity_df();
            let t = curve_time(valuation_date, deposit.maturity());
            curve = curve.with_point(t, df)?;
            debug!(
                instrument = %deposit.description(),
                t,
                df,
                "deposit node"
            );
        }

        for fra in &fras {
            let t_settle = curve_time(valuation_date, fra.start());
            let t_mat = curve_time(valuation_date, fra.maturity());
            let t_last = curve.times().last().copied().unwrap_or(0.0);

            let df = if t_settle < t_last && t_mat > t_last {
                let df = fra.maturity_df(&curve);
                curve = curve.with_point(t_mat, df)?;
                df
            } else {
                let placeholder = curve.values().last().copied().unwrap_or(1.0);
                curve = curve.with_point(t_mat, placeholder)?;
                let notional = fra.notional();
                let root = solve_node(
                    config.lower_bound,
                    config.upper_bound,
                    config.tolerance,
                    config.fra_max_iterations,
                    |v| match curve.with_last_value(v) {
                        Ok(candidate) => fra.value(valuation_date, &candidate, discount) / notional,
                        Err(_) => f64::NAN,
                    },
                )
                .map_err(|e| CurveError::root_not_found(fra.description(), e.to_string()))?;
                curve = curve.with_last_value(root)?;
                root
            };
            debug!(instrument = %fra.description(), t = t_mat, df, "FRA node");
        }

        for swap in &swaps {
            let t = curve_time(valuation_date, swap.fixed_leg().last_payment_date());
            let placeholder = curve.values().last().copied().unwrap_or(1.0);
            curve = curve.with_point(t, placeholder)?;
            let notional = swap.notional();
            let root = solve_node(
                config.lower_bound,
                config.upper_bound,
                config.tolerance,
                config.swap_max_iterations,
                |v| match curve.with_last_value(v) {
                    Ok(candidate) => swap.value(valuation_date, &candidate, discount, None) / notional,
                    Err(_) => f64::NAN,
                },
            )
            .map_err(|e| CurveError::root_not_found(swap.description(), e.to_string()))?;
            curve = curve.with_last_value(root)?;
            debug!(instrument = %swap.description(), t, df = root, "swap node");
        }

        if !config.interpolation.is_local() {
            let calibration: Vec<Calibration<'_>> = anchored
                .iter()
                .map(Calibration::Deposit)
                .chain(fras.iter().map(Calibration::Fra))
                .chain(swaps.iter().map(Calibration::Swap))
                .collect();
            curve = refine(valuation_date, curve, &calibration, discount, &config)?;
        }

        info!(
            valuation_date = %valuation_date,
            nodes = curve.len(),
            deposits = anchored.len(),
            fras = fras.len(),
            swaps = swaps.len(),
            dual_curve = discount_curve.is_some(),
            "bootstrapped IBOR curve"
        );

        let built = Self {
            valuation_date,
            deposits,
            fras,
            swaps,
            discount_curve,
            config,
            curve,
        };
        if config.check_refit {
            if let Some(failure) = built.repricing_report()?.first_failure() {
                return Err(CurveError::refit(
                    failure.instrument.clone(),
                    failure.residual,
                    failure.tolerance,
                ));
            }
        }
        Ok(built)
    }

    /// Reprices every calibrating instrument on the built curve.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if a deposit matures before the
    /// valuation date.
    pub fn repricing_report(&self) -> CurveResult<RepricingReport> {
        let discount = self.discount_curve.as_ref().map(|c| c as &dyn Curve);
        let mut checks = Vec::with_capacity(self.deposits.len() + self.fras.len() + self.swaps.len());

        for deposit in &self.deposits {
            let value = deposit.value(self.valuation_date, self)? / deposit.notional();
            checks.push(RepricingCheck::new(
                deposit.description(),
                InstrumentKind::Deposit,
                deposit.maturity(),
                value - 1.0,
            ));
        }
        for fra in &self.fras {
            let value = fra.value(self.valuation_date, self, discount) / fra.notional();
            checks.push(RepricingCheck::new(
                fra.description(),
                InstrumentKind::Fra,
                fra.maturity(),
                value,
            ));
        }
        for swap in &self.swaps {
            let value =
                swap.value(swap.effective_date(), self, discount, None) / swap.notional();
            checks.push(RepricingCheck::new(
                swap.description(),
                InstrumentKind::Swap,
                swap.maturity_date(),
                value,
            ));
        }
        Ok(RepricingReport::new(checks))
    }

    /// Returns the bootstrapped discount curve.
    #[must_use]
    pub fn curve(&self) -> &DiscountCurve {
        &self.curve
    }

    /// Returns the separate discount curve of a dual-curve setup.
    #[must_use]
    pub fn discount_curve(&self) -> Option<&DiscountCurve> {
        self.discount_curve.as_ref()
    }

    /// Returns the node times.
    #[must_use]
    pub fn times(&self) -> &[f64] {
        self.curve.times()
    }

    /// Returns the node discount factors.
    #[must_use]
    pub fn values(&self) -> &[f64] {
        self.curve.values()
    }

    /// Returns the discount factor for `date`.
    #[must_use]
    pub fn discount_factor(&self, date: Date) -> f64 {
        self.curve.discount_factor(date)
    }

    /// Returns the discount factor at `t` years.
    #[must_use]
    pub fn discount_factor_at(&self, t: f64) -> f64 {
        self.curve.discount_factor_at(t)
    }

    /// Returns the calibrating deposits as supplied.
    #[must_use]
    pub fn deposits(&self) -> &[IborDeposit] {
        &self.deposits
    }

    /// Returns the calibrating FRAs.
    #[must_use]
    pub fn fras(&self) -> &[IborFra] {
        &self.fras
    }

    /// Returns the calibrating swaps.
    #[must_use]
    pub fn swaps(&self) -> &[IborSwap] {
        &self.swaps
    }

    /// Returns the build settings.
    #[must_use]
    pub fn config(&self) -> &IborCurveConfig {
        &self.config
    }
}

impl Curve for IborCurve {
    fn valuation_date(&self) -> Date {
        self.valuation_date
    }

    fn discount_factor_at(&self, t: f64) -> f64 {
        self.curve.discount_factor_at(t)
    }
}

/// Checks instrument order and returns the deposits to bootstrap, with a
/// synthetic deposit from the valuation date prepended when the strip
/// starts later.
fn anchored_deposits(
    valuation_date: Date,
    deposits: &[IborDeposit],
    fras: &[IborFra],
    swaps: &[IborSwap],
) -> CurveResult<Vec<IborDeposit>> {
    if deposits.is_empty() && fras.is_empty() && swaps.is_empty() {
        return Err(CurveError::configuration(
            "at least one calibrating instrument is required",
        ));
    }

    check_order("deposit", deposits.iter().map(|d| (d.maturity(), d.description())))?;
    check_order("FRA", fras.iter().map(|f| (f.maturity(), f.description())))?;
    check_order("swap", swaps.iter().map(|s| (s.maturity_date(), s.description())))?;

    if let (Some(last_deposit), Some(first_fra)) = (deposits.last(), fras.first()) {
        if first_fra.maturity() <= last_deposit.maturity() {
            return Err(CurveError::curve_order(format!(
                "first FRA maturity {} must be after last deposit maturity {}",
                first_fra.maturity(),
                last_deposit.maturity()
            )));
        }
    }
    if let (Some(last_fra), Some(first_swap)) = (fras.last(), swaps.first()) {
        if first_swap.maturity_date() <= last_fra.maturity() {
            return Err(CurveError::curve_order(format!(
                "first swap maturity {} must be after last FRA maturity {}",
                first_swap.maturity_date(),
                last_fra.maturity()
            )));
        }
    }

    let forward_swaps = swaps
        .first()
        .map_or(true, |s| s.effective_date() > valuation_date);
    if let Some(first_swap) = swaps.first() {
        if forward_swaps && deposits.is_empty() {
            return Err(CurveError::configuration(format!(
                "swaps start on {} after valuation date {valuation_date}; \
                 a deposit is required to pin the short end",
                first_swap.effective_date()
            )));
        }
    }

    let mut anchored = Vec::with_capacity(deposits.len() + 1);
    if let Some(first) = deposits.first() {
        if forward_swaps && first.start() > valuation_date {
            let synthetic = first.spanning(valuation_date, first.start())?;
            warn!(
                start = %valuation_date,
                end = %first.start(),
                rate = first.rate(),
                "inserting synthetic deposit to anchor the curve at the valuation date"
            );
            anchored.push(synthetic);
        }
    }
    anchored.extend_from_slice(deposits);
    Ok(anchored)
}

/// Instrument maturities of one kind must be strictly increasing: two
/// instruments maturing together would share a curve node.
pub(super) fn check_order(
    kind: &str,
    instruments: impl Iterator<Item = (Date, String)>,
) -> CurveResult<()> {
    let mut previous: Option<(Date, String)> = None;
    for (maturity, description) in instruments {
        if let Some((prev, prev_description)) = &previous {
            if maturity < *prev {
                return Err(CurveError::curve_order(format!(
                    "{kind} maturity {maturity} is before previous {kind} maturity {prev}"
                )));
            }
            if maturity == *prev {
                return Err(CurveError::curve_order(format!(
                    "{description} and {prev_description} share the {kind} maturity {maturity}"
                )));
            }
        }
        previous = Some((maturity, description));
    }
    Ok(())
}

/// A calibrating instrument and the node it pins.
enum Calibration<'a> {
    Deposit(&'a IborDeposit),
    Fra(&'a IborFra),
    Swap(&'a IborSwap),
}

impl Calibration<'_> {
    fn description(&self) -> String {
        match self {
            Self::Deposit(deposit) => deposit.description(),
            Self::Fra(fra) => fra.description(),
            Self::Swap(swap) => swap.description(),
        }
    }

    /// Value per unit notional on `curve`, zero when the instrument reprices.
    fn residual(
        &self,
        valuation_date: Date,
        curve: &DiscountCurve,
        discount: Option<&dyn Curve>,
    ) -> f64 {
        match self {
            Self::Deposit(deposit) => match deposit.value(valuation_date, curve) {
                Ok(value) => value / deposit.notional() - 1.0,
                Err(_) => f64::NAN,
            },
            Self::Fra(fra) => fra.value(valuation_date, curve, discount) / fra.notional(),
            Self::Swap(swap) => swap.value(valuation_date, curve, discount, None) / swap.notional(),
        }
    }
}

/// Re-solves every node with all the others in place until a full pass
/// leaves the nodes still. Node `k + 1` belongs to `calibration[k]`.
fn refine(
    valuation_date: Date,
    mut curve: DiscountCurve,
    calibration: &[Calibration<'_>],
    discount: Option<&dyn Curve>,
    config: &IborCurveConfig,
) -> CurveResult<DiscountCurve> {
    for pass in 1..=config.max_passes {
        let mut max_move = 0.0_f64;
        for (k, instrument) in calibration.iter().enumerate() {
            let node = k + 1;
            let current = curve.values()[node];
            let solve = |max_iterations: u32| -> CurveResult<f64> {
                solve_node(
                    config.lower_bound,
                    config.upper_bound,
                    config.tolerance,
                    max_iterations,
                    |v| match curve.with_value(node, v) {
                        Ok(candidate) => instrument.residual(valuation_date, &candidate, discount),
                        Err(_) => f64::NAN,
                    },
                )
                .map_err(|e| CurveError::root_not_found(instrument.description(), e.to_string()))
            };
            let value = match instrument {
                // the start date is a node at or before this one
                Calibration::Deposit(deposit) => {
                    curve.discount_factor(deposit.start()) * deposit.maturity_df()
                }
                Calibration::Fra(_) => solve(config.fra_max_iterations)?,
                Calibration::Swap(_) => solve(config.swap_max_iterations)?,
            };
            max_move = max_move.max((value - current).abs());
            curve = curve.with_value(node, value)?;
        }
        debug!(pass, max_move, "refinement pass");
        if max_move <= config.pass_tolerance {
            return Ok(curve);
        }
    }
    warn!(
        passes = config.max_passes,
        scheme = %config.interpolation,
        "refinement stopped before the nodes settled"
    );
    Ok(curve)
}
