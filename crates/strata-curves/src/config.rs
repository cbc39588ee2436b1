//! Quote records for building curves from configuration files.
//!
//! A [`MarketSpec`] holds a rate curve and an optional credit curve as
//! plain quote records. Maturities are either dates or tenors counted
//! from the settlement date. Everything not given falls back to the
//! usual market conventions.
//!
//! ```toml
//! [rates]
//! valuation_date = "2018-06-06"
//! settlement_days = 2
//!
//! [[rates.deposits]]
//! maturity = "3M"
//! rate = 0.0231381
//!
//! [[rates.futures]]
//! number = 1
//! price = 97.6675
//! convexity = -0.00005
//!
//! [[rates.swaps]]
//! maturity = "2Y"
//! rate = 0.02776305
//!
//! [credit]
//! recovery_rate = 0.4
//!
//! [[credit.contracts]]
//! maturity = "5Y"
//! spread = 0.01
//! ```

use serde::{Deserialize, Serialize};
use strata_core::calendars::{BusinessDayConvention, Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, Frequency, Tenor};
use strata_math::interpolation::InterpolationScheme;
use tracing::info;

use crate::bootstrap::{CreditCurve, CreditCurveConfig, IborCurve, IborCurveConfig};
use crate::error::{CurveError, CurveResult};
use crate::instruments::{
    Cds, CdsConfig, CdsPricingConfig, IborDeposit, IborFra, IborFuture, IborSwap, LegDirection,
    SwapConfig,
};

/// A maturity given as a date or as a tenor such as `"3M"` or `"10Y"`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Maturity {
    /// An explicit date, used as given.
    Date(Date),
    /// A tenor added to an anchor date and rolled to a business day.
    Tenor(Tenor),
}

impl Maturity {
    /// Resolves the maturity against `anchor`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the tenor cannot be applied.
    pub fn resolve(
        &self,
        anchor: Date,
        calendar: CalendarType,
        convention: BusinessDayConvention,
    ) -> CurveResult<Date> {
        match self {
            Self::Date(date) => Ok(*date),
            Self::Tenor(tenor) => Ok(calendar.adjust(anchor.add_tenor(*tenor)?, convention)),
        }
    }
}

/// A deposit quote starting on the settlement date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DepositQuote {
    /// Maturity date or tenor.
    pub maturity: Maturity,
    /// Deposit rate.
    pub rate: f64,
    /// Accrual day count.
    #[serde(default = "default_money_market_day_count")]
    pub day_count: DayCountConvention,
}

/// A FRA quote. Both dates are counted from the settlement date, so a 3x6
/// FRA is `start = "3M"`, `maturity = "6M"`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FraQuote {
    /// Settlement date or tenor.
    pub start: Maturity,
    /// Maturity date or tenor.
    pub maturity: Maturity,
    /// FRA rate.
    pub rate: f64,
    /// Accrual day count.
    #[serde(default = "default_money_market_day_count")]
    pub day_count: DayCountConvention,
}

/// An IMM futures quote, converted to a FRA on the contract's interest
/// period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FutureQuote {
    /// Contract number after the valuation date, starting at 1.
    pub number: u32,
    /// Futures price.
    pub price: f64,
    /// Convexity adjustment in percent.
    #[serde(default)]
    pub convexity: f64,
}

/// A par swap quote starting on the settlement date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwapQuote {
    /// Termination date or tenor.
    pub maturity: Maturity,
    /// Fixed rate.
    pub rate: f64,
    /// Fixed leg frequency.
    #[serde(default = "default_fixed_frequency")]
    pub frequency: Frequency,
    /// Fixed leg day count.
    #[serde(default = "default_fixed_day_count")]
    pub day_count: DayCountConvention,
    /// Float leg frequency.
    #[serde(default = "default_float_frequency")]
    pub float_frequency: Frequency,
    /// Float leg day count.
    #[serde(default = "default_float_day_count")]
    pub float_day_count: DayCountConvention,
    /// Fixed leg direction.
    #[serde(default)]
    pub direction: LegDirection,
}

/// A CDS quote. A tenor maturity rolls to the next CDS date.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CdsQuote {
    /// Maturity date or tenor from the step-in date.
    pub maturity: Maturity,
    /// Running spread.
    pub spread: f64,
}

/// Quotes and settings for an [`IborCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RateCurveSpec {
    /// Valuation date.
    pub valuation_date: Date,
    /// Business days from valuation to settlement.
    #[serde(default)]
    pub settlement_days: u32,
    /// Calendar for settlement and maturity rolls.
    #[serde(default = "default_calendar")]
    pub calendar: CalendarType,
    /// Interpolation between discount factor nodes.
    #[serde(default = "default_interpolation")]
    pub interpolation: InterpolationScheme,
    /// Fail the build if an instrument does not reprice.
    #[serde(default = "default_true")]
    pub check_refit: bool,
    /// Deposit quotes.
    #[serde(default)]
    pub deposits: Vec<DepositQuote>,
    /// FRA quotes.
    #[serde(default)]
    pub fras: Vec<FraQuote>,
    /// Futures quotes, placed after the FRA quotes.
    #[serde(default)]
    pub futures: Vec<FutureQuote>,
    /// Swap quotes.
    #[serde(default)]
    pub swaps: Vec<SwapQuote>,
}

/// Quotes and settings for a [`CreditCurve`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CreditCurveSpec {
    /// Protection start. Defaults to the valuation date.
    #[serde(default)]
    pub step_in: Option<Date>,
    /// Recovery rate.
    #[serde(default = "default_recovery_rate")]
    pub recovery_rate: f64,
    /// Interpolation between survival probability nodes.
    #[serde(default = "default_interpolation")]
    pub interpolation: InterpolationScheme,
    /// Protection leg integration steps per year.
    #[serde(default = "default_steps_per_year")]
    pub steps_per_year: u32,
    /// Closed-form integrals under flat hazard and discount rates.
    #[serde(default = "default_true")]
    pub flat_hazard_integral: bool,
    /// CDS quotes in maturity order.
    #[serde(default)]
    pub contracts: Vec<CdsQuote>,
}

/// A rate curve and an optional credit curve.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSpec {
    /// The rate curve.
    pub rates: RateCurveSpec,
    /// The credit curve, discounted on the rate curve.
    #[serde(default)]
    pub credit: Option<CreditCurveSpec>,
}

/// Curves built from a [`MarketSpec`].
#[derive(Debug, Clone)]
pub struct MarketCurves {
    /// The bootstrapped rate curve.
    pub rates: IborCurve,
    /// The bootstrapped credit curve, if one was specified.
    pub credit: Option<CreditCurve>,
}

fn default_money_market_day_count() -> DayCountConvention {
    DayCountConvention::Act360
}

fn default_fixed_frequency() -> Frequency {
    Frequency::SemiAnnual
}

fn default_fixed_day_count() -> DayCountConvention {
    DayCountConvention::Thirty360Bond
}

fn default_float_frequency() -> Frequency {
    Frequency::Quarterly
}

fn default_float_day_count() -> DayCountConvention {
    DayCountConvention::Thirty360E
}

fn default_calendar() -> CalendarType {
    CalendarType::Weekend
}

fn default_interpolation() -> InterpolationScheme {
    InterpolationScheme::FlatForwardRates
}

fn default_true() -> bool {
    true
}

fn default_recovery_rate() -> f64 {
    0.4
}

fn default_steps_per_year() -> u32 {
    25
}

fn check_finite(what: &str, index: usize, value: f64) -> CurveResult<()> {
    if value.is_finite() {
        Ok(())
    } else {
        Err(CurveError::configuration(format!(
            "{what} #{} has a non-finite value {value}",
            index + 1
        )))
    }
}

impl RateCurveSpec {
    /// Settlement date: `settlement_days` business days after valuation.
    #[must_use]
    pub fn settlement_date(&self) -> Date {
        self.calendar
            .add_business_days(self.valuation_date, self.settlement_days as i32)
    }

    /// Checks the quotes before any instrument is built.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` for an empty quote set, a
    /// non-finite quote or futures contract number zero.
    pub fn validate(&self) -> CurveResult<()> {
        if self.deposits.is_empty()
            && self.fras.is_empty()
            && self.futures.is_empty()
            && self.swaps.is_empty()
        {
            return Err(CurveError::configuration("rate curve has no quotes"));
        }
        for (i, q) in self.deposits.iter().enumerate() {
            check_finite("deposit", i, q.rate)?;
        }
        for (i, q) in self.fras.iter().enumerate() {
            check_finite("FRA", i, q.rate)?;
        }
        for (i, q) in self.futures.iter().enumerate() {
            check_finite("future", i, q.price)?;
            check_finite("future", i, q.convexity)?;
            if q.number == 0 {
                return Err(CurveError::configuration(format!(
                    "future #{} has contract number 0",
                    i + 1
                )));
            }
        }
        for (i, q) in self.swaps.iter().enumerate() {
            check_finite("swap", i, q.rate)?;
        }
        Ok(())
    }

    /// Bootstrap settings from this spec.
    #[must_use]
    pub fn curve_config(&self) -> IborCurveConfig {
        IborCurveConfig::default()
            .with_interpolation(self.interpolation)
            .with_check_refit(self.check_refit)
    }

    /// Builds the calibrating deposits.
    ///
    /// # Errors
    ///
    /// Returns an error if a maturity cannot be resolved or precedes the
    /// settlement date.
    pub fn deposits(&self) -> CurveResult<Vec<IborDeposit>> {
        let settle = self.settlement_date();
        self.deposits
            .iter()
            .map(|q| -> CurveResult<IborDeposit> {
                let maturity =
                    q.maturity
                        .resolve(settle, self.calendar, BusinessDayConvention::ModifiedFollowing)?;
                Ok(IborDeposit::new(settle, maturity, q.rate, q.day_count)?
                    .with_calendar(self.calendar))
            })
            .collect()
    }

    /// Builds the calibrating FRAs, followed by the futures as FRAs.
    ///
    /// # Errors
    ///
    /// Returns an error if a date cannot be resolved.
    pub fn fras(&self) -> CurveResult<Vec<IborFra>> {
        let settle = self.settlement_date();
        let convention = BusinessDayConvention::ModifiedFollowing;
        let mut fras = Vec::with_capacity(self.fras.len() + self.futures.len());
        for q in &self.fras {
            let start = q.start.resolve(settle, self.calendar, convention)?;
            let maturity = q.maturity.resolve(settle, self.calendar, convention)?;
            fras.push(
                IborFra::new(start, maturity, q.rate, q.day_count)?.with_calendar(self.calendar),
            );
        }
        for q in &self.futures {
            let future = IborFuture::new(self.valuation_date, q.number)?;
            fras.push(future.to_fra(q.price, q.convexity)?);
        }
        Ok(fras)
    }

    /// Builds the calibrating swaps.
    ///
    /// # Errors
    ///
    /// Returns an error if a maturity cannot be resolved or a schedule
    /// cannot be generated.
    pub fn swaps(&self) -> CurveResult<Vec<IborSwap>> {
        let settle = self.settlement_date();
        self.swaps
            .iter()
            .map(|q| {
                let termination = match q.maturity {
                    Maturity::Date(date) => date,
                    Maturity::Tenor(tenor) => settle.add_tenor(tenor)?,
                };
                let config = SwapConfig::default()
                    .with_calendar(self.calendar)
                    .with_float_frequency(q.float_frequency)
                    .with_float_day_count(q.float_day_count);
                IborSwap::new(
                    settle,
                    termination,
                    q.direction,
                    q.rate,
                    q.frequency,
                    q.day_count,
                    config,
                )
            })
            .collect()
    }

    /// Validates the quotes and bootstraps the curve.
    ///
    /// # Errors
    ///
    /// Returns any validation, construction or bootstrap error.
    pub fn build(&self) -> CurveResult<IborCurve> {
        self.validate()?;
        IborCurve::new(
            self.valuation_date,
            self.deposits()?,
            self.fras()?,
            self.swaps()?,
            self.curve_config(),
        )
    }
}

impl CreditCurveSpec {
    /// Checks the quotes.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` for missing contracts, a
    /// non-finite or negative spread, or invalid pricing settings.
    pub fn validate(&self) -> CurveResult<()> {
        if self.contracts.is_empty() {
            return Err(CurveError::configuration("credit curve has no CDS quotes"));
        }
        for (i, q) in self.contracts.iter().enumerate() {
            check_finite("CDS", i, q.spread)?;
            if q.spread < 0.0 {
                return Err(CurveError::configuration(format!(
                    "CDS #{} has a negative spread {}",
                    i + 1,
                    q.spread
                )));
            }
        }
        self.pricing().validate()
    }

    /// CDS valuation settings from this spec.
    #[must_use]
    pub fn pricing(&self) -> CdsPricingConfig {
        CdsPricingConfig::default()
            .with_recovery_rate(self.recovery_rate)
            .with_steps_per_year(self.steps_per_year)
            .with_flat_hazard_integral(self.flat_hazard_integral)
    }

    /// Builds the CDS contracts stepping in on `step_in`, or on
    /// `valuation_date` when no step-in date is given.
    ///
    /// # Errors
    ///
    /// Returns an error if a contract cannot be built.
    pub fn contracts(&self, valuation_date: Date, calendar: CalendarType) -> CurveResult<Vec<Cds>> {
        let step_in = self.step_in.unwrap_or(valuation_date);
        let config = CdsConfig::default().with_calendar(calendar);
        self.contracts
            .iter()
            .map(|q| match q.maturity {
                Maturity::Date(maturity) => Cds::new(step_in, maturity, q.spread, config),
                Maturity::Tenor(tenor) => Cds::from_tenor(step_in, tenor, q.spread, config),
            })
            .collect()
    }

    /// Validates the quotes and bootstraps the survival curve on
    /// `rate_curve`.
    ///
    /// # Errors
    ///
    /// Returns any validation, construction or bootstrap error.
    pub fn build(
        &self,
        valuation_date: Date,
        calendar: CalendarType,
        rate_curve: IborCurve,
    ) -> CurveResult<CreditCurve> {
        self.validate()?;
        let config = CreditCurveConfig::default()
            .with_pricing(self.pricing())
            .with_interpolation(self.interpolation);
        CreditCurve::new(
            valuation_date,
            rate_curve,
            self.contracts(valuation_date, calendar)?,
            config,
        )
    }
}

impl MarketSpec {
    /// Parses a spec from TOML.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the text is not a valid spec.
    pub fn from_toml_str(content: &str) -> CurveResult<Self> {
        toml::from_str(content)
            .map_err(|e| CurveError::configuration(format!("invalid market spec: {e}")))
    }

    /// Checks every quote before anything is built.
    ///
    /// # Errors
    ///
    /// Returns the first validation error.
    pub fn validate(&self) -> CurveResult<()> {
        self.rates.validate()?;
        if let Some(credit) = &self.credit {
            credit.validate()?;
        }
        Ok(())
    }

    /// Validates and bootstraps every curve in the spec.
    ///
    /// # Errors
    ///
    /// Returns the first validation, construction or bootstrap error.
    pub fn build(&self) -> CurveResult<MarketCurves> {
        self.validate()?;
        let rates = self.rates.build()?;
        let credit = match &self.credit {
            Some(spec) => Some(spec.build(
                self.rates.valuation_date,
                self.rates.calendar,
                rates.clone(),
            )?),
            None => None,
        };
        info!(
            valuation_date = %self.rates.valuation_date,
            rate_nodes = rates.times().len(),
            credit_nodes = credit.as_ref().map_or(0, |c| c.times().len()),
            "built market curves"
        );
        Ok(MarketCurves { rates, credit })
    }
}
