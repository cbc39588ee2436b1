//! IMM interest rate futures.
//!
//! Futures enter the bootstrap as FRAs over their interest period, with
//! the futures rate corrected for convexity.

use strata_core::daycounts::DayCountConvention;
use strata_core::types::Date;

use super::IborFra;
use crate::error::{CurveError, CurveResult};

/// The n-th quarterly IMM futures contract after a date.
///
/// Delivery is the n-th next IMM date and the interest period runs to the
/// following IMM date.
///
/// # Example
///
/// ```rust
/// use strata_core::types::Date;
/// use strata_curves::instruments::IborFuture;
///
/// let today = Date::from_ymd(2018, 6, 6).unwrap();
/// let front = IborFuture::new(today, 1).unwrap();
/// assert_eq!(front.delivery_date(), Date::from_ymd(2018, 6, 20).unwrap());
/// assert_eq!(front.end_of_interest_period(), Date::from_ymd(2018, 9, 19).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct IborFuture {
    today: Date,
    number: u32,
    delivery_date: Date,
    end_of_interest_period: Date,
    last_trading_date: Date,
    day_count: DayCountConvention,
    contract_size: f64,
}

impl IborFuture {
    /// Creates the `number`-th contract after `today`.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if `number` is zero.
    pub fn new(today: Date, number: u32) -> CurveResult<Self> {
        if number == 0 {
            return Err(CurveError::configuration(
                "futures contract number must be at least 1",
            ));
        }
        let mut delivery_date = today.next_imm_date()?;
        for _ in 1..number {
            delivery_date = delivery_date.next_imm_date()?;
        }
        let end_of_interest_period = delivery_date.next_imm_date()?;
        Ok(Self {
            today,
            number,
            delivery_date,
            end_of_interest_period,
            last_trading_date: delivery_date.add_days(-2),
            day_count: DayCountConvention::Act360,
            contract_size: 1_000_000.0,
        })
    }

    /// Returns the trade date the contract is counted from.
    #[must_use]
    pub fn today(&self) -> Date {
        self.today
    }

    /// Returns the contract number.
    #[must_use]
    pub fn number(&self) -> u32 {
        self.number
    }

    /// Returns the delivery date, the start of the interest period.
    #[must_use]
    pub fn delivery_date(&self) -> Date {
        self.delivery_date
    }

    /// Returns the end of the interest period.
    #[must_use]
    pub fn end_of_interest_period(&self) -> Date {
        self.end_of_interest_period
    }

    /// Returns the last trading date, two days before delivery.
    #[must_use]
    pub fn last_trading_date(&self) -> Date {
        self.last_trading_date
    }

    /// Returns the contract size.
    #[must_use]
    pub fn contract_size(&self) -> f64 {
        self.contract_size
    }

    /// Converts a futures price to a rate: `(100 - price) / 100`.
    #[must_use]
    pub fn futures_rate(price: f64) -> f64 {
        (100.0 - price) / 100.0
    }

    /// Converts a futures price to a FRA rate.
    ///
    /// `convexity` is quoted in percent. A negative adjustment is added,
    /// a non-negative one subtracted.
    #[must_use]
    pub fn fra_rate(price: f64, convexity: f64) -> f64 {
        let futures_rate = Self::futures_rate(price);
        if convexity < 0.0 {
            futures_rate + convexity / 100.0
        } else {
            futures_rate - convexity / 100.0
        }
    }

    /// Returns the equivalent FRA, receiving fixed on the contract size.
    ///
    /// # Errors
    ///
    /// Returns `CurveError::Configuration` if the interest period is invalid.
    pub fn to_fra(&self, price: f64, convexity: f64) -> CurveResult<IborFra> {
        Ok(IborFra::new(
            self.delivery_date,
            self.end_of_interest_period,
            Self::fra_rate(price, convexity),
            self.day_count,
        )?
        .with_notional(self.contract_size)
        .with_pay_fixed(false))
    }
}
