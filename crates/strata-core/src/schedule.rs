//! Payment schedule generation.
//!
//! A [`Schedule`] is generated once from a [`ScheduleConfig`] and is immutable
//! afterwards. Dates are rolled in whole periods of `12 / frequency` months,
//! either backward from the termination date or forward from the effective
//! date, and then adjusted to business days.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendars::{BusinessDayConvention, Calendar, CalendarType};
use crate::error::{CoreError, CoreResult};
use crate::types::{Date, Frequency};

/// Direction in which schedule dates are rolled.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DateGeneration {
    /// Roll forward from the effective date. Any stub sits at the back.
    Forward,
    /// Roll backward from the termination date. Any stub sits at the front.
    #[default]
    Backward,
}

impl fmt::Display for DateGeneration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DateGeneration::Forward => write!(f, "Forward"),
            DateGeneration::Backward => write!(f, "Backward"),
        }
    }
}

/// Configuration for schedule generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct ScheduleConfig {
    /// Effective (start) date
    pub effective_date: Date,
    /// Termination (end) date
    pub termination_date: Date,
    /// Payment frequency
    pub frequency: Frequency,
    /// Holiday calendar
    pub calendar: CalendarType,
    /// Business day convention
    pub convention: BusinessDayConvention,
    /// Generation direction
    pub generation: DateGeneration,
    /// Snap rolled dates to month end
    pub end_of_month: bool,
    /// Adjust the termination date to a business day
    pub adjust_termination_date: bool,
    /// First regular coupon date (front stub)
    pub first_date: Option<Date>,
    /// Penultimate coupon date (back stub)
    pub next_to_last_date: Option<Date>,
}

impl ScheduleConfig {
    /// Creates a configuration with the market defaults: semi-annual,
    /// US calendar, modified following, backward generation, adjusted
    /// termination date and no end-of-month rule.
    #[must_use]
    pub fn new(effective_date: Date, termination_date: Date) -> Self {
        Self {
            effective_date,
            termination_date,
            frequency: Frequency::SemiAnnual,
            calendar: CalendarType::Us,
            convention: BusinessDayConvention::ModifiedFollowing,
            generation: DateGeneration::Backward,
            end_of_month: false,
            adjust_termination_date: true,
            first_date: None,
            next_to_last_date: None,
        }
    }

    /// Sets the payment frequency.
    #[must_use]
    pub fn with_frequency(mut self, frequency: Frequency) -> Self {
        self.frequency = frequency;
        self
    }

    /// Sets the holiday calendar.
    #[must_use]
    pub fn with_calendar(mut self, calendar: CalendarType) -> Self {
        self.calendar = calendar;
        self
    }

    /// Sets the business day convention.
    #[must_use]
    pub fn with_convention(mut self, convention: BusinessDayConvention) -> Self {
        self.convention = convention;
        self
    }

    /// Sets the generation direction.
    #[must_use]
    pub fn with_generation(mut self, generation: DateGeneration) -> Self {
        self.generation = generation;
        self
    }

    /// Sets the end-of-month rule.
    #[must_use]
    pub fn with_end_of_month(mut self, end_of_month: bool) -> Self {
        self.end_of_month = end_of_month;
        self
    }

    /// Sets whether the termination date is business-day adjusted.
    #[must_use]
    pub fn with_adjust_termination_date(mut self, adjust: bool) -> Self {
        self.adjust_termination_date = adjust;
        self
    }

    /// Sets the first regular coupon date.
    #[must_use]
    pub fn with_first_date(mut self, date: Date) -> Self {
        self.first_date = Some(date);
        self
    }

    /// Sets the penultimate coupon date.
    #[must_use]
    pub fn with_next_to_last_date(mut self, date: Date) -> Self {
        self.next_to_last_date = Some(date);
        self
    }

    /// Checks the date ordering of the configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if the effective date is after the
    /// termination date, if a stub date lies outside the open interval
    /// between them, or if the stub dates are out of order.
    pub fn validate(&self) -> CoreResult<()> {
        let (start, end) = (self.effective_date, self.termination_date);
        if start > end {
            return Err(CoreError::invalid_schedule(format!(
                "effective date {start} is after termination date {end}"
            )));
        }

        let inside = |d: Date| d > start && d < end;
        if let Some(first) = self.first_date {
            if !inside(first) {
                return Err(CoreError::invalid_schedule(format!(
                    "first date {first} must lie strictly between {start} and {end}"
                )));
            }
        }
        if let Some(penultimate) = self.next_to_last_date {
            if !inside(penultimate) {
                return Err(CoreError::invalid_schedule(format!(
                    "next-to-last date {penultimate} must lie strictly between {start} and {end}"
                )));
            }
        }
        if let (Some(first), Some(penultimate)) = (self.first_date, self.next_to_last_date) {
            if first >= penultimate {
                return Err(CoreError::invalid_schedule(format!(
                    "first date {first} must precede next-to-last date {penultimate}"
                )));
            }
        }
        Ok(())
    }
}

/// A generated schedule of adjusted dates.
///
/// The first date is the effective (or previous coupon) date and the last
/// is the termination date. Dates are strictly increasing and there are at
/// least two of them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Schedule {
    config: ScheduleConfig,
    dates: Vec<Date>,
}

impl Schedule {
    /// Generates a schedule from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns `CoreError::InvalidSchedule` if the configuration is invalid
    /// or the generated dates collapse onto each other after adjustment.
    pub fn new(config: ScheduleConfig) -> CoreResult<Self> {
        config.validate()?;

        let mut dates = match config.generation {
            DateGeneration::Backward => Self::generate_backward(&config)?,
            DateGeneration::Forward => Self::generate_forward(&config)?,
        };

        if let Some(first) = dates.first_mut() {
            if *first < config.effective_date {
                *first = config.effective_date;
            }
        }
        if let Some(last) = dates.last_mut() {
            *last = if config.adjust_termination_date {
                config.calendar.adjust(config.termination_date, config.convention)
            } else {
                config.termination_date
            };
        }

        Self::check_dates(&dates)?;
        log::trace!(
            "generated {} schedule {} -> {}: {} dates",
            config.frequency,
            config.effective_date,
            config.termination_date,
            dates.len()
        );

        Ok(Self { config, dates })
    }

    /// Rolls backward from the termination date.
    ///
    /// The last rolled date at or before the front boundary is kept
    /// unadjusted as the previous coupon date.
    fn generate_backward(config: &ScheduleConfig) -> CoreResult<Vec<Date>> {
        let months = config.frequency.months_per_period() as i32;
        let boundary = config.first_date.unwrap_or(config.effective_date);

        let mut rolled = Vec::new();
        let mut next = match config.next_to_last_date {
            Some(penultimate) => {
                rolled.push(config.termination_date);
                penultimate
            }
            None => config.termination_date,
        };

        while next > boundary {
            rolled.push(next);
            next = next.add_months(-months)?;
            if config.end_of_month {
                next = next.end_of_month();
            }
        }

        let front = match config.first_date {
            Some(first) => {
                rolled.push(first);
                config.effective_date
            }
            None => next,
        };

        rolled.sort_unstable();
        let mut dates = Vec::with_capacity(rolled.len() + 1);
        dates.push(front);
        dates.extend(
            rolled
                .into_iter()
                .map(|d| config.calendar.adjust(d, config.convention)),
        );
        Ok(dates)
    }

    /// Rolls forward from the effective date and appends the termination date.
    fn generate_forward(config: &ScheduleConfig) -> CoreResult<Vec<Date>> {
        let months = config.frequency.months_per_period() as i32;
        let boundary = config.next_to_last_date.unwrap_or(config.termination_date);

        let mut rolled = Vec::new();
        let mut next = match config.first_date {
            Some(first) => {
                rolled.push(config.effective_date);
                first
            }
            None => config.effective_date,
        };

        while next < boundary {
            rolled.push(next);
            next = next.add_months(months)?;
        }
        if let Some(penultimate) = config.next_to_last_date {
            rolled.push(penultimate);
        }

        rolled.sort_unstable();
        let mut dates: Vec<Date> = rolled
            .into_iter()
            .map(|d| config.calendar.adjust(d, config.convention))
            .collect();
        dates.push(config.termination_date);
        Ok(dates)
    }

    fn check_dates(dates: &[Date]) -> CoreResult<()> {
        if dates.len() < 2 {
            return Err(CoreError::invalid_schedule(
                "schedule must contain at least two dates",
            ));
        }
        for pair in dates.windows(2) {
            if pair[0] == pair[1] {
                return Err(CoreError::invalid_schedule(format!(
                    "duplicate date {} in schedule",
                    pair[0]
                )));
            }
            if pair[1] < pair[0] {
                return Err(CoreError::invalid_schedule(format!(
                    "dates not increasing: {} after {}",
                    pair[1], pair[0]
                )));
            }
        }
        Ok(())
    }

    /// Returns the adjusted schedule dates.
    #[must_use]
    pub fn adjusted_dates(&self) -> &[Date] {
        &self.dates
    }

    /// Returns an iterator over the (start, end) periods.
    pub fn periods(&self) -> impl Iterator<Item = (Date, Date)> + '_ {
        self.dates.windows(2).map(|w| (w[0], w[1]))
    }

    /// Returns the number of periods.
    #[must_use]
    pub fn num_periods(&self) -> usize {
        self.dates.len() - 1
    }

    /// Returns the configuration this schedule was generated from.
    #[must_use]
    pub fn config(&self) -> &ScheduleConfig {
        &self.config
    }

    /// Returns the first date.
    #[must_use]
    pub fn first(&self) -> Date {
        self.dates[0]
    }

    /// Returns the last date.
    #[must_use]
    pub fn last(&self) -> Date {
        self.dates[self.dates.len() - 1]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn d(y: i32, m: u32, day: u32) -> Date {
        Date::from_ymd(y, m, day).unwrap()
    }

    fn weekend_following(start: Date, end: Date) -> ScheduleConfig {
        ScheduleConfig::new(start, end)
            .with_calendar(CalendarType::Weekend)
            .with_convention(BusinessDayConvention::Following)
    }

    #[test]
    fn test_defaults() {
        let config = ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15));
        assert_eq!(config.frequency, Frequency::SemiAnnual);
        assert_eq!(config.calendar, CalendarType::Us);
        assert_eq!(config.convention, BusinessDayConvention::ModifiedFollowing);
        assert_eq!(config.generation, DateGeneration::Backward);
        assert!(config.adjust_termination_date);
        assert!(!config.end_of_month);
    }

    #[test]
    fn test_backward_semiannual() {
        let schedule = Schedule::new(weekend_following(d(2018, 6, 20), d(2020, 6, 20))).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[
                d(2018, 6, 20),
                d(2018, 12, 20),
                d(2019, 6, 20),
                d(2019, 12, 20),
                d(2020, 6, 22),
            ]
        );
        assert_eq!(schedule.num_periods(), 4);
    }

    #[test]
    fn test_backward_end_of_month_rolls() {
        let config = ScheduleConfig::new(d(2018, 6, 20), d(2020, 6, 20))
            .with_calendar(CalendarType::Weekend)
            .with_end_of_month(true);
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[
                d(2018, 6, 20),
                d(2018, 6, 29),
                d(2018, 12, 31),
                d(2019, 6, 28),
                d(2019, 12, 31),
                d(2020, 6, 22),
            ]
        );
    }

    #[test]
    fn test_backward_keeps_unadjusted_previous_coupon() {
        // Effective date is a Saturday and lands exactly on a roll date
        let config = ScheduleConfig::new(d(2018, 6, 30), d(2020, 6, 30))
            .with_calendar(CalendarType::Weekend)
            .with_end_of_month(true);
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[
                d(2018, 6, 30),
                d(2018, 12, 31),
                d(2019, 6, 28),
                d(2019, 12, 31),
                d(2020, 6, 30),
            ]
        );
    }

    #[test]
    fn test_forward_annual() {
        let config = weekend_following(d(2018, 6, 20), d(2020, 6, 20))
            .with_frequency(Frequency::Annual)
            .with_generation(DateGeneration::Forward);
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[d(2018, 6, 20), d(2019, 6, 20), d(2020, 6, 22)]
        );
    }

    #[test]
    fn test_unadjusted_termination() {
        let config = weekend_following(d(2018, 6, 20), d(2020, 6, 20))
            .with_adjust_termination_date(false);
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(schedule.last(), d(2020, 6, 20));
    }

    #[test]
    fn test_backward_with_first_date() {
        let config = weekend_following(d(2018, 5, 1), d(2020, 6, 20))
            .with_first_date(d(2018, 6, 20));
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[
                d(2018, 5, 1),
                d(2018, 6, 20),
                d(2018, 12, 20),
                d(2019, 6, 20),
                d(2019, 12, 20),
                d(2020, 6, 22),
            ]
        );
    }

    #[test]
    fn test_backward_with_next_to_last_date() {
        let config = weekend_following(d(2018, 6, 20), d(2020, 8, 3))
            .with_next_to_last_date(d(2020, 6, 20));
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[
                d(2018, 6, 20),
                d(2018, 12, 20),
                d(2019, 6, 20),
                d(2019, 12, 20),
                d(2020, 6, 22),
                d(2020, 8, 3),
            ]
        );
    }

    #[test]
    fn test_forward_with_stub_dates() {
        let config = weekend_following(d(2018, 5, 1), d(2019, 8, 1))
            .with_generation(DateGeneration::Forward)
            .with_first_date(d(2018, 6, 20))
            .with_next_to_last_date(d(2019, 6, 20));
        let schedule = Schedule::new(config).unwrap();
        assert_eq!(
            schedule.adjusted_dates(),
            &[
                d(2018, 5, 1),
                d(2018, 6, 20),
                d(2018, 12, 20),
                d(2019, 6, 20),
                d(2019, 8, 1),
            ]
        );
    }

    #[test]
    fn test_periods() {
        let schedule = Schedule::new(weekend_following(d(2018, 6, 20), d(2019, 6, 20))).unwrap();
        let periods: Vec<_> = schedule.periods().collect();
        assert_eq!(
            periods,
            vec![(d(2018, 6, 20), d(2018, 12, 20)), (d(2018, 12, 20), d(2019, 6, 20))]
        );
    }

    #[test]
    fn test_invalid_order() {
        let err = Schedule::new(ScheduleConfig::new(d(2025, 1, 15), d(2020, 1, 15))).unwrap_err();
        assert!(err.to_string().contains("after termination date"));
    }

    #[test]
    fn test_same_dates_rejected() {
        let err = Schedule::new(ScheduleConfig::new(d(2020, 1, 15), d(2020, 1, 15))).unwrap_err();
        assert!(err.to_string().contains("at least two dates"));
    }

    #[test]
    fn test_stub_dates_must_be_inside() {
        let config = ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15)).with_first_date(d(2020, 1, 15));
        assert!(Schedule::new(config).is_err());

        let config =
            ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15)).with_next_to_last_date(d(2026, 1, 15));
        assert!(Schedule::new(config).is_err());

        let config = ScheduleConfig::new(d(2020, 1, 15), d(2025, 1, 15))
            .with_first_date(d(2024, 1, 15))
            .with_next_to_last_date(d(2021, 1, 15));
        assert!(Schedule::new(config).is_err());
    }

    #[test]
    fn test_adjacent_dates_collapse() {
        // Both dates fall on the same weekend and adjust onto the same Monday
        let config = weekend_following(d(2018, 6, 16), d(2018, 6, 17))
            .with_generation(DateGeneration::Forward);
        let err = Schedule::new(config).unwrap_err();
        assert!(err.to_string().contains("duplicate"));
    }

    fn frequency_strategy() -> impl Strategy<Value = Frequency> {
        prop_oneof![
            Just(Frequency::Annual),
            Just(Frequency::SemiAnnual),
            Just(Frequency::Quarterly),
            Just(Frequency::Monthly),
        ]
    }

    proptest! {
        #[test]
        fn prop_backward_schedule_is_increasing(
            offset in 0i64..3000,
            length in 30i64..7000,
            frequency in frequency_strategy(),
            eom in any::<bool>(),
        ) {
            let start = d(2010, 1, 4).add_days(offset);
            let end = start.add_days(length);
            let config = ScheduleConfig::new(start, end)
                .with_frequency(frequency)
                .with_calendar(CalendarType::Target)
                .with_convention(BusinessDayConvention::Following)
                .with_end_of_month(eom);
            let schedule = Schedule::new(config).unwrap();
            let dates = schedule.adjusted_dates();
            prop_assert!(dates.len() >= 2);
            prop_assert_eq!(dates[0], start);
            prop_assert!(dates.windows(2).all(|w| w[0] < w[1]));
        }

        #[test]
        fn prop_generation_is_deterministic(
            offset in 0i64..3000,
            length in 30i64..7000,
            frequency in frequency_strategy(),
        ) {
            let start = d(2010, 1, 4).add_days(offset);
            let config = ScheduleConfig::new(start, start.add_days(length))
                .with_frequency(frequency)
                .with_generation(DateGeneration::Forward);
            prop_assert_eq!(Schedule::new(config), Schedule::new(config));
        }
    }
}
