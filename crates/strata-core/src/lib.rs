//! # Strata Core
//!
//! Dates, calendars, day counts, and schedules for the Strata term-structure
//! library.
//!
//! - **Types**: [`Date`], [`Tenor`], [`Frequency`], [`Compounding`]
//! - **Day Count Conventions**: 30/360 family, ACT/ACT, ACT/365, ACT/360
//! - **Business Day Calendars**: UK, US and TARGET holidays plus weekend-only
//! - **Schedules**: Forward and backward coupon date generation
//!
//! Everything in this crate is an immutable value. Calendars and day counts
//! are `Copy` and carry no state.
//!
//! ## Example
//!
//! ```rust
//! use strata_core::prelude::*;
//!
//! let start = Date::from_ymd(2018, 6, 20).unwrap();
//! let end = Date::from_ymd(2020, 6, 20).unwrap();
//! let config = ScheduleConfig::new(start, end)
//!     .with_calendar(CalendarType::Weekend)
//!     .with_convention(BusinessDayConvention::Following);
//! let schedule = Schedule::new(config).unwrap();
//! assert_eq!(schedule.num_periods(), 4);
//!
//! let yf = DayCountConvention::Act360.year_fraction(start, end).unwrap();
//! assert!(yf > 2.0);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::manual_div_ceil)]
#![allow(clippy::missing_fields_in_debug)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::manual_range_contains)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::match_same_arms)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::if_not_else)]
#![allow(clippy::needless_pass_by_value)]
#![allow(clippy::redundant_closure_for_method_calls)]
#![allow(clippy::items_after_statements)]
#![allow(clippy::unnecessary_wraps)]
#![allow(clippy::uninlined_format_args)]
#![allow(clippy::single_match)]
#![allow(clippy::unused_self)]
#![allow(clippy::trivially_copy_pass_by_ref)]
#![allow(clippy::if_same_then_else)]
#![allow(clippy::unnecessary_map_or)]
#![allow(clippy::cast_possible_truncation)]

pub mod calendars;
pub mod daycounts;
pub mod error;
pub mod schedule;
pub mod types;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::calendars::{BusinessDayConvention, Calendar, CalendarType};
    pub use crate::daycounts::{DayCount, DayCountConvention};
    pub use crate::error::{CoreError, CoreResult};
    pub use crate::schedule::{DateGeneration, Schedule, ScheduleConfig};
    pub use crate::types::{Compounding, Date, Frequency, Tenor, TenorUnit};
}

// Re-export commonly used types at crate root
pub use calendars::{BusinessDayConvention, Calendar, CalendarType};
pub use daycounts::{DayCount, DayCountConvention};
pub use error::{CoreError, CoreResult};
pub use schedule::{DateGeneration, Schedule, ScheduleConfig};
pub use types::{Compounding, Date, Frequency, Tenor, TenorUnit};
