//! # Strata Curves
//!
//! Sequential bootstrapping of IBOR discount curves and CDS survival
//! curves for the Strata term-structure library.
//!
//! This crate provides:
//!
//! - **Curve Trait**: the [`Curve`] trait instruments are priced against
//! - **Curves**: [`DiscountCurve`] and [`SurvivalCurve`] over interpolated nodes
//! - **Instruments**: deposits, FRAs, IMM futures, fixed and float legs,
//!   swaps and CDS
//! - **Bootstrap**: [`IborCurve`] and [`CreditCurve`], one node per instrument
//! - **Repricing**: per-instrument residuals of a built curve
//! - **Config**: TOML quote records that build curves
//!
//! ## Quick Start
//!
//! ```rust
//! use strata_curves::prelude::*;
//!
//! let valuation = Date::from_ymd(2018, 12, 20).unwrap();
//! let swaps: Vec<IborSwap> = (1..=5)
//!     .map(|years| {
//!         IborSwap::from_tenor(
//!             valuation,
//!             Tenor::years(years),
//!             LegDirection::Pay,
//!             0.03,
//!             Frequency::SemiAnnual,
//!             DayCountConvention::Act365Fixed,
//!             SwapConfig::default(),
//!         )
//!         .unwrap()
//!     })
//!     .collect();
//!
//! let rates = IborCurve::new(valuation, vec![], vec![], swaps, IborCurveConfig::default())
//!     .unwrap();
//! assert!(rates.repricing_report().unwrap().is_valid());
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]
#![allow(clippy::missing_errors_doc)]
#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::doc_markdown)]
#![allow(clippy::cast_sign_loss)]
#![allow(clippy::cast_possible_wrap)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::cast_precision_loss)]
#![allow(clippy::cast_lossless)]
#![allow(clippy::similar_names)]
#![allow(clippy::too_many_arguments)]
#![allow(clippy::too_many_lines)]
#![allow(clippy::unreadable_literal)]
#![allow(clippy::float_cmp)]
#![allow(clippy::many_single_char_names)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::struct_field_names)]
#![allow(clippy::neg_cmp_op_on_partial_ord)]
#![allow(clippy::uninlined_format_args)]

pub mod bootstrap;
pub mod config;
pub mod curves;
pub mod error;
pub mod instruments;
pub mod repricing;
pub mod traits;

/// Prelude module for convenient imports.
pub mod prelude {
    pub use crate::bootstrap::{CreditCurve, CreditCurveConfig, IborCurve, IborCurveConfig};
    pub use crate::config::{MarketCurves, MarketSpec};
    pub use crate::curves::{DiscountCurve, SurvivalCurve};
    pub use crate::error::{CurveError, CurveResult};
    pub use crate::instruments::{
        Cds, CdsConfig, CdsPricingConfig, FixedLeg, FixedLegConfig, FloatLeg, FloatLegConfig,
        IborDeposit, IborFra, IborFuture, IborSwap, InstrumentKind, LegDirection, SwapConfig,
    };
    pub use crate::repricing::{tolerances, RepricingCheck, RepricingReport};
    pub use crate::traits::Curve;

    pub use strata_core::prelude::*;
    pub use strata_math::interpolation::InterpolationScheme;
}

pub use bootstrap::{CreditCurve, CreditCurveConfig, IborCurve, IborCurveConfig};
pub use curves::{DiscountCurve, SurvivalCurve};
pub use error::{CurveError, CurveResult};
pub use repricing::{RepricingCheck, RepricingReport};
pub use traits::Curve;
