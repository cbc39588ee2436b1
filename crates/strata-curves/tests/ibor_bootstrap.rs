//! Integration tests: IBOR curve bootstrapping on market data.
//!
//! USD LIBOR on 2018-06-06: a 3M deposit, six IMM futures with convexity
//! adjustments and par swaps from 2Y to 50Y, semi-annual 30E/360.

use approx::assert_relative_eq;
use strata_core::calendars::{Calendar, CalendarType};
use strata_core::daycounts::DayCountConvention;
use strata_core::types::{Date, Frequency, Tenor};
use strata_curves::bootstrap::{IborCurve, IborCurveConfig};
use strata_curves::instruments::{
    IborDeposit, IborFra, IborFuture, IborSwap, LegDirection, SwapConfig,
};
use strata_curves::CurveError;
use strata_math::interpolation::InterpolationScheme;

fn date(y: i32, m: u32, d: u32) -> Date {
    Date::from_ymd(y, m, d).unwrap()
}

fn tenor(s: &str) -> Tenor {
    Tenor::parse(s).unwrap()
}

/// (tenor, bid, ask) in percent.
const SWAP_QUOTES: [(&str, f64, f64); 17] = [
    ("2Y", 2.77417, 2.77844),
    ("3Y", 2.86098, 2.86582),
    ("4Y", 2.90240, 2.90620),
    ("5Y", 2.92944, 2.92906),
    ("6Y", 2.94001, 2.94499),
    ("7Y", 2.95352, 2.95998),
    ("8Y", 2.96830, 2.97400),
    ("9Y", 2.98403, 2.98817),
    ("10Y", 2.99716, 3.00394),
    ("11Y", 3.01344, 3.01596),
    ("12Y", 3.02276, 3.02684),
    ("15Y", 3.04092, 3.04508),
    ("20Y", 3.04417, 3.05183),
    ("25Y", 3.03219, 3.03621),
    ("30Y", 3.01030, 3.01370),
    ("40Y", 2.96946, 2.97354),
    ("50Y", 2.91552, 2.93748),
];

/// (price, convexity) for the first six contracts.
const FUTURES: [(f64, f64); 6] = [
    (97.6675, -0.00005),
    (97.5200, -0.00060),
    (97.3550, -0.00146),
    (97.2450, -0.00263),
    (97.1450, -0.00411),
    (97.0750, -0.00589),
];

struct MarketData {
    valuation: Date,
    settlement: Date,
    deposits: Vec<IborDeposit>,
    fras: Vec<IborFra>,
    swaps: Vec<IborSwap>,
}

fn usd_libor() -> MarketData {
    let valuation = date(2018, 6, 6);
    let deposits = vec![IborDeposit::new(
        valuation,
        valuation.add_months(3).unwrap(),
        0.0231381,
        DayCountConvention::Act360,
    )
    .unwrap()];

    let fras = FUTURES
        .iter()
        .enumerate()
        .map(|(i, &(price, convexity))| {
            IborFuture::new(valuation, i as u32 + 1)
                .unwrap()
                .to_fra(price, convexity)
                .unwrap()
        })
        .collect();

    let settlement = CalendarType::Weekend.add_business_days(valuation, 2);
    let swaps = SWAP_QUOTES
        .iter()
        .map(|&(t, bid, ask)| {
            IborSwap::from_tenor(
                settlement,
                tenor(t),
                LegDirection::Pay,
                (bid + ask) / 200.0,
                Frequency::SemiAnnual,
                DayCountConvention::Thirty360E,
                SwapConfig::default(),
            )
            .unwrap()
        })
        .collect();

    MarketData {
        valuation,
        settlement,
        deposits,
        fras,
        swaps,
    }
}

fn build(data: &MarketData, config: IborCurveConfig) -> IborCurve {
    IborCurve::new(
        data.valuation,
        data.deposits.clone(),
        data.fras.clone(),
        data.swaps.clone(),
        config,
    )
    .unwrap()
}

#[test]
fn test_usd_libor_curve_reprices_every_instrument() {
    let data = usd_libor();
    assert_eq!(data.settlement, date(2018, 6, 8));
    let curve = build(&data, IborCurveConfig::default());

    // anchor, one deposit, six futures, seventeen swaps
    assert_eq!(curve.times().len(), 1 + 1 + 6 + 17);
    assert!(curve.times().windows(2).all(|w| w[1] > w[0]));

    let report = curve.repricing_report().unwrap();
    assert!(report.is_valid(), "{report}");
    assert_eq!(report.total_count(), 24);
    assert!(report.max_error() < 1e-5);
}

#[test]
fn test_first_swap_is_at_par() {
    let data = usd_libor();
    let curve = build(&data, IborCurveConfig::default());
    let swap = &data.swaps[0];

    // value within two currency units on a million notional
    let at_valuation = swap.value(data.valuation, &curve, Some(&curve), None);
    let at_settlement = swap.value(data.settlement, &curve, None, None);
    assert!(at_valuation.abs() < 2.0, "PV {at_valuation}");
    assert!(at_settlement.abs() < 2.0, "PV {at_settlement}");

    let par = swap.swap_rate(data.valuation, &curve, None, None).unwrap();
    assert_relative_eq!(par, swap.coupon(), epsilon = 1e-7);
}

#[test]
fn test_futures_strip_is_closed_form_for_the_first_contract() {
    let data = usd_libor();
    let curve = build(&data, IborCurveConfig::default());
    let front = &data.fras[0];

    // settles inside the deposit and matures after it
    assert!(front.start() < data.deposits[0].maturity());
    assert!(front.maturity() > data.deposits[0].maturity());
    assert_relative_eq!(
        curve.discount_factor(front.maturity()),
        front.maturity_df(&curve),
        epsilon = 1e-12
    );
}

#[test]
fn test_single_deposit_curve() {
    let valuation = date(2018, 6, 6);
    for (t, rate) in [("1M", 0.0209), ("3M", 0.0231381), ("1Y", 0.0275)] {
        let deposit =
            IborDeposit::from_tenor(valuation, tenor(t), rate, DayCountConvention::Act360)
                .unwrap();
        let curve = IborCurve::new(
            valuation,
            vec![deposit.clone()],
            vec![],
            vec![],
            IborCurveConfig::default(),
        )
        .unwrap();
        let days = valuation.days_between(&deposit.maturity()) as f64;
        assert_relative_eq!(
            curve.discount_factor(deposit.maturity()),
            1.0 / (1.0 + rate * days / 360.0),
            epsilon = 1e-10
        );
    }
}

#[test]
fn test_every_interpolation_scheme_reprices() {
    let data = usd_libor();
    for &scheme in InterpolationScheme::all() {
        let curve = build(&data, IborCurveConfig::default().with_interpolation(scheme));
        let report = curve.repricing_report().unwrap();
        assert!(report.is_valid(), "{scheme}: {report}");
        assert_eq!(report.checks().len(), data.deposits.len() + data.fras.len() + data.swaps.len());
    }
}

#[test]
fn test_parallel_bump_lowers_discount_factors() {
    let data = usd_libor();
    let curve = build(&data, IborCurveConfig::default());
    let bumped = curve.bumped(0.0001).unwrap();

    let ten_years = data.valuation.add_months(120).unwrap();
    assert!(bumped.discount_factor(ten_years) < curve.discount_factor(ten_years));
    assert!(bumped.repricing_report().unwrap().is_valid());
}

#[test]
fn test_out_of_order_swaps_are_rejected() {
    let mut data = usd_libor();
    data.swaps.swap(2, 3);
    let err = IborCurve::new(
        data.valuation,
        data.deposits,
        data.fras,
        data.swaps,
        IborCurveConfig::default(),
    )
    .unwrap_err();
    assert!(matches!(err, CurveError::CurveOrder { .. }));
    assert!(err.to_string().contains("swap maturity"));
}

#[test]
fn test_swap_overlapping_futures_is_rejected() {
    let data = usd_libor();
    let short_swap = IborSwap::from_tenor(
        data.settlement,
        tenor("1Y"),
        LegDirection::Pay,
        0.025,
        Frequency::SemiAnnual,
        DayCountConvention::Thirty360E,
        SwapConfig::default(),
    )
    .unwrap();
    let err = IborCurve::new(
        data.valuation,
        data.deposits,
        data.fras,
        vec![short_swap],
        IborCurveConfig::default(),
    )
    .unwrap_err();
    assert!(err.to_string().contains("first swap maturity"));
}

#[test]
fn test_negative_rate_curve_with_fras() {
    // EUR 6M curve on 2018-11-30 with negative short rates
    let valuation = date(2018, 11, 30);
    let deposits = vec![IborDeposit::from_tenor(
        valuation,
        tenor("6M"),
        -0.002510,
        DayCountConvention::Act360,
    )
    .unwrap()];
    let fra_rates = [-0.002450, -0.002435, -0.002400, -0.002360, -0.002285, -0.002230];
    let fras = fra_rates
        .iter()
        .enumerate()
        .map(|(i, &rate)| {
            let start = valuation.add_months(i as i32 + 1).unwrap();
            IborFra::from_tenor(start, tenor("6M"), rate, DayCountConvention::Act360).unwrap()
        })
        .collect();
    let swaps = [("2Y", -0.001525), ("3Y", -0.000185), ("5Y", 0.002745), ("10Y", 0.008799)]
        .iter()
        .map(|&(t, rate)| {
            IborSwap::from_tenor(
                valuation,
                tenor(t),
                LegDirection::Pay,
                rate,
                Frequency::Annual,
                DayCountConvention::Thirty360Bond,
                SwapConfig::default(),
            )
            .unwrap()
        })
        .collect();

    let curve = IborCurve::new(
        valuation,
        deposits,
        fras,
        swaps,
        IborCurveConfig::default().with_interpolation(InterpolationScheme::LinearZeroRates),
    )
    .unwrap();

    assert!(curve.repricing_report().unwrap().is_valid());
    // negative rates put early discount factors above one
    assert!(curve.values()[1] > 1.0);
}

#[test]
fn test_dual_curve_projection() {
    let data = usd_libor();
    let single = build(&data, IborCurveConfig::default());

    // OIS discounting about 20bp below LIBOR
    let ois_swaps: Vec<IborSwap> = SWAP_QUOTES[..5]
        .iter()
        .map(|&(t, bid, ask)| {
            IborSwap::from_tenor(
                data.valuation,
                tenor(t),
                LegDirection::Pay,
                (bid + ask) / 200.0 - 0.002,
                Frequency::Annual,
                DayCountConvention::Act360,
                SwapConfig::ois(),
            )
            .unwrap()
        })
        .collect();
    let ois = IborCurve::new(data.valuation, vec![], vec![], ois_swaps, IborCurveConfig::default())
        .unwrap();

    let projection = single.with_discount_curve(ois.curve().clone()).unwrap();
    assert!(projection.repricing_report().unwrap().is_valid());

    let swap = &data.swaps[1];
    let pv = swap.value(data.valuation, &projection, Some(ois.curve()), None);
    assert!(pv.abs() / swap.notional() < 1e-5);
}
