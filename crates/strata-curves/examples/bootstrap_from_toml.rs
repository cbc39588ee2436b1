//! Bootstraps the curves described by a TOML market file.
//!
//! Run with: cargo run -p strata-curves --example bootstrap_from_toml [path]
//!
//! Without a path the bundled `data/market.toml` is used. Set `RUST_LOG=debug`
//! to trace every solved node.

use anyhow::{Context, Result};
use strata_curves::config::MarketSpec;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

fn main() -> Result<()> {
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    let path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| concat!(env!("CARGO_MANIFEST_DIR"), "/data/market.toml").into());
    let content =
        std::fs::read_to_string(&path).with_context(|| format!("failed to read {path}"))?;

    let spec = MarketSpec::from_toml_str(&content)?;
    let curves = spec.build()?;

    let rates = &curves.rates;
    println!("{}", rates.repricing_report()?);
    println!();
    println!("{:>10}  {:>14}", "time", "discount");
    for (t, df) in rates.times().iter().zip(rates.values()) {
        println!("{t:>10.6}  {df:>14.10}");
    }

    if let Some(credit) = &curves.credit {
        println!();
        println!("{}", credit.repricing_report());
        println!();
        println!("{:>12}  {:>10}  {:>14}", "maturity", "spread", "survival");
        for cds in credit.contracts() {
            println!(
                "{:>12}  {:>10.6}  {:>14.10}",
                cds.maturity().to_string(),
                cds.coupon(),
                credit.survival_probability(cds.maturity())
            );
        }
    }

    Ok(())
}
