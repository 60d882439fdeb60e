//! Price command implementation.
//!
//! Solves the worst-case PDE for a single contract and reports the value at
//! a spot, optionally with the whole curve.

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use uv_core::Position;
use uv_instruments::{ContractKind, ContractSpec};
use uv_methods::UncertainVolatilitySolver;

use crate::cli::OutputFormat;
use crate::commands::print_json;

/// Arguments for the price command.
#[derive(Args, Debug)]
pub struct PriceArgs {
    /// Contract kind: call, put or binary
    #[arg(short, long, default_value = "call")]
    pub kind: String,

    /// Strike; twice the strike is the top of the asset axis
    #[arg(short = 'K', long, default_value = "100")]
    pub strike: f64,

    /// Lower volatility bound
    #[arg(long, default_value = "0.2")]
    pub vol_low: f64,

    /// Upper volatility bound
    #[arg(long, default_value = "0.3")]
    pub vol_high: f64,

    /// Risk-free rate
    #[arg(short, long, default_value = "0.05")]
    pub rate: f64,

    /// Time to expiry in years
    #[arg(short = 'T', long, default_value = "0.5")]
    pub expiration: f64,

    /// Number of asset steps (NAS)
    #[arg(short = 'n', long, default_value = "100")]
    pub asset_steps: usize,

    /// Side of the trade: long or short
    #[arg(short, long, default_value = "long")]
    pub position: Position,

    /// Spot at which to report the value; defaults to the strike
    #[arg(short, long)]
    pub spot: Option<f64>,

    /// Interpolate when the spot is not a grid node
    #[arg(long)]
    pub interpolate: bool,

    /// Print the full (S, payoff, V) curve
    #[arg(long)]
    pub curve: bool,
}

#[derive(Serialize)]
struct CurveRow {
    spot: f64,
    payoff: f64,
    value: f64,
}

#[derive(Serialize)]
struct PriceOutput {
    contract: String,
    position: Position,
    vol_low: f64,
    vol_high: f64,
    spot: f64,
    value: f64,
    asset_steps: usize,
    time_steps: usize,
    ds: f64,
    dt: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    curve: Option<Vec<CurveRow>>,
}

/// Execute the price command.
pub fn execute(args: PriceArgs, format: OutputFormat) -> Result<()> {
    let kind = ContractKind::from_name(&args.kind, args.strike)?;
    let spec = ContractSpec::builder(kind)
        .volatility_bounds(args.vol_low, args.vol_high)
        .rate(args.rate)
        .expiration(args.expiration)
        .asset_steps(args.asset_steps)
        .position(args.position)
        .build()
        .context("invalid contract")?;

    let spot = args.spot.unwrap_or(args.strike);
    let curve = UncertainVolatilitySolver::default().solve(&spec)?;
    let value = if args.interpolate {
        curve.interpolate(spot)?
    } else {
        curve
            .value_at(spot)
            .with_context(|| format!("spot {spot} is off the grid; pass --interpolate"))?
    };

    let output = PriceOutput {
        contract: spec.kind().payoff().description(),
        position: spec.position(),
        vol_low: spec.vol_low(),
        vol_high: spec.vol_high(),
        spot,
        value,
        asset_steps: spec.asset_steps(),
        time_steps: curve.time_steps(),
        ds: curve.ds(),
        dt: curve.dt(),
        curve: args.curve.then(|| {
            curve
                .rows()
                .map(|(spot, payoff, value)| CurveRow { spot, payoff, value })
                .collect()
        }),
    };

    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Table => print_table(&output),
    }
    Ok(())
}

fn print_table(output: &PriceOutput) {
    println!("{} ({})", output.contract, output.position);
    println!(
        "  volatility band  [{:.4}, {:.4}]",
        output.vol_low, output.vol_high
    );
    println!(
        "  grid             NAS = {}, NTS = {}, ds = {:.6}, dt = {:.6e}",
        output.asset_steps, output.time_steps, output.ds, output.dt
    );
    println!("  value at S = {:<8} {:.6}", output.spot, output.value);

    if let Some(rows) = &output.curve {
        println!();
        println!("{:>12} {:>14} {:>14}", "S", "payoff", "V");
        for row in rows {
            println!("{:>12.4} {:>14.6} {:>14.6}", row.spot, row.payoff, row.value);
        }
    }
}
