//! Hedge command implementation.
//!
//! Loads a [`HedgeSearchConfig`] (TOML file, defaults otherwise), applies
//! command-line overrides and runs the static-hedge scan.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use uv_core::Position;
use uv_hedging::{ExecutionMode, HedgeSearchConfig, SearchResult, StaticHedgeSearch};

use crate::cli::OutputFormat;
use crate::commands::print_json;

/// Arguments for the hedge command.
#[derive(Args, Debug)]
pub struct HedgeArgs {
    /// TOML file with search parameters; missing keys take the defaults
    #[arg(short, long, env = "UVOL_HEDGE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Evaluate candidates on all cores
    #[arg(long)]
    pub parallel: bool,

    /// Override the number of asset steps
    #[arg(short = 'n', long)]
    pub asset_steps: Option<usize>,

    /// Override the side used for regime selection
    #[arg(short, long)]
    pub position: Option<Position>,

    /// Override the reference spot
    #[arg(short, long)]
    pub spot: Option<f64>,

    /// Print the effective configuration and exit
    #[arg(long)]
    pub show_config: bool,
}

#[derive(Serialize)]
struct HedgeOutput<'a> {
    config: &'a HedgeSearchConfig,
    low_leg_price: f64,
    high_leg_price: f64,
    result: SearchResult,
}

/// Read a configuration file.
pub fn load_config(path: &Path) -> Result<HedgeSearchConfig> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("cannot read {}", path.display()))?;
    let config = toml::from_str(&text)
        .with_context(|| format!("invalid hedge configuration in {}", path.display()))?;
    tracing::debug!(path = %path.display(), "loaded hedge configuration");
    Ok(config)
}

/// Execute the hedge command.
pub fn execute(args: HedgeArgs, format: OutputFormat) -> Result<()> {
    let mut config = match &args.config {
        Some(path) => load_config(path)?,
        None => HedgeSearchConfig::default(),
    };
    if let Some(nas) = args.asset_steps {
        config.asset_steps = nas;
    }
    if let Some(position) = args.position {
        config.position = position;
    }
    if let Some(spot) = args.spot {
        config.spot = spot;
    }
    if args.parallel {
        config.execution = ExecutionMode::Parallel;
    }

    if args.show_config {
        println!("{}", toml::to_string_pretty(&config)?);
        return Ok(());
    }

    let search = StaticHedgeSearch::new(config).context("invalid hedge configuration")?;
    let result = search.run()?;
    let (low_leg_price, high_leg_price) = search.leg_prices();

    let output = HedgeOutput {
        config: search.config(),
        low_leg_price,
        high_leg_price,
        result,
    };
    match format {
        OutputFormat::Json => print_json(&output)?,
        OutputFormat::Table => print_table(&output),
    }
    Ok(())
}

fn print_table(output: &HedgeOutput<'_>) {
    let c = output.config;
    let r = &output.result;
    println!(
        "binary @ {} hedged with calls @ {} and @ {} ({} candidates, {})",
        c.binary_strike, c.low_strike, c.high_strike, r.evaluated, c.position
    );
    println!(
        "  call legs at S = {}: {:.6} / {:.6} (vol {:.4})",
        c.spot,
        output.low_leg_price,
        output.high_leg_price,
        c.effective_reference_vol()
    );
    println!(
        "  best hedge     i = {:>4}, j = {:>4}  value = {:>10.6}  residual = {:.6}",
        r.best.candidate.i, r.best.candidate.j, r.best.value, r.best.residual
    );
    println!(
        "  max residual   i = {:>4}, j = {:>4}  value = {:>10.6}  residual = {:.6}",
        r.max_residual.candidate.i,
        r.max_residual.candidate.j,
        r.max_residual.value,
        r.max_residual.residual
    );
    println!("  hedged binary value: {:.6}", r.hedged_binary_value());
}
