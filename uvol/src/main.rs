//! uvol - worst-case option pricing under uncertain volatility.
//!
//! # Usage
//!
//! ```bash
//! # Short binary struck at 100, volatility between 20% and 30%
//! uvol price --kind binary --strike 100 --position short --spot 100
//!
//! # Full value curve as JSON
//! uvol --format json price --kind call --strike 100 --vol-low 0.25 --vol-high 0.25 --curve
//!
//! # Static-hedge search from a TOML file, evaluated in parallel
//! uvol hedge --config hedge.toml --parallel
//! ```

use anyhow::Result;
use clap::Parser;
use tracing_subscriber::EnvFilter;

mod cli;
mod commands;

use cli::{Cli, Commands};

fn main() -> Result<()> {
    let cli = Cli::parse();

    // RUST_LOG wins over the verbosity flags
    let default_filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "warn"
    } else {
        "info"
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();

    let format = cli.format;
    match cli.command {
        Commands::Price(args) => commands::price::execute(args, format)?,
        Commands::Hedge(args) => commands::hedge::execute(args, format)?,
    }

    Ok(())
}
