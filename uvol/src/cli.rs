//! CLI argument definitions.

use clap::{Parser, Subcommand, ValueEnum};

use crate::commands::{HedgeArgs, PriceArgs};

/// uvol - uncertain-volatility pricing and static hedging
#[derive(Parser)]
#[command(name = "uvol")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, default_value = "table", global = true)]
    pub format: OutputFormat,

    /// Log solver progress at debug level
    #[arg(short, long, global = true, conflicts_with = "quiet")]
    pub verbose: bool,

    /// Only log warnings and errors
    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available commands
#[derive(Subcommand)]
pub enum Commands {
    /// Worst-case price of a call, put or binary under a volatility band
    Price(PriceArgs),

    /// Search static hedges of a binary with two vanilla calls
    Hedge(HedgeArgs),
}

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table format
    #[default]
    Table,
    /// JSON format
    Json,
}
