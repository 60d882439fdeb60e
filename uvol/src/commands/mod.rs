//! Command implementations.

pub mod hedge;
pub mod price;

pub use hedge::HedgeArgs;
pub use price::PriceArgs;

use anyhow::Result;
use serde::Serialize;

/// Print `value` as pretty JSON on stdout.
pub fn print_json<T: Serialize>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}
