//! Position type: the side of the trade being valued.

use crate::errors::{Error, Result};
use std::fmt;
use std::str::FromStr;

/// Long or short position.
///
/// Under uncertain volatility the side decides which volatility bound is
/// the worst case at each node, so it is an input of every solve.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Position {
    /// Long position (buyer).
    #[default]
    Long,
    /// Short position (seller).
    Short,
}

impl Position {
    /// Return the sign (+1 for Long, -1 for Short).
    pub fn sign(&self) -> f64 {
        match self {
            Position::Long => 1.0,
            Position::Short => -1.0,
        }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Position::Long => write!(f, "Long"),
            Position::Short => write!(f, "Short"),
        }
    }
}

impl FromStr for Position {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "long" | "+1" | "1" => Ok(Position::Long),
            "short" | "-1" => Ok(Position::Short),
            other => Err(Error::Configuration(format!(
                "unrecognized position '{other}'"
            ))),
        }
    }
}
