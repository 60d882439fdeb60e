//! # uv-hedging
//!
//! Static hedging of a digital option with two vanilla calls under
//! uncertain volatility: scan integer weight pairs, price each
//! digital-plus-calls basket with the worst-case finite-difference solver,
//! and keep the pair whose basket is closest to zero at the reference spot.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod config;
pub mod search;

pub use config::{ExecutionMode, HedgeSearchConfig, WeightRange, DEFAULT_MAX_CANDIDATES};
pub use search::{CandidateValuation, HedgeCandidate, SearchResult, StaticHedgeSearch};
