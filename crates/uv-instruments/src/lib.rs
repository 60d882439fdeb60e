//! # uv-instruments
//!
//! Terminal payoffs (vanilla, digital, digital-plus-calls basket) and the
//! validated [`ContractSpec`] consumed by the finite-difference pricer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod contract;
pub mod payoff;

pub use contract::{ContractKind, ContractSpec, ContractSpecBuilder, MIN_ASSET_STEPS};
pub use payoff::{BasketPayoff, CashOrNothingPayoff, OptionType, Payoff, PlainVanillaPayoff};
