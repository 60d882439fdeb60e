//! # uv-pricingengines
//!
//! Closed-form Black-Scholes engines used as reference prices: vanilla
//! calls and puts, and cash-or-nothing digitals.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod analytic_european_engine;

pub use analytic_european_engine::{black_scholes_call, black_scholes_merton, cash_or_nothing_price};
