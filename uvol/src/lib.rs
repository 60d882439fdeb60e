//! # uvol
//!
//! Worst-case pricing of options under uncertain volatility and static
//! hedging of digital options.
//!
//! This crate is a **façade** that re-exports all public items from the
//! underlying workspace crates. Application code should depend on this
//! crate rather than the individual `uv-*` crates.
//!
//! ## Quick start
//!
//! ```rust
//! use uvol::core::Position;
//! use uvol::instruments::{ContractKind, ContractSpec};
//! use uvol::methods::UncertainVolatilitySolver;
//!
//! let spec = ContractSpec::builder(ContractKind::binary(100.0))
//!     .volatility_bounds(0.2, 0.3)
//!     .asset_steps(40)
//!     .position(Position::Short)
//!     .build()?;
//! let price = UncertainVolatilitySolver::default().price_at(&spec, 100.0)?;
//! assert!(price > 0.0 && price < 1.0);
//! # Ok::<(), uvol::core::Error>(())
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use uv_core as core;

/// Normal distribution, comparisons, interpolation.
pub use uv_math as math;

/// Payoffs and contract specifications.
pub use uv_instruments as instruments;

/// Finite-difference solver for the uncertain-volatility PDE.
pub use uv_methods as methods;

/// Closed-form reference prices.
pub use uv_pricingengines as pricingengines;

/// Static-hedge search.
pub use uv_hedging as hedging;
