//! # uv-math
//!
//! Mathematical utilities: the standard normal distribution (via statrs),
//! grid-node alignment, and linear interpolation on uniform axes.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Grid-node alignment of floating-point prices.
pub mod comparison;

/// Probability distributions.
pub mod distributions;

/// 1D interpolation on uniform axes.
pub mod interpolation;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use comparison::aligned_multiple;
pub use distributions::normal_cdf;
pub use interpolation::{Interpolation1D, UniformLinearInterpolation};
