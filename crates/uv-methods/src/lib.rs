//! # uv-methods
//!
//! Numerical methods: the explicit finite-difference solver for the
//! Black-Scholes-Barenblatt equation, which prices a payoff under the
//! worst-case volatility path inside a band `[σ_L, σ_H]`.
//!
//! # Modules
//!
//! * [`finite_differences`]: grid, nonlinear stepper and full solver

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Finite difference methods: grid, stepper, solver.
pub mod finite_differences;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use finite_differences::{
    select_volatility, FdmGrid, PriceCurve, SolverSettings, UncertainVolatilitySolver,
    UncertainVolatilityStepper,
};
