//! Finite difference methods for uncertain-volatility option pricing.
//!
//! # Overview
//!
//! * [`FdmGrid`]: uniform asset axis on `[0, 2K]` and stability-bound time steps
//! * [`UncertainVolatilityStepper`]: one explicit backward step with the
//!   Γ-sign volatility switch of the Black-Scholes-Barenblatt equation
//! * [`UncertainVolatilitySolver`]: payoff, repeated steps, boundary
//!   conditions and the growth guard, returning a [`PriceCurve`]

pub mod grid;
pub mod solver;
pub mod stepper;

pub use grid::{node_index, stable_time_step, FdmGrid, STABILITY_FACTOR};
pub use solver::{
    apply_boundaries, PriceCurve, SolverSettings, UncertainVolatilitySolver,
    DEFAULT_CONDITIONING_SCALE, DEFAULT_MAX_GROWTH,
};
pub use stepper::{select_volatility, RegimeCounts, UncertainVolatilityStepper};
