//! One backward time step of the Black-Scholes-Barenblatt equation.
//!
//! The worst-case value `V` of a position under volatility uncertainty
//! `σ ∈ [σ_L, σ_H]` solves
//!
//! `∂V/∂t + ½σ(Γ)²S²·Γ + rS·Δ − rV = 0`
//!
//! where `σ(Γ)` is chosen node by node from the sign of the position's
//! local convexity. The explicit update is `V_next = V_prev − Θ·dt` with
//! `Θ = rV − ½σ²S²Γ − rSΔ` evaluated from centred differences.

use super::grid::FdmGrid;
use uv_core::{Position, Rate, Real, Time, Volatility};
use uv_instruments::ContractSpec;

/// The volatility the adversary picks at a node.
///
/// `position·Γ >= 0` gives `vol_low`, otherwise `vol_high`: a long holder of
/// convexity is valued at the low bound, a short one at the high bound.
#[inline]
pub fn select_volatility(
    gamma: Real,
    position: Position,
    vol_low: Volatility,
    vol_high: Volatility,
) -> Volatility {
    if position.sign() * gamma >= 0.0 {
        vol_low
    } else {
        vol_high
    }
}

/// How many interior nodes used each bound during one step.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RegimeCounts {
    /// Nodes priced at the lower bound.
    pub low: usize,
    /// Nodes priced at the upper bound.
    pub high: usize,
}

/// Interior-node update for a fixed grid and contract.
#[derive(Debug, Clone, Copy)]
pub struct UncertainVolatilityStepper<'a> {
    asset_prices: &'a [Real],
    ds: Real,
    dt: Time,
    rate: Rate,
    vol_low: Volatility,
    vol_high: Volatility,
    position: Position,
}

impl<'a> UncertainVolatilityStepper<'a> {
    /// Stepper over `grid` with the band, rate, and side of `spec`.
    pub fn new(grid: &'a FdmGrid, spec: &ContractSpec) -> Self {
        Self {
            asset_prices: grid.asset_prices(),
            ds: grid.ds(),
            dt: grid.dt(),
            rate: spec.rate(),
            vol_low: spec.vol_low(),
            vol_high: spec.vol_high(),
            position: spec.position(),
        }
    }

    /// Time step used by [`step`](Self::step).
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Write `next[j]` for every interior node `1 <= j <= N-2` from
    /// `previous`. Boundary entries of `next` are left untouched.
    ///
    /// # Panics
    /// If the buffers do not both match the grid size.
    pub fn step(&self, previous: &[Real], next: &mut [Real]) -> RegimeCounts {
        let n = self.asset_prices.len();
        assert_eq!(previous.len(), n, "previous buffer does not match the grid");
        assert_eq!(next.len(), n, "next buffer does not match the grid");

        let ds2 = self.ds * self.ds;
        let mut counts = RegimeCounts::default();

        for j in 1..n - 1 {
            let (down, here, up) = (previous[j - 1], previous[j], previous[j + 1]);
            let delta = (up - down) / (2.0 * self.ds);
            let gamma = (up - 2.0 * here + down) / ds2;

            let vol = select_volatility(gamma, self.position, self.vol_low, self.vol_high);
            if vol == self.vol_low {
                counts.low += 1;
            } else {
                counts.high += 1;
            }

            let s = self.asset_prices[j];
            let theta = self.rate * here - 0.5 * (vol * s).powi(2) * gamma - self.rate * s * delta;
            next[j] = here - theta * self.dt;
        }
        counts
    }
}
