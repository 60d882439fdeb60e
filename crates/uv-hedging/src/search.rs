//! Brute-force static-hedge search.
//!
//! Every weight pair `(i, j)` of the scan is an independent solve of the
//! digital-plus-calls basket. The per-candidate valuations are reduced with
//! a total order (`|value|` then scan position for the best hedge,
//! `residual` descending then scan position for the maximum residual), so
//! serial and parallel evaluation return identical results and ties always
//! go to the candidate scanned first (`i` outer, `j` inner).

use crate::config::{ExecutionMode, HedgeSearchConfig};
use rayon::prelude::*;
use serde::Serialize;
use std::cmp::Ordering;
use uv_core::{fail, Price, Real, Result, Size};
use uv_instruments::ContractSpec;
use uv_methods::{SolverSettings, UncertainVolatilitySolver};
use uv_pricingengines::black_scholes_call;

/// One weight pair of the scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct HedgeCandidate {
    /// Numerator of the low-strike call weight.
    pub i: i32,
    /// Numerator of the high-strike call weight.
    pub j: i32,
    /// `i / weight_scale`.
    pub low_weight: Real,
    /// `j / weight_scale`.
    pub high_weight: Real,
    /// Position in scan order.
    #[serde(skip)]
    order: Size,
}

/// A candidate with its worst-case basket value at the reference spot.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CandidateValuation {
    /// The weights.
    pub candidate: HedgeCandidate,
    /// Basket value at the reference spot.
    pub value: Price,
    /// `value − w₁·C(K_low) − w₂·C(K_high)` with closed-form call prices:
    /// the digital's price net of the vanilla legs.
    pub residual: Price,
}

impl CandidateValuation {
    fn better_hedge(self, other: Self) -> Self {
        let key = |v: &Self| (v.value.abs(), v.candidate.order);
        match key(&self).partial_cmp(&key(&other)) {
            Some(Ordering::Greater) => other,
            _ => self,
        }
    }

    fn larger_residual(self, other: Self) -> Self {
        match other.residual.partial_cmp(&self.residual) {
            Some(Ordering::Greater) => other,
            Some(Ordering::Equal) if other.candidate.order < self.candidate.order => other,
            _ => self,
        }
    }
}

/// Outcome of a scan.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct SearchResult {
    /// Candidate with the smallest `|value|`.
    pub best: CandidateValuation,
    /// Candidate with the largest residual.
    pub max_residual: CandidateValuation,
    /// Number of candidates evaluated.
    pub evaluated: Size,
}

impl SearchResult {
    fn single(v: CandidateValuation) -> Self {
        Self {
            best: v,
            max_residual: v,
            evaluated: 1,
        }
    }

    fn merge(self, other: Self) -> Self {
        Self {
            best: self.best.better_hedge(other.best),
            max_residual: self.max_residual.larger_residual(other.max_residual),
            evaluated: self.evaluated + other.evaluated,
        }
    }

    /// Best weights as `(i, j)` numerators.
    pub fn best_weights(&self) -> (i32, i32) {
        (self.best.candidate.i, self.best.candidate.j)
    }

    /// Price of the digital implied by the best static hedge.
    pub fn hedged_binary_value(&self) -> Price {
        self.best.residual
    }
}

/// Static-hedge search over a validated configuration.
#[derive(Debug, Clone)]
pub struct StaticHedgeSearch {
    config: HedgeSearchConfig,
    base: ContractSpec,
    solver: UncertainVolatilitySolver,
    low_leg_price: Price,
    high_leg_price: Price,
}

impl StaticHedgeSearch {
    /// Validate `config` and price the vanilla legs.
    ///
    /// # Errors
    /// Any configuration error reported by [`HedgeSearchConfig::validate`].
    pub fn new(config: HedgeSearchConfig) -> Result<Self> {
        Self::with_settings(config, SolverSettings::default())
    }

    /// Like [`new`](Self::new) with explicit solver settings.
    pub fn with_settings(config: HedgeSearchConfig, settings: SolverSettings) -> Result<Self> {
        config.validate()?;
        let base = config.base_contract()?;
        let vol = config.effective_reference_vol();
        let low_leg_price =
            black_scholes_call(config.spot, config.low_strike, config.expiration, config.rate, vol);
        let high_leg_price = black_scholes_call(
            config.spot,
            config.high_strike,
            config.expiration,
            config.rate,
            vol,
        );
        Ok(Self {
            config,
            base,
            solver: UncertainVolatilitySolver::new(settings),
            low_leg_price,
            high_leg_price,
        })
    }

    /// The validated configuration.
    pub fn config(&self) -> &HedgeSearchConfig {
        &self.config
    }

    /// Closed-form prices of the low- and high-strike calls at the spot.
    pub fn leg_prices(&self) -> (Price, Price) {
        (self.low_leg_price, self.high_leg_price)
    }

    /// All weight pairs in scan order.
    pub fn candidates(&self) -> Vec<HedgeCandidate> {
        let scale = self.config.weight_scale;
        self.config
            .low_weights
            .iter()
            .flat_map(|i| self.config.high_weights.iter().map(move |j| (i, j)))
            .enumerate()
            .map(|(order, (i, j))| HedgeCandidate {
                i,
                j,
                low_weight: i as Real / scale,
                high_weight: j as Real / scale,
                order,
            })
            .collect()
    }

    /// Solve the basket of one candidate and value it at the spot.
    pub fn evaluate(&self, candidate: HedgeCandidate) -> Result<CandidateValuation> {
        let spec = self
            .base
            .with_kind(self.config.basket(candidate.low_weight, candidate.high_weight))?;
        let value = self.solver.solve(&spec)?.value_at(self.config.spot)?;
        let residual = value
            - candidate.low_weight * self.low_leg_price
            - candidate.high_weight * self.high_leg_price;
        tracing::trace!(i = candidate.i, j = candidate.j, value, residual, "hedge candidate");
        Ok(CandidateValuation {
            candidate,
            value,
            residual,
        })
    }

    /// Run the scan in the configured execution mode.
    pub fn run(&self) -> Result<SearchResult> {
        self.run_with(self.config.execution)
    }

    /// Run the scan in the given execution mode.
    ///
    /// # Errors
    /// The first solver error met (numerical instability or lookup).
    pub fn run_with(&self, mode: ExecutionMode) -> Result<SearchResult> {
        let candidates = self.candidates();
        tracing::info!(
            candidates = candidates.len(),
            ?mode,
            low_leg = self.low_leg_price,
            high_leg = self.high_leg_price,
            "starting static-hedge search"
        );

        let reduced = match mode {
            ExecutionMode::Serial => candidates
                .into_iter()
                .map(|c| self.evaluate(c).map(SearchResult::single))
                .try_fold(None, |acc: Option<SearchResult>, next| {
                    next.map(|n| Some(acc.map_or(n, |a| a.merge(n))))
                })?,
            ExecutionMode::Parallel => candidates
                .into_par_iter()
                .map(|c| self.evaluate(c).map(SearchResult::single))
                .try_reduce_with(|a, b| Ok(a.merge(b)))
                .transpose()?,
        };

        // validate() guarantees a non-empty scan
        let Some(result) = reduced else {
            fail!("static-hedge scan produced no candidates");
        };

        tracing::info!(
            best_i = result.best.candidate.i,
            best_j = result.best.candidate.j,
            best_value = result.best.value,
            hedged_binary = result.hedged_binary_value(),
            max_residual = result.max_residual.residual,
            "static-hedge search finished"
        );
        Ok(result)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::WeightRange;

    fn small_config() -> HedgeSearchConfig {
        HedgeSearchConfig {
            low_weights: WeightRange::new(-3, 0),
            high_weights: WeightRange::new(1, 3),
            asset_steps: 55,
            ..HedgeSearchConfig::default()
        }
    }

    #[test]
    fn candidates_follow_scan_order() {
        let search = StaticHedgeSearch::new(small_config()).unwrap();
        let pairs: Vec<(i32, i32)> = search.candidates().iter().map(|c| (c.i, c.j)).collect();
        assert_eq!(pairs, vec![(-3, 1), (-3, 2), (-2, 1), (-2, 2), (-1, 1), (-1, 2)]);
        let c = search.candidates()[0];
        assert_eq!(c.low_weight, -0.03);
        assert_eq!(c.high_weight, 0.01);
    }

    #[test]
    fn ties_keep_the_earliest_candidate() {
        let mk = |order: Size, value: Real, residual: Real| CandidateValuation {
            candidate: HedgeCandidate {
                i: order as i32,
                j: 0,
                low_weight: 0.0,
                high_weight: 0.0,
                order,
            },
            value,
            residual,
        };
        let early = SearchResult::single(mk(0, 0.5, 1.0));
        let late = SearchResult::single(mk(5, -0.5, 1.0));
        assert_eq!(early.merge(late).best.candidate.order, 0);
        assert_eq!(late.merge(early).best.candidate.order, 0);
        assert_eq!(late.merge(early).max_residual.candidate.order, 0);

        let better = SearchResult::single(mk(9, 0.1, 2.0));
        let merged = early.merge(better);
        assert_eq!(merged.best.candidate.order, 9);
        assert_eq!(merged.max_residual.candidate.order, 9);
        assert_eq!(merged.evaluated, 2);
    }

    #[test]
    fn residual_subtracts_vanilla_legs() {
        let search = StaticHedgeSearch::new(small_config()).unwrap();
        let c = search.candidates()[3];
        let v = search.evaluate(c).unwrap();
        let (lo, hi) = search.leg_prices();
        let expected = v.value - c.low_weight * lo - c.high_weight * hi;
        assert!((v.residual - expected).abs() < 1e-15);
    }
}
