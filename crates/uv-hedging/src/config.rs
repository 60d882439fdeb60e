//! Parameters of the static-hedge search.
//!
//! [`HedgeSearchConfig`] is plain data: it deserializes from TOML/JSON with
//! every field optional (missing fields take the defaults below) and is
//! validated once, when a [`StaticHedgeSearch`](crate::StaticHedgeSearch) is
//! built from it.

use serde::{Deserialize, Serialize};
use std::ops::Range;
use uv_core::{ensure, Position, Rate, Real, Result, Size, Time, Volatility};
use uv_instruments::{BasketPayoff, ContractKind, ContractSpec};
use uv_methods::FdmGrid;

/// Default bound on the number of candidates in one scan.
pub const DEFAULT_MAX_CANDIDATES: Size = 10_000;

/// Half-open range `start..end` of integer weight numerators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct WeightRange {
    /// First numerator.
    pub start: i32,
    /// One past the last numerator.
    pub end: i32,
}

impl WeightRange {
    /// `start..end`.
    pub fn new(start: i32, end: i32) -> Self {
        Self { start, end }
    }

    /// The numerators in scan order.
    pub fn iter(&self) -> Range<i32> {
        self.start..self.end
    }

    /// Number of numerators.
    pub fn len(&self) -> Size {
        if self.end > self.start {
            self.end.abs_diff(self.start) as Size
        } else {
            0
        }
    }

    /// `true` when the range holds no numerator.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl From<Range<i32>> for WeightRange {
    fn from(r: Range<i32>) -> Self {
        Self::new(r.start, r.end)
    }
}

/// How candidates are evaluated.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExecutionMode {
    /// One candidate after the other on the calling thread.
    #[default]
    Serial,
    /// Candidates spread over the rayon thread pool.
    Parallel,
}

/// Inputs of the static-hedge search.
///
/// The hedged contract is a unit digital at `binary_strike` plus
/// `i / weight_scale` calls at `low_strike` and `j / weight_scale` calls at
/// `high_strike`, for every `i` in `low_weights` and `j` in `high_weights`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HedgeSearchConfig {
    /// Lower volatility bound.
    pub vol_low: Volatility,
    /// Upper volatility bound.
    pub vol_high: Volatility,
    /// Risk-free rate.
    pub rate: Rate,
    /// Strike of the digital leg.
    pub binary_strike: Real,
    /// Strike of the first call leg.
    pub low_strike: Real,
    /// Strike of the second call leg; twice it is the top of the axis.
    pub high_strike: Real,
    /// Time to expiry in years.
    pub expiration: Time,
    /// Grid resolution (`NAS`).
    pub asset_steps: Size,
    /// Reference spot where the basket is valued; must be a grid node.
    pub spot: Real,
    /// Side used for the worst-case regime selection.
    pub position: Position,
    /// Numerators of the low-strike call weight.
    pub low_weights: WeightRange,
    /// Numerators of the high-strike call weight.
    pub high_weights: WeightRange,
    /// Denominator turning numerators into weights.
    pub weight_scale: Real,
    /// Volatility for the closed-form vanilla leg prices; the midpoint of
    /// the band when absent.
    pub reference_vol: Option<Volatility>,
    /// Largest accepted scan.
    pub max_candidates: Size,
    /// Serial or parallel evaluation.
    pub execution: ExecutionMode,
}

impl Default for HedgeSearchConfig {
    fn default() -> Self {
        Self {
            vol_low: 0.2,
            vol_high: 0.3,
            rate: 0.05,
            binary_strike: 100.0,
            low_strike: 90.0,
            high_strike: 110.0,
            expiration: 0.5,
            // ds = 2·110/110 = 2 puts the spot of 100 on node 50
            asset_steps: 110,
            spot: 100.0,
            position: Position::Long,
            low_weights: WeightRange::new(-10, 0),
            high_weights: WeightRange::new(1, 10),
            weight_scale: 100.0,
            reference_vol: None,
            max_candidates: DEFAULT_MAX_CANDIDATES,
            execution: ExecutionMode::Serial,
        }
    }
}

impl HedgeSearchConfig {
    /// Number of `(i, j)` pairs in the scan; `Size::MAX` when the product
    /// does not fit.
    pub fn candidate_count(&self) -> Size {
        self.low_weights
            .len()
            .checked_mul(self.high_weights.len())
            .unwrap_or(Size::MAX)
    }

    /// Volatility used for the vanilla leg prices.
    pub fn effective_reference_vol(&self) -> Volatility {
        self.reference_vol
            .unwrap_or(0.5 * (self.vol_low + self.vol_high))
    }

    /// The basket for weights `(low_weight, high_weight)`.
    pub fn basket(&self, low_weight: Real, high_weight: Real) -> ContractKind {
        ContractKind::Basket(BasketPayoff::new(
            self.binary_strike,
            self.low_strike,
            self.high_strike,
            low_weight,
            high_weight,
        ))
    }

    /// Contract with zero call weights; candidates swap in their basket.
    pub fn base_contract(&self) -> Result<ContractSpec> {
        ContractSpec::builder(self.basket(0.0, 0.0))
            .volatility_bounds(self.vol_low, self.vol_high)
            .rate(self.rate)
            .expiration(self.expiration)
            .asset_steps(self.asset_steps)
            .position(self.position)
            .build()
    }

    /// Check every field before any solve runs.
    ///
    /// # Errors
    /// Configuration error for invalid contract data, an empty or oversized
    /// scan, a non-positive scale or reference volatility, or a spot that
    /// is not a node of the asset axis.
    pub fn validate(&self) -> Result<()> {
        let base = self.base_contract()?;
        ensure!(
            !self.low_weights.is_empty() && !self.high_weights.is_empty(),
            "weight ranges must not be empty: {:?} × {:?}",
            self.low_weights,
            self.high_weights
        );
        ensure!(
            self.candidate_count() <= self.max_candidates,
            "scan of {} candidates exceeds the limit of {}",
            self.candidate_count(),
            self.max_candidates
        );
        ensure!(
            self.weight_scale > 0.0 && self.weight_scale.is_finite(),
            "weight scale must be positive, got {}",
            self.weight_scale
        );
        let vol = self.effective_reference_vol();
        ensure!(
            vol > 0.0 && vol.is_finite(),
            "reference volatility must be positive, got {vol}"
        );
        ensure!(
            self.spot > 0.0,
            "reference spot must be positive, got {}",
            self.spot
        );
        let grid = FdmGrid::for_contract(&base)?;
        ensure!(
            grid.index_of(self.spot).is_ok(),
            "reference spot {} is not a grid node (ds = {}); choose asset steps so that \
             2·{}/NAS divides it",
            self.spot,
            grid.ds(),
            base.kind().reference_strike()
        );
        Ok(())
    }
}
