//! Asset/time discretisation for the explicit scheme.

use uv_core::{ensure, Error, Real, Result, Size, Time, Volatility};
use uv_instruments::{ContractSpec, MIN_ASSET_STEPS};
use uv_math::aligned_multiple;

/// Fraction of the explicit-scheme stability limit used for the time step.
pub const STABILITY_FACTOR: Real = 0.9;

/// Largest stable time step for `asset_steps` nodes under `vol_high`.
///
/// The diffusion number at the top of the axis is `σ²·NAS²·dt`; the
/// highest volatility has the largest diffusion coefficient, so it binds.
#[inline]
pub fn stable_time_step(vol_high: Volatility, asset_steps: Size) -> Time {
    let nas = asset_steps as Real;
    STABILITY_FACTOR / (vol_high * vol_high * nas * nas)
}

/// Uniform asset axis `S_j = j·ds`, `j = 0..=NAS`, spanning `[0, 2·K_ref]`,
/// and the time steps covering the expiry exactly.
#[derive(Debug, Clone, PartialEq)]
pub struct FdmGrid {
    asset_prices: Vec<Real>,
    ds: Real,
    dt: Time,
    time_steps: Size,
    stable_dt: Time,
    expiration: Time,
}

impl FdmGrid {
    /// Build the grid for `reference_strike` and the stability bound of
    /// `vol_high`.
    ///
    /// `NTS = floor(T / dt_trial) + 1` and `dt = T / NTS`, so `NTS·dt = T`
    /// and `dt` never exceeds the trial step.
    ///
    /// # Errors
    /// Configuration error for `asset_steps <= 3` or non-positive inputs.
    pub fn new(
        vol_high: Volatility,
        asset_steps: Size,
        reference_strike: Real,
        expiration: Time,
    ) -> Result<Self> {
        ensure!(
            asset_steps >= MIN_ASSET_STEPS,
            "asset steps must be greater than 3, got {asset_steps}"
        );
        ensure!(vol_high > 0.0, "upper volatility must be positive, got {vol_high}");
        ensure!(
            reference_strike > 0.0,
            "reference strike must be positive, got {reference_strike}"
        );
        ensure!(expiration > 0.0, "expiration must be positive, got {expiration}");

        let ds = 2.0 * reference_strike / asset_steps as Real;
        let stable_dt = stable_time_step(vol_high, asset_steps);
        let trial_steps = (expiration / stable_dt).floor();
        let time_steps = (trial_steps.is_finite() && trial_steps < Size::MAX as Real)
            .then(|| (trial_steps as Size).checked_add(1))
            .flatten()
            .ok_or_else(|| {
                Error::Configuration(format!(
                    "time-step count overflows for upper volatility {vol_high} and {asset_steps} \
                     asset steps"
                ))
            })?;
        let dt = expiration / time_steps as Real;
        let asset_prices = (0..=asset_steps).map(|j| j as Real * ds).collect();

        Ok(Self {
            asset_prices,
            ds,
            dt,
            time_steps,
            stable_dt,
            expiration,
        })
    }

    /// Grid for a validated contract.
    pub fn for_contract(spec: &ContractSpec) -> Result<Self> {
        Self::new(
            spec.vol_high(),
            spec.asset_steps(),
            spec.kind().reference_strike(),
            spec.expiration(),
        )
    }

    /// Replace the derived step count.
    ///
    /// A count below the stable one gives `dt` above the stability limit;
    /// that is allowed but logged, and the solver's growth guard aborts the
    /// run if it diverges.
    pub fn with_time_steps(mut self, time_steps: Size) -> Result<Self> {
        ensure!(time_steps > 0, "time steps must be positive");
        self.time_steps = time_steps;
        self.dt = self.expiration / time_steps as Real;
        if !self.is_stable() {
            tracing::warn!(
                dt = self.dt,
                stable_dt = self.stable_dt,
                time_steps,
                "time step exceeds the explicit stability limit; the scheme may diverge"
            );
        }
        Ok(self)
    }

    /// Asset prices `S_0 .. S_NAS`.
    pub fn asset_prices(&self) -> &[Real] {
        &self.asset_prices
    }

    /// Number of nodes (`NAS + 1`).
    pub fn size(&self) -> Size {
        self.asset_prices.len()
    }

    /// Number of asset steps (`NAS`).
    pub fn asset_steps(&self) -> Size {
        self.asset_prices.len() - 1
    }

    /// Asset spacing.
    pub fn ds(&self) -> Real {
        self.ds
    }

    /// Time step.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Number of time steps (`NTS`).
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Time to expiry covered by the steps.
    pub fn expiration(&self) -> Time {
        self.expiration
    }

    /// Stability limit for this grid.
    pub fn stable_dt(&self) -> Time {
        self.stable_dt
    }

    /// `true` while `dt` respects the stability limit.
    pub fn is_stable(&self) -> bool {
        self.dt <= self.stable_dt
    }

    /// Index of the node sitting exactly on `spot`.
    ///
    /// # Errors
    /// [`Error::Lookup`] when `spot` is off the grid or outside the axis.
    pub fn index_of(&self, spot: Real) -> Result<Size> {
        node_index(spot, self.ds, self.size())
    }
}

/// Index of the node `k·ds` equal to `spot` on an axis of `len` nodes
/// starting at zero.
///
/// # Errors
/// [`Error::Lookup`] when `spot` is off the grid or outside the axis.
pub fn node_index(spot: Real, ds: Real, len: Size) -> Result<Size> {
    match aligned_multiple(spot, ds) {
        Some(k) if k >= 0 && (k as Size) < len => Ok(k as Size),
        _ => Err(Error::Lookup { spot }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn binary_grid_parameters() {
        // σ_H = 0.3, NAS = 200: dt_trial = 0.9 / (0.09 · 40000) = 2.5e-4,
        // T / dt_trial = 2000 → NTS = 2001.
        let g = FdmGrid::new(0.3, 200, 100.0, 0.5).unwrap();
        assert_eq!(g.size(), 201);
        assert_relative_eq!(g.ds(), 1.0);
        assert_eq!(g.time_steps(), 2001);
        assert_relative_eq!(g.dt(), 0.5 / 2001.0);
        assert_relative_eq!(g.asset_prices()[200], 200.0);
        assert!(g.is_stable());
    }

    #[test]
    fn extreme_volatility_is_a_configuration_error() {
        // stable dt underflows to zero, so T / dt is infinite
        let err = FdmGrid::new(1e200, 100, 100.0, 0.5).unwrap_err();
        assert!(err.is_configuration(), "{err}");
        assert!(err.to_string().contains("overflows"), "{err}");
    }

    #[test]
    fn node_index_bounds() {
        assert_eq!(node_index(4.0, 2.0, 3), Ok(2));
        assert_eq!(node_index(6.0, 2.0, 3), Err(Error::Lookup { spot: 6.0 }));
        assert_eq!(node_index(3.0, 2.0, 3), Err(Error::Lookup { spot: 3.0 }));
    }

    #[test]
    fn coarse_grid_is_rejected() {
        assert!(FdmGrid::new(0.3, 3, 100.0, 0.5).unwrap_err().is_configuration());
        assert!(FdmGrid::new(0.3, 4, 100.0, 0.5).is_ok());
    }

    #[test]
    fn lookup_requires_alignment() {
        let g = FdmGrid::new(0.3, 110, 110.0, 0.5).unwrap();
        assert_eq!(g.index_of(100.0), Ok(50));
        assert_eq!(g.index_of(0.0), Ok(0));
        assert_eq!(g.index_of(220.0), Ok(110));
        assert_eq!(g.index_of(101.0), Err(Error::Lookup { spot: 101.0 }));
        assert_eq!(g.index_of(222.0), Err(Error::Lookup { spot: 222.0 }));
        assert_eq!(g.index_of(-2.0), Err(Error::Lookup { spot: -2.0 }));

        // ds = 2.2: spot 100 falls between nodes 45 and 46
        let g = FdmGrid::new(0.3, 100, 110.0, 0.5).unwrap();
        assert!(g.index_of(100.0).is_err());
    }

    #[test]
    fn overriding_steps_flags_instability() {
        let g = FdmGrid::new(0.3, 100, 100.0, 0.5).unwrap();
        let unstable = g.clone().with_time_steps(10).unwrap();
        assert!(!unstable.is_stable());
        assert_relative_eq!(unstable.dt(), 0.05);
        let finer = g.with_time_steps(5000).unwrap();
        assert!(finer.is_stable());
    }

    proptest! {
        #[test]
        fn steps_cover_expiry_within_stability(
            vol_high in 0.05..1.0f64,
            nas in 4usize..400,
            strike in 1.0..500.0f64,
            expiration in 0.01..3.0f64,
        ) {
            let g = FdmGrid::new(vol_high, nas, strike, expiration).unwrap();
            let covered = g.dt() * g.time_steps() as f64;
            prop_assert!((covered - expiration).abs() <= 1e-12 * expiration.max(1.0));
            prop_assert!(g.dt() <= stable_time_step(vol_high, nas));
            prop_assert_eq!(g.size(), nas + 1);
        }
    }
}
