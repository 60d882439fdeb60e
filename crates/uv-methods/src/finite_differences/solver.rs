//! Full backward solve: grid, terminal payoff, stepping, boundaries.

use super::grid::{node_index, FdmGrid};
use super::stepper::{RegimeCounts, UncertainVolatilityStepper};
use uv_core::{ensure, Error, Rate, Real, Result, Size, Time};
use uv_instruments::ContractSpec;
use uv_math::UniformLinearInterpolation;

/// Payoffs are multiplied by this before stepping and divided afterwards,
/// keeping the Γ-sign test away from values of order machine epsilon.
pub const DEFAULT_CONDITIONING_SCALE: Real = 1000.0;

/// A run is aborted once its sup-norm exceeds the initial one by this factor.
pub const DEFAULT_MAX_GROWTH: Real = 1.0e6;

/// Tuning knobs of [`UncertainVolatilitySolver`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SolverSettings {
    /// Multiplier applied to the payoff for the duration of the solve.
    pub conditioning_scale: Real,
    /// Growth factor that triggers [`Error::NumericalInstability`].
    pub max_growth: Real,
    /// Override of the stability-derived step count.
    pub time_steps: Option<Size>,
}

impl Default for SolverSettings {
    fn default() -> Self {
        Self {
            conditioning_scale: DEFAULT_CONDITIONING_SCALE,
            max_growth: DEFAULT_MAX_GROWTH,
            time_steps: None,
        }
    }
}

impl SolverSettings {
    /// Force a step count instead of the stability-derived one.
    pub fn with_time_steps(mut self, time_steps: Size) -> Self {
        self.time_steps = Some(time_steps);
        self
    }

    /// Use another conditioning scale (`1.0` disables conditioning).
    pub fn with_conditioning_scale(mut self, scale: Real) -> Self {
        self.conditioning_scale = scale;
        self
    }

    fn validate(&self) -> Result<()> {
        ensure!(
            self.conditioning_scale > 0.0 && self.conditioning_scale.is_finite(),
            "conditioning scale must be positive, got {}",
            self.conditioning_scale
        );
        ensure!(
            self.max_growth > 1.0,
            "growth limit must exceed 1, got {}",
            self.max_growth
        );
        Ok(())
    }
}

/// Price of a contract on every node of the asset axis.
///
/// `asset_prices`, `payoff`, and `values` are parallel vectors.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceCurve {
    asset_prices: Vec<Real>,
    payoff: Vec<Real>,
    values: Vec<Real>,
    ds: Real,
    dt: Time,
    time_steps: Size,
}

impl PriceCurve {
    /// Asset prices of the nodes.
    pub fn asset_prices(&self) -> &[Real] {
        &self.asset_prices
    }

    /// Terminal payoff on the nodes.
    pub fn payoff(&self) -> &[Real] {
        &self.payoff
    }

    /// Worst-case values today on the nodes.
    pub fn values(&self) -> &[Real] {
        &self.values
    }

    /// Asset spacing.
    pub fn ds(&self) -> Real {
        self.ds
    }

    /// Time step used.
    pub fn dt(&self) -> Time {
        self.dt
    }

    /// Number of time steps taken.
    pub fn time_steps(&self) -> Size {
        self.time_steps
    }

    /// Number of nodes.
    pub fn len(&self) -> Size {
        self.values.len()
    }

    /// Always `false`: a curve has at least five nodes.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Node index sitting exactly on `spot`.
    pub fn index_of(&self, spot: Real) -> Result<Size> {
        node_index(spot, self.ds, self.len())
    }

    /// Value at a grid node.
    ///
    /// # Errors
    /// [`Error::Lookup`] when `spot` is not a node.
    pub fn value_at(&self, spot: Real) -> Result<Real> {
        self.index_of(spot).map(|i| self.values[i])
    }

    /// Value at any price inside the axis, linear between nodes.
    ///
    /// # Errors
    /// [`Error::Lookup`] outside `[0, S_max]`.
    pub fn interpolate(&self, spot: Real) -> Result<Real> {
        UniformLinearInterpolation::new(0.0, self.ds, &self.values)?.try_value(spot)
    }

    /// Iterate `(S, payoff, value)` triples.
    pub fn rows(&self) -> impl Iterator<Item = (Real, Real, Real)> + '_ {
        self.asset_prices
            .iter()
            .zip(&self.payoff)
            .zip(&self.values)
            .map(|((&s, &p), &v)| (s, p, v))
    }
}

/// Explicit finite-difference solver for uncertain-volatility prices.
///
/// Each call to [`solve`](Self::solve) owns its two value buffers, so one
/// solver can be shared by many threads.
#[derive(Debug, Clone, Copy, Default)]
pub struct UncertainVolatilitySolver {
    settings: SolverSettings,
}

impl UncertainVolatilitySolver {
    /// Solver with the given settings.
    pub fn new(settings: SolverSettings) -> Self {
        Self { settings }
    }

    /// Current settings.
    pub fn settings(&self) -> &SolverSettings {
        &self.settings
    }

    /// Discretisation that [`solve`](Self::solve) would use for `spec`.
    pub fn grid(&self, spec: &ContractSpec) -> Result<FdmGrid> {
        let grid = FdmGrid::for_contract(spec)?;
        match self.settings.time_steps {
            Some(nts) => grid.with_time_steps(nts),
            None => Ok(grid),
        }
    }

    /// Price `spec` on the whole asset axis.
    ///
    /// # Errors
    /// Configuration errors from the grid or settings, and
    /// [`Error::NumericalInstability`] if the values blow up.
    pub fn solve(&self, spec: &ContractSpec) -> Result<PriceCurve> {
        self.settings.validate()?;
        let grid = self.grid(spec)?;
        let n = grid.size();
        let scale = self.settings.conditioning_scale;

        tracing::debug!(
            contract = %spec.kind().payoff().description(),
            position = %spec.position(),
            nas = grid.asset_steps(),
            nts = grid.time_steps(),
            dt = grid.dt(),
            "solving uncertain-volatility PDE"
        );

        let payoff_fn = spec.kind().payoff();
        let scaled_payoff: Vec<Real> = grid
            .asset_prices()
            .iter()
            .map(|&s| payoff_fn.value(s) * scale)
            .collect();

        let stepper = UncertainVolatilityStepper::new(&grid, spec);
        let growth_limit = self.settings.max_growth * sup_norm(&scaled_payoff).max(scale);

        let mut previous = scaled_payoff.clone();
        let mut next = vec![0.0; n];
        let mut regimes = RegimeCounts::default();

        for step in 0..grid.time_steps() {
            let counts = stepper.step(&previous, &mut next);
            regimes.low += counts.low;
            regimes.high += counts.high;
            apply_boundaries(&previous, &mut next, spec.rate(), grid.dt());
            check_growth(&next, growth_limit, step)?;
            std::mem::swap(&mut previous, &mut next);
        }

        tracing::trace!(
            low_regime_nodes = regimes.low,
            high_regime_nodes = regimes.high,
            "volatility regime usage"
        );

        let values = previous.into_iter().map(|v| v / scale).collect();
        let payoff = scaled_payoff.into_iter().map(|p| p / scale).collect();

        Ok(PriceCurve {
            asset_prices: grid.asset_prices().to_vec(),
            payoff,
            values,
            ds: grid.ds(),
            dt: grid.dt(),
            time_steps: grid.time_steps(),
        })
    }

    /// Solve and read the value at a grid-aligned `spot`.
    pub fn price_at(&self, spec: &ContractSpec, spot: Real) -> Result<Real> {
        // Reject a misaligned spot before paying for the solve.
        FdmGrid::for_contract(spec)?.index_of(spot)?;
        self.solve(spec)?.value_at(spot)
    }
}

/// Lower node decays at the risk-free rate (`S = 0`, no spatial terms);
/// the upper node extrapolates linearly from its two neighbours (`Γ = 0`).
pub fn apply_boundaries(previous: &[Real], next: &mut [Real], rate: Rate, dt: Time) {
    let n = next.len();
    next[0] = previous[0] * (1.0 - rate * dt);
    next[n - 1] = 2.0 * next[n - 2] - next[n - 3];
}

fn sup_norm(values: &[Real]) -> Real {
    values.iter().fold(0.0, |m: Real, v| m.max(v.abs()))
}

fn check_growth(values: &[Real], limit: Real, step: Size) -> Result<()> {
    let mut max_abs: Real = 0.0;
    for (j, v) in values.iter().enumerate() {
        if !v.is_finite() {
            return Err(Error::NumericalInstability {
                step,
                detail: format!("non-finite value at node {j}"),
            });
        }
        max_abs = max_abs.max(v.abs());
    }
    if max_abs > limit {
        return Err(Error::NumericalInstability {
            step,
            detail: format!("magnitude {max_abs:e} exceeds growth limit {limit:e}"),
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use uv_core::Position;
    use uv_instruments::ContractKind;

    fn binary_spec(position: Position, nas: Size) -> ContractSpec {
        ContractSpec::builder(ContractKind::binary(100.0))
            .volatility_bounds(0.2, 0.3)
            .rate(0.05)
            .expiration(0.5)
            .asset_steps(nas)
            .position(position)
            .build()
            .unwrap()
    }

    #[test]
    fn curve_vectors_are_parallel() {
        let curve = UncertainVolatilitySolver::default()
            .solve(&binary_spec(Position::Short, 50))
            .unwrap();
        assert_eq!(curve.len(), 51);
        assert_eq!(curve.payoff().len(), 51);
        assert_eq!(curve.asset_prices().len(), 51);
        assert_eq!(curve.rows().count(), 51);
        // Strict digital: the node on the strike pays nothing.
        let k = curve.index_of(100.0).unwrap();
        assert_eq!(curve.payoff()[k], 0.0);
        assert_eq!(curve.payoff()[k + 1], 1.0);
    }

    #[test]
    fn upper_boundary_is_linear() {
        let curve = UncertainVolatilitySolver::default()
            .solve(&binary_spec(Position::Long, 40))
            .unwrap();
        let v = curve.values();
        let n = v.len();
        assert_relative_eq!(v[n - 1], 2.0 * v[n - 2] - v[n - 3], epsilon = 1e-12);
    }

    #[test]
    fn lookup_off_grid_fails() {
        let solver = UncertainVolatilitySolver::default();
        let spec = binary_spec(Position::Short, 40);
        assert_eq!(
            solver.price_at(&spec, 101.0),
            Err(Error::Lookup { spot: 101.0 })
        );
        let curve = solver.solve(&spec).unwrap();
        assert!(curve.value_at(100.0).is_ok());
        let mid = curve.interpolate(101.0).unwrap();
        let lo = curve.value_at(100.0).unwrap();
        let hi = curve.value_at(105.0).unwrap();
        assert!(mid >= lo.min(hi) && mid <= lo.max(hi));
        assert_eq!(curve.interpolate(250.0), Err(Error::Lookup { spot: 250.0 }));
        assert_eq!(curve.interpolate(-1.0), Err(Error::Lookup { spot: -1.0 }));
    }

    #[test]
    fn unstable_override_is_aborted() {
        let solver = UncertainVolatilitySolver::new(SolverSettings::default().with_time_steps(5));
        let err = solver.solve(&binary_spec(Position::Short, 200)).unwrap_err();
        assert!(
            matches!(err, Error::NumericalInstability { .. }),
            "unexpected error {err:?}"
        );
    }

    #[test]
    fn conditioning_scale_does_not_move_prices() {
        let spec = binary_spec(Position::Short, 60);
        let scaled = UncertainVolatilitySolver::default().solve(&spec).unwrap();
        let raw = UncertainVolatilitySolver::new(
            SolverSettings::default().with_conditioning_scale(1.0),
        )
        .solve(&spec)
        .unwrap();
        for (a, b) in scaled.values().iter().zip(raw.values()) {
            assert!((a - b).abs() < 1e-9, "{a} vs {b}");
        }
    }

    #[test]
    fn invalid_settings_are_configuration_errors() {
        let solver =
            UncertainVolatilitySolver::new(SolverSettings::default().with_conditioning_scale(0.0));
        assert!(solver
            .solve(&binary_spec(Position::Long, 20))
            .unwrap_err()
            .is_configuration());
    }
}
