//! Linear interpolation on a uniformly spaced axis.

use uv_core::{Error, Real, Result};

/// Interface of a one-dimensional interpolation.
pub trait Interpolation1D: std::fmt::Debug {
    /// Evaluate the interpolation at `x`.
    fn operator(&self, x: Real) -> Real;

    /// Return the lower bound of the interpolation domain.
    fn x_min(&self) -> Real;

    /// Return the upper bound of the interpolation domain.
    fn x_max(&self) -> Real;

    /// Return `true` if `x` is within the interpolation range.
    fn is_in_range(&self, x: Real) -> bool {
        x >= self.x_min() && x <= self.x_max()
    }
}

/// Piecewise-linear interpolation of values sampled at `x0 + i·dx`.
///
/// The node for a given `x` is found by division instead of a search.
#[derive(Debug, Clone, Copy)]
pub struct UniformLinearInterpolation<'a> {
    x0: Real,
    dx: Real,
    ys: &'a [Real],
}

impl<'a> UniformLinearInterpolation<'a> {
    /// Interpolate `ys` sampled at `x0, x0 + dx, …`.
    ///
    /// # Errors
    /// Returns a configuration error for fewer than 2 samples or a
    /// non-positive spacing.
    pub fn new(x0: Real, dx: Real, ys: &'a [Real]) -> Result<Self> {
        uv_core::ensure!(ys.len() >= 2, "need at least 2 points for interpolation");
        uv_core::ensure!(dx > 0.0, "axis spacing must be positive, got {dx}");
        Ok(Self { x0, dx, ys })
    }

    /// Evaluate at `x`, failing with [`Error::Lookup`] outside the axis.
    pub fn try_value(&self, x: Real) -> Result<Real> {
        if !self.is_in_range(x) {
            return Err(Error::Lookup { spot: x });
        }
        Ok(self.operator(x))
    }

    fn locate(&self, x: Real) -> usize {
        let last = self.ys.len() - 2;
        let i = ((x - self.x0) / self.dx).floor();
        if i <= 0.0 {
            0
        } else {
            (i as usize).min(last)
        }
    }
}

impl Interpolation1D for UniformLinearInterpolation<'_> {
    fn x_min(&self) -> Real {
        self.x0
    }

    fn x_max(&self) -> Real {
        self.x0 + (self.ys.len() - 1) as Real * self.dx
    }

    fn operator(&self, x: Real) -> Real {
        let i = self.locate(x);
        let xi = self.x0 + i as Real * self.dx;
        self.ys[i] + (x - xi) * (self.ys[i + 1] - self.ys[i]) / self.dx
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn reproduces_nodes_and_midpoints() {
        let ys = [0.0, 2.0, 6.0, 12.0];
        let f = UniformLinearInterpolation::new(0.0, 0.5, &ys).unwrap();
        assert_abs_diff_eq!(f.operator(0.5), 2.0, epsilon = 1e-15);
        assert_abs_diff_eq!(f.operator(1.5), 12.0, epsilon = 1e-15);
        assert_abs_diff_eq!(f.operator(0.75), 4.0, epsilon = 1e-15);
        assert_abs_diff_eq!(f.x_max(), 1.5, epsilon = 1e-15);
    }

    #[test]
    fn outside_axis_is_a_lookup_error() {
        let ys = [1.0, 1.0];
        let f = UniformLinearInterpolation::new(10.0, 1.0, &ys).unwrap();
        assert_eq!(f.try_value(9.0), Err(Error::Lookup { spot: 9.0 }));
        assert_eq!(f.try_value(11.5), Err(Error::Lookup { spot: 11.5 }));
        assert!(f.try_value(10.5).is_ok());
    }

    #[test]
    fn rejects_degenerate_input() {
        assert!(UniformLinearInterpolation::new(0.0, 1.0, &[1.0]).is_err());
        assert!(UniformLinearInterpolation::new(0.0, 0.0, &[1.0, 2.0]).is_err());
    }

    proptest! {
        #[test]
        fn linear_data_is_reproduced(a in -5.0..5.0f64, b in -5.0..5.0f64, x in 0.0..9.0f64) {
            let ys: Vec<f64> = (0..10).map(|i| a + b * i as f64).collect();
            let f = UniformLinearInterpolation::new(0.0, 1.0, &ys).unwrap();
            prop_assert!((f.operator(x) - (a + b * x)).abs() < 1e-10);
        }
    }
}
