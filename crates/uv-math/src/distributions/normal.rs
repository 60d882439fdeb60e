//! Standard normal distribution.

use std::f64::consts::FRAC_1_SQRT_2;
use uv_core::Real;

/// The standard normal cumulative distribution function Φ(x).
///
/// `Φ(x) = (1 + erf(x/√2)) / 2`, with the error function from `statrs`.
/// The statrs erf is accurate to a few parts in 1e11.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * (1.0 + statrs::function::erf::erf(x * FRAC_1_SQRT_2))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn cdf_reference_values() {
        assert_abs_diff_eq!(normal_cdf(0.0), 0.5, epsilon = 1e-15);
        assert_abs_diff_eq!(normal_cdf(1.0), 0.841_344_746_068_542_9, epsilon = 1e-10);
        assert_abs_diff_eq!(normal_cdf(-1.96), 0.024_997_895_148_220_4, epsilon = 1e-10);
    }

    #[test]
    fn cdf_agrees_with_statrs_normal() {
        use statrs::distribution::{ContinuousCDF, Normal};
        let n = Normal::new(0.0, 1.0).unwrap();
        for &x in &[-3.0, -1.96, -0.5, 0.0, 1.0, 2.5] {
            assert_abs_diff_eq!(normal_cdf(x), n.cdf(x), epsilon = 1e-10);
        }
    }

    #[test]
    fn cdf_symmetry() {
        for &x in &[0.1, 0.7, 2.3, 4.0] {
            assert_abs_diff_eq!(normal_cdf(x) + normal_cdf(-x), 1.0, epsilon = 1e-14);
        }
    }
}
