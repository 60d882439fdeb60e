//! Floating-point comparison utilities.

use uv_core::Real;

/// If `x` is an integer multiple of `step` (within a relative tolerance),
/// return that multiple.
///
/// Used to decide whether an asset price sits on a uniform grid node.
pub fn aligned_multiple(x: Real, step: Real) -> Option<i64> {
    if !(step > 0.0) || !x.is_finite() {
        return None;
    }
    let ratio = x / step;
    let k = ratio.round();
    if (ratio - k).abs() <= 1e-9 * k.abs().max(1.0) {
        Some(k as i64)
    } else {
        None
    }
}
