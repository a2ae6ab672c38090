//! Standard normal distribution.

use mjd_core::Real;
use std::f64::consts::SQRT_2;

/// The standard normal cumulative distribution function Φ(x).
///
/// Evaluated as `erfc(-x/√2) / 2`, which keeps full relative precision in
/// the lower tail.
#[inline]
pub fn normal_cdf(x: Real) -> Real {
    0.5 * statrs::function::erf::erfc(-x / SQRT_2)
}
