//! Log-factorial.

use mjd_core::Real;

/// `ln(n!)` computed as `ln Γ(n + 1)`, so it never overflows.
#[inline]
pub fn ln_factorial(n: u64) -> Real {
    statrs::function::gamma::ln_gamma(n as Real + 1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn small_factorials() {
        assert_relative_eq!(ln_factorial(0), 0.0, epsilon = 1e-14);
        assert_relative_eq!(ln_factorial(1), 0.0, epsilon = 1e-14);
        assert_relative_eq!(ln_factorial(5), 120.0_f64.ln(), epsilon = 1e-12);
        assert_relative_eq!(ln_factorial(10), 3_628_800.0_f64.ln(), epsilon = 1e-12);
    }

    #[test]
    fn large_factorial_stays_finite() {
        // 500! overflows f64, its logarithm does not.
        let v = ln_factorial(500);
        assert!(v.is_finite());
        assert!(v > 2600.0 && v < 2700.0, "ln(500!) = {v}");
    }
}
