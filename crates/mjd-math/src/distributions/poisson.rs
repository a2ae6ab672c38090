//! Poisson distribution of jump counts.
//!
//! Probabilities are evaluated in log-space,
//! `ln P(X = k) = −μ + k·ln μ − ln Γ(k + 1)`,
//! so that neither `μᵏ` nor `k!` is ever formed. Tail masses come from the
//! regularized lower incomplete gamma function in `statrs`.

use crate::distributions::gamma::ln_factorial;
use mjd_core::{ensure, errors::Result, Real};
use statrs::function::gamma::gamma_lr;

/// Poisson distribution with mean `mean >= 0`.
///
/// A zero mean is allowed and degenerates to a point mass at zero.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoissonDistribution {
    mean: Real,
}

impl PoissonDistribution {
    /// Create a Poisson distribution with the given mean.
    pub fn new(mean: Real) -> Result<Self> {
        ensure!(
            mean.is_finite() && mean >= 0.0,
            "Poisson mean must be finite and non-negative, got {mean}"
        );
        Ok(Self { mean })
    }

    /// Mean parameter μ.
    pub fn mean(&self) -> Real {
        self.mean
    }

    /// `ln P(X = k)`; `-∞` for impossible outcomes.
    pub fn ln_pmf(&self, k: u64) -> Real {
        if self.mean == 0.0 {
            return if k == 0 { 0.0 } else { Real::NEG_INFINITY };
        }
        -self.mean + k as Real * self.mean.ln() - ln_factorial(k)
    }

    /// Probability mass function P(X = k).
    pub fn pmf(&self, k: u64) -> Real {
        self.ln_pmf(k).exp()
    }

    /// Tail mass P(X ≥ n): the probability left out by truncating a
    /// mixture after its first `n` terms.
    pub fn tail(&self, n: u64) -> Real {
        if n == 0 {
            return 1.0;
        }
        if self.mean == 0.0 {
            return 0.0;
        }
        // P(X ≥ n) = P(n, μ)
        gamma_lr(n as Real, self.mean)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::{assert_abs_diff_eq, assert_relative_eq};

    #[test]
    fn poisson_pmf() {
        let d = PoissonDistribution::new(3.0).unwrap();
        let p0 = (-3.0_f64).exp();
        assert_relative_eq!(d.pmf(0), p0, max_relative = 1e-12);
        // e^{-3} * 27 / 6
        assert_relative_eq!(d.pmf(3), p0 * 27.0 / 6.0, max_relative = 1e-12);
    }

    #[test]
    fn pmf_survives_large_mean_and_count() {
        // μ^k and k! both overflow here; the log-space weight does not.
        let d = PoissonDistribution::new(400.0).unwrap();
        let p = d.pmf(400);
        assert!(p.is_finite() && p > 0.0 && p < 0.05, "pmf = {p}");
    }

    #[test]
    fn tail_matches_partial_sums() {
        let d = PoissonDistribution::new(1.7).unwrap();
        let mut cumulative = 0.0;
        for n in 0..20u64 {
            assert_abs_diff_eq!(d.tail(n), 1.0 - cumulative, epsilon = 1e-12);
            cumulative += d.pmf(n);
        }
    }

    #[test]
    fn zero_mean_is_point_mass() {
        let d = PoissonDistribution::new(0.0).unwrap();
        assert_eq!(d.pmf(0), 1.0);
        assert_eq!(d.pmf(1), 0.0);
        assert_eq!(d.tail(1), 0.0);
    }

    #[test]
    fn negative_mean_rejected() {
        assert!(PoissonDistribution::new(-0.1).is_err());
        assert!(PoissonDistribution::new(f64::NAN).is_err());
    }
}
