//! Merton jump-diffusion process under the risk-neutral measure.
//!
//! Over a step `Δt` the log price moves by
//!
//! ```text
//! (r − λ·k − σ²/2)·Δt + σ·√Δt·Z + Σ_{i=1..N} Y_i
//! ```
//!
//! with `Z ~ N(0, 1)`, `N ~ Poisson(λ·Δt)` and `Y_i ~ N(μ_J, σ_J²)`. The
//! `−λ·k` compensator keeps the discounted price a martingale.

use crate::model_parameters::ModelParameters;
use mjd_core::{ensure, errors::Result, Price, Rate, Real, Time};
use mjd_math::{JumpCountSampler, SimulationRng};

/// A Merton (1976) jump-diffusion process started at `spot`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MertonJumpDiffusionProcess {
    spot: Price,
    rate: Rate,
    params: ModelParameters,
}

impl MertonJumpDiffusionProcess {
    /// Create a process. Fails if `spot <= 0`, `rate` is non-finite or the
    /// parameters are invalid.
    pub fn new(spot: Price, rate: Rate, params: ModelParameters) -> Result<Self> {
        ensure!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive and finite, got {spot}"
        );
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        params.validate()?;
        Ok(Self { spot, rate, params })
    }

    /// Initial value `S0`.
    pub fn initial_value(&self) -> Price {
        self.spot
    }

    /// Risk-free rate.
    pub fn rate(&self) -> Rate {
        self.rate
    }

    /// Model parameters.
    pub fn parameters(&self) -> &ModelParameters {
        &self.params
    }

    /// Deterministic drift of the log price, `r − λ·k − σ²/2`.
    pub fn log_drift(&self) -> Real {
        let sigma = self.params.sigma;
        self.rate - self.params.jump_intensity * self.params.compensator() - 0.5 * sigma * sigma
    }

    /// Jump-count sampler for steps of length `dt`.
    pub fn jump_count_sampler(&self, dt: Time) -> Result<JumpCountSampler> {
        JumpCountSampler::new(self.params.jump_intensity * dt)
    }

    /// Advance `x` by `dt` given the Gaussian shock `dw` and the summed log
    /// jump size `jump`.
    pub fn evolve(&self, x: Price, dt: Time, dw: Real, jump: Real) -> Price {
        let continuous = self.log_drift() * dt + self.params.sigma * dt.sqrt() * dw;
        x * (continuous + jump).exp()
    }

    /// Draw one step from `rng`: `Z` first, then the jump count, then one
    /// normal per jump.
    pub fn step(
        &self,
        x: Price,
        dt: Time,
        sampler: &JumpCountSampler,
        rng: &mut SimulationRng,
    ) -> Price {
        let dw = rng.standard_normal();
        let n_jumps = rng.jump_count(sampler);
        let jump: Real = (0..n_jumps)
            .map(|_| rng.normal(self.params.jump_mean, self.params.jump_vol))
            .sum();
        self.evolve(x, dt, dw, jump)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn process(lam: Real) -> MertonJumpDiffusionProcess {
        let p = ModelParameters::new(0.2, lam, -0.1, 0.15).unwrap();
        MertonJumpDiffusionProcess::new(100.0, 0.05, p).unwrap()
    }

    #[test]
    fn log_drift_includes_compensator() {
        let proc = process(1.0);
        let k = proc.parameters().compensator();
        assert_relative_eq!(proc.log_drift(), 0.05 - k - 0.02, max_relative = 1e-14);
    }

    #[test]
    fn evolve_without_shocks_follows_drift() {
        let proc = process(0.0);
        let x = proc.evolve(100.0, 0.5, 0.0, 0.0);
        assert_relative_eq!(x, 100.0 * (0.03_f64 * 0.5).exp(), max_relative = 1e-14);
        let jumped = proc.evolve(100.0, 0.5, 0.0, -0.2);
        assert_relative_eq!(jumped / x, (-0.2_f64).exp(), max_relative = 1e-14);
    }

    #[test]
    fn martingale_one_step() {
        // E[e^{-r dt} S(dt)] = S0 for the compensated dynamics.
        let proc = process(2.0);
        let dt = 0.25;
        let sampler = proc.jump_count_sampler(dt).unwrap();
        let mut rng = SimulationRng::new(Some(2024));
        let n = 200_000;
        let mean = (0..n)
            .map(|_| proc.step(100.0, dt, &sampler, &mut rng))
            .sum::<Real>()
            / n as Real;
        let discounted = mean * (-0.05 * dt).exp();
        assert!((discounted - 100.0).abs() < 0.25, "discounted mean {discounted}");
    }

    #[test]
    fn zero_intensity_sampler_is_degenerate() {
        let proc = process(0.0);
        assert!(proc.jump_count_sampler(0.1).unwrap().is_degenerate());
    }

    #[test]
    fn invalid_process_rejected() {
        let p = ModelParameters::new(0.2, 1.0, 0.0, 0.1).unwrap();
        assert!(MertonJumpDiffusionProcess::new(0.0, 0.05, p).is_err());
        assert!(MertonJumpDiffusionProcess::new(100.0, f64::NAN, p).is_err());
        let bad = ModelParameters {
            sigma: -1.0,
            ..p
        };
        assert!(MertonJumpDiffusionProcess::new(100.0, 0.05, bad).is_err());
    }
}
