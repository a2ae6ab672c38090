//! Merton model parameters `(σ, λ, μ_J, σ_J)`.

use mjd_core::{ensure, errors::Result, Real, Volatility};
use mjd_math::Array;

/// The four Merton jump-diffusion parameters.
///
/// Invariants: `sigma > 0`, `jump_intensity >= 0`, `jump_vol > 0`, all
/// finite. Fields are public; every operation calls
/// [`ModelParameters::validate`] on the parameters it receives.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ModelParameters {
    /// Diffusion volatility σ.
    pub sigma: Volatility,
    /// Jump intensity λ (expected jumps per year).
    pub jump_intensity: Real,
    /// Mean μ_J of the log jump size.
    pub jump_mean: Real,
    /// Standard deviation σ_J of the log jump size.
    pub jump_vol: Real,
}

impl ModelParameters {
    /// Number of free parameters, in calibration order.
    pub const DIMENSION: usize = 4;

    /// Create validated parameters.
    pub fn new(sigma: Volatility, jump_intensity: Real, jump_mean: Real, jump_vol: Real) -> Result<Self> {
        let p = Self {
            sigma,
            jump_intensity,
            jump_mean,
            jump_vol,
        };
        p.validate()?;
        Ok(p)
    }

    /// Check the invariants.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.sigma.is_finite() && self.sigma > 0.0,
            "sigma must be positive and finite, got {}",
            self.sigma
        );
        ensure!(
            self.jump_intensity.is_finite() && self.jump_intensity >= 0.0,
            "jump intensity must be non-negative and finite, got {}",
            self.jump_intensity
        );
        ensure!(
            self.jump_mean.is_finite(),
            "jump mean must be finite, got {}",
            self.jump_mean
        );
        ensure!(
            self.jump_vol.is_finite() && self.jump_vol > 0.0,
            "jump vol must be positive and finite, got {}",
            self.jump_vol
        );
        Ok(())
    }

    /// Compensator `k = E[J] − 1 = exp(μ_J + σ_J²/2) − 1`.
    pub fn compensator(&self) -> Real {
        (self.jump_mean + 0.5 * self.jump_vol * self.jump_vol).exp() - 1.0
    }

    /// Risk-adjusted intensity `λ' = λ·(1 + k)`.
    pub fn risk_adjusted_intensity(&self) -> Real {
        self.jump_intensity * (1.0 + self.compensator())
    }

    /// `[σ, λ, μ_J, σ_J]` as an optimizer vector.
    pub fn to_array(&self) -> Array {
        Array::from_slice(&[self.sigma, self.jump_intensity, self.jump_mean, self.jump_vol])
    }

    /// Rebuild validated parameters from `[σ, λ, μ_J, σ_J]`.
    pub fn from_array(x: &Array) -> Result<Self> {
        ensure!(
            x.size() == Self::DIMENSION,
            "expected {} model parameters, got {}",
            Self::DIMENSION,
            x.size()
        );
        Self::new(x[0], x[1], x[2], x[3])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use mjd_core::errors::Error;

    #[test]
    fn compensator_and_risk_adjusted_intensity() {
        let p = ModelParameters::new(0.2, 1.0, -0.1, 0.15).unwrap();
        let expected = (-0.1 + 0.5 * 0.0225_f64).exp() - 1.0;
        assert_relative_eq!(p.compensator(), expected, max_relative = 1e-14);
        assert_relative_eq!(p.risk_adjusted_intensity(), 1.0 + expected, max_relative = 1e-14);
    }

    #[test]
    fn zero_intensity_is_valid() {
        let p = ModelParameters::new(0.2, 0.0, 0.0, 0.01).unwrap();
        assert_eq!(p.risk_adjusted_intensity(), 0.0);
    }

    #[test]
    fn array_round_trip() {
        let p = ModelParameters::new(0.25, 0.5, -0.05, 0.2).unwrap();
        assert_eq!(ModelParameters::from_array(&p.to_array()).unwrap(), p);
        assert!(ModelParameters::from_array(&Array::from_slice(&[0.2, 0.5])).is_err());
    }

    #[test]
    fn invalid_parameters_rejected() {
        let cases = [
            (0.0, 1.0, 0.0, 0.1),
            (-0.2, 1.0, 0.0, 0.1),
            (0.2, -1.0, 0.0, 0.1),
            (0.2, 1.0, 0.0, 0.0),
            (0.2, 1.0, f64::NAN, 0.1),
            (f64::INFINITY, 1.0, 0.0, 0.1),
        ];
        for (s, l, m, v) in cases {
            assert!(
                matches!(ModelParameters::new(s, l, m, v), Err(Error::InvalidArgument(_))),
                "accepted ({s}, {l}, {m}, {v})"
            );
        }
    }
}
