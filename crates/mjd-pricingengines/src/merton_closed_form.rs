//! Merton (1976) closed-form price of a European option.
//!
//! Conditioning on the number of jumps `n` before maturity turns the model
//! into Black–Scholes with adjusted volatility and rate, so the price is a
//! Poisson mixture:
//!
//! ```text
//! V = Σ_n  e^{−λ'T} (λ'T)^n / n!  ·  BS(S, K, r_n, T, σ_n)
//! σ_n = √(σ² + n·σ_J²/T)
//! r_n = r − λ·k + n·ln(1 + k)/T
//! λ'  = λ·(1 + k),   k = exp(μ_J + σ_J²/2) − 1
//! ```
//!
//! The sum is truncated after `n_terms` terms; [`truncation_tail_mass`]
//! reports the Poisson weight that truncation leaves out.

use crate::black_scholes::black_scholes_unchecked;
use mjd_core::{
    ensure, ensure_finite,
    errors::{Error, Result},
    fail, Price, Rate, Real, Size, Time,
};
use mjd_instruments::{ContractTerms, OptionType};
use mjd_math::PoissonDistribution;
use mjd_processes::ModelParameters;

/// Default number of Poisson terms.
pub const DEFAULT_N_TERMS: Size = 200;

const MAX_REQUIRED_TERMS: Size = 1_000_000;

/// Omitted Poisson weight above which a truncated sum is logged.
const VISIBLE_TAIL_MASS: Real = 1e-12;

/// Merton closed-form engine with a fixed truncation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MertonClosedFormEngine {
    n_terms: Size,
}

impl Default for MertonClosedFormEngine {
    fn default() -> Self {
        Self {
            n_terms: DEFAULT_N_TERMS,
        }
    }
}

impl MertonClosedFormEngine {
    /// Create an engine summing the first `n_terms` Poisson terms.
    pub fn new(n_terms: Size) -> Result<Self> {
        ensure!(n_terms > 0, "number of Poisson terms must be positive");
        Ok(Self { n_terms })
    }

    /// Return a copy with a different truncation.
    pub fn with_n_terms(self, n_terms: Size) -> Result<Self> {
        Self::new(n_terms)
    }

    /// Number of Poisson terms summed.
    pub fn n_terms(&self) -> Size {
        self.n_terms
    }

    /// Price a European option.
    ///
    /// A zero maturity is reported as `NumericalInstability` (the per-term
    /// volatility divides by `T`); other invalid terms or parameters as
    /// `InvalidArgument`.
    pub fn price(&self, params: &ModelParameters, terms: &ContractTerms) -> Result<Price> {
        let (price, omitted) = self.price_with_omitted_weight(params, terms)?;
        if omitted > VISIBLE_TAIL_MASS {
            tracing::debug!(
                n_terms = self.n_terms,
                omitted_weight = omitted,
                maturity = terms.maturity,
                "Poisson truncation leaves visible tail mass"
            );
        }
        Ok(price)
    }

    /// Price together with `1 − Σ w_n` over the summed terms.
    fn price_with_omitted_weight(
        &self,
        params: &ModelParameters,
        terms: &ContractTerms,
    ) -> Result<(Price, Real)> {
        params.validate()?;
        if terms.maturity == 0.0 {
            return Err(Error::NumericalInstability(
                "zero maturity: per-term volatility and rate divide by T".into(),
            ));
        }
        terms.validate()?;

        let t = terms.maturity;
        let k = params.compensator();
        let lam_p_t = params.risk_adjusted_intensity() * t;
        let weights = PoissonDistribution::new(lam_p_t)?;
        // ln(1 + k) = μ_J + σ_J²/2
        let ln_one_plus_k = params.jump_mean + 0.5 * params.jump_vol * params.jump_vol;
        let drift_adjustment = params.jump_intensity * k;

        // Without jumps only the n = 0 term carries weight.
        let n_terms = if lam_p_t == 0.0 { 1 } else { self.n_terms };

        let mut price = 0.0;
        let mut weight_sum = 0.0;
        for n in 0..n_terms {
            let weight = weights.pmf(n as u64);
            ensure_finite!(weight, "Poisson weight for n = {n}");
            if weight == 0.0 {
                continue;
            }
            weight_sum += weight;
            let nf = n as Real;
            let sigma_n =
                (params.sigma * params.sigma + nf * params.jump_vol * params.jump_vol / t).sqrt();
            ensure_finite!(sigma_n, "sigma_n for n = {n}");
            let r_n = terms.rate - drift_adjustment + nf * ln_one_plus_k / t;
            let term = black_scholes_unchecked(
                terms.option_type,
                terms.spot,
                terms.strike,
                r_n,
                t,
                sigma_n,
            );
            ensure_finite!(term, "Black-Scholes term for n = {n}");
            price += weight * term;
        }
        ensure_finite!(price, "Merton price");
        Ok((price, (1.0 - weight_sum).max(0.0)))
    }
}

/// Merton closed-form price from raw inputs.
pub fn merton_price(
    params: &ModelParameters,
    spot: Price,
    strike: Price,
    rate: Rate,
    maturity: Time,
    option_type: OptionType,
    n_terms: Size,
) -> Result<Price> {
    let terms = ContractTerms {
        spot,
        strike,
        maturity,
        rate,
        option_type,
    };
    MertonClosedFormEngine::new(n_terms)?.price(params, &terms)
}

fn jump_count_distribution(params: &ModelParameters, maturity: Time) -> Result<PoissonDistribution> {
    params.validate()?;
    ensure!(
        maturity.is_finite() && maturity > 0.0,
        "maturity must be positive and finite, got {maturity}"
    );
    PoissonDistribution::new(params.risk_adjusted_intensity() * maturity)
}

/// Poisson weight omitted by summing only the first `n_terms` terms,
/// `1 − Σ_{n < n_terms} w_n`.
pub fn truncation_tail_mass(params: &ModelParameters, maturity: Time, n_terms: Size) -> Result<Real> {
    let dist = jump_count_distribution(params, maturity)?;
    Ok(dist.tail(n_terms as u64))
}

/// Smallest number of terms whose omitted Poisson weight is below
/// `tolerance`.
pub fn required_terms(params: &ModelParameters, maturity: Time, tolerance: Real) -> Result<Size> {
    ensure!(
        tolerance.is_finite() && tolerance > 0.0 && tolerance < 1.0,
        "tolerance must lie in (0, 1), got {tolerance}"
    );
    let dist = jump_count_distribution(params, maturity)?;
    // P(X >= n) >= 1/2 for n < floor(mean), so those counts cannot qualify.
    let mut n = if tolerance < 0.5 {
        (dist.mean().floor() as Size).max(1)
    } else {
        1
    };
    while n <= MAX_REQUIRED_TERMS {
        if dist.tail(n as u64) < tolerance {
            return Ok(n);
        }
        n += 1;
    }
    fail!("more than {MAX_REQUIRED_TERMS} terms needed for tail mass below {tolerance}")
}
