//! Black–Scholes price of a European option on a non-dividend-paying asset.
//!
//! ```text
//! C = S·N(d1) − K·e^{−rT}·N(d2)
//! P = K·e^{−rT}·N(−d2) − S·N(−d1)
//! d1,2 = (ln(S/K) + (r ± σ²/2)·T) / (σ·√T)
//! ```

use mjd_core::{ensure, ensure_finite, errors::Result, Price, Rate, Real, Time, Volatility};
use mjd_instruments::{ContractTerms, OptionType};
use mjd_math::normal_cdf;

/// Black–Scholes price, validating every input.
///
/// Fails with `InvalidArgument` for non-positive spot, strike, maturity or
/// volatility, and with `NumericalInstability` if the result is not finite.
pub fn black_scholes_price(
    option_type: OptionType,
    spot: Price,
    strike: Price,
    rate: Rate,
    maturity: Time,
    volatility: Volatility,
) -> Result<Price> {
    ContractTerms::new(spot, strike, maturity, rate, option_type)?;
    ensure!(
        volatility.is_finite() && volatility > 0.0,
        "volatility must be positive and finite, got {volatility}"
    );
    let price = black_scholes_unchecked(option_type, spot, strike, rate, maturity, volatility);
    ensure_finite!(price, "Black-Scholes price");
    Ok(price)
}

/// Formula without validation; callers guarantee `S, K, T, σ > 0`.
pub(crate) fn black_scholes_unchecked(
    option_type: OptionType,
    spot: Real,
    strike: Real,
    rate: Real,
    maturity: Real,
    volatility: Real,
) -> Real {
    let phi = option_type.sign();
    let std_dev = volatility * maturity.sqrt();
    let d1 = ((spot / strike).ln() + (rate + 0.5 * volatility * volatility) * maturity) / std_dev;
    let d2 = d1 - std_dev;
    let df = (-rate * maturity).exp();
    phi * (spot * normal_cdf(phi * d1) - strike * df * normal_cdf(phi * d2))
}
