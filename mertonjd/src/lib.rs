//! # mertonjd
//!
//! European option pricing under the Merton (1976) jump-diffusion model:
//! path simulation, Monte Carlo and closed-form pricing, calibration to
//! observed prices, and Black–Scholes implied volatility.
//!
//! This crate is a façade over the `mjd-*` workspace crates. It re-exports
//! them as modules and adds the five top-level entry points.
//!
//! ## Quick start
//!
//! ```rust
//! use mertonjd::{price_closed_form, ModelParameters, OptionType, DEFAULT_N_TERMS};
//!
//! let params = ModelParameters::new(0.2, 0.0, 0.0, 0.01).unwrap();
//! let price = price_closed_form(&params, 100.0, 100.0, 0.05, 1.0, OptionType::Call, DEFAULT_N_TERMS)
//!     .unwrap();
//! assert!((price - 10.4506).abs() < 1e-4);
//! ```
//!
//! The library emits `tracing` events and installs no subscriber.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// Core types, aliases, and error definitions.
pub use mjd_core as core;

/// Distributions, solvers, optimization, and RNG.
pub use mjd_math as math;

/// Option types, payoffs, and contract terms.
pub use mjd_instruments as instruments;

/// Model parameters and process dynamics.
pub use mjd_processes as processes;

/// Path simulation and Monte Carlo pricing.
pub use mjd_methods as methods;

/// Black–Scholes, Merton closed form, and implied volatility.
pub use mjd_pricingengines as pricingengines;

/// Model calibration.
pub use mjd_models as models;

pub use mjd_core::{Error, Price, Rate, Real, Result, Size, Time, Volatility};
pub use mjd_instruments::{ContractTerms, OptionType};
pub use mjd_methods::{MonteCarloEstimate, PathSet, TimeGrid};
pub use mjd_models::{CalibrationBounds, CalibrationResult, MarketQuote, MertonCalibrator};
pub use mjd_pricingengines::{
    implied_volatility, ImpliedVolatilitySolver, MertonClosedFormEngine, DEFAULT_N_TERMS,
    DEFAULT_VOL_LOWER, DEFAULT_VOL_UPPER,
};
pub use mjd_processes::ModelParameters;

use mjd_core::ensure;

/// Simulate `n_paths` price paths over `[0, t]` with `n_steps` equal steps.
///
/// `Some(seed)` makes the result reproducible; `None` seeds from OS entropy.
pub fn simulate(
    params: &ModelParameters,
    s0: Price,
    r: Rate,
    t: Time,
    n_steps: Size,
    n_paths: Size,
    seed: Option<u64>,
) -> Result<PathSet> {
    mjd_methods::simulate_paths(params, s0, r, t, n_steps, n_paths, seed)
}

/// Monte Carlo price of a European option from simulated paths.
pub fn price_monte_carlo(
    paths: &PathSet,
    s0: Price,
    k: Price,
    r: Rate,
    t: Time,
    option_type: OptionType,
) -> Result<Price> {
    Ok(monte_carlo_estimate(paths, s0, k, r, t, option_type)?.price)
}

/// Monte Carlo price together with its standard error.
pub fn monte_carlo_estimate(
    paths: &PathSet,
    s0: Price,
    k: Price,
    r: Rate,
    t: Time,
    option_type: OptionType,
) -> Result<MonteCarloEstimate> {
    let terms = ContractTerms::new(s0, k, t, r, option_type)?;
    mjd_methods::mc_european_price(paths, &terms)
}

/// Merton closed-form price summing `n_terms` Poisson terms.
pub fn price_closed_form(
    params: &ModelParameters,
    s0: Price,
    k: Price,
    r: Rate,
    t: Time,
    option_type: OptionType,
    n_terms: Size,
) -> Result<Price> {
    mjd_pricingengines::merton_price(params, s0, k, r, t, option_type, n_terms)
}

/// Fit `(σ, λ, μ_J, σ_J)` to observed call prices with the default
/// calibrator.
///
/// `observed_prices`, `strikes` and `maturities` are parallel sequences of
/// equal, non-zero length.
pub fn calibrate(
    observed_prices: &[Price],
    strikes: &[Price],
    maturities: &[Time],
    s0: Price,
    r: Rate,
    initial_guess: &ModelParameters,
) -> Result<CalibrationResult> {
    ensure!(
        !observed_prices.is_empty(),
        "calibration needs at least one observed price"
    );
    ensure!(
        observed_prices.len() == strikes.len() && strikes.len() == maturities.len(),
        "mismatched input lengths: {} prices, {} strikes, {} maturities",
        observed_prices.len(),
        strikes.len(),
        maturities.len()
    );
    let quotes = observed_prices
        .iter()
        .zip(strikes)
        .zip(maturities)
        .map(|((&price, &strike), &maturity)| MarketQuote::new(strike, maturity, price))
        .collect::<Result<Vec<_>>>()?;
    MertonCalibrator::new().calibrate(&quotes, s0, r, initial_guess)
}
