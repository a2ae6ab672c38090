//! # mjd-pricingengines
//!
//! Closed-form pricing for European options.
//!
//! ## Engines
//!
//! - [`black_scholes_price`]: Black–Scholes formula for the diffusion-only model
//! - [`MertonClosedFormEngine`]: Merton (1976) price as a truncated Poisson
//!   mixture of Black–Scholes prices, with truncation diagnostics
//! - [`ImpliedVolatilitySolver`]: Black–Scholes inversion by Brent's method

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod black_scholes;
pub mod implied_volatility;
pub mod merton_closed_form;

pub use black_scholes::black_scholes_price;
pub use implied_volatility::{
    implied_volatility, ImpliedVolatilitySolver, DEFAULT_VOL_LOWER, DEFAULT_VOL_UPPER,
};
pub use merton_closed_form::{
    merton_price, required_terms, truncation_tail_mass, MertonClosedFormEngine, DEFAULT_N_TERMS,
};
