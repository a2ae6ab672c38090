//! # mjd-models
//!
//! Calibration of the Merton jump-diffusion model to observed European
//! option prices.
//!
//! [`MertonCalibrator`] fits `(σ, λ, μ_J, σ_J)` by bounded least squares on
//! closed-form prices. The fit is local: it depends on the initial guess.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod calibration;

pub use calibration::{CalibrationBounds, CalibrationResult, MarketQuote, MertonCalibrator};
