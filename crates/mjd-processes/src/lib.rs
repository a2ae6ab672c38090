//! # mjd-processes
//!
//! The Merton (1976) jump-diffusion model: its four parameters and the
//! risk-neutral dynamics used by the path simulator.
//!
//! ```text
//! dS/S = (r − λ·k) dt + σ dW + (J − 1) dN,   ln J ~ N(μ_J, σ_J²)
//! ```

#![warn(missing_docs)]
#![forbid(unsafe_code)]

pub mod merton_process;
pub mod model_parameters;

pub use merton_process::MertonJumpDiffusionProcess;
pub use model_parameters::ModelParameters;
