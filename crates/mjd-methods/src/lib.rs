//! # mjd-methods
//!
//! Monte Carlo machinery for the Merton jump-diffusion model: uniform time
//! grids, seeded path simulation, and the European path pricer.
//!
//! # Modules
//!
//! * [`time_grid`]: evenly spaced time points over `[0, T]`
//! * [`monte_carlo`]: path generation, path sets, and the MC estimator

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// Uniform time grids.
pub mod time_grid;

/// Monte Carlo simulation: path generation, pricing, statistics.
pub mod monte_carlo;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use monte_carlo::{
    mc_european_price, simulate_paths, EuropeanPathPricer, MonteCarloEstimate, Path, PathGenerator,
    PathPricer, PathSet,
};
pub use time_grid::TimeGrid;
