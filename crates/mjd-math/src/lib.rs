//! # mjd-math
//!
//! Mathematical utilities for mertonjd: an `Array` newtype over nalgebra,
//! distributions (via statrs), Brent root finding, a bounded quasi-Newton
//! optimizer, running statistics, and seedable random number generation.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

// ── Modules ───────────────────────────────────────────────────────────────────

/// One-dimensional real arrays.
pub mod array;

/// Probability distributions.
pub mod distributions;

/// Cost functions, box constraints, and the projected BFGS optimizer.
pub mod optimization;

/// Seedable random number generators.
pub mod random_numbers;

/// 1D root-finding solvers.
pub mod solvers1d;

/// Statistics accumulators.
pub mod statistics;

// ── Convenience re-exports ────────────────────────────────────────────────────

pub use array::Array;
pub use distributions::{ln_factorial, normal_cdf, PoissonDistribution};
pub use optimization::{
    BoxConstraint, CostFunction, EndCriteria, EndCriteriaType, OptimizationResult, ProjectedBfgs,
};
pub use random_numbers::{JumpCountSampler, SimulationRng};
pub use solvers1d::brent;
pub use statistics::Statistics;
