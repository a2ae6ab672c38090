//! Probability distributions used by the pricers and the simulator.
//!
//! Provides the standard normal CDF, the Poisson jump-count distribution
//! (evaluated in log-space), and the log-factorial,
//! delegating to the `statrs` crate for the special functions.

pub mod gamma;
pub mod normal;
pub mod poisson;

pub use gamma::ln_factorial;
pub use normal::normal_cdf;
pub use poisson::PoissonDistribution;
