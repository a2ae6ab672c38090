//! Error types for mertonjd.
//!
//! Every fallible operation in the workspace returns [`Result`]. Input
//! validation goes through the [`ensure!`](crate::ensure) macro, guards on
//! non-finite intermediates through [`ensure_finite!`](crate::ensure_finite),
//! and internal failures through [`fail!`](crate::fail).

use thiserror::Error;

/// The top-level error type used throughout mertonjd.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum Error {
    /// Malformed input: unsupported option type, non-positive time or
    /// volatility, mismatched sequence lengths, ...
    #[error("invalid argument: {0}")]
    InvalidArgument(String),

    /// A computation would have produced a non-finite value (division by a
    /// zero `sqrt(T)`, log of a non-positive number, overflow).
    #[error("numerical instability: {0}")]
    NumericalInstability(String),

    /// A bracketed root search found no sign change over `[lower, upper]`.
    #[error("no root bracketed in [{lower}, {upper}] for target value {target}")]
    RootNotBracketed {
        /// The value the objective was solved for (e.g. an observed price).
        target: f64,
        /// Lower end of the bracket.
        lower: f64,
        /// Upper end of the bracket.
        upper: f64,
    },

    /// An optimizer stopped without meeting its convergence criteria.
    #[error("optimizer did not converge after {iterations} iterations (loss = {loss})")]
    ConvergenceFailure {
        /// Iterations performed.
        iterations: usize,
        /// Objective value at the last iterate.
        loss: f64,
    },

    /// Internal failure, e.g. an exhausted iteration limit.
    #[error("{0}")]
    Runtime(String),
}

/// Shorthand `Result` type used throughout mertonjd.
pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Returns `Err(Error::InvalidArgument(...))` if `$cond` is false.
///
/// # Example
/// ```
/// use mjd_core::{ensure, errors::Error};
/// fn positive(x: f64) -> mjd_core::errors::Result<f64> {
///     ensure!(x > 0.0, "x must be positive, got {x}");
///     Ok(x)
/// }
/// assert!(positive(1.0).is_ok());
/// assert!(matches!(positive(-1.0), Err(Error::InvalidArgument(_))));
/// ```
#[macro_export]
macro_rules! ensure {
    ($cond:expr, $($msg:tt)*) => {
        if !$cond {
            return Err($crate::errors::Error::InvalidArgument(
                format!($($msg)*)
            ));
        }
    };
}

/// Returns `Err(Error::NumericalInstability(...))` if `$value` is NaN or
/// infinite.
///
/// # Example
/// ```
/// use mjd_core::{ensure_finite, errors::Error};
/// fn inverse(x: f64) -> mjd_core::errors::Result<f64> {
///     let y = 1.0 / x;
///     ensure_finite!(y, "1/x for x = {x}");
///     Ok(y)
/// }
/// assert!(inverse(2.0).is_ok());
/// assert!(matches!(inverse(0.0), Err(Error::NumericalInstability(_))));
/// ```
#[macro_export]
macro_rules! ensure_finite {
    ($value:expr, $($msg:tt)*) => {
        if !$value.is_finite() {
            return Err($crate::errors::Error::NumericalInstability(
                format!("{} is not finite ({})", format!($($msg)*), $value)
            ));
        }
    };
}

/// Returns `Err(Error::Runtime(...))` immediately.
///
/// # Example
/// ```
/// use mjd_core::{fail, errors::Error};
/// fn always_err() -> mjd_core::errors::Result<()> {
///     fail!("something went wrong");
/// }
/// assert!(always_err().is_err());
/// ```
#[macro_export]
macro_rules! fail {
    ($($msg:tt)*) => {
        return Err($crate::errors::Error::Runtime(format!($($msg)*)))
    };
}
