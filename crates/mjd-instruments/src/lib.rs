//! # mjd-instruments
//!
//! European option descriptions: the call/put flag, the vanilla payoff, and
//! the contract terms shared by every pricer.

#![warn(missing_docs)]
#![forbid(unsafe_code)]

/// European contract terms.
pub mod contract;

/// Option type and vanilla payoff.
pub mod payoff;

pub use contract::ContractTerms;
pub use payoff::{OptionType, PlainVanillaPayoff};
