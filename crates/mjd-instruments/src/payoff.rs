//! Option type and the plain vanilla payoff.

use mjd_core::{errors::Error, Real};
use std::fmt;
use std::str::FromStr;

/// Option type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OptionType {
    /// A call option (right to buy).
    Call,
    /// A put option (right to sell).
    Put,
}

impl OptionType {
    /// +1 for Call, −1 for Put.
    pub fn sign(self) -> Real {
        match self {
            OptionType::Call => 1.0,
            OptionType::Put => -1.0,
        }
    }
}

impl fmt::Display for OptionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OptionType::Call => write!(f, "call"),
            OptionType::Put => write!(f, "put"),
        }
    }
}

impl FromStr for OptionType {
    type Err = Error;

    /// Parse `"call"` or `"put"`, ignoring case and surrounding whitespace.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "call" => Ok(OptionType::Call),
            "put" => Ok(OptionType::Put),
            _ => Err(Error::InvalidArgument(format!(
                "unsupported option type {s:?}, expected \"call\" or \"put\""
            ))),
        }
    }
}

/// Standard European payoff `max(φ(S − K), 0)`, `φ = +1` for Call, `−1`
/// for Put.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct PlainVanillaPayoff {
    /// Option type.
    pub option_type: OptionType,
    /// Strike price.
    pub strike: Real,
}

impl PlainVanillaPayoff {
    /// Create a new plain vanilla payoff.
    pub fn new(option_type: OptionType, strike: Real) -> Self {
        Self {
            option_type,
            strike,
        }
    }

    /// Payoff at the given terminal price.
    pub fn value(&self, price: Real) -> Real {
        (self.option_type.sign() * (price - self.strike)).max(0.0)
    }
}

impl fmt::Display for PlainVanillaPayoff {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "vanilla {} @ {}", self.option_type, self.strike)
    }
}
