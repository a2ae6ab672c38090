//! Terms of a European option contract.

use crate::payoff::{OptionType, PlainVanillaPayoff};
use mjd_core::{ensure, errors::Result, DiscountFactor, Price, Rate, Time};

/// Spot, strike, maturity, risk-free rate and call/put flag.
///
/// Invariants: `spot > 0`, `strike > 0`, `maturity > 0`, all finite.
/// Fields are public; pricers call [`ContractTerms::validate`] on entry.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct ContractTerms {
    /// Current underlying price `S0`.
    pub spot: Price,
    /// Strike `K`.
    pub strike: Price,
    /// Time to maturity `T` in years.
    pub maturity: Time,
    /// Continuously-compounded risk-free rate `r`.
    pub rate: Rate,
    /// Call or put.
    pub option_type: OptionType,
}

impl ContractTerms {
    /// Create validated contract terms.
    pub fn new(
        spot: Price,
        strike: Price,
        maturity: Time,
        rate: Rate,
        option_type: OptionType,
    ) -> Result<Self> {
        let terms = Self {
            spot,
            strike,
            maturity,
            rate,
            option_type,
        };
        terms.validate()?;
        Ok(terms)
    }

    /// Check the invariants.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.spot.is_finite() && self.spot > 0.0,
            "spot must be positive and finite, got {}",
            self.spot
        );
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "strike must be positive and finite, got {}",
            self.strike
        );
        ensure!(
            self.maturity.is_finite() && self.maturity > 0.0,
            "maturity must be positive and finite, got {}",
            self.maturity
        );
        ensure!(
            self.rate.is_finite(),
            "rate must be finite, got {}",
            self.rate
        );
        Ok(())
    }

    /// Discount factor `exp(−rT)`.
    pub fn discount(&self) -> DiscountFactor {
        (-self.rate * self.maturity).exp()
    }

    /// The terminal payoff of this contract.
    pub fn payoff(&self) -> PlainVanillaPayoff {
        PlainVanillaPayoff::new(self.option_type, self.strike)
    }
}
