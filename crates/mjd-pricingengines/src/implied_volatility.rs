//! Black–Scholes implied volatility by Brent's method.

use crate::black_scholes::black_scholes_unchecked;
use mjd_core::{
    ensure,
    errors::{Error, Result},
    Price, Rate, Real, Time, Volatility,
};
use mjd_instruments::{ContractTerms, OptionType};
use mjd_math::brent;

/// Default lower end of the volatility bracket.
pub const DEFAULT_VOL_LOWER: Volatility = 1e-6;
/// Default upper end of the volatility bracket.
pub const DEFAULT_VOL_UPPER: Volatility = 5.0;
const DEFAULT_ACCURACY: Real = 1e-12;

/// Finds `σ ∈ [vol_lower, vol_upper]` with `BS(σ) = price`.
///
/// The Black–Scholes price must change sign against the target across the
/// bracket; otherwise the solve fails with [`Error::RootNotBracketed`]
/// rather than returning a boundary value. A zero price is never reached by
/// any `σ > 0` and fails the same way.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpliedVolatilitySolver {
    vol_lower: Volatility,
    vol_upper: Volatility,
    accuracy: Real,
}

impl Default for ImpliedVolatilitySolver {
    fn default() -> Self {
        Self {
            vol_lower: DEFAULT_VOL_LOWER,
            vol_upper: DEFAULT_VOL_UPPER,
            accuracy: DEFAULT_ACCURACY,
        }
    }
}

impl ImpliedVolatilitySolver {
    /// Solver with the default bracket `[1e-6, 5]` and accuracy `1e-12`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a different volatility bracket.
    pub fn with_bracket(self, vol_lower: Volatility, vol_upper: Volatility) -> Result<Self> {
        ensure!(
            vol_lower.is_finite() && vol_upper.is_finite() && 0.0 < vol_lower && vol_lower < vol_upper,
            "volatility bracket must satisfy 0 < lower < upper, got [{vol_lower}, {vol_upper}]"
        );
        Ok(Self {
            vol_lower,
            vol_upper,
            ..self
        })
    }

    /// Use a different absolute accuracy on σ.
    pub fn with_accuracy(self, accuracy: Real) -> Result<Self> {
        ensure!(
            accuracy.is_finite() && accuracy > 0.0,
            "accuracy must be positive and finite, got {accuracy}"
        );
        Ok(Self { accuracy, ..self })
    }

    /// Bracket `(lower, upper)`.
    pub fn bracket(&self) -> (Volatility, Volatility) {
        (self.vol_lower, self.vol_upper)
    }

    /// Absolute accuracy on σ.
    pub fn accuracy(&self) -> Real {
        self.accuracy
    }

    /// Implied volatility of `price` for the given contract.
    pub fn solve(&self, price: Price, terms: &ContractTerms) -> Result<Volatility> {
        terms.validate()?;
        ensure!(
            price.is_finite() && price >= 0.0,
            "option price must be non-negative and finite, got {price}"
        );
        if price == 0.0 {
            return Err(Error::RootNotBracketed {
                target: price,
                lower: self.vol_lower,
                upper: self.vol_upper,
            });
        }
        let objective = |sigma: Real| {
            black_scholes_unchecked(
                terms.option_type,
                terms.spot,
                terms.strike,
                terms.rate,
                terms.maturity,
                sigma,
            ) - price
        };
        brent(objective, self.vol_lower, self.vol_upper, self.accuracy).map_err(|e| match e {
            Error::RootNotBracketed { lower, upper, .. } => Error::RootNotBracketed {
                target: price,
                lower,
                upper,
            },
            other => other,
        })
    }
}

/// Black–Scholes implied volatility of `price` over `[vol_lower, vol_upper]`.
#[allow(clippy::too_many_arguments)]
pub fn implied_volatility(
    price: Price,
    spot: Price,
    strike: Price,
    rate: Rate,
    maturity: Time,
    option_type: OptionType,
    vol_lower: Volatility,
    vol_upper: Volatility,
) -> Result<Volatility> {
    let terms = ContractTerms::new(spot, strike, maturity, rate, option_type)?;
    ImpliedVolatilitySolver::new()
        .with_bracket(vol_lower, vol_upper)?
        .solve(price, &terms)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::black_scholes::black_scholes_price;
    use approx::assert_abs_diff_eq;
    use proptest::prelude::*;

    #[test]
    fn recovers_atm_volatility() {
        let price = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 1.0, 0.2).unwrap();
        let iv = implied_volatility(
            price,
            100.0,
            100.0,
            0.05,
            1.0,
            OptionType::Call,
            DEFAULT_VOL_LOWER,
            DEFAULT_VOL_UPPER,
        )
        .unwrap();
        assert_abs_diff_eq!(iv, 0.2, epsilon = 1e-9);
    }

    #[test]
    fn price_above_spot_is_not_bracketed() {
        match implied_volatility(
            150.0,
            100.0,
            100.0,
            0.05,
            1.0,
            OptionType::Call,
            DEFAULT_VOL_LOWER,
            DEFAULT_VOL_UPPER,
        ) {
            Err(Error::RootNotBracketed {
                target,
                lower,
                upper,
            }) => {
                assert_eq!(target, 150.0);
                assert_eq!((lower, upper), (DEFAULT_VOL_LOWER, DEFAULT_VOL_UPPER));
            }
            other => panic!("expected RootNotBracketed, got {other:?}"),
        }
    }

    #[test]
    fn price_below_intrinsic_is_not_bracketed() {
        // Forward intrinsic of an ITM call is 100 − 80·e^{−0.05} ≈ 23.9.
        let result = implied_volatility(
            10.0,
            100.0,
            80.0,
            0.05,
            1.0,
            OptionType::Call,
            DEFAULT_VOL_LOWER,
            DEFAULT_VOL_UPPER,
        );
        assert!(matches!(result, Err(Error::RootNotBracketed { .. })), "{result:?}");
    }

    #[test]
    fn zero_price_is_not_bracketed() {
        // Far OTM: BS(1e-6) underflows to exactly zero.
        for (k, option_type) in [(200.0, OptionType::Call), (100.0, OptionType::Put)] {
            let result = implied_volatility(
                0.0,
                100.0,
                k,
                0.05,
                1.0,
                option_type,
                DEFAULT_VOL_LOWER,
                DEFAULT_VOL_UPPER,
            );
            assert!(
                matches!(result, Err(Error::RootNotBracketed { target, .. }) if target == 0.0),
                "{result:?}"
            );
        }
    }

    #[test]
    fn narrow_bracket_excluding_root_fails() {
        let price = black_scholes_price(OptionType::Put, 100.0, 100.0, 0.02, 1.0, 0.3).unwrap();
        let result =
            implied_volatility(price, 100.0, 100.0, 0.02, 1.0, OptionType::Put, 0.5, 1.0);
        assert!(matches!(result, Err(Error::RootNotBracketed { .. })));
    }

    #[test]
    fn invalid_inputs_rejected() {
        let solver = ImpliedVolatilitySolver::new();
        assert!(solver.with_bracket(0.0, 1.0).is_err());
        assert!(solver.with_bracket(1.0, 0.5).is_err());
        assert!(solver.with_accuracy(0.0).is_err());
        let terms = ContractTerms::new(100.0, 100.0, 1.0, 0.05, OptionType::Call).unwrap();
        assert!(matches!(
            solver.solve(f64::NAN, &terms),
            Err(Error::InvalidArgument(_))
        ));
        assert!(matches!(
            solver.solve(-1.0, &terms),
            Err(Error::InvalidArgument(_))
        ));
    }

    #[test]
    fn solver_configuration() {
        let solver = ImpliedVolatilitySolver::default()
            .with_bracket(0.01, 2.0)
            .unwrap()
            .with_accuracy(1e-10)
            .unwrap();
        assert_eq!(solver.bracket(), (0.01, 2.0));
        assert_eq!(solver.accuracy(), 1e-10);
    }

    proptest! {
        #[test]
        fn implied_vol_round_trip(
            sigma in 0.1f64..0.8,
            k in 90.0f64..110.0,
            t in 0.5f64..2.0,
            r in 0.0f64..0.05,
            is_call in any::<bool>(),
        ) {
            let option_type = if is_call { OptionType::Call } else { OptionType::Put };
            let price = black_scholes_price(option_type, 100.0, k, r, t, sigma).unwrap();
            let iv = implied_volatility(
                price, 100.0, k, r, t, option_type, DEFAULT_VOL_LOWER, DEFAULT_VOL_UPPER,
            ).unwrap();
            prop_assert!((iv - sigma).abs() < 1e-6, "sigma = {}, iv = {}", sigma, iv);
        }
    }
}
