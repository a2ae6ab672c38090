//! End-to-end checks of the pricing entry points.
//!
//! Monte Carlo against the closed form, Black–Scholes degeneracy, put–call
//! parity, truncation convergence, and implied-volatility inversion.

use approx::assert_relative_eq;
use mertonjd::pricingengines::{black_scholes_price, required_terms, truncation_tail_mass};
use mertonjd::{
    implied_volatility, monte_carlo_estimate, price_closed_form, price_monte_carlo, simulate,
    Error, ModelParameters, OptionType, DEFAULT_N_TERMS, DEFAULT_VOL_LOWER, DEFAULT_VOL_UPPER,
};
use proptest::prelude::*;

fn jumpy() -> ModelParameters {
    ModelParameters::new(0.2, 0.8, -0.1, 0.15).unwrap()
}

// ───────────────────────── Monte Carlo vs closed form ─────────────────────────

#[test]
fn monte_carlo_agrees_with_closed_form() {
    let params = jumpy();
    let paths = simulate(&params, 100.0, 0.05, 1.0, 10, 100_000, Some(20240601)).unwrap();
    for (k, option_type) in [
        (100.0, OptionType::Call),
        (90.0, OptionType::Put),
        (110.0, OptionType::Call),
    ] {
        let est = monte_carlo_estimate(&paths, 100.0, k, 0.05, 1.0, option_type).unwrap();
        let exact =
            price_closed_form(&params, 100.0, k, 0.05, 1.0, option_type, DEFAULT_N_TERMS).unwrap();
        assert_eq!(est.samples, 100_000);
        assert!(
            (est.price - exact).abs() < 3.0 * est.std_error,
            "{option_type} K={k}: MC {} ± {} vs closed form {exact}",
            est.price,
            est.std_error
        );
    }
}

#[test]
fn monte_carlo_entry_point_returns_the_mean() {
    let paths = simulate(&jumpy(), 100.0, 0.03, 0.5, 4, 1_000, Some(3)).unwrap();
    let price = price_monte_carlo(&paths, 100.0, 100.0, 0.03, 0.5, OptionType::Put).unwrap();
    let est = monte_carlo_estimate(&paths, 100.0, 100.0, 0.03, 0.5, OptionType::Put).unwrap();
    assert_eq!(price, est.price);
}

#[test]
fn monte_carlo_rejects_mismatched_maturity() {
    let paths = simulate(&jumpy(), 100.0, 0.05, 1.0, 4, 100, Some(1)).unwrap();
    assert!(matches!(
        price_monte_carlo(&paths, 100.0, 100.0, 0.05, 2.0, OptionType::Call),
        Err(Error::InvalidArgument(_))
    ));
}

// ───────────────────────── Closed form ─────────────────────────

#[test]
fn reference_scenario_matches_black_scholes() {
    let params = ModelParameters::new(0.2, 0.0, 0.0, 0.01).unwrap();
    let merton =
        price_closed_form(&params, 100.0, 100.0, 0.05, 1.0, OptionType::Call, DEFAULT_N_TERMS)
            .unwrap();
    let bs = black_scholes_price(OptionType::Call, 100.0, 100.0, 0.05, 1.0, 0.2).unwrap();
    assert_relative_eq!(merton, bs, max_relative = 1e-6);
}

#[test]
fn more_terms_change_the_price_less_and_less() {
    let price = |n| {
        price_closed_form(&jumpy(), 100.0, 95.0, 0.05, 1.0, OptionType::Call, n).unwrap()
    };
    let mut last_change = f64::INFINITY;
    for n in 1..8 {
        let change = (price(n + 1) - price(n)).abs();
        assert!(change < last_change, "n = {n}: {change} >= {last_change}");
        last_change = change;
    }
    let n = required_terms(&jumpy(), 1.0, 1e-14).unwrap();
    assert!(truncation_tail_mass(&jumpy(), 1.0, n).unwrap() < 1e-14);
    assert!((price(n) - price(DEFAULT_N_TERMS)).abs() < 1e-10);
}

#[test]
fn zero_maturity_is_numerical_instability() {
    assert!(matches!(
        price_closed_form(&jumpy(), 100.0, 100.0, 0.05, 0.0, OptionType::Put, DEFAULT_N_TERMS),
        Err(Error::NumericalInstability(_))
    ));
}

// ───────────────────────── Implied volatility ─────────────────────────

#[test]
fn implied_vol_of_merton_price_exceeds_diffusion_vol() {
    // Jumps fatten the tails, so OTM puts imply more than σ.
    let price =
        price_closed_form(&jumpy(), 100.0, 85.0, 0.05, 1.0, OptionType::Put, DEFAULT_N_TERMS)
            .unwrap();
    let iv = implied_volatility(
        price,
        100.0,
        85.0,
        0.05,
        1.0,
        OptionType::Put,
        DEFAULT_VOL_LOWER,
        DEFAULT_VOL_UPPER,
    )
    .unwrap();
    assert!(iv > 0.2, "iv = {iv}");
}

#[test]
fn unreachable_price_is_not_bracketed() {
    let result = implied_volatility(
        0.0001,
        100.0,
        50.0,
        0.05,
        1.0,
        OptionType::Call,
        DEFAULT_VOL_LOWER,
        DEFAULT_VOL_UPPER,
    );
    match result {
        Err(Error::RootNotBracketed { target, .. }) => assert_eq!(target, 0.0001),
        other => panic!("expected RootNotBracketed, got {other:?}"),
    }
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn closed_form_put_call_parity(
        lam in 0.0f64..2.0,
        mu_j in -0.4f64..0.2,
        sigma_j in 0.05f64..0.4,
        k in 80.0f64..120.0,
        t in 0.25f64..2.0,
    ) {
        let p = ModelParameters::new(0.25, lam, mu_j, sigma_j).unwrap();
        let c = price_closed_form(&p, 100.0, k, 0.04, t, OptionType::Call, DEFAULT_N_TERMS).unwrap();
        let put = price_closed_form(&p, 100.0, k, 0.04, t, OptionType::Put, DEFAULT_N_TERMS).unwrap();
        let parity = 100.0 - k * (-0.04 * t).exp();
        prop_assert!((c - put - parity).abs() < 1e-8);
    }

    #[test]
    fn implied_vol_round_trip(sigma in 0.1f64..0.9, k in 85.0f64..115.0) {
        let price = black_scholes_price(OptionType::Call, 100.0, k, 0.02, 1.0, sigma).unwrap();
        let iv = implied_volatility(
            price, 100.0, k, 0.02, 1.0, OptionType::Call, DEFAULT_VOL_LOWER, DEFAULT_VOL_UPPER,
        ).unwrap();
        prop_assert!((iv - sigma).abs() < 1e-6);
    }
}
