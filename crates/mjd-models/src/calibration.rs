//! Least-squares calibration of Merton parameters to option prices.
//!
//! The loss is `Σ (model_i − observed_i)²`, with model prices from the
//! closed-form engine, minimized inside a box by projected BFGS.

use mjd_core::{
    ensure,
    errors::{Error, Result},
    Price, Rate, Real, Size, Time,
};
use mjd_instruments::{ContractTerms, OptionType};
use mjd_math::{Array, BoxConstraint, CostFunction, EndCriteria, EndCriteriaType, ProjectedBfgs};
use mjd_pricingengines::MertonClosedFormEngine;
use mjd_processes::ModelParameters;

const PARAMETER_NAMES: [&str; ModelParameters::DIMENSION] =
    ["sigma", "jump_intensity", "jump_mean", "jump_vol"];

// ── Market quotes ────────────────────────────────────────────────────────────

/// An observed European call price.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MarketQuote {
    /// Strike.
    pub strike: Price,
    /// Time to maturity in years.
    pub maturity: Time,
    /// Observed price.
    pub price: Price,
}

impl MarketQuote {
    /// Create a validated quote.
    pub fn new(strike: Price, maturity: Time, price: Price) -> Result<Self> {
        let q = Self {
            strike,
            maturity,
            price,
        };
        q.validate()?;
        Ok(q)
    }

    /// Check `strike > 0`, `maturity > 0`, finite price.
    pub fn validate(&self) -> Result<()> {
        ensure!(
            self.strike.is_finite() && self.strike > 0.0,
            "quote strike must be positive and finite, got {}",
            self.strike
        );
        ensure!(
            self.maturity.is_finite() && self.maturity > 0.0,
            "quote maturity must be positive and finite, got {}",
            self.maturity
        );
        ensure!(
            self.price.is_finite(),
            "quote price must be finite, got {}",
            self.price
        );
        Ok(())
    }
}

// ── Bounds ───────────────────────────────────────────────────────────────────

/// Box bounds on `(σ, λ, μ_J, σ_J)`.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationBounds {
    /// Lower bounds, in `[σ, λ, μ_J, σ_J]` order.
    pub lower: [Real; ModelParameters::DIMENSION],
    /// Upper bounds, in `[σ, λ, μ_J, σ_J]` order.
    pub upper: [Real; ModelParameters::DIMENSION],
}

impl Default for CalibrationBounds {
    /// `σ ∈ [0.01, 1]`, `λ ∈ [0, 5]`, `μ_J ∈ [−1, 1]`, `σ_J ∈ [0.01, 1]`.
    fn default() -> Self {
        Self {
            lower: [0.01, 0.0, -1.0, 0.01],
            upper: [1.0, 5.0, 1.0, 1.0],
        }
    }
}

impl CalibrationBounds {
    /// Create validated bounds.
    pub fn new(
        lower: [Real; ModelParameters::DIMENSION],
        upper: [Real; ModelParameters::DIMENSION],
    ) -> Result<Self> {
        let b = Self { lower, upper };
        b.validate()?;
        Ok(b)
    }

    /// Check that the box is non-empty and admits only valid parameters.
    pub fn validate(&self) -> Result<()> {
        for i in 0..ModelParameters::DIMENSION {
            let (lo, hi) = (self.lower[i], self.upper[i]);
            ensure!(
                lo.is_finite() && hi.is_finite() && lo <= hi,
                "invalid bounds [{lo}, {hi}] for {}",
                PARAMETER_NAMES[i]
            );
        }
        ensure!(self.lower[0] > 0.0, "sigma lower bound must be positive");
        ensure!(self.lower[1] >= 0.0, "jump intensity lower bound must be non-negative");
        ensure!(self.lower[3] > 0.0, "jump vol lower bound must be positive");
        Ok(())
    }

    fn to_box_constraint(self) -> Result<BoxConstraint> {
        self.validate()?;
        BoxConstraint::new(self.lower.to_vec(), self.upper.to_vec())
    }
}

// ── Result ───────────────────────────────────────────────────────────────────

/// Outcome of a calibration.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CalibrationResult {
    /// Fitted parameters.
    pub parameters: ModelParameters,
    /// Sum of squared pricing errors at `parameters`.
    pub loss: Real,
    /// Whether the optimizer met a convergence criterion.
    pub converged: bool,
    /// Optimizer iterations performed.
    pub iterations: Size,
    /// Why the optimizer stopped.
    pub end_type: EndCriteriaType,
    /// Model minus observed price, per quote.
    pub residuals: Vec<Real>,
}

impl CalibrationResult {
    /// Turn a non-converged result into [`Error::ConvergenceFailure`].
    pub fn ensure_converged(self) -> Result<Self> {
        if self.converged {
            Ok(self)
        } else {
            Err(Error::ConvergenceFailure {
                iterations: self.iterations,
                loss: self.loss,
            })
        }
    }
}

// ── Cost function ────────────────────────────────────────────────────────────

struct PricingErrors<'a> {
    quotes: &'a [MarketQuote],
    spot: Price,
    rate: Rate,
    engine: MertonClosedFormEngine,
}

impl CostFunction for PricingErrors<'_> {
    fn values(&self, x: &Array) -> Result<Array> {
        let params = ModelParameters::from_array(x)?;
        let residuals = self
            .quotes
            .iter()
            .map(|q| -> Result<Real> {
                let terms = ContractTerms {
                    spot: self.spot,
                    strike: q.strike,
                    maturity: q.maturity,
                    rate: self.rate,
                    option_type: OptionType::Call,
                };
                Ok(self.engine.price(&params, &terms)? - q.price)
            })
            .collect::<Result<Vec<Real>>>()?;
        Ok(Array::from_vec(residuals))
    }
}

// ── Calibrator ───────────────────────────────────────────────────────────────

/// Fits Merton parameters to European call prices.
///
/// The fit is a local optimum reachable from the initial guess; running
/// several starts is left to the caller. Non-convergence is reported in
/// [`CalibrationResult::converged`], not as an error.
#[derive(Debug, Clone, PartialEq)]
pub struct MertonCalibrator {
    bounds: CalibrationBounds,
    end_criteria: EndCriteria,
    engine: MertonClosedFormEngine,
}

impl Default for MertonCalibrator {
    fn default() -> Self {
        Self {
            bounds: CalibrationBounds::default(),
            end_criteria: EndCriteria::default(),
            engine: MertonClosedFormEngine::default(),
        }
    }
}

impl MertonCalibrator {
    /// Calibrator with default bounds, end criteria and `n_terms = 200`.
    pub fn new() -> Self {
        Self::default()
    }

    /// Use different parameter bounds.
    pub fn with_bounds(self, bounds: CalibrationBounds) -> Result<Self> {
        bounds.validate()?;
        Ok(Self { bounds, ..self })
    }

    /// Use different stopping criteria.
    pub fn with_end_criteria(self, end_criteria: EndCriteria) -> Self {
        Self {
            end_criteria,
            ..self
        }
    }

    /// Use a different Poisson truncation for model prices.
    pub fn with_n_terms(self, n_terms: Size) -> Result<Self> {
        Ok(Self {
            engine: MertonClosedFormEngine::new(n_terms)?,
            ..self
        })
    }

    /// Parameter bounds.
    pub fn bounds(&self) -> &CalibrationBounds {
        &self.bounds
    }

    /// Stopping criteria.
    pub fn end_criteria(&self) -> &EndCriteria {
        &self.end_criteria
    }

    /// Poisson truncation used for model prices.
    pub fn n_terms(&self) -> Size {
        self.engine.n_terms()
    }

    /// Calibrate to `quotes` from `initial_guess`.
    ///
    /// A guess outside the bounds is clipped into them.
    pub fn calibrate(
        &self,
        quotes: &[MarketQuote],
        spot: Price,
        rate: Rate,
        initial_guess: &ModelParameters,
    ) -> Result<CalibrationResult> {
        ensure!(!quotes.is_empty(), "calibration needs at least one quote");
        ensure!(
            spot.is_finite() && spot > 0.0,
            "spot must be positive and finite, got {spot}"
        );
        ensure!(rate.is_finite(), "rate must be finite, got {rate}");
        for q in quotes {
            q.validate()?;
        }
        let guess = initial_guess.to_array();
        ensure!(
            guess.is_finite(),
            "initial guess must be finite, got {guess}"
        );

        let bounds = self.bounds.to_box_constraint()?;
        let start = bounds.project(&guess);
        for i in 0..ModelParameters::DIMENSION {
            if start[i] != guess[i] {
                tracing::warn!(
                    parameter = PARAMETER_NAMES[i],
                    guess = guess[i],
                    clipped = start[i],
                    "initial guess outside calibration bounds; clipped"
                );
            }
        }

        let cost = PricingErrors {
            quotes,
            spot,
            rate,
            engine: self.engine,
        };
        tracing::debug!(
            n_quotes = quotes.len(),
            n_terms = self.engine.n_terms(),
            start = %start,
            "starting Merton calibration"
        );
        let outcome = ProjectedBfgs::new().minimize(&cost, &bounds, &start, &self.end_criteria)?;

        let parameters = ModelParameters::from_array(&outcome.x)?;
        let residuals = cost.values(&outcome.x)?.as_slice().to_vec();
        let converged = outcome.converged();
        if converged {
            tracing::debug!(
                loss = outcome.value,
                iterations = outcome.iterations,
                end_type = ?outcome.end_type,
                "calibration converged"
            );
        } else {
            tracing::warn!(
                loss = outcome.value,
                iterations = outcome.iterations,
                end_type = ?outcome.end_type,
                "calibration stopped without converging"
            );
        }

        Ok(CalibrationResult {
            parameters,
            loss: outcome.value,
            converged,
            iterations: outcome.iterations,
            end_type: outcome.end_type,
            residuals,
        })
    }
}
