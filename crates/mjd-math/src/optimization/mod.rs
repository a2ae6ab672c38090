//! Optimization framework.
//!
//! Provides the cost-function trait, box constraints, end criteria, and the
//! bounded quasi-Newton optimizer used for model calibration.

pub mod bfgs;

pub use bfgs::ProjectedBfgs;

use crate::array::Array;
use mjd_core::{ensure, errors::Result, Real};

// ── Cost function trait ───────────────────────────────────────────────────────

/// A least-squares cost function.
pub trait CostFunction {
    /// Evaluate the residual vector at `x`.
    fn values(&self, x: &Array) -> Result<Array>;

    /// Return the scalar cost `Σ r²(x)`.
    fn value(&self, x: &Array) -> Result<Real> {
        Ok(self.values(x)?.norm_squared())
    }
}

// ── Box constraint ────────────────────────────────────────────────────────────

/// Independent lower/upper bounds on each coordinate.
#[derive(Debug, Clone, PartialEq)]
pub struct BoxConstraint {
    lower: Vec<Real>,
    upper: Vec<Real>,
}

impl BoxConstraint {
    /// Create a box from per-coordinate bounds.
    ///
    /// Both vectors must have the same length, be finite, and satisfy
    /// `lower[i] <= upper[i]`.
    pub fn new(lower: Vec<Real>, upper: Vec<Real>) -> Result<Self> {
        ensure!(
            lower.len() == upper.len(),
            "bounds have different lengths ({} lower, {} upper)",
            lower.len(),
            upper.len()
        );
        for (i, (lo, hi)) in lower.iter().zip(&upper).enumerate() {
            ensure!(
                lo.is_finite() && hi.is_finite() && lo <= hi,
                "invalid bounds [{lo}, {hi}] for coordinate {i}"
            );
        }
        Ok(Self { lower, upper })
    }

    /// Number of constrained coordinates.
    pub fn dimension(&self) -> usize {
        self.lower.len()
    }

    /// Lower bounds.
    pub fn lower(&self) -> &[Real] {
        &self.lower
    }

    /// Upper bounds.
    pub fn upper(&self) -> &[Real] {
        &self.upper
    }

    /// Return `true` if `x` lies inside the box.
    pub fn test(&self, x: &Array) -> bool {
        x.size() == self.dimension()
            && x
                .iter()
                .zip(self.lower.iter().zip(&self.upper))
                .all(|(&v, (&lo, &hi))| v >= lo && v <= hi)
    }

    /// Clip `x` coordinate-wise into the box.
    pub fn project(&self, x: &Array) -> Array {
        Array::from_vec(
            x.iter()
                .zip(self.lower.iter().zip(&self.upper))
                .map(|(&v, (&lo, &hi))| v.clamp(lo, hi))
                .collect(),
        )
    }
}

// ── End criteria ──────────────────────────────────────────────────────────────

/// Criteria to stop an optimization.
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EndCriteria {
    /// Maximum number of iterations.
    pub max_iterations: usize,
    /// Consecutive iterations with a negligible cost change before stopping.
    pub max_stationary_state_iterations: usize,
    /// Stop when the cost drops below this.
    pub root_epsilon: Real,
    /// Relative cost change, `|Δf| / max(|f|, 1)`, treated as negligible.
    pub function_epsilon: Real,
    /// Stop when the projected-gradient norm drops below this.
    pub gradient_norm_epsilon: Real,
}

impl EndCriteria {
    /// Create new end criteria.
    pub fn new(
        max_iterations: usize,
        max_stationary_state_iterations: usize,
        root_epsilon: Real,
        function_epsilon: Real,
        gradient_norm_epsilon: Real,
    ) -> Self {
        Self {
            max_iterations,
            max_stationary_state_iterations,
            root_epsilon,
            function_epsilon,
            gradient_norm_epsilon,
        }
    }
}

impl Default for EndCriteria {
    fn default() -> Self {
        Self {
            max_iterations: 1000,
            max_stationary_state_iterations: 10,
            root_epsilon: 1e-16,
            function_epsilon: 1e-14,
            gradient_norm_epsilon: 1e-10,
        }
    }
}

/// The reason an optimization terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndCriteriaType {
    /// Maximum iterations reached.
    MaxIterations,
    /// Cost below root epsilon.
    RootEpsilon,
    /// Cost change below function epsilon for too many iterations.
    StationaryPoint,
    /// Projected-gradient norm below gradient norm epsilon.
    GradientNormEpsilon,
    /// No step along the search direction decreased the cost.
    LineSearchFailure,
}

impl EndCriteriaType {
    /// Whether this termination reason counts as convergence.
    pub fn is_converged(self) -> bool {
        matches!(
            self,
            EndCriteriaType::RootEpsilon
                | EndCriteriaType::StationaryPoint
                | EndCriteriaType::GradientNormEpsilon
        )
    }
}

/// Result of an optimization.
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Final parameter values.
    pub x: Array,
    /// Final cost value.
    pub value: Real,
    /// Number of iterations performed.
    pub iterations: usize,
    /// Reason for termination.
    pub end_type: EndCriteriaType,
}

impl OptimizationResult {
    /// Whether the optimizer reports convergence.
    pub fn converged(&self) -> bool {
        self.end_type.is_converged()
    }
}
