//! Projected BFGS optimizer for box-constrained problems.
//!
//! BFGS with an active-set treatment of simple bounds: coordinates pinned
//! at a bound whose gradient pushes outward are frozen for the step, the
//! remaining ones follow the quasi-Newton direction, and every trial point
//! is projected back into the box before the Armijo test.

use crate::array::Array;
use crate::optimization::{
    BoxConstraint, CostFunction, EndCriteria, EndCriteriaType, OptimizationResult,
};
use mjd_core::{ensure, ensure_finite, errors::Result, Real};

const ARMIJO_C1: Real = 1e-4;
const MAX_BACKTRACKS: usize = 50;
const FD_RELATIVE_STEP: Real = 1e-6;

/// Projected BFGS (Broyden–Fletcher–Goldfarb–Shanno) optimizer.
///
/// Gradients are estimated with central finite differences, falling back
/// to one-sided differences at an active bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct ProjectedBfgs;

impl ProjectedBfgs {
    /// Create a new projected BFGS optimizer.
    pub fn new() -> Self {
        Self
    }

    /// Minimize `cost_fn` inside `bounds`, starting from `initial_values`.
    ///
    /// `initial_values` is clipped into the box before the first
    /// evaluation.
    pub fn minimize<C: CostFunction>(
        &self,
        cost_fn: &C,
        bounds: &BoxConstraint,
        initial_values: &Array,
        end_criteria: &EndCriteria,
    ) -> Result<OptimizationResult> {
        let n = initial_values.size();
        ensure!(
            n == bounds.dimension(),
            "initial values have dimension {n}, bounds have dimension {}",
            bounds.dimension()
        );
        ensure!(
            initial_values.is_finite(),
            "initial values must be finite, got {initial_values}"
        );

        let mut x = bounds.project(initial_values);
        let mut value = cost_fn.value(&x)?;
        ensure_finite!(value, "cost at initial point {x}");
        let mut grad = bounded_gradient(cost_fn, bounds, &x)?;

        let mut h_inv = identity_matrix(n);
        let mut fresh_hessian = true;
        let mut stationary_count = 0;

        for iteration in 0..end_criteria.max_iterations {
            if value < end_criteria.root_epsilon {
                return Ok(finish(x, value, iteration, EndCriteriaType::RootEpsilon));
            }

            let pg_norm = projected_gradient_norm(bounds, &x, &grad);
            tracing::trace!(iteration, value, pg_norm, "projected BFGS step");
            if pg_norm < end_criteria.gradient_norm_epsilon {
                return Ok(finish(
                    x,
                    value,
                    iteration,
                    EndCriteriaType::GradientNormEpsilon,
                ));
            }

            let free = free_coordinates(bounds, &x, &grad);
            let mut direction = restrict(&negate(&mat_vec_mul(&h_inv, &grad, n)), &free);
            if direction.dot(&grad) >= 0.0 {
                // Curvature estimate no longer yields descent: restart.
                h_inv = identity_matrix(n);
                fresh_hessian = true;
                direction = restrict(&negate(&grad), &free);
            }

            let step = line_search(cost_fn, bounds, &x, value, &grad, &direction, fresh_hessian)?;
            let (x_new, value_new) = match step {
                Some(accepted) => accepted,
                None if !fresh_hessian => {
                    h_inv = identity_matrix(n);
                    fresh_hessian = true;
                    continue;
                }
                None => {
                    return Ok(finish(
                        x,
                        value,
                        iteration,
                        EndCriteriaType::LineSearchFailure,
                    ));
                }
            };

            let new_grad = bounded_gradient(cost_fn, bounds, &x_new)?;

            let s = &x_new - &x;
            let y = &new_grad - &grad;
            let sy = s.dot(&y);
            if sy > 1e-12 * s.norm() * y.norm() {
                update_inverse_hessian(&mut h_inv, &s, &y, 1.0 / sy, n);
                fresh_hessian = false;
            }

            let scale = value.abs().max(value_new.abs()).max(1.0);
            if (value - value_new).abs() <= end_criteria.function_epsilon * scale {
                stationary_count += 1;
            } else {
                stationary_count = 0;
            }

            x = x_new;
            value = value_new;
            grad = new_grad;

            if stationary_count >= end_criteria.max_stationary_state_iterations {
                return Ok(finish(
                    x,
                    value,
                    iteration + 1,
                    EndCriteriaType::StationaryPoint,
                ));
            }
        }

        Ok(finish(
            x,
            value,
            end_criteria.max_iterations,
            EndCriteriaType::MaxIterations,
        ))
    }
}

fn finish(x: Array, value: Real, iterations: usize, end_type: EndCriteriaType) -> OptimizationResult {
    OptimizationResult {
        x,
        value,
        iterations,
        end_type,
    }
}

/// Backtracking (Armijo) search along the projected path `P(x + α·d)`.
///
/// Returns `None` when no trial point decreases the cost enough.
fn line_search<C: CostFunction>(
    cost_fn: &C,
    bounds: &BoxConstraint,
    x: &Array,
    value: Real,
    grad: &Array,
    direction: &Array,
    fresh_hessian: bool,
) -> Result<Option<(Array, Real)>> {
    let d_max = direction.norm_inf();
    if d_max == 0.0 {
        return Ok(None);
    }
    // First trial step is capped at unit length while H is the identity.
    let mut alpha = if fresh_hessian { (1.0 / d_max).min(1.0) } else { 1.0 };

    for _ in 0..MAX_BACKTRACKS {
        let x_new = bounds.project(&(x + &(direction * alpha)));
        let step = &x_new - x;
        if step.norm_inf() > 0.0 {
            let value_new = cost_fn.value(&x_new)?;
            if value_new.is_finite() && value_new <= value + ARMIJO_C1 * grad.dot(&step) {
                return Ok(Some((x_new, value_new)));
            }
        }
        alpha *= 0.5;
    }
    Ok(None)
}

/// Finite-difference gradient that never evaluates outside the box.
fn bounded_gradient<C: CostFunction>(
    cost_fn: &C,
    bounds: &BoxConstraint,
    x: &Array,
) -> Result<Array> {
    let n = x.size();
    let mut grad = Array::zeros(n);
    for i in 0..n {
        let h = FD_RELATIVE_STEP * x[i].abs().max(1.0);
        let up = (x[i] + h).min(bounds.upper()[i]);
        let down = (x[i] - h).max(bounds.lower()[i]);
        let width = up - down;
        if width <= 0.0 {
            continue;
        }
        let mut xp = x.clone();
        xp[i] = up;
        let mut xm = x.clone();
        xm[i] = down;
        let fp = cost_fn.value(&xp)?;
        let fm = cost_fn.value(&xm)?;
        grad[i] = (fp - fm) / width;
        ensure_finite!(grad[i], "finite-difference gradient component {i}");
    }
    Ok(grad)
}

/// `‖P(x − ∇f) − x‖∞`, zero exactly at a first-order critical point of the
/// bounded problem.
fn projected_gradient_norm(bounds: &BoxConstraint, x: &Array, grad: &Array) -> Real {
    let moved = bounds.project(&(x - grad));
    (&moved - x).norm_inf()
}

/// Coordinates not held at a bound by an outward-pointing gradient.
fn free_coordinates(bounds: &BoxConstraint, x: &Array, grad: &Array) -> Vec<bool> {
    (0..x.size())
        .map(|i| {
            let at_lower = x[i] <= bounds.lower()[i] && grad[i] > 0.0;
            let at_upper = x[i] >= bounds.upper()[i] && grad[i] < 0.0;
            !(at_lower || at_upper)
        })
        .collect()
}

// ── Helper functions for dense vector/matrix ops on flat Vec<Real> ────────────

fn identity_matrix(n: usize) -> Vec<Real> {
    let mut m = vec![0.0; n * n];
    for i in 0..n {
        m[i * n + i] = 1.0;
    }
    m
}

fn mat_vec_mul(m: &[Real], v: &Array, n: usize) -> Array {
    let mut result = Array::zeros(n);
    for i in 0..n {
        let mut sum = 0.0;
        for j in 0..n {
            sum += m[i * n + j] * v[j];
        }
        result[i] = sum;
    }
    result
}

fn negate(a: &Array) -> Array {
    -a
}

fn restrict(a: &Array, free: &[bool]) -> Array {
    let mut r = a.clone();
    for (i, &is_free) in free.iter().enumerate() {
        if !is_free {
            r[i] = 0.0;
        }
    }
    r
}

fn update_inverse_hessian(h: &mut [Real], s: &Array, y: &Array, rho: Real, n: usize) {
    // H_new = (I − ρ·s·yᵀ) · H · (I − ρ·y·sᵀ) + ρ·s·sᵀ, expanded as
    // H − ρ(H·y·sᵀ + s·yᵀ·H) + ρ(1 + ρ·yᵀHy)·s·sᵀ.
    let mut hy = vec![0.0; n];
    let mut yh = vec![0.0; n];
    for i in 0..n {
        for j in 0..n {
            hy[i] += h[i * n + j] * y[j];
            yh[i] += y[j] * h[j * n + i];
        }
    }
    let yhy: Real = (0..n).map(|i| y[i] * hy[i]).sum();
    let factor = 1.0 + rho * yhy;

    for i in 0..n {
        for j in 0..n {
            h[i * n + j] += rho * (factor * s[i] * s[j] - hy[i] * s[j] - s[i] * yh[j]);
        }
    }
}
