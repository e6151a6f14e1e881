//! Limited-memory BFGS (L-BFGS) optimizer.
//!
//! L-BFGS is a quasi-Newton method that approximates the inverse Hessian using
//! a limited history of position and gradient differences.
//!
//! # Algorithm
//!
//! 1. Compute gradient `g_k` = ∇`f(x_k)`
//! 2. Compute search direction `d_k` using two-loop recursion (approximates -H⁻¹·`g_k`)
//! 3. Find step size `α_k` via Wolfe line search
//! 4. Update: x_{k+1} = `x_k` + `α_k` * `d_k`
//! 5. Store the pair (s_k, y_k) if it has positive curvature

use super::line_search::{LineSearch, WolfeLineSearch};
use super::{norm, ConvergenceStatus, OptimizationResult, Optimizer};
use log::debug;
use ndarray::Array1;
use std::collections::VecDeque;

/// Curvature pairs with `yᵀs` at or below this are discarded.
const MIN_CURVATURE: f64 = 1e-10;

/// L-BFGS optimizer.
///
/// # Parameters
///
/// - **`max_iter`**: Maximum number of iterations
/// - **`tol`**: Relative tolerance. The run converges when one step improves
///   the objective by less than `tol * max(|f|, 1)`, or the gradient norm
///   drops below `tol`.
/// - **`m`**: History size (number of correction pairs kept)
#[derive(Debug, Clone)]
pub struct Lbfgs {
    max_iter: usize,
    tol: f64,
    m: usize,
    line_search: WolfeLineSearch,
}

impl Lbfgs {
    /// # Panics
    /// Panics if `m` is zero.
    pub fn new(max_iter: usize, tol: f64, m: usize) -> Self {
        assert!(m > 0, "history size must be positive");
        Self {
            max_iter,
            tol,
            m,
            line_search: WolfeLineSearch::default(),
        }
    }

    pub fn with_line_search(mut self, line_search: WolfeLineSearch) -> Self {
        self.line_search = line_search;
        self
    }

    pub fn max_iter(&self) -> usize {
        self.max_iter
    }

    pub fn tolerance(&self) -> f64 {
        self.tol
    }

    pub fn history_size(&self) -> usize {
        self.m
    }

    /// Two-loop recursion: returns `-H·grad` for the implicit inverse Hessian `H`.
    ///
    /// Without history this is steepest descent, scaled to unit length so the
    /// first line search starts at a sensible step.
    fn compute_direction(
        grad: &Array1<f64>,
        history: &VecDeque<(Array1<f64>, Array1<f64>)>,
    ) -> Array1<f64> {
        let Some((s_last, y_last)) = history.back() else {
            let g_norm = norm(grad);
            let scale = if g_norm > 1.0 { 1.0 / g_norm } else { 1.0 };
            return grad * -scale;
        };

        let mut q = -grad;
        let rho: Vec<f64> = history.iter().map(|(s, y)| 1.0 / y.dot(s)).collect();
        let mut alpha = vec![0.0; history.len()];

        // First loop: newest to oldest
        for (i, (s, y)) in history.iter().enumerate().rev() {
            alpha[i] = rho[i] * s.dot(&q);
            q.scaled_add(-alpha[i], y);
        }

        // H_0 = (sᵀy / yᵀy) I from the most recent pair
        let gamma = s_last.dot(y_last) / y_last.dot(y_last);
        let mut r = q * gamma;

        // Second loop: oldest to newest
        for (i, (s, y)) in history.iter().enumerate() {
            let beta = rho[i] * y.dot(&r);
            r.scaled_add(alpha[i] - beta, s);
        }

        r
    }
}

impl Default for Lbfgs {
    /// 1000 iterations, tolerance 1e-7, 20 correction pairs.
    fn default() -> Self {
        Self::new(1000, 1e-7, 20)
    }
}

impl Optimizer for Lbfgs {
    fn minimize<F>(&self, objective: F, x0: Array1<f64>) -> OptimizationResult
    where
        F: Fn(&Array1<f64>) -> (f64, Array1<f64>),
    {
        let mut history: VecDeque<(Array1<f64>, Array1<f64>)> = VecDeque::with_capacity(self.m);

        let mut x = x0;
        let (mut fx, mut grad) = objective(&x);
        let mut grad_norm = norm(&grad);

        let result = |x: Array1<f64>, fx: f64, grad_norm: f64, iterations, status| {
            OptimizationResult {
                solution: x,
                objective_value: fx,
                iterations,
                status,
                gradient_norm: grad_norm,
            }
        };

        if !fx.is_finite() || !grad_norm.is_finite() {
            return result(x, fx, grad_norm, 0, ConvergenceStatus::NumericalError);
        }

        for iter in 0..self.max_iter {
            if grad_norm < self.tol {
                return result(x, fx, grad_norm, iter, ConvergenceStatus::Converged);
            }

            let mut d = Self::compute_direction(&grad, &history);
            if !(grad.dot(&d) < 0.0) {
                // Stale curvature information; restart from steepest descent
                history.clear();
                d = Self::compute_direction(&grad, &history);
            }

            let Some(step) = self.line_search.search(&objective, &x, fx, &grad, &d) else {
                return result(x, fx, grad_norm, iter, ConvergenceStatus::Stalled);
            };

            let x_new = &x + &(&d * step.alpha);
            if !step.gradient.iter().all(|g| g.is_finite()) {
                return result(x, fx, grad_norm, iter, ConvergenceStatus::NumericalError);
            }

            let s_k = &x_new - &x;
            let y_k = &step.gradient - &grad;
            if y_k.dot(&s_k) > MIN_CURVATURE {
                if history.len() == self.m {
                    history.pop_front();
                }
                history.push_back((s_k, y_k));
            }

            let improvement = fx - step.value;
            x = x_new;
            fx = step.value;
            grad = step.gradient;
            grad_norm = norm(&grad);

            debug!(
                "L-BFGS iter {}: objective = {:.6e}, |grad| = {:.3e}, step = {:.3e}",
                iter + 1,
                fx,
                grad_norm,
                step.alpha
            );

            if improvement.abs() <= self.tol * fx.abs().max(1.0) {
                return result(x, fx, grad_norm, iter + 1, ConvergenceStatus::Converged);
            }
        }

        result(x, fx, grad_norm, self.max_iter, ConvergenceStatus::MaxIterations)
    }
}
