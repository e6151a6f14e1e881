//! Batch optimizers for smooth objectives.
//!
//! The trainer hands an optimizer a closure returning `(f(x), ∇f(x))` over a
//! flat parameter vector; the optimizer owns the search and reports how it
//! stopped through [`OptimizationResult`].

use ndarray::Array1;

pub mod lbfgs;
pub mod line_search;

pub use lbfgs::Lbfgs;
pub use line_search::{LineSearch, LineSearchStep, WolfeLineSearch};

/// Trait for full-batch optimizers.
///
/// Training logic (`Trainer`) is decoupled from the search strategy: any
/// objective expressible as value-and-gradient over a flat vector can be
/// paired with any optimizer.
///
/// # Example
/// ```rust
/// use car_price::optimizer::{ConvergenceStatus, Lbfgs, Optimizer};
/// use ndarray::{array, Array1};
///
/// // f(x) = (x0 - 3)^2 + (x1 + 1)^2
/// let objective = |x: &Array1<f64>| {
///     let value = (x[0] - 3.0).powi(2) + (x[1] + 1.0).powi(2);
///     let grad = array![2.0 * (x[0] - 3.0), 2.0 * (x[1] + 1.0)];
///     (value, grad)
/// };
/// let result = Lbfgs::default().minimize(objective, array![0.0, 0.0]);
/// assert_eq!(result.status, ConvergenceStatus::Converged);
/// assert!((result.solution[0] - 3.0).abs() < 1e-4);
/// ```
pub trait Optimizer {
    /// Minimize `objective` starting from `x0`.
    ///
    /// The optimizer never panics on a misbehaving objective: non-finite
    /// values are reported as [`ConvergenceStatus::NumericalError`].
    fn minimize<F>(&self, objective: F, x0: Array1<f64>) -> OptimizationResult
    where
        F: Fn(&Array1<f64>) -> (f64, Array1<f64>);
}

/// How an optimization run terminated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConvergenceStatus {
    /// Gradient norm or relative improvement fell below tolerance.
    Converged,
    /// Reached maximum iteration limit
    MaxIterations,
    /// No step along the search direction decreased the objective.
    Stalled,
    /// Numerical error (NaN, Inf, etc.)
    NumericalError,
}

/// Outcome of [`Optimizer::minimize`].
#[derive(Debug, Clone)]
pub struct OptimizationResult {
    /// Final solution (optimized parameters)
    pub solution: Array1<f64>,
    /// Final objective function value
    pub objective_value: f64,
    /// Number of iterations performed
    pub iterations: usize,
    pub status: ConvergenceStatus,
    /// Final gradient norm (‖∇f(x)‖)
    pub gradient_norm: f64,
}

impl OptimizationResult {
    /// `true` when the solution is usable (converged or stalled at a finite point).
    pub fn is_usable(&self) -> bool {
        matches!(
            self.status,
            ConvergenceStatus::Converged | ConvergenceStatus::Stalled
        ) && self.objective_value.is_finite()
    }
}

pub(crate) fn norm(v: &Array1<f64>) -> f64 {
    v.dot(v).sqrt()
}
