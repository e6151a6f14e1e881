//! Line search along a descent direction.
//!
//! [`WolfeLineSearch`] enforces both the Armijo condition (sufficient decrease)
//! and the curvature condition:
//!
//! ```text
//! Armijo:    f(x + α*d) ≤ f(x) + c₁*α*∇f(x)ᵀd
//! Curvature: |∇f(x + α*d)ᵀd| ≤ c₂*|∇f(x)ᵀd|
//! ```
//!
//! Non-finite trial values are treated as an Armijo failure, so a step that
//! overflows (e.g. `exp` of a large linear predictor) shrinks instead of
//! poisoning the search.

use ndarray::Array1;

/// An accepted trial point, with the objective already evaluated there.
#[derive(Debug, Clone)]
pub struct LineSearchStep {
    pub alpha: f64,
    pub value: f64,
    pub gradient: Array1<f64>,
}

/// Trait for line search strategies.
pub trait LineSearch {
    /// Find a step size along `d` from `x`, where `fx`/`grad_x` are the
    /// objective and gradient at `x`.
    ///
    /// Returns `None` if `d` is not a descent direction or no trial point
    /// satisfied the sufficient decrease condition.
    fn search<F>(
        &self,
        f: &F,
        x: &Array1<f64>,
        fx: f64,
        grad_x: &Array1<f64>,
        d: &Array1<f64>,
    ) -> Option<LineSearchStep>
    where
        F: Fn(&Array1<f64>) -> (f64, Array1<f64>);
}

/// Wolfe line search using bracketing and bisection.
#[derive(Debug, Clone)]
pub struct WolfeLineSearch {
    /// Armijo constant (c₁ ∈ (0, c₂), typical: 1e-4)
    c1: f64,
    /// Curvature constant (c₂ ∈ (c₁, 1), typical: 0.9)
    c2: f64,
    max_iter: usize,
}

impl WolfeLineSearch {
    /// # Panics
    /// Panics unless `0 < c1 < c2 < 1`.
    pub fn new(c1: f64, c2: f64, max_iter: usize) -> Self {
        assert!(
            c1 < c2 && c1 > 0.0 && c2 < 1.0,
            "Wolfe conditions require 0 < c1 < c2 < 1"
        );
        Self { c1, c2, max_iter }
    }
}

impl Default for WolfeLineSearch {
    /// Defaults: c1=1e-4, c2=0.9, `max_iter=60`
    fn default() -> Self {
        Self::new(1e-4, 0.9, 60)
    }
}

impl LineSearch for WolfeLineSearch {
    fn search<F>(
        &self,
        f: &F,
        x: &Array1<f64>,
        fx: f64,
        grad_x: &Array1<f64>,
        d: &Array1<f64>,
    ) -> Option<LineSearchStep>
    where
        F: Fn(&Array1<f64>) -> (f64, Array1<f64>),
    {
        let dir_deriv = grad_x.dot(d);
        if !(dir_deriv < 0.0) {
            return None;
        }

        let mut alpha = 1.0;
        let mut alpha_lo = 0.0;
        let mut alpha_hi = f64::INFINITY;
        // Last point that passed Armijo but not curvature
        let mut fallback: Option<LineSearchStep> = None;

        for _ in 0..self.max_iter {
            let x_new = x + &(d * alpha);
            let (fx_new, grad_new) = f(&x_new);

            if !fx_new.is_finite() || fx_new > fx + self.c1 * alpha * dir_deriv {
                // Armijo fails - alpha too large
                alpha_hi = alpha;
                alpha = (alpha_lo + alpha_hi) / 2.0;
                continue;
            }

            let dir_deriv_new = grad_new.dot(d);
            let step = LineSearchStep {
                alpha,
                value: fx_new,
                gradient: grad_new,
            };
            if dir_deriv_new.abs() <= self.c2 * dir_deriv.abs() {
                return Some(step);
            }

            if dir_deriv_new > 0.0 {
                // Overshot the minimum along d
                alpha_hi = alpha;
            } else {
                alpha_lo = alpha;
            }
            fallback = Some(step);

            alpha = if alpha_hi.is_finite() {
                (alpha_lo + alpha_hi) / 2.0
            } else {
                alpha * 2.0
            };
        }

        fallback
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn quadratic(x: &Array1<f64>) -> (f64, Array1<f64>) {
        (x[0] * x[0], array![2.0 * x[0]])
    }

    #[test]
    fn test_wolfe_accepts_full_newton_step() {
        let ls = WolfeLineSearch::default();
        let x = array![1.0];
        let (fx, g) = quadratic(&x);
        let step = ls.search(&quadratic, &x, fx, &g, &array![-1.0]).unwrap();

        assert_eq!(step.alpha, 1.0);
        assert_eq!(step.value, 0.0);
    }

    #[test]
    fn test_wolfe_shrinks_overlong_step() {
        let ls = WolfeLineSearch::default();
        let x = array![1.0];
        let (fx, g) = quadratic(&x);
        // alpha = 1 lands on x = -9, far worse
        let step = ls.search(&quadratic, &x, fx, &g, &array![-10.0]).unwrap();

        assert!(step.alpha < 1.0);
        assert!(step.value < fx);
    }

    #[test]
    fn test_wolfe_grows_short_step() {
        let ls = WolfeLineSearch::default();
        let x = array![100.0];
        let (fx, g) = quadratic(&x);
        let step = ls.search(&quadratic, &x, fx, &g, &array![-1.0]).unwrap();

        assert!(step.alpha > 1.0);
        assert!(step.value < fx);
    }

    #[test]
    fn test_wolfe_skips_non_finite_values() {
        let overflowing = |x: &Array1<f64>| {
            let v = x[0].exp();
            (v - 5.0 * x[0], array![v - 5.0])
        };
        let ls = WolfeLineSearch::default();
        let x = array![0.0];
        let (fx, g) = overflowing(&x);
        // alpha = 1 gives exp(4000) = inf
        let step = ls.search(&overflowing, &x, fx, &g, &array![1000.0]).unwrap();

        assert!(step.value.is_finite());
        assert!(step.value < fx);
    }

    #[test]
    fn test_wolfe_rejects_ascent_direction() {
        let ls = WolfeLineSearch::default();
        let x = array![1.0];
        let (fx, g) = quadratic(&x);
        assert!(ls.search(&quadratic, &x, fx, &g, &array![1.0]).is_none());
    }

    #[test]
    #[should_panic(expected = "Wolfe conditions require")]
    fn test_wolfe_invalid_constants() {
        let _ = WolfeLineSearch::new(0.9, 0.1, 10);
    }
}
