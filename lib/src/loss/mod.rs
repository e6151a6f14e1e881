use crate::error::{Error, Result};
use crate::model::Link;
use ndarray::Array1;

/// A trait for differentiable GLM losses used during model training.
///
/// Implementors must define:
/// - How to compute the scalar loss value, averaged over rows.
/// - How to compute the gradient of that average w.r.t. the linear predictor `η`.
/// - Which [`Link`] maps `η` to the predicted mean.
///
/// The gradient is passed to the model's `backward()` method to obtain parameter gradients.
pub trait Loss {
    fn link(&self) -> Link;

    /// Mean loss over rows.
    fn loss(&self, eta: &Array1<f64>, target: &Array1<f64>) -> f64;

    /// Computes `∂L/∂η`, already divided by the number of rows.
    fn grad_wrt_prediction(&self, eta: &Array1<f64>, target: &Array1<f64>) -> Array1<f64>;

    /// Reject labels outside the loss's domain.
    fn validate_targets(&self, _target: &Array1<f64>) -> Result<()> {
        Ok(())
    }

    /// Starting bias for an otherwise zero-initialized model.
    fn initial_bias(&self, _target: &Array1<f64>) -> f64 {
        0.0
    }
}

/// Poisson negative log-likelihood with log link, constant terms dropped:
/// `L = (1/n) * Σ(exp(η_i) - y_i * η_i)`
///
/// Gradient w.r.t. η: `∂L/∂η = (exp(η) - y) / n`
#[derive(Debug, Clone, Copy, Default)]
pub struct PoissonLoss;

impl Loss for PoissonLoss {
    fn link(&self) -> Link {
        Link::Log
    }

    fn loss(&self, eta: &Array1<f64>, target: &Array1<f64>) -> f64 {
        let n = eta.len() as f64;
        eta.iter()
            .zip(target.iter())
            .map(|(&e, &y)| e.exp() - y * e)
            .sum::<f64>()
            / n
    }

    fn grad_wrt_prediction(&self, eta: &Array1<f64>, target: &Array1<f64>) -> Array1<f64> {
        let n = eta.len() as f64;
        (eta.mapv(f64::exp) - target) / n
    }

    fn validate_targets(&self, target: &Array1<f64>) -> Result<()> {
        match target.iter().position(|&y| !(y >= 0.0) || !y.is_finite()) {
            Some(i) => Err(Error::Training(format!(
                "Poisson regression requires non-negative finite labels, row {} has {}",
                i, target[i]
            ))),
            None => Ok(()),
        }
    }

    /// `ln(mean(y))`, the intercept-only maximum likelihood estimate.
    fn initial_bias(&self, target: &Array1<f64>) -> f64 {
        match target.mean() {
            Some(mean) if mean > 0.0 => mean.ln(),
            _ => 0.0,
        }
    }
}

/// Squared error with identity link: `L = (1/n) * Σ(η_i - y_i)^2`
///
/// Gradient w.r.t. η: `∂L/∂η = 2(η - y) / n`
#[derive(Debug, Clone, Copy, Default)]
pub struct SquaredLoss;

impl Loss for SquaredLoss {
    fn link(&self) -> Link {
        Link::Identity
    }

    fn loss(&self, eta: &Array1<f64>, target: &Array1<f64>) -> f64 {
        let diff = eta - target;
        diff.dot(&diff) / eta.len() as f64
    }

    fn grad_wrt_prediction(&self, eta: &Array1<f64>, target: &Array1<f64>) -> Array1<f64> {
        (eta - target) * (2.0 / eta.len() as f64)
    }

    fn validate_targets(&self, target: &Array1<f64>) -> Result<()> {
        if target.iter().all(|y| y.is_finite()) {
            Ok(())
        } else {
            Err(Error::Training("labels must be finite".to_string()))
        }
    }

    fn initial_bias(&self, target: &Array1<f64>) -> f64 {
        target.mean().unwrap_or(0.0)
    }
}
