use crate::dataset::InMemoryDataset;
use crate::error::{Error, Result};
use crate::loss::{Loss, PoissonLoss};
use crate::model::{Fitted, LinearModel, LinearParams, LinearRegression, ParamOps, Regressor};
use crate::optimizer::{ConvergenceStatus, Lbfgs, Optimizer};
use crate::regularizers::{Regularizer, L2};
use log::{info, warn};
use ndarray::Array1;

/// Fits a linear model by minimizing `mean loss + penalty` with a batch optimizer.
///
/// Combines a loss function, optimizer, and regularizer. Once built it is
/// immutable and can be reused across any number of datasets, which is what
/// cross-validation does.
///
/// The `train` method returns a `LinearModel<Fitted>`, which contains only inference logic.
#[derive(Debug, Clone)]
pub struct Trainer<L, O, R>
where
    L: Loss,
    O: Optimizer,
    R: Regularizer,
{
    pub(crate) loss_fn: L,
    pub(crate) optimizer: O,
    pub(crate) regularizer: R,
}

/// Poisson regression trained with L-BFGS and an L2 penalty.
pub type PoissonTrainer = Trainer<PoissonLoss, Lbfgs, L2>;

/// Fluent builder for an L-BFGS trainer with an L2 penalty.
///
/// Defaults:
/// - `l2_weight`: 1.0
/// - `max_iterations`: 1000
/// - `tolerance`: 1e-7
/// - `history_size`: 20
#[derive(Debug, Clone)]
pub struct TrainerBuilder<L: Loss> {
    loss_fn: L,
    l2_weight: f64,
    max_iterations: usize,
    tolerance: f64,
    history_size: usize,
}

impl<L: Loss> TrainerBuilder<L> {
    pub fn new(loss_fn: L) -> Self {
        Self {
            loss_fn,
            l2_weight: 1.0,
            max_iterations: 1000,
            tolerance: 1e-7,
            history_size: 20,
        }
    }

    /// Weight of the L2 penalty on the weights. The bias is never penalized.
    pub fn l2_weight(mut self, weight: f64) -> Self {
        self.l2_weight = weight;
        self
    }

    pub fn max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Relative improvement below which optimization stops.
    pub fn tolerance(mut self, tolerance: f64) -> Self {
        self.tolerance = tolerance;
        self
    }

    /// Number of L-BFGS correction pairs kept.
    pub fn history_size(mut self, size: usize) -> Self {
        self.history_size = size;
        self
    }

    /// # Panics
    /// Panics if `history_size` is zero.
    pub fn build(self) -> Trainer<L, Lbfgs, L2> {
        Trainer {
            loss_fn: self.loss_fn,
            optimizer: Lbfgs::new(self.max_iterations, self.tolerance, self.history_size),
            regularizer: L2::new(self.l2_weight),
        }
    }
}

impl<L: Loss> Trainer<L, Lbfgs, L2> {
    /// Convenience constructor that starts the builder pattern.
    pub fn builder(loss_fn: L) -> TrainerBuilder<L> {
        TrainerBuilder::new(loss_fn)
    }
}

impl Default for PoissonTrainer {
    fn default() -> Self {
        Trainer::builder(PoissonLoss).build()
    }
}

impl<L, O, R> Trainer<L, O, R>
where
    L: Loss,
    O: Optimizer,
    R: Regularizer,
{
    /// Assemble a trainer from arbitrary components.
    pub fn new(loss_fn: L, optimizer: O, regularizer: R) -> Self {
        Self {
            loss_fn,
            optimizer,
            regularizer,
        }
    }

    pub fn loss_fn(&self) -> &L {
        &self.loss_fn
    }

    /// Trains a fresh model on the provided dataset.
    ///
    /// Weights start at zero and the bias at the loss's intercept-only estimate.
    ///
    /// # Errors
    /// [`Error::Training`] if:
    /// - A label lies outside the loss's domain
    /// - The optimizer hits its iteration limit
    /// - The objective becomes non-finite
    ///
    /// A stalled line search is accepted with a warning; the last finite
    /// iterate is used.
    pub fn train(&self, dataset: &InMemoryDataset) -> Result<LinearModel<Fitted>> {
        let x = dataset.features();
        let y: Array1<f64> = dataset.labels().to_owned();
        self.loss_fn.validate_targets(&y)?;

        let link = self.loss_fn.link();
        let mut model = LinearRegression::new(dataset.n_features(), link);
        model.update_params(&LinearParams {
            weights: Array1::zeros(dataset.n_features()),
            bias: self.loss_fn.initial_bias(&y),
        });

        let objective = |flat: &Array1<f64>| {
            let probe = LinearRegression::with_params(LinearParams::from_flat(flat), link);
            let eta = probe.forward(x);
            let (penalty, reg_grad) = self.regularizer.regularizer_penalty_grad(probe.params());
            let loss = self.loss_fn.loss(&eta, &y) + penalty;
            let grad_eta = self.loss_fn.grad_wrt_prediction(&eta, &y);
            let grads = probe.backward(x, &grad_eta).add(&reg_grad);
            (loss, grads.to_flat())
        };

        info!(
            "Training model on {} rows x {} features...",
            dataset.len(),
            dataset.n_features()
        );
        let result = self.optimizer.minimize(objective, model.params().to_flat());

        match result.status {
            ConvergenceStatus::Converged => info!(
                "Converged after {} iterations, objective = {:.6}",
                result.iterations, result.objective_value
            ),
            ConvergenceStatus::Stalled => warn!(
                "Line search stalled after {} iterations (|grad| = {:.3e}); using last iterate",
                result.iterations, result.gradient_norm
            ),
            ConvergenceStatus::MaxIterations => {
                return Err(Error::Training(format!(
                    "did not converge within {} iterations (|grad| = {:.3e})",
                    result.iterations, result.gradient_norm
                )))
            }
            ConvergenceStatus::NumericalError => {
                return Err(Error::Training(format!(
                    "objective became non-finite at iteration {}",
                    result.iterations
                )))
            }
        }
        if !result.is_usable() {
            return Err(Error::Training(format!(
                "non-finite objective {}",
                result.objective_value
            )));
        }

        model.update_params(&LinearParams::from_flat(&result.solution));
        Ok(model.into_fitted())
    }
}

impl<L, O, R> Regressor for Trainer<L, O, R>
where
    L: Loss,
    O: Optimizer,
    R: Regularizer,
{
    type Model = LinearModel<Fitted>;

    fn fit(&self, data: &InMemoryDataset) -> Result<Self::Model> {
        self.train(data)
    }
}
