//! Linear models with a link function.
//!
//! This module implements a type-safe generalized linear model with compile-time state tracking:
//! - [`LinearRegression`] = `LinearModel<Unfitted>`, used during training.
//! - `LinearModel<Fitted>`, inference only.
//!
//! The fitted model carries no training hyperparameters: only weights, bias
//! and the link that turns the linear predictor `η = w·x + b` into a mean.

use crate::error::{Error, Result};
use crate::model::{Fitted, ParamOps, Predictor, Unfitted};
use ndarray::{Array1, Array2, ArrayView2};
use std::marker::PhantomData;

/// Maps the linear predictor `η` to the predicted mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Link {
    /// `μ = η`
    Identity,
    /// `μ = exp(η)`
    Log,
}

impl Link {
    pub fn inverse_all(&self, eta: &Array1<f64>) -> Array1<f64> {
        match self {
            Link::Identity => eta.clone(),
            Link::Log => eta.mapv(f64::exp),
        }
    }
}

/// Trainable parameters of a linear model: weights and bias.
#[derive(Debug, Clone, PartialEq)]
pub struct LinearParams {
    pub weights: Array1<f64>,
    pub bias: f64,
}

impl LinearParams {
    pub fn zeros(n_features: usize) -> Self {
        Self {
            weights: Array1::zeros(n_features),
            bias: 0.0,
        }
    }

    /// Pack as `[w_0, ..., w_{n-1}, b]`.
    pub fn to_flat(&self) -> Array1<f64> {
        let mut flat = Array1::zeros(self.weights.len() + 1);
        flat.slice_mut(ndarray::s![..-1]).assign(&self.weights);
        flat[self.weights.len()] = self.bias;
        flat
    }

    /// Inverse of [`Self::to_flat`].
    ///
    /// # Panics
    /// Panics if `flat` is empty.
    pub fn from_flat(flat: &Array1<f64>) -> Self {
        let n = flat.len() - 1;
        Self {
            weights: flat.slice(ndarray::s![..n]).to_owned(),
            bias: flat[n],
        }
    }
}

impl ParamOps for LinearParams {
    fn add(&self, other: &Self) -> Self {
        Self {
            weights: &self.weights + &other.weights,
            bias: self.bias + other.bias,
        }
    }

    fn scale(&self, scalar: f64) -> Self {
        Self {
            weights: &self.weights * scalar,
            bias: self.bias * scalar,
        }
    }
}

/// A linear model with state encoded at the type level.
///
/// - When `S = Unfitted`: exposes `forward`/`backward` for the trainer.
/// - When `S = Fitted`: implements [`Predictor`].
///
/// This enforces, at compile time, that you cannot call `predict()` on an untrained model.
#[derive(Debug, Clone)]
pub struct LinearModel<S> {
    params: LinearParams,
    link: Link,
    _state: PhantomData<S>,
}

/// Alias for an **unfitted** linear model.
pub type LinearRegression = LinearModel<Unfitted>;

impl<S> LinearModel<S> {
    pub fn params(&self) -> &LinearParams {
        &self.params
    }

    pub fn link(&self) -> Link {
        self.link
    }

    pub fn n_features(&self) -> usize {
        self.params.weights.len()
    }

    /// Linear predictor `η = X·w + b`.
    pub fn linear_predictor(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        x.dot(&self.params.weights) + self.params.bias
    }
}

impl LinearModel<Unfitted> {
    /// Zero-initialized model for `n_features` inputs.
    pub fn new(n_features: usize, link: Link) -> Self {
        Self {
            params: LinearParams::zeros(n_features),
            link,
            _state: PhantomData,
        }
    }

    /// Unfitted model starting from the given parameters.
    pub fn with_params(params: LinearParams, link: Link) -> Self {
        Self {
            params,
            link,
            _state: PhantomData,
        }
    }

    pub fn forward(&self, x: ArrayView2<'_, f64>) -> Array1<f64> {
        self.linear_predictor(x)
    }

    /// Gradients from `∂L/∂η`: `∇w = Xᵀ·g`, `∇b = Σg`.
    pub fn backward(&self, x: ArrayView2<'_, f64>, grad_output: &Array1<f64>) -> LinearParams {
        LinearParams {
            weights: x.t().dot(grad_output),
            bias: grad_output.sum(),
        }
    }

    pub fn update_params(&mut self, params: &LinearParams) {
        self.params = params.clone();
    }

    pub fn into_fitted(self) -> LinearModel<Fitted> {
        LinearModel::<Fitted>::new(self.params, self.link)
    }
}

impl LinearModel<Fitted> {
    /// Build a fitted model directly from parameters.
    pub fn new(params: LinearParams, link: Link) -> Self {
        Self {
            params,
            link,
            _state: PhantomData,
        }
    }
}

impl Predictor for LinearModel<Fitted> {
    fn predict(&self, features: &Array2<f64>) -> Result<Array1<f64>> {
        if features.ncols() != self.n_features() {
            return Err(Error::InvalidParameter(format!(
                "model expects {} features, got {}",
                self.n_features(),
                features.ncols()
            )));
        }
        let eta = self.linear_predictor(features.view());
        Ok(self.link.inverse_all(&eta))
    }
}
