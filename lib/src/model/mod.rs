pub mod state;
pub use state::{Fitted, Unfitted};

pub mod linear;
pub use linear::{LinearModel, LinearParams, LinearRegression, Link};

use crate::dataset::InMemoryDataset;
use crate::error::Result;
use ndarray::{Array1, Array2};

/// Parameter arithmetic needed to combine gradients.
pub trait ParamOps: Clone {
    fn add(&self, other: &Self) -> Self;
    fn scale(&self, scalar: f64) -> Self;
}

/// A trained model that maps encoded features to predicted prices.
pub trait Predictor {
    /// Predict one value per row of `features`.
    ///
    /// # Errors
    /// [`crate::Error::InvalidParameter`] if the column count differs from
    /// the one the model was trained on.
    fn predict(&self, features: &Array2<f64>) -> Result<Array1<f64>>;
}

/// A training procedure that produces a [`Predictor`].
///
/// This is the seam at which the loss or optimizer can be swapped without
/// touching the pipeline that calls it.
pub trait Regressor {
    type Model: Predictor;

    /// Fit a model on encoded features and their aligned labels.
    fn fit(&self, data: &InMemoryDataset) -> Result<Self::Model>;
}
