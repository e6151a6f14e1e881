//! End-to-end price pipeline: listing encoder followed by a regressor.

use crate::dataset::{InMemoryDataset, ListingDataset};
use crate::error::Result;
use crate::metrics::RegressionMetrics;
use crate::model::{Predictor, Regressor};
use crate::preprocessing::{FittedListingEncoder, FittedTransformer, ListingEncoder, Transformer};
use crate::trainer::PoissonTrainer;
use log::info;
use ndarray::Array1;

/// Untrained pipeline definition.
///
/// Fitting learns the encoder on the given rows, materializes the encoded
/// matrix once, and trains the regressor on it. The same definition can be
/// fitted any number of times, which is how cross-validation reuses it.
#[derive(Debug, Clone)]
pub struct PricePipeline<R: Regressor> {
    encoder: ListingEncoder,
    regressor: R,
}

impl<R: Regressor> PricePipeline<R> {
    pub fn new(encoder: ListingEncoder, regressor: R) -> Self {
        Self { encoder, regressor }
    }

    pub fn regressor(&self) -> &R {
        &self.regressor
    }

    /// Fit encoder and model on `train`.
    ///
    /// # Errors
    /// Propagates encoder errors as [`crate::Error::Preprocessing`] and
    /// training failures as [`crate::Error::Training`].
    pub fn fit(&self, train: &ListingDataset) -> Result<FittedPricePipeline<R::Model>> {
        let encoder = self.encoder.fit(train)?;
        let encoded = InMemoryDataset::new(encoder.transform(train)?, train.labels())?;
        let model = self.regressor.fit(&encoded)?;
        Ok(FittedPricePipeline { encoder, model })
    }
}

impl Default for PricePipeline<PoissonTrainer> {
    /// One-hot Make/Model, min-max scaling, L-BFGS Poisson regression.
    fn default() -> Self {
        Self::new(ListingEncoder::new(), PoissonTrainer::default())
    }
}

/// Fitted encoder and model, ready to price new listings.
#[derive(Debug, Clone)]
pub struct FittedPricePipeline<M: Predictor> {
    encoder: FittedListingEncoder,
    model: M,
}

impl<M: Predictor> FittedPricePipeline<M> {
    pub fn encoder(&self) -> &FittedListingEncoder {
        &self.encoder
    }

    pub fn model(&self) -> &M {
        &self.model
    }

    /// Predicted price for every row of `data`.
    pub fn predict(&self, data: &ListingDataset) -> Result<Array1<f64>> {
        let features = self.encoder.transform(data)?;
        self.model.predict(&features)
    }

    /// Score predictions against the labels of `data`.
    ///
    /// # Errors
    /// [`crate::Error::UndefinedMetric`] if the labels have zero variance.
    pub fn evaluate(&self, data: &ListingDataset) -> Result<RegressionMetrics> {
        let predictions = self.predict(data)?;
        let metrics = RegressionMetrics::compute(&data.labels(), &predictions)?;
        info!("Evaluated {} rows: {}", data.len(), metrics);
        Ok(metrics)
    }
}
