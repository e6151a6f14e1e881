//! Core traits for preprocessing transformers.
//!
//! This module defines the two central traits:
//! - [`Transformer`]: Used during fitting; holds hyperparameters and learns from data.
//! - [`FittedTransformer`]: After fitting; holds learned state and transforms data.
//!
//! Splitting the two phases into separate types makes leakage visible in the
//! type system: the only way to obtain a fitted transformer is to call `fit`
//! on the data it is allowed to learn from, and `transform` never mutates it.

use crate::preprocessing::error::PreprocessingError;

/// Trait for unfitted transformers with hyperparameters.
///
/// # Associated Types
/// - `Input`: Data the transformer learns from and later transforms.
/// - `Output`: Transformed representation (typically `Array2<f64>`).
/// - `Fitted`: The corresponding fitted transformer type.
///
/// # Example
/// ```
/// use car_price::preprocessing::{FittedTransformer, MinMaxScaler, Transformer};
/// use ndarray::array;
///
/// let train = array![[0.0, 10.0], [5.0, 20.0]];
/// let fitted = MinMaxScaler::new().fit(&train).unwrap();
/// let scaled = fitted.transform(&array![[2.5, 15.0]]).unwrap();
/// assert_eq!(scaled, array![[0.5, 0.5]]);
/// ```
pub trait Transformer: Clone {
    /// Input data type.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;
    /// The fitted transformer type ready for inference.
    type Fitted: FittedTransformer<Input = Self::Input, Output = Self::Output>;

    /// Fit the transformer to the training data.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if:
    /// - Data is empty
    /// - Data contains invalid values (NaN, Inf)
    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError>;

    /// Fit the transformer and transform the same data in one step.
    fn fit_transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let fitted = self.fit(data)?;
        fitted.transform(data)
    }
}

/// Trait for fitted transformers ready for inference.
///
/// A fitted transformer is immutable: transforming the same input twice
/// yields identical output.
pub trait FittedTransformer: Clone {
    /// Input data type for transformation.
    type Input: ?Sized;
    /// Output data type after transformation.
    type Output;

    /// Transform data using learned parameters.
    ///
    /// # Errors
    /// Returns [`PreprocessingError`] if the input shape doesn't match what
    /// was seen during fit, or the input contains invalid values.
    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError>;

    /// Number of output columns produced by [`FittedTransformer::transform`].
    fn n_features_out(&self) -> usize;
}
