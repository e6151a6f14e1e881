//! One-hot encoding for categorical features.
//!
//! Transforms a column of categorical string values to one-hot encoded vectors.

use crate::preprocessing::encoding::HandleUnknown;
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::Array2;
use std::collections::{BTreeSet, HashMap};

/// One-hot encoder for a single categorical column.
///
/// The encoder learns the set of distinct values present during fitting.
/// Categories are ordered lexicographically, so the output layout depends only
/// on the set of values and not on row order.
///
/// # Example
/// ```
/// use car_price::preprocessing::{FittedTransformer, OneHotEncoder, Transformer};
///
/// let makes = vec!["Honda".to_string(), "Ford".to_string(), "Honda".to_string()];
/// let fitted = OneHotEncoder::new().fit(&makes).unwrap();
/// assert_eq!(fitted.categories(), &["Ford".to_string(), "Honda".to_string()]);
///
/// let encoded = fitted.transform(&makes).unwrap();
/// assert_eq!(encoded.row(0).to_vec(), vec![0.0, 1.0]);
/// assert_eq!(encoded.row(1).to_vec(), vec![1.0, 0.0]);
/// ```
#[derive(Clone, Debug, Default)]
pub struct OneHotEncoder {
    /// How to handle unknown categories during transform.
    handle_unknown: HandleUnknown,
}

impl OneHotEncoder {
    /// Create a new OneHotEncoder that ignores unknown categories.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the strategy for handling unknown categories.
    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }

    /// Fit on any iterator of string values.
    pub fn fit_values<'a, I>(&self, values: I) -> Result<FittedOneHotEncoder, PreprocessingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let distinct: BTreeSet<&str> = values.into_iter().collect();
        if distinct.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit OneHotEncoder on empty data".to_string(),
            ));
        }

        let categories: Vec<String> = distinct.into_iter().map(str::to_owned).collect();
        let index = categories
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), i))
            .collect();

        Ok(FittedOneHotEncoder {
            categories,
            index,
            handle_unknown: self.handle_unknown,
        })
    }
}

impl Transformer for OneHotEncoder {
    type Input = [String];
    type Output = Array2<f64>;
    type Fitted = FittedOneHotEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        self.fit_values(data.iter().map(String::as_str))
    }
}

/// Fitted OneHotEncoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedOneHotEncoder {
    /// Distinct categories, sorted.
    categories: Vec<String>,
    /// Category -> output column.
    index: HashMap<String, usize>,
    handle_unknown: HandleUnknown,
}

impl FittedOneHotEncoder {
    /// Get the categories learned during fit, in output column order.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Output column of `value`, or `None` if it was not seen during fit.
    pub fn category_index(&self, value: &str) -> Option<usize> {
        self.index.get(value).copied()
    }

    /// Transform any iterator of string values into an indicator matrix.
    ///
    /// The row count of the output equals the number of values yielded.
    pub fn transform_values<'a, I>(&self, values: I) -> Result<Array2<f64>, PreprocessingError>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let values: Vec<&str> = values.into_iter().collect();
        let mut result = Array2::<f64>::zeros((values.len(), self.categories.len()));

        for (row, value) in values.iter().enumerate() {
            match self.category_index(value) {
                Some(col) => result[[row, col]] = 1.0,
                None => {
                    if self.handle_unknown == HandleUnknown::Error {
                        return Err(PreprocessingError::InvalidParameter(format!(
                            "Unknown category {:?} at row {}",
                            value, row
                        )));
                    }
                    // With Ignore, leave as zeros
                }
            }
        }

        Ok(result)
    }
}

impl FittedTransformer for FittedOneHotEncoder {
    type Input = [String];
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        self.transform_values(data.iter().map(String::as_str))
    }

    fn n_features_out(&self) -> usize {
        self.categories.len()
    }
}
