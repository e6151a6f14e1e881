//! Feature encoder for car listings.
//!
//! Produces one numeric row per listing:
//!
//! ```text
//! concat(Year, Mileage, one_hot(Make), one_hot(Model))  ->  min-max to [0, 1]
//! ```
//!
//! Vocabularies and min-max bounds come from the fit dataset only and are
//! applied unchanged to anything transformed afterwards.

use crate::dataset::ListingDataset;
use crate::preprocessing::encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::scaling::{FittedMinMaxScaler, MinMaxScaler};
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use log::debug;
use ndarray::{concatenate, Array2, Axis};

/// Number of numeric columns placed ahead of the one-hot blocks.
const N_NUMERIC: usize = 2;

/// Unfitted listing encoder.
///
/// # Example
/// ```
/// use car_price::dataset::{CarListing, ListingDataset};
/// use car_price::preprocessing::{FittedTransformer, ListingEncoder, Transformer};
///
/// let train = ListingDataset::new(vec![
///     CarListing::new(9000.0, 2010.0, 80000.0, "Ford", "Focus"),
///     CarListing::new(14000.0, 2016.0, 20000.0, "Honda", "Civic"),
/// ]);
/// let fitted = ListingEncoder::new().fit(&train).unwrap();
/// // Year, Mileage, 2 makes, 2 models
/// assert_eq!(fitted.n_features_out(), 6);
/// assert_eq!(fitted.transform(&train).unwrap().dim(), (2, 6));
/// ```
#[derive(Clone, Debug, Default)]
pub struct ListingEncoder {
    handle_unknown: HandleUnknown,
}

impl ListingEncoder {
    /// Encoder that maps unseen Make/Model values to all-zero indicators.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_handle_unknown(mut self, strategy: HandleUnknown) -> Self {
        self.handle_unknown = strategy;
        self
    }
}

impl Transformer for ListingEncoder {
    type Input = ListingDataset;
    type Output = Array2<f64>;
    type Fitted = FittedListingEncoder;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        if data.is_empty() {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit ListingEncoder on an empty dataset".to_string(),
            ));
        }

        let one_hot = OneHotEncoder::new().with_handle_unknown(self.handle_unknown);
        let make = one_hot.fit_values(data.iter().map(|r| r.make.as_str()))?;
        let model = one_hot.fit_values(data.iter().map(|r| r.model.as_str()))?;

        let raw = concat_features(data, &make, &model)?;
        let scaler = MinMaxScaler::new().fit(&raw)?;

        debug!(
            "Fitted listing encoder: {} makes, {} models, {} output features",
            make.categories().len(),
            model.categories().len(),
            scaler.n_features_out()
        );

        Ok(FittedListingEncoder {
            make,
            model,
            scaler,
        })
    }
}

/// Fitted listing encoder ready for inference.
#[derive(Clone, Debug)]
pub struct FittedListingEncoder {
    make: FittedOneHotEncoder,
    model: FittedOneHotEncoder,
    scaler: FittedMinMaxScaler,
}

impl FittedListingEncoder {
    pub fn make_vocabulary(&self) -> &[String] {
        self.make.categories()
    }

    pub fn model_vocabulary(&self) -> &[String] {
        self.model.categories()
    }

    /// Column names of the encoded matrix, in order.
    pub fn feature_names(&self) -> Vec<String> {
        let mut names = vec!["Year".to_string(), "Mileage".to_string()];
        names.extend(self.make.categories().iter().map(|c| format!("Make={}", c)));
        names.extend(self.model.categories().iter().map(|c| format!("Model={}", c)));
        names
    }
}

impl FittedTransformer for FittedListingEncoder {
    type Input = ListingDataset;
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let raw = concat_features(data, &self.make, &self.model)?;
        self.scaler.transform(&raw)
    }

    fn n_features_out(&self) -> usize {
        N_NUMERIC + self.make.n_features_out() + self.model.n_features_out()
    }
}

/// `[Year, Mileage, MakeEncoded, ModelEncoded]` before scaling.
fn concat_features(
    data: &ListingDataset,
    make: &FittedOneHotEncoder,
    model: &FittedOneHotEncoder,
) -> Result<Array2<f64>, PreprocessingError> {
    let numeric = Array2::from_shape_fn((data.len(), N_NUMERIC), |(i, j)| {
        let row = &data.rows()[i];
        if j == 0 {
            row.year
        } else {
            row.mileage
        }
    });
    let make_encoded = make.transform_values(data.iter().map(|r| r.make.as_str()))?;
    let model_encoded = model.transform_values(data.iter().map(|r| r.model.as_str()))?;

    concatenate(
        Axis(1),
        &[numeric.view(), make_encoded.view(), model_encoded.view()],
    )
    .map_err(|e| PreprocessingError::InvalidShape {
        expected: format!("{} aligned rows", data.len()),
        got: e.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::{CarListing, SyntheticListings};

    fn train_set() -> ListingDataset {
        ListingDataset::new(vec![
            CarListing::new(9000.0, 2010.0, 80000.0, "Ford", "Focus"),
            CarListing::new(14000.0, 2016.0, 20000.0, "Honda", "Civic"),
            CarListing::new(11000.0, 2012.0, 50000.0, "Ford", "Fiesta"),
        ])
    }

    #[test]
    fn test_layout_and_vocabularies() {
        let fitted = ListingEncoder::new().fit(&train_set()).unwrap();
        assert_eq!(fitted.make_vocabulary(), &["Ford", "Honda"]);
        assert_eq!(fitted.model_vocabulary(), &["Civic", "Fiesta", "Focus"]);
        assert_eq!(
            fitted.feature_names(),
            vec![
                "Year",
                "Mileage",
                "Make=Ford",
                "Make=Honda",
                "Model=Civic",
                "Model=Fiesta",
                "Model=Focus"
            ]
        );
        assert_eq!(fitted.n_features_out(), 7);
    }

    #[test]
    fn test_transform_values() {
        let train = train_set();
        let encoded = ListingEncoder::new().fit_transform(&train).unwrap();

        // Year 2010 is the minimum, mileage 80000 the maximum
        assert_eq!(encoded.row(0).to_vec(), vec![0.0, 1.0, 1.0, 0.0, 0.0, 0.0, 1.0]);
        // Year 2016 is the maximum, mileage 20000 the minimum
        assert_eq!(encoded.row(1).to_vec(), vec![1.0, 0.0, 0.0, 1.0, 1.0, 0.0, 0.0]);
        let row2 = encoded.row(2);
        assert!((row2[0] - 2.0 / 6.0).abs() < 1e-12);
        assert!((row2[1] - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_training_columns_span_unit_interval() {
        let train = SyntheticListings::new(200).with_seed(5).generate();
        let encoded = ListingEncoder::new().fit_transform(&train).unwrap();

        for col in encoded.columns() {
            let min = col.iter().copied().fold(f64::INFINITY, f64::min);
            let max = col.iter().copied().fold(f64::NEG_INFINITY, f64::max);
            assert!(min >= 0.0 && max <= 1.0);
            assert_eq!(min, 0.0);
            assert_eq!(max, 1.0);
        }
    }

    #[test]
    fn test_transform_is_deterministic() {
        let train = SyntheticListings::new(100).with_seed(9).generate();
        let fitted = ListingEncoder::new().fit(&train).unwrap();
        let a = fitted.transform(&train).unwrap();
        let b = fitted.transform(&train).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_unseen_category_encodes_to_zeros() {
        let fitted = ListingEncoder::new().fit(&train_set()).unwrap();
        let test = ListingDataset::new(vec![CarListing::new(
            20000.0, 2013.0, 40000.0, "Tesla", "Focus",
        )]);
        let encoded = fitted.transform(&test).unwrap();

        // Make block is all zeros, Model block still hits "Focus"
        assert_eq!(encoded.row(0).slice(ndarray::s![2..4]).to_vec(), vec![0.0, 0.0]);
        assert_eq!(encoded.row(0).slice(ndarray::s![4..]).to_vec(), vec![0.0, 0.0, 1.0]);
        // Vocabulary not extended
        assert_eq!(fitted.make_vocabulary().len(), 2);
        assert_eq!(fitted.n_features_out(), 7);
    }

    #[test]
    fn test_out_of_range_not_clamped() {
        let fitted = ListingEncoder::new().fit(&train_set()).unwrap();
        let test = ListingDataset::new(vec![CarListing::new(
            30000.0, 2022.0, 0.0, "Ford", "Focus",
        )]);
        let encoded = fitted.transform(&test).unwrap();
        assert!(encoded[[0, 0]] > 1.0);
        assert!(encoded[[0, 1]] < 0.0);
    }

    #[test]
    fn test_fit_empty_dataset() {
        let result = ListingEncoder::new().fit(&ListingDataset::default());
        assert!(matches!(result, Err(PreprocessingError::EmptyData(_))));
    }

    #[test]
    fn test_unknown_error_strategy() {
        let fitted = ListingEncoder::new()
            .with_handle_unknown(HandleUnknown::Error)
            .fit(&train_set())
            .unwrap();
        let test = ListingDataset::new(vec![CarListing::new(
            1.0, 2013.0, 1.0, "Tesla", "Focus",
        )]);
        assert!(fitted.transform(&test).is_err());
    }
}
