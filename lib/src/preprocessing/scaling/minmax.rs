//! Min-Max Scaler.
//!
//! Transforms features by scaling each feature to a given range (default [0, 1]).
//!
//! The transformation is given by:
//! ```text
//! X_scaled = (X - X_min) / (X_max - X_min) * (max - min) + min
//! ```
//!
//! Bounds are learned from the fit data only. Values outside the fit range
//! are not clamped, so transformed test data may fall outside [min, max].

use crate::preprocessing::error::PreprocessingError;
use crate::preprocessing::traits::{FittedTransformer, Transformer};
use ndarray::{Array1, Array2, Axis};

/// Configuration for MinMaxScaler.
#[derive(Clone, Debug)]
pub struct MinMaxScalerConfig {
    /// Minimum value of the target range.
    pub min: f64,
    /// Maximum value of the target range.
    pub max: f64,
}

impl Default for MinMaxScalerConfig {
    fn default() -> Self {
        Self { min: 0.0, max: 1.0 }
    }
}

/// MinMaxScaler transformer (unfitted).
#[derive(Clone, Debug, Default)]
pub struct MinMaxScaler {
    config: MinMaxScalerConfig,
}

impl MinMaxScaler {
    /// Create a new MinMaxScaler with default range [0, 1].
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the target range for scaling.
    ///
    /// # Panics
    /// Panics if `max <= min`.
    pub fn with_range(mut self, min: f64, max: f64) -> Self {
        assert!(max > min, "max must be greater than min");
        self.config.min = min;
        self.config.max = max;
        self
    }
}

impl Transformer for MinMaxScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;
    type Fitted = FittedMinMaxScaler;

    fn fit(&self, data: &Self::Input) -> Result<Self::Fitted, PreprocessingError> {
        let (rows, cols) = data.dim();

        if rows == 0 {
            return Err(PreprocessingError::EmptyData(
                "Cannot fit MinMaxScaler on empty data".to_string(),
            ));
        }
        if data.iter().any(|v| !v.is_finite()) {
            return Err(PreprocessingError::NumericalError(
                "MinMaxScaler input contains non-finite values".to_string(),
            ));
        }

        let data_min = data.fold_axis(Axis(0), f64::INFINITY, |&acc, &x| acc.min(x));
        let data_max = data.fold_axis(Axis(0), f64::NEG_INFINITY, |&acc, &x| acc.max(x));

        // Constant feature: divide by 1 so every value maps to the range minimum
        let data_range = (&data_max - &data_min).mapv(|r| if r == 0.0 { 1.0 } else { r });

        Ok(FittedMinMaxScaler {
            config: self.config.clone(),
            data_min,
            data_max,
            data_range,
            n_features: cols,
        })
    }
}

/// Fitted MinMaxScaler ready for inference.
#[derive(Clone, Debug)]
pub struct FittedMinMaxScaler {
    config: MinMaxScalerConfig,
    data_min: Array1<f64>,
    data_max: Array1<f64>,
    /// `data_max - data_min`, with zero ranges replaced by 1.
    data_range: Array1<f64>,
    n_features: usize,
}

impl FittedMinMaxScaler {
    /// Per-feature minimum observed during fit.
    pub fn data_min(&self) -> &Array1<f64> {
        &self.data_min
    }

    /// Per-feature maximum observed during fit.
    pub fn data_max(&self) -> &Array1<f64> {
        &self.data_max
    }

    /// Number of features seen during fit.
    pub fn n_features_in(&self) -> usize {
        self.n_features
    }
}

impl FittedTransformer for FittedMinMaxScaler {
    type Input = Array2<f64>;
    type Output = Array2<f64>;

    fn transform(&self, data: &Self::Input) -> Result<Self::Output, PreprocessingError> {
        let (_, cols) = data.dim();

        if cols != self.n_features {
            return Err(PreprocessingError::FeatureMismatch {
                expected_features: self.n_features,
                got_features: cols,
            });
        }

        let target_range = self.config.max - self.config.min;
        let scaled = (data - &self.data_min) / &self.data_range;
        Ok(scaled.mapv(|v| v * target_range + self.config.min))
    }

    fn n_features_out(&self) -> usize {
        self.n_features
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ndarray::array;

    fn create_test_data() -> Array2<f64> {
        array![[0.0, 1.0], [0.0, 1.0], [1.0, 3.0]]
    }

    #[test]
    fn test_minmax_scaler_fit() {
        let fitted = MinMaxScaler::new().fit(&create_test_data()).unwrap();

        assert_eq!(fitted.data_min(), &array![0.0, 1.0]);
        assert_eq!(fitted.data_max(), &array![1.0, 3.0]);
        assert_eq!(fitted.n_features_in(), 2);
    }

    #[test]
    fn test_minmax_scaler_transform() {
        let data = create_test_data();
        let transformed = MinMaxScaler::new().fit_transform(&data).unwrap();

        // First column: [0, 0, 1] -> [0, 0, 1]
        // Second column: [1, 1, 3] -> [0, 0, 1]
        assert_eq!(transformed, array![[0.0, 0.0], [0.0, 0.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_minmax_scaler_custom_range() {
        let data = create_test_data();
        let scaler = MinMaxScaler::new().with_range(-1.0, 1.0);
        let transformed = scaler.fit_transform(&data).unwrap();

        assert_eq!(transformed, array![[-1.0, -1.0], [-1.0, -1.0], [1.0, 1.0]]);
    }

    #[test]
    fn test_minmax_scaler_out_of_range_not_clamped() {
        let fitted = MinMaxScaler::new().fit(&create_test_data()).unwrap();
        let outside = array![[2.0, 0.0]];
        let transformed = fitted.transform(&outside).unwrap();

        assert!((transformed[[0, 0]] - 2.0).abs() < 1e-12);
        assert!((transformed[[0, 1]] + 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_minmax_scaler_feature_mismatch() {
        let fitted = MinMaxScaler::new().fit(&create_test_data()).unwrap();
        let wrong_data = array![[1.0, 2.0, 3.0]];
        let result = fitted.transform(&wrong_data);

        assert!(matches!(
            result,
            Err(PreprocessingError::FeatureMismatch {
                expected_features: 2,
                got_features: 3
            })
        ));
    }

    #[test]
    fn test_minmax_scaler_empty_data() {
        let data = Array2::<f64>::zeros((0, 2));
        assert!(MinMaxScaler::new().fit(&data).is_err());
    }

    #[test]
    fn test_minmax_scaler_rejects_nan() {
        let data = array![[1.0, f64::NAN]];
        assert!(matches!(
            MinMaxScaler::new().fit(&data),
            Err(PreprocessingError::NumericalError(_))
        ));
    }

    #[test]
    fn test_minmax_scaler_zero_range() {
        // All values the same - range is 0
        let data = array![[5.0, 5.0], [5.0, 5.0]];
        let transformed = MinMaxScaler::new().fit_transform(&data).unwrap();

        // All values should map to target_min (0)
        assert!(transformed.iter().all(|&v| v == 0.0));
    }

    #[test]
    #[should_panic(expected = "max must be greater than min")]
    fn test_minmax_scaler_invalid_range() {
        let _ = MinMaxScaler::new().with_range(1.0, 1.0);
    }
}
