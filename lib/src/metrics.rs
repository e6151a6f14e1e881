//! Regression metrics.

use crate::error::{Error, Result};
use crate::loss::{Loss, SquaredLoss};
use ndarray::Array1;
use std::fmt;

/// Metrics for evaluating regression models.
pub struct Metrics;

impl Metrics {
    /// Calculate Mean Squared Error (MSE).
    ///
    /// MSE = mean((y_true - y_pred)^2)
    ///
    /// # Panics
    /// Panics if the arrays differ in length.
    pub fn mse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");
        if y_true.is_empty() {
            return 0.0;
        }
        SquaredLoss.loss(y_pred, y_true)
    }

    /// Calculate Root Mean Squared Error (RMSE).
    ///
    /// RMSE = sqrt(MSE), in the same units as the target.
    pub fn rmse(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        Self::mse(y_true, y_pred).sqrt()
    }

    /// Calculate Mean Absolute Error (MAE).
    ///
    /// MAE = mean(|y_true - y_pred|)
    ///
    /// # Panics
    /// Panics if the arrays differ in length.
    pub fn mae(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> f64 {
        assert_eq!(y_true.len(), y_pred.len(), "Arrays must have the same length");
        if y_true.is_empty() {
            return 0.0;
        }
        (y_true - y_pred).mapv(f64::abs).mean().unwrap_or(0.0)
    }

    /// Calculate R² (coefficient of determination).
    ///
    /// R² = 1 - SS_res / SS_tot, where:
    /// - SS_res = Σ(y_true - y_pred)²
    /// - SS_tot = Σ(y_true - mean(y_true))²
    ///
    /// 1.0 means perfect prediction; it is negative when the model does worse
    /// than predicting the mean.
    ///
    /// # Errors
    /// - [`Error::InvalidParameter`] if the arrays differ in length.
    /// - [`Error::UndefinedMetric`] if there are no labels or they have zero variance.
    pub fn r_squared(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<f64> {
        if y_true.len() != y_pred.len() {
            return Err(Error::InvalidParameter(format!(
                "label and prediction lengths differ ({} vs {})",
                y_true.len(),
                y_pred.len()
            )));
        }
        let Some(mean) = y_true.mean() else {
            return Err(Error::UndefinedMetric(
                "R-squared of an empty label set".to_string(),
            ));
        };

        let ss_res: f64 = y_true
            .iter()
            .zip(y_pred.iter())
            .map(|(t, p)| (t - p).powi(2))
            .sum();
        let ss_tot: f64 = y_true.iter().map(|t| (t - mean).powi(2)).sum();

        if ss_tot == 0.0 {
            return Err(Error::UndefinedMetric(
                "R-squared is undefined for labels with zero variance".to_string(),
            ));
        }

        Ok(1.0 - ss_res / ss_tot)
    }
}

/// Goodness-of-fit summary for one evaluation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RegressionMetrics {
    pub mean_absolute_error: f64,
    pub mean_squared_error: f64,
    pub root_mean_squared_error: f64,
    pub r_squared: f64,
    /// Mean squared loss of the predictions.
    pub loss: f64,
}

impl RegressionMetrics {
    /// # Errors
    /// Same as [`Metrics::r_squared`].
    pub fn compute(y_true: &Array1<f64>, y_pred: &Array1<f64>) -> Result<Self> {
        let r_squared = Metrics::r_squared(y_true, y_pred)?;
        let mse = Metrics::mse(y_true, y_pred);
        Ok(Self {
            mean_absolute_error: Metrics::mae(y_true, y_pred),
            mean_squared_error: mse,
            root_mean_squared_error: mse.sqrt(),
            r_squared,
            loss: SquaredLoss.loss(y_pred, y_true),
        })
    }
}

impl fmt::Display for RegressionMetrics {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "R2={:.4} MAE={:.2} MSE={:.2} RMSE={:.2}",
            self.r_squared,
            self.mean_absolute_error,
            self.mean_squared_error,
            self.root_mean_squared_error
        )
    }
}
