//! Model selection utilities: k-fold splitting and cross-validation.
//!
//! # Example
//!
//! ```
//! use car_price::model_selection::KFold;
//!
//! let kfold = KFold::new(5).with_random_state(42);
//! let folds = kfold.split(12).unwrap();
//! assert_eq!(folds.len(), 5);
//! // 12 = 3 + 3 + 2 + 2 + 2
//! assert_eq!(folds[0].1.len(), 3);
//! assert_eq!(folds[4].1.len(), 2);
//! ```

use crate::dataset::split::shuffled_indices;
use crate::dataset::ListingDataset;
use crate::error::{Error, Result};
use crate::metrics::RegressionMetrics;
use crate::model::Regressor;
use crate::pipeline::PricePipeline;
use log::info;

/// K-Fold cross-validator.
///
/// Splits `0..n_samples` into `n_splits` disjoint test folds whose sizes
/// differ by at most one; the first `n_samples % n_splits` folds get the
/// extra sample. Each fold's training set is everything outside it.
#[derive(Debug, Clone)]
pub struct KFold {
    n_splits: usize,
    shuffle: bool,
    random_state: Option<u64>,
}

impl KFold {
    /// Create a new K-Fold cross-validator without shuffling.
    pub fn new(n_splits: usize) -> Self {
        Self {
            n_splits,
            shuffle: false,
            random_state: None,
        }
    }

    /// Enable shuffling before splitting into folds.
    pub fn with_shuffle(mut self, shuffle: bool) -> Self {
        self.shuffle = shuffle;
        self
    }

    /// Set random state for reproducible shuffling.
    pub fn with_random_state(mut self, random_state: u64) -> Self {
        self.random_state = Some(random_state);
        self.shuffle = true; // Shuffle is implied when random_state is set
        self
    }

    pub fn n_splits(&self) -> usize {
        self.n_splits
    }

    /// Generate `(train_indices, test_indices)` for each fold.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `n_splits < 2` or exceeds `n_samples`.
    pub fn split(&self, n_samples: usize) -> Result<Vec<(Vec<usize>, Vec<usize>)>> {
        if self.n_splits < 2 {
            return Err(Error::InvalidParameter(format!(
                "k-fold needs at least 2 splits, got {}",
                self.n_splits
            )));
        }
        if self.n_splits > n_samples {
            return Err(Error::InvalidParameter(format!(
                "cannot make {} folds from {} samples",
                self.n_splits, n_samples
            )));
        }

        let indices = if self.shuffle {
            shuffled_indices(n_samples, self.random_state)
        } else {
            (0..n_samples).collect()
        };

        let fold_size = n_samples / self.n_splits;
        let remainder = n_samples % self.n_splits;

        let mut result = Vec::with_capacity(self.n_splits);
        let mut start = 0;
        for fold in 0..self.n_splits {
            let size = fold_size + usize::from(fold < remainder);
            let end = start + size;

            let test = indices[start..end].to_vec();
            let train: Vec<usize> = indices[..start]
                .iter()
                .chain(&indices[end..])
                .copied()
                .collect();
            result.push((train, test));
            start = end;
        }

        Ok(result)
    }
}

/// Per-fold metrics from [`cross_validate`].
#[derive(Debug, Clone)]
pub struct CrossValidationResult {
    pub fold_metrics: Vec<RegressionMetrics>,
}

impl CrossValidationResult {
    /// R² of each fold, in fold order.
    pub fn scores(&self) -> Vec<f64> {
        self.fold_metrics.iter().map(|m| m.r_squared).collect()
    }

    /// Calculate mean R² across folds
    pub fn mean(&self) -> f64 {
        if self.fold_metrics.is_empty() {
            return 0.0;
        }
        self.scores().iter().sum::<f64>() / self.fold_metrics.len() as f64
    }

    /// Calculate population standard deviation of fold R²
    pub fn std(&self) -> f64 {
        if self.fold_metrics.is_empty() {
            return 0.0;
        }
        let mean = self.mean();
        let variance = self
            .scores()
            .iter()
            .map(|&score| (score - mean).powi(2))
            .sum::<f64>()
            / self.fold_metrics.len() as f64;
        variance.sqrt()
    }

    pub fn min(&self) -> f64 {
        self.scores().into_iter().fold(f64::INFINITY, f64::min)
    }

    pub fn max(&self) -> f64 {
        self.scores().into_iter().fold(f64::NEG_INFINITY, f64::max)
    }
}

/// Cross-validate an untrained pipeline definition.
///
/// For each fold, the whole pipeline (encoder and model) is fitted on the
/// other folds and evaluated on the held-out one, so vocabularies and scaling
/// bounds never see the evaluation rows.
///
/// # Errors
/// Any fold failure aborts the run and is returned unchanged.
pub fn cross_validate<R: Regressor>(
    pipeline: &PricePipeline<R>,
    data: &ListingDataset,
    kfold: &KFold,
) -> Result<CrossValidationResult> {
    let folds = kfold.split(data.len())?;
    let mut fold_metrics = Vec::with_capacity(folds.len());

    for (i, (train_idx, test_idx)) in folds.iter().enumerate() {
        info!(
            "Cross-validation fold {}/{}: {} train / {} test rows",
            i + 1,
            folds.len(),
            train_idx.len(),
            test_idx.len()
        );
        let fitted = pipeline.fit(&data.subset(train_idx))?;
        fold_metrics.push(fitted.evaluate(&data.subset(test_idx))?);
    }

    Ok(CrossValidationResult { fold_metrics })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dataset::SyntheticListings;
    use proptest::prelude::*;
    use std::collections::HashSet;

    fn metrics(r_squared: f64) -> RegressionMetrics {
        RegressionMetrics {
            mean_absolute_error: 0.0,
            mean_squared_error: 0.0,
            root_mean_squared_error: 0.0,
            r_squared,
            loss: 0.0,
        }
    }

    #[test]
    fn test_kfold_without_shuffle_is_contiguous() {
        let folds = KFold::new(3).split(7).unwrap();
        assert_eq!(folds[0].1, vec![0, 1, 2]);
        assert_eq!(folds[1].1, vec![3, 4]);
        assert_eq!(folds[2].1, vec![5, 6]);
        assert_eq!(folds[1].0, vec![0, 1, 2, 5, 6]);
    }

    #[test]
    fn test_kfold_reproducible_with_seed() {
        let a = KFold::new(5).with_random_state(42).split(50).unwrap();
        let b = KFold::new(5).with_random_state(42).split(50).unwrap();
        assert_eq!(a, b);
    }

    #[test]
    fn test_kfold_invalid_splits() {
        assert!(matches!(
            KFold::new(1).split(10),
            Err(Error::InvalidParameter(_))
        ));
        assert!(matches!(
            KFold::new(5).split(4),
            Err(Error::InvalidParameter(_))
        ));
    }

    #[test]
    fn test_cv_result_statistics() {
        let result = CrossValidationResult {
            fold_metrics: vec![metrics(0.8), metrics(0.9), metrics(0.7)],
        };
        assert!((result.mean() - 0.8).abs() < 1e-12);
        assert!((result.std() - (0.02_f64 / 3.0).sqrt()).abs() < 1e-12);
        assert_eq!(result.min(), 0.7);
        assert_eq!(result.max(), 0.9);
        assert_eq!(result.scores(), vec![0.8, 0.9, 0.7]);
    }

    #[test]
    fn test_cv_result_empty() {
        let result = CrossValidationResult {
            fold_metrics: vec![],
        };
        assert_eq!(result.mean(), 0.0);
        assert_eq!(result.std(), 0.0);
    }

    #[test]
    fn test_cross_validate_synthetic() {
        let data = SyntheticListings::new(300).with_seed(8).generate();
        let kfold = KFold::new(5).with_random_state(42);
        let result = cross_validate(&PricePipeline::default(), &data, &kfold).unwrap();

        assert_eq!(result.fold_metrics.len(), 5);
        assert!(result.mean() > 0.5, "mean R2 = {}", result.mean());
        assert!(result.min() <= result.mean() && result.mean() <= result.max());
    }

    #[test]
    fn test_cross_validate_too_few_rows() {
        let data = SyntheticListings::new(3).generate();
        let result = cross_validate(&PricePipeline::default(), &data, &KFold::new(5));
        assert!(matches!(result, Err(Error::InvalidParameter(_))));
    }

    proptest! {
        #[test]
        fn prop_kfold_partitions(n in 2usize..200, k in 2usize..10, seed in any::<u64>()) {
            prop_assume!(k <= n);
            let folds = KFold::new(k).with_random_state(seed).split(n).unwrap();
            prop_assert_eq!(folds.len(), k);

            let mut seen = HashSet::new();
            let sizes: Vec<usize> = folds.iter().map(|(_, test)| test.len()).collect();
            let (min, max) = (*sizes.iter().min().unwrap(), *sizes.iter().max().unwrap());
            prop_assert!(max - min <= 1);

            for (train, test) in &folds {
                prop_assert_eq!(train.len() + test.len(), n);
                let train_set: HashSet<_> = train.iter().collect();
                prop_assert!(test.iter().all(|i| !train_set.contains(i)));
                for &i in test {
                    prop_assert!(seen.insert(i), "index {} in two test folds", i);
                }
            }
            prop_assert_eq!(seen.len(), n);
        }
    }
}
