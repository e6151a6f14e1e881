//! Run configuration.
//!
//! There is no configuration file and no flag parsing. Values come from
//! built-in defaults, optionally overridden by one positional argument and
//! two environment variables (see [`TrainConfig::from_env`]).

use crate::error::{Error, Result};
use crate::loss::Loss;
use crate::model_selection::KFold;
use crate::trainer::{Trainer, TrainerBuilder};
use log::debug;
use std::env;
use std::path::PathBuf;

/// Environment variable naming the listings CSV.
pub const DATA_PATH_ENV: &str = "CAR_PRICE_DATA";
/// Environment variable overriding the shuffle seed.
pub const SEED_ENV: &str = "CAR_PRICE_SEED";
/// Data path used when neither an argument nor [`DATA_PATH_ENV`] is given.
pub const DEFAULT_DATA_PATH: &str = "data/true_car_listings.csv";

/// Settings for one training run.
///
/// Defaults:
/// - `data_path`: `data/true_car_listings.csv`
/// - `test_fraction`: 0.2
/// - `n_folds`: 5
/// - `seed`: `Some(42)`; `None` shuffles from OS entropy
/// - `l2_weight`: 1.0
/// - `max_iterations`: 1000
/// - `tolerance`: 1e-7
/// - `history_size`: 20
#[derive(Debug, Clone, PartialEq)]
pub struct TrainConfig {
    pub data_path: PathBuf,
    pub test_fraction: f64,
    pub n_folds: usize,
    pub seed: Option<u64>,
    pub l2_weight: f64,
    pub max_iterations: usize,
    pub tolerance: f64,
    pub history_size: usize,
}

impl Default for TrainConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from(DEFAULT_DATA_PATH),
            test_fraction: 0.2,
            n_folds: 5,
            seed: Some(42),
            l2_weight: 1.0,
            max_iterations: 1000,
            tolerance: 1e-7,
            history_size: 20,
        }
    }
}

impl TrainConfig {
    /// Resolve the configuration from the process arguments and environment.
    ///
    /// The data path is the first positional argument, else `CAR_PRICE_DATA`,
    /// else [`DEFAULT_DATA_PATH`]. `CAR_PRICE_SEED` replaces the default seed.
    ///
    /// # Errors
    /// [`Error::InvalidParameter`] if `CAR_PRICE_SEED` is not an unsigned integer.
    pub fn from_env() -> Result<Self> {
        Self::resolve(
            env::args_os().nth(1).map(PathBuf::from),
            env::var_os(DATA_PATH_ENV).map(PathBuf::from),
            env::var(SEED_ENV).ok(),
        )
    }

    fn resolve(
        arg_path: Option<PathBuf>,
        env_path: Option<PathBuf>,
        env_seed: Option<String>,
    ) -> Result<Self> {
        let mut config = Self::default();
        if let Some(path) = arg_path.or(env_path) {
            config.data_path = path;
        }
        if let Some(raw) = env_seed {
            let seed = raw.trim().parse::<u64>().map_err(|e| {
                Error::InvalidParameter(format!("{}={:?} is not a valid seed: {}", SEED_ENV, raw, e))
            })?;
            config.seed = Some(seed);
        }
        debug!("Resolved configuration: {:?}", config);
        Ok(config)
    }

    pub fn with_data_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_path = path.into();
        self
    }

    pub fn with_test_fraction(mut self, fraction: f64) -> Self {
        self.test_fraction = fraction;
        self
    }

    pub fn with_n_folds(mut self, n_folds: usize) -> Self {
        self.n_folds = n_folds;
        self
    }

    pub fn with_seed(mut self, seed: Option<u64>) -> Self {
        self.seed = seed;
        self
    }

    pub fn with_l2_weight(mut self, weight: f64) -> Self {
        self.l2_weight = weight;
        self
    }

    pub fn with_max_iterations(mut self, iterations: usize) -> Self {
        self.max_iterations = iterations;
        self
    }

    /// Builder for a trainer using this configuration's hyperparameters.
    pub fn trainer_builder<L: Loss>(&self, loss_fn: L) -> TrainerBuilder<L> {
        Trainer::builder(loss_fn)
            .l2_weight(self.l2_weight)
            .max_iterations(self.max_iterations)
            .tolerance(self.tolerance)
            .history_size(self.history_size)
    }

    /// Fold splitter with this configuration's fold count and seed.
    pub fn kfold(&self) -> KFold {
        let kfold = KFold::new(self.n_folds);
        match self.seed {
            Some(seed) => kfold.with_random_state(seed),
            None => kfold.with_shuffle(true),
        }
    }
}
