//! # car-price
//!
//! Used-car price regression: load listings from CSV, encode them into a
//! numeric feature matrix, fit an L-BFGS Poisson regression, and score it with
//! R-squared on a held-out split and by k-fold cross-validation.
//!
//! ## Core Design Principles
//!
//! - **Stateful Type Safety**: Transformers and models carry their training state in
//!   the type system (`ListingEncoder` vs `FittedListingEncoder`, `Unfitted` vs
//!   `Fitted`), so nothing can be applied before it has been fitted.
//! - **Training/Inference Separation**: Fitted models contain only prediction parameters;
//!   training logic lives in separate components (losses, optimizers, trainers).
//! - **No leakage**: vocabularies and scaling bounds are learned from training rows only.
//!
//! ## Quick Start
//!
//! ```rust
//! use car_price::dataset::{train_test_split, SyntheticListings};
//! use car_price::pipeline::PricePipeline;
//!
//! let listings = SyntheticListings::new(300).with_seed(1).generate();
//! let (train, test) = train_test_split(&listings, 0.2, Some(42)).unwrap();
//!
//! let fitted = PricePipeline::default().fit(&train).unwrap();
//! let metrics = fitted.evaluate(&test).unwrap();
//! assert!(metrics.r_squared > 0.5);
//! ```
//!
//! ## Module Structure
//!
//! - `dataset`: Listing rows, CSV loading, train/test split, synthetic data
//! - `preprocessing`: One-hot encoding, min-max scaling, the listing encoder
//! - `model`: Linear model with link function, `Regressor`/`Predictor` traits
//! - `loss`: Poisson and squared losses
//! - `optimizer`: L-BFGS with Wolfe line search
//! - `trainer`: Objective assembly and training orchestration
//! - `metrics`: R-squared and error metrics
//! - `model_selection`: K-fold splitting and cross-validation
//! - `pipeline`: Encoder + regressor bundle
//! - `config`: Run defaults and environment overrides

pub mod config;

/// Listing data, CSV loading and partitioning.
pub mod dataset;

pub mod error;

/// Differentiable loss functions for model training.
pub mod loss;

pub mod metrics;

/// Machine learning models with compile-time state safety.
pub mod model;

pub mod model_selection;

/// Optimization algorithms for parameter fitting.
pub mod optimizer;

pub mod pipeline;

/// Data preprocessing transformers.
pub mod preprocessing;

/// Weight regularization strategies.
pub mod regularizers;

/// High-level training orchestration.
pub mod trainer;

pub use config::TrainConfig;
pub use dataset::{load_listings, train_test_split, CarListing, ListingDataset};
pub use error::{Error, Result};
pub use metrics::RegressionMetrics;
pub use model_selection::{cross_validate, CrossValidationResult, KFold};
pub use pipeline::{FittedPricePipeline, PricePipeline};
pub use trainer::{PoissonTrainer, Trainer};
