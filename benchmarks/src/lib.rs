//! Shared fixtures for the car-price benchmarks.
//!
//! Benchmarks run on synthetic listings so they need no data file and are
//! reproducible across machines.

use car_price::dataset::{InMemoryDataset, SyntheticListings};
use car_price::preprocessing::{FittedTransformer, ListingEncoder, Transformer};
use car_price::ListingDataset;
use ndarray::Array1;

/// Seed used for every fixture.
pub const FIXTURE_SEED: u64 = 17;

/// Row counts the scaling benchmarks sweep over.
pub const ROW_COUNTS: [usize; 4] = [100, 1_000, 10_000, 50_000];

/// `n` synthetic listings.
pub fn listings(n: usize) -> ListingDataset {
    SyntheticListings::new(n).with_seed(FIXTURE_SEED).generate()
}

/// `n` listings already encoded with an encoder fitted on themselves.
pub fn encoded(n: usize) -> InMemoryDataset {
    let data = listings(n);
    let encoder = ListingEncoder::new()
        .fit(&data)
        .unwrap_or_else(|e| panic!("fixture encoder failed to fit: {}", e));
    let x = encoder
        .transform(&data)
        .unwrap_or_else(|e| panic!("fixture encoding failed: {}", e));
    InMemoryDataset::new(x, data.labels())
        .unwrap_or_else(|e| panic!("fixture dataset is inconsistent: {}", e))
}

/// Label vector and a prediction vector offset by a fixed error.
pub fn prediction_pair(n: usize) -> (Array1<f64>, Array1<f64>) {
    let y_true = Array1::from_iter((0..n).map(|i| 10_000.0 + (i % 500) as f64 * 25.0));
    let y_pred = y_true.mapv(|v| v * 0.97 + 150.0);
    (y_true, y_pred)
}
