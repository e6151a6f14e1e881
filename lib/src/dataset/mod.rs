//! Listing data and the in-memory containers built from it.
//!
//! # Core Concepts
//!
//! - **CarListing** — one row of the input table: the `Price` label plus the
//!   `Year`, `Mileage`, `Make` and `Model` attributes.
//! - **ListingDataset** — an ordered, immutable sequence of listings. Splitting
//!   and fold selection produce new datasets by index, never by mutation.
//! - **InMemoryDataset** — the encoded `(X, y)` pair materialized once before
//!   training so every optimizer iteration reuses the same matrix.
//!
//! # Example
//!
//! ```rust
//! use car_price::dataset::{train_test_split, SyntheticListings};
//!
//! let listings = SyntheticListings::new(100).with_seed(7).generate();
//! let (train, test) = train_test_split(&listings, 0.2, Some(42)).unwrap();
//! assert_eq!(train.len(), 80);
//! assert_eq!(test.len(), 20);
//! ```

use ndarray::Array1;
use serde::Deserialize;

pub mod loader;
pub mod memory;
pub mod split;
pub mod synthetic;

pub use self::loader::{load_listings, REQUIRED_COLUMNS};
pub use self::memory::InMemoryDataset;
pub use self::split::train_test_split;
pub use self::synthetic::SyntheticListings;

/// A single used-car listing.
///
/// Field names follow the CSV header; any other columns in the file are
/// ignored during deserialization.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct CarListing {
    /// Sale price, the regression target.
    #[serde(rename = "Price")]
    pub price: f64,
    #[serde(rename = "Year")]
    pub year: f64,
    #[serde(rename = "Mileage")]
    pub mileage: f64,
    #[serde(rename = "Make")]
    pub make: String,
    #[serde(rename = "Model")]
    pub model: String,
}

impl CarListing {
    pub fn new(
        price: f64,
        year: f64,
        mileage: f64,
        make: impl Into<String>,
        model: impl Into<String>,
    ) -> Self {
        Self {
            price,
            year,
            mileage,
            make: make.into(),
            model: model.into(),
        }
    }
}

/// Ordered collection of listings, immutable once built.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ListingDataset {
    rows: Vec<CarListing>,
}

impl ListingDataset {
    pub fn new(rows: Vec<CarListing>) -> Self {
        Self { rows }
    }

    /// Number of listings.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn rows(&self) -> &[CarListing] {
        &self.rows
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CarListing> {
        self.rows.iter()
    }

    /// Build a new dataset from the rows at `indices`, in the given order.
    ///
    /// # Panics
    /// Panics if an index is out of bounds.
    pub fn subset(&self, indices: &[usize]) -> Self {
        Self {
            rows: indices.iter().map(|&i| self.rows[i].clone()).collect(),
        }
    }

    /// Price labels as a vector aligned with [`Self::rows`].
    pub fn labels(&self) -> Array1<f64> {
        self.rows.iter().map(|r| r.price).collect()
    }
}

impl From<Vec<CarListing>> for ListingDataset {
    fn from(rows: Vec<CarListing>) -> Self {
        Self::new(rows)
    }
}

impl<'a> IntoIterator for &'a ListingDataset {
    type Item = &'a CarListing;
    type IntoIter = std::slice::Iter<'a, CarListing>;

    fn into_iter(self) -> Self::IntoIter {
        self.rows.iter()
    }
}
