//! Data preprocessing transformers.
//!
//! Transformers follow a two-phase type-state pattern: an unfitted
//! [`Transformer`] holds hyperparameters and learns from data in `fit`, which
//! returns a separate [`FittedTransformer`] that only knows how to `transform`.
//!
//! # Available Transformers
//!
//! ## Encoding
//! - [`OneHotEncoder`]: Categorical string column to indicator columns
//!
//! ## Scaling
//! - [`MinMaxScaler`]: Scale to [0, 1] or custom range
//!
//! ## Composite
//! - [`ListingEncoder`]: The full feature chain for car listings
//!
//! # Example
//!
//! ```
//! use car_price::dataset::{train_test_split, SyntheticListings};
//! use car_price::preprocessing::{FittedTransformer, ListingEncoder, Transformer};
//!
//! let listings = SyntheticListings::new(50).generate();
//! let (train, test) = train_test_split(&listings, 0.2, Some(42)).unwrap();
//!
//! // Learn vocabularies and bounds on the training rows only
//! let encoder = ListingEncoder::new().fit(&train).unwrap();
//! let x_test = encoder.transform(&test).unwrap();
//! assert_eq!(x_test.nrows(), 10);
//! ```

pub mod encoding;
pub mod error;
pub mod listing_encoder;
pub mod scaling;
pub mod traits;

// Re-export main types
pub use encoding::{FittedOneHotEncoder, HandleUnknown, OneHotEncoder};
pub use error::PreprocessingError;
pub use listing_encoder::{FittedListingEncoder, ListingEncoder};
pub use scaling::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerConfig};
pub use traits::{FittedTransformer, Transformer};
