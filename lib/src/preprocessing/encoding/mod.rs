//! Categorical feature encoding transformers.
//!
//! ## OneHotEncoder
//! Converts a categorical string column to one-hot (dummy) indicator columns.
//!
//! ```text
//! // Input:  ["Ford", "Honda", "Ford"]
//! // Output: [[1, 0], [0, 1], [1, 0]]
//! ```
//!
//! Vocabularies are learned during `fit` only. What happens to a value that
//! was never seen at fit time is controlled by [`HandleUnknown`].

mod one_hot;

pub use one_hot::{FittedOneHotEncoder, OneHotEncoder};

/// Strategy for handling unknown categories during transform.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HandleUnknown {
    /// Raise an error when unknown categories are encountered.
    Error,
    /// Encode unknown categories as an all-zero indicator vector.
    #[default]
    Ignore,
}
