//! Scaling transformers for feature normalization.
//!
//! | Transformer | Description | Use Case |
//! |-------------|-------------|----------|
//! | [`MinMaxScaler`] | Scale to [0, 1] or custom range | When bounded output is needed |

pub mod minmax;

pub use minmax::{FittedMinMaxScaler, MinMaxScaler, MinMaxScalerConfig};
