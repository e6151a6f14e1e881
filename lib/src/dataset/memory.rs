use crate::error::{Error, Result};
use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

/// Encoded feature matrix and aligned labels, held fully in memory.
#[derive(Debug, Clone)]
pub struct InMemoryDataset {
    x: Array2<f64>,
    y: Array1<f64>,
}

impl InMemoryDataset {
    /// # Errors
    /// [`Error::InvalidParameter`] if `x` and `y` disagree on the number of
    /// rows or the dataset is empty.
    pub fn new(x: Array2<f64>, y: Array1<f64>) -> Result<Self> {
        if x.nrows() != y.len() {
            return Err(Error::InvalidParameter(format!(
                "x and y must have same length ({} vs {})",
                x.nrows(),
                y.len()
            )));
        }
        if x.nrows() == 0 {
            return Err(Error::InvalidParameter("Dataset is empty".into()));
        }
        Ok(Self { x, y })
    }

    pub fn len(&self) -> usize {
        self.y.len()
    }

    pub fn is_empty(&self) -> bool {
        self.y.is_empty()
    }

    pub fn n_features(&self) -> usize {
        self.x.ncols()
    }

    pub fn features(&self) -> ArrayView2<'_, f64> {
        self.x.view()
    }

    pub fn labels(&self) -> ArrayView1<'_, f64> {
        self.y.view()
    }
}
