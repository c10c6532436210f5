//! Fitted preprocessing transforms.
//!
//! Both stages map one input row to one output row:
//!
//! - [`StandardScaler`]: per-feature standardization, `(x - mean) / scale`
//! - [`Pca`]: projection onto the fitted principal components
//!
//! Width checks live in the pipeline; implementations may assume
//! `x.len() == n_features_in()`.

mod pca;
mod scaler;

use ndarray::{Array1, ArrayView1};

pub use pca::Pca;
pub use scaler::StandardScaler;

/// A fitted row transform.
pub trait Transformer {
    /// Width of the rows this transform accepts.
    fn n_features_in(&self) -> usize;

    /// Width of the rows it produces.
    fn n_features_out(&self) -> usize;

    /// Transform one row.
    ///
    /// # Panics
    ///
    /// May panic if `x.len() != self.n_features_in()`.
    fn transform(&self, x: ArrayView1<'_, f64>) -> Array1<f64>;
}
