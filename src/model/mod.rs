//! Fitted probabilistic classifiers.
//!
//! - [`LogisticRegression`]: binary logistic model over the reduced features
//! - [`ProbabilisticClassifier`]: the seam the pipeline predicts through

mod logistic;

use ndarray::ArrayView1;

pub use logistic::{sigmoid, LogisticRegression};

/// A fitted binary classifier with probability output.
pub trait ProbabilisticClassifier {
    /// Width of the rows this classifier accepts.
    fn n_features_in(&self) -> usize;

    /// Probability of the positive class for one row, in `[0, 1]`.
    ///
    /// # Panics
    ///
    /// May panic if `x.len() != self.n_features_in()`.
    fn predict_probability(&self, x: ArrayView1<'_, f64>) -> f64;
}
