//! Standardization with stored per-feature statistics.

use ndarray::{Array1, ArrayView1};

use super::Transformer;

/// Fitted standard scaler.
///
/// Computes `z = (x - mean) / scale` per feature. A scaler fitted without
/// centering has no `mean`; one fitted without scaling has no `scale`.
/// Constant features are expected to carry a scale of `1.0`, which is what
/// the fitting library stores for zero variance.
///
/// # Example
///
/// ```
/// use campaign_predictor::{StandardScaler, Transformer};
/// use ndarray::array;
///
/// let scaler = StandardScaler::new(array![10.0, 0.0], array![2.0, 1.0]);
/// let z = scaler.transform(array![14.0, 3.0].view());
///
/// assert_eq!(z, array![2.0, 3.0]);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct StandardScaler {
    n_features: usize,
    mean: Option<Array1<f64>>,
    scale: Option<Array1<f64>>,
    /// Column names seen during fitting, if recorded.
    feature_names: Option<Vec<String>>,
}

impl StandardScaler {
    /// Scaler that both centers and scales.
    ///
    /// # Panics
    ///
    /// Panics if `mean` and `scale` differ in length.
    pub fn new(mean: Array1<f64>, scale: Array1<f64>) -> Self {
        assert_eq!(
            mean.len(),
            scale.len(),
            "mean length {} doesn't match scale length {}",
            mean.len(),
            scale.len()
        );
        Self::from_parts(mean.len(), Some(mean), Some(scale))
    }

    /// Scaler with optional statistics.
    ///
    /// # Panics
    ///
    /// Panics if a provided statistic's length differs from `n_features`.
    pub fn from_parts(
        n_features: usize,
        mean: Option<Array1<f64>>,
        scale: Option<Array1<f64>>,
    ) -> Self {
        for (name, stat) in [("mean", &mean), ("scale", &scale)] {
            if let Some(values) = stat {
                assert_eq!(
                    values.len(),
                    n_features,
                    "{name} length {} doesn't match n_features = {n_features}",
                    values.len()
                );
            }
        }
        Self {
            n_features,
            mean,
            scale,
            feature_names: None,
        }
    }

    /// Attach the column names the scaler was fitted on.
    pub fn with_feature_names(mut self, names: Vec<String>) -> Self {
        self.feature_names = Some(names);
        self
    }

    #[inline]
    pub fn mean(&self) -> Option<ArrayView1<'_, f64>> {
        self.mean.as_ref().map(|m| m.view())
    }

    #[inline]
    pub fn scale(&self) -> Option<ArrayView1<'_, f64>> {
        self.scale.as_ref().map(|s| s.view())
    }

    #[inline]
    pub fn feature_names(&self) -> Option<&[String]> {
        self.feature_names.as_deref()
    }
}

impl Transformer for StandardScaler {
    #[inline]
    fn n_features_in(&self) -> usize {
        self.n_features
    }

    #[inline]
    fn n_features_out(&self) -> usize {
        self.n_features
    }

    fn transform(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        let mut z = x.to_owned();
        if let Some(mean) = &self.mean {
            z -= mean;
        }
        if let Some(scale) = &self.scale {
            z /= scale;
        }
        z
    }
}
