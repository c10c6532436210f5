//! Principal component projection.

use ndarray::{Array1, Array2, ArrayView1, ArrayView2};

use super::Transformer;

/// Fitted PCA reducer.
///
/// Stores the principal axes as a matrix of shape
/// `[n_components, n_features]` (one component per row):
///
/// ```text
/// p = components · (x - mean)
/// p /= sqrt(explained_variance)      (whitened models only)
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Pca {
    mean: Array1<f64>,
    components: Array2<f64>,
    /// Per-component variance; present only for whitened models.
    explained_variance: Option<Array1<f64>>,
}

impl Pca {
    /// Unwhitened projection.
    ///
    /// # Panics
    ///
    /// Panics if `components` has no rows or its width differs from `mean`.
    pub fn new(mean: Array1<f64>, components: Array2<f64>) -> Self {
        assert!(components.nrows() >= 1, "components must have at least 1 row");
        assert_eq!(
            components.ncols(),
            mean.len(),
            "components width {} doesn't match mean length {}",
            components.ncols(),
            mean.len()
        );
        Self {
            mean,
            components,
            explained_variance: None,
        }
    }

    /// Scale each component to unit variance.
    ///
    /// # Panics
    ///
    /// Panics if `explained_variance` length differs from the number of components.
    pub fn whitened(mut self, explained_variance: Array1<f64>) -> Self {
        assert_eq!(
            explained_variance.len(),
            self.n_components(),
            "explained_variance length {} doesn't match n_components = {}",
            explained_variance.len(),
            self.n_components()
        );
        self.explained_variance = Some(explained_variance);
        self
    }

    #[inline]
    pub fn n_components(&self) -> usize {
        self.components.nrows()
    }

    #[inline]
    pub fn mean(&self) -> ArrayView1<'_, f64> {
        self.mean.view()
    }

    /// Component matrix, `[n_components, n_features]`.
    #[inline]
    pub fn components(&self) -> ArrayView2<'_, f64> {
        self.components.view()
    }

    /// Explained variance per component, if the model whitens.
    #[inline]
    pub fn explained_variance(&self) -> Option<ArrayView1<'_, f64>> {
        self.explained_variance.as_ref().map(|v| v.view())
    }

    #[inline]
    pub fn is_whitened(&self) -> bool {
        self.explained_variance.is_some()
    }
}

impl Transformer for Pca {
    #[inline]
    fn n_features_in(&self) -> usize {
        self.mean.len()
    }

    #[inline]
    fn n_features_out(&self) -> usize {
        self.n_components()
    }

    fn transform(&self, x: ArrayView1<'_, f64>) -> Array1<f64> {
        let centered = &x - &self.mean;
        let mut projected = self.components.dot(&centered);
        if let Some(variance) = &self.explained_variance {
            projected /= &variance.mapv(f64::sqrt);
        }
        projected
    }
}
