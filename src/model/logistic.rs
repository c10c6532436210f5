//! Binary logistic regression.

use ndarray::{Array1, ArrayView1};

use super::ProbabilisticClassifier;

/// Fitted binary logistic regression.
///
/// `P(positive | x) = sigmoid(coef · x + intercept)`
///
/// # Example
///
/// ```
/// use campaign_predictor::{LogisticRegression, ProbabilisticClassifier};
/// use ndarray::array;
///
/// let model = LogisticRegression::new(array![1.0, -1.0], 0.0);
///
/// assert_eq!(model.predict_probability(array![2.0, 2.0].view()), 0.5);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct LogisticRegression {
    coef: Array1<f64>,
    intercept: f64,
}

impl LogisticRegression {
    /// # Panics
    ///
    /// Panics if `coef` is empty.
    pub fn new(coef: Array1<f64>, intercept: f64) -> Self {
        assert!(!coef.is_empty(), "coef must have at least 1 entry");
        Self { coef, intercept }
    }

    #[inline]
    pub fn coef(&self) -> ArrayView1<'_, f64> {
        self.coef.view()
    }

    #[inline]
    pub fn intercept(&self) -> f64 {
        self.intercept
    }

    /// Raw margin (log-odds) before the sigmoid.
    #[inline]
    pub fn decision_function(&self, x: ArrayView1<'_, f64>) -> f64 {
        self.coef.dot(&x) + self.intercept
    }
}

impl ProbabilisticClassifier for LogisticRegression {
    #[inline]
    fn n_features_in(&self) -> usize {
        self.coef.len()
    }

    #[inline]
    fn predict_probability(&self, x: ArrayView1<'_, f64>) -> f64 {
        sigmoid(self.decision_function(x))
    }
}

/// Numerically stable sigmoid.
/// Clamps input to [-500, 500] to prevent overflow.
///
/// NaN propagates.
#[inline]
pub fn sigmoid(x: f64) -> f64 {
    let clamped = x.clamp(-500.0, 500.0);
    if clamped >= 0.0 {
        1.0 / (1.0 + (-clamped).exp())
    } else {
        let e = clamped.exp();
        e / (1.0 + e)
    }
}
