//! Validation, feature assembly and inference.
//!
//! [`Pipeline`] is the process-wide inference context: it owns the fitted
//! artifacts and the configuration, and is passed explicitly to whatever
//! serves requests. Loading happens once, before the first request.
//!
//! ```text
//! CampaignRequest ─► Validator ─► FeatureVector ─► scaler ─► reducer ─► classifier ─► Prediction
//!                      │
//!                      └─► ValidationError (no numeric work done)
//! ```

use std::fmt;

use ndarray::{Array1, ArrayView1};
use serde::Serialize;
use thiserror::Error;

use crate::config::PipelineConfig;
use crate::features::{FeatureVector, FEATURE_NAMES};
use crate::model::ProbabilisticClassifier;
use crate::persist::ArtifactSet;
use crate::preprocess::{StandardScaler, Transformer};
use crate::request::CampaignRequest;
use crate::validate::{ValidationError, Validator};

/// Probability at or above which a campaign is labelled likely to succeed.
pub const DECISION_THRESHOLD: f64 = 0.5;

// =============================================================================
// Errors
// =============================================================================

/// Pipeline stage, for error reporting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Scaler,
    Reducer,
    Classifier,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Scaler => "scaler",
            Self::Reducer => "reducer",
            Self::Classifier => "classifier",
        })
    }
}

/// The artifacts do not fit the feature vector or each other.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum TransformError {
    /// A stage received a row of the wrong width.
    #[error("{stage} expects {expected} features, got {actual}")]
    WidthMismatch {
        stage: Stage,
        expected: usize,
        actual: usize,
    },

    /// The scaler was fitted on differently ordered or named columns.
    #[error("scaler column {position} is '{found}', expected '{expected}'")]
    FeatureOrder {
        position: usize,
        expected: &'static str,
        found: String,
    },

    /// A stage produced NaN or infinity.
    #[error("{stage} produced a non-finite value")]
    NonFinite { stage: Stage },
}

/// Why a prediction could not be made.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictError {
    /// Request rejected before inference.
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// Inference failed on incompatible artifacts.
    #[error("inference failed: {0}")]
    Transform(#[from] TransformError),
}

impl PredictError {
    /// Stable machine-readable reason.
    pub fn reason(&self) -> &'static str {
        match self {
            Self::Validation(e) => e.reason(),
            Self::Transform(_) => "transform-incompatible",
        }
    }
}

// =============================================================================
// Prediction
// =============================================================================

/// Binary success label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Outcome {
    Likely,
    Unlikely,
}

impl Outcome {
    fn from_probability(probability: f64) -> Self {
        if probability >= DECISION_THRESHOLD {
            Self::Likely
        } else {
            Self::Unlikely
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Likely => "Likely to get a qualified candidate",
            Self::Unlikely => "Unlikely to succeed",
        })
    }
}

/// Success estimate for one campaign.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Prediction {
    /// Probability of the positive class, in `[0, 1]`.
    pub probability: f64,
    /// `Likely` iff `probability >= 0.5`.
    pub outcome: Outcome,
}

impl Prediction {
    pub fn from_probability(probability: f64) -> Self {
        Self {
            probability,
            outcome: Outcome::from_probability(probability),
        }
    }

    #[inline]
    pub fn is_positive(&self) -> bool {
        self.outcome == Outcome::Likely
    }

    /// Probability in percent, rounded to one decimal.
    pub fn percent(&self) -> f64 {
        (self.probability * 1000.0).round() / 10.0
    }
}

// =============================================================================
// Transform-and-predict
// =============================================================================

fn check_width(stage: Stage, expected: usize, actual: usize) -> Result<(), TransformError> {
    if expected != actual {
        return Err(TransformError::WidthMismatch {
            stage,
            expected,
            actual,
        });
    }
    Ok(())
}

fn check_finite(stage: Stage, values: &Array1<f64>) -> Result<(), TransformError> {
    if values.iter().all(|v| v.is_finite()) {
        Ok(())
    } else {
        Err(TransformError::NonFinite { stage })
    }
}

fn run_stage(
    stage: Stage,
    transform: &impl Transformer,
    x: ArrayView1<'_, f64>,
) -> Result<Array1<f64>, TransformError> {
    check_width(stage, transform.n_features_in(), x.len())?;
    let out = transform.transform(x);
    check_width(stage, transform.n_features_out(), out.len())?;
    check_finite(stage, &out)?;
    Ok(out)
}

/// Standardize, reduce and classify one feature vector.
///
/// Returns the positive-class probability. Pure: the same inputs always
/// give the same output.
///
/// # Errors
///
/// [`TransformError`] if a stage's input width does not match what it
/// receives, or a stage produces a non-finite value.
pub fn transform_and_predict(
    features: &FeatureVector,
    scaler: &impl Transformer,
    reducer: &impl Transformer,
    classifier: &impl ProbabilisticClassifier,
) -> Result<f64, TransformError> {
    let scaled = run_stage(Stage::Scaler, scaler, features.view())?;
    let reduced = run_stage(Stage::Reducer, reducer, scaled.view())?;

    check_width(Stage::Classifier, classifier.n_features_in(), reduced.len())?;
    let probability = classifier.predict_probability(reduced.view());
    if !probability.is_finite() {
        return Err(TransformError::NonFinite {
            stage: Stage::Classifier,
        });
    }
    Ok(probability.clamp(0.0, 1.0))
}

/// Check the scaler's recorded training columns, if any, against [`FEATURE_NAMES`].
fn check_feature_order(scaler: &StandardScaler) -> Result<(), TransformError> {
    let Some(names) = scaler.feature_names() else {
        return Ok(());
    };
    check_width(Stage::Scaler, FEATURE_NAMES.len(), names.len())?;
    for (position, (&expected, found)) in FEATURE_NAMES.iter().zip(names).enumerate() {
        if expected != found {
            return Err(TransformError::FeatureOrder {
                position,
                expected,
                found: found.clone(),
            });
        }
    }
    Ok(())
}

// =============================================================================
// Pipeline
// =============================================================================

/// Inference context: fitted artifacts plus configuration.
///
/// Immutable after construction; share it by reference (or `Arc`) between
/// concurrent callers.
///
/// # Example
///
/// ```
/// use campaign_predictor::testing::reference_artifacts;
/// use campaign_predictor::{CampaignRequest, Pipeline, PipelineConfig};
///
/// let pipeline = Pipeline::new(reference_artifacts(), PipelineConfig::default());
///
/// let request = CampaignRequest::builder()
///     .campaign_weeks(4)
///     .total_add_budget(1000)
///     .allocation([20; 5].into())
///     .build();
///
/// let prediction = pipeline.predict(&request).unwrap();
/// assert!((0.0..=1.0).contains(&prediction.probability));
/// ```
#[derive(Debug, Clone)]
pub struct Pipeline {
    artifacts: ArtifactSet,
    config: PipelineConfig,
    validator: Validator,
}

impl Pipeline {
    pub fn new(artifacts: ArtifactSet, config: PipelineConfig) -> Self {
        Self {
            validator: Validator::new(config.training_range),
            artifacts,
            config,
        }
    }

    pub fn artifacts(&self) -> &ArtifactSet {
        &self.artifacts
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Validate `request` and build its model input, without running the model.
    pub fn features(&self, request: &CampaignRequest) -> Result<FeatureVector, ValidationError> {
        let difficulty = self.config.difficulty.resolve(request.difficulty());
        let accepted = self.validator.validate(&request.with_difficulty(difficulty))?;
        Ok(FeatureVector::assemble(accepted))
    }

    /// Estimate the success probability of `request`.
    ///
    /// # Errors
    ///
    /// - [`PredictError::Validation`] if the request is rejected; no
    ///   numeric work is done in that case.
    /// - [`PredictError::Transform`] if the artifacts are incompatible with
    ///   the feature schema or with each other.
    pub fn predict(&self, request: &CampaignRequest) -> Result<Prediction, PredictError> {
        let features = self.features(request)?;

        let probability = check_feature_order(&self.artifacts.scaler)
            .and_then(|()| {
                transform_and_predict(
                    &features,
                    &self.artifacts.scaler,
                    &self.artifacts.reducer,
                    &self.artifacts.classifier,
                )
            })
            .inspect_err(|e| tracing::warn!(error = %e, "inference failed"))?;

        let prediction = Prediction::from_probability(probability);
        tracing::debug!(
            probability,
            outcome = ?prediction.outcome,
            "campaign scored"
        );
        Ok(prediction)
    }
}
