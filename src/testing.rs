//! Testing utilities for campaign-predictor.
//!
//! Deterministic reference artifacts and fixture types shared by unit tests,
//! integration tests and benchmarks.
//!
//! ```
//! use campaign_predictor::testing::{even_split_request, reference_pipeline};
//!
//! let prediction = reference_pipeline().predict(&even_split_request()).unwrap();
//! assert!((0.0..=1.0).contains(&prediction.probability));
//! ```

use ndarray::array;
use serde::Deserialize;

use crate::config::PipelineConfig;
use crate::features::FEATURE_NAMES;
use crate::model::LogisticRegression;
use crate::persist::ArtifactSet;
use crate::pipeline::Pipeline;
use crate::preprocess::{Pca, StandardScaler};
use crate::request::{CampaignRequest, Difficulty};

// =============================================================================
// Constants
// =============================================================================

/// Tolerance for comparing probabilities against recorded expectations.
pub const DEFAULT_TOLERANCE: f64 = 1e-9;

// =============================================================================
// Reference artifacts
// =============================================================================

/// Scaler, 3-component PCA and logistic model with plausible fitted values.
///
/// Identical to the JSON artifacts under `tests/test-cases/artifacts`.
pub fn reference_artifacts() -> ArtifactSet {
    let scaler = StandardScaler::new(
        array![4.62, 1478.5, 1.04, 21.3, 24.8, 19.6, 20.1, 14.2, 100.0],
        // sum_budget_pct never varies, so its scale is 1
        array![1.71, 612.4, 0.79, 9.4, 10.2, 8.7, 9.9, 7.5, 1.0],
    )
    .with_feature_names(FEATURE_NAMES.iter().map(|s| s.to_string()).collect());

    let reducer = Pca::new(
        array![0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0, 0.0],
        array![
            [0.42, 0.51, 0.08, -0.21, 0.33, 0.38, -0.29, -0.41, 0.0],
            [0.36, -0.12, 0.61, 0.44, -0.37, 0.18, 0.25, -0.22, 0.0],
            [-0.28, 0.31, 0.19, 0.52, 0.26, -0.47, -0.38, 0.27, 0.0],
        ],
    );

    let classifier = LogisticRegression::new(array![0.84, -0.37, 0.52], -0.18);

    ArtifactSet {
        scaler,
        reducer,
        classifier,
    }
}

/// [`Pipeline`] over [`reference_artifacts`] with the default configuration.
pub fn reference_pipeline() -> Pipeline {
    Pipeline::new(reference_artifacts(), PipelineConfig::default())
}

/// Four weeks, EUR 1000, medium difficulty, 20% per channel.
pub fn even_split_request() -> CampaignRequest {
    CampaignRequest::builder()
        .campaign_weeks(4)
        .total_add_budget(1000)
        .difficulty(Difficulty::Medium)
        .allocation([20; 5].into())
        .build()
}

// =============================================================================
// Fixture cases
// =============================================================================

/// One recorded request and its expected outcome, loaded from JSON.
///
/// ```json
/// {
///   "name": "even_split",
///   "request": { "campaign_weeks": 4, "total_add_budget": 1000, "meta_pct": 20, ... },
///   "features": [4, 1000, 1, 20, 20, 20, 20, 20, 100],
///   "probability": 0.4321
/// }
/// ```
///
/// Rejected requests carry `reason` instead of `features`/`probability`.
#[derive(Debug, Clone, Deserialize)]
pub struct PredictionCase {
    pub name: String,
    pub request: CampaignRequest,
    #[serde(default)]
    pub features: Option<Vec<f64>>,
    #[serde(default)]
    pub probability: Option<f64>,
    #[serde(default)]
    pub reason: Option<String>,
}
