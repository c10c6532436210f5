//! campaign-predictor: success estimates for recruitment advertising campaigns.
//!
//! Given a campaign's duration, budget, role difficulty and the split of the
//! budget over five advertising channels, the crate estimates the probability
//! that the campaign yields a qualified candidate.
//!
//! # Key Types
//!
//! - [`CampaignRequest`] - The campaign parameters of one request
//! - [`Validator`] - Allocation and training-range checks
//! - [`FeatureVector`] - The fixed nine-column model input
//! - [`ArtifactSet`] - Fitted scaler, PCA reducer and logistic classifier
//! - [`Pipeline`] - Validation, assembly and inference in one call
//!
//! # Example
//!
//! ```no_run
//! use campaign_predictor::{ArtifactPaths, ArtifactSet, CampaignRequest, Pipeline, PipelineConfig};
//!
//! let artifacts = ArtifactSet::load(&ArtifactPaths::in_dir("artifacts"))?;
//! let pipeline = Pipeline::new(artifacts, PipelineConfig::default());
//!
//! let request = CampaignRequest::builder()
//!     .campaign_weeks(4)
//!     .total_add_budget(1000)
//!     .allocation([20, 20, 20, 20, 20].into())
//!     .build();
//!
//! let prediction = pipeline.predict(&request)?;
//! println!("{} ({}%)", prediction.outcome, prediction.percent());
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```

// Re-export approx traits for users who want to compare probabilities
pub use approx;

pub mod config;
pub mod features;
pub mod model;
pub mod persist;
pub mod pipeline;
pub mod preprocess;
pub mod request;
pub mod testing;
pub mod validate;

// =============================================================================
// Convenience Re-exports
// =============================================================================

pub use config::{Bounds, ConfigError, DifficultySource, PipelineConfig, TrainingRange};
pub use features::{FeatureVector, FEATURE_NAMES, N_FEATURES};
pub use model::{LogisticRegression, ProbabilisticClassifier};
pub use persist::{ArtifactPaths, ArtifactSet, ReadError};
pub use pipeline::{
    transform_and_predict, Outcome, Pipeline, PredictError, Prediction, Stage, TransformError,
};
pub use preprocess::{Pca, StandardScaler, Transformer};
pub use request::{CampaignRequest, Channel, ChannelAllocation, Difficulty};
pub use validate::{Accepted, ValidationError, Validator};
