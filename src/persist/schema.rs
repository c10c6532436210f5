//! Schema types for artifact serialization.
//!
//! These types describe the JSON export of each fitted artifact. They are
//! kept separate from the runtime types so that the file format can be
//! validated on load and evolve independently.
//!
//! Every file is a versioned envelope around one tagged artifact:
//!
//! ```json
//! {
//!   "format_version": 1,
//!   "artifact": { "type": "standard_scaler", "n_features_in": 9, "mean": [...], "scale": [...] }
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Current artifact format version.
pub const FORMAT_VERSION: u32 = 1;

/// Versioned file envelope.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnvelopeSchema {
    /// Format version the file was written with.
    pub format_version: u32,
    /// The artifact itself.
    pub artifact: ArtifactSchema,
}

/// Any of the three artifact kinds, tagged by `type`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ArtifactSchema {
    StandardScaler(ScalerSchema),
    Pca(PcaSchema),
    LogisticRegression(LogisticRegressionSchema),
}

impl ArtifactSchema {
    /// The `type` tag of this artifact.
    pub fn kind(&self) -> &'static str {
        match self {
            Self::StandardScaler(_) => ScalerSchema::KIND,
            Self::Pca(_) => PcaSchema::KIND,
            Self::LogisticRegression(_) => LogisticRegressionSchema::KIND,
        }
    }
}

/// Fitted standard scaler.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScalerSchema {
    /// Number of input features.
    pub n_features_in: usize,
    /// Per-feature mean. Absent if the scaler does not center.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mean: Option<Vec<f64>>,
    /// Per-feature scale. Absent if the scaler does not scale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<Vec<f64>>,
    /// Column names seen during fitting.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub feature_names: Option<Vec<String>>,
}

impl ScalerSchema {
    pub const KIND: &'static str = "standard_scaler";
}

/// Fitted PCA.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PcaSchema {
    /// Per-feature mean of the (scaled) training data.
    pub mean: Vec<f64>,
    /// Principal axes, one row per component.
    pub components: Vec<Vec<f64>>,
    /// Variance explained by each component. Required when `whiten` is set.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explained_variance: Option<Vec<f64>>,
    /// Whether projections are scaled to unit variance.
    #[serde(default)]
    pub whiten: bool,
}

impl PcaSchema {
    pub const KIND: &'static str = "pca";
}

/// Fitted binary logistic regression.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LogisticRegressionSchema {
    /// Coefficients, one row per decision function (exactly one for binary).
    pub coef: Vec<Vec<f64>>,
    /// Intercepts, one per decision function.
    pub intercept: Vec<f64>,
    /// Class labels; the second one is the positive class.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub classes: Option<Vec<serde_json::Value>>,
}

impl LogisticRegressionSchema {
    pub const KIND: &'static str = "logistic_regression";
}
