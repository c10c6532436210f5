//! Pipeline configuration with builder pattern.
//!
//! [`PipelineConfig`] selects where the difficulty feature comes from and
//! which campaign durations and budgets the model is trusted for. It can be
//! built in code (via `bon`) or read from a TOML file.
//!
//! # Example
//!
//! ```
//! use campaign_predictor::{Bounds, DifficultySource, PipelineConfig, TrainingRange};
//!
//! // All defaults: difficulty fixed to Medium, weeks 2..=8, budget 750..=3000
//! let config = PipelineConfig::builder().build().unwrap();
//!
//! let config = PipelineConfig::builder()
//!     .difficulty(DifficultySource::Selected)
//!     .training_range(TrainingRange {
//!         weeks: Bounds::new(2, 10),
//!         ..Default::default()
//!     })
//!     .build()
//!     .unwrap();
//! ```
//!
//! The equivalent TOML:
//!
//! ```toml
//! difficulty = { mode = "selected" }
//!
//! [training_range]
//! weeks = { min = 2, max = 10 }
//! budget = { min = 750, max = 3000 }
//! ```

use std::path::{Path, PathBuf};

use bon::Builder;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::request::Difficulty;

// =============================================================================
// ConfigError
// =============================================================================

/// Errors raised while building or reading a configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A range has its lower bound above its upper bound.
    #[error("{field}: min ({min}) must not exceed max ({max})")]
    InvalidBounds {
        field: &'static str,
        min: u32,
        max: u32,
    },

    /// The configuration file could not be read.
    #[error("cannot read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The configuration file is not valid TOML for this schema.
    #[error("invalid config: {0}")]
    Toml(#[from] toml::de::Error),
}

// =============================================================================
// Ranges
// =============================================================================

/// Inclusive integer range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Bounds {
    pub min: u32,
    pub max: u32,
}

impl Bounds {
    pub const fn new(min: u32, max: u32) -> Self {
        Self { min, max }
    }

    #[inline]
    pub fn contains(&self, value: u32) -> bool {
        (self.min..=self.max).contains(&value)
    }

    fn validate(&self, field: &'static str) -> Result<(), ConfigError> {
        if self.min > self.max {
            return Err(ConfigError::InvalidBounds {
                field,
                min: self.min,
                max: self.max,
            });
        }
        Ok(())
    }
}

/// Durations and budgets covered by the training data.
///
/// Requests outside these ranges are rejected before inference because the
/// model has too little data there to be reliable.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct TrainingRange {
    /// Campaign duration in weeks. Default: `2..=8`.
    pub weeks: Bounds,
    /// Total budget in euro. Default: `750..=3000`.
    pub budget: Bounds,
}

impl Default for TrainingRange {
    fn default() -> Self {
        Self {
            weeks: Bounds::new(2, 8),
            budget: Bounds::new(750, 3000),
        }
    }
}

impl TrainingRange {
    /// True if both duration and budget are covered.
    #[inline]
    pub fn covers(&self, weeks: u32, budget: u32) -> bool {
        self.weeks.contains(weeks) && self.budget.contains(budget)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.weeks.validate("training_range.weeks")?;
        self.budget.validate("training_range.budget")
    }
}

// =============================================================================
// DifficultySource
// =============================================================================

/// Where the difficulty feature comes from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "level", rename_all = "snake_case")]
pub enum DifficultySource {
    /// Always use this level, whatever the request says.
    Fixed(Difficulty),
    /// Use the level selected in the request.
    Selected,
}

impl Default for DifficultySource {
    fn default() -> Self {
        Self::Fixed(Difficulty::Medium)
    }
}

impl DifficultySource {
    /// Difficulty to feed the model for a request carrying `requested`.
    #[inline]
    pub fn resolve(&self, requested: Difficulty) -> Difficulty {
        match *self {
            Self::Fixed(level) => level,
            Self::Selected => requested,
        }
    }
}

// =============================================================================
// PipelineConfig
// =============================================================================

/// Configuration of a [`Pipeline`](crate::Pipeline).
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Builder, Serialize, Deserialize)]
#[builder(derive(Clone, Debug), finish_fn(vis = "", name = __build_internal))]
#[serde(default, deny_unknown_fields)]
pub struct PipelineConfig {
    /// Difficulty source. Default: fixed `Medium`.
    #[builder(default)]
    pub difficulty: DifficultySource,

    /// Reliable input range. Default: weeks `2..=8`, budget `750..=3000`.
    #[builder(default)]
    pub training_range: TrainingRange,
}

impl<S: pipeline_config_builder::IsComplete> PipelineConfigBuilder<S> {
    /// Build and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidBounds`] if a range has `min > max`.
    pub fn build(self) -> Result<PipelineConfig, ConfigError> {
        let config = self.__build_internal();
        config.validate()?;
        Ok(config)
    }
}

impl PipelineConfig {
    /// Parse and validate a TOML document. Missing keys take their defaults.
    pub fn from_toml_str(source: &str) -> Result<Self, ConfigError> {
        let config: Self = toml::from_str(source)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn from_toml_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let source = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_toml_str(&source)
    }

    fn validate(&self) -> Result<(), ConfigError> {
        self.training_range.validate()
    }
}
