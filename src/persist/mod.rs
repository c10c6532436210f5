//! Fitted artifact storage.
//!
//! The scaler, reducer and classifier are produced by an offline training
//! process and exported as JSON (see [`schema`]). They are loaded once at
//! process start into an [`ArtifactSet`] and never mutated afterwards.
//!
//! # Example
//!
//! ```no_run
//! use campaign_predictor::persist::{ArtifactPaths, ArtifactSet};
//!
//! let artifacts = ArtifactSet::load(&ArtifactPaths::in_dir("artifacts"))?;
//! # Ok::<(), campaign_predictor::ReadError>(())
//! ```

mod convert;
mod error;
pub mod schema;

use std::fs::File;
use std::io::{BufReader, BufWriter, Read, Write};
use std::path::{Path, PathBuf};

pub use error::ReadError;
use schema::{
    ArtifactSchema, EnvelopeSchema, LogisticRegressionSchema, PcaSchema, ScalerSchema,
    FORMAT_VERSION,
};

use crate::model::{LogisticRegression, ProbabilisticClassifier};
use crate::preprocess::{Pca, StandardScaler, Transformer};

// =============================================================================
// Artifact trait
// =============================================================================

/// A runtime type with a JSON artifact representation.
pub trait Artifact: Sized {
    /// The schema `type` tag.
    const KIND: &'static str;

    /// Build from a parsed schema, validating it.
    fn from_schema(schema: ArtifactSchema) -> Result<Self, ReadError>;

    fn to_schema(&self) -> ArtifactSchema;
}

fn kind_mismatch<T: Artifact>(found: &ArtifactSchema) -> ReadError {
    ReadError::KindMismatch {
        expected: T::KIND,
        found: found.kind(),
    }
}

impl Artifact for StandardScaler {
    const KIND: &'static str = ScalerSchema::KIND;

    fn from_schema(schema: ArtifactSchema) -> Result<Self, ReadError> {
        match schema {
            ArtifactSchema::StandardScaler(s) => s.try_into(),
            other => Err(kind_mismatch::<Self>(&other)),
        }
    }

    fn to_schema(&self) -> ArtifactSchema {
        ArtifactSchema::StandardScaler(self.into())
    }
}

impl Artifact for Pca {
    const KIND: &'static str = PcaSchema::KIND;

    fn from_schema(schema: ArtifactSchema) -> Result<Self, ReadError> {
        match schema {
            ArtifactSchema::Pca(s) => s.try_into(),
            other => Err(kind_mismatch::<Self>(&other)),
        }
    }

    fn to_schema(&self) -> ArtifactSchema {
        ArtifactSchema::Pca(self.into())
    }
}

impl Artifact for LogisticRegression {
    const KIND: &'static str = LogisticRegressionSchema::KIND;

    fn from_schema(schema: ArtifactSchema) -> Result<Self, ReadError> {
        match schema {
            ArtifactSchema::LogisticRegression(s) => s.try_into(),
            other => Err(kind_mismatch::<Self>(&other)),
        }
    }

    fn to_schema(&self) -> ArtifactSchema {
        ArtifactSchema::LogisticRegression(self.into())
    }
}

// =============================================================================
// Reading and writing
// =============================================================================

/// Read one artifact from JSON.
pub fn read_json<A: Artifact>(reader: impl Read) -> Result<A, ReadError> {
    let envelope: EnvelopeSchema = serde_json::from_reader(reader)?;
    if envelope.format_version != FORMAT_VERSION {
        return Err(ReadError::UnsupportedVersion {
            found: envelope.format_version,
            expected: FORMAT_VERSION,
        });
    }
    A::from_schema(envelope.artifact)
}

/// Load one artifact from a JSON file.
pub fn load_json<A: Artifact>(path: impl AsRef<Path>) -> Result<A, ReadError> {
    let path = path.as_ref();
    let file = File::open(path).map_err(|source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    read_json(BufReader::new(file)).map_err(|e| e.in_file(path))
}

/// Write one artifact as pretty-printed JSON.
pub fn write_json<A: Artifact>(artifact: &A, writer: impl Write) -> Result<(), ReadError> {
    let envelope = EnvelopeSchema {
        format_version: FORMAT_VERSION,
        artifact: artifact.to_schema(),
    };
    serde_json::to_writer_pretty(writer, &envelope)?;
    Ok(())
}

/// Save one artifact to a JSON file.
pub fn save_json<A: Artifact>(artifact: &A, path: impl AsRef<Path>) -> Result<(), ReadError> {
    let path = path.as_ref();
    let io_err = |source| ReadError::Io {
        path: path.to_path_buf(),
        source,
    };
    let mut writer = BufWriter::new(File::create(path).map_err(io_err)?);
    write_json(artifact, &mut writer).map_err(|e| e.in_file(path))?;
    writer.flush().map_err(io_err)
}

// =============================================================================
// ArtifactSet
// =============================================================================

/// Locations of the three artifact files.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArtifactPaths {
    pub scaler: PathBuf,
    pub reducer: PathBuf,
    pub classifier: PathBuf,
}

impl ArtifactPaths {
    pub const SCALER_FILE: &'static str = "campaign_scaler.json";
    pub const REDUCER_FILE: &'static str = "campaign_pca.json";
    pub const CLASSIFIER_FILE: &'static str = "campaign_model.json";

    /// The default file names inside `dir`.
    pub fn in_dir(dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        Self {
            scaler: dir.join(Self::SCALER_FILE),
            reducer: dir.join(Self::REDUCER_FILE),
            classifier: dir.join(Self::CLASSIFIER_FILE),
        }
    }
}

/// The three fitted artifacts the pipeline runs on.
#[derive(Debug, Clone, PartialEq)]
pub struct ArtifactSet {
    pub scaler: StandardScaler,
    pub reducer: Pca,
    pub classifier: LogisticRegression,
}

impl ArtifactSet {
    /// Load all three artifacts.
    ///
    /// # Errors
    ///
    /// [`ReadError`] for the first artifact that is missing, unreadable or
    /// malformed. Compatibility between artifacts is not checked here; a
    /// mismatch surfaces when predicting.
    pub fn load(paths: &ArtifactPaths) -> Result<Self, ReadError> {
        let artifacts = Self {
            scaler: load_json(&paths.scaler)?,
            reducer: load_json(&paths.reducer)?,
            classifier: load_json(&paths.classifier)?,
        };
        tracing::info!(
            scaler = %paths.scaler.display(),
            reducer = %paths.reducer.display(),
            classifier = %paths.classifier.display(),
            n_features = artifacts.scaler.n_features_in(),
            n_components = artifacts.reducer.n_features_out(),
            "artifacts loaded"
        );
        Ok(artifacts)
    }

    /// Save all three artifacts.
    pub fn save(&self, paths: &ArtifactPaths) -> Result<(), ReadError> {
        save_json(&self.scaler, &paths.scaler)?;
        save_json(&self.reducer, &paths.reducer)?;
        save_json(&self.classifier, &paths.classifier)
    }

    /// Widths flow scaler -> reducer -> classifier without gaps.
    pub fn is_chained(&self) -> bool {
        self.scaler.n_features_out() == self.reducer.n_features_in()
            && self.reducer.n_features_out() == self.classifier.n_features_in()
    }
}
