//! Artifact loading errors.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading or writing an artifact.
///
/// Any of these at startup means the process cannot serve predictions.
#[derive(Debug, Error)]
pub enum ReadError {
    /// The artifact file could not be opened or written.
    #[error("cannot access artifact {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The content is not valid JSON for the artifact schema.
    #[error("malformed artifact: {0}")]
    Json(#[from] serde_json::Error),

    /// The file was written by an incompatible format version.
    #[error("unsupported artifact format version {found} (expected {expected})")]
    UnsupportedVersion { found: u32, expected: u32 },

    /// The file holds a different kind of artifact than requested.
    #[error("expected a {expected} artifact, found {found}")]
    KindMismatch {
        expected: &'static str,
        found: &'static str,
    },

    /// Shapes or values are inconsistent.
    #[error("invalid artifact: {0}")]
    Validation(String),

    /// Any of the above, for a specific file.
    #[error("{path}: {source}")]
    InFile {
        path: PathBuf,
        #[source]
        source: Box<ReadError>,
    },
}

impl ReadError {
    pub(crate) fn in_file(self, path: impl Into<PathBuf>) -> Self {
        match self {
            // Io already names the path
            err @ Self::Io { .. } => err,
            err => Self::InFile {
                path: path.into(),
                source: Box::new(err),
            },
        }
    }

    /// The innermost error, skipping file context.
    pub fn root(&self) -> &ReadError {
        match self {
            Self::InFile { source, .. } => source.root(),
            err => err,
        }
    }
}
