//! Error model shared by preference loading, persisting and editing.

use std::io;
use std::path::PathBuf;

use thiserror::Error;

pub type Result<T> = std::result::Result<T, PrefsError>;

/// Failures surfaced by the settings backend. Parse and write failures are
/// fatal for the operation that hit them; the in-memory record is untouched.
#[derive(Debug, Error)]
pub enum PrefsError {
    #[error("failed to parse {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
    #[error("failed to write {}: {source}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error("io error: {0}")]
    Io(#[from] io::Error),
    #[error("bookmark index {index} out of range (have {len})")]
    BookmarkIndexOutOfRange { index: usize, len: usize },
    #[error("sort position {position} out of range (have {len})")]
    SortPositionOutOfRange { position: usize, len: usize },
    #[error("sort field {0} is already in use")]
    SortFieldInUse(String),
    #[error("could not determine config location")]
    ConfigLocation,
    #[error("credential store error: {0}")]
    Credentials(String),
    #[error("host bridge error: {0}")]
    Bridge(String),
}

impl PrefsError {
    /// Errors the session cannot recover from locally: the durable file can
    /// no longer be read, so neither the dirty check nor a reload works.
    pub fn is_fatal(&self) -> bool {
        matches!(self, PrefsError::Parse { .. } | PrefsError::ConfigLocation)
    }

    /// Builds a parse error for the durable file at `path`.
    pub fn parse(path: impl Into<PathBuf>, err: serde_json::Error) -> Self {
        PrefsError::Parse {
            path: path.into(),
            message: err.to_string(),
        }
    }

    /// Builds a write error for the durable file at `path`.
    pub fn write(path: impl Into<PathBuf>, source: io::Error) -> Self {
        PrefsError::Write {
            path: path.into(),
            source,
        }
    }
}
