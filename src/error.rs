//! Error handling for table conversion operations.
//!
//! Every failure is local to one document. Row-shape problems are not errors:
//! generic conversion discards malformed rows and keyed conversion pads them.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConvertError {
    #[error("Source not found: {path}")]
    SourceNotFound { path: PathBuf },

    #[error("IO error on {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("JSON serialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Header not located: {reason}")]
    HeaderNotLocated { reason: String },

    #[error("Identifier column '{column}' not found in table headers")]
    IdentifierColumnMissing { column: String },

    #[error("Schema violation at '{path}': {message}")]
    SchemaViolation { path: String, message: String },

    #[error("Invalid schema document: {message}")]
    InvalidSchema { message: String },

    #[error("Configuration error: {message}")]
    Configuration { message: String },
}

impl ConvertError {
    /// Attach a path to an I/O failure
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    pub fn header_not_located(reason: impl Into<String>) -> Self {
        Self::HeaderNotLocated {
            reason: reason.into(),
        }
    }

    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    /// True for failures caused by the table layout rather than the environment
    pub fn is_location_failure(&self) -> bool {
        matches!(
            self,
            Self::HeaderNotLocated { .. } | Self::IdentifierColumnMissing { .. }
        )
    }
}

pub type Result<T> = std::result::Result<T, ConvertError>;
