//! Error types for the geopin library.

use std::path::PathBuf;
use thiserror::Error;

use crate::validation::RejectionReason;

/// Main error type for geopin operations.
#[derive(Debug, Error)]
pub enum GeopinError {
    /// The top-level document is not a well-formed feature collection.
    #[error("{0}")]
    Schema(String),

    /// A single record failed field-level checks.
    ///
    /// Bulk loads never raise this; rejected candidates are tallied instead.
    #[error("Record '{id}' rejected: {}", format_reasons(.reasons))]
    RecordRejected {
        id: String,
        reasons: Vec<RejectionReason>,
    },

    /// Input text is not valid JSON.
    #[error("{0}")]
    Parse(#[from] serde_json::Error),

    /// Durable snapshot could not be read, written or erased.
    #[error("Persistence error: {0}")]
    Persistence(String),

    /// Error reading or accessing a file.
    #[error("IO error for '{path}': {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Configuration error.
    #[error("Configuration error: {0}")]
    Config(String),
}

fn format_reasons(reasons: &[RejectionReason]) -> String {
    reasons
        .iter()
        .map(|r| r.code())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Result type alias for geopin operations.
pub type Result<T> = std::result::Result<T, GeopinError>;
