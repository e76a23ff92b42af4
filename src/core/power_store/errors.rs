//! Power Store Error Types

use std::path::PathBuf;
use thiserror::Error;

/// Errors raised while reading power records from a backing list.
#[derive(Error, Debug)]
pub enum StoreError {
    /// Transport-level HTTP failure.
    #[error("HTTP request failed: {0}")]
    Http(#[from] reqwest::Error),

    /// The list service answered with a non-success status.
    #[error("List service returned {status}: {message}")]
    Status { status: u16, message: String },

    /// The requested list does not exist.
    #[error("List '{list}' not found")]
    ListNotFound { list: String },

    /// A row could not be turned into a power record.
    #[error("Invalid record in list '{list}': {reason}")]
    InvalidRecord { list: String, reason: String },

    /// Failed to read a records file.
    #[error("Failed to read records from {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse JSON records.
    #[error("Failed to parse JSON records: {0}")]
    Json(#[from] serde_json::Error),

    /// Failed to parse YAML records.
    #[error("Failed to parse YAML records: {0}")]
    Yaml(#[from] serde_yaml_ng::Error),
}

impl StoreError {
    /// Create a ListNotFound error.
    pub fn list_not_found(list: impl Into<String>) -> Self {
        Self::ListNotFound { list: list.into() }
    }

    /// Create an InvalidRecord error.
    pub fn invalid_record(list: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            list: list.into(),
            reason: reason.into(),
        }
    }

    /// Create an Io error.
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }

    /// Check if retrying later could succeed (network hiccups, server errors).
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http(e) => e.is_timeout() || e.is_connect(),
            Self::Status { status, .. } => *status == 429 || *status >= 500,
            _ => false,
        }
    }
}
