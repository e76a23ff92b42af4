//! Hero Generation Error Types
//!
//! Uses thiserror for ergonomic error handling with rich context fields.

use std::path::PathBuf;
use thiserror::Error;

use crate::core::power_store::StoreError;

/// Errors that can occur while generating or displaying a hero.
#[derive(Error, Debug)]
pub enum HeroError {
    /// Fewer than two power records were available to combine.
    #[error("Need at least 2 power records to generate a hero, found {available}")]
    InsufficientData { available: usize },

    /// The power record store failed; the generator was never invoked.
    #[error("Failed to fetch power records: {0}")]
    Fetch(#[from] StoreError),

    /// The property bag could not be read or written.
    #[error("Failed to persist hero properties at {path}: {source}")]
    Persist {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl HeroError {
    /// Create an InsufficientData error.
    pub fn insufficient_data(available: usize) -> Self {
        Self::InsufficientData { available }
    }

    /// Create a Persist error.
    pub fn persist(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Persist {
            path: path.into(),
            source,
        }
    }

    /// Whether pressing generate again may succeed without touching the
    /// configuration.
    ///
    /// Too few records and transient store failures qualify. A missing list,
    /// malformed rows or an unwritable data directory need a config change.
    pub fn is_recoverable(&self) -> bool {
        match self {
            Self::Fetch(source) => source.is_transient(),
            Self::InsufficientData { .. } => true,
            Self::Persist { .. } => false,
        }
    }
}
