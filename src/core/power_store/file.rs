//! File-backed power store.
//!
//! Reads a JSON or YAML document on every fetch (wrap in a
//! [`CachedPowerStore`](super::CachedPowerStore) to avoid re-reading). The
//! document is either a list of rows, served for any list identifier, or a
//! map from list identifier to a list of rows.

use std::path::{Path, PathBuf};

use async_trait::async_trait;
use serde_json::Value;

use super::errors::StoreError;
use super::rows::records_from_rows;
use super::{ListFields, PowerStore, Result};
use crate::core::hero::models::PowerRecord;

/// Document format, chosen by file extension.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileFormat {
    Json,
    Yaml,
}

impl FileFormat {
    /// `.yaml` / `.yml` are YAML, everything else JSON.
    pub fn from_path(path: &Path) -> Self {
        match path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.to_ascii_lowercase())
            .as_deref()
        {
            Some("yaml") | Some("yml") => Self::Yaml,
            _ => Self::Json,
        }
    }
}

/// Power store reading rows from a local file.
#[derive(Debug, Clone)]
pub struct FilePowerStore {
    path: PathBuf,
    format: FileFormat,
}

impl FilePowerStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let format = FileFormat::from_path(&path);
        Self { path, format }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn parse(&self, contents: &str) -> Result<Value> {
        match self.format {
            FileFormat::Json => Ok(serde_json::from_str(contents)?),
            FileFormat::Yaml => Ok(serde_yaml_ng::from_str(contents)?),
        }
    }
}

#[async_trait]
impl PowerStore for FilePowerStore {
    async fn fetch_all(&self, list: &str, fields: &ListFields) -> Result<Vec<PowerRecord>> {
        let contents = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|e| StoreError::io(self.path.clone(), e))?;

        let rows = match self.parse(&contents)? {
            Value::Array(rows) => rows,
            Value::Object(mut lists) => match lists.remove(list) {
                Some(Value::Array(rows)) => rows,
                Some(_) => {
                    return Err(StoreError::invalid_record(list, "list entry is not an array"))
                }
                None => return Err(StoreError::list_not_found(list)),
            },
            _ => {
                return Err(StoreError::invalid_record(
                    list,
                    format!("{} holds neither a list nor a map of lists", self.path.display()),
                ))
            }
        };

        let records = records_from_rows(list, rows, fields);
        log::debug!(
            "Read {} records for list '{}' from {}",
            records.len(),
            list,
            self.path.display()
        );
        Ok(records)
    }
}
