//! Power Record Store
//!
//! Read-only access to the list of power records a hero is built from.
//!
//! # Architecture
//!
//! ```text
//! PowerStore (trait)
//!   +-- HttpListStore     list REST endpoint (reqwest)
//!   +-- FilePowerStore    JSON / YAML file on disk
//!   +-- StaticPowerStore  in-memory records
//!   +-- CachedPowerStore  TTL + LRU cache, single-flight, wraps any of the above
//! ```
//!
//! Stores surface errors as-is; nothing here retries.

pub mod cache;
pub mod errors;
pub mod file;
pub mod http;
pub mod rows;

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::config::StoreConfig;
use crate::core::hero::models::PowerRecord;

pub use cache::{CacheConfig, CacheStats, CachedPowerStore};
pub use errors::StoreError;
pub use file::FilePowerStore;
pub use http::HttpListStore;

/// Result type for store operations.
pub type Result<T> = std::result::Result<T, StoreError>;

// ============================================================================
// Field selection
// ============================================================================

/// Names of the list columns that hold each part of a power record.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(default)]
pub struct ListFields {
    pub title: String,
    pub icons: String,
    pub colors: String,
    pub name_prefixes: String,
    pub name_mains: String,
}

impl Default for ListFields {
    fn default() -> Self {
        Self {
            title: "Title".to_string(),
            icons: "Icons".to_string(),
            colors: "Colors".to_string(),
            name_prefixes: "NamePrefixes".to_string(),
            name_mains: "NameMains".to_string(),
        }
    }
}

impl ListFields {
    /// All field names in select order.
    pub fn all(&self) -> [&str; 5] {
        [
            self.title.as_str(),
            self.icons.as_str(),
            self.colors.as_str(),
            self.name_prefixes.as_str(),
            self.name_mains.as_str(),
        ]
    }

    /// Comma-joined select clause.
    pub fn select_clause(&self) -> String {
        self.all().join(",")
    }
}

// ============================================================================
// Store trait
// ============================================================================

/// Source of power records.
#[async_trait]
pub trait PowerStore: Send + Sync {
    /// Read every record of `list`, projecting the columns named in `fields`.
    async fn fetch_all(&self, list: &str, fields: &ListFields) -> Result<Vec<PowerRecord>>;
}

#[async_trait]
impl<S: PowerStore + ?Sized> PowerStore for std::sync::Arc<S> {
    async fn fetch_all(&self, list: &str, fields: &ListFields) -> Result<Vec<PowerRecord>> {
        (**self).fetch_all(list, fields).await
    }
}

#[async_trait]
impl<S: PowerStore + ?Sized> PowerStore for Box<S> {
    async fn fetch_all(&self, list: &str, fields: &ListFields) -> Result<Vec<PowerRecord>> {
        (**self).fetch_all(list, fields).await
    }
}

// ============================================================================
// Construction from config
// ============================================================================

/// Build the configured store, wrapped in a cache.
///
/// `site_url` wins over `records_file`; with neither the sample powers serve.
pub fn open_store(config: &StoreConfig) -> Result<CachedPowerStore<Box<dyn PowerStore>>> {
    let inner: Box<dyn PowerStore> = match (&config.site_url, &config.records_file) {
        (Some(site_url), _) => {
            let mut store =
                HttpListStore::new(site_url, Duration::from_secs(config.timeout_seconds))?;
            if let Some(token) = &config.access_token {
                store = store.with_access_token(token);
            }
            log::info!("Reading powers from list '{}' at {}", config.list_identifier, site_url);
            Box::new(store)
        }
        (None, Some(path)) => {
            log::info!("Reading powers from {}", path.display());
            Box::new(FilePowerStore::new(path.clone()))
        }
        (None, None) => {
            log::info!("No list configured, using sample powers");
            Box::new(StaticPowerStore::sample())
        }
    };

    Ok(CachedPowerStore::new(inner, config.cache.clone()))
}

// ============================================================================
// In-memory store
// ============================================================================

/// Serves a fixed set of records for any list.
#[derive(Debug, Clone, Default)]
pub struct StaticPowerStore {
    records: Vec<PowerRecord>,
}

impl StaticPowerStore {
    pub fn new(records: Vec<PowerRecord>) -> Self {
        Self { records }
    }

    /// The built-in sample powers used when no list is configured.
    pub fn sample() -> Self {
        Self::new(vec![
            PowerRecord::new("Flight")
                .with_icons(["Airplane", "Cloud", "Rocket"])
                .with_colors(["#0078D4", "#50E6FF", "white"])
                .with_name_prefixes(["Captain", "Sky", "Soaring"])
                .with_name_mains(["Falcon", "Comet", "Wing"]),
            PowerRecord::new("Strength")
                .with_icons(["Dumbbell", "Hammer"])
                .with_colors(["#A4262C", "#FFB900"])
                .with_name_prefixes(["Iron", "Mighty", "Titan"])
                .with_name_mains(["Fist", "Giant", "Anvil"]),
            PowerRecord::new("Invisibility")
                .with_icons(["Hide", "Ghost"])
                .with_colors(["#8A8886", "#C8C6C4"])
                .with_name_prefixes(["Phantom", "Silent", "Unseen"])
                .with_name_mains(["Shade", "Whisper", "Ghost"]),
            PowerRecord::new("Lightning")
                .with_icons(["LightningBolt", "Flashlight"])
                .with_colors(["#FFF100", "#5C2D91"])
                .with_name_prefixes(["Thunder", "Storm", "Volt"])
                .with_name_mains(["Bolt", "Strike", "Surge"]),
            PowerRecord::new("Telepathy")
                .with_icons(["Lightbulb", "Chat"])
                .with_colors(["#E3008C", "#B4A0FF"])
                .with_name_prefixes(["Doctor", "Mind", "Psi"])
                .with_name_mains(["Oracle", "Echo", "Sage"]),
        ])
    }
}

#[async_trait]
impl PowerStore for StaticPowerStore {
    async fn fetch_all(&self, list: &str, _fields: &ListFields) -> Result<Vec<PowerRecord>> {
        log::debug!("Serving {} static records for list '{}'", self.records.len(), list);
        Ok(self.records.clone())
    }
}
