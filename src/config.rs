use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::power_store::{CacheConfig, ListFields};

/// Environment variable that overrides `store.access_token`.
pub const ACCESS_TOKEN_ENV: &str = "JARBIS_ACCESS_TOKEN";

/// Top-level application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub tui: TuiConfig,
    pub store: StoreConfig,
    pub card: CardConfig,
    pub data: DataConfig,
}

/// TUI-specific configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct TuiConfig {
    /// Tick interval in milliseconds for the event loop.
    pub tick_rate_ms: u64,
}

/// Where power records come from.
///
/// `site_url` wins over `records_file`; with neither set the built-in sample
/// powers are used.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct StoreConfig {
    /// Base URL of the site hosting the list.
    pub site_url: Option<String>,
    /// Which backing list to query.
    pub list_identifier: String,
    /// JSON or YAML file of records.
    pub records_file: Option<PathBuf>,
    /// Bearer token for the list service.
    pub access_token: Option<String>,
    pub timeout_seconds: u64,
    pub cache: CacheConfig,
    pub fields: ListFields,
}

/// Hero card configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct CardConfig {
    /// Name shown before the first generation.
    pub initial_name: String,
    /// Foreground then background color shown before the first generation.
    pub initial_colors: Vec<String>,
    /// Foreground then background icon shown before the first generation.
    pub initial_icons: Vec<String>,
    pub start_in_edit_mode: bool,
    /// Seed for reproducible heroes.
    pub seed: Option<u64>,
    /// Keep the last generated hero across runs.
    pub persist_properties: bool,
}

/// Data directory configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DataConfig {
    /// Override the default data directory.
    pub data_dir: Option<PathBuf>,
}

impl Default for TuiConfig {
    fn default() -> Self {
        Self { tick_rate_ms: 250 }
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            site_url: None,
            list_identifier: "Powers".to_string(),
            records_file: None,
            access_token: None,
            timeout_seconds: crate::core::power_store::http::DEFAULT_TIMEOUT_SECS,
            cache: CacheConfig::default(),
            fields: ListFields::default(),
        }
    }
}

impl Default for CardConfig {
    fn default() -> Self {
        Self {
            initial_name: "Jarbis".to_string(),
            initial_colors: vec!["#FFFFFF".to_string(), "#0078D4".to_string()],
            initial_icons: vec!["Robot".to_string(), "CircleShapeSolid".to_string()],
            start_in_edit_mode: true,
            seed: None,
            persist_properties: true,
        }
    }
}

impl AppConfig {
    /// Load configuration from `~/.config/jarbis/config.toml`.
    /// Returns `Default` if the file is missing or unparseable.
    pub fn load() -> Self {
        Self::load_from(&Self::config_path()).with_env_overrides()
    }

    /// Load configuration from an explicit path, falling back to defaults.
    pub fn load_from(config_path: &Path) -> Self {
        match std::fs::read_to_string(config_path) {
            Ok(contents) => match toml::from_str(&contents) {
                Ok(config) => {
                    log::info!("Loaded config from {}", config_path.display());
                    config
                }
                Err(e) => {
                    log::warn!(
                        "Failed to parse config at {}: {e}, using defaults",
                        config_path.display()
                    );
                    Self::default()
                }
            },
            Err(_) => {
                log::debug!(
                    "No config file at {}, using defaults",
                    config_path.display()
                );
                Self::default()
            }
        }
    }

    fn with_env_overrides(mut self) -> Self {
        if let Ok(token) = std::env::var(ACCESS_TOKEN_ENV) {
            if !token.is_empty() {
                self.store.access_token = Some(token);
            }
        }
        self
    }

    /// Resolved data directory (override or XDG default).
    pub fn data_dir(&self) -> PathBuf {
        self.data.data_dir.clone().unwrap_or_else(|| {
            dirs::data_dir()
                .map(|d| d.join("jarbis"))
                .unwrap_or_else(|| PathBuf::from("data"))
        })
    }

    /// Where the card's property bag is persisted, if enabled.
    pub fn properties_path(&self) -> Option<PathBuf> {
        self.card
            .persist_properties
            .then(|| self.data_dir().join("hero.json"))
    }

    fn config_path() -> PathBuf {
        dirs::config_dir()
            .map(|d| d.join("jarbis").join("config.toml"))
            .unwrap_or_else(|| PathBuf::from("config.toml"))
    }
}
