//! Hero Data Models
//!
//! Power records as they come out of the backing list, the hero identity the
//! generator synthesizes from two of them, and the property bag the card
//! displays between generations.

use std::path::Path;

use serde::{Deserialize, Serialize};

use super::errors::HeroError;

// ============================================================================
// Power Record
// ============================================================================

/// A single "power" entry from the backing list.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct PowerRecord {
    /// Label for the power ("Flight", "Strength")
    pub title: String,

    /// Candidate icon identifiers
    #[serde(default)]
    pub icons: Vec<String>,

    /// Candidate colors, hex ("#F00") or named ("red")
    #[serde(default)]
    pub colors: Vec<String>,

    /// Name-prefix pool ("Captain", "Iron")
    #[serde(default)]
    pub name_prefixes: Vec<String>,

    /// Name-stem pool ("Sky", "Fist")
    #[serde(default)]
    pub name_mains: Vec<String>,
}

impl PowerRecord {
    /// Create a record with only a title.
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Default::default()
        }
    }

    pub fn with_icons<I, T>(mut self, icons: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.icons = icons.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_colors<I, T>(mut self, colors: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.colors = colors.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name_prefixes<I, T>(mut self, prefixes: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.name_prefixes = prefixes.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_name_mains<I, T>(mut self, mains: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.name_mains = mains.into_iter().map(Into::into).collect();
        self
    }
}

// ============================================================================
// Hero Identity
// ============================================================================

/// A fully-specified hero, recomputed on every generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeroIdentity {
    /// "{prefix} {main}"
    pub name: String,
    pub primary_power_title: String,
    pub secondary_power_title: String,
    pub background_color: String,
    pub foreground_color: String,
    /// Drawn from the fixed shape palette
    pub background_icon: String,
    /// Drawn from the union of both powers' icons
    pub foreground_icon: String,
}

// ============================================================================
// Hero Properties
// ============================================================================

/// The card's property bag: whatever hero is currently on display.
///
/// Starts from configured fallback values and is overwritten wholesale after
/// each successful generation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase", default)]
pub struct HeroProperties {
    pub name: String,
    pub primary_power: String,
    pub secondary_power: String,
    pub foreground_color: String,
    pub background_color: String,
    pub foreground_icon: String,
    pub background_icon: String,
}

impl HeroProperties {
    /// Build the pre-generation property bag from fallback display values.
    ///
    /// `colors` and `icons` are read foreground first, background second;
    /// missing entries stay empty.
    pub fn initial(name: impl Into<String>, colors: &[String], icons: &[String]) -> Self {
        let nth = |values: &[String], i: usize| values.get(i).cloned().unwrap_or_default();
        Self {
            name: name.into(),
            foreground_color: nth(colors, 0),
            background_color: nth(colors, 1),
            foreground_icon: nth(icons, 0),
            background_icon: nth(icons, 1),
            ..Default::default()
        }
    }

    /// Whether a hero has ever been generated into this bag.
    pub fn has_powers(&self) -> bool {
        !self.primary_power.is_empty() || !self.secondary_power.is_empty()
    }

    /// Load a persisted property bag. Returns `Ok(None)` if the file is missing.
    pub fn load(path: &Path) -> Result<Option<Self>, HeroError> {
        let contents = match std::fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(HeroError::persist(path, e)),
        };
        serde_json::from_str(&contents)
            .map(Some)
            .map_err(|e| HeroError::persist(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
    }

    /// Persist the property bag as pretty JSON, creating parent directories.
    pub async fn save(&self, path: &Path) -> Result<(), HeroError> {
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| HeroError::persist(path, e))?;
        }
        let json = serde_json::to_string_pretty(self)
            .map_err(|e| HeroError::persist(path, std::io::Error::new(std::io::ErrorKind::InvalidData, e)))?;
        tokio::fs::write(path, json)
            .await
            .map_err(|e| HeroError::persist(path, e))
    }
}

impl From<HeroIdentity> for HeroProperties {
    fn from(identity: HeroIdentity) -> Self {
        Self {
            name: identity.name,
            primary_power: identity.primary_power_title,
            secondary_power: identity.secondary_power_title,
            foreground_color: identity.foreground_color,
            background_color: identity.background_color,
            foreground_icon: identity.foreground_icon,
            background_icon: identity.background_icon,
        }
    }
}
