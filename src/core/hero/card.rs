//! Hero card controller.
//!
//! Owns the property bag for one card and turns a "generate" request into
//! fetch -> generate -> update. Regeneration is only allowed in edit mode,
//! and a request arriving while a fetch is still in flight is dropped.

use std::path::PathBuf;
use std::sync::atomic::{AtomicBool, Ordering};

use serde::{Deserialize, Serialize};
use tokio::sync::{Mutex, RwLock};
use tracing::instrument;

use super::errors::HeroError;
use super::generator::generate;
use super::models::{HeroIdentity, HeroProperties};
use super::random::{RandomSource, RngSource};
use crate::config::AppConfig;
use crate::core::power_store::{open_store, CachedPowerStore, ListFields, PowerStore};

/// Card type wired up from configuration.
pub type ConfiguredCard = HeroCard<CachedPowerStore<Box<dyn PowerStore>>>;

/// Whether the card is being viewed or edited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum DisplayMode {
    #[default]
    Read,
    Edit,
}

impl DisplayMode {
    pub fn toggled(self) -> Self {
        match self {
            Self::Read => Self::Edit,
            Self::Edit => Self::Read,
        }
    }
}

/// Why a regenerate request did nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The regenerate control only exists in edit mode.
    ReadMode,
    /// An earlier request is still fetching records.
    FetchInFlight,
}

/// Result of a regenerate request that did not fail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GenerateOutcome {
    Generated(HeroIdentity),
    Skipped(SkipReason),
}

/// Clears the in-flight flag however the fetch ends.
struct FlightGuard<'a>(&'a AtomicBool);

impl Drop for FlightGuard<'_> {
    fn drop(&mut self) {
        self.0.store(false, Ordering::Release);
    }
}

/// Controller behind one rendered hero card.
pub struct HeroCard<S> {
    store: S,
    list: String,
    fields: ListFields,
    rng: Mutex<Box<dyn RandomSource + Send>>,
    properties: RwLock<HeroProperties>,
    mode: RwLock<DisplayMode>,
    fetching: AtomicBool,
    persist_path: Option<PathBuf>,
}

impl ConfiguredCard {
    /// Wire a card from configuration: store, fields, seed, mode and the
    /// persisted (or initial) property bag.
    pub fn from_config(config: &AppConfig) -> Result<Self, HeroError> {
        let store = open_store(&config.store)?;
        let persist_path = config.properties_path();

        let initial = || {
            HeroProperties::initial(
                config.card.initial_name.clone(),
                &config.card.initial_colors,
                &config.card.initial_icons,
            )
        };
        let properties = match persist_path.as_deref().map(HeroProperties::load) {
            Some(Ok(Some(saved))) => saved,
            Some(Err(e)) => {
                log::warn!("Ignoring saved hero: {}", e);
                initial()
            }
            _ => initial(),
        };

        let mode = if config.card.start_in_edit_mode {
            DisplayMode::Edit
        } else {
            DisplayMode::Read
        };

        let mut card = Self::new(store, config.store.list_identifier.clone(), properties)
            .with_fields(config.store.fields.clone())
            .with_mode(mode);
        if let Some(seed) = config.card.seed {
            card = card.with_random_source(RngSource::seeded(seed));
        }
        if let Some(path) = persist_path {
            card = card.with_persist_path(path);
        }
        Ok(card)
    }
}

impl<S: PowerStore> HeroCard<S> {
    pub fn new(store: S, list: impl Into<String>, properties: HeroProperties) -> Self {
        Self {
            store,
            list: list.into(),
            fields: ListFields::default(),
            rng: Mutex::new(Box::new(RngSource::from_entropy())),
            properties: RwLock::new(properties),
            mode: RwLock::new(DisplayMode::Read),
            fetching: AtomicBool::new(false),
            persist_path: None,
        }
    }

    /// Use non-default list column names.
    pub fn with_fields(mut self, fields: ListFields) -> Self {
        self.fields = fields;
        self
    }

    /// Replace the random source (seeded or scripted).
    pub fn with_random_source(mut self, rng: impl RandomSource + Send + 'static) -> Self {
        self.rng = Mutex::new(Box::new(rng));
        self
    }

    pub fn with_mode(mut self, mode: DisplayMode) -> Self {
        self.mode = RwLock::new(mode);
        self
    }

    /// Save the property bag to `path` after every generation.
    pub fn with_persist_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.persist_path = Some(path.into());
        self
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Snapshot of the hero currently on display.
    pub async fn properties(&self) -> HeroProperties {
        self.properties.read().await.clone()
    }

    pub async fn mode(&self) -> DisplayMode {
        *self.mode.read().await
    }

    pub async fn set_mode(&self, mode: DisplayMode) {
        *self.mode.write().await = mode;
    }

    pub async fn toggle_mode(&self) -> DisplayMode {
        let mut mode = self.mode.write().await;
        *mode = mode.toggled();
        *mode
    }

    /// Whether a regenerate request is currently fetching records.
    pub fn is_fetching(&self) -> bool {
        self.fetching.load(Ordering::Acquire)
    }

    /// Fetch records, generate a hero and put it on display.
    ///
    /// On any error the previous hero stays on display.
    #[instrument(skip(self), fields(list = %self.list))]
    pub async fn regenerate(&self) -> Result<GenerateOutcome, HeroError> {
        if self.mode().await != DisplayMode::Edit {
            return Ok(GenerateOutcome::Skipped(SkipReason::ReadMode));
        }

        if self
            .fetching
            .compare_exchange(false, true, Ordering::AcqRel, Ordering::Acquire)
            .is_err()
        {
            log::debug!("Generate ignored, fetch already in flight");
            return Ok(GenerateOutcome::Skipped(SkipReason::FetchInFlight));
        }
        let _flight = FlightGuard(&self.fetching);

        let records = match self.store.fetch_all(&self.list, &self.fields).await {
            Ok(records) => records,
            Err(e) => {
                log::error!("Failed to load powers from list '{}': {}", self.list, e);
                return Err(e.into());
            }
        };

        let identity = {
            let mut rng = self.rng.lock().await;
            generate(&records, &mut *rng)
        };
        let identity = match identity {
            Ok(identity) => identity,
            Err(e) => {
                log::warn!("Keeping current hero: {}", e);
                return Err(e);
            }
        };

        let properties = HeroProperties::from(identity.clone());
        if let Some(path) = &self.persist_path {
            if let Err(e) = properties.save(path).await {
                log::error!("Keeping current hero, could not save '{}': {}", identity.name, e);
                return Err(e);
            }
        }

        *self.properties.write().await = properties;
        log::info!(
            "Generated '{}' ({} + {})",
            identity.name,
            identity.primary_power_title,
            identity.secondary_power_title
        );

        Ok(GenerateOutcome::Generated(identity))
    }
}
