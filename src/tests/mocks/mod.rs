//! Mock implementations for testing
//!
//! Provides mockall doubles plus a few hand-written stores for behaviors
//! mockall cannot express (blocking until released, failing once).

#![allow(dead_code)]

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use mockall::mock;
use tokio::sync::Notify;

use crate::core::hero::models::PowerRecord;
use crate::core::power_store::{ListFields, PowerStore, StoreError};

// ============================================================================
// PowerStore Mock
// ============================================================================

mock! {
    pub Store {}

    #[async_trait]
    impl PowerStore for Store {
        async fn fetch_all(
            &self,
            list: &str,
            fields: &ListFields,
        ) -> crate::core::power_store::Result<Vec<PowerRecord>>;
    }
}

// ============================================================================
// Fixtures
// ============================================================================

/// The two-record fixture used across generator and card tests.
pub fn flight_and_strength() -> Vec<PowerRecord> {
    vec![
        PowerRecord::new("Flight")
            .with_icons(["Plane"])
            .with_colors(["#F00"])
            .with_name_prefixes(["Captain"])
            .with_name_mains(["Sky"]),
        PowerRecord::new("Strength")
            .with_icons(["Fist"])
            .with_colors(["#00F"])
            .with_name_prefixes(["Iron"])
            .with_name_mains(["Fist"]),
    ]
}

// ============================================================================
// Hand-written stores
// ============================================================================

/// Counts fetches and answers after an optional delay.
#[derive(Clone)]
pub struct CountingStore {
    records: Vec<PowerRecord>,
    delay: Duration,
    calls: Arc<AtomicUsize>,
}

impl CountingStore {
    pub fn new(records: Vec<PowerRecord>, delay: Duration) -> Self {
        Self {
            records,
            delay,
            calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PowerStore for CountingStore {
    async fn fetch_all(&self, _list: &str, _fields: &ListFields) -> crate::core::power_store::Result<Vec<PowerRecord>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if !self.delay.is_zero() {
            tokio::time::sleep(self.delay).await;
        }
        Ok(self.records.clone())
    }
}

/// Fails the first `failures` fetches with a 503, then serves records.
pub struct FlakyStore {
    records: Vec<PowerRecord>,
    failures: usize,
    calls: AtomicUsize,
}

impl FlakyStore {
    pub fn new(records: Vec<PowerRecord>, failures: usize) -> Self {
        Self {
            records,
            failures,
            calls: AtomicUsize::new(0),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl PowerStore for FlakyStore {
    async fn fetch_all(&self, _list: &str, _fields: &ListFields) -> crate::core::power_store::Result<Vec<PowerRecord>> {
        let call = self.calls.fetch_add(1, Ordering::SeqCst);
        if call < self.failures {
            return Err(StoreError::Status {
                status: 503,
                message: "Service Unavailable".to_string(),
            });
        }
        Ok(self.records.clone())
    }
}

/// Blocks every fetch until [`GatedStore::release`] is called.
pub struct GatedStore {
    records: Vec<PowerRecord>,
    gate: Arc<Notify>,
}

impl GatedStore {
    pub fn new(records: Vec<PowerRecord>) -> Self {
        Self {
            records,
            gate: Arc::new(Notify::new()),
        }
    }

    pub fn gate(&self) -> Arc<Notify> {
        Arc::clone(&self.gate)
    }
}

#[async_trait]
impl PowerStore for GatedStore {
    async fn fetch_all(&self, _list: &str, _fields: &ListFields) -> crate::core::power_store::Result<Vec<PowerRecord>> {
        self.gate.notified().await;
        Ok(self.records.clone())
    }
}
