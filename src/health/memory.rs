//! In-memory health store.
//!
//! Behaves like a platform health service for demos and tests: samples live
//! in a vector, authorization can be set to deny, and calls can be made to
//! fail.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use tokio::sync::RwLock;

use super::{HealthError, HealthSample, HealthStore, QuantityType, SampleRange};

/// Health store backed by memory.
#[derive(Debug)]
pub struct MemoryHealthStore {
    samples: RwLock<Vec<HealthSample>>,
    available: bool,
    deny_authorization: bool,
    failing: AtomicBool,
    saves: AtomicUsize,
    deletes: AtomicUsize,
}

impl Default for MemoryHealthStore {
    fn default() -> Self {
        Self::new()
    }
}

impl MemoryHealthStore {
    /// An available store that grants authorization.
    pub fn new() -> Self {
        Self {
            samples: RwLock::new(Vec::new()),
            available: true,
            deny_authorization: false,
            failing: AtomicBool::new(false),
            saves: AtomicUsize::new(0),
            deletes: AtomicUsize::new(0),
        }
    }

    /// A store that denies authorization requests.
    pub fn denying() -> Self {
        Self {
            deny_authorization: true,
            ..Self::new()
        }
    }

    /// Make every subsequent call fail (or stop failing).
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    /// Add a sample directly, bypassing the failure switch and counters.
    pub async fn insert(&self, sample: HealthSample) {
        self.samples.write().await.push(sample);
    }

    /// All stored samples of a type.
    pub async fn samples(&self, quantity: QuantityType) -> Vec<HealthSample> {
        self.samples
            .read()
            .await
            .iter()
            .filter(|s| s.quantity == quantity)
            .cloned()
            .collect()
    }

    /// Number of successful `save` calls.
    pub fn save_count(&self) -> usize {
        self.saves.load(Ordering::SeqCst)
    }

    /// Number of successful `delete` calls.
    pub fn delete_count(&self) -> usize {
        self.deletes.load(Ordering::SeqCst)
    }

    fn check(&self) -> Result<(), HealthError> {
        if !self.available {
            return Err(HealthError::Unavailable);
        }
        if self.failing.load(Ordering::SeqCst) {
            return Err(HealthError::QueryFailed("simulated failure".to_string()));
        }
        Ok(())
    }
}

impl HealthStore for MemoryHealthStore {
    fn is_available(&self) -> bool {
        self.available
    }

    async fn request_authorization(
        &self,
        _read: &[QuantityType],
        _write: &[QuantityType],
    ) -> Result<(), HealthError> {
        self.check()?;
        if self.deny_authorization {
            return Err(HealthError::AuthorizationDenied(
                "user declined access".to_string(),
            ));
        }
        Ok(())
    }

    async fn latest_sample(
        &self,
        quantity: QuantityType,
        range: SampleRange,
    ) -> Result<Option<HealthSample>, HealthError> {
        self.check()?;
        let samples = self.samples.read().await;
        Ok(samples
            .iter()
            .filter(|s| s.quantity == quantity && range.contains(s))
            .max_by_key(|s| s.end)
            .cloned())
    }

    async fn save(&self, sample: HealthSample) -> Result<(), HealthError> {
        self.check().map_err(|e| HealthError::SaveFailed(e.to_string()))?;
        self.samples.write().await.push(sample);
        self.saves.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn delete(
        &self,
        quantity: QuantityType,
        range: SampleRange,
    ) -> Result<usize, HealthError> {
        self.check().map_err(|e| HealthError::DeleteFailed(e.to_string()))?;
        let mut samples = self.samples.write().await;
        let before = samples.len();
        samples.retain(|s| !(s.quantity == quantity && range.contains(s)));
        self.deletes.fetch_add(1, Ordering::SeqCst);
        Ok(before - samples.len())
    }
}
