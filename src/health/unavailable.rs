//! Health store for devices without a health data service.

use super::{HealthError, HealthSample, HealthStore, QuantityType, SampleRange};

/// Store that reports the service as unavailable and fails every call.
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableHealthStore;

impl HealthStore for UnavailableHealthStore {
    fn is_available(&self) -> bool {
        false
    }

    async fn request_authorization(
        &self,
        _read: &[QuantityType],
        _write: &[QuantityType],
    ) -> Result<(), HealthError> {
        Err(HealthError::Unavailable)
    }

    async fn latest_sample(
        &self,
        _quantity: QuantityType,
        _range: SampleRange,
    ) -> Result<Option<HealthSample>, HealthError> {
        Err(HealthError::Unavailable)
    }

    async fn save(&self, _sample: HealthSample) -> Result<(), HealthError> {
        Err(HealthError::Unavailable)
    }

    async fn delete(
        &self,
        _quantity: QuantityType,
        _range: SampleRange,
    ) -> Result<usize, HealthError> {
        Err(HealthError::Unavailable)
    }
}
