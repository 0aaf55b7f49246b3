//! Health data service integration.
//!
//! The platform health service is reached through the [`HealthStore`]
//! trait: sample queries by type and time range, single-sample writes and
//! deletion by range. [`HealthSync`] layers the app's read/write rules on top
//! and turns every failure into "no data".

pub mod memory;
pub mod sync;
pub mod unavailable;

pub use memory::MemoryHealthStore;
pub use sync::{BodySnapshot, HealthAccess, HealthSync, LOOKBACK_DAYS, WAISTLINE_TOLERANCE_CM};
pub use unavailable::UnavailableHealthStore;

use chrono::{Duration, NaiveDate, NaiveDateTime, NaiveTime};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// Quantity types exchanged with the health service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum QuantityType {
    /// Body mass in kilograms
    BodyMass,
    /// Height in centimeters
    Height,
    /// Body fat in percent (0-100)
    BodyFatPercentage,
    /// Waist circumference in centimeters
    WaistCircumference,
}

impl QuantityType {
    /// Types the app reads.
    pub const READ: [QuantityType; 4] = [
        QuantityType::BodyMass,
        QuantityType::Height,
        QuantityType::BodyFatPercentage,
        QuantityType::WaistCircumference,
    ];

    /// Types the app writes.
    pub const WRITE: [QuantityType; 1] = [QuantityType::WaistCircumference];
}

/// A single quantity sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthSample {
    pub id: Uuid,
    pub quantity: QuantityType,
    pub value: f64,
    /// Local wall-clock start
    pub start: NaiveDateTime,
    /// Local wall-clock end
    pub end: NaiveDateTime,
}

impl HealthSample {
    pub fn new(
        quantity: QuantityType,
        value: f64,
        start: NaiveDateTime,
        end: NaiveDateTime,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            quantity,
            value,
            start,
            end,
        }
    }

    /// A point sample at the start of a day.
    pub fn at_day_start(quantity: QuantityType, value: f64, day: NaiveDate) -> Self {
        let start = day_start(day);
        Self::new(quantity, value, start, start)
    }
}

/// Sample time range: `start <= sample.start < end`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SampleRange {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl SampleRange {
    pub fn new(start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self { start, end }
    }

    /// The whole of one calendar day.
    pub fn day(day: NaiveDate) -> Self {
        let start = day_start(day);
        Self {
            start,
            end: start + Duration::days(1),
        }
    }

    /// The `days` days leading up to `now`.
    pub fn lookback(now: NaiveDateTime, days: i64) -> Self {
        Self {
            start: now - Duration::days(days),
            end: now,
        }
    }

    pub fn contains(&self, sample: &HealthSample) -> bool {
        sample.start >= self.start && sample.start < self.end
    }
}

/// Midnight at the start of a day.
pub fn day_start(day: NaiveDate) -> NaiveDateTime {
    day.and_time(NaiveTime::MIN)
}

/// Access to a platform health data service.
pub trait HealthStore: Send + Sync {
    /// Whether health data exists on this device at all.
    fn is_available(&self) -> bool;

    /// Ask for read and write permission.
    fn request_authorization(
        &self,
        read: &[QuantityType],
        write: &[QuantityType],
    ) -> impl std::future::Future<Output = Result<(), HealthError>> + Send;

    /// Most recent sample (by end time) of a type within a range.
    fn latest_sample(
        &self,
        quantity: QuantityType,
        range: SampleRange,
    ) -> impl std::future::Future<Output = Result<Option<HealthSample>, HealthError>> + Send;

    /// Save a sample.
    fn save(
        &self,
        sample: HealthSample,
    ) -> impl std::future::Future<Output = Result<(), HealthError>> + Send;

    /// Delete all samples of a type within a range. Returns the count.
    fn delete(
        &self,
        quantity: QuantityType,
        range: SampleRange,
    ) -> impl std::future::Future<Output = Result<usize, HealthError>> + Send;
}

/// Health service errors.
#[derive(Debug, Clone, Error)]
pub enum HealthError {
    #[error("Health data is not available on this device")]
    Unavailable,

    #[error("Authorization denied: {0}")]
    AuthorizationDenied(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Save failed: {0}")]
    SaveFailed(String),

    #[error("Delete failed: {0}")]
    DeleteFailed(String),
}
