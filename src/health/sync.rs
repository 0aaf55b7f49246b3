//! Health read/write rules.
//!
//! Reads fetch the most recent sample of a type, either over the last
//! [`LOOKBACK_DAYS`] days or within one calendar day. The only write is the
//! waistline mirror, which keeps at most one app-written sample per day.
//! Every failure is logged and reported as "no data" or `false`.

use chrono::{Local, NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::sync::atomic::{AtomicBool, Ordering};
use tracing::{debug, info, warn};

use super::{HealthError, HealthSample, HealthStore, QuantityType, SampleRange};

/// Days searched for "latest" values.
pub const LOOKBACK_DAYS: i64 = 30;

/// A same-day waistline sample closer than this is not rewritten.
pub const WAISTLINE_TOLERANCE_CM: f64 = 0.1;

/// Outcome of an authorization request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HealthAccess {
    Authorized,
    Denied(String),
    Unavailable,
}

impl HealthAccess {
    /// Message to show the user, if any.
    pub fn user_message(&self) -> Option<String> {
        match self {
            HealthAccess::Authorized => None,
            HealthAccess::Denied(reason) => {
                Some(format!("Health data access was not granted: {}", reason))
            }
            HealthAccess::Unavailable => {
                Some("Health data is not available on this device".to_string())
            }
        }
    }
}

/// Latest health values for every read type.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct BodySnapshot {
    pub weight_kg: Option<f64>,
    pub height_cm: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub waistline_cm: Option<f64>,
}

/// App-level access to a [`HealthStore`].
pub struct HealthSync<S: HealthStore> {
    store: S,
    authorized: AtomicBool,
}

impl<S: HealthStore> HealthSync<S> {
    pub fn new(store: S) -> Self {
        Self {
            store,
            authorized: AtomicBool::new(false),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn is_available(&self) -> bool {
        self.store.is_available()
    }

    /// Whether the last authorization request succeeded.
    pub fn is_authorized(&self) -> bool {
        self.authorized.load(Ordering::SeqCst)
    }

    /// Request read access to all body types and write access to waistline.
    pub async fn request_access(&self) -> HealthAccess {
        if !self.store.is_available() {
            info!("Health data unavailable on this device");
            return HealthAccess::Unavailable;
        }

        let access = match self
            .store
            .request_authorization(&QuantityType::READ, &QuantityType::WRITE)
            .await
        {
            Ok(()) => HealthAccess::Authorized,
            Err(HealthError::Unavailable) => HealthAccess::Unavailable,
            Err(HealthError::AuthorizationDenied(reason)) => HealthAccess::Denied(reason),
            Err(e) => HealthAccess::Denied(e.to_string()),
        };

        self.authorized
            .store(access == HealthAccess::Authorized, Ordering::SeqCst);
        match &access {
            HealthAccess::Authorized => info!("Health data access granted"),
            other => warn!("Health data access not granted: {:?}", other),
        }
        access
    }

    /// Most recent value of a type over the last [`LOOKBACK_DAYS`] days.
    pub async fn latest(&self, quantity: QuantityType) -> Option<f64> {
        self.latest_as_of(quantity, Local::now().naive_local()).await
    }

    /// Like [`latest`](Self::latest) with an explicit "now".
    pub async fn latest_as_of(&self, quantity: QuantityType, now: NaiveDateTime) -> Option<f64> {
        self.query(quantity, SampleRange::lookback(now, LOOKBACK_DAYS))
            .await
    }

    /// Latest values of every read type, fetched concurrently.
    pub async fn latest_all(&self) -> BodySnapshot {
        self.latest_all_as_of(Local::now().naive_local()).await
    }

    pub async fn latest_all_as_of(&self, now: NaiveDateTime) -> BodySnapshot {
        let (weight_kg, height_cm, body_fat_percent, waistline_cm) = tokio::join!(
            self.latest_as_of(QuantityType::BodyMass, now),
            self.latest_as_of(QuantityType::Height, now),
            self.latest_as_of(QuantityType::BodyFatPercentage, now),
            self.latest_as_of(QuantityType::WaistCircumference, now),
        );
        BodySnapshot {
            weight_kg,
            height_cm,
            body_fat_percent,
            waistline_cm,
        }
    }

    /// Most recent value of a type recorded on a given day.
    pub async fn for_day(&self, quantity: QuantityType, day: NaiveDate) -> Option<f64> {
        self.query(quantity, SampleRange::day(day)).await
    }

    /// Values of every read type recorded on a given day.
    pub async fn all_for_day(&self, day: NaiveDate) -> BodySnapshot {
        let (weight_kg, height_cm, body_fat_percent, waistline_cm) = tokio::join!(
            self.for_day(QuantityType::BodyMass, day),
            self.for_day(QuantityType::Height, day),
            self.for_day(QuantityType::BodyFatPercentage, day),
            self.for_day(QuantityType::WaistCircumference, day),
        );
        BodySnapshot {
            weight_kg,
            height_cm,
            body_fat_percent,
            waistline_cm,
        }
    }

    /// Mirror a waistline value for a day.
    ///
    /// Skips the write when the day already holds a sample within
    /// [`WAISTLINE_TOLERANCE_CM`]; otherwise replaces the day's samples with
    /// one at the start of the day. Returns whether the day now holds the
    /// value.
    pub async fn save_waistline(&self, day: NaiveDate, value_cm: f64) -> bool {
        if !self.store.is_available() {
            debug!("Skipping waistline mirror: health data unavailable");
            return false;
        }
        if !value_cm.is_finite() || value_cm <= 0.0 {
            warn!("Refusing to mirror invalid waistline {}", value_cm);
            return false;
        }

        let range = SampleRange::day(day);
        let quantity = QuantityType::WaistCircumference;

        match self.store.latest_sample(quantity, range).await {
            Ok(Some(existing)) if (existing.value - value_cm).abs() < WAISTLINE_TOLERANCE_CM => {
                debug!(
                    "Waistline for {} already at {:.2} cm, skipping write",
                    day, existing.value
                );
                return true;
            }
            Ok(_) => {}
            Err(e) => {
                warn!("Failed to read waistline for {}: {}", day, e);
                return false;
            }
        }

        if let Err(e) = self.store.delete(quantity, range).await {
            warn!("Failed to clear waistline samples for {}: {}", day, e);
            return false;
        }

        match self
            .store
            .save(HealthSample::at_day_start(quantity, value_cm, day))
            .await
        {
            Ok(()) => {
                info!("Mirrored waistline {:.1} cm for {}", value_cm, day);
                true
            }
            Err(e) => {
                warn!("Failed to save waistline for {}: {}", day, e);
                false
            }
        }
    }

    async fn query(&self, quantity: QuantityType, range: SampleRange) -> Option<f64> {
        if !self.store.is_available() {
            return None;
        }
        match self.store.latest_sample(quantity, range).await {
            Ok(sample) => sample.map(|s| s.value),
            Err(e) => {
                warn!("Health query for {:?} failed: {}", quantity, e);
                None
            }
        }
    }
}
