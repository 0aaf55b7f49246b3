//! Integration tests for the health adapter.

use bodytrack::health::{
    day_start, HealthAccess, HealthSample, HealthSync, MemoryHealthStore, QuantityType,
    UnavailableHealthStore,
};
use chrono::{Duration, NaiveDate};

fn day() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 9, 3).unwrap()
}

#[tokio::test]
async fn test_near_identical_waistline_is_not_rewritten() {
    let store = MemoryHealthStore::new();
    store
        .insert(HealthSample::at_day_start(
            QuantityType::WaistCircumference,
            80.05,
            day(),
        ))
        .await;
    let sync = HealthSync::new(store);

    assert!(sync.save_waistline(day(), 80.0).await);

    assert_eq!(sync.store().save_count(), 0);
    assert_eq!(sync.store().delete_count(), 0);
    let samples = sync.store().samples(QuantityType::WaistCircumference).await;
    assert_eq!(samples.len(), 1);
    assert_eq!(samples[0].value, 80.05);
}

#[tokio::test]
async fn test_changed_waistline_replaces_only_that_day() {
    let store = MemoryHealthStore::new();
    let yesterday = day() - Duration::days(1);
    store
        .insert(HealthSample::at_day_start(
            QuantityType::WaistCircumference,
            84.0,
            yesterday,
        ))
        .await;
    store
        .insert(HealthSample::at_day_start(
            QuantityType::WaistCircumference,
            83.0,
            day(),
        ))
        .await;
    let sync = HealthSync::new(store);

    assert!(sync.save_waistline(day(), 82.0).await);

    assert_eq!(
        sync.for_day(QuantityType::WaistCircumference, day()).await,
        Some(82.0)
    );
    assert_eq!(
        sync.for_day(QuantityType::WaistCircumference, yesterday)
            .await,
        Some(84.0)
    );
}

#[tokio::test]
async fn test_latest_all_reads_every_type() {
    let store = MemoryHealthStore::new();
    for (quantity, value) in [
        (QuantityType::BodyMass, 72.5),
        (QuantityType::Height, 178.0),
        (QuantityType::BodyFatPercentage, 17.0),
        (QuantityType::WaistCircumference, 81.0),
    ] {
        store
            .insert(HealthSample::at_day_start(quantity, value, day()))
            .await;
    }
    let sync = HealthSync::new(store);

    let snapshot = sync
        .latest_all_as_of(day_start(day()) + Duration::hours(20))
        .await;
    assert_eq!(snapshot.weight_kg, Some(72.5));
    assert_eq!(snapshot.height_cm, Some(178.0));
    assert_eq!(snapshot.body_fat_percent, Some(17.0));
    assert_eq!(snapshot.waistline_cm, Some(81.0));
}

#[tokio::test]
async fn test_denied_and_unavailable_access() {
    let denied = HealthSync::new(MemoryHealthStore::denying());
    assert!(matches!(
        denied.request_access().await,
        HealthAccess::Denied(_)
    ));

    let none = HealthSync::new(UnavailableHealthStore);
    let access = none.request_access().await;
    assert_eq!(access, HealthAccess::Unavailable);
    assert!(access.user_message().is_some());
    assert_eq!(none.for_day(QuantityType::BodyMass, day()).await, None);
}
