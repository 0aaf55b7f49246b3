//! Integration tests for a recording session over an on-disk database.

use bodytrack::health::{HealthSample, HealthSync, MemoryHealthStore, QuantityType};
use bodytrack::insights::{BodyMetric, ChartMetric, ChartRange};
use bodytrack::records::ExerciseType;
use bodytrack::session::{DataEvent, RecordSession, SessionSettings};
use bodytrack::storage::Database;
use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 10, 20).unwrap()
}

fn open(dir: &TempDir) -> RecordSession<MemoryHealthStore> {
    let db = Database::open(&dir.path().join("bodytrack.db")).unwrap();
    RecordSession::with_today(
        db,
        HealthSync::new(MemoryHealthStore::new()),
        SessionSettings::default(),
        today(),
    )
}

#[tokio::test]
async fn test_week_of_recording() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);

    for offset in (0..7).rev() {
        session.select_day(today() - Duration::days(offset));
        session.set_weight(75.0 - (6 - offset) as f64 * 0.5);
        session.set_waistline(90.0 - (6 - offset) as f64).await;
        session.set_exercise_duration(ExerciseType::Cardio, Some(30.0));
    }

    assert_eq!(session.selected_day(), today());
    assert_eq!(session.streak(), 7);

    let tip = session.trend_tip().expect("trend tip");
    assert_eq!(tip.to_string(), "weight falling, waistline falling");

    let range = session.smart_range(BodyMetric::Weight);
    assert!(*range.start() <= 67.0 && *range.end() >= 80.0);

    let points = session.chart(ChartMetric::Exercise(ExerciseType::Cardio), ChartRange::Week);
    assert_eq!(points.len(), 7);

    let mirrored = session
        .health()
        .store()
        .samples(QuantityType::WaistCircumference)
        .await;
    assert_eq!(mirrored.len(), 7);

    drop(session);
    let reopened = open(&dir);
    assert_eq!(reopened.body().unwrap().weight_kg, Some(72.0));
    assert_eq!(reopened.sessions().len(), 1);
}

#[tokio::test]
async fn test_backfill_then_clear() {
    let dir = TempDir::new().unwrap();
    let mut session = open(&dir);
    session
        .health()
        .store()
        .insert(HealthSample::at_day_start(
            QuantityType::BodyMass,
            68.0,
            today(),
        ))
        .await;

    assert!(session.backfill_from_health().await);
    assert_eq!(session.body().unwrap().weight_kg, Some(68.0));

    let mut events = session.events().subscribe();
    assert!(session.clear_all_data());
    assert_eq!(events.recv().await.unwrap(), DataEvent::Cleared);

    session.reload();
    assert!(session.body().is_none());
    assert_eq!(session.streak(), 0);

    // Health data is left alone by clearing.
    assert_eq!(
        session.health().store().samples(QuantityType::BodyMass).await.len(),
        1
    );
}
