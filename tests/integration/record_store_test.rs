//! Integration tests for the on-disk record store.

use bodytrack::records::{
    BodyMetricsPatch, BodyMetricsRepository, ExerciseRepository, ExerciseType, ProfilePatch,
    ProfileRepository, Targets,
};
use bodytrack::storage::Database;
use chrono::{Duration, NaiveDate};
use tempfile::TempDir;

fn day(offset: i64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 5, 1).unwrap() + Duration::days(offset)
}

#[test]
fn test_one_record_per_day_after_many_upserts() {
    let db = Database::open_in_memory().unwrap();
    let body = BodyMetricsRepository::new(db.connection());
    let exercise = ExerciseRepository::new(db.connection());

    for i in 0..20 {
        let d = day(i % 4);
        body.upsert(d, &BodyMetricsPatch::weight(70.0 + i as f64 * 0.1))
            .unwrap();
        body.upsert(d, &BodyMetricsPatch::waistline(80.0)).unwrap();
        for kind in ExerciseType::ALL {
            exercise
                .set_duration(d, kind, Some(10.0 + i as f64))
                .unwrap();
        }
    }

    assert_eq!(body.count().unwrap(), 4);
    assert_eq!(exercise.count().unwrap(), 4 * ExerciseType::ALL.len());

    let last = body.get(day(3)).unwrap().unwrap();
    assert!((last.weight_kg.unwrap() - 71.9).abs() < 1e-9);
    assert_eq!(last.waistline_cm, Some(80.0));
}

#[test]
fn test_zero_duration_removes_session() {
    let db = Database::open_in_memory().unwrap();
    let exercise = ExerciseRepository::new(db.connection());

    exercise
        .set_duration(day(0), ExerciseType::Hiit, Some(25.0))
        .unwrap();
    exercise
        .set_duration(day(0), ExerciseType::Cardio, Some(30.0))
        .unwrap();

    assert!(exercise
        .set_duration(day(0), ExerciseType::Hiit, Some(0.0))
        .unwrap()
        .is_none());
    assert!(exercise
        .set_duration(day(0), ExerciseType::Cardio, None)
        .unwrap()
        .is_none());

    assert!(exercise.list_for_day(day(0)).unwrap().is_empty());
    assert!(!exercise.has_activity_on(day(0)).unwrap());
}

#[test]
fn test_identical_upsert_keeps_timestamp() {
    let db = Database::open_in_memory().unwrap();
    let body = BodyMetricsRepository::new(db.connection());

    let first = body.upsert(day(0), &BodyMetricsPatch::weight(70.0)).unwrap();
    let again = body.upsert(day(0), &BodyMetricsPatch::weight(70.0)).unwrap();
    let stored = body.get(day(0)).unwrap().unwrap();

    assert_eq!(first.updated_at, again.updated_at);
    assert_eq!(first.updated_at, stored.updated_at);
}

#[test]
fn test_records_survive_reopen() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nested").join("bodytrack.db");

    {
        let db = Database::open(&path).unwrap();
        BodyMetricsRepository::new(db.connection())
            .upsert(day(0), &BodyMetricsPatch::body_fat(21.5))
            .unwrap();
        ProfileRepository::new(db.connection())
            .set_targets(&Targets {
                waistline_cm: Some(78.0),
                ..Targets::default()
            })
            .unwrap();
    }

    let db = Database::open(&path).unwrap();
    let record = BodyMetricsRepository::new(db.connection())
        .get(day(0))
        .unwrap()
        .unwrap();
    assert_eq!(record.body_fat_percent, Some(21.5));

    let profile = ProfileRepository::new(db.connection()).get().unwrap().unwrap();
    assert_eq!(profile.targets.waistline_cm, Some(78.0));
}

#[test]
fn test_clear_all_keeps_profile() {
    let mut db = Database::open_in_memory().unwrap();
    {
        let conn = db.connection();
        BodyMetricsRepository::new(conn)
            .upsert(day(0), &BodyMetricsPatch::weight(70.0))
            .unwrap();
        ExerciseRepository::new(conn)
            .set_duration(day(1), ExerciseType::Strength, Some(40.0))
            .unwrap();
        ProfileRepository::new(conn)
            .upsert(&ProfilePatch {
                height_cm: Some(182.0),
                ..ProfilePatch::default()
            })
            .unwrap();
    }

    assert_eq!(db.clear_all_records().unwrap(), 2);

    let conn = db.connection();
    assert_eq!(BodyMetricsRepository::new(conn).count().unwrap(), 0);
    assert_eq!(ExerciseRepository::new(conn).count().unwrap(), 0);
    assert_eq!(
        ProfileRepository::new(conn).get().unwrap().unwrap().height_cm,
        182.0
    );
}

#[test]
fn test_recent_window_is_seven_days_inclusive() {
    let db = Database::open_in_memory().unwrap();
    let body = BodyMetricsRepository::new(db.connection());
    for i in 0..10 {
        body.upsert(day(i), &BodyMetricsPatch::weight(70.0)).unwrap();
    }

    let recent = body.recent(day(9), 7).unwrap();
    assert_eq!(recent.len(), 7);
    assert_eq!(recent.first().unwrap().day, day(3));
    assert_eq!(recent.last().unwrap().day, day(9));
}
