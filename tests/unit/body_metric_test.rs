//! Unit tests for metric parameters, chart series and BMI.

use bodytrack::insights::{bmi, chart_series, BmiCategory, BodyMetric, ChartMetric, ChartRange};
use bodytrack::records::{BodyMetrics, ExerciseSession, ExerciseType};
use chrono::{Duration, NaiveDate};

#[test]
fn test_metric_table() {
    assert_eq!(BodyMetric::Weight.absolute_range(), 40.0..=120.0);
    assert_eq!(BodyMetric::Weight.buffer(), 5.0);
    assert_eq!(BodyMetric::BodyFat.trend_threshold(), 0.3);
    assert_eq!(BodyMetric::Waistline.chart_floor(), 60.0);
}

#[test]
fn test_metric_names_parse() {
    assert_eq!("body-fat".parse::<BodyMetric>().unwrap(), BodyMetric::BodyFat);
    assert_eq!("waist".parse::<BodyMetric>().unwrap(), BodyMetric::Waistline);
    assert!("height".parse::<BodyMetric>().is_err());
}

#[test]
fn test_chart_drops_floor_values_and_idle_sessions() {
    let today = NaiveDate::from_ymd_opt(2025, 8, 15).unwrap();

    let mut at_floor = BodyMetrics::new(today - Duration::days(2));
    at_floor.body_fat_percent = Some(8.0);
    let mut above = BodyMetrics::new(today - Duration::days(1));
    above.body_fat_percent = Some(15.0);

    let points = chart_series(
        ChartMetric::Body(BodyMetric::BodyFat),
        ChartRange::Week,
        today,
        &[above, at_floor],
        &[],
    );
    assert_eq!(points.len(), 1);
    assert_eq!(points[0].value, 15.0);

    let idle = ExerciseSession::new(today, ExerciseType::Strength);
    let points = chart_series(
        ChartMetric::Exercise(ExerciseType::Strength),
        ChartRange::Month,
        today,
        &[],
        &[idle],
    );
    assert!(points.is_empty());
}

#[test]
fn test_bmi_categories() {
    assert_eq!(bmi(55.0, 180.0).unwrap().category, BmiCategory::Underweight);
    assert_eq!(bmi(80.0, 180.0).unwrap().category, BmiCategory::Overweight);
    assert!(bmi(0.0, 180.0).is_none());
}
