//! Unit tests for trend tips.

use bodytrack::insights::{least_squares_slope, trend_tip, BodyMetric, TrendDirection};
use bodytrack::records::BodyMetrics;
use chrono::{Duration, NaiveDate};

fn week_of_waistline(start: f64, step: f64) -> Vec<BodyMetrics> {
    let first = NaiveDate::from_ymd_opt(2025, 3, 1).unwrap();
    (0..7)
        .map(|i| {
            let mut record = BodyMetrics::new(first + Duration::days(i));
            record.waistline_cm = Some(start + step * i as f64);
            record
        })
        .collect()
}

#[test]
fn test_rising_waistline_is_reported() {
    let tip = trend_tip(&week_of_waistline(80.0, 1.0)).expect("tip");

    assert_eq!(tip.tags.len(), 1);
    assert_eq!(tip.tags[0].metric, BodyMetric::Waistline);
    assert_eq!(tip.tags[0].direction, TrendDirection::Rising);
    assert_eq!(tip.to_string(), "waistline rising");
}

#[test]
fn test_constant_waistline_has_no_tip() {
    assert!(trend_tip(&week_of_waistline(80.0, 0.0)).is_none());
}

#[test]
fn test_slope_at_threshold_is_ignored() {
    // 0.5 cm/day is exactly the waistline threshold
    assert!(trend_tip(&week_of_waistline(80.0, 0.5)).is_none());
    assert!(trend_tip(&week_of_waistline(80.0, -0.6)).is_some());
}

#[test]
fn test_multiple_tags_are_joined() {
    let mut records = week_of_waistline(90.0, -1.0);
    for (i, record) in records.iter_mut().enumerate() {
        record.weight_kg = Some(80.0 - i as f64 * 0.5);
    }

    let tip = trend_tip(&records).expect("tip");
    assert_eq!(tip.to_string(), "weight falling, waistline falling");
}

#[test]
fn test_slope_of_noisy_series() {
    let slope = least_squares_slope(&[70.0, 70.4, 69.9, 70.6, 70.8]).unwrap();
    assert!(slope > 0.0);
    assert!(least_squares_slope(&[70.0]).is_none());
}
