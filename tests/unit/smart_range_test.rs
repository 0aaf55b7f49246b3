//! Unit tests for smart slider ranges.

use bodytrack::insights::{smart_range, BodyMetric};

#[test]
fn test_weight_window_covers_buffered_extremes() {
    let range = smart_range(BodyMetric::Weight, &[60.0, 62.0, 64.0]);

    assert!(*range.start() <= 55.0);
    assert!(*range.end() >= 69.0);
    assert!(*range.start() >= 40.0);
    assert!(*range.end() <= 120.0);
}

#[test]
fn test_every_metric_stays_inside_absolute_bounds() {
    let samples: [&[f64]; 5] = [
        &[],
        &[0.0],
        &[500.0],
        &[10.0, 200.0],
        &[f64::NAN, 70.0],
    ];

    for metric in BodyMetric::ALL {
        let absolute = metric.absolute_range();
        for values in samples {
            let range = smart_range(metric, values);
            assert!(
                range.start() >= absolute.start() && range.end() <= absolute.end(),
                "{} {:?} -> {:?}",
                metric,
                values,
                range
            );
            assert!(range.start() <= range.end());
        }
    }
}

#[test]
fn test_narrow_window_keeps_minimum_width() {
    for metric in BodyMetric::ALL {
        let absolute = metric.absolute_range();
        let low = *absolute.start();
        let high = *absolute.end();
        let mid = (low + high) / 2.0;

        for value in [low, mid, high] {
            let range = smart_range(metric, &[value]);
            let width = range.end() - range.start();
            assert!(
                width >= metric.buffer() * 2.0 - 1e-9,
                "{} at {} has width {}",
                metric,
                value,
                width
            );
        }
    }
}

#[test]
fn test_no_values_gives_absolute_range() {
    assert_eq!(smart_range(BodyMetric::BodyFat, &[]), 8.0..=35.0);
    assert_eq!(smart_range(BodyMetric::Waistline, &[]), 60.0..=120.0);
}
