//! Trend chart series.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use super::BodyMetric;
use crate::records::{BodyMetrics, ExerciseSession, ExerciseType};

/// What a chart plots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartMetric {
    Body(BodyMetric),
    Exercise(ExerciseType),
}

impl ChartMetric {
    pub const ALL: [ChartMetric; 6] = [
        ChartMetric::Body(BodyMetric::Weight),
        ChartMetric::Body(BodyMetric::BodyFat),
        ChartMetric::Body(BodyMetric::Waistline),
        ChartMetric::Exercise(ExerciseType::Cardio),
        ChartMetric::Exercise(ExerciseType::Strength),
        ChartMetric::Exercise(ExerciseType::Hiit),
    ];

    pub fn unit(&self) -> &'static str {
        match self {
            ChartMetric::Body(metric) => metric.unit(),
            ChartMetric::Exercise(_) => "min",
        }
    }
}

impl std::fmt::Display for ChartMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartMetric::Body(metric) => write!(f, "{}", metric),
            ChartMetric::Exercise(kind) => write!(f, "{} duration", kind),
        }
    }
}

impl std::str::FromStr for ChartMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(kind) = s.parse::<ExerciseType>() {
            return Ok(ChartMetric::Exercise(kind));
        }
        s.parse::<BodyMetric>().map(ChartMetric::Body)
    }
}

/// Chart time span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ChartRange {
    #[default]
    Week,
    TwoWeeks,
    Month,
}

impl ChartRange {
    pub fn days(&self) -> i64 {
        match self {
            ChartRange::Week => 7,
            ChartRange::TwoWeeks => 14,
            ChartRange::Month => 30,
        }
    }

    /// Closest range for a day count.
    pub fn from_days(days: u32) -> Self {
        match days {
            0..=10 => ChartRange::Week,
            11..=21 => ChartRange::TwoWeeks,
            _ => ChartRange::Month,
        }
    }

    /// First day included when the chart ends on `today`.
    ///
    /// The window holds exactly `days()` calendar days, today included.
    pub fn start(&self, today: NaiveDate) -> NaiveDate {
        today - Duration::days(self.days() - 1)
    }
}

/// One plotted value.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ChartPoint {
    pub day: NaiveDate,
    pub value: f64,
}

/// Build the series for a metric, oldest first.
///
/// Body values at or below the metric's chart floor and exercise durations
/// that are not positive are left out.
pub fn chart_series(
    metric: ChartMetric,
    range: ChartRange,
    today: NaiveDate,
    body: &[BodyMetrics],
    sessions: &[ExerciseSession],
) -> Vec<ChartPoint> {
    let start = range.start(today);
    let in_range = |day: NaiveDate| day >= start && day <= today;

    let mut points: Vec<ChartPoint> = match metric {
        ChartMetric::Body(body_metric) => body
            .iter()
            .filter(|r| in_range(r.day))
            .filter_map(|r| {
                let value = body_metric.value_of(r)?;
                (value > body_metric.chart_floor()).then_some(ChartPoint { day: r.day, value })
            })
            .collect(),
        ChartMetric::Exercise(kind) => sessions
            .iter()
            .filter(|s| s.exercise_type == kind && in_range(s.day))
            .filter_map(|s| {
                let value = s.duration_minutes.filter(|d| *d > 0.0)?;
                Some(ChartPoint { day: s.day, value })
            })
            .collect(),
    };

    points.sort_by_key(|p| p.day);
    points
}
