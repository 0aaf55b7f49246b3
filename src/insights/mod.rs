//! Derived computations over recorded data.
//!
//! - Smart slider ranges from the last week of values
//! - Trend tips from least-squares slopes
//! - Exercise streaks and encouragement
//! - Chart series, BMI and day-over-day comparison

pub mod chart;
pub mod composition;
pub mod smart_range;
pub mod streak;
pub mod trend;

pub use chart::{chart_series, ChartMetric, ChartPoint, ChartRange};
pub use composition::{bmi, BmiCategory, BmiReading, ChangeDirection, DayComparison};
pub use smart_range::smart_range;
pub use streak::{count_streak, current_streak, Encouragement, MAX_STREAK_DAYS};
pub use trend::{least_squares_slope, trend_tip, TrendDirection, TrendTag, TrendTip};

use crate::records::BodyMetrics;
use serde::{Deserialize, Serialize};
use std::ops::RangeInclusive;

/// Number of trailing days used for smart ranges and trend tips.
pub const RECENT_WINDOW_DAYS: u32 = 7;

/// A body measurement tracked per day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BodyMetric {
    Weight,
    BodyFat,
    Waistline,
}

impl BodyMetric {
    pub const ALL: [BodyMetric; 3] = [
        BodyMetric::Weight,
        BodyMetric::BodyFat,
        BodyMetric::Waistline,
    ];

    /// Range accepted for input.
    pub fn absolute_range(&self) -> RangeInclusive<f64> {
        match self {
            BodyMetric::Weight => 40.0..=120.0,
            BodyMetric::BodyFat => 8.0..=35.0,
            BodyMetric::Waistline => 60.0..=120.0,
        }
    }

    /// Whether a value may be recorded for this metric.
    pub fn accepts(&self, value: f64) -> bool {
        value.is_finite() && self.absolute_range().contains(&value)
    }

    /// Padding added around recent values for the smart range.
    pub fn buffer(&self) -> f64 {
        match self {
            BodyMetric::Weight => 5.0,
            BodyMetric::BodyFat => 3.0,
            BodyMetric::Waistline => 5.0,
        }
    }

    /// Minimum absolute daily slope that counts as a trend.
    pub fn trend_threshold(&self) -> f64 {
        match self {
            BodyMetric::Weight => 0.2,
            BodyMetric::BodyFat => 0.3,
            BodyMetric::Waistline => 0.5,
        }
    }

    /// Values at or below this are not plotted.
    pub fn chart_floor(&self) -> f64 {
        *self.absolute_range().start()
    }

    pub fn unit(&self) -> &'static str {
        match self {
            BodyMetric::Weight => "kg",
            BodyMetric::BodyFat => "%",
            BodyMetric::Waistline => "cm",
        }
    }

    /// Read this metric from a record.
    pub fn value_of(&self, record: &BodyMetrics) -> Option<f64> {
        match self {
            BodyMetric::Weight => record.weight_kg,
            BodyMetric::BodyFat => record.body_fat_percent,
            BodyMetric::Waistline => record.waistline_cm,
        }
    }

    /// Values of this metric, in record order, skipping gaps.
    pub fn values(&self, records: &[BodyMetrics]) -> Vec<f64> {
        records.iter().filter_map(|r| self.value_of(r)).collect()
    }
}

impl std::fmt::Display for BodyMetric {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BodyMetric::Weight => write!(f, "weight"),
            BodyMetric::BodyFat => write!(f, "body fat"),
            BodyMetric::Waistline => write!(f, "waistline"),
        }
    }
}

impl std::str::FromStr for BodyMetric {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().replace(['-', ' '], "_").as_str() {
            "weight" => Ok(BodyMetric::Weight),
            "body_fat" | "bodyfat" | "fat" => Ok(BodyMetric::BodyFat),
            "waistline" | "waist" => Ok(BodyMetric::Waistline),
            other => Err(format!("unknown body metric: {}", other)),
        }
    }
}
