//! Trend tips from recent body metrics.
//!
//! Fits an ordinary least-squares line through each metric's recent values
//! (x = 0..n-1, oldest first) and reports metrics whose daily slope exceeds
//! the metric threshold.

use serde::{Deserialize, Serialize};

use super::BodyMetric;
use crate::records::BodyMetrics;

/// Direction of a detected trend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum TrendDirection {
    Rising,
    Falling,
}

/// One triggered trend.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrendTag {
    pub metric: BodyMetric,
    pub direction: TrendDirection,
    /// Fitted change per day
    pub slope: f64,
}

impl std::fmt::Display for TrendTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let direction = match self.direction {
            TrendDirection::Rising => "rising",
            TrendDirection::Falling => "falling",
        };
        write!(f, "{} {}", self.metric, direction)
    }
}

/// All trends triggered over the window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendTip {
    pub tags: Vec<TrendTag>,
}

impl std::fmt::Display for TrendTip {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let text: Vec<String> = self.tags.iter().map(|t| t.to_string()).collect();
        write!(f, "{}", text.join(", "))
    }
}

/// Slope of the least-squares line through `values` at x = 0..n-1.
///
/// Needs at least two values.
pub fn least_squares_slope(values: &[f64]) -> Option<f64> {
    let n = values.len();
    if n < 2 {
        return None;
    }

    let n_f = n as f64;
    let mean_x = (n_f - 1.0) / 2.0;
    let mean_y = values.iter().sum::<f64>() / n_f;

    let (mut numerator, mut denominator) = (0.0, 0.0);
    for (i, y) in values.iter().enumerate() {
        let dx = i as f64 - mean_x;
        numerator += dx * (y - mean_y);
        denominator += dx * dx;
    }

    if denominator == 0.0 {
        return None;
    }
    Some(numerator / denominator)
}

/// Build a trend tip from records ordered oldest first.
///
/// Returns `None` when no metric crosses its threshold.
pub fn trend_tip(records: &[BodyMetrics]) -> Option<TrendTip> {
    let tags: Vec<TrendTag> = BodyMetric::ALL
        .iter()
        .filter_map(|metric| {
            let slope = least_squares_slope(&metric.values(records))?;
            if slope.abs() <= metric.trend_threshold() {
                return None;
            }
            let direction = if slope > 0.0 {
                TrendDirection::Rising
            } else {
                TrendDirection::Falling
            };
            Some(TrendTag {
                metric: *metric,
                direction,
                slope,
            })
        })
        .collect();

    if tags.is_empty() {
        None
    } else {
        Some(TrendTip { tags })
    }
}
