//! Smart slider ranges.
//!
//! Narrows a metric's input range to recently observed values plus a fixed
//! buffer, so a slider has useful resolution around where the user is.

use std::ops::RangeInclusive;

use super::BodyMetric;

/// Compute the input range for a metric from recent values.
///
/// `[min - buffer, max + buffer]` is clamped into the metric's absolute
/// range. If the result is narrower than `2 * buffer` it is widened around
/// its centre and shifted back inside the absolute range. With no values the
/// absolute range is returned.
pub fn smart_range(metric: BodyMetric, recent_values: &[f64]) -> RangeInclusive<f64> {
    let absolute = metric.absolute_range();
    let (abs_lo, abs_hi) = (*absolute.start(), *absolute.end());

    let finite = recent_values.iter().copied().filter(|v| v.is_finite());
    let (min, max) = finite.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if min > max {
        return absolute;
    }

    let buffer = metric.buffer();
    let mut lower = (min - buffer).max(abs_lo);
    let mut upper = (max + buffer).min(abs_hi);

    let min_width = buffer * 2.0;
    if upper - lower < min_width {
        let centre = (lower + upper) / 2.0;
        lower = centre - buffer;
        upper = centre + buffer;

        if lower < abs_lo {
            upper += abs_lo - lower;
            lower = abs_lo;
        }
        if upper > abs_hi {
            lower -= upper - abs_hi;
            upper = abs_hi;
        }
        lower = lower.max(abs_lo);
    }

    lower..=upper
}
