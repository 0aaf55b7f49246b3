//! Unit test modules.

mod body_metric_test;
mod smart_range_test;
mod streak_test;
mod trend_test;
