//! Day-keyed record store.
//!
//! Three record kinds are kept locally:
//! - body metrics, one per calendar day
//! - exercise sessions, one per (day, type)
//! - the user profile, a singleton

pub mod body;
pub mod exercise;
pub mod profile;
pub mod types;

pub use body::BodyMetricsRepository;
pub use exercise::ExerciseRepository;
pub use profile::ProfileRepository;
pub use types::{
    BodyMetrics, BodyMetricsPatch, ExerciseDetails, ExerciseSession, ExerciseType, Gender,
    ProfilePatch, Targets, UserProfile,
};
