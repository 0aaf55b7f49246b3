//! BodyTrack - Personal Fitness Tracking Core
//!
//! Records daily body metrics (weight, body fat, waistline) and exercise
//! sessions, derives smart slider ranges, trend tips and streaks, and keeps
//! waistline values in step with a platform health data service.

pub mod health;
pub mod insights;
pub mod records;
pub mod session;
pub mod storage;

// Re-export commonly used types
pub use health::{HealthStore, HealthSync};
pub use insights::BodyMetric;
pub use records::{BodyMetrics, ExerciseSession, ExerciseType, UserProfile};
pub use session::{DataEvent, RecordSession};
pub use storage::{AppConfig, Database};
