//! Day-recording session.
//!
//! Holds the selected day and transient copies of its records, writes every
//! edit straight back to the store and coordinates the health mirror.

pub mod events;
pub mod record;

pub use events::{DataEvent, DataEvents};
pub use record::{DaySummary, RecordSession, SessionSettings};
