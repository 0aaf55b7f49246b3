//! Database operations using rusqlite.
//!
//! Owns the SQLite connection, runs schema migrations and provides the
//! operations that span more than one record kind. Per-record CRUD lives in
//! the repositories under `crate::records`.

use crate::records::{BodyMetricsRepository, ExerciseRepository};
use crate::storage::schema::{CURRENT_VERSION, MIGRATION_V1_TO_V2, SCHEMA, SCHEMA_VERSION_TABLE};
use chrono::{DateTime, NaiveDate, Utc};
use rusqlite::{Connection, Result as SqliteResult};
use std::path::Path;
use thiserror::Error;

/// Storage format for calendar days.
pub(crate) const DAY_FORMAT: &str = "%Y-%m-%d";

/// Database wrapper for SQLite operations.
pub struct Database {
    conn: Connection,
}

impl Database {
    /// Open or create a database at the given path.
    pub fn open(path: &Path) -> Result<Self, DatabaseError> {
        // Ensure parent directory exists
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| DatabaseError::IoError(e.to_string()))?;
        }

        let conn =
            Connection::open(path).map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        tracing::debug!("Opened database at {}", path.display());
        Ok(db)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, DatabaseError> {
        let conn = Connection::open_in_memory()
            .map_err(|e| DatabaseError::ConnectionFailed(e.to_string()))?;

        let db = Self { conn };
        db.initialize()?;

        Ok(db)
    }

    /// Initialize the database schema.
    fn initialize(&self) -> Result<(), DatabaseError> {
        self.conn
            .execute_batch(SCHEMA_VERSION_TABLE)
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;

        let current_version = self.get_schema_version()?;

        if current_version < CURRENT_VERSION {
            self.migrate(current_version)?;
        }

        Ok(())
    }

    /// Get the current schema version.
    fn get_schema_version(&self) -> Result<i32, DatabaseError> {
        let result: SqliteResult<i32> = self.conn.query_row(
            "SELECT COALESCE(MAX(version), 0) FROM schema_version",
            [],
            |row| row.get(0),
        );

        match result {
            Ok(version) => Ok(version),
            Err(rusqlite::Error::QueryReturnedNoRows) => Ok(0),
            Err(e) => Err(DatabaseError::QueryFailed(e.to_string())),
        }
    }

    /// Run database migrations.
    fn migrate(&self, from_version: i32) -> Result<(), DatabaseError> {
        if from_version < 1 {
            self.conn
                .execute_batch(SCHEMA)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
            self.record_version(1)?;
        }

        if from_version < 2 {
            self.conn
                .execute_batch(MIGRATION_V1_TO_V2)
                .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
            self.record_version(2)?;
        }

        tracing::info!(
            "Database migrated from version {} to {}",
            from_version,
            CURRENT_VERSION
        );

        Ok(())
    }

    fn record_version(&self, version: i32) -> Result<(), DatabaseError> {
        self.conn
            .execute(
                "INSERT INTO schema_version (version, applied_at) VALUES (?, datetime('now'))",
                [version],
            )
            .map_err(|e| DatabaseError::MigrationFailed(e.to_string()))?;
        Ok(())
    }

    /// Get a reference to the underlying connection.
    pub fn connection(&self) -> &Connection {
        &self.conn
    }

    /// Begin a transaction.
    pub fn transaction(&mut self) -> Result<rusqlite::Transaction<'_>, DatabaseError> {
        self.conn
            .transaction()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))
    }

    /// Remove every body metrics and exercise record.
    ///
    /// The profile is kept. Returns the number of rows removed.
    pub fn clear_all_records(&mut self) -> Result<usize, DatabaseError> {
        let tx = self.transaction()?;

        let body = BodyMetricsRepository::new(&tx).clear()?;
        let exercise = ExerciseRepository::new(&tx).clear()?;

        tx.commit()
            .map_err(|e| DatabaseError::TransactionFailed(e.to_string()))?;

        tracing::info!(
            "Cleared {} body metrics and {} exercise records",
            body,
            exercise
        );
        Ok(body + exercise)
    }

    /// Check whether a day has any recorded data.
    ///
    /// Counts a body record with at least one value, or an exercise session
    /// with a positive duration.
    pub fn has_any_data_on(&self, day: NaiveDate) -> Result<bool, DatabaseError> {
        let body = BodyMetricsRepository::new(&self.conn).get(day)?;
        if body.is_some_and(|m| m.has_values()) {
            return Ok(true);
        }
        ExerciseRepository::new(&self.conn).has_activity_on(day)
    }
}

/// Format a day as its storage key.
pub(crate) fn day_key(day: NaiveDate) -> String {
    day.format(DAY_FORMAT).to_string()
}

/// Parse a stored day key.
pub(crate) fn parse_day(value: &str) -> Result<NaiveDate, DatabaseError> {
    NaiveDate::parse_from_str(value, DAY_FORMAT)
        .map_err(|e| DatabaseError::DeserializationError(format!("day {:?}: {}", value, e)))
}

/// Parse a stored RFC 3339 timestamp.
pub(crate) fn parse_timestamp(value: &str) -> Result<DateTime<Utc>, DatabaseError> {
    DateTime::parse_from_rfc3339(value)
        .map(|t| t.with_timezone(&Utc))
        .map_err(|e| DatabaseError::DeserializationError(format!("timestamp {:?}: {}", value, e)))
}

/// Database errors.
#[derive(Debug, Error)]
pub enum DatabaseError {
    #[error("Failed to connect to database: {0}")]
    ConnectionFailed(String),

    #[error("IO error: {0}")]
    IoError(String),

    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    #[error("Query failed: {0}")]
    QueryFailed(String),

    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    #[error("Deserialization error: {0}")]
    DeserializationError(String),
}

impl From<rusqlite::Error> for DatabaseError {
    fn from(e: rusqlite::Error) -> Self {
        DatabaseError::QueryFailed(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::records::BodyMetricsPatch;
    use tempfile::tempdir;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_create_in_memory_database() {
        let db = Database::open_in_memory().expect("Failed to create database");
        let version = db.get_schema_version().expect("Failed to get version");
        assert_eq!(version, CURRENT_VERSION);
    }

    #[test]
    fn test_tables_created() {
        let db = Database::open_in_memory().expect("Failed to create database");

        let tables: Vec<String> = db
            .conn
            .prepare("SELECT name FROM sqlite_master WHERE type='table' ORDER BY name")
            .unwrap()
            .query_map([], |row| row.get(0))
            .unwrap()
            .filter_map(|r| r.ok())
            .collect();

        assert!(tables.contains(&"body_metrics".to_string()));
        assert!(tables.contains(&"exercise_sessions".to_string()));
        assert!(tables.contains(&"user_profile".to_string()));
    }

    #[test]
    fn test_reopen_does_not_rerun_migrations() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("bodytrack.db");

        {
            let db = Database::open(&path).expect("first open");
            db.connection()
                .execute(
                    "INSERT INTO body_metrics (day, weight_kg, created_at, updated_at)
                     VALUES ('2025-06-01', 70.0, '2025-06-01T08:00:00Z', '2025-06-01T08:00:00Z')",
                    [],
                )
                .unwrap();
        }

        let db = Database::open(&path).expect("second open");
        assert_eq!(db.get_schema_version().unwrap(), CURRENT_VERSION);
        assert!(db.has_any_data_on(day(2025, 6, 1)).unwrap());
    }

    #[test]
    fn test_has_any_data_ignores_empty_rows() {
        let db = Database::open_in_memory().unwrap();
        let conn = db.connection();
        conn.execute(
            "INSERT INTO body_metrics (day, created_at, updated_at)
             VALUES ('2025-06-02', '2025-06-02T08:00:00Z', '2025-06-02T08:00:00Z')",
            [],
        )
        .unwrap();
        conn.execute(
            "INSERT INTO exercise_sessions (day, exercise_type, duration_minutes, created_at, updated_at)
             VALUES ('2025-06-02', 'cardio', 0, '2025-06-02T08:00:00Z', '2025-06-02T08:00:00Z')",
            [],
        )
        .unwrap();

        assert!(!db.has_any_data_on(day(2025, 6, 2)).unwrap());
        assert!(!db.has_any_data_on(day(2025, 6, 3)).unwrap());
    }

    #[test]
    fn test_has_any_data_follows_record_values() {
        let db = Database::open_in_memory().unwrap();
        let body = BodyMetricsRepository::new(db.connection());
        let d = day(2025, 6, 4);

        let empty = body.upsert(d, &BodyMetricsPatch::default()).unwrap();
        assert!(!empty.has_values());
        assert!(!db.has_any_data_on(d).unwrap());

        let filled = body.upsert(d, &BodyMetricsPatch::waistline(81.0)).unwrap();
        assert!(filled.has_values());
        assert!(db.has_any_data_on(d).unwrap());
    }

    #[test]
    fn test_day_key_roundtrip() {
        let d = day(2025, 1, 9);
        assert_eq!(day_key(d), "2025-01-09");
        assert_eq!(parse_day("2025-01-09").unwrap(), d);
        assert!(parse_day("09/01/2025").is_err());
    }
}
