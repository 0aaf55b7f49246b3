//! Body metrics repository.

use chrono::{Duration, NaiveDate};
use rusqlite::{params, Connection, OptionalExtension};

use super::types::{BodyMetrics, BodyMetricsPatch};
use crate::storage::database::{day_key, parse_day, parse_timestamp, DatabaseError};

const SELECT_COLUMNS: &str =
    "SELECT day, weight_kg, body_fat_percent, waistline_cm, created_at, updated_at
     FROM body_metrics";

/// CRUD access to day-keyed body metrics.
pub struct BodyMetricsRepository<'a> {
    conn: &'a Connection,
}

impl<'a> BodyMetricsRepository<'a> {
    /// Create a repository over a database connection.
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get the record for a day.
    pub fn get(&self, day: NaiveDate) -> Result<Option<BodyMetrics>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE day = ?1", SELECT_COLUMNS),
                params![day_key(day)],
                BodyMetricsRow::from_row,
            )
            .optional()?;

        row.map(BodyMetricsRow::into_metrics).transpose()
    }

    /// Create or update the record for a day.
    ///
    /// A patch that changes nothing on an existing record is not written.
    pub fn upsert(
        &self,
        day: NaiveDate,
        patch: &BodyMetricsPatch,
    ) -> Result<BodyMetrics, DatabaseError> {
        let existing = self.get(day)?;
        let is_new = existing.is_none();
        let mut record = existing.unwrap_or_else(|| BodyMetrics::new(day));

        let changed = record.apply(patch);
        if !is_new && !changed {
            return Ok(record);
        }

        self.conn.execute(
            "INSERT INTO body_metrics
             (day, weight_kg, body_fat_percent, waistline_cm, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6)
             ON CONFLICT(day) DO UPDATE SET
                weight_kg = excluded.weight_kg,
                body_fat_percent = excluded.body_fat_percent,
                waistline_cm = excluded.waistline_cm,
                updated_at = excluded.updated_at",
            params![
                day_key(day),
                record.weight_kg,
                record.body_fat_percent,
                record.waistline_cm,
                record.created_at.to_rfc3339(),
                record.updated_at.to_rfc3339(),
            ],
        )?;

        tracing::debug!("Saved body metrics for {}", day);
        Ok(record)
    }

    /// Records with `from <= day <= to`, oldest first.
    pub fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<BodyMetrics>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE day >= ?1 AND day <= ?2 ORDER BY day ASC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(
            params![day_key(from), day_key(to)],
            BodyMetricsRow::from_row,
        )?;

        let mut records = Vec::new();
        for row in rows {
            records.push(row?.into_metrics()?);
        }
        Ok(records)
    }

    /// Records from the `days` calendar days ending at `reference`.
    pub fn recent(
        &self,
        reference: NaiveDate,
        days: u32,
    ) -> Result<Vec<BodyMetrics>, DatabaseError> {
        if days == 0 {
            return Ok(Vec::new());
        }
        let from = reference - Duration::days(i64::from(days) - 1);
        self.list_between(from, reference)
    }

    /// Most recent record strictly before `day`.
    pub fn latest_before(&self, day: NaiveDate) -> Result<Option<BodyMetrics>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE day < ?1 ORDER BY day DESC LIMIT 1", SELECT_COLUMNS),
                params![day_key(day)],
                BodyMetricsRow::from_row,
            )
            .optional()?;

        row.map(BodyMetricsRow::into_metrics).transpose()
    }

    /// Count all records.
    pub fn count(&self) -> Result<usize, DatabaseError> {
        let count: i64 = self
            .conn
            .query_row("SELECT COUNT(*) FROM body_metrics", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every record. Returns the number removed.
    pub fn clear(&self) -> Result<usize, DatabaseError> {
        Ok(self.conn.execute("DELETE FROM body_metrics", [])?)
    }
}

/// Raw row before date parsing.
struct BodyMetricsRow {
    day: String,
    weight_kg: Option<f64>,
    body_fat_percent: Option<f64>,
    waistline_cm: Option<f64>,
    created_at: String,
    updated_at: String,
}

impl BodyMetricsRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            day: row.get(0)?,
            weight_kg: row.get(1)?,
            body_fat_percent: row.get(2)?,
            waistline_cm: row.get(3)?,
            created_at: row.get(4)?,
            updated_at: row.get(5)?,
        })
    }

    fn into_metrics(self) -> Result<BodyMetrics, DatabaseError> {
        Ok(BodyMetrics {
            day: parse_day(&self.day)?,
            weight_kg: self.weight_kg,
            body_fat_percent: self.body_fat_percent,
            waistline_cm: self.waistline_cm,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::Database;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_upsert_creates_then_updates_single_row() {
        let db = Database::open_in_memory().unwrap();
        let repo = BodyMetricsRepository::new(db.connection());
        let d = day(2025, 6, 1);

        repo.upsert(d, &BodyMetricsPatch::weight(70.5)).unwrap();
        repo.upsert(d, &BodyMetricsPatch::body_fat(18.0)).unwrap();
        repo.upsert(d, &BodyMetricsPatch::waistline(81.0)).unwrap();

        assert_eq!(repo.count().unwrap(), 1);
        let stored = repo.get(d).unwrap().unwrap();
        assert_eq!(stored.weight_kg, Some(70.5));
        assert_eq!(stored.body_fat_percent, Some(18.0));
        assert_eq!(stored.waistline_cm, Some(81.0));
    }

    #[test]
    fn test_repeated_identical_write_keeps_updated_at() {
        let db = Database::open_in_memory().unwrap();
        let repo = BodyMetricsRepository::new(db.connection());
        let d = day(2025, 6, 1);

        let first = repo.upsert(d, &BodyMetricsPatch::weight(70.0)).unwrap();
        let second = repo.upsert(d, &BodyMetricsPatch::weight(70.0)).unwrap();

        assert_eq!(first.updated_at, second.updated_at);
        assert_eq!(repo.get(d).unwrap().unwrap().updated_at, first.updated_at);
    }

    #[test]
    fn test_get_missing_day() {
        let db = Database::open_in_memory().unwrap();
        let repo = BodyMetricsRepository::new(db.connection());
        assert!(repo.get(day(2025, 6, 1)).unwrap().is_none());
    }

    #[test]
    fn test_recent_window_is_inclusive() {
        let db = Database::open_in_memory().unwrap();
        let repo = BodyMetricsRepository::new(db.connection());
        let today = day(2025, 6, 10);

        for offset in 0..10 {
            let d = today - Duration::days(offset);
            repo.upsert(d, &BodyMetricsPatch::weight(70.0 + offset as f64))
                .unwrap();
        }

        let recent = repo.recent(today, 7).unwrap();
        assert_eq!(recent.len(), 7);
        assert_eq!(recent.first().unwrap().day, day(2025, 6, 4));
        assert_eq!(recent.last().unwrap().day, today);
        assert!(repo.recent(today, 0).unwrap().is_empty());
    }

    #[test]
    fn test_latest_before_skips_gaps() {
        let db = Database::open_in_memory().unwrap();
        let repo = BodyMetricsRepository::new(db.connection());

        repo.upsert(day(2025, 6, 1), &BodyMetricsPatch::weight(71.0))
            .unwrap();
        repo.upsert(day(2025, 6, 5), &BodyMetricsPatch::weight(70.0))
            .unwrap();

        let previous = repo.latest_before(day(2025, 6, 5)).unwrap().unwrap();
        assert_eq!(previous.day, day(2025, 6, 1));
        assert!(repo.latest_before(day(2025, 6, 1)).unwrap().is_none());
    }
}
