//! Exercise session repository.
//!
//! Sessions are keyed by (day, type). A session only exists while it has a
//! positive duration: clearing the duration removes the row.

use chrono::{NaiveDate, Utc};
use rusqlite::{params, Connection, OptionalExtension};

use super::types::{ExerciseDetails, ExerciseSession, ExerciseType};
use crate::storage::database::{day_key, parse_day, parse_timestamp, DatabaseError};

const SELECT_COLUMNS: &str =
    "SELECT day, exercise_type, duration_minutes, intensity, calories, notes, created_at, updated_at
     FROM exercise_sessions";

/// CRUD access to exercise sessions.
pub struct ExerciseRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ExerciseRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get the session of a type on a day.
    pub fn get(
        &self,
        day: NaiveDate,
        exercise_type: ExerciseType,
    ) -> Result<Option<ExerciseSession>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                &format!("{} WHERE day = ?1 AND exercise_type = ?2", SELECT_COLUMNS),
                params![day_key(day), exercise_type.as_str()],
                ExerciseRow::from_row,
            )
            .optional()?;

        row.map(ExerciseRow::into_session).transpose()
    }

    /// All sessions on a day.
    pub fn list_for_day(&self, day: NaiveDate) -> Result<Vec<ExerciseSession>, DatabaseError> {
        self.list_between(day, day)
    }

    /// Sessions with `from <= day <= to`, oldest first.
    pub fn list_between(
        &self,
        from: NaiveDate,
        to: NaiveDate,
    ) -> Result<Vec<ExerciseSession>, DatabaseError> {
        let mut stmt = self.conn.prepare(&format!(
            "{} WHERE day >= ?1 AND day <= ?2 ORDER BY day ASC, exercise_type ASC",
            SELECT_COLUMNS
        ))?;

        let rows = stmt.query_map(params![day_key(from), day_key(to)], ExerciseRow::from_row)?;

        let mut sessions = Vec::new();
        for row in rows {
            sessions.push(row?.into_session()?);
        }
        Ok(sessions)
    }

    /// Set the duration of a session.
    ///
    /// `None`, zero or a negative duration deletes the session. Returns the
    /// stored session, or `None` when it was removed.
    pub fn set_duration(
        &self,
        day: NaiveDate,
        exercise_type: ExerciseType,
        duration_minutes: Option<f64>,
    ) -> Result<Option<ExerciseSession>, DatabaseError> {
        let Some(duration) = duration_minutes.filter(|d| d.is_finite() && *d > 0.0) else {
            let removed = self.delete(day, exercise_type)?;
            if removed {
                tracing::debug!("Removed {} session on {}", exercise_type, day);
            }
            return Ok(None);
        };

        let mut session = match self.get(day, exercise_type)? {
            Some(existing) if existing.duration_minutes == Some(duration) => {
                return Ok(Some(existing));
            }
            Some(existing) => existing,
            None => ExerciseSession::new(day, exercise_type),
        };

        session.duration_minutes = Some(duration);
        session.updated_at = Utc::now();
        self.save(&session)?;

        Ok(Some(session))
    }

    /// Update intensity, calories or notes of an existing session.
    ///
    /// Returns `None` when there is no session to update.
    pub fn update_details(
        &self,
        day: NaiveDate,
        exercise_type: ExerciseType,
        details: &ExerciseDetails,
    ) -> Result<Option<ExerciseSession>, DatabaseError> {
        let Some(mut session) = self.get(day, exercise_type)? else {
            return Ok(None);
        };

        if let Some(intensity) = details.intensity {
            session.intensity = Some(intensity);
        }
        if let Some(calories) = details.calories {
            session.calories = Some(calories);
        }
        if let Some(notes) = &details.notes {
            session.notes = Some(notes.clone());
        }
        session.updated_at = Utc::now();
        self.save(&session)?;

        Ok(Some(session))
    }

    /// Delete a session. Returns whether a row was removed.
    pub fn delete(
        &self,
        day: NaiveDate,
        exercise_type: ExerciseType,
    ) -> Result<bool, DatabaseError> {
        let deleted = self.conn.execute(
            "DELETE FROM exercise_sessions WHERE day = ?1 AND exercise_type = ?2",
            params![day_key(day), exercise_type.as_str()],
        )?;
        Ok(deleted > 0)
    }

    /// Whether any session on a day has a positive duration.
    pub fn has_activity_on(&self, day: NaiveDate) -> Result<bool, DatabaseError> {
        let exists: bool = self.conn.query_row(
            "SELECT EXISTS(SELECT 1 FROM exercise_sessions WHERE day = ?1 AND duration_minutes > 0)",
            params![day_key(day)],
            |row| row.get(0),
        )?;
        Ok(exists)
    }

    /// Count all sessions.
    pub fn count(&self) -> Result<usize, DatabaseError> {
        let count: i64 =
            self.conn
                .query_row("SELECT COUNT(*) FROM exercise_sessions", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    /// Delete every session. Returns the number removed.
    pub fn clear(&self) -> Result<usize, DatabaseError> {
        Ok(self.conn.execute("DELETE FROM exercise_sessions", [])?)
    }

    fn save(&self, session: &ExerciseSession) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO exercise_sessions
             (day, exercise_type, duration_minutes, intensity, calories, notes, created_at, updated_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8)
             ON CONFLICT(day, exercise_type) DO UPDATE SET
                duration_minutes = excluded.duration_minutes,
                intensity = excluded.intensity,
                calories = excluded.calories,
                notes = excluded.notes,
                updated_at = excluded.updated_at",
            params![
                day_key(session.day),
                session.exercise_type.as_str(),
                session.duration_minutes,
                session.intensity,
                session.calories,
                session.notes,
                session.created_at.to_rfc3339(),
                session.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

struct ExerciseRow {
    day: String,
    exercise_type: String,
    duration_minutes: Option<f64>,
    intensity: Option<f64>,
    calories: Option<f64>,
    notes: Option<String>,
    created_at: String,
    updated_at: String,
}

impl ExerciseRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            day: row.get(0)?,
            exercise_type: row.get(1)?,
            duration_minutes: row.get(2)?,
            intensity: row.get(3)?,
            calories: row.get(4)?,
            notes: row.get(5)?,
            created_at: row.get(6)?,
            updated_at: row.get(7)?,
        })
    }

    fn into_session(self) -> Result<ExerciseSession, DatabaseError> {
        Ok(ExerciseSession {
            day: parse_day(&self.day)?,
            exercise_type: ExerciseType::from_key(&self.exercise_type),
            duration_minutes: self.duration_minutes,
            intensity: self.intensity,
            calories: self.calories,
            notes: self.notes,
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}
