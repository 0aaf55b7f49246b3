//! User profile repository.
//!
//! The profile is a singleton row (`id = 1`) created lazily on first edit.

use chrono::Utc;
use rusqlite::{params, Connection, OptionalExtension};

use super::types::{Gender, ProfilePatch, Targets, UserProfile};
use crate::storage::database::{parse_day, parse_timestamp, DatabaseError, DAY_FORMAT};

/// Access to the single user profile.
pub struct ProfileRepository<'a> {
    conn: &'a Connection,
}

impl<'a> ProfileRepository<'a> {
    pub fn new(conn: &'a Connection) -> Self {
        Self { conn }
    }

    /// Get the profile, if one was ever saved.
    pub fn get(&self) -> Result<Option<UserProfile>, DatabaseError> {
        let row = self
            .conn
            .query_row(
                "SELECT gender, birth_date, height_cm, avatar,
                        target_weight_kg, target_body_fat_percent, target_waistline_cm,
                        created_at, updated_at
                 FROM user_profile WHERE id = 1",
                [],
                ProfileRow::from_row,
            )
            .optional()?;

        row.map(ProfileRow::into_profile).transpose()
    }

    /// Get the saved profile or the defaults, without writing anything.
    pub fn get_or_default(&self) -> Result<UserProfile, DatabaseError> {
        Ok(self.get()?.unwrap_or_default())
    }

    /// Apply a patch, creating the profile from defaults if needed.
    pub fn upsert(&self, patch: &ProfilePatch) -> Result<UserProfile, DatabaseError> {
        let existing = self.get()?;
        let is_new = existing.is_none();
        let mut profile = existing.unwrap_or_default();

        if !profile.apply(patch) && !is_new {
            return Ok(profile);
        }

        self.save(&profile)?;
        Ok(profile)
    }

    /// Replace all three targets. `None` clears a target.
    pub fn set_targets(&self, targets: &Targets) -> Result<UserProfile, DatabaseError> {
        let mut profile = self.get()?.unwrap_or_default();
        profile.targets = *targets;
        profile.updated_at = Utc::now();

        self.save(&profile)?;
        tracing::debug!("Saved targets: {:?}", targets);
        Ok(profile)
    }

    fn save(&self, profile: &UserProfile) -> Result<(), DatabaseError> {
        self.conn.execute(
            "INSERT INTO user_profile
             (id, gender, birth_date, height_cm, avatar,
              target_weight_kg, target_body_fat_percent, target_waistline_cm,
              created_at, updated_at)
             VALUES (1, ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
             ON CONFLICT(id) DO UPDATE SET
                gender = excluded.gender,
                birth_date = excluded.birth_date,
                height_cm = excluded.height_cm,
                avatar = excluded.avatar,
                target_weight_kg = excluded.target_weight_kg,
                target_body_fat_percent = excluded.target_body_fat_percent,
                target_waistline_cm = excluded.target_waistline_cm,
                updated_at = excluded.updated_at",
            params![
                profile.gender.as_str(),
                profile.birth_date.format(DAY_FORMAT).to_string(),
                profile.height_cm,
                profile.avatar,
                profile.targets.weight_kg,
                profile.targets.body_fat_percent,
                profile.targets.waistline_cm,
                profile.created_at.to_rfc3339(),
                profile.updated_at.to_rfc3339(),
            ],
        )?;
        Ok(())
    }
}

struct ProfileRow {
    gender: String,
    birth_date: String,
    height_cm: f64,
    avatar: Option<String>,
    target_weight_kg: Option<f64>,
    target_body_fat_percent: Option<f64>,
    target_waistline_cm: Option<f64>,
    created_at: String,
    updated_at: String,
}

impl ProfileRow {
    fn from_row(row: &rusqlite::Row) -> rusqlite::Result<Self> {
        Ok(Self {
            gender: row.get(0)?,
            birth_date: row.get(1)?,
            height_cm: row.get(2)?,
            avatar: row.get(3)?,
            target_weight_kg: row.get(4)?,
            target_body_fat_percent: row.get(5)?,
            target_waistline_cm: row.get(6)?,
            created_at: row.get(7)?,
            updated_at: row.get(8)?,
        })
    }

    fn into_profile(self) -> Result<UserProfile, DatabaseError> {
        Ok(UserProfile {
            gender: Gender::from_key(&self.gender),
            birth_date: parse_day(&self.birth_date)?,
            height_cm: self.height_cm,
            avatar: self.avatar,
            targets: Targets {
                weight_kg: self.target_weight_kg,
                body_fat_percent: self.target_body_fat_percent,
                waistline_cm: self.target_waistline_cm,
            },
            created_at: parse_timestamp(&self.created_at)?,
            updated_at: parse_timestamp(&self.updated_at)?,
        })
    }
}
