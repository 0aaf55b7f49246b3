//! Database schema definitions for BodyTrack.

/// SQL schema for the initial set of tables.
pub const SCHEMA: &str = r#"
-- Daily body metrics, one row per calendar day
CREATE TABLE IF NOT EXISTS body_metrics (
    day TEXT PRIMARY KEY,
    weight_kg REAL,
    body_fat_percent REAL,
    waistline_cm REAL,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);

-- Exercise sessions, one row per (day, type)
CREATE TABLE IF NOT EXISTS exercise_sessions (
    day TEXT NOT NULL,
    exercise_type TEXT NOT NULL,
    duration_minutes REAL,
    intensity REAL,
    calories REAL,
    notes TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL,
    PRIMARY KEY (day, exercise_type)
);

CREATE INDEX IF NOT EXISTS idx_exercise_sessions_day ON exercise_sessions(day);

-- Singleton user profile
CREATE TABLE IF NOT EXISTS user_profile (
    id INTEGER PRIMARY KEY CHECK (id = 1),
    gender TEXT NOT NULL DEFAULT 'male',
    birth_date TEXT NOT NULL,
    height_cm REAL NOT NULL,
    avatar TEXT,
    created_at TEXT NOT NULL,
    updated_at TEXT NOT NULL
);
"#;

/// Schema version table
pub const SCHEMA_VERSION_TABLE: &str = r#"
CREATE TABLE IF NOT EXISTS schema_version (
    version INTEGER PRIMARY KEY,
    applied_at TEXT NOT NULL
);
"#;

/// Current schema version
pub const CURRENT_VERSION: i32 = 2;

/// SQL for migration from v1 to v2 (profile targets)
pub const MIGRATION_V1_TO_V2: &str = r#"
ALTER TABLE user_profile ADD COLUMN target_weight_kg REAL;
ALTER TABLE user_profile ADD COLUMN target_body_fat_percent REAL;
ALTER TABLE user_profile ADD COLUMN target_waistline_cm REAL;
"#;
