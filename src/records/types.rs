//! Record types persisted by the local store.

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

/// Body measurements for a single calendar day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BodyMetrics {
    /// Calendar day this record belongs to
    pub day: NaiveDate,
    /// Body weight in kilograms
    pub weight_kg: Option<f64>,
    /// Body fat percentage
    pub body_fat_percent: Option<f64>,
    /// Waist circumference in centimeters
    pub waistline_cm: Option<f64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl BodyMetrics {
    /// Create an empty record for a day.
    pub fn new(day: NaiveDate) -> Self {
        let now = Utc::now();
        Self {
            day,
            weight_kg: None,
            body_fat_percent: None,
            waistline_cm: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Apply a patch. Returns true if any field changed.
    pub fn apply(&mut self, patch: &BodyMetricsPatch) -> bool {
        let mut changed = false;
        if let Some(weight) = patch.weight_kg {
            changed |= self.weight_kg != Some(weight);
            self.weight_kg = Some(weight);
        }
        if let Some(body_fat) = patch.body_fat_percent {
            changed |= self.body_fat_percent != Some(body_fat);
            self.body_fat_percent = Some(body_fat);
        }
        if let Some(waistline) = patch.waistline_cm {
            changed |= self.waistline_cm != Some(waistline);
            self.waistline_cm = Some(waistline);
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Whether at least one measurement is recorded.
    pub fn has_values(&self) -> bool {
        self.weight_kg.is_some() || self.body_fat_percent.is_some() || self.waistline_cm.is_some()
    }
}

/// Field updates for a body metrics record. `None` leaves a field as is.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct BodyMetricsPatch {
    pub weight_kg: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub waistline_cm: Option<f64>,
}

impl BodyMetricsPatch {
    pub fn weight(value: f64) -> Self {
        Self {
            weight_kg: Some(value),
            ..Default::default()
        }
    }

    pub fn body_fat(value: f64) -> Self {
        Self {
            body_fat_percent: Some(value),
            ..Default::default()
        }
    }

    pub fn waistline(value: f64) -> Self {
        Self {
            waistline_cm: Some(value),
            ..Default::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.weight_kg.is_none() && self.body_fat_percent.is_none() && self.waistline_cm.is_none()
    }
}

/// Kind of exercise session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExerciseType {
    Cardio,
    Strength,
    Hiit,
}

impl ExerciseType {
    /// All exercise types in display order.
    pub const ALL: [ExerciseType; 3] = [
        ExerciseType::Cardio,
        ExerciseType::Strength,
        ExerciseType::Hiit,
    ];

    /// Storage key.
    pub fn as_str(&self) -> &'static str {
        match self {
            ExerciseType::Cardio => "cardio",
            ExerciseType::Strength => "strength",
            ExerciseType::Hiit => "hiit",
        }
    }

    /// Parse a storage key. Unknown keys are treated as cardio.
    pub fn from_key(key: &str) -> Self {
        match key {
            "strength" => ExerciseType::Strength,
            "hiit" => ExerciseType::Hiit,
            _ => ExerciseType::Cardio,
        }
    }
}

impl std::fmt::Display for ExerciseType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExerciseType::Cardio => write!(f, "Cardio"),
            ExerciseType::Strength => write!(f, "Strength"),
            ExerciseType::Hiit => write!(f, "HIIT"),
        }
    }
}

impl std::str::FromStr for ExerciseType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cardio" => Ok(ExerciseType::Cardio),
            "strength" => Ok(ExerciseType::Strength),
            "hiit" => Ok(ExerciseType::Hiit),
            other => Err(format!("unknown exercise type: {}", other)),
        }
    }
}

/// One exercise session of a given type on a given day.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExerciseSession {
    pub day: NaiveDate,
    pub exercise_type: ExerciseType,
    /// Duration in minutes
    pub duration_minutes: Option<f64>,
    /// Perceived intensity (1-10), currently not collected
    pub intensity: Option<f64>,
    /// Calories burned, currently not collected
    pub calories: Option<f64>,
    pub notes: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ExerciseSession {
    pub fn new(day: NaiveDate, exercise_type: ExerciseType) -> Self {
        let now = Utc::now();
        Self {
            day,
            exercise_type,
            duration_minutes: None,
            intensity: None,
            calories: None,
            notes: None,
            created_at: now,
            updated_at: now,
        }
    }

    /// Whether this session counts as activity.
    pub fn is_active(&self) -> bool {
        self.duration_minutes.is_some_and(|d| d > 0.0)
    }
}

/// Optional session details. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ExerciseDetails {
    pub intensity: Option<f64>,
    pub calories: Option<f64>,
    pub notes: Option<String>,
}

/// Gender as stored in the profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
    #[default]
    Male,
    Female,
}

impl Gender {
    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::Male => "male",
            Gender::Female => "female",
        }
    }

    pub fn from_key(key: &str) -> Self {
        match key {
            "female" => Gender::Female,
            _ => Gender::Male,
        }
    }
}

impl std::fmt::Display for Gender {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Gender::Male => write!(f, "Male"),
            Gender::Female => write!(f, "Female"),
        }
    }
}

impl std::str::FromStr for Gender {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "male" | "m" => Ok(Gender::Male),
            "female" | "f" => Ok(Gender::Female),
            other => Err(format!("unknown gender: {}", other)),
        }
    }
}

/// Body composition targets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub weight_kg: Option<f64>,
    pub body_fat_percent: Option<f64>,
    pub waistline_cm: Option<f64>,
}

/// The single user profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub gender: Gender,
    pub birth_date: NaiveDate,
    /// Height in centimeters
    pub height_cm: f64,
    /// Avatar reference (icon name or file name)
    pub avatar: Option<String>,
    pub targets: Targets,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Default for UserProfile {
    fn default() -> Self {
        let now = Utc::now();
        Self {
            gender: Gender::Male,
            birth_date: NaiveDate::from_ymd_opt(1990, 1, 1).unwrap_or(NaiveDate::MIN),
            height_cm: 170.0,
            avatar: None,
            targets: Targets::default(),
            created_at: now,
            updated_at: now,
        }
    }
}

impl UserProfile {
    /// Apply a patch. Returns true if any field changed.
    pub fn apply(&mut self, patch: &ProfilePatch) -> bool {
        let mut changed = false;
        if let Some(gender) = patch.gender {
            changed |= self.gender != gender;
            self.gender = gender;
        }
        if let Some(birth_date) = patch.birth_date {
            changed |= self.birth_date != birth_date;
            self.birth_date = birth_date;
        }
        if let Some(height) = patch.height_cm {
            changed |= self.height_cm != height;
            self.height_cm = height;
        }
        if let Some(avatar) = &patch.avatar {
            changed |= self.avatar.as_ref() != Some(avatar);
            self.avatar = Some(avatar.clone());
        }
        if changed {
            self.updated_at = Utc::now();
        }
        changed
    }

    /// Age in whole years on the given day.
    pub fn age_on(&self, today: NaiveDate) -> u32 {
        let mut years = today.year() - self.birth_date.year();
        if (today.month(), today.day()) < (self.birth_date.month(), self.birth_date.day()) {
            years -= 1;
        }
        years.max(0) as u32
    }

    /// Validate height value (100-220 cm).
    pub fn validate_height(height_cm: f64) -> bool {
        (100.0..=220.0).contains(&height_cm)
    }
}

/// Field updates for the profile. `None` leaves a field as is.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProfilePatch {
    pub gender: Option<Gender>,
    pub birth_date: Option<NaiveDate>,
    pub height_cm: Option<f64>,
    pub avatar: Option<String>,
}
