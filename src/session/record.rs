//! Record session for one selected day.
//!
//! Edits are written to the store immediately. A failed write is logged and
//! leaves the session's copy as it was; nothing is retried or queued.

use chrono::{Local, NaiveDate};
use serde::Serialize;
use std::ops::RangeInclusive;
use tracing::{debug, info, warn};

use super::events::{DataEvent, DataEvents};
use crate::health::{HealthStore, HealthSync};
use crate::insights::{
    self, chart_series, current_streak, BmiReading, BodyMetric, ChartMetric, ChartPoint,
    ChartRange, DayComparison, Encouragement, TrendTip, RECENT_WINDOW_DAYS,
};
use crate::records::{
    BodyMetrics, BodyMetricsPatch, BodyMetricsRepository, ExerciseDetails, ExerciseRepository,
    ExerciseSession, ExerciseType, ProfilePatch, ProfileRepository, Targets, UserProfile,
};
use crate::storage::{AppConfig, Database};

/// Health behaviour of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionSettings {
    pub health_enabled: bool,
    pub mirror_waistline: bool,
    pub backfill: bool,
}

impl Default for SessionSettings {
    fn default() -> Self {
        Self {
            health_enabled: true,
            mirror_waistline: true,
            backfill: true,
        }
    }
}

impl SessionSettings {
    pub fn from_config(config: &AppConfig) -> Self {
        Self {
            health_enabled: config.health.enabled,
            mirror_waistline: config.health.mirror_waistline,
            backfill: config.health.backfill,
        }
    }
}

/// Everything shown for one day.
#[derive(Debug, Clone, Serialize)]
pub struct DaySummary {
    pub day: NaiveDate,
    pub body: Option<BodyMetrics>,
    pub sessions: Vec<ExerciseSession>,
    pub bmi: Option<BmiReading>,
    pub trend_tip: Option<String>,
    pub streak_days: u32,
    pub encouragement: Option<String>,
}

/// Recording state for a selected day.
pub struct RecordSession<S: HealthStore> {
    db: Database,
    health: HealthSync<S>,
    events: DataEvents,
    settings: SessionSettings,
    today: NaiveDate,
    selected: NaiveDate,
    body: Option<BodyMetrics>,
    sessions: Vec<ExerciseSession>,
}

impl<S: HealthStore> RecordSession<S> {
    /// Open a session on the current local day.
    pub fn new(db: Database, health: HealthSync<S>, settings: SessionSettings) -> Self {
        Self::with_today(db, health, settings, Local::now().date_naive())
    }

    /// Open a session with an explicit "today".
    pub fn with_today(
        db: Database,
        health: HealthSync<S>,
        settings: SessionSettings,
        today: NaiveDate,
    ) -> Self {
        let mut session = Self {
            db,
            health,
            events: DataEvents::new(),
            settings,
            today,
            selected: today,
            body: None,
            sessions: Vec::new(),
        };
        session.reload();
        session
    }

    pub fn today(&self) -> NaiveDate {
        self.today
    }

    pub fn selected_day(&self) -> NaiveDate {
        self.selected
    }

    pub fn events(&self) -> &DataEvents {
        &self.events
    }

    pub fn health(&self) -> &HealthSync<S> {
        &self.health
    }

    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Select a day. Future days are clamped to today.
    pub fn select_day(&mut self, day: NaiveDate) {
        self.selected = day.min(self.today);
        self.reload();
    }

    pub fn previous_day(&mut self) {
        if let Some(day) = self.selected.pred_opt() {
            self.select_day(day);
        }
    }

    /// Move forward one day; does nothing on today.
    pub fn next_day(&mut self) {
        if self.selected >= self.today {
            return;
        }
        if let Some(day) = self.selected.succ_opt() {
            self.select_day(day);
        }
    }

    /// Re-read the selected day's records.
    pub fn reload(&mut self) {
        let conn = self.db.connection();

        self.body = match BodyMetricsRepository::new(conn).get(self.selected) {
            Ok(body) => body,
            Err(e) => {
                warn!("Failed to load body metrics for {}: {}", self.selected, e);
                None
            }
        };

        self.sessions = match ExerciseRepository::new(conn).list_for_day(self.selected) {
            Ok(sessions) => sessions,
            Err(e) => {
                warn!("Failed to load exercise for {}: {}", self.selected, e);
                Vec::new()
            }
        };
    }

    pub fn body(&self) -> Option<&BodyMetrics> {
        self.body.as_ref()
    }

    pub fn sessions(&self) -> &[ExerciseSession] {
        &self.sessions
    }

    pub fn session(&self, exercise_type: ExerciseType) -> Option<&ExerciseSession> {
        self.sessions
            .iter()
            .find(|s| s.exercise_type == exercise_type)
    }

    /// Save the weight. Values outside 40-120 kg are rejected.
    pub fn set_weight(&mut self, value: f64) -> bool {
        accepted(BodyMetric::Weight, value) && self.save_body(&BodyMetricsPatch::weight(value))
    }

    /// Save the body fat. Values outside 8-35 % are rejected.
    pub fn set_body_fat(&mut self, value: f64) -> bool {
        accepted(BodyMetric::BodyFat, value)
            && self.save_body(&BodyMetricsPatch::body_fat(value))
    }

    /// Save the waistline and mirror it to the health store when enabled.
    ///
    /// Values outside 60-120 cm are rejected and not mirrored.
    pub async fn set_waistline(&mut self, value: f64) -> bool {
        if !accepted(BodyMetric::Waistline, value)
            || !self.save_body(&BodyMetricsPatch::waistline(value))
        {
            return false;
        }
        if self.settings.health_enabled && self.settings.mirror_waistline {
            self.health.save_waistline(self.selected, value).await;
        }
        true
    }

    /// Set or clear (with `None` or zero) an exercise duration.
    pub fn set_exercise_duration(
        &mut self,
        exercise_type: ExerciseType,
        duration_minutes: Option<f64>,
    ) -> bool {
        let repo = ExerciseRepository::new(self.db.connection());
        match repo.set_duration(self.selected, exercise_type, duration_minutes) {
            Ok(saved) => {
                self.sessions.retain(|s| s.exercise_type != exercise_type);
                if let Some(session) = saved {
                    self.sessions.push(session);
                    self.sessions.sort_by_key(|s| s.exercise_type.as_str());
                }
                true
            }
            Err(e) => {
                warn!(
                    "Failed to save {} duration for {}: {}",
                    exercise_type, self.selected, e
                );
                false
            }
        }
    }

    /// Update intensity, calories or notes of an existing session.
    pub fn update_exercise_details(
        &mut self,
        exercise_type: ExerciseType,
        details: &ExerciseDetails,
    ) -> bool {
        let repo = ExerciseRepository::new(self.db.connection());
        match repo.update_details(self.selected, exercise_type, details) {
            Ok(Some(updated)) => {
                if let Some(slot) = self
                    .sessions
                    .iter_mut()
                    .find(|s| s.exercise_type == exercise_type)
                {
                    *slot = updated;
                }
                true
            }
            Ok(None) => {
                debug!("No {} session on {} to update", exercise_type, self.selected);
                false
            }
            Err(e) => {
                warn!("Failed to update {} session: {}", exercise_type, e);
                false
            }
        }
    }

    /// Fill absent body fields of the selected day from the health store.
    ///
    /// Local values are never overwritten. Returns whether anything changed.
    pub async fn backfill_from_health(&mut self) -> bool {
        if !self.settings.health_enabled || !self.settings.backfill {
            return false;
        }

        let remote = self.health.all_for_day(self.selected).await;
        let local = self.body.clone().unwrap_or_else(|| BodyMetrics::new(self.selected));

        let fill = |metric: BodyMetric, local: Option<f64>, remote: Option<f64>| {
            remote.filter(|v| local.is_none() && accepted(metric, *v))
        };
        let patch = BodyMetricsPatch {
            weight_kg: fill(BodyMetric::Weight, local.weight_kg, remote.weight_kg),
            body_fat_percent: fill(
                BodyMetric::BodyFat,
                local.body_fat_percent,
                remote.body_fat_percent,
            ),
            waistline_cm: fill(BodyMetric::Waistline, local.waistline_cm, remote.waistline_cm),
        };

        if patch.is_empty() {
            return false;
        }

        info!("Backfilling {} from health data", self.selected);
        self.save_body(&patch)
    }

    /// Slider range for a metric from the last week of values.
    pub fn smart_range(&self, metric: BodyMetric) -> RangeInclusive<f64> {
        insights::smart_range(metric, &metric.values(&self.recent_body()))
    }

    /// Trend tip over the last week.
    pub fn trend_tip(&self) -> Option<TrendTip> {
        insights::trend_tip(&self.recent_body())
    }

    /// Closest earlier recorded value of a metric.
    pub fn previous_value(&self, metric: BodyMetric) -> Option<f64> {
        let repo = BodyMetricsRepository::new(self.db.connection());
        let mut cursor = self.selected;
        loop {
            match repo.latest_before(cursor) {
                Ok(Some(record)) => {
                    if let Some(value) = metric.value_of(&record) {
                        return Some(value);
                    }
                    cursor = record.day;
                }
                Ok(None) => return None,
                Err(e) => {
                    warn!("Failed to read previous {}: {}", metric, e);
                    return None;
                }
            }
        }
    }

    /// Selected day's value against the closest earlier one.
    pub fn compare_with_previous(&self, metric: BodyMetric) -> Option<DayComparison> {
        let current = metric.value_of(self.body.as_ref()?)?;
        let previous = self.previous_value(metric)?;
        Some(DayComparison::new(previous, current))
    }

    /// BMI from the selected day's weight and the profile height.
    pub fn bmi(&self) -> Option<BmiReading> {
        let weight = self.body.as_ref()?.weight_kg?;
        insights::bmi(weight, self.profile().height_cm)
    }

    /// Exercise streak ending today.
    pub fn streak(&self) -> u32 {
        let repo = ExerciseRepository::new(self.db.connection());
        current_streak(&repo, self.today).unwrap_or_else(|e| {
            warn!("Failed to count streak: {}", e);
            0
        })
    }

    /// Banner state for the selected day.
    pub fn encouragement(&self) -> Encouragement {
        let has_data = self.db.has_any_data_on(self.selected).unwrap_or_else(|e| {
            warn!("Failed to check data for {}: {}", self.selected, e);
            false
        });
        Encouragement::evaluate(self.streak(), self.selected, self.today, has_data)
    }

    /// Chart points for a metric ending today.
    pub fn chart(&self, metric: ChartMetric, range: ChartRange) -> Vec<ChartPoint> {
        let from = range.start(self.today);
        let conn = self.db.connection();

        let body = match metric {
            ChartMetric::Body(_) => BodyMetricsRepository::new(conn)
                .list_between(from, self.today)
                .unwrap_or_else(|e| {
                    warn!("Failed to load chart data: {}", e);
                    Vec::new()
                }),
            ChartMetric::Exercise(_) => Vec::new(),
        };
        let sessions = match metric {
            ChartMetric::Exercise(_) => ExerciseRepository::new(conn)
                .list_between(from, self.today)
                .unwrap_or_else(|e| {
                    warn!("Failed to load chart data: {}", e);
                    Vec::new()
                }),
            ChartMetric::Body(_) => Vec::new(),
        };

        chart_series(metric, range, self.today, &body, &sessions)
    }

    /// The stored profile, or defaults when none was saved yet.
    pub fn profile(&self) -> UserProfile {
        ProfileRepository::new(self.db.connection())
            .get_or_default()
            .unwrap_or_else(|e| {
                warn!("Failed to load profile: {}", e);
                UserProfile::default()
            })
    }

    pub fn update_profile(&mut self, patch: &ProfilePatch) -> Option<UserProfile> {
        if let Some(height) = patch.height_cm {
            if !UserProfile::validate_height(height) {
                warn!("Rejecting height {} cm", height);
                return None;
            }
        }
        ProfileRepository::new(self.db.connection())
            .upsert(patch)
            .map_err(|e| warn!("Failed to save profile: {}", e))
            .ok()
    }

    pub fn set_targets(&mut self, targets: &Targets) -> Option<UserProfile> {
        ProfileRepository::new(self.db.connection())
            .set_targets(targets)
            .map_err(|e| warn!("Failed to save targets: {}", e))
            .ok()
    }

    /// Remove all body and exercise records and notify subscribers.
    pub fn clear_all_data(&mut self) -> bool {
        match self.db.clear_all_records() {
            Ok(removed) => {
                info!("Cleared all data ({} records)", removed);
                self.events.publish(DataEvent::Cleared);
                self.body = None;
                self.sessions.clear();
                true
            }
            Err(e) => {
                warn!("Failed to clear data: {}", e);
                false
            }
        }
    }

    /// Summary of the selected day.
    pub fn summary(&self) -> DaySummary {
        let encouragement = self.encouragement();
        DaySummary {
            day: self.selected,
            body: self.body.clone(),
            sessions: self.sessions.clone(),
            bmi: self.bmi(),
            trend_tip: self.trend_tip().map(|tip| tip.to_string()),
            streak_days: encouragement.streak_days,
            encouragement: encouragement.message(),
        }
    }

    fn recent_body(&self) -> Vec<BodyMetrics> {
        BodyMetricsRepository::new(self.db.connection())
            .recent(self.selected, RECENT_WINDOW_DAYS)
            .unwrap_or_else(|e| {
                warn!("Failed to load recent body metrics: {}", e);
                Vec::new()
            })
    }

    fn save_body(&mut self, patch: &BodyMetricsPatch) -> bool {
        match BodyMetricsRepository::new(self.db.connection()).upsert(self.selected, patch) {
            Ok(record) => {
                self.body = Some(record);
                true
            }
            Err(e) => {
                warn!("Failed to save body metrics for {}: {}", self.selected, e);
                false
            }
        }
    }
}

fn accepted(metric: BodyMetric, value: f64) -> bool {
    if metric.accepts(value) {
        return true;
    }
    let range = metric.absolute_range();
    warn!(
        "Rejecting {} {} {} (expected {}-{})",
        metric,
        value,
        metric.unit(),
        range.start(),
        range.end()
    );
    false
}
