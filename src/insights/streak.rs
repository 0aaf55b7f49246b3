//! Exercise streaks and the encouragement banner.

use chrono::{Duration, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::records::ExerciseRepository;
use crate::storage::DatabaseError;

/// Longest streak that is counted.
pub const MAX_STREAK_DAYS: u32 = 30;

/// Count consecutive active days walking back from `today`.
///
/// Stops at the first day without activity, or after `MAX_STREAK_DAYS`.
pub fn count_streak<F>(today: NaiveDate, mut is_active: F) -> u32
where
    F: FnMut(NaiveDate) -> bool,
{
    let mut days = 0;
    let mut current = today;

    while days < MAX_STREAK_DAYS && is_active(current) {
        days += 1;
        current -= Duration::days(1);
    }

    days
}

/// Current exercise streak from the store.
pub fn current_streak(
    exercises: &ExerciseRepository<'_>,
    today: NaiveDate,
) -> Result<u32, DatabaseError> {
    let mut failure = None;
    let days = count_streak(today, |day| match exercises.has_activity_on(day) {
        Ok(active) => active,
        Err(e) => {
            failure = Some(e);
            false
        }
    });

    match failure {
        Some(e) => Err(e),
        None => Ok(days),
    }
}

/// Whether and how to show the encouragement banner for a selected day.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Encouragement {
    pub streak_days: u32,
    pub show_banner: bool,
    pub celebrate: bool,
}

impl Encouragement {
    /// Decide the banner state.
    ///
    /// The banner needs data on the selected day; for yesterday it also
    /// needs an ongoing streak. Celebration only happens on today.
    pub fn evaluate(
        streak_days: u32,
        selected: NaiveDate,
        today: NaiveDate,
        has_data_on_selected: bool,
    ) -> Self {
        let is_today = selected == today;
        let is_yesterday = Some(selected) == today.pred_opt();

        let show_banner = if is_yesterday {
            has_data_on_selected && streak_days >= 1
        } else {
            has_data_on_selected
        };

        Self {
            streak_days,
            show_banner,
            celebrate: streak_days >= 2 && is_today && show_banner,
        }
    }

    /// Banner text, when the streak is long enough to mention.
    pub fn message(&self) -> Option<String> {
        if !self.show_banner || self.streak_days < 2 {
            return None;
        }

        let days = self.streak_days;
        let text = match days {
            2..=3 => format!("Nice work! {} days of exercise in a row", days),
            4..=6 => format!("Impressive! {} straight days, keep it going", days),
            7..=13 => format!("Amazing! {} days in a row, you're a regular now", days),
            14..=20 => format!("Incredible! {} consecutive days of training", days),
            21..=29 => format!("Legendary! {} days without a break", days),
            _ => format!("Unstoppable! {} days and counting", days),
        };
        Some(text)
    }
}
