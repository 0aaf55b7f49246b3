//! Unit tests for the streak counter and encouragement tiers.

use bodytrack::insights::{count_streak, Encouragement, MAX_STREAK_DAYS};
use chrono::{Duration, NaiveDate};

fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 8, 15).unwrap()
}

#[test]
fn test_three_day_streak_with_gap() {
    let t = today();
    let active = [t, t - Duration::days(1), t - Duration::days(2), t - Duration::days(4)];

    assert_eq!(count_streak(t, |d| active.contains(&d)), 3);
}

#[test]
fn test_no_activity_today_breaks_streak() {
    let t = today();
    assert_eq!(count_streak(t, |d| d != t), 0);
}

#[test]
fn test_streak_is_capped() {
    let mut checked = 0;
    let days = count_streak(today(), |_| {
        checked += 1;
        true
    });

    assert_eq!(days, MAX_STREAK_DAYS);
    assert_eq!(checked, MAX_STREAK_DAYS);
}

#[test]
fn test_message_tiers() {
    let message = |days| {
        Encouragement::evaluate(days, today(), today(), true)
            .message()
            .unwrap_or_default()
    };

    assert!(message(1).is_empty());
    assert!(message(2).starts_with("Nice work"));
    assert!(message(5).starts_with("Impressive"));
    assert!(message(7).starts_with("Amazing"));
    assert!(message(14).starts_with("Incredible"));
    assert!(message(21).starts_with("Legendary"));
    assert!(message(30).starts_with("Unstoppable"));
}

#[test]
fn test_yesterday_banner_needs_streak() {
    let yesterday = today() - Duration::days(1);

    assert!(!Encouragement::evaluate(0, yesterday, today(), true).show_banner);
    let banner = Encouragement::evaluate(3, yesterday, today(), true);
    assert!(banner.show_banner);
    assert!(!banner.celebrate);
}

#[test]
fn test_no_banner_without_data() {
    let banner = Encouragement::evaluate(5, today(), today(), false);
    assert!(!banner.show_banner);
    assert!(banner.message().is_none());
}
