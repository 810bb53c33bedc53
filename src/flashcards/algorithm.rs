//! Fixed-interval rescheduling
//!
//! Each rating maps to the next appearance of a card:
//! - Easy: the previously scheduled gap (`next_appearance - date_added`,
//!   floored to whole days) grows by two days, capped at 60
//! - Medium: two days from now
//! - Hard: one day from now
//!
//! There is no ease factor. The Easy gap is measured against the date the
//! card was added, not against the time of the last review.

use chrono::{DateTime, Duration, Utc};

use super::models::{FlashcardRecord, Rating};

/// Longest interval an Easy rating can produce
pub const MAX_INTERVAL_DAYS: i64 = 60;

/// Shortest interval any rating can produce
pub const MIN_INTERVAL_DAYS: i64 = 1;

const EASY_STEP_DAYS: i64 = 2;
const MEDIUM_INTERVAL_DAYS: i64 = 2;
const HARD_INTERVAL_DAYS: i64 = 1;

const MILLIS_PER_DAY: i64 = 86_400_000;

/// Whole days between two instants, rounded towards negative infinity
fn floor_days(later: DateTime<Utc>, earlier: DateTime<Utc>) -> i64 {
    (later - earlier).num_milliseconds().div_euclid(MILLIS_PER_DAY)
}

/// Gap between the card's scheduled appearance and the day it was added
pub fn prior_interval_days(record: &FlashcardRecord) -> i64 {
    floor_days(record.next_appearance, record.date_added)
}

/// Interval in days that `rating` would assign to `record`
pub fn interval_days(record: &FlashcardRecord, rating: Rating) -> i64 {
    match rating {
        Rating::Easy => (prior_interval_days(record) + EASY_STEP_DAYS)
            .clamp(MIN_INTERVAL_DAYS, MAX_INTERVAL_DAYS),
        Rating::Medium => MEDIUM_INTERVAL_DAYS,
        Rating::Hard => HARD_INTERVAL_DAYS,
    }
}

/// Calculate when `record` should next appear after being rated at `now`
pub fn compute_next_appearance(
    record: &FlashcardRecord,
    rating: Rating,
    now: DateTime<Utc>,
) -> DateTime<Utc> {
    now + Duration::days(interval_days(record, rating))
}

/// Intervals for each rating, in `[Easy, Medium, Hard]` order.
/// Used to show the learner what each key would do.
pub fn preview_intervals(record: &FlashcardRecord) -> [i64; 3] {
    Rating::ALL.map(|rating| interval_days(record, rating))
}

/// Format an interval in days to a human-readable string
pub fn format_interval(days: i64) -> String {
    if days <= 0 {
        "now".to_string()
    } else if days < 7 {
        format!("{}d", days)
    } else if days < 30 {
        format!("{}w", days / 7)
    } else if days < 365 {
        format!("{}mo", days / 30)
    } else {
        format!("{}y", days / 365)
    }
}
