//! Time-decayed engagement used by trending topics.

use agora_core::ContentItem;
use chrono::{DateTime, Utc};

const MILLIS_PER_HOUR: f64 = 3_600_000.0;
const DECAY_SCALE_HOURS: f64 = 24.0;

/// Hours between `created_at` and `now`, clamped at zero for future timestamps.
#[must_use]
pub fn hours_since(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let millis = (now - created_at).num_milliseconds() as f64;
    (millis / MILLIS_PER_HOUR).max(0.0)
}

/// `1 / (1 + hours/24)`: 1.0 for brand-new content, strictly decreasing, never 0.
#[must_use]
pub fn time_decay(created_at: DateTime<Utc>, now: DateTime<Utc>) -> f64 {
    1.0 / (1.0 + hours_since(created_at, now) / DECAY_SCALE_HOURS)
}

/// `(likes + 2 * comments) * time_decay`.
#[must_use]
pub fn engagement_score(item: &ContentItem, now: DateTime<Utc>) -> f64 {
    let raw = f64::from(item.likes_count) + 2.0 * f64::from(item.comments_count);
    raw * time_decay(item.created_at, now)
}
