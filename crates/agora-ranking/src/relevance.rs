//! Composite relevance score for projected search results.

use agora_core::RelevanceWeights;
use chrono::{DateTime, Utc};

use crate::types::SearchResult;

const MILLIS_PER_DAY: f64 = 86_400_000.0;

/// Score `result` against `query`.
///
/// All comparisons are case-insensitive and the bonuses stack: an exact title
/// match also counts as a prefix match and a substring match. `description`
/// is the projected snippet, not the full content. Results without a category
/// (every post) never earn category bonuses.
#[must_use]
pub fn relevance_score(
    result: &SearchResult,
    query: &str,
    now: DateTime<Utc>,
    weights: &RelevanceWeights,
) -> f64 {
    let query = query.to_lowercase();
    let title = result.title.to_lowercase();
    let description = result.description.to_lowercase();
    let category = result.category.as_deref().map(str::to_lowercase);

    let mut score = 0.0;

    if title == query {
        score += weights.exact_title;
    }
    if category.as_deref() == Some(query.as_str()) {
        score += weights.exact_category;
    }
    if title.starts_with(&query) {
        score += weights.title_prefix;
    }
    if title.contains(&query) {
        score += weights.title_contains;
    }
    if description.contains(&query) {
        score += weights.description_contains;
    }
    if category.as_deref().is_some_and(|c| c.contains(&query)) {
        score += weights.category_contains;
    }

    score + recency_boost(result.created_at, now, weights)
}

/// `max(0, max_boost - age_days / days_per_point)`; future content gets the full boost.
#[must_use]
pub fn recency_boost(
    created_at: DateTime<Utc>,
    now: DateTime<Utc>,
    weights: &RelevanceWeights,
) -> f64 {
    #[allow(clippy::cast_precision_loss)]
    let age_days = ((now - created_at).num_milliseconds() as f64 / MILLIS_PER_DAY).max(0.0);
    (weights.max_recency_boost - age_days / weights.recency_days_per_point).max(0.0)
}
