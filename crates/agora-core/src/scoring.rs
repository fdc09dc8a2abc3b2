//! Immutable tuning data handed to the ranking engines at construction.

use std::collections::HashSet;

/// Closed English stop-word list excluded from trending keywords.
pub const DEFAULT_STOP_WORDS: &[&str] = &[
    "the", "be", "to", "of", "and", "a", "in", "that", "have", "i", "it", "for", "not", "on",
    "with", "he", "as", "you", "do", "at", "this", "but", "his", "by", "from", "they", "we",
    "say", "her", "she", "or", "an", "will", "my", "one", "all", "would", "there", "their",
    "what", "how",
];

pub const DEFAULT_TRENDING_WINDOW_HOURS: u32 = 24;
/// Largest accepted trending window, about 114 years.
pub const MAX_TRENDING_WINDOW_HOURS: u32 = 1_000_000;
pub const DEFAULT_TRENDING_TOP_N: usize = 5;
pub const DEFAULT_SEARCH_LIMIT: usize = 10;
pub const DEFAULT_SNIPPET_CHARS: usize = 150;
pub const DEFAULT_FEED_LIMIT: usize = 20;

#[derive(Debug, Clone)]
pub struct TrendingConfig {
    pub window_hours: u32,
    pub top_n: usize,
    /// Keywords shorter than or equal to this many characters are dropped.
    pub min_keyword_len: usize,
    pub stop_words: HashSet<String>,
}

impl Default for TrendingConfig {
    fn default() -> Self {
        Self {
            window_hours: DEFAULT_TRENDING_WINDOW_HOURS,
            top_n: DEFAULT_TRENDING_TOP_N,
            min_keyword_len: 2,
            stop_words: DEFAULT_STOP_WORDS
                .iter()
                .map(|w| (*w).to_string())
                .collect(),
        }
    }
}

impl TrendingConfig {
    #[must_use]
    pub fn is_stop_word(&self, term: &str) -> bool {
        self.stop_words.contains(term)
    }
}

/// Additive bonuses for search relevance.
///
/// The bonuses are not mutually exclusive: an exact title match also earns
/// the starts-with and contains bonuses.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RelevanceWeights {
    pub exact_title: f64,
    pub exact_category: f64,
    pub title_prefix: f64,
    pub title_contains: f64,
    pub description_contains: f64,
    pub category_contains: f64,
    /// Recency boost for brand-new content; decays linearly to zero.
    pub max_recency_boost: f64,
    /// Days of age that cost one point of recency boost.
    pub recency_days_per_point: f64,
}

impl Default for RelevanceWeights {
    fn default() -> Self {
        Self {
            exact_title: 100.0,
            exact_category: 80.0,
            title_prefix: 70.0,
            title_contains: 50.0,
            description_contains: 25.0,
            category_contains: 30.0,
            max_recency_boost: 20.0,
            recency_days_per_point: 30.0,
        }
    }
}

#[derive(Debug, Clone)]
pub struct SearchConfig {
    /// Cap applied to each collection in each retrieval tier.
    pub per_collection_limit: usize,
    /// Characters of content kept in the result description.
    pub snippet_chars: usize,
    pub weights: RelevanceWeights,
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            per_collection_limit: DEFAULT_SEARCH_LIMIT,
            snippet_chars: DEFAULT_SNIPPET_CHARS,
            weights: RelevanceWeights::default(),
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FeedConfig {
    /// Items fetched from each collection.
    pub per_collection_limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            per_collection_limit: DEFAULT_FEED_LIMIT,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_stop_words_are_lowercase_and_unique() {
        let set: HashSet<&str> = DEFAULT_STOP_WORDS.iter().copied().collect();
        assert_eq!(set.len(), DEFAULT_STOP_WORDS.len());
        assert!(DEFAULT_STOP_WORDS
            .iter()
            .all(|w| w.chars().all(|c| c.is_ascii_lowercase())));
    }

    #[test]
    fn trending_config_defaults() {
        let config = TrendingConfig::default();
        assert_eq!(config.window_hours, 24);
        assert_eq!(config.top_n, 5);
        assert!(config.is_stop_word("there"));
        assert!(!config.is_stop_word("rust"));
    }

    #[test]
    fn search_config_defaults() {
        let config = SearchConfig::default();
        assert_eq!(config.per_collection_limit, 10);
        assert_eq!(config.snippet_chars, 150);
        assert!((config.weights.exact_title - 100.0).abs() < f64::EPSILON);
    }
}
