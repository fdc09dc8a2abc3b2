//! Keyword extraction for trending topics.

use std::collections::HashSet;

use agora_core::{ContentItem, TrendingConfig};

/// Split `text` into candidate keywords.
///
/// Lowercases, drops every character that is neither alphanumeric, `_`, nor
/// whitespace, splits on whitespace, and keeps terms longer than
/// `config.min_keyword_len` characters that are not stop words. Repeats are
/// preserved; see [`item_keywords`] for per-item deduplication.
#[must_use]
pub fn extract_keywords(text: &str, config: &TrendingConfig) -> Vec<String> {
    let cleaned: String = text
        .to_lowercase()
        .chars()
        .filter(|c| c.is_alphanumeric() || *c == '_' || c.is_whitespace())
        .collect();

    cleaned
        .split_whitespace()
        .filter(|word| word.chars().count() > config.min_keyword_len)
        .filter(|word| !config.is_stop_word(word))
        .map(ToOwned::to_owned)
        .collect()
}

/// Distinct keywords of one item, title terms first, in first-seen order.
#[must_use]
pub fn item_keywords(item: &ContentItem, config: &TrendingConfig) -> Vec<String> {
    let mut seen = HashSet::new();
    extract_keywords(&item.title, config)
        .into_iter()
        .chain(extract_keywords(&item.content, config))
        .filter(|kw| seen.insert(kw.clone()))
        .collect()
}
