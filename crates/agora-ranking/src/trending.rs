//! Trending topics from recent posts.

use std::collections::HashMap;

use agora_core::{ContentKind, ContentRepository, TrendingConfig};
use chrono::{DateTime, Duration, Utc};

use crate::engagement::engagement_score;
use crate::error::RankingError;
use crate::keywords::item_keywords;
use crate::types::TrendingTopic;

#[derive(Debug, Clone, PartialEq)]
struct KeywordStats {
    term: String,
    occurrences: usize,
    engagement: f64,
}

impl KeywordStats {
    fn trending_score(&self) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let occurrences = self.occurrences as f64;
        self.engagement * occurrences.ln_1p()
    }
}

/// Keyword accumulator that remembers first-seen order for tie-breaking.
#[derive(Debug, Default)]
struct KeywordTally {
    stats: Vec<KeywordStats>,
    index: HashMap<String, usize>,
}

impl KeywordTally {
    fn record(&mut self, term: String, engagement: f64) {
        let slot = match self.index.get(&term) {
            Some(&slot) => slot,
            None => {
                self.index.insert(term.clone(), self.stats.len());
                self.stats.push(KeywordStats {
                    term,
                    occurrences: 0,
                    engagement: 0.0,
                });
                self.stats.len() - 1
            }
        };
        let stats = &mut self.stats[slot];
        stats.occurrences += 1;
        stats.engagement += engagement;
    }

    fn into_ranked(self, top_n: usize) -> Vec<TrendingTopic> {
        let mut scored: Vec<(f64, KeywordStats)> = self
            .stats
            .into_iter()
            .map(|s| (s.trending_score(), s))
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored
            .into_iter()
            .take(top_n)
            .map(|(_, s)| TrendingTopic::new(s.term, s.occurrences))
            .collect()
    }
}

/// Ranks keywords of recent posts by frequency and time-decayed engagement.
///
/// Stateless between calls: every invocation reads a fresh window from the
/// repository and discards its keyword table afterwards.
#[derive(Debug)]
pub struct TrendingTopicsEngine<R> {
    repository: R,
    config: TrendingConfig,
}

impl<R: ContentRepository> TrendingTopicsEngine<R> {
    pub fn new(repository: R, config: TrendingConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// Trending topics for the window ending now.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Trending`] if the repository read fails.
    pub async fn compute_trending(&self) -> Result<Vec<TrendingTopic>, RankingError> {
        self.compute_trending_at(Utc::now()).await
    }

    /// Trending topics for the window ending at `now`.
    ///
    /// Each post contributes once per distinct keyword, adding its full
    /// engagement to every keyword it contains. Keywords are ranked by
    /// `engagement * ln(1 + occurrences)`; equal scores keep the order in which
    /// the keywords were first encountered.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Trending`] if the repository read fails.
    pub async fn compute_trending_at(
        &self,
        now: DateTime<Utc>,
    ) -> Result<Vec<TrendingTopic>, RankingError> {
        // Windows reaching past chrono's range cover everything stored.
        let since = now
            .checked_sub_signed(Duration::hours(i64::from(self.config.window_hours)))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        let posts = self
            .repository
            .find_recent(ContentKind::Post, since)
            .await
            .map_err(RankingError::Trending)?;

        let mut tally = KeywordTally::default();
        for post in &posts {
            let engagement = engagement_score(post, now);
            for keyword in item_keywords(post, &self.config) {
                tally.record(keyword, engagement);
            }
        }

        tracing::debug!(
            posts = posts.len(),
            keywords = tally.stats.len(),
            "computed trending keyword table"
        );

        Ok(tally.into_ranked(self.config.top_n))
    }
}
