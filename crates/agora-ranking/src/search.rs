//! Two-tier search over posts and questions with tier-agnostic re-ranking.

use agora_core::{ContentItem, ContentKind, ContentRepository, RepositoryError, SearchConfig};
use chrono::{DateTime, Utc};

use crate::error::RankingError;
use crate::relevance::relevance_score;
use crate::types::SearchResult;

/// Search engine over a [`ContentRepository`].
///
/// Retrieval tries full-text search first and falls back to an escaped
/// regex search when the full-text tier errors or finds nothing. Whichever
/// tier produced the candidates, the final order comes from
/// [`relevance_score`], sorted stably so equal scores keep store order.
#[derive(Debug)]
pub struct SearchRankingEngine<R> {
    repository: R,
    config: SearchConfig,
}

impl<R: ContentRepository> SearchRankingEngine<R> {
    pub fn new(repository: R, config: SearchConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// # Errors
    ///
    /// Returns [`RankingError::Search`] when both retrieval tiers fail.
    pub async fn search(&self, query: &str) -> Result<Vec<SearchResult>, RankingError> {
        self.search_at(query, Utc::now()).await
    }

    /// Search with an explicit clock for the recency boost.
    ///
    /// Blank queries return an empty list without touching the repository.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Search`] when both retrieval tiers fail.
    pub async fn search_at(
        &self,
        query: &str,
        now: DateTime<Utc>,
    ) -> Result<Vec<SearchResult>, RankingError> {
        let query = query.trim();
        if query.is_empty() {
            return Ok(Vec::new());
        }

        self.ensure_text_indexes().await;

        let candidates = self.retrieve(query).await.map_err(RankingError::Search)?;
        Ok(self.rank(&candidates, query, now))
    }

    async fn ensure_text_indexes(&self) {
        let (posts, questions) = tokio::join!(
            self.repository
                .ensure_text_index(ContentKind::Post, ContentKind::Post.searchable_fields()),
            self.repository.ensure_text_index(
                ContentKind::Question,
                ContentKind::Question.searchable_fields()
            ),
        );

        for (kind, outcome) in [(ContentKind::Post, posts), (ContentKind::Question, questions)] {
            if let Err(e) = outcome {
                tracing::warn!(
                    collection = kind.collection(),
                    error = %e,
                    "text index unavailable; search may rely on pattern fallback"
                );
            }
        }
    }

    async fn retrieve(&self, query: &str) -> Result<Vec<ContentItem>, RepositoryError> {
        match self.full_text_tier(query).await {
            Ok(items) if !items.is_empty() => return Ok(items),
            Ok(_) => tracing::debug!("full-text search found nothing; trying pattern search"),
            Err(e) => {
                tracing::warn!(error = %e, "full-text search failed; trying pattern search");
            }
        }

        let items = self.pattern_tier(&regex::escape(query)).await?;
        tracing::debug!(count = items.len(), "pattern search finished");
        Ok(items)
    }

    async fn full_text_tier(&self, query: &str) -> Result<Vec<ContentItem>, RepositoryError> {
        let limit = self.config.per_collection_limit;
        let (posts, questions) = tokio::try_join!(
            self.repository.full_text_search(
                ContentKind::Post,
                query,
                ContentKind::Post.searchable_fields(),
                limit
            ),
            self.repository.full_text_search(
                ContentKind::Question,
                query,
                ContentKind::Question.searchable_fields(),
                limit
            ),
        )?;
        Ok(concat(posts, questions))
    }

    async fn pattern_tier(&self, pattern: &str) -> Result<Vec<ContentItem>, RepositoryError> {
        let limit = self.config.per_collection_limit;
        let (posts, questions) = tokio::try_join!(
            self.repository.pattern_search(
                ContentKind::Post,
                pattern,
                ContentKind::Post.searchable_fields(),
                limit
            ),
            self.repository.pattern_search(
                ContentKind::Question,
                pattern,
                ContentKind::Question.searchable_fields(),
                limit
            ),
        )?;
        Ok(concat(posts, questions))
    }

    fn rank(
        &self,
        candidates: &[ContentItem],
        query: &str,
        now: DateTime<Utc>,
    ) -> Vec<SearchResult> {
        let mut scored: Vec<(f64, SearchResult)> = candidates
            .iter()
            .map(|item| {
                let result = SearchResult::project(item, self.config.snippet_chars);
                let score = relevance_score(&result, query, now, &self.config.weights);
                (score, result)
            })
            .collect();
        scored.sort_by(|a, b| b.0.total_cmp(&a.0));
        scored.into_iter().map(|(_, result)| result).collect()
    }
}

fn concat(mut posts: Vec<ContentItem>, questions: Vec<ContentItem>) -> Vec<ContentItem> {
    posts.extend(questions);
    posts
}
