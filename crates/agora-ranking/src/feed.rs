//! Combined newest-first feed of posts and questions.

use agora_core::{ContentKind, ContentRepository, FeedConfig};

use crate::error::RankingError;
use crate::types::FeedEntry;

#[derive(Debug)]
pub struct FeedAggregator<R> {
    repository: R,
    config: FeedConfig,
}

impl<R: ContentRepository> FeedAggregator<R> {
    pub fn new(repository: R, config: FeedConfig) -> Self {
        Self { repository, config }
    }

    pub fn repository(&self) -> &R {
        &self.repository
    }

    /// The newest posts and questions merged by `created_at`, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`RankingError::Feed`] if either lookup fails.
    pub async fn latest(&self) -> Result<Vec<FeedEntry>, RankingError> {
        let limit = self.config.per_collection_limit;
        let (mut items, questions) = tokio::try_join!(
            self.repository.find_latest(ContentKind::Post, limit),
            self.repository.find_latest(ContentKind::Question, limit),
        )
        .map_err(RankingError::Feed)?;

        items.extend(questions);
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(items.into_iter().map(FeedEntry::from).collect())
    }
}
