//! [`ContentRepository`] backed by a Postgres pool.

use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::Arc;

use agora_core::{ContentItem, ContentKind, ContentRepository, RepositoryError, SearchField};
use chrono::{DateTime, Utc};
use sqlx::PgPool;

use crate::{content, DbError};

#[derive(Debug, Default)]
struct TextIndexState {
    posts: AtomicBool,
    questions: AtomicBool,
}

impl TextIndexState {
    fn flag(&self, kind: ContentKind) -> &AtomicBool {
        match kind {
            ContentKind::Post => &self.posts,
            ContentKind::Question => &self.questions,
        }
    }
}

/// Postgres content store.
///
/// Cloning is cheap and shares both the pool and the text-index cache, so
/// every engine holding a clone skips the DDL once any of them has run it.
#[derive(Debug, Clone)]
pub struct PgContentRepository {
    pool: PgPool,
    text_indexes: Arc<TextIndexState>,
}

impl PgContentRepository {
    #[must_use]
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            text_indexes: Arc::default(),
        }
    }

    #[must_use]
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

fn unavailable(err: DbError) -> RepositoryError {
    RepositoryError::Unavailable(err.to_string())
}

impl ContentRepository for PgContentRepository {
    async fn find_recent(
        &self,
        kind: ContentKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        content::list_created_since(&self.pool, kind, since)
            .await
            .map_err(unavailable)
    }

    async fn find_latest(
        &self,
        kind: ContentKind,
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        content::list_latest(&self.pool, kind, limit)
            .await
            .map_err(unavailable)
    }

    async fn full_text_search(
        &self,
        kind: ContentKind,
        query: &str,
        fields: &[SearchField],
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        content::search_full_text(&self.pool, kind, query, fields, limit)
            .await
            .map_err(unavailable)
    }

    async fn pattern_search(
        &self,
        kind: ContentKind,
        escaped_pattern: &str,
        fields: &[SearchField],
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        content::search_pattern(&self.pool, kind, escaped_pattern, fields, limit)
            .await
            .map_err(unavailable)
    }

    async fn ensure_text_index(
        &self,
        kind: ContentKind,
        fields: &[SearchField],
    ) -> Result<(), RepositoryError> {
        let created = self.text_indexes.flag(kind);
        if created.load(Ordering::Acquire) {
            return Ok(());
        }

        content::create_text_index(&self.pool, kind, fields)
            .await
            .map_err(|e| RepositoryError::IndexUnavailable(e.to_string()))?;

        created.store(true, Ordering::Release);
        tracing::info!(
            index = %content::text_index_name(kind),
            "text index ready"
        );
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        crate::health_check(&self.pool).await.map_err(unavailable)
    }
}
