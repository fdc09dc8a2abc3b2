//! The read-only storage seam consumed by the ranking engines.

use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;

use crate::content::{ContentItem, ContentKind, SearchField};

#[derive(Debug, Error)]
pub enum RepositoryError {
    /// The store was unreachable or rejected the query.
    #[error("content store unavailable: {0}")]
    Unavailable(String),

    /// A text index is missing or could not be created.
    #[error("text index unavailable: {0}")]
    IndexUnavailable(String),
}

/// Read access to stored posts and questions.
///
/// Implementations must decode missing `title`/`content` as empty strings and
/// resolve the author reference (or leave it `None`) before returning.
pub trait ContentRepository: Send + Sync {
    /// All items of `kind` created at or after `since`, in store order.
    fn find_recent(
        &self,
        kind: ContentKind,
        since: DateTime<Utc>,
    ) -> impl Future<Output = Result<Vec<ContentItem>, RepositoryError>> + Send;

    /// The `limit` newest items of `kind`, newest first.
    fn find_latest(
        &self,
        kind: ContentKind,
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ContentItem>, RepositoryError>> + Send;

    /// Case- and diacritic-insensitive full-text search over `fields`, ordered
    /// by the store's native relevance.
    fn full_text_search(
        &self,
        kind: ContentKind,
        query: &str,
        fields: &[SearchField],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ContentItem>, RepositoryError>> + Send;

    /// Case-insensitive regex match of `escaped_pattern` against any of `fields`.
    ///
    /// Callers are responsible for escaping metacharacters.
    fn pattern_search(
        &self,
        kind: ContentKind,
        escaped_pattern: &str,
        fields: &[SearchField],
        limit: usize,
    ) -> impl Future<Output = Result<Vec<ContentItem>, RepositoryError>> + Send;

    /// Create the full-text index over `fields` if it does not exist yet.
    ///
    /// Idempotent.
    fn ensure_text_index(
        &self,
        kind: ContentKind,
        fields: &[SearchField],
    ) -> impl Future<Output = Result<(), RepositoryError>> + Send;

    /// Verify the store is reachable.
    fn health_check(&self) -> impl Future<Output = Result<(), RepositoryError>> + Send {
        async { Ok(()) }
    }
}
