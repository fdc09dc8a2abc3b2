//! Stub repository and request helpers for router tests.

use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use agora_core::{
    AuthorRef, ContentItem, ContentKind, ContentRepository, RepositoryError, SearchField,
};
use axum::body::{to_bytes, Body};
use axum::http::Request;
use axum::response::Response;
use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

/// Shares its items and call counter across clones, like a pooled store.
#[derive(Debug, Clone, Default)]
pub(super) struct StubRepository {
    pub items: Arc<Vec<ContentItem>>,
    pub fail: bool,
    pub unhealthy: bool,
    pub calls: Arc<AtomicUsize>,
}

impl StubRepository {
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items: Arc::new(items),
            ..Self::default()
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn read(&self, kind: ContentKind) -> Result<Vec<ContentItem>, RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        if self.fail {
            return Err(RepositoryError::Unavailable("connection refused".to_string()));
        }
        Ok(self.items.iter().filter(|i| i.kind == kind).cloned().collect())
    }
}

impl ContentRepository for StubRepository {
    async fn find_recent(
        &self,
        kind: ContentKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        let items = self.read(kind)?;
        Ok(items.into_iter().filter(|i| i.created_at >= since).collect())
    }

    async fn find_latest(
        &self,
        kind: ContentKind,
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        let mut items = self.read(kind)?;
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        Ok(items)
    }

    async fn full_text_search(
        &self,
        kind: ContentKind,
        query: &str,
        _fields: &[SearchField],
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        let query = query.to_lowercase();
        let mut items = self.read(kind)?;
        items.retain(|i| {
            i.title.to_lowercase().contains(&query) || i.content.to_lowercase().contains(&query)
        });
        items.truncate(limit);
        Ok(items)
    }

    async fn pattern_search(
        &self,
        kind: ContentKind,
        _escaped_pattern: &str,
        _fields: &[SearchField],
        _limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        self.read(kind)?;
        Ok(Vec::new())
    }

    async fn ensure_text_index(
        &self,
        _kind: ContentKind,
        _fields: &[SearchField],
    ) -> Result<(), RepositoryError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(())
    }

    async fn health_check(&self) -> Result<(), RepositoryError> {
        if self.unhealthy {
            return Err(RepositoryError::Unavailable("ping timed out".to_string()));
        }
        Ok(())
    }
}

pub(super) fn item(kind: ContentKind, title: &str, content: &str, age: Duration) -> ContentItem {
    ContentItem {
        id: Uuid::new_v4(),
        kind,
        title: title.to_string(),
        content: content.to_string(),
        category: None,
        image: None,
        author: Some(AuthorRef {
            name: Some("Ferris".to_string()),
            username: Some("ferris".to_string()),
            ..AuthorRef::default()
        }),
        created_at: Utc::now() - age,
        likes_count: 0,
        comments_count: 0,
    }
}

pub(super) fn get(uri: &str) -> Request<Body> {
    Request::builder()
        .uri(uri)
        .body(Body::empty())
        .expect("request")
}

pub(super) async fn json_body(response: Response) -> serde_json::Value {
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .expect("body bytes");
    serde_json::from_slice(&body).expect("json parse")
}
