//! In-memory [`ContentRepository`] for engine tests.

use std::sync::atomic::{AtomicUsize, Ordering};

use agora_core::{
    AuthorRef, ContentItem, ContentKind, ContentRepository, RepositoryError, SearchField,
};
use chrono::{DateTime, Duration, Utc};
use regex::RegexBuilder;
use uuid::Uuid;

/// How a search tier of the fake should respond.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub(crate) enum Tier {
    #[default]
    Match,
    Empty,
    Fail,
}

#[derive(Debug, Default)]
pub(crate) struct Calls {
    pub find_recent: AtomicUsize,
    pub find_latest: AtomicUsize,
    pub full_text: AtomicUsize,
    pub pattern: AtomicUsize,
    pub ensure_index: AtomicUsize,
}

impl Calls {
    pub fn total(&self) -> usize {
        [
            &self.find_recent,
            &self.find_latest,
            &self.full_text,
            &self.pattern,
            &self.ensure_index,
        ]
        .iter()
        .map(|c| c.load(Ordering::SeqCst))
        .sum()
    }
}

#[derive(Debug, Default)]
pub(crate) struct FakeRepository {
    pub items: Vec<ContentItem>,
    pub full_text: Tier,
    pub pattern: Tier,
    /// Fail only the question lookup of the full-text tier.
    pub full_text_questions_fail: bool,
    pub index_fails: bool,
    pub reads_fail: bool,
    pub calls: Calls,
}

impl FakeRepository {
    pub fn with_items(items: Vec<ContentItem>) -> Self {
        Self {
            items,
            ..Self::default()
        }
    }

    fn of_kind(&self, kind: ContentKind) -> impl Iterator<Item = &ContentItem> {
        self.items.iter().filter(move |i| i.kind == kind)
    }
}

fn field_text(item: &ContentItem, field: SearchField) -> &str {
    match field {
        SearchField::Title => &item.title,
        SearchField::Content => &item.content,
        SearchField::Category => item.category.as_deref().unwrap_or(""),
    }
}

fn unavailable(what: &str) -> RepositoryError {
    RepositoryError::Unavailable(format!("{what}: simulated outage"))
}

impl ContentRepository for FakeRepository {
    async fn find_recent(
        &self,
        kind: ContentKind,
        since: DateTime<Utc>,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        self.calls.find_recent.fetch_add(1, Ordering::SeqCst);
        if self.reads_fail {
            return Err(unavailable("find_recent"));
        }
        Ok(self
            .of_kind(kind)
            .filter(|i| i.created_at >= since)
            .cloned()
            .collect())
    }

    async fn find_latest(
        &self,
        kind: ContentKind,
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        self.calls.find_latest.fetch_add(1, Ordering::SeqCst);
        if self.reads_fail {
            return Err(unavailable("find_latest"));
        }
        let mut items: Vec<ContentItem> = self.of_kind(kind).cloned().collect();
        items.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        items.truncate(limit);
        Ok(items)
    }

    /// Matches when any whitespace-separated query term appears as a word in a field.
    async fn full_text_search(
        &self,
        kind: ContentKind,
        query: &str,
        fields: &[SearchField],
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        self.calls.full_text.fetch_add(1, Ordering::SeqCst);
        let fail_here = self.full_text == Tier::Fail
            || (self.full_text_questions_fail && kind == ContentKind::Question);
        if fail_here {
            return Err(unavailable("full_text_search"));
        }
        if self.full_text == Tier::Empty {
            return Ok(Vec::new());
        }
        let terms: Vec<String> = query.split_whitespace().map(str::to_lowercase).collect();
        Ok(self
            .of_kind(kind)
            .filter(|item| {
                fields.iter().any(|f| {
                    field_text(item, *f)
                        .to_lowercase()
                        .split(|c: char| !c.is_alphanumeric())
                        .any(|word| terms.iter().any(|t| t == word))
                })
            })
            .take(limit)
            .cloned()
            .collect())
    }

    async fn pattern_search(
        &self,
        kind: ContentKind,
        escaped_pattern: &str,
        fields: &[SearchField],
        limit: usize,
    ) -> Result<Vec<ContentItem>, RepositoryError> {
        self.calls.pattern.fetch_add(1, Ordering::SeqCst);
        match self.pattern {
            Tier::Fail => return Err(unavailable("pattern_search")),
            Tier::Empty => return Ok(Vec::new()),
            Tier::Match => {}
        }
        let re = RegexBuilder::new(escaped_pattern)
            .case_insensitive(true)
            .build()
            .map_err(|e| RepositoryError::Unavailable(e.to_string()))?;
        Ok(self
            .of_kind(kind)
            .filter(|item| fields.iter().any(|f| re.is_match(field_text(item, *f))))
            .take(limit)
            .cloned()
            .collect())
    }

    async fn ensure_text_index(
        &self,
        _kind: ContentKind,
        _fields: &[SearchField],
    ) -> Result<(), RepositoryError> {
        self.calls.ensure_index.fetch_add(1, Ordering::SeqCst);
        if self.index_fails {
            return Err(RepositoryError::IndexUnavailable(
                "simulated index build failure".to_string(),
            ));
        }
        Ok(())
    }
}

/// Fixed reference instant so scores are reproducible.
pub(crate) fn fixed_now() -> DateTime<Utc> {
    DateTime::parse_from_rfc3339("2026-03-01T12:00:00Z")
        .expect("valid timestamp")
        .with_timezone(&Utc)
}

pub(crate) struct ItemBuilder {
    item: ContentItem,
}

impl ItemBuilder {
    pub fn post(title: &str, content: &str) -> Self {
        Self::new(ContentKind::Post, title, content)
    }

    pub fn question(title: &str, content: &str) -> Self {
        Self::new(ContentKind::Question, title, content)
    }

    fn new(kind: ContentKind, title: &str, content: &str) -> Self {
        Self {
            item: ContentItem {
                id: Uuid::new_v4(),
                kind,
                title: title.to_string(),
                content: content.to_string(),
                category: None,
                image: None,
                author: Some(AuthorRef {
                    id: Some(Uuid::new_v4()),
                    name: Some("Ferris".to_string()),
                    username: Some("ferris".to_string()),
                    image: None,
                    email: None,
                }),
                created_at: fixed_now(),
                likes_count: 0,
                comments_count: 0,
            },
        }
    }

    pub fn category(mut self, category: &str) -> Self {
        self.item.category = Some(category.to_string());
        self
    }

    pub fn age(mut self, age: Duration) -> Self {
        self.item.created_at = fixed_now() - age;
        self
    }

    pub fn likes(mut self, likes: u32) -> Self {
        self.item.likes_count = likes;
        self
    }

    pub fn comments(mut self, comments: u32) -> Self {
        self.item.comments_count = comments;
        self
    }

    pub fn build(self) -> ContentItem {
        self.item
    }
}
