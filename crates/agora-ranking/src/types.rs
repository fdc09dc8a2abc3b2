use agora_core::{AuthorRef, ContentItem, ContentKind};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

const ANONYMOUS_AUTHOR: &str = "Anonymous";
const ELLIPSIS: &str = "...";

/// One entry of the trending list. Scores stay internal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TrendingTopic {
    pub title: String,
    pub posts_count: usize,
    #[serde(rename = "type")]
    pub topic_type: &'static str,
}

impl TrendingTopic {
    #[must_use]
    pub fn new(title: String, posts_count: usize) -> Self {
        Self {
            title,
            posts_count,
            topic_type: "topic",
        }
    }
}

/// Author fields as exposed to clients, with `name` defaulted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthorSummary {
    pub id: Option<Uuid>,
    pub name: String,
    pub username: Option<String>,
    pub email: Option<String>,
    pub image: Option<String>,
}

impl AuthorSummary {
    #[must_use]
    pub fn from_ref(author: Option<&AuthorRef>) -> Self {
        let non_empty = |v: Option<&String>| v.filter(|s| !s.is_empty()).cloned();
        match author {
            Some(author) => Self {
                id: author.id,
                name: non_empty(author.name.as_ref())
                    .unwrap_or_else(|| ANONYMOUS_AUTHOR.to_string()),
                username: non_empty(author.username.as_ref()),
                email: non_empty(author.email.as_ref()),
                image: non_empty(author.image.as_ref()),
            },
            None => Self {
                id: None,
                name: ANONYMOUS_AUTHOR.to_string(),
                username: None,
                email: None,
                image: None,
            },
        }
    }
}

/// A search hit projected for the client.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResult {
    pub id: Uuid,
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub category: Option<String>,
    pub author: AuthorSummary,
    pub created_at: DateTime<Utc>,
}

impl SearchResult {
    #[must_use]
    pub fn project(item: &ContentItem, snippet_chars: usize) -> Self {
        Self {
            id: item.id,
            title: item.title.clone(),
            description: snippet(&item.content, snippet_chars),
            image: item.image.clone().filter(|s| !s.is_empty()),
            url: item.url(),
            kind: item.kind,
            category: item.effective_category().map(ToOwned::to_owned),
            author: AuthorSummary::from_ref(item.author.as_ref()),
            created_at: item.created_at,
        }
    }
}

/// An item of the combined posts/questions feed.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeedEntry {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub image: Option<String>,
    pub url: String,
    #[serde(rename = "type")]
    pub kind: ContentKind,
    pub category: Option<String>,
    pub author: AuthorSummary,
    pub likes_count: u32,
    pub comments_count: u32,
    pub created_at: DateTime<Utc>,
}

impl From<ContentItem> for FeedEntry {
    fn from(item: ContentItem) -> Self {
        let url = item.url();
        let category = item.effective_category().map(ToOwned::to_owned);
        let author = AuthorSummary::from_ref(item.author.as_ref());
        Self {
            id: item.id,
            title: item.title,
            content: item.content,
            image: item.image.filter(|s| !s.is_empty()),
            url,
            kind: item.kind,
            category,
            author,
            likes_count: item.likes_count,
            comments_count: item.comments_count,
            created_at: item.created_at,
        }
    }
}

/// First `max_chars` characters of `content`, with `...` appended when cut.
#[must_use]
pub fn snippet(content: &str, max_chars: usize) -> String {
    match content.char_indices().nth(max_chars) {
        Some((cut, _)) => format!("{}{ELLIPSIS}", &content[..cut]),
        None => content.to_string(),
    }
}
