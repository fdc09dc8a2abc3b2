use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Discriminator between the two stored content collections.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ContentKind {
    Post,
    Question,
}

impl ContentKind {
    /// Lowercase tag used in URLs and serialized `type` fields.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            ContentKind::Post => "post",
            ContentKind::Question => "question",
        }
    }

    /// Name of the table backing this kind.
    #[must_use]
    pub fn collection(self) -> &'static str {
        match self {
            ContentKind::Post => "posts",
            ContentKind::Question => "questions",
        }
    }

    /// Fields covered by full-text and pattern search for this kind.
    ///
    /// Questions additionally match on `category`; posts never carry one.
    #[must_use]
    pub fn searchable_fields(self) -> &'static [SearchField] {
        match self {
            ContentKind::Post => &[SearchField::Title, SearchField::Content],
            ContentKind::Question => &[
                SearchField::Title,
                SearchField::Content,
                SearchField::Category,
            ],
        }
    }

    /// Canonical client-side URL for an item of this kind, e.g. `/post/<id>`.
    #[must_use]
    pub fn url_for(self, id: Uuid) -> String {
        format!("/{}/{id}", self.as_str())
    }
}

impl std::fmt::Display for ContentKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A text column that search tiers can match against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SearchField {
    Title,
    Content,
    Category,
}

impl SearchField {
    #[must_use]
    pub fn column(self) -> &'static str {
        match self {
            SearchField::Title => "title",
            SearchField::Content => "content",
            SearchField::Category => "category",
        }
    }
}

/// Author fields denormalized from the `users` table at read time.
///
/// Every field is optional: the author row may be missing entirely or only
/// partially onboarded.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorRef {
    pub id: Option<Uuid>,
    pub name: Option<String>,
    pub username: Option<String>,
    pub image: Option<String>,
    pub email: Option<String>,
}

/// A stored post or question as returned by a [`crate::ContentRepository`].
///
/// Missing `title`/`content` values are decoded as empty strings by the
/// repository, so consumers never see `NULL` text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContentItem {
    pub id: Uuid,
    pub kind: ContentKind,
    pub title: String,
    pub content: String,
    /// Only meaningful for questions; see [`ContentItem::effective_category`].
    pub category: Option<String>,
    pub image: Option<String>,
    pub author: Option<AuthorRef>,
    pub created_at: DateTime<Utc>,
    /// Size of the liked-by set.
    pub likes_count: u32,
    /// Number of top-level comments. Replies are not counted.
    pub comments_count: u32,
}

impl ContentItem {
    /// Category as seen by scoring and formatting.
    ///
    /// Posts never have a category even if the stored row carries one, and an
    /// empty category counts as none.
    #[must_use]
    pub fn effective_category(&self) -> Option<&str> {
        match self.kind {
            ContentKind::Post => None,
            ContentKind::Question => self.category.as_deref().filter(|c| !c.is_empty()),
        }
    }

    #[must_use]
    pub fn url(&self) -> String {
        self.kind.url_for(self.id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(kind: ContentKind, category: Option<&str>) -> ContentItem {
        ContentItem {
            id: Uuid::nil(),
            kind,
            title: "Title".to_string(),
            content: "Body".to_string(),
            category: category.map(ToOwned::to_owned),
            image: None,
            author: None,
            created_at: Utc::now(),
            likes_count: 0,
            comments_count: 0,
        }
    }

    #[test]
    fn post_category_is_ignored() {
        let post = item(ContentKind::Post, Some("rust"));
        assert_eq!(post.effective_category(), None);
    }

    #[test]
    fn question_category_is_exposed() {
        let question = item(ContentKind::Question, Some("rust"));
        assert_eq!(question.effective_category(), Some("rust"));
    }

    #[test]
    fn empty_question_category_is_none() {
        let question = item(ContentKind::Question, Some(""));
        assert_eq!(question.effective_category(), None);
    }

    #[test]
    fn url_uses_kind_and_id() {
        let question = item(ContentKind::Question, None);
        assert_eq!(
            question.url(),
            "/question/00000000-0000-0000-0000-000000000000"
        );
    }

    #[test]
    fn questions_search_category_but_posts_do_not() {
        assert!(!ContentKind::Post
            .searchable_fields()
            .contains(&SearchField::Category));
        assert!(ContentKind::Question
            .searchable_fields()
            .contains(&SearchField::Category));
    }

    #[test]
    fn kind_serializes_lowercase() {
        let json = serde_json::to_string(&ContentKind::Question).expect("serialize");
        assert_eq!(json, "\"question\"");
    }
}
