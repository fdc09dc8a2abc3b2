//! Read queries over the `posts` and `questions` tables.

use agora_core::{AuthorRef, ContentItem, ContentKind, SearchField};
use chrono::{DateTime, Utc};
use sqlx::PgPool;
use uuid::Uuid;

use crate::DbError;

// ---------------------------------------------------------------------------
// Row type
// ---------------------------------------------------------------------------

/// A content row with its author columns joined in and its counters
/// already aggregated.
#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ContentRow {
    pub id: Uuid,
    pub title: String,
    pub content: String,
    pub category: Option<String>,
    pub image: Option<String>,
    pub created_at: DateTime<Utc>,
    pub likes_count: i64,
    pub comments_count: i64,
    pub author_id: Option<Uuid>,
    pub author_name: Option<String>,
    pub author_username: Option<String>,
    pub author_image: Option<String>,
    pub author_email: Option<String>,
}

impl ContentRow {
    #[must_use]
    pub fn into_item(self, kind: ContentKind) -> ContentItem {
        let author = self.author_id.map(|id| AuthorRef {
            id: Some(id),
            name: self.author_name,
            username: self.author_username,
            image: self.author_image,
            email: self.author_email,
        });

        ContentItem {
            id: self.id,
            kind,
            title: self.title,
            content: self.content,
            category: self.category,
            image: self.image,
            author,
            created_at: self.created_at,
            likes_count: saturating_count(self.likes_count),
            comments_count: saturating_count(self.comments_count),
        }
    }
}

fn saturating_count(value: i64) -> u32 {
    u32::try_from(value.max(0)).unwrap_or(u32::MAX)
}

// ---------------------------------------------------------------------------
// SQL builders
// ---------------------------------------------------------------------------

/// Name of the GIN index backing full-text search on `kind`'s table.
#[must_use]
pub fn text_index_name(kind: ContentKind) -> String {
    format!("{}_text_idx", kind.collection())
}

fn select_clause(kind: ContentKind) -> String {
    let (comments_table, parent_column, category) = match kind {
        ContentKind::Post => ("post_comments", "post_id", "NULL::text"),
        ContentKind::Question => ("question_comments", "question_id", "c.category"),
    };
    format!(
        "SELECT c.id, coalesce(c.title, '') AS title, coalesce(c.content, '') AS content, \
                {category} AS category, c.image, c.created_at, \
                cardinality(c.liked_by)::bigint AS likes_count, \
                (SELECT COUNT(*) FROM {comments_table} cm \
                 WHERE cm.{parent_column} = c.id AND cm.parent_comment_id IS NULL) AS comments_count, \
                u.id AS author_id, u.name AS author_name, u.username AS author_username, \
                u.image AS author_image, u.email AS author_email \
         FROM {table} c \
         LEFT JOIN users u ON u.id = c.author_id",
        table = kind.collection(),
    )
}

/// Columns from `fields` that actually exist on `kind`'s table.
fn searchable_columns(kind: ContentKind, fields: &[SearchField]) -> Vec<&'static str> {
    fields
        .iter()
        .filter(|field| kind.searchable_fields().contains(field))
        .map(|field| field.column())
        .collect()
}

/// The tsvector expression shared by the index and the query.
///
/// Postgres only uses the index when both expressions are identical up to
/// column qualification, so `prefix` is the only thing allowed to differ.
fn document_expr(prefix: &str, columns: &[&str]) -> String {
    let joined = columns
        .iter()
        .map(|column| format!("coalesce({prefix}{column}, '')"))
        .collect::<Vec<_>>()
        .join(" || ' ' || ");
    format!("to_tsvector('english', agora_unaccent({joined}))")
}

fn limit_param(limit: usize) -> i64 {
    i64::try_from(limit).unwrap_or(i64::MAX)
}

fn into_items(rows: Vec<ContentRow>, kind: ContentKind) -> Vec<ContentItem> {
    rows.into_iter().map(|row| row.into_item(kind)).collect()
}

// ---------------------------------------------------------------------------
// Queries
// ---------------------------------------------------------------------------

/// Every item of `kind` created at or after `since`, oldest first.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_created_since(
    pool: &PgPool,
    kind: ContentKind,
    since: DateTime<Utc>,
) -> Result<Vec<ContentItem>, DbError> {
    let sql = format!(
        "{} WHERE c.created_at >= $1 ORDER BY c.created_at, c.id",
        select_clause(kind)
    );
    let rows = sqlx::query_as::<_, ContentRow>(&sql)
        .bind(since)
        .fetch_all(pool)
        .await?;

    Ok(into_items(rows, kind))
}

/// The `limit` newest items of `kind`.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn list_latest(
    pool: &PgPool,
    kind: ContentKind,
    limit: usize,
) -> Result<Vec<ContentItem>, DbError> {
    let sql = format!(
        "{} ORDER BY c.created_at DESC, c.id LIMIT $1",
        select_clause(kind)
    );
    let rows = sqlx::query_as::<_, ContentRow>(&sql)
        .bind(limit_param(limit))
        .fetch_all(pool)
        .await?;

    Ok(into_items(rows, kind))
}

/// Full-text match of any stemmed term in `query`, best `ts_rank` first.
///
/// Matching ignores case and diacritics. A query made only of stop words
/// matches nothing.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails.
pub async fn search_full_text(
    pool: &PgPool,
    kind: ContentKind,
    query: &str,
    fields: &[SearchField],
    limit: usize,
) -> Result<Vec<ContentItem>, DbError> {
    let columns = searchable_columns(kind, fields);
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let document = document_expr("c.", &columns);
    let sql = format!(
        "{select} WHERE {document} @@ agora_text_query($1) \
         ORDER BY ts_rank({document}, agora_text_query($1)) DESC \
         LIMIT $2",
        select = select_clause(kind),
    );
    let rows = sqlx::query_as::<_, ContentRow>(&sql)
        .bind(query)
        .bind(limit_param(limit))
        .fetch_all(pool)
        .await?;

    Ok(into_items(rows, kind))
}

/// Case-insensitive POSIX regex match against any of `fields`, newest first.
///
/// `pattern` is passed to `~*` as-is; callers escape user input.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the query fails, including on an invalid
/// pattern.
pub async fn search_pattern(
    pool: &PgPool,
    kind: ContentKind,
    pattern: &str,
    fields: &[SearchField],
    limit: usize,
) -> Result<Vec<ContentItem>, DbError> {
    let columns = searchable_columns(kind, fields);
    if columns.is_empty() {
        return Ok(Vec::new());
    }

    let predicate = columns
        .iter()
        .map(|column| format!("c.{column} ~* $1"))
        .collect::<Vec<_>>()
        .join(" OR ");
    let sql = format!(
        "{} WHERE {predicate} ORDER BY c.created_at DESC, c.id LIMIT $2",
        select_clause(kind)
    );
    let rows = sqlx::query_as::<_, ContentRow>(&sql)
        .bind(pattern)
        .bind(limit_param(limit))
        .fetch_all(pool)
        .await?;

    Ok(into_items(rows, kind))
}

/// Create the GIN text index over `fields` unless one already exists.
///
/// # Errors
///
/// Returns [`DbError::Sqlx`] if the DDL fails.
pub async fn create_text_index(
    pool: &PgPool,
    kind: ContentKind,
    fields: &[SearchField],
) -> Result<(), DbError> {
    let columns = searchable_columns(kind, fields);
    if columns.is_empty() {
        return Ok(());
    }

    let sql = format!(
        "CREATE INDEX IF NOT EXISTS {name} ON {table} USING GIN ({document})",
        name = text_index_name(kind),
        table = kind.collection(),
        document = document_expr("", &columns),
    );
    sqlx::query(&sql).execute(pool).await?;
    Ok(())
}
