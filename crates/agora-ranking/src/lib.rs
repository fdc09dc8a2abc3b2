//! Engagement aggregation and ranking for Agora.
//!
//! Three read-only engines sit on top of an [`agora_core::ContentRepository`]:
//! trending keywords from recent posts, two-tier search with relevance
//! re-ranking, and the merged newest-first feed. None of them keep state
//! between calls.

pub mod engagement;
pub mod error;
pub mod feed;
pub mod keywords;
pub mod relevance;
pub mod search;
pub mod trending;
pub mod types;

#[cfg(test)]
mod test_support;

pub use error::RankingError;
pub use feed::FeedAggregator;
pub use search::SearchRankingEngine;
pub use trending::TrendingTopicsEngine;
pub use types::{AuthorSummary, FeedEntry, SearchResult, TrendingTopic};
