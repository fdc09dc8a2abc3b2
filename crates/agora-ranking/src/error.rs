use agora_core::RepositoryError;
use thiserror::Error;

/// Caller-visible failures.
///
/// The `Display` text is deliberately generic; the repository error is only
/// reachable through [`std::error::Error::source`] for logging.
#[derive(Debug, Error)]
pub enum RankingError {
    #[error("failed to fetch trending topics")]
    Trending(#[source] RepositoryError),

    #[error("search failed")]
    Search(#[source] RepositoryError),

    #[error("failed to fetch feed")]
    Feed(#[source] RepositoryError),
}
