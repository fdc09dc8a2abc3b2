//! Shared domain types, scoring configuration and the storage seam for Agora.

pub mod app_config;
pub mod config;
pub mod content;
pub mod repository;
pub mod scoring;

pub use app_config::{AppConfig, Environment};
pub use config::{load_app_config, load_app_config_from_env};
pub use content::{AuthorRef, ContentItem, ContentKind, SearchField};
pub use repository::{ContentRepository, RepositoryError};
pub use scoring::{
    FeedConfig, RelevanceWeights, SearchConfig, TrendingConfig, DEFAULT_STOP_WORDS,
};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("missing required environment variable: {0}")]
    MissingEnvVar(String),

    #[error("invalid value for {var}: {reason}")]
    InvalidEnvVar { var: String, reason: String },

    #[error("invalid AGORA_ENV: {0} (expected development, test, or production)")]
    InvalidEnvironment(String),
}
