use std::net::SocketAddr;

use crate::scoring::{FeedConfig, SearchConfig, TrendingConfig};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Environment {
    Development,
    Test,
    Production,
}

impl std::fmt::Display for Environment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Environment::Development => write!(f, "development"),
            Environment::Test => write!(f, "test"),
            Environment::Production => write!(f, "production"),
        }
    }
}

#[derive(Clone)]
pub struct AppConfig {
    pub database_url: String,
    pub env: Environment,
    pub bind_addr: SocketAddr,
    pub log_level: String,
    pub db_max_connections: u32,
    pub db_min_connections: u32,
    pub db_acquire_timeout_secs: u64,
    pub trending_window_hours: u32,
    pub trending_top_n: usize,
    pub search_limit: usize,
    pub feed_limit: usize,
    pub rate_limit_per_minute: usize,
}

impl AppConfig {
    /// Trending engine settings derived from env, with the built-in stop words.
    #[must_use]
    pub fn trending_config(&self) -> TrendingConfig {
        TrendingConfig {
            window_hours: self.trending_window_hours,
            top_n: self.trending_top_n,
            ..TrendingConfig::default()
        }
    }

    #[must_use]
    pub fn search_config(&self) -> SearchConfig {
        SearchConfig {
            per_collection_limit: self.search_limit,
            ..SearchConfig::default()
        }
    }

    #[must_use]
    pub fn feed_config(&self) -> FeedConfig {
        FeedConfig {
            per_collection_limit: self.feed_limit,
        }
    }
}

impl std::fmt::Debug for AppConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AppConfig")
            .field("env", &self.env)
            .field("bind_addr", &self.bind_addr)
            .field("log_level", &self.log_level)
            .field("database_url", &"[redacted]")
            .field("db_max_connections", &self.db_max_connections)
            .field("db_min_connections", &self.db_min_connections)
            .field("db_acquire_timeout_secs", &self.db_acquire_timeout_secs)
            .field("trending_window_hours", &self.trending_window_hours)
            .field("trending_top_n", &self.trending_top_n)
            .field("search_limit", &self.search_limit)
            .field("feed_limit", &self.feed_limit)
            .field("rate_limit_per_minute", &self.rate_limit_per_minute)
            .finish()
    }
}
