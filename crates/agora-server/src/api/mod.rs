mod feed;
mod search;
mod trending;

#[cfg(test)]
mod test_support;

use std::sync::Arc;

use agora_core::{AppConfig, ContentRepository, FeedConfig, SearchConfig, TrendingConfig};
use agora_ranking::{FeedAggregator, RankingError, SearchRankingEngine, TrendingTopicsEngine};
use axum::{
    extract::State,
    http::{header, HeaderName, Method, StatusCode},
    response::IntoResponse,
    routing::get,
    Extension, Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::middleware::{enforce_rate_limit, request_id, RateLimitState, RequestId};

/// Shared handler state: one engine per endpoint, all reading through clones
/// of the same repository.
pub struct AppState<R> {
    pub trending: Arc<TrendingTopicsEngine<R>>,
    pub search: Arc<SearchRankingEngine<R>>,
    pub feed: Arc<FeedAggregator<R>>,
}

// Manual impl: derive would require `R: Clone`.
impl<R> Clone for AppState<R> {
    fn clone(&self) -> Self {
        Self {
            trending: Arc::clone(&self.trending),
            search: Arc::clone(&self.search),
            feed: Arc::clone(&self.feed),
        }
    }
}

impl<R: ContentRepository + Clone> AppState<R> {
    pub fn new(
        repository: R,
        trending: TrendingConfig,
        search: SearchConfig,
        feed: FeedConfig,
    ) -> Self {
        Self {
            trending: Arc::new(TrendingTopicsEngine::new(repository.clone(), trending)),
            search: Arc::new(SearchRankingEngine::new(repository.clone(), search)),
            feed: Arc::new(FeedAggregator::new(repository, feed)),
        }
    }

    pub fn from_config(repository: R, config: &AppConfig) -> Self {
        Self::new(
            repository,
            config.trending_config(),
            config.search_config(),
            config.feed_config(),
        )
    }
}

#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub data: T,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ResponseMeta {
    pub request_id: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug, Serialize)]
pub struct ApiError {
    pub error: ErrorBody,
    pub meta: ResponseMeta,
}

#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub code: String,
    pub message: String,
}

#[derive(Debug, Serialize, PartialEq, Eq)]
struct HealthData {
    status: &'static str,
    database: &'static str,
}

impl ResponseMeta {
    pub(super) fn new(request_id: String) -> Self {
        Self {
            request_id,
            timestamp: Utc::now(),
        }
    }
}

impl ApiError {
    pub fn new(
        request_id: impl Into<String>,
        code: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            error: ErrorBody {
                code: code.into(),
                message: message.into(),
            },
            meta: ResponseMeta::new(request_id.into()),
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> axum::response::Response {
        let status = match self.error.code.as_str() {
            "not_found" => StatusCode::NOT_FOUND,
            "bad_request" => StatusCode::BAD_REQUEST,
            "rate_limited" => StatusCode::TOO_MANY_REQUESTS,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        };
        (status, Json(self)).into_response()
    }
}

/// Log the full error chain and hand the client only the generic message.
pub(super) fn map_ranking_error(request_id: String, error: &RankingError) -> ApiError {
    tracing::error!(request_id = %request_id, error = ?error, "{error}");
    ApiError::new(request_id, "internal_error", error.to_string())
}

fn build_cors() -> CorsLayer {
    CorsLayer::new()
        .allow_origin(tower_http::cors::Any)
        .allow_methods([Method::GET])
        .allow_headers([header::CONTENT_TYPE, HeaderName::from_static("x-request-id")])
}

fn content_router<R>(rate_limit: RateLimitState) -> Router<AppState<R>>
where
    R: ContentRepository + 'static,
{
    Router::new()
        .route("/api/trending", get(trending::list_trending::<R>))
        .route("/api/search", get(search::search_content::<R>))
        .route("/api/feed", get(feed::list_feed::<R>))
        .layer(axum::middleware::from_fn_with_state(
            rate_limit,
            enforce_rate_limit,
        ))
}

pub fn build_app<R>(state: AppState<R>, rate_limit: RateLimitState) -> Router
where
    R: ContentRepository + 'static,
{
    let public_routes = Router::new().route("/api/health", get(health::<R>));

    Router::new()
        .merge(public_routes)
        .merge(content_router(rate_limit))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(build_cors())
                .layer(axum::middleware::from_fn(request_id)),
        )
        .with_state(state)
}

async fn health<R: ContentRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
) -> impl IntoResponse {
    let meta = ResponseMeta::new(req_id.0);

    match state.feed.repository().health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(ApiResponse {
                data: HealthData {
                    status: "ok",
                    database: "ok",
                },
                meta,
            }),
        ),
        Err(e) => {
            tracing::warn!(error = %e, "health check: database unavailable");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(ApiResponse {
                    data: HealthData {
                        status: "degraded",
                        database: "unavailable",
                    },
                    meta,
                }),
            )
        }
    }
}
