use agora_core::ContentRepository;
use agora_ranking::TrendingTopic;
use axum::{extract::State, Extension, Json};

use crate::middleware::RequestId;

use super::{map_ranking_error, ApiError, AppState};

pub(super) async fn list_trending<R: ContentRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<TrendingTopic>>, ApiError> {
    let topics = state
        .trending
        .compute_trending()
        .await
        .map_err(|e| map_ranking_error(req_id.0, &e))?;
    Ok(Json(topics))
}
