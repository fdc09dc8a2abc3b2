use agora_core::ContentRepository;
use agora_ranking::FeedEntry;
use axum::{extract::State, Extension, Json};

use crate::middleware::RequestId;

use super::{map_ranking_error, ApiError, AppState};

pub(super) async fn list_feed<R: ContentRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
) -> Result<Json<Vec<FeedEntry>>, ApiError> {
    let entries = state
        .feed
        .latest()
        .await
        .map_err(|e| map_ranking_error(req_id.0, &e))?;
    Ok(Json(entries))
}
