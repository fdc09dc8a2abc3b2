use agora_core::ContentRepository;
use agora_ranking::SearchResult;
use axum::{
    extract::{Query, State},
    Extension, Json,
};
use serde::Deserialize;

use crate::middleware::RequestId;

use super::{map_ranking_error, ApiError, AppState};

#[derive(Debug, Deserialize)]
pub(super) struct SearchQuery {
    pub q: Option<String>,
}

/// A missing or blank `q` yields `[]`.
pub(super) async fn search_content<R: ContentRepository + 'static>(
    State(state): State<AppState<R>>,
    Extension(req_id): Extension<RequestId>,
    Query(query): Query<SearchQuery>,
) -> Result<Json<Vec<SearchResult>>, ApiError> {
    let q = query.q.unwrap_or_default();
    let results = state
        .search
        .search(&q)
        .await
        .map_err(|e| map_ranking_error(req_id.0, &e))?;
    Ok(Json(results))
}
