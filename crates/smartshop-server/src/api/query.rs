use axum::{
    extract::{rejection::JsonRejection, State},
    Extension, Json,
};
use serde::Deserialize;
use smartshop_core::SearchResponse;

use super::{ApiError, AppState};
use crate::middleware::RequestId;

#[derive(Debug, Deserialize)]
pub(super) struct SearchRequest {
    query: String,
}

/// `POST /query`: search every storefront (or the offline catalog) and
/// return the merged, price-sorted results.
pub(super) async fn search(
    State(state): State<AppState>,
    Extension(req_id): Extension<RequestId>,
    payload: Result<Json<SearchRequest>, JsonRejection>,
) -> Result<Json<SearchResponse>, ApiError> {
    let Json(request) = payload.map_err(|rejection| {
        ApiError::new(
            req_id.0.clone(),
            "validation_error",
            format!("invalid request body: {}", rejection.body_text()),
        )
    })?;

    let query = request.query.trim();
    if query.is_empty() {
        return Err(ApiError::new(
            req_id.0,
            "validation_error",
            "query must not be blank",
        ));
    }

    tracing::info!(query, source = %state.search.source(), "handling search");
    let results = state.search.search(query).await.map_err(|e| {
        tracing::error!(error = %e, "search failed");
        ApiError::new(req_id.0.clone(), "internal_error", "search failed")
    })?;

    Ok(Json(SearchResponse { results }))
}
