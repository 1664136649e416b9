//! Search endpoint backing the search box.

use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use dasos_api::search::search_hits;
use serde::Deserialize;
use serde_json::json;
use tracing::error;

use crate::state::SharedState;

#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub query: String,
}

/// GET /api/subjects?query= returns `[{id, name}]`.
pub async fn api_subjects(State(state): State<SharedState>, Query(params): Query<SearchParams>) -> Response {
    match search_hits(state.api.as_ref(), &params.query).await {
        Ok(hits) => Json(hits).into_response(),
        Err(e) => {
            error!(query = %params.query, error = %e, "Subject search failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(json!({ "error": "Failed to search subjects" })),
            )
                .into_response()
        }
    }
}
