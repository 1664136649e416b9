//! Liveness and the catch-all 404.

use axum::extract::State;
use axum::http::Uri;
use axum::response::{Json, Response};
use chrono::Utc;
use serde_json::{json, Value};

use super::not_found_page;
use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;

/// GET /health
pub async fn health(State(state): State<SharedState>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "mock_data": state.config.api.use_mock_data,
        "timestamp": Utc::now().to_rfc3339(),
    }))
}

pub async fn fallback(
    State(state): State<SharedState>,
    session: Option<Session>,
    uri: Uri,
) -> Result<Response, WebError> {
    not_found_page(&state, session.as_ref(), uri.path())
}
