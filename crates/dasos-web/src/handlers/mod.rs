//! HTTP handlers for all web routes.

pub mod auth;
pub mod dashboard;
pub mod detail;
pub mod info;
pub mod profile;
pub mod search;
pub mod subjects;
pub mod system;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use minijinja::context;

use crate::error::WebError;
use crate::session::Session;
use crate::state::AppState;

/// 404 page; keeps the navigation when a session is present.
pub fn not_found_page(state: &AppState, session: Option<&Session>, what: &str) -> Result<Response, WebError> {
    let body = state.views.render(
        "not_found.html",
        context! {
            session => session,
            what => what,
            debounce_ms => state.config.search.debounce_ms,
        },
    )?;
    Ok((StatusCode::NOT_FOUND, body).into_response())
}
