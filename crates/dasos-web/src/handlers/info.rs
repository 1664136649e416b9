//! Subject catalog page: faculty, resources, evaluation activities.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use minijinja::context;

use super::not_found_page;
use crate::assemble::{assemble_subject_info, PageOutcome};
use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;

/// GET /dashboard/subjectdata/{code}/info
pub async fn subject_info(
    State(state): State<SharedState>,
    session: Session,
    Path(code): Path<String>,
) -> Result<Response, WebError> {
    let outcome = assemble_subject_info(
        state.api.as_ref(),
        state.catalog.as_ref(),
        &code,
        &state.config.catalog.plan_code,
    )
    .await;

    let view = match outcome {
        PageOutcome::Found(view) => view,
        PageOutcome::NotFound => return not_found_page(&state, Some(&session), &code),
    };

    let page = state.views.render(
        "subject_info.html",
        context! {
            session => session,
            active => "subjects",
            debounce_ms => state.config.search.debounce_ms,
            view => view,
        },
    )?;
    Ok(page.into_response())
}
