//! Subject analytics page.

use axum::extract::{Path, State};
use axum::response::{IntoResponse, Response};
use minijinja::context;

use super::not_found_page;
use crate::assemble::{assemble_subject_detail, PageOutcome};
use crate::charts::{ChangeTimeline, RateSeries};
use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;

/// GET /dashboard/subjectdata/{code}
pub async fn subject_detail(
    State(state): State<SharedState>,
    session: Session,
    Path(code): Path<String>,
) -> Result<Response, WebError> {
    let view = match assemble_subject_detail(state.api.as_ref(), &code).await {
        PageOutcome::Found(view) => view,
        PageOutcome::NotFound => return not_found_page(&state, Some(&session), &code),
    };

    let historical_chart = view.historical.ready().filter(|s| !s.is_empty()).map(RateSeries::to_json);
    let faculty_chart = view.faculty.ready().filter(|t| !t.is_empty()).map(ChangeTimeline::to_json);
    let evaluation_chart = view.evaluation.ready().filter(|t| !t.is_empty()).map(ChangeTimeline::to_json);
    // `insights` serializes to none both when unavailable and when absent.
    let insights_unavailable = view.insights.is_unavailable();

    let page = state.views.render(
        "subject_detail.html",
        context! {
            session => session,
            active => "subjects",
            debounce_ms => state.config.search.debounce_ms,
            historical_chart => historical_chart,
            faculty_chart => faculty_chart,
            evaluation_chart => evaluation_chart,
            insights_unavailable => insights_unavailable,
            view => view,
        },
    )?;
    Ok(page.into_response())
}
