//! Dashboard handler: landing page with stats and recent subjects.

use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use crate::assemble::assemble_dashboard;
use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;

pub async fn dashboard(State(state): State<SharedState>, session: Session) -> Result<Html<String>, WebError> {
    let view = assemble_dashboard(state.api.as_ref(), state.config.dashboard.recent_subjects).await;

    state.views.render(
        "dashboard.html",
        context! {
            session => session,
            active => "dashboard",
            debounce_ms => state.config.search.debounce_ms,
            view => view,
        },
    )
}
