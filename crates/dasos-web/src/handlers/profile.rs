use axum::extract::State;
use axum::response::Html;
use minijinja::context;

use crate::error::WebError;
use crate::session::Session;
use crate::state::SharedState;

/// GET /dashboard/profile
pub async fn profile(State(state): State<SharedState>, session: Session) -> Result<Html<String>, WebError> {
    state.views.render(
        "profile.html",
        context! {
            session => session,
            active => "profile",
            debounce_ms => state.config.search.debounce_ms,
            session_days => state.config.session.max_age_days,
        },
    )
}
