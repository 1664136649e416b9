//! Login, logout and the root redirect.

use axum::extract::State;
use axum::response::{Html, IntoResponse, Redirect, Response};
use axum::Form;
use axum_extra::extract::cookie::CookieJar;
use minijinja::context;
use tracing::{debug, info};

use crate::error::WebError;
use crate::session::{removal_cookie, session_cookie, LoginForm};
use crate::state::SharedState;

/// GET /login
pub async fn login_page(State(state): State<SharedState>) -> Result<Html<String>, WebError> {
    state.views.render("login.html", context! { error => None::<&str>, email => "" })
}

/// POST /login. Invalid input re-renders the form with the first error.
pub async fn login_submit(
    State(state): State<SharedState>,
    jar: CookieJar,
    Form(form): Form<LoginForm>,
) -> Result<Response, WebError> {
    match form.validate() {
        Ok(session) => {
            info!(user = %session.email, "Signed in");
            let cookie = session_cookie(&session, &state.config.session);
            Ok((jar.add(cookie), Redirect::to("/dashboard")).into_response())
        }
        Err(e) => {
            debug!(reason = e.message(), "Login rejected");
            let page = state
                .views
                .render("login.html", context! { error => e.message(), email => form.email })?;
            Ok(page.into_response())
        }
    }
}

/// GET|POST /logout
pub async fn logout(State(state): State<SharedState>, jar: CookieJar) -> (CookieJar, Redirect) {
    (jar.remove(removal_cookie(&state.config.session)), Redirect::to("/login"))
}

/// GET /
pub async fn root() -> Redirect {
    Redirect::to("/dashboard")
}
