//! Route guard. Runs before every page and resolves the session cookie.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Redirect, Response};
use axum_extra::extract::cookie::CookieJar;
use tracing::{debug, warn};

use crate::session::{decode_cookie_value, removal_cookie, Session};
use crate::state::SharedState;

/// Reachable without a session, including sub-paths.
pub const PUBLIC_PATHS: &[&str] = &["/login", "/reset-password"];

/// Never inspected by the guard.
const EXEMPT_PREFIXES: &[&str] = &["/static/", "/api/"];
const EXEMPT_PATHS: &[&str] = &["/health", "/favicon.ico"];

fn under(path: &str, prefix: &str) -> bool {
    path == prefix
        || path
            .strip_prefix(prefix)
            .is_some_and(|rest| rest.starts_with('/'))
}

pub fn is_public(path: &str) -> bool {
    PUBLIC_PATHS.iter().any(|p| under(path, p))
}

pub fn is_exempt(path: &str) -> bool {
    EXEMPT_PATHS.contains(&path) || EXEMPT_PREFIXES.iter().any(|p| path.starts_with(p))
}

pub async fn require_session(
    State(state): State<SharedState>,
    jar: CookieJar,
    mut request: Request,
    next: Next,
) -> Response {
    let path = request.uri().path().to_string();
    if is_exempt(&path) {
        return next.run(request).await;
    }

    let config = &state.config.session;
    let mut jar = jar;
    let session = match jar.get(&config.cookie_name).map(|c| c.value().to_string()) {
        None => None,
        Some(raw) => match decode_cookie_value(&raw) {
            Some(session) => Some(session),
            None => {
                warn!(path = %path, "Malformed session cookie, removing");
                jar = jar.remove(removal_cookie(config));
                None
            }
        },
    };

    match session {
        Some(_) if path == "/login" => (jar, Redirect::to("/dashboard")).into_response(),
        Some(session) => {
            debug!(path = %path, user = %session.email, "Session resolved");
            request.extensions_mut().insert::<Session>(session);
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        None if is_public(&path) => {
            let response = next.run(request).await;
            (jar, response).into_response()
        }
        None => {
            debug!(path = %path, "No session, redirecting to login");
            (jar, Redirect::to("/login")).into_response()
        }
    }
}
