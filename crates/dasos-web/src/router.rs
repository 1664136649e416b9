//! Axum router: maps all URL paths to handlers.

use std::sync::Arc;

use axum::{
    middleware,
    routing::get,
    Router,
};
use tower_http::{
    compression::CompressionLayer,
    cors::CorsLayer,
    services::ServeDir,
    trace::TraceLayer,
};

use crate::guard::require_session;
use crate::handlers::{
    auth::{login_page, login_submit, logout, root},
    dashboard::dashboard,
    detail::subject_detail,
    info::subject_info,
    profile::profile,
    search::api_subjects,
    subjects::subject_list,
    system::{fallback, health},
};
use crate::state::{AppState, SharedState};

/// Build and return the full Axum router.
pub fn build_router(state: AppState) -> Router {
    let shared: SharedState = Arc::new(state);
    let static_dir = shared.config.server.static_dir.clone();

    Router::new()
        // Pages
        .route("/",                                  get(root))
        .route("/login",                             get(login_page).post(login_submit))
        .route("/logout",                            get(logout).post(logout))
        .route("/dashboard",                         get(dashboard))
        .route("/dashboard/subjectdata",             get(subject_list))
        .route("/dashboard/subjectdata/{code}",      get(subject_detail))
        .route("/dashboard/subjectdata/{code}/info", get(subject_info))
        .route("/dashboard/profile",                 get(profile))

        // API endpoints
        .route("/api/subjects", get(api_subjects))
        .route("/health",       get(health))

        // Static files
        .nest_service("/static", ServeDir::new(static_dir))
        .fallback(fallback)

        // Middleware
        .layer(middleware::from_fn_with_state(shared.clone(), require_session))
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .with_state(shared)
}
