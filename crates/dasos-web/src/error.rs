use axum::http::StatusCode;
use axum::response::{Html, IntoResponse, Response};
use thiserror::Error;
use tracing::error;

#[derive(Debug, Error)]
pub enum WebError {
    #[error("Template error: {0}")]
    Template(#[from] minijinja::Error),
}

impl IntoResponse for WebError {
    fn into_response(self) -> Response {
        error!(error = %self, "Render failed");
        (
            StatusCode::INTERNAL_SERVER_ERROR,
            Html("<h1>Error interno</h1><p>No se pudo mostrar la página.</p>"),
        )
            .into_response()
    }
}
