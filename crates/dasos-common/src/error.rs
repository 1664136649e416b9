use thiserror::Error;

#[derive(Debug, Error)]
pub enum DasosError {
    #[error("HTTP request error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API request failed: {status} ({url})")]
    Status { status: u16, url: String },

    #[error("Malformed payload: {0}")]
    Decode(#[from] serde_json::Error),

    #[error("Entity not found: {0}")]
    NotFound(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

impl DasosError {
    /// True when the remote side answered but had nothing for the key.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DasosError::NotFound(_) | DasosError::Status { status: 404, .. })
    }
}

pub type Result<T> = std::result::Result<T, DasosError>;
