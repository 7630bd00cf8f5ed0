//! Error taxonomy for loading and computing compliance views.

/// Errors surfaced by the record source, payload parsing and configuration.
#[derive(Debug, thiserror::Error)]
pub enum PpeError {
    #[error("http request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("http error {status}: {reason}")]
    Status { status: u16, reason: String },

    #[error("invalid json: {0}")]
    Json(#[from] serde_json::Error),

    #[error("api reported failure: {message}")]
    Api { message: String },

    #[error("unrecognized payload shape: {reason}")]
    Payload { reason: String },

    #[error("config error in {field}: {message}")]
    Config { field: String, message: String },

    #[error("unknown date range '{0}' (expected all, today, yesterday, week or month)")]
    InvalidRange(String),
}

pub type Result<T> = std::result::Result<T, PpeError>;
