use thiserror::Error;

/// Result type alias for F1 operations
pub type Result<T, E = F1Error> = std::result::Result<T, E>;

/// Errors that can occur while fetching or mapping F1 data
#[derive(Error, Debug)]
pub enum F1Error {
    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("upstream returned status {0}")]
    UpstreamStatus(reqwest::StatusCode),

    #[error("invalid payload: {0}")]
    InvalidPayload(String),

    #[error("invalid number in field {field}: {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}
