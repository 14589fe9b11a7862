use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T, E = GatewayError> = std::result::Result<T, E>;

/// Errors that can occur while relaying a request to an upstream.
///
/// Every variant is converted into a structured JSON response at the service
/// boundary; nothing propagates past it as an opaque failure.
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("failed to read request body: {0}")]
    RequestBody(String),

    #[error("failed to read response body from {0}: {1}")]
    ResponseBody(String, String),

    #[error("upstream request failed for {0}: {1}")]
    UpstreamRequestFailed(String, String),

    #[error("upstream timeout for {0}")]
    UpstreamTimeout(String),

    #[error("upstream {upstream} returned status {status}")]
    UpstreamStatus { upstream: String, status: u16 },

    #[error("hyper error: {0}")]
    Hyper(String),

    #[error("internal error: {0}")]
    Internal(String),

    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
