//! API error taxonomy

/// Failure of a single API call
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("connection failed: {0}")]
    Connect(#[source] reqwest::Error),

    #[error("request timed out: {0}")]
    Timeout(#[source] reqwest::Error),

    #[error("request failed: {0}")]
    Transport(#[source] reqwest::Error),

    #[error("{url} answered with status {status}")]
    Status { status: u16, url: String },

    #[error("malformed response from {url}: {source}")]
    Malformed {
        url: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("empty response from {url}")]
    EmptyBody { url: String },

    #[error("invalid API url {url:?}: {reason}")]
    InvalidUrl { url: String, reason: String },
}

impl From<reqwest::Error> for ApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            ApiError::Timeout(e)
        } else if e.is_connect() {
            ApiError::Connect(e)
        } else {
            ApiError::Transport(e)
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;
