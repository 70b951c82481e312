use thiserror::Error;

#[derive(Error, Debug)]
pub enum GramError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid username: {0:?}")]
    InvalidUsername(String),

    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected response from {endpoint}: {reason}")]
    UnexpectedResponse { endpoint: String, reason: String },

    #[error("Pagination exceeded {0} pages")]
    PaginationLimit(usize),

    #[error("Pagination cursor repeated: {0}")]
    CursorCycle(String),

    #[error("No {0} available")]
    MissingMedia(&'static str),

    #[error("Configuration error: {0}")]
    Config(String),
}

impl GramError {
    pub fn unexpected(endpoint: &str, reason: impl Into<String>) -> Self {
        Self::UnexpectedResponse {
            endpoint: endpoint.to_string(),
            reason: reason.into(),
        }
    }
}

pub type Result<T> = std::result::Result<T, GramError>;
