//! Overpass client error types.

use std::fmt;

/// Errors from the Overpass HTTP client.
#[derive(Debug)]
pub enum OverpassError {
    /// HTTP request failed (network error, timeout, etc.)
    Http(reqwest::Error),

    /// Response body was not the expected JSON shape
    Json {
        message: String,
        body: Option<String>,
    },

    /// API returned an error status code
    ApiError { status: u16, message: String },

    /// Too many requests or the server is busy
    RateLimited,

    /// The request itself was unusable (e.g. no categories)
    InvalidQuery(String),

    /// Server answered 200 but reported a runtime error in `remark`
    QueryFailed(String),
}

impl fmt::Display for OverpassError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OverpassError::Http(e) => write!(f, "HTTP error: {e}"),
            OverpassError::Json { message, body } => {
                write!(f, "JSON parse error: {message}")?;
                if let Some(body) = body {
                    write!(f, " (body: {body})")?;
                }
                Ok(())
            }
            OverpassError::ApiError { status, message } => {
                write!(f, "API error {status}: {message}")
            }
            OverpassError::RateLimited => write!(f, "rate limited by Overpass API"),
            OverpassError::InvalidQuery(msg) => write!(f, "invalid query: {msg}"),
            OverpassError::QueryFailed(remark) => write!(f, "query failed: {remark}"),
        }
    }
}

impl std::error::Error for OverpassError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            OverpassError::Http(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for OverpassError {
    fn from(err: reqwest::Error) -> Self {
        OverpassError::Http(err)
    }
}
