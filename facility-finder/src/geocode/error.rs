//! Geocoding error types.

/// Errors from a geocoding lookup.
#[derive(Debug, Clone, thiserror::Error)]
pub enum GeocodeError {
    /// Nothing matched the query
    #[error("no place found for {query:?}")]
    NotFound { query: String },

    /// Query was empty after trimming
    #[error("search text is empty")]
    EmptyQuery,

    /// HTTP request failed
    #[error("HTTP error: {0}")]
    Http(String),

    /// Service returned an error status
    #[error("API error {status}: {message}")]
    Api { status: u16, message: String },

    /// Response was not the expected JSON
    #[error("JSON parse error: {message}")]
    Json { message: String },
}

impl From<reqwest::Error> for GeocodeError {
    fn from(err: reqwest::Error) -> Self {
        GeocodeError::Http(err.to_string())
    }
}
