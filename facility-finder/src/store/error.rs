//! Store error types.

/// Errors that can occur when reading or writing the store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// Filesystem operation failed
    #[error("store I/O error for {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// Value could not be serialized
    #[error("failed to serialize {key}: {message}")]
    Serialize { key: String, message: String },

    /// Key is not usable as a storage name
    #[error("invalid store key: {0:?}")]
    InvalidKey(String),
}
