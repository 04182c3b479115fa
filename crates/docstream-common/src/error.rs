//! Error types for docstream

use thiserror::Error;

/// Result type alias for docstream operations
pub type Result<T> = std::result::Result<T, DocstreamError>;

/// Unified error type for every phase of a query run
///
/// Each variant corresponds to one phase of the run. None of them are
/// retried; the binary reports the error and exits.
#[derive(Error, Debug, Clone)]
pub enum DocstreamError {
    /// Required invocation parameters are missing or empty
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Client construction or handshake failed
    #[error("Connection error: {0}")]
    Connection(String),

    /// Handshake did not complete within the connect timeout
    #[error("Timeout: {0}")]
    Timeout(String),

    /// The find operation was rejected by the server
    #[error("Query error: {0}")]
    Query(String),

    /// The cursor failed while fetching the next batch
    #[error("Cursor error: {0}")]
    Cursor(String),

    #[error("Deserialization error: {0}")]
    Deserialization(String),

    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Writing to the output stream failed
    #[error("I/O error: {0}")]
    Io(String),
}

impl DocstreamError {
    /// Returns true if this error should be reported with usage text
    pub fn is_configuration(&self) -> bool {
        matches!(self, DocstreamError::Configuration(_))
    }

    /// Process exit status for this error
    pub fn exit_code(&self) -> u8 {
        1
    }
}

impl From<serde_json::Error> for DocstreamError {
    fn from(err: serde_json::Error) -> Self {
        DocstreamError::Serialization(err.to_string())
    }
}

impl From<std::io::Error> for DocstreamError {
    fn from(err: std::io::Error) -> Self {
        DocstreamError::Io(err.to_string())
    }
}

// BSON-specific error conversions (when bson-errors feature is enabled)
#[cfg(feature = "bson-errors")]
impl From<bson::datetime::Error> for DocstreamError {
    fn from(err: bson::datetime::Error) -> Self {
        DocstreamError::Serialization(format!("date out of range: {}", err))
    }
}
