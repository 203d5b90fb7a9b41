//! Error handling types and utilities.

use std::time::Duration;

/// A specialized Result type for torrent-search operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Call-level failures of a search.
///
/// Only encoding and store dispatch failures end a call. Per-hit decode
/// failures are a separate [`DecodeError`] and never surface here.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Request rejected by strict boundary validation.
    #[error("invalid request: {reason}")]
    InvalidRequest { reason: String },

    /// The built query could not be serialized to the store's wire format.
    #[error("failed to encode query: {0}")]
    QueryEncoding(#[source] serde_json::Error),

    /// The document store could not be reached or answered with an error.
    #[error("document store unavailable: {reason}")]
    StoreUnavailable {
        reason: String,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The store did not answer before the deadline.
    #[error("document store timed out after {}ms", .timeout.as_millis())]
    Timeout {
        timeout: Duration,
        #[source]
        source: Option<reqwest::Error>,
    },

    /// The caller cancelled the search while it was in flight.
    #[error("search cancelled")]
    Cancelled,

    /// The store answered, but the envelope was not a search response.
    #[error("invalid store response: {reason}")]
    InvalidResponse { reason: String },
}

impl Error {
    pub fn invalid_request(reason: impl Into<String>) -> Self {
        Self::InvalidRequest {
            reason: reason.into(),
        }
    }

    /// Store failure without an underlying transport error (e.g. a 5xx status).
    pub fn store_unavailable(reason: impl Into<String>) -> Self {
        Self::StoreUnavailable {
            reason: reason.into(),
            source: None,
        }
    }

    /// Deadline exceeded outside the HTTP client (no transport error to keep).
    pub fn timeout(timeout: Duration) -> Self {
        Self::Timeout {
            timeout,
            source: None,
        }
    }

    pub fn invalid_response(reason: impl Into<String>) -> Self {
        Self::InvalidResponse {
            reason: reason.into(),
        }
    }
}

impl From<reqwest::Error> for Error {
    fn from(error: reqwest::Error) -> Self {
        Self::StoreUnavailable {
            reason: error.to_string(),
            source: Some(error),
        }
    }
}

/// A single hit that could not be turned into torrent metadata.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// The hit carried no `_source` document.
    #[error("hit {id} has no _source document")]
    MissingSource { id: String },

    /// The `_source` document did not match the metadata shape.
    #[error("hit {id}: {error}")]
    Malformed {
        id: String,
        #[source]
        error: serde_json::Error,
    },

    /// The document decoded but violates a metadata invariant.
    #[error("hit {id}: file_count is {file_count} but {files} files are listed")]
    FileCountMismatch {
        id: String,
        file_count: u64,
        files: usize,
    },
}
