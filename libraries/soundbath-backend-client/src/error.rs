//! Error types for the Soundbath backend client.

use soundbath_core::SoundbathError;
use thiserror::Error;

/// Errors that can occur when talking to the hosted backend.
#[derive(Error, Debug)]
pub enum BackendClientError {
    /// HTTP request failed
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// Backend returned an error response
    #[error("Server error ({status}): {message}")]
    ServerError { status: u16, message: String },

    /// Admin operation attempted without an access token
    #[error("Authentication required")]
    AuthRequired,

    /// Backend rejected the credentials (expired token, missing policy)
    #[error("Authentication failed: {0}")]
    AuthFailed(String),

    /// Invalid backend URL
    #[error("Invalid backend URL: {0}")]
    InvalidUrl(String),

    /// Failed to parse backend response
    #[error("Failed to parse response: {0}")]
    ParseError(String),

    /// File not found for upload
    #[error("File not found: {0}")]
    FileNotFound(String),

    /// IO error while reading an upload
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Backend is offline or unreachable
    #[error("Backend unreachable: {0}")]
    ServerUnreachable(String),

    /// Request rejected locally before it was sent
    #[error(transparent)]
    Invalid(#[from] SoundbathError),
}

impl BackendClientError {
    /// Map a transport error, separating unreachable hosts from other failures
    pub(crate) fn from_transport(err: reqwest::Error) -> Self {
        if err.is_connect() || err.is_timeout() {
            Self::ServerUnreachable(err.to_string())
        } else {
            Self::Request(err)
        }
    }
}

impl From<BackendClientError> for SoundbathError {
    fn from(err: BackendClientError) -> Self {
        match err {
            BackendClientError::Invalid(inner) => inner,
            BackendClientError::Io(inner) => SoundbathError::Io(inner),
            BackendClientError::AuthRequired | BackendClientError::AuthFailed(_) => {
                SoundbathError::PermissionDenied(err.to_string())
            }
            other => SoundbathError::backend(other.to_string()),
        }
    }
}

/// Result type for backend client operations.
pub type Result<T> = std::result::Result<T, BackendClientError>;
