/// Core error types for Soundbath
use thiserror::Error;

use crate::types::ItemId;

/// Result type alias using `SoundbathError`
pub type Result<T> = std::result::Result<T, SoundbathError>;

/// Core error type for Soundbath
#[derive(Error, Debug)]
pub enum SoundbathError {
    /// A locator could not be turned into a playable URL
    #[error("Could not resolve locator '{locator}': {reason}")]
    Resolution { locator: String, reason: String },

    /// Catalog item not found
    #[error("Item not found: {0}")]
    ItemNotFound(ItemId),

    /// Invalid input (form validation, malformed ids, etc.)
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Permission denied with context
    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    /// Hosted backend errors (network, HTTP status, decoding)
    #[error("Backend error: {0}")]
    Backend(String),

    /// I/O errors
    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl SoundbathError {
    /// Create a resolution error
    pub fn resolution(locator: impl Into<String>, reason: impl Into<String>) -> Self {
        Self::Resolution {
            locator: locator.into(),
            reason: reason.into(),
        }
    }

    /// Create an invalid input error
    pub fn invalid_input(msg: impl Into<String>) -> Self {
        Self::InvalidInput(msg.into())
    }

    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Whether this error came from locator resolution
    pub fn is_resolution(&self) -> bool {
        matches!(self, Self::Resolution { .. })
    }
}
