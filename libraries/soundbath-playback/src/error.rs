//! Error types for playback coordination

use serde::{Deserialize, Serialize};
use soundbath_core::{ItemId, SoundbathError};
use thiserror::Error;

/// Playback errors
#[derive(Debug, Error)]
pub enum PlaybackError {
    /// Requested item is not in the loaded catalog
    #[error("Unknown item: {0}")]
    UnknownItem(ItemId),

    /// Locator could not be resolved to a playable URL
    #[error("Could not resolve item {item_id}: {source}")]
    Resolution {
        item_id: ItemId,
        #[source]
        source: SoundbathError,
    },

    /// Backend failed to start playback
    #[error("Could not start item {item_id}: {message}")]
    Acquisition { item_id: ItemId, message: String },

    /// Catalog listing failed
    #[error("Catalog error: {0}")]
    Catalog(#[source] SoundbathError),

    /// Error raised by a playback backend
    #[error("Backend error: {0}")]
    Backend(String),
}

impl PlaybackError {
    /// Create a backend error
    pub fn backend(msg: impl Into<String>) -> Self {
        Self::Backend(msg.into())
    }

    /// Notification kind for errors that end a session
    pub fn kind(&self) -> Option<PlaybackErrorKind> {
        match self {
            PlaybackError::Resolution { .. } => Some(PlaybackErrorKind::Resolution),
            PlaybackError::Acquisition { .. } | PlaybackError::Backend(_) => {
                Some(PlaybackErrorKind::Acquisition)
            }
            PlaybackError::UnknownItem(_) | PlaybackError::Catalog(_) => None,
        }
    }
}

/// Kind of a transient playback failure surfaced to the presentation layer
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackErrorKind {
    /// Locator could not be turned into a URL
    Resolution,
    /// Backend refused to start playback
    Acquisition,
    /// Handle failed after playback started (decode error, network drop)
    Playback,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
