//! Playback Events
//!
//! Event-based communication for UI synchronization. Events are queued by the
//! controller and drained by the presentation layer:
//! - Status changes (idle/loading/playing)
//! - Session start and end (with the reason it ended)
//! - Transient, non-fatal errors
//! - Catalog refreshes

use crate::error::PlaybackErrorKind;
use crate::types::{EndReason, PlaybackStatus, SessionToken};
use serde::{Deserialize, Serialize};
use soundbath_core::ItemId;

/// Events emitted by the playback controller
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackEvent {
    /// Controller status changed
    StatusChanged {
        /// The new status
        status: PlaybackStatus,
    },

    /// Playback of an item started
    SessionStarted {
        /// Item now playing
        item_id: ItemId,
        /// Token of the new session
        token: SessionToken,
    },

    /// A session or pending request ended
    SessionEnded {
        /// Item that was playing or loading
        item_id: ItemId,
        /// Token of the ended session
        token: SessionToken,
        /// Why it ended
        reason: EndReason,
    },

    /// A play request or session failed; the controller is idle again
    Error {
        /// Item that failed
        item_id: ItemId,
        /// Failure kind
        kind: PlaybackErrorKind,
        /// Error message
        message: String,
    },

    /// Catalog snapshot replaced
    CatalogLoaded {
        /// Number of items in the new snapshot
        count: usize,
    },
}

impl PlaybackEvent {
    /// Whether this is an error notification
    pub fn is_error(&self) -> bool {
        matches!(self, PlaybackEvent::Error { .. })
    }
}
