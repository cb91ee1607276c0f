//! Core types for playback coordination

use serde::{Deserialize, Serialize};
use soundbath_core::ItemId;
use std::fmt;

/// Identifies one play request and the session it may start
///
/// Tokens are drawn from a per-controller counter and never reused, so a
/// callback can tell whether the session it was created for is still current.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SessionToken(u64);

impl SessionToken {
    pub(crate) fn new(value: u64) -> Self {
        Self(value)
    }

    /// Raw counter value
    pub fn value(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for SessionToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Observable controller status
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlaybackStatus {
    /// Nothing playing
    Idle,

    /// Resolving and starting an item
    Loading(ItemId),

    /// Item is sounding
    Playing(ItemId),
}

impl PlaybackStatus {
    /// Item currently playing, if any
    pub fn playing_item(&self) -> Option<&ItemId> {
        match self {
            PlaybackStatus::Playing(id) => Some(id),
            PlaybackStatus::Idle | PlaybackStatus::Loading(_) => None,
        }
    }

    /// Whether the controller is idle
    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackStatus::Idle)
    }
}

/// Result of a play request
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PlayOutcome {
    /// Playback of the item started
    Started(SessionToken),

    /// The item was already playing and has been stopped
    ToggledOff,

    /// A later request (or stop) overtook this one before playback started
    Superseded,
}

/// Why a session (or pending request) ended
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum EndReason {
    /// `request_stop` was called
    Stopped,

    /// The same item was requested again
    Toggled,

    /// A different item was requested
    Superseded,

    /// Playback reached the end of the track
    Completed,

    /// The handle reported an error
    Failed,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_playing_status_exposes_item() {
        let id = ItemId::new("a");
        assert_eq!(PlaybackStatus::Playing(id.clone()).playing_item(), Some(&id));
        assert_eq!(PlaybackStatus::Loading(id).playing_item(), None);
        assert!(PlaybackStatus::Idle.is_idle());
    }

    #[test]
    fn tokens_order_by_value() {
        assert!(SessionToken::new(1) < SessionToken::new(2));
        assert_eq!(SessionToken::new(7).to_string(), "#7");
    }
}
