//! Soundbath - Playback Coordination
//!
//! Platform-agnostic single-session playback control for Soundbath front ends.
//!
//! This crate provides:
//! - Mutual exclusion: at most one item sounds at a time
//! - Toggle semantics: requesting the playing item again stops it
//! - Session tokens: stale completion/error reports are ignored
//! - Supersession of requests still resolving their URL
//! - An event queue for UI synchronization and transient error notifications
//!
//! # Architecture
//!
//! `soundbath-playback` knows nothing about audio output or HTTP:
//! - Track listing and URL resolution come from a `CatalogSource`
//! - Audio output is provided by a `PlaybackBackend`
//! - The presentation layer reads `currently_playing()` / `status()` and
//!   drains `PlaybackEvent`s
//!
//! # State machine
//!
//! ```text
//! Idle       --request_play(x)-->        Playing(x)
//! Playing(x) --request_play(x)-->        Idle          (toggle off)
//! Playing(x) --request_play(y)-->        Playing(y)    (x released first)
//! Playing(x) --request_stop-->           Idle
//! Playing(x) --x completes / fails-->    Idle
//! ```
//!
//! While a request is resolving its URL the status is `Loading(x)`.

mod backend;
mod controller;
mod error;
mod events;
mod session;
pub mod types;

// Public exports
pub use backend::{PlaybackBackend, PlaybackHandle};
pub use controller::SinglePlaybackController;
pub use error::{PlaybackError, PlaybackErrorKind, Result};
pub use events::PlaybackEvent;
pub use session::SessionNotifier;
pub use types::{EndReason, PlayOutcome, PlaybackStatus, SessionToken};
