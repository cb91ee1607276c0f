//! Platform-agnostic playback backend traits
//!
//! Abstracts audio output for different front ends (desktop decoder, browser
//! bridge, test doubles).

use crate::error::Result;
use crate::session::SessionNotifier;
use url::Url;

/// Starts playback of resolved URLs
///
/// Implementors create one handle per call. The handle's own lifecycle runs
/// independently of the controller; completion and failure are reported back
/// through the supplied `SessionNotifier`, from any thread, at any time.
pub trait PlaybackBackend: Send + Sync {
    /// Begin playing `url`
    ///
    /// # Returns
    /// * `Ok(handle)` - Playback started (or is buffering)
    /// * `Err(_)` - Backend could not start playback
    fn start(&self, url: &Url, notifier: SessionNotifier) -> Result<Box<dyn PlaybackHandle>>;
}

/// A running playback session
///
/// The controller calls `release` at most once, and only when it ends the
/// session early (stop, toggle, or a superseding request). Handles that
/// finish or fail on their own are simply dropped, including those whose
/// notifier fired before `start` returned.
pub trait PlaybackHandle: Send {
    /// Stop sounding and free the underlying resources
    fn release(&mut self);
}
