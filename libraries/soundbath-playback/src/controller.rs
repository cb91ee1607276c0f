//! Single playback controller - core orchestration
//!
//! Guarantees that at most one catalog item is sounding at any time and keeps
//! an observable status for the presentation layer.

use crate::{
    backend::PlaybackBackend,
    error::{PlaybackError, PlaybackErrorKind, Result},
    events::PlaybackEvent,
    session::{ControllerState, Phase, Session, SessionNotifier, SharedState},
    types::{EndReason, PlayOutcome, PlaybackStatus, SessionToken},
};
use parking_lot::Mutex;
use soundbath_core::{CatalogSource, ItemId, PlayableItem};
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Owns the single active playback session across a catalog
///
/// All operations take `&self`; state is kept behind a short-lived lock that is
/// never held across an `.await` or while calling into the backend. One
/// controller is shared (via `Arc`) by every surface that plays audio.
///
/// # Example
///
/// ```rust,no_run
/// use soundbath_core::{ItemId, MemoryCatalog, PlayableItem};
/// use soundbath_playback::{PlaybackBackend, PlaybackHandle, SessionNotifier, SinglePlaybackController};
/// use std::sync::Arc;
///
/// struct Silent;
/// struct SilentHandle;
///
/// impl PlaybackHandle for SilentHandle {
///     fn release(&mut self) {}
/// }
///
/// impl PlaybackBackend for Silent {
///     fn start(
///         &self,
///         _url: &url::Url,
///         _notifier: SessionNotifier,
///     ) -> soundbath_playback::Result<Box<dyn PlaybackHandle>> {
///         Ok(Box::new(SilentHandle))
///     }
/// }
///
/// # async fn demo() -> soundbath_playback::Result<()> {
/// let catalog = MemoryCatalog::new("https://backend.example.com", "audio-files")
///     .unwrap()
///     .with_item(PlayableItem::new("Bowls", "audio/bowls.mp3").with_id("bowls"));
///
/// let controller = SinglePlaybackController::new(Arc::new(catalog), Arc::new(Silent));
/// controller.load_catalog().await?;
///
/// controller.request_play(&ItemId::new("bowls")).await?;
/// assert_eq!(controller.currently_playing(), Some(ItemId::new("bowls")));
///
/// // Clicking the same item again stops it
/// controller.request_play(&ItemId::new("bowls")).await?;
/// assert_eq!(controller.currently_playing(), None);
/// # Ok(())
/// # }
/// ```
pub struct SinglePlaybackController {
    catalog: Arc<dyn CatalogSource>,
    backend: Arc<dyn PlaybackBackend>,
    state: SharedState,
}

impl SinglePlaybackController {
    /// Create an idle controller
    pub fn new(catalog: Arc<dyn CatalogSource>, backend: Arc<dyn PlaybackBackend>) -> Self {
        Self {
            catalog,
            backend,
            state: Arc::new(Mutex::new(ControllerState::new())),
        }
    }

    // ===== Catalog =====

    /// Fetch the item list from the catalog source and cache it
    ///
    /// Play requests are looked up in the cached snapshot. A playing item that
    /// disappears from the new snapshot keeps playing until it ends.
    pub async fn load_catalog(&self) -> Result<Vec<PlayableItem>> {
        let listed = {
            let _loading = LoadInFlight::begin(&self.state);
            self.catalog.list().await
        };

        let mut state = self.state.lock();

        match listed {
            Ok(items) => {
                debug!(count = items.len(), "Catalog loaded");
                state.items = items.clone();
                state.emit(PlaybackEvent::CatalogLoaded { count: items.len() });
                Ok(items)
            }
            Err(err) => {
                warn!(error = %err, "Failed to load catalog");
                Err(PlaybackError::Catalog(err))
            }
        }
    }

    /// Cached catalog snapshot
    pub fn items(&self) -> Vec<PlayableItem> {
        self.state.lock().items.clone()
    }

    /// Whether a catalog fetch is in flight
    pub fn is_loading(&self) -> bool {
        self.state.lock().loads_in_flight > 0
    }

    // ===== Playback Control =====

    /// Play an item, or stop it if it is the one already playing
    ///
    /// Any active session is stopped first. A request still resolving is
    /// superseded; when it resumes it notices and returns
    /// `PlayOutcome::Superseded` without touching state.
    ///
    /// Dropping the returned future before it completes cancels the request
    /// as if `request_stop` had been called for it.
    ///
    /// # Errors
    /// * `UnknownItem` - id not in the cached catalog (state unchanged)
    /// * `Resolution` - locator could not be resolved (controller idle)
    /// * `Acquisition` - backend refused to start (controller idle)
    pub async fn request_play(&self, id: &ItemId) -> Result<PlayOutcome> {
        let (item, token, stopped) = {
            let mut state = self.state.lock();

            let item = state
                .items
                .iter()
                .find(|item| &item.id == id)
                .cloned()
                .ok_or_else(|| PlaybackError::UnknownItem(id.clone()))?;

            let stopped = match state.take_phase() {
                Phase::Playing(session) => Some(session),
                Phase::Resolving { item_id, token } => {
                    debug!(item_id = %item_id, token = %token, "Superseding pending request");
                    state.emit_ended(item_id, token, EndReason::Superseded);
                    None
                }
                Phase::Idle => None,
            };

            match stopped {
                Some(session) if &session.item_id == id => {
                    state.emit_ended(session.item_id.clone(), session.token, EndReason::Toggled);
                    state.emit_status();
                    drop(state);

                    info!(item_id = %id, "Toggled playback off");
                    session.release();
                    return Ok(PlayOutcome::ToggledOff);
                }
                Some(ref session) => {
                    state.emit_ended(session.item_id.clone(), session.token, EndReason::Superseded);
                }
                None => {}
            }

            let token = state.next_token();
            state.phase = Phase::Resolving {
                item_id: id.clone(),
                token,
            };
            state.emit_status();

            (item, token, stopped)
        };

        if let Some(session) = stopped {
            session.release();
        }

        // Declared before any later lock guard so it drops after them
        let _pending = PendingRequest {
            state: &self.state,
            token,
        };

        debug!(item_id = %id, token = %token, locator = %item.locator, "Resolving locator");
        let url = match self.catalog.resolve(&item.locator).await {
            Ok(url) => url,
            Err(err) => {
                let mut state = self.state.lock();
                if !state.is_resolving(token) {
                    debug!(item_id = %id, token = %token, "Dropping failed resolution of superseded request");
                    return Ok(PlayOutcome::Superseded);
                }

                warn!(item_id = %id, error = %err, "Failed to resolve locator");
                state.phase = Phase::Idle;
                state.emit_error(id.clone(), PlaybackErrorKind::Resolution, err.to_string());
                state.emit_status();
                return Err(PlaybackError::Resolution {
                    item_id: id.clone(),
                    source: err,
                });
            }
        };

        if !self.state.lock().is_resolving(token) {
            debug!(item_id = %id, token = %token, "Request superseded during resolution");
            return Ok(PlayOutcome::Superseded);
        }

        let notifier = SessionNotifier::new(token, id.clone(), &self.state);
        let handle = match self.backend.start(&url, notifier) {
            Ok(handle) => handle,
            Err(err) => {
                let mut state = self.state.lock();
                if !state.is_resolving(token) {
                    return Ok(PlayOutcome::Superseded);
                }

                warn!(item_id = %id, url = %url, error = %err, "Backend failed to start playback");
                let message = match err {
                    PlaybackError::Backend(message) => message,
                    other => other.to_string(),
                };
                state.phase = Phase::Idle;
                state.emit_error(id.clone(), PlaybackErrorKind::Acquisition, message.clone());
                state.emit_status();
                return Err(PlaybackError::Acquisition {
                    item_id: id.clone(),
                    message,
                });
            }
        };

        let mut state = self.state.lock();
        if !state.is_resolving(token) {
            let ended_itself = state.take_ended_in_start(token);
            drop(state);
            if ended_itself {
                debug!(item_id = %id, token = %token, "Session ended itself while starting");
            } else {
                debug!(item_id = %id, token = %token, "Session superseded while starting");
                let mut handle = handle;
                handle.release();
            }
            return Ok(PlayOutcome::Superseded);
        }

        state.phase = Phase::Playing(Session {
            item_id: id.clone(),
            token,
            handle,
        });
        state.emit(PlaybackEvent::SessionStarted {
            item_id: id.clone(),
            token,
        });
        state.emit_status();

        info!(item_id = %id, token = %token, url = %url, "Playback started");
        Ok(PlayOutcome::Started(token))
    }

    /// Stop whatever is playing or loading
    ///
    /// Returns the id of the item that was stopped. Calling it while idle is a
    /// no-op.
    pub fn request_stop(&self) -> Option<ItemId> {
        let mut state = self.state.lock();

        match state.take_phase() {
            Phase::Idle => None,
            Phase::Resolving { item_id, token } => {
                state.emit_ended(item_id.clone(), token, EndReason::Stopped);
                state.emit_status();
                debug!(item_id = %item_id, token = %token, "Cancelled pending request");
                Some(item_id)
            }
            Phase::Playing(session) => {
                let item_id = session.item_id.clone();
                state.emit_ended(item_id.clone(), session.token, EndReason::Stopped);
                state.emit_status();
                drop(state);

                info!(item_id = %item_id, "Playback stopped");
                session.release();
                Some(item_id)
            }
        }
    }

    // ===== State Queries =====

    /// Item currently sounding, if any
    pub fn currently_playing(&self) -> Option<ItemId> {
        self.state.lock().status().playing_item().cloned()
    }

    /// Full status, including the loading state
    pub fn status(&self) -> PlaybackStatus {
        self.state.lock().status()
    }

    /// Token of the current session or pending request
    pub fn active_token(&self) -> Option<SessionToken> {
        self.state.lock().phase.token()
    }

    // ===== Events =====

    /// Drain all pending events
    ///
    /// Returns all events emitted since the last drain. The presentation layer
    /// calls this after each request (and periodically) to refresh visuals and
    /// show transient error notifications.
    pub fn drain_events(&self) -> Vec<PlaybackEvent> {
        std::mem::take(&mut self.state.lock().pending_events)
    }

    /// Check if there are pending events
    pub fn has_pending_events(&self) -> bool {
        !self.state.lock().pending_events.is_empty()
    }
}

/// Keeps `loads_in_flight` balanced even if the load future is dropped
struct LoadInFlight<'a> {
    state: &'a SharedState,
}

impl<'a> LoadInFlight<'a> {
    fn begin(state: &'a SharedState) -> Self {
        state.lock().loads_in_flight += 1;
        Self { state }
    }
}

impl Drop for LoadInFlight<'_> {
    fn drop(&mut self) {
        self.state.lock().loads_in_flight -= 1;
    }
}

/// Clears a pending request whose future was dropped mid-resolution
///
/// Every completed path has already moved the phase off `Resolving(token)`,
/// so this only acts on cancellation. Must not be dropped with the lock held.
struct PendingRequest<'a> {
    state: &'a SharedState,
    token: SessionToken,
}

impl Drop for PendingRequest<'_> {
    fn drop(&mut self) {
        let mut state = self.state.lock();
        if !state.is_resolving(self.token) {
            return;
        }

        if let Phase::Resolving { item_id, token } = state.take_phase() {
            debug!(item_id = %item_id, token = %token, "Play request dropped while resolving");
            state.emit_ended(item_id, token, EndReason::Stopped);
            state.emit_status();
        }
    }
}

impl Drop for SinglePlaybackController {
    fn drop(&mut self) {
        let phase = self.state.lock().take_phase();
        if let Phase::Playing(session) = phase {
            session.release();
        }
    }
}
