//! Session bookkeeping shared between the controller and its notifiers

use crate::backend::PlaybackHandle;
use crate::error::PlaybackErrorKind;
use crate::events::PlaybackEvent;
use crate::types::{EndReason, PlaybackStatus, SessionToken};
use parking_lot::Mutex;
use soundbath_core::{ItemId, PlayableItem};
use std::fmt;
use std::sync::{Arc, Weak};
use tracing::{debug, warn};

/// The one sounding item and its handle
pub(crate) struct Session {
    pub(crate) item_id: ItemId,
    pub(crate) token: SessionToken,
    pub(crate) handle: Box<dyn PlaybackHandle>,
}

impl Session {
    /// Release the handle. Must be called without the state lock held.
    pub(crate) fn release(mut self) {
        debug!(item_id = %self.item_id, token = %self.token, "Releasing playback handle");
        self.handle.release();
    }
}

pub(crate) enum Phase {
    Idle,
    Resolving { item_id: ItemId, token: SessionToken },
    Playing(Session),
}

impl Phase {
    pub(crate) fn token(&self) -> Option<SessionToken> {
        match self {
            Phase::Idle => None,
            Phase::Resolving { token, .. } => Some(*token),
            Phase::Playing(session) => Some(session.token),
        }
    }
}

/// How a handle finished on its own
pub(crate) enum SessionOutcome {
    Completed,
    Failed(String),
}

pub(crate) struct ControllerState {
    pub(crate) phase: Phase,
    last_token: u64,
    pub(crate) items: Vec<PlayableItem>,
    pub(crate) loads_in_flight: usize,
    pub(crate) pending_events: Vec<PlaybackEvent>,
    /// Session whose own notifier ended it before `start` returned
    ended_in_start: Option<SessionToken>,
}

pub(crate) type SharedState = Arc<Mutex<ControllerState>>;

impl ControllerState {
    pub(crate) fn new() -> Self {
        Self {
            phase: Phase::Idle,
            last_token: 0,
            items: Vec::new(),
            loads_in_flight: 0,
            pending_events: Vec::new(),
            ended_in_start: None,
        }
    }

    pub(crate) fn next_token(&mut self) -> SessionToken {
        self.last_token += 1;
        SessionToken::new(self.last_token)
    }

    pub(crate) fn status(&self) -> PlaybackStatus {
        match &self.phase {
            Phase::Idle => PlaybackStatus::Idle,
            Phase::Resolving { item_id, .. } => PlaybackStatus::Loading(item_id.clone()),
            Phase::Playing(session) => PlaybackStatus::Playing(session.item_id.clone()),
        }
    }

    /// Whether `token` still owns the pending request
    pub(crate) fn is_resolving(&self, token: SessionToken) -> bool {
        matches!(&self.phase, Phase::Resolving { token: current, .. } if *current == token)
    }

    /// Whether `token` ended itself from inside `PlaybackBackend::start`
    pub(crate) fn take_ended_in_start(&mut self, token: SessionToken) -> bool {
        if self.ended_in_start == Some(token) {
            self.ended_in_start = None;
            true
        } else {
            false
        }
    }

    pub(crate) fn take_phase(&mut self) -> Phase {
        std::mem::replace(&mut self.phase, Phase::Idle)
    }

    pub(crate) fn emit(&mut self, event: PlaybackEvent) {
        self.pending_events.push(event);
    }

    pub(crate) fn emit_status(&mut self) {
        let status = self.status();
        self.emit(PlaybackEvent::StatusChanged { status });
    }

    pub(crate) fn emit_ended(&mut self, item_id: ItemId, token: SessionToken, reason: EndReason) {
        self.emit(PlaybackEvent::SessionEnded {
            item_id,
            token,
            reason,
        });
    }

    pub(crate) fn emit_error(&mut self, item_id: ItemId, kind: PlaybackErrorKind, message: String) {
        self.emit(PlaybackEvent::Error {
            item_id,
            kind,
            message,
        });
    }

    /// Apply a completion or failure reported for `token`
    ///
    /// Returns the ended phase (to be dropped outside the lock) when `token`
    /// is current, `None` for stale reports.
    fn end_session(&mut self, token: SessionToken, outcome: SessionOutcome) -> Option<Phase> {
        if self.phase.token() != Some(token) {
            return None;
        }

        let ended = self.take_phase();
        let item_id = match &ended {
            Phase::Resolving { item_id, .. } => {
                self.ended_in_start = Some(token);
                item_id.clone()
            }
            Phase::Playing(session) => session.item_id.clone(),
            Phase::Idle => return None,
        };

        let reason = match outcome {
            SessionOutcome::Completed => EndReason::Completed,
            SessionOutcome::Failed(message) => {
                warn!(item_id = %item_id, token = %token, error = %message, "Playback failed");
                self.emit_error(item_id.clone(), PlaybackErrorKind::Playback, message);
                EndReason::Failed
            }
        };
        self.emit_ended(item_id, token, reason);
        self.emit_status();

        Some(ended)
    }
}

/// Callback capability handed to a backend for one session
///
/// Reports completion or failure of the session it was created for. Reports
/// for a session that has since been stopped or superseded are ignored.
#[derive(Clone)]
pub struct SessionNotifier {
    token: SessionToken,
    item_id: ItemId,
    state: Weak<Mutex<ControllerState>>,
}

impl SessionNotifier {
    pub(crate) fn new(token: SessionToken, item_id: ItemId, state: &SharedState) -> Self {
        Self {
            token,
            item_id,
            state: Arc::downgrade(state),
        }
    }

    /// Token of the session this notifier belongs to
    pub fn token(&self) -> SessionToken {
        self.token
    }

    /// Item this notifier belongs to
    pub fn item_id(&self) -> &ItemId {
        &self.item_id
    }

    /// Report that playback reached the end
    ///
    /// Returns true if the report changed controller state.
    pub fn completed(&self) -> bool {
        self.signal(SessionOutcome::Completed)
    }

    /// Report that playback failed
    ///
    /// Returns true if the report changed controller state.
    pub fn failed(&self, message: impl Into<String>) -> bool {
        self.signal(SessionOutcome::Failed(message.into()))
    }

    fn signal(&self, outcome: SessionOutcome) -> bool {
        let Some(state) = self.state.upgrade() else {
            return false;
        };

        let ended = state.lock().end_session(self.token, outcome);
        match ended {
            Some(phase) => {
                debug!(item_id = %self.item_id, token = %self.token, "Session ended by backend");
                drop(phase);
                true
            }
            None => {
                debug!(item_id = %self.item_id, token = %self.token, "Ignoring stale session report");
                false
            }
        }
    }
}

impl fmt::Debug for SessionNotifier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionNotifier")
            .field("token", &self.token)
            .field("item_id", &self.item_id)
            .finish_non_exhaustive()
    }
}
