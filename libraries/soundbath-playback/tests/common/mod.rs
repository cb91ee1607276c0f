//! Test doubles shared by the playback integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use parking_lot::Mutex;
use soundbath_core::{
    public_object_url, CatalogSource, ItemId, Locator, PlayableItem, Result as CoreResult,
    SoundbathError,
};
use soundbath_playback::{
    PlaybackBackend, PlaybackError, PlaybackHandle, Result, SessionNotifier,
    SinglePlaybackController,
};
use std::collections::{HashMap, HashSet};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tokio::sync::Notify;
use url::Url;

pub const BASE_URL: &str = "https://backend.example.com";
pub const BUCKET: &str = "audio-files";

pub fn item(id: &str) -> PlayableItem {
    PlayableItem::new(format!("Track {}", id.to_uppercase()), format!("audio/{id}.mp3")).with_id(id)
}

pub fn id(value: &str) -> ItemId {
    ItemId::new(value)
}

/// Catalog whose resolution can be made to fail or to wait on a gate
#[derive(Default)]
pub struct ScriptedCatalog {
    items: Vec<PlayableItem>,
    failing: HashSet<String>,
    gates: HashMap<String, Arc<Notify>>,
    list_gate: Option<Arc<Notify>>,
    pub resolve_calls: AtomicUsize,
}

impl ScriptedCatalog {
    pub fn with_items(ids: &[&str]) -> Self {
        Self {
            items: ids.iter().map(|value| item(value)).collect(),
            ..Self::default()
        }
    }

    /// Resolution of `id` fails
    pub fn failing(mut self, id: &str) -> Self {
        self.failing.insert(format!("audio/{id}.mp3"));
        self
    }

    /// Resolution of `id` waits until the returned gate is notified
    pub fn gated(&mut self, id: &str) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.gates.insert(format!("audio/{id}.mp3"), Arc::clone(&gate));
        gate
    }

    /// Listing waits until the returned gate is notified
    pub fn gated_list(&mut self) -> Arc<Notify> {
        let gate = Arc::new(Notify::new());
        self.list_gate = Some(Arc::clone(&gate));
        gate
    }
}

#[async_trait]
impl CatalogSource for ScriptedCatalog {
    async fn list(&self) -> CoreResult<Vec<PlayableItem>> {
        if let Some(gate) = &self.list_gate {
            gate.notified().await;
        }
        Ok(self.items.clone())
    }

    async fn resolve(&self, locator: &Locator) -> CoreResult<Url> {
        self.resolve_calls.fetch_add(1, Ordering::SeqCst);

        if let Some(gate) = self.gates.get(locator.as_str()) {
            gate.notified().await;
        }

        if self.failing.contains(locator.as_str()) {
            return Err(SoundbathError::resolution(locator.as_str(), "object missing"));
        }

        let base = Url::parse(BASE_URL).map_err(|e| SoundbathError::invalid_input(e.to_string()))?;
        public_object_url(&base, BUCKET, locator)
    }
}

/// One handle handed out by the recording backend
pub struct StartedSession {
    pub item_id: ItemId,
    pub url: Url,
    pub notifier: SessionNotifier,
    pub released: Arc<AtomicUsize>,
}

impl StartedSession {
    pub fn release_count(&self) -> usize {
        self.released.load(Ordering::SeqCst)
    }
}

struct RecordedHandle {
    released: Arc<AtomicUsize>,
}

impl PlaybackHandle for RecordedHandle {
    fn release(&mut self) {
        self.released.fetch_add(1, Ordering::SeqCst);
    }
}

/// How the backend reacts inside `start`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StartBehavior {
    Succeed,
    Refuse,
    FailImmediately,
}

/// Backend that records every session it starts
pub struct RecordingBackend {
    behavior: Mutex<StartBehavior>,
    sessions: Mutex<Vec<Arc<StartedSession>>>,
}

impl Default for RecordingBackend {
    fn default() -> Self {
        Self {
            behavior: Mutex::new(StartBehavior::Succeed),
            sessions: Mutex::new(Vec::new()),
        }
    }
}

impl RecordingBackend {
    pub fn set_behavior(&self, behavior: StartBehavior) {
        *self.behavior.lock() = behavior;
    }

    pub fn sessions(&self) -> Vec<Arc<StartedSession>> {
        self.sessions.lock().clone()
    }

    pub fn last(&self) -> Option<Arc<StartedSession>> {
        self.sessions.lock().last().cloned()
    }

    pub fn started_count(&self) -> usize {
        self.sessions.lock().len()
    }
}

impl PlaybackBackend for RecordingBackend {
    fn start(&self, url: &Url, notifier: SessionNotifier) -> Result<Box<dyn PlaybackHandle>> {
        let behavior = *self.behavior.lock();
        if behavior == StartBehavior::Refuse {
            return Err(PlaybackError::backend("unsupported codec"));
        }

        let released = Arc::new(AtomicUsize::new(0));
        let session = Arc::new(StartedSession {
            item_id: notifier.item_id().clone(),
            url: url.clone(),
            notifier: notifier.clone(),
            released: Arc::clone(&released),
        });
        self.sessions.lock().push(session);

        if behavior == StartBehavior::FailImmediately {
            notifier.failed("decoder error");
        }

        Ok(Box::new(RecordedHandle { released }))
    }
}

pub struct Harness {
    pub catalog: Arc<ScriptedCatalog>,
    pub backend: Arc<RecordingBackend>,
    pub controller: Arc<SinglePlaybackController>,
}

/// Controller over `catalog` with nothing loaded yet
pub fn unloaded_harness(catalog: ScriptedCatalog) -> Harness {
    let catalog = Arc::new(catalog);
    let backend = Arc::new(RecordingBackend::default());
    let controller = Arc::new(SinglePlaybackController::new(
        Arc::clone(&catalog) as Arc<dyn CatalogSource>,
        Arc::clone(&backend) as Arc<dyn PlaybackBackend>,
    ));

    Harness {
        catalog,
        backend,
        controller,
    }
}

/// Controller over `catalog` with its snapshot already loaded
pub async fn harness(catalog: ScriptedCatalog) -> Harness {
    let h = unloaded_harness(catalog);
    h.controller
        .load_catalog()
        .await
        .expect("scripted catalog always lists");
    h.controller.drain_events();
    h
}
