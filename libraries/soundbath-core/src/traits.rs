/// Core traits for Soundbath
use crate::error::Result;
use crate::types::{Locator, PlayableItem};
use async_trait::async_trait;
use url::Url;

/// Source of playable audio items
///
/// Abstracts where the track listing lives (hosted backend, in-memory
/// fixture) and how a stored locator becomes a fetchable URL.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// List all playable items, most recently uploaded first
    async fn list(&self) -> Result<Vec<PlayableItem>>;

    /// Resolve a locator (storage path) to a playable URL
    ///
    /// # Errors
    /// Returns `SoundbathError::Resolution` if the locator cannot be resolved
    async fn resolve(&self, locator: &Locator) -> Result<Url>;
}
