//! Catalog helpers
//!
//! Public object URL construction and an in-process `CatalogSource`.

use crate::error::{Result, SoundbathError};
use crate::traits::CatalogSource;
use crate::types::{Locator, PlayableItem};
use async_trait::async_trait;
use url::Url;

/// Build the public URL of an object in a storage bucket
///
/// The result has the form `{base}/storage/v1/object/public/{bucket}/{locator}`
/// with every locator segment percent-encoded.
///
/// # Errors
/// Returns `SoundbathError::Resolution` for empty or absolute locators and for
/// locators containing empty, `.` or `..` segments.
pub fn public_object_url(base: &Url, bucket: &str, locator: &Locator) -> Result<Url> {
    let raw = locator.as_str();
    if raw.trim().is_empty() {
        return Err(SoundbathError::resolution(raw, "locator is empty"));
    }
    if raw.starts_with('/') {
        return Err(SoundbathError::resolution(raw, "locator must be relative"));
    }
    if bucket.is_empty() || bucket.contains('/') {
        return Err(SoundbathError::resolution(
            raw,
            format!("invalid bucket name '{bucket}'"),
        ));
    }

    let segments: Vec<&str> = raw.split('/').collect();
    if segments
        .iter()
        .any(|segment| segment.is_empty() || *segment == "." || *segment == "..")
    {
        return Err(SoundbathError::resolution(
            raw,
            "locator contains an empty or relative segment",
        ));
    }

    let mut url = base.clone();
    {
        let mut path = url
            .path_segments_mut()
            .map_err(|()| SoundbathError::resolution(raw, "backend URL cannot be a base"))?;
        path.pop_if_empty()
            .extend(["storage", "v1", "object", "public", bucket])
            .extend(segments);
    }
    Ok(url)
}

/// In-memory catalog
///
/// Serves a fixed set of items and resolves locators against a public
/// storage bucket URL. Used for demos, fixtures, and offline front ends.
#[derive(Debug, Clone)]
pub struct MemoryCatalog {
    base_url: Url,
    bucket: String,
    items: Vec<PlayableItem>,
}

impl MemoryCatalog {
    /// Create an empty catalog resolving into `bucket` on `base_url`
    pub fn new(base_url: &str, bucket: impl Into<String>) -> Result<Self> {
        let base_url = Url::parse(base_url).map_err(|e| {
            SoundbathError::invalid_input(format!("invalid base URL '{base_url}': {e}"))
        })?;

        Ok(Self {
            base_url,
            bucket: bucket.into(),
            items: Vec::new(),
        })
    }

    /// Add an item (builder style)
    pub fn with_item(mut self, item: PlayableItem) -> Self {
        self.insert(item);
        self
    }

    /// Add or replace an item
    pub fn insert(&mut self, item: PlayableItem) {
        self.items.retain(|existing| existing.id != item.id);
        self.items.push(item);
    }

    /// Remove an item by locator, returning it if present
    pub fn remove(&mut self, locator: &Locator) -> Option<PlayableItem> {
        let index = self.items.iter().position(|item| &item.locator == locator)?;
        Some(self.items.remove(index))
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// Whether the catalog has no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }
}

#[async_trait]
impl CatalogSource for MemoryCatalog {
    async fn list(&self) -> Result<Vec<PlayableItem>> {
        let mut items = self.items.clone();
        items.sort_by(|a, b| b.uploaded_at.cmp(&a.uploaded_at));
        Ok(items)
    }

    async fn resolve(&self, locator: &Locator) -> Result<Url> {
        public_object_url(&self.base_url, &self.bucket, locator)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, Utc};

    fn base() -> Url {
        Url::parse("https://project.backend.example").unwrap()
    }

    #[test]
    fn builds_public_url() {
        let url = public_object_url(&base(), "audio-files", &Locator::new("audio/a.mp3")).unwrap();
        assert_eq!(
            url.as_str(),
            "https://project.backend.example/storage/v1/object/public/audio-files/audio/a.mp3"
        );
    }

    #[test]
    fn trailing_slash_on_base_is_ignored() {
        let base = Url::parse("https://project.backend.example/").unwrap();
        let url = public_object_url(&base, "audio-files", &Locator::new("a.mp3")).unwrap();
        assert_eq!(url.path(), "/storage/v1/object/public/audio-files/a.mp3");
    }

    #[test]
    fn segments_are_percent_encoded() {
        let url =
            public_object_url(&base(), "audio-files", &Locator::new("audio/rain & bowls.mp3"))
                .unwrap();
        assert!(url.path().ends_with("/audio/rain%20&%20bowls.mp3"));
    }

    #[test]
    fn rejects_bad_locators() {
        for bad in ["", "   ", "/audio/a.mp3", "audio//a.mp3", "audio/../secret", "./a.mp3"] {
            let err = public_object_url(&base(), "audio-files", &Locator::new(bad)).unwrap_err();
            assert!(err.is_resolution(), "expected resolution error for {bad:?}");
        }
    }

    #[tokio::test]
    async fn memory_catalog_lists_newest_first() {
        let now = Utc::now();
        let catalog = MemoryCatalog::new("https://project.backend.example", "audio-files")
            .unwrap()
            .with_item(PlayableItem::new("old", "audio/old.mp3").uploaded_at(now - Duration::days(2)))
            .with_item(PlayableItem::new("new", "audio/new.mp3").uploaded_at(now))
            .with_item(PlayableItem::new("mid", "audio/mid.mp3").uploaded_at(now - Duration::days(1)));

        let names: Vec<String> = catalog
            .list()
            .await
            .unwrap()
            .into_iter()
            .map(|item| item.name)
            .collect();
        assert_eq!(names, vec!["new", "mid", "old"]);
    }

    #[tokio::test]
    async fn memory_catalog_insert_replaces_same_id() {
        let mut catalog = MemoryCatalog::new("https://project.backend.example", "audio-files").unwrap();
        catalog.insert(PlayableItem::new("first", "audio/1.mp3").with_id("a"));
        catalog.insert(PlayableItem::new("second", "audio/2.mp3").with_id("a"));

        assert_eq!(catalog.len(), 1);
        assert_eq!(catalog.list().await.unwrap()[0].name, "second");

        assert!(catalog.remove(&Locator::new("audio/2.mp3")).is_some());
        assert!(catalog.is_empty());
    }
}
