/// Playable item domain type
use super::ids::{ItemId, Locator};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// An uploaded healing audio track
///
/// Field names on the wire follow the backend's `audio_files` table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayableItem {
    /// Unique item identifier
    pub id: ItemId,

    /// Display name
    pub name: String,

    /// Optional short description shown under the name
    #[serde(default)]
    pub description: Option<String>,

    /// Storage path of the audio object
    #[serde(rename = "storage_path")]
    pub locator: Locator,

    /// Id of the admin who uploaded the file
    #[serde(default)]
    pub uploaded_by: Option<String>,

    /// Upload timestamp
    pub uploaded_at: DateTime<Utc>,
}

impl PlayableItem {
    /// Create a new item with a generated id, uploaded now
    pub fn new(name: impl Into<String>, locator: impl Into<String>) -> Self {
        Self {
            id: ItemId::generate(),
            name: name.into(),
            description: None,
            locator: Locator::new(locator),
            uploaded_by: None,
            uploaded_at: Utc::now(),
        }
    }

    /// Replace the generated id
    pub fn with_id(mut self, id: impl Into<ItemId>) -> Self {
        self.id = id.into();
        self
    }

    /// Attach a description
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Override the upload timestamp
    pub fn uploaded_at(mut self, at: DateTime<Utc>) -> Self {
        self.uploaded_at = at;
        self
    }
}
