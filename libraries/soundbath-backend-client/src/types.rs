//! Types for backend requests and responses.

use serde::{Deserialize, Serialize};
use soundbath_core::AppointmentStatus;
use std::path::PathBuf;

/// Default storage bucket holding the audio objects.
pub const DEFAULT_AUDIO_BUCKET: &str = "audio-files";

fn default_audio_bucket() -> String {
    DEFAULT_AUDIO_BUCKET.to_string()
}

/// Configuration for connecting to the hosted backend.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BackendConfig {
    /// Base URL of the project (e.g., "https://abc.example.co")
    pub url: String,
    /// Public (anonymous) API key
    pub anon_key: String,
    /// Access token of a signed-in admin, required for management calls
    #[serde(default)]
    pub access_token: Option<String>,
    /// Id of the signed-in admin, recorded as `uploaded_by`
    #[serde(default)]
    pub user_id: Option<String>,
    /// Bucket holding the audio objects
    #[serde(default = "default_audio_bucket")]
    pub audio_bucket: String,
}

impl BackendConfig {
    /// Create an anonymous config.
    pub fn new(url: impl Into<String>, anon_key: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            anon_key: anon_key.into(),
            access_token: None,
            user_id: None,
            audio_bucket: default_audio_bucket(),
        }
    }

    /// Attach an admin session.
    pub fn with_session(mut self, access_token: impl Into<String>, user_id: Option<String>) -> Self {
        self.access_token = Some(access_token.into());
        self.user_id = user_id;
        self
    }

    /// Use a different audio bucket.
    pub fn with_bucket(mut self, bucket: impl Into<String>) -> Self {
        self.audio_bucket = bucket.into();
        self
    }

    /// Anon key shortened for display: first 20 characters, `...` and the length.
    pub fn redacted_key(&self) -> String {
        let prefix: String = self.anon_key.chars().take(20).collect();
        format!("{prefix}... ({} chars)", self.anon_key.chars().count())
    }
}

// =============================================================================
// Audio Types
// =============================================================================

/// Local file to publish as a new track.
#[derive(Debug, Clone)]
pub struct UploadAudio {
    pub file_path: PathBuf,
    /// Display name (defaults to the file stem)
    pub name: Option<String>,
    pub description: Option<String>,
}

impl UploadAudio {
    pub fn new(file_path: impl Into<PathBuf>) -> Self {
        Self {
            file_path: file_path.into(),
            name: None,
            description: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

/// Row inserted into `audio_files` after the object upload.
#[derive(Debug, Serialize)]
pub(crate) struct NewAudioFile<'a> {
    pub name: &'a str,
    pub description: Option<&'a str>,
    pub storage_path: &'a str,
    pub uploaded_by: Option<&'a str>,
}

/// Body of a storage object removal.
#[derive(Debug, Serialize)]
pub(crate) struct RemoveObjects<'a> {
    pub prefixes: [&'a str; 1],
}

// =============================================================================
// Appointment Types
// =============================================================================

/// Body of a status update.
#[derive(Debug, Serialize)]
pub(crate) struct StatusUpdate {
    pub status: AppointmentStatus,
}
