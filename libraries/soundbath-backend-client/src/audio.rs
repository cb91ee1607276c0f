//! Audio catalog and track management.

use crate::client::BackendClient;
use crate::error::{BackendClientError, Result};
use crate::types::{NewAudioFile, RemoveObjects, UploadAudio};
use chrono::Utc;
use rand::Rng;
use reqwest::Method;
use soundbath_core::{PlayableItem, SoundbathError};
use std::path::Path;
use tracing::{debug, info, warn};

const AUDIO_FILES: &str = "/rest/v1/audio_files";
const OBJECT_PREFIX: &str = "audio";
const SUFFIX_LEN: usize = 6;

/// Audio client for the hosted backend.
pub struct AudioClient<'a> {
    client: &'a BackendClient,
}

impl<'a> AudioClient<'a> {
    pub(crate) fn new(client: &'a BackendClient) -> Self {
        Self { client }
    }

    /// List every published track, newest upload first.
    pub async fn list_audio_files(&self) -> Result<Vec<PlayableItem>> {
        let request = self.client.request(
            Method::GET,
            &format!("{AUDIO_FILES}?select=*&order=uploaded_at.desc"),
        );
        let response = self.client.send(request).await?;
        let items: Vec<PlayableItem> = BackendClient::json(response, "audio files").await?;

        debug!(tracks = items.len(), "Fetched audio files");
        Ok(items)
    }

    /// Upload a local audio file and publish it as a track.
    ///
    /// The object is stored first, then the row is inserted. If the insert
    /// fails the stored object is removed again and the insert error is
    /// returned.
    pub async fn upload_audio_file(&self, upload: &UploadAudio) -> Result<PlayableItem> {
        let uploaded_by = self.client.config().user_id.clone();
        self.client.require_token()?;

        let file_path = upload.file_path.as_path();
        if !file_path.exists() {
            return Err(BackendClientError::FileNotFound(
                file_path.display().to_string(),
            ));
        }

        let mime = audio_mime_type(file_path)?;
        let name = match upload.name.as_deref().map(str::trim) {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => file_stem(file_path),
        };
        let storage_path = object_path(file_path);

        let contents = tokio::fs::read(file_path).await?;
        let file_size = contents.len();

        debug!(file = %file_path.display(), path = %storage_path, size = file_size, "Uploading audio object");

        let bucket = self.client.bucket();
        let request = self
            .client
            .request(
                Method::POST,
                &format!("/storage/v1/object/{bucket}/{storage_path}"),
            )
            .header("content-type", mime)
            .header("cache-control", "max-age=3600")
            .body(contents);
        self.client.send(request).await?;

        let row = NewAudioFile {
            name: &name,
            description: upload.description.as_deref(),
            storage_path: &storage_path,
            uploaded_by: uploaded_by.as_deref(),
        };
        let inserted = self.insert_row(&row).await;

        match inserted {
            Ok(item) => {
                info!(
                    item_id = %item.id,
                    name = %item.name,
                    path = %storage_path,
                    size = file_size,
                    "Audio file uploaded"
                );
                Ok(item)
            }
            Err(err) => {
                warn!(path = %storage_path, error = %err, "Row insert failed, removing uploaded object");
                if let Err(cleanup) = self.remove_object(&storage_path).await {
                    warn!(path = %storage_path, error = %cleanup, "Failed to remove orphaned object");
                }
                Err(err)
            }
        }
    }

    /// Delete a track: its row first, then its stored object.
    ///
    /// A failing object removal is logged and does not fail the call.
    pub async fn delete_audio_file(&self, item: &PlayableItem) -> Result<()> {
        self.client.require_token()?;

        let request = self
            .client
            .request(Method::DELETE, AUDIO_FILES)
            .query(&[("id", format!("eq.{}", item.id))]);
        self.client.send(request).await?;

        if let Err(err) = self.remove_object(item.locator.as_str()).await {
            warn!(item_id = %item.id, path = %item.locator, error = %err, "Row deleted but object removal failed");
        }

        info!(item_id = %item.id, name = %item.name, "Audio file deleted");
        Ok(())
    }

    async fn insert_row(&self, row: &NewAudioFile<'_>) -> Result<PlayableItem> {
        let request = self
            .client
            .request(Method::POST, AUDIO_FILES)
            .header("prefer", "return=representation")
            .json(row);
        let response = self.client.send(request).await?;

        let mut rows: Vec<PlayableItem> = BackendClient::json(response, "inserted row").await?;
        if rows.is_empty() {
            return Err(BackendClientError::ParseError(
                "insert returned no rows".to_string(),
            ));
        }
        Ok(rows.swap_remove(0))
    }

    async fn remove_object(&self, path: &str) -> Result<()> {
        let bucket = self.client.bucket();
        let request = self
            .client
            .request(Method::DELETE, &format!("/storage/v1/object/{bucket}"))
            .json(&RemoveObjects { prefixes: [path] });
        self.client.send(request).await?;

        debug!(path = %path, "Removed audio object");
        Ok(())
    }
}

/// MIME type of an audio file, by extension.
fn audio_mime_type(path: &Path) -> Result<String> {
    match mime_guess::from_path(path).first() {
        Some(mime) if mime.type_() == mime_guess::mime::AUDIO => Ok(mime.essence_str().to_string()),
        _ => Err(SoundbathError::invalid_input(format!(
            "{} is not an audio file",
            path.display()
        ))
        .into()),
    }
}

fn file_stem(path: &Path) -> String {
    path.file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("track")
        .to_string()
}

/// Storage path for a new object: `audio/{unix_millis}-{random}.{ext}`
fn object_path(path: &Path) -> String {
    let suffix: String = {
        let mut rng = rand::thread_rng();
        (0..SUFFIX_LEN)
            .filter_map(|_| std::char::from_digit(rng.gen_range(0..36), 36))
            .collect()
    };

    let millis = Utc::now().timestamp_millis();
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) => format!("{OBJECT_PREFIX}/{millis}-{suffix}.{ext}"),
        None => format!("{OBJECT_PREFIX}/{millis}-{suffix}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mime_types() {
        assert_eq!(audio_mime_type(Path::new("bowl.mp3")).unwrap(), "audio/mpeg");
        assert!(audio_mime_type(Path::new("bowl.flac")).unwrap().starts_with("audio/"));
        assert!(audio_mime_type(Path::new("notes.txt")).is_err());
        assert!(audio_mime_type(Path::new("no-extension")).is_err());
    }

    #[test]
    fn object_path_shape() {
        let path = object_path(Path::new("/tmp/Crystal Bowl.mp3"));

        let rest = path.strip_prefix("audio/").expect("audio prefix");
        let (stem, ext) = rest.rsplit_once('.').expect("extension");
        assert_eq!(ext, "mp3");

        let (millis, suffix) = stem.split_once('-').expect("separator");
        assert!(millis.parse::<i64>().is_ok());
        assert_eq!(suffix.len(), SUFFIX_LEN);
        assert!(suffix.chars().all(|c| c.is_ascii_digit() || c.is_ascii_lowercase()));
    }

    #[test]
    fn object_paths_differ() {
        let a = object_path(Path::new("a.mp3"));
        let b = object_path(Path::new("a.mp3"));
        assert_ne!(a, b);
    }

    #[test]
    fn name_defaults_to_stem() {
        assert_eq!(file_stem(Path::new("/music/Singing Bowl.flac")), "Singing Bowl");
    }
}
