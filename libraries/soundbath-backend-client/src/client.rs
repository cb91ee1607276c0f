//! Main Soundbath backend client.

use crate::appointments::AppointmentClient;
use crate::audio::AudioClient;
use crate::error::{BackendClientError, Result};
use crate::types::BackendConfig;
use async_trait::async_trait;
use reqwest::{Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use soundbath_core::{public_object_url, CatalogSource, Locator, PlayableItem, SoundbathError};
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Client for the hosted backend: REST rows plus object storage.
///
/// Anonymous calls (track listing, booking) use the anon key. Admin calls
/// need an access token in the config and fail with `AuthRequired` without
/// one, before any request is sent.
///
/// # Example
///
/// ```ignore
/// use soundbath_backend_client::{BackendClient, BackendConfig};
///
/// let client = BackendClient::new(BackendConfig::new("https://abc.example.co", "anon-key"))?;
/// let tracks = client.audio().list_audio_files().await?;
/// println!("Found {} tracks", tracks.len());
/// ```
pub struct BackendClient {
    http: Client,
    config: BackendConfig,
    base_url: Url,
}

impl BackendClient {
    /// Create a new client with the given configuration.
    pub fn new(config: BackendConfig) -> Result<Self> {
        if config.url.is_empty() {
            return Err(BackendClientError::InvalidUrl("URL cannot be empty".into()));
        }

        let url = config.url.trim_end_matches('/').to_string();
        if !url.starts_with("http://") && !url.starts_with("https://") {
            return Err(BackendClientError::InvalidUrl(
                "URL must start with http:// or https://".into(),
            ));
        }
        let base_url =
            Url::parse(&url).map_err(|e| BackendClientError::InvalidUrl(e.to_string()))?;

        if config.anon_key.trim().is_empty() {
            return Err(SoundbathError::invalid_input("anon key cannot be empty").into());
        }

        let http = Client::builder()
            .timeout(Duration::from_secs(30))
            .connect_timeout(Duration::from_secs(10))
            .user_agent(format!("Soundbath/{}", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            config: BackendConfig { url, ..config },
            base_url,
        })
    }

    /// Get the normalized backend URL.
    pub fn url(&self) -> &str {
        &self.config.url
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &BackendConfig {
        &self.config
    }

    /// Check if the client carries an admin access token.
    pub fn is_authenticated(&self) -> bool {
        self.config.access_token.is_some()
    }

    /// Audio catalog and track management.
    pub fn audio(&self) -> AudioClient<'_> {
        AudioClient::new(self)
    }

    /// Appointment booking and management.
    pub fn appointments(&self) -> AppointmentClient<'_> {
        AppointmentClient::new(self)
    }

    /// Public URL of a stored audio object.
    pub fn public_url(&self, locator: &Locator) -> soundbath_core::Result<Url> {
        public_object_url(&self.base_url, &self.config.audio_bucket, locator)
    }

    // ===== Request plumbing shared by the sub-clients =====

    pub(crate) fn bucket(&self) -> &str {
        &self.config.audio_bucket
    }

    /// Access token for admin calls.
    pub(crate) fn require_token(&self) -> Result<&str> {
        self.config
            .access_token
            .as_deref()
            .ok_or(BackendClientError::AuthRequired)
    }

    /// Build a request carrying the api key and bearer token.
    pub(crate) fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.config.url, path);
        debug!(method = %method, url = %url, "Backend request");

        let bearer = self
            .config
            .access_token
            .as_deref()
            .unwrap_or(&self.config.anon_key);

        self.http
            .request(method, url)
            .header("apikey", &self.config.anon_key)
            .bearer_auth(bearer)
    }

    /// Send a request and map non-2xx responses to errors.
    pub(crate) async fn send(&self, request: RequestBuilder) -> Result<Response> {
        let response = request
            .send()
            .await
            .map_err(BackendClientError::from_transport)?;

        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let error_text = response.text().await.unwrap_or_default();
        match status.as_u16() {
            401 | 403 => Err(BackendClientError::AuthFailed(error_text)),
            code => Err(BackendClientError::ServerError {
                status: code,
                message: error_text,
            }),
        }
    }

    /// Decode a JSON response body.
    pub(crate) async fn json<T: DeserializeOwned>(response: Response, what: &str) -> Result<T> {
        response.json().await.map_err(|e| {
            BackendClientError::ParseError(format!("Failed to parse {}: {}", what, e))
        })
    }
}

#[async_trait]
impl CatalogSource for BackendClient {
    async fn list(&self) -> soundbath_core::Result<Vec<PlayableItem>> {
        Ok(self.audio().list_audio_files().await?)
    }

    async fn resolve(&self, locator: &Locator) -> soundbath_core::Result<Url> {
        self.public_url(locator)
    }
}
