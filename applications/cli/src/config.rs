/// CLI configuration
use crate::error::{CliError, Result};
use serde::{Deserialize, Serialize};
use soundbath_backend_client::{BackendConfig, DEFAULT_AUDIO_BUCKET};
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Config file picked up from the working directory when `--config` is absent
pub const DEFAULT_CONFIG_FILE: &str = "soundbath.toml";

/// Prefix of overriding environment variables (`SOUNDBATH__BACKEND__URL`)
pub const ENV_PREFIX: &str = "SOUNDBATH";

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct CliConfig {
    #[serde(default)]
    pub backend: BackendSettings,

    #[serde(default)]
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct BackendSettings {
    #[serde(default)]
    pub url: String,

    #[serde(default)]
    pub anon_key: String,

    #[serde(default)]
    pub access_token: Option<String>,

    #[serde(default)]
    pub user_id: Option<String>,

    #[serde(default = "default_audio_bucket")]
    pub audio_bucket: String,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LoggingSettings {
    #[serde(default = "default_filter")]
    pub filter: String,
}

impl CliConfig {
    /// Load configuration from file and environment
    ///
    /// An explicit `path` must exist; otherwise `soundbath.toml` is read when
    /// present.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        Self::load_with_env(path, None)
    }

    /// Like [`CliConfig::load`], reading overrides from `env` instead of the
    /// process environment when given
    pub fn load_with_env(path: Option<&Path>, env: Option<HashMap<String, String>>) -> Result<Self> {
        let mut settings = config::Config::builder();

        match path {
            Some(path) => {
                if !path.exists() {
                    return Err(CliError::Config(format!(
                        "config file not found: {}",
                        path.display()
                    )));
                }
                settings = settings.add_source(config::File::from(path.to_path_buf()));
            }
            None => {
                let default_path = PathBuf::from(DEFAULT_CONFIG_FILE);
                if default_path.exists() {
                    settings = settings.add_source(config::File::from(default_path));
                }
            }
        }

        settings = settings.add_source(
            config::Environment::with_prefix(ENV_PREFIX)
                .prefix_separator("__")
                .separator("__")
                .source(env),
        );

        let config = settings.build()?;
        Ok(config.try_deserialize()?)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        if self.backend.url.trim().is_empty() {
            return Err(CliError::Config(
                "backend URL is required (set SOUNDBATH__BACKEND__URL)".to_string(),
            ));
        }

        if self.backend.anon_key.trim().is_empty() {
            return Err(CliError::Config(
                "backend anon key is required (set SOUNDBATH__BACKEND__ANON_KEY)".to_string(),
            ));
        }

        Ok(())
    }

    /// Client configuration for the backend section
    pub fn backend_config(&self) -> BackendConfig {
        let backend = &self.backend;
        let mut config = BackendConfig::new(backend.url.trim(), backend.anon_key.trim())
            .with_bucket(backend.audio_bucket.clone());

        if let Some(token) = backend.access_token.as_deref().filter(|t| !t.is_empty()) {
            config = config.with_session(token, backend.user_id.clone());
        }
        config
    }
}

// Default values
fn default_audio_bucket() -> String {
    DEFAULT_AUDIO_BUCKET.to_string()
}

fn default_filter() -> String {
    "soundbath_cli=info,soundbath_backend_client=info".to_string()
}

impl Default for BackendSettings {
    fn default() -> Self {
        Self {
            url: String::new(),
            anon_key: String::new(),
            access_token: None,
            user_id: None,
            audio_bucket: default_audio_bucket(),
        }
    }
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            filter: default_filter(),
        }
    }
}
