//! Soundbath Backend Client
//!
//! HTTP client library for the hosted backend behind the Soundbath site:
//! REST access to the `audio_files` and `appointments` tables plus object
//! storage for the audio itself.
//!
//! # Features
//!
//! - **Catalog**: list published tracks, resolve public object URLs
//!   (implements `CatalogSource`)
//! - **Track management**: upload with rollback on failed insert, delete
//! - **Appointments**: book, list, change status, delete
//!
//! # Example
//!
//! ```ignore
//! use soundbath_backend_client::{BackendClient, BackendConfig};
//! use soundbath_core::NewAppointment;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = BackendConfig::new("https://abc.example.co", "anon-key");
//!     let client = BackendClient::new(config)?;
//!
//!     for track in client.audio().list_audio_files().await? {
//!         println!("{} -> {}", track.name, client.public_url(&track.locator)?);
//!     }
//!
//!     let request = NewAppointment::new("moon", "138 0000 0000", "30-minute sound bath", "2026-11-02T19:30");
//!     client.appointments().book_appointment(&request).await?;
//!
//!     Ok(())
//! }
//! ```

mod appointments;
mod audio;
mod client;
mod error;
mod types;

// Re-export main types
pub use client::BackendClient;
pub use error::{BackendClientError, Result};
pub use types::{BackendConfig, UploadAudio, DEFAULT_AUDIO_BUCKET};

// Re-export sub-clients for direct use if needed
pub use appointments::AppointmentClient;
pub use audio::AudioClient;
