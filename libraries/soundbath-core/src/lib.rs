//! Soundbath Core
//!
//! Platform-agnostic types, traits, and error handling shared by every
//! Soundbath crate.
//!
//! # Architecture
//!
//! The core crate defines:
//! - **Domain Types**: `PlayableItem`, `Appointment`, `NewAppointment`, ids
//! - **Core Traits**: `CatalogSource` (listing tracks and resolving locators)
//! - **Catalog helpers**: `public_object_url`, `MemoryCatalog`
//! - **Error Handling**: Unified `SoundbathError` and `Result` types
//!
//! # Example
//!
//! ```rust
//! use soundbath_core::{CatalogSource, MemoryCatalog, PlayableItem};
//!
//! # async fn demo() -> soundbath_core::Result<()> {
//! let catalog = MemoryCatalog::new("https://backend.example.com", "audio-files")?
//!     .with_item(PlayableItem::new("Morning Bowls", "audio/morning.mp3"));
//!
//! let items = catalog.list().await?;
//! let url = catalog.resolve(&items[0].locator).await?;
//! assert!(url.as_str().ends_with("/audio-files/audio/morning.mp3"));
//! # Ok(())
//! # }
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod catalog;
pub mod error;
pub mod traits;
pub mod types;

// Re-export commonly used types
pub use catalog::{public_object_url, MemoryCatalog};
pub use error::{Result, SoundbathError};
pub use traits::CatalogSource;

pub use types::{
    Appointment, AppointmentId, AppointmentStatus, ItemId, Locator, NewAppointment, PlayableItem,
    SERVICE_OFFERINGS,
};
