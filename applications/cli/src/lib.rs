//! Soundbath CLI Library
//!
//! Command-line front end for the Soundbath booking site backend.
//!
//! This library exposes the config and command layers for testing purposes.

pub mod commands;
pub mod config;
pub mod error;

// Re-export commonly used types for convenience
pub use config::{BackendSettings, CliConfig, LoggingSettings};
pub use error::{CliError, Result};
