//! Domain layer for the mirror service configuration.
//!
//! This module contains the validated configuration model and the error
//! taxonomy of the loader.

pub mod error;
pub mod models;

// Re-export error types for convenient access
pub use error::ConfigError;
