//! MirrorBrain - mirror network configuration
//!
//! Loads and validates the startup configuration of a mirror-management
//! deployment: one INI-style file declaring global settings, a set of named
//! mirror instances with their credentials and hashing tunables, and the
//! mirror probe settings. The loader runs once at process start and either
//! yields a fully validated, immutable [`Config`] or fails with a single
//! precise [`ConfigError`]; nothing downstream ever sees a half-built
//! configuration.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Configuration model and error taxonomy
//! - **Service Layer** (`services`): Hashing primitives tied to the model
//! - **Infrastructure Layer** (`infrastructure`): File reading and parsing
//!
//! # Example
//!
//! ```no_run
//! use mirrorbrain::ConfigLoader;
//!
//! fn main() -> Result<(), mirrorbrain::ConfigError> {
//!     let config = ConfigLoader::load_from_file("/etc/mirrorbrain.conf")?;
//!     println!("serving instance {}", config.selected_instance);
//!     Ok(())
//! }
//! ```

pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::error::ConfigError;
pub use domain::models::{Config, GeneralConfig, InstanceConfig, ProbeConfig};
pub use infrastructure::config::{ConfigLoader, DEFAULT_CONFIG_PATH};
