//! Configuration loading infrastructure
//!
//! One-shot startup loading of the INI-style configuration file:
//! - Section/key parsing of the classic dialect
//! - Instance resolution and per-instance normalization
//! - Defaulting and cross-field validation

pub mod loader;
pub mod parser;

pub use loader::{
    ConfigLoader, DEFAULT_CONFIG_PATH, GENERAL_SECTION, INSTANCES_KEY, MIRRORPROBE_SECTION,
};
pub use parser::{RawSection, SectionMap};
