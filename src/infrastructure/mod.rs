//! Infrastructure layer module
//!
//! This module contains everything that touches the outside world. For this
//! crate that is exactly one concern: reading and parsing the configuration
//! file. The rest of the service receives the finished model and never does
//! I/O through here.

pub mod config;
