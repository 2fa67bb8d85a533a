//! Common test utilities for integration tests
//!
//! Provides shared fixtures and helpers used across multiple integration
//! test files.

use std::path::PathBuf;

use tempfile::TempDir;

/// Create a temporary directory for test isolation
///
/// Returns a TempDir that will be cleaned up when dropped.
pub fn temp_dir() -> TempDir {
    tempfile::tempdir().expect("Failed to create temp dir")
}

/// Write configuration text into a fresh temporary directory
///
/// Returns the TempDir (keep it alive for the duration of the test) and the
/// path of the written file.
pub fn write_config(content: &str) -> (TempDir, PathBuf) {
    let dir = temp_dir();
    let path = dir.path().join("mirrorbrain.conf");
    std::fs::write(&path, content).expect("Failed to write config fixture");
    (dir, path)
}

/// A small but complete configuration: two instances, credentials, probe
#[allow(dead_code)]
pub fn sample_config() -> &'static str {
    "\
# sample deployment with two mirrored projects
[general]
instances = opensuse, fedora
dbuser = mbadmin

[opensuse]
dbuser = mirror_opensuse
dbpass = secret
apache_documentroot = /srv/mirrors/opensuse
zsync_hashes = yes

[fedora]
dbname = mirror_fedora
chunked_hashes = no
chunk_size = 131072

[mirrorprobe]
logfile = /var/log/mirrorprobe.log
loglevel = INFO
mailto = admin@example.org
"
}

/// Setup test logging
///
/// Initializes tracing subscriber for test output.
/// Call this at the beginning of tests that need logging.
#[allow(dead_code)]
pub fn setup_test_logging() {
    use tracing_subscriber::fmt;

    let _ = fmt()
        .with_test_writer()
        .with_max_level(tracing::Level::DEBUG)
        .try_init();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_temp_dir_creation() {
        let dir = temp_dir();
        assert!(dir.path().exists());
        assert!(dir.path().is_dir());
    }

    #[test]
    fn test_write_config_creates_file() {
        let (_dir, path) = write_config("[general]\ninstances = a\n");
        assert!(path.exists());
        assert_eq!(path.file_name().unwrap(), "mirrorbrain.conf");
    }
}
