use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Fully validated startup configuration for a mirror service process.
///
/// A value of this type only exists after every load phase has passed:
/// the file parsed, the required sections were present, the selected
/// instance was declared, and every instance section normalized cleanly.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Deployment-wide settings and the per-instance sections.
    pub general: GeneralConfig,

    /// Name of the instance this process was started for.
    pub selected_instance: String,

    /// Settings for the mirror probing subsystem.
    pub mirrorprobe: ProbeConfig,
}

impl Config {
    /// Typed settings of the selected instance.
    ///
    /// # Panics
    ///
    /// Never panics on a loader-produced value: the loader guarantees the
    /// selected instance has a normalized configuration.
    pub fn selected(&self) -> &InstanceConfig {
        self.general
            .instance(&self.selected_instance)
            .expect("selected instance is validated during load")
    }
}

/// Contents of the `[general]` section plus every instance section it
/// declares.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct GeneralConfig {
    /// Declared instance names, in declaration order with duplicates kept.
    pub instances: Vec<String>,

    /// Remaining `[general]` keys, untouched beyond key lowercasing.
    #[serde(default)]
    pub settings: BTreeMap<String, String>,

    /// Normalized settings for each declared instance, keyed by name.
    #[serde(default)]
    pub instance_configs: BTreeMap<String, InstanceConfig>,
}

impl GeneralConfig {
    /// Looks up the normalized settings for a declared instance.
    pub fn instance(&self, name: &str) -> Option<&InstanceConfig> {
        self.instance_configs.get(name)
    }

    /// Looks up a raw `[general]` value, such as a database DSN.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}

/// Normalized settings for one mirror instance.
///
/// The typed fields carry defaults so an empty instance section is valid.
/// Everything else the section held, credentials included, stays as raw
/// strings in `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct InstanceConfig {
    /// Generate zsync-compatible rolling checksums for served files.
    #[serde(default = "default_zsync_hashes")]
    pub zsync_hashes: bool,

    /// Generate per-chunk hashes alongside whole-file digests.
    #[serde(default = "default_chunked_hashes")]
    pub chunked_hashes: bool,

    /// Chunk length in bytes used by the hashing subsystem.
    #[serde(default = "default_chunk_size")]
    pub chunk_size: i64,

    /// Root directory the HTTP frontend serves files from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub apache_documentroot: Option<String>,

    /// Unrecognized keys, kept verbatim for subsystems that read their own
    /// settings (database credentials, host names and the like).
    #[serde(flatten)]
    pub extra: BTreeMap<String, String>,
}

const fn default_zsync_hashes() -> bool {
    false
}

const fn default_chunked_hashes() -> bool {
    true
}

const fn default_chunk_size() -> i64 {
    262_144
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self {
            zsync_hashes: default_zsync_hashes(),
            chunked_hashes: default_chunked_hashes(),
            chunk_size: default_chunk_size(),
            apache_documentroot: None,
            extra: BTreeMap::new(),
        }
    }
}

impl InstanceConfig {
    /// Looks up a pass-through value such as `dbuser` or `dbpass`.
    pub fn credential(&self, key: &str) -> Option<&str> {
        self.extra.get(key).map(String::as_str)
    }
}

/// Contents of the `[mirrorprobe]` section.
///
/// The probing subsystem interprets these on its own, so the section is
/// required to exist but its keys stay untyped.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct ProbeConfig {
    /// Raw key/value pairs of the section.
    #[serde(flatten)]
    pub settings: BTreeMap<String, String>,
}

impl ProbeConfig {
    /// Looks up a probe setting, such as `logfile` or `mailto`.
    pub fn get(&self, key: &str) -> Option<&str> {
        self.settings.get(key).map(String::as_str)
    }
}
