use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::error::ConfigError;
use crate::domain::models::config::{Config, GeneralConfig, InstanceConfig, ProbeConfig};
use crate::infrastructure::config::parser::{self, RawSection};
use crate::services::zsync::ZSYNC_BLOCK_ALIGNMENT;

/// Name of the required deployment-wide section.
pub const GENERAL_SECTION: &str = "general";

/// Name of the required probe-subsystem section.
pub const MIRRORPROBE_SECTION: &str = "mirrorprobe";

/// Key in `[general]` declaring the instance names.
pub const INSTANCES_KEY: &str = "instances";

/// Conventional location of the configuration file.
pub const DEFAULT_CONFIG_PATH: &str = "/etc/mirrorbrain.conf";

/// Configuration loader: one synchronous pass from file to validated
/// [`Config`]
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load from [`DEFAULT_CONFIG_PATH`], selecting the first declared
    /// instance
    pub fn load() -> Result<Config, ConfigError> {
        Self::load_with_instance(DEFAULT_CONFIG_PATH, None)
    }

    /// Load from a specific file, selecting the first declared instance
    pub fn load_from_file(path: impl AsRef<Path>) -> Result<Config, ConfigError> {
        Self::load_with_instance(path, None)
    }

    /// Load from a specific file, optionally overriding which instance this
    /// process runs for
    ///
    /// Phases, in order (the first failure aborts the whole load; no partial
    /// configuration is ever returned):
    /// 1. Read the file and parse it into sections
    /// 2. Read `[general]` and split its `instances` declaration
    /// 3. Resolve the selected instance (override, or first declared)
    /// 4. Normalize every declared instance section
    /// 5. Read `[mirrorprobe]`
    pub fn load_with_instance(
        path: impl AsRef<Path>,
        instance: Option<&str>,
    ) -> Result<Config, ConfigError> {
        let path = path.as_ref();
        tracing::debug!(path = %path.display(), "reading configuration file");
        let mut sections = parser::read_sections(path)?;

        let mut general = sections
            .remove(GENERAL_SECTION)
            .ok_or_else(|| ConfigError::MissingSection(GENERAL_SECTION.to_string()))?;

        let raw_instances = general
            .remove(INSTANCES_KEY)
            .ok_or_else(missing_instances_key)?;
        let instances = split_instances(&raw_instances);
        let Some(first_instance) = instances.first() else {
            return Err(missing_instances_key());
        };
        // The two fixed sections can never double as instances.
        if let Some(reserved) = instances
            .iter()
            .find(|name| name.as_str() == GENERAL_SECTION || name.as_str() == MIRRORPROBE_SECTION)
        {
            return Err(ConfigError::ConstraintViolation {
                instance: reserved.clone(),
                message: format!(
                    "'{reserved}' is a reserved section name and cannot be declared as an instance"
                ),
            });
        }
        tracing::debug!(count = instances.len(), "instances declared");

        let selected_instance = match instance {
            Some(name) => name.to_string(),
            None => first_instance.clone(),
        };
        if !instances.contains(&selected_instance) {
            return Err(ConfigError::UnknownInstance(selected_instance));
        }
        tracing::debug!(instance = %selected_instance, "instance selected");

        let mut instance_configs = BTreeMap::new();
        for name in &instances {
            // Repeated names in the declaration share one section.
            if instance_configs.contains_key(name) {
                continue;
            }
            let section = sections
                .remove(name)
                .ok_or_else(|| ConfigError::MissingInstanceSection(name.clone()))?;
            let normalized = normalize_instance(name, section)?;
            instance_configs.insert(name.clone(), normalized);
        }
        tracing::debug!(count = instance_configs.len(), "instances normalized");

        let probe = sections
            .remove(MIRRORPROBE_SECTION)
            .ok_or_else(|| ConfigError::MissingSection(MIRRORPROBE_SECTION.to_string()))?;
        tracing::debug!(keys = probe.len(), "probe section loaded");

        let config = Config {
            general: GeneralConfig {
                instances,
                settings: general,
                instance_configs,
            },
            selected_instance,
            mirrorprobe: ProbeConfig { settings: probe },
        };

        tracing::info!(
            path = %path.display(),
            instance = %config.selected_instance,
            instances = config.general.instances.len(),
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Splits an `instances` declaration on runs of commas and/or spaces,
/// preserving order and duplicates.
fn split_instances(raw: &str) -> Vec<String> {
    raw.split([',', ' '])
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(String::from)
        .collect()
}

/// Parses the boolean tokens accepted for instance options.
fn parse_boolean(raw: &str) -> Option<bool> {
    match raw.to_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Some(true),
        "false" | "no" | "off" | "0" => Some(false),
        _ => None,
    }
}

/// Turns one raw instance section into a typed [`InstanceConfig`]: defaults
/// for absent options, type coercion for present ones, everything else into
/// the pass-through map, then the zsync alignment constraint.
fn normalize_instance(name: &str, mut section: RawSection) -> Result<InstanceConfig, ConfigError> {
    let mut config = InstanceConfig::default();

    if let Some(raw) = section.remove("zsync_hashes") {
        config.zsync_hashes =
            parse_boolean(&raw).ok_or_else(|| invalid_boolean(name, "zsync_hashes", &raw))?;
    }
    if let Some(raw) = section.remove("chunked_hashes") {
        config.chunked_hashes =
            parse_boolean(&raw).ok_or_else(|| invalid_boolean(name, "chunked_hashes", &raw))?;
    }
    if let Some(raw) = section.remove("chunk_size") {
        config.chunk_size = raw.parse().map_err(|_| ConfigError::InvalidInteger {
            instance: name.to_string(),
            key: "chunk_size".to_string(),
            raw: raw.clone(),
        })?;
    }
    if let Some(value) = section.remove("apache_documentroot") {
        config.apache_documentroot = Some(value);
    }
    config.extra = section;

    // The check runs on the normalized value, so the default participates.
    if config.zsync_hashes && config.chunk_size % ZSYNC_BLOCK_ALIGNMENT != 0 {
        return Err(ConfigError::ConstraintViolation {
            instance: name.to_string(),
            message: format!(
                "chunk_size must be a multiple of {ZSYNC_BLOCK_ALIGNMENT} when zsync_hashes is enabled"
            ),
        });
    }

    Ok(config)
}

fn missing_instances_key() -> ConfigError {
    ConfigError::MissingKey {
        section: GENERAL_SECTION.to_string(),
        key: INSTANCES_KEY.to_string(),
    }
}

fn invalid_boolean(instance: &str, key: &str, raw: &str) -> ConfigError {
    ConfigError::InvalidBoolean {
        instance: instance.to_string(),
        key: key.to_string(),
        raw: raw.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn section(pairs: &[(&str, &str)]) -> RawSection {
        pairs
            .iter()
            .map(|(key, value)| ((*key).to_string(), (*value).to_string()))
            .collect()
    }

    #[test]
    fn test_split_instances_variants() {
        assert_eq!(split_instances("a, b ,c"), vec!["a", "b", "c"]);
        assert_eq!(split_instances("a,b,c"), vec!["a", "b", "c"]);
        assert_eq!(split_instances("a  b c"), vec!["a", "b", "c"]);
        assert_eq!(split_instances("solo"), vec!["solo"]);
    }

    #[test]
    fn test_split_instances_keeps_order_and_duplicates() {
        assert_eq!(split_instances("b, a, b"), vec!["b", "a", "b"]);
    }

    #[test]
    fn test_split_instances_empty_declarations() {
        assert!(split_instances("").is_empty());
        assert!(split_instances("  ,  , ").is_empty());
    }

    #[test]
    fn test_parse_boolean_recognized_tokens() {
        for token in ["true", "yes", "on", "1", "TRUE", "Yes", "ON"] {
            assert_eq!(parse_boolean(token), Some(true), "token {token}");
        }
        for token in ["false", "no", "off", "0", "FALSE", "No", "OFF"] {
            assert_eq!(parse_boolean(token), Some(false), "token {token}");
        }
    }

    #[test]
    fn test_parse_boolean_rejects_other_tokens() {
        assert_eq!(parse_boolean("maybe"), None);
        assert_eq!(parse_boolean(""), None);
        assert_eq!(parse_boolean("2"), None);
    }

    #[test]
    fn test_normalize_empty_section_gets_defaults() {
        let config = normalize_instance("main", RawSection::new()).expect("defaults are valid");

        assert!(!config.zsync_hashes);
        assert!(config.chunked_hashes);
        assert_eq!(config.chunk_size, 262_144);
        assert_eq!(config.apache_documentroot, None);
        assert!(config.extra.is_empty());
    }

    #[test]
    fn test_normalize_overrides_and_extra_keys() {
        let config = normalize_instance(
            "main",
            section(&[
                ("zsync_hashes", "yes"),
                ("chunk_size", "8192"),
                ("apache_documentroot", "/srv/mirror"),
                ("dbuser", "mirror"),
                ("dbpass", "secret"),
            ]),
        )
        .expect("overrides are valid");

        assert!(config.zsync_hashes);
        assert!(config.chunked_hashes);
        assert_eq!(config.chunk_size, 8192);
        assert_eq!(config.apache_documentroot.as_deref(), Some("/srv/mirror"));
        assert_eq!(config.extra.len(), 2);
        assert_eq!(config.credential("dbuser"), Some("mirror"));
        assert_eq!(config.credential("dbpass"), Some("secret"));
    }

    #[test]
    fn test_normalize_invalid_boolean() {
        let err = normalize_instance("main", section(&[("chunked_hashes", "maybe")])).unwrap_err();
        match err {
            ConfigError::InvalidBoolean { instance, key, raw } => {
                assert_eq!(instance, "main");
                assert_eq!(key, "chunked_hashes");
                assert_eq!(raw, "maybe");
            }
            other => panic!("Expected InvalidBoolean error, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_invalid_integer() {
        let err = normalize_instance("main", section(&[("chunk_size", "lots")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidInteger { .. }));
    }

    #[test]
    fn test_normalize_constraint_violation() {
        let err = normalize_instance(
            "main",
            section(&[("zsync_hashes", "true"), ("chunk_size", "5000")]),
        )
        .unwrap_err();
        match err {
            ConfigError::ConstraintViolation { instance, message } => {
                assert_eq!(instance, "main");
                assert!(message.contains("4096"));
            }
            other => panic!("Expected ConstraintViolation error, got {other:?}"),
        }
    }

    #[test]
    fn test_normalize_constraint_inactive_without_zsync() {
        let config = normalize_instance("main", section(&[("chunk_size", "5000")]))
            .expect("alignment only matters with zsync enabled");
        assert_eq!(config.chunk_size, 5000);
    }

    #[test]
    fn test_normalize_default_chunk_size_satisfies_constraint() {
        let config = normalize_instance("main", section(&[("zsync_hashes", "yes")]))
            .expect("default chunk size is aligned");
        assert!(config.zsync_hashes);
        assert_eq!(config.chunk_size % ZSYNC_BLOCK_ALIGNMENT, 0);
    }
}
