use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Domain-level errors for configuration loading.
///
/// Every variant is fatal to the load that produced it: the loader never
/// retries internally and never hands back a partially built
/// [`Config`](super::models::config::Config). Each variant carries enough
/// context (file path, section or instance name, key, raw value) to diagnose
/// the problem without re-reading the file.
#[derive(Error, Debug)]
pub enum ConfigError {
    /// The configuration file does not exist or cannot be read.
    #[error("cannot read configuration file {}: {source}", .path.display())]
    MissingFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    /// The file content violates the accepted INI syntax.
    #[error("syntax error in {} at line {line}: {message}", .path.display())]
    ParseSyntax {
        path: PathBuf,
        line: usize,
        message: String,
    },

    /// A required named section (`general` or `mirrorprobe`) is absent.
    #[error("missing required section [{0}]")]
    MissingSection(String),

    /// An instance declared in `instances` has no section of its own.
    #[error("the config has no section named [{0}] for declared instance '{0}'")]
    MissingInstanceSection(String),

    /// A required key is absent from a section.
    ///
    /// Also raised when the key is present but carries no usable content,
    /// like an `instances` declaration that splits into zero names.
    #[error("missing key '{key}' in section [{section}]")]
    MissingKey { section: String, key: String },

    /// The selected instance is not listed in `instances`.
    #[error("instance '{0}' is not listed in instances")]
    UnknownInstance(String),

    /// A boolean option holds a token outside the recognized set
    /// (`true/yes/on/1` and `false/no/off/0`, case-insensitive).
    #[error("cannot parse '{raw}' as a boolean for '{key}' in instance [{instance}]")]
    InvalidBoolean {
        instance: String,
        key: String,
        raw: String,
    },

    /// An integer option holds a non-numeric value.
    #[error("cannot parse '{raw}' as an integer for '{key}' in instance [{instance}]")]
    InvalidInteger {
        instance: String,
        key: String,
        raw: String,
    },

    /// A semantic rule was violated, such as the zsync chunk-size
    /// alignment requirement or an instance declared under a reserved
    /// section name.
    #[error("constraint violation in instance [{instance}]: {message}")]
    ConstraintViolation { instance: String, message: String },
}
