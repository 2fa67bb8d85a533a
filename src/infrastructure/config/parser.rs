//! INI section reader for the configuration file format.
//!
//! Splits UTF-8 text into named sections of key/value pairs. The dialect is
//! the classic one: `key = value` or `key : value` lines grouped under
//! `[section]` headers, full-line `#`/`;` comments, and indented
//! continuation lines that extend the previous value. Option keys are
//! lowercased; section names keep their case (surrounding whitespace inside
//! the brackets is trimmed). Duplicate sections and duplicate keys are
//! rejected rather than silently merged.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::domain::error::ConfigError;

/// Key/value pairs of one `[name]` block, keys lowercased.
pub type RawSection = BTreeMap<String, String>;

/// All sections of a file, keyed by section name.
pub type SectionMap = BTreeMap<String, RawSection>;

/// Reads and parses the file at `path` into its sections.
///
/// Unreadable paths yield [`ConfigError::MissingFile`]; anything wrong with
/// the content itself (bad UTF-8 included) yields
/// [`ConfigError::ParseSyntax`] with the offending line number.
pub fn read_sections(path: &Path) -> Result<SectionMap, ConfigError> {
    let bytes = fs::read(path).map_err(|source| ConfigError::MissingFile {
        path: path.to_path_buf(),
        source,
    })?;

    let text = String::from_utf8(bytes).map_err(|err| {
        let valid = err.utf8_error().valid_up_to();
        let line = 1 + err.as_bytes()[..valid]
            .iter()
            .filter(|&&byte| byte == b'\n')
            .count();
        syntax_error(path, line, "configuration file is not valid UTF-8")
    })?;

    parse_sections(path, &text)
}

/// Parses already-decoded text into its sections.
///
/// `path` is only used for error context.
pub fn parse_sections(path: &Path, text: &str) -> Result<SectionMap, ConfigError> {
    let mut sections = SectionMap::new();
    let mut current_section: Option<String> = None;
    // Most recent option line and its indentation, for continuation lines.
    let mut current_key: Option<(String, usize)> = None;

    for (index, line) in text.lines().enumerate() {
        let line_no = index + 1;
        let trimmed = line.trim();

        if trimmed.is_empty() {
            continue;
        }
        if trimmed.starts_with('#') || trimmed.starts_with(';') {
            continue;
        }

        let indent = line.len() - line.trim_start().len();

        // A line indented deeper than the option it follows continues that
        // option's value, no matter what else it looks like.
        if let (Some(section), Some((key, key_indent))) =
            (current_section.as_ref(), current_key.as_ref())
        {
            if indent > *key_indent {
                if let Some(value) = sections.get_mut(section).and_then(|s| s.get_mut(key)) {
                    value.push('\n');
                    value.push_str(trimmed);
                }
                continue;
            }
        }

        if trimmed.starts_with('[') {
            let Some(inner) = trimmed
                .strip_prefix('[')
                .and_then(|rest| rest.strip_suffix(']'))
            else {
                return Err(syntax_error(path, line_no, "unterminated section header"));
            };
            let name = inner.trim();
            if name.is_empty() {
                return Err(syntax_error(path, line_no, "empty section name"));
            }
            if sections.contains_key(name) {
                return Err(syntax_error(
                    path,
                    line_no,
                    format!("duplicate section [{name}]"),
                ));
            }
            sections.insert(name.to_string(), RawSection::new());
            current_section = Some(name.to_string());
            current_key = None;
            continue;
        }

        let Some(section_name) = current_section.as_ref() else {
            return Err(syntax_error(
                path,
                line_no,
                "content before any section header",
            ));
        };

        let Some(delim) = trimmed.find(['=', ':']) else {
            return Err(syntax_error(
                path,
                line_no,
                "expected a section header or a 'key = value' line",
            ));
        };

        let key = trimmed[..delim].trim_end().to_lowercase();
        if key.is_empty() {
            return Err(syntax_error(path, line_no, "empty option key"));
        }
        let value = trimmed[delim + 1..].trim().to_string();

        if let Some(entries) = sections.get_mut(section_name) {
            if entries.contains_key(&key) {
                return Err(syntax_error(
                    path,
                    line_no,
                    format!("duplicate key '{key}' in section [{section_name}]"),
                ));
            }
            entries.insert(key.clone(), value);
        }
        current_key = Some((key, indent));
    }

    Ok(sections)
}

fn syntax_error(path: &Path, line: usize, message: impl Into<String>) -> ConfigError {
    ConfigError::ParseSyntax {
        path: path.to_path_buf(),
        line,
        message: message.into(),
    }
}
