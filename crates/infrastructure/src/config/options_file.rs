//! Options files in JSON or YAML.
//!
//! A file holds one object. Top-level keys apply to every target; a key named
//! after a target (`go-native`, `dart-http`, ...) holds an object whose
//! entries override the shared ones for that target only:
//!
//! ```yaml
//! indentCount: 4
//! go-native:
//!   indentType: Space
//! ```

use std::io;
use std::path::Path;
use std::str::FromStr;

use serde_json::Value;
use snipgen_domain::{CodegenTarget, RawOptions};
use thiserror::Error;

/// Errors while reading an options file.
#[derive(Debug, Error)]
pub enum OptionsFileError {
    /// The file could not be read.
    #[error("IO error: {0}")]
    Io(#[from] io::Error),

    /// The file extension is not `.json`, `.yaml` or `.yml`.
    #[error("unsupported options file extension: {0:?}")]
    UnsupportedExtension(String),

    /// JSON parsing failed.
    #[error("invalid JSON options: {0}")]
    Json(#[from] serde_json::Error),

    /// YAML parsing failed.
    #[error("invalid YAML options: {0}")]
    Yaml(#[from] serde_yaml::Error),

    /// The document is valid but its root is not an object.
    #[error("options file root must be an object")]
    NotAnObject,
}

/// Result type alias for options file operations.
pub type OptionsFileResult<T> = Result<T, OptionsFileError>;

/// Syntax of an options document.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionsFormat {
    /// JSON
    Json,
    /// YAML
    Yaml,
}

impl OptionsFormat {
    /// Picks the format from a file extension.
    ///
    /// # Errors
    ///
    /// Returns [`OptionsFileError::UnsupportedExtension`] for anything but
    /// `json`, `yaml` and `yml` (case-insensitive).
    pub fn from_path(path: &Path) -> OptionsFileResult<Self> {
        let ext = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or_default()
            .to_ascii_lowercase();
        match ext.as_str() {
            "json" => Ok(Self::Json),
            "yaml" | "yml" => Ok(Self::Yaml),
            _ => Err(OptionsFileError::UnsupportedExtension(ext)),
        }
    }
}

/// Parses an options document. An empty YAML document yields no options.
///
/// # Errors
///
/// Returns an error if the text does not parse or its root is not an object.
pub fn parse_options(content: &str, format: OptionsFormat) -> OptionsFileResult<RawOptions> {
    let value: Value = match format {
        OptionsFormat::Json => serde_json::from_str(content)?,
        OptionsFormat::Yaml => serde_yaml::from_str(content)?,
    };
    match value {
        Value::Object(map) => Ok(map),
        Value::Null => Ok(RawOptions::new()),
        _ => Err(OptionsFileError::NotAnObject),
    }
}

/// Reads an options file, choosing the parser from its extension.
///
/// # Errors
///
/// Returns an error if the extension is unsupported, the file cannot be
/// read, or its content is not an options object.
pub fn load_options_file(path: &Path) -> OptionsFileResult<RawOptions> {
    let format = OptionsFormat::from_path(path)?;
    let content = std::fs::read_to_string(path)?;
    let options = parse_options(&content, format)?;
    tracing::debug!(path = %path.display(), keys = options.len(), "loaded options file");
    Ok(options)
}

/// Flattens shared and per-target entries into the options for `target`.
///
/// Sections for other targets are dropped. Values are not validated here;
/// the converter's sanitizer does that.
#[must_use]
pub fn options_for_target(options: &RawOptions, target: CodegenTarget) -> RawOptions {
    let mut resolved: RawOptions = options
        .iter()
        .filter(|(key, _)| CodegenTarget::from_str(key).is_err())
        .map(|(key, value)| (key.clone(), value.clone()))
        .collect();

    if let Some(Value::Object(section)) = options.get(target.key()) {
        for (key, value) in section {
            resolved.insert(key.clone(), value.clone());
        }
    }
    resolved
}
