//! Postman Importer - Main Import Logic
//!
//! Reads a Postman Collection v2.1 document, or a bare request object, and
//! turns it into domain requests ready for a converter.

use std::path::Path;

use serde_json::Value;
use thiserror::Error;

use super::mapper::{ImportedRequest, map_postman_collection, map_postman_request};
use super::types::{PostmanCollection, PostmanRequest};
use super::warning::ImportWarning;

/// Import configuration options
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Maximum file size in bytes (default: 10MB)
    pub max_file_size: usize,
    /// Maximum folder nesting depth (default: 10)
    pub max_depth: usize,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            max_file_size: 10 * 1024 * 1024, // 10MB
            max_depth: 10,
        }
    }
}

/// Import error types
#[derive(Debug, Error)]
pub enum ImportError {
    /// File exceeds the maximum allowed size
    #[error("File too large: {size} bytes exceeds maximum of {max} bytes")]
    FileTooLarge {
        /// Actual file size in bytes
        size: usize,
        /// Maximum allowed size in bytes
        max: usize,
    },
    /// JSON parsing failed
    #[error("Invalid JSON: {0}")]
    InvalidJson(String),
    /// Document is neither a collection nor a request
    #[error("Invalid Postman format: {0}")]
    InvalidFormat(String),
    /// IO operation failed
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Result type alias for imports.
pub type ImportResult<T> = Result<T, ImportError>;

/// Detected import format
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportFormat {
    /// Postman Collection v2.1 format
    PostmanCollectionV21,
    /// A single request object (`{"method": ..., "url": ...}`)
    PostmanRequest,
    /// Unknown or unsupported format
    Unknown,
}

/// Requests read from a document
#[derive(Debug, Clone)]
pub struct ImportedCollection {
    /// Collection name, `None` for a bare request
    pub name: Option<String>,
    /// Requests in depth-first order
    pub requests: Vec<ImportedRequest>,
    /// Warnings generated during import
    pub warnings: Vec<ImportWarning>,
}

/// Main Postman importer
#[derive(Debug, Clone, Default)]
pub struct PostmanImporter {
    config: ImportConfig,
}

impl PostmanImporter {
    /// Create a new importer with default config
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a new importer with custom config
    #[must_use]
    pub const fn with_config(config: ImportConfig) -> Self {
        Self { config }
    }

    /// Import from JSON text.
    ///
    /// # Errors
    ///
    /// Returns an error if the text is too large, is not JSON, or is neither
    /// a collection nor a request.
    pub fn import_str(&self, content: &str) -> ImportResult<ImportedCollection> {
        if content.len() > self.config.max_file_size {
            return Err(ImportError::FileTooLarge {
                size: content.len(),
                max: self.config.max_file_size,
            });
        }

        let json: Value =
            serde_json::from_str(content).map_err(|e| ImportError::InvalidJson(e.to_string()))?;

        match Self::detect_format(&json) {
            ImportFormat::PostmanCollectionV21 => {
                let collection: PostmanCollection = serde_json::from_value(json)
                    .map_err(|e| ImportError::InvalidFormat(e.to_string()))?;
                let mapped = map_postman_collection(&collection, self.config.max_depth);
                tracing::debug!(
                    collection = %mapped.name,
                    requests = mapped.requests.len(),
                    warnings = mapped.warnings.len(),
                    "imported postman collection"
                );
                Ok(ImportedCollection {
                    name: Some(mapped.name),
                    requests: mapped.requests,
                    warnings: mapped.warnings,
                })
            }
            ImportFormat::PostmanRequest => {
                let request: PostmanRequest = serde_json::from_value(json)
                    .map_err(|e| ImportError::InvalidFormat(e.to_string()))?;
                let (mapped, warnings) = map_postman_request(&request, "request");
                Ok(ImportedCollection {
                    name: None,
                    requests: vec![ImportedRequest {
                        name: "request".to_string(),
                        path: "request".to_string(),
                        request: mapped,
                    }],
                    warnings,
                })
            }
            ImportFormat::Unknown => Err(ImportError::InvalidFormat(
                "Unknown format: Not a Postman Collection or request".to_string(),
            )),
        }
    }

    /// Import from a file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or [`Self::import_str`] fails.
    pub fn import_file(&self, path: &Path) -> ImportResult<ImportedCollection> {
        let size = usize::try_from(std::fs::metadata(path)?.len()).unwrap_or(usize::MAX);
        if size > self.config.max_file_size {
            return Err(ImportError::FileTooLarge {
                size,
                max: self.config.max_file_size,
            });
        }
        let content = std::fs::read_to_string(path)?;
        self.import_str(&content)
    }

    /// Detect the format of a JSON value
    fn detect_format(json: &Value) -> ImportFormat {
        if json.get("info").is_some() {
            let schema = json
                .get("info")
                .and_then(|i| i.get("schema"))
                .and_then(Value::as_str)
                .unwrap_or("");

            if schema.contains("v2.1") || schema.contains("v2.0") || json.get("item").is_some() {
                return ImportFormat::PostmanCollectionV21;
            }
        }

        if json.get("url").is_some() || json.get("method").is_some() {
            return ImportFormat::PostmanRequest;
        }

        ImportFormat::Unknown
    }
}
