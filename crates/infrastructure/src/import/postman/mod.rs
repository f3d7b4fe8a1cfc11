//! Postman Import Module
//!
//! This module reads Postman Collection v2.1 files (or single request
//! objects) into domain requests.

pub mod importer;
pub mod mapper;
pub mod types;
pub mod warning;

pub use importer::{
    ImportConfig, ImportError, ImportFormat, ImportResult, ImportedCollection, PostmanImporter,
};
pub use mapper::ImportedRequest;
pub use types::PostmanCollection;
pub use warning::{ImportWarning, WarningSeverity};
