//! Import of request descriptions from other tools.

pub mod postman;

pub use postman::{
    ImportConfig, ImportError, ImportFormat, ImportResult, ImportWarning, ImportedCollection,
    ImportedRequest, PostmanImporter, WarningSeverity,
};
