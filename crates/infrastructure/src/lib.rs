//! Snipgen Infrastructure - Converters and adapters
//!
//! This crate provides the concrete converters behind the
//! [`snipgen_application::Converter`] port, plus the Postman importer and
//! the options-file loader.

pub mod codegen;
pub mod config;
pub mod import;

pub use codegen::{
    CsharpDotNetCoreConverter, CsharpHttpClientConverter, DartHttpConverter, GoNativeConverter,
    converter_for, generate_code,
};
pub use config::{
    OptionsFileError, OptionsFileResult, OptionsFormat, load_options_file, options_for_target,
    options_schema_json, parse_options,
};
pub use import::{
    ImportConfig, ImportError, ImportFormat, ImportWarning, ImportedCollection, ImportedRequest,
    PostmanImporter, WarningSeverity,
};
