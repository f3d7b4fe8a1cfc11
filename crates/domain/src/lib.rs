//! Snipgen Domain - Core types
//!
//! This crate defines the request model, the option schema and the codegen
//! targets shared by every converter.
//! All types here are pure Rust with no I/O dependencies.

pub mod codegen;
pub mod error;
pub mod options;
pub mod request;

pub use codegen::CodegenTarget;
pub use error::{DomainError, DomainResult};
pub use options::{MAX_INDENT_COUNT, OptionSpec, OptionType, OptionValue, RawOptions, ResolvedOptions};
pub use request::{
    BodyMode, FormDataParam, FormDataValue, FormParam, Header, Headers, HttpMethod, Request,
    RequestBody,
};
