//! Snipgen Application - Use cases and ports
//!
//! This crate defines the application layer with:
//! - The converter port (the trait every target implements)
//! - Option sanitizing and the callback-style `convert` entry point
//! - Application-level error handling

pub mod error;
pub mod ports;
pub mod use_cases;

pub use error::{ApplicationError, ApplicationResult};
pub use ports::Converter;
pub use use_cases::{ConvertRequest, ConvertRequestInput, convert, get_options, sanitize_options};
