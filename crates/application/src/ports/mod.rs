//! Port definitions (interfaces)
//!
//! Ports define the boundaries between the application core and the
//! concrete converters in the infrastructure layer.

mod converter;

pub use converter::Converter;
