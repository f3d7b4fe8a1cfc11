//! Use cases (application services)
//!
//! Each use case orchestrates domain types through the [`Converter`] port.
//!
//! [`Converter`]: crate::ports::Converter

mod convert_request;
mod sanitize_options;

pub use convert_request::{ConvertRequest, ConvertRequestInput, convert, get_options};
pub use sanitize_options::sanitize_options;
