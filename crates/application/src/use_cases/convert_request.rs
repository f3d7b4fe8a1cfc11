//! Convert request use case.

use snipgen_domain::{OptionSpec, RawOptions, Request};

use crate::error::{ApplicationError, ApplicationResult};
use crate::ports::Converter;

/// Renders `request` with `converter` and reports the snippet via `callback`.
///
/// The callback is invoked exactly once, synchronously, before this returns.
/// Invalid options never fail the conversion; they fall back to defaults.
///
/// # Errors
///
/// Returns [`ApplicationError::InvalidCallback`] immediately, without
/// rendering anything, when `callback` is `None`.
pub fn convert<C, F>(
    converter: &C,
    request: &Request,
    options: &RawOptions,
    callback: Option<F>,
) -> ApplicationResult<()>
where
    C: Converter + ?Sized,
    F: FnOnce(ApplicationResult<String>),
{
    let Some(callback) = callback else {
        return Err(ApplicationError::InvalidCallback {
            target: converter.target(),
        });
    };

    tracing::debug!(target_key = converter.target().key(), method = %request.method, "converting request");
    callback(Ok(converter.generate(request, options)));
    Ok(())
}

/// Returns the option schema of a converter.
#[must_use]
pub fn get_options<C: Converter + ?Sized>(converter: &C) -> Vec<OptionSpec> {
    converter.options()
}

/// Input for converting a request.
#[derive(Debug, Clone)]
pub struct ConvertRequestInput {
    /// The request to render.
    pub request: Request,
    /// Options as supplied by the caller.
    pub options: RawOptions,
}

/// Use case for rendering a request without the callback ceremony.
pub struct ConvertRequest<'a> {
    converter: &'a dyn Converter,
}

impl<'a> ConvertRequest<'a> {
    /// Creates a new `ConvertRequest` use case.
    #[must_use]
    pub const fn new(converter: &'a dyn Converter) -> Self {
        Self { converter }
    }

    /// Renders the snippet.
    #[must_use]
    pub fn execute(&self, input: &ConvertRequestInput) -> String {
        self.converter.generate(&input.request, &input.options)
    }
}
