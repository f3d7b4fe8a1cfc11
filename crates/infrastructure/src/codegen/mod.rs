//! Code generation infrastructure.
//!
//! One [`Converter`] per [`CodegenTarget`], plus the helpers they share.

mod common;
mod csharp_dotnetcore;
mod csharp_httpclient;
mod dart_http;
mod golang;

use snipgen_application::Converter;
use snipgen_domain::{CodegenTarget, RawOptions, Request};

pub use common::PLACEHOLDER_FILE;
pub use csharp_dotnetcore::CsharpDotNetCoreConverter;
pub use csharp_httpclient::CsharpHttpClientConverter;
pub use dart_http::DartHttpConverter;
pub use golang::GoNativeConverter;

/// Returns the converter for a target.
#[must_use]
pub fn converter_for(target: CodegenTarget) -> &'static dyn Converter {
    match target {
        CodegenTarget::CsharpHttpclient => &CsharpHttpClientConverter,
        CodegenTarget::CsharpDotnetcore => &CsharpDotNetCoreConverter,
        CodegenTarget::DartHttp => &DartHttpConverter,
        CodegenTarget::GoNative => &GoNativeConverter,
    }
}

/// Generate code for a request in the specified target.
#[must_use]
pub fn generate_code(target: CodegenTarget, request: &Request, options: &RawOptions) -> String {
    let converter = converter_for(target);
    tracing::debug!(
        target_key = target.key(),
        body_mode = request.body.as_ref().map_or("none", |b| b.mode().as_str()),
        "generating snippet"
    );
    converter.generate(request, options)
}
