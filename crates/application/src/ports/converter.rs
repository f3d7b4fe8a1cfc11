//! Converter port.

use snipgen_domain::{CodegenTarget, OptionSpec, RawOptions, Request, ResolvedOptions};

use crate::use_cases::sanitize_options;

/// A snippet generator for one target language/library.
///
/// Implementations are pure: `render` must not perform I/O and must accept
/// any [`ResolvedOptions`] produced from [`Converter::options`].
pub trait Converter: Send + Sync {
    /// The target this converter renders into.
    fn target(&self) -> CodegenTarget;

    /// The ordered option schema of this converter.
    fn options(&self) -> Vec<OptionSpec>;

    /// Renders the snippet for an already sanitized set of options.
    fn render(&self, request: &Request, options: &ResolvedOptions) -> String;

    /// Sanitizes `options` against [`Converter::options`] and renders.
    fn generate(&self, request: &Request, options: &RawOptions) -> String {
        let resolved = sanitize_options(options, &self.options());
        self.render(request, &resolved)
    }
}
