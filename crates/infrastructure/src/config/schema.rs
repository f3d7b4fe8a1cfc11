//! Option schema rendered as JSON for host tooling.

use serde::Serialize;
use serde_json::ser::{PrettyFormatter, Serializer};
use snipgen_domain::CodegenTarget;

use crate::codegen::converter_for;

/// Serializes the option schema of `target` as pretty JSON.
///
/// Output uses 2-space indentation, keeps schema order and ends with a
/// newline, so repeated runs produce identical files.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn options_schema_json(target: CodegenTarget) -> Result<String, serde_json::Error> {
    let specs = converter_for(target).options();
    let mut buffer = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"  ");
    let mut serializer = Serializer::with_formatter(&mut buffer, formatter);
    specs.serialize(&mut serializer)?;

    let mut json = String::from_utf8_lossy(&buffer).into_owned();
    json.push('\n');
    Ok(json)
}
