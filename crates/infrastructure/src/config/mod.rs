//! Conversion options stored on disk, and the option schema as JSON.

mod options_file;
mod schema;

pub use options_file::{
    OptionsFileError, OptionsFileResult, OptionsFormat, load_options_file, options_for_target,
    parse_options,
};
pub use schema::options_schema_json;
