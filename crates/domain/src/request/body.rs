//! HTTP Request body types

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// The declared encoding of a request body.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BodyMode {
    /// Raw text body
    Raw,
    /// `application/x-www-form-urlencoded` fields
    #[serde(rename = "urlencoded")]
    UrlEncoded,
    /// `multipart/form-data` fields
    #[serde(rename = "formdata")]
    FormData,
    /// GraphQL query with variables
    #[serde(rename = "graphql")]
    GraphQl,
    /// Binary file body
    File,
}

impl BodyMode {
    /// Returns the mode name as used in collection files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Raw => "raw",
            Self::UrlEncoded => "urlencoded",
            Self::FormData => "formdata",
            Self::GraphQl => "graphql",
            Self::File => "file",
        }
    }
}

impl fmt::Display for BodyMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BodyMode {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        match s {
            "raw" => Ok(Self::Raw),
            "urlencoded" => Ok(Self::UrlEncoded),
            "formdata" => Ok(Self::FormData),
            "graphql" => Ok(Self::GraphQl),
            "file" => Ok(Self::File),
            other => Err(DomainError::UnknownBodyMode(other.to_string())),
        }
    }
}

/// A url-encoded form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormParam {
    /// Field name
    pub key: String,
    /// Field value
    #[serde(default)]
    pub value: String,
    /// Whether this field is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FormParam {
    /// Creates an enabled field.
    #[must_use]
    pub fn new(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: value.into(),
            enabled: true,
        }
    }

    /// Creates a disabled field.
    #[must_use]
    pub fn disabled(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            enabled: false,
            ..Self::new(key, value)
        }
    }
}

/// Value of a multipart form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormDataValue {
    /// A plain text value.
    Text(String),
    /// One or more file paths. An empty list means the file was never chosen.
    File(Vec<String>),
}

/// A multipart form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FormDataParam {
    /// Field name
    pub key: String,
    /// Text value or file sources
    pub value: FormDataValue,
    /// Explicit content type of the part, if any
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
    /// Whether this field is sent
    #[serde(default = "default_enabled")]
    pub enabled: bool,
}

impl FormDataParam {
    /// Creates an enabled text field.
    #[must_use]
    pub fn text(key: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            key: key.into(),
            value: FormDataValue::Text(value.into()),
            content_type: None,
            enabled: true,
        }
    }

    /// Creates an enabled file field with a single source.
    #[must_use]
    pub fn file(key: impl Into<String>, src: impl Into<String>) -> Self {
        Self::files(key, [src.into()])
    }

    /// Creates an enabled file field with several sources.
    #[must_use]
    pub fn files(key: impl Into<String>, srcs: impl IntoIterator<Item = String>) -> Self {
        Self {
            key: key.into(),
            value: FormDataValue::File(srcs.into_iter().collect()),
            content_type: None,
            enabled: true,
        }
    }

    /// Sets the part content type.
    #[must_use]
    pub fn with_content_type(mut self, content_type: impl Into<String>) -> Self {
        self.content_type = Some(content_type.into());
        self
    }

    /// Marks the field as disabled.
    #[must_use]
    pub fn into_disabled(mut self) -> Self {
        self.enabled = false;
        self
    }
}

const fn default_enabled() -> bool {
    true
}

/// HTTP request body, one variant per [`BodyMode`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "lowercase")]
pub enum RequestBody {
    /// Raw text body.
    Raw {
        /// The text as typed by the user
        #[serde(default)]
        content: String,
        /// Editor language hint (`json`, `xml`, `text`, ...)
        #[serde(default, skip_serializing_if = "Option::is_none")]
        language: Option<String>,
    },
    /// Url-encoded form.
    #[serde(rename = "urlencoded")]
    UrlEncoded {
        /// Form fields in order
        #[serde(default)]
        fields: Vec<FormParam>,
    },
    /// Multipart form.
    #[serde(rename = "formdata")]
    FormData {
        /// Form fields in order
        #[serde(default)]
        fields: Vec<FormDataParam>,
    },
    /// GraphQL body.
    #[serde(rename = "graphql")]
    GraphQl {
        /// The query document
        #[serde(default)]
        query: String,
        /// Variables as JSON text; may be empty or malformed
        #[serde(default)]
        variables: String,
    },
    /// Binary file body.
    File {
        /// Path of the file, when one was chosen
        #[serde(default, skip_serializing_if = "Option::is_none")]
        src: Option<String>,
    },
}

impl RequestBody {
    /// Creates a raw body without a language hint.
    #[must_use]
    pub fn raw(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            language: None,
        }
    }

    /// Creates a raw JSON body.
    #[must_use]
    pub fn json(content: impl Into<String>) -> Self {
        Self::Raw {
            content: content.into(),
            language: Some("json".to_string()),
        }
    }

    /// Creates a url-encoded body.
    #[must_use]
    pub fn urlencoded(fields: impl IntoIterator<Item = FormParam>) -> Self {
        Self::UrlEncoded {
            fields: fields.into_iter().collect(),
        }
    }

    /// Creates a multipart body.
    #[must_use]
    pub fn form_data(fields: impl IntoIterator<Item = FormDataParam>) -> Self {
        Self::FormData {
            fields: fields.into_iter().collect(),
        }
    }

    /// Creates a GraphQL body.
    #[must_use]
    pub fn graphql(query: impl Into<String>, variables: impl Into<String>) -> Self {
        Self::GraphQl {
            query: query.into(),
            variables: variables.into(),
        }
    }

    /// Creates a file body.
    #[must_use]
    pub fn file(src: impl Into<String>) -> Self {
        Self::File {
            src: Some(src.into()),
        }
    }

    /// Returns the mode of this body.
    #[must_use]
    pub const fn mode(&self) -> BodyMode {
        match self {
            Self::Raw { .. } => BodyMode::Raw,
            Self::UrlEncoded { .. } => BodyMode::UrlEncoded,
            Self::FormData { .. } => BodyMode::FormData,
            Self::GraphQl { .. } => BodyMode::GraphQl,
            Self::File { .. } => BodyMode::File,
        }
    }

    /// Returns whether the body would send nothing.
    ///
    /// A raw body with empty text, or a form whose fields are all disabled,
    /// counts as empty. GraphQL and file bodies always send something.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        match self {
            Self::Raw { content, .. } => content.is_empty(),
            Self::UrlEncoded { fields } => !fields.iter().any(|f| f.enabled),
            Self::FormData { fields } => !fields.iter().any(|f| f.enabled),
            Self::GraphQl { .. } | Self::File { .. } => false,
        }
    }

    /// Returns the content type implied by the body when no header sets one.
    ///
    /// Multipart bodies return `None`: the boundary is chosen by the client
    /// library at send time.
    #[must_use]
    pub fn default_content_type(&self) -> Option<&'static str> {
        match self {
            Self::Raw { language, .. } => Some(raw_language_content_type(language.as_deref())),
            Self::UrlEncoded { .. } => Some("application/x-www-form-urlencoded"),
            Self::FormData { .. } => None,
            Self::GraphQl { .. } => Some("application/json"),
            Self::File { .. } => Some("text/plain"),
        }
    }
}

fn raw_language_content_type(language: Option<&str>) -> &'static str {
    match language {
        Some("json") => "application/json",
        Some("xml") => "application/xml",
        Some("html") => "text/html",
        Some("javascript") => "application/javascript",
        _ => "text/plain",
    }
}
