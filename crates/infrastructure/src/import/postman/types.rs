//! Postman Collection v2.1 Type Definitions
//!
//! Only the parts of the format that describe a request are modelled.
//! All types use `#[serde(default)]` extensively to handle format variations gracefully.

#![allow(missing_docs)]

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Root structure for Postman Collection v2.1
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanCollection {
    pub info: PostmanInfo,
    #[serde(default)]
    pub item: Vec<PostmanItem>,
}

/// Collection metadata
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanInfo {
    pub name: String,
    #[serde(default)]
    pub schema: Option<String>,
}

/// An item can be either a folder (containing more items) or a request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanItem {
    #[serde(default)]
    pub name: String,
    /// If present, this item is a folder containing sub-items
    #[serde(default)]
    pub item: Option<Vec<Self>>,
    /// If present, this item is a request
    #[serde(default)]
    pub request: Option<PostmanRequest>,
    /// Events (scripts) attached to this item
    #[serde(default)]
    pub event: Vec<Value>,
}

impl PostmanItem {
    /// Returns true if this item is a folder (has sub-items)
    #[must_use]
    pub const fn is_folder(&self) -> bool {
        self.item.is_some()
    }
}

/// Postman Request definition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanRequest {
    #[serde(default = "default_method")]
    pub method: String,
    #[serde(default)]
    pub url: PostmanUrl,
    #[serde(default)]
    pub header: Vec<PostmanHeader>,
    #[serde(default)]
    pub body: Option<PostmanBody>,
    /// Auth blocks are not rendered into snippets; kept to warn about them
    #[serde(default)]
    pub auth: Option<Value>,
}

fn default_method() -> String {
    "GET".to_string()
}

/// URL can be either a simple string or a structured object
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PostmanUrl {
    #[default]
    Empty,
    Simple(String),
    Structured(PostmanUrlStructured),
}

impl PostmanUrl {
    /// Returns the URL as text, rebuilding it from its parts when `raw` is missing.
    #[must_use]
    pub fn raw(&self) -> String {
        match self {
            Self::Empty => String::new(),
            Self::Simple(s) => s.clone(),
            Self::Structured(s) => s.raw.clone().unwrap_or_else(|| s.assemble()),
        }
    }
}

/// Structured URL object
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostmanUrlStructured {
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub protocol: Option<String>,
    #[serde(default)]
    pub host: Vec<String>,
    #[serde(default)]
    pub port: Option<String>,
    #[serde(default)]
    pub path: Vec<String>,
    #[serde(default)]
    pub query: Vec<PostmanQueryParam>,
    #[serde(default)]
    pub hash: Option<String>,
}

impl PostmanUrlStructured {
    fn assemble(&self) -> String {
        let mut url = String::new();
        if let Some(protocol) = &self.protocol {
            url.push_str(protocol);
            url.push_str("://");
        }
        url.push_str(&self.host.join("."));
        if let Some(port) = &self.port {
            url.push(':');
            url.push_str(port);
        }
        if !self.path.is_empty() {
            url.push('/');
            url.push_str(&self.path.join("/"));
        }
        let query: Vec<String> = self
            .query
            .iter()
            .filter(|q| !q.disabled)
            .map(|q| match &q.value {
                Some(value) => format!("{}={value}", q.key),
                None => q.key.clone(),
            })
            .collect();
        if !query.is_empty() {
            url.push('?');
            url.push_str(&query.join("&"));
        }
        if let Some(hash) = &self.hash {
            url.push('#');
            url.push_str(hash);
        }
        url
    }
}

/// Query parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanQueryParam {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// Request header
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanHeader {
    pub key: String,
    #[serde(default)]
    pub value: String,
    #[serde(default)]
    pub disabled: bool,
}

/// Request body
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct PostmanBody {
    #[serde(default)]
    pub mode: Option<String>,
    #[serde(default)]
    pub raw: Option<String>,
    #[serde(default)]
    pub urlencoded: Vec<PostmanFormParam>,
    #[serde(default)]
    pub formdata: Vec<PostmanFormDataParam>,
    #[serde(default)]
    pub file: Option<PostmanBodyFile>,
    #[serde(default)]
    pub graphql: Option<PostmanGraphQL>,
    #[serde(default)]
    pub options: Option<PostmanBodyOptions>,
    #[serde(default)]
    pub disabled: bool,
}

impl PostmanBody {
    /// Returns the raw-language hint from the body options.
    #[must_use]
    pub fn raw_language(&self) -> Option<String> {
        self.options
            .as_ref()
            .and_then(|o| o.raw.as_ref())
            .and_then(|r| r.language.clone())
    }
}

/// Form URL-encoded parameter
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanFormParam {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub disabled: bool,
}

/// Form-data parameter (supports file uploads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanFormDataParam {
    pub key: String,
    #[serde(default)]
    pub value: Option<String>,
    #[serde(default)]
    pub src: PostmanSrc,
    #[serde(rename = "type", default)]
    pub param_type: Option<String>,
    #[serde(default)]
    pub disabled: bool,
    #[serde(rename = "contentType", default)]
    pub content_type: Option<String>,
}

/// File source of a form-data field: one path, several, or none
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
#[serde(untagged)]
pub enum PostmanSrc {
    #[default]
    None,
    One(String),
    Many(Vec<String>),
}

impl PostmanSrc {
    /// Returns the paths in order.
    #[must_use]
    pub fn paths(&self) -> Vec<String> {
        match self {
            Self::None => Vec::new(),
            Self::One(path) => vec![path.clone()],
            Self::Many(paths) => paths.clone(),
        }
    }
}

/// Binary file body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanBodyFile {
    #[serde(default)]
    pub src: Option<String>,
}

/// GraphQL body
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanGraphQL {
    #[serde(default)]
    pub query: String,
    /// Either JSON text or an already parsed object
    #[serde(default)]
    pub variables: Option<Value>,
}

impl PostmanGraphQL {
    /// Returns the variables as JSON text.
    #[must_use]
    pub fn variables_text(&self) -> String {
        match &self.variables {
            None | Some(Value::Null) => String::new(),
            Some(Value::String(text)) => text.clone(),
            Some(other) => other.to_string(),
        }
    }
}

/// Body options (e.g., raw language)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanBodyOptions {
    #[serde(default)]
    pub raw: Option<PostmanRawOptions>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostmanRawOptions {
    #[serde(default)]
    pub language: Option<String>,
}
