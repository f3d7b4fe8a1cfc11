//! Request specification type

use serde::{Deserialize, Serialize};
use url::Url;

use super::{Header, Headers, HttpMethod, RequestBody};
use crate::error::{DomainError, DomainResult};

/// Everything a converter needs to know about one HTTP request.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method
    #[serde(default)]
    pub method: HttpMethod,
    /// Target URL as typed (may contain `{{variable}}` placeholders)
    #[serde(default)]
    pub url: String,
    /// HTTP headers in original order
    #[serde(default)]
    pub headers: Headers,
    /// Request body, `None` when the request has no body
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<RequestBody>,
}

impl Request {
    /// Creates a request with the given method and URL.
    #[must_use]
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Headers::new(),
            body: None,
        }
    }

    /// Creates a GET request with the given URL.
    #[must_use]
    pub fn get(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Get, url)
    }

    /// Creates a POST request with the given URL.
    #[must_use]
    pub fn post(url: impl Into<String>) -> Self {
        Self::new(HttpMethod::Post, url)
    }

    /// Appends a header.
    #[must_use]
    pub fn with_header(mut self, header: Header) -> Self {
        self.headers.add(header);
        self
    }

    /// Sets the body.
    #[must_use]
    pub fn with_body(mut self, body: RequestBody) -> Self {
        self.body = Some(body);
        self
    }

    /// Returns the body if it sends anything.
    #[must_use]
    pub fn effective_body(&self) -> Option<&RequestBody> {
        self.body.as_ref().filter(|b| !b.is_empty())
    }

    /// Returns the content type the generated code should declare.
    ///
    /// An enabled `Content-Type` header wins; otherwise the body mode decides.
    /// A body that sends nothing implies no content type.
    #[must_use]
    pub fn content_type(&self) -> Option<&str> {
        self.headers
            .content_type()
            .or_else(|| self.effective_body().and_then(RequestBody::default_content_type))
    }

    /// Validates the URL and returns parsed version if valid.
    ///
    /// # Errors
    ///
    /// Returns [`DomainError::InvalidUrl`] if the URL is malformed.
    pub fn parse_url(&self) -> DomainResult<Url> {
        Url::parse(&self.url).map_err(|e| DomainError::InvalidUrl(format!("{}: {e}", self.url)))
    }

    /// Returns true if the URL contains variable placeholders.
    #[must_use]
    pub fn has_variables(&self) -> bool {
        self.url.contains("{{") && self.url.contains("}}")
    }
}
