//! HTTP Method enumeration

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// HTTP method of a request.
///
/// The seven standard methods get their own variants so that targets with
/// dedicated constants (`HttpMethod.Get` in C#) can use them. Anything else
/// is kept verbatim in [`HttpMethod::Custom`].
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum HttpMethod {
    /// HTTP GET method
    #[default]
    Get,
    /// HTTP POST method
    Post,
    /// HTTP PUT method
    Put,
    /// HTTP PATCH method
    Patch,
    /// HTTP DELETE method
    Delete,
    /// HTTP HEAD method
    Head,
    /// HTTP OPTIONS method
    Options,
    /// Any other method token, stored upper-cased (e.g. `PROPFIND`).
    Custom(String),
}

impl HttpMethod {
    /// Returns the standard HTTP methods.
    #[must_use]
    pub const fn standard() -> &'static [Self] {
        &[
            Self::Get,
            Self::Post,
            Self::Put,
            Self::Patch,
            Self::Delete,
            Self::Head,
            Self::Options,
        ]
    }

    /// Returns the method name in upper case.
    #[must_use]
    pub fn as_str(&self) -> &str {
        match self {
            Self::Get => "GET",
            Self::Post => "POST",
            Self::Put => "PUT",
            Self::Patch => "PATCH",
            Self::Delete => "DELETE",
            Self::Head => "HEAD",
            Self::Options => "OPTIONS",
            Self::Custom(token) => token,
        }
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for HttpMethod {
    type Err = DomainError;

    fn from_str(s: &str) -> DomainResult<Self> {
        let upper = s.trim().to_uppercase();
        match upper.as_str() {
            "GET" => Ok(Self::Get),
            "POST" => Ok(Self::Post),
            "PUT" => Ok(Self::Put),
            "PATCH" => Ok(Self::Patch),
            "DELETE" => Ok(Self::Delete),
            "HEAD" => Ok(Self::Head),
            "OPTIONS" => Ok(Self::Options),
            "" => Err(DomainError::UnsupportedMethod(s.to_string())),
            other if !other.chars().all(is_token_char) => {
                Err(DomainError::UnsupportedMethod(s.to_string()))
            }
            other => Ok(Self::Custom(other.to_string())),
        }
    }
}

impl TryFrom<String> for HttpMethod {
    type Error = DomainError;

    fn try_from(value: String) -> DomainResult<Self> {
        value.parse()
    }
}

impl From<HttpMethod> for String {
    fn from(method: HttpMethod) -> Self {
        method.as_str().to_string()
    }
}

// RFC 9110 `tchar`.
const fn is_token_char(c: char) -> bool {
    c.is_ascii_alphanumeric()
        || matches!(
            c,
            '!' | '#' | '$' | '%' | '&' | '\'' | '*' | '+' | '-' | '.' | '^' | '_' | '`' | '|' | '~'
        )
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_method_from_str() {
        assert_eq!("get".parse::<HttpMethod>().unwrap(), HttpMethod::Get);
        assert_eq!("POST".parse::<HttpMethod>().unwrap(), HttpMethod::Post);
        assert_eq!("Put".parse::<HttpMethod>().unwrap(), HttpMethod::Put);
    }

    #[test]
    fn test_custom_method() {
        let method = "notnormal".parse::<HttpMethod>().unwrap();
        assert_eq!(method, HttpMethod::Custom("NOTNORMAL".to_string()));
        assert_eq!(method.to_string(), "NOTNORMAL");
    }

    #[test]
    fn test_invalid_method() {
        assert!("".parse::<HttpMethod>().is_err());
        assert!("GET POST".parse::<HttpMethod>().is_err());
    }

    #[test]
    fn test_method_serde() {
        let method: HttpMethod = serde_json::from_str("\"delete\"").unwrap();
        assert_eq!(method, HttpMethod::Delete);
        assert_eq!(serde_json::to_string(&method).unwrap(), "\"DELETE\"");
    }
}
