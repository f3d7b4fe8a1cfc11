//! Code generation targets.
//!
//! A target is one language/library pair that a converter renders requests
//! into, such as C# with `HttpClient` or Go with `net/http`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::{DomainError, DomainResult};

/// Supported language/library pairs for snippet generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CodegenTarget {
    /// C# with `System.Net.Http.HttpClient`
    CsharpHttpclient,
    /// C# on .NET Core with `HttpClient` and `HttpClientHandler`
    CsharpDotnetcore,
    /// Dart with `package:http`
    DartHttp,
    /// Go with `net/http`
    GoNative,
}

impl CodegenTarget {
    /// Returns the stable identifier (e.g. `csharp-httpclient`).
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::CsharpHttpclient => "csharp-httpclient",
            Self::CsharpDotnetcore => "csharp-dotnetcore",
            Self::DartHttp => "dart-http",
            Self::GoNative => "go-native",
        }
    }

    /// Get display name for the target.
    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::CsharpHttpclient => "C# (HttpClient)",
            Self::CsharpDotnetcore => "C# (.NET Core HttpClient)",
            Self::DartHttp => "Dart (http)",
            Self::GoNative => "Go (net/http)",
        }
    }

    /// Get the language label.
    #[must_use]
    pub const fn language(self) -> &'static str {
        match self {
            Self::CsharpHttpclient | Self::CsharpDotnetcore => "csharp",
            Self::DartHttp => "dart",
            Self::GoNative => "go",
        }
    }

    /// Get the library label within the language.
    #[must_use]
    pub const fn variant(self) -> &'static str {
        match self {
            Self::CsharpHttpclient => "HttpClient",
            Self::CsharpDotnetcore => "DotNetCore",
            Self::DartHttp => "http",
            Self::GoNative => "Native",
        }
    }

    /// Get file extension for the language.
    #[must_use]
    pub const fn file_extension(self) -> &'static str {
        match self {
            Self::CsharpHttpclient | Self::CsharpDotnetcore => "cs",
            Self::DartHttp => "dart",
            Self::GoNative => "go",
        }
    }

    /// Get all available targets.
    #[must_use]
    pub const fn all() -> &'static [Self] {
        &[
            Self::CsharpHttpclient,
            Self::CsharpDotnetcore,
            Self::DartHttp,
            Self::GoNative,
        ]
    }
}

impl fmt::Display for CodegenTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.display_name())
    }
}

impl FromStr for CodegenTarget {
    type Err = DomainError;

    /// Accepts the stable key, or `language-variant` in any casing
    /// (`csharp-HttpClient`, `go-native`).
    fn from_str(s: &str) -> DomainResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::all()
            .iter()
            .copied()
            .find(|t| {
                t.key() == wanted
                    || format!("{}-{}", t.language(), t.variant()).to_ascii_lowercase() == wanted
            })
            .ok_or_else(|| DomainError::UnknownTarget(s.to_string()))
    }
}
