//! Import Warning System
//!
//! Content that cannot be carried into a [`snipgen_domain::Request`] is
//! reported as a warning instead of failing the import.

use serde::{Deserialize, Serialize};

/// Warning severity levels
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WarningSeverity {
    /// Informational: something was left out on purpose
    Info,
    /// The generated snippet may not match what Postman would send
    Warning,
}

impl std::fmt::Display for WarningSeverity {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Info => write!(f, "info"),
            Self::Warning => write!(f, "warning"),
        }
    }
}

/// An import warning
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportWarning {
    /// Item path inside the collection (e.g. `folder/request/body`)
    pub path: String,
    /// Human-readable description of the issue
    pub message: String,
    /// Severity level
    pub severity: WarningSeverity,
}

impl ImportWarning {
    /// Creates an info-level warning and logs it.
    pub fn info(path: impl Into<String>, message: impl Into<String>) -> Self {
        let warning = Self {
            path: path.into(),
            message: message.into(),
            severity: WarningSeverity::Info,
        };
        tracing::debug!(path = %warning.path, "{}", warning.message);
        warning
    }

    /// Creates a warning-level warning and logs it.
    pub fn warning(path: impl Into<String>, message: impl Into<String>) -> Self {
        let warning = Self {
            path: path.into(),
            message: message.into(),
            severity: WarningSeverity::Warning,
        };
        tracing::warn!(path = %warning.path, "{}", warning.message);
        warning
    }
}

impl std::fmt::Display for ImportWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}] {}: {}", self.severity, self.path, self.message)
    }
}
