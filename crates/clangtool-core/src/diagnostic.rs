use serde::{Deserialize, Serialize};

use crate::SourceLocation;

/// Diagnostic severity, ordered from least to most severe.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    Note,
    Warning,
    Error,
    Fatal,
}

impl Severity {
    /// `true` for `Error` and `Fatal`.
    #[inline]
    pub fn is_error(self) -> bool {
        self >= Severity::Error
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Severity::Note => "note",
            Severity::Warning => "warning",
            Severity::Error => "error",
            Severity::Fatal => "fatal",
        }
    }
}

/// A diagnostic captured when a translation unit was parsed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnostic {
    pub location: SourceLocation,
    pub severity: Severity,
    /// The message as the front end formats it (location and category included).
    pub text: String,
    /// The bare message.
    pub summary: String,
}

impl Diagnostic {
    pub fn new(
        location: SourceLocation,
        severity: Severity,
        text: impl Into<String>,
        summary: impl Into<String>,
    ) -> Self {
        Self {
            location,
            severity,
            text: text.into(),
            summary: summary.into(),
        }
    }
}
