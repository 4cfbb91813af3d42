//! Diagnostics recorded while scanning
//!
//! The recognizer never fails. Lookahead that could not be resolved and
//! shapes the automaton does not expect are recorded here and the scan
//! carries on.

use std::fmt;

use text_size::{TextRange, TextSize};

use super::codes::ErrorCode;

/// Severity level for diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Severity {
    /// An invariant of the automaton was violated
    #[default]
    Error,
    /// Input was ambiguous and resolved conservatively
    Warning,
    /// An informational hint
    Hint,
}

impl Severity {
    pub fn is_error(&self) -> bool {
        matches!(self, Self::Error)
    }

    /// Lowercase label used when rendering
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Error => "error",
            Self::Warning => "warning",
            Self::Hint => "hint",
        }
    }
}

/// A diagnostic produced by the recognizer
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScanDiagnostic {
    pub message: String,
    /// Tokens the diagnostic covers
    pub range: TextRange,
    pub code: ErrorCode,
    pub severity: Severity,
    /// Optional explanation of how the scan recovered
    pub hint: Option<String>,
}

impl ScanDiagnostic {
    pub fn new(message: impl Into<String>, range: TextRange, code: ErrorCode) -> Self {
        Self {
            message: message.into(),
            range,
            code,
            severity: Severity::Error,
            hint: None,
        }
    }

    pub fn builder(code: ErrorCode) -> ScanDiagnosticBuilder {
        ScanDiagnosticBuilder::new(code)
    }

    pub fn has_hint(&self) -> bool {
        self.hint.is_some()
    }
}

impl fmt::Display for ScanDiagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}: {} at {:?}",
            self.severity.as_str(),
            self.code,
            self.message,
            self.range
        )?;
        if let Some(hint) = &self.hint {
            write!(f, "\n  hint: {}", hint)?;
        }
        Ok(())
    }
}

/// Builder for [`ScanDiagnostic`]
pub struct ScanDiagnosticBuilder {
    code: ErrorCode,
    message: Option<String>,
    range: Option<TextRange>,
    severity: Severity,
    hint: Option<String>,
}

impl ScanDiagnosticBuilder {
    pub fn new(code: ErrorCode) -> Self {
        Self {
            code,
            message: None,
            range: None,
            severity: Severity::Error,
            hint: None,
        }
    }

    pub fn message(mut self, message: impl Into<String>) -> Self {
        self.message = Some(message.into());
        self
    }

    pub fn range(mut self, range: TextRange) -> Self {
        self.range = Some(range);
        self
    }

    /// Empty range at `offset`
    pub fn at_offset(mut self, offset: TextSize) -> Self {
        self.range = Some(TextRange::empty(offset));
        self
    }

    pub fn severity(mut self, severity: Severity) -> Self {
        self.severity = severity;
        self
    }

    pub fn hint(mut self, hint: impl Into<String>) -> Self {
        self.hint = Some(hint.into());
        self
    }

    /// Build the diagnostic, falling back to the code's default message
    pub fn build(self) -> ScanDiagnostic {
        ScanDiagnostic {
            message: self
                .message
                .unwrap_or_else(|| self.code.default_message().to_string()),
            range: self
                .range
                .unwrap_or_else(|| TextRange::empty(TextSize::new(0))),
            code: self.code,
            severity: self.severity,
            hint: self.hint,
        }
    }
}
