//! Error code definitions for scan diagnostics
//!
//! Error codes follow a naming convention: E{category}{number}
//! - E01xx: Transition errors (no rule for a token, recovered locally)
//! - E02xx: Lookahead errors (ambiguous brackets still open at the end)
//! - E03xx: Invariant errors (stack shapes the automaton never builds)

use std::fmt;

/// Error codes for scan diagnostics
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // =========================================================================
    // E01xx: Transition errors
    // =========================================================================
    /// No transition for the token, the stack was discarded
    E0101,
    /// The pointer-declarator reading was retried as an expression
    E0102,

    // =========================================================================
    // E02xx: Lookahead errors
    // =========================================================================
    /// Template argument lookahead never balanced before the end of the scan
    E0201,
    /// Lambda introducer lookahead never reached a body before the end of the scan
    E0202,
    /// Template argument lookahead abandoned on an unbalanced closer
    E0203,

    // =========================================================================
    // E03xx: Invariant errors
    // =========================================================================
    /// Lambda introducer collapsed without its capture brackets
    E0301,
    /// Lambda body closed without an open body frame
    E0302,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::E0101 => "E0101",
            Self::E0102 => "E0102",
            Self::E0201 => "E0201",
            Self::E0202 => "E0202",
            Self::E0203 => "E0203",
            Self::E0301 => "E0301",
            Self::E0302 => "E0302",
        }
    }

    /// Category of the leading digits
    pub fn category_description(&self) -> &'static str {
        match self {
            Self::E0101 | Self::E0102 => "transition error",
            Self::E0201 | Self::E0202 | Self::E0203 => "lookahead error",
            Self::E0301 | Self::E0302 => "invariant error",
        }
    }

    /// Message used when a diagnostic is built without one
    pub fn default_message(&self) -> &'static str {
        match self {
            Self::E0101 => "unexpected token, expression stack discarded",
            Self::E0102 => "declarator reparsed as expression",
            Self::E0201 => "unbalanced template argument list",
            Self::E0202 => "incomplete lambda introducer",
            Self::E0203 => "template argument list abandoned",
            Self::E0301 => "malformed lambda introducer",
            Self::E0302 => "unbalanced lambda body",
        }
    }

    /// Check if this is an invariant violation rather than a malformed input
    pub fn is_invariant(&self) -> bool {
        matches!(self, Self::E0301 | Self::E0302)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
