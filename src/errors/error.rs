//! Errors returned by the fallible entry points

use text_size::TextSize;
use thiserror::Error;

/// Errors raised by the scan driver before any token is fed
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ScanError {
    /// Cursor lies beyond the end of the buffer.
    #[error("cursor {cursor:?} is past the end of the buffer ({len:?})")]
    CursorOutOfBounds { cursor: TextSize, len: TextSize },

    /// Offset splits a multi-byte character.
    #[error("offset {0:?} is not on a char boundary")]
    NotCharBoundary(TextSize),

    /// Scan start lies after the cursor.
    #[error("scan start {start:?} is after the cursor {cursor:?}")]
    StartAfterCursor { start: TextSize, cursor: TextSize },
}

/// Errors raised while parsing a feature list into options
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OptionsError {
    /// Feature name is not known.
    #[error("unknown scan feature: {0}")]
    UnknownFeature(String),

    /// Dialect name is not known.
    #[error("unknown dialect: {0}")]
    UnknownDialect(String),
}
