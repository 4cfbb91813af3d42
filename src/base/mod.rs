//! Foundation types for the recognizer.
//!
//! This module provides:
//! - [`TextRange`], [`TextSize`] - Source positions (byte offsets)
//! - [`BuiltinType`] - The process-wide table of builtin C/C++ types and the
//!   type hints attached to literals
//!
//! This module has NO dependencies on the automaton.

mod builtins;

pub use builtins::{BuiltinCategory, BuiltinType, builtin_type, literal_type};
pub use text_size::{TextRange, TextSize};

// Re-export text-size types for convenience
pub use text_size;
