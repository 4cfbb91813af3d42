//! # cxxsense-base
//!
//! Incremental C/C++ expression recognizer for code completion.
//!
//! ## Module Structure (dependency order)
//!
//! ```text
//! scan        → Driver: lex, expand macros, feed tokens up to the cursor
//!   ↓
//! completion  → Lookaheads, stack automaton, end-of-scan closure, results
//!   ↓
//! expr        → Arena of expression nodes, kinds, operator precedence
//!   ↓
//! lexer       → Logos lexer, TokenKind
//!   ↓
//! base        → Primitives (TextRange, builtin type table)
//! ```

// ============================================================================
// MODULES (dependency order: base → lexer → expr → completion → scan)
// ============================================================================

/// Foundation types: TextRange, TextSize, builtin types
pub mod base;

/// Feature flags and dialect presets
pub mod config;

/// Error codes, diagnostics and driver errors
pub mod errors;

/// Logos lexer for C and C++
pub mod lexer;

/// Expression nodes, arena and precedence table
pub mod expr;

/// Token processor: lookaheads, automaton, finalization
pub mod completion;

/// Scan driver and macro expansion
pub mod scan;

// Re-export commonly needed items
pub use completion::{CompletionTokenProcessor, ScanResult, SourceToken, TokenProcessor};
pub use config::{Dialect, ScanOptions};
pub use errors::{ErrorCode, OptionsError, ScanDiagnostic, ScanError, Severity};
pub use expr::{ExprArena, ExprId, ExprKind, ExprNode, ExprToken};
pub use lexer::{Token, TokenKind, tokenize};
pub use scan::{MacroExpander, MacroTable, scan, scan_expression, scan_range};

// Re-export foundation types
pub use base::{TextRange, TextSize};
