//! Recognizer tests
//!
//! Tests for the completion token processor:
//! - Operator precedence and associativity
//! - Template argument lookahead
//! - Lambda introducer lookahead
//! - Member access, scope and calls
//! - Casts, literals and initializers
//! - Error recovery and end-of-scan closure

pub mod tests_casts;
pub mod tests_determinism;
pub mod tests_lambdas;
pub mod tests_literals;
pub mod tests_member_access;
pub mod tests_precedence;
pub mod tests_recovery;
pub mod tests_templates;
