//! Error handling for the recognizer
//!
//! - Categorized error codes for scan diagnostics
//! - Diagnostics with severity and recovery hints
//! - `thiserror` error enums for the driver and option parsing

mod codes;
mod diagnostic;
mod error;

pub use codes::ErrorCode;
pub use diagnostic::{ScanDiagnostic, ScanDiagnosticBuilder, Severity};
pub use error::{OptionsError, ScanError};

#[cfg(test)]
mod tests;
