//! Scan driver tests
//!
//! Tests for the public entry points:
//! - Cursor and range handling
//! - Expression scans
//! - Macro expansion
//! - Completability at the cursor

pub mod tests_scan_driver;
