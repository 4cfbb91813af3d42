//! Shared helpers for scan tests

pub mod scan_helpers;
