//! Integration tests for the errors module

use super::*;
use text_size::{TextRange, TextSize};

#[test]
fn test_error_module_exports() {
    let _code = ErrorCode::E0101;
    let _severity = Severity::Warning;
    let _diag = ScanDiagnostic::new("x", TextRange::empty(TextSize::new(0)), ErrorCode::E0202);
    let _err = ScanError::NotCharBoundary(TextSize::new(1));
    let _opt = OptionsError::UnknownFeature("x".into());
}

#[test]
fn test_lookahead_diagnostic_workflow() {
    let lt = TextRange::new(TextSize::new(4), TextSize::new(5));
    let diag = ScanDiagnostic::builder(ErrorCode::E0201)
        .range(lt)
        .severity(Severity::Warning)
        .hint("template arguments disabled up to the mismatched token")
        .build();

    assert_eq!(diag.code.category_description(), "lookahead error");
    assert!(!diag.severity.is_error());
    assert!(diag.has_hint());
    assert_eq!(diag.range, lt);
}

#[test]
fn test_scan_error_messages() {
    let err = ScanError::CursorOutOfBounds {
        cursor: TextSize::new(10),
        len: TextSize::new(4),
    };
    assert!(err.to_string().contains("past the end"));

    let err = ScanError::StartAfterCursor {
        start: TextSize::new(5),
        cursor: TextSize::new(2),
    };
    assert!(err.to_string().contains("after the cursor"));

    let err = OptionsError::UnknownFeature("concepts".into());
    assert_eq!(err.to_string(), "unknown scan feature: concepts");
}

#[test]
fn test_error_code_exhaustiveness() {
    let codes = [
        ErrorCode::E0101,
        ErrorCode::E0102,
        ErrorCode::E0201,
        ErrorCode::E0202,
        ErrorCode::E0203,
        ErrorCode::E0301,
        ErrorCode::E0302,
    ];
    for code in codes {
        assert!(code.as_str().starts_with('E'));
        assert!(!code.default_message().is_empty());
        assert!(!code.category_description().is_empty());
    }
}
