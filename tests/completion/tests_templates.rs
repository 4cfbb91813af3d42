//! Template argument lookahead: `<` as argument list or comparison

#![allow(clippy::unwrap_used)]

use cxxsense::{ErrorCode, ExprKind, ScanOptions, Severity};

use crate::helpers::scan_helpers::{assert_reported, render, scan_c, scan_cpp, scan_to_end};

// ============================================================================
// Resolved argument lists
// ============================================================================

#[test]
fn test_balanced_arguments_form_generic_type() {
    let result = scan_cpp("List<int>");
    assert_eq!(render(&result), "(GENERIC_TYPE < > (VARIABLE List) (TYPE int))");
    assert_eq!(result.stack().len(), 1);
    assert!(result.diagnostics().is_empty());
}

#[test]
fn test_templates_off_reads_comparisons() {
    let result = scan_c("List<int>");
    assert_eq!(
        render(&result),
        "(OPERATOR > (OPERATOR < (VARIABLE List) (TYPE int)) (VARIABLE))"
    );
}

#[test]
fn test_scoped_generic_followed_by_scope() {
    let result = scan_cpp("std::vector<int>::");
    assert_eq!(
        render(&result),
        "(SCOPE :: :: (VARIABLE std) (GENERIC_TYPE < > (VARIABLE vector) (TYPE int)) (VARIABLE))"
    );
}

#[test]
fn test_unresolved_arguments_close_at_cursor() {
    let result = scan_cpp("f(a<b");
    let top = result.result_node().unwrap();
    assert_eq!(top.kind, ExprKind::METHOD);
    let argument = result.node(top.params[1]);
    assert_eq!(argument.kind, ExprKind::GENERIC_TYPE);
    assert!(argument.implicitly_closed);
}

// ============================================================================
// Abandoned lookahead
// ============================================================================

#[test]
fn test_semicolon_abandons_argument_list() {
    let result = scan_cpp("a < b; x");
    assert_eq!(render(&result), "(VARIABLE x)");
    assert_reported(&result, ErrorCode::E0203);
    let diagnostic = &result.diagnostics()[0];
    assert_eq!(diagnostic.severity, Severity::Hint);
    assert_eq!(result.last_separator_offset().map(u32::from), Some(5));
}

#[test]
fn test_unmatched_closer_at_end_replays_as_comparison() {
    let result = scan_cpp("a<(b>");
    assert_reported(&result, ErrorCode::E0201);
    assert_eq!(
        render(&result),
        "(OPERATOR < (VARIABLE a) (PARENTHESIS ( (OPERATOR > (VARIABLE b) (VARIABLE))))"
    );
}

#[test]
fn test_cast_brackets_do_not_start_lookahead() {
    let with = scan_to_end("static_cast<int>(x)", ScanOptions::all());
    let without = scan_to_end("static_cast<int>(x)", ScanOptions::default());
    assert_eq!(render(&with), render(&without));
    assert!(with.diagnostics().is_empty());
}
