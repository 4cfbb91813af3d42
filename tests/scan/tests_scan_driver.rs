//! Driver entry points: scan, scan_range, scan_expression

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use cxxsense::{
    Dialect, ExprKind, MacroTable, ScanError, ScanOptions, TextSize, scan, scan_expression,
    scan_range,
};

use crate::helpers::scan_helpers::{render, scan_c, scan_cpp};

// ============================================================================
// Cursor handling
// ============================================================================

#[test]
fn test_cursor_in_the_middle() {
    let source = "obj.field + other";
    let result = scan(source, TextSize::new(6), &ScanOptions::default()).unwrap();
    assert_eq!(render(&result), "(DOT . (VARIABLE obj) (VARIABLE fi))");
    assert_eq!(result.last_token().unwrap().text, "fi");
}

#[test]
fn test_cursor_past_end_is_rejected() {
    let err = scan("abc", TextSize::new(10), &ScanOptions::default()).unwrap_err();
    assert!(matches!(err, ScanError::CursorOutOfBounds { .. }));
}

#[test]
fn test_scan_range_starts_at_statement_boundary() {
    let source = "int x = 1; y->";
    let result = scan_range(
        source,
        TextSize::new(11),
        TextSize::of(source),
        &ScanOptions::for_dialect(Dialect::Cpp11),
        None,
    )
    .unwrap();
    assert_eq!(render(&result), "(ARROW -> (VARIABLE y) (VARIABLE))");
    assert_eq!(result.last_separator_offset(), None);
}

#[test]
fn test_empty_range_anchors_cursor() {
    let result = scan("", TextSize::new(0), &ScanOptions::default()).unwrap();
    assert_eq!(render(&result), "(VARIABLE)");
}

// ============================================================================
// Expression scans
// ============================================================================

#[test]
fn test_expression_scan_keeps_whole_tree() {
    let result = scan_expression("a + b", true, &ScanOptions::default());
    let id = result.expression_result(true).unwrap();
    assert_eq!(
        result.arena().render(id),
        "(OPERATOR + (VARIABLE a) (VARIABLE b))"
    );
}

#[test]
fn test_expression_scan_without_wrapping() {
    let result = scan_expression("a.b", false, &ScanOptions::default());
    let id = result.expression_result(false).unwrap();
    assert_eq!(result.node(id).kind, ExprKind::DOT);
}

// ============================================================================
// Macros
// ============================================================================

#[test]
fn test_object_like_macro_is_expanded() {
    let mut table = MacroTable::new();
    table.define("INSTANCE", "Registry::get()");
    let source = "INSTANCE->";
    let result = scan_range(
        source,
        TextSize::new(0),
        TextSize::of(source),
        &ScanOptions::default(),
        Some(&table),
    )
    .unwrap();
    assert_eq!(
        render(&result),
        "(ARROW :: -> (VARIABLE Registry) (METHOD ( ) (VARIABLE get)) (VARIABLE))"
    );
    let expanded = result.node(result.result_node().unwrap().params[0]);
    assert_eq!(expanded.offset(), Some(TextSize::new(0)));
}

#[test]
fn test_identifier_under_cursor_is_not_expanded() {
    let table: MacroTable = [("FOO", "1")].into_iter().collect();
    let source = "FOO";
    let result = scan_range(
        source,
        TextSize::new(0),
        TextSize::of(source),
        &ScanOptions::default(),
        Some(&table),
    )
    .unwrap();
    assert_eq!(render(&result), "(VARIABLE FOO)");
}

// ============================================================================
// Completability
// ============================================================================

#[rstest]
#[case("a.", true)]
#[case("x // comment", false)]
#[case("x /* open", false)]
#[case("s = \"abc", false)]
#[case("#include", false)]
#[case("#inc", true)]
fn test_is_completable(#[case] source: &str, #[case] expected: bool) {
    assert_eq!(scan_cpp(source).is_completable(), expected, "{:?}", source);
}

#[test]
fn test_innermost_call_through_nested_calls() {
    let result = scan_c("foo(a, bar(b");
    let call = result.innermost_call().unwrap();
    let name = result.node(call).params[0];
    assert_eq!(result.node(name).text(), "bar");
}
