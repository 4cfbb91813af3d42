//! Lambda introducer lookahead and lambda bodies

#![allow(clippy::unwrap_used)]

use cxxsense::{ErrorCode, ExprKind, ScanOptions, Severity};

use crate::helpers::scan_helpers::{assert_reported, render, scan_cpp, scan_to_end};

#[test]
fn test_empty_lambda_collapses_to_one_node() {
    let result = scan_cpp("[](){}");
    assert_eq!(render(&result), "(LAMBDA_FUNCTION [ ] { })");
    assert_eq!(result.stack().len(), 1);
}

#[test]
fn test_subscript_after_name_is_not_a_lambda() {
    let result = scan_cpp("a[0]");
    assert_eq!(render(&result), "(ARRAY [ ] (VARIABLE a) (CONSTANT 0))");
    assert!(result.diagnostics().is_empty());
}

#[test]
fn test_completion_inside_lambda_body() {
    let result = scan_cpp("x = [&](int a) { return a");
    assert_eq!(render(&result), "(VARIABLE a)");
    assert_eq!(result.stack().len(), 1);
    assert_eq!(result.last_separator_offset().map(u32::from), Some(17));
    assert!(result.is_completable());
}

#[test]
fn test_closed_body_restores_enclosing_call() {
    let result = scan_cpp("f([](int a){ return a; }, b");
    assert_eq!(
        render(&result),
        "(METHOD ( , (VARIABLE f) (LAMBDA_FUNCTION [ ] { }) (VARIABLE b))"
    );
}

#[test]
fn test_braces_inside_body_do_not_close_it() {
    let result = scan_cpp("[]{ { } x");
    assert_eq!(render(&result), "(VARIABLE x)");
}

#[test]
fn test_immediately_invoked_lambda() {
    let result = scan_cpp("[](int x){ }(");
    assert_eq!(render(&result), "(LAMBDA_CALL ( (LAMBDA_FUNCTION [ ] { }))");
    let call = result.innermost_call().unwrap();
    assert_eq!(result.node(call).kind, ExprKind::LAMBDA_CALL);
}

#[test]
fn test_incomplete_introducer_is_replayed() {
    let result = scan_cpp("x = [a");
    assert_reported(&result, ErrorCode::E0202);
    let diagnostic = result
        .diagnostics()
        .iter()
        .find(|d| d.code == ErrorCode::E0202)
        .unwrap();
    assert_eq!(diagnostic.severity, Severity::Warning);
    assert_eq!(render(&result), "(VARIABLE a)");
}

#[test]
fn test_lambdas_off_never_buffer() {
    let result = scan_to_end("x = [a", ScanOptions::all().with_lambdas(false));
    assert!(result.diagnostics().is_empty());
}
