//! Member access, scope resolution and calls

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use cxxsense::ExprKind;

use crate::helpers::scan_helpers::{render, scan_c, scan_cpp};

#[rstest]
#[case("a.", "(DOT . (VARIABLE a) (VARIABLE))")]
#[case("p->next->", "(ARROW -> -> (VARIABLE p) (VARIABLE next) (VARIABLE))")]
#[case("a.b", "(DOT . (VARIABLE a) (VARIABLE b))")]
#[case("p->~", "(ARROW -> (VARIABLE p) (VARIABLE ~))")]
fn test_access_chains(#[case] source: &str, #[case] expected: &str) {
    let result = scan_c(source);
    assert_eq!(render(&result), expected);
    assert_eq!(result.stack().len(), 1);
}

// ============================================================================
// Pointer-to-member and destructor names
// ============================================================================

#[rstest]
#[case("a.*pm(", "(DOT .* (VARIABLE a) (METHOD ( (VARIABLE pm)))")]
#[case("p->*pm", "(ARROW ->* (VARIABLE p) (VARIABLE pm))")]
#[case("x.~Foo(", "(DOT . (VARIABLE x) (METHOD ( (VARIABLE ~Foo)))")]
#[case("~Foo(", "(METHOD ( (VARIABLE ~Foo))")]
fn test_member_pointers_and_destructors(#[case] source: &str, #[case] expected: &str) {
    let result = scan_c(source);
    assert_eq!(render(&result), expected);
    assert_eq!(result.stack().len(), 1);
}

#[test]
fn test_access_inside_binary_operator() {
    assert_eq!(
        render(&scan_c("a.b + c.")),
        "(OPERATOR + (DOT . (VARIABLE a) (VARIABLE b)) (DOT . (VARIABLE c) (VARIABLE)))"
    );
}

#[test]
fn test_access_inside_open_call() {
    let result = scan_c("obj.method(a, b.");
    assert_eq!(
        render(&result),
        "(DOT . (VARIABLE obj) (METHOD ( , (VARIABLE method) (VARIABLE a) (DOT . (VARIABLE b) (VARIABLE))))"
    );
    let call = result.innermost_call().unwrap();
    let name = result.node(call).params[0];
    assert_eq!(result.node(name).text(), "method");
}

#[test]
fn test_open_member_call() {
    let result = scan_c("a.b(");
    assert_eq!(render(&result), "(DOT . (VARIABLE a) (METHOD ( (VARIABLE b)))");
    assert!(result.innermost_call().is_some());
}

#[test]
fn test_closed_call_is_not_innermost() {
    let result = scan_c("f(x)");
    assert_eq!(render(&result), "(METHOD ( ) (VARIABLE f) (VARIABLE x))");
    assert_eq!(result.innermost_call(), None);
}

#[test]
fn test_placeholder_sits_at_cursor() {
    let source = "ptr->";
    let result = scan_c(source);
    let top = result.result_exp().unwrap();
    assert_eq!(result.node(top).kind, ExprKind::ARROW);
    let placeholder = result.arena().last_param(top).unwrap();
    assert_eq!(result.node(placeholder).offset().map(u32::from), Some(5));
}

// ============================================================================
// new
// ============================================================================

#[test]
fn test_open_constructor_call() {
    let result = scan_cpp("new Foo(");
    assert_eq!(render(&result), "(CONSTRUCTOR new (METHOD ( (VARIABLE Foo)))");
    let call = result.innermost_call().unwrap();
    assert_eq!(result.node(call).kind, ExprKind::METHOD);
}

#[test]
fn test_closed_constructor_call() {
    assert_eq!(
        render(&scan_cpp("new Foo(a)")),
        "(CONSTRUCTOR new (METHOD ( ) (VARIABLE Foo) (VARIABLE a)))"
    );
}
