//! Error recovery, the alternative parse and end-of-scan anchoring

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use cxxsense::ExprKind;

use crate::helpers::scan_helpers::{render, scan_c, scan_cpp};

#[test]
fn test_bare_semicolon_anchors_cursor() {
    let result = scan_c(";");
    assert!(!result.is_error_state());
    assert_eq!(result.last_separator_offset().map(u32::from), Some(0));
    assert_eq!(render(&result), "(VARIABLE)");
    assert!(result.result_node().unwrap().is_placeholder());
}

#[test]
fn test_statement_boundary_discards_previous_expression() {
    let result = scan_c("a + b; c.");
    assert_eq!(render(&result), "(DOT . (VARIABLE c) (VARIABLE))");
    assert_eq!(result.stack().len(), 1);
    assert_eq!(result.last_separator_offset().map(u32::from), Some(5));
}

#[test]
fn test_pointer_declarator_retried_as_multiplication() {
    let result = scan_c("foo(a * 5)");
    assert_eq!(
        render(&result),
        "(METHOD ( ) (VARIABLE foo) (OPERATOR * (VARIABLE a) (CONSTANT 5)))"
    );
    let operand = result.node(result.result_node().unwrap().params[1]).params[0];
    assert_eq!(result.arena().type_hint(operand), None);
}

#[test]
fn test_pointer_parameter_stays_a_type() {
    let result = scan_c("foo(a * b");
    let top = result.result_node().unwrap();
    assert_eq!(top.kind, ExprKind::METHOD);
    let parameter = result.node(top.params[1]);
    assert_eq!(parameter.kind, ExprKind::VARIABLE);
    assert_eq!(result.node(parameter.params[0]).kind, ExprKind::TYPE_REFERENCE);
}

#[test]
fn test_identifier_after_error_restarts() {
    let result = scan_c("a b");
    assert!(!result.is_error_state());
    assert_eq!(render(&result), "(VARIABLE b)");
}

#[rstest]
#[case("x = ")]
#[case("f(a, ")]
#[case("return ")]
#[case("{")]
fn test_cursor_after_separator_gets_placeholder(#[case] source: &str) {
    let result = scan_cpp(source);
    let top = result.result_exp().unwrap();
    let last = match result.arena().last_param(top) {
        Some(param) if result.node(top).kind != ExprKind::VARIABLE => param,
        _ => top,
    };
    assert!(result.node(last).is_placeholder(), "{}", result);
}

#[test]
fn test_goto_label() {
    assert_eq!(render(&scan_c("goto out")), "(LABEL goto (VARIABLE out))");
}

#[test]
fn test_keyword_under_cursor_is_an_identifier() {
    let result = scan_c("a.new");
    assert_eq!(render(&result), "(DOT . (VARIABLE a) (VARIABLE new))");
}

#[test]
fn test_every_node_is_closed_after_end() {
    let result = scan_cpp("f(g(a.b[c");
    let mut pending: Vec<_> = result.stack().to_vec();
    while let Some(id) = pending.pop() {
        let node = result.node(id);
        assert!(!node.kind.is_open(), "{:?} left open", node.kind);
        pending.extend_from_slice(&node.params);
    }
}
