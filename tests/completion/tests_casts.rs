//! Casts, conversions and parenthesized expressions

#![allow(clippy::unwrap_used)]

use cxxsense::ExprKind;

use crate::helpers::scan_helpers::{render, scan_c, scan_cpp};

#[test]
fn test_c_style_cast_leaves_operand_on_top() {
    let result = scan_c("(int)x");
    assert_eq!(result.stack().len(), 2);
    assert_eq!(render(&result), "(VARIABLE x)");
    let cast = result.stack()[0];
    assert_eq!(result.arena().render(cast), "(CONVERSION ( ) (TYPE int))");
}

#[test]
fn test_cast_argument_joins_at_comma() {
    assert_eq!(
        render(&scan_c("f((int)x, y")),
        "(METHOD ( , (VARIABLE f) (CONVERSION ( ) (TYPE int) (VARIABLE x)) (VARIABLE y))"
    );
}

#[test]
fn test_named_cast_wraps_in_parenthesis() {
    let result = scan_cpp("static_cast<int>(x)");
    assert_eq!(
        render(&result),
        "(PARENTHESIS (CONVERSION static_cast < > ( ) (TYPE int) (VARIABLE x)))"
    );
}

#[test]
fn test_parenthesized_expression() {
    let result = scan_c("(a + b)");
    let top = result.result_node().unwrap();
    assert_eq!(top.kind, ExprKind::PARENTHESIS);
    assert_eq!(
        result.arena().render(top.params[0]),
        "(OPERATOR + (VARIABLE a) (VARIABLE b))"
    );
}

#[test]
fn test_open_parenthesis_gets_placeholder() {
    assert_eq!(render(&scan_c("(")), "(PARENTHESIS ( (VARIABLE))");
}

#[test]
fn test_condition_parenthesis() {
    assert_eq!(render(&scan_c("if (x")), "(PARENTHESIS ( (VARIABLE x))");
    assert_eq!(render(&scan_c("while (")), "(PARENTHESIS ( (VARIABLE))");
}
