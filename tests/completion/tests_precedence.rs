//! Operator precedence, associativity and the conditional operator

#![allow(clippy::unwrap_used)]

use rstest::rstest;

use cxxsense::{ExprKind, ScanResult};

use crate::helpers::scan_helpers::{render, scan_c};

// ============================================================================
// Binary operators
// ============================================================================

#[rstest]
#[case("a+b*c", "(OPERATOR + (VARIABLE a) (OPERATOR * (VARIABLE b) (VARIABLE c)))")]
#[case("a*b+c", "(OPERATOR + (OPERATOR * (VARIABLE a) (VARIABLE b)) (VARIABLE c))")]
#[case("a-b-c", "(OPERATOR - (OPERATOR - (VARIABLE a) (VARIABLE b)) (VARIABLE c))")]
#[case("a||b&&c", "(OPERATOR || (VARIABLE a) (OPERATOR && (VARIABLE b) (VARIABLE c)))")]
#[case("a==b|c", "(OPERATOR | (OPERATOR == (VARIABLE a) (VARIABLE b)) (VARIABLE c))")]
#[case("a<<b+c", "(OPERATOR << (VARIABLE a) (OPERATOR + (VARIABLE b) (VARIABLE c)))")]
fn test_binary_precedence(#[case] source: &str, #[case] expected: &str) {
    let result = scan_c(source);
    assert_eq!(render(&result), expected);
    assert_eq!(result.stack().len(), 1);
}

#[rstest]
#[case("a=b=c", "(OPERATOR = (VARIABLE a) (OPERATOR = (VARIABLE b) (VARIABLE c)))")]
#[case("a+=b-=c", "(OPERATOR += (VARIABLE a) (OPERATOR -= (VARIABLE b) (VARIABLE c)))")]
fn test_assignment_is_right_associative(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(&scan_c(source)), expected);
}

#[test]
fn test_assignment_binds_loosest() {
    assert_eq!(
        render(&scan_c("x = a + b")),
        "(OPERATOR = (VARIABLE x) (OPERATOR + (VARIABLE a) (VARIABLE b)))"
    );
}

// ============================================================================
// Unary operators
// ============================================================================

#[test]
fn test_unary_binds_tighter_than_binary() {
    assert_eq!(
        render(&scan_c("-a * b")),
        "(OPERATOR * (UNARY_OPERATOR - (VARIABLE a)) (VARIABLE b))"
    );
}

#[test]
fn test_leading_star_is_dereference() {
    assert_eq!(render(&scan_c("*p")), "(MEMBER_POINTER * (VARIABLE p))");
}

// ============================================================================
// Conditional operator
// ============================================================================

#[test]
fn test_ternary_collects_three_operands() {
    assert_eq!(
        render(&scan_c("a ? b : c")),
        "(TERNARY_OPERATOR ? : (VARIABLE a) (VARIABLE b) (VARIABLE c))"
    );
}

#[rstest]
#[case(
    "a ? b : c = d",
    "(TERNARY_OPERATOR ? : (VARIABLE a) (VARIABLE b) (OPERATOR = (VARIABLE c) (VARIABLE d)))"
)]
#[case(
    "x = a ? b : c",
    "(OPERATOR = (VARIABLE x) (TERNARY_OPERATOR ? : (VARIABLE a) (VARIABLE b) (VARIABLE c)))"
)]
#[case(
    "a ? b : c ? d : e",
    "(TERNARY_OPERATOR ? : (VARIABLE a) (VARIABLE b) (TERNARY_OPERATOR ? : (VARIABLE c) (VARIABLE d) (VARIABLE e)))"
)]
#[case(
    "a ? b ? c : d : e",
    "(TERNARY_OPERATOR ? : (VARIABLE a) (TERNARY_OPERATOR ? : (VARIABLE b) (VARIABLE c) (VARIABLE d)) (VARIABLE e))"
)]
fn test_ternary_grouping(#[case] source: &str, #[case] expected: &str) {
    assert_eq!(render(&scan_c(source)), expected);
}

#[test]
fn test_ternary_else_branch_gets_placeholder() {
    let result = scan_c("c ? a :");
    assert_eq!(
        render(&result),
        "(TERNARY_OPERATOR ? : (VARIABLE c) (VARIABLE a) (VARIABLE))"
    );
    let top = result.result_exp().unwrap();
    let placeholder = result.arena().last_param(top).unwrap();
    assert!(result.node(placeholder).is_placeholder());
}

#[test]
fn test_trailing_operator_gets_placeholder() {
    assert_eq!(
        render(&scan_c("a +")),
        "(OPERATOR + (VARIABLE a) (VARIABLE))"
    );
}

// ============================================================================
// Long chains
// ============================================================================

/// Follow the last param from the result node while it has `kind`
fn right_spine(result: &ScanResult, kind: ExprKind) -> (usize, ExprKind) {
    let mut id = result.result_exp().unwrap();
    let mut depth = 0;
    while result.node(id).kind == kind {
        depth += 1;
        id = result.arena().last_param(id).unwrap();
    }
    (depth, result.node(id).kind)
}

#[test]
fn test_long_assignment_chain_folds() {
    let source = "a=".repeat(100_000) + "b";
    let result = scan_c(&source);
    assert_eq!(result.stack().len(), 1);
    assert_eq!(
        right_spine(&result, ExprKind::OPERATOR),
        (100_000, ExprKind::VARIABLE)
    );
}

#[test]
fn test_long_conditional_chain_folds() {
    let source = "a?b:".repeat(50_000);
    let result = scan_c(&source);
    assert_eq!(result.stack().len(), 1);
    let (depth, last) = right_spine(&result, ExprKind::TERNARY_OPERATOR);
    assert_eq!((depth, last), (50_000, ExprKind::VARIABLE));
    let tail = result.arena().last_param(result.result_exp().unwrap()).unwrap();
    assert_eq!(result.node(tail).kind, ExprKind::TERNARY_OPERATOR);
}

#[test]
fn test_long_chain_renders() {
    let source = "a=".repeat(20_000) + "b";
    let rendered = render(&scan_c(&source));
    assert!(rendered.starts_with("(OPERATOR = (VARIABLE a) (OPERATOR = "));
    assert!(rendered.ends_with(&")".repeat(20_000)));
}
