//! Constants, user-defined literals and brace initialization

#![allow(clippy::unwrap_used)]

use cxxsense::{ExprKind, ScanOptions};

use crate::helpers::scan_helpers::{render, scan_c, scan_cpp, scan_to_end};

#[test]
fn test_constant_carries_builtin_type() {
    let result = scan_c("x = 1.5f");
    let top = result.result_exp().unwrap();
    let constant = result.arena().last_param(top).unwrap();
    assert_eq!(result.node(constant).kind, ExprKind::CONSTANT);
    assert_eq!(result.arena().type_hint(constant), Some("float"));
}

#[test]
fn test_adjacent_strings_concatenate() {
    assert_eq!(render(&scan_c("\"a\" \"b\"")), "(CONSTANT \"a\" \"b\")");
}

#[test]
fn test_user_defined_literal() {
    assert_eq!(
        render(&scan_cpp("12_km")),
        "(USER_DEFINED_LITERAL _km (CONSTANT 12))"
    );
}

#[test]
fn test_suffix_needs_feature() {
    let result = scan_c("12_km");
    assert_eq!(render(&result), "(VARIABLE _km)");
    assert_eq!(result.stack().len(), 1);
}

#[test]
fn test_uniform_initialization() {
    assert_eq!(
        render(&scan_cpp("Foo{1, 2}")),
        "(UNIFORM_INITIALIZATION { , } (VARIABLE Foo) (CONSTANT 1) (CONSTANT 2))"
    );
}

#[test]
fn test_open_uniform_initialization_closes_at_cursor() {
    let result = scan_to_end("Foo{1, x", ScanOptions::default().with_uniform_initialization(true));
    let top = result.result_node().unwrap();
    assert_eq!(top.kind, ExprKind::UNIFORM_INITIALIZATION);
    assert!(top.implicitly_closed);
    assert_eq!(top.params.len(), 3);
}
