//! Structural equality tests.
//!
//! Equality is kind-guarded, ignores source locations, recurses into owned
//! children and compares shared SIR entities by handle identity.

use std::sync::Arc;

use crate::ast::{Expr, Stmt};
use crate::location::SourceLocation;
use crate::sir::{Field, StencilCall};
use crate::test::helpers::*;
use crate::types::{BuiltinType, Type};

#[test]
fn locations_are_ignored() {
    let a = Expr::field_access("u", [0, 0, 0], SourceLocation::new(1, 1));
    let b = Expr::field_access("u", [0, 0, 0], SourceLocation::new(42, 7));
    assert_eq!(a, b);
}

#[test]
fn different_kinds_never_equal() {
    // An ExprStmt wrapping `foo` is not a VarDeclStmt named `foo`.
    let expr_stmt = Stmt::expr(Expr::var_access("foo", loc()), loc());
    let var_decl = Stmt::var_decl(Type::new(BuiltinType::Float), "foo", "=", [], loc());
    assert_ne!(expr_stmt, var_decl);

    let var = Expr::var_access("foo", loc());
    let field = Expr::field_access("foo", [0, 0, 0], loc());
    assert_ne!(var, field);
}

#[test]
fn assignment_operator_compared_literally() {
    let plain = Expr::assignment(Expr::field_access("u", [0, 0, 0], loc()), "=", one(), loc());
    let compound = Expr::assignment(Expr::field_access("u", [0, 0, 0], loc()), "+=", one(), loc());
    assert_ne!(plain, compound);
}

#[test]
fn var_decl_operator_compared_literally() {
    let a = Stmt::var_decl(Type::new(BuiltinType::Float), "x", "=", [one()], loc());
    let b = Stmt::var_decl(Type::new(BuiltinType::Float), "x", "+=", [one()], loc());
    assert_ne!(a, b);
}

#[test]
fn field_offsets_participate() {
    let centered = Expr::field_access("u", [0, 0, 0], loc());
    let shifted = Expr::field_access("u", [1, 0, 0], loc());
    assert_ne!(centered, shifted);
}

#[test]
fn block_requires_same_length_and_order() {
    let a = Stmt::block(vec![assign_fields("u", "v"), assign_fields("w", "u")], loc());
    let b = Stmt::block(vec![assign_fields("u", "v"), assign_fields("w", "u")], loc());
    let shorter = Stmt::block(vec![assign_fields("u", "v")], loc());
    let swapped = Stmt::block(vec![assign_fields("w", "u"), assign_fields("u", "v")], loc());
    assert_eq!(a, b);
    assert_ne!(a, shorter);
    assert_ne!(a, swapped);
}

#[test]
fn stencil_call_compared_by_handle_identity() {
    let call = Arc::new(StencilCall::new("advection"));
    let a = Stmt::stencil_call_decl(Arc::clone(&call), loc());
    let b = Stmt::stencil_call_decl(Arc::clone(&call), loc());
    assert_eq!(a, b);

    // Field-identical but distinct object: unequal.
    let other = Arc::new(StencilCall::new("advection"));
    let c = Stmt::stencil_call_decl(other, loc());
    assert_ne!(a, c);
}

#[test]
fn vertical_region_compared_by_handle_identity() {
    let region = full_domain_region(vec![assign_fields("u", "v")], Default::default());
    let a = Stmt::vertical_region_decl(Arc::clone(&region), loc());
    let b = Stmt::vertical_region_decl(Arc::clone(&region), loc());
    assert_eq!(a, b);

    let twin = full_domain_region(vec![assign_fields("u", "v")], Default::default());
    assert_ne!(a, Stmt::vertical_region_decl(twin, loc()));
}

#[test]
fn boundary_condition_compares_field_name_and_temporary_flag() {
    let a = Stmt::boundary_condition_decl("zero_gradient", vec![Arc::new(Field::new("u"))], loc());
    // Distinct Arc, same name/flag: equal.
    let b = Stmt::boundary_condition_decl("zero_gradient", vec![Arc::new(Field::new("u"))], loc());
    assert_eq!(a, b);

    let temp = Stmt::boundary_condition_decl("zero_gradient", vec![Arc::new(Field::temporary("u"))], loc());
    assert_ne!(a, temp);

    let other_functor = Stmt::boundary_condition_decl("mirror", vec![Arc::new(Field::new("u"))], loc());
    assert_ne!(a, other_functor);
}

#[test]
fn if_else_absence_is_a_distinct_state() {
    let cond = Stmt::expr(Expr::var_access("c", loc()), loc());
    let then = assign_fields("u", "v");

    let without_else = Stmt::if_(cond.clone(), then.clone(), None, loc());
    let with_empty_else = Stmt::if_(cond, then, Some(Stmt::block(vec![], loc())), loc());
    assert_ne!(without_else, with_empty_else);
}

#[test]
fn ternary_differs_from_binary_with_same_operands() {
    let cond = Expr::var_access("c", loc());
    let ternary = Expr::ternary(cond.clone(), one(), one(), loc());
    let binary = Expr::binary(one(), "+", one(), loc());
    assert_ne!(ternary, binary);
    assert_eq!(ternary, Expr::ternary(cond, one(), one(), loc()));
}
