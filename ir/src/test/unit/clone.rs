//! Clone semantics: deep copy of owned children, shared handles preserved.

use std::sync::Arc;

use crate::ast::{Expr, Stmt};
use crate::test::helpers::*;

#[test]
fn clone_equals_original() {
    let stmt = Stmt::block(
        vec![
            assign_fields("u", "v"),
            Stmt::if_(
                Stmt::expr(Expr::var_access("c", loc()), loc()),
                assign_fields("w", "u"),
                None,
                loc(),
            ),
        ],
        loc(),
    );
    assert_eq!(stmt, stmt.clone());
}

#[test]
fn clone_does_not_alias_owned_children() {
    let original = Stmt::block(vec![assign_fields("u", "v")], loc());
    let mut copy = original.clone();

    // Mutate the copy's owned sub-tree.
    let Stmt::Block(block) = &mut copy else { unreachable!() };
    block.statements.push(assign_fields("w", "u"));

    let Stmt::Block(original_block) = &original else { unreachable!() };
    assert_eq!(original_block.statements.len(), 1);
    assert_ne!(original, copy);
}

#[test]
fn clone_preserves_shared_region_handle() {
    let region = full_domain_region(vec![assign_fields("u", "v")], Default::default());
    let stmt = Stmt::vertical_region_decl(Arc::clone(&region), loc());

    let copy = stmt.clone();
    // The clone references the same region, it does not duplicate it.
    assert_eq!(stmt, copy);
    let Stmt::VerticalRegionDecl(decl) = &copy else { unreachable!() };
    assert!(Arc::ptr_eq(&decl.vertical_region, &region));
}

#[test]
fn clone_preserves_absent_else_branch() {
    let without_else = Stmt::if_(
        Stmt::expr(Expr::var_access("c", loc()), loc()),
        assign_fields("u", "v"),
        None,
        loc(),
    );
    let copy = without_else.clone();
    let Stmt::If(if_stmt) = &copy else { unreachable!() };
    assert!(!if_stmt.has_else());
    assert_eq!(without_else, copy);
}

#[test]
fn clone_copies_nested_expression_trees() {
    let expr = Expr::binary(
        Expr::unary("-", Expr::field_access("u", [1, 0, 0], loc()), loc()),
        "*",
        Expr::ternary(Expr::var_access("c", loc()), one(), Expr::field_access("v", [0, 0, -1], loc()), loc()),
        loc(),
    );
    let copy = expr.clone();
    assert_eq!(expr, copy);
}
