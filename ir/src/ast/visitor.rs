//! Visitor over the closed statement/expression kind set.
//!
//! Every handler has a default body that keeps walking the owned sub-tree,
//! so a visitor only overrides the kinds it cares about. Walks stay inside
//! the owning tree: handlers for declaration statements that reference
//! shared SIR entities (vertical regions, stencil calls, boundary-condition
//! fields) do not descend into the referenced entity.

use super::expr::*;
use super::stmt::*;

/// Double dispatch target for [`Stmt::accept`] and [`Expr::accept`].
///
/// Implemented by analysis passes and by the backend code emitters.
pub trait AstVisitor {
    // Statements.
    fn visit_block_stmt(&mut self, stmt: &BlockStmt) {
        walk_block_stmt(self, stmt);
    }
    fn visit_expr_stmt(&mut self, stmt: &ExprStmt) {
        walk_expr_stmt(self, stmt);
    }
    fn visit_return_stmt(&mut self, stmt: &ReturnStmt) {
        walk_return_stmt(self, stmt);
    }
    fn visit_var_decl_stmt(&mut self, stmt: &VarDeclStmt) {
        walk_var_decl_stmt(self, stmt);
    }
    fn visit_vertical_region_decl_stmt(&mut self, _stmt: &VerticalRegionDeclStmt) {}
    fn visit_stencil_call_decl_stmt(&mut self, _stmt: &StencilCallDeclStmt) {}
    fn visit_boundary_condition_decl_stmt(&mut self, _stmt: &BoundaryConditionDeclStmt) {}
    fn visit_if_stmt(&mut self, stmt: &IfStmt) {
        walk_if_stmt(self, stmt);
    }

    // Expressions.
    fn visit_unary_operator(&mut self, expr: &UnaryOperator) {
        walk_unary_operator(self, expr);
    }
    fn visit_binary_operator(&mut self, expr: &BinaryOperator) {
        walk_binary_operator(self, expr);
    }
    fn visit_assignment_expr(&mut self, expr: &AssignmentExpr) {
        walk_assignment_expr(self, expr);
    }
    fn visit_ternary_operator(&mut self, expr: &TernaryOperator) {
        walk_ternary_operator(self, expr);
    }
    fn visit_fun_call_expr(&mut self, expr: &FunCallExpr) {
        walk_fun_call_expr(self, expr);
    }
    fn visit_stencil_fun_call_expr(&mut self, expr: &StencilFunCallExpr) {
        walk_stencil_fun_call_expr(self, expr);
    }
    fn visit_stencil_fun_arg_expr(&mut self, _expr: &StencilFunArgExpr) {}
    fn visit_var_access_expr(&mut self, expr: &VarAccessExpr) {
        walk_var_access_expr(self, expr);
    }
    fn visit_field_access_expr(&mut self, _expr: &FieldAccessExpr) {}
    fn visit_literal_access_expr(&mut self, _expr: &LiteralAccessExpr) {}
}

pub fn walk_block_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &BlockStmt) {
    for s in &stmt.statements {
        s.accept(visitor);
    }
}

pub fn walk_expr_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &ExprStmt) {
    stmt.expr.accept(visitor);
}

pub fn walk_return_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &ReturnStmt) {
    stmt.expr.accept(visitor);
}

pub fn walk_var_decl_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &VarDeclStmt) {
    for e in &stmt.init_list {
        e.accept(visitor);
    }
}

pub fn walk_if_stmt<V: AstVisitor + ?Sized>(visitor: &mut V, stmt: &IfStmt) {
    stmt.cond.accept(visitor);
    stmt.then_branch.accept(visitor);
    if let Some(else_branch) = &stmt.else_branch {
        else_branch.accept(visitor);
    }
}

pub fn walk_unary_operator<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &UnaryOperator) {
    expr.operand.accept(visitor);
}

pub fn walk_binary_operator<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &BinaryOperator) {
    expr.left.accept(visitor);
    expr.right.accept(visitor);
}

pub fn walk_assignment_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &AssignmentExpr) {
    expr.left.accept(visitor);
    expr.right.accept(visitor);
}

pub fn walk_ternary_operator<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &TernaryOperator) {
    expr.cond.accept(visitor);
    expr.left.accept(visitor);
    expr.right.accept(visitor);
}

pub fn walk_fun_call_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &FunCallExpr) {
    for arg in &expr.args {
        arg.accept(visitor);
    }
}

pub fn walk_stencil_fun_call_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &StencilFunCallExpr) {
    for arg in &expr.args {
        arg.accept(visitor);
    }
}

pub fn walk_var_access_expr<V: AstVisitor + ?Sized>(visitor: &mut V, expr: &VarAccessExpr) {
    if let Some(index) = &expr.index {
        index.accept(visitor);
    }
}
