//! AST node model.
//!
//! Statements and expressions are closed sum types: every node kind is a
//! variant holding its payload struct, so "interpret a node as the wrong
//! kind" is unrepresentable and dispatch is an exhaustive match.
//!
//! # Ownership
//!
//! Two relations exist between a node and the data it points at:
//!
//! - *Owned* children (`Box`, `Vec`, `SmallVec` of nodes) are part of the
//!   tree. `Clone` duplicates them, equality recurses into them.
//! - *Shared* references ([`Arc`](std::sync::Arc) handles to entities owned
//!   by the SIR, e.g. a vertical region or stencil call) are outside the
//!   tree. `Clone` copies the handle, equality compares handle identity.
//!
//! Both properties fall out of the field types, there is no hand-written
//! deep-copy logic to keep in sync with the node set.
//!
//! Equality never looks at source locations.

pub mod expr;
pub mod stmt;
pub mod visitor;

pub use expr::{
    AssignmentExpr, BinaryOperator, Expr, ExprKind, FieldAccessExpr, FunCallExpr, LiteralAccessExpr,
    StencilFunArgExpr, StencilFunCallExpr, TernaryOperator, UnaryOperator, VarAccessExpr,
};
pub use stmt::{
    BlockStmt, BoundaryConditionDeclStmt, ExprStmt, IfStmt, ReturnStmt, StencilCallDeclStmt, Stmt, StmtKind,
    VarDeclStmt, VerticalRegionDeclStmt,
};
pub use visitor::AstVisitor;

/// A statement tree with a block statement as root.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Ast {
    root: BlockStmt,
}

impl Ast {
    pub fn new(root: BlockStmt) -> Self {
        Self { root }
    }

    pub fn from_statements(statements: Vec<Stmt>) -> Self {
        Self { root: BlockStmt::new(statements, crate::SourceLocation::UNKNOWN) }
    }

    pub fn root(&self) -> &BlockStmt {
        &self.root
    }

    pub fn root_mut(&mut self) -> &mut BlockStmt {
        &mut self.root
    }

    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        visitor.visit_block_stmt(&self.root);
    }
}
