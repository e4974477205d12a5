//! Stencil Intermediate Representation (SIR) for the Stratus compiler.
//!
//! This crate defines the declarative IR produced by the DSL front-end and
//! consumed by the optimizer and the code emitters.
//!
//! # Module Organization
//!
//! - [`ast`] - Statement/expression node model with clone, structural
//!   equality and visitor dispatch
//! - [`sir`] - Top-level SIR entities (stencils, stencil functions, vertical
//!   regions, fields, globals)
//! - [`types`] - Fundamental type definitions (builtin types, typed values)
//! - [`location`] - Source locations for diagnostics
//! - [`error`] - Error types and result handling

pub mod ast;
pub mod error;
pub mod location;
pub mod sir;
pub mod types;


// Re-exports. All core types remain accessible at the crate root.
pub use ast::{
    AssignmentExpr, Ast, AstVisitor, BinaryOperator, BlockStmt, BoundaryConditionDeclStmt, Expr, ExprKind, ExprStmt,
    FieldAccessExpr, FunCallExpr, IfStmt, LiteralAccessExpr, ReturnStmt, StencilCallDeclStmt, StencilFunArgExpr,
    StencilFunCallExpr, Stmt, StmtKind, TernaryOperator, UnaryOperator, VarAccessExpr, VarDeclStmt,
    VerticalRegionDeclStmt,
};
pub use error::{Error, Result};
pub use location::SourceLocation;
pub use sir::{
    Attr, Attributes, Field, GlobalVariableMap, Interval, LoopOrder, Sir, Stencil, StencilCall, StencilFunction,
    VerticalRegion,
};
pub use types::{BuiltinType, Type, Value};
