//! Statement nodes.

use std::sync::Arc;

use smallvec::SmallVec;

use crate::location::SourceLocation;
use crate::sir::{Field, StencilCall, VerticalRegion};
use crate::types::Type;

use super::expr::Expr;
use super::visitor::AstVisitor;

/// Statement node, tagged by kind.
///
/// `Clone` deep-copies owned children and copies [`Arc`] handles to shared
/// SIR entities; equality is structural for owned children and handle
/// identity for shared ones. See the module docs of [`crate::ast`].
#[derive(Debug, Clone, PartialEq)]
pub enum Stmt {
    Block(BlockStmt),
    Expr(ExprStmt),
    Return(ReturnStmt),
    VarDecl(VarDeclStmt),
    VerticalRegionDecl(VerticalRegionDeclStmt),
    StencilCallDecl(StencilCallDeclStmt),
    BoundaryConditionDecl(BoundaryConditionDeclStmt),
    If(IfStmt),
}

/// Kind discriminant of a [`Stmt`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StmtKind {
    Block,
    Expr,
    Return,
    VarDecl,
    VerticalRegionDecl,
    StencilCallDecl,
    BoundaryConditionDecl,
    If,
}

impl Stmt {
    pub fn kind(&self) -> StmtKind {
        match self {
            Self::Block(_) => StmtKind::Block,
            Self::Expr(_) => StmtKind::Expr,
            Self::Return(_) => StmtKind::Return,
            Self::VarDecl(_) => StmtKind::VarDecl,
            Self::VerticalRegionDecl(_) => StmtKind::VerticalRegionDecl,
            Self::StencilCallDecl(_) => StmtKind::StencilCallDecl,
            Self::BoundaryConditionDecl(_) => StmtKind::BoundaryConditionDecl,
            Self::If(_) => StmtKind::If,
        }
    }

    pub fn loc(&self) -> SourceLocation {
        match self {
            Self::Block(s) => s.loc,
            Self::Expr(s) => s.loc,
            Self::Return(s) => s.loc,
            Self::VarDecl(s) => s.loc,
            Self::VerticalRegionDecl(s) => s.loc,
            Self::StencilCallDecl(s) => s.loc,
            Self::BoundaryConditionDecl(s) => s.loc,
            Self::If(s) => s.loc,
        }
    }

    /// Dispatch to the visitor handler for this concrete kind.
    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Block(s) => visitor.visit_block_stmt(s),
            Self::Expr(s) => visitor.visit_expr_stmt(s),
            Self::Return(s) => visitor.visit_return_stmt(s),
            Self::VarDecl(s) => visitor.visit_var_decl_stmt(s),
            Self::VerticalRegionDecl(s) => visitor.visit_vertical_region_decl_stmt(s),
            Self::StencilCallDecl(s) => visitor.visit_stencil_call_decl_stmt(s),
            Self::BoundaryConditionDecl(s) => visitor.visit_boundary_condition_decl_stmt(s),
            Self::If(s) => visitor.visit_if_stmt(s),
        }
    }

    pub fn as_block(&self) -> Option<&BlockStmt> {
        match self {
            Self::Block(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_vertical_region_decl(&self) -> Option<&VerticalRegionDeclStmt> {
        match self {
            Self::VerticalRegionDecl(s) => Some(s),
            _ => None,
        }
    }
}

// Convenience constructors.
impl Stmt {
    pub fn block(statements: Vec<Stmt>, loc: SourceLocation) -> Self {
        Self::Block(BlockStmt::new(statements, loc))
    }

    pub fn expr(expr: Expr, loc: SourceLocation) -> Self {
        Self::Expr(ExprStmt { expr, loc })
    }

    pub fn return_(expr: Expr, loc: SourceLocation) -> Self {
        Self::Return(ReturnStmt { expr, loc })
    }

    pub fn var_decl(
        ty: Type,
        name: impl Into<String>,
        op: impl Into<String>,
        init_list: impl IntoIterator<Item = Expr>,
        loc: SourceLocation,
    ) -> Self {
        Self::VarDecl(VarDeclStmt {
            ty,
            name: name.into(),
            dimension: 0,
            op: op.into(),
            init_list: init_list.into_iter().collect(),
            loc,
        })
    }

    pub fn vertical_region_decl(region: Arc<VerticalRegion>, loc: SourceLocation) -> Self {
        Self::VerticalRegionDecl(VerticalRegionDeclStmt { vertical_region: region, loc })
    }

    pub fn stencil_call_decl(call: Arc<StencilCall>, loc: SourceLocation) -> Self {
        Self::StencilCallDecl(StencilCallDeclStmt { stencil_call: call, loc })
    }

    pub fn boundary_condition_decl(functor: impl Into<String>, fields: Vec<Arc<Field>>, loc: SourceLocation) -> Self {
        Self::BoundaryConditionDecl(BoundaryConditionDeclStmt { functor: functor.into(), fields, loc })
    }

    pub fn if_(cond: Stmt, then_branch: Stmt, else_branch: Option<Stmt>, loc: SourceLocation) -> Self {
        Self::If(IfStmt {
            cond: Box::new(cond),
            then_branch: Box::new(then_branch),
            else_branch: else_branch.map(Box::new),
            loc,
        })
    }
}

/// `{ s0; s1; ... }`
#[derive(Debug, Clone, Default)]
pub struct BlockStmt {
    pub statements: Vec<Stmt>,
    pub loc: SourceLocation,
}

impl BlockStmt {
    pub fn new(statements: Vec<Stmt>, loc: SourceLocation) -> Self {
        Self { statements, loc }
    }
}

impl PartialEq for BlockStmt {
    fn eq(&self, other: &Self) -> bool {
        self.statements == other.statements
    }
}

/// An expression in statement position, e.g. an assignment.
#[derive(Debug, Clone)]
pub struct ExprStmt {
    pub expr: Expr,
    pub loc: SourceLocation,
}

impl PartialEq for ExprStmt {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

/// `return expr;` inside a stencil function body.
#[derive(Debug, Clone)]
pub struct ReturnStmt {
    pub expr: Expr,
    pub loc: SourceLocation,
}

impl PartialEq for ReturnStmt {
    fn eq(&self, other: &Self) -> bool {
        self.expr == other.expr
    }
}

/// Variable declaration, scalar or array, with optional initializers.
#[derive(Debug, Clone)]
pub struct VarDeclStmt {
    pub ty: Type,
    pub name: String,
    /// Array dimension; 0 for scalars.
    pub dimension: i64,
    /// Assignment operator token, compared literally ("=" vs "+=").
    pub op: String,
    pub init_list: SmallVec<[Expr; 2]>,
    pub loc: SourceLocation,
}

impl PartialEq for VarDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        self.ty == other.ty
            && self.name == other.name
            && self.dimension == other.dimension
            && self.op == other.op
            && self.init_list == other.init_list
    }
}

/// Declaration of a vertical region inside a stencil description AST.
///
/// The region itself is owned by the SIR; this node only holds a handle, so
/// cloning the tree never duplicates the region and equality is identity of
/// the referenced region.
#[derive(Debug, Clone)]
pub struct VerticalRegionDeclStmt {
    pub vertical_region: Arc<VerticalRegion>,
    pub loc: SourceLocation,
}

impl PartialEq for VerticalRegionDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.vertical_region, &other.vertical_region)
    }
}

/// Declaration of a stencil call inside a stencil description AST.
///
/// Same sharing regime as [`VerticalRegionDeclStmt`].
#[derive(Debug, Clone)]
pub struct StencilCallDeclStmt {
    pub stencil_call: Arc<StencilCall>,
    pub loc: SourceLocation,
}

impl PartialEq for StencilCallDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.stencil_call, &other.stencil_call)
    }
}

/// Application of a boundary-condition functor to a set of fields.
#[derive(Debug, Clone)]
pub struct BoundaryConditionDeclStmt {
    pub functor: String,
    pub fields: Vec<Arc<Field>>,
    pub loc: SourceLocation,
}

// Fields are compared by name and temporary flag, not by handle: two
// declarations naming the same fields are the same boundary condition.
impl PartialEq for BoundaryConditionDeclStmt {
    fn eq(&self, other: &Self) -> bool {
        self.functor == other.functor
            && self.fields.len() == other.fields.len()
            && self
                .fields
                .iter()
                .zip(&other.fields)
                .all(|(a, b)| a.name == b.name && a.is_temporary == b.is_temporary)
    }
}

/// `if (cond) then_branch [else else_branch]`
///
/// The else branch is optional; an absent branch is a distinct, comparable
/// state and cloning preserves the absence.
#[derive(Debug, Clone)]
pub struct IfStmt {
    pub cond: Box<Stmt>,
    pub then_branch: Box<Stmt>,
    pub else_branch: Option<Box<Stmt>>,
    pub loc: SourceLocation,
}

impl IfStmt {
    pub fn has_else(&self) -> bool {
        self.else_branch.is_some()
    }
}

impl PartialEq for IfStmt {
    fn eq(&self, other: &Self) -> bool {
        self.cond == other.cond && self.then_branch == other.then_branch && self.else_branch == other.else_branch
    }
}
