//! Expression nodes.

use smallvec::SmallVec;

use crate::location::SourceLocation;
use crate::types::BuiltinType;

use super::visitor::AstVisitor;

/// Expression node, tagged by kind.
///
/// Operator tokens (`op` fields) are kept as the literal DSL spelling and
/// compared literally: `a += b` and `a = b` are different nodes even with
/// identical operands.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Unary(UnaryOperator),
    Binary(BinaryOperator),
    Assignment(AssignmentExpr),
    Ternary(TernaryOperator),
    FunCall(FunCallExpr),
    StencilFunCall(StencilFunCallExpr),
    StencilFunArg(StencilFunArgExpr),
    VarAccess(VarAccessExpr),
    FieldAccess(FieldAccessExpr),
    Literal(LiteralAccessExpr),
}

/// Kind discriminant of an [`Expr`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExprKind {
    Unary,
    Binary,
    Assignment,
    Ternary,
    FunCall,
    StencilFunCall,
    StencilFunArg,
    VarAccess,
    FieldAccess,
    Literal,
}

impl Expr {
    pub fn kind(&self) -> ExprKind {
        match self {
            Self::Unary(_) => ExprKind::Unary,
            Self::Binary(_) => ExprKind::Binary,
            Self::Assignment(_) => ExprKind::Assignment,
            Self::Ternary(_) => ExprKind::Ternary,
            Self::FunCall(_) => ExprKind::FunCall,
            Self::StencilFunCall(_) => ExprKind::StencilFunCall,
            Self::StencilFunArg(_) => ExprKind::StencilFunArg,
            Self::VarAccess(_) => ExprKind::VarAccess,
            Self::FieldAccess(_) => ExprKind::FieldAccess,
            Self::Literal(_) => ExprKind::Literal,
        }
    }

    pub fn loc(&self) -> SourceLocation {
        match self {
            Self::Unary(e) => e.loc,
            Self::Binary(e) => e.loc,
            Self::Assignment(e) => e.loc,
            Self::Ternary(e) => e.loc,
            Self::FunCall(e) => e.loc,
            Self::StencilFunCall(e) => e.loc,
            Self::StencilFunArg(e) => e.loc,
            Self::VarAccess(e) => e.loc,
            Self::FieldAccess(e) => e.loc,
            Self::Literal(e) => e.loc,
        }
    }

    /// Dispatch to the visitor handler for this concrete kind.
    pub fn accept<V: AstVisitor + ?Sized>(&self, visitor: &mut V) {
        match self {
            Self::Unary(e) => visitor.visit_unary_operator(e),
            Self::Binary(e) => visitor.visit_binary_operator(e),
            Self::Assignment(e) => visitor.visit_assignment_expr(e),
            Self::Ternary(e) => visitor.visit_ternary_operator(e),
            Self::FunCall(e) => visitor.visit_fun_call_expr(e),
            Self::StencilFunCall(e) => visitor.visit_stencil_fun_call_expr(e),
            Self::StencilFunArg(e) => visitor.visit_stencil_fun_arg_expr(e),
            Self::VarAccess(e) => visitor.visit_var_access_expr(e),
            Self::FieldAccess(e) => visitor.visit_field_access_expr(e),
            Self::Literal(e) => visitor.visit_literal_access_expr(e),
        }
    }

    pub fn as_field_access(&self) -> Option<&FieldAccessExpr> {
        match self {
            Self::FieldAccess(e) => Some(e),
            _ => None,
        }
    }

    pub fn as_var_access(&self) -> Option<&VarAccessExpr> {
        match self {
            Self::VarAccess(e) => Some(e),
            _ => None,
        }
    }
}

// Convenience constructors, mirroring the front-end's build order.
impl Expr {
    pub fn unary(op: impl Into<String>, operand: Expr, loc: SourceLocation) -> Self {
        Self::Unary(UnaryOperator { op: op.into(), operand: Box::new(operand), loc })
    }

    pub fn binary(left: Expr, op: impl Into<String>, right: Expr, loc: SourceLocation) -> Self {
        Self::Binary(BinaryOperator { left: Box::new(left), op: op.into(), right: Box::new(right), loc })
    }

    pub fn assignment(left: Expr, op: impl Into<String>, right: Expr, loc: SourceLocation) -> Self {
        Self::Assignment(AssignmentExpr { left: Box::new(left), op: op.into(), right: Box::new(right), loc })
    }

    pub fn ternary(cond: Expr, left: Expr, right: Expr, loc: SourceLocation) -> Self {
        Self::Ternary(TernaryOperator {
            cond: Box::new(cond),
            left: Box::new(left),
            right: Box::new(right),
            loc,
        })
    }

    pub fn fun_call(callee: impl Into<String>, args: impl IntoIterator<Item = Expr>, loc: SourceLocation) -> Self {
        Self::FunCall(FunCallExpr { callee: callee.into(), args: args.into_iter().map(Box::new).collect(), loc })
    }

    pub fn stencil_fun_call(
        callee: impl Into<String>,
        args: impl IntoIterator<Item = Expr>,
        loc: SourceLocation,
    ) -> Self {
        Self::StencilFunCall(StencilFunCallExpr { callee: callee.into(), args: args.into_iter().map(Box::new).collect(), loc })
    }

    pub fn var_access(name: impl Into<String>, loc: SourceLocation) -> Self {
        Self::VarAccess(VarAccessExpr { name: name.into(), index: None, is_external: false, loc })
    }

    pub fn field_access(name: impl Into<String>, offset: [i64; 3], loc: SourceLocation) -> Self {
        Self::FieldAccess(FieldAccessExpr { name: name.into(), offset, loc })
    }

    pub fn literal(value: impl Into<String>, builtin_type: BuiltinType, loc: SourceLocation) -> Self {
        Self::Literal(LiteralAccessExpr { value: value.into(), builtin_type, loc })
    }
}

/// Prefix operator applied to a single operand, e.g. `-a`, `!cond`.
#[derive(Debug, Clone)]
pub struct UnaryOperator {
    pub op: String,
    pub operand: Box<Expr>,
    pub loc: SourceLocation,
}

impl PartialEq for UnaryOperator {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.operand == other.operand
    }
}

/// Infix operator, e.g. `a + b`, `a < b`.
#[derive(Debug, Clone)]
pub struct BinaryOperator {
    pub left: Box<Expr>,
    pub op: String,
    pub right: Box<Expr>,
    pub loc: SourceLocation,
}

impl PartialEq for BinaryOperator {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.left == other.left && self.right == other.right
    }
}

/// Assignment, plain (`=`) or compound (`+=`, `-=`, `*=`, `/=`).
///
/// Kept distinct from [`BinaryOperator`]: the left side is a storage
/// location and compound forms read it as well.
#[derive(Debug, Clone)]
pub struct AssignmentExpr {
    pub left: Box<Expr>,
    pub op: String,
    pub right: Box<Expr>,
    pub loc: SourceLocation,
}

impl AssignmentExpr {
    /// Whether the assignment also reads its left side (`+=` etc.).
    pub fn is_compound(&self) -> bool {
        self.op != "="
    }
}

impl PartialEq for AssignmentExpr {
    fn eq(&self, other: &Self) -> bool {
        self.op == other.op && self.left == other.left && self.right == other.right
    }
}

/// Conditional expression `cond ? left : right`.
#[derive(Debug, Clone)]
pub struct TernaryOperator {
    pub cond: Box<Expr>,
    pub left: Box<Expr>,
    pub right: Box<Expr>,
    pub loc: SourceLocation,
}

impl PartialEq for TernaryOperator {
    fn eq(&self, other: &Self) -> bool {
        self.cond == other.cond && self.left == other.left && self.right == other.right
    }
}

/// Call to a math/builtin function, e.g. `max(a, b)`.
#[derive(Debug, Clone)]
pub struct FunCallExpr {
    pub callee: String,
    pub args: SmallVec<[Box<Expr>; 2]>,
    pub loc: SourceLocation,
}

impl PartialEq for FunCallExpr {
    fn eq(&self, other: &Self) -> bool {
        self.callee == other.callee && self.args == other.args
    }
}

/// Call to a stencil function, resolved and inlined by later passes.
#[derive(Debug, Clone)]
pub struct StencilFunCallExpr {
    pub callee: String,
    pub args: SmallVec<[Box<Expr>; 2]>,
    pub loc: SourceLocation,
}

impl PartialEq for StencilFunCallExpr {
    fn eq(&self, other: &Self) -> bool {
        self.callee == other.callee && self.args == other.args
    }
}

/// Placeholder argument inside a stencil function body: either a dimension
/// with an offset (`i + 1`) or a forwarded caller argument.
#[derive(Debug, Clone)]
pub struct StencilFunArgExpr {
    pub dimension: Option<usize>,
    pub offset: i64,
    pub argument_index: Option<usize>,
    pub loc: SourceLocation,
}

impl PartialEq for StencilFunArgExpr {
    fn eq(&self, other: &Self) -> bool {
        self.dimension == other.dimension && self.offset == other.offset && self.argument_index == other.argument_index
    }
}

/// Access to a local or global variable, optionally indexed (`arr[i]`).
#[derive(Debug, Clone)]
pub struct VarAccessExpr {
    pub name: String,
    pub index: Option<Box<Expr>>,
    /// True once name resolution bound this access to a global.
    pub is_external: bool,
    pub loc: SourceLocation,
}

impl PartialEq for VarAccessExpr {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.index == other.index && self.is_external == other.is_external
    }
}

/// Access to a field at a relative offset, e.g. `u(i + 1, j, k)`.
#[derive(Debug, Clone)]
pub struct FieldAccessExpr {
    pub name: String,
    /// Offset from the iteration point in (i, j, k).
    pub offset: [i64; 3],
    pub loc: SourceLocation,
}

impl FieldAccessExpr {
    pub fn is_centered(&self) -> bool {
        self.offset == [0, 0, 0]
    }
}

impl PartialEq for FieldAccessExpr {
    fn eq(&self, other: &Self) -> bool {
        self.name == other.name && self.offset == other.offset
    }
}

/// Literal constant with its textual spelling preserved for codegen.
#[derive(Debug, Clone)]
pub struct LiteralAccessExpr {
    pub value: String,
    pub builtin_type: BuiltinType,
    pub loc: SourceLocation,
}

impl PartialEq for LiteralAccessExpr {
    fn eq(&self, other: &Self) -> bool {
        self.value == other.value && self.builtin_type == other.builtin_type
    }
}
