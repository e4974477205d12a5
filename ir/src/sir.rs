//! Top-level SIR entities.
//!
//! The DSL front-end hands the compiler one [`Sir`] per compilation unit:
//! stencils and stencil functions with their description ASTs, plus the
//! global variable map. Entities referenced from AST nodes (vertical
//! regions, stencil calls, fields) live here and are shared into the tree
//! through [`Arc`] handles; the tree never owns them.

use std::collections::BTreeMap;
use std::sync::Arc;

use serde::Serialize;

use crate::ast::Ast;
use crate::error::{EmptyIntervalSnafu, Result};
use crate::types::Value;
use snafu::ensure;

/// A field (grid variable) accessed by a stencil.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Field {
    pub name: String,
    pub is_temporary: bool,
}

impl Field {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_temporary: false }
    }

    pub fn temporary(name: impl Into<String>) -> Self {
        Self { name: name.into(), is_temporary: true }
    }
}

/// Vertical interval `[lower_level + lower_offset, upper_level + upper_offset]`.
///
/// Levels are either concrete k-indices or the [`Interval::START`] /
/// [`Interval::END`] sentinels resolved against the domain at code
/// generation time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Interval {
    pub lower_level: i64,
    pub upper_level: i64,
    pub lower_offset: i64,
    pub upper_offset: i64,
}

impl Interval {
    /// Sentinel for the bottom of the vertical domain.
    pub const START: i64 = 0;
    /// Sentinel for the top of the vertical domain.
    pub const END: i64 = i64::MAX;

    pub fn new(lower_level: i64, upper_level: i64) -> Self {
        Self { lower_level, upper_level, lower_offset: 0, upper_offset: 0 }
    }

    pub fn with_offsets(lower_level: i64, upper_level: i64, lower_offset: i64, upper_offset: i64) -> Self {
        Self { lower_level, upper_level, lower_offset, upper_offset }
    }

    /// Like [`Interval::new`] but rejects intervals that are empty for every
    /// possible domain size.
    pub fn checked(lower_level: i64, upper_level: i64) -> Result<Self> {
        ensure!(
            upper_level == Self::END || lower_level <= upper_level,
            EmptyIntervalSnafu { lower: lower_level, upper: upper_level }
        );
        Ok(Self::new(lower_level, upper_level))
    }
}

/// Execution direction of a vertical loop.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum LoopOrder {
    #[default]
    Forward,
    Backward,
    /// No vertical dependency, levels may run concurrently.
    Parallel,
}

impl std::fmt::Display for LoopOrder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Forward => "forward",
            Self::Backward => "backward",
            Self::Parallel => "parallel",
        };
        f.write_str(s)
    }
}

/// A vertical region: statements applied over an interval in a direction.
///
/// Owned by the SIR and referenced from the description AST through
/// `VerticalRegionDeclStmt`; the AST comparison for that node is handle
/// identity, while this type's `PartialEq` is structural (used when
/// comparing two independently built SIRs).
#[derive(Debug, Clone, PartialEq)]
pub struct VerticalRegion {
    pub ast: Ast,
    pub interval: Interval,
    pub loop_order: LoopOrder,
}

impl VerticalRegion {
    pub fn new(ast: Ast, interval: Interval, loop_order: LoopOrder) -> Self {
        Self { ast, interval, loop_order }
    }
}

/// A call to another stencil from a stencil description AST.
#[derive(Debug, Clone, PartialEq)]
pub struct StencilCall {
    pub callee: String,
    pub args: Vec<Arc<Field>>,
}

impl StencilCall {
    pub fn new(callee: impl Into<String>) -> Self {
        Self { callee: callee.into(), args: Vec::new() }
    }

    pub fn with_args(callee: impl Into<String>, args: Vec<Arc<Field>>) -> Self {
        Self { callee: callee.into(), args }
    }
}

/// Stencil attribute flags.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[repr(u32)]
pub enum Attr {
    MergeTemporaries = 1 << 0,
    NoCodegen = 1 << 1,
}

/// Set of [`Attr`] flags attached to a stencil or stencil function.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct Attributes {
    bits: u32,
}

impl Attributes {
    pub fn set(&mut self, attr: Attr) {
        self.bits |= attr as u32;
    }

    pub fn unset(&mut self, attr: Attr) {
        self.bits &= !(attr as u32);
    }

    pub fn has(&self, attr: Attr) -> bool {
        self.bits & (attr as u32) != 0
    }

    pub fn is_empty(&self) -> bool {
        self.bits == 0
    }
}

/// A stencil: name, description AST, accessed fields and attributes.
#[derive(Debug, Clone, PartialEq)]
pub struct Stencil {
    pub name: String,
    pub ast: Ast,
    pub fields: Vec<Arc<Field>>,
    pub attributes: Attributes,
}

impl Stencil {
    pub fn new(name: impl Into<String>, ast: Ast) -> Self {
        Self { name: name.into(), ast, fields: Vec::new(), attributes: Attributes::default() }
    }
}

/// A stencil function: reusable computation instantiated per call site.
///
/// One AST per vertical interval specialization; the optimizer picks the
/// AST whose interval covers the call site.
#[derive(Debug, Clone, PartialEq)]
pub struct StencilFunction {
    pub name: String,
    pub args: Vec<Arc<Field>>,
    pub intervals: Vec<Interval>,
    pub asts: Vec<Ast>,
    pub attributes: Attributes,
}

impl StencilFunction {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
            intervals: Vec::new(),
            asts: Vec::new(),
            attributes: Attributes::default(),
        }
    }
}

/// Map of global variable name to its configured value.
pub type GlobalVariableMap = BTreeMap<String, Value>;

/// A full compilation unit as produced by the DSL front-end.
#[derive(Debug, Clone, Default)]
pub struct Sir {
    /// Originating DSL file, used only for diagnostics and dump file names.
    pub filename: String,
    pub stencils: Vec<Arc<Stencil>>,
    pub stencil_functions: Vec<Arc<StencilFunction>>,
    pub global_variable_map: GlobalVariableMap,
}

impl Sir {
    pub fn new(filename: impl Into<String>) -> Self {
        Self { filename: filename.into(), ..Default::default() }
    }

    /// Check unit-level consistency: entity names must be unique.
    pub fn verify(&self) -> Result<()> {
        let mut seen = std::collections::BTreeSet::new();
        for stencil in &self.stencils {
            if !seen.insert(stencil.name.as_str()) {
                return crate::error::DuplicateStencilNameSnafu { name: stencil.name.clone() }.fail();
            }
        }
        seen.clear();
        for function in &self.stencil_functions {
            if !seen.insert(function.name.as_str()) {
                return crate::error::DuplicateStencilFunctionNameSnafu { name: function.name.clone() }.fail();
            }
        }
        Ok(())
    }
}

// Filename is diagnostic payload: two SIRs with the same content parsed from
// different files compare equal.
impl PartialEq for Sir {
    fn eq(&self, other: &Self) -> bool {
        self.stencils.len() == other.stencils.len()
            && self.stencils.iter().zip(&other.stencils).all(|(a, b)| **a == **b)
            && self.stencil_functions.len() == other.stencil_functions.len()
            && self.stencil_functions.iter().zip(&other.stencil_functions).all(|(a, b)| **a == **b)
            && self.global_variable_map == other.global_variable_map
    }
}
