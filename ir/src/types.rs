//! Fundamental type definitions shared across the IR.

use serde::Serialize;

/// Builtin scalar types of the stencil DSL.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub enum BuiltinType {
    /// Type deduced from the initializer by the front-end.
    #[default]
    Auto,
    Boolean,
    Integer,
    Float,
}

impl std::fmt::Display for BuiltinType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            Self::Auto => "auto",
            Self::Boolean => "bool",
            Self::Integer => "int",
            Self::Float => "double",
        };
        f.write_str(s)
    }
}

/// Type of a variable declaration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize)]
pub struct Type {
    pub builtin: BuiltinType,
    pub is_const: bool,
}

impl Type {
    pub fn new(builtin: BuiltinType) -> Self {
        Self { builtin, is_const: false }
    }

    pub fn new_const(builtin: BuiltinType) -> Self {
        Self { builtin, is_const: true }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.is_const {
            write!(f, "const {}", self.builtin)
        } else {
            write!(f, "{}", self.builtin)
        }
    }
}

/// Typed value of a global variable.
///
/// Globals are configured by the driver and resolved by constant folding;
/// the IR only records the tagged value.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Value {
    Boolean(bool),
    Integer(i64),
    Double(f64),
    String(String),
}

impl Value {
    pub fn builtin_type(&self) -> BuiltinType {
        match self {
            Self::Boolean(_) => BuiltinType::Boolean,
            Self::Integer(_) => BuiltinType::Integer,
            Self::Double(_) => BuiltinType::Float,
            // Strings only configure code generation, they never reach an expression.
            Self::String(_) => BuiltinType::Auto,
        }
    }
}
