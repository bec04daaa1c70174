//! Type System for Rustica

use std::fmt;

use serde::{Serialize, Serializer};

use crate::frontend::ast::TypeAnnotation;

/// Resolved type (after type checking)
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Type {
    I32,
    F64,
    Bool,
    Char,
    /// `String` / `str`
    Str,
    /// `()`, the result of a function without `->`
    Unit,
    Vec(Box<Type>),
    Array { elem: Box<Type>, size: usize },
    Tuple(Vec<Type>),
    /// Any other annotated name, kept verbatim (i64, u8, MyType, ...)
    Named(String),
    /// Not inferable at this point (undeclared name, empty literal, ...)
    Unknown,
}

impl Type {
    /// Resolve a parsed annotation
    pub fn from_annotation(ann: &TypeAnnotation) -> Self {
        match ann {
            TypeAnnotation::Named(name, _) => match name.as_str() {
                "i32" => Type::I32,
                "f64" => Type::F64,
                "bool" => Type::Bool,
                "char" => Type::Char,
                "String" | "str" => Type::Str,
                other => Type::Named(other.to_string()),
            },
            TypeAnnotation::Vec(elem, _) => Type::Vec(Box::new(Self::from_annotation(elem))),
            TypeAnnotation::Array { elem, size, .. } => Type::Array {
                elem: Box::new(Self::from_annotation(elem)),
                size: *size,
            },
            TypeAnnotation::Tuple(elems, _) => {
                if elems.is_empty() {
                    Type::Unit
                } else {
                    Type::Tuple(elems.iter().map(Self::from_annotation).collect())
                }
            }
        }
    }

    /// i32 or f64
    pub fn is_numeric(&self) -> bool {
        matches!(self, Type::I32 | Type::F64)
    }

    pub fn is_unknown(&self) -> bool {
        matches!(self, Type::Unknown)
    }

    /// Element type produced by `base[index]`
    pub fn element(&self) -> Type {
        match self {
            Type::Vec(elem) | Type::Array { elem, .. } => (**elem).clone(),
            Type::Str => Type::Char,
            _ => Type::Unknown,
        }
    }

    /// Slot type produced by `base.N`
    pub fn slot(&self, index: usize) -> Type {
        match self {
            Type::Tuple(slots) => slots.get(index).cloned().unwrap_or(Type::Unknown),
            _ => Type::Unknown,
        }
    }

    /// Dominant type of an arithmetic operation: f64 > i32 > other.
    pub fn dominant(left: &Type, right: &Type) -> Type {
        if *left == Type::F64 || *right == Type::F64 {
            Type::F64
        } else if *left == Type::I32 || *right == Type::I32 {
            Type::I32
        } else {
            left.clone()
        }
    }

    /// Exact equality, except that `Unknown` matches anything at any depth.
    pub fn compatible(&self, other: &Type) -> bool {
        match (self, other) {
            (Type::Unknown, _) | (_, Type::Unknown) => true,
            (Type::Vec(a), Type::Vec(b)) => a.compatible(b),
            (Type::Array { elem: ea, size: sa }, Type::Array { elem: eb, size: sb }) => {
                sa == sb && ea.compatible(eb)
            }
            (Type::Tuple(a), Type::Tuple(b)) => {
                a.len() == b.len() && a.iter().zip(b).all(|(x, y)| x.compatible(y))
            }
            (a, b) => a == b,
        }
    }
}

impl fmt::Display for Type {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Type::I32 => write!(f, "i32"),
            Type::F64 => write!(f, "f64"),
            Type::Bool => write!(f, "bool"),
            Type::Char => write!(f, "char"),
            Type::Str => write!(f, "String"),
            Type::Unit => write!(f, "()"),
            Type::Vec(elem) => write!(f, "Vec<{}>", elem),
            Type::Array { elem, size } => write!(f, "[{}; {}]", elem, size),
            Type::Tuple(slots) => {
                write!(f, "(")?;
                for (i, slot) in slots.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", slot)?;
                }
                if slots.len() == 1 {
                    write!(f, ",")?;
                }
                write!(f, ")")
            }
            Type::Named(name) => write!(f, "{}", name),
            Type::Unknown => write!(f, "{{unknown}}"),
        }
    }
}

/// Types are reported by their source spelling
impl Serialize for Type {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
