//! Declaration AST for the signature language.
//!
//! These types represent one parsed `def` declaration header. The parser
//! produces a [`FunctionDecl`], which extraction then flattens into a
//! textual function specification.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::value::Value;

/// A parsed `def` declaration header.
///
/// Only the header is represented: name, parameters, and the optional
/// return annotation. Bodies are never parsed.
#[derive(Debug, Clone, PartialEq)]
pub struct FunctionDecl {
    pub name: String,
    pub params: Vec<Param>,
    pub returns: Option<TypeExpr>,
}

/// One declared parameter.
#[derive(Debug, Clone, PartialEq)]
pub struct Param {
    pub name: String,
    pub kind: ParamKind,
    pub annotation: Option<TypeExpr>,
    /// Literal default. Only positional-or-keyword parameters declare one.
    pub default: Option<Value>,
}

/// How a parameter binds call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ParamKind {
    /// Ordinary positional-or-keyword parameter.
    Positional,
    /// `*args` — absorbs leftover positional arguments.
    VarArgs,
    /// `**kwargs` — absorbs unmatched keyword arguments.
    KwArgs,
}

/// A type annotation expression.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum TypeExpr {
    /// A possibly dotted name: `int`, `typing.Optional`.
    Name(String),
    /// Subscripted generic: `list[int]`, `dict[str, int]`, `tuple[int, ...]`.
    Generic { base: String, args: Vec<TypeExpr> },
    /// `...` inside a subscript, as in `tuple[int, ...]`.
    Ellipsis,
}

impl fmt::Display for TypeExpr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeExpr::Name(name) => write!(f, "{name}"),
            TypeExpr::Generic { base, args } => {
                let parts: Vec<String> = args.iter().map(|a| a.to_string()).collect();
                write!(f, "{base}[{}]", parts.join(", "))
            }
            TypeExpr::Ellipsis => write!(f, "..."),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_plain_name() {
        assert_eq!(TypeExpr::Name("int".into()).to_string(), "int");
    }

    #[test]
    fn display_generic() {
        let ty = TypeExpr::Generic {
            base: "dict".into(),
            args: vec![TypeExpr::Name("str".into()), TypeExpr::Name("int".into())],
        };
        assert_eq!(ty.to_string(), "dict[str, int]");
    }

    #[test]
    fn display_homogeneous_tuple() {
        let ty = TypeExpr::Generic {
            base: "tuple".into(),
            args: vec![TypeExpr::Name("int".into()), TypeExpr::Ellipsis],
        };
        assert_eq!(ty.to_string(), "tuple[int, ...]");
    }
}
