//! Resolution of annotation text into live type checks.
//!
//! An annotation travels through the pipeline as text. At compile time it
//! is parsed back into a [`TypeExpr`](crate::ast::TypeExpr) and resolved
//! against the caller's symbol table first, then the builtin names. The
//! result is a [`TypeCheck`]: a closed, environment-free checker. Class
//! resolution is frozen at compile time — classes declared after a schema
//! is compiled do not widen its checks, mirroring the capture semantics of
//! schema creation.

use crate::ast::TypeExpr;
use crate::env::{Symbol, SymbolTable};
use crate::error::CompileError;
use crate::parser;
use crate::value::Value;

/// Aliases may reference aliases; chains deeper than this are rejected as
/// cyclic.
const MAX_ALIAS_DEPTH: usize = 32;

/// A resolved, self-contained type check.
#[derive(Debug, Clone, PartialEq)]
pub enum TypeCheck {
    /// Unconstrained; accepts anything.
    Any,
    NoneType,
    Int,
    /// Accepts floats and ints.
    Float,
    Str,
    Bool,
    /// `list` / `list[T]`.
    List(Option<Box<TypeCheck>>),
    /// `tuple` / `tuple[T, ...]` / `tuple[A, B]`.
    Tuple(TupleShape),
    /// `dict` / `dict[K, V]`.
    Dict(Option<Box<(TypeCheck, TypeCheck)>>),
    /// Any branch may match.
    Union(Vec<TypeCheck>),
    /// Instance of a user class. `accepts` is the set of class names that
    /// satisfied the check when the schema was compiled.
    Class { name: String, accepts: Vec<String> },
}

/// Element constraints of a tuple check.
#[derive(Debug, Clone, PartialEq)]
pub enum TupleShape {
    Unconstrained,
    /// `tuple[T, ...]` — every element matches T.
    Homogeneous(Box<TypeCheck>),
    /// `tuple[A, B]` — length and element-wise match.
    Fixed(Vec<TypeCheck>),
}

impl TypeCheck {
    /// Whether `value` satisfies this check.
    pub fn check(&self, value: &Value) -> bool {
        match self {
            TypeCheck::Any => true,
            TypeCheck::NoneType => matches!(value, Value::None),
            TypeCheck::Int => matches!(value, Value::Int(_)),
            TypeCheck::Float => matches!(value, Value::Int(_) | Value::Float(_)),
            TypeCheck::Str => matches!(value, Value::Str(_)),
            TypeCheck::Bool => matches!(value, Value::Bool(_)),
            TypeCheck::List(element) => match value {
                Value::List(items) => match element {
                    Some(ty) => items.iter().all(|item| ty.check(item)),
                    None => true,
                },
                _ => false,
            },
            TypeCheck::Tuple(shape) => match value {
                Value::Tuple(items) => match shape {
                    TupleShape::Unconstrained => true,
                    TupleShape::Homogeneous(ty) => items.iter().all(|item| ty.check(item)),
                    TupleShape::Fixed(tys) => {
                        items.len() == tys.len()
                            && items.iter().zip(tys).all(|(item, ty)| ty.check(item))
                    }
                },
                _ => false,
            },
            TypeCheck::Dict(entry) => match value {
                Value::Dict(entries) => match entry {
                    Some(kv) => entries.iter().all(|(key, val)| {
                        kv.0.check(&Value::Str(key.clone())) && kv.1.check(val)
                    }),
                    None => true,
                },
                _ => false,
            },
            TypeCheck::Union(branches) => branches.iter().any(|ty| ty.check(value)),
            TypeCheck::Class { accepts, .. } => match value {
                Value::Instance(inst) => accepts.iter().any(|c| *c == inst.class),
                _ => false,
            },
        }
    }
}

/// Resolve annotation text into a [`TypeCheck`] against `env`.
pub fn resolve(text: &str, env: &SymbolTable) -> Result<TypeCheck, CompileError> {
    let expr = parser::parse_type_text(text).map_err(|errs| {
        let messages: Vec<String> = errs.iter().map(|e| e.to_string()).collect();
        CompileError::BadAnnotation {
            text: text.to_string(),
            message: messages.join("; "),
        }
    })?;
    resolve_expr(&expr, env, 0)
}

fn resolve_expr(
    expr: &TypeExpr,
    env: &SymbolTable,
    depth: usize,
) -> Result<TypeCheck, CompileError> {
    match expr {
        TypeExpr::Ellipsis => Err(CompileError::BadAnnotation {
            text: expr.to_string(),
            message: "`...` is only valid inside tuple[T, ...]".to_string(),
        }),
        TypeExpr::Name(name) => resolve_name(name, env, depth),
        TypeExpr::Generic { base, args } => resolve_generic(base, args, env, depth),
    }
}

fn resolve_name(name: &str, env: &SymbolTable, depth: usize) -> Result<TypeCheck, CompileError> {
    if depth > MAX_ALIAS_DEPTH {
        return Err(CompileError::AliasCycle(name.to_string()));
    }

    // the caller's names shadow the builtins
    if let Some(symbol) = env.lookup(name) {
        return match symbol {
            Symbol::Class(def) => Ok(TypeCheck::Class {
                name: def.name.clone(),
                accepts: env.subclasses_of(&def.name),
            }),
            Symbol::Alias(target) => resolve_expr(target, env, depth + 1),
        };
    }

    match name {
        "any" | "Any" | "object" => Ok(TypeCheck::Any),
        "int" => Ok(TypeCheck::Int),
        "float" => Ok(TypeCheck::Float),
        "str" => Ok(TypeCheck::Str),
        "bool" => Ok(TypeCheck::Bool),
        "None" | "NoneType" => Ok(TypeCheck::NoneType),
        "list" | "List" => Ok(TypeCheck::List(None)),
        "tuple" | "Tuple" => Ok(TypeCheck::Tuple(TupleShape::Unconstrained)),
        "dict" | "Dict" => Ok(TypeCheck::Dict(None)),
        _ => Err(CompileError::UnknownType(name.to_string())),
    }
}

fn resolve_generic(
    base: &str,
    args: &[TypeExpr],
    env: &SymbolTable,
    depth: usize,
) -> Result<TypeCheck, CompileError> {
    let arity_error = |message: &str| CompileError::BadAnnotation {
        text: TypeExpr::Generic {
            base: base.to_string(),
            args: args.to_vec(),
        }
        .to_string(),
        message: message.to_string(),
    };

    // a subscripted user class checks as the class itself
    if let Some(Symbol::Class(def)) = env.lookup(base) {
        return Ok(TypeCheck::Class {
            name: def.name.clone(),
            accepts: env.subclasses_of(&def.name),
        });
    }

    match base {
        "list" | "List" => match args {
            [element] => Ok(TypeCheck::List(Some(Box::new(resolve_expr(
                element,
                env,
                depth,
            )?)))),
            _ => Err(arity_error("list takes exactly one type argument")),
        },
        "dict" | "Dict" => match args {
            [key, value] => Ok(TypeCheck::Dict(Some(Box::new((
                resolve_expr(key, env, depth)?,
                resolve_expr(value, env, depth)?,
            ))))),
            _ => Err(arity_error("dict takes exactly two type arguments")),
        },
        "tuple" | "Tuple" => match args {
            [element, TypeExpr::Ellipsis] => Ok(TypeCheck::Tuple(TupleShape::Homogeneous(
                Box::new(resolve_expr(element, env, depth)?),
            ))),
            _ => {
                let mut tys = Vec::with_capacity(args.len());
                for arg in args {
                    tys.push(resolve_expr(arg, env, depth)?);
                }
                Ok(TypeCheck::Tuple(TupleShape::Fixed(tys)))
            }
        },
        "Optional" => match args {
            [inner] => Ok(TypeCheck::Union(vec![
                resolve_expr(inner, env, depth)?,
                TypeCheck::NoneType,
            ])),
            _ => Err(arity_error("Optional takes exactly one type argument")),
        },
        "Union" => {
            let mut branches = Vec::with_capacity(args.len());
            for arg in args {
                branches.push(resolve_expr(arg, env, depth)?);
            }
            Ok(TypeCheck::Union(branches))
        }
        _ => Err(CompileError::UnknownType(base.to_string())),
    }
}
