//! argus-core: call-time argument validation synthesized from `def`-style
//! function signatures.
//!
//! This crate provides the whole signature-to-schema pipeline:
//!
//! - **Lexer**: tokenizes the signature language using logos
//! - **Parser**: builds declaration headers from tokens using chumsky
//! - **Extraction**: locates the first declaration and flattens it into a
//!   [`FuncSpec`]
//! - **Synthesis**: deterministic schema source text ([`synth`])
//! - **Compilation**: live [`Schema`] artifacts built field-by-field
//! - **Cache**: single-flight memoization per function identity
//! - **Validation**: checking a concrete call's arguments, with failures
//!   that name the offending field
//!
//! The usual entry points are [`Function::parse`] and
//! [`Validator::validate`]; the lower layers are public for tooling that
//! wants specs, generated source, or schemas directly.

pub mod ast;
pub mod cache;
pub mod compile;
pub mod env;
pub mod error;
pub mod extract;
pub mod lexer;
pub mod naming;
pub mod parser;
pub mod schema;
pub mod synth;
pub mod types;
pub mod validator;
pub mod value;

pub use ast::{FunctionDecl, Param, ParamKind, TypeExpr};
pub use cache::{FunctionId, SchemaCache};
pub use env::SymbolTable;
pub use error::{CompileError, Error, ExtractError, ValidationError};
pub use extract::{
    extract_decl, extract_spec, extract_spec_from_source, render_param_list, FuncSpec, ParamSpec,
};
pub use schema::{BoundArgs, FieldBinding, FieldDef, Schema, SchemaBuilder};
pub use synth::{SchemaSource, SourceKind};
pub use validator::{Function, Validated, ValidationConfig, Validator};
pub use value::{CallArgs, Instance, Value};
