//! Compilation of a function specification into a live [`Schema`].
//!
//! The synthesizer's textual output is the canonical form of a schema; the
//! compiler builds the equivalent live artifact directly from the
//! specification with [`SchemaBuilder`], resolving each annotation against
//! the caller's symbol table. The two views are kept in lockstep by the
//! same field-order and default policy: explicit defaults verbatim, `()`
//! for variadic-positional, `{}` for keyword-variadic, required otherwise.

use crate::ast::ParamKind;
use crate::env::SymbolTable;
use crate::error::CompileError;
use crate::extract::FuncSpec;
use crate::naming;
use crate::schema::{FieldBinding, FieldDef, Schema, SchemaBuilder};
use crate::synth::UNCONSTRAINED;
use crate::types::{self, TypeCheck};
use crate::value::Value;

/// Build the input-schema artifact for `spec`, resolving annotations
/// against `env`.
///
/// Receiver parameters are excluded. Resolution is frozen here: classes
/// declared in `env` after compilation do not affect the artifact.
pub fn compile(spec: &FuncSpec, env: &SymbolTable) -> Result<Schema, CompileError> {
    let mut builder = SchemaBuilder::new(naming::input_props_name(&spec.name));

    for param in spec.params.iter().filter(|p| !p.is_receiver()) {
        let ty = match &param.annotation {
            Some(text) => types::resolve(text, env)?,
            None => TypeCheck::Any,
        };
        let ty_text = param
            .annotation
            .clone()
            .unwrap_or_else(|| UNCONSTRAINED.to_string());

        let (default, binding) = match param.kind {
            ParamKind::Positional => (param.default.clone(), FieldBinding::Scalar),
            ParamKind::VarArgs => (Some(Value::Tuple(vec![])), FieldBinding::VarArgs),
            ParamKind::KwArgs => (Some(Value::Dict(vec![])), FieldBinding::KwArgs),
        };

        builder = builder.field(FieldDef {
            name: param.name.clone(),
            ty,
            ty_text,
            default,
            binding,
        });
    }

    Ok(builder.build())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::extract::extract_spec_from_source;

    fn compiled(source: &str) -> Schema {
        let spec = match extract_spec_from_source(source) {
            Ok(spec) => spec,
            Err(err) => panic!("extraction failed: {err}"),
        };
        match compile(&spec, &SymbolTable::new()) {
            Ok(schema) => schema,
            Err(err) => panic!("compile failed: {err}"),
        }
    }

    #[test]
    fn field_order_matches_declaration_order() {
        let schema = compiled("def g(a: int, *args, k: str = 'd', **kw):");
        let names: Vec<&str> = schema.fields().iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, vec!["a", "args", "k", "kw"]);
    }

    #[test]
    fn schema_name_derives_from_function_name() {
        let schema = compiled("def simple_func(a: int):");
        assert_eq!(schema.name(), "SimpleFuncInputProps");
    }

    #[test]
    fn variadic_defaults() {
        let schema = compiled("def g(a: int, *args, **kw):");
        assert_eq!(schema.fields()[1].default, Some(Value::Tuple(vec![])));
        assert_eq!(schema.fields()[1].binding, FieldBinding::VarArgs);
        assert_eq!(schema.fields()[2].default, Some(Value::Dict(vec![])));
        assert_eq!(schema.fields()[2].binding, FieldBinding::KwArgs);
    }

    #[test]
    fn required_field_has_no_default() {
        let schema = compiled("def f(a: int):");
        assert_eq!(schema.fields()[0].default, None);
    }

    #[test]
    fn receiver_is_excluded() {
        let schema = compiled("def method(self, x: int):");
        assert_eq!(schema.fields().len(), 1);
        assert_eq!(schema.fields()[0].name, "x");
    }

    #[test]
    fn unannotated_is_unconstrained() {
        let schema = compiled("def f(x):");
        assert_eq!(schema.fields()[0].ty, TypeCheck::Any);
        assert_eq!(schema.fields()[0].ty_text, "any");
    }

    #[test]
    fn unknown_annotation_fails_compilation() {
        let spec = match extract_spec_from_source("def f(x: Mystery):") {
            Ok(spec) => spec,
            Err(err) => panic!("extraction failed: {err}"),
        };
        let err = compile(&spec, &SymbolTable::new()).unwrap_err();
        assert!(matches!(err, CompileError::UnknownType(name) if name == "Mystery"));
    }
}
