//! Deterministic synthesis of schema source text from a function
//! specification.
//!
//! Three kinds of artifact are generated:
//!
//! - **input schema** — one field per non-receiver parameter, in
//!   declaration order, with a fixed default policy
//! - **constructor** — a `def __init__` mirroring the original parameter
//!   list and forwarding every parameter by name
//! - **output schema** — a single `return` field typed as the return
//!   annotation
//!
//! Byte-identical specifications synthesize byte-identical text, for all
//! kinds, independent of call order. The text is the canonical, reviewable
//! form of a schema; live artifacts are built separately by
//! [`crate::compile`].

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::ParamKind;
use crate::extract::{render_param_list, FuncSpec, ParamSpec};
use crate::naming;

/// The unconstrained type marker, used when a parameter or return value
/// carries no annotation.
pub const UNCONSTRAINED: &str = "any";

const INDENT: &str = "    ";

/// Which artifact a piece of generated source is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum SourceKind {
    InputSchema,
    OutputSchema,
    Constructor,
}

/// Synthesized source text for one artifact.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SchemaSource {
    pub kind: SourceKind,
    pub text: String,
}

impl fmt::Display for SchemaSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.text)
    }
}

/// Synthesize the input schema for `spec`, fields only.
pub fn input_schema(spec: &FuncSpec) -> SchemaSource {
    SchemaSource {
        kind: SourceKind::InputSchema,
        text: input_schema_text(spec),
    }
}

/// Synthesize the input schema with its mirrored constructor appended,
/// separated so the result reads as one schema type containing both.
pub fn input_schema_with_constructor(spec: &FuncSpec) -> SchemaSource {
    SchemaSource {
        kind: SourceKind::InputSchema,
        text: format!("{}\n\n{}", input_schema_text(spec), constructor_text(spec)),
    }
}

/// Synthesize the mirrored constructor for `spec`.
pub fn constructor(spec: &FuncSpec) -> SchemaSource {
    SchemaSource {
        kind: SourceKind::Constructor,
        text: constructor_text(spec),
    }
}

/// Synthesize the output schema for `spec`: a single `return` field typed
/// as the return annotation, or `any` when absent.
pub fn output_schema(spec: &FuncSpec) -> SchemaSource {
    let annotation = spec.return_annotation.as_deref().unwrap_or(UNCONSTRAINED);
    SchemaSource {
        kind: SourceKind::OutputSchema,
        text: format!(
            "class {}(Schema):\n{INDENT}return: {annotation}",
            naming::output_props_name(&spec.name)
        ),
    }
}

fn input_schema_text(spec: &FuncSpec) -> String {
    let mut lines = vec![format!(
        "class {}(Schema):",
        naming::input_props_name(&spec.name)
    )];

    for param in spec.params.iter().filter(|p| !p.is_receiver()) {
        lines.push(field_line(param));
    }

    lines.join("\n")
}

/// One field line, applying the default policy: explicit default as its
/// canonical text, `()` for variadic-positional, `{}` for
/// keyword-variadic, no default (required) otherwise.
fn field_line(param: &ParamSpec) -> String {
    let annotation = param.annotation.as_deref().unwrap_or(UNCONSTRAINED);
    match (&param.default, param.kind) {
        (Some(default), _) => {
            format!("{INDENT}{}: {annotation} = {}", param.name, default.repr())
        }
        (None, ParamKind::VarArgs) => format!("{INDENT}{}: {annotation} = ()", param.name),
        (None, ParamKind::KwArgs) => format!("{INDENT}{}: {annotation} = {{}}", param.name),
        (None, ParamKind::Positional) => format!("{INDENT}{}: {annotation}", param.name),
    }
}

fn constructor_text(spec: &FuncSpec) -> String {
    // A declaration already named __init__ is constructor-shaped and its
    // parameter list passes through as-is. Anything else gets `self` as
    // the method's own first parameter, ahead of the original list minus
    // any receiver it carried.
    let head = if spec.name == "__init__" {
        format!(
            "{INDENT}def __init__({}):",
            render_param_list(&spec.params)
        )
    } else {
        let rest: Vec<ParamSpec> = spec
            .params
            .iter()
            .filter(|p| !p.is_receiver())
            .cloned()
            .collect();
        if rest.is_empty() {
            format!("{INDENT}def __init__(self):")
        } else {
            format!("{INDENT}def __init__(self, {}):", render_param_list(&rest))
        }
    };

    let forwarded: Vec<String> = spec
        .params
        .iter()
        .filter(|p| !p.is_receiver())
        .map(|p| format!("{}={}", p.name, p.name))
        .collect();
    let body = format!("{INDENT}{INDENT}super().__init__({})", forwarded.join(", "));

    format!("{head}\n{body}")
}
