//! Signature extraction: from source text (or a parsed node) to a
//! structured function specification.
//!
//! Extraction locates the FIRST `def` declaration in its input, parses
//! exactly that header, and flattens it into a [`FuncSpec`] whose
//! annotations and defaults are canonical text. The specification is what
//! the synthesizer and compiler consume; it is constructed fresh per
//! extraction and never mutated afterwards.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::ast::{FunctionDecl, ParamKind};
use crate::error::ExtractError;
use crate::lexer::{self, Token};
use crate::parser;
use crate::value::Value;

/// Structured description of one declared parameter, annotation in
/// canonical textual form.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ParamSpec {
    pub name: String,
    pub kind: ParamKind,
    /// Canonical annotation text; `None` means unconstrained.
    pub annotation: Option<String>,
    /// Literal default, present only for positional-or-keyword parameters
    /// that declare one.
    pub default: Option<Value>,
}

impl ParamSpec {
    /// True for the implicit `self`/`cls` receiver of a method-shaped
    /// declaration. Receivers are excluded from generated schemas and
    /// constructor forwarding.
    pub fn is_receiver(&self) -> bool {
        self.kind == ParamKind::Positional && (self.name == "self" || self.name == "cls")
    }
}

impl fmt::Display for ParamSpec {
    /// Canonical source rendering of one parameter, including its variadic
    /// marker, annotation, and default.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let prefix = match self.kind {
            ParamKind::Positional => "",
            ParamKind::VarArgs => "*",
            ParamKind::KwArgs => "**",
        };
        match (&self.annotation, &self.default) {
            (Some(ty), Some(default)) => {
                write!(f, "{prefix}{}: {ty} = {}", self.name, default.repr())
            }
            (Some(ty), None) => write!(f, "{prefix}{}: {ty}", self.name),
            (None, Some(default)) => write!(f, "{prefix}{}={}", self.name, default.repr()),
            (None, None) => write!(f, "{prefix}{}", self.name),
        }
    }
}

/// Structured description of one function signature.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuncSpec {
    pub name: String,
    pub params: Vec<ParamSpec>,
    pub return_annotation: Option<String>,
}

/// Render a parameter list back to canonical source text.
///
/// Deterministic, and round-trips through the parser: variadic markers,
/// annotations, and defaults all survive.
pub fn render_param_list(params: &[ParamSpec]) -> String {
    let parts: Vec<String> = params.iter().map(|p| p.to_string()).collect();
    parts.join(", ")
}

/// Find and parse the first `def` declaration header in `source`.
///
/// The input may contain helper declarations, decorators, and function
/// bodies around the header; only the header's own tokens have to be
/// well-formed. Fails with [`ExtractError::NoFunction`] when no `def`
/// exists at all.
pub fn extract_decl(source: &str) -> Result<FunctionDecl, ExtractError> {
    let tokens = lexer::tokenize(source);

    let start = tokens
        .iter()
        .position(|st| st.token == Token::Def)
        .ok_or(ExtractError::NoFunction)?;

    // The header ends at the first colon outside any bracket nesting.
    // Annotation colons sit inside the parameter parens, and colons in
    // dict-literal defaults sit inside braces, so depth tracking is enough.
    let mut depth: usize = 0;
    let mut end = None;
    for (i, st) in tokens.iter().enumerate().skip(start) {
        match st.token {
            Token::LParen | Token::LBracket | Token::LBrace => depth += 1,
            Token::RParen | Token::RBracket | Token::RBrace => depth = depth.saturating_sub(1),
            Token::Colon if depth == 0 && i > start => {
                end = Some(i);
                break;
            }
            _ => {}
        }
    }
    let end = end.ok_or_else(|| {
        ExtractError::Malformed("declaration header has no terminating colon".to_string())
    })?;

    tracing::trace!(
        "extracting declaration header from tokens {}..={}",
        start,
        end
    );

    parser::parse_decl_tokens(&tokens[start..=end], source.len()).map_err(|errs| {
        let messages: Vec<String> = errs.iter().map(|e| e.to_string()).collect();
        ExtractError::Malformed(messages.join("; "))
    })
}

/// Flatten an already-parsed declaration into a [`FuncSpec`], skipping the
/// re-parse entirely.
pub fn extract_spec(decl: &FunctionDecl) -> FuncSpec {
    FuncSpec {
        name: decl.name.clone(),
        params: decl
            .params
            .iter()
            .map(|p| ParamSpec {
                name: p.name.clone(),
                kind: p.kind,
                annotation: p.annotation.as_ref().map(|t| t.to_string()),
                default: p.default.clone(),
            })
            .collect(),
        return_annotation: decl.returns.as_ref().map(|t| t.to_string()),
    }
}

/// Extract a [`FuncSpec`] straight from source text.
pub fn extract_spec_from_source(source: &str) -> Result<FuncSpec, ExtractError> {
    Ok(extract_spec(&extract_decl(source)?))
}
