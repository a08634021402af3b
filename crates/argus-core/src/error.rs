//! Error kinds for the synthesis and validation pipeline.
//!
//! Three families, matching the three ways a validation call can go wrong:
//!
//! - [`ExtractError`] — no usable declaration in the input
//! - [`CompileError`] — a synthesized schema could not be built (an
//!   internal invariant violation, or an annotation naming a type the
//!   caller never supplied)
//! - [`ValidationError`] — the actual arguments violate the schema; the
//!   one error kind expected under normal operation
//!
//! Nothing is recovered locally: every failure propagates unchanged to the
//! validation caller.

use thiserror::Error;

/// Extraction failed to find or parse a function declaration.
#[derive(Debug, Clone, Error)]
pub enum ExtractError {
    #[error("no function declaration found in source")]
    NoFunction,
    #[error("malformed function declaration: {0}")]
    Malformed(String),
}

/// A synthesized schema could not be compiled into a live artifact.
#[derive(Debug, Clone, Error)]
pub enum CompileError {
    #[error("unknown type `{0}` in annotation")]
    UnknownType(String),
    #[error("invalid type annotation `{text}`: {message}")]
    BadAnnotation { text: String, message: String },
    #[error("type alias chain starting at `{0}` is too deep or cyclic")]
    AliasCycle(String),
}

/// The actual arguments of a call violate the synthesized schema.
///
/// Every variant identifies the offending field by name.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("{schema}: missing required argument `{field}`")]
    MissingField { schema: String, field: String },
    #[error("{schema}: argument `{field}` expected {expected}, got {actual}")]
    TypeMismatch {
        schema: String,
        field: String,
        expected: String,
        actual: String,
    },
    #[error("{schema}: takes {expected} positional arguments but {got} were given")]
    TooManyPositional {
        schema: String,
        expected: usize,
        got: usize,
    },
    #[error("{schema}: unexpected keyword argument `{field}`")]
    UnexpectedKeyword { schema: String, field: String },
    #[error("{schema}: got multiple values for argument `{field}`")]
    DuplicateArgument { schema: String, field: String },
}

/// Top-level error for a validation call.
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Extract(#[from] ExtractError),
    #[error(transparent)]
    Compile(#[from] CompileError),
    #[error(transparent)]
    Validation(#[from] ValidationError),
}

impl Error {
    /// The schema-construction failure, when this is one.
    pub fn as_validation(&self) -> Option<&ValidationError> {
        match self {
            Error::Validation(err) => Some(err),
            _ => None,
        }
    }
}
