//! The call validator: orchestrates extraction, synthesis, compilation,
//! caching, and instantiation for one concrete call.
//!
//! ```ignore
//! use argus_core::{CallArgs, Function, SymbolTable, Validator, Value};
//!
//! let func = Function::parse("def f(a: int, b: str = \"default\") -> str:")?;
//! let validator = Validator::new();
//! let env = SymbolTable::new();
//! validator.validate(&func, &env, &CallArgs::new().arg(Value::Int(1)))?;
//! ```
//!
//! Validation is observation-only: arguments are never transformed, and a
//! successful call reports [`Validated::Passed`] without producing a value.
//! With validation disabled the outcome is [`Validated::Skipped`] —
//! deliberately "not performed", never "passed".

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use crate::ast::FunctionDecl;
use crate::cache::{FunctionId, SchemaCache};
use crate::compile;
use crate::env::SymbolTable;
use crate::error::{Error, ExtractError};
use crate::extract::{self, FuncSpec};
use crate::value::CallArgs;

/// Process-visible toggle for validation.
///
/// A single instance can be shared by any number of validators and flipped
/// at any time; reads are relaxed since the only effect of a race is
/// skip-vs-perform on one call.
#[derive(Debug)]
pub struct ValidationConfig {
    enabled: AtomicBool,
}

impl ValidationConfig {
    /// Validation on (the default).
    pub fn new() -> Self {
        Self {
            enabled: AtomicBool::new(true),
        }
    }

    /// Validation off.
    pub fn disabled() -> Self {
        Self {
            enabled: AtomicBool::new(false),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled.load(Ordering::Relaxed)
    }

    pub fn set_enabled(&self, enabled: bool) {
        self.enabled.store(enabled, Ordering::Relaxed);
    }
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self::new()
    }
}

/// Outcome of a validation call that did not raise.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Validated {
    /// Validation ran and the arguments satisfy the signature.
    Passed,
    /// Validation was disabled; nothing was checked.
    Skipped,
}

/// A function under validation: a parsed declaration coupled with its
/// identity.
///
/// Identity is minted per value, not derived from the name or source —
/// parsing the same source twice yields two functions with independent
/// cache entries, exactly as two distinct function objects would have.
#[derive(Debug, Clone)]
pub struct Function {
    id: FunctionId,
    decl: FunctionDecl,
    spec: FuncSpec,
}

impl Function {
    /// Parse the first declaration in `source`.
    pub fn parse(source: &str) -> Result<Self, ExtractError> {
        Ok(Self::from_decl(extract::extract_decl(source)?))
    }

    /// Wrap an already-parsed declaration (no re-parse).
    pub fn from_decl(decl: FunctionDecl) -> Self {
        let spec = extract::extract_spec(&decl);
        Self {
            id: FunctionId::mint(),
            decl,
            spec,
        }
    }

    pub fn id(&self) -> FunctionId {
        self.id
    }

    pub fn name(&self) -> &str {
        &self.spec.name
    }

    pub fn decl(&self) -> &FunctionDecl {
        &self.decl
    }

    pub fn spec(&self) -> &FuncSpec {
        &self.spec
    }
}

/// Validates concrete calls against function signatures.
///
/// Owns a [`SchemaCache`] so each function compiles once, and shares a
/// [`ValidationConfig`] with the embedding application.
#[derive(Debug)]
pub struct Validator {
    cache: SchemaCache,
    config: Arc<ValidationConfig>,
}

impl Validator {
    /// A validator with its own default (enabled) configuration.
    pub fn new() -> Self {
        Self::with_config(Arc::new(ValidationConfig::new()))
    }

    /// A validator sharing the given configuration.
    pub fn with_config(config: Arc<ValidationConfig>) -> Self {
        Self {
            cache: SchemaCache::new(),
            config,
        }
    }

    pub fn config(&self) -> &ValidationConfig {
        &self.config
    }

    /// The schema cache, exposed for introspection.
    pub fn cache(&self) -> &SchemaCache {
        &self.cache
    }

    /// Check `args` against `func`'s signature.
    ///
    /// `env` supplies the caller-visible names the signature's annotations
    /// may reference; it is consulted on the first validation of `func`
    /// (when the schema is compiled) and ignored afterwards.
    ///
    /// Any schema-construction failure is re-raised unchanged as
    /// [`Error::Validation`]: the single signal that these arguments are
    /// invalid for this signature.
    pub fn validate(
        &self,
        func: &Function,
        env: &SymbolTable,
        args: &CallArgs,
    ) -> Result<Validated, Error> {
        if !self.config.is_enabled() {
            return Ok(Validated::Skipped);
        }

        let schema = self.cache.get_or_create(func.id(), || {
            tracing::debug!("synthesizing input schema for `{}`", func.name());
            compile::compile(func.spec(), env)
        })?;

        schema.instantiate(args)?;
        Ok(Validated::Passed)
    }
}

impl Default for Validator {
    fn default() -> Self {
        Self::new()
    }
}
