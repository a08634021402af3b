//! The live validation artifact: a schema of typed fields that a concrete
//! call's arguments are bound against.
//!
//! A [`Schema`] is built once per function (see [`crate::compile`]) and is
//! immutable afterwards. [`Schema::instantiate`] mirrors call semantics:
//! positionals bind to fields in declaration order, parameters declared
//! after a variadic-positional field are keyword-only, leftover positionals
//! are absorbed by the variadic field, unmatched keywords by the
//! keyword-variadic field. Field checks run in declaration order and stop
//! at the first violation.

use crate::error::ValidationError;
use crate::types::TypeCheck;
use crate::value::{CallArgs, Value};

/// How a field binds call arguments.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldBinding {
    /// One positional-or-keyword argument.
    Scalar,
    /// Absorbs leftover positional arguments as a tuple.
    VarArgs,
    /// Absorbs unmatched keyword arguments as a dict.
    KwArgs,
}

/// One typed field of a schema.
#[derive(Debug, Clone)]
pub struct FieldDef {
    pub name: String,
    pub ty: TypeCheck,
    /// The annotation as originally written, for error messages.
    pub ty_text: String,
    /// Absent means required: a missing argument is a validation failure.
    pub default: Option<Value>,
    pub binding: FieldBinding,
}

/// A compiled validation schema.
#[derive(Debug, Clone)]
pub struct Schema {
    name: String,
    fields: Vec<FieldDef>,
}

/// Field-by-field construction of a [`Schema`].
#[derive(Debug)]
pub struct SchemaBuilder {
    name: String,
    fields: Vec<FieldDef>,
}

impl SchemaBuilder {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            fields: Vec::new(),
        }
    }

    /// Append a field. Declaration order is binding and check order.
    pub fn field(mut self, field: FieldDef) -> Self {
        self.fields.push(field);
        self
    }

    pub fn build(self) -> Schema {
        Schema {
            name: self.name,
            fields: self.fields,
        }
    }
}

/// The values a successful instantiation bound, field by field.
#[derive(Debug, Clone, PartialEq)]
pub struct BoundArgs {
    values: Vec<(String, Value)>,
}

impl BoundArgs {
    /// Bound value of the named field.
    pub fn get(&self, name: &str) -> Option<&Value> {
        self.values
            .iter()
            .find(|(field, _)| field == name)
            .map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = &(String, Value)> {
        self.values.iter()
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl Schema {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn fields(&self) -> &[FieldDef] {
        &self.fields
    }

    /// Bind and check `args` against this schema.
    ///
    /// Binding failures (too many positionals, unexpected or duplicate
    /// keywords) and field failures (missing required, type mismatch) are
    /// all [`ValidationError`]s. Field checks run in declaration order and
    /// fail fast; defaults are trusted and not re-checked.
    pub fn instantiate(&self, args: &CallArgs) -> Result<BoundArgs, ValidationError> {
        let varargs_at = self
            .fields
            .iter()
            .position(|f| f.binding == FieldBinding::VarArgs);
        let kwargs_at = self
            .fields
            .iter()
            .position(|f| f.binding == FieldBinding::KwArgs);

        let mut assigned: Vec<Option<Value>> = vec![None; self.fields.len()];

        // Positional binding: scalar fields declared before the variadic
        // field, in order. Fields after it are keyword-only.
        let positional_limit = varargs_at.unwrap_or(self.fields.len());
        let slots: Vec<usize> = self.fields[..positional_limit]
            .iter()
            .enumerate()
            .filter(|(_, f)| f.binding == FieldBinding::Scalar)
            .map(|(i, _)| i)
            .collect();

        for (slot, value) in slots.iter().zip(args.positional.iter()) {
            assigned[*slot] = Some(value.clone());
        }
        if args.positional.len() > slots.len() {
            match varargs_at {
                Some(idx) => {
                    assigned[idx] = Some(Value::Tuple(args.positional[slots.len()..].to_vec()));
                }
                None => {
                    return Err(ValidationError::TooManyPositional {
                        schema: self.name.clone(),
                        expected: slots.len(),
                        got: args.positional.len(),
                    });
                }
            }
        }

        // Keyword binding. Unmatched keywords fall into the keyword-variadic
        // field when there is one.
        let mut extra: Vec<(String, Value)> = Vec::new();
        for (key, value) in &args.keyword {
            let target = self
                .fields
                .iter()
                .position(|f| f.binding == FieldBinding::Scalar && f.name == *key);
            match target {
                Some(idx) => {
                    if assigned[idx].is_some() {
                        return Err(ValidationError::DuplicateArgument {
                            schema: self.name.clone(),
                            field: key.clone(),
                        });
                    }
                    assigned[idx] = Some(value.clone());
                }
                None => {
                    if kwargs_at.is_none() {
                        return Err(ValidationError::UnexpectedKeyword {
                            schema: self.name.clone(),
                            field: key.clone(),
                        });
                    }
                    if extra.iter().any(|(k, _)| k == key) {
                        return Err(ValidationError::DuplicateArgument {
                            schema: self.name.clone(),
                            field: key.clone(),
                        });
                    }
                    extra.push((key.clone(), value.clone()));
                }
            }
        }
        if let Some(idx) = kwargs_at {
            if !extra.is_empty() {
                assigned[idx] = Some(Value::Dict(extra));
            }
        }

        // Field phase: declaration order, fail fast.
        let mut values = Vec::with_capacity(self.fields.len());
        for (idx, field) in self.fields.iter().enumerate() {
            match assigned[idx].take() {
                Some(value) => {
                    if !field.ty.check(&value) {
                        return Err(ValidationError::TypeMismatch {
                            schema: self.name.clone(),
                            field: field.name.clone(),
                            expected: field.ty_text.clone(),
                            actual: value.type_name(),
                        });
                    }
                    values.push((field.name.clone(), value));
                }
                None => match &field.default {
                    Some(default) => values.push((field.name.clone(), default.clone())),
                    None => {
                        return Err(ValidationError::MissingField {
                            schema: self.name.clone(),
                            field: field.name.clone(),
                        });
                    }
                },
            }
        }

        Ok(BoundArgs { values })
    }
}
