//! Runtime values checked against synthesized schemas.
//!
//! A [`Value`] is the dynamic representation of one call argument. Literal
//! defaults in a signature declaration also parse into values, so the same
//! type doubles as the canonical form of a rendered default.

use serde::{Deserialize, Serialize};

/// A dynamic value supplied as a call argument (or declared as a default).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Value {
    None,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    List(Vec<Value>),
    Tuple(Vec<Value>),
    /// Ordered string-keyed mapping. Order is preserved so rendering stays
    /// deterministic.
    Dict(Vec<(String, Value)>),
    /// An instance of a user-declared class, matched by class name against
    /// the caller's symbol table.
    Instance(Instance),
}

/// An opaque instance of a user-declared class.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Instance {
    /// Name of the class this value is an instance of.
    pub class: String,
}

impl Value {
    /// Shorthand for an instance of the named class.
    pub fn instance(class: impl Into<String>) -> Self {
        Value::Instance(Instance {
            class: class.into(),
        })
    }

    /// The value's type name as it appears in error messages.
    pub fn type_name(&self) -> String {
        match self {
            Value::None => "NoneType".to_string(),
            Value::Bool(_) => "bool".to_string(),
            Value::Int(_) => "int".to_string(),
            Value::Float(_) => "float".to_string(),
            Value::Str(_) => "str".to_string(),
            Value::List(_) => "list".to_string(),
            Value::Tuple(_) => "tuple".to_string(),
            Value::Dict(_) => "dict".to_string(),
            Value::Instance(inst) => inst.class.clone(),
        }
    }

    /// Canonical textual representation, used when rendering defaults into
    /// generated schema source.
    ///
    /// Two equal values always render to the same bytes: strings are
    /// double-quoted and escaped, floats always carry a decimal point, and
    /// one-element tuples keep their trailing comma.
    pub fn repr(&self) -> String {
        match self {
            Value::None => "None".to_string(),
            Value::Bool(true) => "True".to_string(),
            Value::Bool(false) => "False".to_string(),
            Value::Int(i) => i.to_string(),
            Value::Float(x) => {
                let s = x.to_string();
                if s.contains('.') || s.contains('e') || s.contains("inf") || s.contains("NaN") {
                    s
                } else {
                    format!("{s}.0")
                }
            }
            Value::Str(s) => format!("{s:?}"),
            Value::List(items) => {
                let parts: Vec<String> = items.iter().map(Value::repr).collect();
                format!("[{}]", parts.join(", "))
            }
            Value::Tuple(items) => match items.len() {
                0 => "()".to_string(),
                1 => format!("({},)", items[0].repr()),
                _ => {
                    let parts: Vec<String> = items.iter().map(Value::repr).collect();
                    format!("({})", parts.join(", "))
                }
            },
            Value::Dict(entries) => {
                let parts: Vec<String> = entries
                    .iter()
                    .map(|(k, v)| format!("{k:?}: {}", v.repr()))
                    .collect();
                format!("{{{}}}", parts.join(", "))
            }
            Value::Instance(inst) => format!("<{} instance>", inst.class),
        }
    }

    /// Convert a `serde_json::Value` into an argus value.
    ///
    /// Arrays become lists and objects become dicts; integral numbers that
    /// fit `i64` become ints, everything else numeric becomes a float.
    pub fn from_json(json: &serde_json::Value) -> Value {
        match json {
            serde_json::Value::Null => Value::None,
            serde_json::Value::Bool(b) => Value::Bool(*b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Int(i)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s.clone()),
            serde_json::Value::Array(items) => {
                Value::List(items.iter().map(Value::from_json).collect())
            }
            serde_json::Value::Object(map) => Value::Dict(
                map.iter()
                    .map(|(k, v)| (k.clone(), Value::from_json(v)))
                    .collect(),
            ),
        }
    }

    /// Convert an argus value to a `serde_json::Value`.
    ///
    /// Tuples serialize as arrays; non-finite floats become null; instances
    /// serialize as their placeholder representation.
    pub fn to_json(&self) -> serde_json::Value {
        match self {
            Value::None => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(*b),
            Value::Int(i) => serde_json::Value::Number((*i).into()),
            Value::Float(x) => serde_json::Number::from_f64(*x)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s.clone()),
            Value::List(items) | Value::Tuple(items) => {
                serde_json::Value::Array(items.iter().map(Value::to_json).collect())
            }
            Value::Dict(entries) => serde_json::Value::Object(
                entries
                    .iter()
                    .map(|(k, v)| (k.clone(), v.to_json()))
                    .collect(),
            ),
            Value::Instance(_) => serde_json::Value::String(self.repr()),
        }
    }
}

/// The actual arguments of one concrete call: positionals in order plus
/// keywords in the order they were written.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CallArgs {
    pub positional: Vec<Value>,
    pub keyword: Vec<(String, Value)>,
}

impl CallArgs {
    /// Create an empty argument capture.
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a positional argument.
    pub fn arg(mut self, value: Value) -> Self {
        self.positional.push(value);
        self
    }

    /// Append a keyword argument.
    pub fn kwarg(mut self, name: impl Into<String>, value: Value) -> Self {
        self.keyword.push((name.into(), value));
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn repr_scalars() {
        assert_eq!(Value::None.repr(), "None");
        assert_eq!(Value::Bool(true).repr(), "True");
        assert_eq!(Value::Bool(false).repr(), "False");
        assert_eq!(Value::Int(42).repr(), "42");
        assert_eq!(Value::Int(-3).repr(), "-3");
        assert_eq!(Value::Str("default".into()).repr(), "\"default\"");
    }

    #[test]
    fn repr_float_always_has_decimal_point() {
        assert_eq!(Value::Float(3.14).repr(), "3.14");
        assert_eq!(Value::Float(1.0).repr(), "1.0");
        assert_eq!(Value::Float(-2.0).repr(), "-2.0");
    }

    #[test]
    fn repr_string_is_double_quoted_and_escaped() {
        assert_eq!(Value::Str("a \"b\"".into()).repr(), r#""a \"b\"""#);
    }

    #[test]
    fn repr_collections() {
        assert_eq!(
            Value::List(vec![Value::Int(1), Value::Int(2)]).repr(),
            "[1, 2]"
        );
        assert_eq!(Value::Tuple(vec![]).repr(), "()");
        assert_eq!(Value::Tuple(vec![Value::Int(1)]).repr(), "(1,)");
        assert_eq!(
            Value::Tuple(vec![Value::Int(1), Value::Int(2)]).repr(),
            "(1, 2)"
        );
        assert_eq!(Value::Dict(vec![]).repr(), "{}");
        assert_eq!(
            Value::Dict(vec![("k".into(), Value::Int(1))]).repr(),
            "{\"k\": 1}"
        );
    }

    #[test]
    fn type_names() {
        assert_eq!(Value::Int(1).type_name(), "int");
        assert_eq!(Value::Str("x".into()).type_name(), "str");
        assert_eq!(Value::instance("A").type_name(), "A");
    }

    #[test]
    fn json_round_trip_for_plain_data() {
        let json: serde_json::Value =
            serde_json::from_str(r#"{"count": 5, "items": ["a", true], "rate": 0.5}"#)
                .unwrap_or(serde_json::Value::Null);
        let value = Value::from_json(&json);
        assert_eq!(value.to_json(), json);
    }

    #[test]
    fn call_args_builder_preserves_order() {
        let args = CallArgs::new()
            .arg(Value::Int(1))
            .arg(Value::Int(2))
            .kwarg("k", Value::Str("x".into()));
        assert_eq!(args.positional.len(), 2);
        assert_eq!(args.keyword[0].0, "k");
    }
}
