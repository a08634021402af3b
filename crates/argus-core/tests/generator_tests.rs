//! Integration tests for schema source synthesis.
//!
//! These pin the exact generated text for representative signatures, and
//! property-test the determinism and order-preservation guarantees.

use argus_core::ast::ParamKind;
use argus_core::extract::{extract_spec_from_source, FuncSpec, ParamSpec};
use argus_core::synth;
use argus_core::value::Value;
use proptest::prelude::*;

fn spec_of(source: &str) -> FuncSpec {
    extract_spec_from_source(source).expect("extraction should succeed")
}

#[test]
fn input_props_simple() {
    let spec = spec_of(
        r#"
def simple_func(arg1: int, arg2: str = "default") -> str:
    return f"{arg1} {arg2}"
"#,
    );
    let expected = "\
class SimpleFuncInputProps(Schema):
    arg1: int
    arg2: str = \"default\"

    def __init__(self, arg1: int, arg2: str = \"default\"):
        super().__init__(arg1=arg1, arg2=arg2)";
    assert_eq!(synth::input_schema_with_constructor(&spec).text, expected);
}

#[test]
fn input_props_complex() {
    let spec = spec_of(
        r#"
def complex_func(
    arg1: int,
    *args: tuple,
    kwarg1: str = "default",
    **kwargs
) -> dict:
    return {}
"#,
    );
    let expected = "\
class ComplexFuncInputProps(Schema):
    arg1: int
    args: tuple = ()
    kwarg1: str = \"default\"
    kwargs: any = {}

    def __init__(self, arg1: int, *args: tuple, kwarg1: str = \"default\", **kwargs):
        super().__init__(arg1=arg1, args=args, kwarg1=kwarg1, kwargs=kwargs)";
    assert_eq!(synth::input_schema_with_constructor(&spec).text, expected);
}

#[test]
fn output_props_simple() {
    let spec = spec_of("def simple_func(arg1: int, arg2: str = \"default\") -> str:");
    assert_eq!(
        synth::output_schema(&spec).text,
        "class SimpleFuncOutputProps(Schema):\n    return: str"
    );
}

#[test]
fn output_props_complex() {
    let spec = spec_of("def complex_func(arg1: int, *args: tuple, **kwargs) -> dict:");
    assert_eq!(
        synth::output_schema(&spec).text,
        "class ComplexFuncOutputProps(Schema):\n    return: dict"
    );
}

#[test]
fn constructor_simple() {
    let spec = spec_of("def simple_func(arg1: int, arg2: str = \"default\") -> str:");
    assert_eq!(
        synth::constructor(&spec).text,
        "    def __init__(self, arg1: int, arg2: str = \"default\"):\n        super().__init__(arg1=arg1, arg2=arg2)"
    );
}

#[test]
fn constructor_for_init_passes_parameter_list_through() {
    let spec = spec_of("def __init__(self, arg1: int, arg2: str = \"default\"):");
    assert_eq!(
        synth::constructor(&spec).text,
        "    def __init__(self, arg1: int, arg2: str = \"default\"):\n        super().__init__(arg1=arg1, arg2=arg2)"
    );
}

#[test]
fn numeric_and_collection_defaults_render_canonically() {
    let spec = spec_of("def f(a: int = -1, b: float = 2.0, c: list = [1, 2], d: tuple = (1,)):");
    assert_eq!(
        synth::input_schema(&spec).text,
        "class FInputProps(Schema):\n    a: int = -1\n    b: float = 2.0\n    c: list = [1, 2]\n    d: tuple = (1,)"
    );
}

fn annotation_strategy() -> impl Strategy<Value = Option<String>> {
    prop::option::of(
        prop::sample::select(vec!["int", "str", "float", "bool", "list[int]", "dict[str, int]"])
            .prop_map(String::from),
    )
}

fn default_strategy() -> impl Strategy<Value = Option<Value>> {
    prop::option::of(prop_oneof![
        any::<i64>().prop_map(Value::Int),
        any::<bool>().prop_map(Value::Bool),
        "[a-z]{0,6}".prop_map(Value::Str),
    ])
}

fn spec_strategy() -> impl Strategy<Value = FuncSpec> {
    (
        "[a-z][a-z_]{0,10}",
        prop::collection::vec(
            ("[a-z][a-z0-9]{0,6}", annotation_strategy(), default_strategy()),
            0..6,
        ),
        annotation_strategy(),
    )
        .prop_map(|(name, params, return_annotation)| FuncSpec {
            name,
            params: params
                .into_iter()
                .enumerate()
                .map(|(i, (base, annotation, default))| ParamSpec {
                    // suffix keeps names unique within the list
                    name: format!("{base}_{i}"),
                    kind: ParamKind::Positional,
                    annotation,
                    default,
                })
                .collect(),
            return_annotation,
        })
}

proptest! {
    #[test]
    fn synthesis_is_byte_deterministic(spec in spec_strategy()) {
        prop_assert_eq!(synth::input_schema(&spec), synth::input_schema(&spec));
        prop_assert_eq!(
            synth::input_schema_with_constructor(&spec),
            synth::input_schema_with_constructor(&spec)
        );
        prop_assert_eq!(synth::output_schema(&spec), synth::output_schema(&spec));
        prop_assert_eq!(synth::constructor(&spec), synth::constructor(&spec));
    }

    #[test]
    fn field_order_matches_parameter_order(spec in spec_strategy()) {
        let text = synth::input_schema(&spec).text;
        let field_names: Vec<String> = text
            .lines()
            .skip(1)
            .filter_map(|line| line.trim().split(':').next().map(str::to_string))
            .collect();
        let param_names: Vec<String> =
            spec.params.iter().map(|p| p.name.clone()).collect();
        prop_assert_eq!(field_names, param_names);
    }

    #[test]
    fn constructor_forwards_in_parameter_order(spec in spec_strategy()) {
        let text = synth::constructor(&spec).text;
        for param in &spec.params {
            let needle = format!("{}={}", param.name, param.name);
            prop_assert!(text.contains(&needle));
        }
    }
}
