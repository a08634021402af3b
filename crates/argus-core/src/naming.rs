//! Derivation of generated type names from function names.
//!
//! Case conversion is delegated to `heck`: word-boundary-aware PascalCase,
//! deterministic and stable. The rest is fixed suffixes.

use heck::ToUpperCamelCase;

/// Name of the input schema generated for `func_name`:
/// `PascalCase(func_name) + "InputProps"`.
pub fn input_props_name(func_name: &str) -> String {
    format!("{}InputProps", func_name.to_upper_camel_case())
}

/// Name of the output schema generated for `func_name`:
/// `PascalCase(func_name) + "OutputProps"`.
pub fn output_props_name(func_name: &str) -> String {
    format!("{}OutputProps", func_name.to_upper_camel_case())
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("simple_func", "SimpleFuncInputProps")]
    #[case("complex_func", "ComplexFuncInputProps")]
    #[case("f", "FInputProps")]
    #[case("__init__", "InitInputProps")]
    #[case("handle2fa", "Handle2faInputProps")]
    fn input_names(#[case] func: &str, #[case] expected: &str) {
        assert_eq!(input_props_name(func), expected);
    }

    #[test]
    fn output_name() {
        assert_eq!(output_props_name("simple_func"), "SimpleFuncOutputProps");
    }

    #[test]
    fn derivation_is_stable() {
        assert_eq!(input_props_name("a_b_c"), input_props_name("a_b_c"));
    }
}
