//! Per-type interpretation of raw filter values
//!
//! Each function returns `None` for a value that is invalid for the field;
//! the caller then moves on to the next source.

use crate::schema::{FilterFieldSpec, FilterType};
use crate::value::FilterValue;
use serde_json::Value;

/// Interpret `raw` according to `spec`
#[must_use]
pub fn interpret(spec: &FilterFieldSpec, raw: &Value) -> Option<FilterValue> {
    match spec.kind {
        FilterType::Boolean => interpret_boolean(raw).map(FilterValue::Bool),
        FilterType::String => interpret_string(spec, raw).map(FilterValue::String),
        FilterType::Array => interpret_array(spec, raw).map(FilterValue::Array),
    }
}

/// `true`/`false` or the exact strings `"true"`/`"false"`
#[must_use]
pub fn interpret_boolean(raw: &Value) -> Option<bool> {
    match raw {
        Value::Bool(b) => Some(*b),
        Value::String(s) if s == "true" => Some(true),
        Value::String(s) if s == "false" => Some(false),
        _ => None,
    }
}

/// Any string, restricted to `options` when declared
#[must_use]
pub fn interpret_string(spec: &FilterFieldSpec, raw: &Value) -> Option<String> {
    match raw {
        Value::String(s) if spec.allows(s) => Some(s.clone()),
        _ => None,
    }
}

/// String sequence or comma-separated string, intersected with `options`
///
/// Non-string elements and blank entries are dropped. An empty result is
/// invalid.
#[must_use]
pub fn interpret_array(spec: &FilterFieldSpec, raw: &Value) -> Option<Vec<String>> {
    let items: Vec<String> = match raw {
        Value::Array(items) => items
            .iter()
            .filter_map(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        Value::String(s) => s
            .split(',')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string)
            .collect(),
        _ => return None,
    };

    let items: Vec<String> = items.into_iter().filter(|item| spec.allows(item)).collect();

    (!items.is_empty()).then_some(items)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn boolean_accepts_literals_and_strings() {
        assert_eq!(interpret_boolean(&json!(true)), Some(true));
        assert_eq!(interpret_boolean(&json!(false)), Some(false));
        assert_eq!(interpret_boolean(&json!("true")), Some(true));
        assert_eq!(interpret_boolean(&json!("false")), Some(false));
    }

    #[test]
    fn boolean_is_case_sensitive() {
        assert_eq!(interpret_boolean(&json!("True")), None);
        assert_eq!(interpret_boolean(&json!("notABoolean")), None);
        assert_eq!(interpret_boolean(&json!(1)), None);
    }

    #[test]
    fn string_rejects_non_strings() {
        let spec = FilterFieldSpec::string();
        assert_eq!(interpret_string(&spec, &json!(5)), None);
        assert_eq!(interpret_string(&spec, &json!(["a"])), None);
        assert_eq!(interpret_string(&spec, &json!("a")), Some("a".to_string()));
    }

    #[test]
    fn string_checks_options() {
        let spec = FilterFieldSpec::string().with_options(["filter1", "filter2"]);
        assert_eq!(interpret_string(&spec, &json!("notFromOptions")), None);
        assert_eq!(interpret_string(&spec, &json!("filter2")), Some("filter2".to_string()));
    }

    #[test]
    fn array_splits_and_trims() {
        let spec = FilterFieldSpec::array();
        assert_eq!(
            interpret_array(&spec, &json!("a, b,,c ")),
            Some(vec!["a".to_string(), "b".to_string(), "c".to_string()])
        );
    }

    #[test]
    fn array_rejects_scalars() {
        let spec = FilterFieldSpec::array();
        assert_eq!(interpret_array(&spec, &json!(123)), None);
        assert_eq!(interpret_array(&spec, &json!(true)), None);
    }

    #[test]
    fn array_intersects_options_in_input_order() {
        let spec = FilterFieldSpec::array().with_options(["a", "b", "c"]);
        assert_eq!(
            interpret_array(&spec, &json!(["c", "z", "a"])),
            Some(vec!["c".to_string(), "a".to_string()])
        );
        assert_eq!(interpret_array(&spec, &json!("z")), None);
    }

    #[test]
    fn empty_array_is_invalid() {
        let spec = FilterFieldSpec::array();
        assert_eq!(interpret_array(&spec, &json!([])), None);
        assert_eq!(interpret_array(&spec, &json!("")), None);
    }
}
