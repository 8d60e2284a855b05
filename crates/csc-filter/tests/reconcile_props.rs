//! Property tests for reconciliation laws

use csc_filter::prelude::*;
use csc_filter::{prune_empty_arrays, reconcile};
use csc_test_utils::FilterHarness;
use proptest::prelude::*;
use serde_json::{Map, Value};

fn raw_value() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::Bool),
        any::<i64>().prop_map(Value::from),
        "[a-d,]{0,8}".prop_map(Value::String),
        Just(Value::String("true".into())),
        Just(Value::String("false".into())),
        proptest::collection::vec("[a-d]{0,2}", 0..4)
            .prop_map(|items| Value::Array(items.into_iter().map(Value::String).collect())),
    ]
}

fn field_spec() -> impl Strategy<Value = FilterFieldSpec> {
    (
        prop_oneof![Just(FilterType::Boolean), Just(FilterType::String), Just(FilterType::Array)],
        proptest::option::of(proptest::collection::vec("[a-d]", 0..4)),
        proptest::option::of(raw_value()),
    )
        .prop_map(|(kind, options, default_option)| FilterFieldSpec {
            kind,
            options,
            default_option,
        })
}

fn schema() -> impl Strategy<Value = FilterSchema> {
    proptest::collection::vec(("[k-n]", field_spec()), 0..5).prop_map(|fields| fields.into_iter().collect())
}

fn raw_object() -> impl Strategy<Value = Map<String, Value>> {
    proptest::collection::vec(("[k-n]", raw_value()), 0..5).prop_map(|pairs| pairs.into_iter().collect())
}

fn stored_text() -> impl Strategy<Value = Option<String>> {
    prop_oneof![
        Just(None),
        Just(Some("not json".to_string())),
        Just(Some("[1,2]".to_string())),
        raw_object().prop_map(|map| Some(Value::Object(map).to_string())),
    ]
}

proptest! {
    #[test]
    fn prop_init_is_idempotent(schema in schema(), query in raw_object(), stored in stored_text()) {
        let mut harness = FilterHarness::new().with_query(QueryParams::from(query));
        if let Some(text) = &stored {
            harness = harness.with_stored("k", text);
        }

        let first = harness.service.init("k", &schema);
        let second = harness.service.init("k", &schema);
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_result_keys_are_declared(schema in schema(), query in raw_object(), snapshot in raw_object()) {
        let filters = reconcile(&schema, &QueryParams::from(query), &snapshot);
        for (key, _) in filters.iter() {
            prop_assert!(schema.contains_key(key));
        }
    }

    #[test]
    fn prop_valid_query_wins(schema in schema(), query in raw_object(), snapshot in raw_object()) {
        let query = QueryParams::from(query);
        let filters = reconcile(&schema, &query, &snapshot);

        for (key, spec) in schema.iter() {
            if let Some(expected) = query.get(key).and_then(|raw| csc_filter::coerce::interpret(spec, raw)) {
                prop_assert_eq!(filters.get(key), Some(&expected));
            }
        }
    }

    #[test]
    fn prop_invalid_everywhere_is_omitted(schema in schema(), query in raw_object(), snapshot in raw_object()) {
        let query = QueryParams::from(query);
        let filters = reconcile(&schema, &query, &snapshot);

        for (key, spec) in schema.iter() {
            let any_valid = [query.get(key), snapshot.get(key), spec.default_option.as_ref()]
                .into_iter()
                .flatten()
                .any(|raw| csc_filter::coerce::interpret(spec, raw).is_some());
            prop_assert_eq!(filters.contains_key(key), any_valid);
        }
    }

    #[test]
    fn prop_update_prunes_and_overwrites(previous in raw_object(), patch in raw_object()) {
        let harness = FilterHarness::new();
        harness.service.update("k", &previous);
        harness.service.update("k", &patch);

        let stored = harness.stored_json("k").unwrap();
        prop_assert_eq!(stored, Value::Object(prune_empty_arrays(&patch)));
    }

    #[test]
    fn prop_resolved_arrays_are_never_empty(schema in schema(), query in raw_object(), snapshot in raw_object()) {
        let filters = reconcile(&schema, &QueryParams::from(query), &snapshot);
        for (_, value) in filters.iter() {
            if let FilterValue::Array(items) = value {
                prop_assert!(!items.is_empty());
            }
        }
    }
}
